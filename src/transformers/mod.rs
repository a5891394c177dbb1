/*! Text transformers.

Each normalization step is a [Transform] operating on owned strings.
[Normalizer] chains them in the order below and is what the rest of the crate uses:

1. [NewlinesToSpaces]
1. [StripUrls]
1. [CollapseWhitespace]
1. [AllowedCharset]
1. [RepeatedWords]
1. [LeadingNumbers]

!*/

mod charset;
mod cleaning;
mod normalizer;
mod repeated_words;
mod transform;

pub use charset::{clean_special_characters, is_allowed, AllowedCharset};
pub use cleaning::{
    collapse_whitespace, remove_leading_numbers, remove_urls, CollapseWhitespace,
    LeadingNumbers, NewlinesToSpaces, StripUrls,
};
pub use normalizer::Normalizer;
pub use repeated_words::{remove_repeated_words, RepeatedWords};
pub use transform::Transform;
