/*! Filtering utilities

Filters operate either on a single text (see [answer]) or on an input/target pair (see [record]).

Filters implement [filter::Filter], [filter::FilterMut] or both:
- [filter::Filter] is implemented for filters that do not have state (see [answer::WordCount] for example)
- [filter::FilterMut] is implemented for filter that do have state (see [dedup::Dedup]).

Every filter returns `true` for content that is kept.
The boolean helpers named after what they detect ([has_forbidden_words], [is_overly_redundant]...)
return `true` for the *problem* they name.

[QualityGate] evaluates every stateless filter of the cascade, in order, and reports the first one that fails.
!*/
pub mod answer;
pub mod dedup;
mod filter;
mod gate;
pub mod record;
mod reject;

pub use answer::{has_forbidden_words, has_minimum_word_count, should_include_answer};
pub use filter::Filter;
pub use filter::FilterMut;
pub use gate::QualityGate;
pub use record::{is_overly_redundant, is_target_double_size};
pub use reject::RejectReason;
