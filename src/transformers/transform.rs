//! Transform trait.

/// Text-level transformation.
///
/// Transforms are pure: the same input always yields the same output.
pub trait Transform {
    /// Takes ownership of the text and returns it transformed.
    fn transform_own(&self, text: String) -> String;
}
