use super::Error;

/// Error when a caller-supplied filter names a field that the reference
/// lookup already constrains: the referencing column or the discriminator.
#[derive(Debug)]
pub(super) struct FilterConflict {
    model: Box<str>,
    field: Box<str>,
}

impl std::error::Error for FilterConflict {}

impl core::fmt::Display for FilterConflict {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "filter conflict: `{}` on `{}` is already constrained by the reference",
            self.field, self.model
        )
    }
}

impl Error {
    /// Creates a filter conflict error for `field` on `model`.
    pub fn filter_conflict(model: impl Into<String>, field: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::FilterConflict(FilterConflict {
            model: model.into().into(),
            field: field.into().into(),
        }))
    }

    /// Returns `true` if this error is a filter conflict.
    pub fn is_filter_conflict(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::FilterConflict(_))
    }
}
