use thiserror::Error;

use crate::types::traits::StoreError;

/// Top-level error taxonomy of the data-access layer.
///
/// Every variant maps to a 4xx-class failure at the HTTP boundary except
/// `Store`, which wraps backend failures. Errors are raised at the point of
/// detection and propagate unchanged; the only downgrades are documented on
/// the materializer (missing literal masked to an empty string) and the
/// filter matcher (failed edge lookup treated as "does not match").
#[derive(Error, Debug)]
pub enum DataError {
    /// Requested type name has no matching class definition.
    #[error("The class {0} is not a valid/defined RDFClass")]
    ClassNotFound(String),

    /// Requested (id, type) pair has no matching instance.
    #[error("Instance of type {type_} not found (id: {id:?})")]
    InstanceNotFound { type_: String, id: Option<i64> },

    /// Attempted creation collides with an existing singleton instance.
    #[error("Instance of type {0} already exists")]
    InstanceExists(String),

    /// Object payload references an undefined property.
    #[error("The property {0} is not a valid/defined property")]
    PropertyNotFound(String),

    /// A nested-object value was supplied for a non-instance property.
    #[error("The property {0} is not an instance property")]
    NotInstanceProperty(String),

    /// A class-valued property was supplied for a non-abstract property.
    #[error("The property {0} is not an abstract property")]
    NotAbstractProperty(String),

    /// A search query-string key does not resolve to a known property name.
    #[error("Query parameter {0} does not resolve to a known property")]
    InvalidSearchParameter(String),

    /// Two mutually exclusive pagination styles were supplied together.
    #[error("Incompatible pagination parameters: {0} and {1}")]
    IncompatibleParameters(&'static str, &'static str),

    /// Requested page is non-numeric, negative, or past the last page.
    #[error("Page {0} not found")]
    PageNotFound(String),

    /// Requested offset exceeds the result-set length.
    #[error("Offset {0} is out of range")]
    OffsetOutOfRange(i64),

    /// Storage backend failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}
