use t3match_value::{ListKind, ObjectKind};
use thiserror::Error;

/// Why a value does not match a template.
///
/// Apart from [`Mismatch::Unsupported`] these are ordinary outcomes: the
/// value simply does not conform.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Mismatch {
    #[error("type mismatch: {value} != {pattern}")]
    Type {
        value: ObjectKind,
        pattern: ObjectKind,
    },
    #[error("records don't have equal amounts of fields: {value} != {pattern}")]
    Arity { value: usize, pattern: usize },
    #[error("field '{0}' of the template not found in the value")]
    FieldMissing(String),
    #[error("field '{name}': {source}")]
    Field {
        name: String,
        #[source]
        source: Box<Mismatch>,
    },
    #[error("at least one {element} missing")]
    ElementMissing { element: String },
    #[error("{missing} element(s) missing to satisfy '?'")]
    Wildcards { missing: usize },
    #[error("value has {value} elements, template allows at most {pattern}")]
    TooManyElements { value: usize, pattern: usize },
    #[error("value has {value} elements, template needs at least {pattern}")]
    TooFewElements { value: usize, pattern: usize },
    #[error("element {position}: {reason}")]
    Sequence {
        position: usize,
        reason: &'static str,
    },
    #[error("values differ: {value} != {pattern}")]
    ValuesDiffer { value: String, pattern: String },
    #[error("{0} templates are not supported")]
    Unsupported(ListKind),
}

impl Mismatch {
    /// True when the template could not be evaluated at all, as opposed to
    /// the value not conforming to it.
    pub fn is_error(&self) -> bool {
        match self {
            Mismatch::Unsupported(_) => true,
            Mismatch::Field { source, .. } => source.is_error(),
            _ => false,
        }
    }
}
