use t3match_match::Mismatch;
use t3match_value::ValueError;
use thiserror::Error;

/// Failure of a builtin call.
#[derive(Error, Debug)]
pub enum RuntimeError {
    #[error("wrong number of arguments for {name}: expected {expected}, got {got}")]
    ArityMismatch {
        name: String,
        expected: usize,
        got: usize,
    },
    #[error("{name}: parameter '{param}' expects {expected}, got {got}")]
    TypeMismatch {
        name: String,
        param: String,
        expected: &'static str,
        got: &'static str,
    },
    #[error("{name}: {message}")]
    RangeError { name: &'static str, message: String },
    #[error("{name}: unsupported type {got}")]
    UnsupportedType { name: &'static str, got: &'static str },
    #[error("{name}: {message}")]
    InvalidArgument { name: &'static str, message: String },
    #[error("undefined function: {0}")]
    UndefinedFunction(String),
    #[error(transparent)]
    Value(#[from] ValueError),
    #[error("cannot match {value} against {pattern}: {source}")]
    Match {
        value: String,
        pattern: String,
        #[source]
        source: Mismatch,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure to register a builtin.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegistryError {
    #[error("{0} already defined")]
    AlreadyDefined(String),
    #[error("invalid signature '{signature}': {message}")]
    Signature { signature: String, message: String },
}
