use num_bigint::BigUint;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValueError {
    #[error("invalid binary string literal {literal:?}: {reason}")]
    InvalidBinaryString {
        literal: String,
        reason: &'static str,
    },
    #[error("{value} requires more than {len} digits")]
    BinaryStringOverflow { value: BigUint, len: usize },
    #[error("charstring {text:?} contains {ch:?}, which does not fit in eight bits")]
    InvalidCharstring { text: String, ch: char },
    #[error("unknown verdict '{0}'")]
    UnknownVerdict(String),
    #[error("enumerated type {0} has no elements")]
    NoElements(String),
    #[error("duplicate element '{element}' in enumerated type {ty}")]
    DuplicateElement { ty: String, element: String },
    #[error("invalid range {first}..{last} for element '{element}'")]
    InvalidRange {
        element: String,
        first: i64,
        last: i64,
    },
    #[error("can't add '{element}': ordinal {ordinal} collides with '{existing}'")]
    RangeCollision {
        element: String,
        ordinal: i64,
        existing: String,
    },
    #[error("enumerated type {ty} has no element '{element}'")]
    UnknownElement { ty: String, element: String },
    #[error("enumerated type {ty} has no element with ordinal {ordinal}")]
    UnknownOrdinal { ty: String, ordinal: i64 },
}
