//! Value model for TTCN-3 templates and values.
//!
//! Every runtime value and template is an [`Object`]: a closed set of kinds
//! (booleans, arbitrary precision integers, floats, char strings, binary
//! strings, enumerated values, verdicts, records and lists) plus the two
//! wildcards `?` ([`Object::Any`]) and `*` ([`Object::AnyOrNone`]).
//!
//! # Example
//!
//! ```
//! use t3match_value::{Bitstring, ListKind, Object};
//!
//! let value = Object::record([
//!     ("id", Object::int(7)),
//!     ("flags", Object::from(Bitstring::parse("'0101'B").unwrap())),
//!     ("tags", Object::list(ListKind::SetOf, vec![Object::charstring("a").unwrap(), Object::charstring("b").unwrap()])),
//! ]);
//!
//! assert_eq!(value.to_string(), r#"{ id := 7, flags := '0101'B, tags := { "a", "b" } }"#);
//! ```

mod bitstring;
mod enums;
mod error;
mod object;
mod verdict;

pub use bitstring::{Bitstring, Unit};
pub use enums::{EnumType, EnumTypeBuilder, EnumValue};
pub use error::ValueError;
pub use object::{List, ListKind, Object, ObjectKind, Record};
pub use verdict::Verdict;
