//! Matching TTCN-3 values against templates.
//!
//! A template is an ordinary [`Object`](t3match_value::Object) that may
//! contain wildcards and unordered list kinds. [`matches`] tells whether a
//! value conforms and, if not, why.
//!
//! # Example
//!
//! ```
//! use t3match_match::{is_match, matches, Mismatch};
//! use t3match_value::{ListKind, Object};
//!
//! let value = Object::record([
//!     ("id", Object::int(7)),
//!     ("name", Object::charstring("hello").unwrap()),
//!     (
//!         "tags",
//!         Object::list(ListKind::RecordOf, (1..=3).map(Object::int).collect()),
//!     ),
//! ]);
//!
//! // `?` is exactly one element, `*` is zero or more
//! let template = Object::record([
//!     ("id", Object::Any),
//!     ("name", Object::charstring("h*o").unwrap()),
//!     ("tags", Object::list(ListKind::RecordOf, vec![Object::int(1), Object::AnyOrNone])),
//! ]);
//! assert!(is_match(&value, &template));
//!
//! // Unordered templates only look for their elements
//! let template = Object::record([
//!     ("id", Object::int(7)),
//!     ("name", Object::AnyOrNone),
//!     ("tags", Object::list(ListKind::Superset, vec![Object::int(3), Object::int(4)])),
//! ]);
//! assert!(matches!(
//!     matches(&value, &template),
//!     Err(Mismatch::Field { ref name, .. }) if name == "tags"
//! ));
//! ```

mod matcher;
mod mismatch;
mod sequence;
mod set;

pub use matcher::{is_match, matches, MatchResult};
pub use mismatch::Mismatch;
