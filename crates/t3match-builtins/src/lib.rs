//! TTCN-3 predefined functions.
//!
//! Builtins are registered under a signature such as
//! `int2bit(in integer i, in integer l) return bitstring`; arguments are
//! checked against it before the native function runs.
//!
//! # Example
//!
//! ```
//! use t3match_builtins::{Builtins, Context, LogSink, RuntimeError};
//! use t3match_value::{Bitstring, Object};
//!
//! let sink = LogSink::buffer(false);
//! let mut ctx = Context::new(&sink);
//! let builtins = Builtins::standard();
//!
//! let mut args = [Object::int(5), Object::int(4)];
//! let bits = builtins.call("int2bit", &mut ctx, &mut args).unwrap();
//! assert_eq!(bits, Some(Object::from(Bitstring::parse("'0101'B").unwrap())));
//!
//! // 5 needs three bits
//! let mut args = [Object::int(5), Object::int(2)];
//! assert!(matches!(
//!     builtins.call("int2bit", &mut ctx, &mut args),
//!     Err(RuntimeError::RangeError { .. })
//! ));
//!
//! builtins.call("log", &mut ctx, &mut [Object::charstring("done").unwrap()]).unwrap();
//! assert_eq!(sink.contents().unwrap(), "\"done\"\n");
//! ```

mod error;
mod functions;
mod log;
mod registry;
mod signature;

pub use error::{RegistryError, RuntimeError};
pub use log::LogSink;
pub use registry::{Builtin, BuiltinFn, Builtins, BuiltinsBuilder, Context};
pub use signature::{Direction, Param, Signature, TypeName};
