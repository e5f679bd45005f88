//! Structural matching of values against templates.

use crate::sequence::match_sequence;
use crate::set::{match_set_of, match_subset, match_superset};
use crate::Mismatch;
use t3match_value::{ListKind, Object, Record};
use tracing::trace;

pub type MatchResult = Result<(), Mismatch>;

/// Matches `value` against `pattern`.
///
/// The order of the arguments matters: only the pattern side carries list
/// kinds such as `superset` or `subset`. Wildcards on either side match
/// anything.
pub fn matches(value: &Object, pattern: &Object) -> MatchResult {
    if value.is_wildcard() || pattern.is_wildcard() {
        return Ok(());
    }
    if value.kind() != pattern.kind() {
        return Err(Mismatch::Type {
            value: value.kind(),
            pattern: pattern.kind(),
        });
    }

    trace!(%value, %pattern, "matching");

    match pattern {
        Object::Record(b) => {
            let Object::Record(a) = value else {
                unreachable!("kinds checked above")
            };
            match_record(a, b)
        }
        Object::List(b) => {
            let Object::List(a) = value else {
                unreachable!("kinds checked above")
            };
            match b.kind() {
                ListKind::SetOf => match_set_of(a.elements(), b.elements()),
                ListKind::Superset => match_superset(a.elements(), b.elements()),
                ListKind::Subset => match_subset(a.elements(), b.elements()),
                ListKind::Permutation | ListKind::Complement => {
                    Err(Mismatch::Unsupported(b.kind()))
                }
                ListKind::RecordOf => match_sequence(a.elements(), b.elements()),
            }
        }
        Object::Charstring(_) | Object::UniversalCharstring(_) => match_string(value, pattern),
        Object::Bool(_)
        | Object::Int(_)
        | Object::Float(_)
        | Object::Bitstring(_)
        | Object::Enum(_)
        | Object::Verdict(_) => {
            if value == pattern {
                Ok(())
            } else {
                Err(values_differ(value, pattern))
            }
        }
        Object::Any | Object::AnyOrNone => unreachable!("wildcards handled above"),
    }
}

/// Shorthand for callers that do not care about the reason.
pub fn is_match(value: &Object, pattern: &Object) -> bool {
    matches(value, pattern).is_ok()
}

/// Matches one element inside a container. A plain mismatch is `Ok(false)`
/// so the caller can keep searching; template errors are passed on.
pub(crate) fn element_matches(value: &Object, pattern: &Object) -> Result<bool, Mismatch> {
    match matches(value, pattern) {
        Ok(()) => Ok(true),
        Err(e) if e.is_error() => Err(e),
        Err(_) => Ok(false),
    }
}

fn match_record(a: &Record, b: &Record) -> MatchResult {
    if a.len() != b.len() {
        return Err(Mismatch::Arity {
            value: a.len(),
            pattern: b.len(),
        });
    }
    for (name, y) in b.iter() {
        let x = a
            .get(name)
            .ok_or_else(|| Mismatch::FieldMissing(name.to_string()))?;
        matches(x, y).map_err(|e| Mismatch::Field {
            name: name.to_string(),
            source: Box::new(e),
        })?;
    }
    Ok(())
}

fn match_string(value: &Object, pattern: &Object) -> MatchResult {
    // Single characters end the recursion of the sequence matcher.
    if let (Some(v), Some(p)) = (value.as_char(), pattern.as_char()) {
        return if p == '?' || p == '*' || p == v {
            Ok(())
        } else {
            Err(values_differ(value, pattern))
        };
    }

    let (Some(val), Some(pat)) = (value.as_sequence(), pattern.as_sequence()) else {
        unreachable!("strings are sequences")
    };
    match_sequence(&val, &pat)
}

fn values_differ(value: &Object, pattern: &Object) -> Mismatch {
    Mismatch::ValuesDiffer {
        value: value.to_string(),
        pattern: pattern.to_string(),
    }
}
