//! Unordered matching: `set of`, `superset` and `subset`.
//!
//! Each call works on its own vector of references into the caller's
//! elements, so consumed elements are dropped from the working copy and
//! never from the objects being matched.

use crate::matcher::{element_matches, MatchResult};
use crate::Mismatch;
use t3match_value::Object;
use tracing::trace;

/// Every value element is covered by a pattern element and vice versa.
/// A `*` in the pattern lifts the upper bound on the value's size.
pub(crate) fn match_set_of(a: &[Object], b: &[Object]) -> MatchResult {
    let open = b.iter().any(|y| matches!(y, Object::AnyOrNone));
    let required: Vec<&Object> = b
        .iter()
        .filter(|y| !matches!(y, Object::AnyOrNone))
        .collect();

    if !open && a.len() > required.len() {
        return Err(Mismatch::TooManyElements {
            value: a.len(),
            pattern: required.len(),
        });
    }
    if a.len() < required.len() {
        return Err(Mismatch::TooFewElements {
            value: a.len(),
            pattern: required.len(),
        });
    }
    match_superset(a, required)
}

/// Every pattern element is found in the value. Each `?` needs one
/// leftover value element; `*` needs none.
pub(crate) fn match_superset<'a>(
    a: &[Object],
    b: impl IntoIterator<Item = &'a Object>,
) -> MatchResult {
    let mut rest: Vec<&Object> = a.iter().collect();
    let mut any_count = 0;

    for y in b {
        match y {
            Object::AnyOrNone => {}
            Object::Any => any_count += 1,
            _ => match position(&rest, |x| element_matches(x, y))? {
                Some(k) => {
                    trace!(element = %y, "found");
                    rest.swap_remove(k);
                }
                None => {
                    return Err(Mismatch::ElementMissing {
                        element: y.to_string(),
                    })
                }
            },
        }
    }

    if rest.len() < any_count {
        return Err(Mismatch::Wildcards {
            missing: any_count - rest.len(),
        });
    }
    Ok(())
}

/// Every value element is covered by a pattern element. A literal match is
/// preferred over a `?`; meeting a `*` accepts the rest of the value.
pub(crate) fn match_subset(a: &[Object], b: &[Object]) -> MatchResult {
    let mut rest: Vec<&Object> = b.iter().collect();

    for x in a {
        let mut any = None;
        let mut found = None;
        for (k, y) in rest.iter().enumerate() {
            match y {
                Object::AnyOrNone => return Ok(()),
                Object::Any => any = Some(k),
                _ => {
                    if element_matches(x, y)? {
                        found = Some(k);
                        break;
                    }
                }
            }
        }

        match found.or(any) {
            Some(k) => {
                trace!(element = %x, by = %rest[k], "covered");
                rest.swap_remove(k);
            }
            None => {
                return Err(Mismatch::ElementMissing {
                    element: x.to_string(),
                })
            }
        }
    }
    Ok(())
}

fn position<F>(candidates: &[&Object], mut f: F) -> Result<Option<usize>, Mismatch>
where
    F: FnMut(&Object) -> Result<bool, Mismatch>,
{
    for (k, x) in candidates.iter().enumerate() {
        if f(*x)? {
            return Ok(Some(k));
        }
    }
    Ok(None)
}
