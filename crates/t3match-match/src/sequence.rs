//! Ordered matching with `*` and `?` elements.
//!
//! Backtracking glob: `?` consumes exactly one element, `*` any number of
//! them. Only the most recent `*` is remembered.

use crate::matcher::{element_matches, MatchResult};
use crate::Mismatch;
use t3match_value::Object;
use tracing::debug;

/// A `*` element: the wildcard itself, or the one-character string `"*"`
/// when matching decomposed strings.
fn is_star(pattern: &Object) -> bool {
    matches!(pattern, Object::AnyOrNone) || pattern.as_char() == Some('*')
}

/// Restart point after the last `*`: value index and pattern index.
struct Anchor {
    value: usize,
    pattern: usize,
}

pub(crate) fn match_sequence(val: &[Object], pat: &[Object]) -> MatchResult {
    let mut i = 0;
    let mut j = 0;
    let mut anchor: Option<Anchor> = None;

    while i < val.len() && j < pat.len() {
        if is_star(&pat[j]) {
            j += 1;
            // A trailing `*` swallows whatever is left.
            if j == pat.len() {
                return Ok(());
            }
            anchor = Some(Anchor {
                value: i,
                pattern: j,
            });
        } else if element_matches(&val[i], &pat[j])? {
            i += 1;
            j += 1;
        } else {
            let Some(a) = anchor.as_mut() else {
                return Err(Mismatch::Sequence {
                    position: i,
                    reason: "element does not match",
                });
            };
            a.value += 1;
            debug!(value = a.value, pattern = a.pattern, "backtracking");
            i = a.value;
            j = a.pattern;
        }

        if j == pat.len() && i < val.len() {
            let Some(a) = anchor.as_mut() else {
                return Err(Mismatch::Sequence {
                    position: i,
                    reason: "value is longer than template",
                });
            };
            a.value += 1;
            debug!(value = a.value, pattern = a.pattern, "backtracking");
            i = a.value;
            j = a.pattern;
        }
    }

    if i < val.len() {
        return Err(Mismatch::Sequence {
            position: i,
            reason: "template is empty",
        });
    }
    match pat[j..].iter().position(|p| !is_star(p)) {
        Some(k) => Err(Mismatch::Sequence {
            position: j + k,
            reason: "value is shorter than template",
        }),
        None => Ok(()),
    }
}
