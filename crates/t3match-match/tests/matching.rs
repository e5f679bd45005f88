use t3match_match::{is_match, matches, Mismatch};
use t3match_value::{ListKind, Object, Verdict};

/// Parses a compact list notation: `{1,2,*}` is a set of, `[1,?,3]` a
/// record of. Elements are integers or the wildcards `?` and `*`.
fn list(spec: &str) -> Object {
    let kind = if spec.starts_with('{') {
        ListKind::SetOf
    } else {
        ListKind::RecordOf
    };
    let inner = &spec[1..spec.len() - 1];
    let elements = inner
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| match s {
            "*" => Object::AnyOrNone,
            "?" => Object::Any,
            n => Object::int(n.parse().unwrap()),
        })
        .collect();
    Object::list(kind, elements)
}

fn rec(fields: &[(&str, Object)]) -> Object {
    Object::record(fields.iter().cloned())
}

#[test]
fn test_record_table() {
    let cases = [
        (rec(&[]), rec(&[]), true),
        (rec(&[]), rec(&[("f1", Object::float(2.0))]), false),
        (
            rec(&[("f1", Object::int(3)), ("f2", Object::int(4))]),
            rec(&[("f1", Object::Any), ("f2", Object::Any)]),
            true,
        ),
        (
            rec(&[("f1", Object::int(3)), ("f2", Object::int(4))]),
            rec(&[("f1", Object::int(3)), ("f2", Object::AnyOrNone)]),
            true,
        ),
    ];
    for (value, pattern, expected) in &cases {
        assert_eq!(is_match(value, pattern), *expected, "{} vs {}", value, pattern);
    }
}

#[test]
fn test_list_table() {
    let cases = [
        // set of
        ("{1,2,3}", "{3}", false),
        ("{1,2,3}", "{3,*}", true),
        ("{1,3}", "{1,*,3}", true),
        ("{1,2,3}", "{1,?,?}", true),
        ("{1,2,3}", "{1,?}", false),
        // record of
        ("[]", "[*]", true),
        ("[1,2,3]", "[1,3,2]", false),
        ("[1,2,3]", "[1,2]", false),
        ("[1,2,3]", "[1,?]", false),
        ("[1,2,3]", "[*,1,2,3]", true),
        ("[1,2,3,2,3]", "[1,*,3]", true),
        ("[1,2,3,2,1]", "[1,*,3]", false),
        ("[1,2,4,2,3,5,4]", "[1,*,2,3,*,4]", true),
    ];
    for (value, pattern, expected) in cases {
        assert_eq!(
            is_match(&list(value), &list(pattern)),
            expected,
            "{} vs {}",
            value,
            pattern
        );
    }
}

#[test]
fn test_verdicts_and_floats() {
    assert!(is_match(&Verdict::Pass.into(), &Verdict::Pass.into()));
    assert!(!is_match(&Verdict::Pass.into(), &Verdict::Fail.into()));
    assert!(is_match(&Verdict::Error.into(), &Object::Any));
    assert!(is_match(&Object::float(2.2), &Object::float(2.2)));
    assert!(!is_match(&Object::float(2.2), &Object::float(2.5)));
    assert!(!is_match(&Object::float(2.0), &Object::int(2)));
}

#[test]
fn test_reflexive_without_wildcards() {
    let objects = [
        Object::bool(false),
        Object::int(-42),
        Object::float(0.5),
        Object::charstring("hello").unwrap(),
        Object::universal("grüße"),
        list("[1,2,3]"),
        list("{3,2,1}"),
        rec(&[("a", list("[4,5]")), ("b", Object::charstring("x").unwrap())]),
    ];
    for o in &objects {
        assert!(is_match(o, o), "{} should match itself", o);
    }
}

#[test]
fn test_star_only_templates() {
    let values = [list("[]"), list("[1]"), list("[1,2,3,4,5]")];
    for v in &values {
        assert!(is_match(v, &list("[*]")));
        assert!(is_match(v, &list("[*,*]")));
        assert!(is_match(v, &list("{*}")));
    }
}

#[test]
fn test_set_of_is_order_insensitive() {
    let pattern = list("{1,2,3}");
    for value in ["{1,2,3}", "{3,1,2}", "{2,3,1}"] {
        assert!(is_match(&list(value), &pattern), "{}", value);
    }
}

#[test]
fn test_matching_does_not_mutate() {
    let value = list("{1,2,3}");
    let patterns = [
        Object::list(ListKind::SetOf, vec![Object::int(3), Object::AnyOrNone]),
        Object::list(ListKind::Superset, vec![Object::int(2), Object::Any]),
        Object::list(
            ListKind::Subset,
            vec![Object::int(1), Object::int(2), Object::int(3), Object::int(4)],
        ),
    ];
    for pattern in &patterns {
        let value_before = value.clone();
        let pattern_before = pattern.clone();
        assert!(is_match(&value, pattern), "{}", pattern);
        // A second run must see the same elements.
        assert!(is_match(&value, pattern), "{}", pattern);
        assert_eq!(value, value_before);
        assert_eq!(pattern, &pattern_before);
    }
}

#[test]
fn test_superset_and_subset() {
    let value = list("{1,2,3}");
    let superset = |elements: Vec<Object>| Object::list(ListKind::Superset, elements);
    let subset = |elements: Vec<Object>| Object::list(ListKind::Subset, elements);

    assert!(is_match(&value, &superset(vec![Object::int(1)])));
    assert!(!is_match(&value, &superset(vec![Object::int(4)])));
    assert!(is_match(
        &value,
        &subset((0..10).map(Object::int).collect())
    ));
    assert!(!is_match(&value, &subset(vec![Object::int(1), Object::int(2)])));
    assert!(is_match(
        &value,
        &subset(vec![Object::int(1), Object::Any, Object::Any])
    ));
}

#[test]
fn test_nested_templates() {
    let value = rec(&[
        ("name", Object::charstring("request-17").unwrap()),
        (
            "items",
            Object::list(
                ListKind::RecordOf,
                vec![
                    rec(&[("id", Object::int(1)), ("ok", Object::bool(true))]),
                    rec(&[("id", Object::int(2)), ("ok", Object::bool(false))]),
                ],
            ),
        ),
    ]);
    let pattern = rec(&[
        ("name", Object::charstring("request-*").unwrap()),
        (
            "items",
            Object::list(
                ListKind::SetOf,
                vec![
                    rec(&[("id", Object::Any), ("ok", Object::bool(false))]),
                    Object::AnyOrNone,
                ],
            ),
        ),
    ]);
    assert!(is_match(&value, &pattern));

    let pattern = rec(&[
        ("name", Object::charstring("request-?").unwrap()),
        ("items", Object::AnyOrNone),
    ]);
    let err = matches(&value, &pattern).unwrap_err();
    assert!(matches!(err, Mismatch::Field { ref name, .. } if name == "name"));
    assert!(!err.is_error());
}

#[test]
fn test_wildcard_cardinality() {
    assert!(!is_match(&list("{1,3}"), &list("{1,?,3}")));
    assert!(is_match(&list("{1,2,3}"), &list("{*}")));

    let strings = |xs: &[&str]| {
        Object::list(
            ListKind::RecordOf,
            xs.iter()
                .map(|s| match *s {
                    "*" => Object::AnyOrNone,
                    s => Object::charstring(s).unwrap(),
                })
                .collect(),
        )
    };
    assert!(is_match(&strings(&["a", "b", "c"]), &strings(&["a", "*"])));
    assert!(!is_match(&strings(&["a", "b", "c"]), &strings(&["b", "*"])));
}
