use crate::{Bitstring, EnumValue, ValueError, Verdict};
use indexmap::IndexMap;
use num_bigint::BigInt;
use std::borrow::Cow;
use std::fmt;

// ============ Kinds ============

/// Matching discipline of a list template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    RecordOf,
    SetOf,
    Superset,
    Subset,
    Permutation,
    Complement,
}

impl ListKind {
    pub fn is_ordered(self) -> bool {
        matches!(self, ListKind::RecordOf)
    }

    pub fn name(self) -> &'static str {
        match self {
            ListKind::RecordOf => "record of",
            ListKind::SetOf => "set of",
            ListKind::Superset => "superset",
            ListKind::Subset => "subset",
            ListKind::Permutation => "permutation",
            ListKind::Complement => "complement",
        }
    }
}

impl fmt::Display for ListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Bool,
    Int,
    Float,
    Charstring,
    UniversalCharstring,
    Bitstring,
    Enum,
    Verdict,
    Record,
    List,
    Any,
    AnyOrNone,
}

impl ObjectKind {
    pub fn name(self) -> &'static str {
        match self {
            ObjectKind::Bool => "boolean",
            ObjectKind::Int => "integer",
            ObjectKind::Float => "float",
            ObjectKind::Charstring => "charstring",
            ObjectKind::UniversalCharstring => "universal charstring",
            ObjectKind::Bitstring => "bitstring",
            ObjectKind::Enum => "enumerated",
            ObjectKind::Verdict => "verdicttype",
            ObjectKind::Record => "record",
            ObjectKind::List => "list",
            ObjectKind::Any => "?",
            ObjectKind::AnyOrNone => "*",
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============ Aggregates ============

/// A record value. The field set is fixed once the record is built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: IndexMap<String, Object>,
}

impl Record {
    pub fn new<I, K>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, Object)>,
        K: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Object> {
        self.fields.get(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Object)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct List {
    kind: ListKind,
    elements: Vec<Object>,
}

impl List {
    pub fn new(kind: ListKind, elements: Vec<Object>) -> Self {
        Self { kind, elements }
    }

    pub fn record_of(elements: Vec<Object>) -> Self {
        Self::new(ListKind::RecordOf, elements)
    }

    pub fn set_of(elements: Vec<Object>) -> Self {
        Self::new(ListKind::SetOf, elements)
    }

    pub fn kind(&self) -> ListKind {
        self.kind
    }

    pub fn elements(&self) -> &[Object] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

// ============ Object ============

/// A TTCN-3 value or template.
///
/// `Any` (`?`) and `AnyOrNone` (`*`) are the universal wildcards. They only
/// ever appear on the template side of a match.
#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    Bool(bool),
    Int(BigInt),
    Float(f64),
    Charstring(String),
    UniversalCharstring(Vec<char>),
    Bitstring(Bitstring),
    Enum(EnumValue),
    Verdict(Verdict),
    Record(Record),
    List(List),
    Any,
    AnyOrNone,
}

impl Object {
    pub fn int(i: i64) -> Self {
        Object::Int(BigInt::from(i))
    }

    /// Parses a decimal integer of any size. Returns `None` for malformed text.
    pub fn int_str(s: &str) -> Option<Self> {
        s.parse::<BigInt>().ok().map(Object::Int)
    }

    pub fn float(f: f64) -> Self {
        Object::Float(f)
    }

    pub fn bool(b: bool) -> Self {
        Object::Bool(b)
    }

    /// Builds a charstring. Every character must fit in eight bits.
    pub fn charstring(s: impl Into<String>) -> Result<Self, ValueError> {
        let s = s.into();
        match s.chars().find(|c| !is_8bit(*c)) {
            Some(ch) => Err(ValueError::InvalidCharstring { text: s, ch }),
            None => Ok(Object::Charstring(s)),
        }
    }

    /// Whether `s` can be held by a charstring.
    pub fn fits_charstring(s: &str) -> bool {
        s.chars().all(is_8bit)
    }

    pub fn universal(s: &str) -> Self {
        Object::UniversalCharstring(s.chars().collect())
    }

    pub fn record<I, K>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, Object)>,
        K: Into<String>,
    {
        Object::Record(Record::new(fields))
    }

    pub fn list(kind: ListKind, elements: Vec<Object>) -> Self {
        Object::List(List::new(kind, elements))
    }

    pub fn kind(&self) -> ObjectKind {
        match self {
            Object::Bool(_) => ObjectKind::Bool,
            Object::Int(_) => ObjectKind::Int,
            Object::Float(_) => ObjectKind::Float,
            Object::Charstring(_) => ObjectKind::Charstring,
            Object::UniversalCharstring(_) => ObjectKind::UniversalCharstring,
            Object::Bitstring(_) => ObjectKind::Bitstring,
            Object::Enum(_) => ObjectKind::Enum,
            Object::Verdict(_) => ObjectKind::Verdict,
            Object::Record(_) => ObjectKind::Record,
            Object::List(_) => ObjectKind::List,
            Object::Any => ObjectKind::Any,
            Object::AnyOrNone => ObjectKind::AnyOrNone,
        }
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, Object::Any | Object::AnyOrNone)
    }

    /// Length of kinds that have one: characters, code points, binary
    /// string units or list elements.
    pub fn len(&self) -> Option<usize> {
        match self {
            Object::Charstring(s) => Some(s.chars().count()),
            Object::UniversalCharstring(s) => Some(s.len()),
            Object::Bitstring(b) => Some(b.len()),
            Object::List(l) => Some(l.len()),
            _ => None,
        }
    }

    /// Views strings and lists as a sequence of elements. Strings are split
    /// into one-character strings of the same kind.
    pub fn as_sequence(&self) -> Option<Cow<'_, [Object]>> {
        match self {
            Object::Charstring(s) => Some(Cow::Owned(
                s.chars().map(|c| Object::Charstring(c.to_string())).collect(),
            )),
            Object::UniversalCharstring(s) => Some(Cow::Owned(
                s.iter().map(|c| Object::UniversalCharstring(vec![*c])).collect(),
            )),
            Object::List(l) => Some(Cow::Borrowed(l.elements())),
            _ => None,
        }
    }

    /// The single character of a one-character string.
    pub fn as_char(&self) -> Option<char> {
        let mut chars: Box<dyn Iterator<Item = char> + '_> = match self {
            Object::Charstring(s) => Box::new(s.chars()),
            Object::UniversalCharstring(s) => Box::new(s.iter().copied()),
            _ => return None,
        };
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(c),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<&BigInt> {
        match self {
            Object::Int(i) => Some(i),
            _ => None,
        }
    }
}

impl From<bool> for Object {
    fn from(b: bool) -> Self {
        Object::Bool(b)
    }
}

impl From<i64> for Object {
    fn from(i: i64) -> Self {
        Object::int(i)
    }
}

impl From<BigInt> for Object {
    fn from(i: BigInt) -> Self {
        Object::Int(i)
    }
}

impl From<f64> for Object {
    fn from(f: f64) -> Self {
        Object::Float(f)
    }
}

impl TryFrom<&str> for Object {
    type Error = ValueError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Object::charstring(s)
    }
}

impl From<Verdict> for Object {
    fn from(v: Verdict) -> Self {
        Object::Verdict(v)
    }
}

impl From<Bitstring> for Object {
    fn from(b: Bitstring) -> Self {
        Object::Bitstring(b)
    }
}

impl From<EnumValue> for Object {
    fn from(e: EnumValue) -> Self {
        Object::Enum(e)
    }
}

impl From<Record> for Object {
    fn from(r: Record) -> Self {
        Object::Record(r)
    }
}

impl From<List> for Object {
    fn from(l: List) -> Self {
        Object::List(l)
    }
}

// ============ Display ============

fn is_8bit(c: char) -> bool {
    u32::from(c) <= 0xFF
}

fn write_quoted(f: &mut fmt::Formatter<'_>, chars: impl Iterator<Item = char>) -> fmt::Result {
    f.write_str("\"")?;
    for c in chars {
        if c == '"' {
            f.write_str("\"\"")?;
        } else {
            write!(f, "{}", c)?;
        }
    }
    f.write_str("\"")
}

fn write_joined<'a>(
    f: &mut fmt::Formatter<'_>,
    items: impl Iterator<Item = &'a Object>,
) -> fmt::Result {
    for (i, item) in items.enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Object::Bool(b) => write!(f, "{}", b),
            Object::Int(i) => write!(f, "{}", i),
            Object::Float(x) => write!(f, "{:?}", x),
            Object::Charstring(s) => write_quoted(f, s.chars()),
            Object::UniversalCharstring(s) => write_quoted(f, s.iter().copied()),
            Object::Bitstring(b) => write!(f, "{}", b),
            Object::Enum(e) => write!(f, "{}", e),
            Object::Verdict(v) => write!(f, "{}", v),
            Object::Record(r) => {
                if r.is_empty() {
                    return f.write_str("{}");
                }
                f.write_str("{ ")?;
                for (i, (name, value)) in r.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{} := {}", name, value)?;
                }
                f.write_str(" }")
            }
            Object::List(l) => match l.kind() {
                ListKind::RecordOf | ListKind::SetOf => {
                    if l.is_empty() {
                        return f.write_str("{}");
                    }
                    f.write_str("{ ")?;
                    write_joined(f, l.elements().iter())?;
                    f.write_str(" }")
                }
                kind => {
                    write!(f, "{}(", kind)?;
                    write_joined(f, l.elements().iter())?;
                    f.write_str(")")
                }
            },
            Object::Any => f.write_str("?"),
            Object::AnyOrNone => f.write_str("*"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(Object::int(1).kind(), ObjectKind::Int);
        assert_eq!(Object::universal("ä").kind(), ObjectKind::UniversalCharstring);
        assert_eq!(
            Object::list(ListKind::Superset, vec![]).kind(),
            Object::list(ListKind::RecordOf, vec![]).kind()
        );
        assert_ne!(Object::Any.kind(), Object::AnyOrNone.kind());
    }

    #[test]
    fn test_wildcards_are_distinct() {
        assert_ne!(Object::Any, Object::AnyOrNone);
        assert_eq!(Object::Any, Object::Any);
        assert!(Object::Any.is_wildcard());
        assert!(!Object::charstring("*").unwrap().is_wildcard());
    }

    #[test]
    fn test_big_integers() {
        let a = Object::int_str("123456789012345678901234567890").unwrap();
        let b = Object::int_str("123456789012345678901234567890").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, Object::int_str("-123456789012345678901234567890").unwrap());
        assert!(Object::int_str("12a").is_none());
    }

    #[test]
    fn test_float_equality() {
        assert_eq!(Object::float(2e2), Object::float(200.0));
        assert_eq!(Object::float(2e-2), Object::float(0.02));
        assert_ne!(Object::float(-2.2), Object::float(2.2));
        assert_ne!(Object::float(2.0), Object::int(2));
    }

    #[test]
    fn test_record_field_order_irrelevant_for_equality() {
        let a = Object::record([("f1", Object::int(3)), ("f2", Object::int(4))]);
        let b = Object::record([("f2", Object::int(4)), ("f1", Object::int(3))]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_charstring_is_8bit() {
        assert_eq!(Object::charstring("\u{FF}").unwrap().len(), Some(1));
        assert_eq!(
            Object::charstring("1 \u{20AC}"),
            Err(ValueError::InvalidCharstring {
                text: "1 \u{20AC}".into(),
                ch: '\u{20AC}',
            })
        );
        assert!(Object::try_from("\u{20AC}").is_err());
        assert!(Object::fits_charstring("caf\u{E9}"));
        assert!(!Object::fits_charstring("\u{1F600}"));
    }

    #[test]
    fn test_len() {
        assert_eq!(Object::charstring("abc").unwrap().len(), Some(3));
        assert_eq!(Object::universal("\u{1F600}x").len(), Some(2));
        assert_eq!(
            Object::Bitstring(Bitstring::parse("'0101'B").unwrap()).len(),
            Some(4)
        );
        assert_eq!(Object::int(5).len(), None);
    }

    #[test]
    fn test_as_sequence_splits_strings() {
        let s = Object::charstring("ab").unwrap();
        let seq = s.as_sequence().unwrap();
        assert_eq!(&*seq, &[Object::charstring("a").unwrap(), Object::charstring("b").unwrap()]);

        let u = Object::universal("é");
        assert_eq!(
            &*u.as_sequence().unwrap(),
            &[Object::UniversalCharstring(vec!['é'])]
        );
        assert!(Object::bool(true).as_sequence().is_none());
    }

    #[test]
    fn test_as_char() {
        assert_eq!(Object::charstring("A").unwrap().as_char(), Some('A'));
        assert_eq!(Object::charstring("AB").unwrap().as_char(), None);
        assert_eq!(Object::charstring("").unwrap().as_char(), None);
        assert_eq!(Object::universal("ß").as_char(), Some('ß'));
    }

    #[test]
    fn test_display() {
        let rec = Object::record([
            ("name", Object::charstring("say \"hi\"").unwrap()),
            ("items", Object::list(ListKind::RecordOf, vec![Object::int(1), Object::Any])),
        ]);
        assert_eq!(
            rec.to_string(),
            r#"{ name := "say ""hi""", items := { 1, ? } }"#
        );
        assert_eq!(
            Object::list(ListKind::Superset, vec![Object::int(1), Object::AnyOrNone]).to_string(),
            "superset(1, *)"
        );
        assert_eq!(Object::list(ListKind::SetOf, vec![]).to_string(), "{}");
        assert_eq!(Object::float(2.0).to_string(), "2.0");
        assert_eq!(Object::from(Verdict::Inconc).to_string(), "inconc");
    }
}
