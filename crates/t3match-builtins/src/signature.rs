//! Builtin signatures such as `int2bit(in integer i, in integer l) return bitstring`.

use crate::{RegistryError, RuntimeError};
use std::fmt;
use t3match_value::Object;
use winnow::ascii::{multispace0, multispace1};
use winnow::combinator::{alt, delimited, opt, preceded, separated, terminated};
use winnow::error::{ContextError, ErrMode};
use winnow::prelude::*;
use winnow::token::{one_of, take_while};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    In,
    Out,
    InOut,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::In => "in",
            Direction::Out => "out",
            Direction::InOut => "inout",
        })
    }
}

/// Parameter and return types a builtin can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeName {
    Integer,
    Boolean,
    Float,
    Charstring,
    UniversalCharstring,
    Bitstring,
    Hexstring,
    Octetstring,
    Verdict,
    Enumerated,
    /// Any object, including wildcards.
    Template,
    Any,
}

impl TypeName {
    pub fn name(self) -> &'static str {
        match self {
            TypeName::Integer => "integer",
            TypeName::Boolean => "boolean",
            TypeName::Float => "float",
            TypeName::Charstring => "charstring",
            TypeName::UniversalCharstring => "universal charstring",
            TypeName::Bitstring => "bitstring",
            TypeName::Hexstring => "hexstring",
            TypeName::Octetstring => "octetstring",
            TypeName::Verdict => "verdicttype",
            TypeName::Enumerated => "enumerated",
            TypeName::Template => "template",
            TypeName::Any => "any",
        }
    }

    pub fn accepts(self, arg: &Object) -> bool {
        match self {
            TypeName::Integer => matches!(arg, Object::Int(_)),
            TypeName::Boolean => matches!(arg, Object::Bool(_)),
            TypeName::Float => matches!(arg, Object::Float(_)),
            TypeName::Charstring => {
                matches!(arg, Object::Charstring(s) if Object::fits_charstring(s))
            }
            // Plain char strings are a subset of universal ones.
            TypeName::UniversalCharstring => {
                matches!(arg, Object::UniversalCharstring(_) | Object::Charstring(_))
            }
            TypeName::Bitstring | TypeName::Hexstring | TypeName::Octetstring => {
                matches!(arg, Object::Bitstring(_))
            }
            TypeName::Verdict => matches!(arg, Object::Verdict(_)),
            TypeName::Enumerated => matches!(arg, Object::Enum(_)),
            TypeName::Template | TypeName::Any => true,
        }
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub direction: Direction,
    pub ty: TypeName,
    pub name: String,
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.direction, self.ty, self.name)
    }
}

/// A parsed builtin signature. A bare name without parameter list declares
/// a variadic builtin whose arguments are not checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub name: String,
    pub params: Vec<Param>,
    pub ret: Option<TypeName>,
    pub variadic: bool,
}

impl Signature {
    pub fn parse(signature: &str) -> Result<Self, RegistryError> {
        let mut input = signature.trim();
        let start = input.len();
        let error = |input: &str| RegistryError::Signature {
            signature: signature.to_string(),
            message: format!("unexpected input at offset {}", start - input.len()),
        };
        match parse_signature.parse_next(&mut input) {
            Ok(sig) if input.trim().is_empty() => Ok(sig),
            _ => Err(error(input)),
        }
    }

    /// Verifies arity and argument kinds before a call.
    pub fn check(&self, args: &[Object]) -> Result<(), RuntimeError> {
        if self.variadic {
            return Ok(());
        }
        if args.len() != self.params.len() {
            return Err(RuntimeError::ArityMismatch {
                name: self.name.clone(),
                expected: self.params.len(),
                got: args.len(),
            });
        }
        for (param, arg) in self.params.iter().zip(args) {
            if !param.ty.accepts(arg) {
                return Err(RuntimeError::TypeMismatch {
                    name: self.name.clone(),
                    param: param.name.clone(),
                    expected: param.ty.name(),
                    got: arg.kind().name(),
                });
            }
        }
        Ok(())
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if !self.variadic {
            f.write_str("(")?;
            for (i, p) in self.params.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{}", p)?;
            }
            f.write_str(")")?;
        }
        if let Some(ret) = self.ret {
            write!(f, " return {}", ret)?;
        }
        Ok(())
    }
}

// ============ Parser ============

fn ws<'a, P, O>(p: P) -> impl Parser<&'a str, O, ContextError>
where
    P: Parser<&'a str, O, ContextError>,
{
    delimited(multispace0, p, multispace0)
}

fn ident(input: &mut &str) -> ModalResult<String> {
    let first: char = one_of(|c: char| c.is_ascii_alphabetic() || c == '_').parse_next(input)?;
    let rest: &str =
        take_while(0.., |c: char| c.is_ascii_alphanumeric() || c == '_').parse_next(input)?;
    Ok(format!("{}{}", first, rest))
}

fn direction(input: &mut &str) -> ModalResult<Direction> {
    alt((
        "inout".value(Direction::InOut),
        "in".value(Direction::In),
        "out".value(Direction::Out),
    ))
    .parse_next(input)
}

fn type_name(input: &mut &str) -> ModalResult<TypeName> {
    let word = ident.parse_next(input)?;
    let ty = match word.as_str() {
        "integer" => TypeName::Integer,
        "boolean" => TypeName::Boolean,
        "float" => TypeName::Float,
        "charstring" => TypeName::Charstring,
        "universal" => {
            (multispace1, ident.verify(|w: &str| w == "charstring")).parse_next(input)?;
            TypeName::UniversalCharstring
        }
        "bitstring" => TypeName::Bitstring,
        "hexstring" => TypeName::Hexstring,
        "octetstring" => TypeName::Octetstring,
        "verdicttype" => TypeName::Verdict,
        "enumerated" => TypeName::Enumerated,
        "template" => TypeName::Template,
        "any" => TypeName::Any,
        _ => return Err(ErrMode::Backtrack(ContextError::new())),
    };
    Ok(ty)
}

fn param(input: &mut &str) -> ModalResult<Param> {
    // `integer` starts with `in`, so a direction needs trailing space.
    let direction = opt(terminated(direction, multispace1)).parse_next(input)?;
    let ty = type_name.parse_next(input)?;
    let _ = multispace1.parse_next(input)?;
    let name = ident.parse_next(input)?;
    Ok(Param {
        direction: direction.unwrap_or_default(),
        ty,
        name,
    })
}

fn parse_signature(input: &mut &str) -> ModalResult<Signature> {
    let name = ws(ident).parse_next(input)?;
    let params: Option<Vec<Param>> = opt(delimited(
        ('(', multispace0),
        separated(0.., ws(param), ','),
        (multispace0, ')'),
    ))
    .parse_next(input)?;
    let ret = opt(preceded((multispace0, "return", multispace1), type_name)).parse_next(input)?;

    Ok(Signature {
        name,
        variadic: params.is_none(),
        params: params.unwrap_or_default(),
        ret,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_signature() {
        let sig = Signature::parse("int2bit(in integer i, in integer l) return bitstring").unwrap();
        assert_eq!(sig.name, "int2bit");
        assert!(!sig.variadic);
        assert_eq!(
            sig.params,
            vec![
                Param {
                    direction: Direction::In,
                    ty: TypeName::Integer,
                    name: "i".to_string(),
                },
                Param {
                    direction: Direction::In,
                    ty: TypeName::Integer,
                    name: "l".to_string(),
                },
            ]
        );
        assert_eq!(sig.ret, Some(TypeName::Bitstring));
    }

    #[test]
    fn test_parse_universal_charstring() {
        let sig = Signature::parse("unichar2int(in universal charstring s) return integer").unwrap();
        assert_eq!(sig.params[0].ty, TypeName::UniversalCharstring);
        assert_eq!(sig.params[0].name, "s");
    }

    #[test]
    fn test_parse_directions() {
        let sig = Signature::parse("f(integer a, out enumerated e, inout float x)").unwrap();
        let directions: Vec<_> = sig.params.iter().map(|p| p.direction).collect();
        assert_eq!(directions, vec![Direction::In, Direction::Out, Direction::InOut]);
        assert_eq!(sig.params[0].ty, TypeName::Integer);
        assert_eq!(sig.ret, None);
    }

    #[test]
    fn test_parse_empty_params() {
        let sig = Signature::parse("rnd() return float").unwrap();
        assert!(sig.params.is_empty());
        assert!(!sig.variadic);
    }

    #[test]
    fn test_parse_bare_name_is_variadic() {
        let sig = Signature::parse("log").unwrap();
        assert_eq!(sig.name, "log");
        assert!(sig.variadic);
        assert!(sig.check(&[Object::int(1), Object::Any]).is_ok());
    }

    #[test]
    fn test_parse_whitespace() {
        let sig = Signature::parse("  f ( in  integer   a ,in float b )  return  boolean ").unwrap();
        assert_eq!(sig.params.len(), 2);
        assert_eq!(sig.ret, Some(TypeName::Boolean));
    }

    #[test]
    fn test_parse_errors() {
        for bad in [
            "",
            "f(",
            "f(in integer)",
            "f(in widget w)",
            "f() return",
            "f() returns integer",
            "f(in universal string s)",
            "1f()",
        ] {
            assert!(
                matches!(Signature::parse(bad), Err(RegistryError::Signature { .. })),
                "{:?} should not parse",
                bad
            );
        }
    }

    #[test]
    fn test_display() {
        let text = "int2enum(in integer i, out enumerated e)";
        assert_eq!(Signature::parse(text).unwrap().to_string(), text);
    }

    #[test]
    fn test_check_arity() {
        let sig = Signature::parse("int2str(in integer i) return charstring").unwrap();
        assert!(matches!(
            sig.check(&[]),
            Err(RuntimeError::ArityMismatch {
                expected: 1,
                got: 0,
                ..
            })
        ));
    }

    #[test]
    fn test_check_types() {
        let sig = Signature::parse("int2str(in integer i) return charstring").unwrap();
        assert!(sig.check(&[Object::int(1)]).is_ok());
        let err = sig.check(&[Object::float(1.0)]).unwrap_err();
        assert!(matches!(
            err,
            RuntimeError::TypeMismatch { ref param, expected: "integer", .. } if param == "i"
        ));
    }

    #[test]
    fn test_template_accepts_wildcards() {
        assert!(TypeName::Template.accepts(&Object::AnyOrNone));
        assert!(!TypeName::Integer.accepts(&Object::Any));
        assert!(TypeName::UniversalCharstring.accepts(&Object::charstring("a").unwrap()));
        assert!(!TypeName::Charstring.accepts(&Object::universal("a")));
    }

    #[test]
    fn test_charstring_rejects_wide_characters() {
        assert!(TypeName::Charstring.accepts(&Object::charstring("\u{FF}").unwrap()));
        assert!(!TypeName::Charstring.accepts(&Object::Charstring("\u{20AC}".into())));

        let sig = Signature::parse("char2int(in charstring c) return integer").unwrap();
        assert!(matches!(
            sig.check(&[Object::Charstring("\u{20AC}".into())]),
            Err(RuntimeError::TypeMismatch { expected: "charstring", .. })
        ));
    }
}
