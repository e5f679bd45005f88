//! The predefined functions.

use crate::{BuiltinsBuilder, Context, RegistryError, RuntimeError};
use num_bigint::BigInt;
use num_traits::{FromPrimitive, ToPrimitive};
use rand::Rng;
use t3match_value::{Bitstring, ListKind, Object};
use tracing::debug;

type Return = Result<Option<Object>, RuntimeError>;

pub(crate) fn register(builtins: BuiltinsBuilder) -> Result<BuiltinsBuilder, RegistryError> {
    builtins
        .add("lengthof(in template x) return integer", lengthof)?
        .add("rnd() return float", rnd)?
        .add("int2str(in integer i) return charstring", int2str)?
        .add("str2int(in charstring s) return integer", str2int)?
        .add("int2bit(in integer i, in integer l) return bitstring", int2bit)?
        .add("bit2int(in bitstring b) return integer", bit2int)?
        .add("int2char(in integer i) return charstring", int2char)?
        .add("char2int(in charstring c) return integer", char2int)?
        .add("int2unichar(in integer i) return universal charstring", int2unichar)?
        .add("unichar2int(in universal charstring s) return integer", unichar2int)?
        .add("int2float(in integer i) return float", int2float)?
        .add("float2int(in float f) return integer", float2int)?
        .add("int2enum(in integer i, out enumerated e)", int2enum)?
        .add("log", log)?
        .add("match(in template v, in template p) return boolean", match_)?
        .add("superset", superset)?
        .add("subset", subset)?
        .add("permutation", permutation)?
        .add("complement", complement)
}

// ============ Argument access ============

fn int_arg<'a>(name: &'static str, args: &'a [Object], i: usize) -> Result<&'a BigInt, RuntimeError> {
    match args.get(i) {
        Some(Object::Int(n)) => Ok(n),
        other => Err(unsupported(name, other)),
    }
}

fn unsupported(name: &'static str, arg: Option<&Object>) -> RuntimeError {
    RuntimeError::UnsupportedType {
        name,
        got: arg.map_or("nothing", |a| a.kind().name()),
    }
}

fn out_of_range(name: &'static str, message: String) -> RuntimeError {
    RuntimeError::RangeError { name, message }
}

// ============ Functions ============

fn lengthof(_: &mut Context<'_>, args: &mut [Object]) -> Return {
    let arg = &args[0];
    match arg {
        Object::Charstring(_) | Object::UniversalCharstring(_) | Object::Bitstring(_) | Object::List(_) => {
            let len = arg.len().unwrap_or_default();
            Ok(Some(Object::Int(BigInt::from(len))))
        }
        _ => Err(unsupported("lengthof", Some(arg))),
    }
}

fn rnd(_: &mut Context<'_>, _: &mut [Object]) -> Return {
    let x: f64 = rand::thread_rng().gen();
    Ok(Some(Object::float(x)))
}

fn int2str(_: &mut Context<'_>, args: &mut [Object]) -> Return {
    let i = int_arg("int2str", args, 0)?;
    Ok(Some(Object::Charstring(i.to_string())))
}

fn str2int(_: &mut Context<'_>, args: &mut [Object]) -> Return {
    let Object::Charstring(s) = &args[0] else {
        return Err(unsupported("str2int", args.first()));
    };
    let digits = s.strip_prefix(&['-', '+'][..]).unwrap_or(s);
    let invalid = || RuntimeError::InvalidArgument {
        name: "str2int",
        message: format!("{:?} is not an integer", s),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let i: BigInt = s.parse().map_err(|_| invalid())?;
    Ok(Some(Object::Int(i)))
}

fn int2bit(_: &mut Context<'_>, args: &mut [Object]) -> Return {
    let i = int_arg("int2bit", args, 0)?;
    let l = int_arg("int2bit", args, 1)?;

    let len = l
        .to_i64()
        .filter(|l| *l >= 0)
        .and_then(|l| usize::try_from(l).ok())
        .ok_or_else(|| out_of_range("int2bit", format!("invalid length {}", l)))?;
    let value = i
        .to_biguint()
        .ok_or_else(|| out_of_range("int2bit", format!("negative value {}", i)))?;
    if value.bits() > len as u64 {
        return Err(out_of_range(
            "int2bit",
            format!("{} does not fit into {} bits", i, len),
        ));
    }

    Ok(Some(Object::Bitstring(Bitstring::from_uint(value, len)?)))
}

fn bit2int(_: &mut Context<'_>, args: &mut [Object]) -> Return {
    let Object::Bitstring(b) = &args[0] else {
        return Err(unsupported("bit2int", args.first()));
    };
    Ok(Some(Object::Int(BigInt::from(b.value().clone()))))
}

fn int2char(_: &mut Context<'_>, args: &mut [Object]) -> Return {
    let i = int_arg("int2char", args, 0)?;
    let c = i
        .to_u8()
        .filter(u8::is_ascii)
        .ok_or_else(|| out_of_range("int2char", format!("{} is outside 0..127", i)))?;
    Ok(Some(Object::Charstring(char::from(c).to_string())))
}

fn char2int(_: &mut Context<'_>, args: &mut [Object]) -> Return {
    let c = args[0].as_char().ok_or_else(|| RuntimeError::InvalidArgument {
        name: "char2int",
        message: format!("expected a single character, got {}", args[0]),
    })?;
    Ok(Some(Object::Int(BigInt::from(u32::from(c)))))
}

fn int2unichar(_: &mut Context<'_>, args: &mut [Object]) -> Return {
    let i = int_arg("int2unichar", args, 0)?;
    let code = i
        .to_u32()
        .filter(|n| *n <= i32::MAX as u32)
        .ok_or_else(|| out_of_range("int2unichar", format!("{} is outside 0..2147483647", i)))?;
    let c = char::from_u32(code).ok_or_else(|| {
        out_of_range("int2unichar", format!("{} is not a unicode scalar value", code))
    })?;
    Ok(Some(Object::UniversalCharstring(vec![c])))
}

fn unichar2int(_: &mut Context<'_>, args: &mut [Object]) -> Return {
    let c = args[0].as_char().ok_or_else(|| RuntimeError::InvalidArgument {
        name: "unichar2int",
        message: format!("expected a single code point, got {}", args[0]),
    })?;
    Ok(Some(Object::Int(BigInt::from(u32::from(c)))))
}

fn int2float(_: &mut Context<'_>, args: &mut [Object]) -> Return {
    let i = int_arg("int2float", args, 0)?;
    let f = i
        .to_f64()
        .ok_or_else(|| out_of_range("int2float", format!("{} is not representable", i)))?;
    Ok(Some(Object::float(f)))
}

fn float2int(_: &mut Context<'_>, args: &mut [Object]) -> Return {
    let Object::Float(f) = args[0] else {
        return Err(unsupported("float2int", args.first()));
    };
    let i = Some(f)
        .filter(|f| f.is_finite())
        .and_then(|f| BigInt::from_f64(f.trunc()))
        .ok_or_else(|| out_of_range("float2int", format!("{} has no integer value", f)))?;
    Ok(Some(Object::Int(i)))
}

fn int2enum(_: &mut Context<'_>, args: &mut [Object]) -> Return {
    let i = int_arg("int2enum", args, 0)?;
    let ordinal = i
        .to_i64()
        .ok_or_else(|| out_of_range("int2enum", format!("{} is not a valid ordinal", i)))?;
    match &mut args[1] {
        Object::Enum(e) => {
            e.set_ordinal(ordinal)?;
            Ok(None)
        }
        other => Err(unsupported("int2enum", Some(&*other))),
    }
}

fn log(ctx: &mut Context<'_>, args: &mut [Object]) -> Return {
    ctx.log().write_line(args)?;
    Ok(None)
}

fn match_(_: &mut Context<'_>, args: &mut [Object]) -> Return {
    let (value, pattern) = (&args[0], &args[1]);
    match t3match_match::matches(value, pattern) {
        Ok(()) => Ok(Some(Object::bool(true))),
        Err(source) if source.is_error() => Err(RuntimeError::Match {
            value: value.to_string(),
            pattern: pattern.to_string(),
            source,
        }),
        Err(reason) => {
            debug!(%value, %pattern, %reason, "no match");
            Ok(Some(Object::bool(false)))
        }
    }
}

fn list_of(kind: ListKind, args: &[Object]) -> Return {
    Ok(Some(Object::list(kind, args.to_vec())))
}

fn superset(_: &mut Context<'_>, args: &mut [Object]) -> Return {
    list_of(ListKind::Superset, args)
}

fn subset(_: &mut Context<'_>, args: &mut [Object]) -> Return {
    list_of(ListKind::Subset, args)
}

fn permutation(_: &mut Context<'_>, args: &mut [Object]) -> Return {
    list_of(ListKind::Permutation, args)
}

fn complement(_: &mut Context<'_>, args: &mut [Object]) -> Return {
    list_of(ListKind::Complement, args)
}
