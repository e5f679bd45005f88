//! Bit, hex and octet strings.

use crate::ValueError;
use num_bigint::BigUint;
use num_traits::Zero;
use std::fmt;

/// Digit unit of a binary string literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    Bit,
    Hex,
    Octet,
}

impl Unit {
    pub fn bits(self) -> usize {
        match self {
            Unit::Bit => 1,
            Unit::Hex => 4,
            Unit::Octet => 8,
        }
    }

    pub fn radix(self) -> u32 {
        match self {
            Unit::Bit => 2,
            Unit::Hex | Unit::Octet => 16,
        }
    }

    /// Number of printed digits per unit.
    fn digits(self) -> usize {
        match self {
            Unit::Octet => 2,
            _ => 1,
        }
    }

    fn suffix(self) -> char {
        match self {
            Unit::Bit => 'B',
            Unit::Hex => 'H',
            Unit::Octet => 'O',
        }
    }

    pub fn type_name(self) -> &'static str {
        match self {
            Unit::Bit => "bitstring",
            Unit::Hex => "hexstring",
            Unit::Octet => "octetstring",
        }
    }
}

/// A length-tagged binary string. Leading zero digits are significant, so the
/// length is kept next to the numeric value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Bitstring {
    value: BigUint,
    len: usize,
    unit: Unit,
}

impl Bitstring {
    pub fn new(value: BigUint, len: usize, unit: Unit) -> Result<Self, ValueError> {
        if value.bits() > (len * unit.bits()) as u64 {
            return Err(ValueError::BinaryStringOverflow { value, len });
        }
        Ok(Self { value, len, unit })
    }

    /// Builds a bitstring of exactly `len` bits.
    pub fn from_uint(value: BigUint, len: usize) -> Result<Self, ValueError> {
        Self::new(value, len, Unit::Bit)
    }

    /// Parses literal text such as `'0101'B`, `'1F'H` or `'00FF'O`.
    /// Whitespace between the quotes is ignored.
    pub fn parse(literal: &str) -> Result<Self, ValueError> {
        let invalid = |reason| ValueError::InvalidBinaryString {
            literal: literal.to_string(),
            reason,
        };

        let body = literal
            .strip_prefix('\'')
            .ok_or_else(|| invalid("missing opening quote"))?;
        let (digits, suffix) = body
            .rsplit_once('\'')
            .ok_or_else(|| invalid("missing closing quote"))?;

        let unit = match suffix {
            "B" | "b" => Unit::Bit,
            "H" | "h" => Unit::Hex,
            "O" | "o" => Unit::Octet,
            _ => return Err(invalid("expected suffix B, H or O")),
        };

        let digits: String = digits.chars().filter(|c| !c.is_whitespace()).collect();
        if !digits.chars().all(|c| c.is_digit(unit.radix())) {
            return Err(invalid("digit out of range for unit"));
        }
        if digits.len() % unit.digits() != 0 {
            return Err(invalid("octetstring needs an even number of digits"));
        }

        let value = if digits.is_empty() {
            BigUint::zero()
        } else {
            BigUint::parse_bytes(digits.as_bytes(), unit.radix())
                .ok_or_else(|| invalid("malformed digits"))?
        };

        Ok(Self {
            value,
            len: digits.len() / unit.digits(),
            unit,
        })
    }

    pub fn value(&self) -> &BigUint {
        &self.value
    }

    /// Number of units (bits, hex digits or octets).
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }
}

impl fmt::Display for Bitstring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.len * self.unit.digits();
        let digits = if width == 0 {
            String::new()
        } else {
            self.value.to_str_radix(self.unit.radix()).to_uppercase()
        };
        write!(f, "'{:0>width$}'{}", digits, self.unit.suffix(), width = width)
    }
}
