//! Compile-time constants.
//!
//! Literals are what the AST stores: token literals, folded `const` values,
//! static constants such as `int.MaxValue` and switch case labels. Unlike
//! [`Value`] they are `Send + Sync`, so compiled scripts can be shared.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::{PrimitiveKind, Value, ValueType};

#[derive(Clone, Debug)]
pub enum Literal {
    Bool(bool),
    Char(char),
    SByte(i8),
    Byte(u8),
    Short(i16),
    UShort(u16),
    Int(i32),
    UInt(u32),
    Long(i64),
    ULong(u64),
    Float(f32),
    Double(f64),
    Str(Arc<str>),
}

impl Literal {
    pub fn string(s: &str) -> Self {
        Literal::Str(Arc::from(s))
    }

    pub fn value_type(&self) -> ValueType {
        match self {
            Literal::Str(_) => ValueType::String,
            primitive => primitive
                .kind()
                .map_or(ValueType::Void, ValueType::Primitive),
        }
    }

    pub fn kind(&self) -> Option<PrimitiveKind> {
        self.to_value().kind()
    }

    pub fn to_value(&self) -> Value {
        match self {
            Literal::Bool(v) => Value::Bool(*v),
            Literal::Char(v) => Value::Char(*v),
            Literal::SByte(v) => Value::SByte(*v),
            Literal::Byte(v) => Value::Byte(*v),
            Literal::Short(v) => Value::Short(*v),
            Literal::UShort(v) => Value::UShort(*v),
            Literal::Int(v) => Value::Int(*v),
            Literal::UInt(v) => Value::UInt(*v),
            Literal::Long(v) => Value::Long(*v),
            Literal::ULong(v) => Value::ULong(*v),
            Literal::Float(v) => Value::Float(*v),
            Literal::Double(v) => Value::Double(*v),
            Literal::Str(s) => Value::string(s.as_ref()),
        }
    }

    /// Inverse of [`Literal::to_value`] for primitives and strings.
    pub fn from_value(value: &Value) -> Option<Literal> {
        let literal = match value {
            Value::Bool(v) => Literal::Bool(*v),
            Value::Char(v) => Literal::Char(*v),
            Value::SByte(v) => Literal::SByte(*v),
            Value::Byte(v) => Literal::Byte(*v),
            Value::Short(v) => Literal::Short(*v),
            Value::UShort(v) => Literal::UShort(*v),
            Value::Int(v) => Literal::Int(*v),
            Value::UInt(v) => Literal::UInt(*v),
            Value::Long(v) => Literal::Long(*v),
            Value::ULong(v) => Literal::ULong(*v),
            Value::Float(v) => Literal::Float(*v),
            Value::Double(v) => Literal::Double(*v),
            Value::Str(s) => Literal::Str(Arc::from(s.as_ref())),
            Value::Void | Value::List(_) | Value::Host(_) => return None,
        };
        Some(literal)
    }

    /// Re-type an integer literal as a narrower (or differently signed)
    /// integral kind when its value is in range: `byte b = 200;` is fine,
    /// `byte b = 300;` is not.
    pub fn narrow_to(&self, target: PrimitiveKind) -> Option<Literal> {
        let kind = self.kind()?;
        if !kind.is_integral() || !target.is_integral() {
            return None;
        }
        let v = self.to_value().as_i128()?;
        let (min, max) = target.integral_range()?;
        if v < min || v > max {
            return None;
        }
        Literal::from_value(&Value::from_i128(target, v))
    }

    /// Key used for hashing and equality: exact kind plus bit pattern.
    #[allow(clippy::cast_sign_loss)]
    fn key(&self) -> (u8, u64, Option<&str>) {
        match self {
            Literal::Bool(v) => (0, u64::from(*v), None),
            Literal::Char(v) => (1, u64::from(u32::from(*v)), None),
            Literal::SByte(v) => (2, *v as u64, None),
            Literal::Byte(v) => (3, u64::from(*v), None),
            Literal::Short(v) => (4, *v as u64, None),
            Literal::UShort(v) => (5, u64::from(*v), None),
            Literal::Int(v) => (6, *v as u64, None),
            Literal::UInt(v) => (7, u64::from(*v), None),
            Literal::Long(v) => (8, *v as u64, None),
            Literal::ULong(v) => (9, *v, None),
            Literal::Float(v) => (10, u64::from(v.to_bits()), None),
            Literal::Double(v) => (11, v.to_bits(), None),
            Literal::Str(s) => (12, 0, Some(s)),
        }
    }
}

impl PartialEq for Literal {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Literal {}

impl Hash for Literal {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Str(s) => write!(f, "\"{s}\""),
            Literal::Char(c) => write!(f, "'{c}'"),
            other => write!(f, "{}", other.to_value()),
        }
    }
}
