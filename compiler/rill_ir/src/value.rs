//! Runtime values.
//!
//! Values live only inside a runtime context chain, which is single-threaded,
//! so reference types (`string`, `List<T>`, host objects) share through `Rc`.
//! Anything stored in the AST uses [`Literal`](crate::Literal) instead.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::host::HostValue;
use crate::PrimitiveKind;

/// A runtime value.
///
/// Numeric variants are exact: `Int(1)` and `Long(1)` are different values,
/// and equality never converts between widths.
#[derive(Clone, Debug)]
pub enum Value {
    Void,
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
    Str(Rc<str>),
    List(ListValue),
    Host(HostValue),
}

impl Value {
    pub fn string(s: impl AsRef<str>) -> Self {
        Value::Str(Rc::from(s.as_ref()))
    }

    pub fn list(items: Vec<Value>) -> Self {
        Value::List(ListValue::new(items))
    }

    /// Zero value of a primitive kind (`false` and `'\0'` included).
    pub fn zero(kind: PrimitiveKind) -> Self {
        match kind {
            PrimitiveKind::Bool => Value::Bool(false),
            PrimitiveKind::Char => Value::Char('\0'),
            PrimitiveKind::Float => Value::Float(0.0),
            PrimitiveKind::Double => Value::Double(0.0),
            integral => Value::from_i128(integral, 0),
        }
    }

    /// Primitive kind of this value, if it is a primitive.
    pub fn kind(&self) -> Option<PrimitiveKind> {
        let kind = match self {
            Value::Bool(_) => PrimitiveKind::Bool,
            Value::Char(_) => PrimitiveKind::Char,
            Value::SByte(_) => PrimitiveKind::SByte,
            Value::Byte(_) => PrimitiveKind::Byte,
            Value::Short(_) => PrimitiveKind::Short,
            Value::UShort(_) => PrimitiveKind::UShort,
            Value::Int(_) => PrimitiveKind::Int,
            Value::UInt(_) => PrimitiveKind::UInt,
            Value::Long(_) => PrimitiveKind::Long,
            Value::ULong(_) => PrimitiveKind::ULong,
            Value::Float(_) => PrimitiveKind::Float,
            Value::Double(_) => PrimitiveKind::Double,
            Value::Void | Value::Str(_) | Value::List(_) | Value::Host(_) => return None,
        };
        Some(kind)
    }

    /// Short type description for runtime error messages.
    pub fn type_name(&self) -> String {
        match self {
            Value::Void => "void".to_string(),
            Value::Str(_) => "string".to_string(),
            Value::List(_) => "List".to_string(),
            Value::Host(host) => host.type_name().to_string(),
            primitive => primitive
                .kind()
                .map_or_else(String::new, |k| k.name().to_string()),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&ListValue> {
        match self {
            Value::List(list) => Some(list),
            _ => None,
        }
    }

    /// Exact integer view of an integral or `char` value.
    pub fn as_i128(&self) -> Option<i128> {
        let v = match self {
            Value::Char(c) => i128::from(u32::from(*c)),
            Value::SByte(v) => i128::from(*v),
            Value::Byte(v) => i128::from(*v),
            Value::Short(v) => i128::from(*v),
            Value::UShort(v) => i128::from(*v),
            Value::Int(v) => i128::from(*v),
            Value::UInt(v) => i128::from(*v),
            Value::Long(v) => i128::from(*v),
            Value::ULong(v) => i128::from(*v),
            _ => return None,
        };
        Some(v)
    }

    /// Floating view of any numeric or `char` value.
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(f64::from(*v)),
            Value::Double(v) => Some(*v),
            other => other.as_i128().map(|v| v as f64),
        }
    }

    /// Build a value of `kind` from an integer, wrapping to the kind's width
    /// (unchecked C-family semantics).
    ///
    /// A `char` whose code unit is a lone surrogate becomes U+FFFD.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn from_i128(kind: PrimitiveKind, v: i128) -> Self {
        match kind {
            PrimitiveKind::Bool => Value::Bool(v != 0),
            PrimitiveKind::Char => {
                Value::Char(char::from_u32(u32::from(v as u16)).unwrap_or('\u{FFFD}'))
            }
            PrimitiveKind::SByte => Value::SByte(v as i8),
            PrimitiveKind::Byte => Value::Byte(v as u8),
            PrimitiveKind::Short => Value::Short(v as i16),
            PrimitiveKind::UShort => Value::UShort(v as u16),
            PrimitiveKind::Int => Value::Int(v as i32),
            PrimitiveKind::UInt => Value::UInt(v as u32),
            PrimitiveKind::Long => Value::Long(v as i64),
            PrimitiveKind::ULong => Value::ULong(v as u64),
            PrimitiveKind::Float => Value::Float(v as f32),
            PrimitiveKind::Double => Value::Double(v as f64),
        }
    }

    /// Build a value of `kind` from a float. Integral targets truncate
    /// toward zero and then wrap; NaN becomes zero.
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_f64(kind: PrimitiveKind, v: f64) -> Self {
        match kind {
            PrimitiveKind::Float => Value::Float(v as f32),
            PrimitiveKind::Double => Value::Double(v),
            PrimitiveKind::Bool => Value::Bool(v != 0.0),
            integral => Value::from_i128(integral, v.trunc() as i128),
        }
    }

    /// Explicit primitive conversion (a cast). `bool` converts only to and
    /// from itself; non-primitives never convert.
    pub fn convert(&self, kind: PrimitiveKind) -> Option<Value> {
        let from = self.kind()?;
        if from == kind {
            return Some(self.clone());
        }
        if from == PrimitiveKind::Bool || kind == PrimitiveKind::Bool {
            return None;
        }
        if from.is_float() {
            self.as_f64().map(|v| Value::from_f64(kind, v))
        } else {
            self.as_i128().map(|v| Value::from_i128(kind, v))
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Void, Value::Void) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::SByte(a), Value::SByte(b)) => a == b,
            (Value::Byte(a), Value::Byte(b)) => a == b,
            (Value::Short(a), Value::Short(b)) => a == b,
            (Value::UShort(a), Value::UShort(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::UInt(a), Value::UInt(b)) => a == b,
            (Value::Long(a), Value::Long(b)) => a == b,
            (Value::ULong(a), Value::ULong(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Double(a), Value::Double(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => a.ptr_eq(b),
            (Value::Host(a), Value::Host(b)) => a.equals(b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Void => Ok(()),
            Value::Bool(true) => f.write_str("True"),
            Value::Bool(false) => f.write_str("False"),
            Value::Char(c) => write!(f, "{c}"),
            Value::SByte(v) => write!(f, "{v}"),
            Value::Byte(v) => write!(f, "{v}"),
            Value::Short(v) => write!(f, "{v}"),
            Value::UShort(v) => write!(f, "{v}"),
            Value::Int(v) => write!(f, "{v}"),
            Value::UInt(v) => write!(f, "{v}"),
            Value::Long(v) => write!(f, "{v}"),
            Value::ULong(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Double(v) => write!(f, "{v}"),
            Value::Str(s) => f.write_str(s),
            Value::List(list) => {
                f.write_str("[")?;
                for (i, item) in list.snapshot().iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Host(host) => f.write_str(&host.render()),
        }
    }
}

/// Shared, mutable list storage (`List<T>` has reference semantics).
#[derive(Clone, Debug, Default)]
pub struct ListValue(Rc<RefCell<Vec<Value>>>);

impl ListValue {
    pub fn new(items: Vec<Value>) -> Self {
        ListValue(Rc::new(RefCell::new(items)))
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Value> {
        self.0.borrow().get(index).cloned()
    }

    /// Replace the element at `index`. Returns `false` when out of range.
    pub fn set(&self, index: usize, value: Value) -> bool {
        match self.0.borrow_mut().get_mut(index) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    pub fn push(&self, value: Value) {
        self.0.borrow_mut().push(value);
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    pub fn contains(&self, value: &Value) -> bool {
        self.0.borrow().iter().any(|item| item == value)
    }

    /// Copy of the current elements.
    pub fn snapshot(&self) -> Vec<Value> {
        self.0.borrow().clone()
    }

    pub fn ptr_eq(&self, other: &ListValue) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

#[cfg(test)]
mod tests;
