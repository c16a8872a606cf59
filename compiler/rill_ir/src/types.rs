//! Static types and the assignability rule.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::Value;

/// Primitive value kinds.
///
/// Declaration order is significant: it is the row/column order of the
/// compound-assignment coercion table.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub enum PrimitiveKind {
    Bool,
    Char,
    SByte,
    Byte,
    Short,
    UShort,
    Int,
    UInt,
    Long,
    ULong,
    Float,
    Double,
}

impl PrimitiveKind {
    pub const ALL: [PrimitiveKind; 12] = [
        PrimitiveKind::Bool,
        PrimitiveKind::Char,
        PrimitiveKind::SByte,
        PrimitiveKind::Byte,
        PrimitiveKind::Short,
        PrimitiveKind::UShort,
        PrimitiveKind::Int,
        PrimitiveKind::UInt,
        PrimitiveKind::Long,
        PrimitiveKind::ULong,
        PrimitiveKind::Float,
        PrimitiveKind::Double,
    ];

    pub const COUNT: usize = Self::ALL.len();

    pub fn name(self) -> &'static str {
        match self {
            PrimitiveKind::Bool => "bool",
            PrimitiveKind::Char => "char",
            PrimitiveKind::SByte => "sbyte",
            PrimitiveKind::Byte => "byte",
            PrimitiveKind::Short => "short",
            PrimitiveKind::UShort => "ushort",
            PrimitiveKind::Int => "int",
            PrimitiveKind::UInt => "uint",
            PrimitiveKind::Long => "long",
            PrimitiveKind::ULong => "ulong",
            PrimitiveKind::Float => "float",
            PrimitiveKind::Double => "double",
        }
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self as usize
    }

    /// Integer kinds. `char` is not integral for arithmetic purposes.
    pub fn is_integral(self) -> bool {
        matches!(
            self,
            PrimitiveKind::SByte
                | PrimitiveKind::Byte
                | PrimitiveKind::Short
                | PrimitiveKind::UShort
                | PrimitiveKind::Int
                | PrimitiveKind::UInt
                | PrimitiveKind::Long
                | PrimitiveKind::ULong
        )
    }

    pub fn is_float(self) -> bool {
        matches!(self, PrimitiveKind::Float | PrimitiveKind::Double)
    }

    pub fn is_numeric(self) -> bool {
        self.is_integral() || self.is_float()
    }

    pub fn is_signed(self) -> bool {
        matches!(
            self,
            PrimitiveKind::SByte
                | PrimitiveKind::Short
                | PrimitiveKind::Int
                | PrimitiveKind::Long
                | PrimitiveKind::Float
                | PrimitiveKind::Double
        )
    }

    /// Storage width in bits.
    pub fn bits(self) -> u32 {
        match self {
            PrimitiveKind::Bool | PrimitiveKind::SByte | PrimitiveKind::Byte => 8,
            PrimitiveKind::Char | PrimitiveKind::Short | PrimitiveKind::UShort => 16,
            PrimitiveKind::Int | PrimitiveKind::UInt | PrimitiveKind::Float => 32,
            PrimitiveKind::Long | PrimitiveKind::ULong | PrimitiveKind::Double => 64,
        }
    }

    /// Inclusive value range of an integral kind (or `char`).
    pub fn integral_range(self) -> Option<(i128, i128)> {
        let range = match self {
            PrimitiveKind::SByte => (i128::from(i8::MIN), i128::from(i8::MAX)),
            PrimitiveKind::Byte => (0, i128::from(u8::MAX)),
            PrimitiveKind::Short => (i128::from(i16::MIN), i128::from(i16::MAX)),
            PrimitiveKind::UShort | PrimitiveKind::Char => (0, i128::from(u16::MAX)),
            PrimitiveKind::Int => (i128::from(i32::MIN), i128::from(i32::MAX)),
            PrimitiveKind::UInt => (0, i128::from(u32::MAX)),
            PrimitiveKind::Long => (i128::from(i64::MIN), i128::from(i64::MAX)),
            PrimitiveKind::ULong => (0, i128::from(u64::MAX)),
            PrimitiveKind::Bool | PrimitiveKind::Float | PrimitiveKind::Double => return None,
        };
        Some(range)
    }

    /// Implicit (always value-preserving in range) conversion from `self`
    /// to `target`. Identity is not a widening.
    pub fn widens_to(self, target: PrimitiveKind) -> bool {
        use PrimitiveKind::{Byte, Char, Double, Float, Int, Long, SByte, Short, UInt, ULong, UShort};
        match self {
            SByte => matches!(target, Short | Int | Long | Float | Double),
            Byte => matches!(
                target,
                Short | UShort | Int | UInt | Long | ULong | Float | Double
            ),
            Short => matches!(target, Int | Long | Float | Double),
            UShort | Char => matches!(target, Int | UInt | Long | ULong | Float | Double)
                || (self == Char && target == UShort),
            Int => matches!(target, Long | Float | Double),
            UInt => matches!(target, Long | ULong | Float | Double),
            Long | ULong => matches!(target, Float | Double),
            Float => target == Double,
            PrimitiveKind::Bool | Double => false,
        }
    }

    /// Identity or implicit widening.
    pub fn assignable_to(self, target: PrimitiveKind) -> bool {
        self == target || self.widens_to(target)
    }

    /// Binary numeric promotion of two operand kinds, following the C#
    /// rules. `None` when the pair has no common numeric type (`ulong` with
    /// a signed integer, or a non-numeric operand).
    pub fn promote(lhs: PrimitiveKind, rhs: PrimitiveKind) -> Option<PrimitiveKind> {
        use PrimitiveKind::{Double, Float, Int, Long, UInt, ULong};
        let numeric = |k: PrimitiveKind| k.is_numeric() || k == PrimitiveKind::Char;
        if !numeric(lhs) || !numeric(rhs) {
            return None;
        }
        let either = |k: PrimitiveKind| lhs == k || rhs == k;
        let signed_integral =
            |k: PrimitiveKind| k.is_integral() && k.is_signed();
        if either(Double) {
            Some(Double)
        } else if either(Float) {
            Some(Float)
        } else if either(ULong) {
            if signed_integral(lhs) || signed_integral(rhs) {
                None
            } else {
                Some(ULong)
            }
        } else if either(Long) {
            Some(Long)
        } else if either(UInt) {
            if signed_integral(lhs) || signed_integral(rhs) {
                Some(Long)
            } else {
                Some(UInt)
            }
        } else {
            Some(Int)
        }
    }

    /// Promotion of a single operand for unary `-` and `~` and for shift
    /// left operands: everything narrower than `int` becomes `int`.
    pub fn promote_unary(self) -> PrimitiveKind {
        match self {
            PrimitiveKind::SByte
            | PrimitiveKind::Byte
            | PrimitiveKind::Short
            | PrimitiveKind::UShort
            | PrimitiveKind::Char => PrimitiveKind::Int,
            other => other,
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A host-registered type.
///
/// Identity is the type name; the factory produces the value a plain
/// declaration (`Money m;`) starts with.
#[derive(Clone)]
pub struct HostType {
    name: Arc<str>,
    default: Arc<dyn Fn() -> Value + Send + Sync>,
}

impl HostType {
    pub fn new(name: &str, default: impl Fn() -> Value + Send + Sync + 'static) -> Self {
        HostType {
            name: Arc::from(name),
            default: Arc::new(default),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn default_value(&self) -> Value {
        (self.default)()
    }
}

impl PartialEq for HostType {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for HostType {}

impl Hash for HostType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Debug for HostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HostType({})", self.name)
    }
}

/// Static type of an expression, variable, parameter or return.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum ValueType {
    Void,
    Primitive(PrimitiveKind),
    String,
    List(Box<ValueType>),
    Host(HostType),
}

impl ValueType {
    pub const BOOL: ValueType = ValueType::Primitive(PrimitiveKind::Bool);
    pub const INT: ValueType = ValueType::Primitive(PrimitiveKind::Int);
    pub const DOUBLE: ValueType = ValueType::Primitive(PrimitiveKind::Double);
    pub const CHAR: ValueType = ValueType::Primitive(PrimitiveKind::Char);

    pub fn list_of(element: ValueType) -> Self {
        ValueType::List(Box::new(element))
    }

    pub fn as_primitive(&self) -> Option<PrimitiveKind> {
        match self {
            ValueType::Primitive(kind) => Some(*kind),
            _ => None,
        }
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, ValueType::Primitive(_))
    }

    pub fn is_void(&self) -> bool {
        matches!(self, ValueType::Void)
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, ValueType::Primitive(PrimitiveKind::Bool))
    }

    /// Element type when values of this type can be enumerated by
    /// `foreach`.
    pub fn enumerable_element(&self) -> Option<ValueType> {
        match self {
            ValueType::List(element) => Some((**element).clone()),
            ValueType::String => Some(ValueType::CHAR),
            _ => None,
        }
    }

    /// The assignability rule: identity, or implicit primitive widening.
    pub fn is_assignable_from(&self, from: &ValueType) -> bool {
        match (self, from) {
            (ValueType::Primitive(to), ValueType::Primitive(from)) => from.assignable_to(*to),
            (ValueType::Void, _) | (_, ValueType::Void) => false,
            (to, from) => to == from,
        }
    }

    /// Value a declaration without initializer starts with.
    pub fn default_value(&self) -> Value {
        match self {
            ValueType::Void => Value::Void,
            ValueType::Primitive(kind) => Value::zero(*kind),
            ValueType::String => Value::string(""),
            ValueType::List(_) => Value::list(Vec::new()),
            ValueType::Host(host) => host.default_value(),
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::Void => f.write_str("void"),
            ValueType::Primitive(kind) => f.write_str(kind.name()),
            ValueType::String => f.write_str("string"),
            ValueType::List(element) => write!(f, "List<{element}>"),
            ValueType::Host(host) => f.write_str(host.name()),
        }
    }
}

#[cfg(test)]
mod tests;
