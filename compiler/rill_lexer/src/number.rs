//! Numeric literal typing.
//!
//! An unsuffixed integer takes the first of `int`, `uint`, `long`, `ulong`
//! that holds it; `U` picks from `uint`/`ulong`, `L` from `long`/`ulong`,
//! and `UL` is always `ulong`. A real is `float` with an `f` suffix and
//! `double` otherwise.

use rill_ir::Literal;

/// Type an integer literal slice (`42`, `0xFF`, `10UL`).
pub(crate) fn integer_literal(slice: &str) -> Option<Literal> {
    let body = slice.trim_end_matches(['u', 'U', 'l', 'L']);
    let suffix = slice[body.len()..].to_ascii_lowercase();

    let value = match body.strip_prefix("0x").or_else(|| body.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16).ok()?,
        None => body.parse::<u64>().ok()?,
    };

    let unsigned = suffix.contains('u');
    let long = suffix.contains('l');

    let literal = match (unsigned, long) {
        (true, true) => Literal::ULong(value),
        (true, false) => u32::try_from(value).map_or(Literal::ULong(value), Literal::UInt),
        (false, true) => i64::try_from(value).map_or(Literal::ULong(value), Literal::Long),
        (false, false) => {
            if let Ok(v) = i32::try_from(value) {
                Literal::Int(v)
            } else if let Ok(v) = u32::try_from(value) {
                Literal::UInt(v)
            } else if let Ok(v) = i64::try_from(value) {
                Literal::Long(v)
            } else {
                Literal::ULong(value)
            }
        }
    };
    Some(literal)
}

/// Type a real literal slice (`1.5`, `2.0f`, `1e3`, `3d`).
pub(crate) fn real_literal(slice: &str) -> Option<Literal> {
    let last = slice.chars().last()?;
    match last {
        'f' | 'F' => slice[..slice.len() - 1].parse::<f32>().ok().map(Literal::Float),
        'd' | 'D' => slice[..slice.len() - 1].parse::<f64>().ok().map(Literal::Double),
        _ => slice.parse::<f64>().ok().map(Literal::Double),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsuffixed_integers_pick_the_smallest_fitting_kind() {
        assert_eq!(integer_literal("42"), Some(Literal::Int(42)));
        assert_eq!(integer_literal("2147483648"), Some(Literal::UInt(2_147_483_648)));
        assert_eq!(integer_literal("4294967296"), Some(Literal::Long(4_294_967_296)));
        assert_eq!(
            integer_literal("9223372036854775808"),
            Some(Literal::ULong(9_223_372_036_854_775_808))
        );
    }

    #[test]
    fn suffixes() {
        assert_eq!(integer_literal("5U"), Some(Literal::UInt(5)));
        assert_eq!(integer_literal("5L"), Some(Literal::Long(5)));
        assert_eq!(integer_literal("5UL"), Some(Literal::ULong(5)));
        assert_eq!(integer_literal("5lu"), Some(Literal::ULong(5)));
    }

    #[test]
    fn hex_and_overflow() {
        assert_eq!(integer_literal("0xFF"), Some(Literal::Int(255)));
        assert_eq!(integer_literal("0xFFFFFFFF"), Some(Literal::UInt(u32::MAX)));
        assert_eq!(integer_literal("99999999999999999999"), None);
    }

    #[test]
    fn reals() {
        assert_eq!(real_literal("2.0f"), Some(Literal::Float(2.0)));
        assert_eq!(real_literal("1.5"), Some(Literal::Double(1.5)));
        assert_eq!(real_literal("3d"), Some(Literal::Double(3.0)));
        assert_eq!(real_literal("1e3"), Some(Literal::Double(1000.0)));
    }
}
