//! Scalar conversions behind the language's casts.
//!
//! | from \ to | str | bool | int | float |
//! |-----------|-----|------|-----|-------|
//! | str   | identity | `"true"` / `"false"` only | base-10 parse | decimal parse |
//! | bool  | `true` / `false` | identity (validated) | 0 / 1 | 0.0 / 1.0 |
//! | int   | decimal | 0 / 1 only | identity | exact |
//! | float | `%g` | negative is false | round half away from zero | identity |
//!
//! Array types are not convertible.

use std::borrow::Cow;

use toy_core::{TaggedValue, TypeTag};

use crate::error::ValueError;
use crate::resolve::ValueResolver;

fn string_operand<'r, R>(
    resolver: &'r R,
    value: TaggedValue,
    operation: &'static str,
) -> Result<Cow<'r, str>, R::Error>
where
    R: ValueResolver + ?Sized,
{
    if value.bits == 0 {
        return Err(ValueError::NullHandle { operation }.into());
    }
    resolver.resolve_str(value.bits)
}

fn unsupported(from: TypeTag, to: TypeTag) -> ValueError {
    ValueError::UnsupportedConversion { from, to }
}

/// Text of `value`. Strings are borrowed from the resolver; every other
/// scalar is rendered into a new string.
pub fn to_str<R>(resolver: &R, value: TaggedValue) -> Result<Cow<'_, str>, R::Error>
where
    R: ValueResolver + ?Sized,
{
    match value.tag {
        TypeTag::Str => string_operand(resolver, value, "toy_type_to_str"),
        TypeTag::Bool => {
            let b = TaggedValue::decode_bool(value.bits).map_err(ValueError::from)?;
            Ok(Cow::Borrowed(if b { "true" } else { "false" }))
        }
        TypeTag::Int => Ok(Cow::Owned(value.bits.to_string())),
        TypeTag::Float => Ok(Cow::Owned(general(TaggedValue::decode_float(value.bits)))),
        tag => Err(unsupported(tag, TypeTag::Str).into()),
    }
}

/// Significant digits of the `%g` rendering.
const GENERAL_PRECISION: i32 = 6;

/// `printf("%g")`: six significant digits with trailing zeros removed,
/// switching to `e+XX` notation for exponents below -4 or from 6 up.
fn general(d: f64) -> String {
    if d.is_nan() {
        return if d.is_sign_negative() { "-nan" } else { "nan" }.into();
    }
    if d.is_infinite() {
        return if d > 0.0 { "inf" } else { "-inf" }.into();
    }
    if d == 0.0 {
        return if d.is_sign_negative() { "-0" } else { "0" }.into();
    }
    // The exponent is taken after rounding to the target precision, so
    // 999999.5 correctly moves to scientific form.
    let sci = format!("{:.*e}", (GENERAL_PRECISION - 1) as usize, d);
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return sci;
    };
    let exp: i32 = exp.parse().unwrap_or(0);
    if exp < -4 || exp >= GENERAL_PRECISION {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{sign}{:02}", trim_fraction(mantissa), exp.abs())
    } else {
        let decimals = (GENERAL_PRECISION - 1 - exp) as usize;
        trim_fraction(&format!("{d:.decimals$}")).to_owned()
    }
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

/// Boolean value of `value`.
pub fn to_bool<R>(resolver: &R, value: TaggedValue) -> Result<bool, R::Error>
where
    R: ValueResolver + ?Sized,
{
    match value.tag {
        TypeTag::Str => {
            let text = string_operand(resolver, value, "toy_type_to_bool")?;
            match text.as_ref() {
                "true" => Ok(true),
                "false" => Ok(false),
                other => Err(ValueError::InvalidBoolText {
                    text: other.to_owned(),
                }
                .into()),
            }
        }
        TypeTag::Bool => Ok(TaggedValue::decode_bool(value.bits).map_err(ValueError::from)?),
        TypeTag::Int => match value.bits {
            0 => Ok(false),
            1 => Ok(true),
            value => Err(ValueError::InvalidBoolInt { value }.into()),
        },
        TypeTag::Float => {
            let d = TaggedValue::decode_float(value.bits);
            Ok(d >= 0.0 || d.is_nan())
        }
        tag => Err(unsupported(tag, TypeTag::Bool).into()),
    }
}

/// Integer value of `value`.
///
/// Strings must be a complete base-10 integer (leading whitespace is
/// skipped) that fits in an `i64`.
pub fn to_int<R>(resolver: &R, value: TaggedValue) -> Result<i64, R::Error>
where
    R: ValueResolver + ?Sized,
{
    match value.tag {
        TypeTag::Str => {
            let text = string_operand(resolver, value, "toy_type_to_int")?;
            let n = text
                .trim_start()
                .parse::<i64>()
                .map_err(|_| ValueError::InvalidNumber {
                    text: text.to_string(),
                    target: TypeTag::Int,
                })?;
            Ok(n)
        }
        TypeTag::Bool => Ok(TaggedValue::decode_bool(value.bits).map_err(ValueError::from)? as i64),
        TypeTag::Int => Ok(value.bits),
        TypeTag::Float => Ok(TaggedValue::decode_float(value.bits).round() as i64),
        tag => Err(unsupported(tag, TypeTag::Int).into()),
    }
}

/// Float value of `value`, returned as the payload bits carried by the
/// calling convention.
pub fn to_float_bits<R>(resolver: &R, value: TaggedValue) -> Result<i64, R::Error>
where
    R: ValueResolver + ?Sized,
{
    let d = match value.tag {
        TypeTag::Str => {
            let text = string_operand(resolver, value, "toy_type_to_float")?;
            text.trim_start()
                .parse::<f64>()
                .map_err(|_| ValueError::InvalidNumber {
                    text: text.to_string(),
                    target: TypeTag::Float,
                })?
        }
        TypeTag::Bool => {
            if TaggedValue::decode_bool(value.bits).map_err(ValueError::from)? {
                1.0
            } else {
                0.0
            }
        }
        TypeTag::Int => value.bits as f64,
        TypeTag::Float => return Ok(value.bits),
        tag => return Err(unsupported(tag, TypeTag::Float).into()),
    };
    Ok(d.to_bits() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::array::TaggedArray;

    /// Resolves handle `n` to the `n`th entry (1-based).
    struct Strings(Vec<&'static str>);

    impl ValueResolver for Strings {
        type Error = ValueError;

        fn resolve_str(&self, bits: i64) -> Result<Cow<'_, str>, ValueError> {
            self.0
                .get((bits - 1) as usize)
                .map(|s| Cow::Borrowed(*s))
                .ok_or(ValueError::InvalidHandle {
                    bits,
                    tag: TypeTag::Str,
                })
        }

        fn resolve_array(&self, bits: i64) -> Result<&TaggedArray, ValueError> {
            Err(ValueError::InvalidHandle {
                bits,
                tag: TypeTag::IntArr,
            })
        }
    }

    fn s(bits: i64) -> TaggedValue {
        TaggedValue::new(bits, TypeTag::Str)
    }

    #[test]
    fn scalars_to_str() {
        let r = Strings(vec!["abc"]);
        assert_eq!(to_str(&r, s(1)).unwrap(), "abc");
        assert_eq!(to_str(&r, TaggedValue::bool(true)).unwrap(), "true");
        assert_eq!(to_str(&r, TaggedValue::int(-17)).unwrap(), "-17");
        assert_eq!(to_str(&r, TaggedValue::float(0.1)).unwrap(), "0.1");
        assert_eq!(to_str(&r, TaggedValue::float(3.0)).unwrap(), "3");
        assert_eq!(to_str(&r, TaggedValue::float(f64::NEG_INFINITY)).unwrap(), "-inf");
        assert!(to_str(&r, TaggedValue::new(5, TypeTag::Bool)).is_err());
    }

    #[test]
    fn float_to_str_matches_printf_g() {
        let r = Strings(Vec::new());
        let g = |d: f64| to_str(&r, TaggedValue::float(d)).unwrap().into_owned();
        assert_eq!(g(0.1 + 0.2), "0.3");
        assert_eq!(g(1e20), "1e+20");
        assert_eq!(g(1.0 / 3.0), "0.333333");
        assert_eq!(g(-2.5), "-2.5");
        assert_eq!(g(0.0), "0");
        assert_eq!(g(123456.0), "123456");
        assert_eq!(g(1234567.0), "1.23457e+06");
        assert_eq!(g(999999.5), "1e+06");
        assert_eq!(g(0.0001), "0.0001");
        assert_eq!(g(0.00001234), "1.234e-05");
        assert_eq!(g(f64::NAN), "nan");
    }

    #[test]
    fn str_to_bool_is_strict() {
        let r = Strings(vec!["true", "false", "True"]);
        assert_eq!(to_bool(&r, s(1)), Ok(true));
        assert_eq!(to_bool(&r, s(2)), Ok(false));
        assert_eq!(
            to_bool(&r, s(3)),
            Err(ValueError::InvalidBoolText {
                text: "True".into()
            })
        );
        assert_eq!(
            to_bool(&r, s(0)),
            Err(ValueError::NullHandle {
                operation: "toy_type_to_bool"
            })
        );
    }

    #[test]
    fn numbers_to_bool() {
        let r = Strings(Vec::new());
        assert_eq!(to_bool(&r, TaggedValue::int(1)), Ok(true));
        assert_eq!(
            to_bool(&r, TaggedValue::int(2)),
            Err(ValueError::InvalidBoolInt { value: 2 })
        );
        assert_eq!(to_bool(&r, TaggedValue::float(-0.5)), Ok(false));
        assert_eq!(to_bool(&r, TaggedValue::float(0.0)), Ok(true));
        assert_eq!(to_bool(&r, TaggedValue::float(7.25)), Ok(true));
    }

    #[test]
    fn to_int_table() {
        let r = Strings(vec!["123", "  -8", "12abc", "99999999999999999999"]);
        assert_eq!(to_int(&r, s(1)), Ok(123));
        assert_eq!(to_int(&r, s(2)), Ok(-8));
        assert!(matches!(
            to_int(&r, s(3)),
            Err(ValueError::InvalidNumber { .. })
        ));
        assert!(to_int(&r, s(4)).is_err());
        assert_eq!(to_int(&r, TaggedValue::bool(true)), Ok(1));
        assert_eq!(to_int(&r, TaggedValue::float(2.5)), Ok(3));
        assert_eq!(to_int(&r, TaggedValue::float(-2.5)), Ok(-3));
        assert_eq!(to_int(&r, TaggedValue::float(2.4)), Ok(2));
    }

    #[test]
    fn to_float_table() {
        let r = Strings(vec!["1.5", "x"]);
        let f = |bits: i64| f64::from_bits(bits as u64);
        assert_eq!(f(to_float_bits(&r, s(1)).unwrap()), 1.5);
        assert!(to_float_bits(&r, s(2)).is_err());
        assert_eq!(f(to_float_bits(&r, TaggedValue::bool(true)).unwrap()), 1.0);
        assert_eq!(f(to_float_bits(&r, TaggedValue::int(-4)).unwrap()), -4.0);
        let bits = TaggedValue::float(9.75).bits;
        assert_eq!(to_float_bits(&r, TaggedValue::float(9.75)), Ok(bits));
    }

    #[test]
    fn arrays_are_not_convertible() {
        let r = Strings(Vec::new());
        let arr = TaggedValue::new(8, TypeTag::IntArr);
        assert_eq!(
            to_int(&r, arr),
            Err(ValueError::UnsupportedConversion {
                from: TypeTag::IntArr,
                to: TypeTag::Int
            })
        );
        assert!(to_str(&r, arr).is_err());
        assert!(to_bool(&r, arr).is_err());
        assert!(to_float_bits(&r, arr).is_err());
    }
}
