//! Text rendering of tagged values.

use std::fmt::Write;

use toy_core::{TaggedValue, TypeTag};

use crate::error::ValueError;
use crate::resolve::ValueResolver;

/// Rendering of a null string handle.
pub const NULL_STRING: &str = "NULL_STRING";

/// Rendering of a null array handle.
pub const NULL_ARRAY: &str = "NULL_ARRAY";

/// Rendering of an array once the depth budget is exhausted.
pub const TRUNCATED_ARRAY: &str = "[...]";

/// Render `value` as text.
///
/// `degree` bounds how many levels of array nesting are expanded: an array
/// reached with `degree <= 0` renders as [`TRUNCATED_ARRAY`] without its
/// contents being touched, and each nested level is formatted with
/// `degree - 1`.
pub fn format_value<R>(resolver: &R, value: TaggedValue, degree: i64) -> Result<String, R::Error>
where
    R: ValueResolver + ?Sized,
{
    let mut out = String::new();
    write_value(resolver, value, degree, &mut out)?;
    Ok(out)
}

fn write_value<R>(
    resolver: &R,
    value: TaggedValue,
    degree: i64,
    out: &mut String,
) -> Result<(), R::Error>
where
    R: ValueResolver + ?Sized,
{
    match value.tag {
        TypeTag::Str => {
            if value.bits == 0 {
                out.push_str(NULL_STRING);
            } else {
                out.push_str(&resolver.resolve_str(value.bits)?);
            }
        }
        TypeTag::Bool => {
            let b = TaggedValue::decode_bool(value.bits).map_err(ValueError::from)?;
            out.push_str(if b { "true" } else { "false" });
        }
        TypeTag::Int => {
            let _ = write!(out, "{}", value.bits);
        }
        TypeTag::Float => write_fixed(TaggedValue::decode_float(value.bits), out),
        TypeTag::StrArr | TypeTag::BoolArr | TypeTag::IntArr | TypeTag::FloatArr => {
            if value.bits == 0 {
                out.push_str(NULL_ARRAY);
                return Ok(());
            }
            if degree <= 0 {
                out.push_str(TRUNCATED_ARRAY);
                return Ok(());
            }
            let array = resolver.resolve_array(value.bits)?;
            out.push('[');
            for (i, elem) in array.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_value(resolver, *elem, degree - 1, out)?;
            }
            out.push(']');
        }
    }
    Ok(())
}

/// Six fractional digits, with C spellings for non-finite values.
fn write_fixed(d: f64, out: &mut String) {
    if d.is_nan() {
        out.push_str(if d.is_sign_negative() { "-nan" } else { "nan" });
    } else if d.is_infinite() {
        out.push_str(if d > 0.0 { "inf" } else { "-inf" });
    } else {
        let _ = write!(out, "{d:.6}");
    }
}
