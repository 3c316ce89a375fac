//! Cross-field consistency checks on decoded resources.

use std::fmt::Display;

use crate::error::SchemaError;

/// Checks a decoded value against rules that serde alone cannot express:
/// date ordering, numeric ranges, and agreement between ids and the nested
/// objects they point at.
pub trait Validate {
    fn validate(&self) -> Result<(), SchemaError>;
}

impl<T: Validate> Validate for Vec<T> {
    fn validate(&self) -> Result<(), SchemaError> {
        self.iter().try_for_each(Validate::validate)
    }
}

impl<T: Validate> Validate for Option<T> {
    fn validate(&self) -> Result<(), SchemaError> {
        match self {
            Some(value) => value.validate(),
            None => Ok(()),
        }
    }
}

pub(crate) fn ensure_not_after<T: PartialOrd + Display>(
    earlier: &'static str,
    earlier_value: &T,
    later: &'static str,
    later_value: &T,
) -> Result<(), SchemaError> {
    if earlier_value > later_value {
        return Err(SchemaError::DateOrder {
            earlier,
            earlier_value: earlier_value.to_string(),
            later,
            later_value: later_value.to_string(),
        });
    }
    Ok(())
}

pub(crate) fn ensure_range<T: PartialOrd + Display>(
    field: &'static str,
    value: &T,
    min: &T,
    max: &T,
) -> Result<(), SchemaError> {
    if value < min || value > max {
        return Err(SchemaError::OutOfRange {
            field,
            value: value.to_string(),
            min: min.to_string(),
            max: max.to_string(),
        });
    }
    Ok(())
}

pub(crate) fn ensure_eq<A, B>(
    field: &'static str,
    expected: &A,
    found: &B,
) -> Result<(), SchemaError>
where
    A: PartialEq<B> + Display + ?Sized,
    B: Display + ?Sized,
{
    if expected != found {
        return Err(SchemaError::Mismatch {
            field,
            expected: expected.to_string(),
            found: found.to_string(),
        });
    }
    Ok(())
}
