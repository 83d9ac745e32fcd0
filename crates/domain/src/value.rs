//! Typed payloads bound to template placeholders.

use serde::ser::{Serialize, SerializeSeq, Serializer};
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// Text rendered for absent values.
pub const NULL_TEXT: &str = "(null)";

/// A structured value captured at the call site.
#[derive(Debug, Clone, PartialEq)]
pub enum LogValue {
    /// Absent value; renders as `(null)`.
    Null,
    /// Boolean.
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Unsigned integer.
    UInt(u64),
    /// Floating point number.
    Float(f64),
    /// Text, or any value captured through its `Display` impl.
    Str(Box<str>),
    /// Sequence; renders as its items joined by `", "`.
    List(Vec<LogValue>),
}

impl LogValue {
    /// Capture any displayable domain value as text.
    pub fn display(value: &impl fmt::Display) -> Self {
        Self::Str(value.to_string().into_boxed_str())
    }

    /// Borrow the text payload, if this is a string value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(text) => Some(text),
            _ => None,
        }
    }

    /// Returns true for [`LogValue::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl fmt::Display for LogValue {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => formatter.write_str(NULL_TEXT),
            Self::Bool(value) => write!(formatter, "{value}"),
            Self::Int(value) => write!(formatter, "{value}"),
            Self::UInt(value) => write!(formatter, "{value}"),
            Self::Float(value) => write!(formatter, "{value}"),
            Self::Str(value) => formatter.write_str(value),
            Self::List(items) => {
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        formatter.write_str(", ")?;
                    }
                    write!(formatter, "{item}")?;
                }
                Ok(())
            },
        }
    }
}

impl Serialize for LogValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_none(),
            Self::Bool(value) => serializer.serialize_bool(*value),
            Self::Int(value) => serializer.serialize_i64(*value),
            Self::UInt(value) => serializer.serialize_u64(*value),
            Self::Float(value) => serializer.serialize_f64(*value),
            Self::Str(value) => serializer.serialize_str(value),
            Self::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            },
        }
    }
}

/// Conversion of a call-site argument into a [`LogValue`].
///
/// Implemented for primitives, strings, options, sequences, and references to
/// any of those. Domain types without an impl can be wrapped with
/// [`LogValue::display`].
pub trait ToLogValue {
    /// Capture `self` as a structured value.
    fn to_log_value(&self) -> LogValue;
}

impl ToLogValue for LogValue {
    fn to_log_value(&self) -> LogValue {
        self.clone()
    }
}

impl<T: ToLogValue + ?Sized> ToLogValue for &T {
    fn to_log_value(&self) -> LogValue {
        (**self).to_log_value()
    }
}

impl<T: ToLogValue + ?Sized> ToLogValue for Box<T> {
    fn to_log_value(&self) -> LogValue {
        (**self).to_log_value()
    }
}

impl<T: ToLogValue + ?Sized> ToLogValue for Arc<T> {
    fn to_log_value(&self) -> LogValue {
        (**self).to_log_value()
    }
}

impl ToLogValue for str {
    fn to_log_value(&self) -> LogValue {
        LogValue::Str(self.into())
    }
}

impl ToLogValue for String {
    fn to_log_value(&self) -> LogValue {
        LogValue::Str(self.as_str().into())
    }
}

impl ToLogValue for Cow<'_, str> {
    fn to_log_value(&self) -> LogValue {
        LogValue::Str(self.as_ref().into())
    }
}

impl ToLogValue for char {
    fn to_log_value(&self) -> LogValue {
        LogValue::display(self)
    }
}

impl ToLogValue for bool {
    fn to_log_value(&self) -> LogValue {
        LogValue::Bool(*self)
    }
}

macro_rules! signed_to_log_value {
    ($($ty:ty),*) => {
        $(
            impl ToLogValue for $ty {
                fn to_log_value(&self) -> LogValue {
                    LogValue::Int(i64::from(*self))
                }
            }
        )*
    };
}

macro_rules! unsigned_to_log_value {
    ($($ty:ty),*) => {
        $(
            impl ToLogValue for $ty {
                fn to_log_value(&self) -> LogValue {
                    LogValue::UInt(u64::from(*self))
                }
            }
        )*
    };
}

signed_to_log_value!(i8, i16, i32, i64);
unsigned_to_log_value!(u8, u16, u32, u64);

impl ToLogValue for isize {
    fn to_log_value(&self) -> LogValue {
        i64::try_from(*self).map_or_else(|_| LogValue::display(self), LogValue::Int)
    }
}

impl ToLogValue for usize {
    fn to_log_value(&self) -> LogValue {
        u64::try_from(*self).map_or_else(|_| LogValue::display(self), LogValue::UInt)
    }
}

impl ToLogValue for f32 {
    fn to_log_value(&self) -> LogValue {
        LogValue::Float(f64::from(*self))
    }
}

impl ToLogValue for f64 {
    fn to_log_value(&self) -> LogValue {
        LogValue::Float(*self)
    }
}

impl<T: ToLogValue> ToLogValue for Option<T> {
    fn to_log_value(&self) -> LogValue {
        self.as_ref()
            .map_or(LogValue::Null, ToLogValue::to_log_value)
    }
}

impl<T: ToLogValue> ToLogValue for [T] {
    fn to_log_value(&self) -> LogValue {
        LogValue::List(self.iter().map(ToLogValue::to_log_value).collect())
    }
}

impl<T: ToLogValue> ToLogValue for Vec<T> {
    fn to_log_value(&self) -> LogValue {
        self.as_slice().to_log_value()
    }
}

impl<T: ToLogValue, const N: usize> ToLogValue for [T; N] {
    fn to_log_value(&self) -> LogValue {
        self.as_slice().to_log_value()
    }
}
