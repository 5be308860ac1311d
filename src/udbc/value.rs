use crate::error::DbError;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// A single SQL parameter or column value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Char(char),
    Str(String),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    I128(i128),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    U128(u128),
    F32(f32),
    F64(f64),
    Bytes(Vec<u8>),
    /// Date without time zone
    Date(NaiveDate),

    /// Time without date
    Time(NaiveTime),

    /// Date and time without time zone
    DateTime(NaiveDateTime),

    /// Date and time in UTC
    DateTimeUtc(DateTime<Utc>),

    /// Arbitrary-precision decimal number
    Decimal(Decimal),

    /// Field name to value, produced by struct-shaped parameter sources and
    /// consumed when mapping a whole row back into a struct.
    Map(HashMap<String, Value>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

/// Anything that can be bound as a parameter.
pub trait ToValue {
    fn to_value(&self) -> Value;
}

/// Anything that can be read back out of a column.
pub trait FromValue: Sized {
    fn from_value(v: Value) -> Result<Self, DbError>;
}

macro_rules! impl_to_value_primitive {
    ($($rust_type:ty => $variant:ident),* $(,)?) => {
        $(
            impl ToValue for $rust_type {
                fn to_value(&self) -> Value {
                    Value::$variant(self.clone())
                }
            }
        )*
    };
}

macro_rules! impl_from_value_int {
    ($($rust_type:ty),* $(,)?) => {
        $(
            impl FromValue for $rust_type {
                fn from_value(v: Value) -> Result<Self, DbError> {
                    let converted = match &v {
                        Value::I8(n) => <$rust_type>::try_from(*n).ok(),
                        Value::I16(n) => <$rust_type>::try_from(*n).ok(),
                        Value::I32(n) => <$rust_type>::try_from(*n).ok(),
                        Value::I64(n) => <$rust_type>::try_from(*n).ok(),
                        Value::I128(n) => <$rust_type>::try_from(*n).ok(),
                        Value::U8(n) => <$rust_type>::try_from(*n).ok(),
                        Value::U16(n) => <$rust_type>::try_from(*n).ok(),
                        Value::U32(n) => <$rust_type>::try_from(*n).ok(),
                        Value::U64(n) => <$rust_type>::try_from(*n).ok(),
                        Value::U128(n) => <$rust_type>::try_from(*n).ok(),
                        _ => {
                            return Err(DbError::TypeMismatch(format!(
                                "Expected numeric value, got {:?}",
                                v
                            )))
                        }
                    };
                    converted.ok_or_else(|| {
                        DbError::TypeMismatch(format!(
                            "Value {:?} out of range for {}",
                            v,
                            stringify!($rust_type)
                        ))
                    })
                }
            }
        )*
    };
}

impl_to_value_primitive!(
    bool => Bool,
    char => Char,
    String => Str,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    i128 => I128,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    u128 => U128,
    f32 => F32,
    f64 => F64,
    NaiveDate => Date,
    NaiveTime => Time,
    NaiveDateTime => DateTime,
    DateTime<Utc> => DateTimeUtc,
    Decimal => Decimal,
);

impl_from_value_int!(i8, i16, i32, i64, i128, u8, u16, u32, u64, u128);

/// Any integer variant widened to `i128`; `None` for everything else and for
/// `U128` values past `i128::MAX`.
fn integer(v: &Value) -> Option<i128> {
    match *v {
        Value::I8(n) => Some(n.into()),
        Value::I16(n) => Some(n.into()),
        Value::I32(n) => Some(n.into()),
        Value::I64(n) => Some(n.into()),
        Value::I128(n) => Some(n),
        Value::U8(n) => Some(n.into()),
        Value::U16(n) => Some(n.into()),
        Value::U32(n) => Some(n.into()),
        Value::U64(n) => Some(n.into()),
        Value::U128(n) => i128::try_from(n).ok(),
        _ => None,
    }
}

impl ToValue for str {
    fn to_value(&self) -> Value {
        Value::Str(self.to_string())
    }
}

impl ToValue for [u8] {
    fn to_value(&self) -> Value {
        Value::Bytes(self.to_vec())
    }
}

impl ToValue for Vec<u8> {
    fn to_value(&self) -> Value {
        Value::Bytes(self.clone())
    }
}

impl FromValue for bool {
    fn from_value(v: Value) -> Result<Self, DbError> {
        match v {
            Value::Bool(b) => Ok(b),
            Value::Str(ref s) if s.eq_ignore_ascii_case("true") => Ok(true),
            Value::Str(ref s) if s.eq_ignore_ascii_case("false") => Ok(false),
            // engines without a boolean type hand back 0/1
            _ => match integer(&v) {
                Some(1) => Ok(true),
                Some(0) => Ok(false),
                _ => Err(DbError::TypeMismatch(format!("Expected Bool, got {:?}", v))),
            },
        }
    }
}

impl FromValue for char {
    fn from_value(v: Value) -> Result<Self, DbError> {
        match v {
            Value::Char(c) => Ok(c),
            Value::Str(ref s) if s.chars().count() == 1 => {
                s.chars().next().ok_or_else(|| DbError::TypeMismatch("empty string".to_string()))
            }
            _ => Err(DbError::TypeMismatch(format!("Expected Char, got {:?}", v))),
        }
    }
}

impl FromValue for String {
    fn from_value(v: Value) -> Result<Self, DbError> {
        match v {
            Value::Str(s) => Ok(s),
            Value::Char(c) => Ok(c.to_string()),
            Value::Bytes(b) => String::from_utf8(b)
                .map_err(|e| DbError::TypeMismatch(format!("Invalid UTF-8 bytes: {}", e))),
            _ => Err(DbError::TypeMismatch(format!(
                "Expected Str or Bytes, got {:?}",
                v
            ))),
        }
    }
}

impl FromValue for Vec<u8> {
    fn from_value(v: Value) -> Result<Self, DbError> {
        match v {
            Value::Bytes(b) => Ok(b),
            Value::Str(s) => Ok(s.into_bytes()),
            _ => Err(DbError::TypeMismatch(format!("Expected Bytes, got {:?}", v))),
        }
    }
}

impl FromValue for f32 {
    fn from_value(v: Value) -> Result<Self, DbError> {
        match v {
            Value::F32(f) => Ok(f),
            Value::F64(f) => Ok(f as f32),
            _ => integer(&v)
                .map(|n| n as f32)
                .ok_or_else(|| DbError::TypeMismatch(format!("Expected F32, got {:?}", v))),
        }
    }
}

impl FromValue for f64 {
    fn from_value(v: Value) -> Result<Self, DbError> {
        match v {
            Value::F64(f) => Ok(f),
            Value::F32(f) => Ok(f as f64),
            _ => integer(&v)
                .map(|n| n as f64)
                .ok_or_else(|| DbError::TypeMismatch(format!("Expected F64, got {:?}", v))),
        }
    }
}

impl FromValue for Decimal {
    fn from_value(v: Value) -> Result<Self, DbError> {
        match v {
            Value::Decimal(d) => Ok(d),
            Value::F64(f) => Decimal::try_from(f)
                .map_err(|e| DbError::TypeMismatch(format!("Invalid decimal {}: {}", f, e))),
            Value::F32(f) => Decimal::try_from(f)
                .map_err(|e| DbError::TypeMismatch(format!("Invalid decimal {}: {}", f, e))),
            Value::Str(ref s) => s
                .parse()
                .map_err(|e| DbError::TypeMismatch(format!("Invalid decimal {:?}: {}", s, e))),
            _ => match integer(&v) {
                Some(n) => Decimal::try_from_i128_with_scale(n, 0).map_err(|e| {
                    DbError::TypeMismatch(format!("Value {:?} out of range for Decimal: {}", v, e))
                }),
                None => Err(DbError::TypeMismatch(format!("Expected Decimal, got {:?}", v))),
            },
        }
    }
}

impl FromValue for NaiveDate {
    fn from_value(v: Value) -> Result<Self, DbError> {
        match v {
            Value::Date(d) => Ok(d),
            Value::DateTime(dt) => Ok(dt.date()),
            Value::Str(ref s) => s
                .parse()
                .map_err(|e| DbError::TypeMismatch(format!("Invalid date {:?}: {}", s, e))),
            _ => Err(DbError::TypeMismatch(format!("Expected Date, got {:?}", v))),
        }
    }
}

impl FromValue for NaiveTime {
    fn from_value(v: Value) -> Result<Self, DbError> {
        match v {
            Value::Time(t) => Ok(t),
            Value::Str(ref s) => s
                .parse()
                .map_err(|e| DbError::TypeMismatch(format!("Invalid time {:?}: {}", s, e))),
            _ => Err(DbError::TypeMismatch(format!("Expected Time, got {:?}", v))),
        }
    }
}

impl FromValue for NaiveDateTime {
    fn from_value(v: Value) -> Result<Self, DbError> {
        match v {
            Value::DateTime(dt) => Ok(dt),
            Value::DateTimeUtc(dt) => Ok(dt.naive_utc()),
            Value::Str(ref s) => s
                .parse()
                .map_err(|e| DbError::TypeMismatch(format!("Invalid datetime {:?}: {}", s, e))),
            _ => Err(DbError::TypeMismatch(format!("Expected DateTime, got {:?}", v))),
        }
    }
}

impl FromValue for DateTime<Utc> {
    fn from_value(v: Value) -> Result<Self, DbError> {
        match v {
            Value::DateTimeUtc(dt) => Ok(dt),
            Value::DateTime(dt) => Ok(dt.and_utc()),
            Value::Str(ref s) => s
                .parse()
                .map_err(|e| DbError::TypeMismatch(format!("Invalid datetime {:?}: {}", s, e))),
            _ => Err(DbError::TypeMismatch(format!("Expected DateTimeUtc, got {:?}", v))),
        }
    }
}

impl ToValue for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }
}

impl FromValue for Value {
    fn from_value(v: Value) -> Result<Self, DbError> {
        Ok(v)
    }
}

impl<T> ToValue for &T
where
    T: ToValue + ?Sized,
{
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> Value {
        match self {
            Some(v) => v.to_value(),
            None => Value::Null,
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(v: Value) -> Result<Self, DbError> {
        match v {
            Value::Null => Ok(None),
            _ => Ok(Some(T::from_value(v)?)),
        }
    }
}

impl<T: ToValue> ToValue for HashMap<String, T> {
    fn to_value(&self) -> Value {
        Value::Map(
            self.iter()
                .map(|(k, v)| (k.clone(), v.to_value()))
                .collect(),
        )
    }
}

impl<T: FromValue> FromValue for HashMap<String, T> {
    fn from_value(v: Value) -> Result<Self, DbError> {
        match v {
            Value::Map(m) => m
                .into_iter()
                .map(|(k, val)| Ok((k, T::from_value(val)?)))
                .collect(),
            _ => Err(DbError::TypeMismatch(format!("Expected Map, got {:?}", v))),
        }
    }
}
