mod coercion;

use std::cmp::Ordering;
use std::fmt;

use chrono::NaiveDateTime;
use ordered_float::OrderedFloat;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    Unknown,
    Int64,
    Uint64,
    Float64,
    Decimal,
    String,
    Bytes,
    Time,
    Duration,
}

impl DataType {
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            DataType::Int64 | DataType::Uint64 | DataType::Float64 | DataType::Decimal
        )
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Unknown => write!(f, "UNKNOWN"),
            DataType::Int64 => write!(f, "BIGINT"),
            DataType::Uint64 => write!(f, "BIGINT UNSIGNED"),
            DataType::Float64 => write!(f, "DOUBLE"),
            DataType::Decimal => write!(f, "DECIMAL"),
            DataType::String => write!(f, "VARCHAR"),
            DataType::Bytes => write!(f, "VARBINARY"),
            DataType::Time => write!(f, "DATETIME"),
            DataType::Duration => write!(f, "TIME"),
        }
    }
}

/// A signed span of time with nanosecond precision, rendered the way MySQL
/// renders `TIME` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DurationValue {
    pub nanos: i64,
}

impl DurationValue {
    pub const NANOS_PER_MICRO: i64 = 1_000;
    pub const NANOS_PER_SECOND: i64 = 1_000_000_000;
    pub const NANOS_PER_MINUTE: i64 = 60 * Self::NANOS_PER_SECOND;
    pub const NANOS_PER_HOUR: i64 = 60 * Self::NANOS_PER_MINUTE;

    pub fn from_nanos(nanos: i64) -> Self {
        Self { nanos }
    }

    /// `None` when the span does not fit in `i64` nanoseconds.
    pub fn from_hms(hours: i64, minutes: i64, seconds: i64) -> Option<Self> {
        let nanos = hours
            .checked_mul(Self::NANOS_PER_HOUR)?
            .checked_add(minutes.checked_mul(Self::NANOS_PER_MINUTE)?)?
            .checked_add(seconds.checked_mul(Self::NANOS_PER_SECOND)?)?;
        Some(Self { nanos })
    }
}

impl fmt::Display for DurationValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.nanos < 0 { "-" } else { "" };
        let total = self.nanos.unsigned_abs();
        let hours = total / Self::NANOS_PER_HOUR as u64;
        let minutes = (total / Self::NANOS_PER_MINUTE as u64) % 60;
        let seconds = (total / Self::NANOS_PER_SECOND as u64) % 60;
        let micros = (total % Self::NANOS_PER_SECOND as u64) / Self::NANOS_PER_MICRO as u64;
        write!(f, "{}{:02}:{:02}:{:02}", sign, hours, minutes, seconds)?;
        if micros != 0 {
            write!(f, ".{:06}", micros)?;
        }
        Ok(())
    }
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Default)]
pub enum Value {
    #[default]
    Null,
    Int64(i64),
    Uint64(u64),
    Float64(OrderedFloat<f64>),
    Decimal(Decimal),
    String(String),
    Bytes(Vec<u8>),
    Time(NaiveDateTime),
    Duration(DurationValue),
}

impl Value {
    pub fn null() -> Self {
        Value::Null
    }

    pub fn int64(v: i64) -> Self {
        Value::Int64(v)
    }

    pub fn uint64(v: u64) -> Self {
        Value::Uint64(v)
    }

    pub fn float64(v: f64) -> Self {
        Value::Float64(OrderedFloat(v))
    }

    pub fn decimal(v: Decimal) -> Self {
        Value::Decimal(v)
    }

    pub fn string(v: impl Into<String>) -> Self {
        Value::String(v.into())
    }

    pub fn bytes(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }

    pub fn time(v: NaiveDateTime) -> Self {
        Value::Time(v)
    }

    pub fn duration(v: DurationValue) -> Self {
        Value::Duration(v)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn data_type(&self) -> DataType {
        match self {
            Value::Null => DataType::Unknown,
            Value::Int64(_) => DataType::Int64,
            Value::Uint64(_) => DataType::Uint64,
            Value::Float64(_) => DataType::Float64,
            Value::Decimal(_) => DataType::Decimal,
            Value::String(_) => DataType::String,
            Value::Bytes(_) => DataType::Bytes,
            Value::Time(_) => DataType::Time,
            Value::Duration(_) => DataType::Duration,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::Uint64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float64(v) => Some(v.0),
            Value::Int64(v) => Some(*v as f64),
            Value::Uint64(v) => Some(*v as f64),
            Value::Decimal(v) => v.to_f64(),
            _ => None,
        }
    }

    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Value::Decimal(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_time(&self) -> Option<NaiveDateTime> {
        match self {
            Value::Time(t) => Some(*t),
            _ => None,
        }
    }

    pub fn as_duration(&self) -> Option<DurationValue> {
        match self {
            Value::Duration(d) => Some(*d),
            _ => None,
        }
    }

    pub fn into_string(self) -> Option<String> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn into_bytes(self) -> Option<Vec<u8>> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    // Strict accessors: a discriminant mismatch is a TypeMismatch error rather
    // than a silently wrong value.

    pub fn get_i64(&self) -> Result<i64> {
        self.as_i64()
            .ok_or_else(|| Error::type_mismatch(DataType::Int64, self.data_type()))
    }

    pub fn get_u64(&self) -> Result<u64> {
        self.as_u64()
            .ok_or_else(|| Error::type_mismatch(DataType::Uint64, self.data_type()))
    }

    pub fn get_f64(&self) -> Result<f64> {
        match self {
            Value::Float64(v) => Ok(v.0),
            _ => Err(Error::type_mismatch(DataType::Float64, self.data_type())),
        }
    }

    pub fn get_decimal(&self) -> Result<Decimal> {
        self.as_decimal()
            .ok_or_else(|| Error::type_mismatch(DataType::Decimal, self.data_type()))
    }

    pub fn get_str(&self) -> Result<&str> {
        self.as_str()
            .ok_or_else(|| Error::type_mismatch(DataType::String, self.data_type()))
    }

    pub fn get_bytes(&self) -> Result<&[u8]> {
        self.as_bytes()
            .ok_or_else(|| Error::type_mismatch(DataType::Bytes, self.data_type()))
    }

    pub fn get_time(&self) -> Result<NaiveDateTime> {
        self.as_time()
            .ok_or_else(|| Error::type_mismatch(DataType::Time, self.data_type()))
    }

    pub fn get_duration(&self) -> Result<DurationValue> {
        self.as_duration()
            .ok_or_else(|| Error::type_mismatch(DataType::Duration, self.data_type()))
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Int64(v) => serde_json::Value::from(*v),
            Value::Uint64(v) => serde_json::Value::from(*v),
            Value::Float64(v) => serde_json::Number::from_f64(v.0)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::Decimal(v) => serde_json::Value::String(v.to_string()),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Bytes(b) => serde_json::Value::String(hex::encode(b)),
            Value::Time(_) | Value::Duration(_) => serde_json::Value::String(self.to_string()),
        }
    }

    fn variant_rank(&self) -> u8 {
        match self {
            Value::Null => 0,
            Value::Int64(_) => 1,
            Value::Uint64(_) => 2,
            Value::Float64(_) => 3,
            Value::Decimal(_) => 4,
            Value::String(_) => 5,
            Value::Bytes(_) => 6,
            Value::Time(_) => 7,
            Value::Duration(_) => 8,
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int64(v)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::Uint64(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::float64(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Int64(v) => write!(f, "{}", v),
            Value::Uint64(v) => write!(f, "{}u", v),
            Value::Float64(v) => write!(f, "{}", v),
            Value::Decimal(v) => write!(f, "{}", v),
            Value::String(v) => write!(f, "'{}'", v),
            Value::Bytes(v) => write!(f, "x'{}'", hex::encode(v)),
            Value::Time(v) => write!(f, "TIMESTAMP '{}'", v.format("%Y-%m-%d %H:%M:%S%.f")),
            Value::Duration(v) => write!(f, "TIME '{}'", v),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Int64(v) => write!(f, "{}", v),
            Value::Uint64(v) => write!(f, "{}", v),
            Value::Float64(v) => write!(f, "{}", v),
            Value::Decimal(v) => write!(f, "{}", v),
            Value::String(v) => write!(f, "{}", v),
            Value::Bytes(v) => write!(f, "{}", hex::encode(v)),
            Value::Time(v) => write!(f, "{}", v.format("%Y-%m-%d %H:%M:%S%.f")),
            Value::Duration(v) => write!(f, "{}", v),
        }
    }
}

impl Eq for Value {}

impl std::hash::Hash for Value {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::Null => {}
            Value::Int64(v) => v.hash(state),
            Value::Uint64(v) => v.hash(state),
            Value::Float64(v) => v.hash(state),
            Value::Decimal(v) => v.hash(state),
            Value::String(v) => v.hash(state),
            Value::Bytes(v) => v.hash(state),
            Value::Time(v) => v.hash(state),
            Value::Duration(v) => v.hash(state),
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Structural ordering for sorting and map keys. NULLs sort last and values
/// of different variants order by variant. SQL comparison semantics live in
/// [`Value::sql_cmp`].
impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.is_null() && other.is_null() {
            return Ordering::Equal;
        }
        if self.is_null() {
            return Ordering::Greater;
        }
        if other.is_null() {
            return Ordering::Less;
        }

        match (self, other) {
            (Value::Int64(a), Value::Int64(b)) => a.cmp(b),
            (Value::Uint64(a), Value::Uint64(b)) => a.cmp(b),
            (Value::Float64(a), Value::Float64(b)) => a.cmp(b),
            (Value::Decimal(a), Value::Decimal(b)) => a.cmp(b),
            (Value::String(a), Value::String(b)) => a.cmp(b),
            (Value::Bytes(a), Value::Bytes(b)) => a.cmp(b),
            (Value::Time(a), Value::Time(b)) => a.cmp(b),
            (Value::Duration(a), Value::Duration(b)) => a.cmp(b),
            _ => self.variant_rank().cmp(&other.variant_rank()),
        }
    }
}
