use std::cmp::Ordering;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use ordered_float::OrderedFloat;
use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};

use super::{DataType, DurationValue, Value};
use crate::error::{Error, Result};

enum Numeric {
    Int(i128),
    Dec(Decimal),
    Float(f64),
}

impl Numeric {
    fn of(value: &Value) -> Option<Self> {
        match value {
            Value::Int64(v) => Some(Numeric::Int(*v as i128)),
            Value::Uint64(v) => Some(Numeric::Int(*v as i128)),
            Value::Decimal(v) => Some(Numeric::Dec(*v)),
            Value::Float64(v) => Some(Numeric::Float(v.0)),
            _ => None,
        }
    }

    fn to_f64(&self) -> f64 {
        match self {
            Numeric::Int(v) => *v as f64,
            Numeric::Dec(v) => v.to_f64().unwrap_or(f64::NAN),
            Numeric::Float(v) => *v,
        }
    }

    // Floats use the total order of `OrderedFloat`: NaN sorts above every
    // number and equals itself.
    fn cmp(&self, other: &Numeric) -> Ordering {
        let as_floats = || OrderedFloat(self.to_f64()).cmp(&OrderedFloat(other.to_f64()));
        match (self, other) {
            (Numeric::Int(a), Numeric::Int(b)) => a.cmp(b),
            (Numeric::Dec(a), Numeric::Dec(b)) => a.cmp(b),
            (Numeric::Int(a), Numeric::Dec(b)) => {
                Decimal::from_i128(*a).map_or_else(as_floats, |a| a.cmp(b))
            }
            (Numeric::Dec(a), Numeric::Int(b)) => {
                Decimal::from_i128(*b).map_or_else(as_floats, |b| a.cmp(&b))
            }
            _ => as_floats(),
        }
    }
}

fn parse_time(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f")
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

enum DurationParse {
    Invalid,
    Overflow,
}

fn parse_duration(s: &str) -> std::result::Result<DurationValue, DurationParse> {
    use DurationParse::{Invalid, Overflow};

    let s = s.trim();
    let (negative, body) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s),
    };
    let (whole, fraction) = match body.split_once('.') {
        Some((w, f)) => (w, Some(f)),
        None => (body, None),
    };
    let parts: Vec<&str> = whole.split(':').collect();
    if parts.len() != 3 || parts.iter().any(|p| p.is_empty() || !p.bytes().all(|b| b.is_ascii_digit())) {
        return Err(Invalid);
    }
    let hours: i64 = parts[0].parse().map_err(|_| Overflow)?;
    let minutes: i64 = parts[1].parse().map_err(|_| Invalid)?;
    let seconds: i64 = parts[2].parse().map_err(|_| Invalid)?;
    if !(0..60).contains(&minutes) || !(0..60).contains(&seconds) {
        return Err(Invalid);
    }
    let mut nanos = DurationValue::from_hms(hours, minutes, seconds)
        .ok_or(Overflow)?
        .nanos;
    if let Some(fraction) = fraction {
        if fraction.is_empty() || fraction.len() > 9 || !fraction.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(Invalid);
        }
        let padded = format!("{:0<9}", fraction);
        let frac: i64 = padded.parse().map_err(|_| Invalid)?;
        nanos = nanos.checked_add(frac).ok_or(Overflow)?;
    }
    Ok(DurationValue::from_nanos(if negative { -nanos } else { nanos }))
}

impl Value {
    /// SQL comparison used during evaluation. Returns `Ok(None)` when either
    /// side is NULL; numeric variants compare by value across kinds.
    pub fn sql_cmp(&self, other: &Value) -> Result<Option<Ordering>> {
        if self.is_null() || other.is_null() {
            return Ok(None);
        }
        if let (Some(a), Some(b)) = (Numeric::of(self), Numeric::of(other)) {
            return Ok(Some(a.cmp(&b)));
        }
        match (self, other) {
            (Value::String(a), Value::String(b)) => Ok(Some(a.cmp(b))),
            (Value::Bytes(a), Value::Bytes(b)) => Ok(Some(a.cmp(b))),
            (Value::Time(a), Value::Time(b)) => Ok(Some(a.cmp(b))),
            (Value::Duration(a), Value::Duration(b)) => Ok(Some(a.cmp(b))),
            _ => Err(Error::type_mismatch(self.data_type(), other.data_type())),
        }
    }

    /// `Some(true)` when equal, `None` when either side is NULL.
    pub fn sql_eq(&self, other: &Value) -> Result<Option<bool>> {
        Ok(self.sql_cmp(other)?.map(|o| o == Ordering::Equal))
    }

    pub fn coerce_to(&self, target: &DataType) -> Result<Value> {
        if self.is_null() || *target == DataType::Unknown || self.data_type() == *target {
            return Ok(self.clone());
        }
        let fail = |reason: &str| Error::type_coercion_error(self.data_type(), target, reason);

        match target {
            DataType::Int64 => match self {
                Value::Uint64(v) => i64::try_from(*v)
                    .map(Value::Int64)
                    .map_err(|_| Error::overflow(format!("{} out of range for {}", v, target))),
                Value::Float64(v) => float_to_i64(v.0).map(Value::Int64),
                Value::Decimal(v) => v
                    .round()
                    .to_i64()
                    .map(Value::Int64)
                    .ok_or_else(|| Error::overflow(format!("{} out of range for {}", v, target))),
                Value::String(s) => s
                    .trim()
                    .parse::<i64>()
                    .map(Value::Int64)
                    .map_err(|_| fail(&format!("invalid integer '{}'", s))),
                _ => Err(fail("unsupported conversion")),
            },
            DataType::Uint64 => match self {
                Value::Int64(v) => u64::try_from(*v)
                    .map(Value::Uint64)
                    .map_err(|_| Error::overflow(format!("{} out of range for {}", v, target))),
                Value::Float64(v) => float_to_u64(v.0).map(Value::Uint64),
                Value::Decimal(v) => v
                    .round()
                    .to_u64()
                    .map(Value::Uint64)
                    .ok_or_else(|| Error::overflow(format!("{} out of range for {}", v, target))),
                Value::String(s) => s
                    .trim()
                    .parse::<u64>()
                    .map(Value::Uint64)
                    .map_err(|_| fail(&format!("invalid unsigned integer '{}'", s))),
                _ => Err(fail("unsupported conversion")),
            },
            DataType::Float64 => match self {
                Value::Int64(_) | Value::Uint64(_) | Value::Decimal(_) => self
                    .as_f64()
                    .map(Value::float64)
                    .ok_or_else(|| fail("value not representable")),
                Value::String(s) => s
                    .trim()
                    .parse::<f64>()
                    .map(Value::float64)
                    .map_err(|_| fail(&format!("invalid number '{}'", s))),
                _ => Err(fail("unsupported conversion")),
            },
            DataType::Decimal => match self {
                Value::Int64(v) => Ok(Value::Decimal(Decimal::from(*v))),
                Value::Uint64(v) => Ok(Value::Decimal(Decimal::from(*v))),
                Value::Float64(v) => Decimal::from_f64(v.0)
                    .map(Value::Decimal)
                    .ok_or_else(|| fail(&format!("{} not representable", v))),
                Value::String(s) => Decimal::from_str(s.trim())
                    .map(Value::Decimal)
                    .map_err(|e| fail(&e.to_string())),
                _ => Err(fail("unsupported conversion")),
            },
            DataType::String => Ok(Value::String(self.to_string())),
            DataType::Bytes => match self {
                Value::String(s) => Ok(Value::Bytes(s.as_bytes().to_vec())),
                other => Ok(Value::Bytes(other.to_string().into_bytes())),
            },
            DataType::Time => match self {
                Value::String(s) => parse_time(s)
                    .map(Value::Time)
                    .ok_or_else(|| fail(&format!("invalid datetime '{}'", s))),
                _ => Err(fail("unsupported conversion")),
            },
            DataType::Duration => match self {
                Value::String(s) => parse_duration(s).map(Value::Duration).map_err(|e| match e {
                    DurationParse::Invalid => fail(&format!("invalid time '{}'", s)),
                    DurationParse::Overflow => {
                        Error::overflow(format!("'{}' out of range for {}", s, target))
                    }
                }),
                _ => Err(fail("unsupported conversion")),
            },
            DataType::Unknown => Ok(self.clone()),
        }
    }
}

fn float_to_i64(f: f64) -> Result<i64> {
    let rounded = f.round();
    if !rounded.is_finite() || rounded < i64::MIN as f64 || rounded >= i64::MAX as f64 {
        return Err(Error::overflow(format!("{} out of range for BIGINT", f)));
    }
    Ok(rounded as i64)
}

fn float_to_u64(f: f64) -> Result<u64> {
    let rounded = f.round();
    if !rounded.is_finite() || rounded < 0.0 || rounded >= u64::MAX as f64 {
        return Err(Error::overflow(format!(
            "{} out of range for BIGINT UNSIGNED",
            f
        )));
    }
    Ok(rounded as u64)
}
