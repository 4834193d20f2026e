//! Conversion methods between the raw temporal values of q and calendar values.
//!
//! All q temporals are offsets from the q epoch, 2000-01-01T00:00:00:
//! months, days, fractional days (datetime) and nanoseconds (timestamp) since the epoch;
//! timespans, minutes, seconds and times are plain durations.
//! Nulls are mapped to `None` without arithmetic, as arithmetic on the sentinels would
//! produce a misleading finite result.
//!
//! The infinities of months, dates and datetimes (`0Wm`, `0Wd`, `0wz` and their
//! negatives) lie far outside of the range of [`chrono`]; they are mapped to the
//! extremes of that range ([`NaiveDate::MAX`], [`NaiveDateTime::MIN`], ...) and back.
//! The infinities of the other temporals (`0Wp`, `0Wn`, `0Wu`, ...) are plain values.
use std::convert::TryFrom;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};

use crate::array::{List, ListValues};
use crate::datatypes::{PrimitiveType, TypeCode};
use crate::error::{QError, Result};
use crate::scalar::{Atom, Temporal};

/// Number of milliseconds in a day
pub const MILLISECONDS_IN_DAY: i64 = 86_400_000;
/// Number of nanoseconds in a day
pub const NANOSECONDS_IN_DAY: i64 = MILLISECONDS_IN_DAY * 1_000_000;
/// Number of days between 1970-01-01 and the q epoch, 2000-01-01
pub const EPOCH_DAYS_FROM_UNIX: i32 = 10_957;
/// Number of months between 1970-01 and the q epoch, 2000-01
pub const EPOCH_MONTHS_FROM_UNIX: i32 = 360;

// ~250_000 years, inside the range of chrono
const MAX_DATETIME_MILLISECONDS: f64 = 7.9e15;

/// The infinity of 32-bit temporals (`0Wd`, `0Wm`); its negation is the negative infinity
pub const INFINITY_I32: i32 = i32::MAX;

fn infinite_date(value: i32) -> Option<NaiveDate> {
    match value {
        INFINITY_I32 => Some(NaiveDate::MAX),
        v if v == -INFINITY_I32 => Some(NaiveDate::MIN),
        _ => None,
    }
}

fn date_infinity(date: &NaiveDate) -> Option<i32> {
    if *date == NaiveDate::MAX {
        Some(INFINITY_I32)
    } else if *date == NaiveDate::MIN {
        Some(-INFINITY_I32)
    } else {
        None
    }
}

/// The q epoch as a date
#[inline]
pub fn epoch_date() -> NaiveDate {
    match NaiveDate::from_ymd_opt(2000, 1, 1) {
        Some(date) => date,
        None => unreachable!(),
    }
}

/// The q epoch as a date and time
#[inline]
pub fn epoch() -> NaiveDateTime {
    match epoch_date().and_hms_opt(0, 0, 0) {
        Some(datetime) => datetime,
        None => unreachable!(),
    }
}

/// converts a `i32` representing a `month` to the first day of that month
#[inline]
pub fn month_to_date(months: i32) -> Option<NaiveDate> {
    let months = 2000 * 12 + months as i64;
    let year = i32::try_from(months.div_euclid(12)).ok()?;
    NaiveDate::from_ymd_opt(year, months.rem_euclid(12) as u32 + 1, 1)
}

/// converts a [`NaiveDate`] to a `month`, discarding the day of the month
#[inline]
pub fn date_to_month(date: &NaiveDate) -> Option<i32> {
    let months = (date.year() as i64 - 2000) * 12 + date.month0() as i64;
    i32::try_from(months).ok()
}

/// converts a `i32` representing a `date` to [`NaiveDate`]
#[inline]
pub fn days_to_date(days: i32) -> Option<NaiveDate> {
    epoch_date().checked_add_signed(Duration::days(days as i64))
}

/// converts a [`NaiveDate`] to a `date`
#[inline]
pub fn date_to_days(date: &NaiveDate) -> Option<i32> {
    i32::try_from(date.signed_duration_since(epoch_date()).num_days()).ok()
}

/// converts a `f64` representing a `datetime` to [`NaiveDateTime`], rounded to milliseconds
#[inline]
pub fn datetime_to_naive(days: f64) -> Option<NaiveDateTime> {
    let milliseconds = (days * MILLISECONDS_IN_DAY as f64).round();
    if !milliseconds.is_finite() || milliseconds.abs() > MAX_DATETIME_MILLISECONDS {
        return None;
    }
    epoch().checked_add_signed(Duration::milliseconds(milliseconds as i64))
}

/// converts a [`NaiveDateTime`] to a `datetime`
#[inline]
pub fn naive_to_datetime(datetime: &NaiveDateTime) -> f64 {
    let milliseconds = datetime.signed_duration_since(epoch()).num_milliseconds();
    milliseconds as f64 / MILLISECONDS_IN_DAY as f64
}

/// converts a `i64` representing a `timestamp` to [`NaiveDateTime`]
#[inline]
pub fn timestamp_to_naive(nanoseconds: i64) -> Option<NaiveDateTime> {
    epoch().checked_add_signed(Duration::nanoseconds(nanoseconds))
}

/// converts a [`NaiveDateTime`] to a `timestamp`
#[inline]
pub fn naive_to_timestamp(datetime: &NaiveDateTime) -> Option<i64> {
    datetime.signed_duration_since(epoch()).num_nanoseconds()
}

/// converts a [`Duration`] to a `timespan`
#[inline]
pub fn duration_to_timespan(duration: &Duration) -> Option<i64> {
    duration.num_nanoseconds()
}

/// converts a [`Duration`] to a `minute`, truncating seconds
#[inline]
pub fn duration_to_minute(duration: &Duration) -> Option<i32> {
    i32::try_from(duration.num_minutes()).ok()
}

/// converts a [`Duration`] to a `second`, truncating fractions of a second
#[inline]
pub fn duration_to_second(duration: &Duration) -> Option<i32> {
    i32::try_from(duration.num_seconds()).ok()
}

/// converts a [`Duration`] to a `time`, truncating fractions of a millisecond
#[inline]
pub fn duration_to_time(duration: &Duration) -> Option<i32> {
    i32::try_from(duration.num_milliseconds()).ok()
}

fn out_of_range<T: std::fmt::Debug>(value: T, primitive: PrimitiveType) -> QError {
    QError::OutOfRange(format!(
        "{:?} is not representable as a calendar {}",
        value, primitive
    ))
}

fn not_temporal(primitive: PrimitiveType) -> QError {
    QError::InvalidArgument(format!("{} is not a temporal type", primitive))
}

/// Converts a raw 32-bit temporal of type `primitive` to its calendar form.
pub fn from_raw_i32(value: i32, primitive: PrimitiveType) -> Result<Temporal> {
    let is_null = value == i32::MIN;
    Ok(match primitive {
        PrimitiveType::Month if is_null => Temporal::Month(None),
        PrimitiveType::Month => Temporal::Month(Some(
            infinite_date(value)
                .or_else(|| month_to_date(value))
                .ok_or_else(|| out_of_range(value, primitive))?,
        )),
        PrimitiveType::Date if is_null => Temporal::Date(None),
        PrimitiveType::Date => Temporal::Date(Some(
            infinite_date(value)
                .or_else(|| days_to_date(value))
                .ok_or_else(|| out_of_range(value, primitive))?,
        )),
        PrimitiveType::Minute => Temporal::Minute(Some(Duration::minutes(value as i64)))
            .filter_null(is_null),
        PrimitiveType::Second => Temporal::Second(Some(Duration::seconds(value as i64)))
            .filter_null(is_null),
        PrimitiveType::Time => {
            Temporal::Time(Some(Duration::milliseconds(value as i64))).filter_null(is_null)
        }
        _ => return Err(not_temporal(primitive)),
    })
}

/// Converts a raw 64-bit temporal of type `primitive` to its calendar form.
pub fn from_raw_i64(value: i64, primitive: PrimitiveType) -> Result<Temporal> {
    let is_null = value == i64::MIN;
    Ok(match primitive {
        PrimitiveType::Timestamp if is_null => Temporal::Timestamp(None),
        PrimitiveType::Timestamp => Temporal::Timestamp(Some(
            timestamp_to_naive(value).ok_or_else(|| out_of_range(value, primitive))?,
        )),
        PrimitiveType::Timespan if is_null => Temporal::Timespan(None),
        PrimitiveType::Timespan => Temporal::Timespan(Some(Duration::nanoseconds(value))),
        _ => return Err(not_temporal(primitive)),
    })
}

/// Converts a raw datetime to its calendar form.
pub fn from_raw_f64(value: f64, primitive: PrimitiveType) -> Result<Temporal> {
    match primitive {
        PrimitiveType::Datetime if value.is_nan() => Ok(Temporal::Datetime(None)),
        PrimitiveType::Datetime if value == f64::INFINITY => {
            Ok(Temporal::Datetime(Some(NaiveDateTime::MAX)))
        }
        PrimitiveType::Datetime if value == f64::NEG_INFINITY => {
            Ok(Temporal::Datetime(Some(NaiveDateTime::MIN)))
        }
        PrimitiveType::Datetime => Ok(Temporal::Datetime(Some(
            datetime_to_naive(value).ok_or_else(|| out_of_range(value, primitive))?,
        ))),
        _ => Err(not_temporal(primitive)),
    }
}

/// Converts a raw temporal atom to its calendar form.
/// # Errors
/// If `atom` is not temporal or its value is outside of the range of [`chrono`].
pub fn from_raw(atom: &Atom) -> Result<Temporal> {
    let primitive = atom.primitive();
    match atom {
        Atom::Month(v) | Atom::Date(v) | Atom::Minute(v) | Atom::Second(v) | Atom::Time(v) => {
            from_raw_i32(*v, primitive)
        }
        Atom::Timestamp(v) | Atom::Timespan(v) => from_raw_i64(*v, primitive),
        Atom::Datetime(v) => from_raw_f64(*v, primitive),
        _ => Err(not_temporal(primitive)),
    }
}

/// Converts a calendar temporal to its raw atom, the exact inverse of [`from_raw`].
/// # Errors
/// If the value does not fit the raw representation or collides with the null sentinel.
pub fn to_raw(temporal: &Temporal) -> Result<Atom> {
    let primitive = temporal.primitive();
    let atom = match temporal {
        Temporal::Month(None) => Atom::Month(i32::MIN),
        Temporal::Month(Some(v)) => Atom::Month(
            date_infinity(v)
                .or_else(|| date_to_month(v))
                .filter(|x| *x != i32::MIN)
                .ok_or_else(|| out_of_range(v, primitive))?,
        ),
        Temporal::Date(None) => Atom::Date(i32::MIN),
        Temporal::Date(Some(v)) => Atom::Date(
            date_infinity(v)
                .or_else(|| date_to_days(v))
                .filter(|x| *x != i32::MIN)
                .ok_or_else(|| out_of_range(v, primitive))?,
        ),
        Temporal::Datetime(None) => crate::datatypes::qnull(PrimitiveType::Datetime),
        Temporal::Datetime(Some(v)) if *v == NaiveDateTime::MAX => Atom::Datetime(f64::INFINITY),
        Temporal::Datetime(Some(v)) if *v == NaiveDateTime::MIN => {
            Atom::Datetime(f64::NEG_INFINITY)
        }
        Temporal::Datetime(Some(v)) => Atom::Datetime(naive_to_datetime(v)),
        Temporal::Timestamp(None) => Atom::Timestamp(i64::MIN),
        Temporal::Timestamp(Some(v)) => Atom::Timestamp(
            naive_to_timestamp(v)
                .filter(|x| *x != i64::MIN)
                .ok_or_else(|| out_of_range(v, primitive))?,
        ),
        Temporal::Timespan(None) => Atom::Timespan(i64::MIN),
        Temporal::Timespan(Some(v)) => Atom::Timespan(
            duration_to_timespan(v)
                .filter(|x| *x != i64::MIN)
                .ok_or_else(|| out_of_range(v, primitive))?,
        ),
        Temporal::Minute(None) => Atom::Minute(i32::MIN),
        Temporal::Minute(Some(v)) => Atom::Minute(
            duration_to_minute(v)
                .filter(|x| *x != i32::MIN)
                .ok_or_else(|| out_of_range(v, primitive))?,
        ),
        Temporal::Second(None) => Atom::Second(i32::MIN),
        Temporal::Second(Some(v)) => Atom::Second(
            duration_to_second(v)
                .filter(|x| *x != i32::MIN)
                .ok_or_else(|| out_of_range(v, primitive))?,
        ),
        Temporal::Time(None) => Atom::Time(i32::MIN),
        Temporal::Time(Some(v)) => Atom::Time(
            duration_to_time(v)
                .filter(|x| *x != i32::MIN)
                .ok_or_else(|| out_of_range(v, primitive))?,
        ),
    };
    Ok(atom)
}

/// Converts a temporal list with raw storage to a list of [`Temporal`], preserving nulls,
/// type and attribute. Lists that already hold [`Temporal`] are returned as is.
pub fn list_from_raw(list: &List) -> Result<List> {
    let primitive = match list.type_code() {
        TypeCode::List(p) if p.is_temporal() => p,
        other => {
            return Err(QError::InvalidArgument(format!(
                "{} is not a temporal list",
                other
            )))
        }
    };
    let values = match list.values() {
        ListValues::Temporal(_) => return Ok(list.clone()),
        ListValues::Int32(values) => values
            .iter()
            .map(|v| from_raw_i32(*v, primitive))
            .collect::<Result<Vec<_>>>()?,
        ListValues::Int64(values) => values
            .iter()
            .map(|v| from_raw_i64(*v, primitive))
            .collect::<Result<Vec<_>>>()?,
        ListValues::Float64(values) => values
            .iter()
            .map(|v| from_raw_f64(*v, primitive))
            .collect::<Result<Vec<_>>>()?,
        _ => unreachable!("list storage is validated on construction"),
    };
    List::try_new(list.type_code(), ListValues::Temporal(values))
        .map(|x| x.with_attribute(list.attribute()))
}

/// Converts a list of [`Temporal`] to its raw storage, the inverse of [`list_from_raw`].
/// Lists with raw storage are returned as is.
pub fn list_to_raw(list: &List) -> Result<List> {
    let values = match list.values() {
        ListValues::Temporal(values) => values,
        _ => return Ok(list.clone()),
    };
    let atoms = values.iter().map(to_raw).collect::<Result<Vec<_>>>()?;
    let values = match list.type_code().primitive().map(|p| p.to_physical_type()) {
        Some(crate::datatypes::PhysicalType::Int32) => ListValues::Int32(
            atoms
                .into_iter()
                .map(|atom| match atom {
                    Atom::Month(v) | Atom::Date(v) | Atom::Minute(v) | Atom::Second(v)
                    | Atom::Time(v) => v,
                    _ => unreachable!(),
                })
                .collect(),
        ),
        Some(crate::datatypes::PhysicalType::Int64) => ListValues::Int64(
            atoms
                .into_iter()
                .map(|atom| match atom {
                    Atom::Timestamp(v) | Atom::Timespan(v) => v,
                    _ => unreachable!(),
                })
                .collect(),
        ),
        _ => ListValues::Float64(
            atoms
                .into_iter()
                .map(|atom| match atom {
                    Atom::Datetime(v) => v,
                    _ => unreachable!(),
                })
                .collect(),
        ),
    };
    List::try_new(list.type_code(), values).map(|x| x.with_attribute(list.attribute()))
}

trait FilterNull {
    fn filter_null(self, is_null: bool) -> Self;
}

impl FilterNull for Temporal {
    #[inline]
    fn filter_null(self, is_null: bool) -> Self {
        if is_null {
            match Temporal::null(self.primitive()) {
                Some(null) => null,
                None => unreachable!(),
            }
        } else {
            self
        }
    }
}
