use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::datatypes::{PrimitiveType, TypeCode};

/// The calendar form of a temporal atom. `None` is the null ("not a time") of each type.
///
/// Every variant is bound to exactly one temporal type, so converting to the raw form
/// with [`crate::temporal_conversions::to_raw`] always yields an atom of the same type.
/// The infinities of months, dates and datetimes are the extremes of [`NaiveDate`] and
/// [`NaiveDateTime`] (e.g. `0Wd` is `Date(Some(NaiveDate::MAX))`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Temporal {
    Timestamp(Option<NaiveDateTime>),
    /// the first day of the month
    Month(Option<NaiveDate>),
    Date(Option<NaiveDate>),
    /// with millisecond precision
    Datetime(Option<NaiveDateTime>),
    Timespan(Option<Duration>),
    Minute(Option<Duration>),
    Second(Option<Duration>),
    Time(Option<Duration>),
}

impl Temporal {
    pub fn primitive(&self) -> PrimitiveType {
        use PrimitiveType as P;
        match self {
            Temporal::Timestamp(_) => P::Timestamp,
            Temporal::Month(_) => P::Month,
            Temporal::Date(_) => P::Date,
            Temporal::Datetime(_) => P::Datetime,
            Temporal::Timespan(_) => P::Timespan,
            Temporal::Minute(_) => P::Minute,
            Temporal::Second(_) => P::Second,
            Temporal::Time(_) => P::Time,
        }
    }

    #[inline]
    pub fn type_code(&self) -> TypeCode {
        TypeCode::Atom(self.primitive())
    }

    pub fn is_null(&self) -> bool {
        match self {
            Temporal::Timestamp(v) | Temporal::Datetime(v) => v.is_none(),
            Temporal::Month(v) | Temporal::Date(v) => v.is_none(),
            Temporal::Timespan(v)
            | Temporal::Minute(v)
            | Temporal::Second(v)
            | Temporal::Time(v) => v.is_none(),
        }
    }

    /// The null of a temporal type, `None` if `primitive` is not temporal.
    pub fn null(primitive: PrimitiveType) -> Option<Self> {
        use PrimitiveType as P;
        Some(match primitive {
            P::Timestamp => Temporal::Timestamp(None),
            P::Month => Temporal::Month(None),
            P::Date => Temporal::Date(None),
            P::Datetime => Temporal::Datetime(None),
            P::Timespan => Temporal::Timespan(None),
            P::Minute => Temporal::Minute(None),
            P::Second => Temporal::Second(None),
            P::Time => Temporal::Time(None),
            _ => return None,
        })
    }
}
