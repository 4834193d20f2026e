use chrono::{Duration, NaiveDate, NaiveDateTime};

use qipc::array::{List, ListValues};
use qipc::datatypes::{qnull, PrimitiveType, FLOAT_NULL_BITS};
use qipc::error::QError;
use qipc::scalar::{Atom, Temporal};
use qipc::temporal_conversions::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn month() {
    let temporal = from_raw(&Atom::Month(12)).unwrap();
    assert_eq!(temporal, Temporal::Month(Some(date(2001, 1, 1))));
    assert_eq!(to_raw(&temporal).unwrap(), Atom::Month(12));

    assert_eq!(month_to_date(-1), Some(date(1999, 12, 1)));
    assert_eq!(date_to_month(&date(1999, 12, 1)), Some(-1));
    // the day of the month is discarded
    assert_eq!(date_to_month(&date(2001, 1, 15)), Some(12));
}

#[test]
fn date_() {
    let temporal = from_raw(&Atom::Date(366)).unwrap();
    assert_eq!(temporal, Temporal::Date(Some(date(2001, 1, 1))));
    assert_eq!(to_raw(&temporal).unwrap(), Atom::Date(366));

    assert_eq!(days_to_date(121), Some(date(2000, 5, 1)));
    assert_eq!(days_to_date(-EPOCH_DAYS_FROM_UNIX), Some(date(1970, 1, 1)));
}

#[test]
fn datetime() {
    let temporal = from_raw(&Atom::Datetime(3.234)).unwrap();
    let expected = date(2000, 1, 4).and_hms_milli_opt(5, 36, 57, 600).unwrap();
    assert_eq!(temporal, Temporal::Datetime(Some(expected)));
    assert_eq!(to_raw(&temporal).unwrap(), Atom::Datetime(3.234));
}

#[test]
fn timestamp() {
    let temporal = from_raw(&Atom::Timestamp(279_417_600_000_000)).unwrap();
    let expected = date(2000, 1, 4).and_hms_milli_opt(5, 36, 57, 600).unwrap();
    assert_eq!(temporal, Temporal::Timestamp(Some(expected)));
    assert_eq!(
        to_raw(&temporal).unwrap(),
        Atom::Timestamp(279_417_600_000_000)
    );

    // before the epoch
    let temporal = from_raw(&Atom::Timestamp(-NANOSECONDS_IN_DAY)).unwrap();
    let expected = date(1999, 12, 31).and_hms_opt(0, 0, 0).unwrap();
    assert_eq!(temporal, Temporal::Timestamp(Some(expected)));
}

#[test]
fn durations() {
    let cases = vec![
        (
            Atom::Timespan(20_217_600_000_000),
            Temporal::Timespan(Some(Duration::nanoseconds(20_217_600_000_000))),
        ),
        (
            Atom::Minute(721),
            Temporal::Minute(Some(Duration::minutes(12 * 60 + 1))),
        ),
        (
            Atom::Second(43_500),
            Temporal::Second(Some(Duration::seconds(12 * 3600 + 5 * 60))),
        ),
        (
            Atom::Time(43_499_123),
            Temporal::Time(Some(Duration::milliseconds(43_499_123))),
        ),
    ];
    for (raw, calendar) in cases {
        assert_eq!(from_raw(&raw).unwrap(), calendar);
        assert_eq!(to_raw(&calendar).unwrap(), raw);
    }
}

#[test]
fn nulls() {
    for primitive in PrimitiveType::ALL.iter().filter(|x| x.is_temporal()) {
        let null = qnull(*primitive);
        let temporal = from_raw(&null).unwrap();
        assert!(temporal.is_null());
        assert_eq!(temporal, Temporal::null(*primitive).unwrap());

        let raw = to_raw(&temporal).unwrap();
        assert!(raw.is_null());
        assert_eq!(raw, null);
    }
}

#[test]
fn not_temporal() {
    assert!(matches!(
        from_raw(&Atom::Long(1)),
        Err(QError::InvalidArgument(_))
    ));
}

#[test]
fn out_of_range() {
    assert!(matches!(
        from_raw(&Atom::Datetime(1e20)),
        Err(QError::OutOfRange(_))
    ));
    assert!(matches!(
        from_raw(&Atom::Date(i32::MAX - 1)),
        Err(QError::OutOfRange(_))
    ));
    assert!(matches!(
        from_raw(&Atom::Month(-i32::MAX + 1)),
        Err(QError::OutOfRange(_))
    ));
    // 2300 is beyond the range of a timestamp
    let far = Temporal::Timestamp(Some(date(2300, 1, 1).and_hms_opt(0, 0, 0).unwrap()));
    assert!(matches!(to_raw(&far), Err(QError::OutOfRange(_))));
}

#[test]
fn lists() {
    let raw = List::from(vec![366, i32::MIN, 121])
        .to(PrimitiveType::Date)
        .unwrap();

    let calendar = list_from_raw(&raw).unwrap();
    assert_eq!(calendar.type_code(), raw.type_code());
    assert_eq!(
        calendar.values(),
        &ListValues::Temporal(vec![
            Temporal::Date(Some(date(2001, 1, 1))),
            Temporal::Date(None),
            Temporal::Date(Some(date(2000, 5, 1))),
        ])
    );
    assert!(calendar.is_null(1));
    assert!(!calendar.is_null(0));

    assert_eq!(list_to_raw(&calendar).unwrap(), raw);
}

#[test]
fn float_lists() {
    let raw = List::from(vec![3.234, f64::from_bits(FLOAT_NULL_BITS)])
        .to(PrimitiveType::Datetime)
        .unwrap();
    let calendar = list_from_raw(&raw).unwrap();
    assert!(calendar.is_null(1));
    assert_eq!(list_to_raw(&calendar).unwrap(), raw);
}

#[test]
fn infinities() {
    assert_eq!(
        from_raw(&Atom::Date(i32::MAX)).unwrap(),
        Temporal::Date(Some(NaiveDate::MAX))
    );
    assert_eq!(
        from_raw(&Atom::Date(-i32::MAX)).unwrap(),
        Temporal::Date(Some(NaiveDate::MIN))
    );
    assert_eq!(
        from_raw(&Atom::Month(i32::MAX)).unwrap(),
        Temporal::Month(Some(NaiveDate::MAX))
    );
    assert_eq!(
        from_raw(&Atom::Datetime(f64::INFINITY)).unwrap(),
        Temporal::Datetime(Some(NaiveDateTime::MAX))
    );
    assert_eq!(
        from_raw(&Atom::Datetime(f64::NEG_INFINITY)).unwrap(),
        Temporal::Datetime(Some(NaiveDateTime::MIN))
    );

    let atoms = vec![
        Atom::Month(i32::MAX),
        Atom::Month(-i32::MAX),
        Atom::Date(i32::MAX),
        Atom::Date(-i32::MAX),
        Atom::Minute(i32::MAX),
        Atom::Minute(-i32::MAX),
        Atom::Second(i32::MAX),
        Atom::Second(-i32::MAX),
        Atom::Time(i32::MAX),
        Atom::Time(-i32::MAX),
        Atom::Timestamp(i64::MAX),
        Atom::Timestamp(-i64::MAX),
        Atom::Timespan(i64::MAX),
        Atom::Timespan(-i64::MAX),
        Atom::Datetime(f64::INFINITY),
        Atom::Datetime(f64::NEG_INFINITY),
    ];
    for atom in atoms {
        let temporal = from_raw(&atom).unwrap();
        assert!(!temporal.is_null());
        assert_eq!(to_raw(&temporal).unwrap(), atom);
    }
}

#[test]
fn infinite_lists() {
    let raw = List::from(vec![366, i32::MAX, i32::MIN, -i32::MAX])
        .to(PrimitiveType::Date)
        .unwrap();

    let calendar = list_from_raw(&raw).unwrap();
    assert_eq!(
        calendar.values(),
        &ListValues::Temporal(vec![
            Temporal::Date(Some(date(2001, 1, 1))),
            Temporal::Date(Some(NaiveDate::MAX)),
            Temporal::Date(None),
            Temporal::Date(Some(NaiveDate::MIN)),
        ])
    );
    assert_eq!(list_to_raw(&calendar).unwrap(), raw);

    let raw = List::from(vec![3.234, f64::INFINITY, f64::NEG_INFINITY])
        .to(PrimitiveType::Datetime)
        .unwrap();
    let calendar = list_from_raw(&raw).unwrap();
    assert_eq!(list_to_raw(&calendar).unwrap(), raw);
}
