use chrono::NaiveDate;

use qipc::array::{infer, infer_type, List, ListValues};
use qipc::datatypes::{PrimitiveType, TypeCode};
use qipc::scalar::Temporal;
use qipc::value::Value;

#[test]
fn homogeneous() {
    let values = vec![Value::from(1i64), Value::from(2i64)];
    assert_eq!(infer_type(&values), TypeCode::List(PrimitiveType::Long));
    assert_eq!(infer(values).unwrap(), List::from(vec![1i64, 2]));
}

#[test]
fn no_widening() {
    let values = vec![Value::from(1i64), Value::from(2i32)];
    assert_eq!(infer_type(&values), TypeCode::GeneralList);
    let list = infer(values.clone()).unwrap();
    assert_eq!(list, List::general(values));
}

#[test]
fn empty_and_text() {
    assert_eq!(infer_type(&[]), TypeCode::GeneralList);
    assert_eq!(
        infer_type(&[Value::from("a"), Value::from("b")]),
        TypeCode::GeneralList
    );
}

#[test]
fn temporals() {
    let date = NaiveDate::from_ymd_opt(2001, 1, 1).unwrap();
    let values = vec![
        Value::Temporal(Temporal::Date(Some(date))),
        Value::Temporal(Temporal::Date(None)),
    ];
    let list = infer(values).unwrap();
    assert_eq!(list.type_code(), TypeCode::List(PrimitiveType::Date));
    assert_eq!(
        list.values(),
        &ListValues::Temporal(vec![Temporal::Date(Some(date)), Temporal::Date(None)])
    );
}
