use qipc::array::{Dictionary, List, Table};
use qipc::datatypes::TypeCode;
use qipc::error::QError;
use qipc::value::Value;

#[test]
fn new() {
    let dictionary = Dictionary::try_new(
        Value::List(List::symbols(vec!["a", "b", "a"])),
        Value::List(List::from(vec![1i64, 2, 3])),
    )
    .unwrap();
    assert_eq!(dictionary.len(), 3);
    assert_eq!(dictionary.type_code(), TypeCode::Dictionary);
    assert!(!dictionary.is_sorted());
}

#[test]
fn length_mismatch() {
    let result = Dictionary::try_new(
        Value::List(List::symbols(vec!["a", "b"])),
        Value::List(List::from(vec![1i64, 2, 3])),
    );
    assert!(matches!(
        result,
        Err(QError::LengthMismatch { keys: 2, values: 3 })
    ));
}

#[test]
fn atoms_are_not_keys() {
    let result = Dictionary::try_new(Value::from(1i64), Value::from(2i64));
    assert!(matches!(result, Err(QError::InvalidArgument(_))));
}

#[test]
fn sorted() {
    let dictionary = Dictionary::try_new_sorted(
        Value::List(List::from(vec![1i64, 2])),
        Value::List(List::from(vec![3i64, 4])),
    )
    .unwrap();
    assert_eq!(dictionary.type_code().to_i8(), 127);
}

#[test]
fn tables_make_keyed_tables() {
    let table = Table::try_new(vec!["a".into()], vec![List::from(vec![1i64])]).unwrap();
    let result = Dictionary::try_new(Value::Table(table.clone()), Value::Table(table));
    assert!(matches!(result, Err(QError::InvalidArgument(_))));
}
