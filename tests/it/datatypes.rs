use qipc::datatypes::*;
use qipc::scalar::{Atom, Symbol};

#[test]
fn type_codes() {
    for primitive in PrimitiveType::ALL.iter() {
        let atom = TypeCode::from_i8(primitive.atom_code()).unwrap();
        assert_eq!(atom, TypeCode::Atom(*primitive));
        assert!(atom.is_atom());

        let list = TypeCode::from_i8(primitive.list_code()).unwrap();
        assert_eq!(list, TypeCode::List(*primitive));
        assert!(list.is_list());
        assert_eq!(list.to_i8(), -atom.to_i8());
    }
    assert_eq!(TypeCode::from_i8(3), None);
    assert_eq!(TypeCode::from_i8(-3), None);
    assert_eq!(TypeCode::from_i8(20), None);
    assert_eq!(TypeCode::from_i8(-20), None);
    assert_eq!(TypeCode::from_i8(112), None);
}

#[test]
fn composite_codes() {
    let codes = [0i8, 98, 99, 127, 100, 101, 102, 103, 104, 105, 106, 111, -128];
    for code in codes.iter() {
        let type_code = TypeCode::from_i8(*code).unwrap();
        assert_eq!(type_code.to_i8(), *code);
        assert!(!type_code.is_atom());
    }
    assert!(TypeCode::Table.is_composite());
    assert!(TypeCode::SortedDictionary.is_composite());
    assert!(TypeCode::Projection.is_function());
    assert!(TypeCode::Adverb(Adverb::EachLeft).is_function());
    assert!(!TypeCode::Error.is_function());
    assert_eq!(TypeCode::from_i8(107), Some(TypeCode::Adverb(Adverb::Over)));
}

#[test]
fn type_table() {
    for (info, primitive) in TYPE_TABLE.iter().zip(PrimitiveType::ALL.iter()) {
        assert_eq!(info.primitive, *primitive);
        assert_eq!(primitive.info(), info);
        assert_eq!(type_info(primitive.atom_code()), Some(info));
        assert_eq!(type_info(primitive.list_code()), Some(info));
    }
    assert_eq!(type_info(0), None);

    assert_eq!(PrimitiveType::Guid.width(), Some(16));
    assert_eq!(PrimitiveType::Short.width(), Some(2));
    assert_eq!(PrimitiveType::Datetime.width(), Some(8));
    assert_eq!(PrimitiveType::Time.width(), Some(4));
    assert_eq!(PrimitiveType::Symbol.width(), None);
    assert_eq!(PrimitiveType::Long.info().char, 'j');
    assert_eq!(PrimitiveType::Timespan.info().null_literal, "0Nn");
}

#[test]
fn null_sentinels() {
    let bits = |atom: Atom| match atom {
        Atom::Short(v) => v.to_le_bytes().to_vec(),
        Atom::Int(v) => v.to_le_bytes().to_vec(),
        Atom::Long(v) => v.to_le_bytes().to_vec(),
        Atom::Real(v) => v.to_bits().to_le_bytes().to_vec(),
        Atom::Float(v) => v.to_bits().to_le_bytes().to_vec(),
        _ => unreachable!(),
    };
    assert_eq!(bits(qnull(PrimitiveType::Short)), vec![0x00, 0x80]);
    assert_eq!(bits(qnull(PrimitiveType::Int)), vec![0x00, 0x00, 0x00, 0x80]);
    assert_eq!(
        bits(qnull(PrimitiveType::Long)),
        vec![0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x80]
    );
    assert_eq!(bits(qnull(PrimitiveType::Real)), vec![0x00, 0x00, 0xc0, 0xff]);
    assert_eq!(
        bits(qnull(PrimitiveType::Float)),
        vec![0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xf8, 0xff]
    );
}

#[test]
fn every_null_is_null() {
    for primitive in PrimitiveType::ALL.iter() {
        let null = qnull(*primitive);
        assert_eq!(null.primitive(), *primitive);
        assert!(is_null(&null, *primitive), "{}", primitive);
    }
}

#[test]
fn is_null_is_type_aware() {
    // a space is the null char, but not the null symbol
    assert!(is_null(&Atom::Char(b' '), PrimitiveType::Char));
    assert!(!is_null(&Atom::Symbol(Symbol::from(" ")), PrimitiveType::Symbol));
    assert!(is_null(&Atom::Symbol(Symbol::default()), PrimitiveType::Symbol));

    // the minimal value of one type is not null in another
    assert!(!is_null(&Atom::Int(i32::MIN), PrimitiveType::Date));
    assert!(is_null(&Atom::Date(i32::MIN), PrimitiveType::Date));
    assert!(!is_null(&Atom::Long(0), PrimitiveType::Long));
    assert!(!is_null(&Atom::Short(i16::MIN + 1), PrimitiveType::Short));

    // any NaN is a null float
    assert!(is_null(&Atom::Float(f64::NAN), PrimitiveType::Float));
    assert!(is_null(&Atom::Real(-f32::NAN), PrimitiveType::Real));
    assert!(!is_null(&Atom::Float(0.0), PrimitiveType::Float));
}

#[test]
fn attributes() {
    assert_eq!(Attribute::from_u8(0), Some(Attribute::None));
    assert_eq!(Attribute::from_u8(1), Some(Attribute::Sorted));
    assert_eq!(Attribute::from_u8(5), Some(Attribute::Grouped));
    assert_eq!(Attribute::from_u8(4), None);
    assert_eq!(Attribute::default(), Attribute::None);
}

#[test]
fn display() {
    assert_eq!(format!("{}", TypeCode::Atom(PrimitiveType::Long)), "-7h");
    assert_eq!(format!("{}", TypeCode::Table), "98h");
    assert_eq!(format!("{}", PrimitiveType::Timestamp), "timestamp");
}
