use chrono::{NaiveDate, NaiveDateTime};
use uuid::Uuid;

use qipc::array::{Function, Lambda, List, ListValues};
use qipc::datatypes::{Adverb, PrimitiveType};
use qipc::endianess::Endianness;
use qipc::error::QError;
use qipc::io::ipc::read::{read_header, read_message, ReadOptions, TemporalMode, MAX_DEPTH};
use qipc::io::ipc::write::serialize;
use qipc::io::ipc::{MessageData, MessageType};
use qipc::scalar::{Atom, Symbol, Temporal};
use qipc::value::Value;

use super::super::common::{read_value, round_trip, round_trip_with};
use crate::test_util::{bytes, init_logger};

#[test]
fn long_list() {
    init_logger();
    let data = bytes(
        "01010000 26000000 07000300 0000
         01000000 00000000 02000000 00000000 03000000 00000000",
    );
    let message = read_message(&mut data.as_slice(), &Default::default()).unwrap();
    assert_eq!(message.header.endianness, Endianness::Little);
    assert_eq!(message.header.message_type, MessageType::Sync);
    assert!(!message.header.compressed);
    assert_eq!(message.header.size, 38);
    assert_eq!(
        message.data,
        MessageData::Value(Value::List(List::from(vec![1i64, 2, 3])))
    );
}

#[test]
fn big_endian() {
    let data = bytes(
        "00010000 00000026 07000000 0003
         00000000 00000001 00000000 00000002 00000000 00000003",
    );
    let message = read_message(&mut data.as_slice(), &Default::default()).unwrap();
    assert_eq!(message.header.endianness, Endianness::Big);
    assert_eq!(
        message.data,
        MessageData::Value(Value::List(List::from(vec![1i64, 2, 3])))
    );
}

#[test]
fn guid() {
    let data = bytes("01020000 19000000 fe 8c680a01 5a495aab 5a65d4bf ddb6a661");
    let expected = Uuid::parse_str("8c680a01-5a49-5aab-5a65-d4bfddb6a661").unwrap();
    assert_eq!(read_value(&data).unwrap(), Value::Atom(Atom::Guid(expected)));

    let data = bytes("01020000 19000000 fe 00000000 00000000 00000000 00000000");
    let value = read_value(&data).unwrap();
    assert_eq!(value, Value::Atom(Atom::Guid(Uuid::nil())));
    assert!(value.as_atom().unwrap().is_null());
}

#[test]
fn symbol() {
    let data = bytes("01020000 0d000000 f5 61626300");
    assert_eq!(read_value(&data).unwrap(), Value::symbol("abc"));
}

#[test]
fn nulls() {
    let data = bytes("01020000 0b000000 fb 0080");
    let value = read_value(&data).unwrap();
    assert_eq!(value, Value::Atom(Atom::Short(i16::MIN)));
    assert_eq!(value, Value::null(PrimitiveType::Short));

    let data = bytes("01020000 11000000 f7 00000000 0000f8ff");
    assert!(read_value(&data).unwrap().as_atom().unwrap().is_null());

    let data = bytes("01020000 0d000000 f8 0000c0ff");
    assert!(read_value(&data).unwrap().as_atom().unwrap().is_null());
}

#[test]
fn remote_error() {
    let data = bytes("01020000 0e000000 80 7479706500");
    let error = read_value(&data).unwrap_err();
    assert!(error.is_remote());
    match error {
        QError::Remote {
            ref message,
            header,
        } => {
            assert_eq!(message, "type");
            assert_eq!(header.message_type, MessageType::Response);
            assert_eq!(header.size, 14);
        }
        ref other => panic!("{:?}", other),
    }
    assert_eq!(format!("{}", error), "'type");
}

#[test]
fn table() {
    let data = bytes(
        "01020000 3b000000
         62 00 63
         0b00 02000000 6100 7300
         0000 02000000
         0700 02000000 01000000 00000000 02000000 00000000
         0b00 02000000 7800 7900",
    );
    let value = read_value(&data).unwrap();
    let table = value.as_table().unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table.names(), &[Symbol::from("a"), Symbol::from("s")]);
    assert_eq!(table.column("a"), Some(&List::from(vec![1i64, 2])));
    assert_eq!(table.column("s"), Some(&List::symbols(vec!["x", "y"])));
}

#[test]
fn executables() {
    let data = bytes("01020000 0a000000 6500");
    assert_eq!(read_value(&data).unwrap(), Value::Nil);

    let data = bytes("01020000 0a000000 6601");
    assert_eq!(
        read_value(&data).unwrap(),
        Value::Function(Function::binary(1))
    );

    let data = bytes("01020000 0b000000 6b6601");
    assert_eq!(
        read_value(&data).unwrap(),
        Value::Function(Function::adverb(
            Adverb::Over,
            Value::Function(Function::binary(1))
        ))
    );

    let data = bytes("01020000 15000000 64 00 0a00 05000000 7b782b797d");
    assert_eq!(
        read_value(&data).unwrap(),
        Value::Lambda(Lambda::new("", "{x+y}"))
    );
}

#[test]
fn temporals() {
    let date = bytes("01020000 0d000000 f2 6e010000");
    let timestamp = bytes("01020000 11000000 f4 00c0cafa 20fe0000");

    assert_eq!(read_value(&date).unwrap(), Value::Atom(Atom::Date(366)));

    let options = ReadOptions {
        temporals: TemporalMode::Calendar,
        ..Default::default()
    };
    let read = |data: &[u8]| match read_message(&mut &data[..], &options).unwrap().data {
        MessageData::Value(value) => value,
        MessageData::Raw(_) => unreachable!(),
    };
    assert_eq!(
        read(&date),
        Value::Temporal(Temporal::Date(NaiveDate::from_ymd_opt(2001, 1, 1)))
    );
    let expected = NaiveDate::from_ymd_opt(2000, 1, 4)
        .unwrap()
        .and_hms_milli_opt(5, 36, 57, 600);
    assert_eq!(read(&timestamp), Value::Temporal(Temporal::Timestamp(expected)));

    // nulls are "not a time"
    let null = bytes("01020000 0d000000 f2 00000080");
    assert_eq!(read(&null), Value::Temporal(Temporal::Date(None)));
}

#[test]
fn temporal_infinities() {
    let options = ReadOptions {
        temporals: TemporalMode::Calendar,
        ..Default::default()
    };
    let read = |data: &[u8]| match read_message(&mut &data[..], &options).unwrap().data {
        MessageData::Value(value) => value,
        MessageData::Raw(_) => unreachable!(),
    };

    let cases = [
        // 0Wd
        (
            "01020000 0d000000 f2 ffffff7f",
            Value::Temporal(Temporal::Date(Some(NaiveDate::MAX))),
        ),
        // -0Wd
        (
            "01020000 0d000000 f2 01000080",
            Value::Temporal(Temporal::Date(Some(NaiveDate::MIN))),
        ),
        // 0Wm
        (
            "01020000 0d000000 f3 ffffff7f",
            Value::Temporal(Temporal::Month(Some(NaiveDate::MAX))),
        ),
        // 0wz
        (
            "01020000 11000000 f1 00000000 0000f07f",
            Value::Temporal(Temporal::Datetime(Some(NaiveDateTime::MAX))),
        ),
    ];
    for (data, expected) in cases.iter() {
        let data = bytes(data);
        let value = read(&data);
        assert_eq!(&value, expected);
        let written = serialize(&value, MessageType::Response, &Default::default()).unwrap();
        assert_eq!(written, data);
    }

    // 0Wp is inside of the range of a timestamp
    let data = bytes("01020000 11000000 f4 ffffffff ffffff7f");
    let value = read(&data);
    assert!(matches!(value, Value::Temporal(Temporal::Timestamp(Some(_)))));
    let written = serialize(&value, MessageType::Response, &Default::default()).unwrap();
    assert_eq!(written, data);

    // 2001.01.01 0Wd 0Nd -0Wd
    let data = bytes(
        "01020000 1e000000 0e00 04000000
         6e010000 ffffff7f 00000080 01000080",
    );
    let value = read(&data);
    let list = value.as_list().unwrap();
    assert_eq!(
        list.values(),
        &ListValues::Temporal(vec![
            Temporal::Date(NaiveDate::from_ymd_opt(2001, 1, 1)),
            Temporal::Date(Some(NaiveDate::MAX)),
            Temporal::Date(None),
            Temporal::Date(Some(NaiveDate::MIN)),
        ])
    );
    let written = serialize(&value, MessageType::Response, &Default::default()).unwrap();
    assert_eq!(written, data);

    // the raw mode keeps the sentinels
    let value = read_value(&data).unwrap();
    assert_eq!(
        value,
        Value::List(
            List::from(vec![366, i32::MAX, i32::MIN, -i32::MAX])
                .to(PrimitiveType::Date)
                .unwrap()
        )
    );
    let written = serialize(&value, MessageType::Response, &Default::default()).unwrap();
    assert_eq!(written, data);
}

#[test]
fn temporal_extremes() {
    let atoms = vec![
        Atom::Month(i32::MAX),
        Atom::Month(-i32::MAX),
        Atom::Date(i32::MAX),
        Atom::Date(-i32::MAX),
        Atom::Minute(i32::MAX),
        Atom::Second(-i32::MAX),
        Atom::Time(i32::MAX),
        Atom::Timestamp(i64::MAX),
        Atom::Timestamp(-i64::MAX),
        Atom::Timespan(i64::MAX),
        Atom::Timespan(-i64::MAX),
        Atom::Datetime(f64::INFINITY),
        Atom::Datetime(f64::NEG_INFINITY),
    ];
    let calendar = ReadOptions {
        temporals: TemporalMode::Calendar,
        ..Default::default()
    };
    for atom in atoms {
        let value = Value::Atom(atom.clone());
        round_trip(value.clone());

        let message = round_trip_with(&value, &Default::default(), &calendar);
        let read = match message.data {
            MessageData::Value(read) => read,
            MessageData::Raw(_) => unreachable!(),
        };
        assert!(matches!(read, Value::Temporal(_)), "{:?}", atom);
        let written = serialize(&read, MessageType::Sync, &Default::default()).unwrap();
        let expected = serialize(&value, MessageType::Sync, &Default::default()).unwrap();
        assert_eq!(written, expected, "{:?}", atom);
    }
}

#[test]
fn raw() {
    let data = bytes("01020000 0d000000 f5 61626300");
    let options = ReadOptions {
        raw: true,
        ..Default::default()
    };
    let message = read_message(&mut data.as_slice(), &options).unwrap();
    assert_eq!(message.data, MessageData::Raw(bytes("f5 61626300")));
}

#[test]
#[cfg(feature = "io_ipc_compression")]
fn compressed() {
    init_logger();
    let data = bytes("01010100 1b000000 0e010000 80070020 00000001 00000300 0301f6");
    let message = read_message(&mut data.as_slice(), &Default::default()).unwrap();
    assert!(message.header.compressed);
    assert_eq!(
        message.data,
        MessageData::Value(Value::List(List::from(vec![1i64; 32])))
    );
}

#[test]
#[cfg(feature = "io_ipc_compression")]
fn corrupt_compressed() {
    let data = bytes("01010100 0f000000 0a000000 010000");
    assert!(matches!(
        read_value(&data),
        Err(QError::CorruptCompressedBody { .. })
    ));
}

#[test]
#[cfg(not(feature = "io_ipc_compression"))]
fn compressed_without_feature() {
    let data = bytes("01010100 1b000000 0e010000 80070020 00000001 00000300 0301f6");
    match read_value(&data) {
        Err(QError::InvalidData(message)) => assert!(message.contains("io_ipc_compression")),
        other => panic!("{:?}", other),
    }
}

#[test]
fn truncated() {
    // the source ends before the declared length
    let data = bytes("01010000 26000000 07000300 0000 01000000 00000000");
    assert!(matches!(
        read_value(&data),
        Err(QError::UnexpectedEndOfInput { .. })
    ));

    // the body ends before the declared count
    let data = bytes(
        "01010000 26000000 07000400 0000
         01000000 00000000 02000000 00000000 03000000 00000000",
    );
    assert!(matches!(
        read_value(&data),
        Err(QError::UnexpectedEndOfInput { .. })
    ));

    // a symbol without its terminator
    let data = bytes("01020000 0c000000 f5 616263");
    assert!(matches!(
        read_value(&data),
        Err(QError::UnexpectedEndOfInput { .. })
    ));
}

#[test]
fn unknown_type() {
    let data = bytes("01020000 09000000 14");
    assert!(matches!(
        read_value(&data),
        Err(QError::UnknownType { code: 20, offset: 0 })
    ));

    let data = bytes("01020000 0f000000 0000 01000000 03");
    assert!(matches!(
        read_value(&data),
        Err(QError::UnknownType { code: 3, offset: 6 })
    ));
}

#[test]
fn malformed_header() {
    let cases = [
        "010100",
        // endianness
        "02010000 09000000 65",
        // message type
        "01030000 0a000000 6500",
        // compression
        "01010200 0a000000 6500",
        // shorter than the header
        "01010000 04000000",
    ];
    for data in cases.iter() {
        assert!(
            matches!(read_value(&bytes(data)), Err(QError::MalformedHeader(_))),
            "{}",
            data
        );
    }
    assert!(matches!(
        read_header(&mut &bytes("0101")[..]),
        Err(QError::MalformedHeader(_))
    ));
}

#[test]
fn invalid_data() {
    // negative count
    let data = bytes("01020000 0e000000 0700 ffffffff");
    assert!(matches!(read_value(&data), Err(QError::InvalidData(_))));

    // unknown attribute
    let data = bytes("01020000 0e000000 0709 00000000");
    assert!(matches!(read_value(&data), Err(QError::InvalidData(_))));
}

fn nested(depth: usize) -> Vec<u8> {
    let mut data = vec![];
    for _ in 0..depth {
        // a general list of one item
        data.extend_from_slice(&[0, 0, 1, 0, 0, 0]);
    }
    data.extend_from_slice(&[0x65, 0]);
    let mut message = bytes("01020000 00000000");
    message[4..8].copy_from_slice(&((data.len() + 8) as i32).to_le_bytes());
    message.extend_from_slice(&data);
    message
}

#[test]
fn nesting_depth() {
    let mut value = read_value(&nested(MAX_DEPTH)).unwrap();
    let mut depth = 0;
    loop {
        match value {
            Value::List(list) => match list.values() {
                ListValues::General(values) if values.len() == 1 => {
                    value = values[0].clone();
                    depth += 1;
                }
                other => panic!("{:?}", other),
            },
            Value::Nil => break,
            other => panic!("{:?}", other),
        }
    }
    assert_eq!(depth, MAX_DEPTH);

    assert!(matches!(
        read_value(&nested(MAX_DEPTH + 1)),
        Err(QError::InvalidData(_))
    ));
    assert!(matches!(
        read_value(&nested(100_000)),
        Err(QError::InvalidData(_))
    ));
}
