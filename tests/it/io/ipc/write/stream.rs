use qipc::array::List;
use qipc::error::QError;
use qipc::io::ipc::read::StreamReader;
use qipc::io::ipc::write::{Compression, StreamWriter, WriteOptions};
use qipc::io::ipc::{MessageData, MessageType};
use qipc::value::Value;

#[test]
#[cfg(feature = "io_ipc_compression")]
fn write_stream() {
    let options = WriteOptions {
        compression: Compression::Threshold(100),
        ..Default::default()
    };
    let values = vec![
        Value::List(List::from(vec![7i64; 100])),
        Value::symbol("done"),
    ];

    let mut writer = StreamWriter::new(vec![], options);
    assert_eq!(writer.options(), &options);
    for value in values.iter() {
        writer.write(value, MessageType::Async).unwrap();
    }
    writer.write_error("rank").unwrap();
    writer.flush().unwrap();
    let data = writer.into_inner();

    let mut reader = StreamReader::new(data.as_slice(), Default::default());
    let first = reader.next().unwrap().unwrap();
    assert!(first.header.compressed);
    assert_eq!(first.header.message_type, MessageType::Async);
    assert_eq!(first.data, MessageData::Value(values[0].clone()));

    let second = reader.next().unwrap().unwrap();
    assert!(!second.header.compressed);
    assert_eq!(second.data, MessageData::Value(values[1].clone()));

    match reader.next() {
        Some(Err(QError::Remote { message, header })) => {
            assert_eq!(message, "rank");
            assert_eq!(header.message_type, MessageType::Response);
        }
        other => panic!("{:?}", other),
    }
    assert!(reader.next().is_none());
}
