//! Receive-side reconstruction tests

use bytes::Bytes;
use sio_core::{
    deconstruct_packet, BinaryReconstructor, Error, Packet, PacketType, Value,
};

fn upload_packet() -> Packet {
    let data = Value::Array(vec![
        Value::from("upload"),
        vec![
            ("name", Value::from("photo.png")),
            ("data", Value::from(vec![0x89u8, b'P', b'N', b'G'])),
            ("preview", Value::from(vec![1u8, 2, 3])),
        ]
        .into_iter()
        .collect(),
    ]);
    Packet::new(PacketType::BinaryEvent, data).with_id(4)
}

#[test]
fn test_collects_frames_in_order() {
    let original = upload_packet();
    let (packet, buffers) = deconstruct_packet(original.clone()).unwrap();
    assert_eq!(buffers.len(), 2);

    let mut reconstructor = BinaryReconstructor::new(packet);
    assert!(reconstructor.is_pending());
    assert_eq!(reconstructor.remaining(), 2);

    assert!(reconstructor.take_binary_data(buffers[0].clone()).unwrap().is_none());
    assert_eq!(reconstructor.remaining(), 1);

    let restored = reconstructor
        .take_binary_data(buffers[1].clone())
        .unwrap()
        .expect("packet should be complete");

    assert_eq!(restored, original);
    assert_eq!(restored.attachments, 0);
    assert!(!reconstructor.is_pending());
    assert_eq!(reconstructor.remaining(), 0);
}

#[test]
fn test_frame_without_packet() {
    let (packet, buffers) = deconstruct_packet(upload_packet()).unwrap();
    let mut reconstructor = BinaryReconstructor::new(packet);
    reconstructor.finished_reconstruction();

    assert!(!reconstructor.is_pending());
    assert!(matches!(
        reconstructor.take_binary_data(buffers[0].clone()),
        Err(Error::UnexpectedAttachment)
    ));
}

#[test]
fn test_mismatched_count_fails() {
    // Announces one frame but references a second slot
    let data = Value::Array(vec![
        vec![("_placeholder", Value::Bool(true)), ("num", Value::Int(0))]
            .into_iter()
            .collect(),
        vec![("_placeholder", Value::Bool(true)), ("num", Value::Int(1))]
            .into_iter()
            .collect(),
    ]);
    let packet = Packet {
        attachments: 1,
        ..Packet::new(PacketType::BinaryEvent, data)
    };

    let mut reconstructor = BinaryReconstructor::new(packet);
    let result = reconstructor.take_binary_data(Bytes::from_static(b"frame"));

    assert!(matches!(
        result,
        Err(Error::IllegalAttachment { num: 1, len: 1 })
    ));
    assert!(!reconstructor.is_pending());
}

#[test]
fn test_accepts_vec_frames() {
    let (packet, _) = deconstruct_packet(Packet::new(
        PacketType::BinaryAck,
        Value::Array(vec![Value::from(vec![42u8])]),
    ))
    .unwrap();

    let mut reconstructor = BinaryReconstructor::new(packet);
    let restored = reconstructor.take_binary_data(vec![42u8]).unwrap().unwrap();

    assert_eq!(restored.packet_type, PacketType::BinaryAck);
    assert_eq!(restored.data, Value::Array(vec![Value::from(vec![42u8])]));
}

#[test]
fn test_huge_announced_count() {
    let packet = Packet {
        attachments: u64::MAX,
        ..Packet::new(PacketType::BinaryEvent, Value::Array(vec![]))
    };

    let mut reconstructor = BinaryReconstructor::new(packet);
    assert_eq!(reconstructor.remaining(), u64::MAX);

    let result = reconstructor.take_binary_data(Bytes::from_static(b"frame"));
    assert!(matches!(result, Ok(None)));
    assert_eq!(reconstructor.remaining(), u64::MAX - 1);
    assert!(reconstructor.is_pending());
}

#[test]
fn test_zero_announced_completes_on_first_frame() {
    let packet = Packet::new(PacketType::BinaryEvent, Value::from("no binaries"));

    let mut reconstructor = BinaryReconstructor::new(packet);
    assert_eq!(reconstructor.remaining(), 0);
    assert!(reconstructor.is_pending());

    let restored = reconstructor
        .take_binary_data(Bytes::from_static(b"stray"))
        .unwrap()
        .expect("packet should complete immediately");

    assert_eq!(restored.data, Value::from("no binaries"));
    assert_eq!(restored.attachments, 0);
    assert!(!reconstructor.is_pending());
}
