//! Error display tests

use sio_core::{Error, PacketType};
use std::io;

#[test]
fn test_illegal_attachment_message() {
    let err = Error::IllegalAttachment { num: 3, len: 2 };
    assert_eq!(
        err.to_string(),
        "illegal attachment reference: index 3, 2 attachments"
    );
}

#[test]
fn test_io_error_conversion() {
    let err: Error = io::Error::new(io::ErrorKind::UnexpectedEof, "truncated").into();
    assert!(matches!(err, Error::Io(_)));
    assert_eq!(err.to_string(), "I/O error: truncated");
}

#[test]
fn test_unknown_packet_type() {
    let err = PacketType::try_from(12).unwrap_err();
    assert_eq!(err.to_string(), "unknown packet type: 12");
}

#[test]
fn test_attachment_errors_display() {
    assert_eq!(
        Error::UnexpectedAttachment.to_string(),
        "unexpected binary attachment"
    );
    assert_eq!(
        Error::InlineBinary.to_string(),
        "binary value must be deconstructed before text encoding"
    );
}
