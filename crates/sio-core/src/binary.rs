//! Binary attachment extraction and reinsertion
//!
//! Before a packet is text encoded, every binary value in its payload is
//! moved into an attachment list and replaced by a [`Placeholder`] holding
//! its list position. The receiver reverses this once all binary frames for
//! the packet have arrived.
//!
//! Traversal is depth-first and pre-order. Array elements are visited in
//! index order and map values in ascending key order, so placeholder
//! numbering is reproducible for a given tree.

use crate::{Error, Packet, Placeholder, Result, Value};
use bytes::{Bytes, BytesMut};
use std::collections::BTreeMap;
use tracing::{debug, trace, warn};

/// Whether a node is itself a binary value
#[inline]
pub fn is_binary(value: &Value) -> bool {
    value.is_binary()
}

/// Whether a binary value appears anywhere in the tree
pub fn has_binary(value: &Value) -> bool {
    match value {
        Value::Bytes(_) | Value::Stream(_) => true,
        Value::Array(items) => items.iter().any(has_binary),
        Value::Map(map) => map.values().any(has_binary),
        _ => false,
    }
}

/// Replace every binary value in the packet with a numbered placeholder.
///
/// Returns the rewritten packet, with `attachments` set, and the extracted
/// binary values in placeholder order. Fails only if a streaming source
/// cannot be drained.
pub fn deconstruct_packet(mut packet: Packet) -> Result<(Packet, Vec<Bytes>)> {
    let mut buffers = Vec::new();
    packet.data = deconstruct_value(std::mem::take(&mut packet.data), &mut buffers)?;
    packet.attachments = buffers.len() as u64;

    debug!(
        nsp = %packet.nsp,
        attachments = packet.attachments,
        "deconstructed packet"
    );
    Ok((packet, buffers))
}

fn deconstruct_value(value: Value, buffers: &mut Vec<Bytes>) -> Result<Value> {
    match value {
        Value::Bytes(bytes) => Ok(push_attachment(bytes, buffers)),
        Value::Stream(source) => {
            let mut sink = BytesMut::new();
            source.drain_into(&mut sink)?;
            Ok(push_attachment(sink.freeze(), buffers))
        }
        Value::Array(items) => items
            .into_iter()
            .map(|item| deconstruct_value(item, buffers))
            .collect::<Result<Vec<_>>>()
            .map(Value::Array),
        Value::Map(map) => {
            let mut out = BTreeMap::new();
            for (key, item) in map {
                out.insert(key, deconstruct_value(item, buffers)?);
            }
            Ok(Value::Map(out))
        }
        other => Ok(other),
    }
}

fn push_attachment(bytes: Bytes, buffers: &mut Vec<Bytes>) -> Value {
    let placeholder = Placeholder::new(buffers.len());
    trace!(num = placeholder.num, len = bytes.len(), "extracted attachment");
    buffers.push(bytes);
    Value::Placeholder(placeholder)
}

/// Substitute placeholders with the binary values they refer to.
///
/// Accepts placeholders both as [`Value::Placeholder`] nodes and as decoded
/// wire mappings. Extra attachments are ignored. On success `attachments`
/// is reset to zero; an out-of-range reference fails the whole call.
pub fn reconstruct_packet(mut packet: Packet, buffers: &[Bytes]) -> Result<Packet> {
    packet.data = reconstruct_value(std::mem::take(&mut packet.data), buffers)?;
    packet.attachments = 0;

    debug!(
        nsp = %packet.nsp,
        buffers = buffers.len(),
        "reconstructed packet"
    );
    Ok(packet)
}

fn reconstruct_value(value: Value, buffers: &[Bytes]) -> Result<Value> {
    match value {
        Value::Placeholder(placeholder) if placeholder.placeholder => {
            resolve(placeholder, buffers)
        }
        Value::Array(items) => items
            .into_iter()
            .map(|item| reconstruct_value(item, buffers))
            .collect::<Result<Vec<_>>>()
            .map(Value::Array),
        Value::Map(map) => match Placeholder::from_map(&map) {
            Some(placeholder) => resolve(placeholder, buffers),
            None => {
                let mut out = BTreeMap::new();
                for (key, item) in map {
                    out.insert(key, reconstruct_value(item, buffers)?);
                }
                Ok(Value::Map(out))
            }
        },
        other => Ok(other),
    }
}

fn resolve(placeholder: Placeholder, buffers: &[Bytes]) -> Result<Value> {
    match placeholder.index(buffers.len()) {
        Some(index) => {
            trace!(num = index, "reinserted attachment");
            Ok(Value::Bytes(buffers[index].clone()))
        }
        None => {
            warn!(
                num = placeholder.num,
                len = buffers.len(),
                "illegal attachment reference"
            );
            Err(Error::IllegalAttachment {
                num: placeholder.num,
                len: buffers.len(),
            })
        }
    }
}

/// Collects the binary frames that follow a placeholder packet
///
/// The decoder hands over the text-decoded packet, then each binary frame as
/// it arrives. Once the announced number of frames is in, the packet is
/// reconstructed and returned.
#[derive(Debug)]
pub struct BinaryReconstructor {
    packet: Option<Packet>,
    buffers: Vec<Bytes>,
}

impl BinaryReconstructor {
    /// Start collecting frames for `packet`
    ///
    /// The announced count comes from the peer, so it only bounds how many
    /// frames are awaited and never sizes an allocation up front.
    pub fn new(packet: Packet) -> Self {
        Self {
            packet: Some(packet),
            buffers: Vec::new(),
        }
    }

    /// Number of binary frames still expected
    pub fn remaining(&self) -> u64 {
        self.packet
            .as_ref()
            .map(|p| p.attachments.saturating_sub(self.buffers.len() as u64))
            .unwrap_or(0)
    }

    /// Whether a packet is waiting for frames
    pub fn is_pending(&self) -> bool {
        self.packet.is_some()
    }

    /// Accept the next binary frame.
    ///
    /// Returns the reconstructed packet when this was the last expected
    /// frame, `None` while more are outstanding.
    pub fn take_binary_data(&mut self, data: impl Into<Bytes>) -> Result<Option<Packet>> {
        let Some(packet) = self.packet.as_ref() else {
            return Err(Error::UnexpectedAttachment);
        };
        self.buffers.push(data.into());

        if (self.buffers.len() as u64) < packet.attachments {
            trace!(remaining = self.remaining(), "awaiting binary frames");
            return Ok(None);
        }

        let packet = self.packet.take().ok_or(Error::UnexpectedAttachment)?;
        let buffers = std::mem::take(&mut self.buffers);
        let result = reconstruct_packet(packet, &buffers);
        if result.is_ok() {
            debug!(frames = buffers.len(), "binary reconstruction complete");
        }
        result.map(Some)
    }

    /// Drop the pending packet and any frames collected for it
    pub fn finished_reconstruction(&mut self) {
        self.packet = None;
        self.buffers.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PacketType;

    #[test]
    fn test_has_binary_nested() {
        let value: Value = vec![(
            "outer",
            Value::Array(vec![Value::Null, Value::from(vec![0u8])]),
        )]
        .into_iter()
        .collect();
        assert!(has_binary(&value));
        assert!(!has_binary(&Value::Array(vec![Value::Int(1)])));
    }

    #[test]
    fn test_placeholder_node_with_false_flag_passes_through() {
        let inert = Placeholder {
            placeholder: false,
            num: 42,
        };
        let packet = Packet::new(PacketType::Event, Value::Placeholder(inert));
        let packet = reconstruct_packet(packet, &[]).unwrap();
        assert_eq!(packet.data, Value::Placeholder(inert));
    }

    #[test]
    fn test_reconstructor_rejects_after_completion() {
        let packet = Packet {
            attachments: 1,
            ..Packet::new(PacketType::BinaryEvent, Value::Placeholder(Placeholder::new(0)))
        };
        let mut reconstructor = BinaryReconstructor::new(packet);
        assert!(reconstructor.take_binary_data(vec![1u8]).unwrap().is_some());
        assert!(matches!(
            reconstructor.take_binary_data(vec![2u8]),
            Err(Error::UnexpectedAttachment)
        ));
    }
}
