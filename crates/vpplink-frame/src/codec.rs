use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::{FrameError, Result};

/// Frame header: queue (8) + length (4) + gc mark (4) = 16 bytes.
pub const HEADER_SIZE: usize = 16;

/// Default maximum payload size: 1 MiB. Large dumps arrive as many frames.
pub const DEFAULT_MAX_PAYLOAD: usize = 1024 * 1024;

/// One message payload as carried on the API socket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub payload: Bytes,
}

impl Frame {
    /// Create a new frame.
    pub fn new(payload: impl Into<Bytes>) -> Self {
        Self {
            payload: payload.into(),
        }
    }

    /// The leading big-endian message id, if the payload carries one.
    pub fn msg_id(&self) -> Option<u16> {
        let bytes = self.payload.get(..2)?;
        Some(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    /// The total wire size of this frame (header + payload).
    pub fn wire_size(&self) -> usize {
        HEADER_SIZE + self.payload.len()
    }
}

/// Encode a payload into the socket wire format.
///
/// ```text
/// ┌──────────────┬──────────────┬──────────────┬──────────────────┐
/// │ q (8B)       │ data_len     │ gc_mark (4B) │ payload          │
/// │ zero         │ (4B BE)      │ zero         │ (data_len bytes) │
/// └──────────────┴──────────────┴──────────────┴──────────────────┘
/// ```
pub fn encode_frame(payload: &[u8], dst: &mut BytesMut) -> Result<()> {
    let len = u32::try_from(payload.len()).map_err(|_| FrameError::PayloadTooLarge {
        size: payload.len(),
        max: u32::MAX as usize,
    })?;
    dst.reserve(HEADER_SIZE + payload.len());
    dst.put_u64(0);
    dst.put_u32(len);
    dst.put_u32(0);
    dst.put_slice(payload);
    Ok(())
}

/// Decode one frame from a buffer.
///
/// Returns `Ok(None)` if the buffer doesn't contain a complete frame yet.
/// On success, consumes the frame bytes from the buffer.
pub fn decode_frame(src: &mut BytesMut, max_payload: usize) -> Result<Option<Frame>> {
    if src.len() < HEADER_SIZE {
        return Ok(None);
    }

    let payload_len = u32::from_be_bytes([src[8], src[9], src[10], src[11]]) as usize;
    if payload_len > max_payload {
        return Err(FrameError::PayloadTooLarge {
            size: payload_len,
            max: max_payload,
        });
    }

    if src.len() < HEADER_SIZE + payload_len {
        return Ok(None);
    }

    src.advance(HEADER_SIZE);
    let payload = src.split_to(payload_len).freeze();
    Ok(Some(Frame { payload }))
}

/// Configuration for the frame reader/writer.
#[derive(Debug, Clone)]
pub struct FrameConfig {
    /// Maximum payload size in bytes. Default: 1 MiB.
    pub max_payload_size: usize,
    /// Read timeout applied to the socket.
    pub read_timeout: Option<std::time::Duration>,
    /// Write timeout applied to the socket.
    pub write_timeout: Option<std::time::Duration>,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            max_payload_size: DEFAULT_MAX_PAYLOAD,
            read_timeout: None,
            write_timeout: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_layout_is_big_endian_length() {
        let mut buf = BytesMut::new();
        encode_frame(&[0x00, 0x0f, 0xaa], &mut buf).unwrap();

        assert_eq!(buf.len(), HEADER_SIZE + 3);
        assert_eq!(&buf[..8], &[0u8; 8]);
        assert_eq!(&buf[8..12], &[0, 0, 0, 3]);
        assert_eq!(&buf[12..16], &[0u8; 4]);
        assert_eq!(&buf[16..], &[0x00, 0x0f, 0xaa]);
    }

    #[test]
    fn decode_waits_for_complete_header() {
        let mut buf = BytesMut::from(&[0u8; 10][..]);
        assert!(decode_frame(&mut buf, DEFAULT_MAX_PAYLOAD).unwrap().is_none());
        assert_eq!(buf.len(), 10);
    }

    #[test]
    fn decode_waits_for_complete_payload() {
        let mut buf = BytesMut::new();
        encode_frame(b"control_ping", &mut buf).unwrap();
        buf.truncate(HEADER_SIZE + 4);

        assert!(decode_frame(&mut buf, DEFAULT_MAX_PAYLOAD).unwrap().is_none());
    }

    #[test]
    fn decode_rejects_oversized_length() {
        let mut buf = BytesMut::new();
        buf.put_u64(0);
        buf.put_u32(64 * 1024 * 1024);
        buf.put_u32(0);

        let result = decode_frame(&mut buf, DEFAULT_MAX_PAYLOAD);
        assert!(matches!(result, Err(FrameError::PayloadTooLarge { .. })));
    }

    #[test]
    fn back_to_back_frames_split_cleanly() {
        let mut buf = BytesMut::new();
        encode_frame(&[0x00, 0x01, 0xff], &mut buf).unwrap();
        encode_frame(&[0x00, 0x02], &mut buf).unwrap();

        let first = decode_frame(&mut buf, DEFAULT_MAX_PAYLOAD).unwrap().unwrap();
        let second = decode_frame(&mut buf, DEFAULT_MAX_PAYLOAD).unwrap().unwrap();

        assert_eq!(first.msg_id(), Some(1));
        assert_eq!(first.payload.len(), 3);
        assert_eq!(second.msg_id(), Some(2));
        assert!(buf.is_empty());
    }

    #[test]
    fn msg_id_absent_for_short_payload() {
        assert_eq!(Frame::new(vec![0x01]).msg_id(), None);
        assert_eq!(Frame::new(vec![0x01, 0x02]).wire_size(), HEADER_SIZE + 2);
    }
}
