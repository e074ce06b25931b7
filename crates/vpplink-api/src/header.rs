//! Message headers inside a frame payload.
//!
//! ```text
//! request: msg_id (u16) | client_index (u32) | context (u32) | body
//! reply:   msg_id (u16) | context (u32) | body
//! ```

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::{ApiError, Result};
use crate::wire::WireError;

pub const REQUEST_HEADER_SIZE: usize = 10;
pub const REPLY_HEADER_SIZE: usize = 6;

/// Prefix a request body with its header.
pub fn encode_request(msg_id: u16, client_index: u32, context: u32, body: &[u8]) -> BytesMut {
    let mut payload = BytesMut::with_capacity(REQUEST_HEADER_SIZE + body.len());
    payload.put_u16(msg_id);
    payload.put_u32(client_index);
    payload.put_u32(context);
    payload.put_slice(body);
    payload
}

/// Split a reply payload into `(msg_id, context, body)`.
pub fn split_reply(mut payload: Bytes) -> Result<(u16, u32, Bytes)> {
    if payload.len() < REPLY_HEADER_SIZE {
        return Err(ApiError::Decode {
            message: "reply header".to_string(),
            source: WireError::Truncated {
                needed: REPLY_HEADER_SIZE,
                remaining: payload.len(),
            },
        });
    }
    let msg_id = payload.get_u16();
    let context = payload.get_u32();
    Ok((msg_id, context, payload))
}

/// Split a request payload into `(msg_id, client_index, context, body)`.
pub fn split_request(mut payload: Bytes) -> Result<(u16, u32, u32, Bytes)> {
    if payload.len() < REQUEST_HEADER_SIZE {
        return Err(ApiError::Decode {
            message: "request header".to_string(),
            source: WireError::Truncated {
                needed: REQUEST_HEADER_SIZE,
                remaining: payload.len(),
            },
        });
    }
    let msg_id = payload.get_u16();
    let client_index = payload.get_u32();
    let context = payload.get_u32();
    Ok((msg_id, client_index, context, payload))
}

/// Prefix a reply body with its header.
pub fn encode_reply(msg_id: u16, context: u32, body: &[u8]) -> BytesMut {
    let mut payload = BytesMut::with_capacity(REPLY_HEADER_SIZE + body.len());
    payload.put_u16(msg_id);
    payload.put_u32(context);
    payload.put_slice(body);
    payload
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_header_layout() {
        let payload = encode_request(0x0102, 7, 0xaabbccdd, b"xy");
        assert_eq!(
            &payload[..],
            &[0x01, 0x02, 0, 0, 0, 7, 0xaa, 0xbb, 0xcc, 0xdd, b'x', b'y']
        );

        let (msg_id, client_index, context, body) = split_request(payload.freeze()).unwrap();
        assert_eq!((msg_id, client_index, context), (0x0102, 7, 0xaabbccdd));
        assert_eq!(&body[..], b"xy");
    }

    #[test]
    fn reply_header_has_no_client_index() {
        let payload = encode_reply(9, 42, &[1]);
        assert_eq!(payload.len(), REPLY_HEADER_SIZE + 1);

        let (msg_id, context, body) = split_reply(payload.freeze()).unwrap();
        assert_eq!((msg_id, context), (9, 42));
        assert_eq!(&body[..], &[1]);
    }

    #[test]
    fn short_payload_is_decode_error() {
        assert!(matches!(
            split_reply(Bytes::from_static(&[0, 1, 0])),
            Err(ApiError::Decode { .. })
        ));
    }
}
