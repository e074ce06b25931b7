//! Socket client registration (`sockclnt_create` / `sockclnt_delete`).

use std::io::{Read, Write};
use std::time::{Duration, Instant};

use bytes::{BufMut, BytesMut};
use tracing::debug;
use vpplink_frame::{FrameError, FrameReader, FrameWriter};

use crate::binapi::memclnt::{SockclntCreate, SockclntCreateReply, SOCKCLNT_CREATE_MSG_ID};
use crate::catalogue::Catalogue;
use crate::error::{ApiError, Result};
use crate::header::{split_reply, REPLY_HEADER_SIZE};
use crate::message::Message;
use crate::wire::{Decode, Encode, FixedStr};

/// Context used for the registration exchange; any non-zero value works.
const REGISTRATION_CONTEXT: u32 = 123;

/// Outcome of a successful registration.
#[derive(Debug, Clone)]
pub struct Registration {
    /// Index the engine assigned to this client; sent in every request.
    pub client_index: u32,
    /// Message table announced by the engine.
    pub catalogue: Catalogue,
}

/// Register as a socket client and learn the engine's message table.
pub fn register<R: Read, W: Write>(
    reader: &mut FrameReader<R>,
    writer: &mut FrameWriter<W>,
    client_name: &str,
    timeout: Duration,
) -> Result<Registration> {
    let name = FixedStr::<64>::new(client_name).map_err(|source| ApiError::Encode {
        message: SockclntCreate::NAME.to_string(),
        source,
    })?;

    let mut payload = BytesMut::with_capacity(REPLY_HEADER_SIZE + 64);
    payload.put_u16(SOCKCLNT_CREATE_MSG_ID);
    payload.put_u32(REGISTRATION_CONTEXT);
    SockclntCreate { name }
        .encode(&mut payload)
        .map_err(|source| ApiError::Encode {
            message: SockclntCreate::NAME.to_string(),
            source,
        })?;
    writer.send(&payload)?;

    let deadline = Instant::now() + timeout;
    let (_, context, mut body) = loop {
        if Instant::now() >= deadline {
            return Err(ApiError::Timeout(timeout));
        }
        match reader.read_frame() {
            Ok(frame) => break split_reply(frame.payload)?,
            Err(err) if err.is_timeout() => continue,
            Err(FrameError::ConnectionClosed) => {
                return Err(ApiError::Disconnected(
                    "connection closed during registration".to_string(),
                ))
            }
            Err(err) => return Err(ApiError::Frame(err)),
        }
    };

    if context != REGISTRATION_CONTEXT {
        return Err(ApiError::HandshakeFailed(format!(
            "registration reply carries context {context}, expected {REGISTRATION_CONTEXT}"
        )));
    }

    let reply = SockclntCreateReply::decode(&mut body).map_err(|source| ApiError::Decode {
        message: SockclntCreateReply::NAME.to_string(),
        source,
    })?;
    if reply.response != 0 {
        return Err(ApiError::HandshakeFailed(format!(
            "engine refused registration (response {})",
            reply.response
        )));
    }

    let catalogue = Catalogue::from_table(
        reply
            .message_table
            .iter()
            .map(|row| (row.index, row.name.as_str())),
    );
    if catalogue.is_empty() {
        return Err(ApiError::HandshakeFailed(
            "engine announced an empty message table".to_string(),
        ));
    }
    debug!(
        client_index = reply.index,
        messages = catalogue.len(),
        "registered with engine"
    );

    Ok(Registration {
        client_index: reply.index,
        catalogue,
    })
}
