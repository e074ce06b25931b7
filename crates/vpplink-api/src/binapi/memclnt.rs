//! Client registration, keepalive and module versions.

use bytes::{Buf, BufMut};

use crate::message::{Message, MessageKind, Reply};
use crate::wire::{need, Bytes, BytesMut, Decode, Encode, FixedStr, Result};
use crate::{message, wire_struct};

/// Message id reserved for `sockclnt_create` before the table is known.
pub const SOCKCLNT_CREATE_MSG_ID: u16 = 15;

/// Registers a socket client. Unlike other requests its header carries no
/// client index.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SockclntCreate {
    pub name: FixedStr<64>,
}

impl Message for SockclntCreate {
    const NAME: &'static str = "sockclnt_create";
    const CRC: &'static str = "455fb9c4";
    const KIND: MessageKind = MessageKind::Request;
}

impl Encode for SockclntCreate {
    fn encode(&self, dst: &mut BytesMut) -> Result<()> {
        self.name.encode(dst)
    }
}

impl Decode for SockclntCreate {
    fn decode(src: &mut Bytes) -> Result<Self> {
        Ok(Self {
            name: FixedStr::decode(src)?,
        })
    }
}

wire_struct! {
    /// One `(id, "name_crc")` row of the engine message table.
    pub struct MessageTableRow {
        pub index: u16,
        pub name: FixedStr<64>,
    }
}

/// Registration result: the client index and the full message table.
///
/// The table length is a `u16` count rather than the usual `u32` prefix.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SockclntCreateReply {
    pub response: i32,
    pub index: u32,
    pub message_table: Vec<MessageTableRow>,
}

impl Message for SockclntCreateReply {
    const NAME: &'static str = "sockclnt_create_reply";
    const CRC: &'static str = "35166268";
    const KIND: MessageKind = MessageKind::Reply;
}

impl Reply for SockclntCreateReply {
    fn retval(&self) -> i32 {
        self.response
    }
}

impl Encode for SockclntCreateReply {
    fn encode(&self, dst: &mut BytesMut) -> Result<()> {
        let count = u16::try_from(self.message_table.len()).map_err(|_| {
            crate::wire::WireError::LengthOverflow(self.message_table.len())
        })?;
        dst.put_i32(self.response);
        dst.put_u32(self.index);
        dst.put_u16(count);
        for row in &self.message_table {
            row.encode(dst)?;
        }
        Ok(())
    }
}

impl Decode for SockclntCreateReply {
    fn decode(src: &mut Bytes) -> Result<Self> {
        need(src, 10)?;
        let response = src.get_i32();
        let index = src.get_u32();
        let count = src.get_u16() as usize;
        let mut message_table = Vec::with_capacity(count.min(src.remaining() / 66 + 1));
        for _ in 0..count {
            message_table.push(MessageTableRow::decode(src)?);
        }
        Ok(Self {
            response,
            index,
            message_table,
        })
    }
}

/// Unregisters a socket client.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SockclntDelete {
    pub index: u32,
}

impl Message for SockclntDelete {
    const NAME: &'static str = "sockclnt_delete";
    const CRC: &'static str = "8ac76db6";
    const KIND: MessageKind = MessageKind::Request;
}

impl Encode for SockclntDelete {
    fn encode(&self, dst: &mut BytesMut) -> Result<()> {
        self.index.encode(dst)
    }
}

impl Decode for SockclntDelete {
    fn decode(src: &mut Bytes) -> Result<Self> {
        Ok(Self {
            index: u32::decode(src)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SockclntDeleteReply {
    pub response: i32,
}

impl Message for SockclntDeleteReply {
    const NAME: &'static str = "sockclnt_delete_reply";
    const CRC: &'static str = "8f38b1ee";
    const KIND: MessageKind = MessageKind::Reply;
}

impl Reply for SockclntDeleteReply {
    fn retval(&self) -> i32 {
        self.response
    }
}

impl Encode for SockclntDeleteReply {
    fn encode(&self, dst: &mut BytesMut) -> Result<()> {
        self.response.encode(dst)
    }
}

impl Decode for SockclntDeleteReply {
    fn decode(src: &mut Bytes) -> Result<Self> {
        Ok(Self {
            response: i32::decode(src)?,
        })
    }
}

impl crate::message::Request for SockclntDelete {
    type Reply = SockclntDeleteReply;
}

message! {
    /// Keepalive; also sent after every dump so its reply ends the stream.
    request ControlPing("control_ping", "51077d14") -> ControlPingReply {}
}

message! {
    terminator ControlPingReply("control_ping_reply", "f6b0b8ca") {
        pub retval: i32,
        pub client_index: u32,
        pub vpe_pid: u32,
    }
}

wire_struct! {
    pub struct ModuleVersion {
        pub major: u32,
        pub minor: u32,
        pub patch: u32,
        pub name: FixedStr<64>,
    }
}

message! {
    request ApiVersions("api_versions", "51077d14") -> ApiVersionsReply {}
}

message! {
    reply ApiVersionsReply("api_versions_reply", "5f0d99d6") {
        pub retval: i32,
        pub api_versions: Vec<ModuleVersion>,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::to_bytes;

    #[test]
    fn create_reply_table_uses_u16_count() {
        let reply = SockclntCreateReply {
            response: 0,
            index: 7,
            message_table: vec![MessageTableRow {
                index: 21,
                name: FixedStr::new("control_ping_51077d14").unwrap(),
            }],
        };

        let encoded = to_bytes(&reply).unwrap();
        assert_eq!(encoded.len(), 4 + 4 + 2 + 2 + 64);
        assert_eq!(&encoded[8..10], &[0, 1]);

        let mut src = encoded;
        let decoded = SockclntCreateReply::decode(&mut src).unwrap();
        assert_eq!(decoded, reply);
        assert_eq!(decoded.retval(), 0);
    }

    #[test]
    fn create_reply_truncated_table_fails() {
        let mut src = Bytes::from_static(&[0, 0, 0, 0, 0, 0, 0, 1, 0, 3, 0, 1]);
        assert!(SockclntCreateReply::decode(&mut src).is_err());
    }
}
