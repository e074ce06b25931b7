use std::borrow::Cow;
use std::fmt;

use bytes::Bytes;

use crate::wire::{self, Decode, Encode, WireError};

/// Role of a message in the exchange protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    /// Sent by the client; unary requests and dump requests alike.
    Request,
    /// The single answer to a unary request.
    Reply,
    /// One item of a dump stream.
    Detail,
    /// Marks the end of a dump stream.
    Terminator,
}

/// Wire identity of a message: its name and the CRC of its field layout.
///
/// Rendered `name_crc` in the engine's message table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MessageIdentity {
    name: Cow<'static, str>,
    crc: Cow<'static, str>,
}

impl MessageIdentity {
    pub const fn new(name: &'static str, crc: &'static str) -> Self {
        Self {
            name: Cow::Borrowed(name),
            crc: Cow::Borrowed(crc),
        }
    }

    pub fn owned(name: impl Into<String>, crc: impl Into<String>) -> Self {
        Self {
            name: Cow::Owned(name.into()),
            crc: Cow::Owned(crc.into()),
        }
    }

    /// Identity of a bound message type.
    pub fn of<M: Message>() -> Self {
        Self::new(M::NAME, M::CRC)
    }

    /// Parse a `name_crc` table entry. The CRC must be eight hex digits.
    pub fn parse(entry: &str) -> Option<Self> {
        let entry = entry.trim_end_matches('\0');
        let (name, crc) = entry.rsplit_once('_')?;
        if name.is_empty() || !is_crc(crc) {
            return None;
        }
        Some(Self::owned(name, crc.to_ascii_lowercase()))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn crc(&self) -> &str {
        &self.crc
    }
}

impl fmt::Display for MessageIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.name, self.crc)
    }
}

pub(crate) fn is_crc(crc: &str) -> bool {
    crc.len() == 8 && crc.bytes().all(|b| b.is_ascii_hexdigit())
}

/// A bound message type.
pub trait Message: Encode + Decode + fmt::Debug + Send + 'static {
    const NAME: &'static str;
    const CRC: &'static str;
    const KIND: MessageKind;

    fn identity() -> MessageIdentity {
        MessageIdentity::new(Self::NAME, Self::CRC)
    }
}

/// A unary request and the reply it expects.
pub trait Request: Message {
    type Reply: Reply;
}

/// A dump request and the detail type it streams.
pub trait Dump: Message {
    type Details: Message;
}

/// A reply carrying the engine result code. Zero means success.
pub trait Reply: Message {
    fn retval(&self) -> i32;
}

/// A message body tagged with its identity, without transport header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMessage {
    pub identity: MessageIdentity,
    pub body: Bytes,
}

impl RawMessage {
    /// Encode a typed message.
    pub fn encode<M: Message>(message: &M) -> Result<Self, WireError> {
        Ok(Self {
            identity: M::identity(),
            body: wire::to_bytes(message)?,
        })
    }

    /// Decode the body as `M`. Trailing bytes appended by newer engines are
    /// ignored.
    pub fn decode<M: Message>(&self) -> Result<M, WireError> {
        let mut body = self.body.clone();
        M::decode(&mut body)
    }

    pub fn is<M: Message>(&self) -> bool {
        self.identity.name() == M::NAME && self.identity.crc() == M::CRC
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_table_entry() {
        let id = MessageIdentity::parse("sw_interface_dump_aa610c27").unwrap();
        assert_eq!(id.name(), "sw_interface_dump");
        assert_eq!(id.crc(), "aa610c27");
        assert_eq!(id, MessageIdentity::new("sw_interface_dump", "aa610c27"));
        assert_eq!(id.to_string(), "sw_interface_dump_aa610c27");
    }

    #[test]
    fn parse_trims_padding_and_normalizes_case() {
        let id = MessageIdentity::parse("control_ping_51077D14\0\0\0").unwrap();
        assert_eq!(id.crc(), "51077d14");
    }

    #[test]
    fn parse_rejects_malformed_entries() {
        assert!(MessageIdentity::parse("noseparator").is_none());
        assert!(MessageIdentity::parse("_51077d14").is_none());
        assert!(MessageIdentity::parse("control_ping_xyz").is_none());
        assert!(MessageIdentity::parse("control_ping_51077d1").is_none());
    }
}
