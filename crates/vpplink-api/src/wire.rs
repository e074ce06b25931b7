//! Big-endian wire primitives used by the message bindings.

use std::fmt;

use bytes::{Buf, BufMut};
pub use bytes::{Bytes, BytesMut};

/// Errors produced while encoding or decoding message bodies.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WireError {
    /// The body ended before the field was complete.
    #[error("truncated body: needed {needed} bytes, {remaining} remaining")]
    Truncated { needed: usize, remaining: usize },

    /// A string field is longer than its fixed-width slot allows.
    #[error("string of {len} bytes does not fit in a {max}-byte field")]
    TooLong { len: usize, max: usize },

    /// A string field contains an interior NUL byte.
    #[error("string contains a NUL byte")]
    InteriorNul,

    /// A string field is not valid UTF-8.
    #[error("string is not valid UTF-8")]
    InvalidUtf8,

    /// An enum field carries a value outside its declared set.
    #[error("invalid value {value} for enum {name}")]
    InvalidEnum { name: &'static str, value: u64 },

    /// A variable-length field declares more elements than fit on the wire.
    #[error("length {0} exceeds the u32 length prefix")]
    LengthOverflow(usize),
}

pub type Result<T> = std::result::Result<T, WireError>;

/// Serialize a value into its wire form.
pub trait Encode {
    fn encode(&self, dst: &mut BytesMut) -> Result<()>;
}

/// Deserialize a value from the front of `src`, consuming its bytes.
pub trait Decode: Sized {
    fn decode(src: &mut Bytes) -> Result<Self>;
}

/// Encode a value into a fresh buffer.
pub fn to_bytes<T: Encode + ?Sized>(value: &T) -> Result<Bytes> {
    let mut buf = BytesMut::new();
    value.encode(&mut buf)?;
    Ok(buf.freeze())
}

pub(crate) fn need(src: &Bytes, needed: usize) -> Result<()> {
    if src.remaining() < needed {
        return Err(WireError::Truncated {
            needed,
            remaining: src.remaining(),
        });
    }
    Ok(())
}

macro_rules! wire_int {
    ($($ty:ty => $put:ident, $get:ident;)*) => {
        $(
            impl Encode for $ty {
                fn encode(&self, dst: &mut BytesMut) -> Result<()> {
                    dst.$put(*self);
                    Ok(())
                }
            }

            impl Decode for $ty {
                fn decode(src: &mut Bytes) -> Result<Self> {
                    need(src, std::mem::size_of::<$ty>())?;
                    Ok(src.$get())
                }
            }
        )*
    };
}

wire_int! {
    u8 => put_u8, get_u8;
    i8 => put_i8, get_i8;
    u16 => put_u16, get_u16;
    i16 => put_i16, get_i16;
    u32 => put_u32, get_u32;
    i32 => put_i32, get_i32;
    u64 => put_u64, get_u64;
    i64 => put_i64, get_i64;
    f64 => put_f64, get_f64;
}

impl Encode for bool {
    fn encode(&self, dst: &mut BytesMut) -> Result<()> {
        dst.put_u8(u8::from(*self));
        Ok(())
    }
}

impl Decode for bool {
    fn decode(src: &mut Bytes) -> Result<Self> {
        Ok(u8::decode(src)? != 0)
    }
}

impl<const N: usize> Encode for [u8; N] {
    fn encode(&self, dst: &mut BytesMut) -> Result<()> {
        dst.put_slice(self);
        Ok(())
    }
}

impl<const N: usize> Decode for [u8; N] {
    fn decode(src: &mut Bytes) -> Result<Self> {
        need(src, N)?;
        let mut out = [0u8; N];
        src.copy_to_slice(&mut out);
        Ok(out)
    }
}

/// Variable-length string: u32 length prefix, no terminator.
impl Encode for String {
    fn encode(&self, dst: &mut BytesMut) -> Result<()> {
        let len = u32::try_from(self.len()).map_err(|_| WireError::LengthOverflow(self.len()))?;
        dst.put_u32(len);
        dst.put_slice(self.as_bytes());
        Ok(())
    }
}

impl Decode for String {
    fn decode(src: &mut Bytes) -> Result<Self> {
        let len = u32::decode(src)? as usize;
        need(src, len)?;
        let raw = src.split_to(len);
        String::from_utf8(raw.to_vec()).map_err(|_| WireError::InvalidUtf8)
    }
}

/// Variable-length array: u32 element count followed by the elements.
impl<T: Encode> Encode for Vec<T> {
    fn encode(&self, dst: &mut BytesMut) -> Result<()> {
        let count =
            u32::try_from(self.len()).map_err(|_| WireError::LengthOverflow(self.len()))?;
        dst.put_u32(count);
        for item in self {
            item.encode(dst)?;
        }
        Ok(())
    }
}

impl<T: Decode> Decode for Vec<T> {
    fn decode(src: &mut Bytes) -> Result<Self> {
        let count = u32::decode(src)? as usize;
        let mut out = Vec::with_capacity(count.min(src.remaining()));
        for _ in 0..count {
            out.push(T::decode(src)?);
        }
        Ok(out)
    }
}

/// A string carried in a fixed `N`-byte, zero-padded slot.
///
/// At most `N - 1` bytes are accepted so the engine always finds a NUL
/// terminator. Construction fails instead of truncating.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct FixedStr<const N: usize>(String);

impl<const N: usize> FixedStr<N> {
    /// Largest string length the slot can carry.
    pub const MAX_LEN: usize = N - 1;

    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        if value.len() > Self::MAX_LEN {
            return Err(WireError::TooLong {
                len: value.len(),
                max: Self::MAX_LEN,
            });
        }
        if value.as_bytes().contains(&0) {
            return Err(WireError::InteriorNul);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<const N: usize> Default for FixedStr<N> {
    fn default() -> Self {
        Self(String::new())
    }
}

impl<const N: usize> fmt::Debug for FixedStr<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl<const N: usize> fmt::Display for FixedStr<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<const N: usize> TryFrom<&str> for FixedStr<N> {
    type Error = WireError;

    fn try_from(value: &str) -> Result<Self> {
        Self::new(value)
    }
}

impl<const N: usize> Encode for FixedStr<N> {
    fn encode(&self, dst: &mut BytesMut) -> Result<()> {
        let bytes = self.0.as_bytes();
        dst.put_slice(bytes);
        dst.put_bytes(0, N - bytes.len());
        Ok(())
    }
}

impl<const N: usize> Decode for FixedStr<N> {
    fn decode(src: &mut Bytes) -> Result<Self> {
        need(src, N)?;
        let raw = src.split_to(N);
        let end = raw.iter().position(|&b| b == 0).unwrap_or(N);
        let text = std::str::from_utf8(&raw[..end]).map_err(|_| WireError::InvalidUtf8)?;
        Ok(Self(text.to_string()))
    }
}
