//! Message framing for the engine's socket transport.
//!
//! Every message on the API socket is preceded by a 16-byte header:
//! - 8 bytes reserved for the shared-memory queue pointer (always zero here)
//! - a 4-byte big-endian payload length
//! - a 4-byte garbage-collection timestamp (always zero here)
//!
//! The payload itself starts with the 2-byte message id; decoding it is the
//! job of `vpplink-api`.

pub mod codec;
pub mod error;
pub mod reader;
pub mod writer;

pub use codec::{decode_frame, encode_frame, Frame, FrameConfig, DEFAULT_MAX_PAYLOAD, HEADER_SIZE};
pub use error::{FrameError, Result};
pub use reader::FrameReader;
pub use writer::FrameWriter;
