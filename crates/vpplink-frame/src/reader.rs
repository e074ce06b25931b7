use std::io::{ErrorKind, Read};

use bytes::BytesMut;

use crate::codec::{decode_frame, Frame, FrameConfig};
use crate::error::{FrameError, Result};

const INITIAL_BUFFER_CAPACITY: usize = 8 * 1024;
const READ_CHUNK_SIZE: usize = 8 * 1024;

/// Reads complete frames from any `Read` stream.
///
/// Partial reads are buffered internally; bytes of a frame interrupted by a
/// read timeout are kept and completed on the next call.
pub struct FrameReader<T> {
    inner: T,
    buf: BytesMut,
    config: FrameConfig,
}

impl<T: Read> FrameReader<T> {
    /// Create a new frame reader with default configuration.
    pub fn new(inner: T) -> Self {
        Self::with_config(inner, FrameConfig::default())
    }

    /// Create a new frame reader with explicit configuration.
    pub fn with_config(inner: T, config: FrameConfig) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(INITIAL_BUFFER_CAPACITY),
            config,
        }
    }

    /// Read the next complete frame (blocking).
    ///
    /// Returns `Err(FrameError::ConnectionClosed)` when EOF is reached and
    /// `Err(FrameError::Io)` with `WouldBlock`/`TimedOut` when the socket read
    /// timeout fires.
    pub fn read_frame(&mut self) -> Result<Frame> {
        loop {
            if let Some(frame) = decode_frame(&mut self.buf, self.config.max_payload_size)? {
                return Ok(frame);
            }

            let mut chunk = [0u8; READ_CHUNK_SIZE];
            let read = match self.inner.read(&mut chunk) {
                Ok(n) => n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(FrameError::Io(err)),
            };

            if read == 0 {
                return Err(FrameError::ConnectionClosed);
            }

            self.buf.extend_from_slice(&chunk[..read]);
        }
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Current frame reader configuration.
    pub fn config(&self) -> &FrameConfig {
        &self.config
    }
}

#[cfg(unix)]
impl FrameReader<vpplink_transport::ApiStream> {
    /// Create a frame reader for an API socket and apply its read timeout.
    pub fn with_config_api(
        inner: vpplink_transport::ApiStream,
        config: FrameConfig,
    ) -> Result<Self> {
        inner
            .set_read_timeout(config.read_timeout)
            .map_err(transport_to_frame_error)?;
        Ok(Self::with_config(inner, config))
    }
}

pub(crate) fn transport_to_frame_error(err: vpplink_transport::TransportError) -> FrameError {
    match err {
        vpplink_transport::TransportError::Io(io)
        | vpplink_transport::TransportError::Accept(io) => FrameError::Io(io),
        vpplink_transport::TransportError::Bind { source, .. }
        | vpplink_transport::TransportError::Connect { source, .. } => FrameError::Io(source),
        other => FrameError::Io(std::io::Error::other(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use bytes::{BufMut, BytesMut};

    use super::*;
    use crate::codec::{encode_frame, HEADER_SIZE};

    fn wire(payloads: &[&[u8]]) -> Vec<u8> {
        let mut buf = BytesMut::new();
        for payload in payloads {
            encode_frame(payload, &mut buf).unwrap();
        }
        buf.to_vec()
    }

    #[test]
    fn read_frames_in_order() {
        let mut reader = FrameReader::new(Cursor::new(wire(&[b"\x00\x01one", b"\x00\x02two"])));

        let first = reader.read_frame().unwrap();
        let second = reader.read_frame().unwrap();
        assert_eq!(first.msg_id(), Some(1));
        assert_eq!(&first.payload[2..], b"one");
        assert_eq!(second.msg_id(), Some(2));
    }

    #[test]
    fn partial_reads_are_reassembled() {
        let reader = ByteByByteReader {
            bytes: wire(&[b"\x00\x07slow"]),
            pos: 0,
        };
        let mut reader = FrameReader::new(reader);

        let frame = reader.read_frame().unwrap();
        assert_eq!(frame.msg_id(), Some(7));
        assert_eq!(&frame.payload[2..], b"slow");
    }

    #[test]
    fn eof_is_connection_closed() {
        let mut reader = FrameReader::new(Cursor::new(Vec::<u8>::new()));
        assert!(matches!(
            reader.read_frame(),
            Err(FrameError::ConnectionClosed)
        ));
    }

    #[test]
    fn eof_mid_frame_is_connection_closed() {
        let mut partial = BytesMut::new();
        partial.put_u64(0);
        partial.put_u32(32);
        partial.put_u32(0);
        partial.put_slice(b"only-part");

        let mut reader = FrameReader::new(Cursor::new(partial.to_vec()));
        assert!(matches!(
            reader.read_frame(),
            Err(FrameError::ConnectionClosed)
        ));
    }

    #[test]
    fn oversized_frame_rejected() {
        let cfg = FrameConfig {
            max_payload_size: 4,
            ..FrameConfig::default()
        };
        let mut reader = FrameReader::with_config(Cursor::new(wire(&[b"too large"])), cfg);
        assert!(matches!(
            reader.read_frame(),
            Err(FrameError::PayloadTooLarge { size: 9, max: 4 })
        ));
    }

    #[test]
    fn timeout_keeps_buffered_bytes() {
        let bytes = wire(&[b"\x00\x03late"]);
        let reader = StallingReader {
            first: bytes[..HEADER_SIZE].to_vec(),
            rest: bytes[HEADER_SIZE..].to_vec(),
            state: 0,
        };
        let mut reader = FrameReader::new(reader);

        let err = reader.read_frame().unwrap_err();
        assert!(err.is_timeout());

        let frame = reader.read_frame().unwrap();
        assert_eq!(frame.msg_id(), Some(3));
    }

    #[test]
    fn roundtrip_over_socketpair() {
        let (left, right) = std::os::unix::net::UnixStream::pair().unwrap();
        let mut writer = crate::writer::FrameWriter::new(left);
        let mut reader = FrameReader::new(right);

        writer.send(b"\x00\x0fping").unwrap();
        let frame = reader.read_frame().unwrap();
        assert_eq!(frame.msg_id(), Some(15));
    }

    #[test]
    fn api_stream_read_timeout_applied() {
        let (left, _right) = std::os::unix::net::UnixStream::pair().unwrap();
        let stream = vpplink_transport::ApiStream::from_connected(left);
        let cfg = FrameConfig {
            read_timeout: Some(std::time::Duration::from_millis(10)),
            ..FrameConfig::default()
        };

        let mut reader = FrameReader::with_config_api(stream, cfg).unwrap();
        assert!(reader.read_frame().unwrap_err().is_timeout());
    }

    struct ByteByByteReader {
        bytes: Vec<u8>,
        pos: usize,
    }

    impl Read for ByteByByteReader {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if self.pos >= self.bytes.len() || buf.is_empty() {
                return Ok(0);
            }
            buf[0] = self.bytes[self.pos];
            self.pos += 1;
            Ok(1)
        }
    }

    struct StallingReader {
        first: Vec<u8>,
        rest: Vec<u8>,
        state: u8,
    }

    impl Read for StallingReader {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            self.state += 1;
            let src = match self.state {
                1 => std::mem::take(&mut self.first),
                2 => return Err(std::io::Error::from(ErrorKind::WouldBlock)),
                3 => std::mem::take(&mut self.rest),
                _ => return Ok(0),
            };
            buf[..src.len()].copy_from_slice(&src);
            Ok(src.len())
        }
    }
}
