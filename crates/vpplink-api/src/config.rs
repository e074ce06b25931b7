use std::path::PathBuf;
use std::time::Duration;

use vpplink_frame::DEFAULT_MAX_PAYLOAD;
use vpplink_transport::DEFAULT_API_SOCKET;

/// Connection settings for [`SocketChannel`](crate::SocketChannel).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelConfig {
    /// Engine API socket.
    pub socket_path: PathBuf,
    /// Name registered with the engine; at most 63 bytes.
    pub client_name: String,
    /// Longest wait for any single reply or detail.
    pub reply_timeout: Duration,
    /// Longest wait for the registration reply.
    pub handshake_timeout: Duration,
    /// Largest accepted frame payload.
    pub max_payload_size: usize,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            socket_path: PathBuf::from(DEFAULT_API_SOCKET),
            client_name: "vpplink".to_string(),
            reply_timeout: Duration::from_secs(5),
            handshake_timeout: Duration::from_secs(5),
            max_payload_size: DEFAULT_MAX_PAYLOAD,
        }
    }
}
