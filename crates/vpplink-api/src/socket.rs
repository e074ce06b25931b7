use std::time::{Duration, Instant};

use tracing::{debug, info, warn};
use vpplink_frame::{FrameConfig, FrameError, FrameReader, FrameWriter};
use vpplink_transport::{ApiStream, UnixDomainSocket};

use crate::binapi::check_bindings;
use crate::binapi::memclnt::{ControlPing, ControlPingReply, SockclntDelete, SockclntDeleteReply};
use crate::catalogue::Catalogue;
use crate::channel::{Channel, Received, RequestContext};
use crate::config::ChannelConfig;
use crate::error::{ApiError, Result};
use crate::handshake::register;
use crate::header::{encode_request, split_reply};
use crate::message::{Message, MessageIdentity, RawMessage};
use crate::wire::to_bytes;

/// Upper bound on a single blocking socket read; deadlines are checked
/// between reads.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy)]
struct Pending {
    context: RequestContext,
    multi: bool,
}

/// [`Channel`] over the engine's Unix API socket.
///
/// Connecting registers the client and loads the engine's message table.
/// Each request gets a fresh non-zero context; inbound messages for any
/// other context are stale leftovers and are discarded.
pub struct SocketChannel {
    reader: FrameReader<ApiStream>,
    writer: FrameWriter<ApiStream>,
    catalogue: Catalogue,
    client_index: u32,
    next_context: u32,
    pending: Option<Pending>,
    control_ping: u16,
    control_ping_reply: u16,
    reply_timeout: Duration,
    closed: bool,
}

impl SocketChannel {
    /// Connect to the socket named in `config` and register.
    pub fn connect(config: &ChannelConfig) -> Result<Self> {
        let binapi = check_bindings()?;
        let stream = UnixDomainSocket::connect(&config.socket_path)?;
        let channel = Self::from_stream(stream, config)?;
        info!(
            socket = %config.socket_path.display(),
            client_index = channel.client_index,
            messages = channel.catalogue.len(),
            binapi,
            "connected to engine API"
        );
        Ok(channel)
    }

    /// Register over an already connected stream.
    pub fn from_stream(stream: ApiStream, config: &ChannelConfig) -> Result<Self> {
        let reader_stream = stream.try_clone()?;

        let poll = POLL_INTERVAL
            .min(config.reply_timeout)
            .min(config.handshake_timeout)
            .max(Duration::from_millis(1));
        let frame_config = FrameConfig {
            max_payload_size: config.max_payload_size,
            read_timeout: Some(poll),
            write_timeout: Some(config.reply_timeout.max(Duration::from_millis(1))),
        };

        let mut reader = FrameReader::with_config_api(reader_stream, frame_config.clone())?;
        let mut writer = FrameWriter::with_config_api(stream, frame_config)?;

        let registration = register(
            &mut reader,
            &mut writer,
            &config.client_name,
            config.handshake_timeout,
        )?;

        let lookup = |identity: MessageIdentity| {
            registration.catalogue.id_of(&identity).ok_or_else(|| {
                ApiError::HandshakeFailed(format!("engine does not announce {identity}"))
            })
        };
        let control_ping = lookup(ControlPing::identity())?;
        let control_ping_reply = lookup(ControlPingReply::identity())?;

        Ok(Self {
            reader,
            writer,
            catalogue: registration.catalogue,
            client_index: registration.client_index,
            next_context: 0,
            pending: None,
            control_ping,
            control_ping_reply,
            reply_timeout: config.reply_timeout,
            closed: false,
        })
    }

    /// Message table announced by the engine.
    pub fn catalogue(&self) -> &Catalogue {
        &self.catalogue
    }

    pub fn client_index(&self) -> u32 {
        self.client_index
    }

    /// `(uid, gid, pid)` of the engine process, where the platform reports it.
    pub fn peer_credentials(&self) -> Option<(u32, u32, u32)> {
        self.writer.get_ref().peer_credentials()
    }

    /// Unregister and shut the socket down.
    pub fn close(mut self) -> Result<()> {
        let result = self.unregister(true);
        self.shutdown();
        result
    }

    fn next_context(&mut self) -> RequestContext {
        self.next_context = self.next_context.wrapping_add(1);
        if self.next_context == 0 {
            self.next_context = 1;
        }
        RequestContext(self.next_context)
    }

    fn ensure_open(&self) -> Result<()> {
        if self.closed {
            return Err(ApiError::Disconnected("channel is closed".to_string()));
        }
        Ok(())
    }

    fn write(&mut self, msg_id: u16, context: RequestContext, body: &[u8]) -> Result<()> {
        let payload = encode_request(msg_id, self.client_index, context.0, body);
        // A failed write may have left part of a frame on the socket, so the
        // stream can no longer be trusted.
        self.writer
            .send(&payload)
            .map_err(|err| self.lost_stream("write", err))
    }

    fn send(&mut self, message: &RawMessage, multi: bool) -> Result<RequestContext> {
        self.ensure_open()?;
        let msg_id = self
            .catalogue
            .id_of(&message.identity)
            .ok_or_else(|| ApiError::UnknownMessage(message.identity.to_string()))?;

        if let Some(pending) = self.pending.take() {
            debug!(
                context = pending.context.0,
                "previous exchange abandoned; late replies will be discarded"
            );
        }

        let context = self.next_context();
        self.write(msg_id, context, &message.body)?;
        if multi {
            let ping = self.control_ping;
            self.write(ping, context, &[])?;
        }
        self.pending = Some(Pending { context, multi });
        Ok(context)
    }

    /// Mark the channel unusable after a stream failure. Every later call
    /// returns [`ApiError::Disconnected`].
    fn lost_stream(&mut self, direction: &str, err: FrameError) -> ApiError {
        let reason = match err {
            FrameError::ConnectionClosed => "engine closed the API socket".to_string(),
            err => format!("API socket {direction} failed: {err}"),
        };
        warn!(%reason, "closing engine channel");
        self.shutdown();
        ApiError::Disconnected(reason)
    }

    fn unregister(&mut self, wait: bool) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        let request = SockclntDelete {
            index: self.client_index,
        };
        let identity = SockclntDelete::identity();
        let msg_id = self
            .catalogue
            .id_of(&identity)
            .ok_or_else(|| ApiError::UnknownMessage(identity.to_string()))?;
        let body = to_bytes(&request).map_err(|source| ApiError::Encode {
            message: SockclntDelete::NAME.to_string(),
            source,
        })?;

        let context = self.next_context();
        self.pending = None;
        self.write(msg_id, context, &body)?;
        if wait {
            self.pending = Some(Pending {
                context,
                multi: false,
            });
            match self.receive(context)? {
                Received::Message(raw) if raw.is::<SockclntDeleteReply>() => {}
                Received::Message(raw) => {
                    return Err(ApiError::UnexpectedReply {
                        expected: SockclntDeleteReply::identity().to_string(),
                        received: raw.identity.to_string(),
                    })
                }
                Received::End => {}
            }
        }
        debug!(client_index = self.client_index, "unregistered from engine");
        Ok(())
    }

    fn shutdown(&mut self) {
        self.closed = true;
        self.pending = None;
        let _ = self.writer.get_ref().shutdown();
    }
}

impl Channel for SocketChannel {
    fn send_request(&mut self, message: RawMessage) -> Result<RequestContext> {
        self.send(&message, false)
    }

    fn send_multi_request(&mut self, message: RawMessage) -> Result<RequestContext> {
        self.send(&message, true)
    }

    fn receive(&mut self, context: RequestContext) -> Result<Received> {
        self.ensure_open()?;
        let pending = match self.pending {
            Some(pending) if pending.context == context => pending,
            _ => {
                return Err(ApiError::UnexpectedReply {
                    expected: format!("message for context {}", context.0),
                    received: "no exchange in flight".to_string(),
                })
            }
        };

        let deadline = Instant::now() + self.reply_timeout;
        loop {
            if Instant::now() >= deadline {
                return Err(ApiError::Timeout(self.reply_timeout));
            }

            let frame = match self.reader.read_frame() {
                Ok(frame) => frame,
                Err(err) if err.is_timeout() => continue,
                Err(err) => return Err(self.lost_stream("read", err)),
            };

            let (msg_id, reply_context, body) = split_reply(frame.payload)?;
            if reply_context != context.0 {
                debug!(
                    msg_id,
                    context = reply_context,
                    expected = context.0,
                    "discarding stale message"
                );
                continue;
            }

            if pending.multi && msg_id == self.control_ping_reply {
                self.pending = None;
                return Ok(Received::End);
            }

            let identity = self
                .catalogue
                .identity_of(msg_id)
                .cloned()
                .ok_or(ApiError::UnknownMessageId(msg_id))?;
            if !pending.multi {
                self.pending = None;
            }
            return Ok(Received::Message(RawMessage { identity, body }));
        }
    }
}

impl Drop for SocketChannel {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        if let Err(err) = self.unregister(false) {
            warn!(error = %err, "failed to unregister from engine");
        }
        self.shutdown();
    }
}

impl std::fmt::Debug for SocketChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SocketChannel")
            .field("client_index", &self.client_index)
            .field("messages", &self.catalogue.len())
            .field("pending", &self.pending)
            .field("closed", &self.closed)
            .finish()
    }
}
