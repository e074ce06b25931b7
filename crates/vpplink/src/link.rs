use std::sync::{Mutex, MutexGuard};

use tracing::{debug, warn};
use vpplink_api::{execute, stream, ApiError, Channel, ChannelConfig, Dump, Request, SocketChannel};

use crate::error::{Result, VppError};

/// Serialized access to one engine connection.
///
/// Every verb holds the channel lock for its whole exchange, dump drains
/// included, so concurrent callers never interleave on the wire. Calls are
/// totally ordered by lock acquisition.
pub struct VppLink<C: Channel = SocketChannel> {
    channel: Mutex<C>,
}

impl VppLink<SocketChannel> {
    /// Connect to the engine socket named in `config` and register.
    pub fn connect(config: &ChannelConfig) -> Result<Self> {
        let channel = SocketChannel::connect(config).map_err(api_error("connect"))?;
        Ok(Self::new(channel))
    }

    /// Unregister from the engine and close the socket.
    pub fn close(self) -> Result<()> {
        self.into_inner().close().map_err(api_error("close"))
    }
}

impl<C: Channel> VppLink<C> {
    pub fn new(channel: C) -> Self {
        Self {
            channel: Mutex::new(channel),
        }
    }

    pub fn into_inner(self) -> C {
        self.channel
            .into_inner()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Run `f` with exclusive access to the channel.
    pub fn with_channel<R>(&self, f: impl FnOnce(&mut C) -> R) -> R {
        let mut channel = self.lock();
        f(&mut channel)
    }

    pub(crate) fn lock(&self) -> MutexGuard<'_, C> {
        match self.channel.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                // A panicking holder may have left a dump unread; the channel
                // discards messages for stale contexts on the next exchange.
                warn!("recovering poisoned channel lock");
                poisoned.into_inner()
            }
        }
    }

    /// One unary exchange under the lock.
    pub(crate) fn call<Q: Request>(
        &self,
        operation: &'static str,
        request: &Q,
        attempted: impl FnOnce() -> String,
    ) -> Result<Q::Reply> {
        let mut channel = self.lock();
        exchange(&mut *channel, operation, request, attempted)
    }

    /// Drain a whole dump under the lock, keeping the items `keep` maps to
    /// `Some`.
    pub(crate) fn collect<D, T>(
        &self,
        operation: &'static str,
        request: &D,
        mut keep: impl FnMut(D::Details) -> Option<T>,
    ) -> Result<Vec<T>>
    where
        D: Dump,
    {
        let mut channel = self.lock();
        let details = stream(&mut *channel, request).map_err(api_error(operation))?;

        let mut kept = Vec::new();
        for item in details {
            if let Some(value) = keep(item.map_err(api_error(operation))?) {
                kept.push(value);
            }
        }
        debug!(operation, count = kept.len(), "dump collected");
        Ok(kept)
    }
}

impl<C: Channel + std::fmt::Debug> std::fmt::Debug for VppLink<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.channel.try_lock() {
            Ok(channel) => f.debug_struct("VppLink").field("channel", &*channel).finish(),
            Err(_) => f.debug_struct("VppLink").field("channel", &"<busy>").finish(),
        }
    }
}

/// Run one unary exchange on an already locked channel.
pub(crate) fn exchange<C, Q>(
    channel: &mut C,
    operation: &'static str,
    request: &Q,
    attempted: impl FnOnce() -> String,
) -> Result<Q::Reply>
where
    C: Channel + ?Sized,
    Q: Request,
{
    match execute(channel, request) {
        Ok(reply) => Ok(reply),
        Err(ApiError::Engine { retval, .. }) => {
            let attempted = attempted();
            debug!(operation, retval, %attempted, "engine refused request");
            Err(VppError::Engine {
                operation,
                retval,
                attempted,
            })
        }
        Err(source) => Err(VppError::Api { operation, source }),
    }
}

pub(crate) fn api_error(operation: &'static str) -> impl Fn(ApiError) -> VppError {
    move |source| VppError::Api { operation, source }
}
