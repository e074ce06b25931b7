//! Unary and streaming exchanges over a [`Channel`].

use std::marker::PhantomData;

use tracing::{debug, trace, warn};

use crate::channel::{Channel, Received, RequestContext};
use crate::error::{ApiError, Result};
use crate::message::{Dump, Message, MessageIdentity, RawMessage, Reply, Request};

/// Run a unary exchange and fail on a non-zero result code.
///
/// The failing reply stays available through [`ApiError::engine_reply`].
pub fn execute<C, Q>(channel: &mut C, request: &Q) -> Result<Q::Reply>
where
    C: Channel + ?Sized,
    Q: Request,
{
    let raw = exchange_unary(channel, request)?;
    let reply = decode::<Q::Reply>(&raw)?;
    match reply.retval() {
        0 => Ok(reply),
        retval => Err(ApiError::Engine {
            message: <Q::Reply as Message>::NAME,
            retval,
            payload: raw.body,
        }),
    }
}

/// Run a unary exchange and return the decoded reply whatever its result
/// code.
pub fn execute_unchecked<C, Q>(channel: &mut C, request: &Q) -> Result<Q::Reply>
where
    C: Channel + ?Sized,
    Q: Request,
{
    decode::<Q::Reply>(&exchange_unary(channel, request)?)
}

fn exchange_unary<C, Q>(channel: &mut C, request: &Q) -> Result<RawMessage>
where
    C: Channel + ?Sized,
    Q: Request,
{
    let context = channel.send_request(encode(request)?)?;
    debug!(message = Q::NAME, context = context.0, "request sent");

    match channel.receive(context)? {
        Received::Message(raw) => Ok(raw),
        Received::End => Err(ApiError::UnexpectedReply {
            expected: MessageIdentity::of::<Q::Reply>().to_string(),
            received: "end of stream".to_string(),
        }),
    }
}

/// Start a dump exchange. Details are pulled lazily from the returned
/// stream, which borrows the channel until it is finished or dropped.
pub fn stream<'a, C, D>(channel: &'a mut C, request: &D) -> Result<DumpStream<'a, C, D::Details>>
where
    C: Channel + ?Sized,
    D: Dump,
{
    let context = channel.send_multi_request(encode(request)?)?;
    debug!(message = D::NAME, context = context.0, "dump sent");

    Ok(DumpStream {
        channel,
        context,
        state: StreamState::Open,
        yielded: 0,
        _details: PhantomData,
    })
}

fn encode<M: Message>(message: &M) -> Result<RawMessage> {
    RawMessage::encode(message).map_err(|source| ApiError::Encode {
        message: M::NAME.to_string(),
        source,
    })
}

fn decode<M: Message>(raw: &RawMessage) -> Result<M> {
    if !raw.is::<M>() {
        return Err(ApiError::UnexpectedReply {
            expected: MessageIdentity::of::<M>().to_string(),
            received: raw.identity.to_string(),
        });
    }
    raw.decode::<M>().map_err(|source| ApiError::Decode {
        message: M::NAME.to_string(),
        source,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StreamState {
    /// More details may follow.
    Open,
    /// An item was rejected but the channel is healthy; the rest of the
    /// dump is still in flight and must be drained.
    Rejected,
    /// Terminator seen or the channel failed; nothing left to read.
    Closed,
}

/// Lazily received details of one dump.
///
/// Yields items in engine emission order. After the terminator the stream
/// returns `None`; after an error it yields that error once and then `None`.
/// Dropping an unfinished stream drains the remaining details so the channel
/// is ready for the next exchange.
pub struct DumpStream<'a, C: Channel + ?Sized, D> {
    channel: &'a mut C,
    context: RequestContext,
    state: StreamState,
    yielded: usize,
    _details: PhantomData<fn() -> D>,
}

impl<C: Channel + ?Sized, D: Message> DumpStream<'_, C, D> {
    /// Stop consuming: drain to the terminator and report how many details
    /// were discarded.
    pub fn cancel(mut self) -> Result<usize> {
        self.drain()
    }

    /// Number of details yielded so far.
    pub fn yielded(&self) -> usize {
        self.yielded
    }

    pub fn is_finished(&self) -> bool {
        self.state == StreamState::Closed
    }

    fn drain(&mut self) -> Result<usize> {
        let mut discarded = 0usize;
        while self.state != StreamState::Closed {
            match self.channel.receive(self.context) {
                Ok(Received::Message(_)) => discarded += 1,
                Ok(Received::End) => self.state = StreamState::Closed,
                Err(err) => {
                    self.state = StreamState::Closed;
                    return Err(err);
                }
            }
        }
        if discarded > 0 {
            debug!(
                message = D::NAME,
                context = self.context.0,
                discarded,
                "drained abandoned dump"
            );
        }
        Ok(discarded)
    }
}

impl<C: Channel + ?Sized, D: Message> Iterator for DumpStream<'_, C, D> {
    type Item = Result<D>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.state != StreamState::Open {
            return None;
        }

        match self.channel.receive(self.context) {
            Ok(Received::Message(raw)) => match decode::<D>(&raw) {
                Ok(item) => {
                    self.yielded += 1;
                    trace!(message = D::NAME, index = self.yielded, "detail received");
                    Some(Ok(item))
                }
                Err(err) => {
                    self.state = StreamState::Rejected;
                    Some(Err(err))
                }
            },
            Ok(Received::End) => {
                self.state = StreamState::Closed;
                debug!(message = D::NAME, count = self.yielded, "dump complete");
                None
            }
            Err(err) => {
                self.state = StreamState::Closed;
                Some(Err(err))
            }
        }
    }
}

impl<C: Channel + ?Sized, D> std::iter::FusedIterator for DumpStream<'_, C, D> where D: Message {}

impl<C: Channel + ?Sized, D> Drop for DumpStream<'_, C, D> {
    fn drop(&mut self) {
        if self.state == StreamState::Closed {
            return;
        }
        let mut discarded = 0usize;
        loop {
            match self.channel.receive(self.context) {
                Ok(Received::Message(_)) => discarded += 1,
                Ok(Received::End) => break,
                Err(err) => {
                    warn!(context = self.context.0, error = %err, "dump drain failed");
                    break;
                }
            }
        }
        self.state = StreamState::Closed;
        if discarded > 0 {
            debug!(context = self.context.0, discarded, "drained dropped dump");
        }
    }
}
