use crate::error::Result;
use crate::message::RawMessage;

/// Correlation token for one exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestContext(pub u32);

/// What a channel delivered for an exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Received {
    /// The reply, or one detail of a dump.
    Message(RawMessage),
    /// The dump terminator; no more messages follow for this context.
    End,
}

/// A connection to the engine able to run one exchange at a time.
///
/// Callers must drive an exchange to completion (the reply, or `End` for a
/// dump) before sending the next request. Messages still in flight for an
/// abandoned context are discarded by the channel.
pub trait Channel: Send {
    /// Send a request expecting exactly one reply.
    fn send_request(&mut self, message: RawMessage) -> Result<RequestContext>;

    /// Send a dump request; details follow until [`Received::End`].
    fn send_multi_request(&mut self, message: RawMessage) -> Result<RequestContext>;

    /// Block until the next message of `context` arrives.
    fn receive(&mut self, context: RequestContext) -> Result<Received>;
}

impl<C: Channel + ?Sized> Channel for Box<C> {
    fn send_request(&mut self, message: RawMessage) -> Result<RequestContext> {
        (**self).send_request(message)
    }

    fn send_multi_request(&mut self, message: RawMessage) -> Result<RequestContext> {
        (**self).send_multi_request(message)
    }

    fn receive(&mut self, context: RequestContext) -> Result<Received> {
        (**self).receive(context)
    }
}
