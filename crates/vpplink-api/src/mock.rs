//! In-process [`Channel`] that answers from registered handlers.
//!
//! Used by tests of code layered on the exchange protocol. Handlers see the
//! decoded request and return typed replies or details; everything still
//! passes through the wire encoding.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use crate::channel::{Channel, Received, RequestContext};
use crate::error::{ApiError, Result};
use crate::message::{Dump, Message, MessageIdentity, RawMessage, Request};

type UnaryHandler = Box<dyn FnMut(&RawMessage) -> Result<RawMessage> + Send>;
type DumpHandler = Box<dyn FnMut(&RawMessage) -> Result<Vec<RawMessage>> + Send>;

enum Step {
    Deliver(Received),
    Disconnect,
}

/// Record of what the mock saw, shared with every [`MockLog`] handle.
#[derive(Debug, Default)]
struct Journal {
    sent: Vec<String>,
    overlaps: usize,
}

/// Cloneable view of the requests a [`MockChannel`] received.
#[derive(Debug, Clone, Default)]
pub struct MockLog(Arc<Mutex<Journal>>);

impl MockLog {
    fn lock(&self) -> MutexGuard<'_, Journal> {
        self.0.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Names of the requests sent, in order.
    pub fn sent(&self) -> Vec<String> {
        self.lock().sent.clone()
    }

    /// How many times `name` was sent.
    pub fn count(&self, name: &str) -> usize {
        self.lock().sent.iter().filter(|sent| *sent == name).count()
    }

    /// Requests sent while a previous exchange was still unfinished.
    pub fn overlaps(&self) -> usize {
        self.lock().overlaps
    }
}

/// Scripted engine stand-in.
#[derive(Default)]
pub struct MockChannel {
    unary: HashMap<MessageIdentity, UnaryHandler>,
    dumps: HashMap<MessageIdentity, DumpHandler>,
    queue: VecDeque<Step>,
    current: Option<RequestContext>,
    next_context: u32,
    disconnect_after: Option<usize>,
    log: MockLog,
}

impl MockChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer requests of type `Q` with `handler`.
    pub fn on<Q, F>(self, mut handler: F) -> Self
    where
        Q: Request,
        F: FnMut(Q) -> Q::Reply + Send + 'static,
    {
        self.on_raw(Q::identity(), move |raw| {
            let request = decode_request::<Q>(raw)?;
            encode_response(&handler(request))
        })
    }

    /// Answer requests with `identity` at the raw message level.
    pub fn on_raw<F>(mut self, identity: MessageIdentity, handler: F) -> Self
    where
        F: FnMut(&RawMessage) -> Result<RawMessage> + Send + 'static,
    {
        self.unary.insert(identity, Box::new(handler));
        self
    }

    /// Answer dumps of type `D` with the details `handler` returns.
    pub fn on_dump<D, F>(self, mut handler: F) -> Self
    where
        D: Dump,
        F: FnMut(D) -> Vec<D::Details> + Send + 'static,
    {
        self.on_dump_raw(D::identity(), move |raw| {
            let request = decode_request::<D>(raw)?;
            handler(request).iter().map(encode_response).collect()
        })
    }

    /// Answer dumps with `identity` at the raw message level.
    pub fn on_dump_raw<F>(mut self, identity: MessageIdentity, handler: F) -> Self
    where
        F: FnMut(&RawMessage) -> Result<Vec<RawMessage>> + Send + 'static,
    {
        self.dumps.insert(identity, Box::new(handler));
        self
    }

    /// Make the next dump fail with [`ApiError::Disconnected`] after
    /// `items` details.
    pub fn disconnect_next_dump_after(mut self, items: usize) -> Self {
        self.disconnect_after = Some(items);
        self
    }

    /// Handle on the request journal; stays valid after the channel moves.
    pub fn log(&self) -> MockLog {
        self.log.clone()
    }

    fn begin(&mut self, identity: &MessageIdentity) -> RequestContext {
        {
            let mut journal = self.log.lock();
            if !self.queue.is_empty() {
                journal.overlaps += 1;
            }
            journal.sent.push(identity.name().to_string());
        }
        self.queue.clear();
        self.next_context = self.next_context.wrapping_add(1).max(1);
        let context = RequestContext(self.next_context);
        self.current = Some(context);
        context
    }
}

impl Channel for MockChannel {
    fn send_request(&mut self, message: RawMessage) -> Result<RequestContext> {
        let handler = self
            .unary
            .get_mut(&message.identity)
            .ok_or_else(|| ApiError::UnknownMessage(message.identity.to_string()))?;
        let reply = handler(&message)?;

        let context = self.begin(&message.identity);
        self.queue.push_back(Step::Deliver(Received::Message(reply)));
        Ok(context)
    }

    fn send_multi_request(&mut self, message: RawMessage) -> Result<RequestContext> {
        let handler = self
            .dumps
            .get_mut(&message.identity)
            .ok_or_else(|| ApiError::UnknownMessage(message.identity.to_string()))?;
        let details = handler(&message)?;

        let context = self.begin(&message.identity);
        match self.disconnect_after.take() {
            Some(limit) => {
                self.queue.extend(
                    details
                        .into_iter()
                        .take(limit)
                        .map(|raw| Step::Deliver(Received::Message(raw))),
                );
                self.queue.push_back(Step::Disconnect);
            }
            None => {
                self.queue.extend(
                    details
                        .into_iter()
                        .map(|raw| Step::Deliver(Received::Message(raw))),
                );
                self.queue.push_back(Step::Deliver(Received::End));
            }
        }
        Ok(context)
    }

    fn receive(&mut self, context: RequestContext) -> Result<Received> {
        if self.current != Some(context) {
            return Err(ApiError::UnexpectedReply {
                expected: format!("message for context {}", context.0),
                received: "no exchange in flight".to_string(),
            });
        }
        match self.queue.pop_front() {
            Some(Step::Deliver(received)) => Ok(received),
            Some(Step::Disconnect) => {
                self.queue.clear();
                Err(ApiError::Disconnected("mock engine went away".to_string()))
            }
            None => Err(ApiError::Timeout(Duration::ZERO)),
        }
    }
}

impl std::fmt::Debug for MockChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockChannel")
            .field("unary", &self.unary.len())
            .field("dumps", &self.dumps.len())
            .field("queued", &self.queue.len())
            .finish()
    }
}

fn decode_request<M: Message>(raw: &RawMessage) -> Result<M> {
    raw.decode::<M>().map_err(|source| ApiError::Decode {
        message: M::NAME.to_string(),
        source,
    })
}

fn encode_response<M: Message>(message: &M) -> Result<RawMessage> {
    RawMessage::encode(message).map_err(|source| ApiError::Encode {
        message: M::NAME.to_string(),
        source,
    })
}
