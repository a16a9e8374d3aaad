//! In-process event and request bus.
//!
//! `Comms` (short for communications) lets independently created components
//! coordinate without holding references to one another. It carries two
//! protocols over one registry:
//!
//! - **Events**: 1-to-many, fire-and-forget. [`Comms::publish`] runs every
//!   handler registered for the event's [`Topic`] synchronously, in
//!   registration order, each receiving the same payload reference.
//! - **Requests**: 1-to-1 queries. At most one responder per
//!   [`RequestKind`]; [`Comms::request`] returns `None` when nobody answers,
//!   which callers treat as a normal outcome.
//!
//! ## Backlog and replay
//!
//! An event published to a topic with no handlers is not dropped. It is
//! appended to that topic's backlog, and the next [`Comms::subscribe`] for the
//! topic receives every queued payload, in publish order, before `subscribe`
//! returns. The backlog is then empty. This lets a component publish during
//! startup before its consumer exists:
//!
//! ```text
//! publish(AddProject("Work"))     no handlers -> backlog [AddProject("Work")]
//! subscribe(AddProject, manager)  handler registered, backlog replayed, cleared
//! publish(AddProject("Home"))     delivered directly, nothing queued
//! ```
//!
//! Removing every handler of a topic leaves its backlog untouched.
//!
//! ## Re-entrancy
//!
//! No lock is held while a handler or responder runs, so handlers may publish,
//! subscribe or issue requests themselves. Causal chains started this way are
//! the only cross-topic ordering guarantee.

pub mod topics;

pub use topics::{Event, Request, RequestKind, Response, Topic};

use crate::libs::messages::Message;
use crate::{msg_debug, msg_warning};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

pub type Handler = Arc<dyn Fn(&Event) + Send + Sync>;
pub type Responder = Arc<dyn Fn(&Request) -> Option<Response> + Send + Sync>;

/// Identifies one subscription so it can be removed on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

#[derive(Default)]
struct Registry {
    handlers: HashMap<Topic, Vec<(SubscriptionId, Handler)>>,
    backlog: HashMap<Topic, Vec<Event>>,
    responders: HashMap<RequestKind, Responder>,
    next_subscription: u64,
}

#[derive(Default)]
pub struct Comms {
    registry: Mutex<Registry>,
}

impl Comms {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` for `topic` and replays any backlog into it.
    pub fn subscribe<F>(&self, topic: Topic, handler: F) -> SubscriptionId
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        let handler: Handler = Arc::new(handler);

        let (id, pending) = {
            let mut registry = self.registry.lock();
            let id = SubscriptionId(registry.next_subscription);
            registry.next_subscription += 1;
            registry.handlers.entry(topic).or_default().push((id, Arc::clone(&handler)));
            (id, registry.backlog.remove(&topic).unwrap_or_default())
        };

        if !pending.is_empty() {
            msg_debug!(Message::BusReplayingBacklog(topic.to_string(), pending.len()));
        }
        for event in &pending {
            handler(event);
        }

        id
    }

    /// Removes one handler, or every handler of the topic when `id` is `None`.
    pub fn unsubscribe(&self, topic: Topic, id: Option<SubscriptionId>) {
        let mut registry = self.registry.lock();
        match id {
            Some(id) => {
                if let Some(handlers) = registry.handlers.get_mut(&topic) {
                    handlers.retain(|(existing, _)| *existing != id);
                    if handlers.is_empty() {
                        registry.handlers.remove(&topic);
                    }
                }
            }
            None => {
                registry.handlers.remove(&topic);
            }
        }
    }

    pub fn publish(&self, event: Event) {
        let topic = event.topic();

        let handlers: Vec<Handler> = {
            let mut registry = self.registry.lock();
            let handlers: Vec<Handler> = registry
                .handlers
                .get(&topic)
                .map(|handlers| handlers.iter().map(|(_, handler)| Arc::clone(handler)).collect())
                .unwrap_or_default();

            if handlers.is_empty() {
                msg_debug!(Message::BusEventQueued(topic.to_string()));
                registry.backlog.entry(topic).or_default().push(event);
                return;
            }
            handlers
        };

        for handler in handlers {
            handler(&event);
        }
    }

    /// Installs the single responder for `kind`.
    ///
    /// Returns `false` and leaves the existing responder in place when one is
    /// already registered.
    pub fn register_responder<F>(&self, kind: RequestKind, responder: F) -> bool
    where
        F: Fn(&Request) -> Option<Response> + Send + Sync + 'static,
    {
        let mut registry = self.registry.lock();
        if registry.responders.contains_key(&kind) {
            drop(registry);
            msg_warning!(Message::ResponderAlreadyRegistered(kind.to_string()));
            return false;
        }
        registry.responders.insert(kind, Arc::new(responder));
        true
    }

    pub fn unregister_responder(&self, kind: RequestKind) {
        self.registry.lock().responders.remove(&kind);
    }

    /// Asks the responder registered for the request's kind.
    ///
    /// `None` means no responder exists (or it declined); this is an expected
    /// outcome, not a fault.
    pub fn request(&self, request: &Request) -> Option<Response> {
        let kind = request.kind();
        let responder = self.registry.lock().responders.get(&kind).cloned();

        match responder {
            Some(responder) => responder(request),
            None => {
                msg_warning!(Message::NoResponder(kind.to_string()));
                None
            }
        }
    }

    pub fn subscriber_count(&self, topic: Topic) -> usize {
        self.registry.lock().handlers.get(&topic).map_or(0, Vec::len)
    }

    pub fn backlog_len(&self, topic: Topic) -> usize {
        self.registry.lock().backlog.get(&topic).map_or(0, Vec::len)
    }

    pub fn has_responder(&self, kind: RequestKind) -> bool {
        self.registry.lock().responders.contains_key(&kind)
    }
}

impl fmt::Debug for Comms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registry = self.registry.lock();
        f.debug_struct("Comms")
            .field("topics", &registry.handlers.len())
            .field("backlogged_topics", &registry.backlog.len())
            .field("responders", &registry.responders.len())
            .finish()
    }
}
