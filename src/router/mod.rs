//! Path-to-handler dispatch.
//!
//! The router keeps two structures side by side: a [`HashTable`] mapping
//! registered path strings (`Text` keys) to handler slot indices (`Int`
//! values), and a dense, append-only array of the handlers themselves.
//! Slots are never removed, so an index stored in the table stays valid for
//! the router's lifetime.
//!
//! Resolution policy: an exact path match wins; an empty path never
//! matches; otherwise the final `/`-delimited segment is stripped and the
//! resulting prefix is looked up exactly once. The fallback is one level
//! deep, not a walk up every ancestor.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tokio::io::AsyncWrite;
use tracing::debug;

use crate::container::ContainerError;
use crate::container::table::HashTable;
use crate::container::value::{Value, ValueKind};
use crate::http::request::Request;

/// Boxed future returned by [`Handler::handle`].
pub type HandlerFuture<'a> = Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send + 'a>>;

/// The connection a handler writes its response to.
pub type ResponseStream = dyn AsyncWrite + Send + Unpin;

/// Capability implemented by anything that can answer a routed request.
pub trait Handler: Send + Sync {
    fn handle<'a>(&'a self, stream: &'a mut ResponseStream, request: &'a Request)
    -> HandlerFuture<'a>;
}

const ROUTE_BUCKETS: usize = 1000;

/// Maps registered paths to handlers.
pub struct Router {
    table: HashTable,
    handlers: Vec<Arc<dyn Handler>>,
}

impl Router {
    pub fn new() -> Result<Self, ContainerError> {
        Ok(Self {
            table: HashTable::new(ROUTE_BUCKETS, ValueKind::Text, ValueKind::Int)?,
            handlers: Vec::new(),
        })
    }

    /// Number of handler slots allocated so far.
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Maps `path` to the next handler slot and stores the handler there.
    ///
    /// Registering a path again points it at the new slot; the previous
    /// slot stays allocated but becomes unreachable.
    pub fn register(
        &mut self,
        path: &str,
        handler: Arc<dyn Handler>,
    ) -> Result<(), ContainerError> {
        let slot = self.handlers.len() as i32;
        self.table.set(Value::text(path), Value::Int(slot))?;
        self.handlers.push(handler);
        debug!("Registered {} -> slot {}", path, slot);
        Ok(())
    }

    /// Resolves a request path to a handler slot, or `None` for a 404.
    ///
    /// Exact matches win. Otherwise an empty path misses outright, and any
    /// other path gets one fallback lookup with its final `/`-delimited
    /// segment stripped (a final `/` at position 0 leaves `/` itself). A
    /// path containing no `/` at all misses.
    pub fn resolve(&self, path: &str) -> Option<usize> {
        if let Some(slot) = self.slot_for(path) {
            return Some(slot);
        }
        if path.is_empty() {
            return None;
        }
        let parent = match path.rfind('/') {
            Some(0) => "/",
            Some(pos) => &path[..pos],
            None => return None,
        };
        self.slot_for(parent)
    }

    /// Invokes the handler in `slot` with the connection and the request.
    pub async fn dispatch(
        &self,
        slot: usize,
        stream: &mut ResponseStream,
        request: &Request,
    ) -> anyhow::Result<()> {
        match self.handlers.get(slot) {
            Some(handler) => handler.handle(stream, request).await,
            None => Err(anyhow::anyhow!("no handler in slot {}", slot)),
        }
    }

    fn slot_for(&self, path: &str) -> Option<usize> {
        match self.table.lookup(&Value::text(path)) {
            Some(Value::Int(slot)) => Some(*slot as usize),
            _ => None,
        }
    }
}
