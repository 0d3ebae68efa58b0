//! Client request filter port
//!
//! Filters run before a request is handed to the client transport. They may
//! inspect and modify the outgoing request through [`ClientRequestContext`]
//! or abort it with a status.

use std::io;
use std::sync::Arc;

use url::Url;

use crate::constants::PRIORITY_USER;
use crate::value_objects::Status;

/// Mutable view of an outgoing client request, supplied by the runtime
pub trait ClientRequestContext {
    /// Request method, e.g. `GET`
    fn method(&self) -> &str;

    /// Request target
    fn uri(&self) -> &Url;

    /// Replace the request target
    fn set_uri(&mut self, uri: Url);

    /// First value of a request header
    fn header(&self, name: &str) -> Option<&str>;

    /// Set a request header, replacing any existing values
    fn set_header(&mut self, name: &str, value: String);

    /// Request-scoped property
    fn property(&self, name: &str) -> Option<&str>;

    /// Set a request-scoped property
    fn set_property(&mut self, name: &str, value: String);

    /// Abort the request; the runtime answers with this status instead of sending it
    fn abort_with(&mut self, status: Status);

    /// Status the request was aborted with, if any
    fn aborted(&self) -> Option<Status>;
}

/// Filter invoked before a request is dispatched to the client transport
pub trait ClientRequestFilter: Send + Sync {
    /// Inspect or modify the request
    fn filter(&self, ctx: &mut dyn ClientRequestContext) -> io::Result<()>;

    /// Ordering key; lower priorities run first
    fn priority(&self) -> i32 {
        PRIORITY_USER
    }
}

/// Result of running a [`FilterChain`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOutcome {
    /// Every filter ran; the request may be sent
    Proceed,
    /// A filter aborted the request with this status
    Aborted(Status),
}

/// Ordered set of request filters
#[derive(Clone, Default)]
pub struct FilterChain {
    filters: Vec<Arc<dyn ClientRequestFilter>>,
}

impl FilterChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a filter, keeping registration order among equal priorities
    pub fn register(&mut self, filter: Arc<dyn ClientRequestFilter>) {
        let position = self
            .filters
            .partition_point(|f| f.priority() <= filter.priority());
        self.filters.insert(position, filter);
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Run the filters in priority order
    ///
    /// Stops at the first filter that fails or aborts the request.
    pub fn apply(&self, ctx: &mut dyn ClientRequestContext) -> io::Result<FilterOutcome> {
        for filter in &self.filters {
            filter.filter(ctx)?;
            if let Some(status) = ctx.aborted() {
                return Ok(FilterOutcome::Aborted(status));
            }
        }
        Ok(FilterOutcome::Proceed)
    }
}

impl std::fmt::Debug for FilterChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterChain")
            .field(
                "priorities",
                &self.filters.iter().map(|f| f.priority()).collect::<Vec<_>>(),
            )
            .finish()
    }
}
