//! Click event model for asynchronous click counting.

/// An in-memory click event passed from the resolve path to the background
/// worker via a channel.
///
/// Carrying only the link id keeps the redirect path free of any extra
/// lookups: the registry already holds the resolved link when it enqueues the
/// event, and the worker's atomic increment needs nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickEvent {
    pub link_id: i64,
}

impl ClickEvent {
    pub fn new(link_id: i64) -> Self {
        Self { link_id }
    }
}
