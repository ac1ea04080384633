//! Latest-request-wins guard for the listing detail dialog.
//!
//! Every click takes a ticket; when its response arrives it is applied only
//! if no newer ticket has been issued since. Closing the dialog does not
//! invalidate a ticket.

#[cfg(test)]
#[path = "request_guard_test.rs"]
mod request_guard_test;

use std::cell::Cell;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug, Default)]
pub struct RequestGuard {
    latest: Cell<u64>,
}

impl RequestGuard {
    /// Issue a new ticket, superseding every earlier one.
    pub fn issue(&self) -> Ticket {
        let next = self.latest.get().wrapping_add(1);
        self.latest.set(next);
        Ticket(next)
    }

    #[must_use]
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest.get() == ticket.0
    }
}
