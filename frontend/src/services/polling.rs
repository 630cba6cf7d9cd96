use gloo::timers::callback::Interval;

/// Ticket handed out for one request of a polled resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

/// Orders the requests of a polled resource.
///
/// An interval tick is skipped while an earlier request is still out, and a
/// response is only applied if nothing newer has been applied already, so a
/// slow reply can't overwrite fresher data.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    next: u64,
    latest_applied: Option<Ticket>,
    in_flight: usize,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a request regardless of what else is outstanding
    pub fn begin(&mut self) -> Ticket {
        let ticket = Ticket(self.next);
        self.next += 1;
        self.in_flight += 1;
        ticket
    }

    /// Start a request only if none is outstanding
    pub fn try_begin(&mut self) -> Option<Ticket> {
        if self.in_flight > 0 {
            return None;
        }
        Some(self.begin())
    }

    /// Finish a request. Returns whether its result should be applied.
    pub fn finish(&mut self, ticket: Ticket) -> bool {
        self.in_flight = self.in_flight.saturating_sub(1);
        match self.latest_applied {
            Some(latest) if latest >= ticket => false,
            _ => {
                self.latest_applied = Some(ticket);
                true
            }
        }
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight > 0
    }
}

/// Runs a callback on a fixed interval until dropped
pub struct Poller {
    interval: Interval,
}

impl Poller {
    pub fn start<F>(interval_ms: u32, tick: F) -> Self
    where
        F: FnMut() + 'static,
    {
        Self {
            interval: Interval::new(interval_ms, tick),
        }
    }

    /// Stop polling. Requests already out still complete.
    pub fn cancel(self) {
        drop(self.interval.cancel());
    }
}
