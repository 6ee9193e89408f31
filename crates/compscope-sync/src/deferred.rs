//! Low-priority recomputation keyed to the latest committed input.
//!
//! Each submitted input gets a monotonically increasing epoch. Work is handed
//! out with a [`Ticket`] naming the epoch it was computed for, and a finished
//! result is applied only if no newer input arrived in the meantime. The
//! result that lands is always the one for the most recently committed input,
//! never merely the most recently finished computation.

/// Epoch a unit of deferred work was started for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ticket(u64);

impl Ticket {
    pub fn epoch(&self) -> u64 {
        self.0
    }
}

/// What happened to a finished computation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    /// A newer input was committed while this one was computing
    Superseded { latest: Ticket },
}

/// Committed input `I` and the derived output `O` last computed from it
#[derive(Debug)]
pub struct DeferredValue<I, O> {
    input: I,
    epoch: u64,
    output: Option<O>,
    output_epoch: Option<u64>,
    in_flight: Option<u64>,
}

impl<I: Clone, O> DeferredValue<I, O> {
    /// Start with `input` committed and no output yet (pending)
    pub fn new(input: I) -> Self {
        Self { input, epoch: 0, output: None, output_epoch: None, in_flight: None }
    }

    /// Commit a new input; the output is stale from this instant
    pub fn submit(&mut self, input: I) -> Ticket {
        self.input = input;
        self.invalidate()
    }

    /// Mark the output stale without changing the input, e.g. when an
    /// upstream dataset the computation reads from was replaced
    pub fn invalidate(&mut self) -> Ticket {
        self.epoch += 1;
        tracing::trace!(epoch = self.epoch, "deferred input committed");
        Ticket(self.epoch)
    }

    /// Most recently committed input
    pub fn input(&self) -> &I {
        &self.input
    }

    pub fn latest(&self) -> Ticket {
        Ticket(self.epoch)
    }

    /// True while the output does not reflect the latest committed input
    pub fn is_pending(&self) -> bool {
        self.output_epoch != Some(self.epoch)
    }

    /// Whether work for the latest input has been handed out and not finished
    pub fn is_in_flight(&self) -> bool {
        self.in_flight == Some(self.epoch)
    }

    /// Hand out work for the latest input, or `None` when already current
    pub fn begin(&mut self) -> Option<(Ticket, I)> {
        if !self.is_pending() {
            return None;
        }
        self.in_flight = Some(self.epoch);
        Some((Ticket(self.epoch), self.input.clone()))
    }

    /// Offer a finished result; it is dropped if its input was superseded
    pub fn complete(&mut self, ticket: Ticket, output: O) -> Completion {
        if ticket.0 != self.epoch {
            tracing::warn!(
                stale_epoch = ticket.0,
                latest_epoch = self.epoch,
                "discarding result computed for superseded input"
            );
            return Completion::Superseded { latest: Ticket(self.epoch) };
        }

        self.output = Some(output);
        self.output_epoch = Some(ticket.0);
        if self.in_flight == Some(ticket.0) {
            self.in_flight = None;
        }
        Completion::Applied
    }

    /// Run the computation synchronously for the latest input if stale
    pub fn refresh(&mut self, compute: impl FnOnce(&I) -> O) -> bool {
        let Some((ticket, input)) = self.begin() else {
            return false;
        };
        let output = compute(&input);
        self.complete(ticket, output) == Completion::Applied
    }

    /// Last applied output; may lag the input while [`is_pending`](Self::is_pending)
    pub fn output(&self) -> Option<&O> {
        self.output.as_ref()
    }
}
