/// Identifies a viewport query in issue order.
///
/// Ids are handed out by [`RequestSequencer`] and grow monotonically, so
/// comparing two ids tells which query was issued later.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Request(pub u64);

impl std::fmt::Display for Request {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Issues request ids and decides which responses may still be applied.
///
/// A request is settled once its response arrives, whether it succeeded or
/// failed. A response is accepted unless a later request has already
/// settled. An older response that lands before any newer one is still
/// accepted (the list refreshes early, then again when the newer one
/// arrives).
#[derive(Debug, Default)]
pub struct RequestSequencer {
    next: u64,
    latest_applied: Option<Request>,
    latest_settled: Option<Request>,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self) -> Request {
        let req = Request(self.next);
        // Saturates at u64::MAX; ids never wrap.
        self.next = self.next.saturating_add(1);
        req
    }

    /// Newest request issued so far.
    pub fn latest_issued(&self) -> Option<Request> {
        self.next.checked_sub(1).map(Request)
    }

    pub fn latest_applied(&self) -> Option<Request> {
        self.latest_applied
    }

    /// Newest request whose response, success or failure, was accepted.
    pub fn latest_settled(&self) -> Option<Request> {
        self.latest_settled
    }

    /// Whether a response for `req` would be superseded.
    pub fn is_stale(&self, req: Request) -> bool {
        self.latest_settled.is_some_and(|settled| req < settled)
    }

    /// Mark `req` as applied. Returns `false` (and changes nothing) if stale.
    pub fn try_apply(&mut self, req: Request) -> bool {
        if !self.try_settle(req) {
            return false;
        }
        self.latest_applied = Some(req);
        true
    }

    /// Mark `req` as settled without applying anything, for failed queries.
    /// Returns `false` (and changes nothing) if stale.
    pub fn try_settle(&mut self, req: Request) -> bool {
        if self.is_stale(req) {
            return false;
        }
        self.latest_settled = Some(req);
        true
    }

    /// Whether the newest issued request is still waiting for its response.
    pub fn has_outstanding(&self) -> bool {
        match (self.latest_issued(), self.latest_settled) {
            (Some(issued), Some(settled)) => issued > settled,
            (Some(_), None) => true,
            (None, _) => false,
        }
    }
}
