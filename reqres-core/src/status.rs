/// Classification of response status codes into results and faults.
///
/// The remote API reports client-side validation failures with 4xx
/// responses, and those are the outcomes the contract cases assert on. The
/// client therefore hands back every response up to and including
/// `fault_above` as a normal result; only statuses strictly greater are
/// raised as faults.
///
/// The default is [`StatusPolicy::permissive`] (`fault_above = 500`). Note
/// that a plain `500 Internal Server Error` is still a result under that
/// policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusPolicy {
    fault_above: u16,
}

impl StatusPolicy {
    /// Highest status treated as a result by the permissive policy.
    pub const PERMISSIVE_LIMIT: u16 = 500;

    /// Every status up to and including 500 is a result.
    pub const fn permissive() -> Self {
        Self {
            fault_above: Self::PERMISSIVE_LIMIT,
        }
    }

    /// Every status up to and including `limit` is a result.
    pub const fn accept_through(limit: u16) -> Self {
        Self { fault_above: limit }
    }

    /// Only 1xx, 2xx and 3xx are results; any 4xx or 5xx is a fault.
    pub const fn strict() -> Self {
        Self { fault_above: 399 }
    }

    /// Highest status that is still handed back as a result.
    pub const fn fault_above(&self) -> u16 {
        self.fault_above
    }

    /// Whether `status` must be raised as a fault rather than returned.
    pub const fn is_fault(&self, status: u16) -> bool {
        status > self.fault_above
    }
}

impl Default for StatusPolicy {
    fn default() -> Self {
        Self::permissive()
    }
}
