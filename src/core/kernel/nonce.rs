use chrono::Utc;

/// Source of per-request nonces
///
/// Nonces are wall-clock derived. Two private calls dispatched within the same
/// millisecond, or across a clock adjustment, may carry equal or decreasing
/// values; callers that need strict ordering must serialize private calls.
pub trait NonceSource: Send + Sync {
    fn next_nonce(&self) -> u64;
}

/// Epoch milliseconds from the system clock
#[derive(Debug, Clone, Copy, Default)]
pub struct ClockNonce;

impl NonceSource for ClockNonce {
    fn next_nonce(&self) -> u64 {
        generate_nonce()
    }
}

/// Current UTC time in epoch milliseconds, read once
pub fn generate_nonce() -> u64 {
    // clocks before 1970 clamp to zero rather than wrapping
    u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0)
}

/// Always returns the same nonce
#[derive(Debug, Clone, Copy)]
pub struct FixedNonce(pub u64);

impl NonceSource for FixedNonce {
    fn next_nonce(&self) -> u64 {
        self.0
    }
}
