/// Configuration for per-connection flood protection.
/// Reading pauses once this many lines arrive within one second.
pub const MAX_REQUESTS_PER_SECOND: u32 = 30;
