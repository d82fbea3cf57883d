// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod animator;
pub mod config;
pub mod drill;
pub mod runtime;
pub mod sentences;
pub mod session;
pub mod timer;
pub mod ui;
pub mod util;

/// Frame interval for the host tick loop.
pub const TICK_RATE_MS: u64 = 50;
