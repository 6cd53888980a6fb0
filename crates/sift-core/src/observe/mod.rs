//! # Observability
//!
//! Two ways to watch a decomposition:
//!
//! - **Logging**: `tracing` events at trace/debug/warn, printed by
//!   [`init_logging`]
//! - **Observers**: typed per-round callbacks through [`SiftObserver`], for
//!   callers that want the intermediate candidates and envelopes themselves
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │              Emd::decompose_observed         │
//! │   trace!/debug!/warn!      observer.on_*()   │
//! └──────────────┬─────────────────────┬─────────┘
//!                ▼                     ▼
//!          ┌──────────┐         ┌──────────────┐
//!          │ Logging  │         │  Observer    │
//!          │ (fmt/    │         │ (Noop,       │
//!          │  json)   │         │  Recording)  │
//!          └──────────┘         └──────────────┘
//! ```

pub mod logging;
pub mod observer;

pub use logging::{init_logging, LogConfig, LogFormat, LogLevel};
pub use observer::{NoopObserver, RecordingObserver, SiftIteration, SiftObserver, StopReason};
