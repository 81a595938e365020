//! # varsel-engine
//!
//! The stateful half of varsel: a single-threaded evaluation actor that
//! owns the alert history, the recent-activity flag and both scheduler
//! deadlines, and drives the pure reduction logic from `varsel-core`.
//!
//! ### Key Submodules:
//! - `engine`: the actor runtime, its handle, and the report sink boundary

pub mod engine;

pub use engine::{
    EngineConfig, EngineError, EngineHandle, ReportSink, SinkError, StatusEngine, TracingSink,
};
