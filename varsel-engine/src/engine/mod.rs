mod error;
mod report_sink;
mod runtime;

pub use self::{
    error::EngineError,
    report_sink::{ReportSink, SinkError, TracingSink},
    runtime::{EngineConfig, EngineHandle, StatusEngine},
};

pub mod prelude {
    pub use super::{
        EngineConfig, EngineError, EngineHandle, ReportSink, SinkError, StatusEngine, TracingSink,
    };
}
