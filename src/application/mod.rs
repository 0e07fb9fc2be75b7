pub mod pipeline;
pub mod publisher;

pub use pipeline::{
    DetailRouter, PipelineError, PipelineSettings, RefreshPipeline, RunOutcome,
};
pub use publisher::{DashboardPublisher, PublishError};
