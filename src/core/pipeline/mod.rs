//! Pipeline control: stage ordering and run reporting

pub mod controller;
pub mod stage;
pub mod summary;

pub use controller::PipelineController;
pub use stage::PipelineStage;
pub use summary::{FailureKind, RunOutcome, RunSummary};
