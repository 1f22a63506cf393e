pub mod orchestrator;
pub mod report;
pub mod types;

pub use orchestrator::Orchestrator;
pub use types::{WorkflowKind, WorkflowOutcome};
