pub mod coordinator;

pub use coordinator::{CompletedTask, Coordinator, PipelinePhase, PlanningFailure, TaskOutcome};
