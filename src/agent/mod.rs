pub mod context;
pub mod core;
pub mod execution;
pub mod planning;
pub mod types;
pub mod verification;

pub use context::ExecutionContext;
pub use core::AgentBehavior;
pub use execution::Executor;
pub use planning::{Plan, Planner, Step};
pub use types::{
    CompletionCheck, ExecutionResult, FinalAnswer, StepResult, StepStatus, Verification,
    VerificationStatus,
};
pub use verification::Verifier;
