pub mod plan;
pub mod planner;
pub mod rules;

pub use plan::{Plan, Step};
pub use planner::Planner;
