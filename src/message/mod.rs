pub mod planner;
pub mod verifier;
