pub mod formatter;
pub mod verifier;

pub use verifier::Verifier;
