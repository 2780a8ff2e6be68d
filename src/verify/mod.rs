pub mod runner;

pub use runner::{VerificationRunner, VerifyParams};
