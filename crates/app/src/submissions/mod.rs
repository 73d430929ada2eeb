//! Submissions

pub mod errors;
pub mod service;

pub use errors::SubmissionError;
pub use service::*;
