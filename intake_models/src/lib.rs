pub mod job;
mod macros;
pub mod submission;
