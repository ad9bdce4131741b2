//! Fixtures shared by the tests of all crates.

use uuid::{uuid, Uuid};

pub mod job;
pub mod submission;

pub const UUID1: Uuid = uuid!("0192f0a4-7c8d-7f3e-9b1a-5d6e2c4f8a01");
