pub mod expects_json;
pub mod submission_body;
