pub use intake_utils_derive::trace_instrument;

mod macros;

/// Returns the version of this build, as set by cargo.
pub fn intake_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
