//! Memoizing lookup coordinator.
//!
//! [`PostCoder`] wraps a [`Transport`](crate::transport::Transport) with
//! argument parsing, validation and a per-operation cache keyed on the
//! normalized arguments.

mod error;
mod postcoder;

pub use error::LookupError;
pub use postcoder::PostCoder;
