//! Client domain layer: configuration, commit policy and errors. No I/O.

pub(crate) mod clock;
pub mod commit;
pub mod config;
pub mod errors;
