//! Aurora server library (used by the `aurora` binary and integration tests).

pub mod gateway;
