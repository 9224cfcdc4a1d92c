//! The operations collaborators call, as methods on [`Platform`](crate::Platform).
//!
//! Every operation is logged on entry and exit under its own
//! [`OperationId`](crate::logging::OperationId).

mod auth;
mod common;
mod results;
mod voting;

pub use results::Join;
