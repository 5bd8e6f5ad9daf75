//! # Lathos Shared
//!
//! Types shared by services that surface lathos errors to their callers.

pub mod dto;
pub mod response;

pub use response::{ApiResponse, ErrorResponse};
