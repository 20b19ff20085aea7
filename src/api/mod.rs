//! API client for Anixart.
//!
//! - [`AnixartApi`]: authenticated REST calls
//! - [`Session`]: token storage between runs

pub mod client;
pub mod session;

pub use client::{AnixartApi, SignIn};
pub use session::Session;
