//! devrewoh site library.
//!
//! Portfolio pages, the contact form, and the Compress checkout that sells
//! API keys through Stripe. The binary in `main.rs` wires this library to
//! a listener; tests drive [`app::router`] directly.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod app;
pub mod config;
pub mod db;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;
pub mod static_files;
pub mod stripe;
