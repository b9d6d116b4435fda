//! Green Grocer Admin library.
//!
//! This crate provides the back-office functionality as a library,
//! allowing it to be tested and reused (the CLI uses it to create admin
//! accounts).
//!
//! # Security
//!
//! This crate contains HIGH PRIVILEGE access: product and order management
//! for the whole store. Deploy it on internal infrastructure only. It shares
//! a database with the storefront but keeps its own credential realm - a
//! customer session cannot reach any handler here.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
