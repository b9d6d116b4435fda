//! Green Grocer Core - Shared types library.
//!
//! This crate provides common types used across all Green Grocer components:
//! - `storefront` - Public-facing grocery shop
//! - `admin` - Internal back office
//! - `cli` - Command-line tools for migrations and management
//!
//! # Architecture
//!
//! The core crate contains only types and pure rules - no I/O, no database
//! access, no HTTP clients. This keeps it lightweight and allows it to be
//! used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, emails, the order status state machine,
//!   pricing rules, and the stock adjustment policy

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
