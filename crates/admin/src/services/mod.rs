//! Business-logic services for the admin panel.

pub mod auth;
