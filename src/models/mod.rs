//! Runtime models shared by the server binary and handlers.

pub mod config;
