//! Flight Desk - Realtime gate and check-in coordination
//!
//! Agents working the same flight see each other's changes as they happen.
//! Every mutation is pushed to all connected clients, and a seat being
//! edited is held by a short-lived lock so two agents cannot reassign it at
//! the same time.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
