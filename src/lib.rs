//! Regret Engine - Pre-checkout regret prediction
//!
//! This crate scores a pending food order against the user's current
//! emotional state and ordering history, producing a risk assessment the
//! checkout flow can show before the order is placed.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
