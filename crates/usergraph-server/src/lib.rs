//! # UserGraph Server Library
//!
//! Wiring and startup utilities for the UserGraph server binary.

pub mod app;
pub mod startup;
