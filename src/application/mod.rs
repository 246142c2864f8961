//! Application layer orchestrating the ordering session.
//!
//! This module defines the `OrderController`, the single entry point through
//! which the presentation layer mutates an order and pays for it.

pub mod controller;
