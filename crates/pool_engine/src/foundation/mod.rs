//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the engine:
//! - Math types and the 4x4 transform library
//! - Time management
//! - Logging utilities

pub mod math;
pub mod transform;
pub mod time;
pub mod logging;
