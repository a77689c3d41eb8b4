//! Common utilities, constants, and resources used across the opref codebase.
//!
//! This crate provides shared functionality for the opref toolkit, including the
//! patterns used to extract instruction definitions and general utility functions.

/// Constants used throughout the opref codebase.
pub mod constants;

/// General utility functions and types for common tasks.
pub mod utils;
