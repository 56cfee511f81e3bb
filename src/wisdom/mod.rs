//! Wisdom generation for completed computations.
//!
//! This module provides functionality to:
//! - Ask a language model, in Al-Khwarizmi's voice, for a short Persian
//!   aside about the number the user just computed
//! - Absorb every failure into a fixed fallback line
//! - Track the single in-flight request so a superseded response never
//!   overwrites the current display

mod client;
mod task;

pub use client::{WISDOM_FALLBACK, WisdomClient, WisdomError};
pub use task::{WisdomMessage, WisdomTask};
