//! The calculator core.
//!
//! This module provides functionality to:
//! - Apply keypad events through a pure state machine with bounded history
//! - Evaluate the pending binary operator over f64 operands
//! - Localize digits and operators for the Persian display

mod display;
mod evaluation;
mod state;

pub use display::{to_ascii_digits, to_persian_digits};
pub use evaluation::{Operator, evaluate, format_value, parse_operand};
pub use state::{CalcEvent, CalculatorState, Evaluation, HISTORY_LIMIT};
