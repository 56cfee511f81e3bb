//! The calculator state machine.
//!
//! All calculator state lives in a single [`CalculatorState`] aggregate.
//! Input events are applied through a pure transition function that returns
//! the next state, so the owner replaces its state wholesale on every event
//! and no mutable state leaks outside the aggregate.
//!
//! The machine has three meaningful shapes: entering the first operand,
//! entering the second operand with an operator pending, and showing a
//! result. They are encoded by the `operator`/`entry_pending` fields rather
//! than a separate discriminant.

use crate::calculator::display::history_entry;
use crate::calculator::evaluation::{Operator, evaluate, format_value, parse_operand};

/// Maximum number of history entries retained; the oldest is evicted first.
pub const HISTORY_LIMIT: usize = 5;

/// A discrete keypad input event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CalcEvent {
    /// A digit key `0`-`9`, or the decimal point (it travels the same path).
    Digit(char),
    /// One of the four binary operators.
    Operator(Operator),
    Equals,
    Clear,
    Percent,
    ToggleSign,
}

/// A completed computation, produced by the `Equals` event.
///
/// Carries the plain-ASCII form handed to the wisdom client; the localized
/// form goes into [`CalculatorState::history`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Evaluation {
    /// The evaluated expression, e.g. `"7 + 3"`.
    pub expression: String,
    /// The stringified result, e.g. `"10"`.
    pub result: String,
}

/// The single state aggregate owned by the presentation layer.
#[derive(Clone, Debug, PartialEq)]
pub struct CalculatorState {
    /// Textual value being entered or displayed. Always parses to an f64
    /// or is the literal `"0"`.
    pub current_value: String,
    /// Operand captured when an operator was chosen.
    pub previous_value: Option<String>,
    /// Pending binary operator. `Some` only when `previous_value` is `Some`.
    pub operator: Option<Operator>,
    /// When true, the next digit starts a new operand instead of appending.
    pub entry_pending: bool,
    /// Localized completed expressions, newest last, at most [`HISTORY_LIMIT`].
    pub history: Vec<String>,
}

impl Default for CalculatorState {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculatorState {
    pub fn new() -> Self {
        Self {
            current_value: "0".to_string(),
            previous_value: None,
            operator: None,
            entry_pending: false,
            history: Vec::new(),
        }
    }

    /// Apply one input event, returning the next state and, for a completed
    /// `Equals`, the evaluation the caller may hand to the wisdom client.
    pub fn apply(&self, event: CalcEvent) -> (Self, Option<Evaluation>) {
        match event {
            CalcEvent::Digit(digit) => (self.digit(digit), None),
            CalcEvent::Operator(op) => (self.operator(op), None),
            CalcEvent::Equals => self.equals(),
            CalcEvent::Clear => (self.clear(), None),
            CalcEvent::Percent => (self.percent(), None),
            CalcEvent::ToggleSign => (self.toggle_sign(), None),
        }
    }

    fn digit(&self, digit: char) -> Self {
        let mut next = self.clone();
        if digit == '.' {
            // A fresh operand starts at "0." so the value stays parseable;
            // a second point within one operand is ignored.
            if next.entry_pending || next.current_value == "0" {
                next.current_value = "0.".to_string();
                next.entry_pending = false;
            } else if !next.current_value.contains('.') {
                next.current_value.push('.');
            }
            return next;
        }

        if next.entry_pending {
            next.current_value = digit.to_string();
            next.entry_pending = false;
        } else if next.current_value == "0" {
            next.current_value = digit.to_string();
        } else {
            next.current_value.push(digit);
        }
        next
    }

    /// Choose an operator. When one is already pending and a second operand
    /// has been entered, the running result is folded immediately and the
    /// new operator chains off it; the `entry_pending` guard keeps a
    /// repeated operator press from recomputing.
    fn operator(&self, op: Operator) -> Self {
        let mut next = self.clone();
        if let Some(pending) = self.operator
            && !self.entry_pending
        {
            let previous = self.previous_value.as_deref().unwrap_or("0");
            let result = format_value(evaluate(
                parse_operand(previous),
                parse_operand(&self.current_value),
                pending,
            ));
            next.push_history(history_entry(previous, pending, &self.current_value, &result));
            next.current_value = result.clone();
            next.previous_value = Some(result);
        } else {
            next.previous_value = Some(next.current_value.clone());
        }
        next.operator = Some(op);
        next.entry_pending = true;
        next
    }

    fn equals(&self) -> (Self, Option<Evaluation>) {
        let (Some(op), Some(previous)) = (self.operator, self.previous_value.clone()) else {
            return (self.clone(), None);
        };

        let result = format_value(evaluate(
            parse_operand(&previous),
            parse_operand(&self.current_value),
            op,
        ));
        let expression = format!("{} {} {}", previous, op.ascii(), self.current_value);

        let mut next = self.clone();
        next.push_history(history_entry(&previous, op, &self.current_value, &result));
        next.current_value = result.clone();
        next.previous_value = None;
        next.operator = None;
        next.entry_pending = true;
        (next, Some(Evaluation { expression, result }))
    }

    /// Reset everything except the history.
    fn clear(&self) -> Self {
        Self {
            current_value: "0".to_string(),
            previous_value: None,
            operator: None,
            entry_pending: false,
            history: self.history.clone(),
        }
    }

    fn percent(&self) -> Self {
        let mut next = self.clone();
        next.current_value = format_value(parse_operand(&self.current_value) / 100.0);
        next
    }

    /// Negate the current value. Routed like a digit entry, so it also
    /// clears `entry_pending`.
    fn toggle_sign(&self) -> Self {
        let mut next = self.clone();
        next.current_value = format_value(parse_operand(&self.current_value) * -1.0);
        next.entry_pending = false;
        next
    }

    fn push_history(&mut self, entry: String) {
        self.history.push(entry);
        if self.history.len() > HISTORY_LIMIT {
            let excess = self.history.len() - HISTORY_LIMIT;
            self.history.drain(..excess);
        }
    }
}
