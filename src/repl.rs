//! Text front end for the calculator.
//!
//! Reads keypad characters from stdin and feeds them through the state
//! machine, printing the localized display after each processed line.
//! Persian digit input is accepted alongside ASCII. Wisdom requests run in
//! the background: the loading line is printed synchronously when a
//! computation completes, the calculator stays interactive while the
//! request is outstanding, and only a response for the current request is
//! ever printed.

use std::sync::Arc;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::debug;

use crate::calculator::{CalcEvent, CalculatorState, Operator, to_ascii_digits, to_persian_digits};
use crate::wisdom::{WisdomClient, WisdomMessage, WisdomTask};

const BANNER: &str =
    "الخوارزمی — keys: 0-9 . + - × ÷ = % ~ (toggle sign), c (clear), h (history), q (quit)";
const LOADING: &str = "در حال تفکر...";
const EMPTY_HISTORY: &str = "خالی";

/// Run the calculator loop until stdin closes or the user quits.
pub async fn run(wisdom: Option<Arc<WisdomClient>>) -> Result<()> {
    let mut state = CalculatorState::new();
    let mut task = WisdomTask::new();
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{BANNER}");
    println!("{}", render(&state));

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match line.trim() {
                    "q" => break,
                    "h" => print_history(&state),
                    _ => {
                        process_line(&line, &mut state, &mut task, &wisdom, &tx);
                        println!("{}", render(&state));
                    }
                }
            }
            Some(message) = rx.recv() => {
                if task.accepts(&message) {
                    println!("«{}»", message.text);
                }
            }
        }
    }

    Ok(())
}

/// Feed every keypad character of a line through the state machine.
fn process_line(
    line: &str,
    state: &mut CalculatorState,
    task: &mut WisdomTask,
    wisdom: &Option<Arc<WisdomClient>>,
    tx: &mpsc::UnboundedSender<WisdomMessage>,
) {
    for key in to_ascii_digits(line).chars() {
        if key.is_whitespace() {
            continue;
        }
        let Some(event) = event_for_key(key) else {
            debug!("ignoring key {key:?}");
            continue;
        };

        let (next, evaluation) = state.apply(event);
        *state = next;

        if matches!(event, CalcEvent::Clear) {
            // Clearing the calculator also clears the wisdom slot.
            task.cancel();
        }

        if let Some(evaluation) = evaluation
            && let Some(client) = wisdom
        {
            // The loading line goes out before the request starts.
            println!("{LOADING}");
            let client = Arc::clone(client);
            task.spawn(tx.clone(), async move {
                client
                    .fetch(&evaluation.expression, &evaluation.result)
                    .await
            });
        }
    }
}

/// Map a keypad character to its input event.
fn event_for_key(key: char) -> Option<CalcEvent> {
    if key.is_ascii_digit() || key == '.' {
        return Some(CalcEvent::Digit(key));
    }
    if let Some(op) = Operator::from_key(key) {
        return Some(CalcEvent::Operator(op));
    }
    match key {
        '=' => Some(CalcEvent::Equals),
        'c' | 'C' => Some(CalcEvent::Clear),
        '%' | '٪' => Some(CalcEvent::Percent),
        '~' => Some(CalcEvent::ToggleSign),
        _ => None,
    }
}

/// The display line: pending operand and operator, then the current value.
fn render(state: &CalculatorState) -> String {
    let mut line = String::new();
    if let (Some(previous), Some(op)) = (&state.previous_value, state.operator) {
        line.push_str(&to_persian_digits(previous));
        line.push(' ');
        line.push(op.symbol());
        line.push(' ');
    }
    line.push_str(&to_persian_digits(&state.current_value));
    line
}

fn print_history(state: &CalculatorState) {
    if state.history.is_empty() {
        println!("{EMPTY_HISTORY}");
        return;
    }
    for entry in &state.history {
        println!("{entry}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(event_for_key('7'), Some(CalcEvent::Digit('7')));
        assert_eq!(event_for_key('.'), Some(CalcEvent::Digit('.')));
        assert_eq!(
            event_for_key('+'),
            Some(CalcEvent::Operator(Operator::Add))
        );
        assert_eq!(
            event_for_key('÷'),
            Some(CalcEvent::Operator(Operator::Divide))
        );
        assert_eq!(event_for_key('='), Some(CalcEvent::Equals));
        assert_eq!(event_for_key('c'), Some(CalcEvent::Clear));
        assert_eq!(event_for_key('%'), Some(CalcEvent::Percent));
        assert_eq!(event_for_key('٪'), Some(CalcEvent::Percent));
        assert_eq!(event_for_key('~'), Some(CalcEvent::ToggleSign));
        assert_eq!(event_for_key('?'), None);
    }

    #[test]
    fn test_render_shows_pending_operation() {
        let state = CalculatorState::new();
        assert_eq!(render(&state), "۰");

        let state = [
            CalcEvent::Digit('7'),
            CalcEvent::Operator(Operator::Add),
            CalcEvent::Digit('3'),
        ]
        .iter()
        .fold(state, |state, &event| state.apply(event).0);
        assert_eq!(render(&state), "۷ + ۳");
    }

    #[test]
    fn test_persian_keypad_input_accepted() {
        let line = to_ascii_digits("۷+۳=");
        let events: Vec<_> = line.chars().filter_map(event_for_key).collect();
        let state = events
            .iter()
            .fold(CalculatorState::new(), |state, &event| state.apply(event).0);
        assert_eq!(state.current_value, "10");
    }
}
