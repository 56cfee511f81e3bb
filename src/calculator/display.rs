//! Digit localization for the display and history ribbon.
//!
//! The display uses Persian (Extended Arabic-Indic) digits, U+06F0..U+06F9.
//! Localization is a fixed bidirectional 10-entry mapping: ASCII digits are
//! substituted glyph for glyph and every other character passes through
//! unchanged, so the functions are total over arbitrary strings.

use crate::calculator::evaluation::Operator;

const PERSIAN_DIGITS: [char; 10] = ['۰', '۱', '۲', '۳', '۴', '۵', '۶', '۷', '۸', '۹'];

/// Replace every ASCII digit with its Persian glyph.
pub fn to_persian_digits(value: &str) -> String {
    value
        .chars()
        .map(|c| {
            if c.is_ascii_digit() {
                PERSIAN_DIGITS[(c as u8 - b'0') as usize]
            } else {
                c
            }
        })
        .collect()
}

/// Replace every Persian digit with its ASCII counterpart.
pub fn to_ascii_digits(value: &str) -> String {
    value
        .chars()
        .map(|c| ascii_digit(c).unwrap_or(c))
        .collect()
}

/// Map a single Persian digit to its ASCII counterpart.
fn ascii_digit(c: char) -> Option<char> {
    PERSIAN_DIGITS
        .iter()
        .position(|&p| p == c)
        .map(|i| char::from(b'0' + i as u8))
}

/// Render a completed expression for the history ribbon, e.g. `۷ + ۳ = ۱۰`.
pub fn history_entry(previous: &str, op: Operator, current: &str, result: &str) -> String {
    format!(
        "{} {} {} = {}",
        to_persian_digits(previous),
        op.symbol(),
        to_persian_digits(current),
        to_persian_digits(result)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_digits_localized() {
        assert_eq!(to_persian_digits("0123456789"), "۰۱۲۳۴۵۶۷۸۹");
    }

    #[test]
    fn test_non_digits_pass_through() {
        assert_eq!(to_persian_digits("-12.5"), "-۱۲.۵");
        assert_eq!(to_persian_digits("inf"), "inf");
        assert_eq!(to_persian_digits(""), "");
    }

    #[test]
    fn test_mapping_is_bidirectional() {
        assert_eq!(to_ascii_digits("۰۱۲۳۴۵۶۷۸۹"), "0123456789");
        assert_eq!(to_ascii_digits(to_persian_digits("-42.07").as_str()), "-42.07");
        assert_eq!(ascii_digit('۷'), Some('7'));
        assert_eq!(ascii_digit('7'), None);
        assert_eq!(ascii_digit('x'), None);
    }

    #[test]
    fn test_history_entry_format() {
        assert_eq!(
            history_entry("7", Operator::Add, "3", "10"),
            "۷ + ۳ = ۱۰"
        );
        assert_eq!(
            history_entry("7", Operator::Multiply, "4", "28"),
            "۷ × ۴ = ۲۸"
        );
    }
}
