// File: datasan-core/src/validators.rs
//! Programmatic validation for rules flagged with `programmatic_validation`.
//!
//! A regex alone over-matches for some categories (any 16-digit run looks
//! like a card number). The checks here run on each regex match and decide
//! whether it counts, both when redacting and when validating.
//!
//! License: MIT OR APACHE 2.0

/// Validates a digit string with the Luhn (mod 10) checksum.
///
/// Returns `false` for anything containing a non-digit.
pub fn is_valid_luhn(num_str: &str) -> bool {
    let mut sum = 0;
    let mut alternate = false;

    for c in num_str.chars().rev() {
        let Some(mut digit) = c.to_digit(10) else { return false; };

        if alternate {
            digit *= 2;
            if digit > 9 {
                digit -= 9;
            }
        }
        sum += digit;
        alternate = !alternate;
    }

    sum % 10 == 0
}

/// Checks a payment card candidate: 13 to 19 digits once separators are
/// removed, and a valid Luhn checksum.
pub fn is_valid_credit_card_programmatically(cc_number: &str) -> bool {
    let digits: String = cc_number.chars().filter(|c| c.is_ascii_digit()).collect();
    if !(13..=19).contains(&digits.len()) {
        return false;
    }
    is_valid_luhn(&digits)
}

/// True when the span `start..end` of `haystack` is not directly preceded or
/// followed by an ASCII digit.
///
/// `start` and `end` must be char boundaries of `haystack`.
pub fn has_digit_boundaries(haystack: &str, start: usize, end: usize) -> bool {
    let before = haystack[..start].chars().next_back();
    let after = haystack[end..].chars().next();
    !before.is_some_and(|c| c.is_ascii_digit()) && !after.is_some_and(|c| c.is_ascii_digit())
}

/// Dispatches to the validator registered for a rule name.
///
/// Rules without a dedicated validator accept every match.
pub fn validate_match(rule_name: &str, candidate: &str) -> bool {
    match rule_name {
        "credit_card" => is_valid_credit_card_programmatically(candidate),
        _ => true,
    }
}
