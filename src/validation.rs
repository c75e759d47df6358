//! Field-format primitives for the Brazilian clinic domain.
//!
//! CPF check digits, CRM license numbers, phone and e-mail shapes.
//! Which fields are required on which entity, and the per-field violation
//! messages, live in the directory layer; these are the building blocks.

use std::sync::LazyLock;

use regex::Regex;

static CRM_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{4,6}$").unwrap());

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap());

/// Strip everything that is not an ASCII digit.
///
/// CPF and phone values go through this before validation, storage and
/// querying, so `529.982.247-25` and `52998224725` are the same value.
pub fn normalize_digits(text: &str) -> String {
    text.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// CPF check-digit validation.
///
/// Accepts punctuated or bare input. Rejects anything that is not
/// 11 digits after normalization, the eleven all-identical sequences
/// (`000...`, `111...`, valid by arithmetic but reserved), and any value
/// whose two check digits do not match the weighted sums.
pub fn is_valid_cpf(text: &str) -> bool {
    let digits = normalize_digits(text);
    if digits.len() != 11 {
        return false;
    }

    let d: Vec<u32> = digits.chars().filter_map(|c| c.to_digit(10)).collect();
    if d.iter().all(|&x| x == d[0]) {
        return false;
    }

    d[9] == check_digit(&d[..9]) && d[10] == check_digit(&d[..10])
}

// Weights run from len+1 down to 2; (sum * 10) % 11 with 10 collapsing to 0.
fn check_digit(digits: &[u32]) -> u32 {
    let top = digits.len() as u32 + 1;
    let sum: u32 = digits.iter().zip((2..=top).rev()).map(|(d, w)| d * w).sum();
    match (sum * 10) % 11 {
        10 => 0,
        d => d,
    }
}

/// CRM license numbers are 4 to 6 digits, nothing else.
pub fn is_valid_crm(text: &str) -> bool {
    CRM_PATTERN.is_match(text)
}

pub fn is_valid_email(text: &str) -> bool {
    EMAIL_PATTERN.is_match(text)
}

/// Phone numbers carry a two-digit area code plus 8 or 9 digits.
/// Expects digits-only input (callers normalize first).
pub fn is_valid_phone(digits: &str) -> bool {
    matches!(digits.len(), 10 | 11) && digits.bytes().all(|b| b.is_ascii_digit())
}
