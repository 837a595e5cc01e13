//! Keystroke formatting for cédula and teléfono inputs.
//!
//! Both formatters are total: they drop anything that is not a digit, cap the
//! digit count and regroup, so running them on their own output is a no-op.

pub const CEDULA_DIGITS: usize = 11;
pub const TELEFONO_DIGITS: usize = 10;

/// Raw digit string for transmission.
pub fn strip_formatting(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

fn capped_digits(value: &str, cap: usize) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).take(cap).collect()
}

/// Group a cédula as `XXX-XXXXXXX-X` while it is being typed.
///
/// ```
/// use comite_client::format::format_cedula;
///
/// assert_eq!(format_cedula("001"), "001");
/// assert_eq!(format_cedula("0011234"), "001-1234");
/// assert_eq!(format_cedula("00112345678"), "001-1234567-8");
/// assert_eq!(format_cedula("001123456789999"), "001-1234567-8");
/// ```
pub fn format_cedula(input: &str) -> String {
    let digits = capped_digits(input, CEDULA_DIGITS);
    match digits.len() {
        0..=3 => digits,
        4..=10 => format!("{}-{}", &digits[..3], &digits[3..]),
        _ => format!("{}-{}-{}", &digits[..3], &digits[3..10], &digits[10..]),
    }
}

/// Group a phone number as `(809) 555-1234` while it is being typed.
///
/// ```
/// use comite_client::format::format_telefono;
///
/// assert_eq!(format_telefono("809"), "809");
/// assert_eq!(format_telefono("80955"), "(809) 55");
/// assert_eq!(format_telefono("8095551234"), "(809) 555-1234");
/// ```
pub fn format_telefono(input: &str) -> String {
    let digits = capped_digits(input, TELEFONO_DIGITS);
    match digits.len() {
        0..=3 => digits,
        4..=6 => format!("({}) {}", &digits[..3], &digits[3..]),
        _ => format!("({}) {}-{}", &digits[..3], &digits[3..6], &digits[6..]),
    }
}

/// Mask a cédula for log output, keeping the last three digits.
pub fn mask_cedula(value: &str) -> String {
    let digits = strip_formatting(value);
    let keep = digits.len().saturating_sub(3);
    let masked: String = digits
        .chars()
        .enumerate()
        .map(|(i, c)| if i < keep { '*' } else { c })
        .collect();
    format_masked(&masked)
}

fn format_masked(masked: &str) -> String {
    let chars: Vec<char> = masked.chars().collect();
    if chars.len() != CEDULA_DIGITS {
        return masked.to_string();
    }
    let first: String = chars[..3].iter().collect();
    let middle: String = chars[3..10].iter().collect();
    format!("{}-{}-{}", first, middle, chars[10])
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_cedula_dashes_appear_progressively() {
        assert_eq!(format_cedula(""), "");
        assert_eq!(format_cedula("0"), "0");
        assert_eq!(format_cedula("001"), "001");
        assert_eq!(format_cedula("0011"), "001-1");
        assert_eq!(format_cedula("0011234567"), "001-1234567");
        assert_eq!(format_cedula("00112345678"), "001-1234567-8");
    }

    #[test]
    fn test_cedula_ignores_extra_and_non_digit_input() {
        assert_eq!(format_cedula("001-1234567-89"), "001-1234567-8");
        assert_eq!(format_cedula("abc"), "");
        assert_eq!(format_cedula("00a1"), "001");
    }

    #[test]
    fn test_telefono_groups() {
        assert_eq!(format_telefono("8"), "8");
        assert_eq!(format_telefono("8095"), "(809) 5");
        assert_eq!(format_telefono("809555"), "(809) 555");
        assert_eq!(format_telefono("8095551"), "(809) 555-1");
        assert_eq!(format_telefono("809555123499"), "(809) 555-1234");
    }

    #[test]
    fn test_strip_formatting() {
        assert_eq!(strip_formatting("001-1234567-8"), "00112345678");
        assert_eq!(strip_formatting("(809) 555-1234"), "8095551234");
        assert_eq!(strip_formatting(""), "");
    }

    #[test]
    fn test_mask_cedula() {
        assert_eq!(mask_cedula("001-1234567-8"), "***-*****67-8");
        assert_eq!(mask_cedula("12"), "12");
    }

    proptest! {
        #[test]
        fn prop_cedula_strip_recovers_digits(s in "[0-9]{0,11}") {
            prop_assert_eq!(strip_formatting(&format_cedula(&s)), s);
        }

        #[test]
        fn prop_cedula_is_idempotent(s in "[0-9]{0,20}") {
            let once = format_cedula(&s);
            prop_assert_eq!(format_cedula(&strip_formatting(&once)), once.clone());
            prop_assert_eq!(format_cedula(&once), once);
        }

        #[test]
        fn prop_telefono_strip_recovers_digits(s in "[0-9]{0,10}") {
            prop_assert_eq!(strip_formatting(&format_telefono(&s)), s);
        }

        #[test]
        fn prop_telefono_is_idempotent(s in "\\PC{0,24}") {
            let once = format_telefono(&s);
            prop_assert_eq!(format_telefono(&once), once);
        }
    }
}
