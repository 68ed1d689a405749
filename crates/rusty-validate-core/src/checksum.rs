//! Check digit algorithms (Luhn, Modulo-11)

/// Parses an ASCII digit string into digit values
pub fn digits(value: &str) -> Option<Vec<u8>> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(value.bytes().map(|b| b - b'0').collect())
}

/// Luhn sum of a payload (digits without their check digit), modulo 10
///
/// The payload is walked from the right; every digit at an even index of
/// the reversed sequence is doubled, minus 9 when the product exceeds 9.
pub fn luhn(digits: &[u8]) -> u8 {
    let sum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| {
            let d = u32::from(d);
            if i % 2 == 0 {
                let doubled = d * 2;
                if doubled > 9 {
                    doubled - 9
                } else {
                    doubled
                }
            } else {
                d
            }
        })
        .sum();
    (sum % 10) as u8
}

/// Check digit that completes `payload` to a Luhn-valid number
pub fn luhn_check_digit(payload: &[u8]) -> u8 {
    (10 - luhn(payload)) % 10
}

/// Whether a full number (payload followed by its check digit) passes Luhn
pub fn is_luhn_valid(number: &[u8]) -> bool {
    match number.split_last() {
        Some((&check, payload)) if !payload.is_empty() => (luhn(payload) + check) % 10 == 0,
        _ => false,
    }
}

/// Modulo-11 weighted sum, weights 2..=7 cycling from the rightmost digit
pub fn module11(digits: &[u8]) -> u8 {
    let sum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| u32::from(d) * (2 + (i as u32 % 6)))
        .sum();
    (sum % 11) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digits() {
        assert_eq!(digits("0429"), Some(vec![0, 4, 2, 9]));
        assert_eq!(digits("12a"), None);
        assert_eq!(digits(""), None);
    }

    #[test]
    fn test_luhn_of_test_visa_payload() {
        // 4000 0000 0000 0002 is a published Visa test number
        let payload = [4, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0];
        assert_eq!(luhn(&payload), 8);
        assert_eq!(luhn_check_digit(&payload), 2);
    }

    #[test]
    fn test_luhn_validity() {
        let valid = digits("4111111111111111").unwrap();
        assert!(is_luhn_valid(&valid));
        let invalid = digits("4111111111111112").unwrap();
        assert!(!is_luhn_valid(&invalid));
        assert!(!is_luhn_valid(&[0]));
    }

    #[test]
    fn test_module11_weights() {
        // 3*1 + 2*7 + 7*6 + 6*0 + 5*0 + 4*0 + 3*1 + 2*0 = 62
        assert_eq!(module11(&[1, 7, 6, 0, 0, 0, 1, 0]), 62 % 11);
        // weights wrap back to 2 after 7
        assert_eq!(module11(&[1, 0, 0, 0, 0, 0, 0]), 2);
    }
}
