//! CPF (Cadastro de Pessoas Físicas) identity numbers.
//!
//! A CPF is 11 decimal digits. The last two are check digits computed from the
//! preceding ones with a weighted mod-11 rule. Users type them with or without
//! the usual `DDD.DDD.DDD-DD` punctuation, so every function here first reduces
//! the input to its canonical form by dropping `.` and `-`.
//!
//! None of these functions fail: malformed input simply yields `false` or is
//! handed back unchanged.
//!
//! # Example
//!
//! ```
//! use classgrid_core::cpf;
//!
//! assert_eq!(cpf::canonicalize("529.982.247-25"), "52998224725");
//! assert!(cpf::is_valid("529.982.247-25"));
//! assert!(!cpf::is_valid("111.111.111-11"));
//! assert_eq!(cpf::display("52998224725"), "529.982.247-25");
//! ```

/// Number of digits in a canonical CPF.
pub const LENGTH: usize = 11;

/// Number of leading digits the check digits are derived from.
pub const BASE_LENGTH: usize = 9;

const SEPARATORS: [char; 2] = ['.', '-'];

/// Strips the `.` and `-` separators, keeping every other character in order.
pub fn canonicalize(input: &str) -> String {
    input.chars().filter(|c| !SEPARATORS.contains(c)).collect()
}

/// `true` when the canonical form is exactly 11 ASCII digits.
pub fn is_well_formed(input: &str) -> bool {
    let canonical = canonicalize(input);
    canonical.len() == LENGTH && canonical.bytes().all(|b| b.is_ascii_digit())
}

/// Full validation: well-formed, not a repeated digit, and both check digits match.
pub fn is_valid(input: &str) -> bool {
    let Some(digits) = digits(input) else {
        return false;
    };

    // 000.000.000-00, 111.111.111-11, ... pass the checksum but are never issued.
    if digits.iter().all(|&d| d == digits[0]) {
        return false;
    }

    let first = check_digit(&digits[..BASE_LENGTH]);
    if first != digits[BASE_LENGTH] {
        return false;
    }

    check_digit(&digits[..BASE_LENGTH + 1]) == digits[BASE_LENGTH + 1]
}

/// Formats as `DDD.DDD.DDD-DD`, or returns the input untouched when it does
/// not reduce to 11 digits.
pub fn display(input: &str) -> String {
    if !is_well_formed(input) {
        return input.to_string();
    }

    let c = canonicalize(input);
    format!("{}.{}.{}-{}", &c[0..3], &c[3..6], &c[6..9], &c[9..11])
}

/// Computes one check digit over `digits`.
///
/// Weights run from `digits.len() + 1` down to `2`. A remainder below 2 maps to
/// `0`, anything else to `11 - remainder`. With 9 digits this yields the first
/// check digit, with 10 digits (base plus first check digit) the second.
pub fn check_digit(digits: &[u8]) -> u8 {
    let top = digits.len() as u32 + 1;
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, &d)| u32::from(d) * (top - i as u32))
        .sum();

    match sum % 11 {
        r if r < 2 => 0,
        r => (11 - r) as u8,
    }
}

/// Appends both check digits to a 9-digit base, returning the canonical string.
///
/// The result is only a *valid* CPF when the base is not one repeated digit.
pub fn complete(base: [u8; BASE_LENGTH]) -> String {
    let mut digits = base.to_vec();
    digits.push(check_digit(&digits));
    digits.push(check_digit(&digits));

    digits.iter().map(|d| char::from(b'0' + d)).collect()
}

fn digits(input: &str) -> Option<[u8; LENGTH]> {
    if !is_well_formed(input) {
        return None;
    }

    let mut out = [0u8; LENGTH];
    for (slot, b) in out.iter_mut().zip(canonicalize(input).bytes()) {
        *slot = b - b'0';
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = "52998224725";

    #[test]
    fn test_canonicalize_strips_separators() {
        assert_eq!(canonicalize("529.982.247-25"), "52998224725");
        assert_eq!(canonicalize("529-982-247.25"), "52998224725");
        assert_eq!(canonicalize(""), "");
    }

    #[test]
    fn test_canonicalize_keeps_other_characters() {
        assert_eq!(canonicalize("529 982 247/25"), "529 982 247/25");
        assert_eq!(canonicalize("abc.def-gh"), "abcdefgh");
    }

    #[test]
    fn test_canonicalize_is_idempotent() {
        for input in ["529.982.247-25", "..--", "12a.3-4", "", "52998224725"] {
            let once = canonicalize(input);
            assert_eq!(canonicalize(&once), once);
        }
    }

    #[test]
    fn test_is_well_formed() {
        assert!(is_well_formed(VALID));
        assert!(is_well_formed("529.982.247-25"));
        assert!(is_well_formed("00000000000"));
        assert!(!is_well_formed(""));
        assert!(!is_well_formed("5299822472"));
        assert!(!is_well_formed("529982247255"));
        assert!(!is_well_formed("5299822472a"));
        assert!(!is_well_formed("529 982 247 25"));
    }

    #[test]
    fn test_known_valid_numbers() {
        for cpf in [
            "52998224725",
            "529.982.247-25",
            "11144477735",
            "12345678909",
            "39053344705",
            "000.000.001-91",
            "98765432100",
        ] {
            assert!(is_valid(cpf), "{} should be valid", cpf);
        }
    }

    #[test]
    fn test_wrong_check_digits() {
        assert!(!is_valid("52998224724"));
        assert!(!is_valid("52998224715"));
        assert!(!is_valid("12345678900"));
    }

    #[test]
    fn test_repeated_digits_are_invalid() {
        for d in 0..=9 {
            let cpf = d.to_string().repeat(LENGTH);
            assert!(!is_valid(&cpf), "{} should be invalid", cpf);
        }
        assert!(!is_valid("111.111.111-11"));
    }

    #[test]
    fn test_malformed_input_is_invalid() {
        assert!(!is_valid(""));
        assert!(!is_valid("529982247"));
        assert!(!is_valid("5299822472X"));
        assert!(!is_valid("529/982/247-25"));
        assert!(!is_valid("529982247255"));
    }

    #[test]
    fn test_every_single_digit_change_is_detected() {
        for pos in 0..LENGTH {
            for replacement in b'0'..=b'9' {
                let mut bytes = VALID.as_bytes().to_vec();
                if bytes[pos] == replacement {
                    continue;
                }
                bytes[pos] = replacement;
                let mutated = String::from_utf8(bytes).unwrap();
                assert!(!is_valid(&mutated), "{} should be invalid", mutated);
            }
        }
    }

    #[test]
    fn test_display_formats_valid_numbers() {
        assert_eq!(display(VALID), "529.982.247-25");
        assert_eq!(display("529.982.247-25"), "529.982.247-25");
        assert_eq!(display(&canonicalize("123.456.789-09")), "123.456.789-09");
    }

    #[test]
    fn test_display_returns_malformed_input_unchanged() {
        assert_eq!(display(""), "");
        assert_eq!(display("1234"), "1234");
        assert_eq!(display("5299822472a"), "5299822472a");
    }

    #[test]
    fn test_display_pattern() {
        let shown = display(&canonicalize("390.533.447-05"));
        let bytes = shown.as_bytes();
        assert_eq!(bytes.len(), 14);
        assert_eq!(bytes[3], b'.');
        assert_eq!(bytes[7], b'.');
        assert_eq!(bytes[11], b'-');
        assert!(
            shown
                .bytes()
                .enumerate()
                .filter(|(i, _)| ![3, 7, 11].contains(i))
                .all(|(_, b)| b.is_ascii_digit())
        );
    }

    #[test]
    fn test_check_digit() {
        assert_eq!(check_digit(&[5, 2, 9, 9, 8, 2, 2, 4, 7]), 2);
        assert_eq!(check_digit(&[5, 2, 9, 9, 8, 2, 2, 4, 7, 2]), 5);
    }

    #[test]
    fn test_complete() {
        assert_eq!(complete([1, 2, 3, 4, 5, 6, 7, 8, 9]), "12345678909");
        assert_eq!(complete([0, 0, 0, 0, 0, 0, 0, 0, 1]), "00000000191");
        assert!(is_valid(&complete([5, 2, 9, 9, 8, 2, 2, 4, 7])));
    }

    #[test]
    fn test_complete_repeated_base_is_not_valid() {
        let cpf = complete([1; BASE_LENGTH]);
        assert_eq!(cpf, "11111111111");
        assert!(!is_valid(&cpf));
    }
}
