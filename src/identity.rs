//! CPF validation and formatting
//!
//! The CPF is the 11-digit Brazilian taxpayer identifier carrying two
//! embedded check digits. Validity is a pure function of the digits;
//! no external state is consulted.

use std::fmt;
use std::str::FromStr;

/// Digits in a CPF after stripping formatting characters
pub const CPF_DIGITS: usize = 11;

// ============================================================================
// Validation Errors
// ============================================================================

/// Reasons a CPF candidate is rejected
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum CpfError {
    #[error("CPF must contain {CPF_DIGITS} digits, got {0}")]
    WrongLength(usize),

    #[error("CPF with all digits identical is never assigned")]
    RepeatedDigits,

    #[error("CPF check digits do not match")]
    CheckDigit,
}

// ============================================================================
// Pure validation
// ============================================================================

/// Strip every non-digit character from the input.
pub fn strip_non_digits(input: &str) -> String {
    input.chars().filter(char::is_ascii_digit).collect()
}

fn digit_values(input: &str) -> Vec<u32> {
    input
        .chars()
        .filter_map(|c| c.to_digit(10))
        .collect()
}

/// Verify the check digit at position `len` against the weighted sum of the
/// preceding `len` digits. Weights run from `len + 1` down to 2.
fn verify_check_digit(digits: &[u32], len: usize) -> bool {
    let first_weight = (len + 1) as u32;
    let sum: u32 = digits[..len]
        .iter()
        .enumerate()
        .map(|(i, &d)| d * (first_weight - i as u32))
        .sum();

    let mut remainder = (sum * 10) % 11;
    if remainder >= 10 {
        remainder = 0;
    }
    remainder == digits[len]
}

/// Check whether `input` is a structurally valid CPF.
///
/// Formatting characters are ignored; only the digit sequence matters.
/// Empty or garbage input returns `false`, never an error.
///
/// # Examples
/// ```
/// use bankmore_client::identity::is_valid_cpf;
///
/// assert!(is_valid_cpf("529.982.247-25"));
/// assert!(!is_valid_cpf("111.111.111-11"));
/// assert!(!is_valid_cpf(""));
/// ```
pub fn is_valid_cpf(input: &str) -> bool {
    let digits = digit_values(input);

    if digits.len() != CPF_DIGITS {
        return false;
    }

    // Sequences like "00000000000" pass the check-digit math but are
    // never assigned.
    if digits.iter().all(|&d| d == digits[0]) {
        return false;
    }

    verify_check_digit(&digits, 9) && verify_check_digit(&digits, 10)
}

/// Render a CPF digit sequence as `###.###.###-##` for display.
///
/// Performs no validation: input that does not strip to exactly 11 digits
/// is returned as its bare digit sequence. The formatted output strips
/// back to the same digits it was built from.
pub fn format_cpf(input: &str) -> String {
    let digits = strip_non_digits(input);
    if digits.len() != CPF_DIGITS {
        return digits;
    }
    format!(
        "{}.{}.{}-{}",
        &digits[0..3],
        &digits[3..6],
        &digits[6..9],
        &digits[9..11]
    )
}

// ============================================================================
// Cpf - Validated Identity Number (Private Field)
// ============================================================================

/// A validated CPF, stored as its 11 normalized digits.
///
/// The field is private to force validation through [`Cpf::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cpf(String);

impl Cpf {
    /// Parse and validate a CPF from arbitrary user input.
    ///
    /// Formatting characters (dots, dashes, spaces) are stripped before
    /// validation, so `"529.982.247-25"` and `"52998224725"` are equivalent.
    ///
    /// # Examples
    /// ```
    /// use bankmore_client::identity::Cpf;
    ///
    /// let cpf = Cpf::parse("529.982.247-25").unwrap();
    /// assert_eq!(cpf.as_str(), "52998224725");
    /// assert_eq!(cpf.formatted(), "529.982.247-25");
    /// ```
    pub fn parse(input: &str) -> Result<Self, CpfError> {
        let digits = strip_non_digits(input);

        if digits.len() != CPF_DIGITS {
            return Err(CpfError::WrongLength(digits.len()));
        }

        let values = digit_values(&digits);
        if values.iter().all(|&d| d == values[0]) {
            return Err(CpfError::RepeatedDigits);
        }

        if !verify_check_digit(&values, 9) || !verify_check_digit(&values, 10) {
            return Err(CpfError::CheckDigit);
        }

        Ok(Self(digits))
    }

    /// The normalized 11-digit sequence.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The display form, `###.###.###-##`.
    pub fn formatted(&self) -> String {
        format_cpf(&self.0)
    }

    /// Convert into the owned digit string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Cpf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.formatted())
    }
}

impl AsRef<str> for Cpf {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for Cpf {
    type Err = CpfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Cpf::parse(s)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_valid_cpf() {
        assert!(is_valid_cpf("52998224725"));
        assert!(is_valid_cpf("529.982.247-25"));
        assert!(is_valid_cpf("111.444.777-35"));
    }

    #[test]
    fn test_altered_check_digit_rejected() {
        // "111.444.777-35" is valid; changing the last digit breaks digit 2
        assert!(!is_valid_cpf("111.444.777-30"));
        // Breaking the first check digit
        assert!(!is_valid_cpf("111.444.778-35"));
        assert!(!is_valid_cpf("52998224726"));
    }

    #[test]
    fn test_repeated_digits_rejected() {
        for d in 0u8..=9 {
            let cpf: String = std::iter::repeat_n(char::from(b'0' + d), 11).collect();
            assert!(!is_valid_cpf(&cpf), "repeated digit {} must fail", d);
        }
        assert_eq!(Cpf::parse("11111111111"), Err(CpfError::RepeatedDigits));
    }

    #[test]
    fn test_wrong_length_rejected() {
        assert!(!is_valid_cpf(""));
        assert!(!is_valid_cpf("5299822472"));
        assert!(!is_valid_cpf("529982247251"));
        assert!(!is_valid_cpf("abc"));
        assert_eq!(Cpf::parse(""), Err(CpfError::WrongLength(0)));
        assert_eq!(Cpf::parse("123"), Err(CpfError::WrongLength(3)));
    }

    #[test]
    fn test_interleaved_garbage_ignored() {
        // Digits are extracted positionally; everything else is dropped
        assert!(is_valid_cpf("5a2b9c9d8e2f2g4h7i2j5"));
        assert!(is_valid_cpf(" 529 982 247 25 "));
    }

    #[test]
    fn test_format_cpf() {
        assert_eq!(format_cpf("52998224725"), "529.982.247-25");
        assert_eq!(format_cpf("529.982.247-25"), "529.982.247-25");
        assert_eq!(format_cpf(""), "");
        // Too short: bare digits, no mask applied
        assert_eq!(format_cpf("12345"), "12345");
    }

    #[test]
    fn test_format_is_inverse_of_strip() {
        let raw = "52998224725";
        assert_eq!(strip_non_digits(&format_cpf(raw)), raw);

        let already_formatted = "529.982.247-25";
        assert_eq!(
            format_cpf(&strip_non_digits(already_formatted)),
            already_formatted
        );
    }

    #[test]
    fn test_formatter_does_not_validate() {
        // Structurally well-formed but invalid CPFs still get the mask
        assert_eq!(format_cpf("11111111111"), "111.111.111-11");
        assert_eq!(format_cpf("12345678900"), "123.456.789-00");
    }

    #[test]
    fn test_cpf_accessors() {
        let cpf = Cpf::parse("529.982.247-25").unwrap();
        assert_eq!(cpf.as_str(), "52998224725");
        assert_eq!(cpf.formatted(), "529.982.247-25");
        assert_eq!(cpf.to_string(), "529.982.247-25");
        assert_eq!(cpf, "52998224725".parse().unwrap());
    }

    #[test]
    fn test_check_digit_error() {
        assert_eq!(Cpf::parse("52998224720"), Err(CpfError::CheckDigit));
    }
}
