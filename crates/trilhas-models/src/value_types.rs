//! Validated Brazilian identifiers.
//!
//! [`Cpf`] (national taxpayer id) and [`PhoneNumber`] can only be obtained by
//! running the raw input through validation, so holding one proves the value
//! is well-formed. Both store the normalized form: 11 digits for a CPF, and
//! `+55` followed by area code and subscriber number for a phone.
//!
//! Validation is pure: the same input always yields the same output or the
//! same kind of failure.
//!
//! # Example
//!
//! ```ignore
//! use trilhas_models::value_types::{Cpf, PhoneNumber};
//!
//! let cpf: Cpf = "529.982.247-25".parse()?;
//! assert_eq!(cpf.as_str(), "52998224725");
//!
//! let phone: PhoneNumber = "(11) 98765-4321".parse()?;
//! assert_eq!(phone.as_str(), "+5511987654321");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error type for value type parsing failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueTypeError {
    /// Wrong length, wrong shape, or a known-invalid sequence.
    Format(String),
    /// Well-formed, but a verification digit does not match.
    Checksum(String),
}

impl std::error::Error for ValueTypeError {}

impl fmt::Display for ValueTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Format(msg) => write!(f, "Invalid format: {}", msg),
            Self::Checksum(msg) => write!(f, "Invalid checksum: {}", msg),
        }
    }
}

fn digits_of(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

// ============================================================================
// CPF
// ============================================================================

const CPF_LEN: usize = 11;

/// Weighted mod-11 verification digit over `digits`.
///
/// Weights run from `digits.len() + 1` down to 2.
fn cpf_check_digit(digits: &[u32]) -> u32 {
    let top = digits.len() as u32 + 1;
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, d)| d * (top - i as u32))
        .sum();

    match sum % 11 {
        r if r < 2 => 0,
        r => 11 - r,
    }
}

/// Strips punctuation from `raw` and validates it as a CPF.
///
/// Returns the 11-digit normalized string.
///
/// # Errors
///
/// - [`ValueTypeError::Format`] unless exactly 11 digits remain, or when all
///   of them are the same digit
/// - [`ValueTypeError::Checksum`] when either verification digit is wrong
pub fn normalize_cpf(raw: &str) -> Result<String, ValueTypeError> {
    let normalized = digits_of(raw);

    if normalized.len() != CPF_LEN {
        return Err(ValueTypeError::Format(format!(
            "CPF must have {} digits, got {}",
            CPF_LEN,
            normalized.len()
        )));
    }

    let digits: Vec<u32> = normalized.chars().filter_map(|c| c.to_digit(10)).collect();

    if digits.iter().all(|d| *d == digits[0]) {
        return Err(ValueTypeError::Format(
            "CPF cannot be a repeated sequence".into(),
        ));
    }

    let first = cpf_check_digit(&digits[..9]);
    let second = cpf_check_digit(&digits[..10]);

    if first != digits[9] || second != digits[10] {
        return Err(ValueTypeError::Checksum(format!(
            "'{}' has wrong verification digits",
            normalized
        )));
    }

    Ok(normalized)
}

pub fn is_valid_cpf(raw: &str) -> bool {
    normalize_cpf(raw).is_ok()
}

/// A validated CPF, stored as 11 digits.
#[derive(Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Cpf(String);

impl Cpf {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, ValueTypeError> {
        normalize_cpf(raw.as_ref()).map(Self)
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Human-readable `000.000.000-00` form.
    pub fn formatted(&self) -> String {
        let d = &self.0;
        if d.len() != CPF_LEN {
            return d.clone();
        }
        format!("{}.{}.{}-{}", &d[0..3], &d[3..6], &d[6..9], &d[9..11])
    }
}

impl fmt::Debug for Cpf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cpf({})", self.0)
    }
}

impl fmt::Display for Cpf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Cpf {
    type Err = ValueTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Cpf {
    type Error = ValueTypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Cpf {
    type Error = ValueTypeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl AsRef<str> for Cpf {
    #[inline]
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<Cpf> for String {
    fn from(cpf: Cpf) -> String {
        cpf.0
    }
}

impl<'de> Deserialize<'de> for Cpf {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// PhoneNumber
// ============================================================================

const COUNTRY_CODE: &str = "55";

/// Brazilian area codes (DDD) in service.
const VALID_AREA_CODES: [u8; 67] = [
    11, 12, 13, 14, 15, 16, 17, 18, 19, // SP
    21, 22, 24, // RJ
    27, 28, // ES
    31, 32, 33, 34, 35, 37, 38, // MG
    41, 42, 43, 44, 45, 46, // PR
    47, 48, 49, // SC
    51, 53, 54, 55, // RS
    61, // DF
    62, 64, // GO
    63, // TO
    65, 66, // MT
    67, // MS
    68, // AC
    69, // RO
    71, 73, 74, 75, 77, // BA
    79, // SE
    81, 87, // PE
    82, // AL
    83, // PB
    84, // RN
    85, 88, // CE
    86, 89, // PI
    91, 93, 94, // PA
    92, 97, // AM
    95, // RR
    96, // AP
    98, 99, // MA
];

pub fn is_valid_area_code(code: u8) -> bool {
    VALID_AREA_CODES.contains(&code)
}

/// Strips punctuation from `raw` and validates it as a Brazilian phone number.
///
/// A leading `55` country code is dropped when more than 11 digits are
/// present. Returns `+55` followed by the area code and subscriber number.
///
/// # Errors
///
/// [`ValueTypeError::Format`] when the length is not 10 or 11 digits, the
/// area code is not in service, a 9-digit subscriber number does not start
/// with `9`, or an 8-digit one does.
pub fn normalize_phone(raw: &str) -> Result<String, ValueTypeError> {
    let mut digits = digits_of(raw);

    if digits.starts_with(COUNTRY_CODE) && digits.len() > 11 {
        digits.replace_range(..COUNTRY_CODE.len(), "");
    }

    if digits.len() != 10 && digits.len() != 11 {
        return Err(ValueTypeError::Format(format!(
            "phone number must have 10 or 11 digits, got {}",
            digits.len()
        )));
    }

    let (area, subscriber) = digits.split_at(2);

    let area_code: u8 = area
        .parse()
        .map_err(|_| ValueTypeError::Format(format!("invalid area code '{}'", area)))?;
    if !is_valid_area_code(area_code) {
        return Err(ValueTypeError::Format(format!(
            "area code {} is not in service",
            area
        )));
    }

    let leads_with_nine = subscriber.starts_with('9');
    match (subscriber.len(), leads_with_nine) {
        (9, true) | (8, false) => {}
        (9, false) => {
            return Err(ValueTypeError::Format(
                "mobile numbers must start with 9".into(),
            ));
        }
        _ => {
            return Err(ValueTypeError::Format(
                "landline numbers cannot start with 9".into(),
            ));
        }
    }

    Ok(format!("+{}{}{}", COUNTRY_CODE, area, subscriber))
}

pub fn is_valid_phone(raw: &str) -> bool {
    normalize_phone(raw).is_ok()
}

/// A validated Brazilian phone number in `+55AANNNNNNNNN` form.
#[derive(Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Length of the `+55` prefix.
    const PREFIX_LEN: usize = 3;

    pub fn new(raw: impl AsRef<str>) -> Result<Self, ValueTypeError> {
        normalize_phone(raw.as_ref()).map(Self)
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn into_inner(self) -> String {
        self.0
    }

    pub fn area_code(&self) -> &str {
        self.0
            .get(Self::PREFIX_LEN..Self::PREFIX_LEN + 2)
            .unwrap_or("")
    }

    pub fn subscriber_number(&self) -> &str {
        self.0.get(Self::PREFIX_LEN + 2..).unwrap_or("")
    }

    /// Mobile numbers have a 9-digit subscriber number.
    pub fn is_mobile(&self) -> bool {
        self.subscriber_number().len() == 9
    }
}

impl fmt::Debug for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PhoneNumber({})", self.0)
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PhoneNumber {
    type Err = ValueTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for PhoneNumber {
    type Error = ValueTypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for PhoneNumber {
    type Error = ValueTypeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl AsRef<str> for PhoneNumber {
    #[inline]
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<PhoneNumber> for String {
    fn from(phone: PhoneNumber) -> String {
        phone.0
    }
}

impl<'de> Deserialize<'de> for PhoneNumber {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// Tests
// ============================================================================
