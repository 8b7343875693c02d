//! Small validated value types shared across the front desk crates.

use std::fmt;
use std::str::FromStr;

/// Why a piece of text was refused as a person's name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NameError {
    #[error("name cannot be empty")]
    Empty,
    #[error("name contains a control character at position {0}")]
    ControlCharacter(usize),
}

/// A single name part (first, middle or last name) as it appears on a patient record.
///
/// Construction trims the ends and collapses every inner run of whitespace to one space, so
/// `"  Ada   Obi "` is stored as `"Ada Obi"`. Tabs and newlines count as whitespace; any other
/// control character is refused.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PersonName(String);

impl PersonName {
    /// # Errors
    ///
    /// Returns [`NameError::Empty`] if nothing but whitespace was given, or
    /// [`NameError::ControlCharacter`] with the character offset of the first control character.
    pub fn new(input: impl AsRef<str>) -> Result<Self, NameError> {
        let input = input.as_ref();
        if let Some(pos) = input
            .chars()
            .position(|c| c.is_control() && !c.is_whitespace())
        {
            return Err(NameError::ControlCharacter(pos));
        }

        let normalised = input.split_whitespace().collect::<Vec<_>>().join(" ");
        if normalised.is_empty() {
            return Err(NameError::Empty);
        }
        Ok(Self(normalised))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of characters (not bytes).
    pub fn char_len(&self) -> usize {
        self.0.chars().count()
    }
}

impl fmt::Display for PersonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PersonName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for PersonName {
    type Err = NameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for PersonName {
    type Error = NameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PersonName> for String {
    fn from(name: PersonName) -> Self {
        name.0
    }
}

/// A wallet amount in whole Nigerian naira.
///
/// Amounts are unsigned, so a negative balance cannot be represented. `Display` renders the
/// amount the way the appointment list shows it: `₦` followed by the integer with thousands
/// separators and no fractional part.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(transparent)]
pub struct Naira(u64);

impl Naira {
    pub const ZERO: Naira = Naira(0);

    pub const fn new(amount: u64) -> Self {
        Self(amount)
    }

    pub const fn amount(self) -> u64 {
        self.0
    }
}

impl From<u64> for Naira {
    fn from(amount: u64) -> Self {
        Self(amount)
    }
}

impl fmt::Display for Naira {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.0.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        write!(f, "₦{grouped}")
    }
}
