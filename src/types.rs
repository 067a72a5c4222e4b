use crate::consts::{
    DAY_LETTER, MONTH_LETTER, MONTH_LONG_LEN, MONTH_SHORT_LEN, WEEKDAY_LETTER, WEEKDAY_LONG_LEN,
    WEEKDAY_SHORT_LEN, YEAR_LETTER,
};
use crate::prelude::*;
use crate::FormatError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the three date fields a pattern must contain exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Field {
    #[display(fmt = "day")]
    Day,
    #[display(fmt = "month")]
    Month,
    #[display(fmt = "year")]
    Year,
}

impl Field {
    /// All fields, in the order they are validated.
    pub const ALL: [Self; 3] = [Self::Day, Self::Month, Self::Year];

    /// The (uppercase) pattern letter that starts a token for this field
    pub const fn letter(self) -> char {
        match self {
            Self::Day => DAY_LETTER,
            Self::Month => MONTH_LETTER,
            Self::Year => YEAR_LETTER,
        }
    }

    /// Looks up a field by its pattern letter, case-insensitively
    pub const fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            DAY_LETTER => Some(Self::Day),
            MONTH_LETTER => Some(Self::Month),
            YEAR_LETTER => Some(Self::Year),
            _ => None,
        }
    }

    /// The field a token belongs to, judged by its first letter
    pub fn of_token(token: &str) -> Option<Self> {
        token.chars().next().and_then(Self::from_letter)
    }

    /// Human readable list of the tokens accepted for this field
    pub const fn valid_tokens(self) -> &'static str {
        match self {
            Self::Day => "D or DD",
            Self::Month => "M, MM, MMM or MMMM",
            Self::Year => "YY or YYYY",
        }
    }
}

/// The order of the date fields, guaranteed to be a permutation of D, M and Y.
/// Serializes as its letters, e.g. `"DMY"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FieldOrder([Field; 3]);

impl FieldOrder {
    /// Creates a new order, validating that every field appears once
    ///
    /// # Errors
    /// Returns `FormatError::InvalidOrder` if a field is repeated.
    pub fn new(fields: [Field; 3]) -> Result<Self, FormatError> {
        let [a, b, c] = fields;
        if a == b || b == c || a == c {
            return Err(FormatError::InvalidOrder(
                fields.iter().map(|f| f.letter()).collect(),
            ));
        }
        Ok(Self(fields))
    }

    /// Returns the fields in display order
    #[inline]
    pub const fn fields(self) -> [Field; 3] {
        self.0
    }
}

impl FromStr for FieldOrder {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || FormatError::InvalidOrder(s.to_owned());
        let fields: Vec<Field> = s
            .chars()
            .map(Field::from_letter)
            .collect::<Option<_>>()
            .ok_or_else(invalid)?;
        let fields: [Field; 3] = fields.try_into().map_err(|_| invalid())?;
        Self::new(fields).map_err(|_| invalid())
    }
}

impl TryFrom<String> for FieldOrder {
    type Error = FormatError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FieldOrder> for String {
    fn from(order: FieldOrder) -> Self {
        order.to_string()
    }
}

impl fmt::Display for FieldOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|field| write!(f, "{}", field.letter()))
    }
}

/// Literal text placed between two tokens.
/// Never empty and never contains ASCII letters, which would read as tokens.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deref, Display, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Separator(String);

impl Separator {
    /// Creates a new separator
    ///
    /// # Errors
    /// Returns `FormatError::InvalidSeparator` if the text is empty or contains a letter.
    pub fn new(value: impl Into<String>) -> Result<Self, FormatError> {
        let value = value.into();
        if value.is_empty() || value.chars().any(|c| c.is_ascii_alphabetic()) {
            return Err(FormatError::InvalidSeparator(value));
        }
        Ok(Self(value))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Separator {
    type Error = FormatError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Separator {
    type Error = FormatError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Separator> for String {
    fn from(separator: Separator) -> Self {
        separator.0
    }
}

/// Minimum number of digits for a numeric day or month.
/// Serializes as `1` or `2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Width {
    /// No zero-padding (`D`, `M`)
    Natural,
    /// Zero-padded to two digits (`DD`, `MM`)
    #[default]
    Padded,
}

impl Width {
    pub const fn from_digits(digits: usize) -> Option<Self> {
        match digits {
            1 => Some(Self::Natural),
            2 => Some(Self::Padded),
            _ => None,
        }
    }

    #[inline]
    pub const fn digits(self) -> usize {
        match self {
            Self::Natural => 1,
            Self::Padded => 2,
        }
    }
}

impl TryFrom<u8> for Width {
    type Error = FormatError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_digits(usize::from(value)).ok_or(FormatError::UnsupportedWidth(value))
    }
}

impl From<Width> for u8 {
    fn from(width: Width) -> Self {
        match width {
            Width::Natural => 1,
            Width::Padded => 2,
        }
    }
}

/// Number of year digits rendered. Serializes as `2` or `4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum YearLength {
    /// Last two digits (`YY`)
    Two,
    /// Full year (`YYYY`)
    #[default]
    Four,
}

impl YearLength {
    pub const fn from_digits(digits: usize) -> Option<Self> {
        match digits {
            2 => Some(Self::Two),
            4 => Some(Self::Four),
            _ => None,
        }
    }

    #[inline]
    pub const fn digits(self) -> usize {
        match self {
            Self::Two => 2,
            Self::Four => 4,
        }
    }
}

impl TryFrom<u8> for YearLength {
    type Error = FormatError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_digits(usize::from(value)).ok_or(FormatError::UnsupportedYearLength(value))
    }
}

impl From<YearLength> for u8 {
    fn from(length: YearLength) -> Self {
        match length {
            YearLength::Two => 2,
            YearLength::Four => 4,
        }
    }
}

/// Whether a weekday or month name is abbreviated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NameStyle {
    #[display(fmt = "short")]
    Short,
    #[display(fmt = "long")]
    Long,
}

/// Optional weekday name printed before the date fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum WeekdayDisplay {
    #[default]
    None,
    Short { separator: Separator },
    Long { separator: Separator },
}

impl WeekdayDisplay {
    pub fn new(style: NameStyle, separator: Separator) -> Self {
        match style {
            NameStyle::Short => Self::Short { separator },
            NameStyle::Long => Self::Long { separator },
        }
    }

    /// Maps the number of leading `W`s to a weekday display
    pub fn from_token_len(len: usize, separator: Separator) -> Option<Self> {
        match len {
            WEEKDAY_SHORT_LEN => Some(Self::Short { separator }),
            WEEKDAY_LONG_LEN => Some(Self::Long { separator }),
            _ => None,
        }
    }

    pub const fn style(&self) -> Option<NameStyle> {
        match self {
            Self::None => None,
            Self::Short { .. } => Some(NameStyle::Short),
            Self::Long { .. } => Some(NameStyle::Long),
        }
    }

    pub const fn separator(&self) -> Option<&Separator> {
        match self {
            Self::None => None,
            Self::Short { separator } | Self::Long { separator } => Some(separator),
        }
    }

    /// The pattern prefix for this display, e.g. `"WWW, "`
    pub fn prefix(&self) -> String {
        let len = match self {
            Self::None => return String::new(),
            Self::Short { .. } => WEEKDAY_SHORT_LEN,
            Self::Long { .. } => WEEKDAY_LONG_LEN,
        };
        let separator = self.separator().map_or("", Separator::as_str);
        format!("{}{separator}", repeat(WEEKDAY_LETTER, len))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct DayDisplay {
    pub length: Width,
}

impl DayDisplay {
    pub const fn from_token_len(len: usize) -> Option<Self> {
        match Width::from_digits(len) {
            Some(length) => Some(Self { length }),
            None => None,
        }
    }

    pub fn token(self) -> String {
        repeat(DAY_LETTER, self.length.digits())
    }
}

/// How the month is rendered: a (possibly padded) number or a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MonthDisplay {
    Numeric { length: Width },
    Short,
    Long,
}

impl Default for MonthDisplay {
    fn default() -> Self {
        Self::Numeric {
            length: Width::default(),
        }
    }
}

impl MonthDisplay {
    pub const fn from_token_len(len: usize) -> Option<Self> {
        match len {
            MONTH_SHORT_LEN => Some(Self::Short),
            MONTH_LONG_LEN => Some(Self::Long),
            _ => match Width::from_digits(len) {
                Some(length) => Some(Self::Numeric { length }),
                None => None,
            },
        }
    }

    /// The name style, or `None` for a numeric month
    pub const fn style(self) -> Option<NameStyle> {
        match self {
            Self::Numeric { .. } => None,
            Self::Short => Some(NameStyle::Short),
            Self::Long => Some(NameStyle::Long),
        }
    }

    pub fn token(self) -> String {
        let len = match self {
            Self::Numeric { length } => length.digits(),
            Self::Short => MONTH_SHORT_LEN,
            Self::Long => MONTH_LONG_LEN,
        };
        repeat(MONTH_LETTER, len)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct YearDisplay {
    pub length: YearLength,
}

impl YearDisplay {
    pub const fn from_token_len(len: usize) -> Option<Self> {
        match YearLength::from_digits(len) {
            Some(length) => Some(Self { length }),
            None => None,
        }
    }

    pub fn token(self) -> String {
        repeat(YEAR_LETTER, self.length.digits())
    }
}

fn repeat(letter: char, len: usize) -> String {
    std::iter::repeat_n(letter, len).collect()
}
