mod consts;
mod parse;
mod prelude;
mod render;
mod types;

pub use consts::*;
pub use render::{DateFormatter, DateLike, EnglishNames, FormatArg, NameProvider, RenderError};
pub use types::{
    DayDisplay, Field, FieldOrder, MonthDisplay, NameStyle, Separator, WeekdayDisplay, Width,
    YearDisplay, YearLength,
};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A parsed, validated date pattern.
///
/// Produced once by [`parse_date_format_string`] (or `str::parse`) and never
/// mutated afterwards; rendering only reads it. It is also the data contract
/// for callers that cache parsed formats: display fields left out of a
/// serialized descriptor fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateFormat {
    order: FieldOrder,
    separator: Separator,
    #[serde(default)]
    weekday_display: WeekdayDisplay,
    #[serde(default)]
    day_display: DayDisplay,
    #[serde(default)]
    month_display: MonthDisplay,
    #[serde(default)]
    year_display: YearDisplay,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    source_pattern: Option<String>,
}

/// Error raised for a malformed or ambiguous date pattern.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    /// A leading `W` run is not followed by a separator and the date fields.
    #[error(
        "Invalid weekday prefix in {pattern:?}: use \"WWW\" or \"WWWW\" followed by a separator"
    )]
    InvalidWeekdayPrefix { pattern: String },

    #[error("Invalid weekday token length {length}: use \"WWW\" or \"WWWW\"")]
    InvalidWeekdayLength { length: usize },

    /// No non-letter text between two date tokens.
    #[error("Invalid date format {pattern:?}: missing separator")]
    MissingSeparator { pattern: String },

    #[error("Invalid date format: inconsistent separators ({})", quote_all(.separators))]
    InconsistentSeparators { separators: Vec<String> },

    /// Zero or several tokens start with the field's letter.
    #[error("Expected exactly one {field} token ({}), found {count}", .field.valid_tokens())]
    FieldCount { field: Field, count: usize },

    #[error("Invalid length of {field} token {token:?}: expected {}", .field.valid_tokens())]
    FieldLength { field: Field, token: String },

    #[error("Unknown token {token:?}: expected day (D), month (M) or year (Y) tokens")]
    UnknownToken { token: String },

    #[error("Invalid field order {0:?}: expected each of D, M and Y exactly once")]
    InvalidOrder(String),

    #[error("Invalid separator {0:?}: must be non-empty and contain no letters")]
    InvalidSeparator(String),

    #[error("Unsupported width {0} (must be 1 or 2)")]
    UnsupportedWidth(u8),

    #[error("Unsupported year length {0} (must be 2 or 4)")]
    UnsupportedYearLength(u8),
}

fn quote_all(values: &[String]) -> String {
    values
        .iter()
        .map(|v| format!("{v:?}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parses a compact pattern such as `"DD/MM/YYYY"` or `"WWW, DD-MMM-YY"`.
///
/// # Errors
/// Returns a [`FormatError`] describing the first problem found; a pattern is
/// never partially accepted.
pub fn parse_date_format_string(pattern: &str) -> Result<DateFormat, FormatError> {
    parse::parse(pattern)
}

/// Renders `date` using a pattern string or an already parsed [`DateFormat`],
/// with English month and weekday names.
///
/// # Errors
/// Returns [`RenderError::Format`] if the pattern is invalid and
/// [`RenderError::InvalidDate`] if `date` cannot be read as a calendar date.
pub fn format_date<'a>(
    date: impl Into<DateLike>,
    format: impl Into<FormatArg<'a>>,
) -> Result<String, RenderError> {
    DateFormatter::english().format(date, format)
}

impl DateFormat {
    /// Creates a format with default displays: no weekday, `DD`, `MM`, `YYYY`.
    pub const fn new(order: FieldOrder, separator: Separator) -> Self {
        Self {
            order,
            separator,
            weekday_display: WeekdayDisplay::None,
            day_display: DayDisplay {
                length: Width::Padded,
            },
            month_display: MonthDisplay::Numeric {
                length: Width::Padded,
            },
            year_display: YearDisplay {
                length: YearLength::Four,
            },
            source_pattern: None,
        }
    }

    #[must_use]
    pub fn with_weekday(mut self, weekday_display: WeekdayDisplay) -> Self {
        self.weekday_display = weekday_display;
        self
    }

    #[must_use]
    pub fn with_day(mut self, day_display: DayDisplay) -> Self {
        self.day_display = day_display;
        self
    }

    #[must_use]
    pub fn with_month(mut self, month_display: MonthDisplay) -> Self {
        self.month_display = month_display;
        self
    }

    #[must_use]
    pub fn with_year(mut self, year_display: YearDisplay) -> Self {
        self.year_display = year_display;
        self
    }

    #[must_use]
    pub(crate) fn with_source_pattern(mut self, pattern: &str) -> Self {
        self.source_pattern = Some(pattern.to_owned());
        self
    }

    pub const fn order(&self) -> FieldOrder {
        self.order
    }

    pub const fn separator(&self) -> &Separator {
        &self.separator
    }

    pub const fn weekday_display(&self) -> &WeekdayDisplay {
        &self.weekday_display
    }

    pub const fn day_display(&self) -> DayDisplay {
        self.day_display
    }

    pub const fn month_display(&self) -> MonthDisplay {
        self.month_display
    }

    pub const fn year_display(&self) -> YearDisplay {
        self.year_display
    }

    /// The pattern this format was parsed from, if any
    pub fn source_pattern(&self) -> Option<&str> {
        self.source_pattern.as_deref()
    }

    /// Canonical pattern string; parsing it yields the same layout.
    pub fn to_pattern(&self) -> String {
        let tokens = self.order.fields().map(|field| match field {
            Field::Day => self.day_display.token(),
            Field::Month => self.month_display.token(),
            Field::Year => self.year_display.token(),
        });
        format!(
            "{}{}",
            self.weekday_display.prefix(),
            tokens.join(self.separator.as_str())
        )
    }
}

impl fmt::Display for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_pattern())
    }
}

impl FromStr for DateFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse::parse(s)
    }
}

impl TryFrom<&str> for DateFormat {
    type Error = FormatError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        parse::parse(value)
    }
}
