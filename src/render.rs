use std::sync::LazyLock;

use chrono::{DateTime, Datelike, Local, Month, NaiveDate, NaiveDateTime, TimeZone, Weekday};
use log::{debug, trace};
use regex::Regex;

use crate::consts::{
    CENTURY, DATE_FORMATS, DATETIME_FORMATS, MONTH_SHORT_LEN, WEEKDAY_NAMES, WEEKDAY_SHORT_LEN,
};
use crate::prelude::*;
use crate::types::{Field, MonthDisplay, NameStyle, Width, YearLength};
use crate::{DateFormat, FormatError};

/// A plain calendar date such as `2024-03-15`
static ISO_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("ISO date regex is valid"));

/// Error returned when a date cannot be rendered.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    /// The pattern string was rejected by the parser.
    #[error(transparent)]
    Format(#[from] FormatError),

    /// The input could not be read as a calendar date.
    #[error("Invalid date: {input:?}")]
    InvalidDate { input: String },
}

/// Anything that can be coerced into a local calendar date.
#[derive(Debug, Clone, PartialEq, Eq, From)]
pub enum DateLike {
    /// Used as is
    Date(NaiveDate),
    /// `YYYY-MM-DD` is read as a local calendar date; other text is parsed
    /// leniently
    Text(String),
    /// Milliseconds since the Unix epoch, read in the system local zone
    Timestamp(i64),
}

impl From<&str> for DateLike {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<NaiveDateTime> for DateLike {
    fn from(value: NaiveDateTime) -> Self {
        Self::Date(value.date())
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for DateLike {
    fn from(value: DateTime<Tz>) -> Self {
        Self::Date(value.date_naive())
    }
}

impl DateLike {
    /// Resolves the calendar date to render.
    ///
    /// # Errors
    /// Returns `RenderError::InvalidDate` if the input is not a readable date.
    pub fn to_local_date(&self) -> Result<NaiveDate, RenderError> {
        match self {
            Self::Date(date) => Ok(*date),
            Self::Text(text) => coerce_text(text),
            Self::Timestamp(millis) => DateTime::from_timestamp_millis(*millis)
                .map(|utc| utc.with_timezone(&Local).date_naive())
                .ok_or_else(|| RenderError::InvalidDate {
                    input: millis.to_string(),
                }),
        }
    }
}

fn coerce_text(text: &str) -> Result<NaiveDate, RenderError> {
    let trimmed = text.trim();
    let invalid = || RenderError::InvalidDate {
        input: text.to_owned(),
    };

    // A bare calendar date never goes through an instant, so no zone can shift it
    if ISO_DATE.is_match(trimmed) {
        return NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|_| invalid());
    }

    parse_generic(trimmed).ok_or_else(|| {
        debug!("Could not coerce {text:?} to a date");
        invalid()
    })
}

fn parse_generic(text: &str) -> Option<NaiveDate> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(text) {
        return Some(instant.with_timezone(&Local).date_naive());
    }
    if let Ok(instant) = DateTime::parse_from_rfc2822(text) {
        return Some(instant.with_timezone(&Local).date_naive());
    }
    // Without an offset the wall-clock time is already local
    try_parse(text, DATETIME_FORMATS, |s, f| {
        NaiveDateTime::parse_from_str(s, f).ok()
    })
    .map(|datetime| datetime.date())
    .or_else(|| try_parse(text, DATE_FORMATS, |s, f| NaiveDate::parse_from_str(s, f).ok()))
}

fn try_parse<T, F>(text: &str, formats: &[&str], parser: F) -> Option<T>
where
    F: Fn(&str, &str) -> Option<T>,
{
    formats.iter().find_map(|format| {
        let parsed = parser(text, format);
        if parsed.is_none() {
            trace!("Failed to read {text:?} as {format:?}");
        }
        parsed
    })
}

/// Source of localized month and weekday names.
pub trait NameProvider {
    /// Name for `month` (1 = January)
    fn month_name(&self, month: u32, style: NameStyle) -> &str;

    fn weekday_name(&self, weekday: Weekday, style: NameStyle) -> &str;
}

/// English (en-GB) names: "Jan"/"January", "Fri"/"Friday".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct EnglishNames;

impl NameProvider for EnglishNames {
    fn month_name(&self, month: u32, style: NameStyle) -> &str {
        let name = u8::try_from(month)
            .ok()
            .and_then(|month| Month::try_from(month).ok())
            .map_or("", |month| month.name());
        abbreviate(name, style, MONTH_SHORT_LEN)
    }

    // chrono only exposes the three-letter form through `Display`
    fn weekday_name(&self, weekday: Weekday, style: NameStyle) -> &str {
        let name = WEEKDAY_NAMES
            .get(weekday.num_days_from_monday() as usize)
            .copied()
            .unwrap_or_default();
        abbreviate(name, style, WEEKDAY_SHORT_LEN)
    }
}

fn abbreviate(name: &'static str, style: NameStyle, len: usize) -> &'static str {
    match style {
        NameStyle::Short => name.get(..len).unwrap_or(name),
        NameStyle::Long => name,
    }
}

/// Either a pattern to parse or an already parsed format.
#[derive(Debug, Clone, Copy)]
pub enum FormatArg<'a> {
    Pattern(&'a str),
    Parsed(&'a DateFormat),
}

impl<'a> From<&'a str> for FormatArg<'a> {
    fn from(pattern: &'a str) -> Self {
        Self::Pattern(pattern)
    }
}

impl<'a> From<&'a String> for FormatArg<'a> {
    fn from(pattern: &'a String) -> Self {
        Self::Pattern(pattern)
    }
}

impl<'a> From<&'a DateFormat> for FormatArg<'a> {
    fn from(format: &'a DateFormat) -> Self {
        Self::Parsed(format)
    }
}

/// Renders dates with a fixed set of month and weekday names.
#[derive(Debug, Clone, Default)]
pub struct DateFormatter<N = EnglishNames> {
    names: N,
}

impl DateFormatter {
    /// A formatter with English names
    pub const fn english() -> Self {
        Self::new(EnglishNames)
    }
}

impl<N: NameProvider> DateFormatter<N> {
    pub const fn new(names: N) -> Self {
        Self { names }
    }

    pub const fn names(&self) -> &N {
        &self.names
    }

    /// Renders `date` with a pattern string or a parsed [`DateFormat`].
    ///
    /// A pattern is parsed before the date is looked at, so an invalid
    /// pattern is reported even when the date is invalid too.
    ///
    /// # Errors
    /// Returns `RenderError::Format` for an invalid pattern and
    /// `RenderError::InvalidDate` for an unreadable date.
    pub fn format<'a>(
        &self,
        date: impl Into<DateLike>,
        format: impl Into<FormatArg<'a>>,
    ) -> Result<String, RenderError> {
        let parsed;
        let format = match format.into() {
            FormatArg::Pattern(pattern) => {
                parsed = crate::parse::parse(pattern)?;
                &parsed
            }
            FormatArg::Parsed(format) => format,
        };
        let date = date.into().to_local_date()?;
        Ok(format.render_with(date, &self.names))
    }
}

impl DateFormat {
    /// Renders a calendar date with English names.
    pub fn render(&self, date: NaiveDate) -> String {
        self.render_with(date, &EnglishNames)
    }

    /// Renders a calendar date with names from `names`.
    pub fn render_with<N: NameProvider + ?Sized>(&self, date: NaiveDate, names: &N) -> String {
        let day = pad(date.day(), self.day_display.length);
        let month = match self.month_display {
            MonthDisplay::Numeric { length } => pad(date.month(), length),
            MonthDisplay::Short => names.month_name(date.month(), NameStyle::Short).to_owned(),
            MonthDisplay::Long => names.month_name(date.month(), NameStyle::Long).to_owned(),
        };
        let year = match self.year_display.length {
            YearLength::Four => format!("{:04}", date.year()),
            YearLength::Two => format!("{:02}", date.year().rem_euclid(CENTURY)),
        };

        let fields = self.order.fields().map(|field| match field {
            Field::Day => day.as_str(),
            Field::Month => month.as_str(),
            Field::Year => year.as_str(),
        });
        let date_str = fields.join(self.separator.as_str());

        let rendered = match (self.weekday_display.style(), self.weekday_display.separator()) {
            (Some(style), Some(separator)) => format!(
                "{}{separator}{date_str}",
                names.weekday_name(date.weekday(), style)
            ),
            _ => date_str,
        };
        trace!("Rendered {date} with {} as {rendered:?}", self);
        rendered
    }
}

fn pad(value: u32, width: Width) -> String {
    format!("{value:0width$}", width = width.digits())
}
