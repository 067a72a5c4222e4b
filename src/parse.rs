use std::sync::LazyLock;

use log::debug;
use regex::Regex;

use crate::consts::WEEKDAY_LETTER;
use crate::types::{
    DayDisplay, Field, FieldOrder, MonthDisplay, Separator, WeekdayDisplay, YearDisplay,
};
use crate::{DateFormat, FormatError};

/// `W+`, a non-letter separator, then the date fields
static WEEKDAY_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^(W+)([^A-Z]+)(.+)$").expect("weekday prefix regex is valid")
});

/// Alternating runs of letters and non-letters
static RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Z]+|[^A-Z]+").expect("run regex is valid"));

/// Parses a pattern such as `"WWW, DD/MM/YYYY"` into a [`DateFormat`].
///
/// Token recognition is case-insensitive; the pattern as given is kept as the
/// descriptor's source pattern and in error messages.
pub(crate) fn parse(pattern: &str) -> Result<DateFormat, FormatError> {
    let normalised = pattern.to_uppercase();
    let (weekday_display, date_format) = split_weekday_prefix(&normalised, pattern)?;

    let separator = consistent_separator(date_format, pattern)?;
    let sections = split_sections(date_format, &separator);

    // Duplicate or missing fields are rejected, never resolved. Missing fields
    // are reported first: "DD/DD/YYYY" lacks a month.
    let counts = Field::ALL.map(|field| (field, count_starts_with(&sections, field)));
    let missing = counts.iter().find(|(_, count)| *count == 0);
    let repeated = counts.iter().find(|(_, count)| *count > 1);
    if let Some(&(field, count)) = missing.or(repeated) {
        return Err(FormatError::FieldCount { field, count });
    }
    if let Some(token) = sections.iter().find(|s| Field::of_token(s).is_none()) {
        return Err(FormatError::UnknownToken {
            token: (*token).to_owned(),
        });
    }

    let fields: Vec<Field> = sections.iter().filter_map(|s| Field::of_token(s)).collect();
    let order = match <[Field; 3]>::try_from(fields) {
        Ok(fields) => FieldOrder::new(fields)?,
        Err(fields) => return Err(FormatError::InvalidOrder(letters(&fields))),
    };

    let day_token = field_token(&sections, Field::Day)?;
    let day_display = DayDisplay::from_token_len(day_token.len())
        .ok_or_else(|| invalid_length(Field::Day, day_token))?;

    let month_token = field_token(&sections, Field::Month)?;
    let month_display = MonthDisplay::from_token_len(month_token.len())
        .ok_or_else(|| invalid_length(Field::Month, month_token))?;

    let year_token = field_token(&sections, Field::Year)?;
    let year_display = YearDisplay::from_token_len(year_token.len())
        .ok_or_else(|| invalid_length(Field::Year, year_token))?;

    debug!("Parsed date pattern {pattern:?}: order {order}, separator {separator:?}");

    Ok(DateFormat::new(order, separator)
        .with_weekday(weekday_display)
        .with_day(day_display)
        .with_month(month_display)
        .with_year(year_display)
        .with_source_pattern(pattern))
}

/// Splits off a leading weekday token, returning the display and the rest of
/// the (uppercased) pattern.
fn split_weekday_prefix<'a>(
    normalised: &'a str,
    pattern: &str,
) -> Result<(WeekdayDisplay, &'a str), FormatError> {
    if !normalised.starts_with(WEEKDAY_LETTER) {
        return Ok((WeekdayDisplay::None, normalised));
    }

    let invalid = || FormatError::InvalidWeekdayPrefix {
        pattern: pattern.to_owned(),
    };
    let captures = WEEKDAY_PREFIX.captures(normalised).ok_or_else(invalid)?;
    let (Some(token), Some(separator), Some(rest)) =
        (captures.get(1), captures.get(2), captures.get(3))
    else {
        return Err(invalid());
    };

    let length = token.len();
    let separator = Separator::new(separator.as_str())?;
    let display = WeekdayDisplay::from_token_len(length, separator)
        .ok_or(FormatError::InvalidWeekdayLength { length })?;
    Ok((display, rest.as_str()))
}

/// Finds the separator used between date tokens.
///
/// Only non-letter runs with a letter run on both sides count; all of them
/// must be identical.
fn consistent_separator(date_format: &str, pattern: &str) -> Result<Separator, FormatError> {
    let runs: Vec<&str> = RUNS.find_iter(date_format).map(|m| m.as_str()).collect();
    let inner = runs.get(1..runs.len().saturating_sub(1)).unwrap_or_default();

    let mut distinct: Vec<&str> = Vec::new();
    for run in inner.iter().copied().filter(|run| !is_letter_run(run)) {
        if !distinct.contains(&run) {
            distinct.push(run);
        }
    }

    match distinct.as_slice() {
        [] => Err(FormatError::MissingSeparator {
            pattern: pattern.to_owned(),
        }),
        [separator] => Separator::new(*separator),
        _ => Err(FormatError::InconsistentSeparators {
            separators: distinct.iter().map(|s| (*s).to_owned()).collect(),
        }),
    }
}

/// Splits the date fields on the separator, ignoring leading or trailing
/// non-letter text.
fn split_sections<'a>(date_format: &'a str, separator: &Separator) -> Vec<&'a str> {
    date_format
        .trim_matches(|c: char| !c.is_ascii_uppercase())
        .split(separator.as_str())
        .collect()
}

fn is_letter_run(run: &str) -> bool {
    run.starts_with(|c: char| c.is_ascii_uppercase())
}

fn count_starts_with(sections: &[&str], field: Field) -> usize {
    sections
        .iter()
        .filter(|s| s.starts_with(field.letter()))
        .count()
}

fn field_token<'a>(sections: &[&'a str], field: Field) -> Result<&'a str, FormatError> {
    sections
        .iter()
        .copied()
        .find(|s| s.starts_with(field.letter()))
        .ok_or(FormatError::FieldCount { field, count: 0 })
}

fn invalid_length(field: Field, token: &str) -> FormatError {
    FormatError::FieldLength {
        field,
        token: token.to_owned(),
    }
}

fn letters(fields: &[Field]) -> String {
    fields.iter().map(|f| f.letter()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{NameStyle, Width, YearLength};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn sep(s: &str) -> Separator {
        Separator::new(s).unwrap()
    }

    #[test]
    fn test_parse_day_month_year() {
        let format = parse("DD/MM/YYYY").unwrap();
        assert_eq!(format.order().to_string(), "DMY");
        assert_eq!(format.separator().as_str(), "/");
        assert_eq!(format.weekday_display(), &WeekdayDisplay::None);
        assert_eq!(format.day_display().length, Width::Padded);
        assert_eq!(
            format.month_display(),
            MonthDisplay::Numeric {
                length: Width::Padded
            }
        );
        assert_eq!(format.year_display().length, YearLength::Four);
        assert_eq!(format.source_pattern(), Some("DD/MM/YYYY"));
    }

    #[rstest]
    #[case("DD/MM/YYYY", "DMY")]
    #[case("DD/YYYY/MM", "DYM")]
    #[case("MM/DD/YYYY", "MDY")]
    #[case("MM/YYYY/DD", "MYD")]
    #[case("YYYY/MM/DD", "YMD")]
    #[case("YYYY/DD/MM", "YDM")]
    fn test_order_follows_tokens(#[case] pattern: &str, #[case] order: &str) {
        let format = parse(pattern).unwrap();
        assert_eq!(format.order().to_string(), order);
    }

    #[test]
    fn test_case_insensitive() {
        let lower = parse("www, dd-mmm-yy").unwrap();
        let upper = parse("WWW, DD-MMM-YY").unwrap();
        assert_eq!(lower.to_pattern(), upper.to_pattern());
        assert_eq!(lower.source_pattern(), Some("www, dd-mmm-yy"));
    }

    #[test]
    fn test_weekday_prefix_short_and_long() {
        let short = parse("WWW, DD/MM/YYYY").unwrap();
        assert_eq!(
            short.weekday_display(),
            &WeekdayDisplay::new(NameStyle::Short, sep(", "))
        );
        // The weekday separator is independent of the date separator
        assert_eq!(short.separator().as_str(), "/");

        let long = parse("WWWW DD.MM.YYYY").unwrap();
        assert_eq!(
            long.weekday_display(),
            &WeekdayDisplay::new(NameStyle::Long, sep(" "))
        );
        assert_eq!(long.separator().as_str(), ".");
    }

    #[rstest]
    #[case("W, DD/MM/YYYY", 1)]
    #[case("WW, DD/MM/YYYY", 2)]
    #[case("WWWWW, DD/MM/YYYY", 5)]
    fn test_weekday_length_rejected(#[case] pattern: &str, #[case] length: usize) {
        assert_eq!(
            parse(pattern),
            Err(FormatError::InvalidWeekdayLength { length })
        );
    }

    #[test]
    fn test_weekday_prefix_without_date_fields() {
        assert_eq!(
            parse("WWW"),
            Err(FormatError::InvalidWeekdayPrefix {
                pattern: "WWW".to_owned()
            })
        );
        // The regex leaves " " as the date part, which has no separator
        assert_eq!(
            parse("WWW, "),
            Err(FormatError::MissingSeparator {
                pattern: "WWW, ".to_owned()
            })
        );
    }

    #[test]
    fn test_weekday_prefix_without_separator() {
        assert_eq!(
            parse("WWWDD/MM/YYYY"),
            Err(FormatError::InvalidWeekdayPrefix {
                pattern: "WWWDD/MM/YYYY".to_owned()
            })
        );
    }

    #[test]
    fn test_missing_separator() {
        assert_eq!(
            parse("DDMMYYYY"),
            Err(FormatError::MissingSeparator {
                pattern: "DDMMYYYY".to_owned()
            })
        );
    }

    #[test]
    fn test_inconsistent_separators() {
        assert_eq!(
            parse("DD/MM-YYYY"),
            Err(FormatError::InconsistentSeparators {
                separators: vec!["/".to_owned(), "-".to_owned()]
            })
        );
    }

    #[test]
    fn test_inconsistent_separators_lists_distinct_values() {
        assert_eq!(
            parse("DD.MM.YYYY DD"),
            Err(FormatError::InconsistentSeparators {
                separators: vec![".".to_owned(), " ".to_owned()]
            })
        );
    }

    #[test]
    fn test_multi_character_separator() {
        let format = parse("DD - MM - YYYY").unwrap();
        assert_eq!(format.separator().as_str(), " - ");
        assert_eq!(format.order().to_string(), "DMY");
    }

    #[test]
    fn test_leading_and_trailing_text_ignored() {
        let format = parse("(DD/MM/YYYY)").unwrap();
        assert_eq!(format.separator().as_str(), "/");
        assert_eq!(format.to_pattern(), "DD/MM/YYYY");
    }

    #[rstest]
    #[case("DD/DD/YYYY", Field::Month, 0)]
    #[case("MM/MM/YYYY", Field::Day, 0)]
    #[case("DD/MM/DD/YYYY", Field::Day, 2)]
    #[case("DD/MM/MM/YYYY", Field::Month, 2)]
    #[case("DD/MM/DD", Field::Year, 0)]
    #[case("DD/DD/MM/MM", Field::Year, 0)]
    #[case("DD/MM/YY/YY", Field::Year, 2)]
    #[case("DD/MM", Field::Year, 0)]
    fn test_field_count_rejected(
        #[case] pattern: &str,
        #[case] field: Field,
        #[case] count: usize,
    ) {
        assert_eq!(parse(pattern), Err(FormatError::FieldCount { field, count }));
    }

    #[test]
    fn test_unknown_token_rejected() {
        assert_eq!(
            parse("DD/MM/YYYY/XX"),
            Err(FormatError::UnknownToken {
                token: "XX".to_owned()
            })
        );
    }

    #[rstest]
    #[case("DDD/MM/YYYY", Field::Day, "DDD")]
    #[case("DD/MMMMM/YYYY", Field::Month, "MMMMM")]
    #[case("D/MMM/YYY", Field::Year, "YYY")]
    #[case("DD/MM/Y", Field::Year, "Y")]
    fn test_field_length_rejected(
        #[case] pattern: &str,
        #[case] field: Field,
        #[case] token: &str,
    ) {
        assert_eq!(
            parse(pattern),
            Err(FormatError::FieldLength {
                field,
                token: token.to_owned()
            })
        );
    }

    #[rstest]
    #[case("D/M/YY", Width::Natural, MonthDisplay::Numeric { length: Width::Natural }, YearLength::Two)]
    #[case("DD-MMM-YYYY", Width::Padded, MonthDisplay::Short, YearLength::Four)]
    #[case("D MMMM YYYY", Width::Natural, MonthDisplay::Long, YearLength::Four)]
    fn test_field_lengths(
        #[case] pattern: &str,
        #[case] day: Width,
        #[case] month: MonthDisplay,
        #[case] year: YearLength,
    ) {
        let format = parse(pattern).unwrap();
        assert_eq!(format.day_display().length, day);
        assert_eq!(format.month_display(), month);
        assert_eq!(format.year_display().length, year);
    }

    #[test]
    fn test_parse_is_deterministic() {
        assert_eq!(parse("WWWW, D MMMM YYYY"), parse("WWWW, D MMMM YYYY"));
    }

    #[test]
    fn test_consistent_separator_needs_letters_on_both_sides() {
        assert_eq!(consistent_separator("/DD/", "/DD/"), Err(FormatError::MissingSeparator {
            pattern: "/DD/".to_owned()
        }));
        assert_eq!(consistent_separator("A-B-C", "A-B-C"), Ok(sep("-")));
    }

    #[test]
    fn test_split_sections() {
        assert_eq!(
            split_sections("-DD-MM-YYYY-", &sep("-")),
            vec!["DD", "MM", "YYYY"]
        );
    }
}
