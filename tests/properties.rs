use chrono::NaiveDate;
use date_pattern::{
    DateFormat, Field, FormatError, RenderError, format_date, parse_date_format_string,
};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

#[rstest]
#[case("DD/MM/YYYY")]
#[case("D-M-YY")]
#[case("YYYY.MM.DD")]
#[case("MMM DD YYYY")]
#[case("WWW, DD/MM/YYYY")]
#[case("WWWW D MMMM YYYY")]
#[case("wwww  yy/mmm/d")]
fn descriptor_and_pattern_render_alike(#[case] pattern: &str) {
    let descriptor = parse_date_format_string(pattern).unwrap();
    let d = date(2024, 3, 15);
    assert_eq!(
        format_date(d, &descriptor).unwrap(),
        format_date(d, pattern).unwrap()
    );
    // The canonical pattern renders the same as well
    let canonical = descriptor.to_pattern();
    assert_eq!(
        format_date(d, &descriptor).unwrap(),
        format_date(d, canonical.as_str()).unwrap()
    );
}

#[rstest]
#[case("DD/MM/YYYY", "DMY")]
#[case("DD/YYYY/MM", "DYM")]
#[case("MM/DD/YYYY", "MDY")]
#[case("MM/YYYY/DD", "MYD")]
#[case("YYYY/MM/DD", "YMD")]
#[case("YYYY/DD/MM", "YDM")]
fn order_matches_token_sequence(#[case] pattern: &str, #[case] order: &str) {
    let format: DateFormat = pattern.parse().unwrap();
    assert_eq!(format.order().to_string(), order);
}

#[test]
fn mixed_separators_rejected() {
    let err = parse_date_format_string("DD/MM-YYYY").unwrap_err();
    assert_eq!(
        err,
        FormatError::InconsistentSeparators {
            separators: vec!["/".to_owned(), "-".to_owned()]
        }
    );
    let message = err.to_string();
    assert!(message.contains(r#""/""#), "{message}");
    assert!(message.contains(r#""-""#), "{message}");
}

#[test]
fn duplicate_day_reports_missing_month() {
    assert_eq!(
        parse_date_format_string("DD/DD/YYYY"),
        Err(FormatError::FieldCount {
            field: Field::Month,
            count: 0
        })
    );
}

#[test]
fn weekday_names() {
    let d = date(2024, 3, 15);
    assert_eq!(format_date(d, "WWW, DD/MM/YYYY").unwrap(), "Fri, 15/03/2024");
    assert_eq!(
        format_date(d, "WWWW, DD/MM/YYYY").unwrap(),
        "Friday, 15/03/2024"
    );
}

#[test]
fn month_names() {
    let d = date(2024, 1, 5);
    assert_eq!(format_date(d, "DD-MMM-YYYY").unwrap(), "05-Jan-2024");
    assert_eq!(format_date(d, "DD-MMMM-YYYY").unwrap(), "05-January-2024");
}

#[test]
fn two_digit_year() {
    assert_eq!(format_date(date(2024, 1, 5), "MM/DD/YY").unwrap(), "01/05/24");
}

#[test]
fn iso_text_is_not_shifted_by_the_local_zone() {
    assert_eq!(format_date("2024-03-15", "YYYY-MM-DD").unwrap(), "2024-03-15");
    assert_eq!(format_date("2024-01-01", "DD/MM/YYYY").unwrap(), "01/01/2024");
}

#[test]
fn invalid_year_length_rejected() {
    assert_eq!(
        parse_date_format_string("D/MMM/YYY"),
        Err(FormatError::FieldLength {
            field: Field::Year,
            token: "YYY".to_owned()
        })
    );
}

#[test]
fn unreadable_date_is_an_error() {
    assert_eq!(
        format_date("yesterday", "DD/MM/YYYY"),
        Err(RenderError::InvalidDate {
            input: "yesterday".to_owned()
        })
    );
}

#[test]
fn cached_descriptor_survives_serialization() {
    let format = parse_date_format_string("WWWW, D MMMM YYYY").unwrap();
    let json = serde_json::to_string(&format).unwrap();
    let cached: DateFormat = serde_json::from_str(&json).unwrap();
    assert_eq!(
        format_date(date(2024, 3, 15), &cached).unwrap(),
        "Friday, 15 March 2024"
    );
}
