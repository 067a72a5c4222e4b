/// Pattern letter for the day-of-month token
pub const DAY_LETTER: char = 'D';
/// Pattern letter for the month token
pub const MONTH_LETTER: char = 'M';
/// Pattern letter for the year token
pub const YEAR_LETTER: char = 'Y';
/// Pattern letter for the optional weekday prefix
pub const WEEKDAY_LETTER: char = 'W';

/// `WWW` renders the short weekday name
pub const WEEKDAY_SHORT_LEN: usize = 3;
/// `WWWW` renders the long weekday name
pub const WEEKDAY_LONG_LEN: usize = 4;

/// `MMM` renders the short month name
pub const MONTH_SHORT_LEN: usize = 3;
/// `MMMM` renders the long month name
pub const MONTH_LONG_LEN: usize = 4;

/// Modulus used to render a two-digit year
pub(crate) const CENTURY: i32 = 100;

/// English weekday names, index 0 is Monday.
/// The short name is the first three letters.
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Date-only layouts tried when coercing free-form text into a date
pub(crate) const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d", // ISO with single-digit parts, e.g. 2024-3-5
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%m/%d/%Y", // month-first
    "%d %B %Y", // e.g. 15 March 2024
    "%B %d, %Y", // e.g. March 15, 2024
    "%d %b %Y",
    "%b %d, %Y",
];

/// Date-time layouts without an offset, read in the system local zone
pub(crate) const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];
