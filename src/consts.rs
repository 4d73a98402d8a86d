/// Minimum year accepted from typed input (inclusive)
pub const MIN_YEAR: u16 = 1000;
/// Maximum year accepted from typed input (inclusive)
pub const MAX_YEAR: u16 = 9999;

/// Maximum valid month (December)
pub const MAX_MONTH: u8 = 12;

/// First day of month, used for lower bounds
pub const MIN_DAY: u8 = 1;

/// Month number for January
pub const JANUARY: u8 = 1;
/// Month number for February
pub const FEBRUARY: u8 = 2;
/// Month number for December
pub const DECEMBER: u8 = 12;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Maximum days in each month (index 0 is unused, months are 1-indexed)
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [u8; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // January
    28, // February (non-leap, adjusted by is_leap_year check)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: i32 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: i32 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: i32 = 400;

/// Date component separator for `YYYY-MM-DD` input
pub const DATE_SEPARATOR: char = '-';
/// Separator between the endpoints of a rendered range
pub const RANGE_SEPARATOR: &str = " - ";

/// Milliseconds from midnight to 23:59:59.999
pub(crate) const END_OF_DAY_MILLIS: i64 = 86_399_999;

/// Raw day count used to seed the start of a comparison range
pub const COMPARE_OFFSET_DAYS: i64 = 365;

/// Locale used when none is configured, and the fallback translation table
pub const DEFAULT_LOCALE: &str = "en-US";

/// Language prefixes of locales that write dates day-first
pub const DAY_FIRST_LOCALES: [&str; 12] = [
    "pt-BR", "pt-PT", "en-GB", "en-AU", "fr-FR", "de-DE", "es-ES", "it-IT", "nl-NL", "sv-SE",
    "da-DK", "nb-NO",
];

/// Viewport width (px) below which the picker switches to its compact layout
pub const SMALL_SCREEN_WIDTH: u32 = 1024;
