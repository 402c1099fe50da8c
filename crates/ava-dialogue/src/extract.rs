//! Slot extraction from free-form utterances.
//!
//! Every parser here is a pure function over normalized text: no engine
//! state, no clock reads. The date parser takes today's date as an argument
//! so relative phrases resolve deterministically and tests never depend on
//! the wall clock.
//!
//! All parsers are tuned for speech-to-text output: digits arrive as words
//! ("nine eight seven") with homophones mixed in ("to" for "two"), and
//! times often come without meridiem markers ("around 2").

use std::sync::OnceLock;

use chrono::{Datelike, Duration, NaiveDate};
use regex::Regex;

use ava_core::{ServiceKind, TimeSlot};

// =============================================================================
// Service extraction
// =============================================================================

/// Find the service a caller is talking about.
///
/// Groups are checked in order, so "replace my lost licence" resolves to
/// replacement even though "licence" alone would be ambiguous. "new" with
/// "apply" covers phrasings like "apply for a new one".
pub fn extract_service(input: &str) -> Option<ServiceKind> {
    let input = input.to_lowercase();

    if input.contains("new licence")
        || input.contains("new license")
        || (input.contains("new") && input.contains("apply"))
    {
        return Some(ServiceKind::NewLicence);
    }
    if input.contains("renew") || input.contains("extend") {
        return Some(ServiceKind::LicenceRenewal);
    }
    if input.contains("replace")
        || input.contains("lost")
        || input.contains("damaged")
        || input.contains("duplicate")
    {
        return Some(ServiceKind::Replacement);
    }
    if input.contains("address change")
        || input.contains("change address")
        || input.contains("update address")
    {
        return Some(ServiceKind::AddressChange);
    }
    if input.contains("driving test") || input.contains("test") || input.contains("exam") {
        return Some(ServiceKind::DrivingTest);
    }
    None
}

// =============================================================================
// Date parsing
// =============================================================================

const MONTH_NAMES: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Sunday is closed, so it is not a bookable target.
const WEEKDAY_NAMES: [&str; 6] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
];

/// Parse a spoken date into its confirmation form, e.g. "Friday, August 15".
///
/// Recognized shapes, tried in order: today/tomorrow, "15th of august",
/// "august 15th", a bare day number, "15/8", and finally a weekday name.
/// A weekday always lands 1 to 7 days ahead, never on the same day. Any
/// resolved date already behind `today` rolls forward one year.
pub fn parse_date(input: &str, today: NaiveDate) -> Option<String> {
    let input = input.trim().to_lowercase();

    if input.contains("today") {
        return Some(spoken_date(today));
    }
    if input.contains("tomorrow") {
        return Some(spoken_date(today + Duration::days(1)));
    }

    let explicit = match_day_month(&input, today)
        .or_else(|| match_month_day(&input, today))
        .or_else(|| match_bare_day(&input, today))
        .or_else(|| match_numeric(&input, today));
    if let Some(date) = explicit {
        return Some(spoken_date(date));
    }

    for (index, name) in WEEKDAY_NAMES.iter().enumerate() {
        if input.contains(name) {
            // Monday is 1 on the num_days_from_sunday scale.
            let target = index as u32 + 1;
            let current = today.weekday().num_days_from_sunday();
            let mut ahead = (target + 7 - current) % 7;
            if ahead == 0 {
                ahead = 7;
            }
            return Some(spoken_date(today + Duration::days(i64::from(ahead))));
        }
    }

    None
}

fn spoken_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d").to_string()
}

/// "15th of august", "3 august"
fn match_day_month(input: &str, today: NaiveDate) -> Option<NaiveDate> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r"(\d{1,2})(?:st|nd|rd|th)?\s+(?:of\s+)?(january|february|march|april|may|june|july|august|september|october|november|december)")
            .expect("Invalid day-month regex")
    });
    let captures = re.captures(input)?;
    let day: u32 = captures[1].parse().ok()?;
    let month = month_number(&captures[2])?;
    resolve_date(day, month, today)
}

/// "august 15th", "august 3"
fn match_month_day(input: &str, today: NaiveDate) -> Option<NaiveDate> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r"(january|february|march|april|may|june|july|august|september|october|november|december)\s+(\d{1,2})(?:st|nd|rd|th)?")
            .expect("Invalid month-day regex")
    });
    let captures = re.captures(input)?;
    let month = month_number(&captures[1])?;
    let day: u32 = captures[2].parse().ok()?;
    resolve_date(day, month, today)
}

/// A lone day number like "15" or "21st". Rolls into next month when the
/// day has already passed this month.
fn match_bare_day(input: &str, today: NaiveDate) -> Option<NaiveDate> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r"^(\d{1,2})(?:st|nd|rd|th)?$").expect("Invalid bare-day regex")
    });
    let captures = re.captures(input)?;
    let day: u32 = captures[1].parse().ok()?;
    let month = if day < today.day() {
        if today.month() == 12 {
            1
        } else {
            today.month() + 1
        }
    } else {
        today.month()
    };
    resolve_date(day, month, today)
}

/// "15/8", "15-8", "15.8" as day/month.
fn match_numeric(input: &str, today: NaiveDate) -> Option<NaiveDate> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE
        .get_or_init(|| Regex::new(r"(\d{1,2})[/\-.](\d{1,2})").expect("Invalid numeric regex"));
    let captures = re.captures(input)?;
    let day: u32 = captures[1].parse().ok()?;
    let month: u32 = captures[2].parse().ok()?;
    resolve_date(day, month, today)
}

fn month_number(name: &str) -> Option<u32> {
    MONTH_NAMES
        .iter()
        .position(|m| *m == name)
        .map(|i| i as u32 + 1)
}

fn resolve_date(day: u32, month: u32, today: NaiveDate) -> Option<NaiveDate> {
    if !(1..=31).contains(&day) || !(1..=12).contains(&month) {
        return None;
    }
    let date = NaiveDate::from_ymd_opt(today.year(), month, day)?;
    if date < today {
        date.with_year(today.year() + 1)
    } else {
        Some(date)
    }
}

// =============================================================================
// Time parsing
// =============================================================================

/// Parse a spoken time and snap it to the nearest bookable slot.
///
/// Hours without a meridiem are disambiguated by context: 1-5 reads as PM
/// only when "afternoon" or "pm" appears nearby, 6-11 reads as AM, 12 and
/// up reads as PM. Plain day-part words fall back to representative times
/// (morning 10:00, afternoon 2:00, early 9:00, late 4:00).
pub fn parse_time(input: &str) -> Option<TimeSlot> {
    let input = input.trim().to_lowercase();
    let pm_context = input.contains("afternoon") || input.contains("pm");

    // "ten o'clock", "3 oclock"
    static OCLOCK: OnceLock<Regex> = OnceLock::new();
    let oclock = OCLOCK.get_or_init(|| {
        Regex::new(
            r"(\d{1,2}|ten|eleven|twelve|one|two|three|four|five|six|seven|eight|nine)\s*o'?clock",
        )
        .expect("Invalid o'clock regex")
    });
    if let Some(captures) = oclock.captures(&input) {
        let token = &captures[1];
        let hour: u32 = match token.parse() {
            Ok(h) => h,
            Err(_) => hour_word(token)?,
        };
        let hour24 = if (1..=5).contains(&hour) && pm_context {
            hour + 12
        } else if hour == 12 {
            0
        } else if hour > 12 {
            hour - 12
        } else {
            hour
        };
        return Some(TimeSlot::nearest(hour24 * 60));
    }

    // "2:30 pm", "9 am"
    static EXPLICIT: OnceLock<Regex> = OnceLock::new();
    let explicit = EXPLICIT.get_or_init(|| {
        Regex::new(r"(\d{1,2}):?(\d{2})?\s*(am|pm|a\.m\.|p\.m\.)").expect("Invalid meridiem regex")
    });
    if let Some(captures) = explicit.captures(&input) {
        let hour: u32 = captures[1].parse().ok()?;
        let minute: u32 = captures
            .get(2)
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(0);
        let pm = captures[3].starts_with('p');
        return Some(TimeSlot::nearest(to_minute_of_day(hour, minute, pm)));
    }

    // "2", "10:30"
    static BARE: OnceLock<Regex> = OnceLock::new();
    let bare = BARE
        .get_or_init(|| Regex::new(r"(\d{1,2}):?(\d{2})?").expect("Invalid bare time regex"));
    if let Some(captures) = bare.captures(&input) {
        let hour: u32 = captures[1].parse().ok()?;
        let minute: u32 = captures
            .get(2)
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(0);
        let pm = match hour {
            1..=5 => pm_context,
            6..=11 => false,
            _ => true,
        };
        return Some(TimeSlot::nearest(to_minute_of_day(hour, minute, pm)));
    }

    const WORD_TIMES: &[(&str, u32)] = &[
        ("morning", 600),
        ("am", 600),
        ("afternoon", 840),
        ("pm", 840),
        ("early", 540),
        ("late", 960),
    ];
    for (keyword, minute) in WORD_TIMES {
        if input.contains(keyword) {
            return Some(TimeSlot::nearest(*minute));
        }
    }

    None
}

fn to_minute_of_day(hour: u32, minute: u32, pm: bool) -> u32 {
    let hour24 = if pm && hour != 12 {
        hour + 12
    } else if !pm && hour == 12 {
        0
    } else {
        hour
    };
    hour24 * 60 + minute
}

fn hour_word(word: &str) -> Option<u32> {
    let hour = match word {
        "one" => 1,
        "two" => 2,
        "three" => 3,
        "four" => 4,
        "five" => 5,
        "six" => 6,
        "seven" => 7,
        "eight" => 8,
        "nine" => 9,
        "ten" => 10,
        "eleven" => 11,
        "twelve" => 12,
        _ => return None,
    };
    Some(hour)
}

// =============================================================================
// Contact parsing
// =============================================================================

/// Extract a 10-digit contact number from the whole utterance.
///
/// Digits are collected from anywhere in the input, so "98765 43210" and
/// "my number is 9876543210" both work. Trunk and country prefixes (a
/// leading 0 or 91) are stripped. Failing that, digits spoken as words are
/// assembled, with common speech-to-text homophones mapped back ("to" for
/// "two", "ate" for "eight").
pub fn parse_contact(input: &str) -> Option<String> {
    let digits: String = input.chars().filter(|c| c.is_ascii_digit()).collect();
    if let Some(phone) = normalize_digits(&digits) {
        return Some(phone);
    }

    let mut from_words = String::new();
    for word in input.to_lowercase().split_whitespace() {
        if let Some(digit) = digit_word(word) {
            from_words.push(digit);
        }
    }
    if from_words.len() == 10 {
        Some(from_words)
    } else {
        None
    }
}

/// Find a phone-shaped digit run inside arbitrary text.
///
/// Unlike [`parse_contact`] this does not scavenge digits from the whole
/// utterance; it wants a contiguous phone pattern, optionally grouped with
/// separators. Used to spot a caller identifying themselves mid-sentence.
pub fn find_phone(input: &str) -> Option<String> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r"\d{10,12}|\d{3}[-.\s]?\d{3}[-.\s]?\d{4}").expect("Invalid phone regex")
    });
    let matched = re.find(input)?;
    let digits: String = matched
        .as_str()
        .chars()
        .filter(|c| c.is_ascii_digit())
        .collect();
    normalize_digits(&digits)
}

/// Normalize a digit run to the bare 10-digit subscriber number.
///
/// Accepts the three forms callers actually speak: the bare number, the
/// trunk-prefixed form (leading 0), and the country-prefixed form (leading
/// 91). Anything else is rejected rather than truncated, since every stored
/// contact must be exactly 10 digits.
fn normalize_digits(digits: &str) -> Option<String> {
    match digits.len() {
        10 => Some(digits.to_string()),
        11 if digits.starts_with('0') => Some(digits[1..].to_string()),
        12 if digits.starts_with("91") => Some(digits[2..].to_string()),
        _ => None,
    }
}

fn digit_word(word: &str) -> Option<char> {
    let digit = match word {
        "zero" | "oh" => '0',
        "one" | "won" => '1',
        "two" | "to" | "too" => '2',
        "three" | "tree" => '3',
        "four" | "for" | "fore" => '4',
        "five" => '5',
        "six" | "sex" => '6',
        "seven" => '7',
        "eight" | "ate" => '8',
        "nine" | "niner" => '9',
        _ => return None,
    };
    Some(digit)
}

// =============================================================================
// Name cleanup
// =============================================================================

const NAME_FILLERS: &[&str] = &["my name is", "i'm", "this is", "i am", "call me"];

/// Clean a spoken name into display form.
///
/// Strips lead-in fillers and punctuation, then title-cases what remains.
/// Inputs that clean down to a single character are rejected so stray
/// syllables never become a name.
pub fn clean_name(input: &str) -> Option<String> {
    if input.len() < 3 {
        return None;
    }
    let mut cleaned = input.to_lowercase();
    for filler in NAME_FILLERS {
        cleaned = cleaned.replace(filler, "");
    }
    let cleaned: String = cleaned
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || *c == '_')
        .collect();
    let cleaned = cleaned.trim();
    if cleaned.len() < 2 {
        return None;
    }
    Some(title_case(cleaned))
}

fn title_case(input: &str) -> String {
    input
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(|c| c.to_lowercase()))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn a_friday() -> NaiveDate {
        // 2025-08-15 is a Friday.
        NaiveDate::from_ymd_opt(2025, 8, 15).unwrap()
    }

    // =========================================================================
    // Service extraction
    // =========================================================================

    #[test]
    fn test_extract_new_licence() {
        assert_eq!(
            extract_service("i want a new licence"),
            Some(ServiceKind::NewLicence)
        );
        assert_eq!(
            extract_service("apply for a new driving permit"),
            Some(ServiceKind::NewLicence)
        );
    }

    #[test]
    fn test_extract_renewal() {
        assert_eq!(
            extract_service("renew my licence please"),
            Some(ServiceKind::LicenceRenewal)
        );
        assert_eq!(
            extract_service("i need to extend it"),
            Some(ServiceKind::LicenceRenewal)
        );
    }

    #[test]
    fn test_extract_replacement() {
        assert_eq!(
            extract_service("i lost my licence"),
            Some(ServiceKind::Replacement)
        );
        assert_eq!(
            extract_service("need a duplicate"),
            Some(ServiceKind::Replacement)
        );
    }

    #[test]
    fn test_extract_address_change() {
        assert_eq!(
            extract_service("i moved, need to change address"),
            Some(ServiceKind::AddressChange)
        );
    }

    #[test]
    fn test_extract_driving_test() {
        assert_eq!(
            extract_service("book me for the driving test"),
            Some(ServiceKind::DrivingTest)
        );
        assert_eq!(extract_service("the exam"), Some(ServiceKind::DrivingTest));
    }

    #[test]
    fn test_extract_priority_replacement_over_test() {
        // "lost" resolves before the trailing "test" keyword can.
        assert_eq!(
            extract_service("i lost my licence before the test"),
            Some(ServiceKind::Replacement)
        );
    }

    #[test]
    fn test_extract_no_service() {
        assert_eq!(extract_service("i would like an appointment"), None);
    }

    // =========================================================================
    // Date parsing
    // =========================================================================

    #[test]
    fn test_parse_date_today() {
        assert_eq!(
            parse_date("today please", a_friday()),
            Some("Friday, August 15".to_string())
        );
    }

    #[test]
    fn test_parse_date_tomorrow() {
        assert_eq!(
            parse_date("tomorrow", a_friday()),
            Some("Saturday, August 16".to_string())
        );
    }

    #[test]
    fn test_parse_date_day_month() {
        assert_eq!(
            parse_date("the 20th of august", a_friday()),
            Some("Wednesday, August 20".to_string())
        );
    }

    #[test]
    fn test_parse_date_month_day() {
        assert_eq!(
            parse_date("august 20th", a_friday()),
            Some("Wednesday, August 20".to_string())
        );
        assert_eq!(
            parse_date("september 1", a_friday()),
            Some("Monday, September 1".to_string())
        );
    }

    #[test]
    fn test_parse_date_same_day_does_not_roll() {
        assert_eq!(
            parse_date("15th august", a_friday()),
            Some("Friday, August 15".to_string())
        );
    }

    #[test]
    fn test_parse_date_past_rolls_forward_one_year() {
        // August 12 has passed, so it lands on August 12 next year.
        assert_eq!(
            parse_date("12th of august", a_friday()),
            Some("Wednesday, August 12".to_string())
        );
    }

    #[test]
    fn test_parse_date_bare_day_this_month() {
        assert_eq!(
            parse_date("20", a_friday()),
            Some("Wednesday, August 20".to_string())
        );
        assert_eq!(
            parse_date("21st", a_friday()),
            Some("Thursday, August 21".to_string())
        );
    }

    #[test]
    fn test_parse_date_bare_day_rolls_to_next_month() {
        assert_eq!(
            parse_date("10", a_friday()),
            Some("Wednesday, September 10".to_string())
        );
    }

    #[test]
    fn test_parse_date_bare_day_december_wraps() {
        // 2025-12-20 is a Saturday; "5" has passed, so it wraps to January.
        let late_december = NaiveDate::from_ymd_opt(2025, 12, 20).unwrap();
        assert_eq!(
            parse_date("5", late_december),
            Some("Monday, January 5".to_string())
        );
    }

    #[test]
    fn test_parse_date_numeric() {
        assert_eq!(
            parse_date("25/12", a_friday()),
            Some("Thursday, December 25".to_string())
        );
        assert_eq!(
            parse_date("1.9", a_friday()),
            Some("Monday, September 1".to_string())
        );
    }

    #[test]
    fn test_parse_date_weekday_is_always_ahead() {
        assert_eq!(
            parse_date("next monday", a_friday()),
            Some("Monday, August 18".to_string())
        );
        // Asking for the current weekday means next week, never today.
        assert_eq!(
            parse_date("friday", a_friday()),
            Some("Friday, August 22".to_string())
        );
    }

    #[test]
    fn test_parse_date_every_weekday_lands_within_a_week() {
        let today = a_friday();
        for name in WEEKDAY_NAMES {
            let spoken = parse_date(name, today).unwrap();
            let mut found = false;
            for ahead in 1..=7 {
                let candidate = today + Duration::days(ahead);
                if spoken == spoken_date(candidate) {
                    found = true;
                    break;
                }
            }
            assert!(found, "{} resolved outside 1..=7 days: {}", name, spoken);
            assert_ne!(spoken, spoken_date(today));
        }
    }

    #[test]
    fn test_parse_date_rejects_invalid() {
        assert_eq!(parse_date("32nd of august", a_friday()), None);
        assert_eq!(parse_date("99/99", a_friday()), None);
        assert_eq!(parse_date("whenever", a_friday()), None);
    }

    // =========================================================================
    // Time parsing
    // =========================================================================

    fn label(input: &str) -> Option<&'static str> {
        parse_time(input).map(TimeSlot::label)
    }

    #[test]
    fn test_parse_time_explicit_meridiem() {
        assert_eq!(label("2 pm"), Some("2:00 PM"));
        assert_eq!(label("2:30 pm"), Some("2:30 PM"));
        assert_eq!(label("9 am"), Some("9:00 AM"));
        assert_eq!(label("10:30 a.m."), Some("10:30 AM"));
    }

    #[test]
    fn test_parse_time_oclock() {
        assert_eq!(label("10 o'clock"), Some("10:00 AM"));
        assert_eq!(label("ten o'clock"), Some("10:00 AM"));
        assert_eq!(label("4 o'clock in the afternoon"), Some("4:00 PM"));
    }

    #[test]
    fn test_parse_time_bare_hour_morning_inference() {
        // 6-11 without context reads as AM.
        assert_eq!(label("11"), Some("11:00 AM"));
        assert_eq!(label("9:30"), Some("9:30 AM"));
    }

    #[test]
    fn test_parse_time_small_hour_needs_pm_context() {
        assert_eq!(label("2 in the afternoon"), Some("2:00 PM"));
        // Without context a bare 2 reads as 2 AM and snaps to the first slot.
        assert_eq!(label("2"), Some("9:00 AM"));
    }

    #[test]
    fn test_parse_time_day_part_words() {
        assert_eq!(label("morning"), Some("10:00 AM"));
        assert_eq!(label("sometime in the afternoon"), Some("2:00 PM"));
        assert_eq!(label("early"), Some("9:00 AM"));
        assert_eq!(label("late"), Some("4:00 PM"));
    }

    #[test]
    fn test_parse_time_snaps_across_lunch() {
        // Noon is unbookable; 12 PM snaps back to the last morning slot.
        assert_eq!(label("12 pm"), Some("11:30 AM"));
    }

    #[test]
    fn test_parse_time_tie_prefers_earlier_slot() {
        // 12:45 PM is equidistant from 11:30 AM and 2:00 PM.
        assert_eq!(label("12:45"), Some("11:30 AM"));
    }

    #[test]
    fn test_parse_time_unparseable() {
        assert_eq!(parse_time("whenever suits you"), None);
    }

    // =========================================================================
    // Contact parsing
    // =========================================================================

    #[test]
    fn test_parse_contact_plain_digits() {
        assert_eq!(
            parse_contact("9876543210"),
            Some("9876543210".to_string())
        );
    }

    #[test]
    fn test_parse_contact_digits_with_noise() {
        assert_eq!(
            parse_contact("my number is 98765 43210"),
            Some("9876543210".to_string())
        );
    }

    #[test]
    fn test_parse_contact_strips_country_prefix() {
        assert_eq!(
            parse_contact("919876543210"),
            Some("9876543210".to_string())
        );
    }

    #[test]
    fn test_parse_contact_strips_trunk_zero() {
        assert_eq!(
            parse_contact("09876543210"),
            Some("9876543210".to_string())
        );
    }

    #[test]
    fn test_parse_contact_rejects_truncated_prefixed_number() {
        // 91 followed by only nine digits cannot hold a full number.
        assert_eq!(parse_contact("91987654321"), None);
    }

    #[test]
    fn test_parse_contact_spoken_digits() {
        assert_eq!(
            parse_contact("nine eight seven six five four three two one zero"),
            Some("9876543210".to_string())
        );
    }

    #[test]
    fn test_parse_contact_homophones() {
        assert_eq!(
            parse_contact("niner ate tree to won oh for five sex fore"),
            Some("9832104564".to_string())
        );
    }

    #[test]
    fn test_parse_contact_rejects_short_runs() {
        assert_eq!(parse_contact("12345"), None);
        assert_eq!(parse_contact("nine eight seven"), None);
    }

    #[test]
    fn test_parse_contact_rejects_mixed_partial() {
        // Five digits plus five words never merge into one number.
        assert_eq!(parse_contact("98765 four three two one zero"), None);
    }

    #[test]
    fn test_find_phone_in_sentence() {
        assert_eq!(
            find_phone("i am calling from 9876543210 about my licence"),
            Some("9876543210".to_string())
        );
        assert_eq!(
            find_phone("reach me on 987-654-3210"),
            Some("9876543210".to_string())
        );
    }

    #[test]
    fn test_find_phone_ignores_short_numbers() {
        assert_eq!(find_phone("i am 25 years old"), None);
        assert_eq!(find_phone("no digits here"), None);
    }

    // =========================================================================
    // Name cleanup
    // =========================================================================

    #[test]
    fn test_clean_name_strips_fillers() {
        assert_eq!(
            clean_name("my name is priya sharma"),
            Some("Priya Sharma".to_string())
        );
        assert_eq!(clean_name("i'm raj"), Some("Raj".to_string()));
    }

    #[test]
    fn test_clean_name_title_cases() {
        assert_eq!(
            clean_name("rahul kumar verma"),
            Some("Rahul Kumar Verma".to_string())
        );
    }

    #[test]
    fn test_clean_name_strips_punctuation() {
        assert_eq!(clean_name("priya!!!"), Some("Priya".to_string()));
    }

    #[test]
    fn test_clean_name_rejects_too_short() {
        assert_eq!(clean_name("a"), None);
        assert_eq!(clean_name("ok"), None);
    }

    #[test]
    fn test_clean_name_rejects_filler_only() {
        assert_eq!(clean_name("my name is"), None);
    }
}
