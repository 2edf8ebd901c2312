use chrono::{Datelike, Duration, NaiveDate};
use shared::Expense;

/// Active filter/view mode for the expense list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Day,
    Week,
    Month,
    Budget,
}

/// Today's date from the browser clock, using local calendar fields.
///
/// This is the only place the date code touches `js_sys`; everything else
/// takes `today` as a parameter so it stays host-testable. Local fields,
/// never UTC: the backend convention is bare local dates.
pub fn local_today() -> NaiveDate {
    let now = js_sys::Date::new_0();
    let year = now.get_full_year() as i32;
    let month = now.get_month() + 1; // JavaScript months are 0-indexed
    let day = now.get_date();
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

/// Format a date as the backend's storage form, zero-padded `YYYY-MM-DD`.
pub fn to_local_date_string(date: NaiveDate) -> String {
    format!("{:04}-{:02}-{:02}", date.year(), date.month(), date.day())
}

/// Parse a stored `YYYY-MM-DD` value.
///
/// `NaiveDate` carries no time or zone, so this is inherently the
/// local-midnight reading of the bare date string.
pub fn parse_storage_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

fn first_of_next_month(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(date)
}

/// Filter expenses to the selected period window around `today`.
///
/// - `Day`: storage string equals today's storage string.
/// - `Week`: the 7 calendar days ending today, inclusive.
/// - `Month` (and the `Budget` view, which reuses the month window):
///   `[first of month, first of next month)`.
///
/// Expenses whose date does not parse are excluded.
pub fn filter_by_period(expenses: &[Expense], period: Period, today: NaiveDate) -> Vec<Expense> {
    match period {
        Period::Day => {
            let key = to_local_date_string(today);
            expenses
                .iter()
                .filter(|e| e.expense_date == key)
                .cloned()
                .collect()
        }
        Period::Week => {
            let start = today - Duration::days(6);
            expenses
                .iter()
                .filter(|e| {
                    parse_storage_date(&e.expense_date)
                        .map(|d| d >= start && d <= today)
                        .unwrap_or(false)
                })
                .cloned()
                .collect()
        }
        Period::Month | Period::Budget => {
            let start = first_of_month(today);
            let end = first_of_next_month(today);
            expenses
                .iter()
                .filter(|e| {
                    parse_storage_date(&e.expense_date)
                        .map(|d| d >= start && d < end)
                        .unwrap_or(false)
                })
                .cloned()
                .collect()
        }
    }
}

/// Month keys offered by the budget panel: the current calendar month
/// through December of the current year. No cross-year rollover.
pub fn month_options(today: NaiveDate) -> Vec<String> {
    (today.month()..=12)
        .map(|m| format!("{:04}-{:02}", today.year(), m))
        .collect()
}

/// Year-month key (`YYYY-MM`) for a date.
pub fn month_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

/// Re-format raw date-field input as the user types.
///
/// Strips non-digits, caps at 8 digits, and inserts `/` separators so the
/// buffer grows `DD`, `DD/MM`, `DD/MM/YYYY`. Never rejects input; the blur
/// checkpoint does the validating.
pub fn format_date_input(value: &str) -> String {
    let digits: String = value.chars().filter(|c| c.is_ascii_digit()).take(8).collect();
    match digits.len() {
        0..=2 => digits,
        3..=4 => format!("{}/{}", &digits[..2], &digits[2..]),
        _ => format!("{}/{}/{}", &digits[..2], &digits[2..4], &digits[4..]),
    }
}

/// Validate a complete `DD/MM/YYYY` display string against calendar rules.
///
/// Day in [1,31], month in [1,12], year in [1900,2100], and the triple must
/// name a real calendar day (31/02/2024 fails, 29/02/2024 passes only
/// because 2024 is a leap year).
pub fn parse_display_date(display: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = display.split('/').collect();
    if parts.len() != 3 {
        return None;
    }

    let day = parts[0].parse::<u32>().ok()?;
    let month = parts[1].parse::<u32>().ok()?;
    let year = parts[2].parse::<i32>().ok()?;

    if !(1..=31).contains(&day) || !(1..=12).contains(&month) || !(1900..=2100).contains(&year) {
        return None;
    }

    NaiveDate::from_ymd_opt(year, month, day)
}

/// Storage `YYYY-MM-DD` to display `DD/MM/YYYY`. Empty on malformed input.
pub fn to_display_date(iso: &str) -> String {
    let parts: Vec<&str> = iso.split('-').collect();
    if parts.len() != 3 {
        return String::new();
    }
    let [year, month, day] = [parts[0], parts[1], parts[2]];
    if year.is_empty() || month.is_empty() || day.is_empty() {
        return String::new();
    }
    format!("{}/{}/{}", day, month, year)
}

/// Display `DD/MM/YYYY` to storage `YYYY-MM-DD`, zero-padding day/month.
pub fn to_iso_date(display: &str) -> String {
    let parts: Vec<&str> = display.split('/').collect();
    if parts.len() != 3 {
        return String::new();
    }
    let [day, month, year] = [parts[0], parts[1], parts[2]];
    format!("{}-{:0>2}-{:0>2}", year, month, day)
}

/// Per-row state of the draft date text field.
///
/// Exactly one of the display buffer and the resolved date is authoritative
/// at any time: the buffer while the user is typing, the resolved date once
/// a blur validated it. The variants encode that invariant directly.
#[derive(Debug, Clone, PartialEq)]
pub enum DateField {
    /// No date set and no pending input.
    Empty,
    /// The in-progress display buffer; not yet validated.
    Typing(String),
    /// A validated calendar date; the buffer derives from it.
    Valid(NaiveDate),
    /// The last rejected input, kept for inspection. Renders empty.
    Invalid(String),
}

impl DateField {
    /// Seed from a stored `YYYY-MM-DD` value (e.g. an OCR preview date).
    pub fn from_iso(value: Option<&str>) -> Self {
        match value.and_then(parse_storage_date) {
            Some(date) => DateField::Valid(date),
            None => DateField::Empty,
        }
    }

    /// What the text input should show for this state.
    pub fn display_value(&self) -> String {
        match self {
            DateField::Empty | DateField::Invalid(_) => String::new(),
            DateField::Typing(buffer) => buffer.clone(),
            DateField::Valid(date) => to_display_date(&to_local_date_string(*date)),
        }
    }

    /// A keystroke re-formats the buffer and never blocks typing.
    pub fn keystroke(&self, raw: &str) -> DateField {
        DateField::Typing(format_date_input(raw))
    }

    /// Field exit is the sole validation checkpoint.
    ///
    /// `Ok` carries the settled state (empty buffer clears the date, a
    /// valid buffer resolves it). `Err` carries the `Invalid` state so the
    /// caller can surface the blocking alert before storing it.
    pub fn commit(&self) -> Result<DateField, DateField> {
        match self {
            DateField::Empty | DateField::Invalid(_) => Ok(DateField::Empty),
            DateField::Valid(date) => Ok(DateField::Valid(*date)),
            DateField::Typing(buffer) => {
                let trimmed = buffer.trim();
                if trimmed.is_empty() {
                    return Ok(DateField::Empty);
                }
                match parse_display_date(trimmed) {
                    Some(date) => Ok(DateField::Valid(date)),
                    None => Err(DateField::Invalid(trimmed.to_string())),
                }
            }
        }
    }

    /// Storage form for the save payload; `None` unless resolved.
    pub fn iso_value(&self) -> Option<String> {
        match self {
            DateField::Valid(date) => Some(to_local_date_string(*date)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{Category, Currency};

    fn expense_on(date: &str) -> Expense {
        Expense {
            id: 1,
            amount: 10.0,
            currency: Currency::CAD,
            description: "Test".to_string(),
            category: Category::Other,
            expense_date: date.to_string(),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_to_local_date_string_pads() {
        assert_eq!(to_local_date_string(date(2024, 6, 4)), "2024-06-04");
        assert_eq!(to_local_date_string(date(1999, 12, 31)), "1999-12-31");
    }

    #[test]
    fn test_day_filter_matches_storage_string() {
        let expenses = vec![expense_on("2024-06-10"), expense_on("2024-06-09")];
        let filtered = filter_by_period(&expenses, Period::Day, date(2024, 6, 10));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].expense_date, "2024-06-10");
    }

    #[test]
    fn test_week_filter_covers_exactly_seven_days() {
        let expenses = vec![
            expense_on("2024-06-10"),
            expense_on("2024-06-04"),
            expense_on("2024-06-03"),
        ];
        let filtered = filter_by_period(&expenses, Period::Week, date(2024, 6, 10));
        let dates: Vec<&str> = filtered.iter().map(|e| e.expense_date.as_str()).collect();
        assert_eq!(dates, vec!["2024-06-10", "2024-06-04"]);
    }

    #[test]
    fn test_week_filter_crosses_month_boundary() {
        let expenses = vec![expense_on("2024-05-28"), expense_on("2024-05-27")];
        let filtered = filter_by_period(&expenses, Period::Week, date(2024, 6, 3));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].expense_date, "2024-05-28");
    }

    #[test]
    fn test_month_filter_excludes_first_of_next_month() {
        let expenses = vec![
            expense_on("2024-06-01"),
            expense_on("2024-06-30"),
            expense_on("2024-07-01"),
            expense_on("2024-05-31"),
        ];
        let filtered = filter_by_period(&expenses, Period::Month, date(2024, 6, 10));
        let dates: Vec<&str> = filtered.iter().map(|e| e.expense_date.as_str()).collect();
        assert_eq!(dates, vec!["2024-06-01", "2024-06-30"]);
    }

    #[test]
    fn test_month_filter_handles_december() {
        let expenses = vec![expense_on("2024-12-31"), expense_on("2025-01-01")];
        let filtered = filter_by_period(&expenses, Period::Month, date(2024, 12, 15));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].expense_date, "2024-12-31");
    }

    #[test]
    fn test_unparseable_dates_are_excluded() {
        let expenses = vec![expense_on("not-a-date")];
        assert!(filter_by_period(&expenses, Period::Week, date(2024, 6, 10)).is_empty());
        assert!(filter_by_period(&expenses, Period::Month, date(2024, 6, 10)).is_empty());
    }

    #[test]
    fn test_month_options_run_to_december() {
        let options = month_options(date(2024, 10, 7));
        assert_eq!(options, vec!["2024-10", "2024-11", "2024-12"]);
    }

    #[test]
    fn test_month_options_in_december() {
        assert_eq!(month_options(date(2024, 12, 1)), vec!["2024-12"]);
    }

    #[test]
    fn test_format_date_input_is_progressive() {
        assert_eq!(format_date_input("1"), "1");
        assert_eq!(format_date_input("15"), "15");
        assert_eq!(format_date_input("150"), "15/0");
        assert_eq!(format_date_input("1503"), "15/03");
        assert_eq!(format_date_input("15032"), "15/03/2");
        assert_eq!(format_date_input("15032024"), "15/03/2024");
    }

    #[test]
    fn test_format_date_input_strips_and_caps() {
        assert_eq!(format_date_input("15/03/2024"), "15/03/2024");
        assert_eq!(format_date_input("15a03b2024xx99"), "15/03/2024");
        assert_eq!(format_date_input(""), "");
    }

    #[test]
    fn test_parse_display_date_checks_the_calendar() {
        assert_eq!(parse_display_date("25/12/2024"), Some(date(2024, 12, 25)));
        assert_eq!(parse_display_date("31/02/2024"), None);
        assert_eq!(parse_display_date("29/02/2024"), Some(date(2024, 2, 29)));
        assert_eq!(parse_display_date("29/02/2023"), None);
    }

    #[test]
    fn test_parse_display_date_enforces_ranges() {
        assert_eq!(parse_display_date("00/12/2024"), None);
        assert_eq!(parse_display_date("25/13/2024"), None);
        assert_eq!(parse_display_date("25/12/1899"), None);
        assert_eq!(parse_display_date("25/12/2101"), None);
        assert_eq!(parse_display_date("25/12"), None);
    }

    #[test]
    fn test_display_storage_round_trip() {
        assert_eq!(to_iso_date("25/12/2024"), "2024-12-25");
        assert_eq!(to_display_date("2024-12-25"), "25/12/2024");
        assert_eq!(to_display_date(&to_iso_date("25/12/2024")), "25/12/2024");
    }

    #[test]
    fn test_to_iso_date_pads_components() {
        assert_eq!(to_iso_date("5/3/2024"), "2024-03-05");
    }

    #[test]
    fn test_date_field_keystroke_never_blocks() {
        let field = DateField::Empty;
        let field = field.keystroke("15032024");
        assert_eq!(field, DateField::Typing("15/03/2024".to_string()));
        assert_eq!(field.display_value(), "15/03/2024");
    }

    #[test]
    fn test_date_field_commit_resolves_valid_input() {
        let field = DateField::Typing("25/12/2024".to_string());
        let committed = field.commit().unwrap();
        assert_eq!(committed, DateField::Valid(date(2024, 12, 25)));
        assert_eq!(committed.iso_value(), Some("2024-12-25".to_string()));
        assert_eq!(committed.display_value(), "25/12/2024");
    }

    #[test]
    fn test_date_field_commit_clears_empty_buffer() {
        let committed = DateField::Typing("  ".to_string()).commit().unwrap();
        assert_eq!(committed, DateField::Empty);
        assert_eq!(committed.iso_value(), None);
    }

    #[test]
    fn test_date_field_commit_rejects_bad_dates() {
        let rejected = DateField::Typing("31/02/2024".to_string()).commit().unwrap_err();
        assert_eq!(rejected, DateField::Invalid("31/02/2024".to_string()));
        // Rejected input renders as an empty buffer and yields no value.
        assert_eq!(rejected.display_value(), "");
        assert_eq!(rejected.iso_value(), None);
    }

    #[test]
    fn test_date_field_single_source_of_truth() {
        // In every state, at most one of buffer/resolved date is live.
        let typing = DateField::Typing("25/12".to_string());
        assert!(typing.iso_value().is_none());

        let valid = DateField::Typing("25/12/2024".to_string()).commit().unwrap();
        assert!(valid.iso_value().is_some());
        assert_eq!(valid.display_value(), "25/12/2024"); // derived, not buffered
    }

    #[test]
    fn test_date_field_from_iso() {
        assert_eq!(
            DateField::from_iso(Some("2024-06-10")),
            DateField::Valid(date(2024, 6, 10))
        );
        assert_eq!(DateField::from_iso(Some("garbage")), DateField::Empty);
        assert_eq!(DateField::from_iso(None), DateField::Empty);
    }

    #[test]
    fn test_date_field_recommit_after_invalid_clears() {
        let rejected = DateField::Typing("99/99/9999".to_string()).commit().unwrap_err();
        assert_eq!(rejected.commit().unwrap(), DateField::Empty);
    }
}
