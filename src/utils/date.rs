use chrono::{Datelike, Days, NaiveDate, Weekday};

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Named ranges used by the reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeKind {
    Today,
    /// Sunday to Saturday around the reference day.
    Week,
    Month,
}

/// First and last day (inclusive) of the range containing `reference`.
pub fn date_range(kind: RangeKind, reference: NaiveDate) -> (NaiveDate, NaiveDate) {
    match kind {
        RangeKind::Today => (reference, reference),
        RangeKind::Week => {
            let back = reference.weekday().num_days_from_sunday() as u64;
            // clamped at the ends of the calendar
            let start = reference.checked_sub_days(Days::new(back)).unwrap_or(NaiveDate::MIN);
            let end = start.checked_add_days(Days::new(6)).unwrap_or(NaiveDate::MAX);
            (start, end)
        }
        RangeKind::Month => month_bounds(reference.year(), reference.month())
            .unwrap_or((reference, reference)),
    }
}

/// First and last day of a calendar month.
pub fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year.checked_add(1)?, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((first, next.pred_opt()?))
}

/// Week of the month a day falls in: days 1-7 → 1, 8-14 → 2, ...
pub fn week_of_month(date: NaiveDate) -> u32 {
    date.day().div_ceil(7)
}

pub fn weekday_short(date: NaiveDate) -> &'static str {
    match date.weekday() {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    }
}
