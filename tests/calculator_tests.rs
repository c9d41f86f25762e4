use chrono::{Duration, Local, NaiveDate, TimeZone, Utc};
use rtimeclock::core::calculator::aggregate::{DayRow, group_by_week_of_month, summarize};
use rtimeclock::core::calculator::totals::{overtime, session_totals};
use rtimeclock::core::history::total_pages;
use rtimeclock::models::break_entry::Break;
use rtimeclock::models::break_kind::BreakKind;
use rtimeclock::models::status::{BreakStatus, SessionStatus};
use rtimeclock::models::work_session::WorkSession;
use rtimeclock::utils::date::{RangeKind, date_range, month_bounds, week_of_month};
use rtimeclock::utils::formatting::{
    calculate_percentage, format_date, format_datetime, format_duration, format_number, format_time,
};
use rtimeclock::utils::time::parse_work_duration;
use rtimeclock::utils::validation::{Strength, is_valid_email, validate_password};
use rtimeclock::utils::{calculate_duration, format_duration_human};

const EIGHT_HOURS: i64 = 8 * 3600;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn session(id: i64, day: NaiveDate, net: Option<i64>, status: SessionStatus) -> WorkSession {
    let clock_in = Utc.from_utc_datetime(&day.and_hms_opt(8, 0, 0).unwrap());
    let clock_out = net.map(|n| clock_in + Duration::seconds(n));
    WorkSession {
        id,
        user_id: "u1".to_string(),
        work_date: day,
        clock_in,
        clock_out,
        status,
        net_seconds: net,
        created_at: String::new(),
        breaks: Vec::new(),
    }
}

#[test]
fn duration_is_floored_to_whole_seconds() {
    let a = Utc.with_ymd_and_hms(2025, 6, 2, 9, 0, 0).unwrap();

    assert_eq!(calculate_duration(a, a + Duration::milliseconds(1999)), 1);
    assert_eq!(calculate_duration(a, a + Duration::hours(8)), 28800);
    assert_eq!(calculate_duration(a, a), 0);
}

#[test]
fn duration_is_negative_when_end_precedes_start() {
    let a = Utc.with_ymd_and_hms(2025, 6, 2, 9, 0, 0).unwrap();

    assert_eq!(calculate_duration(a, a - Duration::seconds(90)), -90);
    assert_eq!(calculate_duration(a, a - Duration::milliseconds(1500)), -2);
}

#[test]
fn eight_and_a_half_hours_with_half_hour_break_nets_eight_hours() {
    let day = date(2025, 6, 2);
    let clock_in = Utc.from_utc_datetime(&day.and_hms_opt(9, 0, 0).unwrap());
    let mut s = session(1, day, None, SessionStatus::Completed);
    s.clock_in = clock_in;
    s.clock_out = Some(clock_in + Duration::seconds(30600));
    s.breaks = vec![Break {
        id: 1,
        session_id: 1,
        kind: BreakKind::Meal,
        started_at: clock_in + Duration::hours(3),
        ended_at: Some(clock_in + Duration::hours(3) + Duration::minutes(30)),
        status: BreakStatus::Ended,
        duration_seconds: Some(1800),
    }];

    let t = session_totals(&s, Utc::now(), EIGHT_HOURS);

    assert_eq!(t.total_seconds, 30600);
    assert_eq!(t.break_seconds, 1800);
    assert_eq!(t.net_seconds, 28800);
    assert_eq!(t.overtime_seconds, 0);
}

#[test]
fn active_session_and_open_break_run_until_now() {
    let day = date(2025, 6, 2);
    let clock_in = Utc.from_utc_datetime(&day.and_hms_opt(9, 0, 0).unwrap());
    let now = clock_in + Duration::hours(2);

    let mut s = session(1, day, None, SessionStatus::Active);
    s.clock_in = clock_in;
    s.breaks = vec![Break {
        id: 1,
        session_id: 1,
        kind: BreakKind::Rest,
        started_at: now - Duration::minutes(10),
        ended_at: None,
        status: BreakStatus::Active,
        duration_seconds: None,
    }];

    let t = session_totals(&s, now, EIGHT_HOURS);

    assert_eq!(t.total_seconds, 7200);
    assert_eq!(t.break_seconds, 600);
    assert_eq!(t.net_seconds, 6600);
}

#[test]
fn overtime_is_never_negative() {
    assert_eq!(overtime(34200, EIGHT_HOURS), 3600);
    assert_eq!(overtime(28800, EIGHT_HOURS), 0);
    assert_eq!(overtime(1000, EIGHT_HOURS), 0);
}

#[test]
fn weekly_summary_of_five_full_days() {
    let sessions: Vec<WorkSession> = (0..5)
        .map(|i| session(i, date(2025, 6, 2 + i as u32), Some(28800), SessionStatus::Completed))
        .collect();

    let s = summarize(&sessions, EIGHT_HOURS);

    assert_eq!(s.total_net_seconds, 144000);
    assert_eq!(s.days_worked, 5);
    assert_eq!(s.average_daily_seconds, 28800);
    assert_eq!(s.total_overtime_seconds, 0);
    assert_eq!(s.daily.len(), 5);
}

#[test]
fn summary_skips_running_sessions_and_floors_the_average() {
    let sessions = vec![
        session(1, date(2025, 6, 2), Some(10001), SessionStatus::Completed),
        session(2, date(2025, 6, 3), Some(10000), SessionStatus::Completed),
        session(3, date(2025, 6, 4), None, SessionStatus::Active),
    ];

    let s = summarize(&sessions, EIGHT_HOURS);

    assert_eq!(s.days_worked, 2);
    assert_eq!(s.total_net_seconds, 20001);
    assert_eq!(s.average_daily_seconds, 10000);
}

#[test]
fn empty_summary_has_zero_average() {
    let s = summarize(&[], EIGHT_HOURS);
    assert_eq!(s.days_worked, 0);
    assert_eq!(s.average_daily_seconds, 0);
}

#[test]
fn days_group_by_week_of_month() {
    let rows = vec![
        DayRow { date: date(2025, 6, 2), net_seconds: 100, break_seconds: 0 },
        DayRow { date: date(2025, 6, 7), net_seconds: 200, break_seconds: 0 },
        DayRow { date: date(2025, 6, 8), net_seconds: 300, break_seconds: 0 },
        DayRow { date: date(2025, 6, 30), net_seconds: 400, break_seconds: 0 },
    ];

    let weeks = group_by_week_of_month(&rows);

    assert_eq!(weeks.len(), 3);
    assert_eq!((weeks[0].week, weeks[0].total_seconds, weeks[0].days), (1, 300, 2));
    assert_eq!((weeks[1].week, weeks[1].total_seconds, weeks[1].days), (2, 300, 1));
    assert_eq!((weeks[2].week, weeks[2].total_seconds, weeks[2].days), (5, 400, 1));
}

#[test]
fn week_of_month_is_ceil_of_day_over_seven() {
    assert_eq!(week_of_month(date(2025, 6, 1)), 1);
    assert_eq!(week_of_month(date(2025, 6, 7)), 1);
    assert_eq!(week_of_month(date(2025, 6, 8)), 2);
    assert_eq!(week_of_month(date(2025, 6, 29)), 5);
}

#[test]
fn week_range_runs_sunday_to_saturday() {
    // Wednesday 4 June 2025
    let (start, end) = date_range(RangeKind::Week, date(2025, 6, 4));
    assert_eq!(start, date(2025, 6, 1));
    assert_eq!(end, date(2025, 6, 7));

    let (start, _) = date_range(RangeKind::Week, date(2025, 6, 1));
    assert_eq!(start, date(2025, 6, 1));
}

#[test]
fn month_range_covers_the_calendar_month() {
    assert_eq!(
        date_range(RangeKind::Month, date(2024, 2, 10)),
        (date(2024, 2, 1), date(2024, 2, 29))
    );
    assert_eq!(month_bounds(2025, 12), Some((date(2025, 12, 1), date(2025, 12, 31))));
    assert_eq!(month_bounds(2025, 13), None);
    assert_eq!(month_bounds(i32::MAX, 12), None);
}

#[test]
fn total_pages_rounds_up() {
    assert_eq!(total_pages(45, 20), 3);
    assert_eq!(total_pages(40, 20), 2);
    assert_eq!(total_pages(0, 20), 0);
    assert_eq!(total_pages(1, i64::MAX), 1);
    assert_eq!(total_pages(i64::MAX, 2), i64::MAX / 2 + 1);
}

#[test]
fn durations_format_as_clock_and_human_text() {
    assert_eq!(format_duration(28800), "08:00:00");
    assert_eq!(format_duration(3725), "01:02:05");
    assert_eq!(format_duration(-90), "-00:01:30");
    assert_eq!(format_duration_human(30600), "8h 30m");
    assert_eq!(format_duration_human(2700), "45m");
}

#[test]
fn dates_and_times_render_in_local_time() {
    let instant = Local
        .with_ymd_and_hms(2025, 6, 2, 9, 5, 0)
        .unwrap()
        .with_timezone(&Utc);

    assert_eq!(format_time(instant), "09:05");
    assert_eq!(format_datetime(instant), "2 Jun 2025 09:05");
    assert_eq!(
        format_date(NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()),
        "2 June 2025"
    );
}

#[test]
fn numbers_and_percentages() {
    assert_eq!(format_number(1234567), "1.234.567");
    assert_eq!(format_number(999), "999");
    assert_eq!(calculate_percentage(1, 3), 33);
    assert_eq!(calculate_percentage(2, 3), 67);
    assert_eq!(calculate_percentage(5, 0), 0);
}

#[test]
fn password_rules() {
    let ok = validate_password("Abcdefg1");
    assert!(ok.is_valid);
    assert_eq!(ok.score, 4);
    assert_eq!(ok.strength, Strength::Strong);

    let lower = validate_password("abcdefg1");
    assert!(!lower.is_valid);
    assert!(!lower.checks.has_upper);
    assert_eq!(lower.strength, Strength::Medium);

    assert!(!validate_password("Ab1").is_valid);
    assert_eq!(validate_password("Abcdefg1!").score, 5);
}

#[test]
fn email_format() {
    assert!(is_valid_email("ana@example.com"));
    assert!(!is_valid_email("ana@example"));
    assert!(!is_valid_email("ana example@x.com"));
    assert!(!is_valid_email("@example.com"));
}

#[test]
fn work_duration_setting() {
    assert_eq!(parse_work_duration("8h"), Some(28800));
    assert_eq!(parse_work_duration("7h30m"), Some(27000));
    assert_eq!(parse_work_duration("480"), Some(28800));
    assert_eq!(parse_work_duration("8x"), None);
}
