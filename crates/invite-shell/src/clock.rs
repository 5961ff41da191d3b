//! Lock screen clock and the D-day widget.

use chrono::{Datelike, NaiveDate, Timelike, Weekday};

/// 12-hour `h:mm`, as on the lock screen. Midnight and noon show as 12.
pub fn format_time<T: Timelike>(t: &T) -> String {
    let hour = match t.hour() % 12 {
        0 => 12,
        h => h,
    };
    format!("{}:{:02}", hour, t.minute())
}

fn weekday_ko(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "월요일",
        Weekday::Tue => "화요일",
        Weekday::Wed => "수요일",
        Weekday::Thu => "목요일",
        Weekday::Fri => "금요일",
        Weekday::Sat => "토요일",
        Weekday::Sun => "일요일",
    }
}

/// Korean long date, e.g. `3월 28일 토요일`.
pub fn format_date_ko<D: Datelike>(d: &D) -> String {
    format!("{}월 {}일 {}", d.month(), d.day(), weekday_ko(d.weekday()))
}

/// Whole days from `today` to the wedding. Negative once it has passed.
pub fn days_until(today: NaiveDate, wedding: NaiveDate) -> i64 {
    wedding.signed_duration_since(today).num_days()
}

/// Calendar widget label.
pub fn dday_label(days: i64) -> String {
    if days > 0 {
        format!("D-{days}")
    } else {
        "D-Day!".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_format_time() {
        let t = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();
        assert_eq!(format_time(&t(0, 5)), "12:05");
        assert_eq!(format_time(&t(9, 41)), "9:41");
        assert_eq!(format_time(&t(12, 0)), "12:00");
        assert_eq!(format_time(&t(23, 59)), "11:59");
    }

    #[test]
    fn test_format_date_ko() {
        assert_eq!(format_date_ko(&date(2026, 3, 28)), "3월 28일 토요일");
        assert_eq!(format_date_ko(&date(2026, 10, 19)), "10월 19일 월요일");
    }

    #[test]
    fn test_dday() {
        let wedding = date(2026, 3, 28);
        assert_eq!(days_until(date(2026, 3, 1), wedding), 27);
        assert_eq!(dday_label(days_until(date(2026, 3, 1), wedding)), "D-27");
        assert_eq!(dday_label(days_until(wedding, wedding)), "D-Day!");
        assert_eq!(dday_label(days_until(date(2026, 4, 1), wedding)), "D-Day!");
    }
}
