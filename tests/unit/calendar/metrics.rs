use super::*;

fn metrics(s: &str) -> DayMetrics {
    DayMetrics::for_date(CalendarDate::parse(s).unwrap())
}

#[test]
fn first_day_of_leap_year() {
    let m = metrics("2024-01-01");
    assert_eq!(m.day_of_year, 1);
    assert_eq!(m.days_in_year, 366);
    assert_eq!(m.days_left, 365);
    assert_eq!(m.percent_label(), "0.3");
}

#[test]
fn last_day_of_leap_year() {
    let m = metrics("2024-12-31");
    assert_eq!(m.day_of_year, 366);
    assert_eq!(m.days_left, 0);
    assert_eq!(m.percent_label(), "100.0");
}

#[test]
fn last_day_of_common_year() {
    let m = metrics("2025-12-31");
    assert_eq!(m.day_of_year, 365);
    assert_eq!(m.days_in_year, 365);
    assert_eq!(m.days_left, 0);
    assert_eq!(m.percent_label(), "100.0");
}

#[test]
fn mid_year_percent_has_one_decimal() {
    let m = metrics("2025-07-02");
    assert_eq!(m.day_of_year, 183);
    assert_eq!(m.percent_label(), "50.1");
    for s in ["2025-01-01", "2025-03-15", "2024-09-09"] {
        let label = metrics(s).percent_label();
        let (_, frac) = label.split_once('.').unwrap();
        assert_eq!(frac.len(), 1, "{label}");
    }
}

#[test]
fn label_text_layout() {
    assert_eq!(
        metrics("2024-01-01").label_text(),
        "365 Days Left  \u{2022}  0.3%"
    );
    assert_eq!(metrics("2024-12-31").label_text(), "0 Days Left  \u{2022}  100.0%");
}
