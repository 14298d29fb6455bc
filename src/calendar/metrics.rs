use crate::calendar::date::CalendarDate;

/// Year-progress numbers derived from a single [`CalendarDate`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct DayMetrics {
    /// 1-based; reaches 366 on Dec 31 of a leap year.
    pub day_of_year: u32,
    pub days_in_year: u32,
    /// Days remaining after today, through Dec 31.
    pub days_left: u32,
    pub percent_elapsed: f64,
}

impl DayMetrics {
    pub fn for_date(date: CalendarDate) -> Self {
        let day_of_year = date.day_of_year();
        let days_in_year = date.days_in_year();
        Self {
            day_of_year,
            days_in_year,
            days_left: date.days_left(),
            percent_elapsed: f64::from(day_of_year) / f64::from(days_in_year) * 100.0,
        }
    }

    /// `percent_elapsed` with exactly one decimal digit, e.g. `"0.3"` or `"100.0"`.
    pub fn percent_label(&self) -> String {
        format!("{:.1}", self.percent_elapsed)
    }

    /// Text drawn under the grid.
    pub fn label_text(&self) -> String {
        format!(
            "{} Days Left  \u{2022}  {}%",
            self.days_left,
            self.percent_label()
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/calendar/metrics.rs"]
mod tests;
