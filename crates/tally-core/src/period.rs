//! Calendar period boundaries
//!
//! All boundaries for one analytics call are computed from a single captured
//! "now" so every membership check within that call agrees.

use chrono::{Datelike, Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// First day of the week used for "this week" boundaries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sunday => "sunday",
            Self::Monday => "monday",
        }
    }

    /// Days elapsed since the start of the week containing `date`
    fn offset(&self, date: NaiveDate) -> i64 {
        match self {
            Self::Sunday => date.weekday().num_days_from_sunday() as i64,
            Self::Monday => date.weekday().num_days_from_monday() as i64,
        }
    }
}

impl std::str::FromStr for WeekStart {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sunday" | "sun" => Ok(Self::Sunday),
            "monday" | "mon" => Ok(Self::Monday),
            _ => Err(format!("Unknown week start: {}", s)),
        }
    }
}

impl std::fmt::Display for WeekStart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Period boundaries captured once per analytics call (all inclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Periods {
    pub today: NaiveDate,
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub month_start: NaiveDate,
    pub month_end: NaiveDate,
    pub year_start: NaiveDate,
    pub last_month_start: NaiveDate,
    pub last_month_end: NaiveDate,
    pub last_year_start: NaiveDate,
    /// End of the same calendar month one year ago
    pub last_year_month_end: NaiveDate,
}

impl Periods {
    /// Compute every boundary relative to `today`
    pub fn capture(today: NaiveDate, week_start: WeekStart) -> Self {
        let week_start_date = today - Duration::days(week_start.offset(today));
        let last_month = shift_months_back(today, 1);
        let last_year = shift_months_back(today, 12);

        Self {
            today,
            week_start: week_start_date,
            week_end: week_start_date + Duration::days(6),
            month_start: start_of_month(today),
            month_end: end_of_month(today),
            year_start: start_of_year(today),
            last_month_start: start_of_month(last_month),
            last_month_end: end_of_month(last_month),
            last_year_start: start_of_year(last_year),
            last_year_month_end: end_of_month(last_year),
        }
    }

    pub fn is_today(&self, date: NaiveDate) -> bool {
        date == self.today
    }

    /// Same calendar week as today (future days of this week included)
    pub fn in_this_week(&self, date: NaiveDate) -> bool {
        within(date, self.week_start, self.week_end)
    }

    /// Same calendar month as today (future days of this month included)
    pub fn in_this_month(&self, date: NaiveDate) -> bool {
        within(date, self.month_start, self.month_end)
    }

    /// Start of this month through today
    pub fn in_month_to_date(&self, date: NaiveDate) -> bool {
        within(date, self.month_start, self.today)
    }

    pub fn in_last_month(&self, date: NaiveDate) -> bool {
        within(date, self.last_month_start, self.last_month_end)
    }

    /// Start of this year through today
    pub fn in_year_to_date(&self, date: NaiveDate) -> bool {
        within(date, self.year_start, self.today)
    }

    /// Start of last year through the end of this month one year ago
    pub fn in_last_year_to_date(&self, date: NaiveDate) -> bool {
        within(date, self.last_year_start, self.last_year_month_end)
    }
}

/// Inclusive interval membership
pub fn within(date: NaiveDate, start: NaiveDate, end: NaiveDate) -> bool {
    date >= start && date <= end
}

/// Monthly aggregate key (`YYYY-MM`)
pub fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

pub fn start_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn end_of_month(date: NaiveDate) -> NaiveDate {
    let start = start_of_month(date);
    start
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}

pub fn start_of_year(date: NaiveDate) -> NaiveDate {
    date.with_ordinal(1).unwrap_or(date)
}

/// Move back whole calendar months, clamping the day (Mar 31 -> Feb 28/29)
pub fn shift_months_back(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_sub_months(Months::new(months))
        .unwrap_or(NaiveDate::MIN)
}
