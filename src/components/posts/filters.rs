use chrono::{Months, NaiveDate};

use crate::environment::model::{AllPostsRequest, UserProfile};
use crate::helper::{date_input_value, parse_date_input};

const DAY_MILLIS: i64 = 86_400_000;

/// The search form of the post browser. Dates are kept as the raw
/// `YYYY-MM-DD` values of the date inputs.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Filters {
    pub keyword: String,
    pub start_date: String,
    pub end_date: String,
    /// `None` searches the posts of all users
    pub user: Option<UserProfile>,
}

impl Filters {
    /// The last three months up to `today`
    pub fn new(today: NaiveDate) -> Self {
        let start = today.checked_sub_months(Months::new(3)).unwrap_or(today);
        Self {
            keyword: String::new(),
            start_date: date_input_value(start),
            end_date: date_input_value(today),
            user: None,
        }
    }

    /// Accept a new start date unless it lies after the end date.
    /// The values compare as strings, which orders `YYYY-MM-DD` correctly.
    pub fn set_start_date(&mut self, value: String) -> bool {
        if value.as_str() <= self.end_date.as_str() {
            self.start_date = value;
            true
        } else {
            false
        }
    }

    /// Accept a new end date unless it lies before the start date
    pub fn set_end_date(&mut self, value: String) -> bool {
        if value.as_str() >= self.start_date.as_str() {
            self.end_date = value;
            true
        } else {
            false
        }
    }

    pub fn user_id(&self) -> String {
        self.user.as_ref().map(|u| u.id.clone()).unwrap_or_default()
    }

    /// Midnight UTC of the start date, `0` if it doesn't parse
    pub fn start_timestamp(&self) -> i64 {
        parse_date_input(&self.start_date)
            .map(midnight_utc_millis)
            .unwrap_or(0)
    }

    /// The end of the end date (UTC), `now_millis` if it doesn't parse
    pub fn end_timestamp(&self, now_millis: i64) -> i64 {
        parse_date_input(&self.end_date)
            .map(|d| midnight_utc_millis(d) + DAY_MILLIS)
            .unwrap_or(now_millis)
    }

    pub fn request(&self, page: usize, now_millis: i64) -> AllPostsRequest {
        AllPostsRequest {
            page,
            user_id: self.user_id(),
            keyword: self.keyword.clone(),
            start_date: self.start_timestamp(),
            end_date: self.end_timestamp(now_millis),
        }
    }
}

fn midnight_utc_millis(date: NaiveDate) -> i64 {
    date.and_hms_opt(0, 0, 0)
        .map(|d| d.and_utc().timestamp_millis())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn defaults_to_the_last_three_months() {
        let filters = Filters::new(date(2025, 5, 31));
        assert_eq!(filters.start_date, "2025-02-28");
        assert_eq!(filters.end_date, "2025-05-31");
        assert!(filters.keyword.is_empty());
        assert_eq!(filters.user_id(), "");
    }

    #[test]
    fn timestamps_cover_whole_days() {
        let mut filters = Filters::new(date(2025, 1, 2));
        filters.start_date = "2025-01-01".to_string();
        filters.end_date = "2025-01-02".to_string();
        assert_eq!(filters.start_timestamp(), 1_735_689_600_000);
        assert_eq!(filters.end_timestamp(0), 1_735_776_000_000 + DAY_MILLIS);
    }

    #[test]
    fn unparseable_dates_fall_back() {
        let mut filters = Filters::new(date(2025, 1, 2));
        filters.start_date = String::new();
        filters.end_date = "garbage".to_string();
        assert_eq!(filters.start_timestamp(), 0);
        assert_eq!(filters.end_timestamp(42), 42);
        let request = filters.request(3, 42);
        assert_eq!(request.page, 3);
        assert_eq!(request.start_date, 0);
        assert_eq!(request.end_date, 42);
    }

    #[test]
    fn start_after_end_is_rejected() {
        let mut filters = Filters::new(date(2025, 1, 10));
        filters.start_date = "2025-01-01".to_string();
        assert!(!filters.set_start_date("2025-02-01".to_string()));
        assert_eq!(filters.start_date, "2025-01-01");
        assert!(filters.set_start_date("2025-01-10".to_string()));
        assert!(!filters.set_end_date("2025-01-09".to_string()));
        assert_eq!(filters.end_date, "2025-01-10");
        assert!(filters.set_end_date("2025-03-01".to_string()));
    }

    #[test]
    fn request_carries_the_selected_user() {
        let mut filters = Filters::new(date(2025, 1, 10));
        filters.keyword = "hello".to_string();
        filters.user = Some(UserProfile {
            id: "u1".to_string(),
            username: "alice".to_string(),
            ..Default::default()
        });
        let request = filters.request(0, 0);
        assert_eq!(request.user_id, "u1");
        assert_eq!(request.keyword, "hello");
    }
}
