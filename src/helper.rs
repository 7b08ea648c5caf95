use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Timelike};

pub fn format_number(number: i64) -> String {
    use numfmt::*;
    let mut formatter = Formatter::default()
        .scales(Scales::metric())
        .precision(Precision::Decimals(0));
    formatter.fmt(number as f64).to_string()
}

fn local_datetime<Tz: TimeZone>(millis: i64, tz: &Tz) -> Option<DateTime<Tz>> {
    tz.timestamp_millis_opt(millis).single()
}

/// Post timestamps, e.g. `Mon Sep 08 2025 下午2:43`
pub fn format_post_time<Tz: TimeZone>(millis: i64, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let Some(date) = local_datetime(millis, tz) else {
        return String::new()
    };
    let (is_pm, hour) = date.hour12();
    let period = if is_pm { "下午" } else { "上午" };
    format!(
        "{} {period}{hour}:{:02}",
        date.format("%a %b %d %Y"),
        date.minute()
    )
}

/// `MM/DD`
pub fn format_reaction_date<Tz: TimeZone>(millis: i64, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    local_datetime(millis, tz)
        .map(|d| d.format("%m/%d").to_string())
        .unwrap_or_default()
}

/// `HH:MM`
pub fn format_reaction_time<Tz: TimeZone>(millis: i64, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    local_datetime(millis, tz)
        .map(|d| d.format("%H:%M").to_string())
        .unwrap_or_default()
}

/// `YYYY/MM/DD HH:MM`
pub fn format_reaction_timestamp<Tz: TimeZone>(millis: i64, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    local_datetime(millis, tz)
        .map(|d| d.format("%Y/%m/%d %H:%M").to_string())
        .unwrap_or_default()
}

const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";
const DATETIME_INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// The value of a date input field, `YYYY-MM-DD`
pub fn date_input_value(date: NaiveDate) -> String {
    date.format(DATE_INPUT_FORMAT).to_string()
}

pub fn parse_date_input(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_INPUT_FORMAT).ok()
}

/// The value of a datetime-local input field, `YYYY-MM-DDTHH:MM`
pub fn datetime_input_value(datetime: NaiveDateTime) -> String {
    datetime.format(DATETIME_INPUT_FORMAT).to_string()
}

pub fn parse_datetime_input(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value.trim(), DATETIME_INPUT_FORMAT).ok()
}

/// Lowercase name with every whitespace run replaced by `-`, leading and
/// trailing runs included
pub fn slug(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut in_whitespace = false;
    for c in name.to_lowercase().chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                slug.push('-');
            }
            in_whitespace = true;
        } else {
            slug.push(c);
            in_whitespace = false;
        }
    }
    slug
}

/// Builds a space separated css class list from conditional parts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassList(Vec<String>);

impl ClassList {
    pub fn new(base: impl Into<String>) -> Self {
        Self(vec![base.into()])
    }

    pub fn with(mut self, class: impl Into<String>, condition: bool) -> Self {
        if condition {
            self.0.push(class.into());
        }
        self
    }

    pub fn with_optional(self, class: Option<&str>) -> Self {
        match class {
            Some(c) if !c.trim().is_empty() => self.with(c.trim(), true),
            _ => self,
        }
    }

    pub fn contains(&self, class: &str) -> bool {
        self.0.iter().any(|c| c == class)
    }
}

impl std::fmt::Display for ClassList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn millis(y: i32, m: u32, d: u32, h: u32, min: u32) -> i64 {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0)
            .unwrap()
            .timestamp_millis()
    }

    #[test]
    fn post_time_uses_twelve_hour_clock_with_period() {
        assert_eq!(
            format_post_time(millis(2025, 9, 8, 14, 43), &Utc),
            "Mon Sep 08 2025 下午2:43"
        );
        assert_eq!(
            format_post_time(millis(2025, 9, 8, 0, 5), &Utc),
            "Mon Sep 08 2025 上午12:05"
        );
        assert_eq!(
            format_post_time(millis(2025, 9, 8, 12, 0), &Utc),
            "Mon Sep 08 2025 下午12:00"
        );
    }

    #[test]
    fn reaction_formats_are_zero_padded() {
        let t = millis(2024, 3, 7, 9, 4);
        assert_eq!(format_reaction_date(t, &Utc), "03/07");
        assert_eq!(format_reaction_time(t, &Utc), "09:04");
        assert_eq!(format_reaction_timestamp(t, &Utc), "2024/03/07 09:04");
    }

    #[test]
    fn input_values_round_trip_through_the_parsers() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        assert_eq!(date_input_value(date), "2024-01-31");
        assert_eq!(parse_date_input("2024-01-31"), Some(date));
        assert_eq!(parse_date_input("31.01.2024"), None);
        assert_eq!(parse_date_input(""), None);

        let datetime = date.and_hms_opt(23, 59, 0).unwrap();
        assert_eq!(datetime_input_value(datetime), "2024-01-31T23:59");
        assert_eq!(parse_datetime_input("2024-01-31T23:59"), Some(datetime));
        assert_eq!(parse_datetime_input("2024-01-31"), None);
    }

    #[test]
    fn slug_collapses_whitespace() {
        assert_eq!(slug("Town  Square"), "town-square");
        assert_eq!(slug(" Off Topic "), "-off-topic-");
        assert_eq!(slug("Core\t\n Team"), "core-team");
        assert_eq!(slug(""), "");
    }

    #[test]
    fn class_list_only_keeps_enabled_classes() {
        let classes = ClassList::new("badge")
            .with("urgent", false)
            .with("unread", true)
            .with_optional(Some("sidebar"))
            .with_optional(Some("  "))
            .with_optional(None);
        assert_eq!(classes.to_string(), "badge unread sidebar");
        assert!(classes.contains("unread"));
        assert!(!classes.contains("urgent"));
    }

    #[test]
    fn numbers_are_shortened() {
        assert_eq!(format_number(12), "12");
    }
}
