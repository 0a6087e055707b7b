//! Deterministic natural-language date resolution

use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, Utc, Weekday};
use regex::Regex;

/// Resolves a free-text fragment to an absolute instant, relative to an
/// explicit reference instant. Implementations must be pure: same fragment
/// and reference, same answer.
pub trait DateTimeResolver {
    fn resolve(&self, fragment: &str, reference: DateTime<Utc>) -> Option<DateTime<Utc>>;
}

/// Built-in resolver covering relative expressions ("tomorrow", "next
/// Friday", "in 3 days"), month-name and numeric dates, and clock times.
///
/// Date-only phrases resolve to 12:00 of the target day. A clock time with
/// no date part lands on the reference day. Anything unrecognized is `None`.
#[derive(Debug, Clone)]
pub struct NaturalDateResolver {
    today_re: Regex,
    tomorrow_re: Regex,
    rel_span_re: Regex,
    rel_weekday_re: Regex,
    weekday_re: Regex,
    offset_re: Regex,
    month_day_re: Regex,
    day_month_re: Regex,
    numeric_re: Regex,
    marker_time_re: Regex,
    bare_time_re: Regex,
}

pub(crate) const WEEKDAYS: &str = "monday|tuesday|wednesday|thursday|friday|saturday|sunday";
pub(crate) const MONTHS: &str = "january|february|march|april|may|june|july|august|september|\
                                 october|november|december|jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec";

impl NaturalDateResolver {
    pub fn new() -> Self {
        Self {
            today_re: Regex::new(r"(?i)\btoday\b").unwrap(),
            tomorrow_re: Regex::new(r"(?i)\btomorrow\b").unwrap(),
            rel_span_re: Regex::new(r"(?i)\b(next|this)\s+(week|month)\b").unwrap(),
            rel_weekday_re: Regex::new(&format!(r"(?i)\b(next|this)\s+({WEEKDAYS})\b")).unwrap(),
            weekday_re: Regex::new(&format!(r"(?i)\b({WEEKDAYS})\b")).unwrap(),
            offset_re: Regex::new(r"(?i)\b(?:in|after)\s+(\d+)\s+(days?|weeks?|months?)\b")
                .unwrap(),
            month_day_re: Regex::new(&format!(
                r"(?i)\b({MONTHS})\s+(\d{{1,2}})(?:st|nd|rd|th)?(?:,?\s+(\d{{4}}))?\b"
            ))
            .unwrap(),
            day_month_re: Regex::new(&format!(
                r"(?i)\b(\d{{1,2}})(?:st|nd|rd|th)?\s+({MONTHS})(?:,?\s+(\d{{4}}))?\b"
            ))
            .unwrap(),
            numeric_re: Regex::new(r"\b(\d{1,2})/(\d{1,2})\b").unwrap(),
            marker_time_re: Regex::new(r"(?i)\b(?:at|by)\s+(\d{1,2})(?::(\d{2}))?\s*(am|pm)?\b")
                .unwrap(),
            bare_time_re: Regex::new(r"(?i)\b(\d{1,2})(?::(\d{2}))?\s*(am|pm)\b").unwrap(),
        }
    }

    fn resolve_date(&self, fragment: &str, reference: DateTime<Utc>) -> Option<NaiveDate> {
        let today = reference.date_naive();

        if self.today_re.is_match(fragment) {
            return Some(today);
        }
        if self.tomorrow_re.is_match(fragment) {
            return today.succ_opt();
        }
        if let Some(caps) = self.rel_span_re.captures(fragment) {
            let next = caps[1].eq_ignore_ascii_case("next");
            return match caps[2].to_lowercase().as_str() {
                "week" if next => today.checked_add_signed(Duration::days(7)),
                "month" if next => today.checked_add_months(Months::new(1)),
                _ => Some(today),
            };
        }
        if let Some(caps) = self.rel_weekday_re.captures(fragment) {
            let target = parse_weekday(&caps[2])?;
            return if caps[1].eq_ignore_ascii_case("next") {
                next_weekday(today, target)
            } else {
                weekday_in_week(today, target)
            };
        }
        if let Some(caps) = self.offset_re.captures(fragment) {
            let n: i64 = caps[1].parse().ok()?;
            return match caps[2].to_lowercase().as_str() {
                s if s.starts_with("day") => today.checked_add_signed(Duration::days(n)),
                s if s.starts_with("week") => today.checked_add_signed(Duration::days(7 * n)),
                _ => today.checked_add_months(Months::new(u32::try_from(n).ok()?)),
            };
        }
        if let Some(caps) = self.month_day_re.captures(fragment) {
            let month = parse_month(&caps[1])?;
            let day: u32 = caps[2].parse().ok()?;
            let year = captured_year(&caps, 3).unwrap_or(today.year());
            return NaiveDate::from_ymd_opt(year, month, day);
        }
        if let Some(caps) = self.day_month_re.captures(fragment) {
            let day: u32 = caps[1].parse().ok()?;
            let month = parse_month(&caps[2])?;
            let year = captured_year(&caps, 3).unwrap_or(today.year());
            return NaiveDate::from_ymd_opt(year, month, day);
        }
        if let Some(caps) = self.numeric_re.captures(fragment) {
            let month: u32 = caps[1].parse().ok()?;
            let day: u32 = caps[2].parse().ok()?;
            return NaiveDate::from_ymd_opt(today.year(), month, day);
        }
        // Bare weekday is the weakest signal, checked after explicit dates
        if let Some(caps) = self.weekday_re.captures(fragment) {
            let target = parse_weekday(&caps[1])?;
            return next_weekday(today, target);
        }
        None
    }

    fn resolve_time(&self, fragment: &str) -> Option<(u32, u32)> {
        for caps in self.marker_time_re.captures_iter(fragment) {
            let end = caps.get(0).map_or(0, |m| m.end());
            // "by 6/20" is a date, not an hour
            if fragment[end..].starts_with('/') {
                continue;
            }
            if let Some(clock) = clock_from_captures(&caps) {
                return Some(clock);
            }
        }
        for caps in self.bare_time_re.captures_iter(fragment) {
            if let Some(clock) = clock_from_captures(&caps) {
                return Some(clock);
            }
        }
        None
    }
}

impl Default for NaturalDateResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl DateTimeResolver for NaturalDateResolver {
    fn resolve(&self, fragment: &str, reference: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let date = self.resolve_date(fragment, reference);
        let time = self.resolve_time(fragment);

        if date.is_none() && time.is_none() {
            return None;
        }

        let day = match date {
            Some(d) => d,
            None => reference.date_naive(),
        };
        let (hour, minute) = time.unwrap_or((12, 0));
        day.and_hms_opt(hour, minute, 0).map(|dt| dt.and_utc())
    }
}

fn clock_from_captures(caps: &regex::Captures<'_>) -> Option<(u32, u32)> {
    let hour: u32 = caps.get(1)?.as_str().parse().ok()?;
    let minute: u32 = match caps.get(2) {
        Some(m) => m.as_str().parse().ok()?,
        None => 0,
    };
    let meridiem = caps.get(3).map(|m| m.as_str());
    to_clock(hour, minute, meridiem)
}

fn to_clock(hour: u32, minute: u32, meridiem: Option<&str>) -> Option<(u32, u32)> {
    if minute > 59 {
        return None;
    }
    match meridiem.map(str::to_lowercase).as_deref() {
        Some("am") => match hour {
            12 => Some((0, minute)),
            1..=11 => Some((hour, minute)),
            _ => None,
        },
        Some("pm") => match hour {
            12 => Some((12, minute)),
            1..=11 => Some((hour + 12, minute)),
            _ => None,
        },
        _ => (hour <= 23).then_some((hour, minute)),
    }
}

fn parse_weekday(s: &str) -> Option<Weekday> {
    match s.to_lowercase().as_str() {
        "monday" => Some(Weekday::Mon),
        "tuesday" => Some(Weekday::Tue),
        "wednesday" => Some(Weekday::Wed),
        "thursday" => Some(Weekday::Thu),
        "friday" => Some(Weekday::Fri),
        "saturday" => Some(Weekday::Sat),
        "sunday" => Some(Weekday::Sun),
        _ => None,
    }
}

fn parse_month(s: &str) -> Option<u32> {
    match s.to_lowercase().as_str() {
        "january" | "jan" => Some(1),
        "february" | "feb" => Some(2),
        "march" | "mar" => Some(3),
        "april" | "apr" => Some(4),
        "may" => Some(5),
        "june" | "jun" => Some(6),
        "july" | "jul" => Some(7),
        "august" | "aug" => Some(8),
        "september" | "sep" => Some(9),
        "october" | "oct" => Some(10),
        "november" | "nov" => Some(11),
        "december" | "dec" => Some(12),
        _ => None,
    }
}

fn captured_year(caps: &regex::Captures<'_>, group: usize) -> Option<i32> {
    caps.get(group).and_then(|m| m.as_str().parse().ok())
}

/// Next occurrence strictly after `from`; same weekday lands a full week out
fn next_weekday(from: NaiveDate, target: Weekday) -> Option<NaiveDate> {
    let mut ahead = i64::from(target.num_days_from_monday())
        - i64::from(from.weekday().num_days_from_monday());
    ahead = ahead.rem_euclid(7);
    if ahead == 0 {
        ahead = 7;
    }
    from.checked_add_signed(Duration::days(ahead))
}

/// Occurrence within the current week; same weekday is `from` itself
fn weekday_in_week(from: NaiveDate, target: Weekday) -> Option<NaiveDate> {
    let ahead = (i64::from(target.num_days_from_monday())
        - i64::from(from.weekday().num_days_from_monday()))
    .rem_euclid(7);
    from.checked_add_signed(Duration::days(ahead))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    // 2025-06-13 is a Friday
    fn reference() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 13, 12, 0, 0).unwrap()
    }

    fn resolve(fragment: &str) -> Option<DateTime<Utc>> {
        NaturalDateResolver::new().resolve(fragment, reference())
    }

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    #[test]
    fn test_today_and_tomorrow() {
        assert_eq!(resolve("do it today"), Some(utc(2025, 6, 13, 12, 0)));
        assert_eq!(resolve("call client tomorrow"), Some(utc(2025, 6, 14, 12, 0)));
    }

    #[test]
    fn test_bare_weekday_is_strictly_next() {
        // Reference is a Friday, so "Friday" is a week out
        assert_eq!(resolve("by Friday"), Some(utc(2025, 6, 20, 12, 0)));
        assert_eq!(resolve("on monday"), Some(utc(2025, 6, 16, 12, 0)));
    }

    #[test]
    fn test_next_weekday() {
        assert_eq!(resolve("by next Monday"), Some(utc(2025, 6, 16, 12, 0)));
        assert_eq!(resolve("next friday"), Some(utc(2025, 6, 20, 12, 0)));
    }

    #[test]
    fn test_this_weekday_can_be_reference_day() {
        assert_eq!(resolve("this friday"), Some(utc(2025, 6, 13, 12, 0)));
        assert_eq!(resolve("this sunday"), Some(utc(2025, 6, 15, 12, 0)));
    }

    #[test]
    fn test_relative_spans() {
        assert_eq!(resolve("next week"), Some(utc(2025, 6, 20, 12, 0)));
        assert_eq!(resolve("next month"), Some(utc(2025, 7, 13, 12, 0)));
        assert_eq!(resolve("this week"), Some(utc(2025, 6, 13, 12, 0)));
    }

    #[test]
    fn test_offsets() {
        assert_eq!(resolve("in 3 days"), Some(utc(2025, 6, 16, 12, 0)));
        assert_eq!(resolve("after 1 day"), Some(utc(2025, 6, 14, 12, 0)));
        assert_eq!(resolve("in 2 weeks"), Some(utc(2025, 6, 27, 12, 0)));
        assert_eq!(resolve("in 1 month"), Some(utc(2025, 7, 13, 12, 0)));
    }

    #[test]
    fn test_month_name_dates() {
        assert_eq!(resolve("june 20"), Some(utc(2025, 6, 20, 12, 0)));
        assert_eq!(resolve("20 June"), Some(utc(2025, 6, 20, 12, 0)));
        assert_eq!(resolve("Jun 3rd"), Some(utc(2025, 6, 3, 12, 0)));
        assert_eq!(resolve("December 1 2026"), Some(utc(2026, 12, 1, 12, 0)));
    }

    #[test]
    fn test_numeric_dates() {
        assert_eq!(resolve("on 6/20"), Some(utc(2025, 6, 20, 12, 0)));
        assert_eq!(resolve("7/4 picnic"), Some(utc(2025, 7, 4, 12, 0)));
        // 13/1 is not a month
        assert_eq!(resolve("13/1"), None);
    }

    #[test]
    fn test_clock_time_merges_with_date() {
        assert_eq!(
            resolve("call client tomorrow at 3pm"),
            Some(utc(2025, 6, 14, 15, 0))
        );
        assert_eq!(resolve("monday at 9:30 am"), Some(utc(2025, 6, 16, 9, 30)));
    }

    #[test]
    fn test_clock_time_without_date_uses_reference_day() {
        assert_eq!(resolve("standup at 9:30"), Some(utc(2025, 6, 13, 9, 30)));
        assert_eq!(resolve("by 15:45"), Some(utc(2025, 6, 13, 15, 45)));
        assert_eq!(resolve("ship 5pm"), Some(utc(2025, 6, 13, 17, 0)));
    }

    #[test]
    fn test_twelve_oclock_edges() {
        assert_eq!(resolve("at 12am"), Some(utc(2025, 6, 13, 0, 0)));
        assert_eq!(resolve("at 12pm"), Some(utc(2025, 6, 13, 12, 0)));
    }

    #[test]
    fn test_numeric_date_not_read_as_time() {
        // "by 6/20" must resolve as a date, not hour six
        assert_eq!(resolve("invoices by 6/20"), Some(utc(2025, 6, 20, 12, 0)));
    }

    #[test]
    fn test_explicit_date_beats_weekday_mention() {
        assert_eq!(resolve("Friday June 20"), Some(utc(2025, 6, 20, 12, 0)));
    }

    #[test]
    fn test_invalid_dates_are_none() {
        assert_eq!(resolve("on 2/30"), None);
        assert_eq!(resolve("at 99pm"), None);
    }

    #[test]
    fn test_unrecognized_is_none() {
        assert_eq!(resolve("Review budget"), None);
        assert_eq!(resolve("submit by osmosis"), None);
        assert_eq!(resolve(""), None);
    }

    #[test]
    fn test_determinism() {
        let resolver = NaturalDateResolver::new();
        let a = resolver.resolve("next friday at 3pm", reference());
        let b = resolver.resolve("next friday at 3pm", reference());
        assert_eq!(a, b);
    }
}
