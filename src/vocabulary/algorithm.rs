//! SM-2 Spaced Repetition Algorithm
//!
//! Implementation of the SuperMemo 2 algorithm used to schedule
//! vocabulary reviews.
//!
//! Quality ratings (0-5):
//! - 0: Complete blackout, no recall
//! - 1: Incorrect, but upon seeing answer, remembered
//! - 2: Incorrect, but answer seemed easy to recall
//! - 3: Correct response with serious difficulty
//! - 4: Correct response after hesitation
//! - 5: Perfect response with no hesitation
//!
//! Scheduling is date-granular: every next-review timestamp is local
//! midnight of the scheduled day.

use chrono::{DateTime, Days, Local, NaiveDate, NaiveTime, TimeZone, Utc};

use super::models::{ReviewRating, VocabularyEntry};

/// Minimum ease factor allowed
pub const MIN_EASE_FACTOR: f64 = 1.3;

/// Ease factor assigned to new entries
pub const DEFAULT_EASE_FACTOR: f64 = 2.5;

/// Highest quality rating
pub const MAX_QUALITY: u8 = 5;

/// Lowest quality counted as a successful recall
pub const PASSING_QUALITY: u8 = 3;

/// Result of calculating the next review
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReviewResult {
    pub reps: u32,
    pub interval: u32,
    pub ease_factor: f64,
    pub next_review: DateTime<Utc>,
}

/// UTC instant of local midnight on `date`
pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    let midnight = date.and_time(NaiveTime::MIN);
    match Local.from_local_datetime(&midnight).earliest() {
        Some(local) => local.with_timezone(&Utc),
        // Midnight skipped by a DST transition; fall back to the first hour
        None => Local
            .from_local_datetime(&(midnight + chrono::Duration::hours(1)))
            .earliest()
            .map(|local| local.with_timezone(&Utc))
            .unwrap_or_else(|| Utc.from_utc_datetime(&midnight)),
    }
}

/// Local midnight `days` after `today`
pub fn days_after(today: NaiveDate, days: u32) -> DateTime<Utc> {
    let date = today
        .checked_add_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MAX);
    start_of_day(date)
}

/// Ease factor after a review of the given quality, floored at 1.3
///
/// EF' = EF + (0.1 - (5-q) * (0.08 + (5-q) * 0.02))
pub fn next_ease_factor(ease_factor: f64, quality: u8) -> f64 {
    let lapse = f64::from(MAX_QUALITY - quality.min(MAX_QUALITY));
    let adjusted = ease_factor + (0.1 - lapse * (0.08 + lapse * 0.02));
    adjusted.max(MIN_EASE_FACTOR)
}

/// Calculate the next schedule for an entry reviewed on `today`
///
/// Interval growth uses the ease factor as it stood before this review;
/// the adjusted ease factor only applies from the next review on.
pub fn calculate_next_review(entry: &VocabularyEntry, quality: u8, today: NaiveDate) -> ReviewResult {
    let quality = quality.min(MAX_QUALITY);
    let ease_factor = next_ease_factor(entry.ease_factor, quality);

    let (reps, interval) = if quality >= PASSING_QUALITY {
        let interval = match entry.reps {
            0 => 1,
            1 => 6,
            _ => (f64::from(entry.interval) * entry.ease_factor).round() as u32,
        };
        (entry.reps.saturating_add(1), interval)
    } else {
        // Forgotten: start over and see it again tomorrow
        (0, 1)
    };

    ReviewResult {
        reps,
        interval,
        ease_factor,
        next_review: days_after(today, interval),
    }
}

/// Interval each answer button would give, in button order (Again, Hard, Good, Easy)
pub fn preview_intervals(entry: &VocabularyEntry, today: NaiveDate) -> [u32; 4] {
    ReviewRating::ALL.map(|rating| calculate_next_review(entry, rating.quality(), today).interval)
}

/// Format an interval in days to a human-readable string
pub fn format_interval(days: u32) -> String {
    if days == 0 {
        "now".to_string()
    } else if days < 7 {
        format!("{}d", days)
    } else if days < 30 {
        format!("{}w", days / 7)
    } else if days < 365 {
        format!("{}mo", days / 30)
    } else {
        format!("{}y", days / 365)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocabulary::models::DEFAULT_SUGGESTED_BY;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()
    }

    fn new_entry() -> VocabularyEntry {
        VocabularyEntry::new(
            "ubiquitous".to_string(),
            "present everywhere".to_string(),
            String::new(),
            DEFAULT_SUGGESTED_BY.to_string(),
            today(),
        )
    }

    fn apply(entry: &mut VocabularyEntry, result: ReviewResult) {
        entry.reps = result.reps;
        entry.interval = result.interval;
        entry.ease_factor = result.ease_factor;
        entry.next_review = result.next_review;
    }

    #[test]
    fn test_first_review_correct() {
        let result = calculate_next_review(&new_entry(), 4, today());

        assert_eq!(result.reps, 1);
        assert_eq!(result.interval, 1);
        assert_eq!(result.next_review, days_after(today(), 1));
    }

    #[test]
    fn test_second_review_correct() {
        let mut entry = new_entry();
        entry.reps = 1;
        entry.interval = 1;

        let result = calculate_next_review(&entry, 4, today());

        assert_eq!(result.reps, 2);
        assert_eq!(result.interval, 6);
    }

    #[test]
    fn test_subsequent_review_correct() {
        let mut entry = new_entry();
        entry.reps = 5;
        entry.interval = 10;
        entry.ease_factor = 2.5;

        let result = calculate_next_review(&entry, 4, today());

        // 10 * 2.5 = 25
        assert_eq!(result.interval, 25);
        assert_eq!(result.reps, 6);
    }

    #[test]
    fn test_interval_uses_previous_ease_factor() {
        let mut entry = new_entry();
        entry.reps = 2;
        entry.interval = 6;
        entry.ease_factor = 2.5;

        // Quality 5 raises the ease factor to 2.6, but this interval uses 2.5
        let result = calculate_next_review(&entry, 5, today());

        assert_eq!(result.interval, 15);
        assert!((result.ease_factor - 2.6).abs() < 1e-9);
    }

    #[test]
    fn test_three_good_reviews() {
        let mut entry = new_entry();
        let mut intervals = Vec::new();
        let mut ease_after_second = 0.0;

        for review in 0..3 {
            let result = calculate_next_review(&entry, 4, today());
            apply(&mut entry, result);
            intervals.push(entry.interval);
            if review == 1 {
                ease_after_second = entry.ease_factor;
            }
        }

        assert_eq!(intervals[0], 1);
        assert_eq!(intervals[1], 6);
        assert_eq!(intervals[2], (6.0 * ease_after_second).round() as u32);
    }

    #[test]
    fn test_review_incorrect_resets() {
        let mut entry = new_entry();
        entry.reps = 5;
        entry.interval = 40;

        let result = calculate_next_review(&entry, 1, today());

        assert_eq!(result.reps, 0);
        assert_eq!(result.interval, 1);
        assert_eq!(result.next_review, days_after(today(), 1));
    }

    #[test]
    fn test_failure_still_lowers_ease_factor() {
        let entry = new_entry();

        // q=1: 2.5 + (0.1 - 4 * (0.08 + 4 * 0.02)) = 1.96
        let result = calculate_next_review(&entry, 1, today());
        assert!((result.ease_factor - 1.96).abs() < 1e-9);
    }

    #[test]
    fn test_ease_factor_minimum() {
        let mut entry = new_entry();
        entry.ease_factor = 1.4;

        for quality in [0, 1, 2, 0, 3, 0, 0] {
            let result = calculate_next_review(&entry, quality, today());
            assert!(result.ease_factor >= MIN_EASE_FACTOR);
            apply(&mut entry, result);
        }
        assert_eq!(entry.ease_factor, MIN_EASE_FACTOR);
    }

    #[test]
    fn test_ease_factor_by_quality() {
        assert!((next_ease_factor(2.5, 5) - 2.6).abs() < 1e-9);
        assert!((next_ease_factor(2.5, 4) - 2.5).abs() < 1e-9);
        assert!((next_ease_factor(2.5, 3) - 2.36).abs() < 1e-9);
        assert!((next_ease_factor(2.5, 2) - 2.18).abs() < 1e-9);
        assert!((next_ease_factor(2.5, 0) - 1.7).abs() < 1e-9);
    }

    #[test]
    fn test_quality_above_range_is_clamped() {
        let entry = new_entry();
        assert_eq!(
            calculate_next_review(&entry, 9, today()),
            calculate_next_review(&entry, 5, today())
        );
    }

    #[test]
    fn test_next_review_is_midnight_aligned() {
        let mut entry = new_entry();
        entry.reps = 3;
        entry.interval = 15;

        let result = calculate_next_review(&entry, 4, today());
        let local = result.next_review.with_timezone(&Local);

        assert_eq!(local.time(), NaiveTime::MIN);
        assert_eq!(local.date_naive(), today() + chrono::Duration::days(38));
    }

    #[test]
    fn test_preview_intervals() {
        let mut entry = new_entry();
        entry.reps = 2;
        entry.interval = 6;

        assert_eq!(preview_intervals(&entry, today()), [1, 15, 15, 15]);
        assert_eq!(preview_intervals(&new_entry(), today()), [1, 1, 1, 1]);
    }

    #[test]
    fn test_format_interval() {
        assert_eq!(format_interval(0), "now");
        assert_eq!(format_interval(1), "1d");
        assert_eq!(format_interval(5), "5d");
        assert_eq!(format_interval(7), "1w");
        assert_eq!(format_interval(14), "2w");
        assert_eq!(format_interval(30), "1mo");
        assert_eq!(format_interval(90), "3mo");
        assert_eq!(format_interval(365), "1y");
        assert_eq!(format_interval(730), "2y");
    }
}
