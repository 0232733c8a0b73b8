//! Read-only queries over the date buckets
//!
//! Range and window queries parse each bucket key with the `YYYY-MM-DD`
//! format and silently skip keys that do not parse. Process-number search
//! walks every key, parsable or not.

use super::date_buckets::DateBuckets;
use super::model::{Deadline, Examination, Expert, Scheduled};
use super::Records;
use crate::validation::parse_bucket_key;
use chrono::{Days, NaiveDate};

/// Deadlines and examinations falling inside a date window
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Upcoming {
    pub deadlines: Vec<(NaiveDate, Deadline)>,
    pub examinations: Vec<(NaiveDate, Examination)>,
}

impl Upcoming {
    pub fn is_empty(&self) -> bool {
        self.deadlines.is_empty() && self.examinations.is_empty()
    }
}

/// Everything booked on a single date
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayAgenda {
    pub date: NaiveDate,
    pub deadlines: Vec<Deadline>,
    pub examinations: Vec<Examination>,
}

impl DayAgenda {
    pub fn is_empty(&self) -> bool {
        self.deadlines.is_empty() && self.examinations.is_empty()
    }
}

/// Process-number search hits, newest date key first, one group per kind
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResults {
    pub deadlines: Vec<(String, Deadline)>,
    pub examinations: Vec<(String, Examination)>,
}

impl SearchResults {
    pub fn is_empty(&self) -> bool {
        self.deadlines.is_empty() && self.examinations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.deadlines.len() + self.examinations.len()
    }
}

/// Last day of a window of `days` starting at `start`, saturating at the calendar limit
pub fn window_end(start: NaiveDate, days: u32) -> NaiveDate {
    start
        .checked_add_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MAX)
}

impl<T: Scheduled> DateBuckets<T> {
    /// Records whose bucket date lies in `[start, end]`
    ///
    /// Ordered by ascending date, then by position inside the bucket.
    pub fn in_range(&self, start: NaiveDate, end: NaiveDate) -> Vec<(NaiveDate, T)> {
        let mut dated: Vec<(NaiveDate, &Vec<T>)> = self
            .iter()
            .filter_map(|(key, records)| parse_bucket_key(key).map(|date| (date, records)))
            .filter(|(date, _)| start <= *date && *date <= end)
            .collect();
        // Stable, so distinct keys parsing to one date keep key order
        dated.sort_by_key(|(date, _)| *date);

        dated
            .into_iter()
            .flat_map(|(date, records)| records.iter().map(move |r| (date, r.clone())))
            .collect()
    }

    /// Case-insensitive substring search over process numbers, newest key first
    pub fn matching_process(&self, term: &str) -> Vec<(String, T)> {
        let term_lower = term.to_lowercase();
        self.iter()
            .rev()
            .flat_map(|(key, records)| records.iter().map(move |r| (key, r)))
            .filter(|(_, r)| r.process().to_lowercase().contains(&term_lower))
            .map(|(key, r)| (key.clone(), r.clone()))
            .collect()
    }
}

impl Records {
    /// Registered experts sorted by name
    pub fn experts(&self) -> Vec<Expert> {
        self.experts.values().cloned().collect()
    }

    /// Find an expert by exact name
    pub fn find_expert(&self, name: &str) -> Option<&Expert> {
        self.experts.get(name)
    }

    /// Name of the expert holding this normalized CPF, if any
    pub fn national_id_holder(&self, national_id: &str) -> Option<&str> {
        self.experts
            .values()
            .find(|e| e.national_id == national_id)
            .map(|e| e.name.as_str())
    }

    /// The deadlines and examinations booked on one date
    pub fn items_on(&self, date: NaiveDate) -> DayAgenda {
        let key = crate::validation::bucket_key(date);
        DayAgenda {
            date,
            deadlines: self.deadlines.bucket(&key).to_vec(),
            examinations: self.examinations.bucket(&key).to_vec(),
        }
    }

    /// Both kinds within `[today, today + days]`
    pub fn upcoming(&self, today: NaiveDate, days: u32) -> Upcoming {
        let end = window_end(today, days);
        Upcoming {
            deadlines: self.deadlines.in_range(today, end),
            examinations: self.examinations.in_range(today, end),
        }
    }

    /// Examinations within `[today, today + days]`, the dashboard view
    pub fn upcoming_dashboard(&self, today: NaiveDate, days: u32) -> Vec<(NaiveDate, Examination)> {
        self.examinations.in_range(today, window_end(today, days))
    }

    pub fn find_by_process_substring(&self, term: &str) -> SearchResults {
        SearchResults {
            deadlines: self.deadlines.matching_process(term),
            examinations: self.examinations.matching_process(term),
        }
    }
}
