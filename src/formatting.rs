//! Formatting helpers for tool output
//!
//! Rows carry a status mark (`✔` done, `🔴` pending) followed by the
//! process number, the expert and a short detail. Groups are introduced by
//! `=== HEADING ===` lines.

use crate::records::{DayAgenda, Deadline, Entry, Examination, Expert, SearchResults, Upcoming};
use chrono::NaiveDate;

pub fn status_mark(done: bool) -> &'static str {
    if done { "✔" } else { "🔴" }
}

fn deadline_row(deadline: &Deadline) -> String {
    format!(
        "{} {} - {} - {} (priority: {})",
        status_mark(deadline.completed),
        deadline.process,
        deadline.expert_name,
        deadline.description,
        deadline.priority
    )
}

fn examination_row(examination: &Examination) -> String {
    let mut row = format!(
        "{} {} - {} - {} @ {}",
        status_mark(examination.performed),
        examination.process,
        examination.expert_name,
        examination.specialty,
        examination.location
    );
    if let Some(ref notes) = examination.notes {
        row.push_str(&format!("\n  Notes: {}", notes));
    }
    row
}

fn entry_row(entry: &Entry) -> String {
    match entry {
        Entry::Deadline(d) => deadline_row(d),
        Entry::Examination(e) => examination_row(e),
    }
}

fn dated_row(date: &str, done: bool, process: &str) -> String {
    format!("{} - {} {}", date, status_mark(done), process)
}

pub fn format_experts(experts: &[Expert]) -> String {
    if experts.is_empty() {
        return "No experts registered".to_string();
    }

    let mut result = format!("Found {} expert(s):\n\n", experts.len());
    for expert in experts {
        result.push_str(&format!(
            "- {} ({}) CPF: {} Phone: {}\n  Registered: {}\n",
            expert.name,
            expert.profession,
            expert.national_id,
            expert.phone,
            expert.registered_on
        ));
    }
    result
}

/// The day view: deadlines first, then examinations
pub fn format_day(day: &DayAgenda) -> String {
    if day.is_empty() {
        return format!("Nothing scheduled for {}", day.date);
    }

    let mut result = format!("Agenda for {}:\n", day.date);
    if !day.deadlines.is_empty() {
        result.push_str("=== DEADLINES ===\n");
        for deadline in &day.deadlines {
            result.push_str(&deadline_row(deadline));
            result.push('\n');
        }
    }
    if !day.examinations.is_empty() {
        result.push_str("=== EXAMINATIONS ===\n");
        for examination in &day.examinations {
            result.push_str(&examination_row(examination));
            result.push('\n');
        }
    }
    result
}

pub fn format_range(heading: &str, entries: &[(NaiveDate, Entry)]) -> String {
    if entries.is_empty() {
        return format!("No {} found", heading.to_lowercase());
    }

    let mut result = format!("=== {} ===\n", heading);
    for (date, entry) in entries {
        result.push_str(&format!("{} {}\n", date, entry_row(entry)));
    }
    result
}

/// Week/month windows: compact dated rows for each kind
pub fn format_upcoming(label: &str, upcoming: &Upcoming) -> String {
    if upcoming.is_empty() {
        return format!("No records for this {}.", label);
    }

    let label = label.to_uppercase();
    let mut result = String::new();
    if !upcoming.deadlines.is_empty() {
        result.push_str(&format!("=== DEADLINES THIS {} ===\n", label));
        for (date, d) in &upcoming.deadlines {
            result.push_str(&dated_row(&date.to_string(), d.completed, &d.process));
            result.push('\n');
        }
    }
    if !upcoming.examinations.is_empty() {
        result.push_str(&format!("=== EXAMINATIONS THIS {} ===\n", label));
        for (date, e) in &upcoming.examinations {
            result.push_str(&dated_row(&date.to_string(), e.performed, &e.process));
            result.push('\n');
        }
    }
    result
}

pub fn format_dashboard(days: u32, examinations: &[(NaiveDate, Examination)]) -> String {
    if examinations.is_empty() {
        return format!("No examinations scheduled for the next {} days.", days);
    }

    let mut result = format!("Examinations scheduled (next {} days):\n", days);
    for (date, e) in examinations {
        result.push_str(&format!(
            "{} Date: {} | Expert: {} | Process: {} | Specialty: {}\n",
            status_mark(e.performed),
            date,
            e.expert_name,
            e.process,
            e.specialty
        ));
    }
    result
}

pub fn format_search(results: &SearchResults) -> String {
    if results.is_empty() {
        return "No results found.".to_string();
    }

    let mut result = String::new();
    if !results.deadlines.is_empty() {
        result.push_str("=== DEADLINES FOUND ===\n");
        for (key, d) in &results.deadlines {
            result.push_str(&dated_row(key, d.completed, &d.process));
            result.push('\n');
        }
    }
    if !results.examinations.is_empty() {
        result.push_str("=== EXAMINATIONS FOUND ===\n");
        for (key, e) in &results.examinations {
            result.push_str(&dated_row(key, e.performed, &e.process));
            result.push('\n');
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::Priority;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn deadline(completed: bool) -> Deadline {
        Deadline {
            process: "1234567-12.2024.8.26.0100".to_string(),
            expert_name: "Ana Souza".to_string(),
            description: "Entregar laudo".to_string(),
            priority: Priority::High,
            completed,
            registered_on: date(2024, 1, 1),
        }
    }

    #[test]
    fn test_day_view_groups_and_marks() {
        let day = DayAgenda {
            date: date(2024, 6, 10),
            deadlines: vec![deadline(false), deadline(true)],
            examinations: vec![],
        };
        let text = format_day(&day);
        assert!(text.contains("=== DEADLINES ==="));
        assert!(!text.contains("=== EXAMINATIONS ==="));
        assert!(text.contains(
            "🔴 1234567-12.2024.8.26.0100 - Ana Souza - Entregar laudo (priority: high)"
        ));
        assert!(text.contains("✔ 1234567-12.2024.8.26.0100"));
    }

    #[test]
    fn test_empty_outputs() {
        let day = DayAgenda {
            date: date(2024, 6, 10),
            deadlines: vec![],
            examinations: vec![],
        };
        assert_eq!(format_day(&day), "Nothing scheduled for 2024-06-10");
        assert_eq!(format_search(&SearchResults::default()), "No results found.");
        assert_eq!(
            format_dashboard(30, &[]),
            "No examinations scheduled for the next 30 days."
        );
        assert_eq!(format_upcoming("week", &Upcoming::default()), "No records for this week.");
    }

    #[test]
    fn test_search_rows_carry_date_key() {
        let results = SearchResults {
            deadlines: vec![("2024-06-10".to_string(), deadline(true))],
            examinations: vec![],
        };
        let text = format_search(&results);
        assert!(text.starts_with("=== DEADLINES FOUND ===\n"));
        assert!(text.contains("2024-06-10 - ✔ 1234567-12.2024.8.26.0100"));
    }
}
