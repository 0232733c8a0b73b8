//! Read-only listing handlers: day view, ranges, windows, dashboard, search

use crate::CpjServerHandler;
use crate::formatting;
use crate::handlers::{non_empty, parse_date, parse_kind};
use crate::records::{RecordKind, local_date_today};
use mcp_attr::{Result as McpResult, bail_public};

impl CpjServerHandler {
    /// Shows the deadlines and examinations of one date (today when omitted).
    pub async fn handle_agenda(&self, date: Option<String>) -> McpResult<String> {
        let date = match non_empty(date) {
            Some(d) => parse_date(&d)?,
            None => local_date_today(),
        };
        let day = self.lock_agenda().items_on(date);
        Ok(formatting::format_day(&day))
    }

    /// Lists records between two dates inclusive, for one kind or both.
    pub async fn handle_list_range(
        &self,
        start_date: String,
        end_date: String,
        kind: Option<String>,
    ) -> McpResult<String> {
        let start = parse_date(&start_date)?;
        let end = parse_date(&end_date)?;
        if start > end {
            bail_public!(
                _,
                "Start date {} is after end date {}",
                start_date.trim(),
                end_date.trim()
            );
        }

        let kinds = match non_empty(kind) {
            Some(k) => vec![parse_kind(&k)?],
            None => vec![RecordKind::Deadline, RecordKind::Examination],
        };

        let agenda = self.lock_agenda();
        let sections: Vec<String> = kinds
            .into_iter()
            .map(|kind| {
                let heading = match kind {
                    RecordKind::Deadline => "DEADLINES",
                    RecordKind::Examination => "EXAMINATIONS",
                };
                formatting::format_range(heading, &agenda.items_in_range(kind, start, end))
            })
            .collect();
        drop(agenda);

        Ok(sections.join("\n"))
    }

    /// Lists both kinds from today through the next week or month.
    pub async fn handle_upcoming(&self, window: Option<String>) -> McpResult<String> {
        let window = non_empty(window).unwrap_or_else(|| "week".to_string());
        let agenda = self.lock_agenda();
        let days = match window.trim().to_lowercase().as_str() {
            "week" => agenda.config().week_days,
            "month" => agenda.config().month_days,
            other => {
                drop(agenda);
                bail_public!(_, "Invalid window '{}'. Valid windows: week, month", other);
            }
        };
        let label = window.trim().to_lowercase();
        let upcoming = agenda.upcoming(local_date_today(), days);
        drop(agenda);

        Ok(formatting::format_upcoming(&label, &upcoming))
    }

    /// Shows the examinations dashboard starting today.
    pub async fn handle_dashboard(&self) -> McpResult<String> {
        let agenda = self.lock_agenda();
        let days = agenda.config().dashboard_days;
        let examinations = agenda.upcoming_dashboard(local_date_today());
        drop(agenda);

        Ok(formatting::format_dashboard(days, &examinations))
    }

    /// Searches deadlines and examinations by a fragment of the process number.
    pub async fn handle_search(&self, term: String) -> McpResult<String> {
        let results = self.lock_agenda().find_by_process_substring(term.trim());
        Ok(formatting::format_search(&results))
    }
}
