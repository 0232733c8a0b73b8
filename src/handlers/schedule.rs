//! Scheduling handlers for deadlines and examinations

use crate::CpjServerHandler;
use crate::handlers::{non_empty, parse_date, to_mcp_error};
use crate::records::Priority;
use mcp_attr::Result as McpResult;

impl CpjServerHandler {
    /// Adds a deadline to a date. Priority defaults to normal.
    pub async fn handle_schedule_deadline(
        &self,
        date: String,
        process: String,
        expert_name: String,
        description: String,
        priority: Option<String>,
    ) -> McpResult<String> {
        let date = parse_date(&date)?;
        let priority = match non_empty(priority) {
            Some(p) => p.parse::<Priority>().map_err(to_mcp_error)?,
            None => Priority::Normal,
        };

        let deadline = self
            .lock_agenda()
            .schedule_deadline(date, process.trim(), &expert_name, &description, priority)
            .map_err(to_mcp_error)?;

        Ok(format!(
            "Deadline added: {} on {} (expert: {}, priority: {})",
            deadline.process, date, deadline.expert_name, deadline.priority
        ))
    }

    /// Books an examination on a date.
    pub async fn handle_schedule_examination(
        &self,
        date: String,
        process: String,
        expert_name: String,
        specialty: String,
        location: String,
        notes: Option<String>,
    ) -> McpResult<String> {
        let date = parse_date(&date)?;

        let examination = self
            .lock_agenda()
            .schedule_examination(
                date,
                process.trim(),
                &expert_name,
                &specialty,
                &location,
                notes.as_deref(),
            )
            .map_err(to_mcp_error)?;

        Ok(format!(
            "Examination scheduled: {} on {} at {} (expert: {})",
            examination.process, date, examination.location, examination.expert_name
        ))
    }
}
