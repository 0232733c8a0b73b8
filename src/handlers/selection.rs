//! Handlers acting on one selected record: complete, reschedule, edit, delete
//!
//! A record is selected by (kind, date, process number), as listed by the
//! agenda and search tools.

use crate::CpjServerHandler;
use crate::handlers::{non_empty, parse_date, parse_kind, to_mcp_error};
use crate::records::{DeadlinePatch, ExaminationPatch, Outcome, Priority, RecordKind, RecordPatch};
use chrono::NaiveDate;
use mcp_attr::{Result as McpResult, bail_public};

fn not_found(kind: RecordKind, date: NaiveDate, process: &str) -> mcp_attr::Error {
    mcp_attr::Error::new(mcp_attr::ErrorCode::INVALID_PARAMS).with_message(
        format!(
            "No {} with process {} on {}. Use agenda() to see what is scheduled on that date.",
            kind, process, date
        ),
        true,
    )
}

impl CpjServerHandler {
    /// Marks a deadline completed or an examination performed.
    pub async fn handle_complete(
        &self,
        kind: String,
        date: String,
        process: String,
    ) -> McpResult<String> {
        let kind = parse_kind(&kind)?;
        let date = parse_date(&date)?;
        let process = process.trim();

        match self
            .lock_agenda()
            .mark_complete(kind, date, process)
            .map_err(to_mcp_error)?
        {
            Outcome::Applied => Ok(match kind {
                RecordKind::Deadline => format!("Deadline {} marked as completed", process),
                RecordKind::Examination => format!("Examination {} marked as performed", process),
            }),
            Outcome::NotFound => Err(not_found(kind, date, process)),
        }
    }

    /// Moves a record to another date.
    pub async fn handle_reschedule(
        &self,
        kind: String,
        date: String,
        process: String,
        new_date: String,
    ) -> McpResult<String> {
        let kind = parse_kind(&kind)?;
        let date = parse_date(&date)?;
        let new_date = parse_date(&new_date)?;
        let process = process.trim();

        match self
            .lock_agenda()
            .reschedule(kind, date, process, new_date)
            .map_err(to_mcp_error)?
        {
            Outcome::Applied => Ok(format!(
                "{} {} rescheduled from {} to {}",
                capitalize(kind),
                process,
                date,
                new_date
            )),
            Outcome::NotFound => Err(not_found(kind, date, process)),
        }
    }

    /// Updates fields of a record. Fields that do not belong to the kind are rejected.
    #[allow(clippy::too_many_arguments)]
    pub async fn handle_edit(
        &self,
        kind: String,
        date: String,
        process: String,
        new_process: Option<String>,
        expert_name: Option<String>,
        description: Option<String>,
        priority: Option<String>,
        specialty: Option<String>,
        location: Option<String>,
        notes: Option<String>,
    ) -> McpResult<String> {
        let kind = parse_kind(&kind)?;
        let date = parse_date(&date)?;
        let process = process.trim();
        let new_process = non_empty(new_process).map(|p| p.trim().to_string());
        let expert_name = non_empty(expert_name).map(|n| n.trim().to_string());

        let patch = match kind {
            RecordKind::Deadline => {
                if let Some(field) = first_given(&[
                    ("specialty", &specialty),
                    ("location", &location),
                    ("notes", &notes),
                ]) {
                    bail_public!(_, "Field '{}' does not apply to deadlines", field);
                }
                let priority = match non_empty(priority) {
                    Some(p) => Some(p.parse::<Priority>().map_err(to_mcp_error)?),
                    None => None,
                };
                RecordPatch::Deadline(DeadlinePatch {
                    process: new_process,
                    expert_name,
                    description: non_empty(description),
                    priority,
                })
            }
            RecordKind::Examination => {
                if let Some(field) =
                    first_given(&[("description", &description), ("priority", &priority)])
                {
                    bail_public!(_, "Field '{}' does not apply to examinations", field);
                }
                RecordPatch::Examination(ExaminationPatch {
                    process: new_process,
                    expert_name,
                    specialty: non_empty(specialty),
                    location: non_empty(location),
                    // "" clears the notes
                    notes: notes.map(|n| {
                        let n = n.trim().to_string();
                        if n.is_empty() { None } else { Some(n) }
                    }),
                })
            }
        };

        match self
            .lock_agenda()
            .edit(date, process, patch)
            .map_err(to_mcp_error)?
        {
            Outcome::Applied => Ok(format!(
                "{} {} updated successfully",
                capitalize(kind),
                process
            )),
            Outcome::NotFound => Err(not_found(kind, date, process)),
        }
    }

    /// Deletes a record; the date disappears from the file once it is empty.
    pub async fn handle_delete(
        &self,
        kind: String,
        date: String,
        process: String,
    ) -> McpResult<String> {
        let kind = parse_kind(&kind)?;
        let date = parse_date(&date)?;
        let process = process.trim();

        match self
            .lock_agenda()
            .delete(kind, date, process)
            .map_err(to_mcp_error)?
        {
            Outcome::Applied => Ok(format!(
                "{} {} deleted from {}",
                capitalize(kind),
                process,
                date
            )),
            Outcome::NotFound => Err(not_found(kind, date, process)),
        }
    }
}

fn capitalize(kind: RecordKind) -> &'static str {
    match kind {
        RecordKind::Deadline => "Deadline",
        RecordKind::Examination => "Examination",
    }
}

fn first_given(fields: &[(&'static str, &Option<String>)]) -> Option<&'static str> {
    fields
        .iter()
        .find(|(_, value)| value.as_deref().is_some_and(|v| !v.trim().is_empty()))
        .map(|(name, _)| *name)
}
