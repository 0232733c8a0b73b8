//! CPJ Prazos Library
//!
//! Record-management core for an expert-services office: case deadlines
//! (prazos) and scheduled expert examinations (perícias) keyed by calendar
//! date, plus the registry of experts (peritos) they are assigned to. Data is
//! kept in three JSON files and every change is written through immediately.
//!
//! # Architecture
//!
//! The library follows a 3-layer architecture:
//! - **MCP Layer**: `CpjServerHandler` - Exposes the agenda as MCP tools
//! - **Domain Layer**: `agenda` and `records` - Validation, queries and mutations
//! - **Persistence Layer**: `storage` module - One JSON file per collection
//!
//! # Example
//!
//! ```no_run
//! use cpj_prazos::{Agenda, AgendaConfig, Priority};
//! use chrono::NaiveDate;
//!
//! # fn main() -> anyhow::Result<()> {
//! let mut agenda = Agenda::open("data", AgendaConfig::default());
//! agenda.register_expert("Ana Souza", "123.456.789-01", "(11) 99999-0000", "Engenheira")?;
//! agenda.schedule_deadline(
//!     NaiveDate::from_ymd_opt(2025, 3, 15).unwrap(),
//!     "1234567-12.2024.8.26.0100",
//!     "Ana Souza",
//!     "Entregar laudo",
//!     Priority::High,
//! )?;
//! # Ok(())
//! # }
//! ```

pub mod agenda;
pub mod config;
pub mod error;
mod formatting;
mod handlers;
pub mod records;
pub mod storage;
pub mod validation;

use anyhow::{Result, bail};
use mcp_attr::Result as McpResult;
use mcp_attr::server::{McpServer, mcp_server};
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, warn};

// Re-export commonly used types
pub use agenda::Agenda;
pub use config::AgendaConfig;
pub use error::{AgendaError, StorageError, ValidationError};
pub use records::{
    Deadline, DeadlinePatch, Entry, Examination, ExaminationPatch, Expert, Outcome, Priority,
    RecordKind, RecordPatch,
};
pub use storage::{Collection, Storage};

/// MCP Server handler for the deadline and examination agenda
///
/// Holds the single `Agenda` for the process. Each tool call locks it for
/// the duration of one synchronous core operation.
pub struct CpjServerHandler {
    pub(crate) agenda: Mutex<Agenda>,
}

impl CpjServerHandler {
    /// Create a new handler over the JSON files in `data_dir`
    ///
    /// # Arguments
    /// * `data_dir` - Directory holding the experts, deadlines and examinations files
    /// * `config` - File names and query windows
    ///
    /// # Example
    /// ```no_run
    /// # use cpj_prazos::{AgendaConfig, CpjServerHandler};
    /// # fn main() -> anyhow::Result<()> {
    /// let handler = CpjServerHandler::new("data", AgendaConfig::default())?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(data_dir: impl AsRef<Path>, config: AgendaConfig) -> Result<Self> {
        let data_dir = data_dir.as_ref();
        if data_dir.exists() && !data_dir.is_dir() {
            bail!("Data path {} is not a directory", data_dir.display());
        }
        Ok(Self::with_agenda(Agenda::open(data_dir, config)))
    }

    pub fn with_agenda(agenda: Agenda) -> Self {
        Self {
            agenda: Mutex::new(agenda),
        }
    }

    /// Lock the agenda
    ///
    /// A panic in another tool call cannot leave the agenda half-updated,
    /// since mutations are staged on a copy, so a poisoned lock is reused.
    pub(crate) fn lock_agenda(&self) -> MutexGuard<'_, Agenda> {
        self.agenda.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for CpjServerHandler {
    fn drop(&mut self) {
        let agenda = self.lock_agenda();
        if !agenda.storage().data_dir().is_dir() {
            debug!("data directory gone, skipping shutdown flush");
            return;
        }
        if let Err(e) = agenda.flush() {
            warn!(error = %e, "shutdown flush failed");
        }
    }
}

/// Deadline and examination agenda for an expert-services office.
///
/// Keeps three registers: experts (peritos), case deadlines (prazos) and
/// scheduled expert examinations (perícias). Deadlines and examinations are
/// filed under a calendar date (YYYY-MM-DD) and identified on that date by
/// their judicial process number (format 0000000-00.0000.0.00.0000).
///
/// Typical flow:
/// - **register_expert** once per expert
/// - **schedule_deadline** / **schedule_examination** to book work
/// - **dashboard**, **agenda**, **upcoming**, **list_range**, **search** to review
/// - **complete**, **reschedule**, **edit**, **delete** on a record picked by (kind, date, process)
///
/// Kinds: "deadline" (prazo) or "examination" (perícia).
#[mcp_server]
impl McpServer for CpjServerHandler {
    /// **Register expert**: Add an expert (perito). Re-registering a name replaces it.
    /// **Rules**: all fields required; CPF must have 11 digits and be unique.
    #[tool]
    async fn register_expert(
        &self,
        /// Full name (key of the expert)
        name: String,
        /// CPF, any punctuation (e.g., "123.456.789-01" or "12345678901")
        national_id: String,
        /// Phone number
        phone: String,
        /// Profession (e.g., "Engenheiro civil")
        profession: String,
    ) -> McpResult<String> {
        self.handle_register_expert(name, national_id, phone, profession)
            .await
    }

    /// **List experts**: Registered experts, sorted by name. Use these names when scheduling.
    #[tool]
    async fn list_experts(&self) -> McpResult<String> {
        self.handle_list_experts().await
    }

    /// **Add deadline**: Book a case deadline (prazo) for an expert on a date.
    /// **Rules**: process number must be well formed and not already booked on that date.
    #[tool]
    async fn schedule_deadline(
        &self,
        /// Due date YYYY-MM-DD
        date: String,
        /// Process number 0000000-00.0000.0.00.0000
        process: String,
        /// Registered expert name
        expert_name: String,
        /// What is due
        description: String,
        /// Priority: low/normal/high (default normal)
        priority: Option<String>,
    ) -> McpResult<String> {
        self.handle_schedule_deadline(date, process, expert_name, description, priority)
            .await
    }

    /// **Schedule examination**: Book an expert examination (perícia) on a date.
    /// **Rules**: process number must be well formed and not already booked on that date.
    #[tool]
    async fn schedule_examination(
        &self,
        /// Examination date YYYY-MM-DD
        date: String,
        /// Process number 0000000-00.0000.0.00.0000
        process: String,
        /// Registered expert name
        expert_name: String,
        /// Specialty (e.g., "Grafotécnica")
        specialty: String,
        /// Where the examination takes place
        location: String,
        /// Notes (optional)
        notes: Option<String>,
    ) -> McpResult<String> {
        self.handle_schedule_examination(date, process, expert_name, specialty, location, notes)
            .await
    }

    /// **Day view**: Deadlines and examinations booked on one date.
    #[tool]
    async fn agenda(
        &self,
        /// Date YYYY-MM-DD (default today)
        date: Option<String>,
    ) -> McpResult<String> {
        self.handle_agenda(date).await
    }

    /// **Range**: Records between two dates, inclusive, ordered by date.
    #[tool]
    async fn list_range(
        &self,
        /// First date YYYY-MM-DD
        start_date: String,
        /// Last date YYYY-MM-DD
        end_date: String,
        /// Kind: deadline/examination. Empty=both.
        kind: Option<String>,
    ) -> McpResult<String> {
        self.handle_list_range(start_date, end_date, kind).await
    }

    /// **Upcoming**: Deadlines and examinations from today through the next week or month.
    #[tool]
    async fn upcoming(
        &self,
        /// Window: week/month (default week)
        window: Option<String>,
    ) -> McpResult<String> {
        self.handle_upcoming(window).await
    }

    /// **Dashboard**: Examinations scheduled from today through the next 30 days.
    #[tool]
    async fn dashboard(&self) -> McpResult<String> {
        self.handle_dashboard().await
    }

    /// **Search**: Find deadlines and examinations whose process number contains the term.
    /// Case-insensitive, newest first.
    #[tool]
    async fn search(
        &self,
        /// Part of a process number
        term: String,
    ) -> McpResult<String> {
        self.handle_search(term).await
    }

    /// **Complete**: Mark a deadline completed or an examination performed.
    #[tool]
    async fn complete(
        &self,
        /// Kind: deadline/examination
        kind: String,
        /// Date the record is filed under, YYYY-MM-DD
        date: String,
        /// Process number of the record
        process: String,
    ) -> McpResult<String> {
        self.handle_complete(kind, date, process).await
    }

    /// **Reschedule**: Move a record to another date. It goes to the end of that date's list.
    #[tool]
    async fn reschedule(
        &self,
        /// Kind: deadline/examination
        kind: String,
        /// Current date YYYY-MM-DD
        date: String,
        /// Process number of the record
        process: String,
        /// New date YYYY-MM-DD
        new_date: String,
    ) -> McpResult<String> {
        self.handle_reschedule(kind, date, process, new_date).await
    }

    /// **Edit**: Update fields of a record. Omitted fields are kept.
    /// **Deadline fields**: new_process, expert_name, description, priority.
    /// **Examination fields**: new_process, expert_name, specialty, location, notes (""=clear).
    #[allow(clippy::too_many_arguments)]
    #[tool]
    async fn edit(
        &self,
        /// Kind: deadline/examination
        kind: String,
        /// Date the record is filed under, YYYY-MM-DD
        date: String,
        /// Current process number of the record
        process: String,
        /// Replacement process number (optional)
        new_process: Option<String>,
        /// Replacement expert name (optional)
        expert_name: Option<String>,
        /// Deadline description (optional)
        description: Option<String>,
        /// Deadline priority low/normal/high (optional)
        priority: Option<String>,
        /// Examination specialty (optional)
        specialty: Option<String>,
        /// Examination location (optional)
        location: Option<String>,
        /// Examination notes, ""=clear (optional)
        notes: Option<String>,
    ) -> McpResult<String> {
        self.handle_edit(
            kind,
            date,
            process,
            new_process,
            expert_name,
            description,
            priority,
            specialty,
            location,
            notes,
        )
        .await
    }

    /// **Delete**: Remove a record permanently.
    #[tool]
    async fn delete(
        &self,
        /// Kind: deadline/examination
        kind: String,
        /// Date the record is filed under, YYYY-MM-DD
        date: String,
        /// Process number of the record
        process: String,
    ) -> McpResult<String> {
        self.handle_delete(kind, date, process).await
    }
}
