use crate::error::ValidationError;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Get the current date in local timezone
pub fn local_date_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Deadline priority
///
/// Serialized with the labels the office files already use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    #[serde(rename = "Baixa")]
    Low,
    #[default]
    #[serde(rename = "Normal")]
    Normal,
    #[serde(rename = "Alta")]
    High,
}

impl FromStr for Priority {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" | "baixa" => Ok(Priority::Low),
            "normal" => Ok(Priority::Normal),
            "high" | "alta" => Ok(Priority::High),
            _ => Err(ValidationError::InvalidPriority(s.to_string())),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Priority::Low => "low",
            Priority::Normal => "normal",
            Priority::High => "high",
        };
        f.write_str(label)
    }
}

/// The two date-indexed record kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Deadline,
    Examination,
}

impl FromStr for RecordKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "deadline" | "prazo" => Ok(RecordKind::Deadline),
            "examination" | "pericia" | "perícia" => Ok(RecordKind::Examination),
            _ => Err(ValidationError::InvalidKind(s.to_string())),
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Deadline => f.write_str("deadline"),
            RecordKind::Examination => f.write_str("examination"),
        }
    }
}

/// A registered expert (perito), keyed by full name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expert {
    #[serde(rename = "nome")]
    pub name: String,
    /// CPF in `###.###.###-##` form
    #[serde(rename = "cpf")]
    pub national_id: String,
    #[serde(rename = "telefone")]
    pub phone: String,
    #[serde(rename = "profissao")]
    pub profession: String,
    #[serde(rename = "data_cadastro")]
    pub registered_on: NaiveDate,
}

/// A case deadline (prazo) stored in a date bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deadline {
    #[serde(rename = "processo")]
    pub process: String,
    #[serde(rename = "perito_nome")]
    pub expert_name: String,
    #[serde(rename = "descricao", default)]
    pub description: String,
    #[serde(rename = "prioridade", default)]
    pub priority: Priority,
    #[serde(rename = "concluido", default)]
    pub completed: bool,
    #[serde(rename = "data_cadastro")]
    pub registered_on: NaiveDate,
}

/// A scheduled expert examination (perícia) stored in a date bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Examination {
    #[serde(rename = "processo")]
    pub process: String,
    #[serde(rename = "perito_nome")]
    pub expert_name: String,
    #[serde(rename = "especialidade")]
    pub specialty: String,
    #[serde(rename = "local", default)]
    pub location: String,
    #[serde(rename = "observacoes", default)]
    pub notes: Option<String>,
    #[serde(rename = "realizada", default)]
    pub performed: bool,
    #[serde(rename = "data_cadastro")]
    pub registered_on: NaiveDate,
}

/// Common behaviour of records that live in date buckets
pub trait Scheduled: Clone {
    const KIND: RecordKind;

    fn process(&self) -> &str;

    /// Completed (deadline) or performed (examination)
    fn is_done(&self) -> bool;

    fn mark_done(&mut self);
}

impl Scheduled for Deadline {
    const KIND: RecordKind = RecordKind::Deadline;

    fn process(&self) -> &str {
        &self.process
    }

    fn is_done(&self) -> bool {
        self.completed
    }

    fn mark_done(&mut self) {
        self.completed = true;
    }
}

impl Scheduled for Examination {
    const KIND: RecordKind = RecordKind::Examination;

    fn process(&self) -> &str {
        &self.process
    }

    fn is_done(&self) -> bool {
        self.performed
    }

    fn mark_done(&mut self) {
        self.performed = true;
    }
}

/// A deadline or an examination, for queries spanning a kind chosen at runtime
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    Deadline(Deadline),
    Examination(Examination),
}

impl Entry {
    pub fn kind(&self) -> RecordKind {
        match self {
            Entry::Deadline(_) => RecordKind::Deadline,
            Entry::Examination(_) => RecordKind::Examination,
        }
    }

    pub fn process(&self) -> &str {
        match self {
            Entry::Deadline(d) => d.process(),
            Entry::Examination(e) => e.process(),
        }
    }

    pub fn is_done(&self) -> bool {
        match self {
            Entry::Deadline(d) => d.is_done(),
            Entry::Examination(e) => e.is_done(),
        }
    }
}

/// Field updates for a deadline; `None` leaves a field untouched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeadlinePatch {
    pub process: Option<String>,
    pub expert_name: Option<String>,
    pub description: Option<String>,
    pub priority: Option<Priority>,
}

impl DeadlinePatch {
    pub fn apply(self, deadline: &mut Deadline) {
        if let Some(process) = self.process {
            deadline.process = process;
        }
        if let Some(expert_name) = self.expert_name {
            deadline.expert_name = expert_name;
        }
        if let Some(description) = self.description {
            deadline.description = description;
        }
        if let Some(priority) = self.priority {
            deadline.priority = priority;
        }
    }
}

/// Field updates for an examination
///
/// `notes: Some(None)` clears the notes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExaminationPatch {
    pub process: Option<String>,
    pub expert_name: Option<String>,
    pub specialty: Option<String>,
    pub location: Option<String>,
    pub notes: Option<Option<String>>,
}

impl ExaminationPatch {
    pub fn apply(self, examination: &mut Examination) {
        if let Some(process) = self.process {
            examination.process = process;
        }
        if let Some(expert_name) = self.expert_name {
            examination.expert_name = expert_name;
        }
        if let Some(specialty) = self.specialty {
            examination.specialty = specialty;
        }
        if let Some(location) = self.location {
            examination.location = location;
        }
        if let Some(notes) = self.notes {
            examination.notes = notes;
        }
    }
}

/// Field updates for one record; the variant selects the collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordPatch {
    Deadline(DeadlinePatch),
    Examination(ExaminationPatch),
}

impl RecordPatch {
    pub fn kind(&self) -> RecordKind {
        match self {
            RecordPatch::Deadline(_) => RecordKind::Deadline,
            RecordPatch::Examination(_) => RecordKind::Examination,
        }
    }

    /// New process number carried by the patch, if any
    pub fn process(&self) -> Option<&str> {
        match self {
            RecordPatch::Deadline(p) => p.process.as_deref(),
            RecordPatch::Examination(p) => p.process.as_deref(),
        }
    }
}

/// Result of an operation that targets one existing record
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    NotFound,
}

impl Outcome {
    pub fn is_applied(self) -> bool {
        self == Outcome::Applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_parsing_accepts_both_languages() {
        assert_eq!("high".parse::<Priority>().unwrap(), Priority::High);
        assert_eq!("Alta".parse::<Priority>().unwrap(), Priority::High);
        assert_eq!(" baixa ".parse::<Priority>().unwrap(), Priority::Low);
        assert_eq!("NORMAL".parse::<Priority>().unwrap(), Priority::Normal);
        assert!("urgent".parse::<Priority>().is_err());
    }

    #[test]
    fn test_priority_serializes_office_labels() {
        assert_eq!(serde_json::to_string(&Priority::Low).unwrap(), "\"Baixa\"");
        assert_eq!(serde_json::to_string(&Priority::High).unwrap(), "\"Alta\"");
        let parsed: Priority = serde_json::from_str("\"Normal\"").unwrap();
        assert_eq!(parsed, Priority::Normal);
    }

    #[test]
    fn test_record_kind_parsing() {
        assert_eq!(
            "deadline".parse::<RecordKind>().unwrap(),
            RecordKind::Deadline
        );
        assert_eq!(
            "Perícia".parse::<RecordKind>().unwrap(),
            RecordKind::Examination
        );
        assert_eq!(
            "task".parse::<RecordKind>(),
            Err(ValidationError::InvalidKind("task".to_string()))
        );
    }

    #[test]
    fn test_examination_defaults_missing_flags() {
        let json = r#"{
            "processo": "1234567-12.2024.8.26.0100",
            "perito_nome": "Ana Souza",
            "especialidade": "Medicina",
            "data_cadastro": "2024-05-01"
        }"#;
        let exam: Examination = serde_json::from_str(json).unwrap();
        assert!(!exam.performed);
        assert_eq!(exam.notes, None);
        assert_eq!(exam.location, "");
    }

    #[test]
    fn test_patch_applies_only_given_fields() {
        let mut exam = Examination {
            process: "1234567-12.2024.8.26.0100".to_string(),
            expert_name: "Ana Souza".to_string(),
            specialty: "Medicina".to_string(),
            location: "Fórum".to_string(),
            notes: Some("levar laudo".to_string()),
            performed: false,
            registered_on: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        };
        ExaminationPatch {
            location: Some("Clínica".to_string()),
            notes: Some(None),
            ..Default::default()
        }
        .apply(&mut exam);
        assert_eq!(exam.location, "Clínica");
        assert_eq!(exam.notes, None);
        assert_eq!(exam.specialty, "Medicina");
    }
}
