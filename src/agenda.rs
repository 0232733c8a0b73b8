//! The agenda: in-memory collections with write-through persistence
//!
//! `Agenda` is the record-management core. It is constructed once at startup,
//! owns the three collections for the life of the process, and writes the
//! affected collection to disk before any mutating call returns. A mutation
//! is staged on a copy of the collection and only becomes visible in memory
//! once the save succeeded, so memory never runs ahead of disk.

use crate::config::AgendaConfig;
use crate::error::{Result, StorageError, ValidationError};
use crate::records::{
    DateBuckets, DayAgenda, Deadline, Entry, Examination, Expert, Outcome, Priority, RecordKind,
    RecordPatch, Records, Scheduled, SearchResults, Upcoming, local_date_today, window_end,
};
use crate::storage::{Collection, Storage};
use crate::validation::{self, bucket_key};
use chrono::NaiveDate;
use std::path::Path;
use tracing::{info, warn};

/// Which collections were read successfully at startup
#[derive(Debug, Clone, Copy)]
struct LoadState {
    experts: bool,
    deadlines: bool,
    examinations: bool,
}

pub struct Agenda {
    records: Records,
    storage: Storage,
    config: AgendaConfig,
    loaded: LoadState,
}

impl Agenda {
    /// Open the agenda stored in `data_dir`
    ///
    /// A collection whose file cannot be read or parsed starts empty; the
    /// failure is logged and that file is left alone by [`Agenda::flush`].
    pub fn open(data_dir: impl AsRef<Path>, config: AgendaConfig) -> Self {
        let storage = Storage::new(data_dir, &config);

        let (experts, experts_ok) = load_or_empty(&storage, Collection::Experts);
        let (deadlines, deadlines_ok) = load_or_empty(&storage, Collection::Deadlines);
        let (examinations, examinations_ok) = load_or_empty(&storage, Collection::Examinations);

        let records = Records {
            experts,
            deadlines,
            examinations,
        };
        info!(
            data_dir = %storage.data_dir().display(),
            experts = records.experts.len(),
            deadlines = records.deadlines.len(),
            examinations = records.examinations.len(),
            "agenda opened"
        );

        Self {
            records,
            storage,
            config,
            loaded: LoadState {
                experts: experts_ok,
                deadlines: deadlines_ok,
                examinations: examinations_ok,
            },
        }
    }

    pub fn records(&self) -> &Records {
        &self.records
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    pub fn config(&self) -> &AgendaConfig {
        &self.config
    }

    /// Rewrite every collection that loaded cleanly
    pub fn flush(&self) -> Result<()> {
        if self.loaded.experts {
            self.storage.save(Collection::Experts, &self.records.experts)?;
        }
        if self.loaded.deadlines {
            self.storage.save(Collection::Deadlines, &self.records.deadlines)?;
        }
        if self.loaded.examinations {
            self.storage.save(Collection::Examinations, &self.records.examinations)?;
        }
        Ok(())
    }

    // Queries

    pub fn experts(&self) -> Vec<Expert> {
        self.records.experts()
    }

    pub fn items_on(&self, date: NaiveDate) -> DayAgenda {
        self.records.items_on(date)
    }

    /// Records of one kind whose date lies in `[start, end]`, ascending
    pub fn items_in_range(
        &self,
        kind: RecordKind,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Vec<(NaiveDate, Entry)> {
        match kind {
            RecordKind::Deadline => self
                .records
                .deadlines
                .in_range(start, end)
                .into_iter()
                .map(|(date, d)| (date, Entry::Deadline(d)))
                .collect(),
            RecordKind::Examination => self
                .records
                .examinations
                .in_range(start, end)
                .into_iter()
                .map(|(date, e)| (date, Entry::Examination(e)))
                .collect(),
        }
    }

    /// Both kinds from `today` through `today + days`
    pub fn upcoming(&self, today: NaiveDate, days: u32) -> Upcoming {
        self.records.upcoming(today, days)
    }

    /// Examinations from `today` through the configured dashboard window
    pub fn upcoming_dashboard(&self, today: NaiveDate) -> Vec<(NaiveDate, Examination)> {
        self.records.upcoming_dashboard(today, self.config.dashboard_days)
    }

    pub fn find_by_process_substring(&self, term: &str) -> SearchResults {
        self.records.find_by_process_substring(term)
    }

    /// Last day covered by the dashboard when opened on `today`
    pub fn dashboard_end(&self, today: NaiveDate) -> NaiveDate {
        window_end(today, self.config.dashboard_days)
    }

    // Mutations

    /// Register an expert, replacing any entry with the same name
    pub fn register_expert(
        &mut self,
        name: &str,
        national_id: &str,
        phone: &str,
        profession: &str,
    ) -> Result<Expert> {
        let name = validation::require("Name", name)?;
        let national_id = validation::normalize_national_id(national_id)
            .ok_or_else(|| ValidationError::InvalidNationalId(national_id.to_string()))?;
        if let Some(holder) = self.records.national_id_holder(&national_id)
            && holder != name
        {
            return Err(ValidationError::DuplicateNationalId {
                national_id,
                holder: holder.to_string(),
            }
            .into());
        }
        let phone = validation::require("Phone", phone)?;
        let profession = validation::require("Profession", profession)?;

        let expert = Expert {
            name: name.to_string(),
            national_id,
            phone: phone.to_string(),
            profession: profession.to_string(),
            registered_on: local_date_today(),
        };

        let mut next = self.records.experts.clone();
        if next.insert(expert.name.clone(), expert.clone()).is_some() {
            info!(name = %expert.name, "replacing expert registration");
        }
        self.storage.save(Collection::Experts, &next)?;
        self.records.experts = next;
        self.loaded.experts = true;

        info!(name = %expert.name, "expert registered");
        Ok(expert)
    }

    pub fn schedule_deadline(
        &mut self,
        date: NaiveDate,
        process: &str,
        expert_name: &str,
        description: &str,
        priority: Priority,
    ) -> Result<Deadline> {
        let process = validation::require_process_number(process)?;
        let expert_name = self.require_expert(expert_name)?;
        let description = validation::require("Description", description)?;
        let key = bucket_key(date);
        ensure_free(&self.records.deadlines, &key, process)?;

        let deadline = Deadline {
            process: process.to_string(),
            expert_name,
            description: description.to_string(),
            priority,
            completed: false,
            registered_on: local_date_today(),
        };
        let record = deadline.clone();
        let outcome = self.update_deadlines(move |buckets| {
            buckets.push(key, record);
            Outcome::Applied
        })?;
        debug_assert!(outcome.is_applied());

        info!(%date, process = %deadline.process, "deadline scheduled");
        Ok(deadline)
    }

    pub fn schedule_examination(
        &mut self,
        date: NaiveDate,
        process: &str,
        expert_name: &str,
        specialty: &str,
        location: &str,
        notes: Option<&str>,
    ) -> Result<Examination> {
        let process = validation::require_process_number(process)?;
        let expert_name = self.require_expert(expert_name)?;
        let specialty = validation::require("Specialty", specialty)?;
        let location = validation::require("Location", location)?;
        let key = bucket_key(date);
        ensure_free(&self.records.examinations, &key, process)?;

        let examination = Examination {
            process: process.to_string(),
            expert_name,
            specialty: specialty.to_string(),
            location: location.to_string(),
            notes: notes
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(str::to_string),
            performed: false,
            registered_on: local_date_today(),
        };
        let record = examination.clone();
        let outcome = self.update_examinations(move |buckets| {
            buckets.push(key, record);
            Outcome::Applied
        })?;
        debug_assert!(outcome.is_applied());

        info!(%date, process = %examination.process, "examination scheduled");
        Ok(examination)
    }

    /// Flag the first record with this process number on `date` as completed/performed
    pub fn mark_complete(
        &mut self,
        kind: RecordKind,
        date: NaiveDate,
        process: &str,
    ) -> Result<Outcome> {
        let key = bucket_key(date);
        let outcome = match kind {
            RecordKind::Deadline => self.update_deadlines(|b| mark_done(b, &key, process))?,
            RecordKind::Examination => self.update_examinations(|b| mark_done(b, &key, process))?,
        };
        log_outcome("mark_complete", kind, date, process, outcome);
        Ok(outcome)
    }

    /// Move the first matching record, unchanged, to the end of the `new_date` bucket
    ///
    /// The destination is not checked for a record with the same process
    /// number; such a duplicate is logged.
    pub fn reschedule(
        &mut self,
        kind: RecordKind,
        date: NaiveDate,
        process: &str,
        new_date: NaiveDate,
    ) -> Result<Outcome> {
        let from = bucket_key(date);
        let to = bucket_key(new_date);
        let outcome = match kind {
            RecordKind::Deadline => {
                self.update_deadlines(|b| move_record(b, &from, &to, process))?
            }
            RecordKind::Examination => {
                self.update_examinations(|b| move_record(b, &from, &to, process))?
            }
        };
        log_outcome("reschedule", kind, date, process, outcome);
        if outcome.is_applied() {
            self.warn_on_duplicate(kind, &to, process);
        }
        Ok(outcome)
    }

    /// Apply field updates to the first matching record, in place
    ///
    /// Updated fields are stored as given; they are not re-validated.
    pub fn edit(&mut self, date: NaiveDate, process: &str, patch: RecordPatch) -> Result<Outcome> {
        let key = bucket_key(date);
        let kind = patch.kind();
        let new_process = patch.process().unwrap_or(process).to_string();
        if !validation::is_valid_process_number(&new_process) {
            warn!(process = %new_process, "edited record keeps a malformed process number");
        }

        let outcome = match patch {
            RecordPatch::Deadline(patch) => {
                self.update_deadlines(|b| match b.find_mut(&key, process) {
                    Some(deadline) => {
                        patch.apply(deadline);
                        Outcome::Applied
                    }
                    None => Outcome::NotFound,
                })?
            }
            RecordPatch::Examination(patch) => {
                self.update_examinations(|b| match b.find_mut(&key, process) {
                    Some(examination) => {
                        patch.apply(examination);
                        Outcome::Applied
                    }
                    None => Outcome::NotFound,
                })?
            }
        };
        log_outcome("edit", kind, date, process, outcome);
        if outcome.is_applied() {
            self.warn_on_duplicate(kind, &key, &new_process);
        }
        Ok(outcome)
    }

    /// Remove the first matching record; an emptied date bucket disappears
    pub fn delete(&mut self, kind: RecordKind, date: NaiveDate, process: &str) -> Result<Outcome> {
        let key = bucket_key(date);
        let outcome = match kind {
            RecordKind::Deadline => self.update_deadlines(|b| remove(b, &key, process))?,
            RecordKind::Examination => self.update_examinations(|b| remove(b, &key, process))?,
        };
        log_outcome("delete", kind, date, process, outcome);
        Ok(outcome)
    }

    fn require_expert(&self, expert_name: &str) -> Result<String, ValidationError> {
        let name = validation::require("Expert", expert_name)?;
        if self.records.find_expert(name).is_none() {
            return Err(ValidationError::UnknownExpert(name.to_string()));
        }
        Ok(name.to_string())
    }

    fn update_deadlines(
        &mut self,
        change: impl FnOnce(&mut DateBuckets<Deadline>) -> Outcome,
    ) -> Result<Outcome, StorageError> {
        let mut next = self.records.deadlines.clone();
        let outcome = change(&mut next);
        if outcome.is_applied() {
            self.storage.save(Collection::Deadlines, &next)?;
            self.records.deadlines = next;
            self.loaded.deadlines = true;
        }
        Ok(outcome)
    }

    fn update_examinations(
        &mut self,
        change: impl FnOnce(&mut DateBuckets<Examination>) -> Outcome,
    ) -> Result<Outcome, StorageError> {
        let mut next = self.records.examinations.clone();
        let outcome = change(&mut next);
        if outcome.is_applied() {
            self.storage.save(Collection::Examinations, &next)?;
            self.records.examinations = next;
            self.loaded.examinations = true;
        }
        Ok(outcome)
    }

    fn warn_on_duplicate(&self, kind: RecordKind, key: &str, process: &str) {
        let count = match kind {
            RecordKind::Deadline => self.records.deadlines.count_process(key, process),
            RecordKind::Examination => self.records.examinations.count_process(key, process),
        };
        if count > 1 {
            warn!(
                %kind,
                date = key,
                process,
                count,
                "process number now appears more than once on this date"
            );
        }
    }
}

fn load_or_empty<T>(storage: &Storage, collection: Collection) -> (T, bool)
where
    T: serde::de::DeserializeOwned + Default,
{
    match storage.load(collection) {
        Ok(records) => (records, true),
        Err(e) => {
            warn!(%collection, error = %e, "could not load collection, starting empty");
            (T::default(), false)
        }
    }
}

fn ensure_free<T: Scheduled>(
    buckets: &DateBuckets<T>,
    key: &str,
    process: &str,
) -> Result<(), ValidationError> {
    if buckets.contains_process(key, process) {
        return Err(ValidationError::DuplicateInBucket {
            process: process.to_string(),
            date: key.to_string(),
        });
    }
    Ok(())
}

fn mark_done<T: Scheduled>(buckets: &mut DateBuckets<T>, key: &str, process: &str) -> Outcome {
    match buckets.find_mut(key, process) {
        Some(record) => {
            record.mark_done();
            Outcome::Applied
        }
        None => Outcome::NotFound,
    }
}

fn move_record<T: Scheduled>(
    buckets: &mut DateBuckets<T>,
    from: &str,
    to: &str,
    process: &str,
) -> Outcome {
    match buckets.take(from, process) {
        Some(record) => {
            buckets.push(to, record);
            Outcome::Applied
        }
        None => Outcome::NotFound,
    }
}

fn remove<T: Scheduled>(buckets: &mut DateBuckets<T>, key: &str, process: &str) -> Outcome {
    match buckets.take(key, process) {
        Some(_) => Outcome::Applied,
        None => Outcome::NotFound,
    }
}

fn log_outcome(action: &str, kind: RecordKind, date: NaiveDate, process: &str, outcome: Outcome) {
    match outcome {
        Outcome::Applied => info!(action, %kind, %date, process, "applied"),
        Outcome::NotFound => warn!(action, %kind, %date, process, "no matching record"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AgendaError;
    use crate::records::{DeadlinePatch, ExaminationPatch};
    use tempfile::TempDir;

    const PROCESS: &str = "1234567-12.2024.8.26.0100";
    const OTHER_PROCESS: &str = "7654321-98.2023.8.26.0001";

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn open_with_expert() -> (Agenda, TempDir) {
        let dir = TempDir::new().unwrap();
        let mut agenda = Agenda::open(dir.path(), AgendaConfig::default());
        agenda
            .register_expert("Ana Souza", "123.456.789-01", "(11) 99999-0000", "Engenheira")
            .unwrap();
        (agenda, dir)
    }

    fn reopen(dir: &TempDir) -> Agenda {
        Agenda::open(dir.path(), AgendaConfig::default())
    }

    fn is_validation(result: Result<impl std::fmt::Debug>) -> bool {
        matches!(result, Err(AgendaError::Validation(_)))
    }

    #[test]
    fn test_register_expert_normalizes_and_persists() {
        let (agenda, dir) = open_with_expert();
        let expert = &agenda.experts()[0];
        assert_eq!(expert.national_id, "123.456.789-01");
        assert_eq!(expert.registered_on, local_date_today());

        let reopened = reopen(&dir);
        assert_eq!(reopened.records().experts, agenda.records().experts);
    }

    #[test]
    fn test_register_expert_rejects_bad_input() {
        let (mut agenda, _dir) = open_with_expert();
        assert!(is_validation(agenda.register_expert("  ", "12345678901", "1", "x")));
        assert!(is_validation(agenda.register_expert("Bia", "1234", "1", "x")));
        assert!(is_validation(agenda.register_expert("Bia", "98765432100", " ", "x")));
        assert!(is_validation(agenda.register_expert("Bia", "98765432100", "1", "")));
        assert_eq!(agenda.experts().len(), 1);
    }

    #[test]
    fn test_register_expert_rejects_cpf_of_another_expert() {
        let (mut agenda, _dir) = open_with_expert();
        let result = agenda.register_expert("Bia Lima", "12345678901", "1", "Médica");
        match result {
            Err(AgendaError::Validation(ValidationError::DuplicateNationalId { holder, .. })) => {
                assert_eq!(holder, "Ana Souza")
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_register_expert_overwrites_same_name() {
        let (mut agenda, _dir) = open_with_expert();
        agenda
            .register_expert("Ana Souza", "12345678901", "(11) 1111-1111", "Contadora")
            .unwrap();
        let experts = agenda.experts();
        assert_eq!(experts.len(), 1);
        assert_eq!(experts[0].profession, "Contadora");
    }

    #[test]
    fn test_schedule_deadline_validation() {
        let (mut agenda, _dir) = open_with_expert();
        let day = date(2024, 6, 10);
        let normal = Priority::Normal;
        assert!(is_validation(agenda.schedule_deadline(day, "123", "Ana Souza", "Laudo", normal)));
        assert!(is_validation(agenda.schedule_deadline(day, PROCESS, " ", "Laudo", normal)));
        assert!(is_validation(agenda.schedule_deadline(day, PROCESS, "Carlos", "Laudo", normal)));
        assert!(is_validation(agenda.schedule_deadline(day, PROCESS, "Ana Souza", "", normal)));
        assert!(agenda.records().deadlines.is_empty());
    }

    #[test]
    fn test_deadline_uniqueness_is_per_date() {
        let (mut agenda, _dir) = open_with_expert();
        agenda
            .schedule_deadline(date(2024, 6, 10), PROCESS, "Ana Souza", "Laudo", Priority::High)
            .unwrap();

        let second = agenda.schedule_deadline(
            date(2024, 6, 10),
            PROCESS,
            "Ana Souza",
            "Outro",
            Priority::Low,
        );
        assert!(matches!(
            second,
            Err(AgendaError::Validation(ValidationError::DuplicateInBucket { .. }))
        ));

        agenda
            .schedule_deadline(date(2024, 6, 11), PROCESS, "Ana Souza", "Outro", Priority::Low)
            .unwrap();
        assert_eq!(agenda.records().deadlines.len(), 2);
    }

    #[test]
    fn test_examination_uniqueness_is_per_date() {
        let (mut agenda, _dir) = open_with_expert();
        let day = date(2024, 6, 10);
        agenda
            .schedule_examination(day, PROCESS, "Ana Souza", "Engenharia", "Fórum", None)
            .unwrap();

        let second =
            agenda.schedule_examination(day, PROCESS, "Ana Souza", "Contábil", "Sala 2", None);
        assert!(matches!(
            second,
            Err(AgendaError::Validation(ValidationError::DuplicateInBucket { .. }))
        ));

        agenda
            .schedule_examination(
                date(2024, 6, 11),
                PROCESS,
                "Ana Souza",
                "Contábil",
                "Sala 2",
                None,
            )
            .unwrap();
        assert_eq!(agenda.records().examinations.len(), 2);
    }

    #[test]
    fn test_schedule_examination_rejects_bad_process_and_unknown_expert() {
        let (mut agenda, _dir) = open_with_expert();
        let day = date(2024, 6, 10);

        let malformed =
            agenda.schedule_examination(day, "123-45", "Ana Souza", "Engenharia", "Fórum", None);
        assert!(matches!(
            malformed,
            Err(AgendaError::Validation(ValidationError::InvalidProcessNumber(_)))
        ));

        let unknown =
            agenda.schedule_examination(day, PROCESS, "Carlos", "Engenharia", "Fórum", None);
        assert!(matches!(
            unknown,
            Err(AgendaError::Validation(ValidationError::UnknownExpert(_)))
        ));
        assert!(agenda.records().examinations.is_empty());
    }

    #[test]
    fn test_schedule_examination_blank_notes_are_absent() {
        let (mut agenda, dir) = open_with_expert();
        let exam = agenda
            .schedule_examination(
                date(2024, 6, 10),
                PROCESS,
                "Ana Souza",
                "Engenharia",
                "Fórum",
                Some("  "),
            )
            .unwrap();
        assert_eq!(exam.notes, None);
        assert!(!exam.performed);

        let reopened = reopen(&dir);
        assert_eq!(reopened.records().examinations.bucket("2024-06-10"), &[exam]);
    }

    #[test]
    fn test_schedule_examination_requires_location() {
        let (mut agenda, _dir) = open_with_expert();
        let result = agenda.schedule_examination(
            date(2024, 6, 10),
            PROCESS,
            "Ana Souza",
            "Engenharia",
            "",
            None,
        );
        assert!(matches!(
            result,
            Err(AgendaError::Validation(ValidationError::BlankField("Location")))
        ));
    }

    #[test]
    fn test_mark_complete_and_missing_record() {
        let (mut agenda, dir) = open_with_expert();
        let day = date(2024, 6, 10);
        agenda
            .schedule_examination(day, PROCESS, "Ana Souza", "Engenharia", "Fórum", None)
            .unwrap();

        let before = agenda.records().examinations.clone();
        let outcome = agenda
            .mark_complete(RecordKind::Examination, day, OTHER_PROCESS)
            .unwrap();
        assert_eq!(outcome, Outcome::NotFound);
        assert_eq!(agenda.records().examinations, before);

        let outcome = agenda.mark_complete(RecordKind::Examination, day, PROCESS).unwrap();
        assert_eq!(outcome, Outcome::Applied);
        assert!(reopen(&dir).records().examinations.bucket("2024-06-10")[0].performed);
    }

    #[test]
    fn test_reschedule_moves_to_end_and_drops_empty_bucket() {
        let (mut agenda, dir) = open_with_expert();
        agenda
            .schedule_deadline(date(2024, 6, 10), PROCESS, "Ana Souza", "A", Priority::Normal)
            .unwrap();
        agenda
            .schedule_deadline(date(2024, 6, 20), OTHER_PROCESS, "Ana Souza", "B", Priority::Normal)
            .unwrap();

        let outcome = agenda
            .reschedule(RecordKind::Deadline, date(2024, 6, 10), PROCESS, date(2024, 6, 20))
            .unwrap();
        assert_eq!(outcome, Outcome::Applied);

        let reopened = reopen(&dir);
        let deadlines = &reopened.records().deadlines;
        assert!(!deadlines.contains_key("2024-06-10"));
        let moved: Vec<&str> = deadlines
            .bucket("2024-06-20")
            .iter()
            .map(|d| d.process.as_str())
            .collect();
        assert_eq!(moved, vec![OTHER_PROCESS, PROCESS]);
    }

    #[test]
    fn test_reschedule_allows_duplicate_at_destination() {
        let (mut agenda, _dir) = open_with_expert();
        agenda
            .schedule_deadline(date(2024, 6, 10), PROCESS, "Ana Souza", "A", Priority::Normal)
            .unwrap();
        agenda
            .schedule_deadline(date(2024, 6, 11), PROCESS, "Ana Souza", "B", Priority::Normal)
            .unwrap();

        let outcome = agenda
            .reschedule(RecordKind::Deadline, date(2024, 6, 10), PROCESS, date(2024, 6, 11))
            .unwrap();
        assert_eq!(outcome, Outcome::Applied);
        assert_eq!(agenda.records().deadlines.count_process("2024-06-11", PROCESS), 2);
    }

    #[test]
    fn test_edit_does_not_revalidate() {
        let (mut agenda, _dir) = open_with_expert();
        let day = date(2024, 6, 10);
        agenda
            .schedule_deadline(day, PROCESS, "Ana Souza", "A", Priority::Normal)
            .unwrap();

        let patch = RecordPatch::Deadline(DeadlinePatch {
            process: Some("not-a-process".to_string()),
            priority: Some(Priority::High),
            ..Default::default()
        });
        assert_eq!(agenda.edit(day, PROCESS, patch).unwrap(), Outcome::Applied);

        let edited = &agenda.records().deadlines.bucket("2024-06-10")[0];
        assert_eq!(edited.process, "not-a-process");
        assert_eq!(edited.priority, Priority::High);
        assert_eq!(edited.description, "A");
    }

    #[test]
    fn test_edit_wrong_kind_is_not_found() {
        let (mut agenda, _dir) = open_with_expert();
        let day = date(2024, 6, 10);
        agenda
            .schedule_deadline(day, PROCESS, "Ana Souza", "A", Priority::Normal)
            .unwrap();

        let patch = RecordPatch::Examination(ExaminationPatch {
            location: Some("Clínica".to_string()),
            ..Default::default()
        });
        assert_eq!(agenda.edit(day, PROCESS, patch).unwrap(), Outcome::NotFound);
    }

    #[test]
    fn test_delete_last_item_removes_bucket_on_disk() {
        let (mut agenda, dir) = open_with_expert();
        let day = date(2024, 6, 10);
        agenda
            .schedule_deadline(day, PROCESS, "Ana Souza", "A", Priority::Normal)
            .unwrap();

        assert_eq!(agenda.delete(RecordKind::Deadline, day, PROCESS).unwrap(), Outcome::Applied);
        assert_eq!(agenda.delete(RecordKind::Deadline, day, PROCESS).unwrap(), Outcome::NotFound);

        let raw = std::fs::read_to_string(agenda.storage().path(Collection::Deadlines)).unwrap();
        assert!(!raw.contains("2024-06-10"));
        assert!(reopen(&dir).records().deadlines.is_empty());
    }

    #[test]
    fn test_failed_save_leaves_memory_unchanged() {
        let (mut agenda, dir) = open_with_expert();
        // A directory where the deadlines file should be makes the rename fail
        std::fs::create_dir(dir.path().join("prazos.json")).unwrap();
        std::fs::write(dir.path().join("prazos.json").join("keep"), "x").unwrap();

        let result = agenda.schedule_deadline(
            date(2024, 6, 10),
            PROCESS,
            "Ana Souza",
            "A",
            Priority::Normal,
        );
        assert!(matches!(result, Err(AgendaError::Storage(_))));
        assert!(agenda.records().deadlines.is_empty());
    }

    #[test]
    fn test_corrupt_file_degrades_to_empty_and_is_not_flushed() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("prazos.json"), "{ broken").unwrap();

        let agenda = Agenda::open(dir.path(), AgendaConfig::default());
        assert!(agenda.records().deadlines.is_empty());

        agenda.flush().unwrap();
        let raw = std::fs::read_to_string(dir.path().join("prazos.json")).unwrap();
        assert_eq!(raw, "{ broken");
        assert!(dir.path().join("peritos.json").exists());
    }

    #[test]
    fn test_items_in_range_by_kind() {
        let (mut agenda, _dir) = open_with_expert();
        agenda
            .schedule_deadline(date(2024, 6, 10), PROCESS, "Ana Souza", "A", Priority::Normal)
            .unwrap();
        agenda
            .schedule_examination(
                date(2024, 6, 10),
                OTHER_PROCESS,
                "Ana Souza",
                "Eng",
                "Fórum",
                None,
            )
            .unwrap();

        let deadlines =
            agenda.items_in_range(RecordKind::Deadline, date(2024, 6, 10), date(2024, 6, 10));
        assert_eq!(deadlines.len(), 1);
        assert_eq!(deadlines[0].1.kind(), RecordKind::Deadline);
        assert_eq!(deadlines[0].1.process(), PROCESS);

        let exams =
            agenda.items_in_range(RecordKind::Examination, date(2024, 6, 1), date(2024, 6, 30));
        assert_eq!(exams.len(), 1);
        assert!(!exams[0].1.is_done());
    }
}
