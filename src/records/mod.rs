//! Record models and in-memory collections
//!
//! This module contains the agenda data structures. It is split into
//! submodules:
//! - `model`: experts, deadlines, examinations and their patches
//! - `date_buckets`: the date-keyed collection shared by both record kinds
//! - `queries`: range, window and search queries
//! - `serde_impl`: the versioned on-disk envelope

mod date_buckets;
mod model;
mod queries;
mod serde_impl;

use std::collections::BTreeMap;

pub use date_buckets::DateBuckets;
pub use model::{
    Deadline, DeadlinePatch, Entry, Examination, ExaminationPatch, Expert, Outcome, Priority,
    RecordKind, RecordPatch, Scheduled, local_date_today,
};
pub use queries::{DayAgenda, SearchResults, Upcoming, window_end};
pub use serde_impl::{FORMAT_VERSION, decode_collection, encode_collection};

/// Experts keyed by full name
pub type ExpertMap = BTreeMap<String, Expert>;

/// The three collections held in memory for the life of the process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Records {
    pub experts: ExpertMap,
    pub deadlines: DateBuckets<Deadline>,
    pub examinations: DateBuckets<Examination>,
}
