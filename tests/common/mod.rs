//! Common test utilities for integration tests

#![allow(dead_code)]

use chrono::NaiveDate;
use cpj_prazos::{Agenda, AgendaConfig, CpjServerHandler};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

pub const PROCESS_A: &str = "1234567-12.2024.8.26.0100";
pub const PROCESS_B: &str = "7654321-98.2023.8.26.0001";

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Create a test handler over a fresh data directory
pub fn get_test_handler() -> (CpjServerHandler, TempDir) {
    let dir = TempDir::new().unwrap();
    let handler = CpjServerHandler::new(dir.path(), AgendaConfig::default()).unwrap();
    (handler, dir)
}

/// Open an agenda over a fresh data directory with one expert registered
pub fn agenda_with_expert(name: &str) -> (Agenda, TempDir) {
    let dir = TempDir::new().unwrap();
    let mut agenda = Agenda::open(dir.path(), AgendaConfig::default());
    agenda
        .register_expert(name, "123.456.789-01", "(11) 99999-0000", "Engenheira")
        .unwrap();
    (agenda, dir)
}

pub fn read_json(path: impl AsRef<Path>) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}
