//! MCP tool handlers for the agenda server
//!
//! This module contains the implementation of all MCP tool handlers.
//! Each group of tools is in a separate file.

pub mod experts;
pub mod listing;
pub mod schedule;
pub mod selection;

use crate::error::AgendaError;
use crate::records::RecordKind;
use crate::validation;
use chrono::NaiveDate;
use mcp_attr::{ErrorCode, Result as McpResult};

/// Turn a core error into a tool error whose message reaches the client
pub(crate) fn to_mcp_error(err: impl Into<AgendaError>) -> mcp_attr::Error {
    let err = err.into();
    let code = match err {
        AgendaError::Validation(_) => ErrorCode::INVALID_PARAMS,
        AgendaError::Storage(_) => ErrorCode::INTERNAL_ERROR,
    };
    mcp_attr::Error::new(code).with_message(err.to_string(), true)
}

pub(crate) fn parse_date(date_str: &str) -> McpResult<NaiveDate> {
    validation::parse_date(date_str.trim()).map_err(to_mcp_error)
}

pub(crate) fn parse_kind(kind: &str) -> McpResult<RecordKind> {
    kind.parse::<RecordKind>().map_err(to_mcp_error)
}

/// Empty string means "not given" for optional tool arguments
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
