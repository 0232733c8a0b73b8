//! On-disk envelope for the JSON collections
//!
//! Current files wrap the mapping as `{"format_version": 1, "records": {...}}`.
//! Files written by the desktop tool hold the bare mapping; those still load
//! and are upgraded on the next save.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

/// Format version written to every collection file
pub const FORMAT_VERSION: u32 = 1;

#[derive(Serialize)]
struct Envelope<'a, T> {
    format_version: u32,
    records: &'a T,
}

#[derive(Deserialize)]
struct StoredEnvelope<T> {
    format_version: u32,
    records: T,
}

/// Parse a collection file body
///
/// The layout is picked from the presence of a top-level `format_version`
/// key, then the text is parsed again as that layout so errors keep their
/// line and column.
///
/// # Returns
/// The mapping and whether the file used the unversioned layout
pub fn decode_collection<T>(content: &str) -> Result<(T, bool), serde_json::Error>
where
    T: DeserializeOwned + Default,
{
    if content.trim().is_empty() {
        return Ok((T::default(), false));
    }

    let value: Value = serde_json::from_str(content)?;
    if value.get("format_version").is_none() {
        return Ok((serde_json::from_str(content)?, true));
    }

    let StoredEnvelope {
        format_version,
        records,
    } = serde_json::from_str(content)?;
    if format_version > FORMAT_VERSION {
        warn!(
            format_version,
            supported = FORMAT_VERSION,
            "collection written by a newer version"
        );
    }
    Ok((records, false))
}

/// Render a collection as indented JSON inside the versioned envelope
pub fn encode_collection<T: Serialize>(records: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&Envelope {
        format_version: FORMAT_VERSION,
        records,
    })
}
