use std::fmt;

use thiserror::Error;

use crate::DbId;

/// Kind of persisted record, used to locate the table an error comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    RoadNode,
    RoadSection,
    Stop,
    PtSection,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RecordKind::RoadNode => "road node",
            RecordKind::RoadSection => "road section",
            RecordKind::Stop => "stop",
            RecordKind::PtSection => "pt section",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Duplicate {kind} id {id}")]
    DuplicateId { kind: RecordKind, id: DbId },
    #[error("Unknown {kind} id {id}")]
    UnknownId { kind: RecordKind, id: DbId },
    #[error(
        "Referential integrity violated at {kind} row {row}{}: {field} references unknown {target} id {missing_id}",
        record_label(.record_id)
    )]
    ReferentialIntegrity {
        kind: RecordKind,
        row: usize,
        record_id: Option<DbId>,
        field: &'static str,
        target: RecordKind,
        missing_id: DbId,
    },
    #[error("Malformed {kind} record at row {row}: {reason}")]
    MalformedRecord {
        kind: RecordKind,
        row: usize,
        reason: String,
    },
    #[error("Step index {index} out of range (roadmap has {len} steps)")]
    OutOfRange { index: usize, len: usize },
    #[error("Unable to read {kind} records: {reason}")]
    SourceUnavailable { kind: RecordKind, reason: String },
    #[error("Invalid node index")]
    InvalidNodeIndex,
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("Geometry error: {0}")]
    Geometry(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn record_label(record_id: &Option<DbId>) -> String {
    record_id.map_or_else(String::new, |id| format!(" (id {id})"))
}

impl Error {
    /// Record kind the error refers to, if it comes from a record stream
    pub fn record_kind(&self) -> Option<RecordKind> {
        match self {
            Error::DuplicateId { kind, .. }
            | Error::UnknownId { kind, .. }
            | Error::ReferentialIntegrity { kind, .. }
            | Error::MalformedRecord { kind, .. }
            | Error::SourceUnavailable { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}
