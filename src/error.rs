use std::path::PathBuf;
use thiserror::Error;

use crate::core::{Pid, Ticks};

/// Invalid run configuration. Raised before any scheduling state exists.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("time quantum must be positive, got {0}")]
    NonPositiveQuantum(i64),

    #[error("no time quantum given (pass --quantum or set RR_QUANTUM)")]
    MissingQuantum,

    #[error("flag {0} expects a value")]
    MissingValue(String),

    #[error("invalid value {value:?} for {flag}")]
    InvalidValue { flag: String, value: String },

    #[error("unknown argument {0:?}")]
    UnknownArgument(String),
}

/// A single (id, arrival, burst) triple that cannot become a process.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProcessError {
    #[error("process {id}: arrival time {arrival} is negative")]
    NegativeArrival { id: Pid, arrival: i64 },

    #[error("process {id}: burst time {burst} must be positive")]
    NonPositiveBurst { id: Pid, burst: i64 },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error("record {index} rejected: {source}")]
    InvalidRecord {
        index: usize,
        #[source]
        source: ProcessError,
    },

    #[error("processes cannot be loaded once the run has started")]
    RunStarted,
}

/// Failures reading a record file before it ever reaches the scheduler.
#[derive(Error, Debug)]
pub enum InputError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: {token:?} is not an integer")]
    BadToken { line: usize, token: String },

    #[error("line {line}: incomplete record, expected id, arrival and burst")]
    PartialRecord { line: usize },

    #[error("malformed JSON records: {0}")]
    Json(#[from] serde_json::Error),

    #[error("process id {0} appears more than once")]
    DuplicateId(Pid),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StatsError {
    #[error("run incomplete at tick {now}: {completed} of {total} processes finished")]
    Incomplete {
        now: Ticks,
        completed: usize,
        total: usize,
    },
}
