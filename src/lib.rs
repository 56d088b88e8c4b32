pub mod config;
pub mod core;
pub mod error;
pub mod report;
pub mod sim;
pub mod telemetry;

pub use config::{Quantum, RunConfig};
pub use crate::core::{Pid, Process, ProcessState, SchedEvent, Ticks};
pub use sim::{ProcessRecord, Sim, Statistics};
