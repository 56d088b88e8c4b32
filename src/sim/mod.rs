pub mod driver;
pub mod job;
pub mod loader;
pub mod stats;
pub mod workload;

pub use driver::{EventStream, Sim};
pub use job::ProcessRecord;
pub use stats::{Averages, ProcessReport, Statistics};
