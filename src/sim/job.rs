use serde::{Deserialize, Serialize};

use crate::core::{Pid, Process};
use crate::error::ProcessError;

/// Raw (id, arrival, burst) triple as supplied by a loader or generator.
/// Signed so that bad input can be reported rather than wrapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessRecord {
    pub id: Pid,
    pub arrival_time: i64,
    pub burst_time: i64,
}

impl ProcessRecord {
    pub fn new(id: Pid, arrival_time: i64, burst_time: i64) -> Self {
        Self {
            id,
            arrival_time,
            burst_time,
        }
    }

    pub fn into_process(self) -> Result<Process, ProcessError> {
        let arrival = u64::try_from(self.arrival_time).map_err(|_| ProcessError::NegativeArrival {
            id: self.id,
            arrival: self.arrival_time,
        })?;
        let burst = u64::try_from(self.burst_time)
            .ok()
            .filter(|&burst| burst > 0)
            .ok_or(ProcessError::NonPositiveBurst {
                id: self.id,
                burst: self.burst_time,
            })?;

        Process::new(self.id, arrival, burst)
    }
}

impl From<(Pid, i64, i64)> for ProcessRecord {
    fn from((id, arrival_time, burst_time): (Pid, i64, i64)) -> Self {
        Self::new(id, arrival_time, burst_time)
    }
}
