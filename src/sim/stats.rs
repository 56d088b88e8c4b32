use serde::Serialize;

use crate::core::{Pid, Process, Ticks};
use crate::error::StatsError;

/// Final timing of one process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProcessReport {
    pub id: Pid,
    pub arrival_time: Ticks,
    pub burst_time: Ticks,
    pub finish_time: Ticks,
    pub turnaround: Ticks,
    pub waiting_time: Ticks,
}

impl ProcessReport {
    fn from_process(p: &Process) -> Self {
        let turnaround = p.burst_time() + p.waiting_time();
        Self {
            id: p.id(),
            arrival_time: p.arrival_time(),
            burst_time: p.burst_time(),
            finish_time: p.arrival_time() + turnaround,
            turnaround,
            waiting_time: p.waiting_time(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Averages {
    pub waiting: f64,
    pub turnaround: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statistics {
    /// One entry per process, in input order
    pub reports: Vec<ProcessReport>,
    /// `None` when there were no processes
    pub averages: Option<Averages>,
}

impl Statistics {
    /// Pure over `processes`; refuses until every process has terminated.
    pub fn compute(processes: &[Process], now: Ticks) -> Result<Self, StatsError> {
        let completed = processes.iter().filter(|p| p.is_finished()).count();
        if completed != processes.len() {
            return Err(StatsError::Incomplete {
                now,
                completed,
                total: processes.len(),
            });
        }

        let reports: Vec<ProcessReport> = processes.iter().map(ProcessReport::from_process).collect();

        let averages = (!reports.is_empty()).then(|| {
            let count = reports.len() as f64;
            let total_waiting: f64 = reports.iter().map(|r| r.waiting_time as f64).sum();
            let total_turnaround: f64 = reports.iter().map(|r| r.turnaround as f64).sum();
            Averages {
                waiting: total_waiting / count,
                turnaround: total_turnaround / count,
            }
        });

        Ok(Self { reports, averages })
    }

    pub fn report(&self, id: Pid) -> Option<&ProcessReport> {
        self.reports.iter().find(|r| r.id == id)
    }
}
