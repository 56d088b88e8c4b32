use std::fmt::Write;

use average::{Estimate, Mean};
use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::core::{Pid, Process, SchedEvent, Ticks};
use crate::sim::Statistics;

pub fn render_table(stats: &Statistics) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "FINAL STATISTICS:");
    let _ = writeln!(out, "PID\tArrival\tBurst\tFinish\tTurnaround\tWaiting");
    for r in &stats.reports {
        let _ = writeln!(
            out,
            "{}\t{}\t{}\t{}\t{}\t\t{}",
            r.id, r.arrival_time, r.burst_time, r.finish_time, r.turnaround, r.waiting_time
        );
    }

    match &stats.averages {
        Some(avg) => {
            let _ = writeln!(out, "Average Waiting Time: {:.2} ticks", avg.waiting);
            let _ = writeln!(out, "Average Turnaround Time: {:.2} ticks", avg.turnaround);
        }
        None => {
            let _ = writeln!(out, "No processes: no data");
        }
    }
    out
}

pub fn render_json(stats: &Statistics) -> serde_json::Result<String> {
    serde_json::to_string_pretty(stats)
}

/// Secondary metrics derived from the event log
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResponseSummary {
    /// First dispatch minus arrival, averaged
    pub average_response: f64,
    pub longest_wait: Ticks,
    pub finished_at: Ticks,
}

impl ResponseSummary {
    /// `None` for an empty run.
    pub fn from_events(events: &[SchedEvent], processes: &[Process]) -> Option<Self> {
        if processes.is_empty() {
            return None;
        }

        let mut first_dispatch: FxHashMap<Pid, Ticks> = FxHashMap::default();
        for event in events {
            if let SchedEvent::Dispatch { pid, at, .. } = *event {
                first_dispatch.entry(pid).or_insert(at);
            }
        }

        let response: Mean = processes
            .iter()
            .filter_map(|p| {
                first_dispatch
                    .get(&p.id())
                    .map(|&start| start.saturating_sub(p.arrival_time()) as f64)
            })
            .collect();
        let longest_wait = processes.iter().map(Process::waiting_time).max().unwrap_or(0);
        let finished_at = events
            .iter()
            .rev()
            .find(|e| matches!(e, SchedEvent::Completion { .. }))
            .map(SchedEvent::at)
            .unwrap_or(0);

        Some(Self {
            average_response: response.estimate(),
            longest_wait,
            finished_at,
        })
    }
}

pub fn render_events(events: &[SchedEvent]) -> String {
    let mut out = String::new();
    for event in events {
        let _ = match *event {
            SchedEvent::Arrival { pid, at } => writeln!(out, "Time {at}: Process {pid} arrived."),
            SchedEvent::Dispatch { pid, at, slice } => {
                writeln!(out, "Time {at}: Process {pid} runs for {slice}.")
            }
            SchedEvent::Requeue { pid, at, remaining } => {
                writeln!(out, "Time {at}: Process {pid} preempted, {remaining} left.")
            }
            SchedEvent::Completion { pid, at } => writeln!(out, "Time {at}: Process {pid} finished."),
            SchedEvent::Idle { from, until } => writeln!(out, "Time {from}: CPU idle until {until}."),
        };
    }
    out
}
