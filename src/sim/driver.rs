use std::collections::VecDeque;

use tracing::info;

use super::job::ProcessRecord;
use super::stats::Statistics;
use crate::{
    config::Quantum,
    core::{Process, SchedCore, SchedEvent, Ticks},
    error::{ConfigError, LoadError, StatsError},
};

enum Phase {
    // Accepting process records
    Loading(Vec<Process>),
    Started(SchedCore),
}

pub struct Sim {
    quantum: Quantum,
    phase: Phase,
    // Pristine copies of the loaded processes, for replay()
    initial: Vec<Process>,
}

impl Sim {
    pub fn new(quantum: i64) -> Result<Self, ConfigError> {
        Ok(Self::with_quantum(Quantum::new(quantum)?))
    }

    pub fn with_quantum(quantum: Quantum) -> Self {
        Self {
            quantum,
            phase: Phase::Loading(Vec::new()),
            initial: Vec::new(),
        }
    }

    /// Append a batch of processes. The batch is validated as a whole: one bad
    /// record rejects all of them and nothing is added.
    pub fn load<I>(&mut self, records: I) -> Result<usize, LoadError>
    where
        I: IntoIterator<Item = ProcessRecord>,
    {
        let Phase::Loading(pending) = &mut self.phase else {
            return Err(LoadError::RunStarted);
        };

        let batch = records
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                record
                    .into_process()
                    .map_err(|source| LoadError::InvalidRecord { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let loaded = batch.len();
        pending.extend(batch.iter().cloned());
        self.initial.extend(batch);
        info!(loaded, total = self.initial.len(), "processes loaded");
        Ok(loaded)
    }

    fn core_mut(&mut self) -> &mut SchedCore {
        if let Phase::Loading(pending) = &mut self.phase {
            let processes = std::mem::take(pending);
            self.phase = Phase::Started(SchedCore::new(processes, self.quantum));
        }
        match &mut self.phase {
            Phase::Started(core) => core,
            Phase::Loading(_) => unreachable!("scheduler core initialised above"),
        }
    }

    /// Advance one iteration of the dispatch loop. Closes loading.
    pub fn step(&mut self) -> Vec<SchedEvent> {
        self.core_mut().step()
    }

    /// Run until every process has terminated; returns the full event log.
    pub fn run(&mut self) -> Vec<SchedEvent> {
        let quantum = self.quantum.ticks();
        let core = self.core_mut();
        let events = core.run_to_completion();
        info!(
            quantum,
            finished_at = core.now(),
            processes = core.ctx.processes().len(),
            "simulation complete"
        );
        events
    }

    pub fn all_completed(&self) -> bool {
        match &self.phase {
            Phase::Loading(pending) => pending.is_empty(),
            Phase::Started(core) => core.is_done(),
        }
    }

    pub fn now(&self) -> Ticks {
        match &self.phase {
            Phase::Loading(_) => 0,
            Phase::Started(core) => core.now(),
        }
    }

    pub fn quantum(&self) -> Quantum {
        self.quantum
    }

    pub fn processes(&self) -> &[Process] {
        match &self.phase {
            Phase::Loading(pending) => pending.as_slice(),
            Phase::Started(core) => core.ctx.processes(),
        }
    }

    pub fn statistics(&self) -> Result<Statistics, StatsError> {
        Statistics::compute(self.processes(), self.now())
    }

    /// Lazily re-simulate the loaded processes from tick 0. Each call starts
    /// over, independent of this simulator's own progress.
    pub fn replay(&self) -> EventStream {
        EventStream {
            core: SchedCore::new(self.initial.clone(), self.quantum),
            pending: VecDeque::new(),
        }
    }

    /// Apply `f` to every process, in input order.
    pub fn processes_map<'a, T>(&'a self, f: impl Fn(&'a Process) -> T + 'a) -> impl Iterator<Item = T> + 'a {
        self.processes().iter().map(f)
    }
}

pub struct EventStream {
    core: SchedCore,
    pending: VecDeque<SchedEvent>,
}

impl Iterator for EventStream {
    type Item = SchedEvent;

    fn next(&mut self) -> Option<SchedEvent> {
        while self.pending.is_empty() {
            if self.core.is_done() {
                return None;
            }
            self.pending.extend(self.core.step());
        }
        self.pending.pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(triples: &[(i64, i64, i64)]) -> Vec<ProcessRecord> {
        triples.iter().map(|&t| ProcessRecord::from(t)).collect()
    }

    #[test]
    fn test_bad_quantum_rejected() {
        assert!(matches!(Sim::new(0), Err(ConfigError::NonPositiveQuantum(0))));
        assert!(matches!(Sim::new(-1), Err(ConfigError::NonPositiveQuantum(-1))));
    }

    #[test]
    fn test_bad_record_rejects_whole_batch() {
        let mut sim = Sim::new(2).unwrap();
        let err = sim.load(records(&[(1, 0, 3), (2, 0, 0), (3, 0, 1)])).unwrap_err();
        assert!(matches!(err, LoadError::InvalidRecord { index: 1, .. }));
        assert!(sim.processes().is_empty());
    }

    #[test]
    fn test_load_appends_batches() {
        let mut sim = Sim::new(2).unwrap();
        assert_eq!(sim.load(records(&[(1, 0, 3)])), Ok(1));
        assert_eq!(sim.load(records(&[(2, 1, 2), (3, 1, 1)])), Ok(2));
        let ids: Vec<_> = sim.processes_map(|p| p.id()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_load_after_start_rejected() {
        let mut sim = Sim::new(2).unwrap();
        sim.load(records(&[(1, 0, 3)])).unwrap();
        sim.step();
        assert_eq!(sim.load(records(&[(2, 0, 1)])), Err(LoadError::RunStarted));
    }

    #[test]
    fn test_statistics_refused_mid_run() {
        let mut sim = Sim::new(1).unwrap();
        sim.load(records(&[(1, 0, 3)])).unwrap();
        sim.step();
        assert!(matches!(
            sim.statistics(),
            Err(StatsError::Incomplete {
                completed: 0,
                total: 1,
                ..
            })
        ));
    }
}
