use std::collections::VecDeque;

use super::process::{Process, ProcessState, Ticks};

// Index into the process Vec
pub type ProcIdx = usize;

#[derive(Debug)]
pub struct SchedCtx {
    pub now: Ticks,
    processes: Vec<Process>,
    ready: VecDeque<ProcIdx>,

    // Process indices sorted by (arrival_time, input position); everything
    // before the cursor has been admitted
    arrival_order: Vec<ProcIdx>,
    arrival_cursor: usize,

    completed: usize,
}

impl SchedCtx {
    pub fn new(processes: Vec<Process>) -> Self {
        let mut arrival_order: Vec<ProcIdx> = (0..processes.len()).collect();
        // Stable, so equal arrivals keep input order
        arrival_order.sort_by_key(|&idx| processes[idx].arrival_time());

        Self {
            now: 0,
            ready: VecDeque::with_capacity(processes.len()),
            processes,
            arrival_order,
            arrival_cursor: 0,
            completed: 0,
        }
    }

    pub fn advance_time(&mut self, delta: Ticks) {
        self.now = self.now.saturating_add(delta);
    }

    /// Move every process whose arrival time has been reached onto the tail
    /// of the ready queue. Returns the admitted indices in admission order.
    pub fn admit_arrivals(&mut self) -> Vec<ProcIdx> {
        let now = self.now;
        let processes = &self.processes;
        let admitted: Vec<ProcIdx> = self.arrival_order[self.arrival_cursor..]
            .iter()
            .copied()
            .take_while(|&idx| processes[idx].arrival_time() <= now) // contiguous, since sorted
            .collect();

        self.arrival_cursor += admitted.len();
        self.ready.extend(admitted.iter().copied());
        admitted
    }

    /// Arrival time of the earliest process not yet admitted.
    pub fn next_arrival(&self) -> Option<Ticks> {
        self.arrival_order
            .get(self.arrival_cursor)
            .map(|&idx| self.processes[idx].arrival_time())
    }

    pub fn ready_pop_front(&mut self) -> Option<ProcIdx> {
        self.ready.pop_front()
    }

    pub fn ready_push_back(&mut self, idx: ProcIdx) {
        debug_assert!(
            !self.ready.contains(&idx),
            "Process at index {idx} already present in ready queue"
        );
        debug_assert!(
            !self.processes[idx].is_finished(),
            "Finished process at index {idx} cannot be requeued"
        );
        self.ready.push_back(idx);
    }

    /// Charge `delta` ticks of waiting to everything currently queued.
    pub fn accrue_waiting(&mut self, delta: Ticks) {
        for &idx in &self.ready {
            self.processes[idx].update_waiting_time(delta);
        }
    }

    pub fn mark_completed(&mut self, idx: ProcIdx) {
        debug_assert_eq!(
            self.processes[idx].state(),
            ProcessState::Terminated,
            "Process at index {idx} must be terminated before marked complete"
        );
        self.completed += 1;
    }

    pub fn process(&self, idx: ProcIdx) -> &Process {
        &self.processes[idx]
    }

    pub fn process_mut(&mut self, idx: ProcIdx) -> &mut Process {
        &mut self.processes[idx]
    }

    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    pub fn ready(&self) -> &VecDeque<ProcIdx> {
        &self.ready
    }

    pub fn is_admitted(&self, idx: ProcIdx) -> bool {
        self.arrival_order[..self.arrival_cursor].contains(&idx)
    }

    pub fn completed(&self) -> usize {
        self.completed
    }

    pub fn all_completed(&self) -> bool {
        self.completed == self.processes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(triples: &[(i64, u64, u64)]) -> SchedCtx {
        SchedCtx::new(
            triples
                .iter()
                .map(|&(id, arrival, burst)| Process::new(id, arrival, burst).unwrap())
                .collect(),
        )
    }

    #[test]
    fn test_admission_happens_once() {
        let mut ctx = ctx(&[(1, 0, 3), (2, 0, 3)]);
        assert_eq!(ctx.admit_arrivals(), vec![0, 1]);
        assert!(ctx.admit_arrivals().is_empty());
        assert_eq!(ctx.ready().len(), 2);
    }

    #[test]
    fn test_admission_waits_for_arrival() {
        let mut ctx = ctx(&[(1, 2, 3), (2, 0, 3)]);
        assert_eq!(ctx.admit_arrivals(), vec![1]);
        ctx.advance_time(1);
        assert!(ctx.admit_arrivals().is_empty());
        ctx.advance_time(1);
        assert_eq!(ctx.admit_arrivals(), vec![0]);
        assert!(ctx.is_admitted(0) && ctx.is_admitted(1));
    }

    #[test]
    fn test_next_arrival_follows_cursor() {
        let mut ctx = ctx(&[(1, 7, 1), (2, 0, 1), (3, 4, 1)]);
        assert_eq!(ctx.next_arrival(), Some(0));
        ctx.admit_arrivals();
        assert_eq!(ctx.next_arrival(), Some(4));
        ctx.advance_time(7);
        ctx.admit_arrivals();
        assert_eq!(ctx.next_arrival(), None);
    }

    #[test]
    fn test_batched_admission_orders_by_arrival_then_input() {
        let mut ctx = ctx(&[(1, 4, 1), (2, 3, 1), (3, 3, 1)]);
        ctx.advance_time(5);
        assert_eq!(ctx.admit_arrivals(), vec![1, 2, 0]);
    }

    #[test]
    fn test_accrual_only_touches_queue() {
        let mut ctx = ctx(&[(1, 0, 3), (2, 0, 3), (3, 9, 3)]);
        ctx.admit_arrivals();
        let head = ctx.ready_pop_front().unwrap();
        ctx.accrue_waiting(2);
        assert_eq!(ctx.process(head).waiting_time(), 0);
        assert_eq!(ctx.process(1).waiting_time(), 2);
        assert_eq!(ctx.process(2).waiting_time(), 0);
    }
}
