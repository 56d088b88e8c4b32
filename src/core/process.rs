use crate::error::ProcessError;

pub type Pid = i64;
pub type Ticks = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessState {
    Ready,
    Running,
    Terminated,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Process {
    id: Pid,
    arrival_time: Ticks,
    burst_time: Ticks,
    remaining_time: Ticks,
    waiting_time: Ticks,
    state: ProcessState,
}

impl Process {
    pub fn new(id: Pid, arrival_time: Ticks, burst_time: Ticks) -> Result<Self, ProcessError> {
        if burst_time == 0 {
            return Err(ProcessError::NonPositiveBurst { id, burst: 0 });
        }

        Ok(Self {
            id,
            arrival_time,
            burst_time,
            remaining_time: burst_time,
            waiting_time: 0,
            state: ProcessState::Ready,
        })
    }

    pub fn id(&self) -> Pid {
        self.id
    }

    pub fn arrival_time(&self) -> Ticks {
        self.arrival_time
    }

    pub fn burst_time(&self) -> Ticks {
        self.burst_time
    }

    pub fn remaining_time(&self) -> Ticks {
        self.remaining_time
    }

    pub fn waiting_time(&self) -> Ticks {
        self.waiting_time
    }

    pub fn state(&self) -> ProcessState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.remaining_time == 0
    }

    pub(crate) fn update_waiting_time(&mut self, delta: Ticks) {
        debug_assert!(
            self.state != ProcessState::Terminated,
            "Terminated process {} cannot accrue waiting time",
            self.id
        );
        self.waiting_time = self.waiting_time.saturating_add(delta);
    }

    /// Run for `slice` ticks. A slice covering the whole remaining time
    /// terminates the process; a terminated process is left untouched.
    pub(crate) fn execute(&mut self, slice: Ticks) {
        if self.state == ProcessState::Terminated {
            return;
        }

        self.transition(ProcessState::Running);
        if self.remaining_time > slice {
            self.remaining_time -= slice;
        } else {
            self.remaining_time = 0;
            self.transition(ProcessState::Terminated);
        }
    }

    fn transition(&mut self, to: ProcessState) {
        use ProcessState::*;
        debug_assert!(
            matches!(
                (self.state, to),
                (Ready, Running) | (Running, Running) | (Running, Terminated)
            ),
            "Illegal transition {:?} -> {:?} for process {}",
            self.state,
            to,
            self.id
        );
        self.state = to;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_process_is_ready() {
        let p = Process::new(7, 3, 5).unwrap();
        assert_eq!(p.id(), 7);
        assert_eq!(p.arrival_time(), 3);
        assert_eq!(p.burst_time(), 5);
        assert_eq!(p.remaining_time(), 5);
        assert_eq!(p.waiting_time(), 0);
        assert_eq!(p.state(), ProcessState::Ready);
        assert!(!p.is_finished());
    }

    #[test]
    fn test_zero_burst_rejected() {
        assert_eq!(
            Process::new(1, 0, 0),
            Err(ProcessError::NonPositiveBurst { id: 1, burst: 0 })
        );
    }

    #[test]
    fn test_partial_slice_keeps_running() {
        let mut p = Process::new(1, 0, 5).unwrap();
        p.execute(2);
        assert_eq!(p.remaining_time(), 3);
        assert_eq!(p.state(), ProcessState::Running);

        p.execute(2);
        assert_eq!(p.remaining_time(), 1);
        assert_eq!(p.state(), ProcessState::Running);
    }

    #[test]
    fn test_exact_slice_terminates() {
        let mut p = Process::new(1, 0, 4).unwrap();
        p.execute(4);
        assert_eq!(p.remaining_time(), 0);
        assert_eq!(p.state(), ProcessState::Terminated);
        assert!(p.is_finished());
    }

    #[test]
    fn test_oversized_slice_clamps_to_zero() {
        let mut p = Process::new(1, 0, 3).unwrap();
        p.execute(10);
        assert_eq!(p.remaining_time(), 0);
        assert_eq!(p.state(), ProcessState::Terminated);
    }

    #[test]
    fn test_terminated_process_is_frozen() {
        let mut p = Process::new(1, 0, 1).unwrap();
        p.execute(1);
        p.execute(5);
        assert_eq!(p.remaining_time(), 0);
        assert_eq!(p.state(), ProcessState::Terminated);
    }

    #[test]
    fn test_waiting_time_accumulates() {
        let mut p = Process::new(1, 0, 3).unwrap();
        p.update_waiting_time(2);
        p.update_waiting_time(0);
        p.update_waiting_time(3);
        assert_eq!(p.waiting_time(), 5);
    }
}
