use tracing::{debug, trace};

use super::{
    event::SchedEvent,
    observer::Observer,
    process::{Process, Ticks},
    state::{ProcIdx, SchedCtx},
};
use crate::config::Quantum;

pub struct SchedCore {
    pub ctx: SchedCtx,
    quantum: Quantum,
    observer: Observer,
}

impl SchedCore {
    pub fn new(processes: Vec<Process>, quantum: Quantum) -> Self {
        let ctx = SchedCtx::new(processes);
        let observer = Observer::new(&ctx);
        Self {
            ctx,
            quantum,
            observer,
        }
    }

    /// One pass of the dispatch loop: admit arrivals, then either idle until
    /// the next arrival or run the head of the ready queue for one slice.
    pub fn step(&mut self) -> Vec<SchedEvent> {
        if self.is_done() {
            return Vec::new();
        }

        let mut events = Vec::new();
        self.admit(&mut events);

        match self.ctx.ready_pop_front() {
            None => {
                // Nothing can become ready before the next arrival, so the
                // whole idle span is one step
                let from = self.ctx.now;
                let until = self
                    .ctx
                    .next_arrival()
                    .unwrap_or(from)
                    .max(from.saturating_add(1));
                trace!(from, until, "cpu idle");
                events.push(SchedEvent::Idle { from, until });
                self.ctx.advance_time(until - from);
            }
            Some(idx) => self.dispatch(idx, &mut events),
        }

        self.observer.observe(&self.ctx);
        events
    }

    fn admit(&mut self, events: &mut Vec<SchedEvent>) {
        let now = self.ctx.now;
        for idx in self.ctx.admit_arrivals() {
            let pid = self.ctx.process(idx).id();
            debug!(pid, at = now, "process arrived");
            events.push(SchedEvent::Arrival { pid, at: now });
        }
    }

    fn dispatch(&mut self, idx: ProcIdx, events: &mut Vec<SchedEvent>) {
        let start = self.ctx.now;
        let slice = self.slice_for(idx);

        let process = self.ctx.process_mut(idx);
        let pid = process.id();
        process.execute(slice);
        debug!(pid, at = start, slice, "dispatched");
        events.push(SchedEvent::Dispatch {
            pid,
            at: start,
            slice,
        });

        self.ctx.advance_time(slice);

        // Queue still holds exactly the processes that waited through this
        // slice: the dispatched one is out, late arrivals are not yet in
        self.ctx.accrue_waiting(slice);

        let now = self.ctx.now;
        let process = self.ctx.process(idx);
        if process.is_finished() {
            self.ctx.mark_completed(idx);
            debug!(pid, at = now, "process finished");
            events.push(SchedEvent::Completion { pid, at: now });
        } else {
            let remaining = process.remaining_time();
            self.ctx.ready_push_back(idx);
            debug!(pid, at = now, remaining, "quantum expired, requeued");
            events.push(SchedEvent::Requeue {
                pid,
                at: now,
                remaining,
            });
        }
    }

    fn slice_for(&self, idx: ProcIdx) -> Ticks {
        self.quantum
            .ticks()
            .min(self.ctx.process(idx).remaining_time())
    }

    pub fn run_to_completion(&mut self) -> Vec<SchedEvent> {
        let mut events = Vec::new();
        while !self.is_done() {
            events.extend(self.step());
        }
        events
    }

    pub fn is_done(&self) -> bool {
        self.ctx.all_completed()
    }

    pub fn now(&self) -> Ticks {
        self.ctx.now
    }

    pub fn observer(&self) -> &Observer {
        &self.observer
    }
}
