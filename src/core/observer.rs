use super::{
    process::{ProcessState, Ticks},
    state::SchedCtx,
};

// Debug-build invariant checker, run after every step
#[derive(Debug)]
pub struct Observer {
    step: u64,
    last_now: Ticks,
    // (remaining_time, waiting_time) per process at the previous step
    last_seen: Vec<(Ticks, Ticks)>,
}

impl Observer {
    pub fn new(ctx: &SchedCtx) -> Self {
        Self {
            step: 0,
            last_now: ctx.now,
            last_seen: if cfg!(debug_assertions) {
                snapshot(ctx)
            } else {
                Vec::new()
            },
        }
    }

    pub fn observe(&mut self, ctx: &SchedCtx) {
        self.step += 1;
        if cfg!(debug_assertions) {
            self.check(ctx);
        }
    }

    fn check(&mut self, ctx: &SchedCtx) {
        debug_assert!(
            ctx.now >= self.last_now,
            "Global time went backwards at step {}: {} -> {}",
            self.step,
            self.last_now,
            ctx.now
        );

        let mut terminated = 0;
        for (idx, p) in ctx.processes().iter().enumerate() {
            let (last_remaining, last_waiting) = self.last_seen[idx];
            debug_assert!(
                p.remaining_time() <= last_remaining,
                "Process {} remaining time grew: {} -> {}",
                p.id(),
                last_remaining,
                p.remaining_time()
            );
            debug_assert!(
                p.waiting_time() >= last_waiting,
                "Process {} waiting time shrank: {} -> {}",
                p.id(),
                last_waiting,
                p.waiting_time()
            );
            debug_assert_eq!(
                p.state() == ProcessState::Terminated,
                p.is_finished(),
                "Process {} state {:?} disagrees with remaining time {}",
                p.id(),
                p.state(),
                p.remaining_time()
            );
            if p.is_finished() {
                terminated += 1;
            }
        }
        debug_assert_eq!(
            terminated,
            ctx.completed(),
            "Completed count does not match terminated processes"
        );

        for (pos, &idx) in ctx.ready().iter().enumerate() {
            debug_assert!(
                !ctx.process(idx).is_finished(),
                "Terminated process {} still present in ready queue",
                ctx.process(idx).id()
            );
            debug_assert!(
                ctx.is_admitted(idx),
                "Process {} queued before admission",
                ctx.process(idx).id()
            );
            debug_assert!(
                !ctx.ready().iter().skip(pos + 1).any(|&other| other == idx),
                "Process {} queued twice",
                ctx.process(idx).id()
            );
        }

        self.last_now = ctx.now;
        self.last_seen = snapshot(ctx);
    }

    pub fn steps(&self) -> u64 {
        self.step
    }
}

fn snapshot(ctx: &SchedCtx) -> Vec<(Ticks, Ticks)> {
    ctx.processes()
        .iter()
        .map(|p| (p.remaining_time(), p.waiting_time()))
        .collect()
}
