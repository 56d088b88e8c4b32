use serde::Serialize;

use crate::core::{Pid, Ticks};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SchedEvent {
    // Process placed on the ready queue
    Arrival {
        pid: Pid,
        at: Ticks,
    },
    // `at` is the tick the slice starts
    Dispatch {
        pid: Pid,
        at: Ticks,
        slice: Ticks,
    },
    // Quantum expired with work left; back to the tail
    Requeue {
        pid: Pid,
        at: Ticks,
        remaining: Ticks,
    },
    Completion {
        pid: Pid,
        at: Ticks,
    },
    // Nothing ready in [from, until); CPU idles until the next arrival
    Idle {
        from: Ticks,
        until: Ticks,
    },
}

impl SchedEvent {
    pub fn at(&self) -> Ticks {
        match *self {
            Self::Arrival { at, .. }
            | Self::Dispatch { at, .. }
            | Self::Requeue { at, .. }
            | Self::Completion { at, .. }
            | Self::Idle { from: at, .. } => at,
        }
    }
}
