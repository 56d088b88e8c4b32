use rand::prelude::*;

use super::job::ProcessRecord;

/// At every tick in `0..ticks` a process arrives with probability `p_arrival`;
/// it is short with probability `p_short`. Same seed, same workload.
pub fn bernoulli_records(
    ticks: u64,
    p_arrival: f64,
    p_short: f64,
    short_ticks: u64,
    long_ticks: u64,
    seed: u64,
) -> Vec<ProcessRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut records = Vec::new();

    for t in 0..ticks {
        if rng.random::<f64>() < p_arrival {
            let burst = if rng.random::<f64>() < p_short {
                short_ticks
            } else {
                long_ticks
            };

            records.push(ProcessRecord::new(
                records.len() as i64 + 1,
                t as i64,
                burst as i64,
            ));
        }
    }

    records
}
