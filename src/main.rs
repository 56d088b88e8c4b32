use anyhow::{Context, Result};
use rr_model::{
    RunConfig, Sim,
    config::{InputSource, OutputFormat},
    report::{self, ResponseSummary},
    sim::{loader, workload},
    telemetry,
};
use tracing::info;

fn main() -> Result<()> {
    let config = RunConfig::from_env().context("invalid configuration")?;
    telemetry::init_tracing(config.trace_json);

    let records = match &config.input {
        InputSource::File(path) => loader::load_records(path)
            .with_context(|| format!("cannot load processes from {}", path.display()))?,
        InputSource::Generate { ticks, seed } => {
            workload::bernoulli_records(*ticks, 0.3, 0.3, 2, 6, *seed)
        }
    };
    info!(count = records.len(), quantum = config.quantum.ticks(), "starting simulation");

    let mut sim = Sim::with_quantum(config.quantum);
    sim.load(records).context("rejected process batch")?;
    let events = sim.run();

    if config.show_events {
        print!("{}", report::render_events(&events));
    }

    let stats = sim.statistics()?;
    match config.format {
        OutputFormat::Table => {
            println!();
            print!("{}", report::render_table(&stats));
            if let Some(summary) = ResponseSummary::from_events(&events, sim.processes()) {
                println!("Average response time: {:.2} ticks", summary.average_response);
                println!("Longest waiting time: {} ticks", summary.longest_wait);
                println!("All processes done at tick {}", summary.finished_at);
            }
        }
        OutputFormat::Json => println!("{}", report::render_json(&stats)?),
    }

    Ok(())
}
