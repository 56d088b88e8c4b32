use std::num::NonZeroU64;
use std::path::PathBuf;

use crate::core::Ticks;
use crate::error::ConfigError;

pub const QUANTUM_ENV: &str = "RR_QUANTUM";
pub const TRACE_JSON_ENV: &str = "RR_TRACE_JSON";
pub const DEFAULT_INPUT: &str = "processes.txt";

/// Fixed time slice for the whole run. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Quantum(NonZeroU64);

impl Quantum {
    pub fn new(ticks: i64) -> Result<Self, ConfigError> {
        u64::try_from(ticks)
            .ok()
            .and_then(NonZeroU64::new)
            .map(Self)
            .ok_or(ConfigError::NonPositiveQuantum(ticks))
    }

    pub fn from_ticks(ticks: Ticks) -> Option<Self> {
        NonZeroU64::new(ticks).map(Self)
    }

    #[inline]
    pub fn ticks(self) -> Ticks {
        self.0.get()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    File(PathBuf),
    /// Random arrivals over `ticks` ticks, reproducible from `seed`
    Generate { ticks: u64, seed: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub quantum: Quantum,
    pub input: InputSource,
    pub format: OutputFormat,
    pub show_events: bool,
    pub trace_json: bool,
}

impl RunConfig {
    /// Build from the process arguments and environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::parse(
            std::env::args().skip(1),
            |key| std::env::var(key).ok(),
        )
    }

    /// Flags win over environment variables.
    pub fn parse<I, E>(args: I, env: E) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = String>,
        E: Fn(&str) -> Option<String>,
    {
        let mut quantum = None;
        let mut input_path = None;
        let mut generate = None;
        let mut seed = 0;
        let mut format = OutputFormat::default();
        let mut show_events = false;

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--quantum" | "-q" => {
                    let value = next_value(&mut args, &arg)?;
                    quantum = Some(parse_int::<i64>(&arg, &value)?);
                }
                "--input" | "-i" => input_path = Some(PathBuf::from(next_value(&mut args, &arg)?)),
                "--generate" => {
                    let value = next_value(&mut args, &arg)?;
                    generate = Some(parse_int::<u64>(&arg, &value)?);
                }
                "--seed" => {
                    let value = next_value(&mut args, &arg)?;
                    seed = parse_int::<u64>(&arg, &value)?;
                }
                "--format" | "-f" => {
                    let value = next_value(&mut args, &arg)?;
                    format = match value.to_lowercase().as_str() {
                        "table" => OutputFormat::Table,
                        "json" => OutputFormat::Json,
                        _ => return Err(ConfigError::InvalidValue { flag: arg.clone(), value }),
                    };
                }
                "--events" => show_events = true,
                _ => return Err(ConfigError::UnknownArgument(arg.clone())),
            }
        }

        let quantum = match quantum {
            Some(q) => q,
            None => {
                let value = env(QUANTUM_ENV).ok_or(ConfigError::MissingQuantum)?;
                parse_int::<i64>(QUANTUM_ENV, &value)?
            }
        };

        let input = match (generate, input_path) {
            (Some(ticks), None) => InputSource::Generate { ticks, seed },
            (Some(_), Some(path)) => {
                return Err(ConfigError::InvalidValue {
                    flag: "--input".into(),
                    value: format!("{} (conflicts with --generate)", path.display()),
                });
            }
            (None, path) => InputSource::File(path.unwrap_or_else(|| DEFAULT_INPUT.into())),
        };

        let trace_json = env(TRACE_JSON_ENV)
            .map(|v| v == "1" || v == "true")
            .unwrap_or(false);

        Ok(Self {
            quantum: Quantum::new(quantum)?,
            input,
            format,
            show_events,
            trace_json,
        })
    }
}

fn next_value(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String, ConfigError> {
    args.next()
        .ok_or_else(|| ConfigError::MissingValue(flag.to_string()))
}

fn parse_int<T: std::str::FromStr>(flag: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        flag: flag.to_string(),
        value: value.to_string(),
    })
}
