use std::fmt;

use log::LevelFilter;

use crate::{Error, Result};

/// Runtime options for the branch-and-bound solver.
#[derive(Clone, Debug)]
pub struct SolverOptions {
    /// Weight applied to x-axis distances in the Chebyshev metric.
    pub cost_x: u64,
    /// Weight applied to y-axis distances in the Chebyshev metric.
    pub cost_y: u64,
    /// Worker threads for the search pool. Zero auto-sizes from available
    /// parallelism.
    pub threads: usize,
    /// Structured logging level.
    pub log_level: LogLevel,
    /// Include timestamps in log lines.
    pub log_timestamp: bool,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
    Off,
}

impl LogLevel {
    pub fn to_filter(self) -> LevelFilter {
        match self {
            Self::Error => LevelFilter::Error,
            Self::Warn => LevelFilter::Warn,
            Self::Info => LevelFilter::Info,
            Self::Debug => LevelFilter::Debug,
            Self::Trace => LevelFilter::Trace,
            Self::Off => LevelFilter::Off,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
            Self::Off => "off",
        };
        write!(f, "{tag}")
    }
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            cost_x: 1,
            cost_y: 1,
            threads: 0,
            log_level: LogLevel::Warn,
            log_timestamp: true,
        }
    }
}

impl SolverOptions {
    pub fn with_costs(mut self, cost_x: u64, cost_y: u64) -> Self {
        self.cost_x = cost_x;
        self.cost_y = cost_y;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    pub fn with_log_level(mut self, log_level: LogLevel) -> Self {
        self.log_level = log_level;
        self
    }

    pub fn with_log_timestamp(mut self, log_timestamp: bool) -> Self {
        self.log_timestamp = log_timestamp;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.cost_x == 0 || self.cost_y == 0 {
            return Err(Error::invalid_input("axis weights must be positive"));
        }
        Ok(())
    }
}

impl fmt::Display for SolverOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cost_x={} cost_y={} threads={} log_level={} log_timestamp={}",
            self.cost_x, self.cost_y, self.threads, self.log_level, self.log_timestamp
        )
    }
}
