use std::io;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use crate::services::{RouterError, SignalSource};
use crate::sink::RecordSink;

pub const DEFAULT_DELAY_SECS: u64 = 60;
pub const DEFAULT_MAX_RETRIES: u32 = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    pub loop_forever: bool,
    pub delay: Duration,
    pub max_retries: u32,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            loop_forever: false,
            delay: Duration::from_secs(DEFAULT_DELAY_SECS),
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    /// The last login succeeded.
    Authenticated,
    /// The last login failed; the next poll runs without a session.
    Reauthenticating,
    Failed,
}

/// Consecutive poll failures since the last success.
#[derive(Debug, Clone, Copy)]
pub struct RetryCounter {
    count: u32,
    ceiling: u32,
}

impl RetryCounter {
    pub fn new(ceiling: u32) -> Self {
        Self { count: 0, ceiling }
    }

    pub fn record_failure(&mut self) {
        self.count = self.count.saturating_add(1);
    }

    pub fn reset(&mut self) {
        self.count = 0;
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn exceeded(&self) -> bool {
        self.count > self.ceiling
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub cycles: u64,
    pub records: u64,
    pub failures: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error("Initial admin login failed: {0}")]
    Authentication(#[source] RouterError),
    #[error("Too many errors without successful querying ({failures} consecutive), exiting")]
    RetriesExhausted { failures: u32 },
    #[error("Failed to write output: {0}")]
    Sink(#[from] io::Error),
}

pub struct Driver {
    options: RunOptions,
    state: DriverState,
    retries: RetryCounter,
}

impl Driver {
    pub fn new(options: RunOptions) -> Self {
        let retries = RetryCounter::new(options.max_retries);
        Self {
            options,
            state: DriverState::Reauthenticating,
            retries,
        }
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn consecutive_failures(&self) -> u32 {
        self.retries.count()
    }

    /// Log in, then poll until one-shot completion or the retry ceiling.
    pub async fn run<S, K>(
        &mut self,
        source: &mut S,
        sink: &mut K,
        fields: &[String],
    ) -> Result<RunSummary, DriverError>
    where
        S: SignalSource + ?Sized,
        K: RecordSink + ?Sized,
    {
        let mut summary = RunSummary::default();

        sink.write_header(fields)?;

        if let Err(e) = source.connect().await {
            self.state = DriverState::Failed;
            error!("Initial admin login failed: {}", e);
            return Err(DriverError::Authentication(e));
        }
        self.state = DriverState::Authenticated;

        loop {
            summary.cycles += 1;

            let failed = match source.poll(fields).await {
                Ok(record) => {
                    sink.write_record(&record, fields)?;
                    debug!(cycle = summary.cycles, "Diagnostics recorded");
                    summary.records += 1;
                    self.retries.reset();
                    false
                }
                Err(e) => {
                    self.retries.record_failure();
                    summary.failures += 1;
                    warn!(
                        consecutive = self.retries.count(),
                        ceiling = self.options.max_retries,
                        "Diagnostics poll failed: {}",
                        e
                    );
                    true
                }
            };

            if self.retries.exceeded() {
                self.state = DriverState::Failed;
                error!("Too many errors without successful querying, exiting");
                return Err(DriverError::RetriesExhausted {
                    failures: self.retries.count(),
                });
            }

            if !self.options.loop_forever {
                info!(
                    records = summary.records,
                    failures = summary.failures,
                    "Single run complete"
                );
                return Ok(summary);
            }

            if failed {
                self.state = match source.connect().await {
                    Ok(()) => DriverState::Authenticated,
                    Err(_) => DriverState::Reauthenticating,
                };
            }

            tokio::time::sleep(self.options.delay).await;
        }
    }
}
