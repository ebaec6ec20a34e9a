///! Watch mode: refresh the report on a fixed interval until interrupted.

use anyhow::Result;
use std::future::Future;
use std::io::Write;
use std::time::Duration;

/// Clear entire screen and move the cursor home
pub const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

#[derive(Debug, Clone)]
pub struct WatchConfig {
    pub interval: Duration,
    pub clear_screen: bool,
    /// Stop after this many refreshes; `None` runs until shutdown
    pub max_cycles: Option<u64>,
}

impl WatchConfig {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            clear_screen: true,
            max_cycles: None,
        }
    }
}

pub struct WatchMode {
    config: WatchConfig,
    cycles: u64,
}

impl WatchMode {
    pub fn new(config: WatchConfig) -> Self {
        Self { config, cycles: 0 }
    }

    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Run refresh cycles, writing each report to `out`.
    ///
    /// `refresh` produces the report for one cycle. `shutdown` resolving at
    /// any point, during a fetch or the sleep, ends the loop with a farewell
    /// and `Ok(())`. An error from `refresh` ends the loop immediately.
    pub async fn run<F, Fut, S, W>(&mut self, mut refresh: F, shutdown: S, out: &mut W) -> Result<()>
    where
        F: FnMut(u64) -> Fut,
        Fut: Future<Output = Result<String>>,
        S: Future<Output = ()>,
        W: Write,
    {
        tokio::pin!(shutdown);

        tracing::info!("Watch mode started (interval: {:?})", self.config.interval);

        loop {
            if self.limit_reached() {
                return Ok(());
            }

            if self.config.clear_screen {
                write!(out, "{}", CLEAR_SCREEN)?;
                out.flush()?;
            }

            let report = tokio::select! {
                biased;
                _ = &mut shutdown => return self.farewell(out),
                result = refresh(self.cycles) => result?,
            };

            writeln!(out, "{}", report)?;
            writeln!(
                out,
                "[Auto-refresh every {}s - Ctrl+C to exit]",
                self.config.interval.as_secs()
            )?;
            out.flush()?;

            self.cycles += 1;
            tracing::debug!("Watch cycle {} complete", self.cycles);

            if self.limit_reached() {
                return Ok(());
            }

            tokio::select! {
                biased;
                _ = &mut shutdown => return self.farewell(out),
                _ = tokio::time::sleep(self.config.interval) => {}
            }
        }
    }

    fn limit_reached(&self) -> bool {
        self.config.max_cycles.is_some_and(|max| self.cycles >= max)
    }

    fn farewell<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(out, "\nExiting...")?;
        out.flush()?;
        tracing::info!("Watch mode interrupted after {} cycles", self.cycles);
        Ok(())
    }
}
