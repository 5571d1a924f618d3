//! Common utilities for tools

use anyhow::Result;
use tracing::info;

/// Progress reporter for SNR sweeps
pub struct ProgressReporter {
    total: usize,
    current: usize,
    last_percent: u8,
}

impl ProgressReporter {
    /// Create a new progress reporter
    pub fn new(total: usize) -> Self {
        Self {
            total,
            current: 0,
            last_percent: 0,
        }
    }

    /// Record one finished step
    pub fn advance(&mut self) {
        self.update(self.current + 1);
    }

    /// Update progress
    pub fn update(&mut self, current: usize) {
        self.current = current.min(self.total);

        if self.total > 0 {
            let percent = ((self.current * 100) / self.total) as u8;
            if percent / 10 != self.last_percent / 10 {
                info!("Progress: {}%", percent);
                self.last_percent = percent;
            }
        }
    }

    /// Steps finished so far
    pub fn current(&self) -> usize {
        self.current
    }

    /// Mark as complete
    pub fn complete(&mut self) {
        info!("Complete: {}/{} (100%)", self.current, self.total);
    }
}

/// Initialize logging: DEBUG with `debug`, INFO with `verbose`, WARN otherwise
pub fn init_logging(verbose: bool, debug: bool) -> Result<()> {
    let log_level = if debug {
        tracing::Level::DEBUG
    } else if verbose {
        tracing::Level::INFO
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_reporter() {
        let mut reporter = ProgressReporter::new(15);
        for _ in 0..10 {
            reporter.advance();
        }
        assert_eq!(reporter.current(), 10);

        reporter.update(100);
        assert_eq!(reporter.current(), 15);
        reporter.complete();
    }

    #[test]
    fn test_progress_reporter_empty() {
        let mut reporter = ProgressReporter::new(0);
        reporter.advance();
        assert_eq!(reporter.current(), 0);
    }
}
