use crate::domain::transfer::Recipient;
use crate::error::{PayhookError, Result};
use std::ops::RangeInclusive;
use std::time::Duration;

pub const DEFAULT_REGION: &str = "us-west-2";
pub const DEFAULT_ISSUE_INTERVAL: Duration = Duration::from_secs(3 * 60 * 60);
pub const DEFAULT_ISSUE_DURATION: Duration = Duration::from_secs(24 * 60 * 60);
pub const DEFAULT_MIN_BATCH: usize = 8;
pub const DEFAULT_MAX_BATCH: usize = 12;

/// Settings of the webhook dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatcherConfig {
    /// Region secrets are resolved in.
    pub region: String,
    /// Target of every transfer.
    pub recipient: Recipient,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            region: DEFAULT_REGION.to_string(),
            recipient: Recipient::stark_bank(),
        }
    }
}

impl DispatcherConfig {
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }
}

/// When and how much the periodic issuer issues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuerSchedule {
    pub interval: Duration,
    pub duration: Duration,
    pub batch_size: RangeInclusive<usize>,
}

impl IssuerSchedule {
    pub fn new(interval: Duration, duration: Duration, batch_size: RangeInclusive<usize>) -> Result<Self> {
        if interval.is_zero() {
            return Err(PayhookError::Config("issue interval must be positive".to_string()));
        }
        if batch_size.is_empty() {
            return Err(PayhookError::Config(format!(
                "batch size range {}..={} is empty",
                batch_size.start(),
                batch_size.end()
            )));
        }
        Ok(Self {
            interval,
            duration,
            batch_size,
        })
    }
}

impl Default for IssuerSchedule {
    fn default() -> Self {
        Self {
            interval: DEFAULT_ISSUE_INTERVAL,
            duration: DEFAULT_ISSUE_DURATION,
            batch_size: DEFAULT_MIN_BATCH..=DEFAULT_MAX_BATCH,
        }
    }
}
