//! Absolute time expressed as seconds from 1970-01-01T00:00:00Z.

use crate::{TimeError, TimeResult};

/// Seconds elapsed since the Unix epoch, unaffected by zone or DST.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct EpochSeconds(pub(crate) i64);

impl From<i64> for EpochSeconds {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl EpochSeconds {
    /// Returns the raw second count.
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> i64 {
        self.0
    }

    /// Checks that the value lies within the representable instant range.
    pub fn check_validity(&self) -> TimeResult<()> {
        if !is_valid_epoch_seconds(self.0) {
            return Err(TimeError::overflow()
                .with_message("instant is outside the representable range"));
        }
        Ok(())
    }

    pub(crate) fn checked_add(self, seconds: i64) -> TimeResult<Self> {
        let value = self
            .0
            .checked_add(seconds)
            .ok_or_else(TimeError::overflow)?;
        let epoch = Self(value);
        epoch.check_validity()?;
        Ok(epoch)
    }
}

/// Utility for determining whether a second count is a valid instant.
#[inline]
#[must_use]
pub(crate) fn is_valid_epoch_seconds(seconds: i64) -> bool {
    (crate::SECS_MIN_INSTANT..=crate::SECS_MAX_INSTANT).contains(&seconds)
}
