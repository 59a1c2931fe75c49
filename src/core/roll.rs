use crate::domain::model::{Roll, MAX_ROLL};
use crate::utils::error::{RegistryError, Result};

pub const DEFAULT_ROLL_SEED: u32 = 1000;

/// Highest seed that still leaves one roll to hand out.
pub const MAX_ROLL_SEED: u32 = MAX_ROLL - 1;

/// Source of automatically assigned rolls. Incremented before each
/// assignment, so a fresh counter seeded at 1000 hands out 1001 first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollCounter {
    last: u32,
}

impl RollCounter {
    pub fn new(seed: u32) -> Self {
        Self { last: seed }
    }

    /// Fails once `MAX_ROLL` has been handed out; the counter never repeats a roll.
    pub fn next_roll(&mut self) -> Result<Roll> {
        if self.last >= MAX_ROLL {
            tracing::debug!(last = self.last, "roll counter exhausted");
            return Err(RegistryError::validation("Roll counter exhausted"));
        }
        self.last += 1;
        tracing::trace!(roll = self.last, "auto-assigned roll");
        Ok(Roll::from_counter(self.last))
    }
}

impl Default for RollCounter {
    fn default() -> Self {
        Self::new(DEFAULT_ROLL_SEED)
    }
}
