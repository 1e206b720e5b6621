use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_INITIAL_BUFFER_CAPACITY, DEFAULT_MAX_RECORD_SIZE, DEFAULT_READ_BUFFER_SIZE};
use crate::types::{RecordError, RecordResult};

/// Decoder options.
///
/// Every field has a default, so a partial JSON object is a valid
/// configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderOptions {
    /// Capacity of the buffered adapter put around bulk-only sources.
    pub read_buffer_capacity: usize,

    /// Largest record the decoder accepts.
    /// - `None` → any length the platform can address (default).
    /// - `Some(n)` → longer lengths fail with `RecordTooLarge` before allocating.
    pub max_record_size: Option<usize>,

    /// Decode buffer allocated up front. `0` allocates lazily on the first record.
    pub initial_buffer_capacity: usize,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            read_buffer_capacity: DEFAULT_READ_BUFFER_SIZE,
            max_record_size: DEFAULT_MAX_RECORD_SIZE,
            initial_buffer_capacity: DEFAULT_INITIAL_BUFFER_CAPACITY,
        }
    }
}

impl ReaderOptions {
    pub fn with_max_record_size(mut self, max: usize) -> Self {
        self.max_record_size = Some(max);
        self
    }

    pub fn with_read_buffer_capacity(mut self, capacity: usize) -> Self {
        self.read_buffer_capacity = capacity;
        self
    }

    pub fn with_initial_buffer_capacity(mut self, capacity: usize) -> Self {
        self.initial_buffer_capacity = capacity;
        self
    }

    /// Parse options from a JSON document.
    pub fn from_json(text: &str) -> RecordResult<Self> {
        let opts: Self = serde_json::from_str(text)
            .map_err(|e| RecordError::Validation(format!("invalid reader options: {e}")))?;
        opts.validate()?;
        Ok(opts)
    }

    pub fn validate(&self) -> RecordResult<()> {
        if self.read_buffer_capacity == 0 {
            return Err(RecordError::Validation(
                "read_buffer_capacity must be greater than zero".into(),
            ));
        }
        if let Some(max) = self.max_record_size {
            if self.initial_buffer_capacity > max {
                return Err(RecordError::Validation(format!(
                    "initial_buffer_capacity {} exceeds max_record_size {}",
                    self.initial_buffer_capacity, max
                )));
            }
        }
        Ok(())
    }
}
