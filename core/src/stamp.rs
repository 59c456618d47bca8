//! Timestamp-based id stamping.
//!
//! Contributed elements must carry ids that do not collide with the target
//! document. `IdStamper` derives a fresh id from an existing one by
//! prefixing it with `<prefix><millis>_`. Stamping an already stamped id
//! replaces only the numeric part, so repeated calls never accumulate
//! prefixes.

use regex_lite::Regex;

use crate::{TailorError, TailorResult};

/// Default prefix of stamped ids.
pub const DEFAULT_STAMP_PREFIX: &str = "bpmnt";

/// Source of milliseconds for stamps.
pub type Clock = fn() -> i64;

fn system_clock() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generator of timestamp-prefixed ids.
#[derive(Debug, Clone)]
pub struct IdStamper {
    prefix: String,
    pattern: Regex,
    last: i64,
    clock: Clock,
}

impl IdStamper {
    /// Create a stamper using the system clock.
    pub fn new(prefix: impl Into<String>) -> TailorResult<Self> {
        Self::with_clock(prefix, system_clock)
    }

    /// Create a stamper with an explicit clock.
    pub fn with_clock(prefix: impl Into<String>, clock: Clock) -> TailorResult<Self> {
        let prefix = prefix.into();
        if prefix.is_empty() {
            return Err(TailorError::invalid_argument("id stamp prefix cannot be empty"));
        }
        let pattern = Regex::new(&format!("^{}[0-9]+_", regex_lite::escape(&prefix)))
            .map_err(|e| TailorError::invalid_argument(e.to_string()))?;
        Ok(Self {
            prefix,
            pattern,
            last: i64::MIN,
            clock,
        })
    }

    /// The configured prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Next stamp value, strictly greater than every previous one.
    fn next_stamp(&mut self) -> i64 {
        let now = (self.clock)();
        let stamp = if now > self.last { now } else { self.last + 1 };
        self.last = stamp;
        stamp
    }

    /// Stamp an id.
    pub fn stamp(&mut self, id: &str) -> String {
        let stamp = self.next_stamp();
        format!("{}{}_{}", self.prefix, stamp, self.strip(id))
    }

    /// Whether the id carries a stamp.
    pub fn is_stamped(&self, id: &str) -> bool {
        self.pattern.is_match(id)
    }

    /// The id without its stamp.
    pub fn strip<'a>(&self, id: &'a str) -> &'a str {
        match self.pattern.find(id) {
            Some(m) => &id[m.end()..],
            None => id,
        }
    }
}
