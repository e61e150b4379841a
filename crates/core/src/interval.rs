use chrono::{DateTime, Utc};

/// Time span during which a configuration was active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Opaque config identifier, typically the config directory path.
    pub source: String,
}

impl ConfigInterval {
    /// Half-open containment: `start <= t < end`.
    ///
    /// Two intervals sharing a boundary instant never both match, so a
    /// timestamp falling exactly on a boundary resolves to one config.
    pub fn contains(&self, timestamp: DateTime<Utc>) -> bool {
        self.start <= timestamp && timestamp < self.end
    }
}
