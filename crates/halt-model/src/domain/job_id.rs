use std::fmt;

use serde::{Deserialize, Serialize};

/// String identifier of a job instance (e.g. `"2026-10-19_12-00-01"` or `"build#42"`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(String);

impl JobId {
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for JobId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for JobId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_plain_string() {
        let id = JobId::from("build#42");
        assert_eq!(serde_json::to_string(&id).unwrap(), r#""build#42""#);

        let back: JobId = serde_json::from_str(r#""nightly""#).unwrap();
        assert_eq!(back.as_str(), "nightly");
    }
}
