use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:3000/api/participants/query";
pub const DEFAULT_PARTICIPANT: &str = "1R85";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeConfig {
    pub endpoint: String,
    pub participant_name: String,
    /// `None` leaves the HTTP client's default in place.
    pub timeout: Option<Duration>,
}

impl ProbeConfig {
    pub fn new(endpoint: impl Into<String>, participant_name: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            participant_name: participant_name.into(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT, DEFAULT_PARTICIPANT)
    }
}
