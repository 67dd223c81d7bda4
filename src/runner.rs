//! The probe itself: one POST to the participants endpoint, then a console
//! report of what came back.

use std::io::{self, Write};

use sonic_rs::Value;
use tracing::{debug, instrument};

use crate::adapter::{Client, RestResult};
use crate::config::ProbeConfig;
use crate::document::LastWins;
use crate::participant::{Participant, QueryRequest};

pub const RESPONSE_BANNER: &str = "=== RESPONSE RECEIVED ===";
pub const PARTICIPANT_BANNER: &str = "=== PARTICIPANT DATA ===";
pub const NOT_FOUND_NOTICE: &str = "❌ No participant data found in response";
pub const ERROR_PREFIX: &str = "❌ Error testing query:";

/// Status and parsed body of a successful query.
#[derive(Debug, Clone)]
pub struct QueryOutcome {
    pub status: u16,
    pub data: Value,
}

impl QueryOutcome {
    pub fn participant(&self) -> Option<Participant<'_>> {
        Participant::locate(&self.data)
    }

    /// Writes everything after the opening line: status, pretty-printed body
    /// (repeated keys collapsed) and either the participant fields or the
    /// not-found notice.
    pub fn write_report<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let pretty =
            sonic_rs::to_string_pretty(&LastWins(&self.data)).map_err(io::Error::other)?;

        writeln!(out)?;
        writeln!(out, "{RESPONSE_BANNER}")?;
        writeln!(out, "Status: {}", self.status)?;
        writeln!(out, "Response data: {pretty}")?;

        match self.participant() {
            Some(participant) => {
                writeln!(out)?;
                writeln!(out, "{PARTICIPANT_BANNER}")?;
                for (field, value) in participant.fields() {
                    writeln!(out, "{}: {}", field.label(), value)?;
                }
            }
            None => {
                writeln!(out)?;
                writeln!(out, "{NOT_FOUND_NOTICE}")?;
            }
        }
        Ok(())
    }
}

#[derive(Clone)]
pub struct QueryRunner {
    client: Client,
    config: ProbeConfig,
}

impl QueryRunner {
    pub fn new(config: ProbeConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(client: Client, config: ProbeConfig) -> Self {
        Self { client, config }
    }

    /// One request/response cycle. The HTTP status is reported, not checked.
    #[instrument(skip(self), fields(participant = %self.config.participant_name))]
    pub async fn query(&self) -> RestResult<QueryOutcome> {
        let payload = QueryRequest::new(self.config.participant_name.as_str());
        let response = self
            .client
            .post_json(self.config.endpoint.as_str(), &payload, self.config.timeout)
            .await?;
        let data = response.json::<Value>()?;
        debug!(status = response.status(), "query answered");

        Ok(QueryOutcome {
            status: response.status(),
            data,
        })
    }

    /// Runs the probe end to end. Request failures are reported on `err` and
    /// swallowed; only write failures on the sinks are returned.
    pub async fn run<O, E>(&self, out: &mut O, err: &mut E) -> io::Result<()>
    where
        O: Write,
        E: Write,
    {
        writeln!(
            out,
            "Testing participant query for {}...",
            self.config.participant_name
        )?;
        out.flush()?;

        match self.query().await {
            Ok(outcome) => outcome.write_report(out)?,
            Err(error) => {
                debug!(kind = ?error.kind(), status = ?error.status(), "query failed");
                writeln!(err, "{ERROR_PREFIX} {error}")?;
            }
        }

        out.flush()?;
        err.flush()
    }
}
