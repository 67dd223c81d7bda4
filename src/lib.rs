//! Console probe for the participants query API, built on a small reqwest
//! wrapper with an in-memory mock transport for deterministic tests.

pub mod adapter;
pub mod config;
pub mod document;
pub mod mock;
pub mod participant;
pub mod runner;

pub use reqwest::Method;

pub use adapter::{
    Client, ReqwestTransport, RestBytes, RestError, RestErrorKind, RestFuture, RestRequest,
    RestResponse, RestResult, RestTransport,
};
pub use config::{DEFAULT_ENDPOINT, DEFAULT_PARTICIPANT, ProbeConfig};
pub use document::{LastWins, last_member};
pub use mock::{MockBehavior, MockResponse, MockRestAdapter, MockRestStateSnapshot};
pub use participant::{FieldValue, Participant, ParticipantField, QueryRequest};
pub use runner::{QueryOutcome, QueryRunner};
