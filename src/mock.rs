use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use bytes::Bytes;
use serde::Serialize;
use sonic_rs::to_vec;

use super::adapter::{
    RestBytes, RestError, RestErrorKind, RestFuture, RestRequest, RestResponse, RestResult,
    RestTransport,
};

/// Failure injected in place of the next queued response.
#[derive(Clone, Debug)]
pub enum MockBehavior {
    ConnectError { reason: String },
    SendError { reason: String },
    ReceiveError { status: Option<u16>, reason: String },
    TimeoutError { reason: String },
    InternalError { reason: String },
}

impl MockBehavior {
    pub fn connect_error(reason: impl Into<String>) -> Self {
        Self::ConnectError {
            reason: reason.into(),
        }
    }

    pub fn send_error(reason: impl Into<String>) -> Self {
        Self::SendError {
            reason: reason.into(),
        }
    }

    pub fn receive_error(reason: impl Into<String>, status: Option<u16>) -> Self {
        Self::ReceiveError {
            status,
            reason: reason.into(),
        }
    }

    pub fn timeout_error(reason: impl Into<String>) -> Self {
        Self::TimeoutError {
            reason: reason.into(),
        }
    }

    pub fn internal_error(reason: impl Into<String>) -> Self {
        Self::InternalError {
            reason: reason.into(),
        }
    }

    fn into_error(self) -> RestError {
        match self {
            Self::ConnectError { reason } => RestError::connect(reason),
            Self::SendError { reason } => RestError::send(reason),
            Self::ReceiveError { status, reason } => RestError::receive(reason, status),
            Self::TimeoutError { reason } => RestError::timeout(reason),
            Self::InternalError { reason } => RestError::internal(reason),
        }
    }
}

#[derive(Clone, Debug)]
pub struct MockResponse {
    pub status: u16,
    pub body: RestBytes,
}

impl MockResponse {
    pub fn new(status: u16, body: impl Into<RestBytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn text(status: u16, body: impl Into<String>) -> Self {
        Self::new(status, body.into())
    }

    pub fn json<T: Serialize>(status: u16, payload: &T) -> RestResult<Self> {
        Ok(Self::new(status, to_vec(payload)?))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MockRestStateSnapshot {
    pub request_count: usize,
    pub last_error: Option<RestErrorKind>,
}

#[derive(Debug, Default)]
struct MockRestAdapterState {
    request_count: usize,
    last_error: Option<RestErrorKind>,
    failures: VecDeque<MockBehavior>,
    responses: VecDeque<MockResponse>,
    outbound_log: Vec<RestRequest>,
}

/// In-memory transport: answers from queued responses, records every request
/// it sees, and fails while injected failures remain.
#[derive(Clone, Debug, Default)]
pub struct MockRestAdapter {
    state: Arc<Mutex<MockRestAdapterState>>,
}

impl MockRestAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_with(behavior: MockBehavior) -> Self {
        let adapter = Self::new();
        adapter.queue_failure(behavior);
        adapter
    }

    pub fn queue_failure(&self, behavior: MockBehavior) {
        self.state
            .lock()
            .expect("mock transport mutex poisoned while queueing failure")
            .failures
            .push_back(behavior);
    }

    pub fn queue_response(&self, response: MockResponse) {
        self.state
            .lock()
            .expect("mock transport mutex poisoned while queueing response")
            .responses
            .push_back(response);
    }

    pub fn snapshot(&self) -> MockRestStateSnapshot {
        let state = self
            .state
            .lock()
            .expect("mock transport mutex poisoned while taking snapshot");
        MockRestStateSnapshot {
            request_count: state.request_count,
            last_error: state.last_error,
        }
    }

    pub fn outbound_requests(&self) -> Vec<RestRequest> {
        self.state
            .lock()
            .expect("mock transport mutex poisoned while reading outbound log")
            .outbound_log
            .clone()
    }
}

impl RestTransport for MockRestAdapter {
    fn execute(&self, request: RestRequest) -> RestFuture<RestResult<RestResponse>> {
        let adapter = self.clone();
        Box::pin(async move {
            let mut state = adapter
                .state
                .lock()
                .expect("mock transport mutex poisoned while executing request");
            state.request_count += 1;
            state.outbound_log.push(request);

            if let Some(behavior) = state.failures.pop_front() {
                let error = behavior.into_error();
                state.last_error = Some(error.kind());
                return Err(error);
            }
            state.last_error = None;

            // An empty queue answers 200 with an empty body.
            let response = state
                .responses
                .pop_front()
                .unwrap_or_else(|| MockResponse::new(200, Bytes::new()));
            Ok(RestResponse {
                status: response.status,
                body: response.body,
            })
        })
    }
}
