//! Participant query payload and permissive access to the registration
//! envelope returned by the participants API.

use std::fmt;

use serde::Serialize;
use sonic_rs::{JsonValueTrait, Value};

use crate::document::{LastWins, last_member};

/// Path from the response root down to the participant object.
pub const PARTICIPANT_PATH: [&str; 3] = ["RegistrationData", "RegistrationSubmit", "Participant"];

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct QueryRequest {
    #[serde(rename = "participantName")]
    pub participant_name: String,
}

impl QueryRequest {
    pub fn new(participant_name: impl Into<String>) -> Self {
        Self {
            participant_name: participant_name.into(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParticipantField {
    ParticipantName,
    CompanyShortName,
    CompanyLongName,
    PhonePart1,
    PhonePart2,
    PhonePart3,
    StartDate,
}

impl ParticipantField {
    /// Print order.
    pub const ALL: [ParticipantField; 7] = [
        ParticipantField::ParticipantName,
        ParticipantField::CompanyShortName,
        ParticipantField::CompanyLongName,
        ParticipantField::PhonePart1,
        ParticipantField::PhonePart2,
        ParticipantField::PhonePart3,
        ParticipantField::StartDate,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ParticipantField::ParticipantName => "ParticipantName",
            ParticipantField::CompanyShortName => "CompanyShortName",
            ParticipantField::CompanyLongName => "CompanyLongName",
            ParticipantField::PhonePart1 => "PhonePart1",
            ParticipantField::PhonePart2 => "PhonePart2",
            ParticipantField::PhonePart3 => "PhonePart3",
            ParticipantField::StartDate => "StartDate",
        }
    }

    /// Attribute-style key as it appears in the response (`@` + label).
    pub fn key(self) -> &'static str {
        match self {
            ParticipantField::ParticipantName => "@ParticipantName",
            ParticipantField::CompanyShortName => "@CompanyShortName",
            ParticipantField::CompanyLongName => "@CompanyLongName",
            ParticipantField::PhonePart1 => "@PhonePart1",
            ParticipantField::PhonePart2 => "@PhonePart2",
            ParticipantField::PhonePart3 => "@PhonePart3",
            ParticipantField::StartDate => "@StartDate",
        }
    }
}

/// Borrowed view over the participant object of a response.
#[derive(Clone, Copy, Debug)]
pub struct Participant<'a> {
    value: &'a Value,
}

impl<'a> Participant<'a> {
    /// Walks [`PARTICIPANT_PATH`], taking the last member wherever a key
    /// repeats. Any missing step, non-object step, or a `null` participant
    /// yields `None`.
    pub fn locate(root: &'a Value) -> Option<Self> {
        let mut current = root;
        for step in PARTICIPANT_PATH {
            current = last_member(current, step)?;
        }
        if current.is_null() {
            return None;
        }
        Some(Self { value: current })
    }

    pub fn field(&self, field: ParticipantField) -> FieldValue<'a> {
        match last_member(self.value, field.key()) {
            None => FieldValue::Missing,
            Some(value) => match value.as_str() {
                Some(text) => FieldValue::Text(text),
                None => FieldValue::Other(value),
            },
        }
    }

    pub fn fields(self) -> impl Iterator<Item = (ParticipantField, FieldValue<'a>)> {
        ParticipantField::ALL
            .into_iter()
            .map(move |field| (field, self.field(field)))
    }
}

#[derive(Clone, Copy, Debug)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Other(&'a Value),
    Missing,
}

impl FieldValue<'_> {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(*text),
            _ => None,
        }
    }
}

/// Strings print raw, absent fields print `undefined`, anything else prints as
/// compact JSON.
impl fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(text) => f.write_str(text),
            FieldValue::Missing => f.write_str("undefined"),
            FieldValue::Other(value) => {
                let text = sonic_rs::to_string(&LastWins(value)).map_err(|_| fmt::Error)?;
                f.write_str(&text)
            }
        }
    }
}
