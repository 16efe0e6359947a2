use std::fmt;

use crate::extract::Record;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Guild {
    /// `None` when the response did not carry a usable id for this guild.
    pub id: Option<u32>,
    pub name: String,
    pub description: String,
    pub leader: String,
    pub member_count: Option<u32>,
}

impl Guild {
    pub(crate) fn from_record(record: &Record) -> Self {
        Self {
            id: parse_count(record.get("id")),
            name: record.get("name").to_string(),
            description: record.get("description").to_string(),
            leader: record.get("leader").to_string(),
            member_count: parse_count(record.get("member_count")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub character_name: String,
    pub rank: String,
    pub join_date: String,
}

impl Member {
    pub(crate) fn from_record(record: &Record) -> Self {
        Self {
            character_name: record.get("character_name").to_string(),
            rank: record.get("rank").to_string(),
            join_date: record.get("join_date").to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A caller-supplied value failed validation; nothing was sent.
    InvalidArgument,
    /// Connection failure, timeout or non-success HTTP status.
    TransportError,
    /// The payload was not a well-formed SOAP envelope.
    MalformedResponse,
    /// The service answered with a SOAP Fault.
    ServerFault,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::InvalidArgument => "invalid argument",
            Self::TransportError => "transport error",
            Self::MalformedResponse => "malformed response",
            Self::ServerFault => "server fault",
        };
        f.write_str(name)
    }
}

/// Outcome of one guild operation. Failures are values, never panics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationResult {
    GuildList(Vec<Guild>),
    Guild(Guild),
    NotFound,
    MemberList(Vec<Member>),
    /// Confirmation text returned by create and join.
    Ack(String),
    Failure(ErrorKind, String),
}

impl OperationResult {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(..))
    }

    pub fn failure_kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Failure(kind, _) => Some(*kind),
            _ => None,
        }
    }
}

fn parse_count(text: &str) -> Option<u32> {
    text.trim().parse().ok()
}
