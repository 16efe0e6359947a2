use tracing::{debug, instrument, warn};

use crate::{
    GuildError,
    element::Element,
    envelope::{self, Envelope, SoapFault},
    extract,
    model::{Guild, Member, OperationResult},
    operation::Operation,
    transport::{Transport, TransportError},
};

const GUILD_FIELDS: &[&str] = &["id", "description", "leader", "member_count"];
// `id` precedes `name` on the wire, so a list window never holds the right one.
const GUILD_LIST_FIELDS: &[&str] = &["description", "leader", "member_count"];
const MEMBER_FIELDS: &[&str] = &["rank", "join_date"];

/// Typed entry points to the guild service.
///
/// Every call is one independent request/response exchange and returns an
/// [`OperationResult`]; errors are folded into [`OperationResult::Failure`].
/// The client keeps no state besides the transport, so `&self` calls may run
/// in parallel when the transport allows it.
#[derive(Debug, Clone)]
pub struct GuildClient<T> {
    transport: T,
}

impl<T: Transport> GuildClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn list_guilds(&self) -> OperationResult {
        self.call(&Operation::ListGuilds)
    }

    pub fn get_guild_by_id(&self, guild_id: i64) -> OperationResult {
        self.call(&Operation::GetGuildById { guild_id })
    }

    pub fn create_guild(&self, name: &str, description: &str, leader: &str) -> OperationResult {
        self.call(&Operation::CreateGuild {
            name: name.to_string(),
            description: description.to_string(),
            leader: leader.to_string(),
        })
    }

    pub fn join_guild(&self, guild_id: i64, character_name: &str) -> OperationResult {
        self.call(&Operation::JoinGuild {
            guild_id,
            character_name: character_name.to_string(),
        })
    }

    pub fn get_guild_members(&self, guild_id: i64) -> OperationResult {
        self.call(&Operation::GetGuildMembers { guild_id })
    }

    #[instrument(
        name = "guild_client.call",
        level = "info",
        skip_all,
        fields(operation = operation.name())
    )]
    pub fn call(&self, operation: &Operation) -> OperationResult {
        match self.exchange(operation) {
            Ok(body) => route(operation, &body),
            Err(error) => {
                warn!(%error, kind = %error.kind(), "operation failed");
                OperationResult::Failure(error.kind(), error.to_string())
            }
        }
    }

    fn exchange(&self, operation: &Operation) -> Result<Element, GuildError> {
        operation.validate()?;

        let envelope = Envelope::encode(operation)?;
        debug!(
            action = envelope.action(),
            length = envelope.as_bytes().len(),
            "sending envelope"
        );

        let payload = self
            .transport
            .send(&envelope)
            .map_err(fault_or_transport_error)?;
        debug!(length = payload.len(), "received response");

        let body = envelope::decode(&payload)?;
        if let Some(fault) = SoapFault::from_body(&body) {
            return Err(GuildError::ServerFault(fault));
        }

        Ok(body)
    }
}

fn route(operation: &Operation, body: &Element) -> OperationResult {
    match operation {
        Operation::ListGuilds => OperationResult::GuildList(
            extract::extract_group(body, "name", GUILD_LIST_FIELDS)
                .iter()
                .map(Guild::from_record)
                .collect(),
        ),
        Operation::GetGuildById { .. } => extract::extract_single(body, "name", GUILD_FIELDS)
            .map_or(OperationResult::NotFound, |record| {
                OperationResult::Guild(Guild::from_record(&record))
            }),
        Operation::GetGuildMembers { .. } => OperationResult::MemberList(
            extract::extract_group(body, "character_name", MEMBER_FIELDS)
                .iter()
                .map(Member::from_record)
                .collect(),
        ),
        Operation::CreateGuild { .. } | Operation::JoinGuild { .. } => {
            OperationResult::Ack(body.text_content())
        }
    }
}

// SOAP 1.1 services answer faults with HTTP 500; the fault says more than the status.
fn fault_or_transport_error(error: TransportError) -> GuildError {
    if let TransportError::Status {
        body: Some(payload),
        ..
    } = &error
    {
        if let Some(fault) = envelope::decode(payload)
            .ok()
            .and_then(|body| SoapFault::from_body(&body))
        {
            return GuildError::ServerFault(fault);
        }
    }

    GuildError::Transport(error)
}
