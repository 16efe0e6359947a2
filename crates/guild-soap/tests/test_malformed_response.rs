//! Failure paths: bad input, broken payloads and transport errors all come
//! back as `OperationResult::Failure` values.

mod common;

use common::RecordingTransport;
use guild_soap::{ErrorKind, GuildClient, Operation, OperationResult, TransportError};

fn every_operation() -> Vec<Operation> {
    vec![
        Operation::ListGuilds,
        Operation::GetGuildById { guild_id: 1 },
        Operation::CreateGuild {
            name: "Darkwraiths".into(),
            description: "Servants of Kaathe".into(),
            leader: "Kaathe".into(),
        },
        Operation::JoinGuild {
            guild_id: 1,
            character_name: "Sif".into(),
        },
        Operation::GetGuildMembers { guild_id: 1 },
    ]
}

fn assert_every_operation_fails_with(transport: &RecordingTransport, kind: ErrorKind) {
    let client = GuildClient::new(transport);
    for operation in every_operation() {
        let result = client.call(&operation);
        assert_eq!(
            result.failure_kind(),
            Some(kind),
            "{} returned {result:?}",
            operation.name()
        );
    }
}

#[test]
fn test_unbalanced_tags_are_malformed_for_every_operation() {
    let transport = RecordingTransport::replying_fixture("malformed/unbalanced.xml");
    assert_every_operation_fails_with(&transport, ErrorKind::MalformedResponse);
    assert_eq!(transport.calls(), 5);
}

#[test]
fn test_truncated_payload_is_malformed() {
    let transport = RecordingTransport::replying_fixture("malformed/truncated.xml");
    assert_every_operation_fails_with(&transport, ErrorKind::MalformedResponse);
}

#[test]
fn test_envelope_without_body_is_malformed() {
    let transport = RecordingTransport::replying_fixture("malformed/missing_body.xml");
    assert_every_operation_fails_with(&transport, ErrorKind::MalformedResponse);
}

#[test]
fn test_non_xml_payloads_are_malformed() {
    for payload in [
        Vec::new(),
        b"Internal Server Error".to_vec(),
        b"<name>Gwyn</name>".to_vec(),
        vec![0xff, 0xfe, 0x00],
    ] {
        let transport = RecordingTransport::replying(payload);
        assert_every_operation_fails_with(&transport, ErrorKind::MalformedResponse);
    }
}

#[test]
fn test_negative_guild_id_never_reaches_the_transport() {
    let transport = RecordingTransport::replying_fixture("join_guild_response.xml");
    let client = GuildClient::new(&transport);

    let result = client.join_guild(-1, "Sif");

    assert_eq!(result.failure_kind(), Some(ErrorKind::InvalidArgument));
    assert_eq!(transport.calls(), 0);
}

#[test]
fn test_invalid_arguments_never_reach_the_transport() {
    let transport = RecordingTransport::replying_fixture("join_guild_response.xml");
    let client = GuildClient::new(&transport);

    let results = [
        client.get_guild_by_id(-5),
        client.get_guild_members(-1),
        client.join_guild(1, ""),
        client.create_guild("", "no name", "Gwyn"),
        client.create_guild("Nameless", "no leader", "  "),
        client.create_guild("a\u{1}b", "control character", "Gwyn"),
        client.create_guild("Bell Keepers", "rings\u{7}", "Gwyn"),
        client.join_guild(1, "Sif\u{FFFF}"),
    ];

    for result in &results {
        assert_eq!(result.failure_kind(), Some(ErrorKind::InvalidArgument), "{result:?}");
    }
    assert_eq!(transport.calls(), 0);
}

#[test]
#[tracing_test::traced_test]
fn test_connection_failure_is_transport_error() {
    let transport =
        RecordingTransport::failing(TransportError::Connection("connection refused".into()));
    assert_every_operation_fails_with(&transport, ErrorKind::TransportError);

    let client = GuildClient::new(&transport);
    assert_eq!(
        client.list_guilds(),
        OperationResult::Failure(
            ErrorKind::TransportError,
            "Transport error: connection failed: connection refused".into()
        )
    );
    assert!(logs_contain("transport error"));
}

#[test]
fn test_timeout_is_transport_error() {
    let transport = RecordingTransport::failing(TransportError::Timeout("read timed out".into()));
    assert_every_operation_fails_with(&transport, ErrorKind::TransportError);
}

#[test]
fn test_http_500_with_fault_body_is_server_fault() {
    let transport = RecordingTransport::failing(TransportError::Status {
        status: 500,
        body: Some(common::fixture("fault_guild_not_found.xml")),
    });
    let client = GuildClient::new(&transport);

    assert_eq!(
        client.get_guild_members(99).failure_kind(),
        Some(ErrorKind::ServerFault)
    );
}

#[test]
fn test_http_error_without_body_is_transport_error() {
    let transport = RecordingTransport::failing(TransportError::Status {
        status: 503,
        body: None,
    });
    assert_every_operation_fails_with(&transport, ErrorKind::TransportError);
}
