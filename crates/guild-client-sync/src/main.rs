mod config;
mod http_client;

use clap::Parser;
use guild_soap::{Guild, GuildClient, Member, OperationResult, Transport};
use tracing::{error, info, instrument};

use config::{create_transport_config, init_logging, Args, Command};
use http_client::UreqTransport;

#[instrument(name = "main", level = "info")]
fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Without logging there is nowhere to report failures but stderr.
    let _log_guard = match init_logging(args.verbose) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run_app(&args) {
        error!("Application failed to run: {:?}", e);
        return Err(e);
    }

    Ok(())
}

/// The main application logic, extracted to a separate function.
fn run_app(args: &Args) -> anyhow::Result<()> {
    info!(endpoint = %args.endpoint, "Starting guild SOAP client (Synchronous)");

    let transport = UreqTransport::new(create_transport_config(args)?)?;
    let client = GuildClient::new(transport);

    let result = run_command(&client, &args.command);
    if result.is_failure() {
        anyhow::bail!("{}", render(&result).trim_end());
    }

    print!("{}", render(&result));
    Ok(())
}

fn run_command<T: Transport>(client: &GuildClient<T>, command: &Command) -> OperationResult {
    match command {
        Command::List => client.list_guilds(),
        Command::Get { guild_id } => client.get_guild_by_id(*guild_id),
        Command::Create {
            name,
            description,
            leader,
        } => client.create_guild(name, description, leader),
        Command::Join {
            guild_id,
            character_name,
        } => client.join_guild(*guild_id, character_name),
        Command::Members { guild_id } => client.get_guild_members(*guild_id),
    }
}

fn render(result: &OperationResult) -> String {
    match result {
        OperationResult::GuildList(guilds) if guilds.is_empty() => "No guilds found.\n".to_string(),
        OperationResult::GuildList(guilds) => guilds.iter().map(render_guild_line).collect(),
        OperationResult::Guild(guild) => render_guild(guild),
        OperationResult::NotFound => "Guild not found.\n".to_string(),
        OperationResult::MemberList(members) if members.is_empty() => {
            "No members found.\n".to_string()
        }
        OperationResult::MemberList(members) => members.iter().map(render_member).collect(),
        OperationResult::Ack(text) => format!("{text}\n"),
        OperationResult::Failure(kind, detail) => format!("{kind}: {detail}\n"),
    }
}

fn render_guild_line(guild: &Guild) -> String {
    match guild.member_count {
        Some(count) => format!("{} (led by {}, {count} members)\n", guild.name, guild.leader),
        None => format!("{} (led by {})\n", guild.name, guild.leader),
    }
}

fn render_guild(guild: &Guild) -> String {
    let or_unknown = |value: Option<u32>| value.map_or_else(|| "?".to_string(), |v| v.to_string());
    format!(
        "id:          {}\nname:        {}\ndescription: {}\nleader:      {}\nmembers:     {}\n",
        or_unknown(guild.id),
        guild.name,
        guild.description,
        guild.leader,
        or_unknown(guild.member_count),
    )
}

fn render_member(member: &Member) -> String {
    format!(
        "{} ({}) since {}\n",
        member.character_name, member.rank, member.join_date
    )
}
