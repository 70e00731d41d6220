mod console_client;

use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tagall_config::load as load_config;
use tagall_permissions::{CommandOutcome, InboundMessage, TagallService};
use tagall_runtime::{shutdown_signal, telemetry, TagallServices};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use console_client::ConsoleChatClient;

#[derive(Parser)]
#[command(name = "tagall-console")]
#[command(about = "Simulate a group chat and run .tagall commands against the permission store")]
struct Cli {
    /// Identifier of the simulated group
    #[arg(long, default_value = "120363000000000000@g.us")]
    chat: String,

    /// Group admins (comma separated)
    #[arg(long, value_delimiter = ',')]
    admins: Vec<String>,

    /// Regular members (comma separated)
    #[arg(long, value_delimiter = ',')]
    members: Vec<String>,

    /// Simulate a group where the bot has not been made admin
    #[arg(long)]
    bot_not_admin: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Send one message as the given account
    Exec {
        /// Account sending the message
        #[arg(long = "as")]
        actor: String,
        /// Message text, e.g. `.tagall global on`
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, required = true)]
        text: Vec<String>,
    },
    /// Start interactive console (default)
    Console,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    telemetry::init_tracing().context("failed to initialise tracing")?;

    let config = load_config().context("failed to load configuration")?;
    let services = TagallServices::initialise(&config)
        .await
        .context("failed to initialise tagall services")?;

    let client = Arc::new(ConsoleChatClient::new(
        cli.chat.clone(),
        cli.admins.clone(),
        cli.members.clone(),
        !cli.bot_not_admin,
    ));
    let service = services.tagall_service(client.clone());

    match cli.command.unwrap_or(Commands::Console) {
        Commands::Exec { actor, text } => {
            let message = InboundMessage::new(&cli.chat, actor, "cli-1", text.join(" "));
            run_once(&service, &message).await;
            Ok(())
        }
        Commands::Console => run_console(&service, &client).await,
    }
}

async fn run_once(service: &TagallService, message: &InboundMessage) {
    match service.handle(message).await {
        Some(outcome) => report(&outcome),
        None => println!("(not a .tagall command, ignored)"),
    }
}

fn report(outcome: &CommandOutcome) {
    match outcome {
        CommandOutcome::Refused(error) => println!("=> refused: {error}"),
        other => println!("=> {other:?}"),
    }
}

async fn run_console(service: &TagallService, client: &ConsoleChatClient) -> anyhow::Result<()> {
    info!(chat_id = client.chat_id(), "starting interactive console");

    println!("Tagall Console - group {}", client.chat_id());
    println!("Type '<account> <message>' to post, e.g. 'alice .tagall on'");
    println!("Use '/help' for more, Ctrl+C or '/quit' to exit");
    println!("---");

    let stdin = tokio::io::stdin();
    let mut reader = BufReader::new(stdin);
    let mut line = String::new();
    let mut sequence: u64 = 0;

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        print!("> ");
        std::io::Write::flush(&mut std::io::stdout())?;

        line.clear();
        let bytes_read = tokio::select! {
            read = reader.read_line(&mut line) => read?,
            _ = &mut shutdown => break,
        };
        if bytes_read == 0 {
            break; // EOF
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match input {
            "/quit" | "/exit" | "/q" => {
                println!("Goodbye!");
                break;
            }
            "/help" | "/h" => {
                println!("Available commands:");
                println!("  <account> <message>  - Post a message as <account>");
                println!("  /members, /m         - List group participants");
                println!("  /status, /s          - Show the stored policy for this group");
                println!("  /quit, /exit, /q     - Exit console");
                println!("Tagall commands:");
                println!("  .tagall                   - Mention everyone");
                println!("  .tagall on|off|status     - Group setting (admins)");
                println!("  .tagall global on|off     - Global override (owner)");
                println!("  .tagall global status     - Show global override");
            }
            "/members" | "/m" => {
                for participant in client.participants() {
                    println!("  {}", participant.id);
                }
            }
            "/status" | "/s" => {
                let state = service.policy_state(client.chat_id()).await;
                println!("  policy: {state:?}");
            }
            _ => {
                let Some((actor, text)) = input.split_once(char::is_whitespace) else {
                    println!("Expected '<account> <message>', see /help");
                    continue;
                };

                sequence += 1;
                let message = InboundMessage::new(
                    client.chat_id(),
                    actor,
                    format!("console-{sequence}"),
                    text.trim(),
                );
                run_once(service, &message).await;
            }
        }
    }

    info!("console closed");
    Ok(())
}
