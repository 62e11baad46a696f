// Command-line client for stdio tool servers.
//
// Spawns the server given after `--`, performs the handshake, runs one
// command and terminates the server on every exit path.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use mcp_stdio_client::{Session, SessionOptions};

#[derive(Debug, Parser)]
#[command(name = "mcp-stdio-client", version, about = "Call tools on a stdio JSON-RPC server")]
struct Cli {
    /// Milliseconds to wait for each response
    #[arg(long, env = "MCP_CLIENT_TIMEOUT_MS", default_value_t = 1000)]
    timeout_ms: u64,

    /// Client name sent in the handshake
    #[arg(long, default_value = env!("CARGO_PKG_NAME"))]
    client_name: String,

    /// Working directory for the server process
    #[arg(long)]
    cwd: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the server's tool descriptors
    ListTools {
        /// Server command and its arguments
        #[arg(last = true, required = true)]
        server: Vec<String>,
    },
    /// Call one tool and print its raw result
    Call {
        /// Tool name
        tool: String,

        /// Tool arguments as a JSON object
        #[arg(long, default_value = "{}")]
        args: String,

        /// Server command and its arguments
        #[arg(last = true, required = true)]
        server: Vec<String>,
    },
}

impl Command {
    fn server(&self) -> &[String] {
        match self {
            Self::ListTools { server } | Self::Call { server, .. } => server,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let Some((program, args)) = cli.command.server().split_first() else {
        bail!("missing server command after `--`");
    };

    let mut builder = SessionOptions::builder(program)
        .args(args.iter().cloned())
        .response_timeout(Duration::from_millis(cli.timeout_ms))
        .client_info(cli.client_name.clone(), mcp_stdio_client::VERSION);
    if let Some(ref cwd) = cli.cwd {
        builder = builder.cwd(cwd);
    }

    let mut session = Session::connect(builder.build())
        .await
        .with_context(|| format!("failed to start session with `{program}`"))?;

    let outcome = run(&mut session, &cli.command).await;

    if let Err(e) = session.terminate() {
        log::warn!("Failed to terminate server: {e}");
    }

    let output = outcome?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

async fn run(session: &mut Session, command: &Command) -> Result<serde_json::Value> {
    match command {
        Command::ListTools { .. } => {
            let tools = session.list_tools().await.context("tools/list failed")?;
            Ok(serde_json::to_value(tools)?)
        }
        Command::Call { tool, args, .. } => {
            let args: serde_json::Value =
                serde_json::from_str(args).context("--args is not valid JSON")?;
            session
                .call_tool(tool.as_str(), args)
                .await
                .with_context(|| format!("tools/call {tool} failed"))
        }
    }
}
