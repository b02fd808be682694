//! CleanKit CLI - extract and clean web content from the command line

mod mcp;
mod server;

use clap::{Args, Parser, Subcommand, ValueEnum};
use cleankit::{CleanConfig, CleanRequest, ExtractRequest, ExtractResponse, Tool, TOOL_LLMTXT};
use std::io::{self, Write};
use std::net::SocketAddr;
use tracing_subscriber::EnvFilter;

/// Output format for extract subcommand
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum OutputFormat {
    /// Cleaned text with YAML frontmatter
    #[default]
    Md,
    /// JSON format
    Json,
}

/// Output format for clean subcommand
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum CleanOutput {
    /// Cleaned text only
    #[default]
    Text,
    /// JSON with token estimate
    Json,
}

/// CleanKit - compact, boilerplate-free page text for LLMs
#[derive(Parser, Debug)]
#[command(name = "cleankit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Print full help with examples (llmtxt)
    #[arg(long)]
    llmtxt: bool,
}

/// Overrides for the cleaning rules
#[derive(Args, Debug, Clone, Default)]
struct CleanArgs {
    /// Minimum characters per kept line
    #[arg(long)]
    min_chars: Option<usize>,

    /// Minimum words per kept line
    #[arg(long)]
    min_words: Option<usize>,

    /// Word budget for the output
    #[arg(long)]
    max_words: Option<usize>,

    /// Extra boilerplate phrase (repeatable, added to the defaults)
    #[arg(long = "deny", value_name = "PHRASE")]
    deny: Vec<String>,
}

impl CleanArgs {
    fn to_config(&self) -> CleanConfig {
        let mut config = CleanConfig::default();
        if let Some(min_chars) = self.min_chars {
            config = config.min_chars(min_chars);
        }
        if let Some(min_words) = self.min_words {
            config = config.min_words(min_words);
        }
        if let Some(max_words) = self.max_words {
            config = config.max_words(max_words);
        }
        for phrase in &self.deny {
            config = config.deny(phrase.clone());
        }
        config
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run as MCP (Model Context Protocol) server over stdio
    Mcp {
        #[command(flatten)]
        clean: CleanArgs,
    },
    /// Fetch URL and print its cleaned paragraph text
    Extract {
        /// URL to fetch
        url: String,

        /// Output format
        #[arg(long, short, default_value = "md")]
        output: OutputFormat,

        /// Custom User-Agent
        #[arg(long)]
        user_agent: Option<String>,

        #[command(flatten)]
        clean: CleanArgs,
    },
    /// Clean raw text read from stdin, one candidate line per line
    Clean {
        /// Output format
        #[arg(long, short, default_value = "text")]
        output: CleanOutput,

        #[command(flatten)]
        clean: CleanArgs,
    },
    /// Serve GET /extract over HTTP
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "0.0.0.0:8080")]
        addr: SocketAddr,

        /// API key callers must pass as the `key` query parameter
        #[arg(long, env = "CLEANKIT_API_KEY", hide_env_values = true)]
        api_key: String,

        /// Custom User-Agent
        #[arg(long)]
        user_agent: Option<String>,

        #[command(flatten)]
        clean: CleanArgs,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Handle --llmtxt flag
    if cli.llmtxt {
        writeln_safe(TOOL_LLMTXT);
        std::process::exit(0);
    }

    match cli.command {
        Some(Commands::Mcp { clean }) => {
            init_tracing("warn");
            let tool = build_tool(None, &clean);
            mcp::run_server(tool).await;
        }
        Some(Commands::Extract {
            url,
            output,
            user_agent,
            clean,
        }) => {
            init_tracing("warn");
            run_extract(&url, output, build_tool(user_agent, &clean)).await;
        }
        Some(Commands::Clean { output, clean }) => {
            init_tracing("warn");
            run_clean(output, build_tool(None, &clean));
        }
        Some(Commands::Serve {
            addr,
            api_key,
            user_agent,
            clean,
        }) => {
            init_tracing("info");
            if api_key.trim().is_empty() {
                eprintln!("Error: API key must not be empty");
                std::process::exit(1);
            }
            let state = server::AppState::new(build_tool(user_agent, &clean), api_key);
            if let Err(e) = server::run(addr, state).await {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        None => {
            eprintln!("Usage: cleankit extract <URL>");
            eprintln!("   or: cleankit clean < page.txt");
            eprintln!("   or: cleankit serve --api-key <KEY>");
            eprintln!("   or: cleankit mcp");
            eprintln!("   or: cleankit --help");
            std::process::exit(1);
        }
    }
}

/// Log to stderr so stdout stays reserved for results
fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn build_tool(user_agent: Option<String>, clean: &CleanArgs) -> Tool {
    let mut builder = Tool::builder().clean_config(clean.to_config());

    if let Some(ua) = user_agent {
        builder = builder.user_agent(ua);
    }

    builder.build()
}

async fn run_extract(url: &str, output: OutputFormat, tool: Tool) {
    match tool.execute(ExtractRequest::new(url)).await {
        Ok(response) => match output {
            OutputFormat::Md => writeln_safe(&format_md_with_frontmatter(&response)),
            OutputFormat::Json => writeln_safe(&to_json_or_exit(&response)),
        },
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn run_clean(output: CleanOutput, tool: Tool) {
    let text = match io::read_to_string(io::stdin()) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Error reading stdin: {}", e);
            std::process::exit(1);
        }
    };

    let response = tool.clean_text(CleanRequest { text });
    match output {
        CleanOutput::Text => writeln_safe(&response.clean_text),
        CleanOutput::Json => writeln_safe(&to_json_or_exit(&response)),
    }
}

fn to_json_or_exit<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| {
        eprintln!("Error serializing response: {}", e);
        std::process::exit(1);
    })
}

/// Format response as cleaned text with YAML frontmatter
fn format_md_with_frontmatter(response: &ExtractResponse) -> String {
    let mut output = String::new();

    output.push_str("---\n");
    output.push_str(&format!("url: {}\n", response.url));
    output.push_str(&format!("status_code: {}\n", response.status_code));
    if !response.title.is_empty() {
        output.push_str(&format!("title: {}\n", response.title));
    }
    output.push_str(&format!("tokens_estimate: {}\n", response.tokens_estimate));
    if response.truncated == Some(true) {
        output.push_str("truncated: true\n");
    }
    output.push_str("---\n");
    output.push_str(&response.clean_text);

    output
}

/// Write to stdout, exit silently on broken pipe
fn writeln_safe(s: &str) {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if let Err(e) = writeln!(handle, "{}", s) {
        if e.kind() == io::ErrorKind::BrokenPipe {
            std::process::exit(0);
        }
        eprintln!("Error writing to stdout: {}", e);
        std::process::exit(1);
    }
}
