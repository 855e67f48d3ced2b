use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};

/// Tessera Anthropic schema translator
#[derive(Debug, Parser)]
#[command(name = "tessera", about = "Translate canonical LLM requests to and from Anthropic's API")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "tessera.toml", env = "TESSERA_CONFIG")]
    pub config: PathBuf,

    /// Override the configured log filter
    #[arg(long, env = "RUST_LOG")]
    pub log_filter: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the provider request for a canonical request
    ToFormat(Target),
    /// Print the canonical response for a provider response
    FromFormat(Target),
    /// Send a canonical request upstream and print the canonical response
    Complete(Target),
}

/// Model, route and input shared by every subcommand
#[derive(Debug, ClapArgs)]
pub struct Target {
    /// Model alias from the config, or a bare upstream model name
    #[arg(short, long)]
    pub model: String,

    /// Route type: llm/v1/chat, llm/v1/completions or preserve
    #[arg(short, long, default_value = "llm/v1/chat")]
    pub route: String,

    /// JSON input file; `-` reads stdin
    #[arg(short, long, default_value = "-")]
    pub input: PathBuf,
}
