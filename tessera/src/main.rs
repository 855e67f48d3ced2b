#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod args;

use std::io::{Read, Write};
use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use args::{Args, Command};
use clap::Parser;
use tessera_config::Config;
use tessera_core::ErrorBody;
use tessera_llm::{AnthropicDriver, DriverError, TransformError, from_format, to_format};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    let config = Config::load(&args.config)?;

    tessera_telemetry::init(&config.telemetry, args.log_filter.as_deref())?;

    tracing::debug!(config_path = %args.config.display(), "configuration loaded");

    let output = match run(&config, args.command).await {
        Ok(output) => output,
        Err(Failure::Http(error)) => {
            eprintln!("{}", ErrorBody::from_error(&error).to_json());
            return Ok(ExitCode::FAILURE);
        }
        Err(Failure::Other(error)) => return Err(error),
    };

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(&output)?;
    stdout.write_all(b"\n")?;

    Ok(ExitCode::SUCCESS)
}

/// Failure of a subcommand
enum Failure {
    /// Gateway error, reported as a JSON error envelope
    Http(DriverError),
    /// Local failure such as unreadable input
    Other(anyhow::Error),
}

impl From<DriverError> for Failure {
    fn from(error: DriverError) -> Self {
        Self::Http(error)
    }
}

impl From<TransformError> for Failure {
    fn from(error: TransformError) -> Self {
        Self::Http(error.into())
    }
}

async fn run(config: &Config, command: Command) -> Result<Vec<u8>, Failure> {
    match command {
        Command::ToFormat(target) => {
            let model = config.model(&target.model);
            let request = read_input(&target.input).map_err(Failure::Other)?;
            let outbound = to_format(&request, &model, &target.route)?;
            outbound
                .to_body()
                .context("failed to encode provider request")
                .map_err(Failure::Other)
        }
        Command::FromFormat(target) => {
            let model = config.model(&target.model);
            let body = read_input(&target.input).map_err(Failure::Other)?;
            Ok(from_format(&body, &model, &target.route)?)
        }
        Command::Complete(target) => {
            let model = config.model(&target.model);
            let request = read_input(&target.input).map_err(Failure::Other)?;
            let driver = AnthropicDriver::new(&config.provider)?;
            Ok(driver.subrequest(&request, &model, &target.route).await?)
        }
    }
}

fn read_input(path: &Path) -> anyhow::Result<Vec<u8>> {
    if path == Path::new("-") {
        let mut buf = Vec::new();
        std::io::stdin().read_to_end(&mut buf).context("failed to read stdin")?;
        return Ok(buf);
    }

    std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))
}
