//! Veracity CLI - command-line front end for the claim-assessment pipeline.

use clap::Parser;
use std::io::Read;
use tracing_subscriber::EnvFilter;
use veracity_cli::{providers, AnalyzeArgs, Cli, CliError, Command, Formatter, PresetArg};
use veracity_domain::CancelToken;
use veracity_pipeline::{Pipeline, PipelineConfig};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> veracity_cli::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let formatter = Formatter::new(cli.format, !cli.no_color);

    match cli.command {
        Command::DefaultConfig => {
            let toml = PipelineConfig::default()
                .to_toml()
                .map_err(CliError::Config)?;
            println!("{}", toml);
        }
        Command::Analyze(args) => {
            analyze(args, &formatter).await?;
        }
    }

    Ok(())
}

async fn analyze(args: AnalyzeArgs, formatter: &Formatter) -> veracity_cli::Result<()> {
    let input = read_input(&args.input)?;
    if input.trim().is_empty() {
        return Err(CliError::InvalidInput("input text is empty".to_string()));
    }

    let config = load_config(&args)?;
    let capabilities = providers::build_capabilities(
        args.endpoint.as_deref(),
        &args.model,
        args.search_endpoint.as_deref(),
    );

    let pipeline = Pipeline::new(capabilities, config)?;

    // Ctrl-C degrades the job to a partial result instead of killing it
    let cancel = CancelToken::new();
    let watcher = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        })
    };

    let result = pipeline.analyze(&input, &cancel).await?;
    watcher.abort();

    println!("{}", formatter.format_result(&result)?);
    Ok(())
}

fn read_input(path: &str) -> veracity_cli::Result<String> {
    if path == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(std::fs::read_to_string(path)?)
    }
}

fn load_config(args: &AnalyzeArgs) -> veracity_cli::Result<PipelineConfig> {
    if let Some(path) = &args.config {
        let raw = std::fs::read_to_string(path)?;
        return PipelineConfig::from_toml(&raw).map_err(CliError::Config);
    }

    Ok(match args.preset {
        Some(PresetArg::Fast) => PipelineConfig::fast(),
        Some(PresetArg::Thorough) => PipelineConfig::thorough(),
        Some(PresetArg::Default) | None => PipelineConfig::default(),
    })
}
