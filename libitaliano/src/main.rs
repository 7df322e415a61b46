use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tokio::io::AsyncReadExt;

use libipa_core::normalize_input;
use libitaliano::{
    italian_phonemizer, render_guide, ItalianConfig, ItalianPostProcessor, SimplifiedBuilder,
    EXAMPLE_TEXT,
};

#[derive(Parser)]
#[command(name = "libitaliano")]
#[command(about = "Italian IPA transcription with raddoppiamento fonosintattico and simplified spelling")]
#[command(version)]
struct Cli {
    /// Italian text to transcribe (read from stdin when omitted)
    text: Option<String>,

    /// Use the sample verse as input
    #[arg(long, conflicts_with = "text")]
    example: bool,

    /// Use this IPA instead of running espeak-ng
    #[arg(long)]
    ipa: Option<String>,

    /// What to print
    #[arg(short, long, value_enum, default_value_t = OutputMode::All)]
    output: OutputMode,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Leave engine output as is
    #[arg(long)]
    no_raddoppiamento: bool,

    /// Print the IPA symbol guide and exit
    #[arg(long)]
    guide: bool,

    /// Log gemination decisions
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputMode {
    Ipa,
    Simplified,
    Html,
    Json,
    All,
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "libitaliano=debug,libipa_core=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .init();
}

async fn read_input(cli: &Cli) -> anyhow::Result<String> {
    if cli.example {
        return Ok(EXAMPLE_TEXT.to_string());
    }
    if let Some(text) = &cli.text {
        return Ok(text.clone());
    }
    let mut buf = String::new();
    tokio::io::stdin()
        .read_to_string(&mut buf)
        .await
        .context("failed to read text from stdin")?;
    Ok(buf.trim().to_string())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.guide {
        print!("{}", render_guide());
        return Ok(());
    }

    let mut config = match &cli.config {
        Some(path) => ItalianConfig::load_toml(path)
            .map_err(|e| anyhow::anyhow!("failed to load config {}: {}", path.display(), e))?,
        None => ItalianConfig::default(),
    };
    if cli.no_raddoppiamento {
        config.raddoppiamento = false;
    }

    let text = normalize_input(&read_input(&cli).await?);
    if text.is_empty() {
        anyhow::bail!("no input text");
    }

    let ipa = match &cli.ipa {
        Some(ipa) => ItalianPostProcessor::from_config(&config).process(&text, ipa),
        None => italian_phonemizer(&config)
            .try_phonemize(&text)
            .await
            .context("phonemization failed")?,
    };

    let builder = SimplifiedBuilder::from_config(config.base());
    match cli.output {
        OutputMode::Ipa => println!("{}", ipa),
        OutputMode::Simplified => println!("{}", builder.build(&text, &ipa)),
        OutputMode::Html => println!("{}", builder.build_html(&text, &ipa)),
        OutputMode::Json => {
            let report = serde_json::json!({
                "text": text,
                "ipa": ipa,
                "simplified": builder.build(&text, &ipa),
                "segments": builder.segments(&text, &ipa),
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputMode::All => {
            println!("text:       {}", text);
            println!("ipa:        {}", ipa);
            println!("simplified: {}", builder.build(&text, &ipa));
            println!("html:       {}", builder.build_html(&text, &ipa));
        }
    }

    Ok(())
}
