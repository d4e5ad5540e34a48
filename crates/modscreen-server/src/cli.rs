use crate::config::ScorerKind;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "modscreen-server")]
#[command(about = "Text toxicity scoring and PII redaction service", long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    pub config: String,

    /// Listen address
    #[arg(short, long)]
    pub listen: Option<String>,

    /// Listen port
    #[arg(short = 'P', long)]
    pub port: Option<u16>,

    /// Toxicity scorer to mount
    #[arg(short, long, value_enum)]
    pub scorer: Option<ScorerKind>,

    /// Local model checkpoint directory (skips the Hub download)
    #[arg(short, long)]
    pub model_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}
