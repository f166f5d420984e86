use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};

use gcoderender::{
    init_logging, Config, DepositRule, DrawStyle, ModelSummary, ToolpathParser, BUILD_DATE, VERSION,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input G-code file
    input: PathBuf,

    /// Configuration file (JSON or TOML); defaults to the user config if present
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Primitive topology: tubes or lines
    #[arg(long)]
    style: Option<DrawStyle>,

    /// Which extruding moves become geometry: travel-and-extrusion or extrusion-only
    #[arg(long)]
    deposit_rule: Option<DepositRule>,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
}

fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    if let Some(path) = path {
        return Config::load_from_file(path)
            .with_context(|| format!("Failed to load config: {}", path.display()));
    }

    match Config::default_path() {
        Ok(default) if default.exists() => Config::load_from_file(&default)
            .with_context(|| format!("Failed to load config: {}", default.display())),
        _ => Ok(Config::default()),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging()?;
    debug!("gcoderender {} (built {})", VERSION, BUILD_DATE);

    let mut config = load_config(cli.config.as_ref())?;
    if let Some(style) = cli.style {
        config.mesh.style = style;
    }
    if let Some(rule) = cli.deposit_rule {
        config.parser.deposit_rule = rule;
    }

    let parser = ToolpathParser::from_config(&config);
    let model = parser
        .parse_file(&cli.input)
        .with_context(|| format!("Failed to parse {}", cli.input.display()))?;
    info!(
        "Parsed {}: {} deposit segments",
        cli.input.display(),
        model.stats().deposits
    );

    let summary = match config.parser.bed_bounds {
        Some(bed) => ModelSummary::with_bed_width(&model, bed.width()),
        None => ModelSummary::from(&model),
    };
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", summary);
    }

    Ok(())
}
