use std::path::PathBuf;

use clap::{ArgAction, Parser};
use derpi::codegen::{
    self, DocumentationSource, FileSource, HttpSource, Options, Tables, TotalKey, DOCUMENTATION_URL,
};
use log::LevelFilter;
use simple_logger::SimpleLogger;

/// Generates the Derpibooru client from the API documentation page.
#[derive(Debug, Parser)]
#[command(name = "derpi-gen", version, about)]
struct Cli {
    /// Read a saved copy of the page instead of downloading it.
    #[arg(long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Page to download.
    #[arg(long, default_value = DOCUMENTATION_URL)]
    url: String,

    /// Directory receiving `models.rs` and `api.rs`.
    #[arg(long, value_name = "DIR", default_value = "generated")]
    out_dir: PathBuf,

    /// Also write the parsed schema to `schema.json`.
    #[arg(long)]
    schema: bool,

    /// Treat a `total` key next to a payload as a second payload key.
    #[arg(long)]
    reject_total: bool,

    /// Log more, repeat for parsing detail.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    SimpleLogger::new().with_level(level).init()?;

    let html = match &cli.input {
        Some(path) => FileSource::new(path).fetch().await?,
        None => HttpSource::new(&cli.url).fetch().await?,
    };

    let tables = Tables::derpibooru();
    let options = Options {
        total: if cli.reject_total {
            TotalKey::Reject
        } else {
            TotalKey::Record
        },
    };
    let schema = codegen::parse_documentation(&html, &tables, &options)?;
    let sources = codegen::render(&schema, &tables)?;

    tokio::fs::create_dir_all(&cli.out_dir).await?;
    tokio::fs::write(cli.out_dir.join("models.rs"), sources.models).await?;
    tokio::fs::write(cli.out_dir.join("api.rs"), sources.api).await?;
    if cli.schema {
        let json = serde_json::to_string_pretty(&schema)?;
        tokio::fs::write(cli.out_dir.join("schema.json"), json).await?;
    }

    log::info!(
        "wrote {} types and {} routes to {}",
        schema.types.len(),
        schema.routes.len(),
        cli.out_dir.display()
    );
    Ok(())
}
