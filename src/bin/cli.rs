use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use cloudposture::config::{Config, CONFIG_FILE};
use cloudposture::error::PostureError;
use cloudposture::ontology::{registry, FieldDescriptor};
use cloudposture::output::OutputFormat;
use cloudposture::CollectOptions;

#[derive(Parser)]
#[command(
    name = "cloudposture",
    about = "Cloud security posture ontology: project discovered resources and their relationships",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Project exported resources into canonical maps, evidence and a graph
    Collect {
        /// Path to a JSON export or a directory of them
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Config file path
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,

        /// Output format (console, json, compact)
        #[arg(long, short = 'f', default_value = "console")]
        format: String,

        /// Cloud service the resources belong to
        #[arg(long, env = "CLOUDPOSTURE_CLOUD_SERVICE_ID")]
        cloud_service_id: Option<String>,

        /// Write output to file instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// List all registered resource types
    Types {
        /// Output format (table, json)
        #[arg(long, short = 'f', default_value = "table")]
        format: String,
    },

    /// Generate a starter .cloudposture.toml config file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Collect {
            path,
            config,
            format,
            cloud_service_id,
            output,
        } => cmd_collect(path, config, format, cloud_service_id, output),
        Commands::Types { format } => cmd_types(format),
        Commands::Init { force } => cmd_init(force),
    };

    match result {
        Ok(exit_code) => process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(e.exit_code());
        }
    }
}

fn cmd_collect(
    path: PathBuf,
    config: Option<PathBuf>,
    format_str: String,
    cloud_service_id: Option<String>,
    output_path: Option<PathBuf>,
) -> Result<i32, PostureError> {
    let format = OutputFormat::from_str_lenient(&format_str).unwrap_or_else(|| {
        eprintln!("Warning: unknown format '{}', using console", format_str);
        OutputFormat::Console
    });

    let options = CollectOptions {
        config_path: config,
        format,
        cloud_service_id_override: cloud_service_id,
    };

    let report = cloudposture::collect(&path, &options)?;
    let rendered = cloudposture::render_report(&report, format)?;

    match output_path {
        Some(out) => std::fs::write(&out, &rendered)?,
        None => print!("{}", rendered),
    }

    // Exit code: 0 = all projected, 1 = some resources failed
    Ok(report.exit_code())
}

#[derive(Serialize)]
struct TypeInfo {
    name: &'static str,
    types: &'static [&'static str],
    fields: &'static [FieldDescriptor],
}

fn cmd_types(format_str: String) -> Result<i32, PostureError> {
    let types: Vec<TypeInfo> = registry()
        .iter()
        .map(|d| TypeInfo {
            name: d.name,
            types: d.type_names,
            fields: d.fields,
        })
        .collect();

    match format_str.as_str() {
        "json" => {
            let json = serde_json::to_string_pretty(&types)?;
            println!("{}", json);
        }
        _ => {
            println!("{:<28} {:<8} TYPE CHAIN", "NAME", "FIELDS");
            println!("{}", "-".repeat(80));
            for t in &types {
                println!("{:<28} {:<8} {}", t.name, t.fields.len(), t.types.join(" > "));
            }
        }
    }

    Ok(0)
}

fn cmd_init(force: bool) -> Result<i32, PostureError> {
    let path = PathBuf::from(CONFIG_FILE);

    if path.exists() && !force {
        eprintln!("{} already exists. Use --force to overwrite.", CONFIG_FILE);
        return Ok(1);
    }

    std::fs::write(&path, Config::starter_toml())?;
    println!("Created {}", CONFIG_FILE);

    Ok(0)
}
