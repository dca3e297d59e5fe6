//! Skuload CLI - regroup product-export CSV into inventory items
//!
//! # Main Command
//!
//! ```bash
//! skuload transform products.csv                 # writes transformed_data.csv
//! skuload transform products.csv -o - --tags Sale  # CSV to stdout
//! ```
//!
//! # Debug Commands
//!
//! ```bash
//! skuload parse products.csv     # Parsed rows as JSON
//! skuload group products.csv     # Item groups as JSON
//! ```
//!
//! Settings default to the built-in values, then `SKULOAD_*` environment
//! variables (a `.env` file is read), then command-line flags.

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use serde_json::json;
use skuload::{
    decode_bytes_auto, group_by_base_sku, parse, transform_file, Config, LogLevel, TransformLog,
};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Download name used by the upload form.
const DEFAULT_OUTPUT: &str = "transformed_data.csv";

#[derive(Parser)]
#[command(name = "skuload")]
#[command(about = "Regroup product-export CSV rows into variant-grouped inventory items", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Transform a product export into the inventory format
    Transform {
        /// Input CSV file
        input: PathBuf,

        /// Output CSV file ("-" for stdout)
        #[arg(short, long, default_value = DEFAULT_OUTPUT)]
        output: PathBuf,

        /// Write a JSON report (input info and every log entry)
        #[arg(long)]
        report: Option<PathBuf>,

        #[command(flatten)]
        settings: SettingsArgs,
    },

    /// Parse a CSV file and output its rows as JSON
    Parse {
        /// Input CSV file
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Group rows by base SKU and output the groups as JSON
    Group {
        /// Input CSV file
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Overrides for the values copied into every output row.
#[derive(Args)]
struct SettingsArgs {
    /// Min Level column value
    #[arg(long)]
    min_level: Option<String>,

    /// Tags column value
    #[arg(long)]
    tags: Option<String>,

    /// Primary Folder column value
    #[arg(long)]
    primary_folder: Option<String>,

    /// Subfolder-level1 column value
    #[arg(long)]
    subfolder_level1: Option<String>,

    /// Subfolder-level2 column value
    #[arg(long)]
    subfolder_level2: Option<String>,
}

impl SettingsArgs {
    fn apply(self, config: &mut Config) {
        let overrides = [
            (self.min_level, &mut config.min_level),
            (self.tags, &mut config.tags),
            (self.primary_folder, &mut config.primary_folder),
            (self.subfolder_level1, &mut config.subfolder_level1),
            (self.subfolder_level2, &mut config.subfolder_level2),
        ];
        for (value, slot) in overrides {
            if let Some(v) = value {
                *slot = v;
            }
        }
    }
}

fn init_tracing(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Transform {
            input,
            output,
            report,
            settings,
        } => cmd_transform(&input, &output, report.as_deref(), settings),

        Commands::Parse { input, output } => cmd_parse(&input, output.as_deref()),

        Commands::Group { input, output } => cmd_group(&input, output.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

/// Reject anything that is not a `.csv` file before reading it.
fn check_csv_path(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let is_csv = input
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
    if is_csv {
        Ok(())
    } else {
        Err(format!("Invalid file type: {} (expected a .csv file)", input.display()).into())
    }
}

fn cmd_transform(
    input: &Path,
    output: &Path,
    report: Option<&Path>,
    settings: SettingsArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    check_csv_path(input)?;
    eprintln!("📄 Processing: {}", input.display());

    let mut config = Config::from_env()?;
    settings.apply(&mut config);
    tracing::debug!(?config, "configuration");

    let result = transform_file(input, &config)?;

    if let Some(ref encoding) = result.info.encoding {
        eprintln!("   Encoding: {}", encoding);
    }
    eprintln!("   Delimiter: '{}'", skuload::parser::delimiter_name(result.info.delimiter));
    eprintln!("   Rows: {}", result.info.row_count);
    eprintln!("   Item groups: {}", result.info.group_count);
    eprintln!("\n⚙️  Generated: {} inventory items", result.info.output_rows);

    let warnings: Vec<&str> = result.warnings().collect();
    if !warnings.is_empty() {
        eprintln!("\n⚠️  {} warning(s):", warnings.len());
        for w in &warnings {
            eprintln!("   - {}", w);
        }
    }

    if output == Path::new("-") {
        print!("{}", result.csv);
    } else {
        fs::write(output, &result.csv)?;
        eprintln!("💾 Output written to: {}", output.display());
    }

    if let Some(report_path) = report {
        let report = json!({
            "input": input.display().to_string(),
            "config": config,
            "info": result.info,
            "log": result.log,
        });
        fs::write(report_path, serde_json::to_string_pretty(&report)?)?;
        eprintln!("💾 Report written to: {}", report_path.display());
    }

    eprintln!("\n✨ Done!");
    Ok(())
}

fn read_text(input: &Path) -> Result<String, Box<dyn std::error::Error>> {
    check_csv_path(input)?;
    let bytes = fs::read(input)?;
    let (text, encoding) = decode_bytes_auto(&bytes);
    eprintln!("   Encoding: {}", encoding);
    Ok(text)
}

fn print_log(log: &TransformLog) {
    for entry in log.entries() {
        let prefix = match entry.level {
            LogLevel::Info => "  ",
            LogLevel::Success => " ✓",
            LogLevel::Warning => " ⚠️",
            LogLevel::Error => " ❌",
        };
        eprintln!("  {} {}", prefix, entry.message);
    }
}

fn cmd_parse(input: &Path, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📄 Parsing CSV: {}", input.display());

    let text = read_text(input)?;
    let mut log = TransformLog::new();
    let parsed = parse(&text, &mut log)?;
    print_log(&log);

    let json = serde_json::to_string_pretty(&parsed.rows)?;
    write_output(&json, output)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GroupSummary<'a> {
    base_sku: &'a str,
    main_sku: &'a str,
    main_name: &'a str,
    variant_skus: Vec<&'a str>,
}

fn cmd_group(input: &Path, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📦 Grouping: {}", input.display());

    let text = read_text(input)?;
    let mut log = TransformLog::new();
    let parsed = parse(&text, &mut log)?;
    print_log(&log);

    let groups = group_by_base_sku(parsed.rows);
    let variants: usize = groups.iter().map(|g| g.variants().len()).sum();
    eprintln!("   {} item groups, {} variants", groups.len(), variants);

    let summary: Vec<GroupSummary> = groups
        .iter()
        .map(|g| GroupSummary {
            base_sku: &g.base_sku,
            main_sku: &g.main_item().sku,
            main_name: &g.main_item().name,
            variant_skus: g.variants().iter().map(|v| v.sku.as_str()).collect(),
        })
        .collect();

    let json = serde_json::to_string_pretty(&summary)?;
    write_output(&json, output)
}

fn write_output(content: &str, path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
            eprintln!("💾 Output written to: {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
