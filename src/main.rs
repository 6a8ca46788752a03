use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;
use zonepin::location::{Coordinate, DatasetSource, LoadState, TimezoneResolver};

/// zonepin — timezone identifier to map pin and country code
///
/// Looks up the representative location and ISO 3166 country code of IANA
/// timezone identifiers from a bundled zone table.
///
/// Examples:
///   zonepin Europe/Berlin
///   zonepin America/New_York Asia/Tokyo Etc/UTC
///   zonepin --country NO
///   zonepin --list
///   zonepin --serve --port 3000
#[derive(Parser)]
#[command(name = "zonepin", version, about, long_about = None)]
struct Cli {
    /// Timezone identifiers, matched exactly (e.g. Europe/Berlin).
    identifiers: Vec<String>,

    /// Read the zone table from this file instead of the bundled one.
    #[arg(long, env = "ZONEPIN_DATASET")]
    dataset: Option<PathBuf>,

    /// List the identifiers of one country (ISO 3166-1 alpha-2, e.g. SE).
    #[arg(long)]
    country: Option<String>,

    /// Print every record in the table.
    #[arg(long)]
    list: bool,

    /// Run the HTTP API instead of printing results.
    #[arg(long)]
    serve: bool,

    /// Host to bind with --serve.
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to bind with --serve.
    #[arg(long, default_value_t = 3000)]
    port: u16,

    /// Only log warnings and errors.
    #[arg(long, short = 'q')]
    quiet: bool,
}

#[derive(Serialize)]
struct LookupOutput<'a> {
    identifier: &'a str,
    found: bool,
    #[serde(flatten)]
    location: Option<Coordinate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    country_code: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    comment: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    formatted_coords: Option<String>,
}

fn main() {
    let cli = Cli::parse();
    zonepin::logging::init_logging(cli.quiet);

    let source = match &cli.dataset {
        Some(path) => DatasetSource::File(path.clone()),
        None => DatasetSource::Bundled,
    };
    let resolver = TimezoneResolver::with_source(source);

    // ── Serve ───────────────────────────────────────────────────

    if cli.serve {
        let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
            eprintln!("Error: Cannot start runtime: {}", e);
            std::process::exit(1);
        });
        runtime.block_on(zonepin::server::start(&cli.host, cli.port, resolver));
        return;
    }

    if cli.identifiers.is_empty() && cli.country.is_none() && !cli.list {
        eprintln!("Error: No timezone specified.");
        eprintln!();
        eprintln!("Usage:");
        eprintln!("  zonepin Europe/Berlin");
        eprintln!("  zonepin --country SE");
        eprintln!("  zonepin --list");
        eprintln!("  zonepin --serve");
        std::process::exit(1);
    }

    resolver.preload();
    if resolver.state() == Some(LoadState::Failed) {
        eprintln!("Error: Zone table {} could not be loaded.", resolver.source());
        std::process::exit(1);
    }

    // ── Listing modes ───────────────────────────────────────────

    if let Some(ref cc) = cli.country {
        let ids = resolver
            .table()
            .map(|t| t.identifiers_for_country(cc))
            .unwrap_or_default();
        print_json(&ids);
        return;
    }

    if cli.list {
        let mut records: Vec<_> = resolver.table().map(|t| t.iter().collect()).unwrap_or_default();
        records.sort_by(|a, b| a.identifier.cmp(&b.identifier));
        print_json(&records);
        return;
    }

    // ── Lookups ─────────────────────────────────────────────────

    let outputs: Vec<LookupOutput> = cli
        .identifiers
        .iter()
        .map(|id| match resolver.record(id) {
            Some(record) => {
                eprintln!("  {}", record.display_line());
                LookupOutput {
                    identifier: id,
                    found: true,
                    location: Some(record.coordinate()),
                    country_code: Some(record.country_code.as_str()),
                    comment: record.comment.as_deref(),
                    formatted_coords: Some(record.coordinate().to_string()),
                }
            }
            None => {
                eprintln!("  \u{2753} {} \u{2014} not in zone table", id);
                LookupOutput {
                    identifier: id,
                    found: false,
                    location: None,
                    country_code: None,
                    comment: None,
                    formatted_coords: None,
                }
            }
        })
        .collect();

    print_json(&outputs);
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error: Cannot encode output: {}", e);
            std::process::exit(1);
        }
    }
}
