use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use postcodes::{ClientConfig, Lookup, LookupError, MockTransport, PostCoder, Transport};

/// Look up UK postcode data.
#[derive(Debug, Parser)]
#[command(name = "postcodes", version, about)]
struct Cli {
    /// Always query the service, even for repeated lookups
    #[arg(long, global = true)]
    skip_cache: bool,

    /// Service base URL (overrides POSTCODES_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Serve lookups from a directory of JSON fixtures instead of the network
    #[arg(long, global = true, conflicts_with = "base_url")]
    fixtures: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Metadata for one or more postcodes
    Get {
        #[arg(required = true)]
        postcodes: Vec<String>,
    },
    /// The postcode nearest to a point
    Nearest {
        #[arg(allow_hyphen_values = true)]
        lat: String,
        #[arg(allow_hyphen_values = true)]
        lng: String,
    },
    /// Postcodes within DISTANCE miles of a postcode
    NearPostcode {
        postcode: String,
        #[arg(allow_hyphen_values = true)]
        distance: String,
    },
    /// Postcodes within DISTANCE miles of a point
    NearPoint {
        #[arg(allow_hyphen_values = true)]
        lat: String,
        #[arg(allow_hyphen_values = true)]
        lng: String,
        #[arg(allow_hyphen_values = true)]
        distance: String,
    },
}

/// Print a lookup result. Returns false for `NotFound`.
fn print(lookup: &Lookup) -> bool {
    if lookup.is_not_found() {
        println!("not found");
        return false;
    }

    match serde_json::to_string_pretty(lookup) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("Failed to format result: {e}"),
    }
    true
}

async fn run<T: Transport>(
    coder: &PostCoder<T>,
    command: Command,
    skip_cache: bool,
) -> Result<bool, LookupError> {
    match command {
        Command::Get { postcodes } => {
            let mut all_found = true;
            for postcode in &postcodes {
                let lookup = coder.get(postcode, skip_cache).await?;
                all_found &= print(&lookup);
            }
            tracing::debug!(
                queried = postcodes.len(),
                cached = coder.entry_count().await,
                "done"
            );
            Ok(all_found)
        }
        Command::Nearest { lat, lng } => {
            let lookup = coder.get_nearest(lat, lng, skip_cache).await?;
            Ok(print(&lookup))
        }
        Command::NearPostcode { postcode, distance } => {
            let lookup = coder
                .get_from_postcode(&postcode, distance, skip_cache)
                .await?;
            Ok(print(&lookup))
        }
        Command::NearPoint { lat, lng, distance } => {
            let lookup = coder.get_from_geo(lat, lng, distance, skip_cache).await?;
            Ok(print(&lookup))
        }
    }
}

fn exit_code(result: Result<bool, LookupError>) -> ExitCode {
    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) if e.is_validation() => {
            eprintln!("Error: {e}");
            ExitCode::from(2)
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(3)
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Some(dir) = &cli.fixtures {
        let transport = match MockTransport::new(dir) {
            Ok(transport) => transport,
            Err(e) => {
                eprintln!("Failed to load fixtures: {e}");
                return ExitCode::from(3);
            }
        };
        tracing::info!(
            postcodes = transport.available_postcodes().len(),
            "serving lookups from fixtures"
        );
        let coder = PostCoder::new(transport);
        return exit_code(run(&coder, cli.command, cli.skip_cache).await);
    }

    let mut config = ClientConfig::from_env();
    if let Some(url) = cli.base_url {
        config = config.with_base_url(url);
    }

    let coder = match PostCoder::from_config(config) {
        Ok(coder) => coder,
        Err(e) => {
            eprintln!("Failed to create client: {e}");
            return ExitCode::from(3);
        }
    };

    exit_code(run(&coder, cli.command, cli.skip_cache).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn negative_coordinates_are_values() {
        let cli = Cli::try_parse_from(["postcodes", "near-point", "-30", "20.5", "12"]).unwrap();
        match cli.command {
            Command::NearPoint { lat, lng, distance } => {
                assert_eq!(lat, "-30");
                assert_eq!(lng, "20.5");
                assert_eq!(distance, "12");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn global_flags() {
        let cli =
            Cli::try_parse_from(["postcodes", "get", "SW1A 1AA", "M1 1AE", "--skip-cache"]).unwrap();
        assert!(cli.skip_cache);
        match cli.command {
            Command::Get { postcodes } => assert_eq!(postcodes.len(), 2),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn get_requires_a_postcode() {
        assert!(Cli::try_parse_from(["postcodes", "get"]).is_err());
    }

    #[test]
    fn fixtures_conflict_with_base_url() {
        let result = Cli::try_parse_from([
            "postcodes",
            "--fixtures",
            "data",
            "--base-url",
            "http://localhost/",
            "get",
            "M1 1AE",
        ]);
        assert!(result.is_err());
    }
}
