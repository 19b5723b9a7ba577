use clap::{Parser, Subcommand};
use geofence_notify::notifier::LogNotifier;
use geofence_notify::registry::{geofencing_request, RegistryConfig};
use geofence_notify::server::{self, AppState};
use geofence_notify::service::{Dispatch, GeofenceService};
use geofence_notify::status::report_registration;
use geofence_notify::transition::{GeofencingEvent, TransitionKind};
use std::path::PathBuf;
use std::sync::Arc;

/// Geofence registry and transition notifier.
///
/// Builds monitoring requests from a landmark registry and turns transition
/// events into a single live notification.
///
/// Examples:
///   geofence request
///   geofence transition --kind enter "Ruta N"
///   geofence transition --kind exit "Ruta N" "Juan Valdez CC Aventura"
///   geofence transition --kind enter --error-code 1000
///   geofence serve --port 8080
#[derive(Parser)]
#[command(name = "geofence", version, about, long_about = None)]
struct Cli {
    /// Config file (JSON). Defaults to ~/.geofence/config.json.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Debug logging.
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    /// Only warnings and errors.
    #[arg(long, short = 'q', global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the landmark registry.
    Landmarks,

    /// Print the geofencing request for the monitoring service.
    Request,

    /// Run one transition event through the notifier.
    Transition {
        /// "enter", "exit" or a raw transition code.
        #[arg(long, short = 'k', value_parser = parse_kind, allow_hyphen_values = true)]
        kind: TransitionKind,

        /// Mark the event as failed with this error code.
        #[arg(long)]
        error_code: Option<i32>,

        /// Triggered geofence ids, in order.
        ids: Vec<String>,
    },

    /// Print the user message for a registration status code.
    Status {
        #[arg(allow_hyphen_values = true)]
        code: i32,
    },

    /// Start the HTTP server.
    Serve {
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        #[arg(long, short = 'p', default_value_t = 8080)]
        port: u16,
    },
}

fn parse_kind(s: &str) -> Result<TransitionKind, String> {
    s.parse().map_err(|e| format!("{}", e))
}

fn main() {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let config = load_config(cli.config.as_deref());

    match cli.command {
        Command::Landmarks => {
            let registry = config.registry().unwrap_or_else(|e| fail(e));
            for lm in registry.iter() {
                eprintln!("  {}", lm.display_line());
            }
            print_json(registry.landmarks());
        }
        Command::Request => {
            let registry = config.registry().unwrap_or_else(|e| fail(e));
            print_json(&geofencing_request(&registry, &config));
        }
        Command::Transition { kind, error_code, ids } => {
            let event = match error_code {
                Some(code) => GeofencingEvent::failed(code),
                None => GeofencingEvent::new(kind, ids),
            };
            let service = GeofenceService::new(config.labels.clone(), Arc::new(LogNotifier));
            match service.on_event(&event) {
                Ok(Dispatch::Notify { notification }) => print_json(&notification),
                Ok(Dispatch::Skip { .. }) => {}
                Err(e) => fail(e),
            }
        }
        Command::Status { code } => {
            let status = report_registration(code, &LogNotifier);
            println!("{}", status);
            if !status.is_success() {
                std::process::exit(2);
            }
        }
        Command::Serve { host, port } => {
            let state = AppState::new(&config).unwrap_or_else(|e| fail(e));
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .unwrap_or_else(|e| fail(e));
            if let Err(e) = runtime.block_on(server::start(&host, port, Arc::new(state))) {
                fail(format!("Server error on {}:{}: {}", host, port, e));
            }
        }
    }
}

fn load_config(path: Option<&std::path::Path>) -> RegistryConfig {
    let loaded = match path {
        Some(p) => RegistryConfig::load_from(p),
        None => RegistryConfig::load(),
    };
    loaded.unwrap_or_else(|e| fail(e))
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => fail(e),
    }
}

fn fail(err: impl std::fmt::Display) -> ! {
    eprintln!("Error: {}", err);
    std::process::exit(1);
}
