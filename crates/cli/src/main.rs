//! storedash CLI - terminal front end for the admin dashboard.
//!
//! Each invocation loads the dashboard (baseline plus persisted data),
//! performs one action, and prints the affected view.
//!
//! # Usage
//!
//! ```bash
//! # Dashboard cards
//! storedash show dashboard
//!
//! # Product catalog, with add/edit/delete by row number
//! storedash show products
//! storedash products add --name Pen --price 5 --category Stationery --image pen.png
//! storedash products edit 2 --price 25
//! storedash products delete 2 --yes
//!
//! # Search, filter, export
//! storedash products search pen
//! storedash products filter kitchen
//! storedash products export --out products.csv
//!
//! # Synthetic orders and users
//! storedash orders add
//! storedash users add
//!
//! # Settings
//! storedash settings set --name Admin --email admin@shop.test --password secret
//! storedash settings show --reveal
//! ```
//!
//! # Environment Variables
//!
//! See [`storedash_admin::config`]. `--data-dir` and `--baseline` override
//! `STOREDASH_DATA_DIR` and `STOREDASH_BASELINE`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use storedash_admin::{AdminDashboard, DashboardConfig, FileStorage, Section, StorageAdapter};

mod commands;
mod output;

use commands::CliError;

#[derive(Parser)]
#[command(name = "storedash")]
#[command(author, version, about = "Store admin dashboard")]
struct Cli {
    /// Directory holding persisted data
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Baseline product list (file path or http(s) URL)
    #[arg(long, global = true)]
    baseline: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a section
    Show {
        /// dashboard, products, orders, users, or settings
        section: Section,

        /// Show the settings password in clear text
        #[arg(long)]
        reveal: bool,
    },
    /// Manage the product catalog
    Products {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// Manage orders
    Orders {
        #[command(subcommand)]
        action: GenerateAction,
    },
    /// Manage users
    Users {
        #[command(subcommand)]
        action: GenerateAction,
    },
    /// Manage admin settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
}

#[derive(Subcommand)]
enum ProductAction {
    /// Add a product
    Add(ProductFields),
    /// Edit the product at a row (1-based, as shown)
    Edit {
        row: usize,

        #[command(flatten)]
        fields: ProductFields,
    },
    /// Delete the product at a row (1-based, as shown)
    Delete {
        row: usize,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Show products whose name contains a query
    Search { query: String },
    /// Show products in a category (`all` for every product)
    Filter { category: String },
    /// Write the catalog as CSV
    Export {
        /// Output file (default: products.csv)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

/// Product form inputs. On edit, omitted fields keep their current value.
#[derive(Args)]
struct ProductFields {
    #[arg(short, long)]
    name: Option<String>,

    #[arg(short, long)]
    price: Option<String>,

    #[arg(short, long)]
    category: Option<String>,

    /// Image file path, http(s) URL, or data URI
    #[arg(short, long)]
    image: Option<String>,
}

#[derive(Subcommand)]
enum GenerateAction {
    /// Append a generated record
    Add,
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Show the settings form
    Show {
        /// Show the password in clear text
        #[arg(long)]
        reveal: bool,
    },
    /// Save the settings form
    Set {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        email: String,

        #[arg(short, long, default_value = "")]
        password: String,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match DashboardConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_tracing(false);
            tracing::error!("Invalid configuration: {e}");
            std::process::exit(2);
        }
    };
    init_tracing(config.log_json);

    if let Err(e) = run(cli, config).await {
        // Validation alerts are command output, not failures.
        let alerted = e.is_user_facing() && writeln!(io::stdout(), "{e}").is_ok();
        if !alerted {
            tracing::error!("Command failed: {e}");
        }
        std::process::exit(1);
    }
}

/// Logs go to stderr so command output on stdout stays clean.
fn init_tracing(json: bool) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "storedash_admin=info,storedash_cli=info".into());

    let json_layer = json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer = (!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

async fn run(cli: Cli, mut config: DashboardConfig) -> Result<(), CliError> {
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    if let Some(baseline) = cli.baseline {
        config.baseline = baseline;
    }

    let storage = StorageAdapter::new(FileStorage::open(&config.data_dir)?);
    let mut dashboard =
        AdminDashboard::start(storage, &config.baseline_source(), config.cell_format()).await;

    match cli.command {
        Commands::Show { section, reveal } => commands::show(&mut dashboard, section, reveal)?,
        Commands::Products { action } => match action {
            ProductAction::Add(fields) => {
                commands::products::add(&mut dashboard, fields.into()).await?;
            }
            ProductAction::Edit { row, fields } => {
                commands::products::edit(&mut dashboard, row, fields.into()).await?;
            }
            ProductAction::Delete { row, yes } => {
                commands::products::delete(&mut dashboard, row, yes)?;
            }
            ProductAction::Search { query } => commands::products::search(&mut dashboard, &query)?,
            ProductAction::Filter { category } => {
                commands::products::filter(&mut dashboard, &category)?;
            }
            ProductAction::Export { out } => commands::products::export(&dashboard, out).await?,
        },
        Commands::Orders {
            action: GenerateAction::Add,
        } => commands::add_order(&mut dashboard)?,
        Commands::Users {
            action: GenerateAction::Add,
        } => commands::add_user(&mut dashboard)?,
        Commands::Settings { action } => match action {
            SettingsAction::Show { reveal } => commands::show(&mut dashboard, Section::Settings, reveal)?,
            SettingsAction::Set {
                name,
                email,
                password,
            } => commands::settings::set(&mut dashboard, name, email, password)?,
        },
    }
    Ok(())
}

impl From<ProductFields> for commands::products::FieldUpdate {
    fn from(fields: ProductFields) -> Self {
        Self {
            name: fields.name,
            price: fields.price,
            category: fields.category,
            image: fields.image,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_edit_with_partial_fields() {
        let cli = Cli::try_parse_from(["storedash", "products", "edit", "2", "--price", "25"]);
        let Ok(Cli {
            command:
                Commands::Products {
                    action: ProductAction::Edit { row, fields },
                },
            ..
        }) = cli
        else {
            panic!("expected products edit");
        };
        assert_eq!(row, 2);
        assert_eq!(fields.price.as_deref(), Some("25"));
        assert!(fields.name.is_none());
    }

    #[test]
    fn test_help_exits_through_parser() {
        let err = Cli::try_parse_from(["storedash", "--help"]).err();
        assert!(matches!(
            err.map(|e| e.kind()),
            Some(clap::error::ErrorKind::DisplayHelp)
        ));
    }

    #[test]
    fn test_parse_section_case_insensitive() {
        let cli = Cli::try_parse_from(["storedash", "show", "Orders"]);
        assert!(matches!(
            cli,
            Ok(Cli {
                command: Commands::Show {
                    section: Section::Orders,
                    reveal: false
                },
                ..
            })
        ));
    }
}
