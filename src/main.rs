//! Widget Board - CLI entry point
//!
//! `wb` inspects and edits a persisted widget board: the catalogue of
//! widget types, the placed widgets, and their per-breakpoint layout.
//! State lives in the data directory (`--data-dir`, `[storage].data_dir`,
//! or the platform data dir).

use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use widget_board::config::schema::Config;
use widget_board::config::{default, loader::ConfigLoader, xdg};
use widget_board::layout::{Breakpoint, LayoutEntry};
use widget_board::registry::{RegistryQuery, WidgetCategory, WidgetRegistry};
use widget_board::storage::FileStorage;
use widget_board::{
    logging, Error, ResetConfirmation, Result, StoreOptions, WidgetConfig, WidgetInstance,
    WidgetStore,
};

/// Characters per grid column in `render` output.
const CELL_CHARS: usize = 8;

/// Widget Board
#[derive(Parser)]
#[command(name = "wb")]
#[command(version, about = "Widget dashboard registry, instance store and layout tool")]
struct Cli {
    /// Configuration file (default: $XDG_CONFIG_HOME/widget-board/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Directory holding the persisted board
    #[arg(long, global = true, value_name = "PATH")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands for the wb CLI
#[derive(Subcommand)]
enum Commands {
    /// List registered widget types
    Types {
        /// Only types in this category (e.g. system, ai-agents)
        #[arg(long)]
        category: Option<WidgetCategory>,
        /// Case-insensitive match on id or display name
        #[arg(long)]
        search: Option<String>,
    },

    /// List placed widgets in board order
    List,

    /// Place a new widget at the bottom of the board
    Add {
        /// Widget type id
        widget_type: String,
        /// Initial configuration as a JSON object
        #[arg(value_name = "JSON")]
        config_json: Option<String>,
    },

    /// Remove a widget and print its record (pass it to `restore` to undo)
    Remove {
        /// Instance id
        id: String,
    },

    /// Put back a widget record printed by `remove`
    Restore {
        /// Widget record as JSON
        #[arg(value_name = "JSON")]
        record: String,
    },

    /// Replace a widget's configuration
    Configure {
        /// Instance id
        id: String,
        /// New configuration as a JSON object
        #[arg(value_name = "JSON")]
        config_json: String,
    },

    /// Print the layout as JSON
    Layout {
        /// Only this breakpoint (lg, md, sm, xs, xxs)
        #[arg(long, conflicts_with = "width")]
        breakpoint: Option<Breakpoint>,
        /// Pick the breakpoint for a viewport this many pixels wide
        #[arg(long)]
        width: Option<u32>,
    },

    /// Replace one breakpoint's layout with a JSON entry list
    SetLayout {
        /// Breakpoint to replace
        breakpoint: Breakpoint,
        /// File with the entries, or `-` for stdin
        source: String,
    },

    /// Replace all widgets with the configured defaults
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },

    /// Draw the board as text, one line per widget in row order
    Render {
        /// Breakpoint to render (default: lg)
        #[arg(long, conflicts_with = "width")]
        breakpoint: Option<Breakpoint>,
        /// Pick the breakpoint for a viewport this many pixels wide
        #[arg(long)]
        width: Option<u32>,
    },

    /// Manage configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Actions for the `config` subcommand.
#[derive(Subcommand)]
enum ConfigAction {
    /// Create default configuration file
    Init {
        /// Overwrite existing configuration (creates backup)
        #[arg(long)]
        force: bool,
    },
    /// Show configuration file path
    Path,
    /// Validate configuration file
    Validate,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Commands::Config { action } = &cli.command {
        return match run_config_command(cli.config.as_deref(), action) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("Config error: {e}");
                ExitCode::FAILURE
            }
        };
    }

    let config = match ConfigLoader::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Config error: {e}");
            return ExitCode::FAILURE;
        }
    };
    logging::init(config.logging.level);

    match run(&cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run_config_command(path: Option<&Path>, action: &ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Init { force } => {
            let created = match path {
                Some(path) => default::create_default_config_at(path, *force)?,
                None => default::create_default_config(*force)?,
            };
            println!("Created configuration at {}", created.display());
        }
        ConfigAction::Path => {
            let path = path.map(Path::to_path_buf).unwrap_or_else(xdg::config_path);
            println!("{}", path.display());
        }
        ConfigAction::Validate => {
            let config = ConfigLoader::load(path)?;
            ConfigLoader::validate(&config, &WidgetRegistry::builtin())?;
            println!("Configuration is valid");
            println!("{config:#?}");
        }
    }
    Ok(())
}

fn open_store(cli: &Cli, config: &Config) -> Result<WidgetStore<FileStorage>> {
    let registry = Arc::new(WidgetRegistry::builtin());
    ConfigLoader::validate(config, &registry)?;

    let data_dir = cli
        .data_dir
        .clone()
        .unwrap_or_else(|| config.storage.resolved_data_dir());
    tracing::debug!("Using data directory {}", data_dir.display());

    Ok(WidgetStore::open(
        registry,
        FileStorage::new(data_dir),
        StoreOptions::from(config),
    ))
}

fn run(cli: &Cli, config: &Config) -> Result<()> {
    if let Commands::Types { category, search } = &cli.command {
        print_types(&WidgetRegistry::builtin(), *category, search.as_deref());
        return Ok(());
    }

    let mut store = open_store(cli, config)?;

    match &cli.command {
        Commands::List => {
            for widget in store.list_instances() {
                if widget.config.is_empty() {
                    println!("{}\t{}", widget.id, widget.widget_type);
                } else {
                    println!(
                        "{}\t{}\t{}",
                        widget.id,
                        widget.widget_type,
                        serde_json::to_string(&widget.config)?
                    );
                }
            }
        }
        Commands::Add {
            widget_type,
            config_json,
        } => {
            if !store.registry().contains(widget_type) {
                return Err(Error::InvalidInput(format!(
                    "Unknown widget type: {widget_type} (see `wb types`)"
                )));
            }
            let initial = config_json
                .as_deref()
                .map(WidgetConfig::from_json)
                .transpose()?;
            let added = store.add_instance(widget_type, initial);
            println!("{}", added.id);
        }
        Commands::Remove { id } => {
            let removed = store
                .remove_instance(id)
                .ok_or_else(|| no_such_widget(id))?;
            println!("{}", serde_json::to_string(&removed)?);
        }
        Commands::Restore { record } => {
            let instance: WidgetInstance = serde_json::from_str(record)?;
            if !store.registry().contains(&instance.widget_type) {
                return Err(Error::InvalidInput(format!(
                    "Unknown widget type: {}",
                    instance.widget_type
                )));
            }
            if store.get_instance(instance.id.as_str()).is_some() {
                return Err(Error::InvalidInput(format!(
                    "Widget {} is already on the board",
                    instance.id
                )));
            }
            let id = instance.id.clone();
            store.re_add_instance(instance);
            println!("{id}");
        }
        Commands::Configure { id, config_json } => {
            let config = WidgetConfig::from_json(config_json)?;
            if !store.update_config(id, config) {
                return Err(no_such_widget(id));
            }
        }
        Commands::Layout { breakpoint, width } => {
            let json = match pick_breakpoint(*breakpoint, *width) {
                Some(bp) => serde_json::to_string_pretty(store.get_layout(bp))?,
                None => serde_json::to_string_pretty(store.layouts())?,
            };
            println!("{json}");
        }
        Commands::SetLayout { breakpoint, source } => {
            let text = read_source(source)?;
            let entries: Vec<LayoutEntry> = serde_json::from_str(&text)?;
            store.set_layout(*breakpoint, entries);
        }
        Commands::Reset { yes } => {
            if !yes {
                return Err(Error::InvalidInput(
                    "Reset replaces every widget on the board; pass --yes to confirm".to_string(),
                ));
            }
            store.reset_to_defaults(ResetConfirmation::confirmed());
            store.reconcile();
            println!("Board reset to {} default widgets", store.list_instances().len());
        }
        Commands::Render { breakpoint, width } => {
            let bp = pick_breakpoint(*breakpoint, *width).unwrap_or(Breakpoint::Lg);
            render(&store, bp);
        }
        Commands::Types { .. } | Commands::Config { .. } => {}
    }

    if cli.command.mutates_board() {
        store.flush()?;
    }
    Ok(())
}

impl Commands {
    /// Returns `true` for commands that change widgets or layout.
    fn mutates_board(&self) -> bool {
        matches!(
            self,
            Commands::Add { .. }
                | Commands::Remove { .. }
                | Commands::Restore { .. }
                | Commands::Configure { .. }
                | Commands::SetLayout { .. }
                | Commands::Reset { .. }
        )
    }
}

fn no_such_widget(id: &str) -> Error {
    Error::InvalidInput(format!("No widget with id {id}"))
}

fn pick_breakpoint(breakpoint: Option<Breakpoint>, width: Option<u32>) -> Option<Breakpoint> {
    breakpoint.or_else(|| width.map(Breakpoint::for_width))
}

fn read_source(source: &str) -> Result<String> {
    let mut text = String::new();
    if source == "-" {
        std::io::stdin()
            .read_to_string(&mut text)
            .map_err(|e| Error::InvalidInput(format!("Failed to read stdin: {e}")))?;
    } else {
        text = std::fs::read_to_string(source)
            .map_err(|e| Error::InvalidInput(format!("Failed to read {source}: {e}")))?;
    }
    Ok(text)
}

fn print_types(registry: &WidgetRegistry, category: Option<WidgetCategory>, search: Option<&str>) {
    let mut query = RegistryQuery::default();
    if let Some(category) = category {
        query = query.with_category(category);
    }
    if let Some(search) = search {
        query = query.with_search(search);
    }
    for desc in registry.query(&query) {
        println!(
            "{:<32} {:<20} {:>2}x{:<2} {}",
            desc.id,
            desc.category,
            desc.default_size.width,
            desc.default_size.height,
            desc.display_name
        );
    }
}

fn render(store: &WidgetStore<FileStorage>, breakpoint: Breakpoint) {
    let mut entries: Vec<&LayoutEntry> = store.get_layout(breakpoint).iter().collect();
    entries.sort_by_key(|e| (e.y, e.x));

    println!("{} ({} columns)", breakpoint, breakpoint.columns());
    for entry in entries {
        let Some(instance) = store.get_instance(entry.i.as_str()) else {
            continue;
        };
        let Some(descriptor) = store.registry().get_type(&instance.widget_type) else {
            continue;
        };
        let width = entry.w as usize * CELL_CHARS;
        let body = descriptor.renderer.render(descriptor, instance, width);
        println!(
            "{:>3},{:<2} {:>2}x{:<2} {}",
            entry.y, entry.x, entry.w, entry.h, body
        );
    }
}
