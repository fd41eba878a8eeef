use clap::{ArgAction, Args, Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use autoinit_graph::discover;
use autoinit_manifest::FsManifestLoader;
use autoinit_plugin::{find_starting_manifest, AutoInitPlugin, Plugin, PluginError, VirtualId, AUTO_INIT_ID};
use autoinit_resolver::{NodeResolver, ResolverOptions};

mod report;

#[derive(Parser)]
#[command(
    name = "autoinit",
    version = "0.1.0",
    about = "Aggregate customAutoInit modules across a package dependency graph",
    long_about = "Walks the dependencies of a package.json, collects every package's\ncustomAutoInit module once, and emits a module that imports them all."
)]
struct Cli {
    #[command(flatten)]
    resolve: ResolveArgs,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ResolveArgs {
    /// Export condition to match in package `exports` (replaces the defaults)
    #[arg(
        long = "condition",
        env = "AUTOINIT_CONDITIONS",
        value_delimiter = ',',
        global = true
    )]
    conditions: Vec<String>,

    /// Keep symlinked paths instead of resolving them to their targets
    #[arg(long, global = true)]
    preserve_symlinks: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the aggregated auto-init module for an importing file
    Generate {
        /// File that imports the aggregated module
        importer: PathBuf,

        /// Write the module here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the auto-init modules reachable from a manifest
    Discover {
        /// Starting package.json
        manifest: PathBuf,

        /// Print modules, visited manifests and cycles as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the virtual module id for an importing file (debug)
    VirtualId {
        /// File that imports the aggregated module
        importer: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let resolver = NodeResolver::new(resolver_options(&cli.resolve));

    let result = match cli.command {
        Commands::Generate { importer, output } => generate_command(resolver, &importer, output.as_deref()),
        Commands::Discover { manifest, json } => discover_command(&resolver, &manifest, json),
        Commands::VirtualId { importer } => virtual_id_command(&importer),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report::report_error(&err);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let directives = ["autoinit", "autoinit_manifest", "autoinit_resolver", "autoinit_graph", "autoinit_plugin"]
        .map(|target| format!("{target}={level}"))
        .join(",");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn resolver_options(args: &ResolveArgs) -> ResolverOptions {
    let mut options = ResolverOptions {
        preserve_symlinks: args.preserve_symlinks,
        ..ResolverOptions::default()
    };
    let conditions: Vec<String> = args
        .conditions
        .iter()
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .collect();
    if !conditions.is_empty() {
        options.conditions = conditions;
    }
    options
}

/// Drive both plugin hooks the way a host would for
/// `import "virtual:init-all-packages"` in `importer`.
fn generate_command(resolver: NodeResolver, importer: &Path, output: Option<&Path>) -> Result<(), CliError> {
    let plugin = AutoInitPlugin::new(resolver);

    let code = match plugin.resolve_id(AUTO_INIT_ID, Some(importer))? {
        Some(id) => plugin.load(&id)?,
        None => None,
    };
    let code = code.unwrap_or_default();

    match output {
        Some(path) => {
            fs::write(path, &code).map_err(|source| CliError::Write {
                path: path.to_path_buf(),
                source,
            })?;
            tracing::info!(path = %path.display(), imports = code.lines().count(), "wrote auto-init module");
        }
        None if code.is_empty() => {}
        None => println!("{code}"),
    }
    Ok(())
}

fn discover_command(resolver: &NodeResolver, manifest: &Path, json: bool) -> Result<(), CliError> {
    let start = fs::canonicalize(manifest).unwrap_or_else(|_| manifest.to_path_buf());
    let discovery = discover(&start, resolver, &FsManifestLoader).map_err(PluginError::from)?;

    if json {
        let rendered = serde_json::to_string_pretty(&discovery).map_err(CliError::Json)?;
        println!("{rendered}");
    } else {
        for module in &discovery.modules {
            println!("{module}");
        }
    }
    Ok(())
}

fn virtual_id_command(importer: &Path) -> Result<(), CliError> {
    let manifest = find_starting_manifest(Some(importer))?;
    let id = VirtualId::new(manifest).encode()?;
    println!("{}", id.replace('\0', "\\0"));
    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Plugin(#[from] PluginError),
    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to render JSON: {0}")]
    Json(serde_json::Error),
}
