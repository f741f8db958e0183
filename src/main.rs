//! xvmem CLI - package descriptor and build-file generator
//!
//! Usage: xvmem [OPTIONS] [COMMAND]
//!
//! Commands:
//!   generate  Generate build files (default)
//!   diff      Show what generate would change
//!   graph     Print a package and its dependencies

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use xvmem::config::{parse_toolchain_list, Config};
use xvmem::generator::{self, GeneratorOptions};
use xvmem::packages::{self, xvmem as xvmem_package};
use xvmem::ui::{self, icons};

/// xvmem - package descriptor and native build-file generator
#[derive(Parser, Debug)]
#[command(name = "xvmem")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    /// Output format for CI (after the subcommand when one is given)
    #[arg(long, global = true)]
    json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    generate: GenerateArgs,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate build files
    Generate(GenerateArgs),

    /// Show what generate would change, without writing
    Diff(SelectionArgs),

    /// Print a package and its dependencies
    Graph {
        /// Package to print
        #[arg(short, long, default_value = xvmem_package::PACKAGE_NAME)]
        package: String,
    },
}

#[derive(Args, Debug, Default, Clone)]
struct SelectionArgs {
    /// Toolchains to generate for (repeatable or comma separated)
    #[arg(short, long = "target", value_name = "TOOLCHAIN")]
    targets: Vec<String>,

    /// Output directory, relative to the project root
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Directory holding the checked-out repositories
    #[arg(short, long)]
    workspace: Option<PathBuf>,

    /// Configuration file to use instead of the resolved one
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Args, Debug, Default, Clone)]
struct GenerateArgs {
    #[command(flatten)]
    selection: SelectionArgs,

    /// Overwrite or remove files modified by hand
    #[arg(short, long)]
    force: bool,

    /// Show what would be done without writing
    #[arg(long)]
    dry_run: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    xvmem::logging::init(cli.verbose);

    match cli.command {
        Some(Commands::Generate(args)) => cmd_generate(&args, cli.json),
        Some(Commands::Diff(selection)) => cmd_diff(&selection, cli.json),
        Some(Commands::Graph { package }) => cmd_graph(&package, cli.json),
        None => cmd_generate(&cli.generate, cli.json),
    }
}

/// Resolve configuration for the current directory and apply CLI overrides
fn load_config(project_root: &Path, selection: &SelectionArgs, json: bool) -> Result<Config> {
    let (mut config, warnings) = match &selection.config {
        Some(path) => {
            let (config, warnings) = Config::load_with_warnings(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            let config = config.with_env_overrides(|key| std::env::var(key).ok())?;
            (config, warnings)
        }
        None => {
            let loaded = Config::resolve(project_root)?;
            (loaded.config, loaded.warnings)
        }
    };

    if !json && !warnings.is_empty() {
        eprint!(
            "{}",
            ui::render_config_warnings(&warnings, ui::stderr_is_terminal())
        );
    }

    if !selection.targets.is_empty() {
        config.generator.targets = parse_toolchain_list(&selection.targets.join(","))?;
    }
    if let Some(out) = &selection.out {
        config.generator.output_dir = out.clone();
    }
    if let Some(workspace) = &selection.workspace {
        config.generator.workspace = workspace.clone();
    }
    Ok(config)
}

fn cmd_generate(args: &GenerateArgs, json: bool) -> Result<()> {
    let project_root = std::env::current_dir().context("failed to read current directory")?;
    let config = load_config(&project_root, &args.selection, json)?;
    let color = ui::supports_color();

    let options = GeneratorOptions::new(&project_root, config)
        .with_force(args.force)
        .with_dry_run(args.dry_run);
    let ctx = generator::init(options)?;
    let package = xvmem_package::get_package()?;

    if !json {
        println!(
            "{}",
            ui::render_header(icons::GENERATE, &format!("xvmem generate: {}", package.name()), color)
        );
        println!("Output: {}", ctx.output_root().display());
        if args.dry_run {
            println!("Option: Dry run");
        }
        println!();
    }

    let report = generator::generate(&ctx, &package)?;

    if json {
        println!("{}", ui::report_json(package.name(), &report));
    } else {
        print!("{}", ui::render_report(&report, color));
    }
    Ok(())
}

fn cmd_diff(selection: &SelectionArgs, json: bool) -> Result<()> {
    let project_root = std::env::current_dir().context("failed to read current directory")?;
    let config = load_config(&project_root, selection, json)?;
    let color = ui::supports_color();

    let ctx = generator::init(GeneratorOptions::new(&project_root, config).with_dry_run(true))?;
    let package = xvmem_package::get_package()?;
    let plan = generator::plan(&ctx, &package)?;

    if json {
        println!("{}", ui::plan_json(package.name(), &plan));
        return Ok(());
    }

    println!(
        "{}",
        ui::render_header(icons::DIFF, &format!("xvmem diff: {}", package.name()), color)
    );
    if !plan.has_changes() {
        println!("  No changes");
        return Ok(());
    }
    print!("{}", ui::render_plan_diff(&plan, color));
    Ok(())
}

fn cmd_graph(name: &str, json: bool) -> Result<()> {
    let package = packages::find_package(name)?.get_package()?;
    let summary = package.summary();

    if json {
        let value = serde_json::json!({
            "event": "graph",
            "package": summary,
        });
        println!("{value}");
    } else {
        print!("{}", ui::render_tree(&summary));
    }
    Ok(())
}
