// ABOUTME: Main entry point for the tmass command line tool

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info};

use tmass::config::{self, Config};
use tmass::layout::PathContext;
use tmass::session::{BuildOptions, LayoutStore, SessionBuilder};
use tmass::tmux::{ProcessExecutor, SessionCapture, TmuxEnvironment};
use tmass::version;

#[derive(Debug, Parser)]
#[command(
    name = "tmass",
    about = "Save tmux sessions into layout files and load them back",
    disable_version_flag = true
)]
struct Cli {
    /// The tmux command to use, if tmux is not in $PATH
    #[arg(long, global = true)]
    tmux: Option<String>,

    /// Extra arguments passed to tmux before every subcommand
    #[arg(long, global = true, allow_hyphen_values = true)]
    tmux_args: Option<String>,

    /// Directory containing layout files
    #[arg(short, long, global = true)]
    layout_dir: Option<PathBuf>,

    /// Config file to read instead of the default one
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log tmux invocations and other details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Load a layout file and apply it to tmux
    Load {
        /// Layout name, `.yml` is appended when no extension is given
        layout: Vec<String>,

        /// Session name to use instead of the one in the layout
        #[arg(long)]
        target: Option<String>,

        /// Add the windows to the session if it already exists
        #[arg(short, long)]
        attach: bool,

        /// Pick a fresh session name when the requested one is taken
        #[arg(short, long)]
        rename: bool,
    },
    /// Save a running session into a layout file
    Save {
        /// Name of the tmux session to save
        session: Vec<String>,

        /// Layout file name, defaults to the session name
        #[arg(long)]
        target: Option<String>,
    },
    /// Show version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let config_path = cli.config.clone().unwrap_or_else(config::default_config_path);
    let mut config = Config::load(&config_path)?;
    apply_overrides(&mut config, &cli);
    debug!("Effective configuration: {:?}", config);

    match cli.command {
        Command::Load {
            layout,
            target,
            attach,
            rename,
        } => load(&config, &layout.join(" "), target, attach, rename),
        Command::Save { session, target } => save(&config, &session.join(" "), target),
        Command::Version => {
            println!("{}", version::version_info());
            Ok(())
        }
    }
}

fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(tmux) = &cli.tmux {
        config.tmux.clone_from(tmux);
    }
    if let Some(args) = &cli.tmux_args {
        config.tmux_args = config::split_args(args);
    }
    if let Some(dir) = &cli.layout_dir {
        config.layout_dir.clone_from(dir);
    }
}

fn executor(config: &Config, env: &TmuxEnvironment) -> ProcessExecutor {
    ProcessExecutor::new(config.tmux.clone())
        .with_extra_args(config.tmux_args.clone())
        .with_environment(env)
}

fn load(config: &Config, layout: &str, target: Option<String>, attach: bool, rename: bool) -> Result<()> {
    if layout.is_empty() {
        bail!("the layout name is empty");
    }

    let store = LayoutStore::new(&config.layout_dir);
    let paths = PathContext::from_process().context("Failed to resolve working directory")?;
    let mut session = store.load(layout, &paths)?;
    if let Some(target) = target.filter(|t| !t.is_empty()) {
        session.name = Some(target);
    }
    session.attach = attach;
    session.rename = rename;

    let env = TmuxEnvironment::from_process();
    let executor = executor(config, &env);
    let options = BuildOptions {
        split_anchor: config.split_anchor,
    };
    let built = SessionBuilder::new(&executor)
        .with_options(options)
        .build(&session)
        .with_context(|| format!("Failed to load layout {layout}"))?;

    info!("Created {} panes in session {}", built.pane_count(), built.name);
    println!("Session {} has been loaded", built.name);
    Ok(())
}

fn save(config: &Config, session: &str, target: Option<String>) -> Result<()> {
    if session.is_empty() {
        bail!("the session name is empty");
    }
    let file_name = target.filter(|t| !t.is_empty()).unwrap_or_else(|| session.to_string());

    let store = LayoutStore::new(&config.layout_dir);
    store.ensure_dir()?;

    let env = TmuxEnvironment::from_process();
    let executor = executor(config, &env);
    let filter = env.command_filter(config.placeholder_command.clone());
    let captured = SessionCapture::new(&executor, &filter)
        .capture(session)
        .with_context(|| format!("Failed to read session {session} from tmux"))?;

    let path = store.save(&file_name, &captured)?;
    println!(
        "The file {} has been written, please verify it: captured commands are often not what was originally run",
        path.display()
    );
    Ok(())
}

fn setup_logging(verbose: bool) {
    use tracing_subscriber::prelude::*;

    let default_filter = if verbose { "tmass=debug" } else { "tmass=info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .init();
}
