//! camkeep - Persist webcam control settings on Linux.
//!
//! Provides an interactive setup plus scriptable subcommands with
//! human-friendly and JSON (robot mode) output.
#![forbid(unsafe_code)]

use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};

use clap::Parser;
use tracing::debug;

use camkeep::cli::{self, Cli, Commands};
use camkeep::config::{self, AppConfig};
use camkeep::error::{CamkeepError, Result};
use camkeep::install::Installer;
use camkeep::output::{BuildInfo, Output, OutputMode, ScriptContents};
use camkeep::prompt::{DialogPicker, LinePrompter};
use camkeep::system::{CommandElevator, SystemRunner};
use camkeep::wizard::Wizard;
use camkeep::{device, logging, parser, script};

/// Build information embedded at compile time.
mod build_info {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");

    pub fn git_sha() -> &'static str {
        option_env!("VERGEN_GIT_SHA").unwrap_or("unknown")
    }

    pub fn git_dirty() -> bool {
        option_env!("VERGEN_GIT_DIRTY") == Some("true")
    }

    pub fn build_timestamp() -> &'static str {
        option_env!("VERGEN_BUILD_TIMESTAMP").unwrap_or("unknown")
    }

    pub fn rustc_semver() -> &'static str {
        option_env!("VERGEN_RUSTC_SEMVER").unwrap_or("unknown")
    }

    pub fn target() -> &'static str {
        option_env!("VERGEN_CARGO_TARGET_TRIPLE").unwrap_or("unknown")
    }
}

fn main() {
    let cli = Cli::parse();

    // Handle no-color flag or non-TTY
    if cli.no_color || !io::stdout().is_terminal() {
        console::set_colors_enabled(false);
    }
    if cli.no_color || !io::stderr().is_terminal() {
        console::set_colors_enabled_stderr(false);
    }

    logging::init_logging(cli.use_json(), cli.verbose, cli.quiet);

    let out = OutputMode::from_cli(&cli).into_output();
    if let Err(e) = run(&cli, out.as_ref()) {
        out.error(&e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli, out: &dyn Output) -> Result<()> {
    match &cli.command {
        None | Some(Commands::Setup) => cmd_setup(cli, out),
        Some(Commands::List) => cmd_list(cli, out),
        Some(Commands::Parse(args)) => cmd_parse(out, args),
        Some(Commands::Show(args)) => cmd_show(cli, out, args),
        Some(Commands::Generate(args)) => cmd_generate(cli, out, args),
        Some(Commands::Apply(args)) => cmd_apply(cli, out, args),
        Some(Commands::Install(args)) => cmd_install(cli, out, args),
        Some(Commands::Version) => {
            cmd_version(out);
            Ok(())
        }
        Some(Commands::Completions(args)) => {
            cmd_completions(args);
            Ok(())
        }
    }
}

fn load_config(cli: &Cli) -> Result<AppConfig> {
    let config = config::load_config(cli.config.as_deref())?;
    debug!(?config, "Configuration loaded");
    Ok(config)
}

/// `--script` if given (with `~` expanded), else the configured path.
fn script_path(config: &AppConfig, explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(path) => config::expand_user(&path.to_string_lossy()),
        None => Ok(config.script_path.clone()),
    }
}

// === Commands ===

fn cmd_setup(cli: &Cli, out: &dyn Output) -> Result<()> {
    let config = load_config(cli)?;
    let runner = SystemRunner::new();
    let elevator = CommandElevator::new(&runner, config.elevate_command.clone());
    let installer = Installer::new(&config, &runner, &elevator);
    let picker = DialogPicker;
    let wizard = Wizard::new(&config, &runner, installer, &picker);

    // In robot mode stdout carries only the JSON summary
    let summary = if cli.use_json() {
        wizard.run(&mut LinePrompter::stdin_stderr())?
    } else {
        wizard.run(&mut LinePrompter::stdio())?
    };
    out.setup_summary(&summary);
    Ok(())
}

fn cmd_list(cli: &Cli, out: &dyn Output) -> Result<()> {
    let config = load_config(cli)?;
    let devices = device::list_devices(&config.device_dir, &SystemRunner::new(), &config.control_tool)?;
    if devices.is_empty() {
        return Err(CamkeepError::NoDevicesFound);
    }
    out.device_list(&devices);
    Ok(())
}

fn cmd_parse(out: &dyn Output, args: &cli::ParseArgs) -> Result<()> {
    let parsed = parser::parse_file(&args.file)?;
    if parsed.settings.is_empty() {
        return Err(CamkeepError::NoSettingsFound { path: parsed.path });
    }
    out.parsed_settings(&parsed);
    Ok(())
}

fn cmd_show(cli: &Cli, out: &dyn Output, args: &cli::ScriptArgs) -> Result<()> {
    let config = load_config(cli)?;
    let path = script_path(&config, args.script.as_deref())?;
    let text = script::read_script(&path)?;

    out.script_contents(&ScriptContents {
        path: path.display().to_string(),
        device: script::script_device(&text),
        settings: script::parse_script(&text),
    });
    Ok(())
}

fn cmd_generate(cli: &Cli, out: &dyn Output, args: &cli::GenerateArgs) -> Result<()> {
    let config = load_config(cli)?;
    let parsed = parser::parse_file(&args.file)?;
    if parsed.settings.is_empty() {
        return Err(CamkeepError::NoSettingsFound { path: parsed.path });
    }

    let path = script_path(&config, args.output.as_deref())?;
    script::write_script(&path, &parsed.settings, &args.device, &config.control_tool)?;
    out.script_written(&path.display().to_string(), &args.device, &parsed.settings);
    Ok(())
}

fn cmd_apply(cli: &Cli, out: &dyn Output, args: &cli::ScriptArgs) -> Result<()> {
    let config = load_config(cli)?;
    let path = script_path(&config, args.script.as_deref())?;
    let output = script::run_script(&SystemRunner::new(), &path)?;
    out.script_applied(&path.display().to_string(), &output);
    Ok(())
}

fn cmd_install(cli: &Cli, out: &dyn Output, args: &cli::InstallArgs) -> Result<()> {
    let config = load_config(cli)?;
    let path = script_path(&config, args.script.as_deref())?;
    if !path.is_file() {
        return Err(CamkeepError::ScriptNotFound {
            path: path.display().to_string(),
        });
    }

    let runner = SystemRunner::new();
    let elevator = CommandElevator::new(&runner, config.elevate_command.clone());
    let report = Installer::new(&config, &runner, &elevator).install_all(&args.device, &path, args.boot);
    out.install_report(&report);
    Ok(())
}

fn cmd_version(out: &dyn Output) {
    out.version_info(&BuildInfo {
        version: build_info::VERSION,
        git_sha: build_info::git_sha(),
        git_dirty: build_info::git_dirty(),
        build_timestamp: build_info::build_timestamp(),
        rustc_version: build_info::rustc_semver(),
        target: build_info::target(),
    });
}

fn cmd_completions(args: &cli::CompletionsArgs) {
    use clap::CommandFactory;
    clap_complete::generate(args.shell, &mut Cli::command(), "camkeep", &mut io::stdout());
}
