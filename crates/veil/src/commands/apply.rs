use std::path::PathBuf;

use clap::Args;

use veil_core::config::{self, Config};
use veil_core::{RunOutcome, StepOutcome, ThreadSleep, log_error};
use veil_windows::Desktop;

use super::options::{CloakArg, PresetArg, StyleArg};

const OK: &str = "\x1b[32m[ok]\x1b[0m";
const SKIP: &str = "\x1b[33m[skip]\x1b[0m";
const FAIL: &str = "\x1b[31m[fail]\x1b[0m";

/// Arguments for the `apply` subcommand.
///
/// Every flag overrides the matching value from the config file.
#[derive(Args)]
pub struct ApplyArgs {
    /// Exact title of the target window
    #[arg(long, short)]
    title: Option<String>,
    /// Config file to use instead of ~/.config/veil/config.toml
    #[arg(long)]
    config: Option<PathBuf>,
    /// Start from one of the recorded behavior presets
    #[arg(long, value_enum)]
    preset: Option<PresetArg>,
    /// Total lookups before giving up
    #[arg(long)]
    attempts: Option<u32>,
    /// Pause between lookups in milliseconds
    #[arg(long)]
    retry_delay_ms: Option<u64>,
    /// Window alpha, 0 (invisible) to 255 (opaque)
    #[arg(long)]
    opacity: Option<u8>,
    /// Extended style bits to add
    #[arg(long, value_enum)]
    style: Option<StyleArg>,
    /// Let mouse input fall through to the window beneath
    #[arg(long)]
    pass_through: bool,
    /// Do not exclude the window from capture
    #[arg(long)]
    no_cloak: bool,
    /// How to exclude the window from capture
    #[arg(long, value_enum)]
    cloak_method: Option<CloakArg>,
    /// Refuse to act unless the window belongs to this process ID
    #[arg(long)]
    expected_pid: Option<u32>,
    /// Keep running until Ctrl+C after applying
    #[arg(long)]
    hold: bool,
    /// Trace every step on stderr
    #[arg(long, short)]
    verbose: bool,
}

impl ApplyArgs {
    /// Layers preset and flags over `config`, then re-validates it.
    fn apply_to(&self, config: &mut Config) {
        if let Some(preset) = self.preset {
            config.apply_preset(preset.into());
        }
        if let Some(title) = &self.title {
            config.target.title = title.clone();
        }
        if let Some(pid) = self.expected_pid {
            config.target.expected_pid = Some(pid);
        }
        if let Some(attempts) = self.attempts {
            config.locate.max_attempts = attempts;
        }
        if let Some(delay) = self.retry_delay_ms {
            config.locate.retry_delay_ms = delay;
        }

        let p = &mut config.presentation;
        if let Some(opacity) = self.opacity {
            p.opacity = opacity;
        }
        if let Some(style) = self.style {
            p.style = style.into();
            p.pass_through_input = false;
        }
        if self.pass_through {
            p.pass_through_input = true;
        }
        if self.no_cloak {
            p.cloak = false;
        }
        if let Some(method) = self.cloak_method {
            p.cloak_method = method.into();
        }

        if self.hold {
            config.hold = true;
        }
        if self.verbose {
            config.logging.console = true;
            config.logging.level = "debug".into();
        }
        config.validate();
    }

    fn resolve(&self) -> Result<Config, String> {
        let mut config = match &self.config {
            Some(path) => config::load_from(path)?,
            None => config::load()?,
        };
        self.apply_to(&mut config);
        Ok(config)
    }
}

pub fn execute(args: &ApplyArgs) {
    let config = match args.resolve() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };
    veil_core::log::init(&config.logging);

    match veil_core::run(&Desktop, &ThreadSleep, &config) {
        Ok(outcome) => {
            print_outcome(&config.target.title, &outcome);
            if config.hold {
                hold();
            }
        }
        Err(e) => {
            log_error!("{e}");
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}

fn print_outcome(title: &str, outcome: &RunOutcome) {
    let owner = outcome
        .owner_pid
        .map(|pid| format!(", PID {pid}"))
        .unwrap_or_default();
    println!(
        "Found \"{title}\" ({}{owner}) after {} attempt(s)",
        outcome.handle, outcome.attempts
    );

    let report = &outcome.report;
    for (name, step) in [
        ("style", &report.style),
        ("opacity", &report.opacity),
        ("cloak", &report.cloak),
    ] {
        match step {
            StepOutcome::Applied => println!("  {OK} {name}"),
            StepOutcome::Skipped => println!("  {SKIP} {name}"),
            StepOutcome::Failed(e) => println!("  {FAIL} {name}: {e}"),
        }
    }
}

fn hold() {
    println!("Holding. Press Ctrl+C to exit.");
    if let Err(e) = veil_windows::wait_for_ctrl_c() {
        eprintln!("Warning: could not wait for Ctrl+C: {e}");
    }
}
