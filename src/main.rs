use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use uvie::{EngineConfig, InputMethod, Key, TonePlacement, ViEngine};

/// Types stdin through the engine line by line and prints what a text field
/// would show. `\x1b` in the input acts as ESC.
#[derive(Parser)]
#[command(name = "uvie")]
#[command(about = "Vietnamese Telex/VNI input engine demo")]
#[command(version)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Use VNI instead of Telex
    #[arg(long)]
    vni: bool,
    /// Classic tone placement (hòa instead of hoà)
    #[arg(long)]
    classic: bool,
    /// Capitalize the first word of each sentence
    #[arg(long)]
    capitalize: bool,
}

fn load_config(cli: &Cli) -> Result<EngineConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading config file {}", path.display()))?;
            text.parse::<EngineConfig>()
                .with_context(|| format!("parsing config file {}", path.display()))?
        }
        None => EngineConfig::default(),
    };
    if cli.vni {
        config = config.with_mode(InputMethod::Vni);
    }
    if cli.classic {
        config = config.with_tone_placement(TonePlacement::Classic);
    }
    if cli.capitalize {
        config = config.with_auto_capitalize(true);
    }
    Ok(config)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("uvie=warn")),
        )
        .init();

    let cli = Cli::parse();
    let config = match load_config(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let mut engine = ViEngine::with_config(Arc::new(config));
    let mut stdout = io::stdout().lock();

    for line in io::stdin().lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                eprintln!("error reading stdin: {e}");
                return ExitCode::FAILURE;
            }
        };
        let mut shown = String::new();
        for c in line.chars() {
            apply(&mut shown, Key::from_char(c), &mut engine);
        }
        apply(&mut shown, Key::Enter, &mut engine);
        if write!(stdout, "{shown}").and_then(|_| stdout.flush()).is_err() {
            break;
        }
    }
    ExitCode::SUCCESS
}

/// Applies the engine's answer to `key` onto `shown`.
fn apply(shown: &mut String, key: Key, engine: &mut ViEngine) {
    let delta = engine.handle(key);
    for _ in 0..delta.backspaces {
        shown.pop();
    }
    shown.push_str(&delta.insert);
    if delta.handled {
        return;
    }
    match key {
        Key::Char(c) => shown.push(c),
        Key::Space => shown.push(' '),
        Key::Enter => shown.push('\n'),
        Key::Tab => shown.push('\t'),
        Key::Backspace => {
            shown.pop();
        }
        Key::Escape | Key::Control => {}
    }
}
