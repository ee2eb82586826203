use anyhow::{Context, Result};
use clap::Parser;
use keypad::calculator::{Calculator, Locale, Projection, copy_to_clipboard};
use keypad::config::Config;
use keypad::input::{Dispatched, Key, dispatch, parse_line};
use keypad::logging::init_tracing;
use keypad::ui::render_display;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "keypad", version, about = "A four-function keypad calculator")]
struct Cli {
    /// Locale used to group digits (e.g. en-US, de-DE, en-IN, none)
    #[arg(long)]
    locale: Option<Locale>,

    /// Config file to read instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,

    /// Display width in characters
    #[arg(long)]
    width: Option<usize>,

    /// Print the display as JSON
    #[arg(long)]
    json: bool,

    /// Log engine activity to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Keys to press, e.g. `12.5 + 3 =`. Reads stdin when omitted.
    keys: Vec<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = Config::load_or_default(cli.config.as_deref())?;
    if let Some(locale) = cli.locale.clone() {
        config.locale = locale;
    }
    if let Some(width) = cli.width {
        config.width = width;
    }
    tracing::debug!(locale = %config.locale, width = config.width, "starting");

    let mut calculator = Calculator::with_locale(config.locale.clone());
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if !cli.keys.is_empty() {
        let keys = parse_line(&cli.keys.join(" "))?;
        press_all(&mut calculator, &keys);
        print_projection(&mut out, &calculator.format_display(), &config, cli.json)?;
        return Ok(());
    }

    for line in io::stdin().lock().lines() {
        let line = line.context("failed to read stdin")?;
        if matches!(line.trim(), "quit" | "exit") {
            break;
        }

        match parse_line(&line) {
            Ok(keys) => press_all(&mut calculator, &keys),
            Err(e) => {
                tracing::warn!(error = %e, "ignoring line");
                continue;
            }
        }

        print_projection(&mut out, &calculator.format_display(), &config, cli.json)?;
    }

    Ok(())
}

/// Dispatch keys in order, copying to the clipboard when asked.
fn press_all(calculator: &mut Calculator, keys: &[Key]) {
    for &key in keys {
        if dispatch(calculator, key) == Dispatched::CopyRequested {
            match copy_to_clipboard(calculator.current_operand()) {
                Ok(()) => tracing::info!(operand = calculator.current_operand(), "copied"),
                Err(e) => tracing::warn!(error = %e, "copy failed"),
            }
        }
    }
}

fn print_projection(
    out: &mut impl Write,
    projection: &Projection,
    config: &Config,
    json: bool,
) -> Result<()> {
    if json {
        serde_json::to_writer(&mut *out, projection).context("failed to encode display")?;
        writeln!(out)?;
    } else {
        writeln!(out, "{}", render_display(projection, config.width))?;
    }
    out.flush()?;
    Ok(())
}
