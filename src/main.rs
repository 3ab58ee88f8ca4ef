use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::exit;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{App, Arg, ArgMatches};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::{debug, error, info, LevelFilter};
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode, WriteLogger};

use slider_panel::{
    build_hsv_panel, hsv_bounds, HsvTriple, LoadOutcome, MemoryBackend, SliderPanel, SliderValues,
};
use terminal_ui::TerminalBackend;

mod slider_panel;
mod terminal_ui;

const DEFAULT_STATE_FILE: &str = "hsv_values.json5";
const KEY_POLL_INTERVAL: Duration = Duration::from_millis(50);

fn main() {
    let matches = App::new("HSV Slider")
        .version("0.1")
        .about("Tune HSV threshold bounds with sliders and keep them between sessions.")
        .arg(
            Arg::with_name("STATE_FILE")
                .help("File the slider values are loaded from and saved to")
                .default_value(DEFAULT_STATE_FILE)
                .index(1),
        )
        .arg(
            Arg::with_name("once")
                .long("once")
                .help("Print the bounds stored in STATE_FILE and exit, without opening the panel"),
        )
        .arg(
            Arg::with_name("log-file")
                .long("log-file")
                .value_name("FILE")
                .takes_value(true)
                .help("Write log messages to FILE while the panel is open"),
        )
        .arg(Arg::with_name("v").short("v").help("Print extra info"))
        .get_matches();

    let once = matches.is_present("once");

    if let Err(e) = init_logging(&matches, once) {
        eprintln!("Could not set up logging:\n{:?}", e);
        exit(1);
    }

    let path = PathBuf::from(
        matches
            .value_of("STATE_FILE")
            .unwrap_or(DEFAULT_STATE_FILE),
    );

    let result = if once {
        print_saved_bounds(&path)
    } else {
        run_interactive(&path)
    };

    if let Err(e) = result {
        error!("{:?}", e);
        if !once {
            eprintln!("Error: {:?}", e);
        }
        exit(1);
    }
}

fn init_logging(matches: &ArgMatches, once: bool) -> Result<()> {
    let verbosity = if matches.is_present("v") {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let config = ConfigBuilder::default()
        .set_thread_level(LevelFilter::Trace)
        .set_target_level(LevelFilter::Trace)
        .build();

    if once {
        TermLogger::init(verbosity, config, TerminalMode::Mixed, ColorChoice::Auto)?;
    } else if let Some(log_file) = matches.value_of("log-file") {
        let file = File::create(log_file)
            .with_context(|| format!("Could not create log file '{}'", log_file))?;
        WriteLogger::init(verbosity, config, file)?;
    }
    // Otherwise the panel owns the screen and log messages are dropped.

    Ok(())
}

fn print_saved_bounds(path: &Path) -> Result<()> {
    let mut panel = build_hsv_panel(MemoryBackend::new())?;

    match panel
        .load_values(path)
        .with_context(|| format!("Could not load slider values from '{}'", path.display()))?
    {
        LoadOutcome::Loaded(count) => info!("Showing bounds from {} saved values.", count),
        LoadOutcome::NotFound => info!("Showing the default bounds."),
    }

    let (lower, upper) = hsv_bounds(panel.get_values()?)?;
    panel.destroy()?;

    print_bounds(&lower, &upper);

    Ok(())
}

fn run_interactive(path: &Path) -> Result<()> {
    // Without this a panic would leave the terminal in raw mode on the alternate screen.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = terminal_ui::restore_terminal();
        default_hook(info);
    }));

    let mut panel = build_hsv_panel(TerminalBackend::new())?;

    let result = panel
        .load_values(path)
        .with_context(|| format!("Could not load slider values from '{}'", path.display()))
        .and_then(|outcome| {
            let notice = if outcome == LoadOutcome::NotFound {
                Some(format!(
                    "File '{}' not found. Using default values.",
                    path.display()
                ))
            } else {
                None
            };
            tune(&mut panel, path, notice)
        });

    // The terminal has to be restored before anything is printed, also when tuning failed.
    panel.destroy()?;

    let (lower, upper) = result?;
    print_bounds(&lower, &upper);

    Ok(())
}

/// Polls the sliders until a quit key is pressed, saving whenever they moved.
/// Returns the bounds at the moment of quitting. `notice` stays visible until the first change.
fn tune(
    panel: &mut SliderPanel<TerminalBackend>,
    path: &Path,
    mut notice: Option<String>,
) -> Result<(HsvTriple, HsvTriple)> {
    let mut last_saved: Option<SliderValues> = None;

    loop {
        let values = panel.get_values()?;
        let (lower, upper) = hsv_bounds(values)?;

        if last_saved.as_ref() != Some(values) {
            let snapshot = values.clone();
            panel
                .save_values(path)
                .with_context(|| format!("Could not save slider values to '{}'", path.display()))?;
            debug!("Bounds are now {:?} - {:?}", lower, upper);
            let bounds = format!(
                "lower {:?}  upper {:?}  saved to '{}'",
                lower,
                upper,
                path.display()
            );
            let status = match notice.take() {
                Some(notice) => format!("{}  {}", notice, bounds),
                None => bounds,
            };
            panel.backend_mut().set_status(status);
            last_saved = Some(snapshot);
        }

        if let Some(key) = panel.backend_mut().wait_key(KEY_POLL_INTERVAL)? {
            if is_quit_key(&key) {
                return Ok((lower, upper));
            }
        }
    }
}

/// `q`, Esc, or Ctrl-C, which raw mode delivers as a plain key press.
fn is_quit_key(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

fn print_bounds(lower: &HsvTriple, upper: &HsvTriple) {
    println!("lower_bound_hsv: {:?}", lower);
    println!("upper_bound_hsv: {:?}", upper);
}
