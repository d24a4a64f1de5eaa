//! Smartstyle - rewrites marker lines into Pandoc custom-style fenced divs.
//!
//! This binary runs the smartstyle step pipeline over scene files or
//! stdin and writes the result to stdout or back to the files.

mod cli;

use clap::Parser as ClapParser;
use cli::Cli;
use log::{debug, error, info, warn, LevelFilter};
use std::fs;
use std::io::{self, Read, Write};

use smartstyle_config::Config;
use smartstyle_core::{Result, Scene, SmartStyleError};
use smartstyle_steps::{builtin, replacer, Pipeline, StepContext, StepOutcome};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = <Cli as ClapParser>::parse();

    if cli.show_paths {
        cli::show_paths();
        return;
    }
    if cli.init_config {
        match Config::ensure_config_file() {
            Ok(path) => println!("{}", path.display()),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }
    if cli.list_steps {
        for info in builtin::builtin_step_info() {
            println!("{:<16}{}", info.name, info.description);
        }
        return;
    }
    if cli.describe {
        if let Err(e) = describe() {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
        return;
    }

    let config = load_config(&cli);
    let level = cli
        .log_level
        .clone()
        .or_else(|| config.as_ref().ok().map(|c| c.logging.level().to_string()))
        .unwrap_or_else(|| smartstyle_config::DEFAULT_LOG_LEVEL.to_string());
    setup_logging(&level);
    info!("Smartstyle v{}", env!("CARGO_PKG_VERSION"));

    let result = match config {
        Ok(config) => run(&cli, &config).await,
        Err(e) => Err(e),
    };
    if let Err(e) = result {
        error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Set up logging based on the log level argument.
fn setup_logging(level: &str) {
    env_logger::Builder::new()
        .filter_level(parse_level(level))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] {}: {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}

fn parse_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        _ => LevelFilter::Warn,
    }
}

/// Print every built-in step description as TOML.
fn describe() -> Result<()> {
    for step in builtin::builtin_steps() {
        let text = toml::to_string_pretty(&step.describe())
            .map_err(|e| SmartStyleError::Config(format!("Serialization error: {}", e)))?;
        println!("{}", text);
    }
    Ok(())
}

/// Load configuration: defaults, user config, `--config`, then CLI flags.
fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::load_with_override(cli.config.as_deref())?;
    config.options.merge(&cli.style_overrides());
    Ok(config)
}

/// Main application logic.
async fn run(cli: &Cli, config: &Config) -> Result<()> {
    let scenes = read_scenes(cli)?;
    debug!("Read {} scene(s)", scenes.len());
    let originals: Vec<Option<String>> = scenes.iter().map(|s| s.contents.clone()).collect();

    let values = config.options.to_values();
    for (id, value) in values.iter() {
        debug!("Option {} = {:?}", id, value);
    }
    let ctx = StepContext::new().with_options(replacer::STEP_NAME, values);
    let pipeline = Pipeline::with_builtins();
    let (scenes, reports) = pipeline.run(scenes, &ctx).await;

    for report in &reports {
        match &report.outcome {
            StepOutcome::Skipped { reason } if reason.is_incomplete_config() => {
                warn!("{}: not configured, scenes passed through", report.step);
            }
            outcome => info!("{}: {} replacement(s)", report.step, outcome.replacements()),
        }
    }

    if cli.in_place && !cli.should_read_stdin() {
        write_in_place(cli, &originals, &scenes)
    } else {
        if cli.in_place {
            warn!("--in-place ignored when reading from stdin");
        }
        write_stdout(&scenes)
    }
}

/// Read one scene per input file, or a single scene from stdin.
fn read_scenes(cli: &Cli) -> Result<Vec<Scene>> {
    if cli.should_read_stdin() {
        info!("Reading from stdin");
        let mut text = String::new();
        io::stdin().read_to_string(&mut text)?;
        return Ok(vec![Scene::new(text)]);
    }

    cli.files
        .iter()
        .map(|path| -> Result<Scene> {
            info!("Processing file: {}", path.display());
            let text = fs::read_to_string(path)?;
            Ok(Scene::new(text).with_title(path.display().to_string()))
        })
        .collect()
}

/// Write scene contents to stdout in order.
fn write_stdout(scenes: &[Scene]) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_scenes(&mut out, scenes)?;
    out.flush()?;
    Ok(())
}

/// Concatenate scene contents, starting each scene on a fresh line.
fn write_scenes<W: Write>(out: &mut W, scenes: &[Scene]) -> io::Result<()> {
    let mut at_line_start = true;
    for contents in scenes.iter().filter_map(|s| s.contents.as_deref()) {
        if contents.is_empty() {
            continue;
        }
        if !at_line_start {
            out.write_all(b"\n")?;
        }
        out.write_all(contents.as_bytes())?;
        at_line_start = contents.ends_with('\n');
    }
    Ok(())
}

/// Write each scene back to the file it came from, skipping unchanged ones.
fn write_in_place(cli: &Cli, originals: &[Option<String>], scenes: &[Scene]) -> Result<()> {
    for ((path, original), scene) in cli.files.iter().zip(originals).zip(scenes) {
        let Some(contents) = &scene.contents else {
            continue;
        };
        if original.as_ref() != Some(contents) {
            debug!("Rewriting {}", path.display());
            fs::write(path, contents)?;
        }
    }
    Ok(())
}
