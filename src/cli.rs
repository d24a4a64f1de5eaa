//! Command-line interface for smartstyle.

use clap::Parser;
use smartstyle_config::StyleOptions;
use std::path::PathBuf;

/// Smartstyle - wraps marker-prefixed lines into Pandoc custom-style blocks.
///
/// Each input file is treated as one scene. Lines starting with the marker
/// followed by whitespace become a fenced div carrying the style name.
#[derive(Parser, Debug)]
#[command(
    name = "smartstyle",
    author = "Smartstyle Contributors",
    version,
    about = "Wraps marker-prefixed lines into Pandoc custom-style fenced divs",
    after_help = "Examples:\n  \
                  cat scene.md | smartstyle\n  \
                  smartstyle -m '>l' -s LeftAligned chapter1.md chapter2.md\n  \
                  smartstyle -i -c manuscript.toml scenes/*.md"
)]
pub struct Cli {
    /// Scene files to process (reads one scene from stdin if not provided)
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Line marker, overrides the configured one
    #[arg(short = 'm', long = "marker")]
    pub marker: Option<String>,

    /// Style name, overrides the configured one
    #[arg(short = 's', long = "style-name")]
    pub style_name: Option<String>,

    /// Use a custom config file or inline TOML
    #[arg(short = 'c', long = "config")]
    pub config: Option<String>,

    /// Set the logging level (trace, debug, info, warn, error)
    #[arg(short = 'l', long = "loglevel")]
    pub log_level: Option<String>,

    /// Rewrite the input files instead of printing to stdout
    #[arg(short = 'i', long = "in-place")]
    pub in_place: bool,

    /// Print the step description as TOML and exit
    #[arg(long = "describe")]
    pub describe: bool,

    /// List built-in steps and exit
    #[arg(long = "list-steps")]
    pub list_steps: bool,

    /// Show configuration paths and exit
    #[arg(long = "paths")]
    pub show_paths: bool,

    /// Write the default config file if missing and exit
    #[arg(long = "init-config")]
    pub init_config: bool,
}

impl Cli {
    /// Check if we should read from stdin.
    pub fn should_read_stdin(&self) -> bool {
        self.files.is_empty()
    }

    /// Options given on the command line; unset flags stay `None`.
    pub fn style_overrides(&self) -> StyleOptions {
        StyleOptions {
            marker: self.marker.clone(),
            style_name: self.style_name.clone(),
        }
    }
}

/// Show paths information.
pub fn show_paths() {
    use smartstyle_config::Config;

    let config_path = Config::config_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(not found)".to_string());

    println!("paths:");
    println!("  config                {}", config_path);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_default() {
        let cli = Cli::parse_from(["smartstyle"]);
        assert!(cli.files.is_empty());
        assert!(cli.should_read_stdin());
        assert_eq!(cli.log_level, None);
        assert!(!cli.in_place);
        assert_eq!(cli.style_overrides(), StyleOptions::default());
    }

    #[test]
    fn test_cli_parse_with_files() {
        let cli = Cli::parse_from(["smartstyle", "a.md", "b.md"]);
        assert_eq!(cli.files, vec![PathBuf::from("a.md"), PathBuf::from("b.md")]);
        assert!(!cli.should_read_stdin());
    }

    #[test]
    fn test_cli_parse_with_options() {
        let cli = Cli::parse_from([
            "smartstyle",
            "-m", ">l",
            "-s", "LeftAligned",
            "-l", "debug",
            "--in-place",
            "scene.md",
        ]);
        assert_eq!(cli.style_overrides(), StyleOptions::new(">l", "LeftAligned"));
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        assert!(cli.in_place);
    }

    #[test]
    fn test_cli_parse_flags() {
        let cli = Cli::parse_from([
            "smartstyle",
            "--describe",
            "--paths",
            "--list-steps",
            "--init-config",
        ]);
        assert!(cli.describe);
        assert!(cli.init_config);
        assert!(cli.show_paths);
        assert!(cli.list_steps);
    }
}
