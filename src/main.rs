use clap::{Args, Parser, Subcommand};
use colored::*;
use std::fs;
use std::io::{self, Read, Write};

use chatmark_lib::config::{SourcedConfig, StylePreference};
use chatmark_lib::exit_codes::exit;
use chatmark_lib::{MessageKind, RenderOptions, apply_markdown, highlight_url, render_message};

/// Path that stands for standard input
const STDIN_PATH: &str = "-";

#[derive(Parser)]
#[command(author, version, about, long_about = None, arg_required_else_help = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Control colored output: auto, always, never
    #[arg(long, global = true, default_value = "auto", value_parser = ["auto", "always", "never"], help = "Control colored output: auto, always, never")]
    color: String,

    /// Path to configuration file
    #[arg(long, global = true, help = "Path to configuration file")]
    config: Option<String>,

    /// Ignore all configuration files and use built-in defaults
    #[arg(
        long,
        global = true,
        help = "Ignore all configuration files and use built-in defaults"
    )]
    no_config: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Render messages: escape HTML, mark quotes, highlight URLs and apply markdown
    Render(RenderArgs),
    /// Apply inline markdown only
    Markdown {
        /// Files to read, each one a message (`-` or nothing reads stdin)
        paths: Vec<String>,
        /// Keep the formatting symbols inside the produced tags
        #[arg(long)]
        show_symbols: bool,
    },
    /// Wrap bare URLs in anchors only
    Urls {
        /// Files to read, each one a message (`-` or nothing reads stdin)
        paths: Vec<String>,
    },
    /// Show the effective configuration
    Config {
        /// Output format
        #[arg(long, default_value = "toml", value_parser = ["toml", "json"])]
        output: String,
    },
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Files to read, each one a message (`-` or nothing reads stdin)
    paths: Vec<String>,

    /// Markdown style: none, with-chars, without-chars
    #[arg(long)]
    style: Option<StylePreference>,

    /// Do not highlight URLs
    #[arg(long)]
    no_urls: bool,

    /// Do not escape HTML before formatting
    #[arg(long)]
    no_escape: bool,

    /// Do not mark quoted lines
    #[arg(long)]
    no_quotes: bool,

    /// Treat messages as actions (first line is never a quote)
    #[arg(long)]
    action: bool,
}

impl RenderArgs {
    fn options(&self, sourced: &SourcedConfig) -> RenderOptions {
        let mut options = RenderOptions::from(&sourced.config);
        if let Some(style) = self.style {
            options.style = style;
        }
        if self.no_urls {
            options.highlight_urls = false;
        }
        if self.no_escape {
            options.escape_html = false;
        }
        if self.no_quotes {
            options.detect_quotes = false;
        }
        if self.action {
            options.kind = MessageKind::Action;
        }
        options
    }
}

/// Load configuration, exiting with a tool error if it is invalid
fn load_config_with_cli_error_handling(config_path: Option<&str>, no_config: bool) -> SourcedConfig {
    match SourcedConfig::load_with_discovery(config_path, no_config) {
        Ok(sourced) => {
            if let Some(path) = &sourced.loaded_file {
                log::debug!("Using configuration from {}", path.display());
            }
            sourced
        }
        Err(e) => {
            eprintln!("{}: {}", "Config error".red().bold(), e);
            exit::tool_error();
        }
    }
}

fn read_message(path: &str) -> io::Result<String> {
    if path == STDIN_PATH {
        let mut content = String::new();
        io::stdin().read_to_string(&mut content)?;
        Ok(content)
    } else {
        fs::read_to_string(path)
    }
}

fn display_name(path: &str) -> &str {
    if path == STDIN_PATH { "<stdin>" } else { path }
}

/// Transform every input and write the results to stdout in order.
///
/// Unreadable inputs are reported and skipped. Returns false if any input
/// failed.
fn process_messages<F>(paths: &[String], transform: F) -> bool
where
    F: Fn(&str) -> String,
{
    let sources: Vec<&str> = if paths.is_empty() {
        vec![STDIN_PATH]
    } else {
        paths.iter().map(String::as_str).collect()
    };

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut all_ok = true;

    for source in sources {
        let content = match read_message(source) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("{}: Failed to read {}: {}", "Error".red().bold(), display_name(source), e);
                all_ok = false;
                continue;
            }
        };

        let rendered = transform(&content);
        log::debug!(
            "Formatted {} ({} -> {} bytes)",
            display_name(source),
            content.len(),
            rendered.len()
        );

        let written = if rendered.ends_with('\n') {
            out.write_all(rendered.as_bytes())
        } else {
            writeln!(out, "{rendered}")
        };
        if let Err(e) = written {
            eprintln!("{}: Failed to write output: {}", "Error".red().bold(), e);
            return false;
        }
    }

    if let Err(e) = out.flush() {
        eprintln!("{}: Failed to write output: {}", "Error".red().bold(), e);
        return false;
    }

    all_ok
}

fn print_config(sourced: &SourcedConfig, output: &str) {
    let printed = match output {
        "json" => sourced.config.to_json(),
        _ => sourced.config.to_toml().map(|toml| {
            let origin = sourced
                .loaded_file
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "built-in defaults".to_string());
            format!("# Configuration from {origin}\n{toml}")
        }),
    };

    match printed {
        Ok(text) => {
            print!("{text}");
            let _ = io::stdout().flush();
        }
        Err(e) => {
            eprintln!("{}: {}", "Error".red().bold(), e);
            exit::tool_error();
        }
    }
}

fn main() {
    // Reset SIGPIPE to default behavior on Unix so piping to `head` etc. works correctly.
    #[cfg(unix)]
    {
        // SAFETY: restoring the default SIGPIPE disposition before any output is written.
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }

    let cli = Cli::parse();

    match cli.color.as_str() {
        "always" => colored::control::set_override(true),
        "never" => colored::control::set_override(false),
        _ => colored::control::unset_override(),
    }

    env_logger::Builder::from_default_env()
        .filter_level(if cli.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        })
        .init();

    let sourced = load_config_with_cli_error_handling(cli.config.as_deref(), cli.no_config);

    let ok = match &cli.command {
        Commands::Render(args) => {
            let options = args.options(&sourced);
            log::debug!("Render options: {options:?}");
            process_messages(&args.paths, |message| render_message(message, &options))
        }
        Commands::Markdown { paths, show_symbols } => {
            process_messages(paths, |message| apply_markdown(message, *show_symbols))
        }
        Commands::Urls { paths } => process_messages(paths, highlight_url),
        Commands::Config { output } => {
            print_config(&sourced, output);
            true
        }
    };

    if ok {
        exit::success();
    }
    exit::processing_failure();
}
