// cfront: lexer and declaration parser for a C subset

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use cfront::parser::{strip_comments, LanguageProfile};
use cfront::pipeline::{analyze, SourceUnit};
use cfront::printer;
use cfront::ui::App;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "cfront", version)]
#[command(about = "Tokenize C sources and list their top-level declarations")]
struct Cli {
    /// C source files to process
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Increase logging verbosity (-v: info, -vv+: debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Print declarations instead of tokens
    #[arg(long)]
    ast: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Keep comment tokens in the token listing
    #[arg(long)]
    keep_comments: bool,

    /// Treat NAME as an additional type keyword (repeatable)
    #[arg(long = "type-keyword", value_name = "NAME")]
    type_keywords: Vec<String>,

    /// Open the interactive viewer for the first file
    #[arg(long)]
    view: bool,
}

impl Cli {
    fn profile(&self) -> LanguageProfile {
        self.type_keywords
            .iter()
            .fold(LanguageProfile::default(), |profile, keyword| {
                profile.with_type_keyword(keyword.as_str())
            })
    }
}

fn init_tracing(verbose: u8) {
    let default_directive = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive)),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Render one analyzed unit the way the flags ask for.
fn render(cli: &Cli, unit: &SourceUnit) -> Result<String, serde_json::Error> {
    if cli.ast {
        return match cli.format {
            OutputFormat::Text => Ok(printer::format_declarations(&unit.declarations)),
            OutputFormat::Json => printer::to_json(&unit.declarations),
        };
    }

    let tokens = if cli.keep_comments {
        unit.tokens.clone()
    } else {
        strip_comments(&unit.tokens)
    };
    match cli.format {
        OutputFormat::Text => Ok(printer::format_tokens(&tokens)),
        OutputFormat::Json => printer::to_json(&tokens),
    }
}

/// Process one file; returns whether it succeeded.
fn process(cli: &Cli, profile: &LanguageProfile, path: &Path) -> bool {
    info!("Processing {}", path.display());

    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) => {
            error!("Failed to read {}: {}", path.display(), e);
            return false;
        }
    };

    let unit = match analyze(&source, profile) {
        Ok(unit) => unit,
        Err(e) => {
            error!("{}: {} error: {}", path.display(), e.stage(), e);
            return false;
        }
    };
    debug!(
        tokens = unit.tokens.len(),
        declarations = unit.declarations.len(),
        "Analyzed {}",
        path.display()
    );

    match render(cli, &unit) {
        Ok(output) => {
            if cli.files.len() > 1 {
                println!("==> {} <==", path.display());
            }
            print!("{}", output);
            true
        }
        Err(e) => {
            error!("Failed to serialize {}: {}", path.display(), e);
            false
        }
    }
}

fn view(path: &Path, profile: LanguageProfile) -> Result<(), Box<dyn std::error::Error>> {
    let source = fs::read_to_string(path)?;
    let mut app = App::new(source, profile);
    info!("Opening viewer for {}", path.display());

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let profile = cli.profile();
    debug!(keywords = ?profile.type_keywords(), "Language profile");

    if cli.view {
        // `files` is required, so there is always a first one
        let Some(path) = cli.files.first() else {
            return ExitCode::FAILURE;
        };
        return match view(path, profile) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                error!("Viewer failed: {}", e);
                ExitCode::FAILURE
            }
        };
    }

    let mut failed = 0;
    for path in &cli.files {
        if !process(&cli, &profile, path) {
            failed += 1;
        }
    }

    if failed > 0 {
        info!("{} of {} file(s) failed", failed, cli.files.len());
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_flags() {
        let cli = Cli::try_parse_from([
            "cfront",
            "-vv",
            "--ast",
            "--format",
            "json",
            "--type-keyword",
            "size_t",
            "--type-keyword",
            "bool",
            "a.c",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(cli.ast);
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.files, vec![PathBuf::from("a.c")]);

        let profile = cli.profile();
        assert!(profile.is_type_keyword("size_t"));
        assert!(profile.is_type_keyword("bool"));
        assert!(profile.is_type_keyword("int"));
    }

    #[test]
    fn test_cli_requires_file() {
        assert!(Cli::try_parse_from(["cfront"]).is_err());
    }

    #[test]
    fn test_render_token_listing() {
        let cli = Cli::try_parse_from(["cfront", "a.c"]).unwrap();
        let unit = analyze("int x; // note", &cli.profile()).unwrap();
        let text = render(&cli, &unit).unwrap();
        assert_eq!(text.lines().count(), 3);

        let cli = Cli::try_parse_from(["cfront", "--keep-comments", "a.c"]).unwrap();
        let text = render(&cli, &unit).unwrap();
        assert_eq!(text.lines().count(), 4);
        assert!(text.ends_with("(Comment) at (1:8, 1:14)\n"));
    }

    #[test]
    fn test_custom_type_keyword_reaches_parser() {
        let cli = Cli::try_parse_from(["cfront", "--ast", "--type-keyword", "size_t", "a.c"]).unwrap();
        let unit = analyze("size_t len;", &cli.profile()).unwrap();
        let text = render(&cli, &unit).unwrap();
        assert!(text.contains("name = len"));
        assert!(text.contains("type = [size_t]"));
    }
}
