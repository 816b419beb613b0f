//! Command-line front end for word-overlay.

use std::io::{
    Read,
    Write,
};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{
    Context,
    Result,
};
use clap::{
    Parser,
    Subcommand,
};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use word_overlay::document::{
    HtmlDocument,
    PageWalker,
};
use word_overlay::workspace::Workspace;

/// Environment variable holding the log filter.
const LOG_ENV: &str = "WORD_OVERLAY_LOG";

#[derive(Parser)]
#[command(name = "word-overlay")]
#[command(version)]
#[command(about = "Word-by-word translation overlay for rendered pages")]
struct Cli {
    /// Workspace root holding .word-overlay.json and the dictionaries
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    /// Log progress to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate text (read from stdin when no text is given)
    Translate {
        /// Target language (default: the current language)
        #[arg(short, long)]
        lang: Option<String>,

        /// Text to translate
        #[arg(value_name = "TEXT")]
        text: Vec<String>,
    },

    /// Translate an HTML page
    Page {
        /// HTML file to translate
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Target language (default: the current language)
        #[arg(short, long)]
        lang: Option<String>,

        /// Write the result to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show or change the current language
    Language {
        #[command(subcommand)]
        action: LanguageAction,
    },

    /// Check dictionaries for problems
    Check,
}

#[derive(Subcommand)]
enum LanguageAction {
    /// Print the current language
    Get,
    /// Select a language
    Set {
        #[arg(value_name = "CODE")]
        code: String,
    },
    /// Switch between the two toggle languages
    Toggle,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let _guard = init_tracing(cli.verbose);

    let mut workspace = Workspace::open(&cli.root)
        .with_context(|| format!("Failed to open workspace '{}'", cli.root.display()))?;
    let mut stdout = std::io::stdout().lock();

    match cli.command {
        Commands::Translate { lang, text } => {
            let text = if text.is_empty() {
                let mut input = String::new();
                std::io::stdin().read_to_string(&mut input).context("Failed to read stdin")?;
                input
            } else {
                text.join(" ")
            };

            let overlay = workspace.overlay();
            let language = lang.as_deref().unwrap_or_else(|| overlay.language());
            let translated = overlay.translate_with(&text, language);
            write!(stdout, "{translated}")?;
            if !translated.ends_with('\n') {
                writeln!(stdout)?;
            }
        }
        Commands::Page { file, lang, output } => {
            let source = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read '{}'", file.display()))?;
            let mut page = HtmlDocument::parse(&source)?;

            let overlay = workspace.overlay();
            let language = lang.as_deref().unwrap_or_else(|| overlay.language());
            let summary = PageWalker::new(overlay.translator(), language, overlay.walk_options())
                .translate_page(&mut page);
            tracing::info!(
                file = %file.display(),
                language,
                text_nodes = summary.text_nodes_translated,
                attributes = summary.attributes_translated,
                "Translated page"
            );

            match output {
                Some(output) => std::fs::write(&output, page.to_html())
                    .with_context(|| format!("Failed to write '{}'", output.display()))?,
                None => write!(stdout, "{}", page.to_html())?,
            }
        }
        Commands::Language { action } => {
            let overlay = workspace.overlay_mut();
            match action {
                LanguageAction::Get => {}
                LanguageAction::Set { code } => overlay.set_language(code),
                LanguageAction::Toggle => {
                    overlay.toggle_language();
                }
            }
            writeln!(stdout, "{}", overlay.language())?;
        }
        Commands::Check => {
            for failure in workspace.failures() {
                writeln!(stdout, "error: {failure}")?;
            }
            let issues = workspace.diagnostics();
            for issue in &issues {
                writeln!(stdout, "{issue}")?;
            }
            writeln!(
                stdout,
                "{} dictionary file(s) checked, {} issue(s), {} failed to load",
                workspace.sources().len(),
                issues.len(),
                workspace.failures().len()
            )?;

            if !workspace.failures().is_empty() {
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Logs to stderr so stdout carries only command output.
fn init_tracing(verbose: bool) -> WorkerGuard {
    let (writer, guard) = tracing_appender::non_blocking(std::io::stderr());
    let default_level = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).with_writer(writer).with_target(false).init();
    guard
}
