use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use wiki_compare_config::{AppConfig, OutputFormat};
use wiki_diff::{
    ColorScheme, Compare, CompareResponse, DiffBlockExtractor, DiffExtraction, DiffPalette,
    ExtractionOutcome,
};

mod render;

use render::{render_diff, render_tinted, RenderOptions};

#[derive(Debug, Parser)]
#[command(name = "wiki-compare", version, about = "Render MediaWiki revision diffs and tint wikitext")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Render an `action=compare` response as a structured diff
    Diff(DiffArgs),
    /// Print wikitext with editor syntax tinting
    Tint(TintArgs),
}

#[derive(Debug, Args)]
struct DiffArgs {
    /// File holding the response (reads stdin when omitted)
    file: Option<PathBuf>,

    /// Input is the diff table HTML instead of compare JSON
    #[arg(long)]
    raw_html: bool,

    /// Print the extracted blocks as JSON
    #[arg(long)]
    json: bool,

    /// Colour scheme for text output (light or dark)
    #[arg(long)]
    scheme: Option<ColorScheme>,

    /// Disable ANSI colours
    #[arg(long)]
    no_color: bool,
}

#[derive(Debug, Args)]
struct TintArgs {
    /// File holding the wikitext (reads stdin when omitted)
    file: Option<PathBuf>,

    /// Print the tinted runs as JSON
    #[arg(long)]
    json: bool,

    /// Disable ANSI colours
    #[arg(long)]
    no_color: bool,
}

/// What the `diff` command prints on stdout and stderr
#[derive(Debug)]
struct DiffOutput {
    stdout: String,
    warning: Option<&'static str>,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config = AppConfig::load();
    log::debug!("Running {:?} with {:?}", cli.command, config);

    match cli.command {
        Command::Diff(args) => run_diff(args, &config).await,
        Command::Tint(args) => run_tint(args),
    }
}

async fn run_diff(args: DiffArgs, config: &AppConfig) -> Result<()> {
    let input = read_input(args.file.as_deref())?;
    let compare = decode_compare(input, args.raw_html)?;

    // HTML parsing is CPU bound; keep it off the async worker.
    let extractor = DiffBlockExtractor::new();
    let (compare, extraction) = tokio::task::spawn_blocking(move || {
        let extraction = compare.extract(&extractor);
        (compare, extraction)
    })
    .await
    .context("Diff extraction task failed")?;

    let output = diff_output(
        &args,
        config,
        &compare,
        &extraction,
        use_color(args.no_color),
    )?;
    if let Some(warning) = output.warning {
        log::warn!("Input did not look like a MediaWiki diff table");
        eprintln!("warning: {}", warning);
    }
    print!("{}", output.stdout);

    Ok(())
}

/// Read the input as a compare response, or as a bare table body with `--raw-html`
fn decode_compare(input: String, raw_html: bool) -> Result<Compare> {
    if raw_html {
        return Ok(Compare::from_body(input));
    }

    Ok(CompareResponse::from_json(&input)
        .context("Failed to read compare response")?
        .compare)
}

/// Select the output format and scheme, command line flags over config
fn diff_output(
    args: &DiffArgs,
    config: &AppConfig,
    compare: &Compare,
    extraction: &DiffExtraction,
    color: bool,
) -> Result<DiffOutput> {
    let warning = (extraction.outcome == ExtractionOutcome::Unrecognized)
        .then_some("no diff rows recognised in the input");

    let format = if args.json {
        OutputFormat::Json
    } else {
        config.output
    };

    let stdout = match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(extraction)
                .context("Failed to serialize diff blocks")?;
            format!("{}\n", json)
        }
        OutputFormat::Text => {
            let scheme = args.scheme.unwrap_or(config.color_scheme);
            let opts = RenderOptions {
                palette: DiffPalette::for_scheme(scheme),
                color,
                show_line_hints: config.show_line_hints,
                no_diff_message: config.no_diff_message.clone(),
            };
            render_diff(compare, extraction, &opts)
        }
    };

    Ok(DiffOutput { stdout, warning })
}

fn run_tint(args: TintArgs) -> Result<()> {
    let input = read_input(args.file.as_deref())?;
    let runs = wikitext_tint::tint_wikitext(&input);

    if args.json {
        let json = serde_json::to_string_pretty(&runs).context("Failed to serialize runs")?;
        println!("{}", json);
    } else if use_color(args.no_color) {
        print!("{}", render_tinted(&runs));
    } else {
        print!("{}", input);
    }

    Ok(())
}

fn use_color(disabled: bool) -> bool {
    !disabled && std::env::var_os("NO_COLOR").is_none()
}

fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            Ok(buf)
        }
    }
}
