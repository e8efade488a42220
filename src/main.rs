//! hmdoc — generate Markdown API docs from Hindley-Milner signature comments.
//!
//! - **dump mode**: `hmdoc 'src/**/*.js'` prints the extracted documentation
//!   as JSON (or Markdown with `--format markdown`)
//! - **template mode**: `hmdoc 'src/**/*.js' -t README.tpl.md -o README.md`
//!   renders a minijinja template with the documentation injected

use anyhow::{Context, Result};
use clap::Parser;
use hmdoc::batch::{self, DEFAULT_GLOB};
use hmdoc::render::{self, Renderer};
use log::{debug, warn};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "hmdoc",
    version,
    about = "Generate Markdown API docs from Hindley-Milner signature comments in JavaScript"
)]
struct Cli {
    /// Input files (glob patterns and directories supported)
    files: Vec<String>,

    /// Additional file glob, e.g. './src/**/*.js'. Defaults to ./*.js when no
    /// input is given.
    #[arg(short = 'f', long = "files", value_name = "GLOB")]
    globs: Vec<String>,

    /// Template file; `{{ hmdoc() }}` (or `{{#hmdoc}}{{/hmdoc}}`) marks where
    /// the documentation goes
    #[arg(short = 't', long)]
    template: Option<PathBuf>,

    /// Write output to this file instead of stdout
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Output format without a template: json (default) or markdown
    #[arg(long, default_value = "json")]
    format: String,

    /// Fail if any input file cannot be read or parsed
    #[arg(long)]
    strict: bool,
}

impl Cli {
    fn patterns(&self) -> Vec<String> {
        let patterns: Vec<String> = self.files.iter().chain(&self.globs).cloned().collect();
        if patterns.is_empty() {
            vec![DEFAULT_GLOB.to_string()]
        } else {
            patterns
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    run(&cli)
}

fn run(cli: &Cli) -> Result<()> {
    let patterns = cli.patterns();
    debug!("patterns: {:?}", patterns);

    let outcome = batch::parse(&patterns)?;
    for failure in &outcome.failures {
        warn!("skipping {}: {}", failure.path.display(), failure.error);
    }
    if cli.strict && !outcome.failures.is_empty() {
        anyhow::bail!("{} file(s) failed to parse", outcome.failures.len());
    }

    let rendered = match cli.template {
        Some(ref path) => hmdoc::render_template_file(&outcome.documentation, path)
            .with_context(|| format!("failed to render template: {}", path.display()))?,
        None => {
            let renderer: Box<dyn Renderer> = render::create_renderer(&cli.format)?;
            renderer.render(&outcome.documentation)?
        }
    };

    match cli.output {
        Some(ref path) => {
            let message = hmdoc::write_output(path, &rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("{}", message);
        }
        None => print!("{}", rendered),
    }

    Ok(())
}
