//! # Vitae CLI
//!
//! Usage:
//!   vitae resume.md --name "Jane Doe" -o resume.pdf
//!   vitae resume.json -o resume.pdf
//!   cat resume.md | vitae --name "Jane Doe" --mode scale-to-fit
//!   vitae --example > resume.md

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};

use vitae::compose::Resume;
use vitae::font::FontContext;
use vitae::layout::LayoutEngine;
use vitae::model::{Document, LayoutConfig, LayoutMode};
use vitae::VitaeError;

#[derive(Parser)]
#[command(name = "vitae")]
#[command(version)]
#[command(about = "Typeset a Markdown resume into A4 PDF pages", long_about = None)]
struct Cli {
    /// Markdown resume, or a .json structured resume. Reads stdin when omitted.
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Name on the title line. Defaults to fullName for JSON resumes.
    #[arg(short, long)]
    name: Option<String>,

    /// Output PDF path
    #[arg(short, long, value_name = "FILE", default_value = "resume.pdf")]
    output: PathBuf,

    /// Layout config (JSON)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override the config's layout mode
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,

    /// Print the computed layout as JSON instead of writing a PDF
    #[arg(long)]
    layout_json: bool,

    /// Print an example Markdown resume and exit
    #[arg(long)]
    example: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum ModeArg {
    /// Break onto new pages as content fills them
    Paginate,
    /// Shrink everything onto a single page
    ScaleToFit,
}

impl From<ModeArg> for LayoutMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Paginate => LayoutMode::Paginate,
            ModeArg::ScaleToFit => LayoutMode::ScaleToFit,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    if cli.example {
        print!("{}", example_resume_markdown());
        return;
    }

    if let Err(e) = run(&cli) {
        log::error!("resume export failed: {}", e);
        eprintln!("✗ Failed to generate PDF: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), VitaeError> {
    let mut config = match &cli.config {
        Some(path) => LayoutConfig::from_json(&fs::read_to_string(path)?)?,
        None => LayoutConfig::default(),
    };
    if let Some(mode) = cli.mode {
        config = config.with_mode(mode.into());
    }

    let document = read_document(cli.input.as_deref(), cli.name.as_deref())?;
    if document.subject_name.is_empty() {
        log::warn!("no subject name given; the title line will render as a heading");
    }

    if cli.layout_json {
        config.validate()?;
        let pages = LayoutEngine::new(config).layout(&document, &FontContext::new());
        println!("{}", serde_json::to_string_pretty(&pages)?);
        return Ok(());
    }

    let written = vitae::render_to_file(&document, &config, &cli.output)?;
    eprintln!("✓ Written {} bytes to {}", written, cli.output.display());
    Ok(())
}

fn read_document(input: Option<&Path>, name: Option<&str>) -> Result<Document, VitaeError> {
    let text = match input {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let is_json = input
        .and_then(|p| p.extension())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        let mut document = Resume::from_json(&text)?.to_document();
        if let Some(name) = name {
            document.subject_name = name.to_string();
        }
        Ok(document)
    } else {
        Ok(Document::from_markdown(&text, name.unwrap_or_default()))
    }
}

fn example_resume_markdown() -> &'static str {
    r##"## <div align="center">Jane Doe</div>

<div align="center">

jane@example.com | 555-0142 | linkedin.com/in/janedoe

</div>





## Professional Summary

Backend engineer with eight years of experience building reliable data systems, from ingestion pipelines to the storage engines underneath them.



## Skills

Rust, Go, PostgreSQL, Kafka, Kubernetes, observability



## Work Experience

### Staff Engineer @ Acme Analytics
Jan 2021 - Present

- Led the rewrite of the event ingestion pipeline
- Cut p99 query latency by 60%

### Software Engineer @ Initech
Jun 2016 - Dec 2020

Built and operated the billing platform serving two million customers across four regions, including the reconciliation jobs and their alerting.
"##
}
