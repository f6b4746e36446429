//! CLI tool that recognizes the text of every PDF page and writes it into
//! the matching slide of a presentation.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use slidescribe_core::{
    Outcome, Pipeline, PipelineConfig, PipelineResult, TextEngine, TextFormat, DEFAULT_DPI,
    DEFAULT_IMAGES_DIR,
};
use slidescribe_ocr::{ColumnSplit, Tesseract};
use slidescribe_pdf::{PdfLoader, Pdftoppm};
use slidescribe_pptx::PptxDeck;
use std::fmt::Write as _;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

/// OCR each page of a PDF and write the text into the slide with the same
/// index.
#[derive(Parser, Debug)]
#[command(name = "slidescribe")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input PDF document
    pdf: PathBuf,

    /// Presentation (.pptx) with one slide per page
    #[arg(short, long)]
    deck: PathBuf,

    /// Save the presentation here instead of overwriting --deck
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Directory for page images and text files
    #[arg(short, long, default_value = DEFAULT_IMAGES_DIR)]
    images: PathBuf,

    /// Raster resolution in dots per inch
    #[arg(long, default_value_t = DEFAULT_DPI, value_parser = clap::value_parser!(u32).range(1..))]
    dpi: u32,

    /// Tesseract language code(s), e.g. "eng" or "eng+deu"
    #[arg(short, long, default_value = "eng")]
    lang: String,

    /// Recognize the left and right halves of each page separately
    #[arg(long)]
    split_columns: bool,

    /// Keep recognized text exactly as the engine returned it
    #[arg(long)]
    raw_text: bool,

    /// What to write into each slide
    #[arg(short, long, value_enum, default_value_t = FormatArg::Text)]
    format: FormatArg,

    /// How to print the run summary
    #[arg(short, long, value_enum, default_value_t = SummaryArg::Text)]
    summary: SummaryArg,

    /// Also place each page image on its slide, text left and image right
    #[arg(long)]
    embed_images: bool,

    /// Remove page artifacts from earlier runs first
    #[arg(long)]
    clean: bool,

    /// Path to the pdftoppm binary
    #[arg(long, default_value = "pdftoppm")]
    pdftoppm: PathBuf,

    /// Path to the tesseract binary
    #[arg(long, default_value = "tesseract")]
    tesseract: PathBuf,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    /// Recognized text
    Text,
    /// Patent front-page summary
    Patent,
}

impl From<FormatArg> for TextFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Text => TextFormat::Text,
            FormatArg::Patent => TextFormat::Patent,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum SummaryArg {
    Text,
    Json,
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    match run(&args) {
        Ok(result) => {
            match args.summary {
                SummaryArg::Text => print!("{}", format_summary(&result)),
                SummaryArg::Json => match serde_json::to_string_pretty(&result) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        eprintln!("Error: failed to serialize summary: {}", e);
                        return ExitCode::FAILURE;
                    }
                },
            }
            exit_code(result.outcome)
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Run the pipeline and save the presentation.
fn run(args: &Args) -> Result<PipelineResult> {
    let loader = PdfLoader::new();
    let renderer = Pdftoppm::new().with_binary(&args.pdftoppm);
    let tesseract = Tesseract::new()
        .with_binary(&args.tesseract)
        .with_language(&args.lang);
    let engine: Box<dyn TextEngine> = if args.split_columns {
        Box::new(ColumnSplit::new(tesseract))
    } else {
        Box::new(tesseract)
    };

    let config = PipelineConfig {
        dpi: args.dpi,
        images_dir: args.images.clone(),
        text_format: args.format.into(),
        normalize_text: !args.raw_text,
        clean_images: args.clean,
        embed_images: args.embed_images,
    };
    let pipeline = Pipeline::new(&loader, &renderer, engine.as_ref()).with_config(config);

    let mut deck = PptxDeck::open(&args.deck)
        .with_context(|| format!("Failed to open presentation {}", args.deck.display()))?;
    if args.embed_images {
        deck = deck.with_side_by_side_layout();
    }

    let verbose = args.verbose;
    let run = pipeline
        .begin(&args.pdf, &mut deck)
        .with_context(|| format!("Failed to start run for {}", args.pdf.display()))?;

    // Hidden for JSON summaries and when stderr is not a terminal.
    let visible = args.summary == SummaryArg::Text && std::io::stderr().is_terminal();
    let progress = progress_bar(run.document().page_count() as u64, visible);
    let bar = progress.clone();
    let mut run = run.with_progress(move |done, _| bar.set_position(done as u64));

    if verbose {
        progress.suspend(|| {
            eprintln!(
                "Processing {} ({} pages) into {}",
                run.document().path().display(),
                run.document().page_count(),
                run.artifacts().root().display()
            )
        });
    }
    while run.process_next().is_some() {}
    let result = run.finish();
    progress.finish_and_clear();

    match &args.output {
        Some(output) => deck
            .save_as(output)
            .with_context(|| format!("Failed to save presentation to {}", output.display()))?,
        None if deck.is_dirty() => deck
            .save()
            .with_context(|| format!("Failed to save presentation {}", args.deck.display()))?,
        None => log::info!("No slide changed; {} left as is", args.deck.display()),
    }
    if verbose {
        eprintln!("Written to: {}", deck.path().display());
    }

    Ok(result)
}

fn progress_bar(pages: u64, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(pages);
    if let Ok(style) = ProgressStyle::with_template("{msg} [{bar:40.cyan/blue}] {pos}/{len} pages") {
        bar.set_style(style.progress_chars("#>-"));
    }
    bar.set_message("Recognizing");
    bar
}

/// One line per page, then the success count.
fn format_summary(result: &PipelineResult) -> String {
    let mut out = String::new();
    for page in &result.pages {
        let _ = match &page.error {
            None => writeln!(out, "page {}: {}", page.page_index + 1, page.status),
            Some(reason) => writeln!(
                out,
                "page {}: {}: {}",
                page.page_index + 1,
                page.status,
                reason
            ),
        };
    }
    let _ = writeln!(out, "{}/{} succeeded", result.succeeded(), result.page_count);
    out
}

fn exit_code(outcome: Outcome) -> ExitCode {
    match outcome {
        Outcome::Succeeded => ExitCode::SUCCESS,
        Outcome::Degraded | Outcome::Cancelled => ExitCode::from(2),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slidescribe_core::{PageError, PageResult};

    fn result() -> PipelineResult {
        let failure = PageError::RecognitionFailed {
            page: 1,
            reason: "engine crashed".to_string(),
        };
        PipelineResult::new(
            PathBuf::from("doc.pdf"),
            2,
            vec![
                PageResult::succeeded(
                    0,
                    PathBuf::from("images/page_0000.png"),
                    PathBuf::from("images/page_0000.txt"),
                ),
                PageResult::failed(&failure, Some(PathBuf::from("images/page_0001.png")), None),
            ],
        )
    }

    #[test]
    fn test_text_summary() {
        assert_eq!(
            format_summary(&result()),
            "page 1: succeeded\npage 2: recognition failed: engine crashed\n1/2 succeeded\n"
        );
    }

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["slidescribe", "doc.pdf", "--deck", "deck.pptx"]).unwrap();
        assert_eq!(args.dpi, 300);
        assert_eq!(args.lang, "eng");
        assert_eq!(args.images, PathBuf::from("images"));
        assert_eq!(args.format, FormatArg::Text);
        assert_eq!(args.summary, SummaryArg::Text);
        assert!(args.output.is_none());
        assert!(!args.split_columns && !args.raw_text && !args.clean);
        assert!(!args.embed_images);
    }

    #[test]
    fn test_args_reject_zero_dpi() {
        let err = Args::try_parse_from(["slidescribe", "doc.pdf", "--deck", "d.pptx", "--dpi", "0"])
            .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);

        let args =
            Args::try_parse_from(["slidescribe", "doc.pdf", "--deck", "d.pptx", "--dpi", "1"]).unwrap();
        assert_eq!(args.dpi, 1);
    }

    #[test]
    fn test_args_embed_images() {
        let args =
            Args::try_parse_from(["slidescribe", "doc.pdf", "--deck", "d.pptx", "--embed-images"])
                .unwrap();
        assert!(args.embed_images);
    }

    #[test]
    fn test_hidden_progress_still_counts() {
        let bar = progress_bar(3, false);
        assert!(bar.is_hidden());
        bar.set_position(2);
        assert_eq!(bar.position(), 2);
    }

    #[test]
    fn test_visible_progress_tracks_page_count() {
        let bar = progress_bar(4, true);
        assert_eq!(bar.length(), Some(4));
        bar.set_position(4);
        bar.finish_and_clear();
        assert!(bar.is_finished());
    }

    #[test]
    fn test_args_require_deck() {
        assert!(Args::try_parse_from(["slidescribe", "doc.pdf"]).is_err());
    }

    #[test]
    fn test_args_patent_json() {
        let args = Args::try_parse_from([
            "slidescribe",
            "doc.pdf",
            "--deck",
            "deck.pptx",
            "--format",
            "patent",
            "--summary",
            "json",
        ])
        .unwrap();
        assert_eq!(TextFormat::from(args.format), TextFormat::Patent);
        assert_eq!(args.summary, SummaryArg::Json);
    }

    #[test]
    fn test_degraded_result_serializes() {
        let json = serde_json::to_value(result()).unwrap();
        assert_eq!(json["outcome"], "degraded");
        assert_eq!(json["pages"][1]["status"], "recognition_failed");
        assert!(json["pages"][0].get("error").is_none());
    }
}
