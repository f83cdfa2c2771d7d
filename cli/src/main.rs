//! wordpdf CLI - Word to PDF conversion tool

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use wordpdf::convert::{
    convert_batch, default_output_path, spawn_conversion, BatchJob, ConversionEvent,
    ConverterRegistry,
};
use wordpdf::{
    ConvertOptions, JsonFormat, Length, Margins, PageSize, ReadOptions, RenderOptions, WordPdf,
};

#[derive(Parser)]
#[command(name = "wordpdf")]
#[command(version)]
#[command(about = "Convert Word documents to PDF with formatting preserved", long_about = None)]
struct Cli {
    /// Input Word document
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output PDF file
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(flatten)]
    layout: LayoutArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Page and layout settings shared by the commands that lay out pages.
#[derive(Args, Clone, Debug)]
struct LayoutArgs {
    /// Page size: a4, letter, legal or WIDTHxHEIGHT (e.g. 210mmx297mm)
    #[arg(long, env = "WORDPDF_PAGE_SIZE", default_value = "a4")]
    page_size: PageSize,

    /// Margin on every side (e.g. 72pt, 1in, 2.5cm)
    #[arg(long, env = "WORDPDF_MARGIN", default_value = "72pt")]
    margin: Length,

    /// Turn the page so its longer side is horizontal
    #[arg(long)]
    landscape: bool,

    /// Lay out plain text only, without formatting
    #[arg(long)]
    plain: bool,

    /// Use the page size and margins declared by the document
    #[arg(long)]
    use_document_geometry: bool,

    /// Write uncompressed page content
    #[arg(long)]
    no_compress: bool,

    /// Skip invalid attributes and properties instead of failing
    #[arg(long)]
    lenient: bool,
}

impl LayoutArgs {
    fn convert_options(&self) -> ConvertOptions {
        let page_size = if self.landscape {
            self.page_size.landscape()
        } else {
            self.page_size
        };

        let render = RenderOptions::new()
            .with_page_size(page_size)
            .with_margins(Margins::uniform(self.margin.to_points()))
            .with_compression(!self.no_compress);

        let read = if self.lenient {
            ReadOptions::new().lenient()
        } else {
            ReadOptions::new()
        };

        let mut options = ConvertOptions::new()
            .with_read_options(read)
            .with_render_options(render)
            .with_document_geometry(self.use_document_geometry);
        if self.plain {
            options = options.plain();
        }
        options
    }

    fn builder(&self) -> WordPdf {
        let options = self.convert_options();
        let mut builder = WordPdf::new()
            .with_page_size(options.render.page_size)
            .with_margin(self.margin.to_points());
        if self.lenient {
            builder = builder.lenient();
        }
        if self.plain {
            builder = builder.plain();
        }
        if self.use_document_geometry {
            builder = builder.with_document_geometry();
        }
        builder
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a Word document to PDF
    Convert {
        /// Input Word document
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output PDF file (defaults to the input name with .pdf)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// Convert several Word documents in parallel
    Batch {
        /// Input Word documents
        #[arg(value_name = "FILES", required = true)]
        inputs: Vec<PathBuf>,

        /// Output directory (defaults to each input's directory)
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// Print the layout blocks of a document as JSON
    Blocks {
        /// Input Word document
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Skip invalid attributes and properties instead of failing
        #[arg(long)]
        lenient: bool,
    },

    /// Show the paginated layout as text
    Preview {
        /// Input Word document
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// Show document information
    Info {
        /// Input Word document
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Convert {
            input,
            output,
            layout,
        }) => cmd_convert(&input, output.as_deref(), &layout),
        Some(Commands::Batch {
            inputs,
            output,
            layout,
        }) => cmd_batch(inputs, output.as_deref(), &layout),
        Some(Commands::Blocks {
            input,
            output,
            compact,
            lenient,
        }) => cmd_blocks(&input, output.as_deref(), compact, lenient),
        Some(Commands::Preview { input, layout }) => cmd_preview(&input, &layout),
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: convert if input is provided
            if let Some(input) = cli.input {
                cmd_convert(&input, cli.output.as_deref(), &cli.layout)
            } else {
                println!("{}", "Usage: wordpdf <FILE> [OUTPUT]".yellow());
                println!("       wordpdf --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_convert(
    input: &Path,
    output: Option<&Path>,
    layout: &LayoutArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output_path(input));

    let pb = ProgressBar::new(4);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")?
            .progress_chars("#>-"),
    );

    log::debug!("Converting {} -> {}", input.display(), output.display());
    let registry = Arc::new(ConverterRegistry::with_defaults());
    let handle = spawn_conversion(registry, input, &output, layout.convert_options())?;

    let mut outcome = None;
    for event in handle.events().iter() {
        match event {
            ConversionEvent::Started { input } => {
                pb.set_message(format!("Opening {}...", input.display()));
            }
            ConversionEvent::Stage(stage) => {
                pb.set_message(format!("{}...", capitalize(&stage.to_string())));
                pb.inc(1);
            }
            ConversionEvent::Finished(result) => {
                pb.finish_with_message("Done!");
                outcome = Some(Ok(result));
            }
            ConversionEvent::Failed(error) => {
                pb.abandon_with_message("Failed");
                outcome = Some(Err(error));
            }
        }
    }

    let result = outcome.ok_or("conversion worker stopped without a result")??;

    println!("\n{} {}", "Saved to".green(), result.output.display());
    println!(
        "  {} {} pages, {} lines",
        "└─".dimmed(),
        result.stats.page_count,
        result.stats.line_count
    );

    Ok(())
}

fn cmd_batch(
    inputs: Vec<PathBuf>,
    output_dir: Option<&Path>,
    layout: &LayoutArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(dir) = output_dir {
        fs::create_dir_all(dir)?;
    }

    let jobs: Vec<BatchJob> = inputs
        .into_iter()
        .map(|input| match output_dir {
            Some(dir) => BatchJob::into_dir(input, dir),
            None => BatchJob::beside(input),
        })
        .collect();

    let spinner = ProgressBar::new_spinner();
    spinner.set_message(format!("Converting {} documents...", jobs.len()));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let registry = ConverterRegistry::with_defaults();
    let outcomes = convert_batch(&registry, jobs, &layout.convert_options());
    spinner.finish_and_clear();

    let mut failed = 0;
    for outcome in &outcomes {
        match &outcome.result {
            Ok(result) => println!(
                "{} {} {} ({} pages)",
                "✓".green(),
                outcome.job.input.display(),
                format!("-> {}", result.output.display()).dimmed(),
                result.stats.page_count
            ),
            Err(e) => {
                failed += 1;
                println!("{} {}: {}", "✗".red(), outcome.job.input.display(), e);
            }
        }
    }

    println!(
        "\n{} {} converted, {} failed",
        "Done!".green().bold(),
        outcomes.len() - failed,
        failed
    );

    if failed > 0 {
        return Err(format!("{} of {} conversions failed", failed, outcomes.len()).into());
    }
    Ok(())
}

fn cmd_blocks(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    lenient: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut builder = WordPdf::new();
    if lenient {
        builder = builder.lenient();
    }
    let doc = builder.read(input)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = doc.to_json(format)?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_preview(input: &Path, layout: &LayoutArgs) -> Result<(), Box<dyn std::error::Error>> {
    let doc = layout.builder().read(input)?;
    print!("{}", doc.preview()?);
    Ok(())
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    // Lenient: show what can be read even if some attributes are invalid
    let doc = WordPdf::new().lenient().read(input)?;
    let document = doc.document();
    let metadata = &document.metadata;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: Word document", "Format".bold());

    if let Some(ref title) = metadata.title {
        println!("{}: {}", "Title".bold(), title);
    }
    if let Some(ref author) = metadata.author {
        println!("{}: {}", "Author".bold(), author);
    }
    if let Some(ref subject) = metadata.subject {
        println!("{}: {}", "Subject".bold(), subject);
    }
    if let Some(ref keywords) = metadata.keywords {
        println!("{}: {}", "Keywords".bold(), keywords);
    }
    if let Some(ref created) = metadata.created {
        println!("{}: {}", "Created".bold(), created);
    }
    if let Some(ref modified) = metadata.modified {
        println!("{}: {}", "Modified".bold(), modified);
    }
    if let Some(ref section) = document.section {
        println!(
            "{}: {:.0} x {:.0} pt",
            "Page size".bold(),
            section.page_width.to_points(),
            section.page_height.to_points()
        );
    }

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    let text = document.plain_text();
    let words = text.split_whitespace().count();
    let chars = text.chars().count();
    let blocks = doc.blocks();
    let paged = doc.paginate()?;

    println!("{}: {}", "Paragraphs".bold(), document.paragraph_count());
    println!("{}: {}", "Words".bold(), words);
    println!("{}: {}", "Characters".bold(), chars);
    println!("{}: {}", "Layout blocks".bold(), blocks.len());
    println!("{}: {}", "Pages".bold(), paged.stats.page_count);

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "wordpdf".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Word to PDF conversion tool");
    println!();
    println!("License: MIT");
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wordpdf::LayoutMode;

    #[test]
    fn test_default_layout_args() {
        let cli = Cli::try_parse_from(["wordpdf", "letter.docx"]).unwrap();
        let options = cli.layout.convert_options();

        assert_eq!(cli.input, Some(PathBuf::from("letter.docx")));
        assert_eq!(options.render.page_size, PageSize::A4);
        assert_eq!(options.render.margins, Margins::uniform(72.0));
        assert_eq!(options.mode, LayoutMode::Preserving);
        assert!(options.render.compress);
    }

    #[test]
    fn test_convert_flags() {
        let cli = Cli::try_parse_from([
            "wordpdf",
            "convert",
            "in.docx",
            "-o",
            "out.pdf",
            "--page-size",
            "letter",
            "--margin",
            "1in",
            "--landscape",
            "--plain",
        ])
        .unwrap();

        let Some(Commands::Convert { output, layout, .. }) = cli.command else {
            panic!("expected convert command");
        };
        let options = layout.convert_options();
        assert_eq!(output, Some(PathBuf::from("out.pdf")));
        assert_eq!(options.render.page_size, PageSize::new(792.0, 612.0));
        assert_eq!(options.render.margins.left, 72.0);
        assert_eq!(options.mode, LayoutMode::Plain);
    }

    #[test]
    fn test_invalid_page_size_rejected() {
        let result = Cli::try_parse_from(["wordpdf", "convert", "in.docx", "--page-size", "huge"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("laying out"), "Laying out");
        assert_eq!(capitalize(""), "");
    }
}
