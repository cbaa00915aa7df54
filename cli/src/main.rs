//! docxtext CLI - Word document text extraction tool
//!
//! A command-line tool for extracting text, metadata and images from DOCX files.

use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use docxtext::{DocumentProcessor, OutputFormat, ProcessingResult, ProcessorConfig};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Word document extraction to text, Markdown, HTML and JSON
#[derive(Parser)]
#[command(
    name = "docxtext",
    author = "iyulab",
    version,
    about = "Extract text from Word documents",
    long_about = "docxtext - Word document text extraction tool.\n\n\
                  Converts DOCX files to plain text, Markdown, HTML, or JSON."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Skip file safety validation
    #[arg(long, global = true)]
    no_safety: bool,

    /// Do not read document properties
    #[arg(long, global = true)]
    no_metadata: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a document to the chosen format
    Convert {
        /// Input file path
        input: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: Format,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Convert a document to plain text
    Text {
        /// Input file path
        input: PathBuf,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show document information and metadata
    Info {
        /// Input file path
        input: PathBuf,
    },

    /// Extract embedded images from a document
    Images {
        /// Input file path
        input: PathBuf,

        /// Output directory for images
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },

    /// Copy a document to a timestamped backup next to it
    Backup {
        /// Input file path
        input: PathBuf,
    },

    /// Show version information
    Version,
}

/// Output format
#[derive(Clone, Copy, ValueEnum)]
enum Format {
    /// Plain text
    Text,
    /// Markdown with title and author header
    Markdown,
    /// Standalone HTML page
    Html,
    /// JSON envelope with metadata
    Json,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Text => OutputFormat::Text,
            Format::Markdown => OutputFormat::Markdown,
            Format::Html => OutputFormat::Html,
            Format::Json => OutputFormat::Json,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let base = ProcessorConfig::new()
        .with_safety_checks(!cli.no_safety)
        .with_metadata(!cli.no_metadata);

    match cli.command {
        Commands::Convert {
            input,
            format,
            output,
        } => {
            let format = OutputFormat::from(format);
            let config = base.with_output_format(format);
            let result = process(&input, config, &format!("Converting to {}...", format))?;

            write_output(output.as_ref(), result.content.as_deref().unwrap_or_default())?;

            if let Some(path) = output {
                println!(
                    "{} Converted to {}: {}",
                    "✓".green().bold(),
                    format,
                    path.display()
                );
            }
        }

        Commands::Text { input, output } => {
            let config = base.with_output_format(OutputFormat::Text);
            let result = process(&input, config, "Extracting text...")?;

            write_output(output.as_ref(), result.content.as_deref().unwrap_or_default())?;

            if let Some(path) = output {
                println!(
                    "{} Converted to text: {}",
                    "✓".green().bold(),
                    path.display()
                );
            }
        }

        Commands::Info { input } => {
            let kind = docxtext::detect_kind_from_path(&input)?;
            let result = process(&input, base, "Analyzing document...")?;

            println!("{}", "Document Information".cyan().bold());
            println!("{}", "─".repeat(40));
            println!(
                "{}: {}",
                "File".bold(),
                input.file_name().unwrap_or_default().to_string_lossy()
            );
            println!("{}: {}", "Format".bold(), kind);
            if let Some(size) = result.file_size {
                println!("{}: {} bytes", "Size".bold(), size);
            }
            if let Some(ref hash) = result.file_hash {
                println!("{}: {}", "SHA-256".bold(), hash);
            }

            if let Some(ref meta) = result.metadata {
                if let Some(ref title) = meta.title {
                    println!("{}: {}", "Title".bold(), title);
                }
                if let Some(ref author) = meta.author {
                    println!("{}: {}", "Author".bold(), author);
                }
                if let Some(ref subject) = meta.subject {
                    println!("{}: {}", "Subject".bold(), subject);
                }
                if !meta.keywords.is_empty() {
                    println!("{}: {}", "Keywords".bold(), meta.keywords.join(", "));
                }
                if let Some(ref application) = meta.application {
                    println!("{}: {}", "Application".bold(), application);
                }
                if let Some(pages) = meta.pages {
                    println!("{}: {}", "Pages".bold(), pages);
                }
                if let Some(created) = meta.created {
                    println!("{}: {}", "Created".bold(), created.to_rfc3339());
                }
                if let Some(modified) = meta.modified {
                    println!("{}: {}", "Modified".bold(), modified.to_rfc3339());
                }
            }

            let text = result.content.unwrap_or_default();
            println!("\n{}", "Content Statistics".cyan().bold());
            println!("{}", "─".repeat(40));
            println!("{}: {}", "Words".bold(), text.split_whitespace().count());
            println!("{}: {}", "Characters".bold(), text.chars().count());
            println!("{}: {}", "Paragraphs".bold(), text.split("\n\n").count());
        }

        Commands::Images { input, output } => {
            let config = base.with_extract_images(true).with_metadata(false);
            let result = process(&input, config, "Extracting images...")?;

            fs::create_dir_all(&output)?;

            let images = result.images.unwrap_or_default();
            for image in &images {
                fs::write(output.join(image.file_name()), &image.data)?;
            }

            if images.is_empty() {
                println!("{} No images found in document", "!".yellow().bold());
            } else {
                println!(
                    "{} Extracted {} images to {}",
                    "✓".green().bold(),
                    images.len(),
                    output.display()
                );
            }
        }

        Commands::Backup { input } => {
            let processor = DocumentProcessor::new(base);
            let backup = processor.create_backup(&input)?;
            println!(
                "{} Backup written: {}",
                "✓".green().bold(),
                backup.display()
            );
        }

        Commands::Version => {
            print_version();
        }
    }

    Ok(())
}

/// Run the processor behind a spinner; warnings go to stderr.
fn process(
    input: &Path,
    config: ProcessorConfig,
    message: &str,
) -> Result<ProcessingResult, Box<dyn std::error::Error>> {
    let pb = create_spinner(message);
    let result = DocumentProcessor::new(config).parse_document(input);
    pb.finish_and_clear();

    for warning in &result.warnings {
        eprintln!("{}: {}", "Warning".yellow().bold(), warning);
    }
    if !result.success {
        return Err(result.errors.join("; ").into());
    }
    Ok(result)
}

fn print_version() {
    println!("{} {}", "docxtext".green().bold(), env!("CARGO_PKG_VERSION"));
    println!("Word document text extraction");
    println!();
    println!("Supported formats: DOCX");
    println!("Output formats: text, markdown, html, json");
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
        .template("{spinner:.blue} {msg}")
    {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

fn write_output(path: Option<&PathBuf>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            writeln!(handle, "{}", content)?;
        }
    }
    Ok(())
}
