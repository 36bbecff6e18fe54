//! pagemark CLI - annotated text stream builder

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;

use pagemark::{
    extract_file_with_options, validate_markers, Annotator, ImageMatching, PageSelection,
    PipelineOptions, TableAggregator, TableHeuristicConfig,
};

#[derive(Parser)]
#[command(name = "pagemark")]
#[command(version)]
#[command(
    about = "Rebuild an annotated text stream with figure, formula and table markers",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process a layout dump, writing figures and the result JSON
    Extract {
        /// Layout dump (JSON)
        #[arg(value_name = "DUMP")]
        input: PathBuf,

        /// Directory extracted figures are written to
        #[arg(value_name = "OUTPUT_DIR")]
        output_dir: PathBuf,

        /// Output file for the result JSON (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Page range (e.g., "1-10", "1,3,5")
        #[arg(long)]
        pages: Option<String>,

        /// Skip the formula pass
        #[arg(long)]
        no_formulas: bool,

        /// Skip the heuristic table pass
        #[arg(long)]
        no_tables: bool,

        /// Do not append natively detected tables
        #[arg(long)]
        no_native_tables: bool,

        /// Require a numeric line in every heuristic table
        #[arg(long)]
        strict_tables: bool,

        /// Minimum lines for a heuristic table (at least 2)
        #[arg(long, value_name = "LINES")]
        min_table_lines: Option<usize>,

        /// Let several image blocks match the same descriptor
        #[arg(long)]
        shared_images: bool,

        /// Maximum vertical distance for image matching
        #[arg(long, env = "PAGEMARK_MATCH_TOLERANCE", value_name = "UNITS")]
        tolerance: Option<f32>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Run the formula and table passes over a plain text file
    Annotate {
        /// Input text file
        #[arg(value_name = "TEXT")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Skip the formula pass
        #[arg(long)]
        no_formulas: bool,

        /// Skip the table pass
        #[arg(long)]
        no_tables: bool,

        /// Require a numeric line in every heuristic table
        #[arg(long)]
        strict_tables: bool,

        /// Minimum lines for a heuristic table (at least 2)
        #[arg(long, value_name = "LINES")]
        min_table_lines: Option<usize>,
    },

    /// Check marker balance in an annotated text file
    Check {
        /// Annotated text file
        #[arg(value_name = "TEXT")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Extract {
            input,
            output_dir,
            output,
            pages,
            no_formulas,
            no_tables,
            no_native_tables,
            strict_tables,
            min_table_lines,
            shared_images,
            tolerance,
            compact,
        } => {
            let mut options = PipelineOptions::new(output_dir)
                .with_formulas(!no_formulas)
                .with_tables(!no_tables)
                .with_native_tables(!no_native_tables)
                .with_table_config(table_config(strict_tables, min_table_lines));
            if shared_images {
                options = options.with_image_matching(ImageMatching::Shared);
            }
            if let Some(tolerance) = tolerance {
                options = options.with_match_tolerance(tolerance);
            }
            cmd_extract(&input, options, pages.as_deref(), output.as_deref(), compact)
        }
        Commands::Annotate {
            input,
            output,
            no_formulas,
            no_tables,
            strict_tables,
            min_table_lines,
        } => {
            let config = table_config(strict_tables, min_table_lines);
            let tables = (!no_tables).then(|| TableAggregator::with_config(config));
            cmd_annotate(&input, output.as_deref(), no_formulas, tables)
        }
        Commands::Check { input } => cmd_check(&input),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn table_config(strict: bool, min_lines: Option<usize>) -> TableHeuristicConfig {
    let mut config = TableHeuristicConfig::new();
    if strict {
        config = config.strict();
    }
    if let Some(lines) = min_lines {
        config = config.with_min_lines(lines);
    }
    config
}

fn read_text(input: &Path) -> Result<String, Box<dyn std::error::Error>> {
    if !input.exists() {
        return Err(pagemark::Error::InputNotFound(input.to_path_buf()).into());
    }
    Ok(fs::read_to_string(input)?)
}

fn write_or_print(output: Option<&Path>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        eprintln!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_extract(
    input: &Path,
    options: PipelineOptions,
    pages: Option<&str>,
    output: Option<&Path>,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let options = match pages {
        Some(p) => options.with_pages(PageSelection::parse(p)?),
        None => options,
    };
    let output_dir = options.output_dir.clone();
    log::debug!("extract options: {:?}", options);

    let result = extract_file_with_options(input, options)?;
    let json = result.to_json(!compact)?;
    write_or_print(output, &json)?;

    eprintln!(
        "{} {} figures written to {}",
        "Done!".green().bold(),
        result.images.len(),
        output_dir.display()
    );

    Ok(())
}

fn cmd_annotate(
    input: &Path,
    output: Option<&Path>,
    no_formulas: bool,
    tables: Option<TableAggregator>,
) -> Result<(), Box<dyn std::error::Error>> {
    let text = read_text(input)?;

    let annotator = Annotator::new().with_table_pass(tables);
    let annotator = if no_formulas {
        annotator.with_formula_pass(None)
    } else {
        annotator
    };

    let (annotated, stats) = annotator.annotate(&text);
    write_or_print(output, &annotated)?;

    eprintln!(
        "{} {} formulas, {} formula blocks, {} tables",
        "Done!".green().bold(),
        stats.formulas,
        stats.formula_blocks,
        stats.tables
    );

    Ok(())
}

fn cmd_check(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let text = read_text(input)?;
    validate_markers(&text)?;
    println!("{} {}", "Markers balanced:".green(), input.display());
    Ok(())
}

fn cmd_version() {
    println!("{} {}", "pagemark".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Annotated text stream builder for page layout data");
}
