//! patabs CLI - patent abstract extraction tool

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use patabs::{
    collect_document, evaluate, AbstractExtractor, ExtractOptions, GroundTruth, LineSource,
    MergePolicy, PdfSource, TextSource, WordList,
};

#[derive(Parser)]
#[command(name = "patabs")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Extract the abstract from patent PDFs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the abstract of each file
    Extract {
        /// Input PDF files (or .txt dumps, pages separated by form feeds)
        #[arg(value_name = "FILE", required = true)]
        inputs: Vec<PathBuf>,

        /// Output JSON objects with path and abstract
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        options: ExtractArgs,
    },

    /// Dump the extracted lines of a file
    Lines {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output the document as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        options: ExtractArgs,
    },

    /// Score extraction against a ground-truth YAML file
    Eval {
        /// Ground-truth file with `tests: [{path, abstract}]`
        #[arg(value_name = "TESTS.yml")]
        tests: PathBuf,

        /// Output the full report as JSON
        #[arg(long)]
        json: bool,

        /// List every mismatch
        #[arg(short, long)]
        verbose: bool,

        #[command(flatten)]
        options: ExtractArgs,
    },

    /// Show version information
    Version,
}

#[derive(Args, Clone)]
struct ExtractArgs {
    /// Number of leading pages to read
    #[arg(long, default_value = "2")]
    pages: u32,

    /// Drop classification codes, citations, and drawing labels from the abstract
    #[arg(long)]
    strip_noise: bool,

    /// Do not clip two-column front pages to the abstract column
    #[arg(long)]
    no_clip: bool,

    /// Fail on the first unreadable page
    #[arg(long)]
    strict: bool,

    /// Word list file (one word per line) replacing the builtin lexicon
    #[arg(long, value_name = "FILE", env = "PATABS_LEXICON")]
    lexicon: Option<PathBuf>,

    /// Shortest token treated as a complete word when joining lines
    #[arg(long, default_value = "2")]
    min_word_len: usize,
}

impl ExtractArgs {
    fn extract_options(&self) -> ExtractOptions {
        let options = ExtractOptions::new()
            .with_max_pages(self.pages)
            .with_strip_noise(self.strip_noise)
            .with_column_clip(!self.no_clip)
            .with_merge_policy(MergePolicy::new().with_min_word_len(self.min_word_len));
        if self.strict {
            options.strict()
        } else {
            options.lenient()
        }
    }

    fn extractor(&self) -> Result<AbstractExtractor, Box<dyn std::error::Error>> {
        let mut extractor = AbstractExtractor::new().with_options(self.extract_options());
        if let Some(path) = &self.lexicon {
            let words = WordList::from_path(path)?;
            log::info!("Using {} words from {}", words.len(), path.display());
            extractor = extractor.with_lexicon(Arc::new(words));
        }
        Ok(extractor)
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Extract {
            inputs,
            json,
            options,
        } => cmd_extract(&inputs, json, &options),
        Commands::Lines {
            input,
            json,
            options,
        } => cmd_lines(&input, json, &options),
        Commands::Eval {
            tests,
            json,
            verbose,
            options,
        } => cmd_eval(&tests, json, verbose, &options),
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

fn is_text_dump(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("txt"))
}

fn open_source(path: &Path, options: &ExtractOptions) -> patabs::Result<Box<dyn LineSource>> {
    if is_text_dump(path) {
        Ok(Box::new(TextSource::from_path(path)?))
    } else {
        Ok(Box::new(
            PdfSource::open(path)?.with_column_clip(options.column_clip),
        ))
    }
}

fn extract_path(extractor: &AbstractExtractor, path: &Path) -> patabs::Result<Option<String>> {
    if is_text_dump(path) {
        extractor.extract_source(&TextSource::from_path(path)?)
    } else {
        extractor.extract_file(path)
    }
}

fn cmd_extract(
    inputs: &[PathBuf],
    json: bool,
    args: &ExtractArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let extractor = args.extractor()?;

    let pb = if inputs.len() > 1 {
        let pb = ProgressBar::new(inputs.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    let mut results = Vec::with_capacity(inputs.len());
    for input in inputs {
        if let Some(pb) = &pb {
            pb.set_message(input.display().to_string());
        }
        results.push((input, extract_path(&extractor, input)));
        if let Some(pb) = &pb {
            pb.inc(1);
        }
    }
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    let mut failures = 0;
    if json {
        let items: Vec<_> = results
            .iter()
            .map(|(path, result)| match result {
                Ok(text) => serde_json::json!({ "path": path, "abstract": text }),
                Err(e) => {
                    failures += 1;
                    serde_json::json!({ "path": path, "abstract": null, "error": e.to_string() })
                }
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&items)?);
    } else {
        for (path, result) in &results {
            if inputs.len() > 1 {
                println!("{}", path.display().to_string().cyan().bold());
            }
            match result {
                Ok(Some(text)) => println!("{}", text),
                Ok(None) => println!("{}", "No abstract found".yellow()),
                Err(e) => {
                    failures += 1;
                    eprintln!("{}: {}", "Error".red().bold(), e);
                }
            }
            if inputs.len() > 1 {
                println!();
            }
        }
    }

    if failures == inputs.len() {
        return Err(format!("{} of {} files failed", failures, inputs.len()).into());
    }
    Ok(())
}

fn cmd_lines(input: &Path, json: bool, args: &ExtractArgs) -> Result<(), Box<dyn std::error::Error>> {
    let options = args.extract_options();
    let source = open_source(input, &options)?;
    let doc = collect_document(source.as_ref(), &options)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(());
    }

    for line in &doc.lines {
        println!(
            "{} {}",
            format!("{:>2}:{:<3}", line.page + 1, line.index).dimmed(),
            line.text
        );
    }
    Ok(())
}

fn cmd_eval(
    tests: &Path,
    json: bool,
    verbose: bool,
    args: &ExtractArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let extractor = args.extractor()?;
    let truth = GroundTruth::from_yaml_path(tests)?;

    let pb = ProgressBar::new_spinner();
    pb.set_message(format!("Evaluating {} cases...", truth.len()));
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    let report = evaluate(&truth, |path| extract_path(&extractor, path));
    pb.finish_and_clear();

    if json {
        println!("{}", report.to_json()?);
        return Ok(());
    }

    println!("{}", "Evaluation".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Cases".bold(), report.total());
    println!("{}: {}", "Exact matches".bold(), report.correct());
    println!("{}: {:.1}%", "Accuracy".bold(), report.accuracy * 100.0);
    println!("{}: {:.4}", "Avg. distance".bold(), report.average_distance);

    if verbose {
        for case in report.mismatches() {
            println!();
            println!("{} {}", "✗".red(), case.path.display());
            if let Some(error) = &case.error {
                println!("  {}: {}", "error".red(), error);
            }
            println!("  {}: {}", "expected".green(), case.expected);
            println!("  {}: {}", "got".yellow(), case.extracted);
            println!("  {}: {:.4}", "distance".dimmed(), case.distance);
        }
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "patabs".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Patent abstract extraction tool");
    println!();
    println!("Repository: {}", "https://github.com/iyulab/patabs".dimmed());
    println!("License: MIT");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_extract_args() {
        let cli = Cli::try_parse_from([
            "patabs",
            "extract",
            "a.pdf",
            "b.pdf",
            "--pages",
            "3",
            "--strip-noise",
            "--no-clip",
        ])
        .unwrap();
        match cli.command {
            Commands::Extract { inputs, options, .. } => {
                assert_eq!(inputs.len(), 2);
                let opts = options.extract_options();
                assert_eq!(opts.max_pages, 3);
                assert!(opts.strip_noise);
                assert!(!opts.column_clip);
            }
            _ => panic!("expected extract"),
        }
    }

    #[test]
    fn test_extract_requires_input() {
        assert!(Cli::try_parse_from(["patabs", "extract"]).is_err());
    }

    #[test]
    fn test_text_dump_extraction() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        write!(
            file,
            "(57) Abstract\nA device providing improved effi-\nciency.\nBackground"
        )
        .unwrap();

        let extractor = AbstractExtractor::new();
        let text = extract_path(&extractor, file.path()).unwrap();
        assert_eq!(text.as_deref(), Some("A device providing improved efficiency."));
    }

    #[test]
    fn test_lexicon_flag() {
        let mut words = tempfile::NamedTempFile::new().unwrap();
        writeln!(words, "zircaloy").unwrap();

        let cli = Cli::try_parse_from([
            "patabs",
            "lines",
            "x.pdf",
            "--lexicon",
            words.path().to_str().unwrap(),
        ])
        .unwrap();
        let Commands::Lines { options, .. } = cli.command else {
            panic!("expected lines");
        };
        let extractor = options.extractor().unwrap();
        assert_eq!(
            extractor
                .extract_lines(&["Abstract", "A zirca", "loy tube."])
                .as_deref(),
            Some("A zircaloy tube.")
        );
    }
}
