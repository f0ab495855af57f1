mod echo;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use hamus_core::{
    CsvConfig, Dataset, ExtractorConfig, FeatureExtractor, FeatureFamily, ImageText, JsonConfig, LinguisticResources,
    OcrConfig, OutputFormat, ResourceConfig, TRUTH_COLUMN, convert_to_json, to_csv_string,
};
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Turn a clickbait corpus into a feature table
#[derive(Parser, Debug)]
#[command(name = "hamus")]
#[command(author = "Hamus Contributors")]
#[command(version)]
#[command(about = "Extract clickbait detection features from post and article datasets", long_about = None)]
struct Args {
    /// Instances file (JSON lines, one record per line)
    #[arg(value_name = "INSTANCES")]
    instances: PathBuf,

    /// Truth file joined on record id
    #[arg(short, long, value_name = "FILE")]
    truth: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Output format (csv, json)
    #[arg(short, long, default_value = "csv", value_name = "FORMAT")]
    format: OutputFormat,

    /// Pretty print JSON output
    #[arg(long)]
    pretty: bool,

    /// Directory media references are relative to (default: the instances file's directory)
    #[arg(long, value_name = "DIR")]
    data_root: Option<PathBuf>,

    /// Tesseract executable
    #[arg(long, value_name = "PATH")]
    tesseract: Option<PathBuf>,

    /// Skip OCR; post images count as empty
    #[arg(long)]
    no_ocr: bool,

    /// Feature families to compute, comma separated (default: all)
    #[arg(long, value_name = "LIST", value_delimiter = ',')]
    families: Option<Vec<FeatureFamily>>,

    /// Drop stopwords from word and tag counts
    #[arg(long)]
    remove_stopwords: bool,

    /// Drop cardinal numbers from word and tag counts
    #[arg(long)]
    drop_digits: bool,

    /// WordNet dictionary directory or lemma list
    #[arg(long, value_name = "PATH")]
    dictionary: Option<PathBuf>,

    /// Sentiment lexicon (VADER layout)
    #[arg(long, value_name = "FILE")]
    lexicon: Option<PathBuf>,

    /// Extra stopwords, one per line
    #[arg(long, value_name = "FILE")]
    stopwords: Option<PathBuf>,

    /// Directory searched for resources (default: ~/.config/hamus)
    #[arg(long, value_name = "DIR")]
    resources: Option<PathBuf>,

    /// Worker threads (default: one per core)
    #[arg(long, value_name = "NUM")]
    threads: Option<usize>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "hamus_core=debug,warn" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).with_target(false).try_init();
}

fn extractor_config(args: &Args) -> ExtractorConfig {
    let mut builder =
        ExtractorConfig::builder().keep_digits(!args.drop_digits).remove_stopwords(args.remove_stopwords);

    if let Some(families) = &args.families {
        builder = builder.families(families.iter().copied());
    }
    if let Some(threads) = args.threads {
        builder = builder.threads(threads);
    }

    builder.build()
}

fn run(args: &Args) -> anyhow::Result<()> {
    let total_start = Instant::now();
    let mut timings = Vec::new();

    if args.verbose {
        echo::print_banner();
        echo::print_info("Debug logging enabled");
        eprintln!();
        echo::print_step(1, 4, "Loading linguistic resources");
    }

    let start = Instant::now();
    let resource_config = ResourceConfig {
        dictionary: args.dictionary.clone(),
        lexicon: args.lexicon.clone(),
        stopwords: args.stopwords.clone(),
        search_dir: args.resources.clone(),
    };
    let resources = LinguisticResources::load(&resource_config).context("Failed to load linguistic resources")?;
    timings.push(("Resources".to_string(), start.elapsed()));

    if args.verbose {
        let dictionary = resources.dictionary().map_or_else(|| "built-in".to_string(), |d| format!("{} lemmas", d.len()));
        echo::print_detail("Dictionary", &dictionary);
        eprintln!();
        echo::print_step(2, 4, &format!("Reading dataset {}", args.instances.display().bright_white()));
    }

    let start = Instant::now();
    let dataset = Dataset::from_files(&args.instances, args.truth.as_deref())
        .with_context(|| format!("Failed to read dataset: {}", args.instances.display()))?;
    timings.push(("Dataset".to_string(), start.elapsed()));

    if args.verbose {
        if let Ok(metadata) = fs::metadata(&args.instances) {
            echo::print_detail("Size", &echo::format_size(metadata.len()));
        }
        echo::print_detail("Records", &dataset.len().to_string());
        eprintln!();
    }

    if !dataset.has_column(TRUTH_COLUMN) {
        echo::print_warning("No ground truth found, writing features without labels");
    }

    if args.verbose {
        echo::print_step(3, 4, "Extracting features");
    }

    let data_root = args
        .data_root
        .clone()
        .unwrap_or_else(|| args.instances.parent().map(Path::to_path_buf).unwrap_or_default());
    let ocr = OcrConfig { data_root, tesseract: args.tesseract.clone(), enabled: !args.no_ocr };

    let start = Instant::now();
    let mut extractor = FeatureExtractor::with_config(
        extractor_config(args),
        Arc::new(resources),
        ImageText::from_config(&ocr),
    );
    extractor.set_dataset(dataset).context("Dataset failed validation")?;
    let table = extractor.extract_features().context("Failed to extract features")?;
    timings.push(("Extraction".to_string(), start.elapsed()));

    if args.verbose {
        echo::print_table_details(&table);
        echo::print_step(4, 4, "Writing output");
        echo::print_detail("Format", &args.format.to_string());
        eprintln!();
    }

    let output = match args.format {
        OutputFormat::Csv => to_csv_string(&table, &CsvConfig::default()),
        OutputFormat::Json => convert_to_json(&table, &JsonConfig { pretty: args.pretty, ..Default::default() }),
    }
    .context("Failed to format feature table")?;

    match &args.output {
        Some(path) => {
            fs::write(path, output).with_context(|| format!("Failed to write to file: {}", path.display()))?;
            echo::print_success(&format!("Output written to {}", path.display().bright_white()));
        }
        None => {
            print!("{}", output);
        }
    }

    if args.verbose {
        echo::print_timing_summary(total_start.elapsed(), &timings);
    }

    Ok(())
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(&args) {
        echo::print_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}
