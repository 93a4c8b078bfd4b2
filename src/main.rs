//! cn-fragments CLI entry point
//!
//! Retrieve information about target chromosome fragments in one or several
//! copy-number data files.

use anyhow::Context;
use clap::{ArgGroup, Parser, ValueEnum};
use cn_fragments::{
    CnColumnMode, InputSource, MalformedRowPolicy, OutputTarget, ReportWriter, ScanOptions,
    Scanner, TargetSet,
};
use log::info;
use std::path::PathBuf;
use std::time::Instant;

/// How the copy-number column is located (CLI enum)
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
enum CnColumnArg {
    /// Header names for tab-separated headers, third-from-last field otherwise
    #[default]
    #[value(name = "auto")]
    Auto,
    /// Third-from-last field of each row
    #[value(name = "offset")]
    Offset,
    /// Column named `Cn` in the header (Chromosome/Start/End by name too)
    #[value(name = "header")]
    Header,
}

impl From<CnColumnArg> for CnColumnMode {
    fn from(arg: CnColumnArg) -> Self {
        match arg {
            CnColumnArg::Auto => CnColumnMode::Auto,
            CnColumnArg::Offset => CnColumnMode::Offset,
            CnColumnArg::Header => CnColumnMode::Header,
        }
    }
}

/// Handling of data rows with non-integer coordinates or copy number (CLI enum)
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
enum MalformedArg {
    /// Stop with an error
    #[default]
    #[value(name = "abort")]
    Abort,
    /// Warn and skip the row
    #[value(name = "skip")]
    Skip,
}

impl From<MalformedArg> for MalformedRowPolicy {
    fn from(arg: MalformedArg) -> Self {
        match arg {
            MalformedArg::Abort => MalformedRowPolicy::Abort,
            MalformedArg::Skip => MalformedRowPolicy::Skip,
        }
    }
}

#[derive(Parser)]
#[command(name = "cn-fragments")]
#[command(about = "Retrieve information of target chromosome(s) fragments in one or several Copy Number Data files")]
#[command(version)]
#[command(group(ArgGroup::new("input").required(true).args(["dir", "infile"])))]
struct Cli {
    /// Path to directory containing the files
    #[arg(short = 'd', long = "dir", value_name = "FOLDER")]
    dir: Option<PathBuf>,

    /// Single file to be read
    #[arg(short = 'i', long = "infile", value_name = "INFILE")]
    infile: Option<PathBuf>,

    /// Target chromosome(s): chr1, chr2 ... chrX, chrY; ',' separates several,
    /// ':' gives an inclusive range (chrX/chrY count as 23/24 inside a range)
    #[arg(short = 'c', long = "chr", value_name = "chrN")]
    chr: String,

    /// Output file (optional, printed on the screen if not specified)
    #[arg(short = 'o', long = "out", value_name = "OUTFILE")]
    out: Option<PathBuf>,

    /// How to locate the copy-number column
    #[arg(long = "cn-column", default_value = "auto")]
    cn_column: CnColumnArg,

    /// What to do with a target row whose numbers do not parse
    #[arg(long = "on-malformed", default_value = "abort")]
    on_malformed: MalformedArg,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(match cli.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            _ => log::LevelFilter::Debug,
        })
        .parse_default_env()
        .init();

    let start = Instant::now();
    let targets = TargetSet::parse(&cli.chr).context("Invalid target chromosome specification")?;
    let source = match (cli.dir, cli.infile) {
        (Some(dir), _) => InputSource::Directory(dir),
        (None, Some(infile)) => InputSource::File(infile),
        (None, None) => anyhow::bail!("one of --dir or --infile is required"),
    };
    let options = ScanOptions {
        cn_column: cli.cn_column.into(),
        on_malformed: cli.on_malformed.into(),
    };

    let output = OutputTarget::resolve(cli.out)?;
    let mut report = ReportWriter::new(output.open()?);

    info!("Scanning {:?} for {} target chromosome(s)", source, targets.len());
    let stats = Scanner::new(&targets, options)
        .scan(&source, &mut report)
        .context("Scan aborted")?;
    report.flush().context("Failed to write report")?;
    drop(report);
    if let OutputTarget::File(path) = &output {
        info!("Report written to {}", path.display());
    }

    info!("=== Scan Statistics ===");
    info!("Files seen:        {}", stats.files_seen);
    info!("  - Missing:       {}", stats.files_missing);
    info!("  - Wrong format:  {}", stats.files_invalid);
    info!("  - Not a file:    {}", stats.files_not_regular);
    info!("Files scanned:     {}", stats.files_scanned);
    info!("With fragments:    {}", stats.files_with_fragments);
    info!("Chromosomes:       {}", stats.chromosomes_reported);
    info!("Rows read:         {}", stats.rows_read);
    info!("Rows skipped:      {}", stats.rows_skipped);
    info!("Time elapsed:      {:.2}s", start.elapsed().as_secs_f64());

    println!("Done!");
    Ok(())
}
