//! sfntname CLI

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};
use log::info;

use sfntname_core::directory::read_table_directory;
use sfntname_core::discovery::{read_listing, PathDiscovery};
use sfntname_core::extract::{
    open_stream, ExtractOptions, FontNameExtractor, DEFAULT_MAX_TABLE_LEN,
};
use sfntname_core::output::{write_json_pretty, write_ndjson, write_plain};
use sfntname_core::query::{compile_patterns, Query};
use sfntname_core::reader::FontReader;
use sfntname_core::scan::{scan, ScanOptions};
use sfntname_core::tags::{tag4, tag_to_string, Tag};

/// CLI entrypoint for sfntname.
#[derive(Debug, Parser)]
#[command(
    name = "sfntname",
    about = "Read family and style names from TrueType/OpenType fonts"
)]
pub struct Cli {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Refuse name tables declaring more than this many bytes
    #[arg(long = "max-table-bytes", default_value_t = DEFAULT_MAX_TABLE_LEN, global = true)]
    max_table_bytes: u32,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the family name (name id 1) of each font
    Family(NameArgs),
    /// Print the Macintosh style name (name id 2) of each font
    Style(NameArgs),
    /// Discover fonts under paths and report both names
    Scan(ScanArgs),
    /// List the table directory of a font
    Tables(TablesArgs),
}

#[derive(Debug, Args)]
struct NameArgs {
    /// Font files to inspect
    #[arg(required = true, value_hint = ValueHint::FilePath)]
    files: Vec<PathBuf>,
}

#[derive(Debug, Args)]
struct ScanArgs {
    /// Paths to scan (directories or files)
    #[arg(value_hint = ValueHint::DirPath, required_unless_present = "stdin_paths")]
    paths: Vec<PathBuf>,

    /// Also scan newline-delimited paths read from STDIN (.ttf/.otf only)
    #[arg(long = "stdin-paths", action = ArgAction::SetTrue)]
    stdin_paths: bool,

    /// Regex patterns that must match the family name
    #[arg(long = "family", value_hint = ValueHint::Other)]
    family_patterns: Vec<String>,

    /// Regex patterns that must match the style name
    #[arg(long = "style", value_hint = ValueHint::Other)]
    style_patterns: Vec<String>,

    /// Follow symlinks while walking paths
    #[arg(long = "follow-symlinks", action = ArgAction::SetTrue)]
    follow_symlinks: bool,

    /// Worker threads (defaults to one per core)
    #[arg(short = 'j', long = "jobs")]
    jobs: Option<usize>,

    /// Emit a single JSON array
    #[arg(long = "json", action = ArgAction::SetTrue, conflicts_with = "ndjson")]
    json: bool,

    /// Emit newline-delimited JSON
    #[arg(long = "ndjson", action = ArgAction::SetTrue)]
    ndjson: bool,
}

#[derive(Debug, Args)]
struct TablesArgs {
    /// Font file to inspect
    #[arg(value_hint = ValueHint::FilePath)]
    file: PathBuf,

    /// Only list these tables (1-4 characters, space padded)
    #[arg(long = "tag", value_parser = tag4)]
    tags: Vec<Tag>,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Which {
    Family,
    Style,
}

/// Parse CLI args and execute the selected command.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let extract = ExtractOptions::default().with_max_table_len(cli.max_table_bytes);
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match cli.command {
        Command::Family(args) => write_names(&args.files, Which::Family, extract, &mut handle),
        Command::Style(args) => write_names(&args.files, Which::Style, extract, &mut handle),
        Command::Scan(args) => run_scan(args, extract, &mut handle),
        Command::Tables(args) => write_tables(&args.file, &args.tags, &mut handle),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env = env_logger::Env::default().default_filter_or(level);
    env_logger::Builder::from_env(env).init();
}

/// One line per font that has the name; `path<TAB>name` when given several files.
fn write_names(
    files: &[PathBuf],
    which: Which,
    extract: ExtractOptions,
    mut w: impl Write,
) -> Result<()> {
    let extractor = FontNameExtractor::with_options(extract);
    let with_path = files.len() > 1;

    for path in files {
        let name = match which {
            Which::Family => extractor.family_name_from_path(path),
            Which::Style => extractor.subfamily_name_from_path(path),
        };
        let Some(name) = name else {
            info!("{}: no {which:?} name", path.display());
            continue;
        };

        if with_path {
            writeln!(w, "{}\t{name}", path.display())?;
        } else {
            writeln!(w, "{name}")?;
        }
    }

    Ok(())
}

fn run_scan(args: ScanArgs, extract: ExtractOptions, mut w: impl Write) -> Result<()> {
    let listed = if args.stdin_paths {
        read_listing(io::stdin().lock())?
    } else {
        Vec::new()
    };
    let discovery = PathDiscovery::new(&args.paths)
        .with_listed(listed)
        .follow_symlinks(args.follow_symlinks);
    let query = build_query(&args)?;
    let opts = ScanOptions {
        jobs: args.jobs,
        extract,
    };

    let matches = scan(&discovery, &query, &opts)?;
    info!("{} fonts with names", matches.len());

    if args.ndjson {
        write_ndjson(&matches, &mut w)?;
    } else if args.json {
        write_json_pretty(&matches, &mut w)?;
    } else {
        write_plain(&matches, &mut w)?;
    }

    Ok(())
}

fn build_query(args: &ScanArgs) -> Result<Query> {
    Ok(Query::new()
        .with_family_patterns(compile_patterns(&args.family_patterns)?)
        .with_subfamily_patterns(compile_patterns(&args.style_patterns)?))
}

/// `tag<TAB>offset<TAB>length` per directory entry, in file order.
fn write_tables(path: &Path, tags: &[Tag], mut w: impl Write) -> Result<()> {
    let mut reader = FontReader::new(open_stream(path)?)?;
    let directory = read_table_directory(&mut reader)?
        .ok_or_else(|| anyhow!("{}: not an sfnt font", path.display()))?;

    let wanted = |tag: &Tag| tags.is_empty() || tags.contains(tag);
    for record in directory.records.iter().filter(|rec| wanted(&rec.tag)) {
        writeln!(
            w,
            "{}\t{}\t{}",
            tag_to_string(record.tag),
            record.offset,
            record.length
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests;
