#[cfg(feature = "rayon-executor")]
use cardwright::RayonExecutor;
use cardwright::{
    DirectorySink, EntrySource, ExecutorImpl, JsonArraySource, JsonLinesSource, PipelineBuilder,
    PipelineConfig, PipelineError,
};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

/// Renders one PNG card per data entry from a JSON card schema.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Card schema (JSON). Fonts and images resolve relative to its directory.
    #[arg(short, long)]
    schema: PathBuf,

    /// Entries as a JSON array, or JSON lines for `.jsonl` / `.ndjson` files
    #[arg(short, long)]
    data: PathBuf,

    /// Output directory, created if missing
    #[arg(short, long, default_value = "cards")]
    out: PathBuf,

    /// Extra directories to scan for fonts
    #[arg(long = "font-dir")]
    font_dirs: Vec<PathBuf>,

    /// Also use fonts installed on this machine
    #[arg(long)]
    system_fonts: bool,

    /// Render on the calling thread only
    #[arg(long)]
    sequential: bool,

    /// Worker threads for parallel rendering (defaults to one per core)
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Stop at the first card that fails
    #[arg(long)]
    fail_fast: bool,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn open_source(path: &Path) -> Result<Box<dyn EntrySource>, PipelineError> {
    let extension = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    let source: Box<dyn EntrySource> = match extension.as_str() {
        "jsonl" | "ndjson" => Box::new(JsonLinesSource::from_path(path)?),
        _ => Box::new(JsonArraySource::from_path(path)?),
    };
    Ok(source)
}

#[cfg(feature = "rayon-executor")]
fn parallel_executor(threads: usize) -> Result<ExecutorImpl, PipelineError> {
    Ok(ExecutorImpl::Rayon(RayonExecutor::with_threads(threads)?))
}

#[cfg(not(feature = "rayon-executor"))]
fn parallel_executor(_threads: usize) -> Result<ExecutorImpl, PipelineError> {
    log::warn!("Built without `rayon-executor`, ignoring --jobs");
    Ok(ExecutorImpl::for_parallelism(false))
}

fn run(args: Args) -> Result<bool, PipelineError> {
    let config = PipelineConfig::default()
        .with_parallel(!args.sequential)
        .with_fail_fast(args.fail_fast);

    let builder = PipelineBuilder::new()
        .with_schema_file(&args.schema)?
        .with_config(config);
    #[cfg(feature = "system-fonts")]
    let builder = args
        .font_dirs
        .iter()
        .fold(builder.with_system_fonts(args.system_fonts), |b, dir| {
            b.with_font_dir(dir)
        });
    #[cfg(not(feature = "system-fonts"))]
    if args.system_fonts || !args.font_dirs.is_empty() {
        log::warn!("Built without `system-fonts`, ignoring --system-fonts and --font-dir");
    }
    let builder = match args.jobs {
        Some(threads) if !args.sequential => builder.with_executor(parallel_executor(threads)?),
        _ => builder,
    };
    let pipeline = builder.build()?;

    let mut source = open_source(&args.data)?;
    let mut sink = DirectorySink::new(&args.out)?;
    let report = pipeline.generate(&mut source, &mut sink)?;

    println!(
        "Rendered {} of {} cards into {}",
        report.rendered,
        report.total(),
        args.out.display()
    );
    for failure in &report.failures {
        eprintln!("  entry {}: {}", failure.index, failure.message);
    }
    Ok(report.is_success())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
