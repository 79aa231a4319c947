//! Model-driven code generation CLI.
//!
//! Thin command-surface wrapper around `dipeo_codegen_core::Driver`: loads config,
//! picks a cache backend, runs one pipeline phase, and renders any error through the
//! shared diagnostic renderer.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use dipeo_codegen_core::{
    ApplyMode, Cache, CodegenConfig, ColorChoice, Driver, FsCache, NoCache, RealFs, render_error,
};
use dipeo_codegen_logger::{LogLevel, Logger};

#[derive(Parser, Debug)]
#[command(name = "dipeo-codegen")]
#[command(about = "Model-driven code generation pipeline")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Path to the config file (JSON)
    #[arg(short, long, default_value = "codegen.config.json", global = true)]
    config: PathBuf,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress output (only show errors)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Bypass the AST Cache for this run
    #[arg(long, global = true)]
    no_cache: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the full pipeline to staging.
    Generate,
    /// Compare staging vs active; print per-path status.
    DiffStaged,
    /// Run the Validator on staging.
    ValidateStaged {
        #[arg(long)]
        syntax_only: bool,
    },
    /// Run Validator then Applier.
    Apply {
        #[arg(long)]
        syntax_only: bool,
    },
    /// Diff only, no writes.
    DryRun,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = if args.quiet {
        LogLevel::Quiet
    } else if args.verbose {
        LogLevel::Debug
    } else {
        LogLevel::Info
    };
    let logger = Logger::new(level);

    match run(&args, &logger) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let color = if std::io::IsTerminal::is_terminal(&std::io::stderr()) {
                ColorChoice::Always
            } else {
                ColorChoice::Never
            };
            let _ = render_error(&err, color, &mut std::io::stderr());
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args, logger: &Logger) -> dipeo_codegen_core::Result<()> {
    let config = CodegenConfig::from_file(&args.config)?;
    logger.debug(&format!("config: {}", args.config.display()));
    logger.debug(&format!("root: {}", config.root.display()));

    let filesystem: RealFs = RealFs;
    let cache_dir = config.resolve(&config.output.ast_cache);
    let cache: Box<dyn Cache> = if args.no_cache {
        Box::new(NoCache)
    } else {
        Box::new(FsCache::new(cache_dir))
    };

    let driver = Driver::new(&config, &filesystem, cache.as_ref());

    match &args.command {
        Command::Generate => {
            let output = driver.generate()?;
            for path in output.manifest.keys() {
                logger.file("staged", path);
            }
            logger.success(&format!("staged {} file(s)", output.manifest.len()));
        }
        Command::DiffStaged => {
            let output = driver.generate()?;
            print_diff(&driver, &output, logger);
        }
        Command::ValidateStaged { syntax_only } => {
            let output = driver.generate()?;
            driver.validate_staged(&output.staged_files, *syntax_only)?;
            logger.success("staged output is syntactically valid");
        }
        Command::Apply { syntax_only } => {
            let output = driver.generate()?;
            let mode = if *syntax_only {
                ApplyMode::ApplySyntaxOnly
            } else {
                ApplyMode::Apply
            };
            let entries = driver.apply(&output, mode)?;
            for entry in &entries {
                logger.file("applied", &entry.path);
            }
            logger.success(&format!("applied {} change(s)", entries.len()));
        }
        Command::DryRun => {
            let output = driver.generate()?;
            print_diff(&driver, &output, logger);
        }
    }

    Ok(())
}

fn print_diff(driver: &Driver, output: &dipeo_codegen_core::GenerateOutput, logger: &Logger) {
    let entries = driver.diff_staged(&output.manifest);
    for entry in &entries {
        logger.file(&format!("{:?}", entry.status).to_lowercase(), &entry.path);
    }
    logger.success(&format!("{} change(s)", entries.len()));
}
