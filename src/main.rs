//! lintgate: pre-commit gate against new C/C++ lint errors.
//!
//! Wired as a commit hook, this binary compares the staged change set
//! against the last-accepted lint baseline and refuses the commit when
//! any (file, category) error count grows. Exit codes: 0 for an
//! accepted commit (including first-run baseline initialization), N for
//! a rejection with N regression records, 1 for fatal operational
//! failures.

use clap::Parser;
use lintgate_core::analyzer::LintAnalyzer;
use lintgate_core::cli::{CheckArgs, Cli, Commands, InitArgs, ScanArgs, ScanOutputFormat};
use lintgate_core::config::{GateConfig, load_config};
use lintgate_core::counts::aggregate;
use lintgate_core::error::Result;
use lintgate_core::file_utils::collect_sources;
use lintgate_core::reporting::{count_rows, render_count_table};
use lintgate_core::{BaselineStore, CommitGate, CpplintAnalyzer, GitCli};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    if let Err(e) = color_eyre::install() {
        tracing::debug!(error = %e, "color-eyre install failed");
    }

    let exit_code = match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("lintgate: {}", err);
            for suggestion in err.suggestions() {
                eprintln!("  hint: {}", suggestion);
            }
            1
        }
    };
    std::process::exit(exit_code);
}

fn init_tracing(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "lintgate={0},lintgate_core={0}",
            default_level
        ))
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<i32> {
    let mut config = load_config(cli.config.as_deref())?;
    if let Some(baseline) = cli.baseline {
        config.baseline_file = baseline;
    }

    match cli.command {
        None => run_check(&CheckArgs::default(), config),
        Some(Commands::Check(args)) => run_check(&args, config),
        Some(Commands::Init(args)) => run_init(&args, config),
        Some(Commands::Scan(args)) => run_scan(&args, config),
    }
}

fn build_gate(config: GateConfig) -> CommitGate<GitCli, CpplintAnalyzer> {
    let store = BaselineStore::new(&config.baseline_file);
    let analyzer = CpplintAnalyzer::new(&config.lint_command);
    CommitGate::new(GitCli::new(), analyzer, store, config)
}

fn run_check(args: &CheckArgs, config: GateConfig) -> Result<i32> {
    let mut gate = build_gate(config);
    gate.set_quiet(args.quiet);
    gate.run()
}

fn run_init(args: &InitArgs, config: GateConfig) -> Result<i32> {
    build_gate(config).reinitialize(args.force)
}

fn run_scan(args: &ScanArgs, config: GateConfig) -> Result<i32> {
    let analyzer = CpplintAnalyzer::new(&config.lint_command);
    analyzer.ensure_available()?;

    let sources = collect_sources(&args.path, &config)?;
    if sources.is_empty() {
        println!("No lintable sources under {}.", args.path.display());
        return Ok(0);
    }

    let diagnostics = analyzer.analyze(&sources, config.lint_verbosity)?;
    let counts = aggregate(&diagnostics);

    match args.output {
        ScanOutputFormat::Table => {
            render_count_table(&counts).printstd();
            println!(
                "\n{} errors across {} (file, category) pairs in {} files scanned.",
                counts.total(),
                counts.len(),
                sources.len()
            );
        }
        ScanOutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&count_rows(&counts))?);
        }
    }
    Ok(0)
}
