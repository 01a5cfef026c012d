use clap::{Parser, Subcommand, ValueEnum};
use clinic_intake::abstractions::{Clock, FixedClock, SystemClock};
use clinic_intake::app::{
    handle_fatal_error, init_logging, load_record, parse_evaluation_date, AppConfig,
};
use clinic_intake::config::{ConfigLoader, IntakeConfig};
use clinic_intake::error::{ErrorCode, ErrorExt};
use clinic_intake::{IntakeValidator, ValidationReport};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, info};

/// Validate patient intake records
#[derive(Parser)]
#[command(name = "clinic-intake")]
#[command(about = "Validate patient intake records before they are saved", long_about = None)]
struct Cli {
    /// Enable verbose output (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate one patient record (JSON, or YAML by extension)
    Validate {
        /// Path to the record file. In YAML, quote phone numbers, postal codes and
        /// other digit-only text so they are not read as numbers.
        file: PathBuf,

        /// Evaluate age rules as of this date (YYYY-MM-DD) instead of today
        #[arg(long)]
        today: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Path to configuration file
        #[arg(short = 'c', long)]
        config: Option<PathBuf>,
    },
    /// Load configuration and report every problem with it
    CheckConfig {
        /// Path to configuration file
        #[arg(short = 'c', long)]
        config: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Validate {
            file,
            today,
            format,
            config,
        } => run_validate(cli.verbose, &file, today.as_deref(), format, config),
        Commands::CheckConfig { config } => run_check_config(cli.verbose, config),
    };

    match result {
        Ok(code) => code,
        Err(e) => handle_fatal_error(e, cli.verbose),
    }
}

fn load_config(verbose: u8, explicit: Option<PathBuf>) -> anyhow::Result<IntakeConfig> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = explicit {
        loader = loader.with_explicit_file(path);
    }

    // Logging is not up yet; fall back to the verbosity flags for config errors
    let config = match loader.load() {
        Ok(config) => config,
        Err(e) => {
            init_logging(&AppConfig {
                verbose,
                ..AppConfig::default()
            });
            return Err(e.into());
        }
    };

    init_logging(&AppConfig::new(verbose, &config));
    Ok(config)
}

fn run_validate(
    verbose: u8,
    file: &Path,
    today: Option<&str>,
    format: OutputFormat,
    config: Option<PathBuf>,
) -> anyhow::Result<ExitCode> {
    let config = load_config(verbose, config)?;

    let clock: Box<dyn Clock> = match today {
        Some(raw) => Box::new(FixedClock::new(parse_evaluation_date(raw)?)),
        None => Box::new(SystemClock),
    };

    let record = load_record(file)?;
    let validator = IntakeValidator::with_clock(clock).with_settings(config.rule_settings());
    let report = ValidationReport::from(validator.validate(&record)?);

    info!(
        "{} {} ({} violations)",
        file.display(),
        if report.valid { "accepted" } else { "rejected" },
        report.violations.len()
    );

    match format {
        OutputFormat::Json => {
            let rendered = serde_json::to_string_pretty(&report)
                .to_other_error(ErrorCode::OTHER_SERIALIZATION, "Failed to render report")?;
            println!("{}", rendered);
        }
        OutputFormat::Text => print_text_report(file, &report),
    }

    Ok(if report.valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn print_text_report(file: &Path, report: &ValidationReport) {
    match &report.record {
        Some(record) if report.valid => {
            println!("✅ {}: accepted", file.display());
            println!("  Patient:  {}", record.full_name());
            println!("  Born:     {}", record.birth_date);
            println!("  Contacts: {}", record.contacts.len());
            if record.billing_enabled {
                println!("  Billing:  enabled");
            }
        }
        _ => {
            println!(
                "❌ {}: rejected with {} violation(s)",
                file.display(),
                report.violations.len()
            );
            for violation in &report.violations {
                let path = violation.path.to_string();
                let path = if path.is_empty() { "(record)" } else { &path };
                println!("  - {}: {}", path, violation.message);
            }
        }
    }
}

fn run_check_config(verbose: u8, config: Option<PathBuf>) -> anyhow::Result<ExitCode> {
    let config = load_config(verbose, config)?;
    debug!("Effective configuration: {:?}", config);

    println!("✅ Configuration is valid");
    println!("  log_level:              {}", config.log_level);
    println!("  minor_age_threshold:    {}", config.minor_age_threshold);
    println!(
        "  guardian_relationships: {}",
        config.guardian_relationships.join(", ")
    );
    Ok(ExitCode::SUCCESS)
}
