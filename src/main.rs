use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use gradecalc::engine::{EngineError, RawEntry, Scale};
use gradecalc::tools::{Report, Toolkit};

// Exit codes
const EXIT_SUCCESS: i32 = 0;
const EXIT_INPUT: i32 = 1;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// General Weighted Average: every subject must be valid
    Gwa {
        /// Subject as NAME:GRADE:UNITS (repeatable)
        #[arg(long = "subject", value_name = "NAME:GRADE:UNITS", required = true)]
        subjects: Vec<String>,
    },
    /// Weighted grade; rows that do not parse are skipped
    Weighted {
        /// Grade as [NAME:]GRADE:WEIGHT (repeatable)
        #[arg(long = "grade", value_name = "[NAME:]GRADE:WEIGHT", required = true)]
        grades: Vec<String>,
    },
    /// Simple average of grades
    #[command(allow_negative_numbers = true)]
    Average {
        /// Grade as [NAME:]GRADE
        #[arg(value_name = "[NAME:]GRADE", required = true)]
        grades: Vec<String>,
    },
    /// Semester GPA from letter grades and credit hours
    Semester {
        /// Course as [NAME:]LETTER:CREDITS (repeatable)
        #[arg(long = "course", value_name = "[NAME:]LETTER:CREDITS", required = true)]
        courses: Vec<String>,
    },
    /// Convert a CGPA to a percentage
    #[command(allow_negative_numbers = true)]
    Cgpa {
        value: String,
        /// Scale the CGPA is on: 10, 5 or 4
        #[arg(long, default_value = "10")]
        scale: Scale,
    },
    /// Convert between GWA, GPA and percentage scales
    Convert {
        #[arg(allow_hyphen_values = true)]
        value: String,
        /// Source scale (percentage, ten-point, five-point, four-point, philippine)
        #[arg(long)]
        from: Scale,
        /// Target scale
        #[arg(long)]
        to: Scale,
    },
    /// Score needed on the final exam to reach a target grade
    #[command(allow_negative_numbers = true)]
    FinalGrade {
        /// Current grade before the final
        current: String,
        /// Final exam share of the overall grade, in percent
        weight_percent: String,
        /// Overall grade you want
        target: String,
    },
    /// Write the default config file
    Init {
        /// Overwrite an existing file without asking
        #[arg(long)]
        force: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
enum Format {
    /// Human-readable summary
    #[default]
    Text,
    /// Machine-readable JSON
    Json,
    /// Plain-text results for pasting elsewhere
    Copy,
    /// Share text plus prefilled social links
    Share,
}

#[derive(Parser, Debug)]
#[command(name = "gradecalc")]
#[command(about = "Grade calculators: GWA, GPA, weighted grades and more", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/gradecalc/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = Format::Text)]
    format: Format,

    #[command(subcommand)]
    command: Commands,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "gradecalc=debug" } else { "gradecalc=warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn rows(args: &[String]) -> Vec<RawEntry> {
    args.iter().map(|s| RawEntry::from_row(s)).collect()
}

fn run(kit: &Toolkit, command: Commands) -> Result<Report, EngineError> {
    match command {
        Commands::Gwa { subjects } => kit.gwa(&rows(&subjects)),
        Commands::Weighted { grades } => kit.weighted_grade(&rows(&grades)),
        Commands::Average { grades } => kit.grade_average(&grades),
        Commands::Semester { courses } => kit.semester_gpa(&rows(&courses)),
        Commands::Cgpa { value, scale } => kit.cgpa_to_percentage(&value, scale),
        Commands::Convert { value, from, to } => kit.convert(&value, from, to),
        Commands::FinalGrade {
            current,
            weight_percent,
            target,
        } => kit.final_grade(&current, &weight_percent, &target),
        // Handled before the toolkit is built
        Commands::Init { .. } => unreachable!("init does not produce a report"),
    }
}

fn print_report(report: &Report, format: Format) {
    match format {
        Format::Text => {
            let use_colors = gradecalc::output::should_use_colors();
            println!("{}", gradecalc::output::format_report(report, use_colors));
        }
        Format::Json => match gradecalc::output::format_json(report) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Failed to render JSON: {}", e);
                std::process::exit(EXIT_INPUT);
            }
        },
        Format::Copy => {
            let today = chrono::Local::now().date_naive();
            println!("{}", gradecalc::output::format_results_text(report, today));
        }
        Format::Share => {
            let text = gradecalc::output::format_share_text(report);
            println!("{}", text);
            match gradecalc::output::share_links(&text) {
                Ok(links) => {
                    println!();
                    for link in links {
                        println!("{:<9} {}", link.platform, link.url);
                    }
                }
                Err(e) => eprintln!("Failed to build share links: {}", e),
            }
        }
    }
}

fn print_error(err: &EngineError, format: Format) {
    if format == Format::Json {
        if let Ok(json) = gradecalc::output::format_error_json(err) {
            println!("{}", json);
            return;
        }
    }
    eprintln!("Error: {}", err);
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config_path = cli.config.map(PathBuf::from);

    // Init writes the config, so it must not depend on loading one
    if let Commands::Init { force } = cli.command {
        match gradecalc::config::init::run_init(config_path, force) {
            Ok(Some(path)) => println!("Wrote config to {}", path.display()),
            Ok(None) => println!("Keeping existing config."),
            Err(e) => {
                eprintln!("Config error: {:#}", e);
                std::process::exit(EXIT_CONFIG);
            }
        }
        std::process::exit(EXIT_SUCCESS);
    }

    // Load config
    let config = match gradecalc::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate config at startup
    if let Err(errors) = gradecalc::config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let kit = match Toolkit::from_config(&config) {
        Ok(kit) => kit,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    debug!(command = ?cli.command, "running calculator");
    match run(&kit, cli.command) {
        Ok(report) => print_report(&report, cli.format),
        Err(e) => {
            debug!(kind = e.kind(), "calculation rejected");
            print_error(&e, cli.format);
            std::process::exit(EXIT_INPUT);
        }
    }

    std::process::exit(EXIT_SUCCESS);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_final_grade_accepts_negative_target() {
        let cli = Cli::try_parse_from(["gradecalc", "final-grade", "98", "10", "-5"]).unwrap();
        match cli.command {
            Commands::FinalGrade { target, .. } => assert_eq!(target, "-5"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_cgpa_accepts_negative_value_and_scale() {
        let cli = Cli::try_parse_from(["gradecalc", "cgpa", "-1", "--scale", "4"]).unwrap();
        match cli.command {
            Commands::Cgpa { value, scale } => {
                assert_eq!(value, "-1");
                assert_eq!(scale, Scale::FourPoint);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_average_takes_named_grades() {
        let cli = Cli::try_parse_from(["gradecalc", "-f", "json", "average", "Math:90", "-3"]).unwrap();
        assert_eq!(cli.format, Format::Json);
        match cli.command {
            Commands::Average { grades } => assert_eq!(grades, vec!["Math:90", "-3"]),
            other => panic!("unexpected {:?}", other),
        }
    }
}
