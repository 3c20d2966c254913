use clap::{Parser, Subcommand};
use std::path::PathBuf;

const EXIT_SUCCESS: i32 = 0;
const EXIT_CONFIG: i32 = 1;
const EXIT_ANSWERS: i32 = 2;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score an answers file and recommend a methodology per PDCA phase
    Analyze {
        /// Path to the filled-in answers file (YAML, or JSON by extension)
        answers: PathBuf,

        /// Emit tab-separated phase/methodology/share rows for scripting
        #[arg(long)]
        tsv: bool,
    },
    /// Print the questionnaire: each phase with its question keys and prompts
    Questions,
    /// Write a starter config with the built-in knowledge base
    Init,
}

#[derive(Parser, Debug)]
#[command(name = "pdca-advisor")]
#[command(about = "PDCA methodology recommendation CLI", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/pdca-advisor/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

fn main() {
    let cli = Cli::parse();
    let config_path = cli.config.map(PathBuf::from);

    // Init writes a config, so it must not require one to exist
    if let Commands::Init = cli.command {
        if let Err(e) = pdca_advisor::config::run_init(config_path) {
            eprintln!("Init error: {}", e);
            std::process::exit(EXIT_CONFIG);
        }
        std::process::exit(EXIT_SUCCESS);
    }

    // Load config
    let config = match pdca_advisor::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    let knowledge = config.knowledge();
    let questionnaire = config.questionnaire();

    if cli.verbose {
        eprintln!(
            "Loaded {} methodology profiles, {} weights, {} questions",
            knowledge.profiles.len(),
            knowledge.weights.len(),
            questionnaire.question_count()
        );
    }

    // Validate the knowledge base and questionnaire at startup
    if let Err(errors) = pdca_advisor::scoring::validate_knowledge(&knowledge) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }
    if let Err(errors) = questionnaire.validate() {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }
    for warning in pdca_advisor::scoring::lint_knowledge(&knowledge) {
        eprintln!("Warning: {}", warning);
    }

    match cli.command {
        Commands::Analyze { answers, tsv } => {
            let answers = match pdca_advisor::questionnaire::load_answers(&answers) {
                Ok(a) => a,
                Err(e) => {
                    eprintln!("Answers error: {}", e);
                    std::process::exit(EXIT_ANSWERS);
                }
            };

            // Range checking happens here, before the scorer ever runs
            if let Err(errors) = answers.validate() {
                eprintln!("Answers errors:");
                for error in errors {
                    eprintln!("  - {}", error);
                }
                std::process::exit(EXIT_ANSWERS);
            }
            for key in answers.unknown_keys(&questionnaire) {
                eprintln!("Warning: answers key '{}' is not in the questionnaire", key);
            }

            if cli.verbose {
                eprintln!(
                    "Scoring {} ratings (team size: {})",
                    answers.ratings.len(),
                    answers
                        .team_size
                        .map(|s| s.to_string())
                        .unwrap_or_else(|| "not given".to_string())
                );
            }

            let outcomes =
                pdca_advisor::recommend::analyze_phases(&answers, &questionnaire, &knowledge);

            if tsv {
                let output = pdca_advisor::output::format_tsv(&outcomes);
                if !output.is_empty() {
                    println!("{}", output);
                }
            } else {
                let use_colors = pdca_advisor::output::should_use_colors();
                println!(
                    "{}",
                    pdca_advisor::output::format_recommendations(&outcomes, use_colors)
                );

                if cli.verbose {
                    println!();
                    for outcome in &outcomes {
                        println!(
                            "{}",
                            pdca_advisor::output::format_phase_breakdown(outcome, use_colors)
                        );
                        println!();
                    }
                }
            }
        }
        Commands::Questions => {
            let use_colors = pdca_advisor::output::should_use_colors();
            println!(
                "{}",
                pdca_advisor::output::format_questionnaire(&questionnaire, use_colors)
            );
        }
        Commands::Init => unreachable!("handled above"),
    }

    std::process::exit(EXIT_SUCCESS);
}
