mod error;
mod report;

use clap::{Parser, Subcommand};
use error::{AppError, AppResult};
use om_core::samples;
use om_meter::{LengthUnit, Mounting};
use om_project::{example_case_file, load, select_cases, solve_cases};
use om_solver::{FlowRateInput, OrificeFlowSolver, SolveOptions};
use report::{SolutionReport, TextReport};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "om-cli")]
#[command(about = "Orifice meter - ISO 5167 air flow-rate calculator", long_about = None)]
struct Cli {
    /// Log inputs, derived properties and results
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the flow rate for one measurement given on the command line
    Solve {
        /// Differential pressure p2 - p1 [Pa], repeat for a series
        #[arg(long = "dp", required = true, allow_negative_numbers = true)]
        dp: Vec<f64>,
        /// Orifice bore
        #[arg(long)]
        d_orifice: f64,
        /// Pipe bore
        #[arg(long)]
        d_pipe: f64,
        /// Unit of both diameters (mm or m)
        #[arg(long, default_value = "mm")]
        unit: LengthUnit,
        /// Tapping arrangement
        #[arg(long, default_value = "flange")]
        mounting: Mounting,
        /// Upstream absolute pressure [Pa], repeat for a series
        #[arg(long = "p1", required = true)]
        p1: Vec<f64>,
        /// Temperature [K or °C], repeat for a series
        #[arg(
            long = "temperature",
            short = 't',
            required = true,
            allow_negative_numbers = true
        )]
        temperature: Vec<f64>,
        /// Relative humidity (0..1)
        #[arg(long, default_value_t = 0.0)]
        phi: f64,
        /// Isentropic exponent
        #[arg(long, default_value_t = 1.4)]
        kappa: f64,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Solve the cases of a case file
    Run {
        /// Path to the case file (YAML or JSON)
        case_path: PathBuf,
        /// Only solve this case
        #[arg(long)]
        case: Option<String>,
        /// Print the results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Validate case file syntax and values
    Validate {
        /// Path to the case file (YAML or JSON)
        case_path: PathBuf,
    },
    /// Print an example case file
    Example {
        /// Print JSON instead of YAML
        #[arg(long)]
        json: bool,
    },
}

fn main() -> AppResult<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let options = SolveOptions {
        verbose: cli.verbose,
    };

    match cli.command {
        Commands::Solve {
            dp,
            d_orifice,
            d_pipe,
            unit,
            mounting,
            p1,
            temperature,
            phi,
            kappa,
            json,
        } => {
            let input = FlowRateInput::new(
                samples(&dp),
                d_orifice,
                d_pipe,
                unit,
                samples(&p1),
                samples(&temperature),
            )
            .with_mounting(mounting)
            .with_humidity(phi)
            .with_kappa(kappa);
            cmd_solve(&input, options, json)
        }
        Commands::Run {
            case_path,
            case,
            json,
        } => cmd_run(&case_path, case.as_deref(), options, json),
        Commands::Validate { case_path } => cmd_validate(&case_path),
        Commands::Example { json } => cmd_example(json),
    }
}

fn cmd_solve(input: &FlowRateInput, options: SolveOptions, json: bool) -> AppResult<()> {
    let solution = OrificeFlowSolver::new().solve(input, options)?;
    if json {
        let report = SolutionReport::new(None, &solution);
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", TextReport(&solution));
    }
    Ok(())
}

fn cmd_run(path: &Path, case_id: Option<&str>, options: SolveOptions, json: bool) -> AppResult<()> {
    let file = load(path)?;
    let cases = select_cases(&file, case_id)?;
    let results = solve_cases(&cases, options);

    let mut reports = Vec::new();
    let mut failed = 0;
    for (case, result) in cases.iter().zip(&results) {
        match result {
            Ok(solution) if json => {
                reports.push(SolutionReport::new(Some(case.id.as_str()), solution));
            }
            Ok(solution) => {
                println!("{} ({})", case.id, case.name);
                println!("{}\n", TextReport(solution));
            }
            Err(err) => {
                failed += 1;
                tracing::error!(case = %case.id, "{err}");
                if !json {
                    println!("✗ {}: {}\n", case.id, err);
                }
            }
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    }

    if failed > 0 {
        return Err(AppError::CasesFailed {
            failed,
            total: cases.len(),
        });
    }
    Ok(())
}

fn cmd_validate(path: &Path) -> AppResult<()> {
    println!("Validating case file: {}", path.display());
    let file = load(path)?;
    println!("✓ Case file is valid ({} cases)", file.cases.len());
    for case in &file.cases {
        println!("  {} - {}", case.id, case.name);
    }
    Ok(())
}

fn cmd_example(json: bool) -> AppResult<()> {
    let file = example_case_file();
    if json {
        println!("{}", serde_json::to_string_pretty(&file)?);
    } else {
        print!("{}", serde_yaml::to_string(&file)?);
    }
    Ok(())
}
