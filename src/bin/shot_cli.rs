use clap::{Parser, ValueEnum};
use std::error::Error;

use shot_solver::constants::METERS_TO_INCHES;
use shot_solver::{
    find_candidates, solve, Candidate, Criterion, Projection, ShotQuery, Solution, SolverError,
};

#[derive(Parser)]
#[command(name = "shot_cli")]
#[command(version = "0.1.0")]
#[command(about = "Ballistic shot solver: launch angle and speed for a target at distance", long_about = None)]
struct Cli {
    /// Launcher height above ground (m)
    #[arg(long, default_value = "0.51")]
    shooter_height: f64,

    /// Target aperture height above ground (m)
    #[arg(long, default_value = "2.5")]
    target_height: f64,

    /// Horizontal distance to the target (m)
    #[arg(short = 'd', long)]
    distance: f64,

    /// Maximum launch speed (m/s)
    #[arg(short = 'v', long, default_value = "15.0")]
    max_speed: f64,

    /// Lower launch-angle bound (degrees)
    #[arg(long, default_value = "30.0")]
    angle_min: f64,

    /// Upper launch-angle bound (degrees)
    #[arg(long, default_value = "80.0")]
    angle_max: f64,

    /// Upper bound on descent angle at the target (degrees, negative = must descend)
    #[arg(long, default_value = "-10.0", allow_hyphen_values = true)]
    max_descent_angle: f64,

    /// Minimum angular separation between distinct candidates (degrees)
    #[arg(long, default_value = "2.0")]
    min_separation: f64,

    /// Target aperture radius (m)
    #[arg(long, default_value = "0.23")]
    target_radius: f64,

    /// Selection criterion
    #[arg(short = 'c', long, value_enum, default_value = "balanced")]
    criterion: CriterionArg,

    /// Which part of the selected shot to report
    #[arg(short = 'p', long, value_enum, default_value = "full")]
    projection: ProjectionArg,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value = "table")]
    format: OutputFormat,

    /// List every accepted candidate instead of only the selected one
    #[arg(long)]
    all: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum CriterionArg {
    MinimumSpeed,
    SteepEntry,
    MaxMargin,
    Fastest,
    Balanced,
}

impl From<CriterionArg> for Criterion {
    fn from(arg: CriterionArg) -> Self {
        match arg {
            CriterionArg::MinimumSpeed => Criterion::MinimumSpeed,
            CriterionArg::SteepEntry => Criterion::SteepEntry,
            CriterionArg::MaxMargin => Criterion::MaxMargin,
            CriterionArg::Fastest => Criterion::Fastest,
            CriterionArg::Balanced => Criterion::Balanced,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ProjectionArg {
    Angle,
    Speed,
    Full,
}

impl From<ProjectionArg> for Projection {
    fn from(arg: ProjectionArg) -> Self {
        match arg {
            ProjectionArg::Angle => Projection::Angle,
            ProjectionArg::Speed => Projection::Speed,
            ProjectionArg::Full => Projection::Full,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let query = ShotQuery::from_degrees(
        cli.shooter_height,
        cli.target_height,
        cli.distance,
        cli.max_speed,
        cli.angle_min,
        cli.angle_max,
        cli.max_descent_angle,
        cli.min_separation,
        cli.target_radius,
    );

    let criterion: Criterion = cli.criterion.into();

    if cli.all {
        let candidates = find_candidates(&query)?;
        if candidates.is_empty() {
            no_feasible_shot(cli.distance);
        }
        return display_candidates(&candidates, cli.format);
    }

    match solve(&query, criterion, cli.projection.into()) {
        Ok(solution) => display_solution(&solution, cli.format),
        Err(SolverError::NoFeasibleSolution) => no_feasible_shot(cli.distance),
        Err(e) => Err(e.into()),
    }
}

fn no_feasible_shot(distance: f64) -> ! {
    eprintln!(
        "No feasible shot: target at {distance:.2} m is out of reach within the given bounds"
    );
    std::process::exit(2);
}

fn display_solution(solution: &Solution, format: OutputFormat) -> Result<(), Box<dyn Error>> {
    match solution {
        Solution::Full(best) => display_selected(best, format),
        Solution::Angle(theta) => display_scalar("angle_deg", theta.to_degrees(), format, solution),
        Solution::Speed(speed) => display_scalar("speed_mps", *speed, format, solution),
    }
}

fn display_scalar(
    label: &str,
    value: f64,
    format: OutputFormat,
    solution: &Solution,
) -> Result<(), Box<dyn Error>> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(solution)?),
        OutputFormat::Csv => {
            println!("{label}");
            println!("{value:.4}");
        }
        OutputFormat::Table => println!("{label}: {value:.4}"),
    }
    Ok(())
}

fn display_selected(best: &Candidate, format: OutputFormat) -> Result<(), Box<dyn Error>> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(best)?);
        }

        OutputFormat::Csv => {
            println!("theta_deg,speed_mps,entry_angle_deg,flight_time_s,margin_m");
            print_csv_row(best);
        }

        OutputFormat::Table => {
            println!("╔════════════════════════════════════════╗");
            println!("║           SELECTED SHOT                ║");
            println!("╠════════════════════════════════════════╣");
            println!("║ Launch Angle:      {:>8.2} deg        ║", best.theta.to_degrees());
            println!("║ Launch Speed:      {:>8.2} m/s        ║", best.speed);
            println!("║                    {:>8.1} in/s       ║", best.speed * METERS_TO_INCHES);
            println!("║ Entry Angle:       {:>8.2} deg        ║", best.entry_angle);
            println!("║ Flight Time:       {:>8.3} s          ║", best.flight_time);
            println!("║ Margin:            {:>8.3} m          ║", best.margin);
            println!("╚════════════════════════════════════════╝");
        }
    }

    Ok(())
}

fn display_candidates(candidates: &[Candidate], format: OutputFormat) -> Result<(), Box<dyn Error>> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(candidates)?);
        }

        OutputFormat::Csv => {
            println!("theta_deg,speed_mps,entry_angle_deg,flight_time_s,margin_m");
            for c in candidates {
                print_csv_row(c);
            }
        }

        OutputFormat::Table => {
            println!("┌──────────┬──────────┬──────────┬──────────┐");
            println!("│ θ (deg)  │ v (m/s)  │ entry(°) │ time (s) │");
            println!("├──────────┼──────────┼──────────┼──────────┤");
            for c in candidates {
                println!(
                    "│ {:>8.2} │ {:>8.2} │ {:>8.2} │ {:>8.3} │",
                    c.theta.to_degrees(),
                    c.speed,
                    c.entry_angle,
                    c.flight_time
                );
            }
            println!("└──────────┴──────────┴──────────┴──────────┘");
        }
    }

    Ok(())
}

fn print_csv_row(c: &Candidate) {
    println!(
        "{:.4},{:.4},{:.2},{:.4},{:.4}",
        c.theta.to_degrees(),
        c.speed,
        c.entry_angle,
        c.flight_time,
        c.margin
    );
}
