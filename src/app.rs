//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` defaults and parses CLI arguments
//! - installs logging
//! - runs the fit pipeline and prints the report
//! - applies the quality gate
//! - generates synthetic data / re-renders plots on request

use clap::Parser;
use tracing::warn;

use crate::cli::{Command, FitArgs, PlotArgs, SimulateArgs};
use crate::domain::{FitConfig, QualityWindow, SigmoidParams, SimulateConfig};
use crate::error::{AppError, SYNTAX_ERROR};

pub mod pipeline;

/// Entry point for the `dbc` binary.
pub fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    let argv = rewrite_args(std::env::args().collect());
    let cli = match crate::cli::Cli::try_parse_from(argv) {
        Ok(cli) => cli,
        Err(err) => {
            // `--help` / `--version` are reported through clap's error type too.
            if !err.use_stderr() {
                let _ = err.print();
                return Ok(());
            }
            return Err(AppError::new(SYNTAX_ERROR, err.render().to_string()));
        }
    };

    crate::logging::init_logging(cli.verbose);

    match cli.command {
        Command::Fit(args) => handle_fit(args),
        Command::Simulate(args) => handle_simulate(args),
        Command::Plot(args) => handle_plot(args),
    }
}

fn handle_fit(args: FitArgs) -> Result<(), AppError> {
    let config = fit_config_from_args(&args)?;
    let run = pipeline::run_fit(&config)?;

    if !run.accepted {
        warn!(
            quality = run.fit.quality,
            lower = config.quality_window.lower(),
            upper = config.quality_window.upper(),
            "quality score outside acceptance window; no files written"
        );
        eprintln!("{}", crate::report::format_poor_fit(run.fit.quality));
        return Ok(());
    }

    println!(
        "{}",
        crate::report::format_run_summary(&run.ingest, &run.fit, &config)
    );
    if args.residuals {
        let rows = crate::report::compute_residuals(&run.ingest.samples, &run.fit);
        println!("{}", crate::report::format_residuals(&rows));
    }
    for path in &run.written {
        println!("Wrote file: {}", path.display());
    }

    Ok(())
}

fn handle_simulate(args: SimulateArgs) -> Result<(), AppError> {
    let config = SimulateConfig {
        params: SigmoidParams::new(args.k, args.x0),
        noise: args.noise,
        seed: args.seed,
        count: args.count,
        x_min: args.x_min,
        x_max: args.x_max,
        out: args.out,
    };
    let samples = crate::data::generate_samples(&config)?;
    crate::data::write_samples_csv(&config.out, &samples)?;
    println!("Wrote file: {}", config.out.display());
    Ok(())
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let summary = crate::io::read_summary_json(&args.summary)?;
    crate::plot::render_summary_chart(&args.out, &summary)?;
    println!("Wrote file: {}", args.out.display());
    Ok(())
}

pub fn fit_config_from_args(args: &FitArgs) -> Result<FitConfig, AppError> {
    if !args.delimiter.is_ascii() {
        return Err(AppError::new(
            SYNTAX_ERROR,
            format!("Delimiter must be a single ASCII character, got '{}'.", args.delimiter),
        ));
    }
    if !(args.tolerance.is_finite() && args.tolerance >= 0.0) {
        return Err(AppError::new(SYNTAX_ERROR, "Tolerance must be a non-negative number."));
    }
    if !(args.k0.is_finite() && args.x0.is_finite()) {
        return Err(AppError::new(SYNTAX_ERROR, "Initial guess must be finite."));
    }

    Ok(FitConfig {
        csv_path: args.csv_data_file.clone(),
        delimiter: args.delimiter as u8,
        resin_type: args.resin_type.clone(),
        residence_time: args.time_of_residence.clone(),
        initial_guess: SigmoidParams::new(args.k0, args.x0),
        max_iterations: args.max_iterations,
        quality_window: QualityWindow::new(args.tolerance),
        out_dir: args.out_dir.clone(),
        plot: !args.no_plot,
        summary_json: args.summary_json.clone(),
    })
}

/// Rewrite argv so `dbc` defaults to `dbc fit`.
///
/// Rules:
/// - `dbc`                       -> `dbc fit`
/// - `dbc -c data.csv ...`       -> `dbc fit -c data.csv ...`
/// - `dbc --help/--version/-h`   -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("fit".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "fit" | "simulate" | "plot");
    if is_subcommand {
        return argv;
    }

    // A leading flag means "fit flags".
    if arg1.starts_with('-') {
        argv.insert(1, "fit".to_string());
        return argv;
    }

    argv
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;

    fn args(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_defaults_to_fit() {
        assert_eq!(rewrite_args(args(&["dbc"])), args(&["dbc", "fit"]));
        assert_eq!(
            rewrite_args(args(&["dbc", "-c", "a.csv"])),
            args(&["dbc", "fit", "-c", "a.csv"])
        );
        assert_eq!(rewrite_args(args(&["dbc", "--help"])), args(&["dbc", "--help"]));
        assert_eq!(
            rewrite_args(args(&["dbc", "simulate", "--out", "x.csv"])),
            args(&["dbc", "simulate", "--out", "x.csv"])
        );
    }

    #[test]
    fn fit_flags_map_into_config() {
        let cli = Cli::try_parse_from(rewrite_args(args(&[
            "dbc",
            "-c",
            "runs/col1.csv",
            "-r",
            "MabSelect SuRe",
            "-t",
            "4 min",
            "--k0",
            "-0.2",
            "--x0",
            "55",
            "--tolerance",
            "0.1",
            "--no-plot",
        ])))
        .unwrap();
        let Command::Fit(fit_args) = cli.command else {
            panic!("expected fit subcommand");
        };
        let config = fit_config_from_args(&fit_args).unwrap();
        assert_eq!(config.csv_path, std::path::PathBuf::from("runs/col1.csv"));
        assert_eq!(config.resin_type, "MabSelect SuRe");
        assert_eq!(config.residence_time, "4 min");
        assert_eq!(config.initial_guess, SigmoidParams::new(-0.2, 55.0));
        assert_eq!(config.quality_window, QualityWindow::new(0.1));
        assert_eq!(config.delimiter, b',');
        assert!(!config.plot);
    }

    #[test]
    fn zero_iteration_cap_is_a_syntax_error() {
        assert!(Cli::try_parse_from(args(&["dbc", "fit", "--max-iterations", "0"])).is_err());

        let cli = Cli::try_parse_from(args(&["dbc", "fit", "--max-iterations", "1"])).unwrap();
        let Command::Fit(fit_args) = cli.command else {
            panic!("expected fit subcommand");
        };
        assert_eq!(fit_config_from_args(&fit_args).unwrap().max_iterations, 1);
    }

    #[test]
    fn non_ascii_delimiter_is_rejected() {
        let cli = Cli::try_parse_from(args(&["dbc", "fit", "-d", "§"])).unwrap();
        let Command::Fit(fit_args) = cli.command else {
            panic!("expected fit subcommand");
        };
        let err = fit_config_from_args(&fit_args).unwrap_err();
        assert_eq!(err.exit_code(), SYNTAX_ERROR);
    }
}
