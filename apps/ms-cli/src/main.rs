use clap::{Parser, Subcommand};
use ms_app::{AppError, AppResult, RunOptions, RunRequest, run_service};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ms-cli")]
#[command(about = "Molten-salt reactor transient simulator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate an input card
    Validate {
        /// Path to the YAML or JSON card
        card_path: PathBuf,
    },
    /// Run the transient described by a card
    Run {
        /// Path to the YAML or JSON card
        card_path: PathBuf,
        /// End time in seconds, replacing meta.t_end
        #[arg(long)]
        t_end: Option<f64>,
        /// Output directory, replacing recorder.output_dir
        #[arg(long)]
        out: Option<PathBuf>,
        /// Skip cache and force re-run
        #[arg(long)]
        no_cache: bool,
    },
    /// List stored runs of a case
    Runs {
        /// Output directory holding the runs
        out_dir: PathBuf,
        /// Case name from meta.case_name
        case_name: String,
    },
    /// Show details of a stored run
    ShowRun {
        /// Output directory holding the run
        out_dir: PathBuf,
        /// Run ID to display
        run_id: String,
    },
    /// Export one scalar series of a run as CSV
    ExportSeries {
        /// Output directory holding the run
        out_dir: PathBuf,
        /// Run ID
        run_id: String,
        /// Series name (e.g. n, T_out, rho)
        key: String,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { card_path } => cmd_validate(&card_path),
        Commands::Run {
            card_path,
            t_end,
            out,
            no_cache,
        } => cmd_run(&card_path, t_end, out, !no_cache),
        Commands::Runs { out_dir, case_name } => cmd_runs(&out_dir, &case_name),
        Commands::ShowRun { out_dir, run_id } => cmd_show_run(&out_dir, &run_id),
        Commands::ExportSeries {
            out_dir,
            run_id,
            key,
            output,
        } => cmd_export_series(&out_dir, &run_id, &key, output.as_deref()),
    }
}

fn cmd_validate(card_path: &Path) -> AppResult<()> {
    println!("Validating card: {}", card_path.display());
    let card = run_service::validate_card_file(card_path)?;
    println!("✓ Card is valid");
    println!("  Case: {}", card.meta.case_name);
    println!("  Structure: {:?}", card.meta.structure);
    println!("  Steps: {} (dt = {} s)", card.steps(), card.dt());
    println!("  Delayed groups: {}", card.neutronics.groups());
    Ok(())
}

fn cmd_run(
    card_path: &Path,
    t_end: Option<f64>,
    out: Option<PathBuf>,
    use_cache: bool,
) -> AppResult<()> {
    println!("Running card: {}", card_path.display());

    let request = RunRequest {
        card_path,
        options: RunOptions {
            use_cache,
            t_end,
            output_dir: out,
            ..RunOptions::default()
        },
    };
    let response = run_service::ensure_run(&request)?;

    if response.loaded_from_cache {
        println!("✓ Loaded from cache: {}", response.run_id);
    } else {
        println!("✓ Simulation completed: {}", response.run_id);
    }
    println!("  Output: {}", response.output_dir.display());
    println!("  Steps: {}", response.manifest.steps);
    match response.manifest.trip_time_s {
        Some(t) => println!("  Trip at: {t:.3} s"),
        None => println!("  Trip: none"),
    }

    println!("\nControl performance (outlet temperature):");
    print!("{}", response.metrics);
    Ok(())
}

fn cmd_runs(out_dir: &Path, case_name: &str) -> AppResult<()> {
    let runs = run_service::list_runs(out_dir, case_name)?;

    if runs.is_empty() {
        println!("No runs found for case: {}", case_name);
    } else {
        println!("Runs for case {}:", case_name);
        for run in runs {
            println!(
                "  {} - {} ({} steps, dt = {} s)",
                run.run_id, run.timestamp, run.steps, run.dt_s
            );
        }
    }
    Ok(())
}

fn cmd_show_run(out_dir: &Path, run_id: &str) -> AppResult<()> {
    println!("Loading run: {}", run_id);

    let (manifest, data) = run_service::load_run(out_dir, run_id)?;

    println!("\nRun Summary:");
    println!("  Case: {}", manifest.case_name);
    println!("  Saved: {}", manifest.timestamp);
    println!("  Solver version: {}", manifest.solver_version);
    println!(
        "  Steps: {} (dt = {} s, t_end = {} s)",
        manifest.steps, manifest.dt_s, manifest.t_end_s
    );
    println!("  Core shape: {:?}", manifest.core_shape);
    match manifest.trip_time_s {
        Some(t) => println!("  Trip at: {t:.3} s"),
        None => println!("  Trip: none"),
    }
    println!("  Control events: {}", data.control_log.len());

    if let Some(last) = data.timeseries.last() {
        println!("\nFinal values:");
        for (key, value) in &last.values {
            println!("  {key}: {value}");
        }
    }

    let mut fields: Vec<&str> = data.fields.iter().map(|f| f.name.as_str()).collect();
    fields.dedup();
    println!("\nSnapshots:");
    for name in fields {
        let count = data.fields.iter().filter(|f| f.name == name).count();
        println!("  {name}: {count}");
    }

    Ok(())
}

fn cmd_export_series(
    out_dir: &Path,
    run_id: &str,
    key: &str,
    output: Option<&Path>,
) -> AppResult<()> {
    let (_manifest, data) = run_service::load_run(out_dir, run_id)?;

    let mut csv = format!("time_s,{key}\n");
    for row in &data.timeseries {
        let value = row
            .values
            .get(key)
            .ok_or_else(|| AppError::InvalidInput(format!("series not recorded: {key}")))?;
        let time = row.values.get("time").copied().unwrap_or(f64::NAN);
        csv.push_str(&format!("{},{}\n", time, value));
    }

    match output {
        Some(path) => {
            std::fs::write(path, csv)?;
            println!("✓ Exported {} rows to {}", data.timeseries.len(), path.display());
        }
        None => print!("{csv}"),
    }
    Ok(())
}
