use crate::cli::RunArgs;
use crate::config::build_config;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use chainfold::{
    core::io::{WriteError, table, xyz},
    engine::progress::ProgressReporter,
    workflows::{self, fold::FoldResult},
};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

pub fn run(args: RunArgs) -> Result<()> {
    info!("Merging configuration from file and CLI arguments...");
    let app_config = build_config(&args)?;
    let config = &app_config.core_config;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!(
        "Starting folding simulation ({} residues, {} steps, T = {})...",
        config.chain.length, config.sampling.step_count, config.sampling.temperature
    );
    info!("Invoking the core folding workflow...");

    let result = workflows::fold::run(config, &reporter)?;

    info!(
        "Workflow finished after {} steps with final energy {:.6}.",
        result.trajectory.len(),
        result.final_energy()
    );

    write_outputs(&app_config.output_prefix, &result)?;

    println!(
        "✓ Final energy {:.4} (best {:.4}, initial {:.4}), acceptance {:.1}%",
        result.final_energy(),
        result.trajectory.best_energy(),
        result.initial_energy,
        result.stats.acceptance_ratio() * 100.0
    );
    Ok(())
}

fn write_outputs(prefix: &Path, result: &FoldResult) -> Result<()> {
    let positions_path = output_path(prefix, "positions.csv");
    write_file(&positions_path, |w| table::write_positions(&result.positions, w))?;
    println!("  Final positions written to: {}", positions_path.display());

    let energy_path = output_path(prefix, "energy.csv");
    write_file(&energy_path, |w| {
        table::write_energies(
            result.trajectory.energies(),
            result.trajectory.best_energies(),
            w,
        )
    })?;
    println!("  Energy trace written to: {}", energy_path.display());

    let xyz_path = output_path(prefix, "xyz");
    let comment = format!(
        "chainfold final structure, E = {:.6}",
        result.final_energy()
    );
    write_file(&xyz_path, |w| xyz::write_xyz(&result.positions, &comment, w))?;
    println!("  Structure written to: {}", xyz_path.display());

    Ok(())
}

fn write_file<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> std::result::Result<(), WriteError>,
{
    info!("Writing {:?}", path);
    let mut writer = BufWriter::new(File::create(path)?);
    write(&mut writer)
        .and_then(|_| writer.flush().map_err(WriteError::from))
        .map_err(|source| CliError::Output {
            path: path.to_path_buf(),
            source,
        })
}

/// Appends `.{extension}` to the prefix without replacing any extension it already has.
fn output_path(prefix: &Path, extension: &str) -> PathBuf {
    let mut name = prefix.as_os_str().to_owned();
    name.push(".");
    name.push(extension);
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;
    use std::fs;
    use tempfile::tempdir;

    fn run_args(prefix: &Path, extra: &[&str]) -> RunArgs {
        let prefix = prefix.to_str().unwrap();
        let mut args = vec!["chainfold", "run", "-o", prefix];
        args.extend_from_slice(extra);
        match Cli::parse_from(args).command {
            Commands::Run(run_args) => run_args,
            _ => panic!("Expected 'run' subcommand"),
        }
    }

    #[test]
    fn output_path_appends_extension_to_prefix() {
        assert_eq!(
            output_path(Path::new("out/run.1"), "xyz"),
            PathBuf::from("out/run.1.xyz")
        );
        assert_eq!(
            output_path(Path::new("fold"), "energy.csv"),
            PathBuf::from("fold.energy.csv")
        );
    }

    #[test]
    fn run_writes_all_output_files() {
        let dir = tempdir().unwrap();
        let prefix = dir.path().join("fold");
        let args = run_args(&prefix, &["-n", "6", "--steps", "25", "--seed", "4"]);

        run(args).unwrap();

        let positions = fs::read_to_string(output_path(&prefix, "positions.csv")).unwrap();
        let mut lines = positions.lines();
        assert_eq!(lines.next(), Some("index,x,y,z"));
        assert_eq!(lines.count(), 6);

        let energies = fs::read_to_string(output_path(&prefix, "energy.csv")).unwrap();
        let mut lines = energies.lines();
        assert_eq!(lines.next(), Some("step,energy,best_energy"));
        assert_eq!(lines.count(), 25);

        let structure = fs::read_to_string(output_path(&prefix, "xyz")).unwrap();
        assert_eq!(structure.lines().next(), Some("6"));
        let atoms = structure
            .lines()
            .skip(2)
            .filter(|l| l.split_whitespace().next() == Some("C"))
            .count();
        assert_eq!(atoms, 6);
    }

    #[test]
    fn missing_output_directory_is_reported() {
        let dir = tempdir().unwrap();
        let prefix = dir.path().join("absent").join("fold");
        let args = run_args(&prefix, &["-n", "4", "--steps", "3", "--seed", "1"]);

        assert!(matches!(run(args), Err(CliError::Io(_))));
    }
}
