use super::defaults::DefaultsConfig;
use super::file::FileConfig;
use super::models::AppConfig;
use crate::cli::RunArgs;
use crate::error::{CliError, Result};
use chainfold::core::potentials::PotentialParams;
use chainfold::engine::config as core_config;
use std::str::FromStr;

/// Resolves the final simulation configuration. Precedence, highest first: explicit
/// CLI flags, `--set` values, the config file, built-in defaults.
pub fn build_config(args: &RunArgs) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();

    let file_config = if let Some(config_path) = &args.config {
        FileConfig::from_file(config_path)?
    } else {
        FileConfig::default()
    };

    let mut file_config = apply_set_values(file_config, &args.set_values)?;

    let chain_file = file_config.chain.take().unwrap_or_default();
    let potential_file = file_config.potential.take().unwrap_or_default();
    let simulation_file = file_config.simulation.take().unwrap_or_default();

    let potential = PotentialParams {
        radius: potential_file.radius.unwrap_or(defaults.potential.radius),
        m: potential_file.m.unwrap_or(defaults.potential.m),
        n: potential_file.n.unwrap_or(defaults.potential.n),
    };

    let energy_evaluation = match &args.energy_evaluation {
        Some(mode) => core_config::EnergyEvaluation::from_str(mode)
            .map_err(|e| CliError::Argument(e.to_string()))?,
        None => simulation_file
            .energy_evaluation
            .unwrap_or(defaults.energy_evaluation),
    };

    let core_config = core_config::SimulationConfigBuilder::new()
        .chain_length(
            args.chain_length
                .or(chain_file.length)
                .unwrap_or(defaults.chain_length),
        )
        .bond_length(
            args.bond_length
                .or(chain_file.bond_length)
                .unwrap_or(defaults.bond_length),
        )
        .potential(potential)
        .temperature(
            args.temperature
                .or(simulation_file.temperature)
                .unwrap_or(defaults.temperature),
        )
        .step_count(args.steps.or(simulation_file.steps).unwrap_or(defaults.steps))
        .seed(args.seed.or(simulation_file.seed))
        .max_proposal_attempts(
            simulation_file
                .max_proposal_attempts
                .unwrap_or(defaults.max_proposal_attempts),
        )
        .energy_evaluation(energy_evaluation)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    Ok(AppConfig {
        output_prefix: args.output.clone(),
        core_config,
    })
}

fn parse_value<T: FromStr>(key: &str, value_str: &str, kind: &str) -> Result<T> {
    value_str.trim().parse().map_err(|_| {
        CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value_str))
    })
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for kv_pair in set_values {
        let Some((key, value_str)) = kv_pair.split_once('=') else {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        };
        let key = key.trim();

        match key {
            "chain.length" => {
                config.chain.get_or_insert_with(Default::default).length =
                    Some(parse_value(key, value_str, "integer")?);
            }
            "chain.bond-length" => {
                config.chain.get_or_insert_with(Default::default).bond_length =
                    Some(parse_value(key, value_str, "float")?);
            }
            "potential.radius" => {
                config.potential.get_or_insert_with(Default::default).radius =
                    Some(parse_value(key, value_str, "float")?);
            }
            "potential.m" => {
                config.potential.get_or_insert_with(Default::default).m =
                    Some(parse_value(key, value_str, "float")?);
            }
            "potential.n" => {
                config.potential.get_or_insert_with(Default::default).n =
                    Some(parse_value(key, value_str, "float")?);
            }
            "simulation.temperature" => {
                config
                    .simulation
                    .get_or_insert_with(Default::default)
                    .temperature = Some(parse_value(key, value_str, "float")?);
            }
            "simulation.steps" => {
                config.simulation.get_or_insert_with(Default::default).steps =
                    Some(parse_value(key, value_str, "integer")?);
            }
            "simulation.seed" => {
                config.simulation.get_or_insert_with(Default::default).seed =
                    Some(parse_value(key, value_str, "integer")?);
            }
            "simulation.max-proposal-attempts" => {
                config
                    .simulation
                    .get_or_insert_with(Default::default)
                    .max_proposal_attempts = Some(parse_value(key, value_str, "integer")?);
            }
            "simulation.energy-evaluation" => {
                let mode = core_config::EnergyEvaluation::from_str(value_str)
                    .map_err(|e| CliError::Config(e.to_string()))?;
                config
                    .simulation
                    .get_or_insert_with(Default::default)
                    .energy_evaluation = Some(mode);
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}
