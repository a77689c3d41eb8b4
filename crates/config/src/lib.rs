//! Configuration management for opref
//!
//! This crate provides functionality for managing the opref configuration,
//! including loading, saving, updating, and deleting configuration settings.

/// Error types for the configuration module
pub mod error;

use crate::error::Error;
use clap::Parser;
use opref_common::{
    constants::{DEFAULT_GAS_COSTS_PATH, DEFAULT_INSTRUCTION_SOURCE, DEFAULT_REQUEST_TIMEOUT},
    utils::io::file::{delete_path, read_file, write_file},
};
use serde::{Deserialize, Serialize};
#[allow(deprecated)]
use std::env::home_dir;
use std::{collections::BTreeMap, path::PathBuf};
use tracing::{error, info};

/// Command line arguments for the configuration command
#[derive(Debug, Clone, Parser)]
#[clap(
    about = "Display and edit the current configuration",
    after_help = "Alias entries are set with `opref config aliases.<opcode> <gas cost key>`.",
    override_usage = "opref config [OPTIONS]"
)]
pub struct ConfigArgs {
    /// The target key to update.
    #[clap(required = false, default_value = "")]
    key: String,

    /// The value to set the key to.
    #[clap(required = false, default_value = "")]
    value: String,
}

/// The [`Configuration`] struct represents the configuration of the CLI. The CLI reads it once
/// and passes the values down explicitly; library crates never load it themselves.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    /// Where the instruction definitions are read from, either a URL or a local file
    pub source_url: String,

    /// Path to the chain specification JSON holding the gas cost table
    pub chain_spec_path: String,

    /// Dot-separated path to the gas cost table within the chain specification
    pub gas_costs_path: String,

    /// Root directory of the per-opcode documentation
    pub docs_path: String,

    /// Timeout in seconds for fetching a remote instruction source
    pub timeout: u64,

    /// Extra opcode name to gas cost key rewrites, merged over the built-in table
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            source_url: DEFAULT_INSTRUCTION_SOURCE.to_string(),
            chain_spec_path: "data/chainspec.json".to_string(),
            gas_costs_path: DEFAULT_GAS_COSTS_PATH.to_string(),
            docs_path: "docs/opcodes".to_string(),
            timeout: DEFAULT_REQUEST_TIMEOUT,
            aliases: BTreeMap::new(),
        }
    }
}

/// Returns the path of the configuration file, `$HOME/.opref/config.toml`.
#[allow(deprecated)]
fn config_path() -> Result<PathBuf, Error> {
    let mut home = home_dir().ok_or_else(|| {
        Error::Generic(
            "failed to get home directory. does your os support `std::env::home_dir()`?"
                .to_string(),
        )
    })?;
    home.push(".opref");
    home.push("config.toml");
    Ok(home)
}

impl Configuration {
    /// Returns the current configuration, creating the file with defaults if it is missing.
    pub fn load() -> Result<Self, Error> {
        let path = config_path()?;

        // if the config file doesn't exist, create it
        if !path.exists() {
            let config = Configuration::default();
            config.save()?;
        }

        // read the config file
        let contents = read_file(
            path.to_str()
                .ok_or_else(|| Error::Generic("failed to convert path to string".to_string()))?,
        )
        .map_err(|e| Error::Generic(format!("failed to read config file: {e}")))?;

        // parse the config file
        toml::from_str(&contents)
            .map_err(|e| Error::ParseError(format!("failed to parse config file: {e}")))
    }

    /// Saves the current configuration to disk.
    pub fn save(&self) -> Result<(), Error> {
        let path = config_path()?;

        write_file(
            path.to_str()
                .ok_or_else(|| Error::Generic("failed to convert path to string".to_string()))?,
            &toml::to_string(&self)
                .map_err(|e| Error::ParseError(format!("failed to serialize config: {e}")))?,
        )
        .map_err(|e| Error::Generic(format!("failed to write config file: {e}")))?;

        Ok(())
    }

    /// Deletes the configuration file at `$HOME/.opref/config.toml`.
    pub fn delete() -> Result<(), Error> {
        let path = config_path()?;

        delete_path(
            path.to_str()
                .ok_or_else(|| Error::Generic("failed to convert path to string".to_string()))?,
        )
        .map_err(|e| Error::Generic(format!("failed to delete config file: {e}")))?;

        Ok(())
    }

    /// Update a single key/value pair in the configuration. Alias entries use the
    /// `aliases.<opcode>` key form.
    pub fn update(&mut self, key: &str, value: &str) -> Result<(), Error> {
        // update the key in the struct and ensure it's the correct type
        match key {
            "source_url" => {
                self.source_url = value.to_string();
            }
            "chain_spec_path" => {
                self.chain_spec_path = value.to_string();
            }
            "gas_costs_path" => {
                self.gas_costs_path = value.to_string();
            }
            "docs_path" => {
                self.docs_path = value.to_string();
            }
            "timeout" => {
                self.timeout = value.parse::<u64>().map_err(|e| {
                    Error::ParseError(format!("invalid value for 'timeout': {value} ({e})"))
                })?;
            }
            _ => match key.strip_prefix("aliases.") {
                Some(opcode) if !opcode.is_empty() => {
                    self.aliases.insert(opcode.to_lowercase(), value.to_string());
                }
                _ => {
                    return Err(Error::Generic(format!(
                        "invalid key: \'{key}\' is not a valid configuration key."
                    )))
                }
            },
        }

        // write the updated config to disk
        self.save()?;

        Ok(())
    }
}

/// The `config` command is used to display and edit the current configuration.
pub fn config(args: ConfigArgs) -> Result<(), Error> {
    if !args.key.is_empty() {
        if !args.value.is_empty() {
            // read the config file and update the key/value pair
            let mut config = Configuration::load()?;
            config.update(&args.key, &args.value)?;
            info!("updated configuration! Set \'{}\' = \'{}\' .", &args.key, &args.value);
        } else {
            // key is set, but no value is set
            error!("found key but no value to set. Please specify a value to set, use `opref config --help` for more information.");
        }
    } else {
        // no key is set, print the config file
        println!("{:#?}", Configuration::load()?);
        info!("use `opref config <KEY> <VALUE>` to set a key/value pair.");
    }

    Ok(())
}
