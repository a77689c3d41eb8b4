pub(crate) mod error;
pub(crate) mod log_args;
pub(crate) mod output;

use error::Error;
use log_args::LogArgs;
use output::{build_filename, build_output_path, print_with_less};
use tracing::info;

use clap::{Parser, Subcommand};

use opref_common::utils::io::file::write_file;
use opref_config::{config, ConfigArgs, Configuration};
use opref_reference::{build_reference, ReferenceArgs};

#[derive(Debug, Parser)]
#[clap(name = "opref", version)]
pub(crate) struct Arguments {
    #[clap(subcommand)]
    pub(crate) sub: Subcommands,

    #[clap(flatten)]
    logs: LogArgs,
}

#[derive(Debug, Subcommand)]
#[clap(
    about = "opref builds a cross-referenced FuelVM instruction reference, joining opcodes with \
             their gas costs and documentation."
)]
pub(crate) enum Subcommands {
    #[clap(name = "reference", about = "Build the instruction reference table")]
    Reference(ReferenceArgs),

    #[clap(name = "config", about = "Display and edit the current configuration")]
    Config(ConfigArgs),
}

/// Fills every option the user left empty from the configuration. Aliases given on the command
/// line win over configured ones.
fn apply_configuration(cmd: &mut ReferenceArgs, configuration: Configuration) {
    if cmd.source.is_empty() {
        cmd.source = configuration.source_url;
    }
    if cmd.chain_spec.is_empty() {
        cmd.chain_spec = configuration.chain_spec_path;
    }
    if cmd.gas_costs_path.is_empty() {
        cmd.gas_costs_path = configuration.gas_costs_path;
    }
    if cmd.docs.is_empty() {
        cmd.docs = configuration.docs_path;
    }
    if cmd.timeout.is_none() {
        cmd.timeout = Some(configuration.timeout);
    }

    let given = std::mem::take(&mut cmd.aliases);
    cmd.aliases = configuration.aliases.into_iter().chain(given).collect();
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let args = Arguments::parse();

    // setup logging, keeping the file writer alive until exit
    let _guard = args.logs.init_tracing();

    match args.sub {
        Subcommands::Reference(mut cmd) => {
            let configuration = Configuration::load()
                .map_err(|e| Error::Generic(format!("failed to load configuration: {}", e)))?;
            apply_configuration(&mut cmd, configuration);

            // if the user has passed an output filename, override the default filename
            let filename = build_filename(&cmd.name, "reference.json");
            let output = cmd.output.clone();

            let reference = build_reference(cmd)
                .await
                .map_err(|e| Error::Generic(format!("failed to build reference: {}", e)))?;
            let serialized = serde_json::to_string_pretty(&reference)?;

            if output == "print" {
                print_with_less(&serialized)
                    .map_err(|e| Error::Generic(format!("failed to print reference: {}", e)))?;
            } else {
                let output_path = build_output_path(&output, &filename)
                    .map_err(|e| Error::Generic(format!("failed to build output path: {}", e)))?;

                write_file(&output_path, &serialized)
                    .map_err(|e| Error::Generic(format!("failed to write reference: {}", e)))?;
                info!("wrote reference to '{}'", output_path);
            }
        }

        Subcommands::Config(cmd) => {
            config(cmd).map_err(|e| Error::Generic(format!("failed to configure: {}", e)))?;
        }
    }

    Ok(())
}
