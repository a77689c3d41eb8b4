use clap::Parser;
use derive_builder::Builder;
use opref_common::{
    constants::{DEFAULT_GAS_COSTS_PATH, DEFAULT_REQUEST_TIMEOUT, URL_REGEX},
    utils::{http::get_text_from_url, io::file::read_file},
};
use tracing::{debug, warn};

use crate::{
    core::{aliases::NameAliases, costs::CostTable, store::FsDocumentStore},
    error::Error,
};

#[derive(Debug, Clone, Parser, Builder)]
#[clap(
    about = "Builds the FuelVM instruction reference table",
    after_help = "Instructions are matched to gas cost keys by lowercase name. Use --alias to \
                  add or override a rewrite, e.g. --alias ecal=call.",
    override_usage = "opref reference [OPTIONS]"
)]
/// Arguments for the reference operation
///
/// Empty paths are filled in from the configuration by the CLI before the operation runs.
pub struct ReferenceArgs {
    /// The instruction definition source, either a URL or a local file.
    #[clap(long, short, default_value = "", hide_default_value = true)]
    pub source: String,

    /// Path to the chain specification JSON holding the gas cost table.
    #[clap(long, short, default_value = "", hide_default_value = true)]
    pub chain_spec: String,

    /// Dot-separated path to the gas cost table within the chain specification.
    #[clap(long, default_value = "", hide_default_value = true)]
    pub gas_costs_path: String,

    /// Root directory of the per-opcode documentation.
    #[clap(long, short, default_value = "", hide_default_value = true)]
    pub docs: String,

    /// Timeout in seconds for fetching a remote source.
    #[clap(long, short)]
    pub timeout: Option<u64>,

    /// Extra `<opcode>=<gas cost key>` rewrites, merged over the built-in table.
    #[clap(long = "alias", short = 'a', value_parser = parse_alias_arg)]
    pub aliases: Vec<(String, String)>,

    /// The name for the output file
    #[clap(long, short, default_value = "", hide_default_value = true)]
    pub name: String,

    /// The output directory to write the output to or 'print' to print to the console
    #[clap(long = "output", short, default_value = "output", hide_default_value = true)]
    pub output: String,
}

/// Parses an `<opcode>=<gas cost key>` alias argument.
pub fn parse_alias_arg(arg: &str) -> Result<(String, String), String> {
    match arg.split_once('=') {
        Some((name, key)) if !name.trim().is_empty() && !key.trim().is_empty() => {
            Ok((name.trim().to_lowercase(), key.trim().to_string()))
        }
        _ => Err(format!("invalid alias '{arg}', expected <opcode>=<gas cost key>")),
    }
}

impl ReferenceArgs {
    /// Retrieves the instruction definition source text, from a URL or a local file.
    pub async fn get_source(&self) -> Result<String, Error> {
        if self.source.is_empty() {
            return Err(Error::Retrieval("no instruction source was given".to_string()));
        }

        if URL_REGEX.is_match(&self.source).unwrap_or(false) {
            debug!("fetching instruction source from '{}'", self.source);
            get_text_from_url(&self.source, self.timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT))
                .await
                .map_err(|e| Error::Retrieval(format!("failed to fetch '{}': {e}", self.source)))
        } else {
            debug!("reading instruction source from '{}'", self.source);
            read_file(&self.source)
                .map_err(|e| Error::Retrieval(format!("failed to read '{}': {e}", self.source)))
        }
    }

    /// Reads the gas cost table out of the chain specification.
    ///
    /// Without a chain specification every instruction resolves to an unknown fee.
    pub fn get_cost_table(&self) -> Result<CostTable, Error> {
        if self.chain_spec.is_empty() {
            warn!("no chain spec was given, every minimum fee will be unknown");
            return Ok(CostTable::default());
        }

        let contents = read_file(&self.chain_spec).map_err(|e| {
            Error::ChainSpec(format!("failed to read '{}': {e}", self.chain_spec))
        })?;
        let chain_spec: serde_json::Value = serde_json::from_str(&contents).map_err(|e| {
            Error::ChainSpec(format!("failed to parse '{}': {e}", self.chain_spec))
        })?;

        let path =
            if self.gas_costs_path.is_empty() { DEFAULT_GAS_COSTS_PATH } else { &self.gas_costs_path };
        CostTable::from_chain_spec(&chain_spec, path)
    }

    /// Returns the built-in alias table with the user's aliases merged over it.
    pub fn get_aliases(&self) -> NameAliases {
        let mut aliases = NameAliases::default();
        aliases.extend(self.aliases.iter().cloned());
        aliases
    }

    /// Returns the documentation store, if a documentation directory was given.
    pub fn get_document_store(&self) -> Option<FsDocumentStore> {
        (!self.docs.is_empty()).then(|| FsDocumentStore::new(&self.docs))
    }
}

impl ReferenceArgsBuilder {
    /// Creates a new ReferenceArgsBuilder with default values
    pub fn new() -> Self {
        Self {
            source: Some(String::new()),
            chain_spec: Some(String::new()),
            gas_costs_path: Some(DEFAULT_GAS_COSTS_PATH.to_string()),
            docs: Some(String::new()),
            timeout: Some(None),
            aliases: Some(Vec::new()),
            name: Some(String::new()),
            output: Some(String::new()),
        }
    }
}
