use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::Error;

/// The resolved minimum fee of an instruction.
///
/// Serialized as a number, or `null` when the fee could not be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<u64>", into = "Option<u64>")]
pub enum Fee {
    /// The fee was resolved from the cost table
    Known(u64),
    /// The cost table has no usable entry for the instruction
    Unknown,
}

impl Fee {
    /// Returns the fee value, if known.
    pub fn value(&self) -> Option<u64> {
        match self {
            Fee::Known(fee) => Some(*fee),
            Fee::Unknown => None,
        }
    }
}

impl From<Option<u64>> for Fee {
    fn from(value: Option<u64>) -> Self {
        value.map_or(Fee::Unknown, Fee::Known)
    }
}

impl From<Fee> for Option<u64> {
    fn from(fee: Fee) -> Self {
        fee.value()
    }
}

/// The `base` component of an operation whose cost depends on its input size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseCost {
    /// Cost charged regardless of input size
    pub base: u64,
}

/// The structured form of a cost table entry.
///
/// Chain specifications serialize these as `LightOperation` / `HeavyOperation`; the
/// kebab-case spelling is accepted as well.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationCost {
    /// Cost of an operation that processes several units per gas
    #[serde(
        default,
        rename = "light-operation",
        alias = "LightOperation",
        skip_serializing_if = "Option::is_none"
    )]
    pub light_operation: Option<BaseCost>,
    /// Cost of an operation that charges gas per processed unit
    #[serde(
        default,
        rename = "heavy-operation",
        alias = "HeavyOperation",
        skip_serializing_if = "Option::is_none"
    )]
    pub heavy_operation: Option<BaseCost>,
}

/// A single value of the gas cost table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CostEntry {
    /// A flat cost
    Number(u64),
    /// A light or heavy operation cost
    Operation(OperationCost),
    /// Anything else the table holds, kept verbatim
    Other(Value),
}

impl CostEntry {
    /// Normalizes the entry into a fee.
    ///
    /// Precedence is `light-operation.base`, then `heavy-operation.base`, then the entry itself
    /// as a number. Returns `None` if no branch yields a number.
    pub fn fee(&self) -> Option<u64> {
        match self {
            CostEntry::Number(fee) => Some(*fee),
            CostEntry::Operation(OperationCost { light_operation: Some(light), .. }) => {
                Some(light.base)
            }
            CostEntry::Operation(OperationCost { heavy_operation: Some(heavy), .. }) => {
                Some(heavy.base)
            }
            CostEntry::Operation(_) => None,
            CostEntry::Other(value) => value.as_u64().or_else(|| {
                // whole-number floats, e.g. `7.0`
                value
                    .as_f64()
                    .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f <= u64::MAX as f64)
                    .map(|f| f as u64)
            }),
        }
    }
}

/// The gas cost table, keyed by reconciled instruction name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CostTable {
    entries: HashMap<String, CostEntry>,
}

impl CostTable {
    /// Extracts the cost table found at the dot-separated `path` within a chain specification,
    /// e.g. `consensus_parameters.V1.gas_costs.V1`.
    pub fn from_chain_spec(chain_spec: &Value, path: &str) -> Result<Self, Error> {
        let table = path
            .split('.')
            .filter(|segment| !segment.is_empty())
            .try_fold(chain_spec, |value, segment| {
                value.get(segment).ok_or_else(|| {
                    Error::ChainSpec(format!("missing '{segment}' in gas cost path '{path}'"))
                })
            })?
            .as_object()
            .ok_or_else(|| Error::ChainSpec(format!("'{path}' is not a gas cost table")))?;

        let entries = table
            .iter()
            .map(|(key, value)| {
                let entry = serde_json::from_value(value.clone())
                    .unwrap_or_else(|_| CostEntry::Other(value.clone()));
                (key.to_owned(), entry)
            })
            .collect::<HashMap<_, _>>();

        debug!("loaded {} gas cost entries from '{}'", entries.len(), path);
        Ok(Self { entries })
    }

    /// Returns the raw entry for a reconciled key.
    pub fn get(&self, key: &str) -> Option<&CostEntry> {
        self.entries.get(key)
    }

    /// Returns the number of entries in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, CostEntry)> for CostTable {
    fn from_iter<T: IntoIterator<Item = (String, CostEntry)>>(iter: T) -> Self {
        Self { entries: iter.into_iter().collect() }
    }
}

/// Resolves the fee of the instruction `name`, whose reconciled cost table key is `key`.
///
/// A missing or unusable entry is reported and resolves to [`Fee::Unknown`]; it never fails.
pub fn resolve_fee(costs: &CostTable, name: &str, key: &str) -> Fee {
    let Some(entry) = costs.get(key) else {
        warn!("missing gas cost for {}", name);
        return Fee::Unknown;
    };

    match entry.fee() {
        Some(fee) => Fee::Known(fee),
        None => {
            warn!("unusable gas cost for {} ('{}'): {:?}", name, key, entry);
            Fee::Unknown
        }
    }
}
