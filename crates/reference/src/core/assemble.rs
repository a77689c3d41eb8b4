use opref_common::constants::OPERAND_SEPARATOR;
use serde::{Deserialize, Serialize};

use crate::core::{
    aliases::NameAliases,
    costs::{resolve_fee, CostTable, Fee},
    parser::InstructionRecord,
};

/// One row of the instruction reference table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceItem {
    /// The canonical instruction name
    pub name: String,
    /// The opcode value
    pub opcode_or_address: String,
    /// Human readable description
    pub description: String,
    /// Operand names, in declaration order
    pub input: String,
    /// Always empty
    pub output: String,
    /// The resolved minimum fee
    pub minimum_fee: Fee,
}

/// Builds the reference row for a single instruction.
pub fn reference_item(
    record: &InstructionRecord,
    aliases: &NameAliases,
    costs: &CostTable,
) -> ReferenceItem {
    let key = aliases.reconcile(&record.name);

    ReferenceItem {
        name: record.name.clone(),
        opcode_or_address: record.opcode_value.clone(),
        description: record.description.clone(),
        input: record
            .operands
            .iter()
            .map(|operand| operand.name.as_str())
            .collect::<Vec<_>>()
            .join(OPERAND_SEPARATOR),
        output: String::new(),
        minimum_fee: resolve_fee(costs, &record.name, &key),
    }
}

/// Builds one reference row per instruction, in the order given.
///
/// Duplicate names are kept. An instruction without a usable gas cost still gets a row, with
/// [`Fee::Unknown`].
pub fn assemble(
    records: &[InstructionRecord],
    aliases: &NameAliases,
    costs: &CostTable,
) -> Vec<ReferenceItem> {
    records.iter().map(|record| reference_item(record, aliases, costs)).collect()
}
