pub(crate) mod aliases;
pub(crate) mod assemble;
pub(crate) mod costs;
pub(crate) mod docs;
pub(crate) mod parser;
pub(crate) mod store;

use std::{collections::BTreeMap, time::Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    core::{
        aliases::NameAliases,
        assemble::{assemble, ReferenceItem},
        costs::CostTable,
        docs::{load_documentation, Documentation, DocumentationEntry, GasForkDocumentation},
        parser::{parse_instructions, InstructionRecord},
        store::DocumentStore,
    },
    error::Error,
    interfaces::ReferenceArgs,
};

/// Everything the reference page is rendered from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceOutput {
    /// Per-instruction documentation, keyed by lowercase instruction name
    pub item_docs: BTreeMap<String, DocumentationEntry>,
    /// Per-instruction, per-fork gas cost documentation
    pub gas_docs: BTreeMap<String, GasForkDocumentation>,
    /// The raw instruction records, in source order
    pub instructions: Vec<InstructionRecord>,
    /// The assembled reference table, one row per instruction
    pub reference: Vec<ReferenceItem>,
}

/// Correlates the instructions defined in `source` with the gas cost table and, if a store is
/// given, with the documentation it holds.
///
/// This never fails. Instructions without a gas cost get an unknown fee and unreadable
/// documentation is left out.
pub async fn correlate<S>(
    source: &str,
    aliases: &NameAliases,
    costs: &CostTable,
    store: Option<&S>,
) -> ReferenceOutput
where
    S: DocumentStore + ?Sized,
{
    let start_parse_time = Instant::now();
    let instructions: Vec<InstructionRecord> = parse_instructions(source).collect();
    debug!("parsing {} instructions took {:?}", instructions.len(), start_parse_time.elapsed());

    let start_docs_time = Instant::now();
    let Documentation { item_docs, gas_docs } = match store {
        Some(store) => load_documentation(store).await,
        None => Documentation::default(),
    };
    debug!("loading documentation took {:?}", start_docs_time.elapsed());

    let reference = assemble(&instructions, aliases, costs);

    ReferenceOutput { item_docs, gas_docs, instructions, reference }
}

/// Builds the instruction reference described by `args`.
///
/// Fails only if the instruction source cannot be retrieved ([`Error::Retrieval`]) or the chain
/// specification cannot be read ([`Error::ChainSpec`]).
pub async fn build_reference(args: ReferenceArgs) -> Result<ReferenceOutput, Error> {
    let start_time = Instant::now();

    let start_fetch_time = Instant::now();
    let source = args.get_source().await?;
    debug!("fetching instruction source took {:?}", start_fetch_time.elapsed());

    let costs = args.get_cost_table()?;
    let aliases = args.get_aliases();
    let store = args.get_document_store();

    let output = correlate(&source, &aliases, &costs, store.as_ref()).await;

    let unknown = output.reference.iter().filter(|item| item.minimum_fee.value().is_none()).count();
    info!(
        "built reference for {} instructions ({} without a gas cost)",
        output.reference.len(),
        unknown
    );
    debug!("building reference took {:?}", start_time.elapsed());

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{
        costs::{CostEntry, Fee},
        store::MemoryDocumentStore,
    };

    const SOURCE: &str = r#"
impl_instructions! {
    "Adds two registers."
    0x10 ADD add [dst: RegId lhs: RegId rhs: RegId]
    "Return from context."
    0x24 RET ret [value: RegId]
    "Call a contract."
    0x2D CALL call [target: RegId amount_of_coins: RegId asset_id_addr: RegId gas: RegId]
}
"#;

    #[tokio::test]
    async fn test_correlate() {
        let costs: CostTable = [
            ("add".to_string(), CostEntry::Number(2)),
            ("ret_contract".to_string(), CostEntry::Number(29)),
        ]
        .into_iter()
        .collect();
        let store = MemoryDocumentStore::new()
            .with_document("ADD.mdx", "---\ngroup: Arithmetic\n---\nAdds.\n")
            .with_directory("CALL", [("Beta.mdx", "Costs more.")]);

        let output = correlate(SOURCE, &NameAliases::default(), &costs, Some(&store)).await;

        assert_eq!(output.instructions.len(), 3);
        assert_eq!(output.reference.len(), 3);
        assert_eq!(output.reference[0].input, "dst | lhs | rhs");
        let fees: Vec<_> = output.reference.iter().map(|item| item.minimum_fee).collect();
        assert_eq!(fees, vec![Fee::Known(2), Fee::Known(29), Fee::Unknown]);

        assert!(output.item_docs.contains_key("add"));
        assert!(output.gas_docs.contains_key("call"));
    }

    #[tokio::test]
    async fn test_correlate_without_store() {
        let output = correlate::<MemoryDocumentStore>(
            SOURCE,
            &NameAliases::default(),
            &CostTable::default(),
            None,
        )
        .await;

        assert_eq!(output.reference.len(), 3);
        assert!(output.item_docs.is_empty());
        assert!(output.gas_docs.is_empty());
    }

    #[tokio::test]
    async fn test_correlate_empty_source() {
        let output = correlate::<MemoryDocumentStore>(
            "",
            &NameAliases::default(),
            &CostTable::default(),
            None,
        )
        .await;

        assert_eq!(output, ReferenceOutput::default());
    }

    #[test]
    fn test_reference_output_serialization() {
        let value = serde_json::to_value(ReferenceOutput::default()).expect("failed to serialize");
        assert_eq!(
            value,
            serde_json::json!({ "itemDocs": {}, "gasDocs": {}, "instructions": [], "reference": [] })
        );
    }
}
