//! The reference module builds the FuelVM instruction reference table.
//!
//! Instruction definitions are extracted from the `fuel-asm` source, matched to the gas cost
//! table of a chain specification and joined with per-opcode documentation. The result holds
//! one row per instruction with its opcode, operands and minimum fee.

/// Error types for the reference module
pub mod error;

mod core;
mod interfaces;

// re-export the public interface
pub use crate::core::{
    aliases::NameAliases,
    assemble::{assemble, reference_item, ReferenceItem},
    build_reference, correlate,
    costs::{resolve_fee, BaseCost, CostEntry, CostTable, Fee, OperationCost},
    docs::{
        load_documentation, parse_front_matter, DocMeta, DocumentBody, Documentation,
        DocumentationEntry, GasForkDocumentation,
    },
    parser::{parse_instructions, parse_operands, InstructionRecord, Instructions, Operand},
    store::{DocumentStore, EntryKind, FsDocumentStore, MemoryDocumentStore, StoreEntry},
    ReferenceOutput,
};
pub use error::Error;
pub use interfaces::{parse_alias_arg, ReferenceArgs, ReferenceArgsBuilder};
