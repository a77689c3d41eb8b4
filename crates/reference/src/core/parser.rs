use fancy_regex::{CaptureMatches, Captures};
use opref_common::constants::{INSTRUCTION_REGEX, OPERAND_REGEX};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// A single `<name>: <type>` operand of an instruction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Operand {
    /// The operand name, e.g. `dst`
    pub name: String,
    /// The operand type, e.g. `RegId`
    #[serde(rename = "type")]
    pub ty: String,
}

/// An instruction extracted from the definition source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstructionRecord {
    /// The canonical instruction name, e.g. `ADD`
    pub name: String,
    /// The opcode, `0x` prefixed, exactly as written in the source
    pub opcode_value: String,
    /// The lowercase short form that follows the name in the source, e.g. `add`
    pub mnemonic: String,
    /// Human readable description of the instruction
    pub description: String,
    /// Operands in declaration order
    pub operands: Vec<Operand>,
}

/// Lazy iterator over the instructions defined in a source text.
///
/// # Extraction policy
///
/// The iterator extracts, it does not validate. Any span of the source that does not match the
/// definition pattern is skipped without error, since the source is a Rust file with plenty of
/// unrelated content. Every span that does match is yielded, whether or not its opcode is valid
/// hex or its operand types exist. A regex engine failure on a span is logged and treated as a
/// non-matching span.
pub struct Instructions<'t> {
    matches: CaptureMatches<'static, 't>,
}

impl std::fmt::Debug for Instructions<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Instructions").finish_non_exhaustive()
    }
}

impl Iterator for Instructions<'_> {
    type Item = InstructionRecord;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.matches.next()? {
                Ok(captures) => {
                    if let Some(record) = record_from_captures(&captures) {
                        return Some(record);
                    }
                }
                Err(e) => trace!("skipping unmatched instruction definition: {}", e),
            }
        }
    }
}

/// Extracts all instruction definitions from `source`, in order of appearance.
///
/// A definition looks like
/// `"<description>" 0x<opcode> <NAME> <mnemonic> [<name>: <type>, ...]`.
///
/// ```
/// use opref_reference::parse_instructions;
///
/// let source = r#""add two registers" 0x10 ADD add [a: u8, b: u8]"#;
/// let records: Vec<_> = parse_instructions(source).collect();
///
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].name, "ADD");
/// assert_eq!(records[0].opcode_value, "0x10");
/// assert_eq!(records[0].operands.len(), 2);
/// ```
pub fn parse_instructions(source: &str) -> Instructions<'_> {
    Instructions { matches: INSTRUCTION_REGEX.captures_iter(source) }
}

/// Extracts `<name>: <type>` pairs from a raw operand list. Duplicates are kept.
pub fn parse_operands(operands: &str) -> Vec<Operand> {
    OPERAND_REGEX
        .captures_iter(operands)
        .filter_map(|captures| match captures {
            Ok(captures) => Some(Operand {
                name: captures.get(1)?.as_str().to_string(),
                ty: captures.get(2)?.as_str().to_string(),
            }),
            Err(e) => {
                trace!("skipping unmatched operand: {}", e);
                None
            }
        })
        .collect()
}

fn record_from_captures(captures: &Captures<'_>) -> Option<InstructionRecord> {
    Some(InstructionRecord {
        description: captures.get(1)?.as_str().to_string(),
        opcode_value: format!("0x{}", captures.get(2)?.as_str()),
        name: captures.get(3)?.as_str().to_string(),
        mnemonic: captures.get(4)?.as_str().to_string(),
        operands: parse_operands(captures.get(5)?.as_str()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_definition() {
        let source = r#""add two registers" 0x10 ADD add [a: u8, b: u8]"#;
        let records: Vec<_> = parse_instructions(source).collect();

        assert_eq!(
            records,
            vec![InstructionRecord {
                name: "ADD".to_string(),
                opcode_value: "0x10".to_string(),
                mnemonic: "add".to_string(),
                description: "add two registers".to_string(),
                operands: vec![
                    Operand { name: "a".to_string(), ty: "u8".to_string() },
                    Operand { name: "b".to_string(), ty: "u8".to_string() },
                ],
            }]
        );
    }

    #[test]
    fn test_parse_skips_unrelated_content() {
        let source = r#"
//! FuelVM instruction set.

impl_instructions! {
    "Adds two registers."
    0x10 ADD add [dst: RegId lhs: RegId rhs: RegId]
    "this one has no operand list" 0x11 AND and
    "Bitwise ANDs two registers."
    0x11 AND and [dst: RegId lhs: RegId rhs: RegId]
    fn not_an_instruction() {}
    "Return from context." 0x24 RET ret [value: RegId]
}
"#;
        let names: Vec<_> = parse_instructions(source).map(|record| record.name).collect();

        assert_eq!(names, vec!["ADD", "AND", "RET"]);
    }

    #[test]
    fn test_parse_preserves_operand_order_and_duplicates() {
        let source = r#""weird" 0xFF DUP dup [z: RegId, a: Imm12 z: RegId]"#;
        let record = parse_instructions(source).next().expect("no instruction extracted");

        let operands: Vec<_> =
            record.operands.iter().map(|op| (op.name.as_str(), op.ty.as_str())).collect();
        assert_eq!(operands, vec![("z", "RegId"), ("a", "Imm12"), ("z", "RegId")]);
    }

    #[test]
    fn test_parse_does_not_validate_values() {
        // "zz" is not hex and "Nope" is not a known type: extraction still succeeds
        let source = r#""bogus" 0xzz BOGUS bogus [x: Nope]"#;
        let record = parse_instructions(source).next().expect("no instruction extracted");

        assert_eq!(record.opcode_value, "0xzz");
        assert_eq!(record.operands[0].ty, "Nope");
    }

    #[test]
    fn test_parse_empty_source() {
        assert_eq!(parse_instructions("").count(), 0);
    }

    #[test]
    fn test_parse_operands_without_pairs() {
        assert!(parse_operands("   ").is_empty());
        assert!(parse_operands("RegId, RegId").is_empty());
    }

    #[test]
    fn test_parse_one_record_per_match() {
        let source = (0..32)
            .map(|i| format!("\"op {i}\" 0x{i:02x} OP{i} op{i} [r{i}: RegId]\n"))
            .collect::<String>();
        let records: Vec<_> = parse_instructions(&source).collect();

        assert_eq!(records.len(), 32);
        for (i, record) in records.iter().enumerate() {
            assert_eq!(record.name, format!("OP{i}"));
            assert_eq!(record.opcode_value, format!("0x{i:02x}"));
            assert_eq!(record.operands[0].name, format!("r{i}"));
        }
    }
}
