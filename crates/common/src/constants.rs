use fancy_regex::Regex;
use lazy_static::lazy_static;

/// The instruction definition source used when none is configured.
pub const DEFAULT_INSTRUCTION_SOURCE: &str =
    "https://github.com/FuelLabs/fuel-vm/raw/master/fuel-asm/src/lib.rs";

/// Dot-separated path from the root of a chain specification to its gas cost table.
pub const DEFAULT_GAS_COSTS_PATH: &str = "consensus_parameters.V1.gas_costs.V1";

/// Timeout, in seconds, for fetching a remote instruction definition source.
pub const DEFAULT_REQUEST_TIMEOUT: u64 = 30;

/// Separator placed between operand names in a reference item's input column.
pub const OPERAND_SEPARATOR: &str = " | ";

lazy_static! {
    /// The following regex is used to extract instruction definitions, e.g.
    /// `"Adds two registers." 0x10 ADD add [dst: RegId lhs: RegId rhs: RegId]`
    ///
    /// Capture groups: description, opcode hex (without `0x`), instruction name,
    /// lowercase mnemonic, raw operand list.
    pub static ref INSTRUCTION_REGEX: Regex =
        Regex::new(r#""(.+)"\s+0x(\w+) (\w+) (\w+) \[(.+)\]"#).expect("failed to compile regex");

    /// The following regex is used to find `<name>: <type>` pairs within an operand list
    pub static ref OPERAND_REGEX: Regex =
        Regex::new(r"(\w+): (\w+)").expect("failed to compile regex");

    /// The following regex is used to find remote (http or https) sources
    pub static ref URL_REGEX: Regex =
        Regex::new(r"^https?://").expect("failed to compile regex");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instruction_regex_captures_all_groups() {
        let line = r#"    "Adds two registers." 0x10 ADD add [dst: RegId lhs: RegId rhs: RegId]"#;
        let captures = INSTRUCTION_REGEX
            .captures(line)
            .expect("regex failed")
            .expect("no match found");

        assert_eq!(&captures[1], "Adds two registers.");
        assert_eq!(&captures[2], "10");
        assert_eq!(&captures[3], "ADD");
        assert_eq!(&captures[4], "add");
        assert_eq!(&captures[5], "dst: RegId lhs: RegId rhs: RegId");
    }

    #[test]
    fn test_instruction_regex_ignores_unrelated_lines() {
        let line = "impl_instructions! {";
        assert!(!INSTRUCTION_REGEX.is_match(line).expect("regex failed"));
    }

    #[test]
    fn test_url_regex() {
        assert!(URL_REGEX.is_match(DEFAULT_INSTRUCTION_SOURCE).expect("regex failed"));
        assert!(URL_REGEX.is_match("http://localhost:8080/lib.rs").expect("regex failed"));
        assert!(!URL_REGEX.is_match("/tmp/fuel-asm/src/lib.rs").expect("regex failed"));
        assert!(!URL_REGEX.is_match("./lib.rs").expect("regex failed"));
    }
}
