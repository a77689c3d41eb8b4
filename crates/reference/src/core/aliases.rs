use hashbrown::HashMap;

/// Instructions whose lowercase name differs from their key in the FuelVM gas cost table.
const FUEL_VM_ALIASES: [(&str, &str); 6] = [
    ("ret", "ret_contract"),
    ("rvrt", "rvrt_contract"),
    ("retd", "retd_contract"),
    ("cfe", "cfei"),
    ("cfs", "cfsi"),
    ("ecal", "call"),
];

/// Maps lowercase instruction names to the key the gas cost table uses for them.
///
/// The [`Default`] table holds the FuelVM rewrites. Further entries can be merged in with
/// [`Extend`]; later entries win.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameAliases {
    aliases: HashMap<String, String>,
}

impl NameAliases {
    /// Creates an alias table with no entries. Every name reconciles to itself, lowercased.
    pub fn empty() -> Self {
        Self { aliases: HashMap::new() }
    }

    /// Returns the cost table key for the instruction `name`.
    ///
    /// This never fails: a name without an alias maps to its lowercase form, whether or not the
    /// cost table actually has that key.
    ///
    /// ```
    /// use opref_reference::NameAliases;
    ///
    /// let aliases = NameAliases::default();
    /// assert_eq!(aliases.reconcile("RET"), "ret_contract");
    /// assert_eq!(aliases.reconcile("ADD"), "add");
    /// ```
    pub fn reconcile(&self, name: &str) -> String {
        let name = name.to_lowercase();
        match self.aliases.get(&name) {
            Some(alias) => alias.to_owned(),
            None => name,
        }
    }

    /// Returns the number of aliases in the table.
    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    /// Returns true if the table has no aliases.
    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}

impl Default for NameAliases {
    fn default() -> Self {
        FUEL_VM_ALIASES.into_iter().map(|(name, key)| (name.to_string(), key.to_string())).collect()
    }
}

impl Extend<(String, String)> for NameAliases {
    fn extend<T: IntoIterator<Item = (String, String)>>(&mut self, iter: T) {
        self.aliases.extend(iter.into_iter().map(|(name, key)| (name.to_lowercase(), key)));
    }
}

impl FromIterator<(String, String)> for NameAliases {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        let mut aliases = Self::empty();
        aliases.extend(iter);
        aliases
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reconcile_without_alias_lowercases() {
        let aliases = NameAliases::default();

        assert_eq!(aliases.reconcile("ADD"), "add");
        assert_eq!(aliases.reconcile("mcpi"), "mcpi");
        assert_eq!(aliases.reconcile("Noop"), "noop");
    }

    #[test]
    fn test_reconcile_with_alias_substitutes() {
        let aliases = NameAliases::default();

        assert_eq!(aliases.reconcile("ret"), "ret_contract");
        assert_eq!(aliases.reconcile("RET"), "ret_contract");
        assert_eq!(aliases.reconcile("RVRT"), "rvrt_contract");
        assert_eq!(aliases.reconcile("RETD"), "retd_contract");
        assert_eq!(aliases.reconcile("CFE"), "cfei");
        assert_eq!(aliases.reconcile("CFS"), "cfsi");
        assert_eq!(aliases.reconcile("ECAL"), "call");
    }

    #[test]
    fn test_reconcile_is_total_for_unknown_names() {
        let aliases = NameAliases::empty();

        assert!(aliases.is_empty());
        assert_eq!(aliases.reconcile("DOES_NOT_EXIST"), "does_not_exist");
        assert_eq!(aliases.reconcile(""), "");
    }

    #[test]
    fn test_extend_overrides_defaults() {
        let mut aliases = NameAliases::default();
        aliases.extend([
            ("ECAL".to_string(), "ecal".to_string()),
            ("tr".to_string(), "tr_contract".to_string()),
        ]);

        assert_eq!(aliases.len(), 7);
        assert_eq!(aliases.reconcile("ecal"), "ecal");
        assert_eq!(aliases.reconcile("TR"), "tr_contract");
        assert_eq!(aliases.reconcile("ret"), "ret_contract");
    }
}
