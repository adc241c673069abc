use std::collections::HashMap;

use crate::capability::Capability;
use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Boolean,
    Number,
    String,
}

/// A loaded terminal description: its name and aliases, plus the three
/// ordered capability mappings (booleans, numbers, strings) and the derived
/// reverse indexes used for variable/capname/tcap-code lookup.
#[derive(Debug, Clone)]
pub struct Terminfo {
    name: String,
    aliases: Vec<String>,
    booleans: Vec<Capability>,
    numbers: Vec<Capability>,
    strings: Vec<Capability>,
    by_variable: HashMap<String, (Section, usize)>,
    by_capname: HashMap<String, (Section, usize)>,
    by_tcap_code: HashMap<String, (Section, usize)>,
    by_escape: HashMap<Vec<u8>, usize>,
}

impl Terminfo {
    pub(crate) fn new(
        name: String,
        aliases: Vec<String>,
        booleans: Vec<Capability>,
        numbers: Vec<Capability>,
        strings: Vec<Capability>,
    ) -> Self {
        let mut by_variable = HashMap::new();
        let mut by_capname = HashMap::new();
        let mut by_tcap_code = HashMap::new();
        let mut by_escape = HashMap::new();

        for (section, caps) in [
            (Section::Boolean, &booleans),
            (Section::Number, &numbers),
            (Section::String, &strings),
        ] {
            for (i, cap) in caps.iter().enumerate() {
                by_variable.entry(cap.variable.clone()).or_insert((section, i));
                by_capname.entry(cap.capname.clone()).or_insert((section, i));
                if !cap.tcap_code.is_empty() {
                    by_tcap_code
                        .entry(cap.tcap_code.clone())
                        .or_insert((section, i));
                }
            }
        }

        for (i, cap) in strings.iter().enumerate() {
            if let Some(bytes) = cap.value.as_bytes() {
                if !bytes.is_empty() {
                    by_escape.entry(bytes.to_vec()).or_insert(i);
                }
            }
        }

        Terminfo {
            name,
            aliases,
            booleans,
            numbers,
            strings,
            by_variable,
            by_capname,
            by_tcap_code,
            by_escape,
        }
    }

    /// The terminal's primary (first-listed) name.
    #[must_use]
    pub fn primary_name(&self) -> &str {
        &self.name
    }

    /// The remaining pipe-separated aliases, in file order, longname last.
    #[must_use]
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    #[must_use]
    pub fn booleans(&self) -> &[Capability] {
        &self.booleans
    }

    #[must_use]
    pub fn numbers(&self) -> &[Capability] {
        &self.numbers
    }

    #[must_use]
    pub fn strings(&self) -> &[Capability] {
        &self.strings
    }

    fn section(&self, section: Section, idx: usize) -> &Capability {
        match section {
            Section::Boolean => &self.booleans[idx],
            Section::Number => &self.numbers[idx],
            Section::String => &self.strings[idx],
        }
    }

    /// Look up a capability by capname, then variable, then termcap code.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotAnEntry`] if `name` matches none of the three.
    pub fn get(&self, name: &str) -> Result<&Capability, Error> {
        for index in [&self.by_capname, &self.by_variable, &self.by_tcap_code] {
            if let Some(&(section, idx)) = index.get(name) {
                return Ok(self.section(section, idx));
            }
        }
        Err(Error::NotAnEntry(name.to_owned()))
    }

    /// Look up the capability whose string value matches `escape_bytes`
    /// exactly. On a miss, returns the unknown-capability sentinel with its
    /// value set to `escape_bytes`.
    #[must_use]
    pub fn detect(&self, escape_bytes: &[u8]) -> Capability {
        match self.by_escape.get(escape_bytes) {
            Some(&idx) => self.strings[idx].clone(),
            None => Capability::unknown(escape_bytes.to_vec()),
        }
    }
}
