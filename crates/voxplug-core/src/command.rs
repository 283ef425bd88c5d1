/// Command identifier for the single controlled plug.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlugCommand {
    On,
    Off,
    Toggle,
}

/// Ordered keyword groups, one per command. Groups are checked in the
/// order they were built (On, Off, Toggle); the first group with any
/// keyword contained in the text wins.
#[derive(Debug, Clone)]
pub struct KeywordTable {
    groups: Vec<(PlugCommand, Vec<String>)>,
}

impl KeywordTable {
    /// Build a table with the fixed On, Off, Toggle priority order.
    /// Keywords are normalized to lowercase.
    pub fn new(on: Vec<String>, off: Vec<String>, toggle: Vec<String>) -> Self {
        let normalize =
            |kws: Vec<String>| kws.into_iter().map(|k| k.to_lowercase()).collect::<Vec<_>>();
        Self {
            groups: vec![
                (PlugCommand::On, normalize(on)),
                (PlugCommand::Off, normalize(off)),
                (PlugCommand::Toggle, normalize(toggle)),
            ],
        }
    }

    pub fn groups(&self) -> &[(PlugCommand, Vec<String>)] {
        &self.groups
    }
}

impl Default for KeywordTable {
    fn default() -> Self {
        Self::new(
            vec!["turn on".into(), "switch on".into(), "on".into()],
            vec!["turn off".into(), "switch off".into(), "off".into()],
            vec!["toggle".into(), "switch".into()],
        )
    }
}

/// Match recognized text against the keyword table.
///
/// The text is lowercased and trimmed before lookup. Matching is literal
/// substring containment, not word-boundary matching, so "noon" matches
/// the keyword "on". Empty or whitespace-only text never matches.
pub fn match_command(text: &str, table: &KeywordTable) -> Option<PlugCommand> {
    let text = text.trim().to_lowercase();
    if text.is_empty() {
        return None;
    }
    for (command, keywords) in table.groups() {
        if keywords.iter().any(|kw| text.contains(kw.as_str())) {
            return Some(*command);
        }
    }
    None
}
