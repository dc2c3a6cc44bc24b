use std::collections::HashMap;

use serde::Deserialize;

/// How an expansion's casing reacts to the way the trigger was typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CasePolicy {
    /// Mirror the typed pattern: `VN` → all caps, `Vn` → capitalized.
    #[default]
    Mirror,
    /// Always emit the expansion verbatim.
    Fixed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shortcut {
    pub text: String,
    pub case: CasePolicy,
}

impl Shortcut {
    pub fn new(text: impl Into<String>, case: CasePolicy) -> Self {
        Self {
            text: text.into(),
            case,
        }
    }
}

/// Casing pattern of a typed word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypedCase {
    Lower,
    /// First letter upper, the rest lower. A single uppercase letter counts.
    Capitalized,
    AllCaps,
    Mixed,
}

impl TypedCase {
    pub fn of(word: &str) -> Self {
        let mut letters = word.chars().filter(|c| c.is_alphabetic());
        let Some(first) = letters.next() else {
            return TypedCase::Lower;
        };
        let rest: Vec<char> = letters.collect();
        let rest_lower = rest.iter().all(|c| !c.is_uppercase());
        let rest_upper = rest.iter().all(|c| c.is_uppercase());
        match (first.is_uppercase(), rest_lower, rest_upper) {
            (false, true, _) => TypedCase::Lower,
            (true, true, _) => TypedCase::Capitalized,
            (true, false, true) => TypedCase::AllCaps,
            _ => TypedCase::Mixed,
        }
    }
}

/// Trigger → expansion table. Triggers are stored lowercased.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShortcutMap {
    entries: HashMap<String, Shortcut>,
}

impl ShortcutMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the previous entry for the same trigger, ignoring case.
    pub fn insert(&mut self, trigger: &str, shortcut: Shortcut) -> Option<Shortcut> {
        self.entries.insert(trigger.to_lowercase(), shortcut)
    }

    pub fn get(&self, trigger: &str) -> Option<&Shortcut> {
        self.entries.get(&trigger.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn try_expand(&self, word: &str, typed: TypedCase) -> Option<String> {
        let shortcut = self.get(word)?;
        let text = &shortcut.text;
        Some(match (shortcut.case, typed) {
            (CasePolicy::Mirror, TypedCase::AllCaps) => text.to_uppercase(),
            (CasePolicy::Mirror, TypedCase::Capitalized) => capitalize_lowered(text),
            _ => text.clone(),
        })
    }
}

fn capitalize_lowered(s: &str) -> String {
    let lower = s.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
