//! Engine configuration.
//!
//! A validated [`EngineConfig`] is built once, wrapped in an `Arc` and shared
//! by every engine instance. Reconfiguring swaps the whole snapshot; the
//! engine never writes to it.
//!
//! ```toml
//! mode = "vni"
//! tone_placement = "classic"
//! auto_capitalize = true
//!
//! [shortcuts]
//! vn = "Việt Nam"
//! hcm = { text = "TP. HCM", case = "fixed" }
//! ```

use std::collections::HashMap;
use std::str::FromStr;

use serde::Deserialize;
use tracing::debug;

use crate::modes::InputMethod;
use crate::shortcut::{CasePolicy, Shortcut, ShortcutMap};
use crate::tone::TonePlacement;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid shortcut trigger '{0}'")]
    InvalidTrigger(String),
    #[error("shortcut '{0}' has an empty expansion")]
    EmptyExpansion(String),
    #[error("shortcut triggers '{first}' and '{second}' differ only in case")]
    DuplicateTrigger { first: String, second: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub mode: InputMethod,
    pub tone_placement: TonePlacement,
    pub esc_restore_enabled: bool,
    pub auto_restore_enabled: bool,
    pub auto_capitalize: bool,
    pub shortcuts: ShortcutMap,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            mode: InputMethod::Telex,
            tone_placement: TonePlacement::Modern,
            esc_restore_enabled: true,
            auto_restore_enabled: true,
            auto_capitalize: false,
            shortcuts: ShortcutMap::new(),
        }
    }
}

impl EngineConfig {
    pub fn with_mode(mut self, mode: InputMethod) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_tone_placement(mut self, placement: TonePlacement) -> Self {
        self.tone_placement = placement;
        self
    }

    pub fn with_esc_restore(mut self, enabled: bool) -> Self {
        self.esc_restore_enabled = enabled;
        self
    }

    pub fn with_auto_restore(mut self, enabled: bool) -> Self {
        self.auto_restore_enabled = enabled;
        self
    }

    pub fn with_auto_capitalize(mut self, enabled: bool) -> Self {
        self.auto_capitalize = enabled;
        self
    }

    pub fn with_shortcuts(mut self, shortcuts: ShortcutMap) -> Self {
        self.shortcuts = shortcuts;
        self
    }
}

impl FromStr for EngineConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_config_toml(s)
    }
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawConfig {
    mode: InputMethod,
    tone_placement: TonePlacement,
    esc_restore_enabled: bool,
    auto_restore_enabled: bool,
    auto_capitalize: bool,
    shortcuts: HashMap<String, RawShortcut>,
}

impl Default for RawConfig {
    fn default() -> Self {
        let d = EngineConfig::default();
        Self {
            mode: d.mode,
            tone_placement: d.tone_placement,
            esc_restore_enabled: d.esc_restore_enabled,
            auto_restore_enabled: d.auto_restore_enabled,
            auto_capitalize: d.auto_capitalize,
            shortcuts: HashMap::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawShortcut {
    Text(String),
    Full {
        text: String,
        #[serde(default)]
        case: CasePolicy,
    },
}

pub fn parse_config_toml(toml_str: &str) -> Result<EngineConfig, ConfigError> {
    let raw: RawConfig =
        toml::from_str(toml_str).map_err(|e| ConfigError::Parse(e.to_string()))?;

    // sorted so duplicate reports are deterministic
    let mut entries: Vec<(String, RawShortcut)> = raw.shortcuts.into_iter().collect();
    entries.sort_by(|a, b| a.0.cmp(&b.0));

    let mut shortcuts = ShortcutMap::new();
    let mut seen: HashMap<String, String> = HashMap::new();
    for (trigger, entry) in entries {
        if trigger.is_empty() || trigger.chars().any(char::is_whitespace) {
            return Err(ConfigError::InvalidTrigger(trigger));
        }
        let shortcut = match entry {
            RawShortcut::Text(text) => Shortcut::new(text, CasePolicy::default()),
            RawShortcut::Full { text, case } => Shortcut::new(text, case),
        };
        if shortcut.text.is_empty() {
            return Err(ConfigError::EmptyExpansion(trigger));
        }
        if let Some(first) = seen.insert(trigger.to_lowercase(), trigger.clone()) {
            return Err(ConfigError::DuplicateTrigger {
                first,
                second: trigger,
            });
        }
        shortcuts.insert(&trigger, shortcut);
    }

    let config = EngineConfig {
        mode: raw.mode,
        tone_placement: raw.tone_placement,
        esc_restore_enabled: raw.esc_restore_enabled,
        auto_restore_enabled: raw.auto_restore_enabled,
        auto_capitalize: raw.auto_capitalize,
        shortcuts,
    };
    debug!(
        mode = ?config.mode,
        placement = ?config.tone_placement,
        shortcuts = config.shortcuts.len(),
        "engine config loaded"
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shortcut::TypedCase;

    #[test]
    fn empty_toml_gives_defaults() {
        let c = parse_config_toml("").unwrap();
        assert_eq!(c, EngineConfig::default());
    }

    #[test]
    fn parses_all_fields() {
        let toml = r#"
mode = "vni"
tone_placement = "classic"
esc_restore_enabled = false
auto_restore_enabled = false
auto_capitalize = true

[shortcuts]
vn = "Việt Nam"
hcm = { text = "TP. HCM", case = "fixed" }
"#;
        let c: EngineConfig = toml.parse().unwrap();
        assert_eq!(c.mode, InputMethod::Vni);
        assert_eq!(c.tone_placement, TonePlacement::Classic);
        assert!(!c.esc_restore_enabled);
        assert!(!c.auto_restore_enabled);
        assert!(c.auto_capitalize);
        assert_eq!(c.shortcuts.len(), 2);
        assert_eq!(c.shortcuts.get("VN").unwrap().case, CasePolicy::Mirror);
        assert_eq!(
            c.shortcuts.try_expand("Hcm", TypedCase::Capitalized).as_deref(),
            Some("TP. HCM")
        );
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            parse_config_toml("mode = \"qwerty\""),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            parse_config_toml("unknown = 1"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            parse_config_toml("[shortcuts]\n\"a b\" = \"x\""),
            Err(ConfigError::InvalidTrigger(_))
        ));
        assert!(matches!(
            parse_config_toml("[shortcuts]\nvn = \"\""),
            Err(ConfigError::EmptyExpansion(_))
        ));
    }

    #[test]
    fn duplicate_triggers_by_case() {
        let err = parse_config_toml("[shortcuts]\nvn = \"a\"\nVN = \"b\"").unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateTrigger { .. }));
        assert!(err.to_string().contains("differ only in case"));
    }

    #[test]
    fn builder_methods() {
        let c = EngineConfig::default()
            .with_mode(InputMethod::Vni)
            .with_auto_capitalize(true);
        assert_eq!(c.mode, InputMethod::Vni);
        assert!(c.auto_capitalize);
        assert!(c.esc_restore_enabled);
    }
}
