use std::sync::Arc;

use tracing::{debug, debug_span};

use crate::capitalize::CommitContext;
use crate::config::EngineConfig;
use crate::modes::{InputMethod, Mode, mode_for};
use crate::restore::{self, Verdict};
use crate::shortcut::TypedCase;
use crate::word::Word;

/// A physical key event as delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Space,
    Enter,
    Tab,
    Backspace,
    Escape,
    /// Any Control chord. Ends the word without committing a transformation.
    Control,
}

impl Key {
    /// Maps a character stream onto keys; `\x08` is Backspace and `\x1b` Escape.
    pub fn from_char(c: char) -> Self {
        match c {
            ' ' => Key::Space,
            '\n' | '\r' => Key::Enter,
            '\t' => Key::Tab,
            '\x08' | '\x7f' => Key::Backspace,
            '\x1b' => Key::Escape,
            _ => Key::Char(c),
        }
    }
}

/// Edit the host applies to the displayed text: remove `backspaces` trailing
/// characters, then insert `insert`.
///
/// When `handled` is false the host must also forward the original key to
/// the application (after applying the edit).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderDelta {
    pub backspaces: usize,
    pub insert: String,
    pub handled: bool,
}

impl RenderDelta {
    pub fn passthrough() -> Self {
        Self::default()
    }

    pub fn noop() -> Self {
        Self {
            handled: true,
            ..Self::default()
        }
    }

    /// Minimal edit turning `old` into `new`.
    pub fn between(old: &str, new: &str) -> Self {
        let common = old
            .chars()
            .zip(new.chars())
            .take_while(|(a, b)| a == b)
            .count();
        let prefix_bytes = new
            .char_indices()
            .nth(common)
            .map_or(new.len(), |(i, _)| i);
        Self {
            backspaces: old.chars().count() - common,
            insert: new[prefix_bytes..].to_string(),
            handled: true,
        }
    }

    pub fn is_noop(&self) -> bool {
        self.backspaces == 0 && self.insert.is_empty()
    }
}

/// Per-focus input engine. Each text field (or app) gets its own instance;
/// all instances may share one configuration snapshot.
pub struct ViEngine {
    config: Arc<EngineConfig>,
    mode: &'static Mode,
    enabled: bool,
    word: Option<Word>,
    /// Control was pressed and no boundary has been seen since.
    after_control: bool,
    context: CommitContext,
}

impl Default for ViEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ViEngine {
    pub fn new() -> Self {
        Self::with_config(Arc::new(EngineConfig::default()))
    }

    pub fn with_config(config: Arc<EngineConfig>) -> Self {
        let mode = mode_for(config.mode);
        Self {
            config,
            mode,
            enabled: true,
            word: None,
            after_control: false,
            context: CommitContext::new(),
        }
    }

    /// Swaps in a new configuration. The active word is dropped as it was
    /// composed under the old rules.
    pub fn reconfigure(&mut self, config: Arc<EngineConfig>) {
        self.mode = mode_for(config.mode);
        self.config = config;
        self.word = None;
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn input_method(&self) -> InputMethod {
        self.config.mode
    }

    /// Turns Vietnamese composition on or off. While off, words are still
    /// tracked so shortcuts keep expanding.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        self.word = None;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_composing(&self) -> bool {
        self.word.is_some()
    }

    /// Text of the active word as currently displayed.
    pub fn composing_text(&self) -> &str {
        self.word.as_ref().map_or("", Word::rendered)
    }

    pub fn word(&self) -> Option<&Word> {
        self.word.as_ref()
    }

    /// Forgets the active word and the commit context (focus change).
    pub fn clear(&mut self) {
        self.word = None;
        self.after_control = false;
        self.context.forget();
    }

    pub fn feed(&mut self, c: char) -> RenderDelta {
        self.handle(Key::from_char(c))
    }

    pub fn handle(&mut self, key: Key) -> RenderDelta {
        let _span = debug_span!("handle_key", ?key).entered();
        let mut buf = [0u8; 4];
        match key {
            Key::Char(c) if self.is_boundary(c) => self.commit(c.encode_utf8(&mut buf), true),
            Key::Char(c) => self.type_char(c),
            Key::Space => self.commit(" ", true),
            Key::Enter => self.commit("\n", false),
            Key::Tab => self.commit("\t", false),
            Key::Backspace => self.backspace(),
            Key::Escape => self.escape(),
            Key::Control => self.control(),
        }
    }

    fn is_boundary(&self, c: char) -> bool {
        c.is_whitespace() || (c.is_ascii_punctuation() && !self.mode.is_modifier(c))
    }

    fn type_char(&mut self, c: char) -> RenderDelta {
        let plain = std::mem::take(&mut self.after_control) || !self.enabled;
        let word = self.word.get_or_insert_with(|| Word::new(plain));
        let before = word.rendered().to_owned();
        word.push(c, self.mode, self.config.tone_placement);
        RenderDelta::between(&before, word.rendered())
    }

    fn backspace(&mut self) -> RenderDelta {
        let Some(word) = self.word.as_mut() else {
            self.context.pop();
            return RenderDelta::passthrough();
        };
        let before = word.rendered().to_owned();
        word.pop(self.mode, self.config.tone_placement);
        let delta = RenderDelta::between(&before, word.rendered());
        if word.is_empty() {
            self.word = None;
        }
        delta
    }

    fn escape(&mut self) -> RenderDelta {
        if !self.config.esc_restore_enabled {
            return RenderDelta::passthrough();
        }
        let Some(word) = self.word.as_mut() else {
            return RenderDelta::passthrough();
        };
        let before = word.rendered().to_owned();
        if !word.restore() {
            return RenderDelta::noop();
        }
        debug!(from = %before, to = %word.rendered(), "escape restore");
        RenderDelta::between(&before, word.rendered())
    }

    fn control(&mut self) -> RenderDelta {
        if let Some(word) = self.word.take() {
            debug!(discarded = %word.literal(), "control ends word");
        }
        self.after_control = true;
        self.context.forget();
        RenderDelta::passthrough()
    }

    /// Finalizes the active word and appends the boundary text.
    fn commit(&mut self, boundary: &str, handled: bool) -> RenderDelta {
        self.after_control = false;
        let Some(word) = self.word.take() else {
            self.context.push_str(boundary);
            return RenderDelta {
                backspaces: 0,
                insert: if handled {
                    boundary.to_string()
                } else {
                    String::new()
                },
                handled,
            };
        };

        let displayed = word.rendered();
        let mut text = match restore::evaluate(&word, self.mode) {
            Verdict::Restore(_) if self.config.auto_restore_enabled => {
                restore::restored_text(word.raw())
            }
            _ => displayed.to_string(),
        };

        if !self.config.shortcuts.is_empty() {
            let literal = word.literal();
            let expansion = self
                .config
                .shortcuts
                .try_expand(&text, TypedCase::of(&text))
                .or_else(|| {
                    self.config
                        .shortcuts
                        .try_expand(&literal, TypedCase::of(&literal))
                });
            if let Some(expansion) = expansion {
                debug!(trigger = %text, %expansion, "shortcut expanded");
                text = expansion;
            }
        }

        if self.config.auto_capitalize {
            text = self.context.capitalize(&text).into_owned();
        }

        self.context.push_str(&text);
        self.context.push_str(boundary);

        let mut delta = RenderDelta::between(displayed, &text);
        if handled {
            delta.insert.push_str(boundary);
        }
        delta.handled = handled;
        delta
    }
}
