use std::sync::Arc;

use crate::{EngineConfig, InputMethod, Key, RenderDelta, TonePlacement, ViEngine};

mod telex;
mod vni;

/// Feeds `seq` and returns the composing text, like the old `feed` API.
fn type_seq(engine: &mut ViEngine, seq: &str) -> String {
    for c in seq.chars() {
        engine.feed(c);
    }
    engine.composing_text().to_string()
}

fn telex(seq: &str) -> String {
    type_seq(&mut ViEngine::new(), seq)
}

fn vni(seq: &str) -> String {
    let config = EngineConfig::default().with_mode(InputMethod::Vni);
    type_seq(&mut ViEngine::with_config(Arc::new(config)), seq)
}

fn classic(seq: &str) -> String {
    let config = EngineConfig::default().with_tone_placement(TonePlacement::Classic);
    type_seq(&mut ViEngine::with_config(Arc::new(config)), seq)
}

/// Host-side text field that applies every delta the engine returns.
pub(super) struct Screen {
    pub engine: ViEngine,
    pub text: String,
}

impl Screen {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            engine: ViEngine::with_config(Arc::new(config)),
            text: String::new(),
        }
    }

    pub fn key(&mut self, key: Key) -> RenderDelta {
        let delta = self.engine.handle(key);
        for _ in 0..delta.backspaces {
            self.text.pop();
        }
        self.text.push_str(&delta.insert);
        if !delta.handled {
            match key {
                Key::Char(c) => self.text.push(c),
                Key::Space => self.text.push(' '),
                Key::Enter => self.text.push('\n'),
                Key::Tab => self.text.push('\t'),
                Key::Backspace => {
                    self.text.pop();
                }
                Key::Escape | Key::Control => {}
            }
        }
        delta
    }

    pub fn type_str(&mut self, s: &str) -> &str {
        for c in s.chars() {
            self.key(Key::from_char(c));
        }
        &self.text
    }
}

/// Everything typed through a fresh default Telex screen.
fn screen(s: &str) -> String {
    let mut sc = Screen::new(EngineConfig::default());
    sc.type_str(s);
    sc.text
}
