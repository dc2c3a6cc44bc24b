//! Vietnamese input method engine for Telex and VNI.
//!
//! The engine turns raw keystrokes into accented text one key at a time and
//! answers every key with a [`RenderDelta`]: how many characters the host
//! should delete and what it should insert. It keeps the raw keystrokes of
//! the active word so it can always rebuild the rendering from scratch, which
//! is what makes Backspace, ESC undo and auto-restore exact.
//!
//! ```
//! use uvie::{Key, ViEngine};
//!
//! let mut e = ViEngine::new();
//! for c in "vieetj".chars() {
//!     e.feed(c);
//! }
//! assert_eq!(e.composing_text(), "việt");
//!
//! // "text" is not a Vietnamese syllable, so the space restores it.
//! let mut e = ViEngine::new();
//! for c in "text".chars() {
//!     e.feed(c);
//! }
//! let delta = e.handle(Key::Space);
//! assert_eq!(delta.backspaces, 2);
//! assert_eq!(delta.insert, "ext ");
//! ```

pub mod capitalize;
pub mod config;
pub mod engine;
pub mod modes;
pub mod restore;
pub mod shortcut;
pub mod syllable;
pub mod tone;
pub mod word;

#[cfg(test)]
mod tests;

pub use config::{ConfigError, EngineConfig, parse_config_toml};
pub use engine::{Key, RenderDelta, ViEngine};
pub use modes::InputMethod;
pub use shortcut::{CasePolicy, Shortcut, ShortcutMap, TypedCase};
pub use tone::{NoTarget, Tone, TonePlacement};
