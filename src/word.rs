use std::collections::VecDeque;

use crate::modes::Mode;
use crate::tone::{self, SyllableState, TonePlacement};

const MAX_UNDO_SNAPSHOTS: usize = 32;

/// One physical key as typed. Never mutated after capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Keystroke {
    pub key: char,
    /// The key appears in the active mode's modifier table.
    pub modifier_candidate: bool,
    /// The key was consumed as a modifier rather than typed as a letter.
    pub applied: bool,
    pub index: u32,
}

/// The word as it stood before one keystroke.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub rendered: String,
    pub state: SyllableState,
}

/// Bounded stack of earlier states of the active word. Backspace pops it;
/// once the oldest entries have been dropped, the word is rebuilt from raw.
#[derive(Debug, Clone, Default)]
pub struct UndoHistory {
    snapshots: VecDeque<Snapshot>,
}

impl UndoHistory {
    pub fn push(&mut self, snapshot: Snapshot) {
        if self.snapshots.len() == MAX_UNDO_SNAPSHOTS {
            self.snapshots.pop_front();
        }
        self.snapshots.push_back(snapshot);
    }

    pub fn pop(&mut self) -> Option<Snapshot> {
        self.snapshots.pop_back()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

/// The composition unit: everything typed since the last word boundary.
#[derive(Debug, Clone)]
pub struct Word {
    raw: Vec<Keystroke>,
    rendered: String,
    state: SyllableState,
    restored: bool,
    history: UndoHistory,
}

impl Word {
    /// `restored` words render their keystrokes literally from the start.
    pub fn new(restored: bool) -> Self {
        Self {
            raw: Vec::with_capacity(16),
            rendered: String::with_capacity(32),
            state: SyllableState::default(),
            restored,
            history: UndoHistory::default(),
        }
    }

    /// Replays `keys` from scratch.
    pub fn compose(keys: &str, mode: &Mode, placement: TonePlacement) -> Self {
        let mut w = Self::new(false);
        for k in keys.chars() {
            w.push(k, mode, placement);
        }
        w
    }

    pub fn raw(&self) -> &[Keystroke] {
        &self.raw
    }

    pub fn rendered(&self) -> &str {
        &self.rendered
    }

    pub fn state(&self) -> &SyllableState {
        &self.state
    }

    pub fn is_restored(&self) -> bool {
        self.restored
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    pub fn history(&self) -> &UndoHistory {
        &self.history
    }

    /// The keystrokes exactly as typed.
    pub fn literal(&self) -> String {
        self.raw.iter().map(|k| k.key).collect()
    }

    pub fn push(&mut self, key: char, mode: &Mode, placement: TonePlacement) {
        self.history.push(Snapshot {
            rendered: self.rendered.clone(),
            state: self.state.clone(),
        });
        let applied = if self.restored {
            self.rendered.push(key);
            false
        } else {
            let applied = tone::feed(mode, &mut self.state, key);
            self.rendered = self.state.render(placement);
            applied
        };
        self.raw.push(Keystroke {
            key,
            modifier_candidate: mode.is_modifier(key),
            applied,
            index: self.raw.len() as u32,
        });
    }

    /// Drops the last keystroke and returns to the state before it.
    pub fn pop(&mut self, mode: &Mode, placement: TonePlacement) -> Option<Keystroke> {
        let last = self.raw.pop()?;
        match self.history.pop() {
            Some(snapshot) if !self.restored => {
                self.rendered = snapshot.rendered;
                self.state = snapshot.state;
            }
            _ => self.recompute(mode, placement),
        }
        Some(last)
    }

    /// Switches the word to literal rendering. Returns false if it already was.
    pub fn restore(&mut self) -> bool {
        if self.restored {
            return false;
        }
        self.restored = true;
        self.rendered = self.literal();
        true
    }

    fn recompute(&mut self, mode: &Mode, placement: TonePlacement) {
        if self.restored {
            self.rendered = self.literal();
            return;
        }
        self.state = SyllableState::default();
        for k in &self.raw {
            tone::feed(mode, &mut self.state, k.key);
        }
        self.rendered = self.state.render(placement);
    }
}
