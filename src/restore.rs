//! Decides at a word boundary whether a transformed word was meant as
//! Vietnamese, and produces the literal text when it was not.

use tracing::debug;

use crate::modes::{Mode, Op};
use crate::syllable::{self, Violation};
use crate::tone::Letter;
use crate::word::{Keystroke, Word};

/// Short Vietnamese words that the grammar or the key patterns reject.
const KEEP: &[&str] = &[
    "ừm", "hừm", "ưm", "ờm", "ơ", "ư", "ừ", "ứ", "ử", "ờ", "ớ", "ở", "à", "ạ", "ý",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    KeepTransformed,
    Restore(RestoreReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreReason {
    /// Three or more of the same modifier key in a row.
    RepeatedLetters,
    /// A mark was typed and then cancelled by repeating its key.
    Cancelled,
    /// Spells a syllable, but was keyed the way another language is.
    Pattern(KeyPattern),
    Invalid(Violation),
}

/// Key orders a Vietnamese typist does not produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPattern {
    /// A standalone `w` starts a longer word (`was`, `wow`).
    LeadingW,
    /// A doubling key lands on a vowel typed before another key (`away`).
    SplitDoubling,
    /// A vowel typed after the tone key (`users`, `more`).
    VowelAfterTone,
    /// `s` followed by `t` or `p` (`most`, `crisp`).
    SibilantCluster,
    /// One plain vowel with a tone (`as`, `is`, `of`).
    BareVowel,
}

pub fn evaluate(word: &Word, mode: &Mode) -> Verdict {
    if word.is_restored() || word.is_empty() || word.rendered() == word.literal() {
        return Verdict::KeepTransformed;
    }
    let verdict = classify(word, mode);
    if let Verdict::Restore(reason) = verdict {
        debug!(
            rendered = %word.rendered(),
            literal = %word.literal(),
            ?reason,
            "auto-restore"
        );
    }
    verdict
}

fn classify(word: &Word, mode: &Mode) -> Verdict {
    if longest_modifier_run(word.raw()) >= 3 {
        return Verdict::Restore(RestoreReason::RepeatedLetters);
    }
    let state = word.state();
    if state.cancelled() {
        return Verdict::Restore(RestoreReason::Cancelled);
    }
    if KEEP.contains(&word.rendered().to_lowercase().as_str()) {
        return Verdict::KeepTransformed;
    }
    if let Some(pattern) = key_pattern(word, mode) {
        return Verdict::Restore(RestoreReason::Pattern(pattern));
    }
    match syllable::check(state.letters(), state.tone()) {
        Ok(()) => Verdict::KeepTransformed,
        Err(v) => Verdict::Restore(RestoreReason::Invalid(v)),
    }
}

/// Only letter-keyed modes are checked; digits never collide with words.
fn key_pattern(word: &Word, mode: &Mode) -> Option<KeyPattern> {
    if !mode.letter_modifiers {
        return None;
    }
    let letters = word.state().letters();
    if letters.len() > 1 && letters[0].standalone {
        return Some(KeyPattern::LeadingW);
    }
    let raw = word.raw();
    let split = raw.windows(2).any(|pair| {
        pair[1].applied
            && matches!(mode.op(pair[1].key), Some(Op::Circumflex(Some(_))))
            && !pair[0].key.eq_ignore_ascii_case(&pair[1].key)
    });
    if split {
        return Some(KeyPattern::SplitDoubling);
    }
    let first_tone = raw
        .iter()
        .position(|k| k.applied && matches!(mode.op(k.key), Some(Op::Tone(_))));
    if let Some(i) = first_tone {
        if raw[i + 1..].iter().any(|k| is_vowel_key(k.key)) {
            return Some(KeyPattern::VowelAfterTone);
        }
    }
    let sibilant = raw.windows(2).any(|pair| {
        pair[0].applied
            && pair[0].key.eq_ignore_ascii_case(&'s')
            && matches!(pair[1].key.to_ascii_lowercase(), 't' | 'p')
    });
    if sibilant {
        return Some(KeyPattern::SibilantCluster);
    }
    match letters {
        [only] if only.is_vowel() && only.modifier.is_none() => Some(KeyPattern::BareVowel),
        _ => None,
    }
}

fn is_vowel_key(key: char) -> bool {
    Letter::literal(key).is_vowel()
}

/// Text shown after a restore: the raw keys, with runs of exactly three
/// identical modifier keys shortened to two (`aaa` is how `aa` is typed).
pub fn restored_text(raw: &[Keystroke]) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut i = 0;
    while i < raw.len() {
        let run = run_len(raw, i);
        let keep = if run == 3 && raw[i].modifier_candidate {
            2
        } else {
            run
        };
        out.extend(raw[i..i + keep].iter().map(|k| k.key));
        i += run;
    }
    out
}

fn run_len(raw: &[Keystroke], start: usize) -> usize {
    let key = raw[start].key.to_ascii_lowercase();
    raw[start..]
        .iter()
        .take_while(|k| k.key.to_ascii_lowercase() == key)
        .count()
}

fn longest_modifier_run(raw: &[Keystroke]) -> usize {
    let mut best = 0;
    let mut i = 0;
    while i < raw.len() {
        let run = run_len(raw, i);
        if raw[i].modifier_candidate {
            best = best.max(run);
        }
        i += run;
    }
    best
}
