//! Diacritic state and the rules that mutate it.
//!
//! Telex and VNI share one representation: a list of [`Letter`]s (base letter
//! plus an optional vowel modifier) and a single syllable-level [`Tone`]. The
//! tone is not attached to a letter until rendering, so its position follows
//! the syllable as more letters arrive (`hoa` + `s` + `n` → `hoán`).

use std::ops::Range;

use serde::Deserialize;
use tracing::trace;

use crate::modes::{Mode, Op};
use crate::syllable::{self, Syllable};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tone {
    #[default]
    None,
    Acute,
    Grave,
    Hook,
    Tilde,
    Dot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VowelMod {
    Circumflex,
    Horn,
    Breve,
    Bar,
}

/// Where the tone mark goes on open `oa`, `oe` and `uy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TonePlacement {
    /// `hóa`, `hòe`, `thủy`
    Classic,
    /// `hoá`, `hoè`, `thuỷ`
    #[default]
    Modern,
}

/// The modifier key had nothing it could legally apply to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoTarget;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Letter {
    /// Lowercase base letter, or the typed character for non-letters.
    pub(crate) base: char,
    pub(crate) modifier: Option<VowelMod>,
    pub(crate) upper: bool,
    /// `ư` produced by a Telex `w` with no vowel to modify.
    pub(crate) standalone: bool,
}

impl Letter {
    pub fn literal(c: char) -> Self {
        Self {
            base: c.to_lowercase().next().unwrap_or(c),
            modifier: None,
            upper: c.is_uppercase(),
            standalone: false,
        }
    }

    fn horned(base: char, upper: bool) -> Self {
        Self {
            base,
            modifier: Some(VowelMod::Horn),
            upper,
            standalone: false,
        }
    }

    #[inline(always)]
    pub fn is_vowel(&self) -> bool {
        matches!(self.base, 'a' | 'e' | 'i' | 'o' | 'u' | 'y')
    }

    /// Lowercase glyph without tone.
    pub fn glyph(&self) -> char {
        match (self.base, self.modifier) {
            ('a', Some(VowelMod::Circumflex)) => 'â',
            ('a', Some(VowelMod::Breve)) => 'ă',
            ('e', Some(VowelMod::Circumflex)) => 'ê',
            ('o', Some(VowelMod::Circumflex)) => 'ô',
            ('o', Some(VowelMod::Horn)) => 'ơ',
            ('u', Some(VowelMod::Horn)) => 'ư',
            ('d', Some(VowelMod::Bar)) => 'đ',
            (b, _) => b,
        }
    }

    fn render(&self, tone: Tone) -> char {
        let c = map_vowel_with_tone(self.glyph(), tone);
        if self.upper {
            c.to_uppercase().next().unwrap_or(c)
        } else {
            c
        }
    }
}

/// Decomposed composition state of the active word.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyllableState {
    pub(crate) letters: Vec<Letter>,
    pub(crate) tone: Tone,
    /// A mark or modifier was toggled off by repeating its key.
    pub(crate) cancelled: bool,
}

impl SyllableState {
    pub fn letters(&self) -> &[Letter] {
        &self.letters
    }

    pub fn tone(&self) -> Tone {
        self.tone
    }

    pub fn cancelled(&self) -> bool {
        self.cancelled
    }

    fn has_vowel(&self) -> bool {
        self.letters.iter().any(Letter::is_vowel)
    }

    pub fn decompose(&self) -> Syllable {
        syllable::decompose(&self.letters)
    }

    pub fn render(&self, placement: TonePlacement) -> String {
        let target = match self.tone {
            Tone::None => None,
            _ => tone_position(&self.letters, placement),
        };
        self.letters
            .iter()
            .enumerate()
            .map(|(i, l)| {
                if Some(i) == target {
                    l.render(self.tone)
                } else {
                    l.render(Tone::None)
                }
            })
            .collect()
    }
}

/// One fold step: feed a single keystroke into the state.
///
/// Modifier keys go through [`apply`]; on `NoTarget` they degrade to the
/// mode's fallback letter or to the literal key. Returns true when the key
/// was consumed as a modifier.
pub fn feed(mode: &Mode, state: &mut SyllableState, key: char) -> bool {
    let Some(op) = mode.op(key) else {
        push_letter(state, Letter::literal(key));
        return false;
    };
    match apply(op, state) {
        Ok(next) => {
            trace!(?op, key = %key, "tone op applied");
            *state = next;
            true
        }
        Err(NoTarget) => {
            if mode.standalone_horn && matches!(op, Op::Horn { breve: true }) {
                state.letters.push(Letter {
                    standalone: true,
                    ..Letter::horned('u', key.is_uppercase())
                });
            } else {
                push_letter(state, Letter::literal(key));
            }
            false
        }
    }
}

/// Appends a typed letter. A coda or glide after `ưo` completes it to `ươ`
/// (`nguwoi` → `người`).
fn push_letter(state: &mut SyllableState, letter: Letter) {
    if let [.., u, o] = state.letters.as_mut_slice() {
        let completes = !letter.is_vowel() || matches!(letter.base, 'i' | 'u');
        if completes
            && letter.base.is_alphabetic()
            && u.base == 'u'
            && u.modifier == Some(VowelMod::Horn)
            && o.base == 'o'
            && o.modifier.is_none()
        {
            o.modifier = Some(VowelMod::Horn);
        }
    }
    state.letters.push(letter);
}

pub fn apply(op: Op, state: &SyllableState) -> Result<SyllableState, NoTarget> {
    let mut next = state.clone();
    match op {
        Op::Tone(tone) => {
            if !next.has_vowel() {
                return Err(NoTarget);
            }
            if next.tone == tone {
                next.tone = Tone::None;
                next.cancelled = true;
            } else {
                next.tone = tone;
            }
        }
        Op::ClearTone => {
            if next.tone == Tone::None {
                return Err(NoTarget);
            }
            next.tone = Tone::None;
        }
        Op::Circumflex(only) => {
            let cluster = syllable::last_vowel_cluster(&next.letters);
            let target = cluster.rev().find(|&i| {
                let b = next.letters[i].base;
                match only {
                    Some(o) => b == o,
                    None => matches!(b, 'a' | 'e' | 'o'),
                }
            });
            let i = target.ok_or(NoTarget)?;
            toggle(&mut next, &[i], VowelMod::Circumflex);
        }
        Op::Horn { breve } => {
            let targets = horn_targets(&next.letters, breve);
            if targets.is_empty() {
                return Err(NoTarget);
            }
            let is_breve = next.letters[targets[0]].base == 'a';
            if !is_breve && targets.iter().all(|&i| next.letters[i].standalone) {
                // `ww` gives back a literal `w`
                for &i in &targets {
                    let upper = next.letters[i].upper;
                    next.letters[i] = Letter::literal(if upper { 'W' } else { 'w' });
                }
                next.cancelled = true;
            } else {
                let m = if is_breve {
                    VowelMod::Breve
                } else {
                    VowelMod::Horn
                };
                toggle(&mut next, &targets, m);
            }
        }
        Op::Breve => {
            let cluster = syllable::last_vowel_cluster(&next.letters);
            let i = cluster
                .rev()
                .find(|&i| next.letters[i].base == 'a')
                .ok_or(NoTarget)?;
            toggle(&mut next, &[i], VowelMod::Breve);
        }
        Op::Bar { adjacent } => {
            let first = next.letters.first().ok_or(NoTarget)?;
            if first.base != 'd' || (adjacent && next.letters.len() != 1) {
                return Err(NoTarget);
            }
            toggle(&mut next, &[0], VowelMod::Bar);
        }
        Op::HornLetter(base) => {
            next.letters.push(Letter::horned(
                base.to_ascii_lowercase(),
                base.is_ascii_uppercase(),
            ));
        }
    }
    Ok(next)
}

/// Sets `m` on every target, or clears it when all of them already carry it.
fn toggle(state: &mut SyllableState, targets: &[usize], m: VowelMod) {
    let all_set = targets.iter().all(|&i| state.letters[i].modifier == Some(m));
    for &i in targets {
        state.letters[i].modifier = if all_set { None } else { Some(m) };
    }
    if all_set {
        state.cancelled = true;
    }
}

fn horn_targets(letters: &[Letter], breve: bool) -> Vec<usize> {
    let cluster = syllable::last_vowel_cluster(letters);
    if cluster.is_empty() {
        return Vec::new();
    }
    let after_q = |i: usize| i > 0 && i == cluster.start && letters[i - 1].base == 'q';

    // uo -> ươ, but quo -> quơ
    for i in cluster.start..cluster.end.saturating_sub(1) {
        if letters[i].base == 'u' && letters[i + 1].base == 'o' {
            return if after_q(i) { vec![i + 1] } else { vec![i, i + 1] };
        }
    }
    let rightmost = |b: char, r: Range<usize>| r.rev().find(|&i| letters[i].base == b);

    // oa -> oă
    if breve {
        for i in cluster.start..cluster.end - 1 {
            if letters[i].base == 'o' && letters[i + 1].base == 'a' {
                return vec![i + 1];
            }
        }
    }
    if let Some(i) = rightmost('o', cluster.clone()) {
        return vec![i];
    }
    let glide_u = cluster
        .clone()
        .find(|&i| letters[i].base == 'u')
        .filter(|&i| !after_q(i));
    if breve && glide_u.is_none() {
        if let Some(i) = rightmost('a', cluster.clone()) {
            return vec![i];
        }
    }
    if let Some(i) = glide_u {
        // rightmost u that is not the q glide
        let i = rightmost('u', i..cluster.end).unwrap_or(i);
        return vec![i];
    }
    Vec::new()
}

/// Index of the letter that carries the tone mark.
pub fn tone_position(letters: &[Letter], placement: TonePlacement) -> Option<usize> {
    let syl = syllable::decompose(letters);
    let nuc = syl.nucleus.clone();
    match nuc.len() {
        0 => return None,
        1 => return Some(nuc.start),
        _ => {}
    }

    // â ê ô ă ơ ư attract the mark; in ươ the later one wins
    if let Some(i) = nuc.clone().rev().find(|&i| {
        matches!(
            letters[i].modifier,
            Some(VowelMod::Circumflex | VowelMod::Horn | VowelMod::Breve)
        )
    }) {
        return Some(i);
    }
    if !syl.coda.is_empty() {
        return Some(nuc.end - 1);
    }
    if nuc.len() >= 3 {
        return Some(nuc.start + 1);
    }

    let pair = (letters[nuc.start].base, letters[nuc.start + 1].base);
    match (pair, placement) {
        (('o', 'a') | ('o', 'e') | ('u', 'y'), TonePlacement::Modern) => Some(nuc.start + 1),
        _ => Some(nuc.start),
    }
}

pub fn map_vowel_with_tone(c: char, tone: Tone) -> char {
    use Tone::*;
    match (c, tone) {
        ('a', Acute) => 'á', ('a', Grave) => 'à', ('a', Hook) => 'ả', ('a', Tilde) => 'ã', ('a', Dot) => 'ạ',
        ('ă', Acute) => 'ắ', ('ă', Grave) => 'ằ', ('ă', Hook) => 'ẳ', ('ă', Tilde) => 'ẵ', ('ă', Dot) => 'ặ',
        ('â', Acute) => 'ấ', ('â', Grave) => 'ầ', ('â', Hook) => 'ẩ', ('â', Tilde) => 'ẫ', ('â', Dot) => 'ậ',
        ('e', Acute) => 'é', ('e', Grave) => 'è', ('e', Hook) => 'ẻ', ('e', Tilde) => 'ẽ', ('e', Dot) => 'ẹ',
        ('ê', Acute) => 'ế', ('ê', Grave) => 'ề', ('ê', Hook) => 'ể', ('ê', Tilde) => 'ễ', ('ê', Dot) => 'ệ',
        ('i', Acute) => 'í', ('i', Grave) => 'ì', ('i', Hook) => 'ỉ', ('i', Tilde) => 'ĩ', ('i', Dot) => 'ị',
        ('o', Acute) => 'ó', ('o', Grave) => 'ò', ('o', Hook) => 'ỏ', ('o', Tilde) => 'õ', ('o', Dot) => 'ọ',
        ('ô', Acute) => 'ố', ('ô', Grave) => 'ồ', ('ô', Hook) => 'ổ', ('ô', Tilde) => 'ỗ', ('ô', Dot) => 'ộ',
        ('ơ', Acute) => 'ớ', ('ơ', Grave) => 'ờ', ('ơ', Hook) => 'ở', ('ơ', Tilde) => 'ỡ', ('ơ', Dot) => 'ợ',
        ('u', Acute) => 'ú', ('u', Grave) => 'ù', ('u', Hook) => 'ủ', ('u', Tilde) => 'ũ', ('u', Dot) => 'ụ',
        ('ư', Acute) => 'ứ', ('ư', Grave) => 'ừ', ('ư', Hook) => 'ử', ('ư', Tilde) => 'ữ', ('ư', Dot) => 'ự',
        ('y', Acute) => 'ý', ('y', Grave) => 'ỳ', ('y', Hook) => 'ỷ', ('y', Tilde) => 'ỹ', ('y', Dot) => 'ỵ',
        _ => c,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modes::{InputMethod, mode_for};

    fn compose(method: InputMethod, keys: &str) -> SyllableState {
        let mode = mode_for(method);
        let mut s = SyllableState::default();
        for k in keys.chars() {
            feed(mode, &mut s, k);
        }
        s
    }

    fn telex(keys: &str) -> String {
        compose(InputMethod::Telex, keys).render(TonePlacement::Modern)
    }

    #[test]
    fn tone_without_vowel_has_no_target() {
        let s = compose(InputMethod::Telex, "th");
        assert_eq!(apply(Op::Tone(Tone::Acute), &s), Err(NoTarget));
    }

    #[test]
    fn same_tone_twice_toggles_off() {
        let s = compose(InputMethod::Telex, "ca");
        let once = apply(Op::Tone(Tone::Grave), &s).unwrap();
        let twice = apply(Op::Tone(Tone::Grave), &once).unwrap();
        assert_eq!(once.render(TonePlacement::Modern), "cà");
        assert_eq!(twice.letters, s.letters);
        assert_eq!(twice.tone, Tone::None);
        assert!(twice.cancelled);
    }

    #[test]
    fn different_modifier_replaces() {
        assert_eq!(telex("aaw"), "ă");
        assert_eq!(telex("oow"), "ơ");
        assert_eq!(telex("owo"), "ô");
    }

    #[test]
    fn horn_on_uo_pair_and_qu_glide() {
        assert_eq!(telex("nguoiwf"), "người");
        assert_eq!(telex("quow"), "quơ");
        assert_eq!(telex("quaw"), "quă");
        assert_eq!(telex("muaw"), "mưa");
        assert_eq!(telex("hoaw"), "hoă");
    }

    #[test]
    fn uo_horn_completes_on_the_next_letter() {
        assert_eq!(telex("nguwoif"), "người");
        assert_eq!(telex("dduwocj"), "được");
        assert_eq!(telex("huwou"), "hươu");
        // a bare `ưo` stays until something follows it
        assert_eq!(telex("huwo"), "hưo");
    }

    #[test]
    fn standalone_w() {
        assert_eq!(telex("w"), "ư");
        assert_eq!(telex("tw"), "tư");
        assert_eq!(telex("W"), "Ư");
        assert_eq!(telex("ww"), "w");
        assert!(compose(InputMethod::Telex, "ww").cancelled);
    }

    #[test]
    fn brackets_insert_horned_vowels() {
        assert_eq!(telex("t[f"), "từ");
        assert_eq!(telex("t]"), "tơ");
        assert_eq!(telex("{"), "Ư");
    }

    #[test]
    fn bar_requires_adjacent_initial_d_in_telex() {
        assert_eq!(telex("dd"), "đ");
        assert_eq!(telex("add"), "add");
        let vni = compose(InputMethod::Vni, "di9").render(TonePlacement::Modern);
        assert_eq!(vni, "đi");
    }

    #[test]
    fn placement_classic_vs_modern() {
        let s = compose(InputMethod::Telex, "thuyr");
        assert_eq!(s.render(TonePlacement::Classic), "thủy");
        assert_eq!(s.render(TonePlacement::Modern), "thuỷ");
        let s = compose(InputMethod::Telex, "hoaf");
        assert_eq!(s.render(TonePlacement::Classic), "hòa");
        assert_eq!(s.render(TonePlacement::Modern), "hoà");
    }

    #[test]
    fn placement_follows_letters_typed_after_the_tone() {
        assert_eq!(telex("hoasn"), "hoán");
        assert_eq!(telex("tieengs"), "tiếng");
        assert_eq!(telex("dduowcj"), "được");
        assert_eq!(telex("khuyur"), "khuỷu");
    }

    #[test]
    fn uppercase_letters_keep_case() {
        assert_eq!(telex("VIEETJ"), "VIỆT");
        assert_eq!(telex("Ddaaus"), "Đấu");
    }
}
