use serde::Deserialize;

use crate::tone::Tone;

/// Keying convention used to compose diacritics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputMethod {
    #[default]
    Telex,
    Vni,
}

/// A diacritic operation triggered by a modifier key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    /// Set (or toggle off) a tone mark.
    Tone(Tone),
    /// Remove the current tone mark (Telex `z`, VNI `0`).
    ClearTone,
    /// Circumflex on a/e/o. `Some(base)` restricts the target to that base
    /// letter, which is how Telex doubling works.
    Circumflex(Option<char>),
    /// Horn on o/u. With `breve` set the key may also put a breve on `a`.
    Horn { breve: bool },
    Breve,
    /// Bar on the initial `d`. `adjacent` requires the `d` to be the only
    /// letter typed so far.
    Bar { adjacent: bool },
    /// Insert a horned vowel directly (Telex brackets). An uppercase base
    /// inserts an uppercase letter.
    HornLetter(char),
}

pub struct Mode {
    ops: &'static [Option<Op>; 128],
    /// Telex turns a `w` with nothing to modify into `ư`.
    pub standalone_horn: bool,
    /// Modifier keys are ordinary letters, so foreign words can trigger
    /// them by accident.
    pub letter_modifiers: bool,
}

impl Mode {
    #[inline(always)]
    pub fn op(&self, key: char) -> Option<Op> {
        if key.is_ascii() {
            self.ops[key.to_ascii_lowercase() as usize]
        } else {
            None
        }
    }

    #[inline(always)]
    pub fn is_modifier(&self, key: char) -> bool {
        self.op(key).is_some()
    }
}

pub fn mode_for(method: InputMethod) -> &'static Mode {
    match method {
        InputMethod::Telex => &TELEX_MODE,
        InputMethod::Vni => &VNI_MODE,
    }
}

static TELEX_MODE: Mode = Mode {
    ops: &OPS_TELEX,
    standalone_horn: true,
    letter_modifiers: true,
};

static VNI_MODE: Mode = Mode {
    ops: &OPS_VNI,
    standalone_horn: false,
    letter_modifiers: false,
};

const OPS_TELEX: [Option<Op>; 128] = {
    let mut t = [None; 128];
    t[b's' as usize] = Some(Op::Tone(Tone::Acute));
    t[b'f' as usize] = Some(Op::Tone(Tone::Grave));
    t[b'r' as usize] = Some(Op::Tone(Tone::Hook));
    t[b'x' as usize] = Some(Op::Tone(Tone::Tilde));
    t[b'j' as usize] = Some(Op::Tone(Tone::Dot));
    t[b'z' as usize] = Some(Op::ClearTone);

    t[b'a' as usize] = Some(Op::Circumflex(Some('a')));
    t[b'e' as usize] = Some(Op::Circumflex(Some('e')));
    t[b'o' as usize] = Some(Op::Circumflex(Some('o')));
    t[b'w' as usize] = Some(Op::Horn { breve: true });
    t[b'd' as usize] = Some(Op::Bar { adjacent: true });

    t[b'[' as usize] = Some(Op::HornLetter('u'));
    t[b'{' as usize] = Some(Op::HornLetter('U'));
    t[b']' as usize] = Some(Op::HornLetter('o'));
    t[b'}' as usize] = Some(Op::HornLetter('O'));
    t
};

const OPS_VNI: [Option<Op>; 128] = {
    let mut t = [None; 128];
    t[b'1' as usize] = Some(Op::Tone(Tone::Acute));
    t[b'2' as usize] = Some(Op::Tone(Tone::Grave));
    t[b'3' as usize] = Some(Op::Tone(Tone::Hook));
    t[b'4' as usize] = Some(Op::Tone(Tone::Tilde));
    t[b'5' as usize] = Some(Op::Tone(Tone::Dot));
    t[b'0' as usize] = Some(Op::ClearTone);

    t[b'6' as usize] = Some(Op::Circumflex(None));
    t[b'7' as usize] = Some(Op::Horn { breve: false });
    t[b'8' as usize] = Some(Op::Breve);
    t[b'9' as usize] = Some(Op::Bar { adjacent: false });
    t
};
