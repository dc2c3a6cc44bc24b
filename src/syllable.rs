//! Vietnamese syllable grammar: onset, nucleus and coda tables plus the
//! compatibility rules between them.

use std::ops::Range;

use crate::tone::{Letter, Tone};

const ONSETS: &[&str] = &[
    "", "b", "c", "ch", "d", "đ", "g", "gh", "gi", "h", "k", "kh", "l", "m", "n", "ng", "ngh",
    "nh", "p", "ph", "qu", "r", "s", "t", "th", "tr", "v", "x",
];

const NUCLEI: &[&str] = &[
    "a", "ă", "â", "e", "ê", "i", "o", "ô", "ơ", "u", "ư", "y", //
    "ai", "ao", "au", "ay", "âu", "ây", "eo", "êu", "ia", "iê", "iu", "oa", "oă", "oe", "oi",
    "ôi", "ơi", "oo", "ua", "uâ", "uê", "ui", "uô", "uơ", "uy", "ưa", "ưi", "ươ", "ưu", "yê", //
    "iêu", "oai", "oay", "oeo", "uây", "uôi", "uya", "uyê", "uyu", "ươi", "ươu", "yêu",
];

const CODAS: &[&str] = &["", "c", "ch", "m", "n", "ng", "nh", "p", "t"];

/// Nuclei ending in a glide; they close the syllable themselves.
/// `ia`, `ua` and `ưa` are spelled `iê`, `uô` and `ươ` before a final.
const OPEN_ONLY: &[&str] = &[
    "ai", "ao", "au", "ay", "âu", "ây", "eo", "êu", "ia", "iu", "oi", "ôi", "ơi", "ua", "ui",
    "ưa", "ưi", "ưu", "iêu", "oai", "oay", "oeo", "uây", "uôi", "uya", "uyu", "ươi", "ươu",
    "yêu",
];

/// Nuclei that need a final consonant.
const CLOSED_ONLY: &[&str] = &["ă", "â", "iê", "yê", "uô", "oă", "uâ", "uyê", "oo"];

/// Nuclei allowed before `ch` and `nh`.
const PALATAL_NUCLEI: &[&str] = &["a", "ê", "i", "oa", "uê", "uy"];

/// Parts of a letter buffer, as index ranges into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Syllable {
    pub onset: Range<usize>,
    pub nucleus: Range<usize>,
    pub coda: Range<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    /// Vowels on both sides of a consonant: more than one syllable.
    Structure,
    Onset,
    Nucleus,
    Coda,
    OnsetNucleus,
    NucleusCoda,
    /// Stop finals carry the acute or dot tone and nothing else.
    ToneCoda,
}

/// Range of the last run of vowel letters, ignoring the `qu`/`gi` rules.
pub fn last_vowel_cluster(letters: &[Letter]) -> Range<usize> {
    let Some(last) = letters.iter().rposition(Letter::is_vowel) else {
        return letters.len()..letters.len();
    };
    let mut start = last;
    while start > 0 && letters[start - 1].is_vowel() {
        start -= 1;
    }
    start..last + 1
}

pub fn decompose(letters: &[Letter]) -> Syllable {
    let cluster = last_vowel_cluster(letters);
    if cluster.is_empty() {
        return Syllable {
            onset: 0..letters.len(),
            nucleus: letters.len()..letters.len(),
            coda: letters.len()..letters.len(),
        };
    }
    let mut start = cluster.start;
    if cluster.len() > 1 && start > 0 {
        let first = &letters[start];
        let prev = letters[start - 1].base;
        let next = &letters[start + 1];
        // the u of qu and the i of gi belong to the onset
        let qu = first.base == 'u' && first.modifier.is_none() && prev == 'q';
        let gi = first.base == 'i'
            && prev == 'g'
            && start == 1
            && !(next.base == 'e' && next.modifier.is_some());
        if qu || gi {
            start += 1;
        }
    }
    Syllable {
        onset: 0..start,
        nucleus: start..cluster.end,
        coda: cluster.end..letters.len(),
    }
}

fn spell(letters: &[Letter], r: Range<usize>) -> String {
    letters[r].iter().map(Letter::glyph).collect()
}

pub fn is_onset(s: &str) -> bool {
    ONSETS.contains(&s)
}

pub fn is_nucleus(s: &str) -> bool {
    NUCLEI.contains(&s)
}

pub fn is_coda(s: &str) -> bool {
    CODAS.contains(&s)
}

/// Checks that the buffer spells one legal Vietnamese syllable.
pub fn check(letters: &[Letter], tone: Tone) -> Result<(), Violation> {
    let syl = decompose(letters);
    let onset = spell(letters, syl.onset.clone());
    let nucleus = spell(letters, syl.nucleus.clone());
    let coda = spell(letters, syl.coda.clone());

    // the glide of `qu` and `gi` is the only vowel an onset may hold
    let glide = usize::from(matches!(onset.as_str(), "qu" | "gi"));
    if letters[syl.onset.start..syl.onset.end - glide]
        .iter()
        .any(Letter::is_vowel)
    {
        return Err(Violation::Structure);
    }
    if !is_onset(&onset) {
        return Err(Violation::Onset);
    }
    if nucleus.is_empty() {
        // a lone `đ` is kept as typed
        return if onset == "đ" && coda.is_empty() {
            Ok(())
        } else {
            Err(Violation::Nucleus)
        };
    }
    if !is_nucleus(&nucleus) {
        return Err(Violation::Nucleus);
    }
    if !is_coda(&coda) {
        return Err(Violation::Coda);
    }

    let first = nucleus.chars().next().unwrap_or_default();
    let front = matches!(first, 'e' | 'ê' | 'i' | 'y');
    let onset_ok = match onset.as_str() {
        "k" | "gh" | "ngh" => front,
        "c" | "ng" => !front,
        "g" => !matches!(first, 'e' | 'ê' | 'y'),
        "qu" => !matches!(first, 'u' | 'ư'),
        _ => true,
    };
    if !onset_ok {
        return Err(Violation::OnsetNucleus);
    }

    let n = nucleus.as_str();
    let coda_ok = match coda.as_str() {
        "" => !CLOSED_ONLY.contains(&n),
        _ if OPEN_ONLY.contains(&n) => false,
        "ch" | "nh" => PALATAL_NUCLEI.contains(&n),
        "c" | "ng" => !matches!(n, "i" | "ê" | "y" | "uy" | "uê"),
        "m" | "p" => n != "ư",
        _ => true,
    };
    if !coda_ok {
        return Err(Violation::NucleusCoda);
    }

    let stop = matches!(coda.as_str(), "c" | "ch" | "p" | "t");
    if stop && !matches!(tone, Tone::Acute | Tone::Dot) {
        return Err(Violation::ToneCoda);
    }
    Ok(())
}
