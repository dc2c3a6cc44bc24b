use super::*;

#[test]
fn vni_basic_modifiers() {
    assert_eq!(vni("a6"), "â");
    assert_eq!(vni("a8"), "ă");
    assert_eq!(vni("e6"), "ê");
    assert_eq!(vni("o6"), "ô");
    assert_eq!(vni("o7"), "ơ");
    assert_eq!(vni("u7"), "ư");
    assert_eq!(vni("d9"), "đ");
}

#[test]
fn vni_basic_tones() {
    assert_eq!(vni("a1"), "á");
    assert_eq!(vni("a2"), "à");
    assert_eq!(vni("a3"), "ả");
    assert_eq!(vni("a4"), "ã");
    assert_eq!(vni("a5"), "ạ");
}

#[test]
fn vni_tone_removal() {
    assert_eq!(vni("a10"), "a");
    // no tone to remove: the digit is typed as is
    assert_eq!(vni("a0"), "a0");
}

#[test]
fn vni_tones_on_modified_vowels() {
    assert_eq!(vni("a61"), "ấ");
    assert_eq!(vni("o61"), "ố");
    assert_eq!(vni("o71"), "ớ");
    assert_eq!(vni("u71"), "ứ");
    // đ carries no tone and there is no vowel yet
    assert_eq!(vni("d91"), "đ1");
}

#[test]
fn vni_words() {
    assert_eq!(vni("vie6t5"), "việt");
    assert_eq!(vni("d9i"), "đi");
    assert_eq!(vni("di9"), "đi");
    assert_eq!(vni("nguo72i"), "người");
    assert_eq!(vni("hoa2"), "hoà");
    assert_eq!(vni("qua8n"), "quăn");
}

#[test]
fn vni_toggle() {
    assert_eq!(vni("a66"), "a");
    assert_eq!(vni("a11"), "a");
    assert_eq!(vni("d99"), "d");
}

#[test]
fn vni_letters_are_not_modifiers() {
    assert_eq!(vni("aas"), "aas");
    assert_eq!(vni("ddow"), "ddow");
}

#[test]
fn vni_numbers_commit_literally() {
    let config = EngineConfig::default().with_mode(InputMethod::Vni);
    let mut sc = Screen::new(config);
    assert_eq!(sc.type_str("2024 "), "2024 ");
}
