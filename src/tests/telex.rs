use super::*;

#[test]
fn telex_modifier_basic() {
    assert_eq!(telex("aa"), "â");
    assert_eq!(telex("aw"), "ă");
    assert_eq!(telex("ee"), "ê");
    assert_eq!(telex("oo"), "ô");
    assert_eq!(telex("ow"), "ơ");
    assert_eq!(telex("uw"), "ư");
    assert_eq!(telex("dd"), "đ");
}

#[test]
fn tone_single_vowel_all_tones() {
    assert_eq!(telex("as"), "á");
    assert_eq!(telex("af"), "à");
    assert_eq!(telex("ar"), "ả");
    assert_eq!(telex("ax"), "ã");
    assert_eq!(telex("aj"), "ạ");
}

#[test]
fn z_key_removes_tone() {
    assert_eq!(telex("asz"), "a");
    assert_eq!(telex("axz"), "a");
    // nothing to remove: z stays
    assert_eq!(telex("az"), "az");
}

#[test]
fn toggling_triplet() {
    assert_eq!(telex("aaa"), "a");
    assert_eq!(telex("ddd"), "d");
    assert_eq!(telex("eee"), "e");
    assert_eq!(telex("ooo"), "o");
}

#[test]
fn tone_on_modified_vowels() {
    assert_eq!(telex("aas"), "ấ");
    assert_eq!(telex("awj"), "ặ");
    assert_eq!(telex("ees"), "ế");
    assert_eq!(telex("oos"), "ố");
    assert_eq!(telex("ows"), "ớ");
    assert_eq!(telex("uws"), "ứ");
}

#[test]
fn greedy_tone_last_wins() {
    assert_eq!(telex("asf"), "à");
    assert_eq!(telex("afsj"), "ạ");
}

#[test]
fn same_tone_key_twice_cancels() {
    assert_eq!(telex("ass"), "a");
    assert_eq!(telex("toosss"), "tố");
}

#[test]
fn tone_placement_two_vowels_no_coda() {
    assert_eq!(telex("hoas"), "hoá");
    assert_eq!(telex("hoaf"), "hoà");
    assert_eq!(classic("hoas"), "hóa");
    assert_eq!(classic("hoaf"), "hòa");
}

#[test]
fn tone_placement_two_vowels_with_coda() {
    assert_eq!(telex("hoans"), "hoán");
    assert_eq!(telex("hoanj"), "hoạn");
    assert_eq!(classic("hoans"), "hoán");
}

#[test]
fn tone_placement_three_vowels_targets_second_vowel() {
    assert_eq!(telex("khuya"), "khuya");
    assert_eq!(telex("khuyas"), "khuýa");
    assert_eq!(telex("ngoaif"), "ngoài");
}

#[test]
fn tone_only_input_stays_literal() {
    assert_eq!(telex("s"), "s");
    assert_eq!(telex("z"), "z");
    assert_eq!(telex("tr"), "tr");
}

#[test]
fn special_uow_combo() {
    assert_eq!(telex("huow"), "hươ");
    assert_eq!(telex("huows"), "hướ");
    assert_eq!(telex("nguwowif"), "người");
    assert_eq!(telex("dduowcj"), "được");
}

#[test]
fn valid_consonant_cluster() {
    assert_eq!(telex("nghe"), "nghe");
    assert_eq!(telex("nghes"), "nghé");
    assert_eq!(telex("nghees"), "nghế");
}

#[test]
fn regression_qu_gi_placement() {
    assert_eq!(telex("quas"), "quá");
    assert_eq!(telex("quyf"), "quỳ");
    assert_eq!(telex("quir"), "quỉ");
    assert_eq!(telex("gias"), "giá");
    assert_eq!(telex("gif"), "gì");
}

#[test]
fn regression_vowel_pairs() {
    assert_eq!(telex("hoef"), "hoè");
    assert_eq!(telex("tuyf"), "tuỳ");
    assert_eq!(classic("tuyf"), "tùy");
    assert_eq!(telex("mias"), "mía");
    assert_eq!(telex("muas"), "múa");
    assert_eq!(telex("muwas"), "mứa");
    assert_eq!(telex("guiwr"), "gửi");
    assert_eq!(telex("tuis"), "túi");
}

#[test]
fn tone_typed_before_the_last_letters() {
    assert_eq!(telex("tieesng"), "tiếng");
    assert_eq!(telex("vieejt"), "việt");
    assert_eq!(telex("ddaays"), "đấy");
}

#[test]
fn ddaas_builds_up_dd_aa_and_tone() {
    let mut e = ViEngine::new();
    assert_eq!(type_seq(&mut e, "dd"), "đ");
    assert_eq!(type_seq(&mut e, "aa"), "đâ");
    assert_eq!(type_seq(&mut e, "s"), "đấ");
}

#[test]
fn uppercase_is_preserved() {
    assert_eq!(telex("Vieetj"), "Việt");
    assert_eq!(telex("DDAAY"), "ĐÂY");
    assert_eq!(telex("TIEENGS"), "TIẾNG");
}

#[test]
fn brackets_are_horn_shortcuts() {
    assert_eq!(telex("t[f"), "từ");
    assert_eq!(telex("m]"), "mơ");
}

#[test]
fn regression_pho_validity() {
    assert_eq!(telex("phos"), "phó");
    assert_eq!(telex("phowr"), "phở");
}
