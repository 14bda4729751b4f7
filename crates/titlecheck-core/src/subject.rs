//! Heuristics over the subject slot of a title

/// Irregular simple-past forms that do not end in `-ed`
const IRREGULAR_PAST: &[&str] = &[
    "began", "bought", "broke", "brought", "built", "caught", "chose", "did", "drew", "drove",
    "fell", "felt", "fought", "forgot", "found", "gave", "got", "grew", "had", "held", "hid",
    "kept", "knew", "led", "left", "lost", "made", "meant", "met", "overrode", "paid", "ran",
    "rebuilt", "rewrote", "rode", "rose", "said", "sent", "shook", "sold", "sought", "spent",
    "spoke", "stood", "stole", "struck", "stuck", "swept", "taught", "thought", "threw", "told",
    "took", "tore", "understood", "undid", "was", "went", "were", "withdrew", "woke", "won",
    "wore", "wrote",
];

/// Base-form verbs that happen to end in `-ed`
const BASE_FORMS_ENDING_IN_ED: &[&str] = &[
    "bleed", "breed", "embed", "exceed", "feed", "need", "proceed", "seed", "shed", "shred",
    "speed", "succeed", "weed",
];

/// Whether the subject's first character is uppercase
pub fn starts_with_uppercase(subject: &str) -> bool {
    subject.chars().next().is_some_and(char::is_uppercase)
}

pub fn ends_with_period(subject: &str) -> bool {
    subject.ends_with('.')
}

/// Best-effort check that the first word is not a past-tense verb.
///
/// Only the first space-delimited token is inspected.
pub fn first_verb_is_past_tense(subject: &str) -> bool {
    let Some(verb) = subject.split(' ').next() else {
        return false;
    };
    let verb = verb.to_lowercase();

    if IRREGULAR_PAST.contains(&verb.as_str()) {
        return true;
    }

    verb.len() > 2 && verb.ends_with("ed") && !BASE_FORMS_ENDING_IN_ED.contains(&verb.as_str())
}

/// Whether `marker` occurs anywhere other than as the ` <marker>` suffix.
///
/// A subject without the marker is never misplaced.
pub fn marker_is_misplaced(subject: &str, marker: &str) -> bool {
    if marker.is_empty() || !subject.contains(marker) {
        return false;
    }

    let Some(rest) = subject.strip_suffix(marker) else {
        return true;
    };

    // exactly one space before the marker, and the marker appears only once
    !(rest.ends_with(' ') && !rest.ends_with("  ") && !rest.contains(marker))
}
