use super::model::NameDictionary;
use super::normalize;

/// Folded English names this short never take the fuzzy pass.
const FUZZY_MIN_LEN: usize = 4;

/// Decides whether an English and a Telugu sibling name denote the same person.
///
/// 1. exact dictionary lookup, either direction;
/// 2. for folded English names longer than [`FUZZY_MIN_LEN`], any entry whose
///    folded English form is contained in the candidate (or the reverse) and
///    whose Telugu form equals the candidate Telugu name;
/// 3. otherwise no match.
///
/// Names outside the dictionary never match. That is a coverage limit of the
/// table, not something to paper over with phonetics.
pub fn names_match(dict: &NameDictionary, english: &str, telugu: &str) -> bool {
    let english = english.trim();
    let telugu = telugu.trim();

    if english.is_empty() || telugu.is_empty() {
        return false;
    }

    if exact_match(dict, english, telugu) {
        return true;
    }

    fuzzy_match(dict, english, telugu)
}

fn exact_match(dict: &NameDictionary, english: &str, telugu: &str) -> bool {
    dict.telugu_for(english) == Some(telugu) || dict.english_for(telugu) == Some(english)
}

fn fuzzy_match(dict: &NameDictionary, english: &str, telugu: &str) -> bool {
    let candidate = normalize::alpha_only(english);
    if candidate.len() <= FUZZY_MIN_LEN {
        return false;
    }

    dict.entries().iter().any(|e| {
        !e.folded.is_empty()
            && (normalize::contains_in_order(&candidate, &e.folded)
                || normalize::contains_in_order(&e.folded, &candidate))
            && e.telugu == telugu
    })
}
