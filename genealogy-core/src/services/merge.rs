//! Bilingual genealogy merge.
//!
//! Two independently authored person trees, one English and one Telugu, are
//! walked generation by generation. Siblings are paired by name through the
//! [`NameDictionary`]; English sibling order is authoritative and Telugu
//! siblings without an English counterpart are appended after it.

use tracing::{debug, trace};

use crate::model::person::{BilingualPersonRecord, DetailGroup, PersonRecord, SpouseGroup};
use crate::services::name_dictionary::{names_match, normalize, NameDictionary};

pub struct GenealogyMerger<'a> {
    dictionary: &'a NameDictionary,
}

/// A Telugu sibling waiting for an English partner.
struct PoolSlot<'p> {
    key: String,
    person: &'p PersonRecord,
    consumed: bool,
}

impl<'a> GenealogyMerger<'a> {
    pub fn new(dictionary: &'a NameDictionary) -> Self {
        Self { dictionary }
    }

    pub fn dictionary(&self) -> &NameDictionary {
        self.dictionary
    }

    /// Merges one English node with its Telugu counterpart (either may be the
    /// empty placeholder). Never fails: missing fields become empty strings.
    pub fn merge_persons(
        &self,
        english: &PersonRecord,
        telugu: &PersonRecord,
    ) -> BilingualPersonRecord {
        BilingualPersonRecord {
            name: english.name.clone(),
            name_en: english.name.clone(),
            name_te: telugu.name.clone(),

            age: english.age.clone(),
            class: english.class.clone(),
            birth: english.birth.clone(),
            death: english.death.clone(),

            spouse: SpouseGroup::from_pair(english.spouse_text(), telugu.spouse_text()),
            detail: DetailGroup::from_pair(english.detail_text(), telugu.detail_text()),

            children: self.merge_branch(english.children.as_deref(), telugu.children.as_deref()),
            hidden_children: self.merge_branch(
                english.hidden_children.as_deref(),
                telugu.hidden_children.as_deref(),
            ),
        }
    }

    /// Pairs one generation of siblings.
    ///
    /// Output holds every English child in its original order, followed by the
    /// Telugu children nobody claimed, in their original order. Each Telugu
    /// child is used at most once.
    pub fn merge_child_sets(
        &self,
        english_children: &[PersonRecord],
        telugu_children: &[PersonRecord],
    ) -> Vec<BilingualPersonRecord> {
        let mut pool = build_pool(telugu_children);
        let mut merged = Vec::with_capacity(english_children.len().max(telugu_children.len()));
        let placeholder = PersonRecord::placeholder();

        for en in english_children {
            let partner = pool
                .iter_mut()
                .find(|slot| !slot.consumed && names_match(self.dictionary, &en.name, &slot.person.name));

            let te = match partner {
                Some(slot) => {
                    slot.consumed = true;
                    trace!("[merge] '{}' ↔ '{}'", en.name, slot.person.name);
                    slot.person
                }
                None => {
                    debug!("[merge] no Telugu counterpart for '{}'", en.name);
                    &placeholder
                }
            };

            merged.push(self.merge_persons(en, te));
        }

        for slot in pool.iter().filter(|slot| !slot.consumed) {
            debug!("[merge] Telugu-only sibling '{}' appended", slot.person.name);
            merged.push(self.merge_persons(&placeholder, slot.person));
        }

        merged
    }

    fn merge_branch(
        &self,
        english: Option<&[PersonRecord]>,
        telugu: Option<&[PersonRecord]>,
    ) -> Option<Vec<BilingualPersonRecord>> {
        if english.is_none() && telugu.is_none() {
            return None;
        }

        Some(self.merge_child_sets(english.unwrap_or(&[]), telugu.unwrap_or(&[])))
    }
}

fn build_pool(telugu_children: &[PersonRecord]) -> Vec<PoolSlot<'_>> {
    let mut pool: Vec<PoolSlot<'_>> = Vec::with_capacity(telugu_children.len());

    for person in telugu_children {
        let key = normalize::normalize_key(&person.name);

        if !key.is_empty() && pool.iter().any(|slot| slot.key == key) {
            // both are kept and can each be claimed once
            debug!("[merge] duplicate Telugu sibling name '{}'", person.name);
        }

        pool.push(PoolSlot {
            key,
            person,
            consumed: false,
        });
    }

    pool
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::name_dictionary::store;
    use serde_json::json;

    fn person(v: serde_json::Value) -> PersonRecord {
        serde_json::from_value(v).unwrap()
    }

    fn names(nodes: &[BilingualPersonRecord]) -> Vec<(&str, &str)> {
        nodes
            .iter()
            .map(|n| (n.name_en.as_str(), n.name_te.as_str()))
            .collect()
    }

    #[test]
    fn english_order_wins_and_match_is_by_name() {
        let dict = store::bundled().unwrap();
        let merger = GenealogyMerger::new(&dict);

        let en = person(json!({ "name": "Adam", "children": [{ "name": "Seth" }, { "name": "Cain" }] }));
        let te = person(json!({ "name": "ఆదాము", "children": [{ "name": "కేయిను" }] }));

        let root = merger.merge_persons(&en, &te);
        assert_eq!(root.name, "Adam");
        assert_eq!(root.name_te, "ఆదాము");

        let children = root.children.unwrap();
        assert_eq!(names(&children), vec![("Seth", ""), ("Cain", "కేయిను")]);
        assert!(children.iter().all(|c| c.name == c.name_en));
    }

    #[test]
    fn telugu_leftovers_are_appended_in_order() {
        let dict = store::bundled().unwrap();
        let merger = GenealogyMerger::new(&dict);

        let en = vec![PersonRecord::named("Shem"), PersonRecord::named("Japheth")];
        let te = vec![
            PersonRecord::named("హాము"),
            PersonRecord::named("యాపెతు"),
            PersonRecord::named("కనాను"),
            PersonRecord::named("షేము"),
        ];

        let merged = merger.merge_child_sets(&en, &te);
        assert_eq!(
            names(&merged),
            vec![
                ("Shem", "షేము"),
                ("Japheth", "యాపెతు"),
                ("", "హాము"),
                ("", "కనాను"),
            ]
        );
        assert_eq!(merged[2].name, "");
    }

    #[test]
    fn a_telugu_child_is_claimed_once() {
        let dict = store::bundled().unwrap();
        let merger = GenealogyMerger::new(&dict);

        let en = vec![PersonRecord::named("Abram"), PersonRecord::named("Abraham")];
        let te = vec![PersonRecord::named("అబ్రాము")];

        let merged = merger.merge_child_sets(&en, &te);
        assert_eq!(names(&merged), vec![("Abram", "అబ్రాము"), ("Abraham", "")]);
    }

    #[test]
    fn duplicate_telugu_names_are_both_kept() {
        let dict = store::bundled().unwrap();
        let merger = GenealogyMerger::new(&dict);

        let en = vec![PersonRecord::named("Lamech")];
        let te = vec![PersonRecord::named("లెమెకు"), PersonRecord::named("లెమెకు")];

        let merged = merger.merge_child_sets(&en, &te);
        assert_eq!(names(&merged), vec![("Lamech", "లెమెకు"), ("", "లెమెకు")]);
    }

    #[test]
    fn groups_are_all_or_nothing() {
        let dict = store::bundled().unwrap();
        let merger = GenealogyMerger::new(&dict);

        let en = person(json!({ "name": "Adam", "spouse": "Eve", "age": 930 }));
        let te = person(json!({ "name": "ఆదాము", "detail": "మొదటి మనిషి", "age": 1 }));
        let merged = merger.merge_persons(&en, &te);

        let spouse = merged.spouse.clone().unwrap();
        assert_eq!((spouse.en.as_str(), spouse.te.as_str(), spouse.primary.as_str()), ("Eve", "", "Eve"));

        let detail = merged.detail.clone().unwrap();
        assert_eq!(detail.primary, "మొదటి మనిషి");
        assert_eq!(detail.en, "");

        assert_eq!(merged.age, Some(json!(930)));
        assert!(merged.children.is_none());
        assert!(merged.hidden_children.is_none());

        let value = serde_json::to_value(&merged).unwrap();
        assert_eq!(value["spouseTe"], "");
        assert_eq!(value["detailEn"], "");
    }

    #[test]
    fn placeholder_does_not_force_groups() {
        let dict = store::bundled().unwrap();
        let merger = GenealogyMerger::new(&dict);

        let merged = merger.merge_persons(&PersonRecord::placeholder(), &PersonRecord::named("కనాను"));
        let value = serde_json::to_value(&merged).unwrap();
        let obj = value.as_object().unwrap();

        assert_eq!(obj["nameEn"], "");
        assert_eq!(obj["nameTe"], "కనాను");
        for key in ["spouse", "spouseEn", "spouseTe", "detail", "detailEn", "detailTe", "age"] {
            assert!(!obj.contains_key(key), "unexpected key {key}");
        }
    }

    #[test]
    fn hidden_children_merge_independently() {
        let dict = store::bundled().unwrap();
        let merger = GenealogyMerger::new(&dict);

        let en = person(json!({
            "name": "Noah",
            "_children": [{ "name": "Shem", "children": [{ "name": "Arphaxad" }] }]
        }));
        let te = person(json!({
            "name": "నోవహు",
            "children": [],
            "_children": [{ "name": "షేము", "_children": [{ "name": "ఏలాము" }] }]
        }));

        let merged = merger.merge_persons(&en, &te);
        assert_eq!(merged.children, Some(Vec::new()));

        let hidden = merged.hidden_children.unwrap();
        assert_eq!(names(&hidden), vec![("Shem", "షేము")]);

        let shem = &hidden[0];
        assert_eq!(names(shem.children.as_ref().unwrap()), vec![("Arphaxad", "")]);
        assert_eq!(names(shem.hidden_children.as_ref().unwrap()), vec![("", "ఏలాము")]);
    }

    #[test]
    fn output_does_not_alias_sources() {
        let dict = store::bundled().unwrap();
        let merger = GenealogyMerger::new(&dict);

        let en = PersonRecord::named("Adam");
        let te = PersonRecord::named("ఆదాము");
        let mut merged = merger.merge_persons(&en, &te);
        merged.name.push('!');

        assert_eq!(en.name, "Adam");
    }
}
