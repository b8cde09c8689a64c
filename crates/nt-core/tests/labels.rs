//! Identity properties of facet labels.

use std::collections::HashSet;
use std::hash::{DefaultHasher, Hash, Hasher};

use nt_core::FacetLabel;
use proptest::prelude::*;

fn hash_of(label: &FacetLabel) -> u64 {
    let mut hasher = DefaultHasher::new();
    label.hash(&mut hasher);
    hasher.finish()
}

/// Small domains so that equal pairs turn up often.
fn arb_label() -> impl Strategy<Value = FacetLabel> {
    prop_oneof![
        "[a-c0-2]{0,2}".prop_map(FacetLabel::Text),
        (-3i32..3).prop_map(|n| FacetLabel::Number(f64::from(n))),
        Just(FacetLabel::Number(-0.0)),
        prop::num::f64::NORMAL.prop_map(FacetLabel::Number),
        Just(FacetLabel::Missing),
    ]
}

proptest! {
    #[test]
    fn equal_labels_hash_alike(a in arb_label(), b in arb_label()) {
        if a == b {
            prop_assert_eq!(hash_of(&a), hash_of(&b));
        }
    }

    #[test]
    fn equality_is_reflexive_and_symmetric(a in arb_label(), b in arb_label()) {
        prop_assert_eq!(&a, &a.clone());
        prop_assert_eq!(a == b, b == a);
    }

    #[test]
    fn text_never_equals_number(n in -1000i32..1000) {
        let number = FacetLabel::Number(f64::from(n));
        let text = FacetLabel::Text(number.to_string());
        prop_assert_ne!(&text, &number);
        prop_assert_ne!(&FacetLabel::Missing, &number);
    }

    #[test]
    fn set_dedup_matches_pairwise_equality(labels in prop::collection::vec(arb_label(), 0..16)) {
        let set: HashSet<FacetLabel> = labels.iter().cloned().collect();
        let mut distinct: Vec<&FacetLabel> = Vec::new();
        for label in &labels {
            if !distinct.contains(&label) {
                distinct.push(label);
            }
        }
        prop_assert_eq!(set.len(), distinct.len());
    }
}
