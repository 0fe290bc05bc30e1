//! Property-based tests for the query pipeline, pagination and codec.
//!
//! Tests validate:
//! 1. Filtering keeps exactly the records whose name contains the search text
//! 2. Both sorts are stable
//! 3. Visible count never exceeds the view after any number of advances
//! 4. Reset returns to page 0 with the right `has_more`
//! 5. Encode/decode preserves string maps and separator-free cookies

use proptest::prelude::*;
use std::collections::BTreeMap;
use std::num::NonZeroUsize;
use zonegrid::codec::{SEPARATOR, decode, encode};
use zonegrid::model::{Record, SortKey};
use zonegrid::state::{NameCollation, ViewController, apply};

fn sort_key() -> impl Strategy<Value = SortKey> {
    prop_oneof![Just(SortKey::Unordered), Just(SortKey::Name), Just(SortKey::Id)]
}

/// Records with small id and name alphabets so ties are common.
fn records() -> impl Strategy<Value = Vec<Record>> {
    prop::collection::vec((0i64..8, "[aAbB ]{0,4}"), 0..30).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (id, name))| Record::new(id, name, format!("u{i}"), ""))
            .collect()
    })
}

fn page_size() -> impl Strategy<Value = NonZeroUsize> {
    (1usize..8).prop_map(|n| NonZeroUsize::new(n).unwrap())
}

// ===== Property 1: Filter correctness =====

proptest! {
    #[test]
    fn filter_keeps_exactly_matching_records(
        records in records(),
        search in "[aAbB ]{0,2}",
        sort in sort_key(),
    ) {
        let view = apply(&records, &search, sort);
        let needle = search.to_lowercase();

        for record in view.iter() {
            prop_assert!(record.name.to_lowercase().contains(&needle));
        }
        let expected = records
            .iter()
            .filter(|r| r.name.to_lowercase().contains(&needle))
            .count();
        prop_assert_eq!(view.len(), expected);
    }

    #[test]
    fn unordered_preserves_input_order(records in records(), search in "[ab]{0,1}") {
        let view = apply(&records, &search, SortKey::Unordered);
        let positions: Vec<usize> = view
            .iter()
            .map(|r| records.iter().position(|x| x.url == r.url).unwrap())
            .collect();

        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }
}

// ===== Property 2: Sort stability =====

proptest! {
    #[test]
    fn id_sort_is_stable(records in records()) {
        let view = apply(&records, "", SortKey::Id);

        for pair in view.as_slice().windows(2) {
            prop_assert!(pair[0].id <= pair[1].id);
            if pair[0].id == pair[1].id {
                // `url` encodes the input position.
                let a: usize = pair[0].url[1..].parse().unwrap();
                let b: usize = pair[1].url[1..].parse().unwrap();
                prop_assert!(a < b);
            }
        }
    }

    #[test]
    fn name_sort_is_ordered_and_stable(records in records()) {
        let view = apply(&records, "", SortKey::Name);
        let collation = NameCollation::new().unwrap();

        for pair in view.as_slice().windows(2) {
            prop_assert_ne!(
                collation.compare(&pair[0].name, &pair[1].name),
                std::cmp::Ordering::Greater
            );
            if pair[0].name == pair[1].name {
                let a: usize = pair[0].url[1..].parse().unwrap();
                let b: usize = pair[1].url[1..].parse().unwrap();
                prop_assert!(a < b);
            }
        }
    }

    #[test]
    fn name_collation_is_antisymmetric(a in "[aAbBéÉ~]{0,3}", b in "[aAbBéÉ~]{0,3}") {
        let collation = NameCollation::new().unwrap();
        prop_assert_eq!(collation.compare(&a, &b), collation.compare(&b, &a).reverse());
    }
}

// ===== Properties 3 & 4: Pagination =====

proptest! {
    #[test]
    fn visible_count_is_bounded_after_advances(
        records in records(),
        size in page_size(),
        advances in 0usize..20,
    ) {
        let mut controller = ViewController::new(size);
        controller.reset(apply(&records, "", SortKey::Unordered));
        let total = records.len();

        for _ in 0..advances {
            let before = controller.visible_count();
            match controller.advance() {
                Some(instruction) => {
                    prop_assert!(!instruction.records().is_empty());
                    let added = instruction.records().len();
                    prop_assert_eq!(controller.visible_count(), before + added);
                }
                None => prop_assert_eq!(controller.visible_count(), before),
            }
            prop_assert!(controller.visible_count() <= total);
            prop_assert_eq!(
                controller.visible_count(),
                ((controller.page_index() + 1) * size.get()).min(total)
            );
        }
    }

    #[test]
    fn reset_returns_to_first_page(
        first in records(),
        second in records(),
        size in page_size(),
        advances in 0usize..5,
    ) {
        let mut controller = ViewController::new(size);
        controller.reset(apply(&first, "", SortKey::Unordered));
        for _ in 0..advances {
            controller.advance();
        }

        let instruction = controller.reset(apply(&second, "", SortKey::Unordered));

        prop_assert_eq!(controller.page_index(), 0);
        prop_assert_eq!(controller.has_more(), second.len() > size.get());
        prop_assert_eq!(instruction.records().len(), second.len().min(size.get()));
    }
}

// ===== Property 5: Codec round-trip =====

fn cookie_header() -> impl Strategy<Value = (String, Vec<(String, String)>)> {
    prop::collection::vec(("[a-zA-Z_][a-zA-Z0-9_]{0,6}", "[a-zA-Z0-9=._-]{0,8}"), 0..5).prop_map(
        |pairs| {
            let header = pairs
                .iter()
                .map(|(k, v)| format!("{k}={v}"))
                .collect::<Vec<_>>()
                .join("; ");
            (header, pairs)
        },
    )
}

proptest! {
    #[test]
    fn codec_round_trips_maps_and_cookies(
        kv in prop::collection::btree_map(any::<String>(), any::<String>(), 0..8),
        (header, pairs) in cookie_header(),
    ) {
        let blob = encode(&kv, &header);
        prop_assert_eq!(blob.matches(SEPARATOR).count(), 1);

        let decoded = decode(&blob).unwrap();
        prop_assert_eq!(decoded.kv_map(), kv);
        prop_assert!(decoded.cookie_warnings.is_empty());

        let ops: Vec<(String, String)> = decoded
            .cookie_ops
            .into_iter()
            .map(|op| (op.name, op.value))
            .collect();
        prop_assert_eq!(ops, pairs);
    }

    #[test]
    fn non_object_json_never_decodes(n in any::<i64>(), cookies in "[a-z]=[a-z]") {
        let blob = format!("{n}{SEPARATOR}{cookies}");
        prop_assert!(decode(&blob).is_err());
    }
}

#[test]
fn empty_maps_round_trip() {
    let decoded = decode(&encode(&BTreeMap::new(), "")).unwrap();
    assert!(decoded.kv_ops.is_empty());
    assert!(decoded.cookie_ops.is_empty());
}
