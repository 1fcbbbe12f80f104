//! Property-based tests for filter expressions and ID generators

use chroma_extras::ids::{IdGenerator, NANOID_ALPHABET};
use chroma_extras::query::{and, contains, eq, gte, in_, lt, ne, nin, or, where_, where_document, Expression};
use proptest::prelude::*;
use serde_json::{json, Value};
use std::collections::HashSet;

fn field_strategy() -> impl Strategy<Value = String> {
    "[a-z_][a-z0-9_]{0,15}"
}

/// Small trees of comparison leaves under nested combinators
fn expression_strategy() -> impl Strategy<Value = Expression> {
    let leaf = prop_oneof![
        (field_strategy(), any::<i64>()).prop_map(|(f, v)| eq(f, v)),
        (field_strategy(), "[a-zA-Z ]{0,12}").prop_map(|(f, v)| ne(f, v)),
        (field_strategy(), any::<i32>()).prop_map(|(f, v)| lt(f, v)),
        (field_strategy(), any::<bool>()).prop_map(|(f, v)| eq(f, v)),
    ];

    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 1..4).prop_map(|children| and(children)),
            prop::collection::vec(inner, 1..4).prop_map(|children| or(children)),
        ]
    })
}

#[test]
fn prop_comparison_leaf_shape() {
    proptest!(|(field in field_strategy(), value in any::<i64>())| {
        prop_assert_eq!(eq(field.clone(), value).to_value(), json!({ field.clone(): ["$eq", value] }));
        prop_assert_eq!(gte(field.clone(), value).to_value(), json!({ field: ["$gte", value] }));
    });
}

#[test]
fn prop_membership_preserves_values_in_order() {
    proptest!(|(field in field_strategy(), values in prop::collection::vec("[a-z]{1,8}", 0..10))| {
        let included = in_(field.clone(), values.clone()).to_value();
        let excluded = nin(field.clone(), values.clone()).to_value();

        prop_assert_eq!(included, json!({ field.clone(): ["$in", values.clone()] }));
        prop_assert_eq!(excluded, json!({ field: ["$nin", values] }));
    });
}

#[test]
fn prop_combinators_keep_children_in_order() {
    proptest!(|(children in prop::collection::vec(expression_strategy(), 0..6))| {
        let expected: Vec<Value> = children.iter().map(Expression::to_value).collect();

        prop_assert_eq!(and(children.clone()).to_value(), json!({ "$and": expected.clone() }));
        prop_assert_eq!(or(children).to_value(), json!({ "$or": expected }));
    });
}

#[test]
fn prop_infix_matches_function_form() {
    proptest!(|(left in expression_strategy(), right in expression_strategy())| {
        prop_assert_eq!(left.clone() & right.clone(), and([left.clone(), right.clone()]));
        prop_assert_eq!(left.clone() | right.clone(), or([left, right]));
    });
}

#[test]
fn prop_conversion_is_repeatable() {
    proptest!(|(expression in expression_strategy())| {
        let first = where_(expression.clone());
        let second = where_(expression.clone());

        prop_assert_eq!(&first, &second);
        prop_assert!(first == expression.to_value());

        let reparsed: Value = serde_json::from_str(&expression.to_string()).unwrap();
        prop_assert_eq!(reparsed, expression.to_value());
    });
}

#[test]
fn prop_document_filter_single_text_is_bare() {
    proptest!(|(text in "[a-z ]{1,20}")| {
        let filter = where_document(contains([text.clone()]));
        let expected = json!({ "$contains": text });
        prop_assert!(filter == expected);
    });
}

#[test]
fn prop_uuid_ids_are_unique() {
    proptest!(|(len in 0usize..200)| {
        let ids = IdGenerator::uuid(len);
        let unique: HashSet<&String> = ids.iter().collect();

        prop_assert_eq!(ids.len(), len);
        prop_assert_eq!(unique.len(), len);
    });
}

#[test]
fn prop_nano_ids_use_alphabet() {
    proptest!(|(len in 1usize..50, size in 1usize..40)| {
        let ids = IdGenerator::nano_id(len, None, Some(size)).unwrap();

        prop_assert_eq!(ids.len(), len);
        for id in ids.iter() {
            prop_assert_eq!(id.chars().count(), size);
            prop_assert!(id.chars().all(|c| NANOID_ALPHABET.contains(c)));
        }
    });
}

#[test]
fn prop_document_ids_are_deterministic() {
    proptest!(|(documents in prop::collection::vec(".{0,40}", 1..20))| {
        let first = IdGenerator::document_sha256(&documents);
        let second = IdGenerator::document_sha256(&documents);

        prop_assert_eq!(first.len(), documents.len());
        prop_assert_eq!(first.into_inner(), second.into_inner());
    });
}
