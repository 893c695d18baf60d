use capmatch::{Feature, FeatureTable, Location, Statement};
use proptest::prelude::*;

// --- Fixed feature universe ---
// Features are Number(0..FEATURES); locations are four fixed addresses.
// Small universes keep hit rates high enough to exercise both outcomes.

pub const FEATURES: i64 = 6;

pub const LOCATIONS: [Location; 4] = [
    Location::Absolute(0x401001),
    Location::Absolute(0x401002),
    Location::Absolute(0x401003),
    Location::Absolute(0x401004),
];

/// Generate a feature table over the fixed universe. Each feature is absent,
/// present with empty evidence, or present at a subset of the locations.
pub fn arb_table() -> impl Strategy<Value = FeatureTable> {
    prop::collection::vec(
        prop_oneof![
            2 => Just(None),
            1 => Just(Some(Vec::new())),
            4 => prop::sample::subsequence(LOCATIONS.to_vec(), 1..=LOCATIONS.len()).prop_map(Some),
        ],
        FEATURES as usize,
    )
    .prop_map(|entries| {
        let mut table = FeatureTable::new();
        for (i, entry) in entries.into_iter().enumerate() {
            if let Some(locations) = entry {
                table.extend([(Feature::Number(i as i64), locations)]);
            }
        }
        table
    })
}

pub fn arb_feature() -> impl Strategy<Value = Feature> {
    (0..FEATURES).prop_map(Feature::Number)
}

/// Generate a `Range` with valid bounds. Roughly a third are unbounded above.
pub fn arb_range() -> impl Strategy<Value = Statement> {
    (arb_feature(), 0_u64..=3, prop::option::weighted(0.66, 0_u64..=3)).prop_map(
        |(feature, min, extra)| {
            Statement::range(feature, min, extra.map(|e| min + e)).expect("generated range is valid")
        },
    )
}

/// Generate a leaf-level statement: a feature test or a count range.
pub fn arb_leaf() -> impl Strategy<Value = Statement> {
    prop_oneof![
        3 => arb_feature().prop_map(Statement::leaf),
        1 => arb_range(),
    ]
}

/// Generate a composite statement tree with bounded depth and fan-out.
pub fn arb_statement(max_depth: u32) -> impl Strategy<Value = Statement> {
    arb_leaf().prop_recursive(max_depth, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 1..=4)
                .prop_map(|children| Statement::and(children).expect("non-empty")),
            prop::collection::vec(inner.clone(), 1..=4)
                .prop_map(|children| Statement::or(children).expect("non-empty")),
            inner
                .clone()
                .prop_map(|child| Statement::negate(child).expect("shallow")),
            (0_usize..=5, prop::collection::vec(inner, 0..=4)).prop_map(|(threshold, children)| {
                Statement::some(threshold, children).expect("shallow")
            }),
        ]
    })
}

/// Generate a list of 1..=6 children for building a composite under test.
pub fn arb_children() -> impl Strategy<Value = Vec<Statement>> {
    prop::collection::vec(arb_statement(2), 1..=6)
}
