//! End-to-end analysis scenarios over small hand-built trees.

mod common;

use common::{assert_mcs, build_tree};

use scram_engine::pipeline::analyze;
use scram_engine::settings::{Approximation, Settings};
use scram_tree::Connective;

fn probability_settings(approximation: Approximation) -> Settings {
    Settings {
        probability: true,
        approximation,
        ..Settings::default()
    }
}

#[test]
fn two_of_three_voting_mcs_and_probabilities() {
    let tree = build_tree(
        "voting",
        &[("a", 0.1), ("b", 0.1), ("c", 0.1)],
        &[],
        &[("top", Connective::AtLeast(2), &["a", "b", "c"])],
    );

    let result = analyze(&tree, &probability_settings(Approximation::None)).unwrap();
    assert_mcs(
        &result,
        &[
            &[("a", false), ("b", false)],
            &[("a", false), ("c", false)],
            &[("b", false), ("c", false)],
        ],
    );
    let prob = result.probability.as_ref().unwrap();
    for &p in &prob.per_mcs {
        assert!((p - 0.01).abs() < 1e-12);
    }
    // 3*0.01 - 3*0.001 + 0.001
    assert!((prob.total - 0.028).abs() < 1e-12);

    let rare = analyze(&tree, &probability_settings(Approximation::RareEvent)).unwrap();
    let rare_total = rare.probability.unwrap().total;
    assert!((rare_total - 0.03).abs() < 1e-12);

    let upper = analyze(&tree, &probability_settings(Approximation::Mcub)).unwrap();
    let upper_total = upper.probability.unwrap().total;
    assert!((upper_total - (1.0 - 0.99f64.powi(3))).abs() < 1e-12);
}

#[test]
fn voting_importance_contributions() {
    let tree = build_tree(
        "voting",
        &[("a", 0.1), ("b", 0.1), ("c", 0.1)],
        &[],
        &[("top", Connective::AtLeast(2), &["a", "b", "c"])],
    );
    let result = analyze(&tree, &probability_settings(Approximation::None)).unwrap();
    let importance = result.importance.unwrap();
    assert_eq!(importance.len(), 3);
    for record in &importance {
        assert!((record.positive - 0.02).abs() < 1e-12);
        assert_eq!(record.negative, 0.0);
    }
}

#[test]
fn xor_keeps_signed_literals() {
    let tree = build_tree(
        "xor",
        &[("a", 0.2), ("b", 0.3)],
        &[],
        &[("top", Connective::Xor, &["a", "b"])],
    );
    let result = analyze(&tree, &probability_settings(Approximation::None)).unwrap();
    assert_mcs(
        &result,
        &[
            &[("a", false), ("b", true)],
            &[("a", true), ("b", false)],
        ],
    );
    let prob = result.probability.unwrap();
    assert!((prob.total - 0.38).abs() < 1e-12);

    // Both literals of each event contribute to importance.
    let importance = result.importance.unwrap();
    assert_eq!(importance.len(), 2);
    assert!((importance[0].positive - 0.2 * 0.7).abs() < 1e-12);
    assert!((importance[0].negative - 0.8 * 0.3).abs() < 1e-12);
}

#[test]
fn shared_sub_gate_absorbs() {
    let tree = build_tree(
        "shared",
        &[("a", 0.1), ("b", 0.1)],
        &[],
        &[
            ("top", Connective::And, &["g", "g"]),
            ("g", Connective::Or, &["a", "b"]),
        ],
    );
    let result = analyze(&tree, &probability_settings(Approximation::None)).unwrap();
    assert_mcs(&result, &[&[("a", false)], &[("b", false)]]);
    // P(a | b) = 0.1 + 0.1 - 0.01
    assert!((result.probability.unwrap().total - 0.19).abs() < 1e-12);
}

#[test]
fn order_bound_empties_the_mcs_with_a_warning() {
    let events: Vec<(&str, f64)> = vec![
        ("e1", 0.1),
        ("e2", 0.1),
        ("e3", 0.1),
        ("e4", 0.1),
        ("e5", 0.1),
        ("e6", 0.1),
        ("e7", 0.1),
        ("e8", 0.1),
    ];
    let tree = build_tree(
        "wide",
        &events,
        &[],
        &[(
            "top",
            Connective::And,
            &["e1", "e2", "e3", "e4", "e5", "e6", "e7", "e8"],
        )],
    );
    let settings = Settings {
        limit_order: 5,
        ..Settings::default()
    };
    let result = analyze(&tree, &settings).unwrap();
    assert!(result.mcs.is_empty());
    assert!(result
        .warnings
        .iter()
        .any(|w| w.contains("no cut sets for the limit order 5")));
    assert!(result
        .warnings
        .iter()
        .any(|w| w.contains("beyond the order limit")));
}

#[test]
fn de_morgan_nor_top() {
    let tree = build_tree(
        "nor",
        &[("a", 0.5), ("b", 0.5)],
        &[],
        &[("top", Connective::Nor, &["a", "b"])],
    );
    let result = analyze(&tree, &probability_settings(Approximation::None)).unwrap();
    assert_mcs(&result, &[&[("a", true), ("b", true)]]);
    assert!((result.probability.unwrap().total - 0.25).abs() < 1e-12);
}

#[test]
fn true_house_event_vanishes_from_conjunctions() {
    let tree = build_tree(
        "house",
        &[("a", 0.1)],
        &[("h", true)],
        &[("top", Connective::And, &["a", "h"])],
    );
    let result = analyze(&tree, &Settings::default()).unwrap();
    assert_mcs(&result, &[&[("a", false)]]);
}

#[test]
fn false_house_event_kills_the_branch() {
    let tree = build_tree(
        "house",
        &[("a", 0.1), ("b", 0.2)],
        &[("h", false)],
        &[
            ("top", Connective::Or, &["g", "b"]),
            ("g", Connective::And, &["a", "h"]),
        ],
    );
    let result = analyze(&tree, &Settings::default()).unwrap();
    assert_mcs(&result, &[&[("b", false)]]);
}

#[test]
fn nested_gates_through_nand_and_not() {
    // top = AND(NOT g, b); g = NAND(a, b). NOT NAND(a,b) = a & b, so the
    // only cut set is {a, b}.
    let tree = build_tree(
        "nested",
        &[("a", 0.3), ("b", 0.4)],
        &[],
        &[
            ("top", Connective::And, &["n", "b"]),
            ("n", Connective::Not, &["g"]),
            ("g", Connective::Nand, &["a", "b"]),
        ],
    );
    let result = analyze(&tree, &probability_settings(Approximation::None)).unwrap();
    assert_mcs(&result, &[&[("a", false), ("b", false)]]);
    assert!((result.probability.unwrap().total - 0.12).abs() < 1e-12);
}

#[test]
fn inhibit_behaves_as_conjunction() {
    let tree = build_tree(
        "inhibit",
        &[("a", 0.2), ("c", 0.5)],
        &[],
        &[("top", Connective::Inhibit, &["a", "c"])],
    );
    let result = analyze(&tree, &probability_settings(Approximation::None)).unwrap();
    assert_mcs(&result, &[&[("a", false), ("c", false)]]);
    assert!((result.probability.unwrap().total - 0.1).abs() < 1e-12);
}

#[test]
fn timings_are_recorded() {
    let tree = build_tree(
        "voting",
        &[("a", 0.1), ("b", 0.1), ("c", 0.1)],
        &[],
        &[("top", Connective::AtLeast(2), &["a", "b", "c"])],
    );
    let result = analyze(&tree, &probability_settings(Approximation::None)).unwrap();
    // Phases completed; the fields exist and are small for this tree.
    assert!(result.timings.generation_ms < 10_000);
    assert!(result.timings.minimization_ms < 10_000);
}
