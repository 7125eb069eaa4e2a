#![allow(dead_code)]

use std::collections::HashMap;

use scram_tree::{BasicEvent, ChildRef, Connective, FaultTree, Gate, HouseEvent};

use scram_engine::result::{AnalysisResult, CutSet};

/// Builds a tree with `events` basic events (`id`, probability) and
/// `gates` (`id`, connective, child ids); the first gate is the top. Child
/// ids are resolved against the event and gate lists.
pub fn build_tree(
    name: &str,
    events: &[(&str, f64)],
    houses: &[(&str, bool)],
    gates: &[(&str, Connective, &[&str])],
) -> FaultTree {
    let mut tree = FaultTree::new(name);
    for (id, probability) in events {
        tree.add_basic_event(BasicEvent::new(*id, *id, *probability))
            .unwrap();
    }
    for (id, state) in houses {
        tree.add_house_event(HouseEvent::new(*id, *id, *state))
            .unwrap();
    }
    let gate_ids: Vec<&str> = gates.iter().map(|(id, _, _)| *id).collect();
    for (id, connective, children) in gates {
        let children = children
            .iter()
            .map(|child| {
                if gate_ids.contains(child) {
                    ChildRef::Gate((*child).to_string())
                } else if houses.iter().any(|(h, _)| h == child) {
                    ChildRef::House((*child).to_string())
                } else {
                    ChildRef::Basic((*child).to_string())
                }
            })
            .collect();
        tree.add_gate(Gate::new(*id, *id, *connective, children))
            .unwrap();
    }
    tree
}

/// Truth value of a gate under a full assignment of the basic events.
pub fn eval_gate(tree: &FaultTree, gate_id: &str, assignment: &HashMap<String, bool>) -> bool {
    let gate = tree.gate(gate_id).expect("gate exists");
    let child = |c: &ChildRef| -> bool {
        match c {
            ChildRef::Gate(id) => eval_gate(tree, id, assignment),
            ChildRef::Basic(id) => *assignment.get(id).expect("assigned"),
            ChildRef::House(id) => tree.house_event(id).expect("house exists").state,
        }
    };
    let values: Vec<bool> = gate.children.iter().map(child).collect();
    match gate.connective {
        Connective::And | Connective::Inhibit => values.iter().all(|&v| v),
        Connective::Or => values.iter().any(|&v| v),
        Connective::Not => !values[0],
        Connective::Null => values[0],
        Connective::Nor => !values.iter().any(|&v| v),
        Connective::Nand => !values.iter().all(|&v| v),
        Connective::Xor => values[0] != values[1],
        Connective::AtLeast(k) => values.iter().filter(|&&v| v).count() >= k,
    }
}

/// Truth value of the top gate under the assignment.
pub fn eval_top(tree: &FaultTree, assignment: &HashMap<String, bool>) -> bool {
    let top = tree.top_gate().expect("top gate").id.clone();
    eval_gate(tree, &top, assignment)
}

/// Whether fixing a cut set's literals forces the top gate true under every
/// completion of the remaining events.
pub fn cut_set_forces_top(tree: &FaultTree, cut_set: &CutSet) -> bool {
    let fixed: HashMap<String, bool> = cut_set
        .literals
        .iter()
        .map(|l| (l.event.clone(), !l.complement))
        .collect();
    let free: Vec<String> = tree
        .basic_events()
        .map(|e| e.id.clone())
        .filter(|id| !fixed.contains_key(id))
        .collect();
    for bits in 0..(1u64 << free.len()) {
        let mut assignment = fixed.clone();
        for (i, id) in free.iter().enumerate() {
            assignment.insert(id.clone(), (bits >> i) & 1 == 1);
        }
        if !eval_top(tree, &assignment) {
            return false;
        }
    }
    true
}

/// The reported MCS as sorted sign/id pairs, convenient for assertions.
pub fn mcs_as_pairs(result: &AnalysisResult) -> Vec<Vec<(String, bool)>> {
    result
        .mcs
        .iter()
        .map(|c| {
            c.literals
                .iter()
                .map(|l| (l.event.clone(), l.complement))
                .collect()
        })
        .collect()
}

/// Shorthand for asserting the MCS against `[[("a", false), ...], ...]`.
pub fn assert_mcs(result: &AnalysisResult, want: &[&[(&str, bool)]]) {
    let got = mcs_as_pairs(result);
    let want: Vec<Vec<(String, bool)>> = want
        .iter()
        .map(|set| {
            set.iter()
                .map(|(id, complement)| ((*id).to_string(), *complement))
                .collect()
        })
        .collect();
    assert_eq!(got, want);
}
