//! Gate expansion into supersets.
//!
//! For a signed gate index `g`, produces supersets `S1..Sn` such that the
//! gate is equivalent to the disjunction of their conjunctions. A negative
//! index expands the De Morgan dual connective with every child sign
//! flipped.

use scram_tree::{Connective, SignedChild, TreeIndex};

use crate::errors::LogicError;
use crate::superset::{Infeasible, Superset};

/// Expands one signed gate index into the supersets of its children.
pub fn expand_gate(index: &TreeIndex, gate: i32) -> Result<Vec<Superset>, LogicError> {
    let indexed = index.gate(gate).ok_or(LogicError::UnknownIndex {
        index: gate,
        limit: index.max_index(),
    })?;
    let negated = gate < 0;
    let children = &indexed.children;

    let sets = match indexed.connective {
        Connective::Or => {
            if negated {
                expand_and(children, -1)
            } else {
                expand_or(children, 1)
            }
        }
        Connective::And | Connective::Inhibit => {
            if negated {
                expand_or(children, -1)
            } else {
                expand_and(children, 1)
            }
        }
        Connective::Nor => {
            if negated {
                expand_or(children, 1)
            } else {
                expand_and(children, -1)
            }
        }
        Connective::Nand => {
            if negated {
                expand_and(children, 1)
            } else {
                expand_or(children, -1)
            }
        }
        Connective::Null => expand_and(children, if negated { -1 } else { 1 }),
        Connective::Not => expand_and(children, if negated { 1 } else { -1 }),
        Connective::Xor => expand_xor(children, negated),
        Connective::AtLeast(k) => expand_at_least(children, k, negated),
    };
    Ok(sets)
}

fn insert_child(set: &mut Superset, child: SignedChild, sign: i32) -> Result<(), Infeasible> {
    match child {
        SignedChild::Basic(i) => set.insert_literal(i * sign),
        SignedChild::Gate(i) => set.insert_gate(i * sign),
        SignedChild::Constant(value) => {
            set.insert_constant(if sign < 0 { !value } else { value })
        }
    }
}

/// One singleton superset per child. A constant-false alternative
/// contributes nothing and is skipped; a constant-true alternative yields
/// the empty conjunction, which makes the gate certain.
fn expand_or(children: &[SignedChild], sign: i32) -> Vec<Superset> {
    let mut sets = Vec::with_capacity(children.len());
    for &child in children {
        let mut set = Superset::new();
        if insert_child(&mut set, child, sign).is_ok() {
            sets.push(set);
        }
    }
    sets
}

/// A single conjunction of all children; infeasible conjunctions (through a
/// constant-false conjunct) collapse to no supersets at all.
fn expand_and(children: &[SignedChild], sign: i32) -> Vec<Superset> {
    let mut set = Superset::new();
    for &child in children {
        if insert_child(&mut set, child, sign).is_err() {
            return Vec::new();
        }
    }
    vec![set]
}

/// XOR of exactly two children: `{c1, -c2}` and `{-c1, c2}`; negated, the
/// equivalence `{c1, c2}` and `{-c1, -c2}`.
fn expand_xor(children: &[SignedChild], negated: bool) -> Vec<Superset> {
    let sign_pairs: [[i32; 2]; 2] = if negated {
        [[1, 1], [-1, -1]]
    } else {
        [[1, -1], [-1, 1]]
    };
    let mut sets = Vec::with_capacity(2);
    for signs in sign_pairs {
        let mut set = Superset::new();
        let feasible = children
            .iter()
            .zip(signs)
            .try_for_each(|(&child, sign)| insert_child(&mut set, child, sign));
        if feasible.is_ok() {
            sets.push(set);
        }
    }
    sets
}

/// ATLEAST(k) of `m` children: one conjunction per k-subset. Negation
/// yields the (m - k + 1)-subsets with every sign flipped.
fn expand_at_least(children: &[SignedChild], k: usize, negated: bool) -> Vec<Superset> {
    let m = children.len();
    let (take, sign) = if negated { (m - k + 1, -1) } else { (k, 1) };
    let mut sets = Vec::new();
    for subset in k_subsets(m, take) {
        let mut set = Superset::new();
        let feasible = subset
            .iter()
            .try_for_each(|&pos| insert_child(&mut set, children[pos], sign));
        if feasible.is_ok() {
            sets.push(set);
        }
    }
    sets
}

/// All k-element index subsets of `0..m` in lexicographic order.
fn k_subsets(m: usize, k: usize) -> Vec<Vec<usize>> {
    if k == 0 || k > m {
        return Vec::new();
    }
    let mut subsets = Vec::new();
    let mut current: Vec<usize> = (0..k).collect();
    loop {
        subsets.push(current.clone());
        // Advance the rightmost index that still has room.
        let mut i = k;
        while i > 0 {
            i -= 1;
            if current[i] < m - (k - i) {
                current[i] += 1;
                for j in i + 1..k {
                    current[j] = current[j - 1] + 1;
                }
                break;
            }
            if i == 0 {
                return subsets;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scram_tree::{BasicEvent, ChildRef, FaultTree, Gate, HouseEvent};
    use std::collections::BTreeSet;

    /// Builds a tree whose top gate has `connective` over `children` basic
    /// events named e1..en, and returns its index.
    fn single_gate(connective: Connective, n: usize) -> TreeIndex {
        let mut tree = FaultTree::new("test");
        let mut children = Vec::new();
        for i in 1..=n {
            let id = format!("e{i}");
            tree.add_basic_event(BasicEvent::new(id.clone(), id.clone(), 0.1))
                .unwrap();
            children.push(ChildRef::Basic(id));
        }
        tree.add_gate(Gate::new("top", "Top", connective, children))
            .unwrap();
        TreeIndex::new(&tree, false).unwrap()
    }

    fn literal_sets(sets: &[Superset]) -> Vec<BTreeSet<i32>> {
        sets.iter().map(|s| s.literals().clone()).collect()
    }

    fn expect(sets: &[Superset], want: &[&[i32]]) {
        let got = literal_sets(sets);
        let want: Vec<BTreeSet<i32>> = want.iter().map(|g| g.iter().copied().collect()).collect();
        assert_eq!(got, want);
    }

    #[test]
    fn or_emits_singletons() {
        let index = single_gate(Connective::Or, 3);
        let sets = expand_gate(&index, index.top_index()).unwrap();
        expect(&sets, &[&[1], &[2], &[3]]);
    }

    #[test]
    fn and_emits_one_conjunction() {
        let index = single_gate(Connective::And, 3);
        let sets = expand_gate(&index, index.top_index()).unwrap();
        expect(&sets, &[&[1, 2, 3]]);
    }

    #[test]
    fn negated_or_is_nor() {
        let index = single_gate(Connective::Or, 2);
        let sets = expand_gate(&index, -index.top_index()).unwrap();
        expect(&sets, &[&[-1, -2]]);
    }

    #[test]
    fn negated_and_is_nand() {
        let index = single_gate(Connective::And, 2);
        let sets = expand_gate(&index, -index.top_index()).unwrap();
        expect(&sets, &[&[-1], &[-2]]);
    }

    #[test]
    fn nor_and_its_negation() {
        let index = single_gate(Connective::Nor, 2);
        expect(
            &expand_gate(&index, index.top_index()).unwrap(),
            &[&[-1, -2]],
        );
        expect(
            &expand_gate(&index, -index.top_index()).unwrap(),
            &[&[1], &[2]],
        );
    }

    #[test]
    fn nand_and_its_negation() {
        let index = single_gate(Connective::Nand, 2);
        expect(
            &expand_gate(&index, index.top_index()).unwrap(),
            &[&[-1], &[-2]],
        );
        expect(
            &expand_gate(&index, -index.top_index()).unwrap(),
            &[&[1, 2]],
        );
    }

    #[test]
    fn null_passes_through_and_not_flips() {
        let index = single_gate(Connective::Null, 1);
        expect(&expand_gate(&index, index.top_index()).unwrap(), &[&[1]]);
        expect(&expand_gate(&index, -index.top_index()).unwrap(), &[&[-1]]);

        let index = single_gate(Connective::Not, 1);
        expect(&expand_gate(&index, index.top_index()).unwrap(), &[&[-1]]);
        expect(&expand_gate(&index, -index.top_index()).unwrap(), &[&[1]]);
    }

    #[test]
    fn inhibit_expands_like_and() {
        let index = single_gate(Connective::Inhibit, 2);
        expect(&expand_gate(&index, index.top_index()).unwrap(), &[&[1, 2]]);
    }

    #[test]
    fn xor_and_its_negation() {
        let index = single_gate(Connective::Xor, 2);
        expect(
            &expand_gate(&index, index.top_index()).unwrap(),
            &[&[1, -2], &[-1, 2]],
        );
        expect(
            &expand_gate(&index, -index.top_index()).unwrap(),
            &[&[1, 2], &[-1, -2]],
        );
    }

    #[test]
    fn at_least_emits_k_subsets() {
        let index = single_gate(Connective::AtLeast(2), 3);
        let sets = expand_gate(&index, index.top_index()).unwrap();
        expect(&sets, &[&[1, 2], &[1, 3], &[2, 3]]);
    }

    #[test]
    fn negated_at_least_takes_complement_subsets() {
        // not atleast(2 of 3) == atleast(2 of 3 complemented) over m-k+1 = 2.
        let index = single_gate(Connective::AtLeast(2), 3);
        let sets = expand_gate(&index, -index.top_index()).unwrap();
        expect(&sets, &[&[-1, -2], &[-1, -3], &[-2, -3]]);
    }

    #[test]
    fn house_constants_fold_in_conjunctions() {
        let mut tree = FaultTree::new("test");
        tree.add_basic_event(BasicEvent::new("a", "A", 0.1)).unwrap();
        tree.add_house_event(HouseEvent::new("on", "On", true))
            .unwrap();
        tree.add_house_event(HouseEvent::new("off", "Off", false))
            .unwrap();
        tree.add_gate(Gate::new(
            "top",
            "Top",
            Connective::And,
            vec![ChildRef::Basic("a".into()), ChildRef::House("on".into())],
        ))
        .unwrap();
        tree.add_gate(Gate::new(
            "dead",
            "Dead",
            Connective::And,
            vec![ChildRef::Basic("a".into()), ChildRef::House("off".into())],
        ))
        .unwrap();
        let index = TreeIndex::new(&tree, false).unwrap();

        // true conjunct drops out
        let sets = expand_gate(&index, index.gate_index("top").unwrap()).unwrap();
        expect(&sets, &[&[1]]);
        // false conjunct kills the conjunction
        let sets = expand_gate(&index, index.gate_index("dead").unwrap()).unwrap();
        assert!(sets.is_empty());
        // negated: !(a & false) == true: one empty conjunction
        let sets = expand_gate(&index, -index.gate_index("dead").unwrap()).unwrap();
        expect(&sets, &[&[-1], &[]]);
    }

    #[test]
    fn unknown_index_is_a_logic_error() {
        let index = single_gate(Connective::Or, 2);
        assert!(matches!(
            expand_gate(&index, 99),
            Err(LogicError::UnknownIndex { index: 99, .. })
        ));
    }

    #[test]
    fn k_subsets_enumerates_lexicographically() {
        assert_eq!(
            k_subsets(4, 2),
            vec![
                vec![0, 1],
                vec![0, 2],
                vec![0, 3],
                vec![1, 2],
                vec![1, 3],
                vec![2, 3]
            ]
        );
        assert_eq!(k_subsets(3, 3), vec![vec![0, 1, 2]]);
        assert!(k_subsets(2, 3).is_empty());
        assert!(k_subsets(3, 0).is_empty());
    }
}
