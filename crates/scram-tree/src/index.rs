use indexmap::{IndexMap, IndexSet};

use crate::event::{ChildRef, Connective};
use crate::fault_tree::{FaultTree, ValidityError};

/// A gate child resolved to the signed-index domain.
///
/// House events carry no index of their own; they resolve to Boolean
/// constants here and fold away during expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignedChild {
    /// Signed basic-event index, `1..=B`.
    Basic(i32),
    /// Signed gate index, `B+1..=B+G`.
    Gate(i32),
    Constant(bool),
}

/// A gate with its children pre-resolved to signed indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedGate {
    pub connective: Connective,
    pub children: Vec<SignedChild>,
}

/// Bijection between entity identifiers and dense signed indices.
///
/// Basic events receive `1..=B` and gates `B+1..=B+G`, both in the
/// insertion order of the tree; the top gate is always `B+1`. A signed
/// integer `i` denotes the entity `|i|`, negated when `i < 0`.
#[derive(Debug, Clone)]
pub struct TreeIndex {
    /// Basic-event identifiers; slot 0 is an unused sentinel so that the
    /// vector can be addressed by index directly.
    basics: Vec<String>,
    /// Probability per basic event, parallel to `basics` (slot 0 is 0.0).
    /// All zeros when probabilities were not requested.
    probs: Vec<f64>,
    /// Resolved gates; gate `B+1+i` lives at slot `i`.
    gates: Vec<IndexedGate>,
    gate_ids: Vec<String>,
    basic_lookup: IndexMap<String, i32>,
    gate_lookup: IndexMap<String, i32>,
    /// Primary events (basic and house) defined but not reachable from the
    /// top gate, in insertion order.
    orphans: Vec<String>,
}

impl TreeIndex {
    /// Builds the index from a validated tree.
    ///
    /// Performs a topological numbering of the gate graph as a cheap
    /// acyclicity revalidation; a back-edge yields [`ValidityError`] even
    /// when the loader forgot to validate.
    pub fn new(tree: &FaultTree, with_probabilities: bool) -> Result<Self, ValidityError> {
        let top = tree.top_gate().ok_or_else(|| ValidityError::EmptyTree {
            tree: tree.name().to_string(),
        })?;

        let mut basics = vec![String::new()];
        let mut probs = vec![0.0];
        let mut basic_lookup = IndexMap::new();
        for event in tree.basic_events() {
            let index = basics.len() as i32;
            basics.push(event.id.clone());
            probs.push(if with_probabilities {
                event.probability
            } else {
                0.0
            });
            basic_lookup.insert(event.id.clone(), index);
        }
        let num_basics = basics.len() as i32 - 1;

        let mut gate_lookup = IndexMap::new();
        let mut gate_ids = Vec::new();
        for gate in tree.gates() {
            let index = num_basics + 1 + gate_ids.len() as i32;
            gate_ids.push(gate.id.clone());
            gate_lookup.insert(gate.id.clone(), index);
        }

        let mut gates = Vec::with_capacity(gate_ids.len());
        for gate in tree.gates() {
            let children = gate
                .children
                .iter()
                .map(|child| match child {
                    ChildRef::Basic(id) => basic_lookup
                        .get(id)
                        .map(|&i| SignedChild::Basic(i))
                        .ok_or_else(|| ValidityError::UndefinedChild {
                            gate: gate.id.clone(),
                            child: id.clone(),
                        }),
                    ChildRef::Gate(id) => gate_lookup
                        .get(id)
                        .map(|&i| SignedChild::Gate(i))
                        .ok_or_else(|| ValidityError::UndefinedChild {
                            gate: gate.id.clone(),
                            child: id.clone(),
                        }),
                    ChildRef::House(id) => tree
                        .house_event(id)
                        .map(|h| SignedChild::Constant(h.state))
                        .ok_or_else(|| ValidityError::UndefinedChild {
                            gate: gate.id.clone(),
                            child: id.clone(),
                        }),
                })
                .collect::<Result<Vec<_>, _>>()?;
            gates.push(IndexedGate {
                connective: gate.connective,
                children,
            });
        }

        let reachable = topological_reachability(tree, &top.id)?;
        let mut orphans = Vec::new();
        for event in tree.basic_events() {
            if !reachable.contains(event.id.as_str()) {
                orphans.push(event.id.clone());
            }
        }
        for event in tree.house_events() {
            if !reachable.contains(event.id.as_str()) {
                orphans.push(event.id.clone());
            }
        }

        Ok(Self {
            basics,
            probs,
            gates,
            gate_ids,
            basic_lookup,
            gate_lookup,
            orphans,
        })
    }

    /// Number of basic events `B`.
    pub fn num_basic_events(&self) -> usize {
        self.basics.len() - 1
    }

    /// Number of gates `G`.
    pub fn num_gates(&self) -> usize {
        self.gates.len()
    }

    /// The signed index of the top gate, always `B + 1`.
    pub fn top_index(&self) -> i32 {
        self.basics.len() as i32
    }

    /// Largest valid `|index|`, i.e. `B + G`.
    pub fn max_index(&self) -> i32 {
        (self.num_basic_events() + self.num_gates()) as i32
    }

    pub fn basic_index(&self, id: &str) -> Option<i32> {
        self.basic_lookup.get(id).copied()
    }

    pub fn gate_index(&self, id: &str) -> Option<i32> {
        self.gate_lookup.get(id).copied()
    }

    /// Identifier of the basic event behind a signed literal.
    pub fn basic_id(&self, literal: i32) -> Option<&str> {
        let slot = literal.unsigned_abs() as usize;
        if slot == 0 || slot >= self.basics.len() {
            return None;
        }
        Some(&self.basics[slot])
    }

    /// Identifier of the gate behind a signed gate index.
    pub fn gate_id(&self, index: i32) -> Option<&str> {
        self.gate(index).map(|_| {
            let slot = index.unsigned_abs() as usize - self.basics.len();
            self.gate_ids[slot].as_str()
        })
    }

    /// The resolved gate behind a signed gate index.
    pub fn gate(&self, index: i32) -> Option<&IndexedGate> {
        let abs = index.unsigned_abs() as usize;
        if abs < self.basics.len() {
            return None;
        }
        self.gates.get(abs - self.basics.len())
    }

    /// Probability of the basic event `|literal|`; 0.0 when probabilities
    /// were not requested.
    pub fn probability(&self, literal: i32) -> f64 {
        self.probs
            .get(literal.unsigned_abs() as usize)
            .copied()
            .unwrap_or(0.0)
    }

    /// The probability table, parallel to the `1..=B` index range with an
    /// unused slot 0.
    pub fn probabilities(&self) -> &[f64] {
        &self.probs
    }

    /// Primary events that are defined but unreachable from the top gate.
    pub fn orphan_events(&self) -> &[String] {
        &self.orphans
    }
}

/// Iterative DFS from the top gate collecting every reachable entity and
/// numbering gates topologically; revisiting a gate still on the stack is a
/// back-edge and fails with a cycle error.
fn topological_reachability<'a>(
    tree: &'a FaultTree,
    top: &'a str,
) -> Result<IndexSet<&'a str>, ValidityError> {
    #[derive(Clone, Copy, PartialEq)]
    enum Mark {
        Open,
        Done,
    }

    let mut reachable: IndexSet<&str> = IndexSet::new();
    let mut marks: IndexMap<&str, Mark> = IndexMap::new();
    let mut path: Vec<&str> = Vec::new();
    // (gate id, next child to visit)
    let mut stack: Vec<(&str, usize)> = vec![(top, 0)];
    marks.insert(top, Mark::Open);
    path.push(top);
    reachable.insert(top);

    while let Some((id, child_pos)) = stack.pop() {
        let gate = tree.gate(id).ok_or_else(|| ValidityError::UndefinedChild {
            gate: id.to_string(),
            child: id.to_string(),
        })?;
        if child_pos >= gate.children.len() {
            marks.insert(id, Mark::Done);
            path.pop();
            continue;
        }
        stack.push((id, child_pos + 1));
        match &gate.children[child_pos] {
            ChildRef::Basic(child) | ChildRef::House(child) => {
                reachable.insert(child.as_str());
            }
            ChildRef::Gate(child) => match marks.get(child.as_str()) {
                Some(Mark::Open) => {
                    let start = path
                        .iter()
                        .position(|p| *p == child.as_str())
                        .unwrap_or(0);
                    let mut cycle: Vec<String> =
                        path[start..].iter().map(|s| s.to_string()).collect();
                    cycle.push(child.to_string());
                    return Err(ValidityError::CycleDetected { path: cycle });
                }
                Some(Mark::Done) => {}
                None => {
                    marks.insert(child.as_str(), Mark::Open);
                    path.push(child.as_str());
                    reachable.insert(child.as_str());
                    stack.push((child.as_str(), 0));
                }
            },
        }
    }

    Ok(reachable)
}
