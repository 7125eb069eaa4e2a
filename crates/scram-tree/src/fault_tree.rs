use indexmap::IndexMap;
use thiserror::Error;

use crate::event::{BasicEvent, ChildRef, Gate, HouseEvent};

/// Malformed input detected before any analysis work starts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidityError {
    #[error("duplicate definition for \"{id}\"")]
    DuplicateId { id: String },
    #[error("fault tree \"{tree}\" has no top gate")]
    EmptyTree { tree: String },
    #[error("gate \"{gate}\" references undefined child \"{child}\"")]
    UndefinedChild { gate: String, child: String },
    #[error("gate \"{gate}\": {connective} gate cannot have {arity} children")]
    ArityViolation {
        gate: String,
        connective: String,
        arity: usize,
    },
    #[error("basic event \"{event}\": probability {value} is outside [0, 1]")]
    InvalidProbability { event: String, value: f64 },
    #[error("cycle detected in fault tree: {}", path.join(" -> "))]
    CycleDetected { path: Vec<String> },
    #[error("invalid setting {name}: {reason}")]
    InvalidSetting {
        name: &'static str,
        reason: String,
    },
}

/// The fault-tree container.
///
/// Entities are stored in insertion order; the first gate added is the top
/// gate. The container is immutable during analysis; the analyzer only
/// reads it.
#[derive(Debug, Clone, PartialEq)]
pub struct FaultTree {
    name: String,
    gates: IndexMap<String, Gate>,
    basic_events: IndexMap<String, BasicEvent>,
    house_events: IndexMap<String, HouseEvent>,
}

impl FaultTree {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            gates: IndexMap::new(),
            basic_events: IndexMap::new(),
            house_events: IndexMap::new(),
        }
    }

    /// The name of this tree.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Adds a gate. The first gate added becomes the top gate.
    pub fn add_gate(&mut self, gate: Gate) -> Result<(), ValidityError> {
        if self.is_defined(&gate.id) {
            return Err(ValidityError::DuplicateId { id: gate.id });
        }
        self.gates.insert(gate.id.clone(), gate);
        Ok(())
    }

    pub fn add_basic_event(&mut self, event: BasicEvent) -> Result<(), ValidityError> {
        if self.is_defined(&event.id) {
            return Err(ValidityError::DuplicateId { id: event.id });
        }
        self.basic_events.insert(event.id.clone(), event);
        Ok(())
    }

    pub fn add_house_event(&mut self, event: HouseEvent) -> Result<(), ValidityError> {
        if self.is_defined(&event.id) {
            return Err(ValidityError::DuplicateId { id: event.id });
        }
        self.house_events.insert(event.id.clone(), event);
        Ok(())
    }

    fn is_defined(&self, id: &str) -> bool {
        self.gates.contains_key(id)
            || self.basic_events.contains_key(id)
            || self.house_events.contains_key(id)
    }

    /// The designated top gate, if any gate has been added.
    pub fn top_gate(&self) -> Option<&Gate> {
        self.gates.values().next()
    }

    pub fn gate(&self, id: &str) -> Option<&Gate> {
        self.gates.get(id)
    }

    pub fn basic_event(&self, id: &str) -> Option<&BasicEvent> {
        self.basic_events.get(id)
    }

    pub fn house_event(&self, id: &str) -> Option<&HouseEvent> {
        self.house_events.get(id)
    }

    /// Gates in insertion order, top gate first.
    pub fn gates(&self) -> impl Iterator<Item = &Gate> {
        self.gates.values()
    }

    /// Basic events in insertion order.
    pub fn basic_events(&self) -> impl Iterator<Item = &BasicEvent> {
        self.basic_events.values()
    }

    /// House events in insertion order.
    pub fn house_events(&self) -> impl Iterator<Item = &HouseEvent> {
        self.house_events.values()
    }

    pub fn num_gates(&self) -> usize {
        self.gates.len()
    }

    pub fn num_basic_events(&self) -> usize {
        self.basic_events.len()
    }

    pub fn num_house_events(&self) -> usize {
        self.house_events.len()
    }

    /// Validates the structure of this tree.
    ///
    /// Checks that a top gate exists, that every child reference resolves,
    /// connective arities, probability ranges, and that the gate graph is
    /// acyclic. Must be called at least once before analysis; the loader
    /// normally does, and the analyzer revalidates cheaply.
    pub fn validate(&self) -> Result<(), ValidityError> {
        if self.gates.is_empty() {
            return Err(ValidityError::EmptyTree {
                tree: self.name.clone(),
            });
        }

        for event in self.basic_events.values() {
            if !event.probability.is_finite()
                || event.probability < 0.0
                || event.probability > 1.0
            {
                return Err(ValidityError::InvalidProbability {
                    event: event.id.clone(),
                    value: event.probability,
                });
            }
        }

        for gate in self.gates.values() {
            if !gate.connective.valid_arity(gate.children.len()) {
                return Err(ValidityError::ArityViolation {
                    gate: gate.id.clone(),
                    connective: gate.connective.to_string(),
                    arity: gate.children.len(),
                });
            }
            for child in &gate.children {
                let resolved = match child {
                    ChildRef::Gate(id) => self.gates.contains_key(id),
                    ChildRef::Basic(id) => self.basic_events.contains_key(id),
                    ChildRef::House(id) => self.house_events.contains_key(id),
                };
                if !resolved {
                    return Err(ValidityError::UndefinedChild {
                        gate: gate.id.clone(),
                        child: child.id().to_string(),
                    });
                }
            }
        }

        self.detect_cycles()
    }

    /// Depth-first search over gate-to-gate edges with an explicit
    /// visitation state; a grey-on-grey edge is a cycle, reported with the
    /// path that closed it.
    fn detect_cycles(&self) -> Result<(), ValidityError> {
        #[derive(Clone, Copy, PartialEq)]
        enum Mark {
            White,
            Grey,
            Black,
        }

        let mut marks: IndexMap<&str, Mark> = self
            .gates
            .keys()
            .map(|id| (id.as_str(), Mark::White))
            .collect();

        fn visit<'a>(
            tree: &'a FaultTree,
            id: &'a str,
            marks: &mut IndexMap<&'a str, Mark>,
            path: &mut Vec<String>,
        ) -> Result<(), ValidityError> {
            match marks[id] {
                Mark::Black => return Ok(()),
                Mark::Grey => {
                    let start = path.iter().position(|p| p == id).unwrap_or(0);
                    let mut cycle: Vec<String> = path[start..].to_vec();
                    cycle.push(id.to_string());
                    return Err(ValidityError::CycleDetected { path: cycle });
                }
                Mark::White => {}
            }
            marks[id] = Mark::Grey;
            path.push(id.to_string());
            let gate = &tree.gates[id];
            for child in &gate.children {
                if let ChildRef::Gate(child_id) = child {
                    visit(tree, child_id.as_str(), marks, path)?;
                }
            }
            path.pop();
            marks[id] = Mark::Black;
            Ok(())
        }

        let ids: Vec<&str> = self.gates.keys().map(String::as_str).collect();
        let mut path = Vec::new();
        for id in ids {
            visit(self, id, &mut marks, &mut path)?;
        }
        Ok(())
    }
}
