use std::fmt;

/// An independent random Boolean leaf with a fixed failure probability.
#[derive(Debug, Clone, PartialEq)]
pub struct BasicEvent {
    /// Stable identifier, unique across the whole model.
    pub id: String,
    /// Display name used in reports and graphs.
    pub name: String,
    /// Probability of the event being true, in [0, 1].
    pub probability: f64,
}

impl BasicEvent {
    pub fn new(id: impl Into<String>, name: impl Into<String>, probability: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            probability,
        }
    }
}

/// A Boolean constant leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HouseEvent {
    /// Stable identifier, unique across the whole model.
    pub id: String,
    /// Display name used in reports and graphs.
    pub name: String,
    /// The constant value of this event.
    pub state: bool,
}

impl HouseEvent {
    pub fn new(id: impl Into<String>, name: impl Into<String>, state: bool) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            state,
        }
    }
}

/// Logical connective of a gate.
///
/// Negation of a whole gate is expressed through the signed-index machinery
/// of the analysis engine, never through the model itself; the connective of
/// a negated gate is replaced by its De Morgan dual during expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connective {
    And,
    Or,
    Not,
    Nor,
    Nand,
    Xor,
    /// Pass-through gate with a single child.
    Null,
    /// AND of a condition and an enabling event; exactly two children.
    Inhibit,
    /// True when at least `k` of the children are true.
    AtLeast(usize),
}

impl Connective {
    /// Whether `arity` children are acceptable for this connective.
    pub fn valid_arity(&self, arity: usize) -> bool {
        match self {
            Connective::And | Connective::Or | Connective::Nor | Connective::Nand => arity >= 2,
            Connective::Not | Connective::Null => arity == 1,
            Connective::Xor | Connective::Inhibit => arity == 2,
            Connective::AtLeast(k) => *k >= 2 && arity >= *k,
        }
    }
}

impl fmt::Display for Connective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Connective::And => write!(f, "and"),
            Connective::Or => write!(f, "or"),
            Connective::Not => write!(f, "not"),
            Connective::Nor => write!(f, "nor"),
            Connective::Nand => write!(f, "nand"),
            Connective::Xor => write!(f, "xor"),
            Connective::Null => write!(f, "null"),
            Connective::Inhibit => write!(f, "inhibit"),
            Connective::AtLeast(k) => write!(f, "atleast({k})"),
        }
    }
}

/// Reference from a gate to one of its children.
///
/// A tagged variant is sufficient for the shared DAG: the same gate or event
/// may be referenced by many parents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChildRef {
    Gate(String),
    Basic(String),
    House(String),
}

impl ChildRef {
    /// The identifier of the referenced entity.
    pub fn id(&self) -> &str {
        match self {
            ChildRef::Gate(id) | ChildRef::Basic(id) | ChildRef::House(id) => id,
        }
    }
}

/// An internal node combining children through a connective.
///
/// Children keep their declaration order; every downstream ordering
/// guarantee of the analysis derives from it.
#[derive(Debug, Clone, PartialEq)]
pub struct Gate {
    /// Stable identifier, unique across the whole model.
    pub id: String,
    /// Display name used in reports and graphs.
    pub name: String,
    pub connective: Connective,
    pub children: Vec<ChildRef>,
}

impl Gate {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        connective: Connective,
        children: Vec<ChildRef>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            connective,
            children,
        }
    }
}
