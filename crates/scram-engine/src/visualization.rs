//! DOT graphing instructions for a fault tree.
//!
//! One `digraph` per tree. The top gate renders as an ellipse and every
//! other gate as a box, labelled with the upper-case connective (ATLEAST
//! additionally shows its k/m ratio). Primary events are replicated per
//! parent edge with `_R<n>` suffixes so repetition across the shared DAG
//! stays visible.

use indexmap::IndexMap;

use scram_tree::{ChildRef, Connective, FaultTree, Gate};

fn gate_color(connective: &Connective) -> &'static str {
    match connective {
        Connective::Or => "blue",
        Connective::And => "green",
        Connective::Not => "red",
        Connective::Xor => "brown",
        Connective::Inhibit => "yellow",
        Connective::AtLeast(_) => "cyan",
        Connective::Null => "gray",
        Connective::Nor => "magenta",
        Connective::Nand => "orange",
    }
}

fn gate_label(gate: &Gate) -> String {
    match gate.connective {
        Connective::AtLeast(k) => {
            format!("ATLEAST {k}/{}", gate.children.len())
        }
        _ => gate.connective.to_string().to_uppercase(),
    }
}

/// Renders the graphing instructions. Pure formatting; the caller owns all
/// I/O and error handling at the boundary.
pub fn render_dot(tree: &FaultTree) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "digraph \"{}\" {{\n",
        tree.name().to_uppercase()
    ));

    // Edges first, replicating primary events per repetition.
    let mut repeats: IndexMap<&str, usize> = IndexMap::new();
    for gate in tree.gates() {
        for child in &gate.children {
            match child {
                ChildRef::Gate(id) => {
                    out.push_str(&format!("\"{}\" -> \"{}\";\n", gate.name, tree_gate_name(tree, id)));
                }
                ChildRef::Basic(id) | ChildRef::House(id) => {
                    let replica = repeats.entry(id.as_str()).and_modify(|r| *r += 1).or_insert(0);
                    out.push_str(&format!(
                        "\"{}\" -> \"{}_R{}\";\n",
                        gate.name,
                        primary_name(tree, id),
                        replica
                    ));
                }
            }
        }
    }

    // Gate nodes: the top gate is an ellipse, the rest are boxes.
    for (i, gate) in tree.gates().enumerate() {
        let (shape, fontsize) = if i == 0 {
            ("ellipse", 12)
        } else {
            ("box", 11)
        };
        out.push_str(&format!(
            "\"{}\" [shape={shape}, fontsize={fontsize}, fontcolor=black, \
             color={}, label=\"{}\\n{{ {} }}\"]\n",
            gate.name,
            gate_color(&gate.connective),
            gate.name,
            gate_label(gate)
        ));
    }

    // Primary-event replicas.
    for (id, &max_replica) in &repeats {
        for replica in 0..=max_replica {
            if let Some(event) = tree.basic_event(id) {
                out.push_str(&format!(
                    "\"{}_R{replica}\" [shape=circle, height=1, fontsize=10, \
                     fixedsize=true, fontcolor=black, label=\"{}\\n[basic]\\n{}\"]\n",
                    event.name, event.name, event.probability
                ));
            } else if let Some(event) = tree.house_event(id) {
                out.push_str(&format!(
                    "\"{}_R{replica}\" [shape=circle, height=1, fontsize=10, \
                     fixedsize=true, fontcolor=green, label=\"{}\\n[house]\\n{}\"]\n",
                    event.name, event.name, event.state
                ));
            }
        }
    }

    out.push('}');
    out
}

fn tree_gate_name<'a>(tree: &'a FaultTree, id: &'a str) -> &'a str {
    tree.gate(id).map(|g| g.name.as_str()).unwrap_or(id)
}

fn primary_name<'a>(tree: &'a FaultTree, id: &'a str) -> &'a str {
    tree.basic_event(id)
        .map(|e| e.name.as_str())
        .or_else(|| tree.house_event(id).map(|e| e.name.as_str()))
        .unwrap_or(id)
}
