//! Per-event failure contributions.

use std::collections::BTreeSet;

use scram_tree::TreeIndex;

use crate::result::ImportanceRecord;

/// Sums, for every basic event, the probabilities of the minimal cut sets
/// containing its positive and its negative literal. Events without any
/// contribution are omitted; the rest are emitted in indexer order.
///
/// `per_mcs` is parallel to `mcs`.
pub fn importance(
    index: &TreeIndex,
    mcs: &[BTreeSet<i32>],
    per_mcs: &[f64],
) -> Vec<ImportanceRecord> {
    debug_assert_eq!(mcs.len(), per_mcs.len());
    let mut records = Vec::new();
    for event in 1..=index.num_basic_events() as i32 {
        let mut positive = 0.0;
        let mut negative = 0.0;
        for (cut_set, &p) in mcs.iter().zip(per_mcs) {
            if cut_set.contains(&event) {
                positive += p;
            } else if cut_set.contains(&-event) {
                negative += p;
            }
        }
        if positive > 0.0 || negative > 0.0 {
            records.push(ImportanceRecord {
                event: index
                    .basic_id(event)
                    .expect("index covers 1..=B")
                    .to_string(),
                positive,
                negative,
            });
        }
    }
    records
}
