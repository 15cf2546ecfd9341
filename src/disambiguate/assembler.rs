//! Result assembly
//!
//! Orders strategy output deterministically: mentions by ascending text
//! offset (downstream consumers align results back onto the document by
//! offset), resolutions by descending score. Both sorts are stable, so equal
//! offsets keep their incoming order and equal scores keep the order the
//! scoring strategy returned. Scores are never changed and nothing is
//! dropped.

use mention_types::{ScoredResolution, SurfaceFormOccurrence};
use std::collections::HashMap;

use super::result::{ResultEntry, ResultTable};

/// Build an ordered [`ResultTable`] from unordered rows.
///
/// Rows for the same mention are merged, in row order.
pub fn assemble(rows: Vec<(SurfaceFormOccurrence, Vec<ScoredResolution>)>) -> ResultTable {
    let mut entries: Vec<ResultEntry> = Vec::with_capacity(rows.len());
    let mut positions: HashMap<SurfaceFormOccurrence, usize> = HashMap::new();

    for (occurrence, resolutions) in rows {
        match positions.get(&occurrence) {
            Some(&pos) => entries[pos].resolutions.extend(resolutions),
            None => {
                positions.insert(occurrence.clone(), entries.len());
                entries.push(ResultEntry {
                    occurrence,
                    resolutions,
                });
            }
        }
    }

    entries.sort_by_key(|e| e.occurrence.text_offset());
    for entry in &mut entries {
        entry
            .resolutions
            .sort_by(|a, b| b.score.total_cmp(&a.score));
    }

    ResultTable::from_sorted(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mention_types::CandidateEntity;

    fn resolution(occurrence: &SurfaceFormOccurrence, uri: &str, score: f64) -> ScoredResolution {
        ScoredResolution::new(occurrence.clone(), CandidateEntity::new(uri, 1, 0.0), score)
    }

    #[test]
    fn test_orders_mentions_and_scores() {
        let late = SurfaceFormOccurrence::new("Bonn", "", 40);
        let early = SurfaceFormOccurrence::new("Berlin", "", 3);

        let table = assemble(vec![
            (
                late.clone(),
                vec![
                    resolution(&late, "Bonn_low", 0.1),
                    resolution(&late, "Bonn_high", 0.9),
                ],
            ),
            (early.clone(), vec![]),
        ]);

        let mentions: Vec<_> = table.mentions().cloned().collect();
        assert_eq!(mentions, vec![early.clone(), late.clone()]);
        let uris: Vec<_> = table
            .get(&late)
            .unwrap()
            .iter()
            .map(|r| r.entity.uri.as_str())
            .collect();
        assert_eq!(uris, vec!["Bonn_high", "Bonn_low"]);
        assert!(table.get(&early).unwrap().is_empty());
    }

    #[test]
    fn test_equal_scores_keep_strategy_order() {
        let m = SurfaceFormOccurrence::new("Java", "", 0);
        let table = assemble(vec![(
            m.clone(),
            vec![
                resolution(&m, "first", 0.5),
                resolution(&m, "second", 0.5),
                resolution(&m, "third", 0.7),
            ],
        )]);

        let uris: Vec<_> = table
            .get(&m)
            .unwrap()
            .iter()
            .map(|r| r.entity.uri.as_str())
            .collect();
        assert_eq!(uris, vec!["third", "first", "second"]);
    }

    #[test]
    fn test_equal_offsets_keep_incoming_order() {
        let a = SurfaceFormOccurrence::new("New York", "", 7);
        let b = SurfaceFormOccurrence::new("York", "", 7);
        let table = assemble(vec![(a.clone(), vec![]), (b.clone(), vec![])]);

        let mentions: Vec<_> = table.mentions().cloned().collect();
        assert_eq!(mentions, vec![a, b]);
    }

    #[test]
    fn test_duplicate_rows_merge() {
        let m = SurfaceFormOccurrence::new("Rome", "", 1);
        let table = assemble(vec![
            (m.clone(), vec![resolution(&m, "Rome", 0.2)]),
            (m.clone(), vec![resolution(&m, "Rome,_Georgia", 0.4)]),
        ]);

        assert_eq!(table.len(), 1);
        assert_eq!(table.total_resolutions(), 2);
        assert_eq!(table.get(&m).unwrap()[0].entity.uri, "Rome,_Georgia");
    }
}
