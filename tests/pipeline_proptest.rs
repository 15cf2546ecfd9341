//! Property tests for candidate filtering and result ordering
//!
//! Run with: cargo test --test pipeline_proptest

use collective_linker::{
    gather, CandidateEntity, CandidateFilterPipeline, CollectiveDisambiguator,
    CollectiveDisambiguatorService, DisambiguatorConfig, FilterConfig, FilterKind,
    InMemoryCandidateSearcher, InMemoryKnowledgeGraph, SurfaceFormOccurrence,
};
use collective_linker::graph::Triple;
use proptest::prelude::*;
use std::collections::HashSet;
use std::sync::Arc;

const SURFACE_FORMS: [&str; 4] = ["Paris", "Seine", "France", "Lyon"];

type CandidateLists = Vec<Vec<(usize, u64, f64)>>;

fn arb_mentions() -> impl Strategy<Value = Vec<SurfaceFormOccurrence>> {
    prop::collection::vec((0usize..SURFACE_FORMS.len(), 0usize..100), 0..8).prop_map(|raw| {
        raw.into_iter()
            .map(|(form, offset)| SurfaceFormOccurrence::new(SURFACE_FORMS[form], "", offset))
            .collect()
    })
}

/// One candidate list per surface form; the last surface form is left out of
/// the index so lookups can miss
fn arb_candidate_lists() -> impl Strategy<Value = CandidateLists> {
    prop::collection::vec(
        prop::collection::vec((0usize..10, 0u64..1000, 0.0f64..1.0), 0..6),
        SURFACE_FORMS.len() - 1,
    )
}

fn arb_edges() -> impl Strategy<Value = Vec<(usize, usize)>> {
    prop::collection::vec((0usize..12, 0usize..12), 0..20)
}

fn arb_threshold() -> impl Strategy<Value = Option<i64>> {
    prop_oneof![Just(None), (-2i64..6).prop_map(Some), (0i64..1000).prop_map(Some)]
}

fn arb_order() -> impl Strategy<Value = Vec<FilterKind>> {
    Just(vec![
        FilterKind::MinSupport,
        FilterKind::BestKPrior,
        FilterKind::BestKSupport,
    ])
    .prop_shuffle()
}

fn searcher(lists: &CandidateLists) -> InMemoryCandidateSearcher {
    lists
        .iter()
        .enumerate()
        .fold(InMemoryCandidateSearcher::new(), |searcher, (form, list)| {
            let candidates = list
                .iter()
                .map(|&(entity, support, prior)| {
                    CandidateEntity::new(format!("e{}", entity), support, prior)
                })
                .collect();
            searcher.with_candidates(SURFACE_FORMS[form], candidates)
        })
}

fn knowledge_graph(edges: &[(usize, usize)]) -> InMemoryKnowledgeGraph {
    InMemoryKnowledgeGraph::from_triples(edges.iter().map(|&(s, o)| {
        Triple(format!("e{}", s), "linked".to_string(), format!("e{}", o))
    }))
}

fn is_subsequence(sub: &[CandidateEntity], full: &[CandidateEntity]) -> bool {
    let mut rest = full.iter();
    sub.iter().all(|c| rest.any(|f| f == c))
}

/// Positions in `full` of the candidates in `sub`, matched in order
fn kept_positions(sub: &[CandidateEntity], full: &[CandidateEntity]) -> Vec<usize> {
    let mut positions = Vec::with_capacity(sub.len());
    let mut next = 0;
    for candidate in sub {
        if let Some(offset) = full[next..].iter().position(|f| f == candidate) {
            positions.push(next + offset);
            next += offset + 1;
        }
    }
    positions
}

proptest! {
    /// Filtering never adds, removes or reorders mentions, and only keeps a
    /// subsequence of each candidate list.
    #[test]
    fn filters_preserve_shape(
        mentions in arb_mentions(),
        lists in arb_candidate_lists(),
        min_support in arb_threshold(),
        best_k_support in arb_threshold(),
        best_k_prior in arb_threshold(),
        order in arb_order(),
    ) {
        let gathered = gather(&mentions, &searcher(&lists)).unwrap();
        let pipeline = CandidateFilterPipeline::from_config(&FilterConfig {
            min_support,
            best_k_support,
            best_k_prior,
            order,
        });
        let filtered = pipeline.apply(&gathered);

        let before: Vec<_> = gathered.mentions().cloned().collect();
        let after: Vec<_> = filtered.mentions().cloned().collect();
        prop_assert_eq!(before, after);

        for entry in filtered.iter() {
            let original = gathered.get(&entry.occurrence).unwrap();
            prop_assert!(is_subsequence(&entry.candidates, original));
        }
    }

    /// Every survivor of min-support meets the threshold and nothing that
    /// meets it is dropped.
    #[test]
    fn min_support_is_exact(
        mentions in arb_mentions(),
        lists in arb_candidate_lists(),
        threshold in 1i64..1000,
    ) {
        let gathered = gather(&mentions, &searcher(&lists)).unwrap();
        let pipeline = CandidateFilterPipeline::from_config(&FilterConfig {
            min_support: Some(threshold),
            ..Default::default()
        });
        let filtered = pipeline.apply(&gathered);

        for entry in filtered.iter() {
            let expected: Vec<_> = gathered
                .get(&entry.occurrence)
                .unwrap()
                .iter()
                .filter(|c| c.support >= threshold as u64)
                .cloned()
                .collect();
            prop_assert_eq!(&entry.candidates, &expected);
        }
    }

    /// Best-k stages leave at most k candidates per mention, every kept
    /// candidate ranks at least as high as every dropped one, and equal
    /// ranks go to the candidate looked up first.
    #[test]
    fn best_k_keeps_highest_ranked(
        mentions in arb_mentions(),
        lists in arb_candidate_lists(),
        k in 1i64..4,
        by_prior in any::<bool>(),
    ) {
        let gathered = gather(&mentions, &searcher(&lists)).unwrap();
        let config = if by_prior {
            FilterConfig { best_k_prior: Some(k), ..Default::default() }
        } else {
            FilterConfig { best_k_support: Some(k), ..Default::default() }
        };
        let filtered = CandidateFilterPipeline::from_config(&config).apply(&gathered);
        let rank = |c: &CandidateEntity| if by_prior { c.prior } else { c.support as f64 };

        for entry in filtered.iter() {
            let original = gathered.get(&entry.occurrence).unwrap();
            prop_assert_eq!(entry.candidates.len(), original.len().min(k as usize));

            let kept = kept_positions(&entry.candidates, original);
            prop_assert_eq!(kept.len(), entry.candidates.len());

            for (i, candidate) in original.iter().enumerate() {
                if kept.contains(&i) {
                    continue;
                }
                for &j in &kept {
                    let (kept_rank, dropped_rank) = (rank(&original[j]), rank(candidate));
                    prop_assert!(kept_rank >= dropped_rank);
                    if kept_rank == dropped_rank {
                        prop_assert!(j < i, "tie must go to the earlier lookup result");
                    }
                }
            }
        }
    }

    /// Tables cover every distinct mention in offset order, with at most k
    /// resolutions per mention in descending score order, each drawn from
    /// that mention's candidates.
    #[test]
    fn resolve_orders_results(
        mentions in arb_mentions(),
        lists in arb_candidate_lists(),
        edges in arb_edges(),
        k in 1usize..4,
    ) {
        let searcher = searcher(&lists);
        let service = CollectiveDisambiguatorService::from_config(
            &DisambiguatorConfig::default(),
            Arc::new(searcher.clone()),
            Arc::new(knowledge_graph(&edges)),
        )
        .unwrap();

        let table = service.resolve(&mentions, k).unwrap();

        let distinct: HashSet<_> = mentions.iter().cloned().collect();
        prop_assert_eq!(table.len(), distinct.len());

        let offsets: Vec<_> = table.mentions().map(|m| m.text_offset()).collect();
        prop_assert!(offsets.windows(2).all(|w| w[0] <= w[1]));

        let gathered = gather(&mentions, &searcher).unwrap();
        for entry in table.iter() {
            prop_assert!(entry.resolutions.len() <= k);
            prop_assert!(entry.resolutions.windows(2).all(|w| w[0].score >= w[1].score));

            let candidates = gathered.get(&entry.occurrence).unwrap();
            for resolution in &entry.resolutions {
                prop_assert_eq!(&resolution.occurrence, &entry.occurrence);
                prop_assert!(candidates.contains(&resolution.entity));
            }
        }
    }
}
