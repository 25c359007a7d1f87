use std::collections::HashSet;

use crate::models::{normalize_item_id, RecommendationResult};

/// Merges per-seed result lists into one deduplicated list of at most `top_k` items.
///
/// Lists are walked in seed order and each list in its own ranking order. An
/// entry is dropped when its identifier is blank, names one of the chosen seeds,
/// or was already emitted; the first occurrence wins whatever the scores. No
/// re-ranking happens, and nothing past the `top_k`-th emitted entry is looked at.
pub fn merge_seed_results(
    per_seed: &[RecommendationResult],
    chosen: &[String],
    top_k: usize,
) -> RecommendationResult {
    let chosen: HashSet<String> = chosen.iter().map(|item| normalize_item_id(item)).collect();
    let mut seen: HashSet<String> = HashSet::new();
    let mut merged = Vec::with_capacity(top_k);

    if top_k == 0 {
        return merged;
    }

    for entry in per_seed.iter().flatten() {
        let key = normalize_item_id(&entry.item);
        if key.is_empty() || chosen.contains(&key) || !seen.insert(key) {
            continue;
        }

        merged.push(entry.clone());
        if merged.len() >= top_k {
            break;
        }
    }

    tracing::debug!(
        seeds = per_seed.len(),
        candidates = per_seed.iter().map(Vec::len).sum::<usize>(),
        merged = merged.len(),
        top_k = top_k,
        "Merged item-based recommendations"
    );

    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RecommendedItem;

    fn item_ids(results: &[RecommendedItem]) -> Vec<&str> {
        results.iter().map(|entry| entry.item.as_str()).collect()
    }

    fn sources() -> Vec<RecommendationResult> {
        vec![
            vec![
                RecommendedItem::scored("x", 0.9),
                RecommendedItem::scored("y", 0.5),
            ],
            vec![
                RecommendedItem::scored("y", 0.8),
                RecommendedItem::scored("z", 0.4),
            ],
        ]
    }

    #[test]
    fn test_first_occurrence_wins() {
        let merged = merge_seed_results(&sources(), &[], 10);

        assert_eq!(item_ids(&merged), vec!["x", "y", "z"]);
        assert_eq!(merged[1].score, Some(0.5));
    }

    #[test]
    fn test_chosen_items_are_excluded() {
        let merged = merge_seed_results(&sources(), &["x".to_string()], 10);
        assert_eq!(item_ids(&merged), vec!["y", "z"]);
    }

    #[test]
    fn test_chosen_matching_ignores_case_and_whitespace() {
        let merged = merge_seed_results(&sources(), &[" X ".to_string()], 10);
        assert_eq!(item_ids(&merged), vec!["y", "z"]);
    }

    #[test]
    fn test_cap_applies() {
        let merged = merge_seed_results(&sources(), &[], 1);
        assert_eq!(item_ids(&merged), vec!["x"]);

        assert!(merge_seed_results(&sources(), &[], 0).is_empty());
    }

    #[test]
    fn test_blank_and_case_variant_duplicates_are_skipped() {
        let per_seed = vec![vec![
            RecommendedItem::scored("  ", 0.99),
            RecommendedItem::scored("Soda", 0.7),
            RecommendedItem::scored("soda ", 0.6),
            RecommendedItem::bare("butter"),
        ]];

        let merged = merge_seed_results(&per_seed, &[], 10);
        assert_eq!(item_ids(&merged), vec!["Soda", "butter"]);
    }

    #[test]
    fn test_failed_seed_contributes_nothing() {
        let per_seed = vec![
            vec![RecommendedItem::scored("x", 0.9)],
            Vec::new(),
            vec![RecommendedItem::scored("z", 0.4)],
        ];

        let merged = merge_seed_results(&per_seed, &[], 10);
        assert_eq!(item_ids(&merged), vec!["x", "z"]);
    }

    #[test]
    fn test_no_seeds() {
        assert!(merge_seed_results(&[], &[], 5).is_empty());
    }
}
