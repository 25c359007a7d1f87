use std::collections::HashSet;

use crate::{data::Rule, models::normalize_item_id};

/// Every item that appears in some rule's antecedent
///
/// Built once from the full rule set. Membership ignores case and
/// surrounding whitespace.
#[derive(Debug, Clone, Default)]
pub struct RuleCoverageIndex {
    items: HashSet<String>,
}

impl RuleCoverageIndex {
    pub fn build(rules: &[Rule]) -> Self {
        let items: HashSet<String> = rules
            .iter()
            .flat_map(|rule| rule.antecedent.items())
            .map(|item| normalize_item_id(item))
            .filter(|item| !item.is_empty())
            .collect();

        tracing::debug!(rules = rules.len(), covered = items.len(), "Built rule coverage index");

        Self { items }
    }

    pub fn covers(&self, item_id: &str) -> bool {
        self.items.contains(&normalize_item_id(item_id))
    }

    /// The subset of `items` usable as rule-based seeds, order preserved
    pub fn eligible_items(&self, items: &[String]) -> Vec<String> {
        items.iter().filter(|item| self.covers(item)).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> RuleCoverageIndex {
        RuleCoverageIndex::build(&[
            Rule::new("['Whole Milk', ' butter ']"),
            Rule::new("Widget "),
            Rule::new("['broken', list"),
            Rule::new("[]"),
        ])
    }

    #[test]
    fn test_collection_members_are_covered() {
        let index = index();
        assert!(index.covers("whole milk"));
        assert!(index.covers("butter"));
    }

    #[test]
    fn test_scalar_antecedent_is_covered() {
        let index = index();
        assert!(index.covers("widget"));
    }

    #[test]
    fn test_covers_ignores_case_and_whitespace() {
        let index = index();
        assert_eq!(index.covers("Widget "), index.covers("widget"));
        assert!(index.covers("  WHOLE MILK"));
    }

    #[test]
    fn test_malformed_antecedent_covers_itself() {
        let index = index();
        assert!(index.covers("['broken', list"));
        assert!(!index.covers("broken"));
        assert_eq!(index.len(), 4);
    }

    #[test]
    fn test_eligible_items_preserve_order() {
        let index = index();
        let items = vec![
            "soda".to_string(),
            "Butter".to_string(),
            "whole milk".to_string(),
        ];

        assert_eq!(index.eligible_items(&items), vec!["Butter", "whole milk"]);
    }

    #[test]
    fn test_quoted_scalar_covers_raw_text() {
        let index = RuleCoverageIndex::build(&[Rule::new(" 'Milk' ")]);

        assert!(index.covers("'milk'"));
        assert!(!index.covers("milk"));
    }

    #[test]
    fn test_empty_rules() {
        let index = RuleCoverageIndex::build(&[]);
        assert!(index.is_empty());
        assert!(!index.covers("anything"));
    }
}
