#![forbid(unsafe_code)]

use std::collections::BTreeSet;

use crate::hazard::HazardKind;
use crate::strategy::Strategy;

/// Selects and ranks mitigation strategies for the preselected
/// hazards and business type.
///
/// A strategy is a candidate when it addresses at least one
/// preselected hazard and is recommended for the business type (an
/// empty recommendation set applies to all). Candidates are
/// deduplicated by id and ranked by tier descending, effectiveness
/// descending, then id ascending. The list is not truncated; display
/// limits belong to the caller.
pub fn match_strategies(
    catalog: &[Strategy],
    preselected: &BTreeSet<HazardKind>,
    business_type_id: &str,
) -> Vec<Strategy> {
    let mut seen = BTreeSet::new();
    let mut matched: Vec<Strategy> = catalog
        .iter()
        .filter(|s| s.applicable_hazards.iter().any(|h| preselected.contains(h)))
        .filter(|s| s.recommended_for(business_type_id))
        .filter(|s| seen.insert(s.id.clone()))
        .cloned()
        .collect();

    matched.sort_by(|a, b| {
        b.tier
            .cmp(&a.tier)
            .then_with(|| b.effectiveness.total_cmp(&a.effectiveness))
            .then_with(|| a.id.cmp(&b.id))
    });
    matched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::PriorityTier;

    fn strategy(
        id: &str,
        hazards: &[HazardKind],
        tier: PriorityTier,
        effectiveness: f64,
    ) -> Strategy {
        Strategy {
            id: id.into(),
            name: id.into(),
            description: None,
            applicable_hazards: hazards.iter().copied().collect(),
            recommended_business_types: BTreeSet::new(),
            tier,
            effectiveness,
        }
    }

    #[test]
    fn test_tier_dominates_effectiveness() {
        let catalog = vec![
            strategy("flood-barriers", &[HazardKind::Hurricane], PriorityTier::High, 8.0),
            strategy("storm-shutters", &[HazardKind::Hurricane], PriorityTier::Critical, 6.0),
        ];
        let preselected = BTreeSet::from([HazardKind::Hurricane]);
        let ranked = match_strategies(&catalog, &preselected, "bakery");
        assert_eq!(ranked[0].id, "storm-shutters");
        assert_eq!(ranked[1].id, "flood-barriers");
    }

    #[test]
    fn test_effectiveness_then_id_break_ties() {
        let catalog = vec![
            strategy("b-plan", &[HazardKind::Flood], PriorityTier::High, 7.0),
            strategy("a-plan", &[HazardKind::Flood], PriorityTier::High, 7.0),
            strategy("c-plan", &[HazardKind::Flood], PriorityTier::High, 9.0),
        ];
        let preselected = BTreeSet::from([HazardKind::Flood]);
        let ranked = match_strategies(&catalog, &preselected, "any");
        let ids: Vec<&str> = ranked.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["c-plan", "a-plan", "b-plan"]);
    }

    #[test]
    fn test_strategy_addressing_multiple_hazards_appears_once() {
        let catalog = vec![strategy(
            "generator",
            &[HazardKind::Hurricane, HazardKind::PowerOutage],
            PriorityTier::High,
            8.0,
        )];
        let preselected = BTreeSet::from([HazardKind::Hurricane, HazardKind::PowerOutage]);
        let ranked = match_strategies(&catalog, &preselected, "any");
        assert_eq!(ranked.len(), 1);
    }

    #[test]
    fn test_business_type_filter() {
        let mut scoped = strategy("walk-in", &[HazardKind::PowerOutage], PriorityTier::Medium, 5.0);
        scoped.recommended_business_types = BTreeSet::from(["restaurant".to_string()]);
        let open = strategy("generator", &[HazardKind::PowerOutage], PriorityTier::Low, 4.0);
        let catalog = vec![scoped, open];
        let preselected = BTreeSet::from([HazardKind::PowerOutage]);

        let for_restaurant = match_strategies(&catalog, &preselected, "restaurant");
        assert_eq!(for_restaurant.len(), 2);

        // Unknown business types still get open catalogue items.
        let for_unknown = match_strategies(&catalog, &preselected, "observatory");
        assert_eq!(for_unknown.len(), 1);
        assert_eq!(for_unknown[0].id, "generator");
    }

    #[test]
    fn test_empty_preselection_yields_empty_list() {
        let catalog = vec![strategy("anything", &[HazardKind::Fire], PriorityTier::High, 5.0)];
        let ranked = match_strategies(&catalog, &BTreeSet::new(), "any");
        assert!(ranked.is_empty());
    }
}
