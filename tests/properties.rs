//! Property tests for the calculation engines.

use proptest::prelude::{prop_assert, prop_assert_eq, proptest};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use pl_tax_engine::calculation::{
    SEARCH_TOLERANCE, calculate_employment_net, calculate_ryczalt, compare_all_forms,
    compare_spzoo_scenarios, find_spzoo_threshold,
};
use pl_tax_engine::config::RateTable;
use pl_tax_engine::models::{
    CalculationInput, CitRate, ContributionBase, SpzooCalculationInput, ThresholdSearch,
};

const SELECTORS: [ContributionBase; 5] = [
    ContributionBase::Standard,
    ContributionBase::ReducedNewEntrant,
    ContributionBase::IncomeScaled,
    ContributionBase::StartupRelief,
    ContributionBase::NotApplicable,
];

fn company_monthly_net(revenue: Decimal, costs: Decimal, table: &RateTable) -> Decimal {
    let input = SpzooCalculationInput::new(revenue, costs, CitRate::Small);
    compare_spzoo_scenarios(&input, table)
        .map(|comparison| comparison.best_net_amount / dec!(12))
        .unwrap_or_default()
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(64))]

    #[test]
    fn prop_ryczalt_tax_ignores_costs(
        revenue in 1u32..200_000,
        costs_a in 0u32..100_000,
        costs_b in 0u32..100_000,
    ) {
        let table = RateTable::pl_2025();
        let cheap = CalculationInput::new(Decimal::from(revenue), Decimal::from(costs_a));
        let costly = CalculationInput::new(Decimal::from(revenue), Decimal::from(costs_b));

        let cheap = calculate_ryczalt(&cheap, &table).unwrap();
        let costly = calculate_ryczalt(&costly, &table).unwrap();
        prop_assert_eq!(cheap.yearly.tax, costly.yearly.tax);
        prop_assert_eq!(cheap.yearly.total_burden, costly.yearly.total_burden);
    }

    #[test]
    fn prop_best_regime_has_lowest_burden(
        revenue in 1u32..150_000,
        costs in 0u32..50_000,
        selector in 0usize..5,
        pays_sickness in proptest::bool::ANY,
    ) {
        let table = RateTable::pl_2025();
        let input = CalculationInput::new(Decimal::from(revenue), Decimal::from(costs))
            .with_contribution_base(SELECTORS[selector])
            .with_sickness(pays_sickness);

        let comparison = compare_all_forms(&input, &table).unwrap();
        let best_burden = comparison.best_result().unwrap().yearly.total_burden;
        for (form, result) in &comparison.results {
            prop_assert!(best_burden <= result.yearly.total_burden);
            prop_assert_eq!(
                comparison.savings[form],
                result.yearly.total_burden - best_burden
            );
        }
    }

    #[test]
    fn prop_comparison_is_deterministic(revenue in 1u32..150_000, costs in 0u32..50_000) {
        let table = RateTable::pl_2025();
        let input = CalculationInput::new(Decimal::from(revenue), Decimal::from(costs));

        prop_assert_eq!(compare_all_forms(&input, &table), compare_all_forms(&input, &table));
    }

    #[test]
    fn prop_monthly_figures_scale_to_yearly(revenue in 1u32..150_000, costs in 0u32..50_000) {
        let table = RateTable::pl_2025();
        let input = CalculationInput::new(Decimal::from(revenue), Decimal::from(costs));

        let comparison = compare_all_forms(&input, &table).unwrap();
        for result in comparison.results.values() {
            let drift = (result.monthly.total_burden * dec!(12) - result.yearly.total_burden).abs();
            prop_assert!(drift <= dec!(0.12), "drift {} for {:?}", drift, result.tax_form);
        }
    }

    #[test]
    fn prop_company_owner_net_is_never_negative(revenue in 1u32..150_000, costs in 0u32..150_000) {
        let table = RateTable::pl_2025();
        let input = SpzooCalculationInput::new(Decimal::from(revenue), Decimal::from(costs), CitRate::Small);

        let comparison = compare_spzoo_scenarios(&input, &table).unwrap();
        for result in comparison.results.values() {
            prop_assert!(result.yearly.owner_total_net >= Decimal::ZERO);
            prop_assert!(result.yearly.owner_total_net <= comparison.best_net_amount);
        }
    }

    #[test]
    fn prop_employment_net_below_gross(gross in 0u32..60_000) {
        let table = RateTable::pl_2025();
        let gross = Decimal::from(gross);

        let net = calculate_employment_net(gross, &table);
        prop_assert!(net >= Decimal::ZERO);
        prop_assert!(net <= gross);
    }
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(16))]

    #[test]
    fn prop_threshold_brackets_target(target in 1_000u32..30_000, costs in 0u32..5_000) {
        let table = RateTable::pl_2025();
        let target = Decimal::from(target);
        let costs = Decimal::from(costs);

        match find_spzoo_threshold(target, costs, CitRate::Small, &table) {
            ThresholdSearch::Found { monthly_revenue, .. } => {
                prop_assert!(company_monthly_net(monthly_revenue - SEARCH_TOLERANCE, costs, &table) < target);
                prop_assert!(company_monthly_net(monthly_revenue + SEARCH_TOLERANCE, costs, &table) >= target);
            }
            ThresholdSearch::AlreadyMet { lower_bound } => {
                prop_assert!(company_monthly_net(lower_bound, costs, &table) >= target);
            }
            other => prop_assert!(false, "unexpected search outcome {:?}", other),
        }
    }
}
