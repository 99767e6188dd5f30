// Property-based tests for aggregation, projection and forecasting.
// CI: 256 cases (default). Soak: PROPTEST_CASES=10000 cargo test --release

use std::collections::BTreeSet;

use budget_forecast::models::{
    CategoryId, CategoryKey, CategoryTarget, Money, MonthCalendar, MonthKey, MonthTotal,
    MonthlyForecast, ProjectedCategory, ScheduledTransaction, SeriesDensity, Simulation,
    Transaction,
};
use budget_forecast::services::{
    BalanceProjector, CategoryUsageAggregator, DailySpendingProjector, ForecastEngine,
    MonthSummaryAggregator,
};
use chrono::NaiveDate;
use proptest::prelude::*;

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: std::env::var("PROPTEST_CASES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(256),
        failure_persistence: None,
        ..ProptestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Generators
// ---------------------------------------------------------------------------

fn arb_category() -> impl Strategy<Value = Option<CategoryId>> {
    prop_oneof![
        1 => Just(None),
        3 => prop::sample::select(vec!["groceries", "rent", "fun", "Groceries"])
            .prop_map(|id| Some(CategoryId::new(id).unwrap())),
    ]
}

fn arb_transaction_in(year: i32, month: u32) -> impl Strategy<Value = Transaction> {
    let days = MonthKey::new(year, month).unwrap().days_in_month();
    (1..=days, -500_000i64..500_000, arb_category()).prop_map(move |(day, amount, category)| {
        Transaction::new(
            NaiveDate::from_ymd_opt(year, month, day).unwrap(),
            Money::from_cents(amount),
            category,
        )
    })
}

fn arb_transaction() -> impl Strategy<Value = Transaction> {
    (2023i32..=2025, 1u32..=12).prop_flat_map(|(year, month)| arb_transaction_in(year, month))
}

fn arb_calendar() -> impl Strategy<Value = MonthCalendar> {
    (0u32..=31, 0u32..=40, any::<bool>())
        .prop_map(|(days, day, current)| MonthCalendar::new(days, day, current))
}

fn arb_total() -> impl Strategy<Value = MonthTotal> {
    (-1_000_000i64..1_000_000, -1_000_000i64..1_000_000)
        .prop_map(|(budgeted, activity)| MonthTotal::new(Money::from_cents(budgeted), Money::from_cents(activity)))
}

fn sum(transactions: &[Transaction]) -> Money {
    transactions.iter().map(|t| t.amount).sum()
}

// ---------------------------------------------------------------------------
// Month summaries
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(config())]

    #[test]
    fn one_summary_per_distinct_month(transactions in prop::collection::vec(arb_transaction(), 0..60)) {
        let summaries = MonthSummaryAggregator::new(MonthKey::new(2024, 6).unwrap()).aggregate(&transactions);

        let distinct: BTreeSet<MonthKey> = transactions.iter().map(|t| t.month()).collect();
        let months: BTreeSet<MonthKey> = summaries.months().collect();
        prop_assert_eq!(months, distinct);
    }

    #[test]
    fn usage_totals_match_transactions(transactions in prop::collection::vec(arb_transaction(), 0..60)) {
        let summaries = MonthSummaryAggregator::new(MonthKey::new(2024, 6).unwrap()).aggregate(&transactions);

        for summary in &summaries {
            let usage_total: Money = summary.category_usages.iter().map(|u| u.total_activity).sum();
            prop_assert_eq!(usage_total, sum(&summary.overall_transactions));

            let usage_count: usize = summary.category_usages.iter().map(|u| u.transaction_count).sum();
            prop_assert_eq!(usage_count, summary.overall_transactions.len());
        }
    }

    #[test]
    fn partitioned_equals_sequential(transactions in prop::collection::vec(arb_transaction(), 0..60)) {
        let aggregator = MonthSummaryAggregator::new(MonthKey::new(2024, 6).unwrap());
        prop_assert_eq!(aggregator.aggregate_partitioned(&transactions), aggregator.aggregate(&transactions));
    }

    #[test]
    fn category_totals_are_order_independent(
        transactions in prop::collection::vec(arb_transaction_in(2024, 3), 0..40)
            .prop_flat_map(|v| (Just(v.clone()), Just(v).prop_shuffle()))
    ) {
        let (original, shuffled) = transactions;
        let mut a: Vec<(CategoryKey, Money, usize)> = CategoryUsageAggregator::aggregate(&original)
            .into_iter()
            .map(|u| (u.category, u.total_activity, u.transaction_count))
            .collect();
        let mut b: Vec<(CategoryKey, Money, usize)> = CategoryUsageAggregator::aggregate(&shuffled)
            .into_iter()
            .map(|u| (u.category, u.total_activity, u.transaction_count))
            .collect();
        a.sort();
        b.sort();
        prop_assert_eq!(a, b);
    }
}

// ---------------------------------------------------------------------------
// Daily spending
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(config())]

    #[test]
    fn daily_series_shape_and_total(transactions in prop::collection::vec(arb_transaction_in(2024, 2), 0..40)) {
        let active_days: BTreeSet<u32> = transactions.iter().map(|t| t.day_of_month()).collect();

        let sparse = DailySpendingProjector::new(SeriesDensity::Sparse).project(&transactions);
        prop_assert_eq!(sparse.len(), active_days.len());
        prop_assert_eq!(DailySpendingProjector::total(&sparse), sum(&transactions));
        prop_assert!(sparse.windows(2).all(|w| w[0].day_of_month < w[1].day_of_month));

        let dense = DailySpendingProjector::new(SeriesDensity::Dense).project(&transactions);
        let expected_len = if transactions.is_empty() { 0 } else { 29 };
        prop_assert_eq!(dense.len(), expected_len);
        prop_assert_eq!(DailySpendingProjector::total(&dense), sum(&transactions));
    }
}

// ---------------------------------------------------------------------------
// Forecast
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(config())]

    #[test]
    fn forecast_never_faults(total in arb_total(), calendar in arb_calendar()) {
        let forecast = ForecastEngine::forecast(&total, &calendar);

        prop_assert!(forecast.predicted_remaining_amount.is_finite());
        prop_assert!(forecast.predicted_remaining_per_day.is_finite());
        prop_assert!(forecast.actual_remaining_per_day.is_finite());
        prop_assert!(forecast.extra_amount_needed >= 0.0);

        if calendar.days_in_month == 0 {
            prop_assert_eq!(forecast, MonthlyForecast::neutral());
        }
        if calendar.day_of_month == 0 {
            prop_assert_eq!(forecast.actual_remaining_per_day, 0.0);
        }
    }

    #[test]
    fn current_month_extra_matches_predicted_shortfall(
        total in arb_total(),
        days in 28u32..=31,
        day in 1u32..=31,
    ) {
        let calendar = MonthCalendar::new(days, day.min(days), true);
        let forecast = ForecastEngine::forecast(&total, &calendar);

        let shortfall = (-forecast.predicted_remaining_amount).max(0.0);
        prop_assert!((forecast.extra_amount_needed - shortfall).abs() < 1e-6);
    }
}

// ---------------------------------------------------------------------------
// Balance projection
// ---------------------------------------------------------------------------

fn projection_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
}

fn arb_offset_date() -> impl Strategy<Value = NaiveDate> {
    (-10i64..120).prop_map(|offset| projection_today() + chrono::Duration::days(offset))
}

fn arb_scheduled() -> impl Strategy<Value = ScheduledTransaction> {
    (arb_offset_date(), -500_000i64..500_000, prop::sample::select(vec!["Rent", "Phone", "Income"]))
        .prop_map(|(date, amount, category)| ScheduledTransaction {
            date,
            amount: Money::from_cents(amount),
            category: category.to_string(),
            account: None,
            payee: None,
            memo: None,
        })
}

fn arb_need_category() -> impl Strategy<Value = ProjectedCategory> {
    (
        prop::sample::select(vec!["Rent", "Phone", "Groceries"]),
        -50_000i64..50_000,
        0i64..200_000,
        prop::option::of(1u32..=31),
    )
        .prop_map(|(name, balance, amount, day)| {
            let mut target = CategoryTarget::need(Money::from_cents(amount));
            target.day = day;
            ProjectedCategory {
                name: name.to_string(),
                balance: Money::from_cents(balance),
                target: Some(target),
            }
        })
}

proptest! {
    #![proptest_config(config())]

    #[test]
    fn projected_balance_is_running_sum(
        initial in -1_000_000i64..1_000_000,
        days_ahead in 0u32..100,
        scheduled in prop::collection::vec(arb_scheduled(), 0..20),
        categories in prop::collection::vec(arb_need_category(), 0..4),
        simulations in prop::collection::vec(
            (arb_offset_date(), -100_000i64..100_000)
                .prop_map(|(date, amount)| Simulation::new(date, Money::from_cents(amount))),
            0..5,
        ),
    ) {
        let projector = BalanceProjector::new(projection_today(), days_ahead);
        let days = projector.project(Money::from_cents(initial), &scheduled, &categories, &simulations);

        prop_assert_eq!(days.keys().next().copied(), Some(projection_today()));

        let mut running = Money::zero();
        for (date, day) in &days {
            prop_assert_eq!(*date, day.date);
            prop_assert!(*date >= projection_today() && *date <= projector.end());
            prop_assert!(!day.changes.is_empty());

            let diff: Money = day.changes.iter().map(|c| c.amount).sum();
            prop_assert_eq!(day.balance_diff, diff);
            running = running + diff;
            prop_assert_eq!(day.balance, running);
        }
    }
}

#[test]
fn reference_scenario() {
    let march = MonthKey::new(2024, 3).unwrap();
    let groceries = CategoryId::new("groceries").unwrap();
    let transactions = vec![
        Transaction::new(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(), Money::from_cents(-2000), Some(groceries.clone())),
        Transaction::new(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(), Money::from_cents(-1000), Some(groceries.clone())),
        Transaction::new(NaiveDate::from_ymd_opt(2024, 3, 20).unwrap(), Money::from_cents(-500), None),
    ];

    let summaries = MonthSummaryAggregator::new(march).aggregate(&transactions);
    let summary = summaries.get(&march).unwrap();
    assert_eq!(summary.total_activity().cents(), -3500);

    let grocery_usage = summary.usage(&CategoryKey::Category(groceries)).unwrap();
    assert_eq!((grocery_usage.total_activity.cents(), grocery_usage.transaction_count), (-3000, 2));
    let uncategorized = summary.usage(&CategoryKey::Uncategorized).unwrap();
    assert_eq!((uncategorized.total_activity.cents(), uncategorized.transaction_count), (-500, 1));

    let total = MonthTotal::new(Money::from_cents(10000), summary.total_activity());
    let forecast = ForecastEngine::forecast(&total, &MonthCalendar::new(31, 20, true));
    assert_eq!(forecast.actual_remaining_per_day, -175.0);
    assert!((forecast.predicted_remaining_per_day - 590.909).abs() < 1e-3);
}

#[test]
fn empty_input_has_no_summary() {
    let transactions: Vec<Transaction> = Vec::new();
    let summaries = MonthSummaryAggregator::new(MonthKey::new(2024, 3).unwrap()).aggregate(&transactions);
    assert!(summaries.get(&MonthKey::new(2024, 3).unwrap()).is_none());
}
