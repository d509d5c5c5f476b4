use loan_velocity::amortization::{Amortizer, LineOfCreditAmortizer, SimulationConfig, TraditionalAmortizer};
use loan_velocity::budget::BudgetProjection;
use loan_velocity::loan::{BudgetParameters, LineOfCreditParameters, LoanParameters, Scenario, StrategyMode};
use loan_velocity::{ExtraPaymentAmortizer, ScenarioRunner};
use proptest::prelude::*;

/// Generate a random fixed-rate mortgage.
fn arb_loan() -> impl Strategy<Value = LoanParameters> {
    (10_000.0..1_000_000.0f64, 0.0..12.0f64, 5u32..=40).prop_map(|(principal, rate, term)| LoanParameters {
        principal,
        annual_rate_percent: rate,
        term_years: term,
    })
}

/// Generate a flat or growing household budget.
fn arb_budget() -> impl Strategy<Value = BudgetParameters> {
    (
        0.0..20_000.0f64,
        0.0..15_000.0f64,
        any::<bool>(),
        -5.0..8.0f64,
        -5.0..8.0f64,
    )
        .prop_map(|(income, expenses, growth, income_growth, expense_growth)| {
            if growth {
                BudgetParameters::growing(income, expenses, income_growth, expense_growth)
            } else {
                BudgetParameters::flat(income, expenses)
            }
        })
}

/// Generate a credit line in either policy, chunk possibly above the limit.
fn arb_line() -> impl Strategy<Value = LineOfCreditParameters> {
    (0.0..50_000.0f64, 0.0..15.0f64, 0.0..30_000.0f64, any::<bool>()).prop_map(
        |(limit, rate, chunk, parking)| LineOfCreditParameters {
            limit,
            annual_rate_percent: rate,
            chunk_size: chunk,
            strategy_mode: if parking {
                StrategyMode::PaycheckParking
            } else {
                StrategyMode::CashFlowSweep
            },
        },
    )
}

fn projection(loan: &LoanParameters, budget: &BudgetParameters) -> BudgetProjection {
    BudgetProjection::from_budget(budget, loan.term_years).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    // The annuity payment clears any valid loan by the end of its term.
    #[test]
    fn traditional_pays_off_within_term(loan in arb_loan()) {
        let result = TraditionalAmortizer::new(loan).unwrap().amortize(&SimulationConfig::default());

        prop_assert!(result.payoff_months <= loan.term_years * 12);
        prop_assert!(result.status.is_paid_off());
        prop_assert!(result.balances.iter().all(|&b| b >= 0.0));

        let principal: f64 = result.records.iter().map(|r| r.principal).sum();
        prop_assert!((principal - loan.principal).abs() < 0.01 * loan.principal / 100_000.0 + 0.01);
    }

    // Extra principal can only shorten the schedule, never lengthen it.
    #[test]
    fn extra_payment_never_slower(loan in arb_loan(), budget in arb_budget()) {
        let projection = projection(&loan, &budget);
        let extra = ExtraPaymentAmortizer::new(loan, &projection)
            .unwrap()
            .amortize(&SimulationConfig::default());
        let traditional = TraditionalAmortizer::new(loan).unwrap().amortize(&SimulationConfig::default());

        prop_assert!(extra.payoff_months <= loan.term_years * 12);
        prop_assert!(extra.payoff_months <= traditional.payoff_months);
        prop_assert!(extra.status.is_paid_off());
        prop_assert!(extra.balances.iter().all(|&b| b >= 0.0));
        for pair in extra.balances.windows(2) {
            prop_assert!(pair[1] <= pair[0]);
        }
    }

    // With nothing left over after the base payment, extra and traditional agree.
    #[test]
    fn no_spare_cash_matches_traditional(loan in arb_loan(), expenses in 0.0..10_000.0f64) {
        let budget = BudgetParameters::flat(expenses, expenses);
        let projection = projection(&loan, &budget);
        let extra = ExtraPaymentAmortizer::new(loan, &projection)
            .unwrap()
            .amortize(&SimulationConfig::default());
        let traditional = TraditionalAmortizer::new(loan).unwrap().amortize(&SimulationConfig::default());

        prop_assert_eq!(extra.balances, traditional.balances);
        prop_assert_eq!(extra.payoff_months, traditional.payoff_months);
    }

    // Growth disabled means every month sees the same budget.
    #[test]
    fn flat_projection_is_constant(
        income in 0.0..20_000.0f64,
        expenses in 0.0..15_000.0f64,
        term in 1u32..=50,
        month in 1u32..=720,
    ) {
        let projection = BudgetProjection::from_budget(&BudgetParameters::flat(income, expenses), term).unwrap();
        let budget = projection.budget_for_month(month);

        prop_assert_eq!(budget.income, income);
        prop_assert_eq!(budget.expenses, expenses);
        prop_assert_eq!(budget.available, income - expenses);
    }

    // A zero chunk disables chunking entirely.
    #[test]
    fn zero_chunk_never_flags(loan in arb_loan(), budget in arb_budget(), mut line in arb_line()) {
        line.chunk_size = 0.0;
        let projection = projection(&loan, &budget);
        let result = LineOfCreditAmortizer::new(loan, line, &projection)
            .unwrap()
            .amortize(&SimulationConfig::default());

        prop_assert!(result.records.iter().all(|r| !r.chunk_applied && r.principal_from_chunk == 0.0));
        prop_assert_eq!(result.line_of_credit.unwrap().chunks_applied, 0);
    }

    // Sweeping never grows the line between chunks beyond the month's interest.
    #[test]
    fn sweep_line_bounded_by_interest(loan in arb_loan(), budget in arb_budget(), mut line in arb_line()) {
        line.strategy_mode = StrategyMode::CashFlowSweep;
        let projection = projection(&loan, &budget);
        let result = LineOfCreditAmortizer::new(loan, line, &projection)
            .unwrap()
            .amortize(&SimulationConfig::default());

        prop_assert!(result.payoff_months <= loan.term_years * 12);
        for pair in result.records.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            if !next.chunk_applied {
                prop_assert!(next.ending_loc_balance <= prev.ending_loc_balance + next.loc_interest + 1e-9);
            }
        }
    }

    // Both balances stay non-negative under either policy.
    #[test]
    fn line_of_credit_balances_non_negative(loan in arb_loan(), budget in arb_budget(), line in arb_line()) {
        let projection = projection(&loan, &budget);
        let result = LineOfCreditAmortizer::new(loan, line, &projection)
            .unwrap()
            .amortize(&SimulationConfig::default());

        prop_assert!(result.balances.iter().all(|&b| b >= 0.0 && b.is_finite()));
        prop_assert!(result.records.iter().all(|r| r.ending_loc_balance >= 0.0));
        prop_assert!(result.records.iter().all(|r| r.unfunded_draw >= 0.0));
        prop_assert!(result.records.iter().all(|r| r.loc_drawn >= 0.0));
        prop_assert!(result.records.iter().all(|r| r.loc_deposited >= 0.0));
    }

    // The runner's comparison is consistent with its own results.
    #[test]
    fn comparison_savings_consistent(loan in arb_loan(), budget in arb_budget(), line in arb_line()) {
        let scenario = Scenario { scenario_id: 7, loan, budget, line_of_credit: line };
        let comparison = ScenarioRunner::default().run(&scenario).unwrap();

        prop_assert_eq!(comparison.scenario_id, 7);
        prop_assert!(comparison.interest_savings(loan_velocity::Strategy::ExtraPayment) >= -1e-6);

        let aligned = comparison.aligned_balances();
        prop_assert_eq!(aligned[0].len(), aligned[1].len());
        prop_assert_eq!(aligned[1].len(), aligned[2].len());
    }
}
