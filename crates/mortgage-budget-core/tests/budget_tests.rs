use mortgage_budget_core::budget::{calculate_budget, Affordability, Budget, BudgetConfig};
use mortgage_budget_core::amortize;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn assert_payment_current(b: &Budget) {
    assert_eq!(
        b.monthly_payment(),
        amortize(b.loan_amount(), b.annual_rate(), b.term_years()).unwrap()
    );
}

// ===========================================================================
// Scenarios
// ===========================================================================

#[test]
fn test_default_budget() {
    let b = Budget::new(&BudgetConfig::default()).unwrap();
    assert_eq!(b.loan_amount(), dec!(800000));
    assert_eq!(
        b.monthly_payment(),
        amortize(dec!(800000), dec!(0.032), dec!(30)).unwrap()
    );
    // ≈ 3459.73 per the annuity formula
    assert!((b.monthly_payment() - dec!(3459.73)).abs() < dec!(0.01));
}

#[test]
fn test_ratio_35_percent() {
    // Zero price leaves only the extra expense in the monthly total
    let config = BudgetConfig {
        price: Decimal::ZERO,
        annual_income: dec!(120000),
        annual_insurance: Decimal::ZERO,
        extra_monthly_expense: dec!(3500),
        ..BudgetConfig::default()
    };
    let b = Budget::new(&config).unwrap();
    assert_eq!(b.monthly_total(), dec!(3500));
    assert_eq!(b.expense_to_income_ratio_percent(), Some(dec!(35)));
    assert_eq!(b.summary().affordability, Affordability::AboveGuideline);
}

#[test]
fn test_affordable_household() {
    let config = BudgetConfig {
        price: dec!(400000),
        annual_income: dec!(200000),
        ..BudgetConfig::default()
    };
    let out = calculate_budget(&config).unwrap();
    assert_eq!(out.result.affordability, Affordability::WithinGuideline);
    assert!(out.warnings.is_empty());
}

// ===========================================================================
// Invariants
// ===========================================================================

#[test]
fn test_payment_tracks_every_loan_setter() {
    let mut b = Budget::new(&BudgetConfig::default()).unwrap();
    b.set_price(dec!(650000)).unwrap();
    assert_payment_current(&b);
    b.set_percent_down(dec!(0.1)).unwrap();
    assert_payment_current(&b);
    b.set_annual_rate(dec!(0.0575)).unwrap();
    assert_payment_current(&b);
    b.set_term_years(dec!(15)).unwrap();
    assert_payment_current(&b);
    b.set_annual_rate(Decimal::ZERO).unwrap();
    assert_payment_current(&b);
    assert_eq!(b.monthly_payment(), dec!(585000) / dec!(180));
}

#[test]
fn test_setting_current_values_is_bit_identical() {
    let mut b = Budget::new(&BudgetConfig::default()).unwrap();
    b.set_tax_rate(dec!(0.0125)).unwrap();
    let before = b.summary();

    b.set_price(b.price()).unwrap();
    b.set_percent_down(b.percent_down()).unwrap();
    b.set_annual_rate(b.annual_rate()).unwrap();
    b.set_term_years(b.term_years()).unwrap();
    b.set_annual_income(b.annual_income()).unwrap();
    b.set_annual_insurance(b.annual_insurance()).unwrap();
    b.set_tax_rate(b.tax_rate()).unwrap();
    b.set_extra_monthly_expense(b.extra_monthly_expense()).unwrap();

    let after = b.summary();
    assert_eq!(before, after);
    assert_eq!(
        before.monthly_payment.serialize(),
        after.monthly_payment.serialize()
    );
}

#[test]
fn test_equal_value_with_different_scale_is_a_no_op() {
    let mut b = Budget::new(&BudgetConfig::default()).unwrap();
    let payment = b.monthly_payment().serialize();
    b.set_price(dec!(1000000.000)).unwrap();
    assert_eq!(b.price().scale(), 0);
    assert_eq!(b.monthly_payment().serialize(), payment);
}

#[test]
fn test_rejected_setter_leaves_previous_state() {
    let mut b = Budget::new(&BudgetConfig::default()).unwrap();
    b.set_price(dec!(750000)).unwrap();
    let snapshot = b.summary();

    let err = b.set_term_years(dec!(-1)).unwrap_err();
    assert_eq!(err.field(), "term_years");
    let err = b.set_percent_down(dec!(1.01)).unwrap_err();
    assert_eq!(err.field(), "principal");

    assert_eq!(b.summary(), snapshot);
    assert_payment_current(&b);
}

#[test]
fn test_construction_failure_propagates() {
    let config = BudgetConfig {
        annual_rate: dec!(-0.01),
        ..BudgetConfig::default()
    };
    assert_eq!(Budget::new(&config).unwrap_err().field(), "annual_rate");
}

// ===========================================================================
// Configuration
// ===========================================================================

#[test]
fn test_partial_json_config_uses_defaults() {
    let config: BudgetConfig =
        serde_json::from_str(r#"{"price":"500000","annual_income":"150000"}"#).unwrap();
    assert_eq!(config.price, dec!(500000));
    assert_eq!(config.annual_income, dec!(150000));
    assert_eq!(config.percent_down, dec!(0.20));
    assert_eq!(config.term_years, dec!(30));
    assert_eq!(config.extra_monthly_expense, Decimal::ZERO);
}

#[test]
fn test_apply_then_config_round_trip() {
    let mut b = Budget::new(&BudgetConfig::default()).unwrap();
    let next = BudgetConfig {
        price: dec!(820000),
        percent_down: dec!(0.25),
        annual_rate: dec!(0.045),
        term_years: dec!(20),
        annual_income: dec!(180000),
        annual_insurance: dec!(1800),
        tax_rate: dec!(0.011),
        extra_monthly_expense: dec!(350),
    };
    b.apply(&next).unwrap();
    assert_eq!(b.config(), next);
    assert_eq!(b, Budget::new(&next).unwrap());
    assert_payment_current(&b);
}

// ===========================================================================
// Decimal range
// ===========================================================================

#[test]
fn test_calculate_budget_rejects_overflowing_figures() {
    let config = BudgetConfig {
        price: dec!(10000000000000000000000000000),
        tax_rate: dec!(5),
        ..BudgetConfig::default()
    };
    let err = calculate_budget(&config).unwrap_err();
    assert_eq!(err.field(), "annual_income");

    let config = BudgetConfig {
        extra_monthly_expense: Decimal::MAX,
        ..BudgetConfig::default()
    };
    let err = calculate_budget(&config).unwrap_err();
    assert_eq!(err.field(), "extra_monthly_expense");
}

#[test]
fn test_large_but_representable_budget_reads_without_overflow() {
    let config = BudgetConfig {
        price: dec!(1000000000000000000000),
        annual_income: dec!(100000000000000000000),
        ..BudgetConfig::default()
    };
    let b = Budget::new(&config).unwrap();
    let s = b.summary();
    assert_eq!(s.loan_amount, dec!(800000000000000000000));
    assert!(s.expense_to_income_ratio_percent.is_some());
    assert_payment_current(&b);
}
