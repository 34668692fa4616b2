//! Worked examples with known answers.

use accrue_core::prelude::*;
use accrue_engine::prelude::*;
use approx::assert_relative_eq;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

struct Case {
    name: &'static str,
    bank: &'static str,
    capitalization: &'static str,
    principal_minor: i64,
    rate: Decimal,
    promo: Option<(Decimal, &'static str)>,
    days: i64,
    expected: f64,
}

const AS_OF: &str = "2025-03-01";

const CASES: &[Case] = &[
    Case {
        name: "flat 12% for a year, end capitalization",
        bank: "Alfa",
        capitalization: "end",
        principal_minor: 100_000,
        rate: dec!(12),
        promo: None,
        days: 365,
        expected: 120.0,
    },
    Case {
        name: "daily compounding 17% for 30 days",
        bank: "Alfa",
        capitalization: "daily",
        principal_minor: 50_000,
        rate: dec!(17),
        promo: None,
        days: 30,
        expected: 7.033_688_575,
    },
    Case {
        name: "flat 12% for 10 days",
        bank: "Tinkoff",
        capitalization: "end",
        principal_minor: 100_000,
        rate: dec!(12),
        promo: None,
        days: 10,
        expected: 3.287_671_233,
    },
    Case {
        name: "promo 17% covering all 5 days",
        bank: "Tinkoff",
        capitalization: "end",
        principal_minor: 100_000,
        rate: dec!(12),
        promo: Some((dec!(17), "2025-03-31")),
        days: 5,
        expected: 2.328_767_123,
    },
    Case {
        name: "monthly compounding 12% over 92 days",
        bank: "Sberbank",
        capitalization: "monthly",
        principal_minor: 100_000,
        rate: dec!(12),
        promo: None,
        days: 92,
        expected: 30.301,
    },
    Case {
        name: "monthly compounding under one average month",
        bank: "Sberbank",
        capitalization: "monthly",
        principal_minor: 100_000,
        rate: dec!(12),
        promo: None,
        days: 30,
        expected: 0.0,
    },
    Case {
        name: "Yandex ignores end capitalization, ACT/360 daily",
        bank: "Yandex",
        capitalization: "end",
        principal_minor: 10_000_000,
        rate: dec!(10),
        promo: None,
        days: 1,
        expected: 27.777_777_778,
    },
    Case {
        name: "quarterly priced as simple interest",
        bank: "VTB",
        capitalization: "quarterly",
        principal_minor: 100_000,
        rate: dec!(12),
        promo: None,
        days: 365,
        expected: 120.0,
    },
];

fn build(case: &Case) -> Deposit {
    let deposit = Deposit::new(
        "ref",
        case.name,
        case.bank,
        Money::from_minor(case.principal_minor),
        Rate::from_percent(case.rate),
    )
    .with_capitalization(case.capitalization);
    match case.promo {
        Some((rate, end)) => deposit.with_promo(Rate::from_percent(rate), end),
        None => deposit,
    }
}

#[test]
fn test_reference_cases() {
    let as_of = Date::parse(AS_OF).unwrap();
    for case in CASES {
        let income = calculate_income(&build(case), case.days, as_of);
        let actual = income.to_f64().unwrap();
        assert!(
            (actual - case.expected).abs() < 1e-8,
            "{}: expected {}, got {}",
            case.name,
            case.expected,
            actual
        );
    }
}

#[test]
fn test_promo_beats_flat_rate() {
    let as_of = Date::parse(AS_OF).unwrap();
    let flat = Deposit::new("a", "flat", "Alfa", Money::from_minor(100_000), Rate::from_percent(dec!(12)))
        .with_capitalization("end");
    let promo = flat.clone().with_promo(Rate::from_percent(dec!(17)), "2025-03-05");

    let flat_income = calculate_income(&flat, 10, as_of);
    let promo_income = calculate_income(&promo, 10, as_of);
    assert_relative_eq!(flat_income.to_f64().unwrap(), 3.287_671_233, epsilon = 1e-8);
    assert!(promo_income > flat_income);
}

#[test]
fn test_promo_that_ended_yesterday() {
    let deposit = Deposit::new("a", "a", "Alfa", Money::from_minor(100_000), Rate::from_percent(dec!(12)))
        .with_promo(Rate::from_percent(dec!(17)), "2025-02-28");
    let status = check_promo_status(&deposit, Date::parse(AS_OF).unwrap());
    assert_eq!(status, PromoStatus { active: false, days_remaining: 0 });
}

#[test]
fn test_term_deposit_lifecycle() {
    let start = "2025-01-15";
    let end = maturity_date(start, 6).unwrap();
    assert_eq!(end.to_string(), "2025-07-15");

    let deposit = Deposit::new("t", "Six months", "Alfa", Money::from_minor(5_000_000), Rate::from_percent(dec!(18)))
        .with_capitalization("monthly")
        .with_term(start, end.to_string());

    assert_eq!(top_up_end_date(start, end).to_string(), "2025-01-22");
    assert!(!can_be_prolonged(&deposit, Date::parse("2025-07-07").unwrap()));
    assert!(can_be_prolonged(&deposit, Date::parse("2025-07-08").unwrap()));
    assert!(!is_expired(&deposit, end));
    assert!(is_expired(&deposit, end.add_days(1)));
    assert_eq!(days_until(deposit.end_date.as_deref(), Date::parse("2025-07-05").unwrap()), 10);

    // 181 days -> 5 whole average months at 1.5% per month
    let total = total_term_income(&deposit);
    let expected = 50_000.0 * (1.015_f64.powi(5) - 1.0);
    assert_relative_eq!(total.to_f64().unwrap(), expected, epsilon = 1e-6);
}

#[test]
fn test_daily_accrual_run_over_a_book() {
    let as_of = Date::parse(AS_OF).unwrap();
    let book = vec![
        Deposit::new("y", "Yandex savings", "Yandex", Money::from_minor(3_600_000), Rate::from_percent(dec!(10))),
        Deposit::new("t", "Term", "Alfa", Money::from_minor(3_600_000), Rate::from_percent(dec!(10)))
            .with_term("2025-01-01", "2025-12-31"),
    ];

    let run = plan_accruals(&book, as_of);
    assert_eq!(run.accrued_count(), 1);
    assert_eq!(run.total(), Money::from_minor(1_000));

    let projection = project_income(&book[0], 30, as_of).unwrap();
    assert_eq!(projection.breakdown.base_days, 30);
    assert!(projection.total > dec!(36000));
}
