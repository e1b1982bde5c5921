use chrono::{Datelike, NaiveDate};
use earnings_chart::core::{
    Category, ChartSeries, ChartView, DatasetPlan, GenerationRequest, GeneratorTuning,
    GrowthPatternKind, PeriodId, SeriesGenerator, YearMonth, cents_to_decimal,
};
use earnings_chart::error::ChartError;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rust_decimal::Decimal;

fn generator() -> SeriesGenerator {
    SeriesGenerator::new(GeneratorTuning::default()).expect("default tuning is valid")
}

#[test]
fn twenty_four_months_keep_recent_net_in_buffer_band() {
    let generator = generator();
    for seed in 0..200 {
        let mut rng = StdRng::seed_from_u64(seed);
        let series = generator.generate(
            &GenerationRequest {
                total_net_cents: 960_000,
                period_count: 24,
                minimum_cents: 50_000,
            },
            &mut rng,
        );

        let last = *series.net_cents.last().expect("24 periods");
        assert!(
            (55_000..=75_000).contains(&last),
            "seed {seed}: most recent net {last} outside [550, 750]"
        );
        let sum: i64 = series.net_cents.iter().sum();
        assert!((sum - 960_000).abs() <= 24, "seed {seed}: sum {sum}");
    }
}

#[test]
fn category_splits_add_up_to_each_period() {
    let generator = generator();
    let mut rng = StdRng::seed_from_u64(7);
    let series = generator.generate(
        &GenerationRequest {
            total_net_cents: 1_234_567,
            period_count: 18,
            minimum_cents: 20_000,
        },
        &mut rng,
    );
    for (net, split) in series.net_cents.iter().zip(&series.split_cents) {
        assert_eq!(split.iter().sum::<i64>(), *net);
    }
}

#[test]
fn single_period_uses_consistent_pattern() {
    let generator = generator();
    for seed in 0..32 {
        let mut rng = StdRng::seed_from_u64(seed);
        let series = generator.generate(
            &GenerationRequest {
                total_net_cents: 10_000,
                period_count: 1,
                minimum_cents: 0,
            },
            &mut rng,
        );
        assert_eq!(series.pattern.kind(), GrowthPatternKind::Consistent);
        assert_eq!(series.net_cents, vec![10_000]);
    }
}

#[test]
fn empty_request_yields_no_periods() {
    let mut rng = StdRng::seed_from_u64(3);
    let series = generator().generate(
        &GenerationRequest {
            total_net_cents: 50_000,
            period_count: 0,
            minimum_cents: 0,
        },
        &mut rng,
    );
    assert!(series.net_cents.is_empty());
    assert!(series.split_cents.is_empty());
}

#[test]
fn minimum_above_total_still_satisfies_recent_period() {
    let mut rng = StdRng::seed_from_u64(11);
    let series = generator().generate(
        &GenerationRequest {
            total_net_cents: 10_000,
            period_count: 6,
            minimum_cents: 50_000,
        },
        &mut rng,
    );
    let last = *series.net_cents.last().expect("periods");
    assert!(last >= 55_000);
    assert!(series.net_cents[..5].iter().all(|cents| *cents == 0));
}

#[test]
fn ceiling_can_be_disabled_to_only_raise() {
    let tuning = GeneratorTuning {
        ceiling_ratio: None,
        ..GeneratorTuning::default()
    };
    let generator = SeriesGenerator::new(tuning).expect("tuning");
    let mut rng = StdRng::seed_from_u64(5);
    // A tiny minimum never needs raising, and without a ceiling it is untouched.
    let series = generator.generate(
        &GenerationRequest {
            total_net_cents: 10_000_000,
            period_count: 12,
            minimum_cents: 100,
        },
        &mut rng,
    );
    assert_eq!(series.buffer_ratio, None);
    assert!(*series.net_cents.last().expect("periods") > 150);
}

fn plan(today: NaiveDate) -> DatasetPlan {
    DatasetPlan {
        total_gross_cents: 1_200_000,
        net_margin: 0.8,
        oldest_month: YearMonth::new(2024, 4).expect("month"),
        today,
        minimum_cents: 50_000,
        daily_window_days: 30,
    }
}

#[test]
fn dataset_covers_tenure_and_recent_days() {
    let today = NaiveDate::from_ymd_opt(2026, 3, 14).expect("date");
    let dataset = generator()
        .generate_dataset(&plan(today), 42)
        .expect("dataset");

    assert_eq!(dataset.months.len(), 24);
    assert_eq!(
        dataset.months.first().map(|record| record.period),
        Some(PeriodId::Month {
            year: 2024,
            month: 4
        })
    );
    assert_eq!(
        dataset.months.last().map(|record| record.period),
        Some(PeriodId::Month {
            year: 2026,
            month: 3
        })
    );
    // February 2026 in full plus March 1..=14.
    assert_eq!(dataset.days.len(), 28 + 14);
    assert_eq!(
        dataset.days.last().map(|record| record.period),
        Some(PeriodId::Day { date: today })
    );

    assert_eq!(dataset.totals.net, cents_to_decimal(960_000));
    assert_eq!(dataset.totals.gross, cents_to_decimal(1_200_000));
    assert!(dataset.most_recent_net() >= Decimal::new(55_000, 2));
    assert_eq!(dataset.seed, 42);
    dataset.validate().expect("generated dataset is valid");
}

#[test]
fn current_month_days_add_up_to_month_net() {
    let today = NaiveDate::from_ymd_opt(2026, 3, 14).expect("date");
    let dataset = generator()
        .generate_dataset(&plan(today), 9)
        .expect("dataset");
    let current_days: Decimal = dataset
        .days
        .iter()
        .filter(|record| matches!(record.period, PeriodId::Day { date } if date.month() == 3))
        .map(|record| record.net_amount)
        .sum();
    assert_eq!(current_days, dataset.most_recent_net());
}

#[test]
fn dataset_generation_is_deterministic_per_seed() {
    let today = NaiveDate::from_ymd_opt(2025, 11, 30).expect("date");
    let generator = generator();
    let first = generator.generate_dataset(&plan(today), 1234).expect("first");
    let second = generator.generate_dataset(&plan(today), 1234).expect("second");
    let other = generator.generate_dataset(&plan(today), 4321).expect("other");
    assert_eq!(first, second);
    assert_ne!(first.months, other.months);
}

#[test]
fn oldest_month_after_today_is_rejected() {
    let today = NaiveDate::from_ymd_opt(2024, 1, 5).expect("date");
    let err = generator()
        .generate_dataset(&plan(today), 1)
        .expect_err("oldest month is in the future");
    assert!(err.to_string().contains("after the current month"));
}

const VISIBLE: [Category; 3] = [Category::Tips, Category::Posts, Category::Messages];

#[test]
fn trailing_window_spans_short_february() {
    let today = NaiveDate::from_ymd_opt(2025, 3, 1).expect("date");
    let dataset = generator()
        .generate_dataset(&plan(today), 8)
        .expect("dataset");

    let series = ChartSeries::from_dataset(&dataset, ChartView::Last30Days, today, 30, &VISIBLE)
        .expect("series");
    assert_eq!(series.slot_count, 30);
    assert_eq!(series.filled_len(), 30);
    assert_eq!(series.labels.first().map(String::as_str), Some("Jan 31"));
    assert_eq!(series.labels.last().map(String::as_str), Some("Mar 1"));

    let january_net = dataset
        .months
        .iter()
        .find(|record| record.period == PeriodId::Month { year: 2025, month: 1 })
        .map(|record| record.net_amount)
        .expect("january");
    let january_days: Decimal = dataset
        .days
        .iter()
        .filter(|record| {
            matches!(record.period, PeriodId::Day { date } if date.year() == 2025 && date.month() == 1)
        })
        .map(|record| record.net_amount)
        .sum();
    assert_eq!(january_days, january_net);
}

#[test]
fn wide_daily_window_is_fully_covered() {
    let today = NaiveDate::from_ymd_opt(2026, 3, 14).expect("date");
    let plan = DatasetPlan {
        daily_window_days: 120,
        ..plan(today)
    };
    let dataset = generator().generate_dataset(&plan, 21).expect("dataset");
    let series = ChartSeries::from_dataset(&dataset, ChartView::Last30Days, today, 120, &VISIBLE)
        .expect("series");
    assert_eq!(series.slot_count, 120);
    dataset.validate().expect("generated dataset is valid");
}

#[test]
fn daily_records_never_precede_tenure() {
    let today = NaiveDate::from_ymd_opt(2026, 3, 14).expect("date");
    let plan = DatasetPlan {
        oldest_month: YearMonth::new(2026, 3).expect("month"),
        ..plan(today)
    };
    let dataset = generator().generate_dataset(&plan, 2).expect("dataset");
    assert_eq!(dataset.months.len(), 1);
    assert_eq!(dataset.days.len(), 14);
}

#[test]
fn oversized_plans_are_rejected() {
    let today = NaiveDate::from_ymd_opt(2026, 3, 14).expect("date");
    let ancient = DatasetPlan {
        oldest_month: YearMonth::new(i32::MIN, 1).expect("month"),
        ..plan(today)
    };
    assert!(matches!(
        generator().generate_dataset(&ancient, 1),
        Err(ChartError::InvalidConfig(_))
    ));

    let wide = DatasetPlan {
        daily_window_days: 10_000,
        ..plan(today)
    };
    assert!(matches!(
        generator().generate_dataset(&wide, 1),
        Err(ChartError::InvalidConfig(_))
    ));
}
