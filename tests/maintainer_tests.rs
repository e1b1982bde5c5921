use chrono::NaiveDate;
use earnings_chart::api::{
    DEFAULT_OVERRIDE_STORAGE_KEY, EarningsConfig, InvariantMaintainer, KeyValueStore,
    MaintainOutcome, MemoryStore, RegenerationReason,
};
use earnings_chart::core::{GeneratorTuning, SeriesGenerator, YearMonth};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rust_decimal::Decimal;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 4, 10).expect("date")
}

fn config() -> EarningsConfig {
    EarningsConfig::new(today(), Decimal::new(1_200_000, 2))
        .with_month_count(24)
        .with_minimums(Decimal::new(40_000, 2), Decimal::new(10_000, 2))
}

fn generator() -> SeriesGenerator {
    SeriesGenerator::new(GeneratorTuning::default()).expect("generator")
}

#[test]
fn first_ensure_generates_then_reuses() {
    let generator = generator();
    let mut rng = StdRng::seed_from_u64(1);
    let mut maintainer = InvariantMaintainer::new(MemoryStore::new());

    let outcome = maintainer.ensure(&generator, &config(), &mut rng).expect("ensure");
    assert_eq!(
        outcome,
        MaintainOutcome::Regenerated {
            reason: RegenerationReason::Missing
        }
    );
    let first = maintainer.current().cloned().expect("dataset");
    assert!(first.dataset.most_recent_net() >= config().minimum_required());

    let outcome = maintainer.ensure(&generator, &config(), &mut rng).expect("ensure");
    assert_eq!(outcome, MaintainOutcome::Reused);
    let second = maintainer.current().cloned().expect("dataset");
    assert_eq!(first.revision, second.revision);
    assert_eq!(*first.dataset, *second.dataset);
}

#[test]
fn reload_with_same_key_loads_bit_identical_dataset() {
    let generator = generator();
    let mut rng = StdRng::seed_from_u64(2);
    let mut first = InvariantMaintainer::new(MemoryStore::new());
    first.ensure(&generator, &config(), &mut rng).expect("ensure");
    let generated = first.current().cloned().expect("dataset");

    let store = first.cache().store().clone();
    let mut reloaded = InvariantMaintainer::new(store);
    let outcome = reloaded.ensure(&generator, &config(), &mut rng).expect("ensure");
    assert_eq!(outcome, MaintainOutcome::LoadedFromCache);
    assert_eq!(
        *reloaded.current().expect("dataset").dataset,
        *generated.dataset
    );
}

#[test]
fn changed_minimum_regenerates_above_new_minimum() {
    let generator = generator();
    let mut rng = StdRng::seed_from_u64(3);
    let mut maintainer = InvariantMaintainer::new(MemoryStore::new());
    maintainer.ensure(&generator, &config(), &mut rng).expect("ensure");
    let revision = maintainer.current().expect("dataset").revision;

    let raised = config().with_minimums(Decimal::new(150_000, 2), Decimal::new(20_000, 2));
    let outcome = maintainer.ensure(&generator, &raised, &mut rng).expect("ensure");
    assert_eq!(
        outcome,
        MaintainOutcome::Regenerated {
            reason: RegenerationReason::KeyChanged
        }
    );
    let handle = maintainer.current().expect("dataset");
    assert!(handle.revision > revision);
    assert!(handle.dataset.most_recent_net() >= Decimal::new(170_000, 2));
}

#[test]
fn regenerate_replaces_valid_dataset() {
    let generator = generator();
    let mut rng = StdRng::seed_from_u64(4);
    let mut maintainer = InvariantMaintainer::new(MemoryStore::new());
    maintainer.ensure(&generator, &config(), &mut rng).expect("ensure");
    let before = maintainer.current().cloned().expect("dataset");

    let outcome = maintainer.regenerate(&generator, &config(), &mut rng).expect("regenerate");
    assert_eq!(
        outcome,
        MaintainOutcome::Regenerated {
            reason: RegenerationReason::Requested
        }
    );
    let after = maintainer.current().expect("dataset");
    assert_eq!(after.revision, before.revision + 1);
    assert_ne!(after.dataset.seed, before.dataset.seed);
}

#[test]
fn override_gross_recomputes_net_with_margin() {
    let generator = generator();
    let mut rng = StdRng::seed_from_u64(5);
    let mut maintainer = InvariantMaintainer::new(MemoryStore::new());
    maintainer.ensure(&generator, &config(), &mut rng).expect("ensure");

    let outcome = maintainer
        .override_gross(&generator, &config(), Decimal::new(2_500_000, 2), false, &mut rng)
        .expect("override");
    assert_eq!(
        outcome,
        MaintainOutcome::Regenerated {
            reason: RegenerationReason::ManualOverride
        }
    );
    let handle = maintainer.current().expect("dataset");
    assert_eq!(handle.dataset.totals.gross, Decimal::new(2_500_000, 2));
    assert_eq!(handle.dataset.totals.net, Decimal::new(2_000_000, 2));

    // The override sticks on later data-ready signals.
    let outcome = maintainer.ensure(&generator, &config(), &mut rng).expect("ensure");
    assert_eq!(outcome, MaintainOutcome::Reused);
}

#[test]
fn preserved_anchor_survives_later_month_count_changes() {
    let generator = generator();
    let mut rng = StdRng::seed_from_u64(6);
    let mut maintainer = InvariantMaintainer::new(MemoryStore::new());
    maintainer.ensure(&generator, &config(), &mut rng).expect("ensure");
    let anchor = maintainer
        .current()
        .and_then(|handle| handle.dataset.oldest_month())
        .expect("oldest month");
    assert_eq!(anchor, YearMonth::new(2024, 5).expect("month"));

    maintainer
        .override_gross(&generator, &config(), Decimal::new(900_000, 2), true, &mut rng)
        .expect("override");
    let shorter = config().with_month_count(6);
    maintainer.ensure(&generator, &shorter, &mut rng).expect("ensure");
    let handle = maintainer.current().expect("dataset");
    assert_eq!(handle.dataset.oldest_month(), Some(anchor));
    assert_eq!(handle.dataset.months.len(), 24);
}

#[test]
fn override_is_persisted_and_restored() {
    let generator = generator();
    let mut rng = StdRng::seed_from_u64(7);
    let mut maintainer = InvariantMaintainer::new(MemoryStore::new());
    maintainer
        .override_gross(&generator, &config(), Decimal::new(300_000, 2), false, &mut rng)
        .expect("override");
    let store = maintainer.cache().store().clone();
    assert!(store.get(DEFAULT_OVERRIDE_STORAGE_KEY).is_some());

    let restored = InvariantMaintainer::new(store);
    assert_eq!(
        restored.gross_override().map(|value| value.gross),
        Some(Decimal::new(300_000, 2))
    );

    let mut cleared = restored;
    cleared.clear_override();
    assert!(cleared.gross_override().is_none());
    assert!(cleared.cache().store().get(DEFAULT_OVERRIDE_STORAGE_KEY).is_none());
}

#[test]
fn negative_override_is_rejected() {
    let generator = generator();
    let mut rng = StdRng::seed_from_u64(8);
    let mut maintainer = InvariantMaintainer::new(MemoryStore::new());
    assert!(
        maintainer
            .override_gross(&generator, &config(), Decimal::new(-100, 2), false, &mut rng)
            .is_err()
    );
    assert!(maintainer.gross_override().is_none());
}
