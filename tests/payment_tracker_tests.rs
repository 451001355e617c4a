use banban::core::payment::{PaymentStore, UnpaidLedger, mark_paid};
use banban::errors::{AppError, AppResult};
use banban::models::{PaymentFlags, PaymentKind, ScheduleWorker};

/// Records every save; fails them all when `fail` is set.
#[derive(Default)]
struct RecordingStore {
    saved: Vec<(i64, PaymentFlags)>,
    fail: bool,
}

impl PaymentStore for RecordingStore {
    fn save_payment_flags(&mut self, id: i64, flags: PaymentFlags) -> AppResult<()> {
        if self.fail {
            return Err(AppError::validation("store offline"));
        }
        self.saved.push((id, flags));
        Ok(())
    }
}

fn assignment(id: i64, fuel: i64, other: i64) -> ScheduleWorker {
    ScheduleWorker {
        id,
        worker_hourly_wage: 10_000,
        fuel_allowance: fuel,
        other_allowance: other,
        ..Default::default()
    }
}

#[test]
fn test_is_all_paid_every_combination() {
    for mask in 0..8u8 {
        let payment = PaymentFlags {
            wage_paid: mask & 1 != 0,
            fuel_paid: mask & 2 != 0,
            other_paid: mask & 4 != 0,
        };

        let with_allowances = ScheduleWorker {
            payment,
            ..assignment(1, 5_000, 3_000)
        };
        assert_eq!(with_allowances.is_all_paid(), mask == 7, "mask {mask}");

        // Zero allowances count as paid; only the wage matters.
        let no_allowances = ScheduleWorker {
            payment,
            ..assignment(1, 0, 0)
        };
        assert_eq!(no_allowances.is_all_paid(), payment.wage_paid, "mask {mask}");
    }
}

#[test]
fn test_mark_paid_persists_then_updates() {
    let mut store = RecordingStore::default();
    let mut sw = assignment(4, 5_000, 0);

    let outcome = mark_paid(&mut store, &mut sw, &[PaymentKind::Wage]).unwrap();

    assert_eq!(outcome.newly_paid, vec![PaymentKind::Wage]);
    assert!(!outcome.all_paid);
    assert!(sw.payment.wage_paid);
    assert_eq!(store.saved.len(), 1);
    assert_eq!(store.saved[0].0, 4);
    assert!(store.saved[0].1.wage_paid);
    assert!(!store.saved[0].1.fuel_paid);
}

#[test]
fn test_failed_store_leaves_flags_untouched() {
    let mut store = RecordingStore {
        fail: true,
        ..Default::default()
    };
    let mut sw = assignment(4, 5_000, 3_000);

    let result = mark_paid(
        &mut store,
        &mut sw,
        &[PaymentKind::Wage, PaymentKind::Fuel, PaymentKind::Other],
    );

    assert!(result.is_err());
    assert_eq!(sw.payment, PaymentFlags::default());
}

#[test]
fn test_already_paid_is_a_noop() {
    let mut store = RecordingStore::default();
    let mut sw = assignment(4, 0, 0);
    sw.payment.wage_paid = true;

    let outcome = mark_paid(
        &mut store,
        &mut sw,
        &[PaymentKind::Wage, PaymentKind::Fuel],
    )
    .unwrap();

    assert!(outcome.newly_paid.is_empty());
    assert_eq!(outcome.unchanged, vec![PaymentKind::Wage, PaymentKind::Fuel]);
    assert!(outcome.all_paid);
    assert!(store.saved.is_empty());
}

#[test]
fn test_paid_flags_never_revert() {
    let mut store = RecordingStore::default();
    let mut sw = assignment(4, 5_000, 0);
    sw.payment.fuel_paid = true;

    mark_paid(&mut store, &mut sw, &[PaymentKind::Wage]).unwrap();

    assert!(sw.payment.fuel_paid);
    assert!(store.saved[0].1.fuel_paid);
}

#[test]
fn test_ledger_drops_fully_paid_entries() {
    let mut store = RecordingStore::default();
    let mut done = assignment(1, 0, 0);
    done.payment.wage_paid = true;

    let mut ledger = UnpaidLedger::new(vec![done, assignment(2, 5_000, 0), assignment(3, 0, 0)]);
    assert_eq!(ledger.len(), 2);

    let outcome = ledger
        .settle(&mut store, 2, &[PaymentKind::Wage])
        .unwrap();
    assert!(!outcome.all_paid);
    assert_eq!(ledger.len(), 2);

    let outcome = ledger
        .settle(&mut store, 2, &[PaymentKind::Fuel])
        .unwrap();
    assert!(outcome.all_paid);
    assert_eq!(ledger.len(), 1);
    assert_eq!(ledger.entries()[0].id, 3);
}

#[test]
fn test_ledger_keeps_entry_when_store_fails() {
    let mut store = RecordingStore {
        fail: true,
        ..Default::default()
    };
    let mut ledger = UnpaidLedger::new(vec![assignment(3, 0, 0)]);

    assert!(ledger.settle(&mut store, 3, &[PaymentKind::Wage]).is_err());
    assert_eq!(ledger.len(), 1);
    assert!(!ledger.entries()[0].payment.wage_paid);
}

#[test]
fn test_ledger_unknown_assignment() {
    let mut store = RecordingStore::default();
    let mut ledger = UnpaidLedger::new(vec![assignment(3, 0, 0)]);

    let err = ledger
        .settle(&mut store, 42, &[PaymentKind::Wage])
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound { id: 42, .. }));
}
