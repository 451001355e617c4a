//! Payment state of assignments: wage, fuel and other allowance are paid
//! independently, each only from unpaid to paid.
//!
//! A transition is written to the store first. The in-memory assignment (and
//! the unpaid list holding it) changes only once the store has accepted the
//! write, so a failed save leaves the view exactly as it was.

use crate::errors::{AppError, AppResult};
use crate::models::{PaymentFlags, PaymentKind, ScheduleWorker};
use serde::Serialize;

/// Persistence seam for payment flags.
pub trait PaymentStore {
    fn save_payment_flags(&mut self, schedule_worker_id: i64, flags: PaymentFlags) -> AppResult<()>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PaymentOutcome {
    pub newly_paid: Vec<PaymentKind>,
    /// Already paid, or an allowance of zero.
    pub unchanged: Vec<PaymentKind>,
    pub all_paid: bool,
}

/// Mark `kinds` as paid on `worker`.
///
/// Nothing is written when every requested kind is already settled.
pub fn mark_paid<S: PaymentStore + ?Sized>(
    store: &mut S,
    worker: &mut ScheduleWorker,
    kinds: &[PaymentKind],
) -> AppResult<PaymentOutcome> {
    let mut outcome = PaymentOutcome::default();
    let mut next = worker.payment;

    for &kind in kinds {
        if next.get(kind) || !worker.is_applicable(kind) {
            if !outcome.unchanged.contains(&kind) {
                outcome.unchanged.push(kind);
            }
            continue;
        }
        next = next.with_paid(kind);
        outcome.newly_paid.push(kind);
    }

    if !outcome.newly_paid.is_empty() {
        store.save_payment_flags(worker.id, next)?;
        worker.payment = next;
    }

    outcome.all_paid = worker.is_all_paid();
    Ok(outcome)
}

/// The unpaid list behind the "unpaid details" view.
#[derive(Debug, Default)]
pub struct UnpaidLedger {
    entries: Vec<ScheduleWorker>,
}

impl UnpaidLedger {
    /// Keeps only assignments that are not fully paid.
    pub fn new(assignments: impl IntoIterator<Item = ScheduleWorker>) -> Self {
        Self {
            entries: assignments
                .into_iter()
                .filter(|w| !w.is_all_paid())
                .collect(),
        }
    }

    pub fn entries(&self) -> &[ScheduleWorker] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pay `kinds` on one entry; a fully paid entry leaves the list once the
    /// store has confirmed.
    pub fn settle<S: PaymentStore + ?Sized>(
        &mut self,
        store: &mut S,
        schedule_worker_id: i64,
        kinds: &[PaymentKind],
    ) -> AppResult<PaymentOutcome> {
        let idx = self
            .entries
            .iter()
            .position(|w| w.id == schedule_worker_id)
            .ok_or(AppError::NotFound {
                entity: "assignment",
                id: schedule_worker_id,
            })?;

        let outcome = mark_paid(store, &mut self.entries[idx], kinds)?;
        if outcome.all_paid {
            self.entries.remove(idx);
        }
        Ok(outcome)
    }
}
