//! ExamSessionController — the attempt lifecycle state machine.
//!
//! `NotStarted → InProgress → {Completed | Expired}`; expiry routes through
//! the same finish path as a manual submit. The in-progress snapshot is
//! persisted to the tenant store the moment it changes, so a crash or
//! reload resumes instead of restarting.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};

use praxis_core::constants::ACTIVE_EXAM_KEY;
use praxis_core::errors::{PraxisResult, SessionError};
use praxis_core::models::{ActiveExamState, AnswerDraft, ExamContext, ExamResult, ScheduleRecord};
use praxis_core::traits::{Collection, ITenantStorage};

/// Where the attempt currently is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExamPhase {
    NotStarted,
    InProgress,
    Completed,
    Expired,
}

/// Owns the lifecycle of one student's exam attempt.
///
/// Scope is an explicit [`ExamContext`]; there is no ambient "current exam"
/// state outside this struct and the persisted snapshot.
pub struct ExamSessionController {
    store: Arc<dyn ITenantStorage>,
    ctx: ExamContext,
    active: Mutex<Option<ActiveExamState>>,
    phase: Mutex<ExamPhase>,
    /// Result of the finished attempt; what a repeated finish call returns.
    last_result: Mutex<Option<ExamResult>>,
    /// Serializes overlapping finish calls for the same attempt.
    finish_lock: Mutex<()>,
}

impl ExamSessionController {
    pub fn new(store: Arc<dyn ITenantStorage>, ctx: ExamContext) -> Self {
        Self {
            store,
            ctx,
            active: Mutex::new(None),
            phase: Mutex::new(ExamPhase::NotStarted),
            last_result: Mutex::new(None),
            finish_lock: Mutex::new(()),
        }
    }

    /// The context this controller is scoped to.
    pub fn context(&self) -> &ExamContext {
        &self.ctx
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> ExamPhase {
        *self.lock_phase()
    }

    /// Snapshot of the in-progress attempt, if any.
    pub fn active_exam(&self) -> Option<ActiveExamState> {
        self.lock_active().clone()
    }

    /// Crash-recovery path: if a persisted snapshot exists for this student,
    /// reconstruct `InProgress` from it instead of starting fresh.
    pub fn resume(&self) -> PraxisResult<Option<ActiveExamState>> {
        let raw = self.store.kv_get(&self.ctx.student_id, ACTIVE_EXAM_KEY)?;
        let Some(raw) = raw else {
            return Ok(None);
        };
        let state: ActiveExamState = serde_json::from_value(raw)?;
        tracing::info!(
            attempt = %state.attempt_id,
            student = %state.student_id,
            "session: resumed in-progress attempt"
        );
        *self.lock_active() = Some(state.clone());
        *self.lock_phase() = ExamPhase::InProgress;
        Ok(Some(state))
    }

    /// Start a new attempt now.
    pub fn start(&self, schedule: &ScheduleRecord) -> PraxisResult<ActiveExamState> {
        self.start_at(schedule, Utc::now())
    }

    /// Start a new attempt with an explicit login time.
    ///
    /// Fails with `BankNotCached` when the schedule's question bank is not
    /// in the local store, and with `ExamAlreadyActive` when a snapshot for
    /// this student already exists (at most one attempt per student).
    pub fn start_at(
        &self,
        schedule: &ScheduleRecord,
        now: DateTime<Utc>,
    ) -> PraxisResult<ActiveExamState> {
        let mut active = self.lock_active();

        let existing = match active.as_ref() {
            Some(state) => Some(state.clone()),
            None => self
                .store
                .kv_get(&self.ctx.student_id, ACTIVE_EXAM_KEY)?
                .map(serde_json::from_value)
                .transpose()?,
        };
        if let Some(state) = existing {
            return Err(SessionError::ExamAlreadyActive {
                student_id: self.ctx.student_id.clone(),
                attempt_id: state.attempt_id,
            }
            .into());
        }

        if !self.store.has_bank(&schedule.bank_id)? {
            return Err(SessionError::BankNotCached {
                bank_id: schedule.bank_id.clone(),
            }
            .into());
        }

        let state = ActiveExamState::begin(self.ctx.student_id.clone(), schedule, now);
        // Persist before returning: this snapshot is what enables resume.
        self.store.kv_put(
            &self.ctx.student_id,
            ACTIVE_EXAM_KEY,
            &serde_json::to_value(&state)?,
        )?;

        tracing::info!(
            attempt = %state.attempt_id,
            schedule = %schedule.id,
            expires_at = %state.expires_at,
            "session: attempt started"
        );
        *active = Some(state.clone());
        *self.lock_phase() = ExamPhase::InProgress;
        Ok(state)
    }

    /// Record an answer draft. Last write wins per question id; only valid
    /// while the attempt is in progress.
    pub fn save_answer(&self, draft: &AnswerDraft) -> PraxisResult<()> {
        if *self.lock_phase() != ExamPhase::InProgress {
            return Err(SessionError::NoActiveExam {
                student_id: self.ctx.student_id.clone(),
            }
            .into());
        }
        self.store.put(
            Collection::Answers,
            &draft.question_id,
            &serde_json::to_value(draft)?,
        )
    }

    /// Cooperative expiry check at the wall clock.
    pub fn tick(&self) -> PraxisResult<Option<ExamResult>> {
        self.tick_at(Utc::now())
    }

    /// Cooperative expiry check at `now`: once the stored expiry has passed
    /// while in progress, the attempt auto-finishes with whatever drafts
    /// exist, marked time-expired.
    pub fn tick_at(&self, now: DateTime<Utc>) -> PraxisResult<Option<ExamResult>> {
        let expired = {
            let active = self.lock_active();
            matches!(active.as_ref(), Some(state) if state.is_expired(now))
        };
        if !expired {
            return Ok(None);
        }
        tracing::info!("session: attempt expired, auto-finishing");
        self.finish_at(now, true).map(Some)
    }

    /// Finish the attempt now, by manual submit.
    pub fn finish(&self) -> PraxisResult<ExamResult> {
        self.finish_at(Utc::now(), false)
    }

    /// Finish the attempt at `now`.
    ///
    /// Idempotent: if a result already exists for this attempt id, it is
    /// returned unchanged and nothing new is written. Otherwise the result
    /// is computed from the current drafts, written unsynced, and the
    /// snapshot plus scratch drafts are cleared. Purely local — this never
    /// blocks on network access.
    pub fn finish_at(&self, now: DateTime<Utc>, time_expired: bool) -> PraxisResult<ExamResult> {
        let _serialize = self.lock(&self.finish_lock);

        let state = match self.lock_active().clone() {
            Some(state) => state,
            None => {
                // Already finished: return the existing result.
                if let Some(result) = self.lock_last_result().clone() {
                    return Ok(result);
                }
                return Err(SessionError::NoActiveExam {
                    student_id: self.ctx.student_id.clone(),
                }
                .into());
            }
        };

        // Storage-level idempotency: an earlier finish for this attempt may
        // have committed before we were interrupted.
        if let Some(existing) = self.store.get_result(&state.attempt_id)? {
            self.clear_scratch()?;
            self.conclude(existing.clone(), time_expired);
            return Ok(existing);
        }

        let answers = self.collect_drafts()?;
        let result = ExamResult::from_drafts(
            state.attempt_id.clone(),
            state.student_id.clone(),
            state.schedule_id.clone(),
            answers,
            time_expired,
            now,
        );

        self.store.put_result(&result)?;
        self.clear_scratch()?;

        tracing::info!(
            attempt = %result.id,
            answered = result.answered_count,
            time_expired,
            "session: attempt finished, result queued unsynced"
        );
        self.conclude(result.clone(), time_expired);
        Ok(result)
    }

    fn collect_drafts(&self) -> PraxisResult<Vec<AnswerDraft>> {
        let rows = self.store.get_all(Collection::Answers)?;
        let mut drafts = Vec::with_capacity(rows.len());
        for (_, value) in rows {
            drafts.push(serde_json::from_value(value)?);
        }
        Ok(drafts)
    }

    /// Remove the snapshot and scratch drafts after a finish.
    fn clear_scratch(&self) -> PraxisResult<()> {
        self.store
            .kv_delete(&self.ctx.student_id, ACTIVE_EXAM_KEY)?;
        self.store.clear(&[Collection::Answers])
    }

    fn conclude(&self, result: ExamResult, time_expired: bool) {
        *self.lock_active() = None;
        *self.lock_phase() = if time_expired {
            ExamPhase::Expired
        } else {
            ExamPhase::Completed
        };
        *self.lock_last_result() = Some(result);
    }

    fn lock_active(&self) -> std::sync::MutexGuard<'_, Option<ActiveExamState>> {
        self.lock(&self.active)
    }

    fn lock_phase(&self) -> std::sync::MutexGuard<'_, ExamPhase> {
        self.lock(&self.phase)
    }

    fn lock_last_result(&self) -> std::sync::MutexGuard<'_, Option<ExamResult>> {
        self.lock(&self.last_result)
    }

    fn lock<'a, T>(&self, mutex: &'a Mutex<T>) -> std::sync::MutexGuard<'a, T> {
        // A poisoned lock means a panicked writer; the guarded state is
        // plain data, safe to keep using.
        mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
