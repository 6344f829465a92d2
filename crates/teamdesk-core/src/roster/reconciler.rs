use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::api::ApiResult;
use crate::models::{EnrollmentRequest, SelectedParticipant, Student, Team};

use super::{compute_selectable_pool, EnrollmentGateway, ReconcileError, TeamDirectory};

/// Ticket for an outstanding team roster fetch.
///
/// Only the ticket from the most recent `begin_team_selection` is accepted by
/// `apply_team_roster`; older ones are stale and their results are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TeamSelection {
    pub team_id: i64,
    generation: u64,
}

/// What a successful `submit` enrolled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SubmitOutcome {
    pub from_team: usize,
    pub individual: usize,
    pub requests: usize,
}

/// Selection set for one enrollment session of one event.
///
/// Holds at most one team's roster (team-origin entries) plus any number of
/// individually picked students. Team-origin entries always come first, in
/// roster order, followed by individual entries in the order they were added.
/// No student id appears twice.
#[derive(Debug, Clone)]
pub struct ParticipantReconciler {
    event_id: i64,
    selection: Vec<SelectedParticipant>,
    active_team: Option<i64>,
    pending_team: Option<i64>,
    generation: u64,
    submitting: bool,
    error: Option<String>,
}

impl ParticipantReconciler {
    pub fn new(event_id: i64) -> Self {
        Self {
            event_id,
            selection: Vec::new(),
            active_team: None,
            pending_team: None,
            generation: 0,
            submitting: false,
            error: None,
        }
    }

    // =========================================================================
    // State
    // =========================================================================

    pub fn event_id(&self) -> i64 {
        self.event_id
    }

    pub fn selection(&self) -> &[SelectedParticipant] {
        &self.selection
    }

    pub fn len(&self) -> usize {
        self.selection.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selection.is_empty()
    }

    pub fn contains(&self, student_id: i64) -> bool {
        self.selection.iter().any(|p| p.id == student_id)
    }

    /// Team whose roster is currently in the selection
    pub fn active_team(&self) -> Option<i64> {
        self.active_team
    }

    /// Team whose roster fetch is outstanding, if any
    pub fn pending_team(&self) -> Option<i64> {
        self.pending_team
    }

    /// True while a roster fetch or a submission started with `begin_submit`
    /// is outstanding; the UI disables its controls meanwhile.
    pub fn is_loading(&self) -> bool {
        self.pending_team.is_some() || self.submitting
    }

    /// Message for the last recoverable failure, cleared by the next success
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn team_members(&self) -> impl Iterator<Item = &SelectedParticipant> {
        self.selection.iter().filter(|p| p.is_from_team())
    }

    pub fn individuals(&self) -> impl Iterator<Item = &SelectedParticipant> {
        self.selection.iter().filter(|p| !p.is_from_team())
    }

    // =========================================================================
    // Team selection
    // =========================================================================

    /// Select a team (or none) and load its roster through `directory`.
    ///
    /// On fetch failure the selection and the active team are left unchanged
    /// and the error is also kept in `error()`.
    pub async fn select_team<D>(&mut self, directory: &D, team_id: Option<i64>) -> Result<(), ReconcileError>
    where
        D: TeamDirectory + ?Sized,
    {
        let Some(ticket) = self.begin_team_selection(team_id) else {
            return Ok(());
        };
        let result = directory.fetch_team(ticket.team_id).await;
        self.apply_team_roster(ticket, result).map(|_| ())
    }

    /// First half of `select_team`, for callers that fetch the roster
    /// themselves (e.g. on a spawned task).
    ///
    /// `None` clears the team immediately: every team-origin entry is removed
    /// and `None` is returned. Otherwise a ticket is returned that must be
    /// handed to `apply_team_roster` with the fetch result. Either way any
    /// earlier outstanding ticket becomes stale.
    pub fn begin_team_selection(&mut self, team_id: Option<i64>) -> Option<TeamSelection> {
        self.generation += 1;
        match team_id {
            None => {
                self.pending_team = None;
                self.clear_team();
                None
            }
            Some(team_id) => {
                debug!(team_id, generation = self.generation, "Team selection started");
                self.pending_team = Some(team_id);
                Some(TeamSelection {
                    team_id,
                    generation: self.generation,
                })
            }
        }
    }

    /// Second half of `select_team`.
    ///
    /// Returns `Ok(false)` when the ticket is stale (a newer selection was
    /// started since) and the result was discarded, `Ok(true)` when the roster
    /// was applied.
    pub fn apply_team_roster(
        &mut self,
        ticket: TeamSelection,
        result: ApiResult<Team>,
    ) -> Result<bool, ReconcileError> {
        if ticket.generation != self.generation {
            debug!(
                team_id = ticket.team_id,
                generation = ticket.generation,
                current = self.generation,
                "Discarding stale team roster"
            );
            return Ok(false);
        }
        self.pending_team = None;

        match result {
            Ok(team) => {
                self.replace_team_entries(ticket.team_id, &team.members);
                self.error = None;
                Ok(true)
            }
            Err(e) => {
                warn!(team_id = ticket.team_id, error = %e, "Failed to load team roster");
                let err = ReconcileError::roster_fetch(&e);
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    fn clear_team(&mut self) {
        let before = self.selection.len();
        self.selection.retain(|p| !p.is_from_team());
        debug!(removed = before - self.selection.len(), "Team deselected");
        self.active_team = None;
    }

    /// Swap every team-origin entry for `members`, keeping individual entries
    /// after them. A member already picked individually stays an individual
    /// entry.
    fn replace_team_entries(&mut self, team_id: i64, members: &[Student]) {
        let individuals: Vec<SelectedParticipant> = self
            .selection
            .drain(..)
            .filter(|p| !p.is_from_team())
            .collect();

        let mut seen: HashSet<i64> = individuals.iter().map(|p| p.id).collect();
        let mut merged: Vec<SelectedParticipant> = Vec::with_capacity(members.len() + individuals.len());
        for member in members {
            if seen.insert(member.id) {
                merged.push(SelectedParticipant::from_team(member, team_id));
            }
        }
        let from_team = merged.len();
        merged.extend(individuals);

        info!(team_id, from_team, total = merged.len(), "Team roster applied");
        self.selection = merged;
        self.active_team = Some(team_id);
    }

    // =========================================================================
    // Individual picks
    // =========================================================================

    /// Append a hand-picked student. Returns false (and changes nothing) if the
    /// student is already selected.
    pub fn add_individual(&mut self, candidate: &Student) -> bool {
        if self.contains(candidate.id) {
            debug!(student_id = candidate.id, "Student already selected");
            return false;
        }
        self.selection.push(SelectedParticipant::individual(candidate));
        true
    }

    /// Remove one entry of either origin. The active team is kept even if this
    /// empties its entries.
    pub fn remove_participant(&mut self, student_id: i64) -> bool {
        let before = self.selection.len();
        self.selection.retain(|p| p.id != student_id);
        self.selection.len() != before
    }

    /// `compute_selectable_pool` against this selection
    pub fn selectable_pool<'a>(
        &self,
        all: &'a [Student],
        event_participants: &HashSet<i64>,
        search_term: &str,
        class_filter: Option<&str>,
    ) -> Vec<&'a Student> {
        compute_selectable_pool(all, &self.selection, event_participants, search_term, class_filter)
    }

    // =========================================================================
    // Submission
    // =========================================================================

    /// The enrollment batches `submit` would send, team batch first
    pub fn enrollment_requests(&self) -> Result<Vec<EnrollmentRequest>, ReconcileError> {
        if self.selection.is_empty() {
            return Err(ReconcileError::NothingSelected);
        }

        let (team, individual): (Vec<&SelectedParticipant>, Vec<&SelectedParticipant>) =
            self.selection.iter().partition(|p| p.is_from_team());

        let mut requests = Vec::with_capacity(2);
        if let Some(team_id) = self.active_team {
            if !team.is_empty() {
                requests.push(EnrollmentRequest::team_batch(
                    team_id,
                    team.iter().map(|p| p.id).collect(),
                ));
            }
        }
        if !individual.is_empty() {
            requests.push(EnrollmentRequest::individual_batch(
                individual.iter().map(|p| p.id).collect(),
            ));
        }
        Ok(requests)
    }

    /// Send the selection to `gateway`, one request per origin.
    ///
    /// Stops at the first failing request. The selection is kept on failure
    /// so the user can retry; on success the caller drops the reconciler.
    /// Does not set `is_loading()`; callers that render while sending use
    /// `begin_submit` and `finish_submit`.
    pub async fn submit<G>(&mut self, gateway: &G) -> Result<SubmitOutcome, ReconcileError>
    where
        G: EnrollmentGateway + ?Sized,
    {
        let pending = self.prepare_submission()?;
        let result = pending.send(gateway).await;
        self.complete_submission(result)
    }

    /// First half of `submit`: validate the selection and mark the
    /// reconciler as loading. The returned batches are sent with
    /// `PendingSubmission::send` and the result handed to `finish_submit`.
    pub fn begin_submit(&mut self) -> Result<PendingSubmission, ReconcileError> {
        let pending = self.prepare_submission()?;
        self.submitting = true;
        Ok(pending)
    }

    /// Second half of `submit`. Clears the loading flag whatever the result.
    pub fn finish_submit(&mut self, result: ApiResult<SubmitOutcome>) -> Result<SubmitOutcome, ReconcileError> {
        self.submitting = false;
        self.complete_submission(result)
    }

    /// Abandon a submission started with `begin_submit` without a result,
    /// e.g. when the sending task was cancelled.
    pub fn cancel_submit(&mut self) {
        if self.submitting {
            debug!(event_id = self.event_id, "Submission cancelled");
        }
        self.submitting = false;
    }

    fn prepare_submission(&mut self) -> Result<PendingSubmission, ReconcileError> {
        match self.enrollment_requests() {
            Ok(requests) => Ok(PendingSubmission {
                event_id: self.event_id,
                requests,
            }),
            Err(e) => {
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    fn complete_submission(&mut self, result: ApiResult<SubmitOutcome>) -> Result<SubmitOutcome, ReconcileError> {
        match result {
            Ok(outcome) => {
                self.error = None;
                info!(
                    event_id = self.event_id,
                    from_team = outcome.from_team,
                    individual = outcome.individual,
                    "Participants enrolled"
                );
                Ok(outcome)
            }
            Err(e) => {
                let err = ReconcileError::submission(&e);
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }
}

/// Enrollment batches for one submission, team batch first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSubmission {
    event_id: i64,
    requests: Vec<EnrollmentRequest>,
}

impl PendingSubmission {
    pub fn requests(&self) -> &[EnrollmentRequest] {
        &self.requests
    }

    /// Send every batch in order, stopping at the first failure
    pub async fn send<G>(&self, gateway: &G) -> ApiResult<SubmitOutcome>
    where
        G: EnrollmentGateway + ?Sized,
    {
        let mut outcome = SubmitOutcome::default();
        for request in &self.requests {
            if let Err(e) = gateway.submit_participants(self.event_id, request).await {
                warn!(
                    event_id = self.event_id,
                    from_team = request.is_from_team,
                    error = %e,
                    "Failed to submit participants"
                );
                return Err(e);
            }
            if request.is_from_team {
                outcome.from_team += request.student_ids.len();
            } else {
                outcome.individual += request.student_ids.len();
            }
            outcome.requests += 1;
        }
        Ok(outcome)
    }
}
