//! Hand-written port mocks shared by the use case tests.

use crate::ports::clock::Clock;
use crate::ports::decision_events::{DecisionEvent, DecisionEventSink};
use crate::ports::decision_store::{DecisionStore, FinalizeWrite, StoreError};
use crate::ports::membership_directory::{DirectoryError, MemberPage, MembershipDirectory};
use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use consensus_domain::{
    ChannelId, Decision, DecisionId, FinalizationRecord, GroupId, Member, UserId, Vote, Voter,
};
use std::collections::HashMap;
use std::sync::Mutex;

pub(crate) fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, 1, 9, 0, 0).unwrap()
}

// === Clock ===

pub(crate) struct FixedClock(Mutex<DateTime<Utc>>);

impl FixedClock {
    pub(crate) fn at(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    pub(crate) fn advance(&self, by: Duration) {
        let mut now = self.0.lock().unwrap();
        *now += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.0.lock().unwrap()
    }
}

// === Store ===

#[derive(Default)]
pub(crate) struct MockStore {
    decisions: Mutex<HashMap<DecisionId, Decision>>,
    voters: Mutex<HashMap<DecisionId, Vec<Voter>>>,
    votes: Mutex<HashMap<(DecisionId, UserId), Vote>>,
    pub(crate) finalize_writes: Mutex<usize>,
    pub(crate) fail_writes: Mutex<bool>,
}

impl MockStore {
    pub(crate) fn decision_count(&self) -> usize {
        self.decisions.lock().unwrap().len()
    }

    pub(crate) fn voter_count(&self) -> usize {
        self.voters.lock().unwrap().values().map(Vec::len).sum()
    }

    fn check_writable(&self) -> Result<(), StoreError> {
        if *self.fail_writes.lock().unwrap() {
            Err(StoreError::Backend("write refused".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl DecisionStore for MockStore {
    async fn insert_decision(
        &self,
        decision: &Decision,
        voters: &[Voter],
    ) -> Result<(), StoreError> {
        self.check_writable()?;
        let mut decisions = self.decisions.lock().unwrap();
        if decisions.contains_key(&decision.id) {
            return Err(StoreError::AlreadyExists(decision.id.clone()));
        }
        decisions.insert(decision.id.clone(), decision.clone());
        self.voters
            .lock()
            .unwrap()
            .insert(decision.id.clone(), voters.to_vec());
        Ok(())
    }

    async fn get_decision(&self, id: &DecisionId) -> Result<Option<Decision>, StoreError> {
        Ok(self.decisions.lock().unwrap().get(id).cloned())
    }

    async fn get_voter(
        &self,
        decision_id: &DecisionId,
        user_id: &UserId,
    ) -> Result<Option<Voter>, StoreError> {
        Ok(self
            .voters
            .lock()
            .unwrap()
            .get(decision_id)
            .and_then(|voters| voters.iter().find(|v| &v.user_id == user_id).cloned()))
    }

    async fn list_voters(&self, decision_id: &DecisionId) -> Result<Vec<Voter>, StoreError> {
        Ok(self
            .voters
            .lock()
            .unwrap()
            .get(decision_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn upsert_vote(&self, vote: &Vote) -> Result<(), StoreError> {
        self.check_writable()?;
        let decisions = self.decisions.lock().unwrap();
        let decision = decisions
            .get(&vote.decision_id)
            .ok_or_else(|| StoreError::NotFound(vote.decision_id.clone()))?;
        if !decision.is_active() {
            return Err(StoreError::DecisionClosed {
                decision_id: vote.decision_id.clone(),
                status: decision.status(),
            });
        }
        // Hold the decision lock across the write so a finalize cannot interleave
        self.votes.lock().unwrap().insert(vote.key(), vote.clone());
        Ok(())
    }

    async fn list_votes(&self, decision_id: &DecisionId) -> Result<Vec<Vote>, StoreError> {
        Ok(self
            .votes
            .lock()
            .unwrap()
            .values()
            .filter(|v| &v.decision_id == decision_id)
            .cloned()
            .collect())
    }

    async fn finalize_if_active(
        &self,
        decision_id: &DecisionId,
        record: &FinalizationRecord,
    ) -> Result<FinalizeWrite, StoreError> {
        self.check_writable()?;
        let mut decisions = self.decisions.lock().unwrap();
        let decision = decisions
            .get_mut(decision_id)
            .ok_or_else(|| StoreError::NotFound(decision_id.clone()))?;
        if !decision.is_active() {
            return Ok(FinalizeWrite::AlreadyFinalized(decision.clone()));
        }
        decision
            .finalize(record.clone())
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        *self.finalize_writes.lock().unwrap() += 1;
        Ok(FinalizeWrite::Committed(decision.clone()))
    }

    async fn list_active_decisions(&self) -> Result<Vec<DecisionId>, StoreError> {
        let mut ids: Vec<_> = self
            .decisions
            .lock()
            .unwrap()
            .values()
            .filter(|d| d.is_active())
            .map(|d| d.id.clone())
            .collect();
        ids.sort();
        Ok(ids)
    }
}

// === Membership directory ===

/// Serves members in pages of `page_size`, counting first-page requests.
#[derive(Default)]
pub(crate) struct MockDirectory {
    groups: HashMap<GroupId, Vec<Member>>,
    channels: HashMap<ChannelId, Vec<Member>>,
    page_size: usize,
    failing_groups: Vec<GroupId>,
    pub(crate) group_fetches: Mutex<HashMap<GroupId, usize>>,
    pub(crate) page_requests: Mutex<usize>,
}

impl MockDirectory {
    pub(crate) fn new(page_size: usize) -> Self {
        Self {
            page_size,
            ..Default::default()
        }
    }

    pub(crate) fn with_group(mut self, id: &str, members: &[&str]) -> Self {
        self.groups.insert(
            GroupId::new(id),
            members.iter().map(|m| Member::user(*m)).collect(),
        );
        self
    }

    pub(crate) fn with_channel(mut self, id: &str, members: Vec<Member>) -> Self {
        self.channels.insert(ChannelId::new(id), members);
        self
    }

    pub(crate) fn with_failing_group(mut self, id: &str) -> Self {
        self.failing_groups.push(GroupId::new(id));
        self
    }

    pub(crate) fn fetches_for(&self, id: &str) -> usize {
        self.group_fetches
            .lock()
            .unwrap()
            .get(&GroupId::new(id))
            .copied()
            .unwrap_or(0)
    }

    fn page(&self, members: &[Member], cursor: Option<&str>) -> MemberPage {
        *self.page_requests.lock().unwrap() += 1;
        let start: usize = cursor.and_then(|c| c.parse().ok()).unwrap_or(0);
        let end = (start + self.page_size).min(members.len());
        let batch = members[start.min(end)..end].to_vec();
        if end < members.len() {
            MemberPage::with_cursor(batch, end.to_string())
        } else {
            MemberPage::last(batch)
        }
    }
}

#[async_trait]
impl MembershipDirectory for MockDirectory {
    async fn group_members(
        &self,
        group: &GroupId,
        cursor: Option<&str>,
    ) -> Result<MemberPage, DirectoryError> {
        if self.failing_groups.contains(group) {
            return Err(DirectoryError::RequestFailed(format!("{} unavailable", group)));
        }
        if cursor.is_none() {
            *self
                .group_fetches
                .lock()
                .unwrap()
                .entry(group.clone())
                .or_default() += 1;
        }
        let members = self
            .groups
            .get(group)
            .ok_or_else(|| DirectoryError::GroupNotFound(group.clone()))?;
        Ok(self.page(members, cursor))
    }

    async fn channel_members(
        &self,
        channel: &ChannelId,
        cursor: Option<&str>,
    ) -> Result<MemberPage, DirectoryError> {
        let members = self
            .channels
            .get(channel)
            .ok_or_else(|| DirectoryError::ChannelNotFound(channel.clone()))?;
        Ok(self.page(members, cursor))
    }
}

// === Events ===

#[derive(Default)]
pub(crate) struct RecordingEvents(pub(crate) Mutex<Vec<&'static str>>);

impl RecordingEvents {
    pub(crate) fn types(&self) -> Vec<&'static str> {
        self.0.lock().unwrap().clone()
    }
}

impl DecisionEventSink for RecordingEvents {
    fn record(&self, event: &DecisionEvent) {
        self.0.lock().unwrap().push(event.event_type());
    }
}
