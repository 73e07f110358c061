//! Resolve Voters use case
//!
//! Turns user, group and channel references into one deduplicated,
//! size-bounded list of voter ids. Group memberships are fetched
//! concurrently; channel membership is streamed page by page and the walk
//! stops as soon as the limit is exceeded.

use crate::config::EngineConfig;
use crate::ports::membership_directory::{
    DirectoryError, MembershipDirectory, MembershipSource, member_pages,
};
use consensus_domain::{
    ChannelId, DomainError, ErrorCategory, GroupId, Member, ReferenceInput, UserId,
    VoterSetBuilder, parse_group_references, parse_user_references,
};
use futures::TryStreamExt;
use futures::future::try_join_all;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur while resolving voters
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveVotersError {
    #[error("Unresolved group handles: {}", .0.join(", "))]
    UnresolvedGroups(Vec<String>),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Membership lookup failed: {0}")]
    Directory(#[from] DirectoryError),
}

impl ResolveVotersError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ResolveVotersError::UnresolvedGroups(_) => ErrorCategory::Validation,
            ResolveVotersError::Domain(e) => e.category(),
            ResolveVotersError::Directory(_) => ErrorCategory::Dependency,
        }
    }
}

/// Who may vote, as entered by the decision's creator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoterSelection {
    pub users: ReferenceInput,
    pub groups: ReferenceInput,
    /// Expand to every human member of this channel
    pub channel: Option<ChannelId>,
}

impl VoterSelection {
    pub fn users(users: impl Into<ReferenceInput>) -> Self {
        Self {
            users: users.into(),
            ..Default::default()
        }
    }

    pub fn with_groups(mut self, groups: impl Into<ReferenceInput>) -> Self {
        self.groups = groups.into();
        self
    }

    pub fn with_channel(mut self, channel: ChannelId) -> Self {
        self.channel = Some(channel);
        self
    }
}

/// Output of voter resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedVoters {
    /// Deduplicated voter ids in first-seen order
    pub user_ids: Vec<UserId>,
    /// User tokens that were not recognized as references
    pub ignored_references: Vec<String>,
    pub groups_expanded: usize,
}

/// Use case for building a decision's voter set
pub struct ResolveVotersUseCase<D: MembershipDirectory + 'static> {
    directory: Arc<D>,
    config: EngineConfig,
}

impl<D: MembershipDirectory + 'static> ResolveVotersUseCase<D> {
    pub fn new(directory: Arc<D>, config: EngineConfig) -> Self {
        Self { directory, config }
    }

    pub async fn execute(
        &self,
        selection: &VoterSelection,
    ) -> Result<ResolvedVoters, ResolveVotersError> {
        let users = parse_user_references(&selection.users);
        let groups = parse_group_references(&selection.groups);

        if !groups.unresolved_handles.is_empty() {
            return Err(ResolveVotersError::UnresolvedGroups(
                groups.unresolved_handles,
            ));
        }
        if !users.ignored.is_empty() {
            debug!("Ignoring unrecognized user references: {:?}", users.ignored);
        }

        let mut builder = VoterSetBuilder::new(self.config.max_voters);
        builder.extend(users.user_ids);

        // One fetch per distinct group id; the parser already deduplicated them
        let memberships =
            try_join_all(groups.group_ids.iter().map(|id| self.group_members(id))).await?;
        for members in memberships {
            builder.extend(members.into_iter().map(|m| m.user_id));
        }

        // An oversized set is rejected by build(), so skip the channel walk
        if let Some(channel) = &selection.channel
            && !builder.exceeds_limit()
        {
            let mut pages = std::pin::pin!(member_pages(
                self.directory.as_ref(),
                MembershipSource::Channel(channel.clone()),
                self.config.max_membership_pages,
            ));
            while let Some(page) = pages.try_next().await? {
                builder.extend_humans(&page);
                if builder.exceeds_limit() {
                    break;
                }
            }
        }

        let user_ids = builder.build()?;
        info!(
            "Resolved {} voters ({} groups{})",
            user_ids.len(),
            groups.group_ids.len(),
            if selection.channel.is_some() {
                ", channel expanded"
            } else {
                ""
            }
        );

        Ok(ResolvedVoters {
            user_ids,
            ignored_references: users.ignored,
            groups_expanded: groups.group_ids.len(),
        })
    }

    async fn group_members(&self, group: &GroupId) -> Result<Vec<Member>, DirectoryError> {
        member_pages(
            self.directory.as_ref(),
            MembershipSource::Group(group.clone()),
            self.config.max_membership_pages,
        )
        .try_concat()
        .await
    }
}
