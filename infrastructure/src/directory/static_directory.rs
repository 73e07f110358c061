//! Fixed, in-process membership directory.
//!
//! Serves group and channel rosters registered up front, split into pages
//! of `page_size` members with a numeric offset as the continuation cursor.
//! Useful for local runs and for exercising the paginated resolver against
//! a real adapter.

use async_trait::async_trait;
use consensus_application::ports::membership_directory::{
    DirectoryError, MemberPage, MembershipDirectory,
};
use consensus_domain::{ChannelId, GroupId, Member};
use std::collections::HashMap;

const DEFAULT_PAGE_SIZE: usize = 100;

#[derive(Debug, Clone)]
pub struct StaticMembershipDirectory {
    groups: HashMap<GroupId, Vec<Member>>,
    channels: HashMap<ChannelId, Vec<Member>>,
    page_size: usize,
}

impl Default for StaticMembershipDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl StaticMembershipDirectory {
    pub fn new() -> Self {
        Self {
            groups: HashMap::new(),
            channels: HashMap::new(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Members per page; clamped to at least one.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn with_group(mut self, group: impl Into<String>, members: Vec<Member>) -> Self {
        self.groups.insert(GroupId::new(group), members);
        self
    }

    pub fn with_channel(mut self, channel: impl Into<String>, members: Vec<Member>) -> Self {
        self.channels.insert(ChannelId::new(channel), members);
        self
    }

    fn page(&self, members: &[Member], cursor: Option<&str>) -> Result<MemberPage, DirectoryError> {
        let start = match cursor {
            None => 0,
            Some(c) => c
                .parse::<usize>()
                .map_err(|_| DirectoryError::RequestFailed(format!("invalid cursor '{}'", c)))?,
        };
        let start = start.min(members.len());
        let end = (start + self.page_size).min(members.len());
        let batch = members[start..end].to_vec();

        Ok(if end < members.len() {
            MemberPage::with_cursor(batch, end.to_string())
        } else {
            MemberPage::last(batch)
        })
    }
}

#[async_trait]
impl MembershipDirectory for StaticMembershipDirectory {
    async fn group_members(
        &self,
        group: &GroupId,
        cursor: Option<&str>,
    ) -> Result<MemberPage, DirectoryError> {
        let members = self
            .groups
            .get(group)
            .ok_or_else(|| DirectoryError::GroupNotFound(group.clone()))?;
        self.page(members, cursor)
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
        self.page(members, cursor)
    }
}
