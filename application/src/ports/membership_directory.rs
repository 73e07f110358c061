//! Membership directory port
//!
//! Defines the interface for looking up who belongs to a user group or a
//! channel. Lookups are paginated: each call returns one page plus an
//! optional continuation cursor, and an absent (or empty) cursor ends the
//! sequence.

use async_trait::async_trait;
use consensus_domain::{ChannelId, GroupId, Member};
use futures::Stream;
use futures::stream;
use std::fmt;
use thiserror::Error;

/// Errors that can occur during membership lookups
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("Group not found: {0}")]
    GroupNotFound(GroupId),

    #[error("Channel not found: {0}")]
    ChannelNotFound(ChannelId),

    #[error("Membership lookup for {source_ref} exceeded {max_pages} pages")]
    TooManyPages { source_ref: String, max_pages: usize },

    #[error("Request failed: {0}")]
    RequestFailed(String),
}

/// Where a membership list comes from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MembershipSource {
    Group(GroupId),
    Channel(ChannelId),
}

impl fmt::Display for MembershipSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MembershipSource::Group(id) => write!(f, "group {}", id),
            MembershipSource::Channel(id) => write!(f, "channel {}", id),
        }
    }
}

/// One page of members.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberPage {
    pub members: Vec<Member>,
    pub next_cursor: Option<String>,
}

impl MemberPage {
    pub fn last(members: Vec<Member>) -> Self {
        Self {
            members,
            next_cursor: None,
        }
    }

    pub fn with_cursor(members: Vec<Member>, cursor: impl Into<String>) -> Self {
        Self {
            members,
            next_cursor: Some(cursor.into()),
        }
    }
}

/// Read-only directory of group and channel membership.
///
/// Infrastructure adapters implement this against the chat platform.
#[async_trait]
pub trait MembershipDirectory: Send + Sync {
    /// Fetch one page of a user group's members.
    async fn group_members(
        &self,
        group: &GroupId,
        cursor: Option<&str>,
    ) -> Result<MemberPage, DirectoryError>;

    /// Fetch one page of a channel's members, with bot/system flags set.
    async fn channel_members(
        &self,
        channel: &ChannelId,
        cursor: Option<&str>,
    ) -> Result<MemberPage, DirectoryError>;

    /// Fetch one page from either kind of source.
    async fn fetch_page(
        &self,
        source: &MembershipSource,
        cursor: Option<&str>,
    ) -> Result<MemberPage, DirectoryError> {
        match source {
            MembershipSource::Group(id) => self.group_members(id, cursor).await,
            MembershipSource::Channel(id) => self.channel_members(id, cursor).await,
        }
    }
}

enum Cursor {
    Start,
    Next(String),
    Done,
}

/// Lazily walk every page of `source`.
///
/// Yields one batch per page (possibly empty) until the directory stops
/// returning a cursor. Fails with [`DirectoryError::TooManyPages`] once
/// `max_pages` pages have been read and another is still announced.
pub fn member_pages<'a, D>(
    directory: &'a D,
    source: MembershipSource,
    max_pages: usize,
) -> impl Stream<Item = Result<Vec<Member>, DirectoryError>> + Send + 'a
where
    D: MembershipDirectory + ?Sized,
{
    stream::try_unfold((Cursor::Start, 0usize), move |(cursor, fetched)| {
        let source = source.clone();
        async move {
            let cursor = match cursor {
                Cursor::Done => return Ok(None),
                Cursor::Start => None,
                Cursor::Next(c) => Some(c),
            };
            if fetched >= max_pages {
                return Err(DirectoryError::TooManyPages {
                    source_ref: source.to_string(),
                    max_pages,
                });
            }

            let page = directory.fetch_page(&source, cursor.as_deref()).await?;
            tracing::debug!(
                "Fetched {} members from {} (page {})",
                page.members.len(),
                source,
                fetched + 1
            );

            let next = match page.next_cursor {
                Some(c) if !c.is_empty() => Cursor::Next(c),
                _ => Cursor::Done,
            };
            Ok(Some((page.members, (next, fetched + 1))))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::TryStreamExt;
    use std::sync::Mutex;

    /// Serves fixed pages keyed by cursor ("" = first page).
    struct PagedGroup {
        pages: Vec<MemberPage>,
        calls: Mutex<Vec<Option<String>>>,
    }

    #[async_trait]
    impl MembershipDirectory for PagedGroup {
        async fn group_members(
            &self,
            _group: &GroupId,
            cursor: Option<&str>,
        ) -> Result<MemberPage, DirectoryError> {
            self.calls.lock().unwrap().push(cursor.map(String::from));
            let index: usize = cursor.map(|c| c.parse().unwrap()).unwrap_or(0);
            Ok(self.pages[index].clone())
        }

        async fn channel_members(
            &self,
            channel: &ChannelId,
            _cursor: Option<&str>,
        ) -> Result<MemberPage, DirectoryError> {
            Err(DirectoryError::ChannelNotFound(channel.clone()))
        }
    }

    #[tokio::test]
    async fn test_walks_all_pages_including_empty_ones() {
        let directory = PagedGroup {
            pages: vec![
                MemberPage::with_cursor(vec![Member::user("U1")], "1"),
                MemberPage::with_cursor(vec![], "2"),
                MemberPage::last(vec![Member::user("U2"), Member::user("U3")]),
            ],
            calls: Mutex::new(Vec::new()),
        };

        let batches: Vec<Vec<Member>> =
            member_pages(&directory, MembershipSource::Group(GroupId::new("S1")), 10)
                .try_collect()
                .await
                .unwrap();

        assert_eq!(batches.len(), 3);
        assert!(batches[1].is_empty());
        assert_eq!(batches.iter().map(Vec::len).sum::<usize>(), 3);
        assert_eq!(
            *directory.calls.lock().unwrap(),
            vec![None, Some("1".to_string()), Some("2".to_string())]
        );
    }

    #[tokio::test]
    async fn test_empty_cursor_terminates() {
        let directory = PagedGroup {
            pages: vec![MemberPage::with_cursor(vec![Member::user("U1")], "")],
            calls: Mutex::new(Vec::new()),
        };
        let batches: Vec<Vec<Member>> =
            member_pages(&directory, MembershipSource::Group(GroupId::new("S1")), 10)
                .try_collect()
                .await
                .unwrap();
        assert_eq!(batches.len(), 1);
    }

    #[tokio::test]
    async fn test_page_limit() {
        let directory = PagedGroup {
            pages: vec![
                MemberPage::with_cursor(vec![Member::user("U1")], "1"),
                MemberPage::with_cursor(vec![Member::user("U2")], "0"),
            ],
            calls: Mutex::new(Vec::new()),
        };
        let result: Result<Vec<Vec<Member>>, _> =
            member_pages(&directory, MembershipSource::Group(GroupId::new("S1")), 3)
                .try_collect()
                .await;
        assert!(matches!(
            result,
            Err(DirectoryError::TooManyPages { max_pages: 3, .. })
        ));
        assert_eq!(directory.calls.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_fetch_page_dispatches_channel() {
        let directory = PagedGroup {
            pages: vec![],
            calls: Mutex::new(Vec::new()),
        };
        let result = directory
            .fetch_page(&MembershipSource::Channel(ChannelId::new("C1")), None)
            .await;
        assert_eq!(
            result,
            Err(DirectoryError::ChannelNotFound(ChannelId::new("C1")))
        );
    }
}
