//! Voter resolution primitives
//!
//! Parsing of heterogeneous user/group/channel references and the
//! deduplicating union of everything that was resolved. Membership lookups
//! themselves happen in the application layer.

pub mod parsing;
pub mod value_objects;
pub mod voter_set;

pub use parsing::{
    ParsedGroups, ParsedUsers, ReferenceInput, parse_channel_reference, parse_group_references,
    parse_user_references,
};
pub use value_objects::{ChannelId, GroupId, Member};
pub use voter_set::{VoterSetBuilder, voters_for};
