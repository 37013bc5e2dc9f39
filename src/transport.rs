//! Transport boundary contracts.
//!
//! The link layer that establishes sessions and carries requests is an
//! external collaborator. This module models the seam: resource handles
//! and their registry, the events the link layer delivers, and the reply
//! every read request must receive synchronously.

use crate::error::{Result, SetupError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Handle of an addressable resource exposed to the peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ResourceId(pub u16);

impl std::fmt::Display for ResourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#06x}", self.0)
    }
}

/// Handle of an active link session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub u16);

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What a registered resource resolves to on a read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResourceKind {
    /// The single cursor-driven content resource.
    DynamicContent,

    /// One pre-split chunk, addressed by its table index.
    StaticChunk(usize),

    /// The one-byte chunk count.
    ChunkCount,
}

/// A registered resource: its handle, kind, and declared value bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceEntry {
    /// Assigned handle.
    pub id: ResourceId,

    /// What the resource resolves to.
    pub kind: ResourceKind,

    /// Largest value the resource may carry, declared at registration.
    pub max_size: usize,
}

/// Registry of resources exposed to the peer.
///
/// Handles are assigned sequentially at registration time, before any
/// session starts; the registry is read-only afterward. The handle budget
/// models the transport's finite attribute table; exhausting it is a
/// fatal setup failure.
#[derive(Debug, Clone)]
pub struct ResourceRegistry {
    entries: Vec<ResourceEntry>,
    budget: usize,
    next_handle: u16,
}

impl ResourceRegistry {
    /// Creates a registry with the given handle budget.
    #[must_use]
    pub const fn with_budget(budget: usize) -> Self {
        Self {
            entries: Vec::new(),
            budget,
            next_handle: 1,
        }
    }

    /// Registers a resource and returns its assigned handle.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::RegistrationExhausted`] when the handle budget
    /// is spent, or [`SetupError::ZeroSizeResource`] for a zero `max_size`.
    pub fn register(&mut self, kind: ResourceKind, max_size: usize) -> Result<ResourceId> {
        if max_size == 0 {
            return Err(SetupError::ZeroSizeResource.into());
        }
        if self.entries.len() >= self.budget {
            return Err(SetupError::RegistrationExhausted {
                budget: self.budget,
            }
            .into());
        }

        let id = ResourceId(self.next_handle);
        self.next_handle += 1;
        self.entries.push(ResourceEntry { id, kind, max_size });
        Ok(id)
    }

    /// Resolves a handle to its registration entry.
    #[must_use]
    pub fn resolve(&self, id: ResourceId) -> Option<&ResourceEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// Iterates over the registered entries in registration order.
    pub fn iter(&self) -> std::slice::Iter<'_, ResourceEntry> {
        self.entries.iter()
    }

    /// Returns the number of registered resources.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Checks whether no resources are registered.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a ResourceRegistry {
    type Item = &'a ResourceEntry;
    type IntoIter = std::slice::Iter<'a, ResourceEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Status carried in a read reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReplyStatus {
    /// The read was served.
    Success,

    /// The read addressed something the core cannot serve.
    Failure,
}

/// The synchronous reply to one read request.
///
/// Producing a `ReadReply` is the type-level form of the transport's
/// "must answer within the same callback" rule: the dispatch function
/// cannot return without one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadReply {
    /// Reply payload; empty for the terminal page and for failures.
    pub data: Vec<u8>,

    /// Reply status.
    pub status: ReplyStatus,
}

impl ReadReply {
    /// Builds a success reply carrying `data`.
    #[must_use]
    pub fn success(data: Vec<u8>) -> Self {
        Self {
            data,
            status: ReplyStatus::Success,
        }
    }

    /// Builds an empty failure reply.
    #[must_use]
    pub const fn failure() -> Self {
        Self {
            data: Vec::new(),
            status: ReplyStatus::Failure,
        }
    }

    /// Checks whether this reply succeeded.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == ReplyStatus::Success
    }
}

/// Events the link layer delivers to the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkEvent {
    /// A peer connected; a new session begins.
    Connected {
        /// Handle of the new session.
        session: SessionId,
    },

    /// The peer disconnected; the session ends.
    Disconnected,

    /// The peer issued a read against a resource.
    ReadRequest {
        /// Addressed resource.
        resource: ResourceId,
    },
}

/// Error a reply sink may raise when the transport rejects a reply.
///
/// Rejections are non-fatal to the core: they are logged and dropped,
/// never retried; the next peer request proceeds independently.
#[derive(Error, Debug)]
pub enum ReplyError {
    /// The session ended before the reply could be relayed.
    #[error("session closed before reply")]
    SessionClosed,

    /// The transport rejected the reply.
    #[error("transport rejected reply: {reason}")]
    Rejected {
        /// Transport-reported reason.
        reason: String,
    },
}

/// Outbound seam: relays one reply per read request to the peer.
pub trait ReplySink {
    /// Relays `reply` for the read against `resource`.
    ///
    /// # Errors
    ///
    /// Returns a [`ReplyError`] if the transport rejects the reply.
    fn reply(&mut self, resource: ResourceId, reply: &ReadReply)
    -> std::result::Result<(), ReplyError>;
}
