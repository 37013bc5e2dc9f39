//! Session lifecycle binding and read dispatch.
//!
//! The binder sits between the link layer and the paginators: it owns the
//! content, the cursor, and the resource registry, resets traversal state
//! on every session boundary, and answers each read synchronously.

use crate::config::{ServeConfig, ServeMode};
use crate::core::{ContentBuffer, Cursor};
use crate::error::{Result, SessionError};
use crate::paging::{PartitionTable, SequentialPager};
use crate::transport::{
    LinkEvent, ReadReply, ReplySink, ResourceId, ResourceKind, ResourceRegistry, SessionId,
};
use tracing::{debug, warn};

/// Binds session lifecycle events to the active paginator.
///
/// All resources are registered at construction, before any session
/// starts; registration failures surface here and are fatal. The single
/// active-session constraint of the transport is enforced explicitly
/// rather than assumed.
///
/// # Examples
///
/// ```
/// use fatserve::config::ServeConfig;
/// use fatserve::session::SessionBinder;
/// use fatserve::transport::SessionId;
///
/// let mut binder = SessionBinder::new(vec![9; 45], &ServeConfig::default()).unwrap();
/// let resource = binder.dynamic_resource().unwrap();
///
/// binder.on_session_start(SessionId(1)).unwrap();
/// let reply = binder.on_read(resource);
/// assert_eq!(reply.data.len(), 20);
/// ```
#[derive(Debug)]
pub struct SessionBinder {
    content: ContentBuffer,
    pager: SequentialPager,
    table: Option<PartitionTable>,
    registry: ResourceRegistry,
    dynamic: Option<ResourceId>,
    count: Option<ResourceId>,
    cursor: Cursor,
    active: Option<SessionId>,
}

impl SessionBinder {
    /// Builds a binder serving `bytes` under `config`.
    ///
    /// Content beyond `config.capacity` is truncated before any chunking.
    /// In static mode the partition table is built and every chunk plus
    /// the count resource is registered here.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for an invalid `config`, or a
    /// [`crate::error::SetupError`] if the static chunk budget or handle
    /// budget is exceeded.
    pub fn new(bytes: Vec<u8>, config: &ServeConfig) -> Result<Self> {
        config.validate()?;

        let content = ContentBuffer::new(bytes, config.capacity);
        let mut registry = ResourceRegistry::with_budget(config.handle_budget);
        let mut table = None;
        let mut dynamic = None;
        let mut count = None;

        match config.mode {
            ServeMode::Sequential => {
                dynamic = Some(registry.register(ResourceKind::DynamicContent, config.max_unit)?);
            }
            ServeMode::Static => {
                let built = PartitionTable::build(&content, config.max_unit)?;
                for chunk in &built {
                    registry.register(ResourceKind::StaticChunk(chunk.index), chunk.length)?;
                }
                count = Some(registry.register(ResourceKind::ChunkCount, 1)?);
                table = Some(built);
            }
        }

        debug!(
            content_len = content.len(),
            resources = registry.len(),
            mode = ?config.mode,
            "serving setup complete"
        );

        Ok(Self {
            content,
            pager: SequentialPager::new(config.max_unit),
            table,
            registry,
            dynamic,
            count,
            cursor: Cursor::new(),
            active: None,
        })
    }

    /// Returns the served content.
    #[must_use]
    pub const fn content(&self) -> &ContentBuffer {
        &self.content
    }

    /// Returns the partition table (static mode only).
    #[must_use]
    pub const fn partition_table(&self) -> Option<&PartitionTable> {
        self.table.as_ref()
    }

    /// Returns the resource registry.
    #[must_use]
    pub const fn registry(&self) -> &ResourceRegistry {
        &self.registry
    }

    /// Returns the dynamic content resource handle (sequential mode only).
    #[must_use]
    pub const fn dynamic_resource(&self) -> Option<ResourceId> {
        self.dynamic
    }

    /// Returns the chunk count resource handle (static mode only).
    #[must_use]
    pub const fn count_resource(&self) -> Option<ResourceId> {
        self.count
    }

    /// Returns the handle of the chunk resource at `index` (static mode).
    #[must_use]
    pub fn chunk_resource(&self, index: usize) -> Option<ResourceId> {
        // Chunk handles are assigned in index order at setup, but resolve
        // through the registry rather than assuming the numbering.
        self.registry
            .iter()
            .find(|entry| entry.kind == ResourceKind::StaticChunk(index))
            .map(|entry| entry.id)
    }

    /// Returns the active session handle, if any.
    #[must_use]
    pub const fn active_session(&self) -> Option<SessionId> {
        self.active
    }

    /// Returns the current cursor state.
    #[must_use]
    pub const fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Begins a session: resets the cursor for a fresh traversal.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::AlreadyActive`] if a session is already in
    /// progress; the transport supports exactly one peer at a time.
    pub fn on_session_start(&mut self, session: SessionId) -> Result<()> {
        if let Some(current) = self.active {
            return Err(SessionError::AlreadyActive { current: current.0 }.into());
        }
        self.active = Some(session);
        self.cursor.reset();
        debug!(%session, "session started");
        Ok(())
    }

    /// Ends the session. The reset here is deliberate even though the next
    /// start resets again: no stale traversal state may survive into the
    /// next session if the peer never reads.
    pub fn on_session_end(&mut self) {
        if let Some(session) = self.active.take() {
            debug!(%session, "session ended");
        }
        self.cursor.reset();
    }

    /// Answers one read request, synchronously.
    ///
    /// Dispatches on the addressed resource: the dynamic resource steps
    /// the sequential pager (the terminal empty page is a *success* with
    /// no data), chunk and count resources resolve through the partition
    /// table. Anomalies (unknown handle, missing table, read outside a
    /// session) yield a failure-status reply, never a panic.
    pub fn on_read(&mut self, resource: ResourceId) -> ReadReply {
        if self.active.is_none() {
            warn!(%resource, "read request with no active session");
            return ReadReply::failure();
        }

        let Some(entry) = self.registry.resolve(resource) else {
            warn!(%resource, "read for unknown resource");
            return ReadReply::failure();
        };

        match entry.kind {
            ResourceKind::DynamicContent => {
                let page = self.pager.next(&self.content, &mut self.cursor);
                ReadReply::success(page.data.to_vec())
            }
            ResourceKind::ChunkCount => self.table.as_ref().map_or_else(
                || {
                    warn!(%resource, "count resource without partition table");
                    ReadReply::failure()
                },
                |table| ReadReply::success(vec![table.total()]),
            ),
            ResourceKind::StaticChunk(index) => {
                let Some(table) = self.table.as_ref() else {
                    warn!(%resource, "chunk resource without partition table");
                    return ReadReply::failure();
                };
                match table.chunk_bytes(&self.content, index) {
                    Ok(bytes) => ReadReply::success(bytes.to_vec()),
                    Err(err) => {
                        warn!(%resource, %err, "chunk read failed");
                        ReadReply::failure()
                    }
                }
            }
        }
    }

    /// Routes one link event, relaying read replies through `sink`.
    ///
    /// A duplicate session start is logged and ignored (the link layer
    /// owns the real arbitration). A sink that rejects a reply is logged
    /// and ignored too: retrying makes no sense for a peer-initiated
    /// exchange, and the next request proceeds independently.
    pub fn handle_event(&mut self, event: &LinkEvent, sink: &mut dyn ReplySink) {
        match event {
            LinkEvent::Connected { session } => {
                if let Err(err) = self.on_session_start(*session) {
                    warn!(%session, %err, "ignoring session start");
                }
            }
            LinkEvent::Disconnected => self.on_session_end(),
            LinkEvent::ReadRequest { resource } => {
                let reply = self.on_read(*resource);
                if let Err(err) = sink.reply(*resource, &reply) {
                    warn!(%resource, %err, "reply rejected by transport");
                }
            }
        }
    }
}
