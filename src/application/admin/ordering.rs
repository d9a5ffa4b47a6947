//! Persistence side of list reordering.
//!
//! Payloads arrive keyed by the identifiers the admin pages render, which are
//! row UUIDs. Identifiers outside the owner's courses are skipped rather than
//! rejected so a stale page cannot touch someone else's rows.

use std::sync::Arc;

use thiserror::Error;
use uuid::Uuid;

use crate::application::admin::audit::{AdminAuditService, AuditAction, AuditEntity, AuditVerb};
use crate::application::repos::{ContentsWriteRepo, ModulesWriteRepo, RepoError, SortOrderUpdate};
use crate::domain::ordering::{ItemId, ReorderPayload};

#[derive(Debug, Error)]
pub enum AdminOrderingError {
    #[error("`{0}` is not a valid identifier")]
    InvalidIdentifier(ItemId),
    #[error("position {position} of `{id}` is out of range")]
    PositionOutOfRange { id: ItemId, position: u32 },
    #[error(transparent)]
    Repo(#[from] RepoError),
}

/// Result of applying one payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReorderOutcome {
    pub submitted: usize,
    pub applied: u64,
}

#[derive(Clone)]
pub struct AdminOrderingService {
    modules: Arc<dyn ModulesWriteRepo>,
    contents: Arc<dyn ContentsWriteRepo>,
    audit: AdminAuditService,
}

impl AdminOrderingService {
    pub fn new(
        modules: Arc<dyn ModulesWriteRepo>,
        contents: Arc<dyn ContentsWriteRepo>,
        audit: AdminAuditService,
    ) -> Self {
        Self {
            modules,
            contents,
            audit,
        }
    }

    pub async fn reorder_modules(
        &self,
        owner: &str,
        payload: &ReorderPayload,
    ) -> Result<ReorderOutcome, AdminOrderingError> {
        let updates = parse_updates(payload)?;
        if updates.is_empty() {
            return Ok(ReorderOutcome {
                submitted: 0,
                applied: 0,
            });
        }

        let applied = self.modules.apply_module_order(owner, &updates).await?;
        if applied > 0 {
            self.audit
                .record(
                    owner,
                    AuditAction::new(AuditEntity::Module, AuditVerb::Reorder),
                    None,
                    payload,
                )
                .await?;
        }

        Ok(ReorderOutcome {
            submitted: updates.len(),
            applied,
        })
    }

    pub async fn reorder_contents(
        &self,
        owner: &str,
        payload: &ReorderPayload,
    ) -> Result<ReorderOutcome, AdminOrderingError> {
        let updates = parse_updates(payload)?;
        if updates.is_empty() {
            return Ok(ReorderOutcome {
                submitted: 0,
                applied: 0,
            });
        }

        let applied = self.contents.apply_content_order(owner, &updates).await?;
        if applied > 0 {
            self.audit
                .record(
                    owner,
                    AuditAction::new(AuditEntity::Content, AuditVerb::Reorder),
                    None,
                    payload,
                )
                .await?;
        }

        Ok(ReorderOutcome {
            submitted: updates.len(),
            applied,
        })
    }
}

/// Translate payload entries into row updates, failing on the first key that
/// is not a UUID.
pub fn parse_updates(payload: &ReorderPayload) -> Result<Vec<SortOrderUpdate>, AdminOrderingError> {
    payload
        .iter()
        .map(|(id, position)| {
            let uuid = Uuid::parse_str(id.as_str())
                .map_err(|_| AdminOrderingError::InvalidIdentifier(id.clone()))?;
            let sort_order =
                i32::try_from(position).map_err(|_| AdminOrderingError::PositionOutOfRange {
                    id: id.clone(),
                    position,
                })?;
            Ok(SortOrderUpdate {
                id: uuid,
                sort_order,
            })
        })
        .collect()
}
