use std::{fmt, sync::Arc};

use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::application::repos::{AuditRepo, RepoError};
use crate::domain::entities::AuditLogRecord;

/// What an audit entry is about. Also the prefix of the recorded action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditEntity {
    Course,
    Module,
    Content,
}

impl AuditEntity {
    pub fn as_str(self) -> &'static str {
        match self {
            AuditEntity::Course => "course",
            AuditEntity::Module => "module",
            AuditEntity::Content => "content",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditVerb {
    Create,
    Update,
    Delete,
    Reorder,
}

impl AuditVerb {
    pub fn as_str(self) -> &'static str {
        match self {
            AuditVerb::Create => "create",
            AuditVerb::Update => "update",
            AuditVerb::Delete => "delete",
            AuditVerb::Reorder => "reorder",
        }
    }
}

/// `course.create`, `content.reorder`, ...
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuditAction {
    pub entity: AuditEntity,
    pub verb: AuditVerb,
}

impl AuditAction {
    pub const fn new(entity: AuditEntity, verb: AuditVerb) -> Self {
        Self { entity, verb }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.entity.as_str(), self.verb.as_str())
    }
}

/// Appends owner actions on courses, modules and contents to the audit log.
#[derive(Clone)]
pub struct AdminAuditService {
    repo: Arc<dyn AuditRepo>,
}

impl AdminAuditService {
    pub fn new(repo: Arc<dyn AuditRepo>) -> Self {
        Self { repo }
    }

    /// Record `action` by `owner`. Reorders touch many rows and pass no `subject`.
    pub async fn record<S>(
        &self,
        owner: &str,
        action: AuditAction,
        subject: Option<Uuid>,
        payload: &S,
    ) -> Result<(), RepoError>
    where
        S: Serialize + ?Sized,
    {
        let payload_text = serde_json::to_string(payload).map_err(RepoError::from_persistence)?;

        self.repo
            .append_log(AuditLogRecord {
                id: Uuid::new_v4(),
                actor: owner.to_string(),
                action: action.to_string(),
                entity_type: action.entity.as_str().to_string(),
                entity_id: subject.map(|id| id.to_string()),
                payload_text: Some(payload_text),
                created_at: OffsetDateTime::now_utc(),
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actions_render_as_entity_dot_verb() {
        let action = AuditAction::new(AuditEntity::Content, AuditVerb::Reorder);
        assert_eq!(action.to_string(), "content.reorder");
        assert_eq!(
            AuditAction::new(AuditEntity::Course, AuditVerb::Delete).to_string(),
            "course.delete"
        );
    }
}
