use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use url::Url;
use uuid::Uuid;

use crate::application::admin::audit::{AdminAuditService, AuditAction, AuditEntity, AuditVerb};
use crate::application::repos::{
    ContentItemFields, ContentsRepo, ContentsWriteRepo, CreateContentParams, ModulesRepo,
    RepoError, UpdateContentItemParams,
};
use crate::domain::entities::{ContentItemRecord, ContentRecord, ModuleRecord};
use crate::domain::error::DomainError;
use crate::domain::ordering::resolve_sort_order;
use crate::domain::types::ContentKind;

#[derive(Debug, Error)]
pub enum AdminContentError {
    #[error("{0} must not be empty")]
    ConstraintViolation(&'static str),
    #[error("`{value}` is not an absolute URL")]
    InvalidUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Repo(#[from] RepoError),
}

/// Raw form values for a content item; only the field matching the kind is
/// kept.
#[derive(Debug, Clone, Default)]
pub struct ContentItemInput {
    pub title: String,
    pub body: Option<String>,
    pub file_path: Option<String>,
    pub url: Option<String>,
}

#[derive(Clone)]
pub struct AdminContentService {
    modules: Arc<dyn ModulesRepo>,
    reader: Arc<dyn ContentsRepo>,
    writer: Arc<dyn ContentsWriteRepo>,
    audit: AdminAuditService,
}

impl AdminContentService {
    pub fn new(
        modules: Arc<dyn ModulesRepo>,
        reader: Arc<dyn ContentsRepo>,
        writer: Arc<dyn ContentsWriteRepo>,
        audit: AdminAuditService,
    ) -> Self {
        Self {
            modules,
            reader,
            writer,
            audit,
        }
    }

    /// The owner's module and its contents in stored order.
    pub async fn module_contents(
        &self,
        owner: &str,
        module_id: Uuid,
    ) -> Result<(ModuleRecord, Vec<ContentRecord>), AdminContentError> {
        let module = self.load_module(owner, module_id).await?;
        let contents = self.reader.list_contents(module.id).await?;
        Ok((module, contents))
    }

    /// An item of `kind` placed in the owner's module `module_id`. A missing
    /// module, an item placed elsewhere and a kind mismatch all read as missing.
    pub async fn load_item(
        &self,
        owner: &str,
        module_id: Uuid,
        kind: ContentKind,
        item_id: Uuid,
    ) -> Result<ContentItemRecord, AdminContentError> {
        let module = self.load_module(owner, module_id).await?;
        self.reader
            .find_item(owner, module.id, item_id)
            .await?
            .filter(|item| item.kind == kind)
            .ok_or(AdminContentError::NotFound("content item"))
    }

    pub async fn create_content(
        &self,
        owner: &str,
        module_id: Uuid,
        kind: ContentKind,
        input: ContentItemInput,
        sort_order: Option<i32>,
    ) -> Result<ContentRecord, AdminContentError> {
        let module = self.load_module(owner, module_id).await?;
        let fields = validate_fields(kind, input)?;

        let existing_max = self.reader.max_sort_order(module.id).await?;
        let sort_order = resolve_sort_order(sort_order, existing_max)?;

        let content = self
            .writer
            .create_content(CreateContentParams {
                module_id: module.id,
                owner: owner.to_string(),
                sort_order,
                fields,
            })
            .await?;

        self.audit
            .record(
                owner,
                AuditAction::new(AuditEntity::Content, AuditVerb::Create),
                Some(content.id),
                &ContentSnapshot::from(&content.item),
            )
            .await?;
        Ok(content)
    }

    pub async fn update_item(
        &self,
        owner: &str,
        module_id: Uuid,
        kind: ContentKind,
        item_id: Uuid,
        input: ContentItemInput,
    ) -> Result<ContentItemRecord, AdminContentError> {
        let existing = self.load_item(owner, module_id, kind, item_id).await?;
        let fields = validate_fields(kind, input)?;

        let item = self
            .writer
            .update_item(UpdateContentItemParams {
                item_id: existing.id,
                owner: owner.to_string(),
                fields,
            })
            .await?;

        self.audit
            .record(
                owner,
                AuditAction::new(AuditEntity::Content, AuditVerb::Update),
                Some(item.id),
                &ContentSnapshot::from(&item),
            )
            .await?;
        Ok(item)
    }

    /// Delete a content row and its item, returning the removed record.
    pub async fn delete_content(
        &self,
        owner: &str,
        id: Uuid,
    ) -> Result<ContentRecord, AdminContentError> {
        let content = self
            .reader
            .find_content(owner, id)
            .await?
            .ok_or(AdminContentError::NotFound("content"))?;

        self.writer.delete_content(content.id).await?;
        self.audit
            .record(
                owner,
                AuditAction::new(AuditEntity::Content, AuditVerb::Delete),
                Some(content.id),
                &ContentSnapshot::from(&content.item),
            )
            .await?;
        Ok(content)
    }

    async fn load_module(&self, owner: &str, id: Uuid) -> Result<ModuleRecord, AdminContentError> {
        self.modules
            .find_module(owner, id)
            .await?
            .ok_or(AdminContentError::NotFound("module"))
    }
}

/// Check the field a kind requires and drop the ones it does not use.
pub fn validate_fields(
    kind: ContentKind,
    input: ContentItemInput,
) -> Result<ContentItemFields, AdminContentError> {
    let title = non_blank(Some(input.title)).ok_or(AdminContentError::ConstraintViolation("title"))?;

    let mut fields = ContentItemFields {
        kind,
        title,
        body: None,
        file_path: None,
        url: None,
    };

    match kind {
        ContentKind::Text => {
            fields.body =
                Some(non_blank(input.body).ok_or(AdminContentError::ConstraintViolation("body"))?);
        }
        ContentKind::File | ContentKind::Image => {
            fields.file_path = Some(
                non_blank(input.file_path)
                    .ok_or(AdminContentError::ConstraintViolation("file"))?,
            );
        }
        ContentKind::Video => {
            let raw = non_blank(input.url).ok_or(AdminContentError::ConstraintViolation("url"))?;
            let parsed = Url::parse(&raw).map_err(|source| AdminContentError::InvalidUrl {
                value: raw.clone(),
                source,
            })?;
            fields.url = Some(parsed.to_string());
        }
    }

    Ok(fields)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

#[derive(Debug, Serialize)]
struct ContentSnapshot<'a> {
    kind: ContentKind,
    title: &'a str,
}

impl<'a> From<&'a ContentItemRecord> for ContentSnapshot<'a> {
    fn from(item: &'a ContentItemRecord) -> Self {
        Self {
            kind: item.kind,
            title: &item.title,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(title: &str) -> ContentItemInput {
        ContentItemInput {
            title: title.into(),
            ..ContentItemInput::default()
        }
    }

    #[test]
    fn text_requires_a_body() {
        let err = validate_fields(ContentKind::Text, input("Notes")).expect_err("no body");
        assert!(matches!(err, AdminContentError::ConstraintViolation("body")));

        let fields = validate_fields(
            ContentKind::Text,
            ContentItemInput {
                body: Some(" hello ".into()),
                url: Some("https://ignored.example".into()),
                ..input("Notes")
            },
        )
        .expect("valid text");
        assert_eq!(fields.body.as_deref(), Some("hello"));
        assert_eq!(fields.url, None);
    }

    #[test]
    fn video_requires_an_absolute_url() {
        let err = validate_fields(
            ContentKind::Video,
            ContentItemInput {
                url: Some("/relative/clip".into()),
                ..input("Clip")
            },
        )
        .expect_err("relative url");
        assert!(matches!(err, AdminContentError::InvalidUrl { .. }));

        let fields = validate_fields(
            ContentKind::Video,
            ContentItemInput {
                url: Some("https://video.example/watch?v=1".into()),
                ..input("Clip")
            },
        )
        .expect("valid video");
        assert_eq!(fields.url.as_deref(), Some("https://video.example/watch?v=1"));
    }

    #[test]
    fn files_and_images_need_a_path() {
        for kind in [ContentKind::File, ContentKind::Image] {
            let err = validate_fields(kind, input("Slides")).expect_err("no path");
            assert!(matches!(err, AdminContentError::ConstraintViolation("file")));
        }
    }

    #[test]
    fn title_is_required_for_every_kind() {
        for kind in ContentKind::ALL {
            let err = validate_fields(kind, input("   ")).expect_err("blank title");
            assert!(matches!(err, AdminContentError::ConstraintViolation("title")));
        }
    }
}
