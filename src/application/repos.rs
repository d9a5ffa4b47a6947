//! Repository traits describing persistence adapters.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::entities::{
    AuditLogRecord, ContentItemRecord, ContentRecord, CourseRecord, ModuleRecord, SubjectRecord,
};
use crate::domain::types::ContentKind;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("persistence error: {0}")]
    Persistence(String),
    #[error("duplicate record violates unique constraint `{constraint}`")]
    Duplicate { constraint: String },
    #[error("resource not found")]
    NotFound,
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
    #[error("integrity error: {message}")]
    Integrity { message: String },
    #[error("database timeout")]
    Timeout,
}

impl RepoError {
    pub fn from_persistence(err: impl std::fmt::Display) -> Self {
        Self::Persistence(err.to_string())
    }
}

/// A new position for one stored row, already scoped to a parent list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOrderUpdate {
    pub id: Uuid,
    pub sort_order: i32,
}

#[derive(Debug, Clone)]
pub struct CreateCourseParams {
    pub owner: String,
    pub subject_id: Uuid,
    pub title: String,
    pub slug: String,
    pub overview: String,
}

#[derive(Debug, Clone)]
pub struct UpdateCourseParams {
    pub id: Uuid,
    pub owner: String,
    pub subject_id: Uuid,
    pub title: String,
    pub slug: String,
    pub overview: String,
}

#[derive(Debug, Clone)]
pub struct CreateModuleParams {
    pub course_id: Uuid,
    pub title: String,
    pub description: String,
    pub sort_order: i32,
}

#[derive(Debug, Clone)]
pub struct UpdateModuleParams {
    pub id: Uuid,
    pub title: String,
    pub description: String,
}

/// Kind-specific fields of a content item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentItemFields {
    pub kind: ContentKind,
    pub title: String,
    pub body: Option<String>,
    pub file_path: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CreateContentParams {
    pub module_id: Uuid,
    pub owner: String,
    pub sort_order: i32,
    pub fields: ContentItemFields,
}

#[derive(Debug, Clone)]
pub struct UpdateContentItemParams {
    pub item_id: Uuid,
    pub owner: String,
    pub fields: ContentItemFields,
}

#[async_trait]
pub trait SubjectsRepo: Send + Sync {
    async fn list_subjects(&self) -> Result<Vec<SubjectRecord>, RepoError>;
    async fn find_subject(&self, id: Uuid) -> Result<Option<SubjectRecord>, RepoError>;
}

#[async_trait]
pub trait CoursesRepo: Send + Sync {
    /// Courses created by `owner`, newest first.
    async fn list_courses(&self, owner: &str) -> Result<Vec<CourseRecord>, RepoError>;
    async fn find_course(&self, owner: &str, id: Uuid) -> Result<Option<CourseRecord>, RepoError>;
    async fn slug_exists(&self, slug: &str, exclude: Option<Uuid>) -> Result<bool, RepoError>;
}

#[async_trait]
pub trait CoursesWriteRepo: Send + Sync {
    async fn create_course(&self, params: CreateCourseParams) -> Result<CourseRecord, RepoError>;
    async fn update_course(&self, params: UpdateCourseParams) -> Result<CourseRecord, RepoError>;
    async fn delete_course(&self, owner: &str, id: Uuid) -> Result<(), RepoError>;
}

#[async_trait]
pub trait ModulesRepo: Send + Sync {
    async fn list_modules(&self, course_id: Uuid) -> Result<Vec<ModuleRecord>, RepoError>;
    /// A module whose course belongs to `owner`.
    async fn find_module(&self, owner: &str, id: Uuid) -> Result<Option<ModuleRecord>, RepoError>;
    async fn max_sort_order(&self, course_id: Uuid) -> Result<Option<i32>, RepoError>;
}

#[async_trait]
pub trait ModulesWriteRepo: Send + Sync {
    async fn create_module(&self, params: CreateModuleParams) -> Result<ModuleRecord, RepoError>;
    async fn update_module(&self, params: UpdateModuleParams) -> Result<ModuleRecord, RepoError>;
    async fn delete_module(&self, id: Uuid) -> Result<(), RepoError>;
    /// Apply new positions atomically, skipping modules outside `owner`'s
    /// courses. Returns the number of rows updated.
    async fn apply_module_order(
        &self,
        owner: &str,
        updates: &[SortOrderUpdate],
    ) -> Result<u64, RepoError>;
}

#[async_trait]
pub trait ContentsRepo: Send + Sync {
    async fn list_contents(&self, module_id: Uuid) -> Result<Vec<ContentRecord>, RepoError>;
    async fn find_content(&self, owner: &str, id: Uuid) -> Result<Option<ContentRecord>, RepoError>;
    /// The owner's item as attached to `module_id`; items placed in other
    /// modules are not returned.
    async fn find_item(
        &self,
        owner: &str,
        module_id: Uuid,
        item_id: Uuid,
    ) -> Result<Option<ContentItemRecord>, RepoError>;
    async fn max_sort_order(&self, module_id: Uuid) -> Result<Option<i32>, RepoError>;
}

#[async_trait]
pub trait ContentsWriteRepo: Send + Sync {
    /// Insert the item and the content row pointing at it.
    async fn create_content(&self, params: CreateContentParams) -> Result<ContentRecord, RepoError>;
    async fn update_item(
        &self,
        params: UpdateContentItemParams,
    ) -> Result<ContentItemRecord, RepoError>;
    /// Remove the content row together with its item.
    async fn delete_content(&self, id: Uuid) -> Result<(), RepoError>;
    async fn apply_content_order(
        &self,
        owner: &str,
        updates: &[SortOrderUpdate],
    ) -> Result<u64, RepoError>;
}

#[async_trait]
pub trait AuditRepo: Send + Sync {
    async fn append_log(&self, record: AuditLogRecord) -> Result<(), RepoError>;
}

#[async_trait]
pub trait HealthRepo: Send + Sync {
    async fn health_check(&self) -> Result<(), RepoError>;
}
