use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::application::admin::audit::{AdminAuditService, AuditAction, AuditEntity, AuditVerb};
use crate::application::repos::{
    CoursesRepo, CoursesWriteRepo, CreateCourseParams, RepoError, SubjectsRepo,
    UpdateCourseParams,
};
use crate::domain::entities::{CourseRecord, SubjectRecord};
use crate::domain::slug::{SlugAsyncError, SlugError, generate_unique_slug_async, validate_slug};

#[derive(Debug, Error)]
pub enum AdminCourseError {
    #[error("{0} must not be empty")]
    ConstraintViolation(&'static str),
    #[error("subject does not exist")]
    UnknownSubject,
    #[error("slug is invalid: {0}")]
    InvalidSlug(#[source] SlugError),
    #[error("slug `{0}` is already in use")]
    SlugTaken(String),
    #[error("course not found")]
    NotFound,
    #[error(transparent)]
    Repo(#[from] RepoError),
}

#[derive(Debug, Clone)]
pub struct CourseCommand {
    pub subject_id: Uuid,
    pub title: String,
    /// Left blank to derive the slug from the title.
    pub slug: Option<String>,
    pub overview: String,
}

#[derive(Clone)]
pub struct AdminCourseService {
    subjects: Arc<dyn SubjectsRepo>,
    reader: Arc<dyn CoursesRepo>,
    writer: Arc<dyn CoursesWriteRepo>,
    audit: AdminAuditService,
}

impl AdminCourseService {
    pub fn new(
        subjects: Arc<dyn SubjectsRepo>,
        reader: Arc<dyn CoursesRepo>,
        writer: Arc<dyn CoursesWriteRepo>,
        audit: AdminAuditService,
    ) -> Self {
        Self {
            subjects,
            reader,
            writer,
            audit,
        }
    }

    pub async fn list_subjects(&self) -> Result<Vec<SubjectRecord>, AdminCourseError> {
        self.subjects
            .list_subjects()
            .await
            .map_err(AdminCourseError::from)
    }

    pub async fn list_courses(&self, owner: &str) -> Result<Vec<CourseRecord>, AdminCourseError> {
        self.reader
            .list_courses(owner)
            .await
            .map_err(AdminCourseError::from)
    }

    pub async fn load_course(
        &self,
        owner: &str,
        id: Uuid,
    ) -> Result<CourseRecord, AdminCourseError> {
        self.reader
            .find_course(owner, id)
            .await?
            .ok_or(AdminCourseError::NotFound)
    }

    pub async fn create_course(
        &self,
        owner: &str,
        command: CourseCommand,
    ) -> Result<CourseRecord, AdminCourseError> {
        let CourseCommand {
            subject_id,
            title,
            slug,
            overview,
        } = command;

        let title = required(title, "title")?;
        let overview = required(overview, "overview")?;
        self.ensure_subject(subject_id).await?;
        let slug = self.resolve_slug(&title, slug, None).await?;

        let course = self
            .writer
            .create_course(CreateCourseParams {
                owner: owner.to_string(),
                subject_id,
                title,
                slug,
                overview,
            })
            .await?;

        self.audit
            .record(
                owner,
                AuditAction::new(AuditEntity::Course, AuditVerb::Create),
                Some(course.id),
                &CourseSnapshot::from(&course),
            )
            .await?;
        Ok(course)
    }

    pub async fn update_course(
        &self,
        owner: &str,
        id: Uuid,
        command: CourseCommand,
    ) -> Result<CourseRecord, AdminCourseError> {
        let existing = self.load_course(owner, id).await?;

        let CourseCommand {
            subject_id,
            title,
            slug,
            overview,
        } = command;

        let title = required(title, "title")?;
        let overview = required(overview, "overview")?;
        self.ensure_subject(subject_id).await?;

        let slug = match slug.as_deref().map(str::trim) {
            Some(value) if value == existing.slug => existing.slug.clone(),
            _ => self.resolve_slug(&title, slug, Some(id)).await?,
        };

        let course = self
            .writer
            .update_course(UpdateCourseParams {
                id,
                owner: owner.to_string(),
                subject_id,
                title,
                slug,
                overview,
            })
            .await?;

        self.audit
            .record(
                owner,
                AuditAction::new(AuditEntity::Course, AuditVerb::Update),
                Some(course.id),
                &CourseSnapshot::from(&course),
            )
            .await?;
        Ok(course)
    }

    pub async fn delete_course(&self, owner: &str, id: Uuid) -> Result<(), AdminCourseError> {
        let course = self.load_course(owner, id).await?;
        self.writer.delete_course(owner, id).await?;
        self.audit
            .record(
                owner,
                AuditAction::new(AuditEntity::Course, AuditVerb::Delete),
                Some(id),
                &CourseSnapshot::from(&course),
            )
            .await?;
        Ok(())
    }

    async fn ensure_subject(&self, subject_id: Uuid) -> Result<(), AdminCourseError> {
        match self.subjects.find_subject(subject_id).await? {
            Some(_) => Ok(()),
            None => Err(AdminCourseError::UnknownSubject),
        }
    }

    async fn resolve_slug(
        &self,
        title: &str,
        explicit: Option<String>,
        exclude: Option<Uuid>,
    ) -> Result<String, AdminCourseError> {
        if let Some(explicit) = explicit.filter(|value| !value.trim().is_empty()) {
            let slug = validate_slug(&explicit).map_err(AdminCourseError::InvalidSlug)?;
            if self.reader.slug_exists(&slug, exclude).await? {
                return Err(AdminCourseError::SlugTaken(slug));
            }
            return Ok(slug);
        }

        let reader = self.reader.clone();
        match generate_unique_slug_async(title, move |candidate| {
            let reader = reader.clone();
            let candidate = candidate.to_string();
            async move {
                reader
                    .slug_exists(&candidate, exclude)
                    .await
                    .map(|exists| !exists)
            }
        })
        .await
        {
            Ok(slug) => Ok(slug),
            Err(SlugAsyncError::Slug(err)) => Err(AdminCourseError::InvalidSlug(err)),
            Err(SlugAsyncError::Predicate(err)) => Err(AdminCourseError::Repo(err)),
        }
    }
}

#[derive(Debug, Serialize)]
struct CourseSnapshot<'a> {
    title: &'a str,
    slug: &'a str,
    subject_id: Uuid,
}

impl<'a> From<&'a CourseRecord> for CourseSnapshot<'a> {
    fn from(course: &'a CourseRecord) -> Self {
        Self {
            title: &course.title,
            slug: &course.slug,
            subject_id: course.subject_id,
        }
    }
}

fn required(value: String, field: &'static str) -> Result<String, AdminCourseError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AdminCourseError::ConstraintViolation(field));
    }
    Ok(trimmed.to_string())
}
