use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::application::admin::audit::{AdminAuditService, AuditAction, AuditEntity, AuditVerb};
use crate::application::repos::{
    CoursesRepo, CreateModuleParams, ModulesRepo, ModulesWriteRepo, RepoError, UpdateModuleParams,
};
use crate::domain::entities::{CourseRecord, ModuleRecord};
use crate::domain::error::DomainError;
use crate::domain::ordering::resolve_sort_order;

#[derive(Debug, Error)]
pub enum AdminModuleError {
    #[error("{0} must not be empty")]
    ConstraintViolation(&'static str),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Repo(#[from] RepoError),
}

#[derive(Debug, Clone)]
pub struct CreateModuleCommand {
    pub title: String,
    pub description: String,
    /// Explicit position; appended after the last sibling when absent.
    pub sort_order: Option<i32>,
}

#[derive(Debug, Clone)]
pub struct UpdateModuleCommand {
    pub title: String,
    pub description: String,
}

#[derive(Clone)]
pub struct AdminModuleService {
    courses: Arc<dyn CoursesRepo>,
    reader: Arc<dyn ModulesRepo>,
    writer: Arc<dyn ModulesWriteRepo>,
    audit: AdminAuditService,
}

impl AdminModuleService {
    pub fn new(
        courses: Arc<dyn CoursesRepo>,
        reader: Arc<dyn ModulesRepo>,
        writer: Arc<dyn ModulesWriteRepo>,
        audit: AdminAuditService,
    ) -> Self {
        Self {
            courses,
            reader,
            writer,
            audit,
        }
    }

    /// The owner's course together with its modules in stored order.
    pub async fn course_with_modules(
        &self,
        owner: &str,
        course_id: Uuid,
    ) -> Result<(CourseRecord, Vec<ModuleRecord>), AdminModuleError> {
        let course = self.load_course(owner, course_id).await?;
        let modules = self.reader.list_modules(course.id).await?;
        Ok((course, modules))
    }

    pub async fn load_module(&self, owner: &str, id: Uuid) -> Result<ModuleRecord, AdminModuleError> {
        self.reader
            .find_module(owner, id)
            .await?
            .ok_or(AdminModuleError::NotFound("module"))
    }

    pub async fn create_module(
        &self,
        owner: &str,
        course_id: Uuid,
        command: CreateModuleCommand,
    ) -> Result<ModuleRecord, AdminModuleError> {
        let course = self.load_course(owner, course_id).await?;
        let title = required(&command.title, "title")?;

        let existing_max = self.reader.max_sort_order(course.id).await?;
        let sort_order = resolve_sort_order(command.sort_order, existing_max)?;

        let module = self
            .writer
            .create_module(CreateModuleParams {
                course_id: course.id,
                title,
                description: command.description.trim().to_string(),
                sort_order,
            })
            .await?;

        self.audit
            .record(
                owner,
                AuditAction::new(AuditEntity::Module, AuditVerb::Create),
                Some(module.id),
                &ModuleSnapshot::from(&module),
            )
            .await?;
        Ok(module)
    }

    pub async fn update_module(
        &self,
        owner: &str,
        id: Uuid,
        command: UpdateModuleCommand,
    ) -> Result<ModuleRecord, AdminModuleError> {
        let existing = self.load_module(owner, id).await?;
        let title = required(&command.title, "title")?;

        let module = self
            .writer
            .update_module(UpdateModuleParams {
                id: existing.id,
                title,
                description: command.description.trim().to_string(),
            })
            .await?;

        self.audit
            .record(
                owner,
                AuditAction::new(AuditEntity::Module, AuditVerb::Update),
                Some(module.id),
                &ModuleSnapshot::from(&module),
            )
            .await?;
        Ok(module)
    }

    /// Delete a module and its contents, returning the removed record.
    pub async fn delete_module(
        &self,
        owner: &str,
        id: Uuid,
    ) -> Result<ModuleRecord, AdminModuleError> {
        let module = self.load_module(owner, id).await?;
        self.writer.delete_module(module.id).await?;
        self.audit
            .record(
                owner,
                AuditAction::new(AuditEntity::Module, AuditVerb::Delete),
                Some(module.id),
                &ModuleSnapshot::from(&module),
            )
            .await?;
        Ok(module)
    }

    async fn load_course(&self, owner: &str, id: Uuid) -> Result<CourseRecord, AdminModuleError> {
        self.courses
            .find_course(owner, id)
            .await?
            .ok_or(AdminModuleError::NotFound("course"))
    }
}

#[derive(Debug, Serialize)]
struct ModuleSnapshot<'a> {
    course_id: Uuid,
    title: &'a str,
    sort_order: i32,
}

impl<'a> From<&'a ModuleRecord> for ModuleSnapshot<'a> {
    fn from(module: &'a ModuleRecord) -> Self {
        Self {
            course_id: module.course_id,
            title: &module.title,
            sort_order: module.sort_order,
        }
    }
}

fn required(value: &str, field: &'static str) -> Result<String, AdminModuleError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AdminModuleError::ConstraintViolation(field));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use time::OffsetDateTime;

    use crate::application::repos::{AuditRepo, SortOrderUpdate};
    use crate::domain::entities::AuditLogRecord;

    struct StubCourses {
        courses: Vec<CourseRecord>,
    }

    #[async_trait]
    impl CoursesRepo for StubCourses {
        async fn list_courses(&self, owner: &str) -> Result<Vec<CourseRecord>, RepoError> {
            Ok(self
                .courses
                .iter()
                .filter(|c| c.owner == owner)
                .cloned()
                .collect())
        }

        async fn find_course(
            &self,
            owner: &str,
            id: Uuid,
        ) -> Result<Option<CourseRecord>, RepoError> {
            Ok(self
                .courses
                .iter()
                .find(|c| c.owner == owner && c.id == id)
                .cloned())
        }

        async fn slug_exists(&self, _slug: &str, _exclude: Option<Uuid>) -> Result<bool, RepoError> {
            Ok(false)
        }
    }

    #[derive(Default)]
    struct MemoryModules {
        modules: Mutex<Vec<ModuleRecord>>,
    }

    #[async_trait]
    impl ModulesRepo for MemoryModules {
        async fn list_modules(&self, course_id: Uuid) -> Result<Vec<ModuleRecord>, RepoError> {
            let mut modules: Vec<_> = self
                .modules
                .lock()
                .unwrap()
                .iter()
                .filter(|m| m.course_id == course_id)
                .cloned()
                .collect();
            modules.sort_by_key(|m| m.sort_order);
            Ok(modules)
        }

        async fn find_module(
            &self,
            _owner: &str,
            id: Uuid,
        ) -> Result<Option<ModuleRecord>, RepoError> {
            Ok(self.modules.lock().unwrap().iter().find(|m| m.id == id).cloned())
        }

        async fn max_sort_order(&self, course_id: Uuid) -> Result<Option<i32>, RepoError> {
            Ok(self
                .modules
                .lock()
                .unwrap()
                .iter()
                .filter(|m| m.course_id == course_id)
                .map(|m| m.sort_order)
                .max())
        }
    }

    #[async_trait]
    impl ModulesWriteRepo for MemoryModules {
        async fn create_module(&self, params: CreateModuleParams) -> Result<ModuleRecord, RepoError> {
            let module = ModuleRecord {
                id: Uuid::new_v4(),
                course_id: params.course_id,
                title: params.title,
                description: params.description,
                sort_order: params.sort_order,
            };
            self.modules.lock().unwrap().push(module.clone());
            Ok(module)
        }

        async fn update_module(&self, params: UpdateModuleParams) -> Result<ModuleRecord, RepoError> {
            let mut modules = self.modules.lock().unwrap();
            let module = modules
                .iter_mut()
                .find(|m| m.id == params.id)
                .ok_or(RepoError::NotFound)?;
            module.title = params.title;
            module.description = params.description;
            Ok(module.clone())
        }

        async fn delete_module(&self, id: Uuid) -> Result<(), RepoError> {
            self.modules.lock().unwrap().retain(|m| m.id != id);
            Ok(())
        }

        async fn apply_module_order(
            &self,
            _owner: &str,
            _updates: &[SortOrderUpdate],
        ) -> Result<u64, RepoError> {
            unreachable!("not used in these tests")
        }
    }

    struct NullAudit;

    #[async_trait]
    impl AuditRepo for NullAudit {
        async fn append_log(&self, _record: AuditLogRecord) -> Result<(), RepoError> {
            Ok(())
        }
    }

    fn course(owner: &str) -> CourseRecord {
        CourseRecord {
            id: Uuid::new_v4(),
            owner: owner.into(),
            subject_id: Uuid::new_v4(),
            subject_title: "Maths".into(),
            title: "Algebra".into(),
            slug: format!("algebra-{owner}"),
            overview: "Symbols".into(),
            created_at: OffsetDateTime::now_utc(),
        }
    }

    fn add(title: &str) -> CreateModuleCommand {
        CreateModuleCommand {
            title: title.into(),
            description: String::new(),
            sort_order: None,
        }
    }

    #[tokio::test]
    async fn new_modules_append_per_course() {
        let first_course = course("alice");
        let second_course = course("alice");
        let modules = Arc::new(MemoryModules::default());
        let service = AdminModuleService::new(
            Arc::new(StubCourses {
                courses: vec![first_course.clone(), second_course.clone()],
            }),
            modules.clone(),
            modules,
            AdminAuditService::new(Arc::new(NullAudit)),
        );

        let a = service
            .create_module("alice", first_course.id, add("Groups"))
            .await
            .expect("a");
        let b = service
            .create_module("alice", first_course.id, add("Rings"))
            .await
            .expect("b");
        let other = service
            .create_module("alice", second_course.id, add("Fields"))
            .await
            .expect("other");

        assert_eq!(a.sort_order, 0);
        assert_eq!(b.sort_order, 1);
        assert_eq!(other.sort_order, 0);
        assert_eq!(b.ordinal_label(), "2");
        assert_eq!(b.display_name(), "1. Rings");
    }

    #[tokio::test]
    async fn explicit_order_is_kept_and_title_required() {
        let course = course("alice");
        let modules = Arc::new(MemoryModules::default());
        let service = AdminModuleService::new(
            Arc::new(StubCourses {
                courses: vec![course.clone()],
            }),
            modules.clone(),
            modules,
            AdminAuditService::new(Arc::new(NullAudit)),
        );

        let mut command = add("Late");
        command.sort_order = Some(7);
        let module = service
            .create_module("alice", course.id, command)
            .await
            .expect("module");
        assert_eq!(module.sort_order, 7);

        let err = service
            .create_module("alice", course.id, add(" "))
            .await
            .expect_err("blank title");
        assert!(matches!(err, AdminModuleError::ConstraintViolation("title")));
    }

    #[tokio::test]
    async fn foreign_course_is_not_found() {
        let course = course("alice");
        let modules = Arc::new(MemoryModules::default());
        let service = AdminModuleService::new(
            Arc::new(StubCourses {
                courses: vec![course.clone()],
            }),
            modules.clone(),
            modules,
            AdminAuditService::new(Arc::new(NullAudit)),
        );

        let err = service
            .create_module("mallory", course.id, add("Sneaky"))
            .await
            .expect_err("not owner");
        assert!(matches!(err, AdminModuleError::NotFound("course")));
    }
}
