#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use lectern::application::repos::{
    AuditRepo, ContentsRepo, ContentsWriteRepo, CoursesRepo, CoursesWriteRepo, CreateContentParams,
    CreateCourseParams, CreateModuleParams, HealthRepo, ModulesRepo, ModulesWriteRepo, RepoError,
    SortOrderUpdate, SubjectsRepo, UpdateContentItemParams, UpdateCourseParams,
    UpdateModuleParams,
};
use lectern::domain::entities::{
    AuditLogRecord, ContentItemRecord, ContentRecord, CourseRecord, ModuleRecord, SubjectRecord,
};
use lectern::domain::types::ContentKind;
use lectern::infra::http::{AdminState, AdminStores, CsrfGuard, build_admin_router};
use time::OffsetDateTime;
use uuid::Uuid;

pub const OWNER: &str = "alice";
pub const CSRF_SECRET: &str = "integration-test-secret";

#[derive(Default)]
struct Inner {
    subjects: Vec<SubjectRecord>,
    courses: Vec<CourseRecord>,
    modules: Vec<ModuleRecord>,
    contents: Vec<ContentRecord>,
    audit: Vec<AuditLogRecord>,
}

/// Repository double holding every table in memory.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn seed_subject(&self, title: &str) -> SubjectRecord {
        let subject = SubjectRecord {
            id: Uuid::new_v4(),
            title: title.to_string(),
            slug: title.to_lowercase(),
        };
        self.inner.lock().unwrap().subjects.push(subject.clone());
        subject
    }

    pub fn seed_course(&self, owner: &str, title: &str) -> CourseRecord {
        let subject = self.seed_subject("Physics");
        let course = CourseRecord {
            id: Uuid::new_v4(),
            owner: owner.to_string(),
            subject_id: subject.id,
            subject_title: subject.title,
            title: title.to_string(),
            slug: format!("{}-{}", title.to_lowercase().replace(' ', "-"), Uuid::new_v4()),
            overview: format!("About {title}"),
            created_at: OffsetDateTime::now_utc(),
        };
        self.inner.lock().unwrap().courses.push(course.clone());
        course
    }

    pub fn seed_module(&self, course_id: Uuid, title: &str, sort_order: i32) -> ModuleRecord {
        let module = ModuleRecord {
            id: Uuid::new_v4(),
            course_id,
            title: title.to_string(),
            description: String::new(),
            sort_order,
        };
        self.inner.lock().unwrap().modules.push(module.clone());
        module
    }

    pub fn seed_text(
        &self,
        module_id: Uuid,
        owner: &str,
        title: &str,
        sort_order: i32,
    ) -> ContentRecord {
        let now = OffsetDateTime::now_utc();
        let content = ContentRecord {
            id: Uuid::new_v4(),
            module_id,
            sort_order,
            item: ContentItemRecord {
                id: Uuid::new_v4(),
                owner: owner.to_string(),
                kind: ContentKind::Text,
                title: title.to_string(),
                body: Some("body".to_string()),
                file_path: None,
                url: None,
                created_at: now,
                updated_at: now,
            },
        };
        self.inner.lock().unwrap().contents.push(content.clone());
        content
    }

    pub fn module(&self, id: Uuid) -> Option<ModuleRecord> {
        let inner = self.inner.lock().unwrap();
        inner.modules.iter().find(|module| module.id == id).cloned()
    }

    pub fn content(&self, id: Uuid) -> Option<ContentRecord> {
        let inner = self.inner.lock().unwrap();
        inner.contents.iter().find(|content| content.id == id).cloned()
    }

    pub fn course(&self, id: Uuid) -> Option<CourseRecord> {
        let inner = self.inner.lock().unwrap();
        inner.courses.iter().find(|course| course.id == id).cloned()
    }

    pub fn audit_actions(&self) -> Vec<String> {
        let inner = self.inner.lock().unwrap();
        inner.audit.iter().map(|record| record.action.clone()).collect()
    }

    fn owns_course(inner: &Inner, owner: &str, course_id: Uuid) -> bool {
        inner
            .courses
            .iter()
            .any(|course| course.id == course_id && course.owner == owner)
    }

    fn owns_module(inner: &Inner, owner: &str, module_id: Uuid) -> bool {
        inner
            .modules
            .iter()
            .any(|module| module.id == module_id && Self::owns_course(inner, owner, module.course_id))
    }
}

#[async_trait]
impl SubjectsRepo for MemoryStore {
    async fn list_subjects(&self) -> Result<Vec<SubjectRecord>, RepoError> {
        Ok(self.inner.lock().unwrap().subjects.clone())
    }

    async fn find_subject(&self, id: Uuid) -> Result<Option<SubjectRecord>, RepoError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.subjects.iter().find(|subject| subject.id == id).cloned())
    }
}

#[async_trait]
impl CoursesRepo for MemoryStore {
    async fn list_courses(&self, owner: &str) -> Result<Vec<CourseRecord>, RepoError> {
        let inner = self.inner.lock().unwrap();
        let mut courses: Vec<_> = inner
            .courses
            .iter()
            .filter(|course| course.owner == owner)
            .cloned()
            .collect();
        courses.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(courses)
    }

    async fn find_course(&self, owner: &str, id: Uuid) -> Result<Option<CourseRecord>, RepoError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .courses
            .iter()
            .find(|course| course.id == id && course.owner == owner)
            .cloned())
    }

    async fn slug_exists(&self, slug: &str, exclude: Option<Uuid>) -> Result<bool, RepoError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .courses
            .iter()
            .any(|course| course.slug == slug && Some(course.id) != exclude))
    }
}

#[async_trait]
impl CoursesWriteRepo for MemoryStore {
    async fn create_course(&self, params: CreateCourseParams) -> Result<CourseRecord, RepoError> {
        let mut inner = self.inner.lock().unwrap();
        let subject_title = inner
            .subjects
            .iter()
            .find(|subject| subject.id == params.subject_id)
            .map(|subject| subject.title.clone())
            .ok_or(RepoError::NotFound)?;
        let course = CourseRecord {
            id: Uuid::new_v4(),
            owner: params.owner,
            subject_id: params.subject_id,
            subject_title,
            title: params.title,
            slug: params.slug,
            overview: params.overview,
            created_at: OffsetDateTime::now_utc(),
        };
        inner.courses.push(course.clone());
        Ok(course)
    }

    async fn update_course(&self, params: UpdateCourseParams) -> Result<CourseRecord, RepoError> {
        let mut inner = self.inner.lock().unwrap();
        let subject_title = inner
            .subjects
            .iter()
            .find(|subject| subject.id == params.subject_id)
            .map(|subject| subject.title.clone())
            .ok_or(RepoError::NotFound)?;
        let course = inner
            .courses
            .iter_mut()
            .find(|course| course.id == params.id && course.owner == params.owner)
            .ok_or(RepoError::NotFound)?;
        course.subject_id = params.subject_id;
        course.subject_title = subject_title;
        course.title = params.title;
        course.slug = params.slug;
        course.overview = params.overview;
        Ok(course.clone())
    }

    async fn delete_course(&self, owner: &str, id: Uuid) -> Result<(), RepoError> {
        let mut inner = self.inner.lock().unwrap();
        if !Self::owns_course(&inner, owner, id) {
            return Err(RepoError::NotFound);
        }
        let module_ids: Vec<Uuid> = inner
            .modules
            .iter()
            .filter(|module| module.course_id == id)
            .map(|module| module.id)
            .collect();
        inner
            .contents
            .retain(|content| !module_ids.contains(&content.module_id));
        inner.modules.retain(|module| module.course_id != id);
        inner.courses.retain(|course| course.id != id);
        Ok(())
    }
}

#[async_trait]
impl ModulesRepo for MemoryStore {
    async fn list_modules(&self, course_id: Uuid) -> Result<Vec<ModuleRecord>, RepoError> {
        let inner = self.inner.lock().unwrap();
        let mut modules: Vec<_> = inner
            .modules
            .iter()
            .filter(|module| module.course_id == course_id)
            .cloned()
            .collect();
        modules.sort_by_key(|module| module.sort_order);
        Ok(modules)
    }

    async fn find_module(&self, owner: &str, id: Uuid) -> Result<Option<ModuleRecord>, RepoError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .modules
            .iter()
            .find(|module| module.id == id && Self::owns_course(&inner, owner, module.course_id))
            .cloned())
    }

    async fn max_sort_order(&self, course_id: Uuid) -> Result<Option<i32>, RepoError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .modules
            .iter()
            .filter(|module| module.course_id == course_id)
            .map(|module| module.sort_order)
            .max())
    }
}

#[async_trait]
impl ModulesWriteRepo for MemoryStore {
    async fn create_module(&self, params: CreateModuleParams) -> Result<ModuleRecord, RepoError> {
        let module = ModuleRecord {
            id: Uuid::new_v4(),
            course_id: params.course_id,
            title: params.title,
            description: params.description,
            sort_order: params.sort_order,
        };
        self.inner.lock().unwrap().modules.push(module.clone());
        Ok(module)
    }

    async fn update_module(&self, params: UpdateModuleParams) -> Result<ModuleRecord, RepoError> {
        let mut inner = self.inner.lock().unwrap();
        let module = inner
            .modules
            .iter_mut()
            .find(|module| module.id == params.id)
            .ok_or(RepoError::NotFound)?;
        module.title = params.title;
        module.description = params.description;
        Ok(module.clone())
    }

    async fn delete_module(&self, id: Uuid) -> Result<(), RepoError> {
        let mut inner = self.inner.lock().unwrap();
        inner.contents.retain(|content| content.module_id != id);
        inner.modules.retain(|module| module.id != id);
        Ok(())
    }

    async fn apply_module_order(
        &self,
        owner: &str,
        updates: &[SortOrderUpdate],
    ) -> Result<u64, RepoError> {
        let mut inner = self.inner.lock().unwrap();
        let owned: Vec<Uuid> = inner
            .modules
            .iter()
            .filter(|module| Self::owns_course(&inner, owner, module.course_id))
            .map(|module| module.id)
            .collect();
        let mut applied = 0;
        for update in updates {
            if !owned.contains(&update.id) {
                continue;
            }
            if let Some(module) = inner.modules.iter_mut().find(|module| module.id == update.id) {
                module.sort_order = update.sort_order;
                applied += 1;
            }
        }
        Ok(applied)
    }
}

#[async_trait]
impl ContentsRepo for MemoryStore {
    async fn list_contents(&self, module_id: Uuid) -> Result<Vec<ContentRecord>, RepoError> {
        let inner = self.inner.lock().unwrap();
        let mut contents: Vec<_> = inner
            .contents
            .iter()
            .filter(|content| content.module_id == module_id)
            .cloned()
            .collect();
        contents.sort_by_key(|content| content.sort_order);
        Ok(contents)
    }

    async fn find_content(&self, owner: &str, id: Uuid) -> Result<Option<ContentRecord>, RepoError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .contents
            .iter()
            .find(|content| content.id == id && Self::owns_module(&inner, owner, content.module_id))
            .cloned())
    }

    async fn find_item(
        &self,
        owner: &str,
        module_id: Uuid,
        item_id: Uuid,
    ) -> Result<Option<ContentItemRecord>, RepoError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .contents
            .iter()
            .find(|content| {
                content.item.id == item_id
                    && content.module_id == module_id
                    && Self::owns_module(&inner, owner, module_id)
            })
            .map(|content| content.item.clone()))
    }

    async fn max_sort_order(&self, module_id: Uuid) -> Result<Option<i32>, RepoError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .contents
            .iter()
            .filter(|content| content.module_id == module_id)
            .map(|content| content.sort_order)
            .max())
    }
}

#[async_trait]
impl ContentsWriteRepo for MemoryStore {
    async fn create_content(&self, params: CreateContentParams) -> Result<ContentRecord, RepoError> {
        let now = OffsetDateTime::now_utc();
        let content = ContentRecord {
            id: Uuid::new_v4(),
            module_id: params.module_id,
            sort_order: params.sort_order,
            item: ContentItemRecord {
                id: Uuid::new_v4(),
                owner: params.owner,
                kind: params.fields.kind,
                title: params.fields.title,
                body: params.fields.body,
                file_path: params.fields.file_path,
                url: params.fields.url,
                created_at: now,
                updated_at: now,
            },
        };
        self.inner.lock().unwrap().contents.push(content.clone());
        Ok(content)
    }

    async fn update_item(
        &self,
        params: UpdateContentItemParams,
    ) -> Result<ContentItemRecord, RepoError> {
        let mut inner = self.inner.lock().unwrap();
        let content = inner
            .contents
            .iter_mut()
            .find(|content| content.item.id == params.item_id && content.item.owner == params.owner)
            .ok_or(RepoError::NotFound)?;
        content.item.title = params.fields.title;
        content.item.body = params.fields.body;
        content.item.file_path = params.fields.file_path;
        content.item.url = params.fields.url;
        content.item.updated_at = OffsetDateTime::now_utc();
        Ok(content.item.clone())
    }

    async fn delete_content(&self, id: Uuid) -> Result<(), RepoError> {
        self.inner
            .lock()
            .unwrap()
            .contents
            .retain(|content| content.id != id);
        Ok(())
    }

    async fn apply_content_order(
        &self,
        owner: &str,
        updates: &[SortOrderUpdate],
    ) -> Result<u64, RepoError> {
        let mut inner = self.inner.lock().unwrap();
        let owned: Vec<Uuid> = inner
            .contents
            .iter()
            .filter(|content| Self::owns_module(&inner, owner, content.module_id))
            .map(|content| content.id)
            .collect();
        let mut applied = 0;
        for update in updates {
            if !owned.contains(&update.id) {
                continue;
            }
            if let Some(content) = inner.contents.iter_mut().find(|content| content.id == update.id)
            {
                content.sort_order = update.sort_order;
                applied += 1;
            }
        }
        Ok(applied)
    }
}

#[async_trait]
impl AuditRepo for MemoryStore {
    async fn append_log(&self, record: AuditLogRecord) -> Result<(), RepoError> {
        self.inner.lock().unwrap().audit.push(record);
        Ok(())
    }
}

#[async_trait]
impl HealthRepo for MemoryStore {
    async fn health_check(&self) -> Result<(), RepoError> {
        Ok(())
    }
}

pub fn stores(store: &Arc<MemoryStore>) -> AdminStores {
    AdminStores {
        subjects: store.clone(),
        courses: store.clone(),
        courses_write: store.clone(),
        modules: store.clone(),
        modules_write: store.clone(),
        contents: store.clone(),
        contents_write: store.clone(),
        audit: store.clone(),
        health: store.clone(),
    }
}

/// Admin router acting as [`OWNER`] over a fresh in-memory store.
pub fn app() -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::default());
    let state = AdminState::new(stores(&store), OWNER, "Lectern", CSRF_SECRET);
    (build_admin_router(state), store)
}

pub fn csrf_token() -> String {
    CsrfGuard::new(CSRF_SECRET, OWNER).token().to_string()
}
