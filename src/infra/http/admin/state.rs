use std::sync::Arc;

use crate::application::admin::{
    AdminContentService, AdminCourseService, AdminModuleService, AdminOrderingService,
    audit::AdminAuditService, chrome::AdminChromeService,
};
use crate::application::repos::{
    AuditRepo, ContentsRepo, ContentsWriteRepo, CoursesRepo, CoursesWriteRepo, HealthRepo,
    ModulesRepo, ModulesWriteRepo, SubjectsRepo,
};
use crate::infra::db::PostgresRepositories;

use super::csrf::CsrfGuard;

/// Repository handles the admin services are assembled from.
#[derive(Clone)]
pub struct AdminStores {
    pub subjects: Arc<dyn SubjectsRepo>,
    pub courses: Arc<dyn CoursesRepo>,
    pub courses_write: Arc<dyn CoursesWriteRepo>,
    pub modules: Arc<dyn ModulesRepo>,
    pub modules_write: Arc<dyn ModulesWriteRepo>,
    pub contents: Arc<dyn ContentsRepo>,
    pub contents_write: Arc<dyn ContentsWriteRepo>,
    pub audit: Arc<dyn AuditRepo>,
    pub health: Arc<dyn HealthRepo>,
}

impl AdminStores {
    pub fn postgres(repos: Arc<PostgresRepositories>) -> Self {
        Self {
            subjects: repos.clone(),
            courses: repos.clone(),
            courses_write: repos.clone(),
            modules: repos.clone(),
            modules_write: repos.clone(),
            contents: repos.clone(),
            contents_write: repos.clone(),
            audit: repos.clone(),
            health: repos,
        }
    }
}

#[derive(Clone)]
pub struct AdminState {
    pub chrome: Arc<AdminChromeService>,
    pub courses: Arc<AdminCourseService>,
    pub modules: Arc<AdminModuleService>,
    pub contents: Arc<AdminContentService>,
    pub ordering: Arc<AdminOrderingService>,
    pub health: Arc<dyn HealthRepo>,
    pub csrf: Arc<CsrfGuard>,
    /// Identity every admin request acts as.
    pub owner: Arc<str>,
}

impl AdminState {
    pub fn new(stores: AdminStores, owner: &str, brand_title: &str, csrf_secret: &str) -> Self {
        let audit = AdminAuditService::new(stores.audit);

        Self {
            chrome: Arc::new(AdminChromeService::new(brand_title)),
            courses: Arc::new(AdminCourseService::new(
                stores.subjects,
                stores.courses.clone(),
                stores.courses_write,
                audit.clone(),
            )),
            modules: Arc::new(AdminModuleService::new(
                stores.courses,
                stores.modules.clone(),
                stores.modules_write.clone(),
                audit.clone(),
            )),
            contents: Arc::new(AdminContentService::new(
                stores.modules,
                stores.contents,
                stores.contents_write.clone(),
                audit.clone(),
            )),
            ordering: Arc::new(AdminOrderingService::new(
                stores.modules_write,
                stores.contents_write,
                audit,
            )),
            health: stores.health,
            csrf: Arc::new(CsrfGuard::new(csrf_secret, owner)),
            owner: Arc::from(owner),
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }
}
