use askama::Template;

use super::AdminLayout;

/// One entry of the sortable module list.
#[derive(Clone)]
pub struct AdminModuleRowView {
    pub id: String,
    pub ordinal: String,
    pub title: String,
    pub href: String,
    pub selected: bool,
}

#[derive(Clone)]
pub struct AdminModuleEditView {
    pub id: String,
    pub ordinal: String,
    pub title: String,
    pub description: String,
    pub contents_href: String,
    pub update_action: String,
    pub delete_action: String,
}

#[derive(Clone)]
pub struct AdminCourseModulesView {
    pub course_title: String,
    pub subject: String,
    pub modules: Vec<AdminModuleEditView>,
    pub create_action: String,
    pub error: Option<String>,
    pub back_href: String,
}

#[derive(Template)]
#[template(path = "admin/course_modules.html")]
pub struct AdminCourseModulesTemplate {
    pub view: AdminLayout<AdminCourseModulesView>,
}
