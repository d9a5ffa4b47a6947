use askama::Template;

use super::{AdminLayout, AdminLinkView, AdminModuleRowView, AdminReorderBindingView};

#[derive(Clone)]
pub struct AdminContentRowView {
    pub id: String,
    pub kind_label: String,
    pub title: String,
    pub edit_href: String,
    pub delete_action: String,
}

#[derive(Clone)]
pub struct AdminModuleContentView {
    pub course_title: String,
    pub module_title: String,
    pub modules: Vec<AdminModuleRowView>,
    pub module_reorder: AdminReorderBindingView,
    pub contents: Vec<AdminContentRowView>,
    pub content_reorder: AdminReorderBindingView,
    pub add_links: Vec<AdminLinkView>,
    pub edit_modules_href: String,
}

#[derive(Template)]
#[template(path = "admin/module_contents.html")]
pub struct AdminModuleContentTemplate {
    pub view: AdminLayout<AdminModuleContentView>,
}

/// Form for one content item; only the field matching `kind` is rendered.
#[derive(Clone)]
pub struct AdminContentFormView {
    pub heading: String,
    pub kind: String,
    pub form_action: String,
    pub submit_label: String,
    pub title: String,
    pub body: String,
    pub file_path: String,
    pub url: String,
    pub error: Option<String>,
    pub cancel_href: String,
}

impl AdminContentFormView {
    pub fn shows_body(&self) -> bool {
        self.kind == "text"
    }

    pub fn shows_file(&self) -> bool {
        self.kind == "file" || self.kind == "image"
    }

    pub fn shows_url(&self) -> bool {
        self.kind == "video"
    }
}

#[derive(Template)]
#[template(path = "admin/content_form.html")]
pub struct AdminContentFormTemplate {
    pub view: AdminLayout<AdminContentFormView>,
}
