use uuid::Uuid;

use crate::application::reorder::configure_reorder;
use crate::domain::entities::{ContentItemRecord, ContentRecord, CourseRecord, ModuleRecord};
use crate::domain::types::ContentKind;
use crate::infra::http::admin::routes;
use crate::presentation::admin::views as admin_views;

use super::forms::AdminContentForm;

/// The module list relabels itself after a drag; the content list has no
/// labels to keep in step.
pub(super) fn build_module_content_view(
    course: &CourseRecord,
    modules: &[ModuleRecord],
    current: &ModuleRecord,
    contents: &[ContentRecord],
) -> admin_views::AdminModuleContentView {
    let module_rows = modules
        .iter()
        .map(|module| admin_views::AdminModuleRowView {
            id: module.id.to_string(),
            ordinal: module.ordinal_label(),
            title: module.title.clone(),
            href: routes::module_contents(module.id),
            selected: module.id == current.id,
        })
        .collect();

    let content_rows = contents
        .iter()
        .map(|content| admin_views::AdminContentRowView {
            id: content.id.to_string(),
            kind_label: content.item.kind.label().to_string(),
            title: content.item.title.clone(),
            edit_href: routes::content_update(current.id, content.item.kind, content.item.id),
            delete_action: routes::content_delete(content.id),
        })
        .collect();

    let add_links = ContentKind::ALL
        .iter()
        .map(|kind| admin_views::AdminLinkView {
            label: kind.label().to_string(),
            href: routes::content_create(current.id, *kind),
        })
        .collect();

    let module_binding = configure_reorder(routes::MODULE_LIST_ID, routes::MODULE_ORDER, true);
    let content_binding = configure_reorder(routes::CONTENT_LIST_ID, routes::CONTENT_ORDER, false);

    admin_views::AdminModuleContentView {
        course_title: course.title.clone(),
        module_title: format!("Module {}: {}", current.ordinal_label(), current.title),
        modules: module_rows,
        module_reorder: (&module_binding).into(),
        contents: content_rows,
        content_reorder: (&content_binding).into(),
        add_links,
        edit_modules_href: routes::course_modules(course.id),
    }
}

pub(super) enum ContentFormTarget {
    Create { module_id: Uuid },
    Edit { module_id: Uuid, item_id: Uuid },
}

impl ContentFormTarget {
    pub fn module_id(&self) -> Uuid {
        match self {
            ContentFormTarget::Create { module_id } | ContentFormTarget::Edit { module_id, .. } => {
                *module_id
            }
        }
    }
}

/// Values echoed back into the content form.
#[derive(Default)]
pub(super) struct ContentFormValues {
    pub title: String,
    pub body: String,
    pub file_path: String,
    pub url: String,
}

impl ContentFormValues {
    pub fn from_item(item: &ContentItemRecord) -> Self {
        Self {
            title: item.title.clone(),
            body: item.body.clone().unwrap_or_default(),
            file_path: item.file_path.clone().unwrap_or_default(),
            url: item.url.clone().unwrap_or_default(),
        }
    }

    pub fn from_form(form: &AdminContentForm) -> Self {
        Self {
            title: form.title.clone(),
            body: form.body.clone().unwrap_or_default(),
            file_path: form.file_path.clone().unwrap_or_default(),
            url: form.url.clone().unwrap_or_default(),
        }
    }
}

pub(super) fn build_content_form_view(
    target: &ContentFormTarget,
    kind: ContentKind,
    values: ContentFormValues,
    error: Option<String>,
) -> admin_views::AdminContentFormView {
    let (heading, form_action, submit_label) = match target {
        ContentFormTarget::Create { module_id } => (
            format!("Add new content ({})", kind.label().to_lowercase()),
            routes::content_create(*module_id, kind),
            "Save content",
        ),
        ContentFormTarget::Edit { module_id, item_id } => (
            format!("Edit content \"{}\"", values.title),
            routes::content_update(*module_id, kind, *item_id),
            "Save changes",
        ),
    };

    admin_views::AdminContentFormView {
        heading,
        kind: kind.as_str().to_string(),
        form_action,
        submit_label: submit_label.to_string(),
        title: values.title,
        body: values.body,
        file_path: values.file_path,
        url: values.url,
        error,
        cancel_href: routes::module_contents(target.module_id()),
    }
}
