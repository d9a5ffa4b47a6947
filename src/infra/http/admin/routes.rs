//! Path builders for every admin route, so handlers and views never format
//! URLs by hand.

use uuid::Uuid;

use crate::domain::types::ContentKind;

pub const COURSES: &str = "/courses";
pub const COURSE_NEW: &str = "/courses/new";
pub const COURSE_CREATE: &str = "/courses/create";
pub const MODULE_ORDER: &str = "/modules/order";
pub const CONTENT_ORDER: &str = "/content/order";

/// Element ids of the two sortable lists on the module content page.
pub const MODULE_LIST_ID: &str = "modules";
pub const CONTENT_LIST_ID: &str = "module-contents";

pub fn course_edit(id: Uuid) -> String {
    format!("/courses/{id}/edit")
}

pub fn course_delete(id: Uuid) -> String {
    format!("/courses/{id}/delete")
}

pub fn course_modules(id: Uuid) -> String {
    format!("/courses/{id}/modules")
}

pub fn module_update(id: Uuid) -> String {
    format!("/modules/{id}/update")
}

pub fn module_delete(id: Uuid) -> String {
    format!("/modules/{id}/delete")
}

pub fn module_contents(id: Uuid) -> String {
    format!("/modules/{id}")
}

pub fn content_create(module_id: Uuid, kind: ContentKind) -> String {
    format!("/modules/{module_id}/content/{kind}/create")
}

pub fn content_update(module_id: Uuid, kind: ContentKind, item_id: Uuid) -> String {
    format!("/modules/{module_id}/content/{kind}/{item_id}")
}

pub fn content_delete(id: Uuid) -> String {
    format!("/content/{id}/delete")
}
