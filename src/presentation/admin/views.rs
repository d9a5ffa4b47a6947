mod contents;
mod courses;
mod modules;

pub use contents::*;
pub use courses::*;
pub use modules::*;

use crate::application::reorder::ReorderBinding;

#[derive(Clone)]
pub struct AdminBrandView {
    pub title: String,
}

#[derive(Clone)]
pub struct AdminNavigationItemView {
    pub label: String,
    pub href: String,
    pub is_active: bool,
}

#[derive(Clone)]
pub struct AdminNavigationView {
    pub items: Vec<AdminNavigationItemView>,
}

#[derive(Clone)]
pub struct AdminMetaView {
    pub title: String,
    pub description: String,
}

#[derive(Clone)]
pub struct AdminChrome {
    pub brand: AdminBrandView,
    pub navigation: AdminNavigationView,
    pub meta: AdminMetaView,
}

#[derive(Clone)]
pub struct AdminLayout<T> {
    pub chrome: AdminChrome,
    pub asset_version: String,
    /// Token every form on the page submits as `csrf_token`.
    pub csrf_token: String,
    pub content: T,
}

impl<T> AdminLayout<T> {
    pub fn new(chrome: AdminChrome, csrf_token: impl Into<String>, content: T) -> Self {
        Self {
            chrome,
            asset_version: asset_version(),
            csrf_token: csrf_token.into(),
            content,
        }
    }
}

fn asset_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[derive(Clone)]
pub struct AdminLinkView {
    pub label: String,
    pub href: String,
}

/// Data attributes wiring a rendered list to the reorder script.
#[derive(Clone)]
pub struct AdminReorderBindingView {
    pub container_id: String,
    pub endpoint: String,
    pub update_labels: bool,
}

impl From<&ReorderBinding> for AdminReorderBindingView {
    fn from(binding: &ReorderBinding) -> Self {
        Self {
            container_id: binding.container_id.clone(),
            endpoint: binding.endpoint.clone(),
            update_labels: binding.update_labels,
        }
    }
}

impl AdminReorderBindingView {
    pub fn labels_attr(&self) -> &'static str {
        if self.update_labels { "true" } else { "false" }
    }
}
