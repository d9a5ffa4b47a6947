use crate::presentation::admin::views::{
    AdminBrandView, AdminChrome, AdminMetaView, AdminNavigationItemView, AdminNavigationView,
};

const NAV_ITEMS: &[(&str, &str)] = &[("/courses", "Courses")];

#[derive(Clone)]
pub struct AdminChromeService {
    brand_title: String,
}

impl AdminChromeService {
    pub fn new(brand_title: impl Into<String>) -> Self {
        Self {
            brand_title: brand_title.into(),
        }
    }

    /// Build the shared page chrome, marking the navigation entry that
    /// `active_path` falls under.
    pub fn load(&self, active_path: &str, page_title: &str) -> AdminChrome {
        let brand = AdminBrandView {
            title: format!("{} Admin", self.brand_title),
        };

        let items = NAV_ITEMS
            .iter()
            .map(|(href, label)| AdminNavigationItemView {
                label: (*label).to_string(),
                href: (*href).to_string(),
                is_active: is_under(active_path, href),
            })
            .collect();

        let meta = AdminMetaView {
            title: format!("{} · {}", brand.title, page_title),
            description: "Course administration".to_string(),
        };

        AdminChrome {
            brand,
            navigation: AdminNavigationView { items },
            meta,
        }
    }
}

fn is_under(path: &str, prefix: &str) -> bool {
    path == prefix
        || path
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with('/'))
        || (prefix == "/courses" && path.starts_with("/modules"))
}
