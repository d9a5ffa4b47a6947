use serde::Deserialize;

use crate::infra::http::admin::csrf::CsrfProtected;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct AdminCourseForm {
    pub(super) csrf_token: String,
    pub(super) subject_id: String,
    pub(super) title: String,
    pub(super) slug: Option<String>,
    pub(super) overview: String,
}

impl CsrfProtected for AdminCourseForm {
    fn csrf_token(&self) -> &str {
        &self.csrf_token
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct AdminCourseDeleteForm {
    pub(super) csrf_token: String,
}

impl CsrfProtected for AdminCourseDeleteForm {
    fn csrf_token(&self) -> &str {
        &self.csrf_token
    }
}
