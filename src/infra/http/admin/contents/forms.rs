use serde::Deserialize;

use crate::application::admin::contents::ContentItemInput;
use crate::infra::http::admin::csrf::CsrfProtected;

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub(crate) struct AdminContentForm {
    pub(super) csrf_token: String,
    pub(super) title: String,
    pub(super) body: Option<String>,
    pub(super) file_path: Option<String>,
    pub(super) url: Option<String>,
}

impl CsrfProtected for AdminContentForm {
    fn csrf_token(&self) -> &str {
        &self.csrf_token
    }
}

impl From<AdminContentForm> for ContentItemInput {
    fn from(form: AdminContentForm) -> Self {
        Self {
            title: form.title,
            body: form.body,
            file_path: form.file_path,
            url: form.url,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct AdminContentDeleteForm {
    pub(super) csrf_token: String,
}

impl CsrfProtected for AdminContentDeleteForm {
    fn csrf_token(&self) -> &str {
        &self.csrf_token
    }
}
