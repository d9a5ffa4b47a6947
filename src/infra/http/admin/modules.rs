//! Module editor for one course: list, inline update, delete, and append.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    application::{
        admin::modules::{AdminModuleError, CreateModuleCommand, UpdateModuleCommand},
        error::HttpError,
    },
    domain::{
        entities::{CourseRecord, ModuleRecord},
        error::DomainError,
    },
    infra::http::repo_error_to_http,
    presentation::{admin::views as admin_views, views::render_template_response},
};

use super::{
    AdminState,
    csrf::{CsrfProtected, VerifiedForm},
    routes,
};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct AdminModuleForm {
    csrf_token: String,
    title: String,
    description: String,
}

impl CsrfProtected for AdminModuleForm {
    fn csrf_token(&self) -> &str {
        &self.csrf_token
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct AdminModuleDeleteForm {
    csrf_token: String,
}

impl CsrfProtected for AdminModuleDeleteForm {
    fn csrf_token(&self) -> &str {
        &self.csrf_token
    }
}

fn admin_module_error(source: &'static str, err: AdminModuleError) -> HttpError {
    match err {
        AdminModuleError::ConstraintViolation(field) => HttpError::new(
            source,
            StatusCode::BAD_REQUEST,
            "Module request could not be processed",
            format!("Invalid field `{field}`"),
        ),
        AdminModuleError::NotFound(entity) => HttpError::new(
            source,
            StatusCode::NOT_FOUND,
            "Resource not found",
            format!("{entity} not found for owner"),
        ),
        AdminModuleError::Domain(DomainError::Validation { .. }) => HttpError::from_error(
            source,
            StatusCode::BAD_REQUEST,
            "Module request could not be processed",
            &err,
        ),
        AdminModuleError::Domain(_) => HttpError::from_error(
            source,
            StatusCode::INTERNAL_SERVER_ERROR,
            "Unexpected error occurred",
            &err,
        ),
        AdminModuleError::Repo(repo) => repo_error_to_http(source, repo),
    }
}

fn build_course_modules_view(
    course: &CourseRecord,
    modules: &[ModuleRecord],
    error: Option<String>,
) -> admin_views::AdminCourseModulesView {
    let modules = modules
        .iter()
        .map(|module| admin_views::AdminModuleEditView {
            id: module.id.to_string(),
            ordinal: module.ordinal_label(),
            title: module.title.clone(),
            description: module.description.clone(),
            contents_href: routes::module_contents(module.id),
            update_action: routes::module_update(module.id),
            delete_action: routes::module_delete(module.id),
        })
        .collect();

    admin_views::AdminCourseModulesView {
        course_title: course.title.clone(),
        subject: course.subject_title.clone(),
        modules,
        create_action: routes::course_modules(course.id),
        error,
        back_href: routes::COURSES.to_string(),
    }
}

async fn render_course_modules(
    state: &AdminState,
    source: &'static str,
    course_id: Uuid,
    error: Option<String>,
    status: StatusCode,
) -> Response {
    let (course, modules) = match state.modules.course_with_modules(state.owner(), course_id).await
    {
        Ok(found) => found,
        Err(err) => return admin_module_error(source, err).into_response(),
    };

    let chrome = state.chrome.load(&routes::course_modules(course.id), "Edit modules");
    let content = build_course_modules_view(&course, &modules, error);
    let view = admin_views::AdminLayout::new(chrome, state.csrf.token(), content);
    render_template_response(admin_views::AdminCourseModulesTemplate { view }, status)
}

pub(crate) async fn admin_course_modules(
    State(state): State<AdminState>,
    Path(course_id): Path<Uuid>,
) -> Response {
    render_course_modules(
        &state,
        "infra::http::admin_course_modules",
        course_id,
        None,
        StatusCode::OK,
    )
    .await
}

pub(crate) async fn admin_module_create(
    State(state): State<AdminState>,
    Path(course_id): Path<Uuid>,
    VerifiedForm(form): VerifiedForm<AdminModuleForm>,
) -> Response {
    const SOURCE: &str = "infra::http::admin_module_create";

    let command = CreateModuleCommand {
        title: form.title,
        description: form.description,
        sort_order: None,
    };

    match state
        .modules
        .create_module(state.owner(), course_id, command)
        .await
    {
        Ok(_) => Redirect::to(&routes::course_modules(course_id)).into_response(),
        Err(AdminModuleError::ConstraintViolation(field)) => {
            render_course_modules(
                &state,
                SOURCE,
                course_id,
                Some(format!("{field} must not be empty")),
                StatusCode::BAD_REQUEST,
            )
            .await
        }
        Err(err) => admin_module_error(SOURCE, err).into_response(),
    }
}

pub(crate) async fn admin_module_update(
    State(state): State<AdminState>,
    Path(id): Path<Uuid>,
    VerifiedForm(form): VerifiedForm<AdminModuleForm>,
) -> Response {
    const SOURCE: &str = "infra::http::admin_module_update";

    let command = UpdateModuleCommand {
        title: form.title,
        description: form.description,
    };

    match state.modules.update_module(state.owner(), id, command).await {
        Ok(module) => Redirect::to(&routes::course_modules(module.course_id)).into_response(),
        Err(AdminModuleError::ConstraintViolation(field)) => {
            let course_id = match state.modules.load_module(state.owner(), id).await {
                Ok(module) => module.course_id,
                Err(err) => return admin_module_error(SOURCE, err).into_response(),
            };
            render_course_modules(
                &state,
                SOURCE,
                course_id,
                Some(format!("{field} must not be empty")),
                StatusCode::BAD_REQUEST,
            )
            .await
        }
        Err(err) => admin_module_error(SOURCE, err).into_response(),
    }
}

pub(crate) async fn admin_module_delete(
    State(state): State<AdminState>,
    Path(id): Path<Uuid>,
    VerifiedForm(_form): VerifiedForm<AdminModuleDeleteForm>,
) -> Response {
    match state.modules.delete_module(state.owner(), id).await {
        Ok(module) => Redirect::to(&routes::course_modules(module.course_id)).into_response(),
        Err(err) => admin_module_error("infra::http::admin_module_delete", err).into_response(),
    }
}
