use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use uuid::Uuid;

use crate::{
    domain::types::ContentKind,
    infra::http::admin::{AdminState, csrf::VerifiedForm, routes, shared::parse_kind},
    presentation::{admin::views as admin_views, views::render_template_response},
};

use super::{
    editor::{
        ContentFormTarget, ContentFormValues, build_content_form_view, build_module_content_view,
    },
    errors::{admin_content_error, form_message, sibling_modules_error},
    forms::{AdminContentDeleteForm, AdminContentForm},
};

pub(crate) async fn admin_module_contents(
    State(state): State<AdminState>,
    Path(module_id): Path<Uuid>,
) -> Response {
    const SOURCE: &str = "infra::http::admin_module_contents";

    let (module, contents) = match state.contents.module_contents(state.owner(), module_id).await {
        Ok(found) => found,
        Err(err) => return admin_content_error(SOURCE, err).into_response(),
    };

    let (course, modules) = match state
        .modules
        .course_with_modules(state.owner(), module.course_id)
        .await
    {
        Ok(found) => found,
        Err(err) => return sibling_modules_error(SOURCE, err).into_response(),
    };

    let chrome = state
        .chrome
        .load(&routes::module_contents(module.id), &module.title);
    let content = build_module_content_view(&course, &modules, &module, &contents);
    let view = admin_views::AdminLayout::new(chrome, state.csrf.token(), content);
    render_template_response(admin_views::AdminModuleContentTemplate { view }, StatusCode::OK)
}

fn render_content_form(
    state: &AdminState,
    target: ContentFormTarget,
    kind: ContentKind,
    values: ContentFormValues,
    error: Option<String>,
    status: StatusCode,
) -> Response {
    let chrome = state
        .chrome
        .load(&routes::module_contents(target.module_id()), "Content");
    let content = build_content_form_view(&target, kind, values, error);
    let view = admin_views::AdminLayout::new(chrome, state.csrf.token(), content);
    render_template_response(admin_views::AdminContentFormTemplate { view }, status)
}

pub(crate) async fn admin_content_new(
    State(state): State<AdminState>,
    Path((module_id, kind)): Path<(Uuid, String)>,
) -> Response {
    const SOURCE: &str = "infra::http::admin_content_new";

    let kind = match parse_kind(SOURCE, &kind) {
        Ok(kind) => kind,
        Err(err) => return err.into_response(),
    };
    if let Err(err) = state.contents.module_contents(state.owner(), module_id).await {
        return admin_content_error(SOURCE, err).into_response();
    }

    render_content_form(
        &state,
        ContentFormTarget::Create { module_id },
        kind,
        ContentFormValues::default(),
        None,
        StatusCode::OK,
    )
}

pub(crate) async fn admin_content_create(
    State(state): State<AdminState>,
    Path((module_id, kind)): Path<(Uuid, String)>,
    VerifiedForm(form): VerifiedForm<AdminContentForm>,
) -> Response {
    const SOURCE: &str = "infra::http::admin_content_create";

    let kind = match parse_kind(SOURCE, &kind) {
        Ok(kind) => kind,
        Err(err) => return err.into_response(),
    };

    let values = ContentFormValues::from_form(&form);
    match state
        .contents
        .create_content(state.owner(), module_id, kind, form.into(), None)
        .await
    {
        Ok(_) => Redirect::to(&routes::module_contents(module_id)).into_response(),
        Err(err) => match form_message(&err) {
            Some(message) => render_content_form(
                &state,
                ContentFormTarget::Create { module_id },
                kind,
                values,
                Some(message),
                StatusCode::BAD_REQUEST,
            ),
            None => admin_content_error(SOURCE, err).into_response(),
        },
    }
}

pub(crate) async fn admin_content_edit(
    State(state): State<AdminState>,
    Path((module_id, kind, item_id)): Path<(Uuid, String, Uuid)>,
) -> Response {
    const SOURCE: &str = "infra::http::admin_content_edit";

    let kind = match parse_kind(SOURCE, &kind) {
        Ok(kind) => kind,
        Err(err) => return err.into_response(),
    };

    let item = match state
        .contents
        .load_item(state.owner(), module_id, kind, item_id)
        .await
    {
        Ok(item) => item,
        Err(err) => return admin_content_error(SOURCE, err).into_response(),
    };

    render_content_form(
        &state,
        ContentFormTarget::Edit { module_id, item_id },
        kind,
        ContentFormValues::from_item(&item),
        None,
        StatusCode::OK,
    )
}

pub(crate) async fn admin_content_update(
    State(state): State<AdminState>,
    Path((module_id, kind, item_id)): Path<(Uuid, String, Uuid)>,
    VerifiedForm(form): VerifiedForm<AdminContentForm>,
) -> Response {
    const SOURCE: &str = "infra::http::admin_content_update";

    let kind = match parse_kind(SOURCE, &kind) {
        Ok(kind) => kind,
        Err(err) => return err.into_response(),
    };

    let values = ContentFormValues::from_form(&form);
    match state
        .contents
        .update_item(state.owner(), module_id, kind, item_id, form.into())
        .await
    {
        Ok(_) => Redirect::to(&routes::module_contents(module_id)).into_response(),
        Err(err) => match form_message(&err) {
            Some(message) => render_content_form(
                &state,
                ContentFormTarget::Edit { module_id, item_id },
                kind,
                values,
                Some(message),
                StatusCode::BAD_REQUEST,
            ),
            None => admin_content_error(SOURCE, err).into_response(),
        },
    }
}

pub(crate) async fn admin_content_delete(
    State(state): State<AdminState>,
    Path(id): Path<Uuid>,
    VerifiedForm(_form): VerifiedForm<AdminContentDeleteForm>,
) -> Response {
    match state.contents.delete_content(state.owner(), id).await {
        Ok(content) => Redirect::to(&routes::module_contents(content.module_id)).into_response(),
        Err(err) => admin_content_error("infra::http::admin_content_delete", err).into_response(),
    }
}
