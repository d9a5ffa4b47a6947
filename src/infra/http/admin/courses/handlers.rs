use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use uuid::Uuid;

use crate::{
    application::admin::courses::{AdminCourseError, CourseCommand},
    infra::http::admin::{
        AdminState,
        csrf::VerifiedForm,
        routes,
        shared::blank_to_none_opt,
    },
    presentation::{admin::views as admin_views, views::render_template_response},
};

use super::{
    editor::{
        CourseFormTarget, CourseFormValues, build_course_delete_view, build_course_form_view,
        build_course_list_view,
    },
    errors::{admin_course_error, form_message},
    forms::{AdminCourseDeleteForm, AdminCourseForm},
};

fn command_from_form(form: &AdminCourseForm) -> Result<CourseCommand, AdminCourseError> {
    let subject_id =
        Uuid::parse_str(form.subject_id.trim()).map_err(|_| AdminCourseError::UnknownSubject)?;
    Ok(CourseCommand {
        subject_id,
        title: form.title.clone(),
        slug: blank_to_none_opt(form.slug.clone()),
        overview: form.overview.clone(),
    })
}

async fn render_course_form(
    state: &AdminState,
    source: &'static str,
    target: CourseFormTarget,
    values: CourseFormValues,
    error: Option<String>,
    status: StatusCode,
) -> Response {
    let subjects = match state.courses.list_subjects().await {
        Ok(subjects) => subjects,
        Err(err) => return admin_course_error(source, err).into_response(),
    };

    let page_title = match target {
        CourseFormTarget::Create => "New course",
        CourseFormTarget::Edit(_) => "Edit course",
    };
    let chrome = state.chrome.load(routes::COURSES, page_title);
    let content = build_course_form_view(&target, &subjects, values, error);
    let view = admin_views::AdminLayout::new(chrome, state.csrf.token(), content);
    render_template_response(admin_views::AdminCourseFormTemplate { view }, status)
}

pub(crate) async fn admin_courses(State(state): State<AdminState>) -> Response {
    let courses = match state.courses.list_courses(state.owner()).await {
        Ok(courses) => courses,
        Err(err) => return admin_course_error("infra::http::admin_courses", err).into_response(),
    };

    let chrome = state.chrome.load(routes::COURSES, "My courses");
    let content = build_course_list_view(&courses);
    let view = admin_views::AdminLayout::new(chrome, state.csrf.token(), content);
    render_template_response(admin_views::AdminCoursesTemplate { view }, StatusCode::OK)
}

pub(crate) async fn admin_course_new(State(state): State<AdminState>) -> Response {
    render_course_form(
        &state,
        "infra::http::admin_course_new",
        CourseFormTarget::Create,
        CourseFormValues::default(),
        None,
        StatusCode::OK,
    )
    .await
}

pub(crate) async fn admin_course_create(
    State(state): State<AdminState>,
    VerifiedForm(form): VerifiedForm<AdminCourseForm>,
) -> Response {
    const SOURCE: &str = "infra::http::admin_course_create";

    let result = match command_from_form(&form) {
        Ok(command) => state.courses.create_course(state.owner(), command).await,
        Err(err) => Err(err),
    };

    match result {
        Ok(_) => Redirect::to(routes::COURSES).into_response(),
        Err(err) => match form_message(&err) {
            Some(message) => {
                render_course_form(
                    &state,
                    SOURCE,
                    CourseFormTarget::Create,
                    CourseFormValues::from_form(&form),
                    Some(message),
                    StatusCode::BAD_REQUEST,
                )
                .await
            }
            None => admin_course_error(SOURCE, err).into_response(),
        },
    }
}

pub(crate) async fn admin_course_edit(
    State(state): State<AdminState>,
    Path(id): Path<Uuid>,
) -> Response {
    const SOURCE: &str = "infra::http::admin_course_edit";

    let course = match state.courses.load_course(state.owner(), id).await {
        Ok(course) => course,
        Err(err) => return admin_course_error(SOURCE, err).into_response(),
    };

    render_course_form(
        &state,
        SOURCE,
        CourseFormTarget::Edit(course.id),
        CourseFormValues::from_course(&course),
        None,
        StatusCode::OK,
    )
    .await
}

pub(crate) async fn admin_course_update(
    State(state): State<AdminState>,
    Path(id): Path<Uuid>,
    VerifiedForm(form): VerifiedForm<AdminCourseForm>,
) -> Response {
    const SOURCE: &str = "infra::http::admin_course_update";

    let result = match command_from_form(&form) {
        Ok(command) => state.courses.update_course(state.owner(), id, command).await,
        Err(err) => Err(err),
    };

    match result {
        Ok(_) => Redirect::to(routes::COURSES).into_response(),
        Err(err) => match form_message(&err) {
            Some(message) => {
                render_course_form(
                    &state,
                    SOURCE,
                    CourseFormTarget::Edit(id),
                    CourseFormValues::from_form(&form),
                    Some(message),
                    StatusCode::BAD_REQUEST,
                )
                .await
            }
            None => admin_course_error(SOURCE, err).into_response(),
        },
    }
}

pub(crate) async fn admin_course_delete_confirm(
    State(state): State<AdminState>,
    Path(id): Path<Uuid>,
) -> Response {
    let course = match state.courses.load_course(state.owner(), id).await {
        Ok(course) => course,
        Err(err) => {
            return admin_course_error("infra::http::admin_course_delete_confirm", err)
                .into_response();
        }
    };

    let chrome = state.chrome.load(routes::COURSES, "Delete course");
    let content = build_course_delete_view(&course);
    let view = admin_views::AdminLayout::new(chrome, state.csrf.token(), content);
    render_template_response(admin_views::AdminCourseDeleteTemplate { view }, StatusCode::OK)
}

pub(crate) async fn admin_course_delete(
    State(state): State<AdminState>,
    Path(id): Path<Uuid>,
    VerifiedForm(_form): VerifiedForm<AdminCourseDeleteForm>,
) -> Response {
    match state.courses.delete_course(state.owner(), id).await {
        Ok(()) => Redirect::to(routes::COURSES).into_response(),
        Err(err) => admin_course_error("infra::http::admin_course_delete", err).into_response(),
    }
}
