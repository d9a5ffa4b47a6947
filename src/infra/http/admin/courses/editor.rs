use uuid::Uuid;

use crate::domain::entities::{CourseRecord, SubjectRecord};
use crate::infra::http::admin::routes;
use crate::presentation::admin::views as admin_views;

use super::super::shared::format_date;
use super::forms::AdminCourseForm;

pub(super) enum CourseFormTarget {
    Create,
    Edit(Uuid),
}

/// Values echoed back into the course form.
#[derive(Default)]
pub(super) struct CourseFormValues {
    pub subject_id: Option<Uuid>,
    pub title: String,
    pub slug: String,
    pub overview: String,
}

impl CourseFormValues {
    pub fn from_course(course: &CourseRecord) -> Self {
        Self {
            subject_id: Some(course.subject_id),
            title: course.title.clone(),
            slug: course.slug.clone(),
            overview: course.overview.clone(),
        }
    }

    pub fn from_form(form: &AdminCourseForm) -> Self {
        Self {
            subject_id: Uuid::parse_str(form.subject_id.trim()).ok(),
            title: form.title.clone(),
            slug: form.slug.clone().unwrap_or_default(),
            overview: form.overview.clone(),
        }
    }
}

pub(super) fn build_course_list_view(courses: &[CourseRecord]) -> admin_views::AdminCourseListView {
    let rows = courses
        .iter()
        .map(|course| admin_views::AdminCourseRowView {
            id: course.id.to_string(),
            title: course.title.clone(),
            subject: course.subject_title.clone(),
            created_at: format_date(course.created_at),
            modules_href: routes::course_modules(course.id),
            edit_href: routes::course_edit(course.id),
            delete_href: routes::course_delete(course.id),
        })
        .collect();

    admin_views::AdminCourseListView {
        heading: "My courses".to_string(),
        rows,
        new_course_href: routes::COURSE_NEW.to_string(),
    }
}

pub(super) fn build_course_form_view(
    target: &CourseFormTarget,
    subjects: &[SubjectRecord],
    values: CourseFormValues,
    error: Option<String>,
) -> admin_views::AdminCourseFormView {
    let (heading, form_action, submit_label) = match target {
        CourseFormTarget::Create => (
            "Create a new course".to_string(),
            routes::COURSE_CREATE.to_string(),
            "Save course",
        ),
        CourseFormTarget::Edit(id) => (
            format!("Edit \"{}\"", values.title),
            routes::course_edit(*id),
            "Save changes",
        ),
    };

    let subjects = subjects
        .iter()
        .map(|subject| admin_views::AdminSubjectOptionView {
            id: subject.id.to_string(),
            title: subject.title.clone(),
            selected: values.subject_id == Some(subject.id),
        })
        .collect();

    admin_views::AdminCourseFormView {
        heading,
        form_action,
        submit_label: submit_label.to_string(),
        subjects,
        title: values.title,
        slug: values.slug,
        overview: values.overview,
        error,
        cancel_href: routes::COURSES.to_string(),
    }
}

pub(super) fn build_course_delete_view(course: &CourseRecord) -> admin_views::AdminCourseDeleteView {
    admin_views::AdminCourseDeleteView {
        title: course.title.clone(),
        form_action: routes::course_delete(course.id),
        cancel_href: routes::COURSES.to_string(),
    }
}
