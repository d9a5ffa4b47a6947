use askama::Template;

use super::AdminLayout;

#[derive(Clone)]
pub struct AdminCourseRowView {
    pub id: String,
    pub title: String,
    pub subject: String,
    pub created_at: String,
    pub modules_href: String,
    pub edit_href: String,
    pub delete_href: String,
}

#[derive(Clone)]
pub struct AdminCourseListView {
    pub heading: String,
    pub rows: Vec<AdminCourseRowView>,
    pub new_course_href: String,
}

#[derive(Template)]
#[template(path = "admin/courses.html")]
pub struct AdminCoursesTemplate {
    pub view: AdminLayout<AdminCourseListView>,
}

#[derive(Clone)]
pub struct AdminSubjectOptionView {
    pub id: String,
    pub title: String,
    pub selected: bool,
}

#[derive(Clone)]
pub struct AdminCourseFormView {
    pub heading: String,
    pub form_action: String,
    pub submit_label: String,
    pub subjects: Vec<AdminSubjectOptionView>,
    pub title: String,
    pub slug: String,
    pub overview: String,
    pub error: Option<String>,
    pub cancel_href: String,
}

#[derive(Template)]
#[template(path = "admin/course_form.html")]
pub struct AdminCourseFormTemplate {
    pub view: AdminLayout<AdminCourseFormView>,
}

#[derive(Clone)]
pub struct AdminCourseDeleteView {
    pub title: String,
    pub form_action: String,
    pub cancel_href: String,
}

#[derive(Template)]
#[template(path = "admin/course_delete.html")]
pub struct AdminCourseDeleteTemplate {
    pub view: AdminLayout<AdminCourseDeleteView>,
}
