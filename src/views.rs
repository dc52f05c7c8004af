//! Server-rendered pages for the course screens.
//!
//! Every page is a plain HTML string. Anything that came from a user or the
//! store goes through [`escape`] first.

use std::fmt::Write;

use crate::models::{Course, CourseForm, FormErrors};

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n<body>\n{}\n</body>\n</html>\n",
        escape(title),
        body
    )
}

pub fn list_page(base: &str, courses: &[Course]) -> String {
    let mut body = String::from("<h1>Courses</h1>\n");
    let _ = writeln!(body, "<p><a href=\"{base}/create/\">Add course</a></p>");

    if courses.is_empty() {
        body.push_str("<p class=\"empty\">No courses yet.</p>");
    } else {
        body.push_str("<ul class=\"courses\">\n");
        for course in courses {
            let _ = writeln!(
                body,
                "<li data-id=\"{id}\"><a href=\"{base}/{id}/\">{title}</a></li>",
                id = course.id,
                title = escape(&course.title),
            );
        }
        body.push_str("</ul>");
    }

    layout("Courses", &body)
}

pub fn detail_page(base: &str, course: &Course) -> String {
    let mut body = String::new();
    let _ = writeln!(body, "<h1>{}</h1>", escape(&course.title));

    match &course.description {
        Some(description) => {
            let _ = writeln!(body, "<p class=\"description\">{}</p>", escape(description));
        }
        None => body.push_str("<p class=\"description empty\">No description.</p>\n"),
    }

    let _ = writeln!(
        body,
        "<p class=\"created\">Created <time datetime=\"{}\">{}</time></p>",
        course.created_at.to_rfc3339(),
        course.created_at.format(DATE_FORMAT),
    );
    let _ = write!(
        body,
        "<p><a href=\"{base}/{id}/update/\">Edit</a> | <a href=\"{base}/{id}/delete/\">Delete</a> | <a href=\"{base}/\">Back to list</a></p>",
        id = course.id,
    );

    layout(&course.title, &body)
}

/// Shared by create (`course` is `None`) and update.
pub fn form_page(
    base: &str,
    course: Option<&Course>,
    form: &CourseForm,
    errors: &FormErrors,
) -> String {
    let (heading, action) = match course {
        Some(course) => (
            format!("Edit {}", course.title),
            format!("{base}/{}/update/", course.id),
        ),
        None => ("New course".to_string(), format!("{base}/create/")),
    };

    let mut body = String::new();
    let _ = writeln!(body, "<h1>{}</h1>", escape(&heading));
    let _ = writeln!(body, "<form method=\"post\" action=\"{}\">", escape(&action));

    body.push_str(&field_errors(errors, "title"));
    let _ = writeln!(
        body,
        "<p><label for=\"id_title\">Title</label> <input type=\"text\" name=\"title\" id=\"id_title\" value=\"{}\" required></p>",
        escape(&form.title)
    );

    body.push_str(&field_errors(errors, "description"));
    let _ = writeln!(
        body,
        "<p><label for=\"id_description\">Description</label> <textarea name=\"description\" id=\"id_description\">{}</textarea></p>",
        escape(&form.description)
    );

    body.push_str("<button type=\"submit\">Save</button>\n</form>\n");
    let _ = write!(body, "<p><a href=\"{base}/\">Cancel</a></p>");

    layout(&heading, &body)
}

fn field_errors(errors: &FormErrors, field: &str) -> String {
    let messages = errors.field(field);
    if messages.is_empty() {
        return String::new();
    }

    let mut out = format!("<ul class=\"errorlist\" data-field=\"{field}\">");
    for message in messages {
        let _ = write!(out, "<li>{}</li>", escape(message));
    }
    out.push_str("</ul>\n");
    out
}

pub fn confirm_delete_page(base: &str, course: &Course) -> String {
    let mut body = String::from("<h1>Delete course</h1>\n");
    let _ = writeln!(
        body,
        "<p>Are you sure you want to delete \"{}\"?</p>",
        escape(&course.title)
    );
    let _ = writeln!(
        body,
        "<form method=\"post\" action=\"{base}/{}/delete/\"><button type=\"submit\">Confirm</button></form>",
        course.id
    );
    let _ = write!(body, "<p><a href=\"{base}/{}/\">Cancel</a></p>", course.id);

    layout("Delete course", &body)
}

pub fn not_found_page() -> String {
    layout("Not Found", "<h1>Not Found</h1>\n<p>The requested course does not exist.</p>")
}

pub fn server_error_page() -> String {
    layout("Server Error", "<h1>Server Error (500)</h1>")
}
