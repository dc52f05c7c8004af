use axum::Form;
use axum::extract::{Path, State};
use axum::http::{Method, StatusCode, Uri, header};
use axum::response::{Html, IntoResponse, Response};
use tracing::{info, warn};

use crate::db::repository;
use crate::error::AppError;
use crate::models::{CourseForm, FormErrors};
use crate::state::AppState;
use crate::views;

/// Path ids follow integer-converter semantics: anything that is not a run of
/// ASCII digits cannot name a course.
fn parse_id(raw: &str) -> Result<i64, AppError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AppError::NotFound);
    }
    raw.parse::<i64>().map_err(|_| AppError::NotFound)
}

fn redirect_to_list(state: &AppState) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, state.list_url())]).into_response()
}

pub async fn health(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    sqlx::query("select 1").execute(&state.db).await?;
    Ok(StatusCode::OK)
}

pub async fn list_courses(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let courses = repository::fetch_courses(&state.db).await?;
    Ok(Html(views::list_page(&state.base_path, &courses)))
}

pub async fn course_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let id = parse_id(&id)?;
    let course = repository::find_course_by_id(&state.db, id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Html(views::detail_page(&state.base_path, &course)))
}

pub async fn create_form(State(state): State<AppState>) -> Html<String> {
    Html(views::form_page(
        &state.base_path,
        None,
        &CourseForm::default(),
        &FormErrors::default(),
    ))
}

pub async fn create_course(
    State(state): State<AppState>,
    Form(form): Form<CourseForm>,
) -> Result<Response, AppError> {
    let new = match form.validate() {
        Ok(new) => new,
        Err(errors) => {
            warn!("create rejected: invalid course form");
            let page = views::form_page(&state.base_path, None, &form, &errors);
            return Ok(Html(page).into_response());
        }
    };

    let course = repository::insert_course(&state.db, new).await?;
    info!(id = course.id, "course created");
    Ok(redirect_to_list(&state))
}

pub async fn update_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let id = parse_id(&id)?;
    let course = repository::find_course_by_id(&state.db, id)
        .await?
        .ok_or(AppError::NotFound)?;
    let form = CourseForm::from(&course);
    Ok(Html(views::form_page(
        &state.base_path,
        Some(&course),
        &form,
        &FormErrors::default(),
    )))
}

pub async fn update_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<CourseForm>,
) -> Result<Response, AppError> {
    let id = parse_id(&id)?;
    let course = repository::find_course_by_id(&state.db, id)
        .await?
        .ok_or(AppError::NotFound)?;

    let changes = match form.validate() {
        Ok(changes) => changes,
        Err(errors) => {
            warn!(id, "update rejected: invalid course form");
            let page = views::form_page(&state.base_path, Some(&course), &form, &errors);
            return Ok(Html(page).into_response());
        }
    };

    // The row can disappear between the lookup and the write.
    repository::update_course(&state.db, id, changes)
        .await?
        .ok_or(AppError::NotFound)?;
    info!(id, "course updated");
    Ok(redirect_to_list(&state))
}

pub async fn delete_confirm(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let id = parse_id(&id)?;
    let course = repository::find_course_by_id(&state.db, id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Html(views::confirm_delete_page(&state.base_path, &course)))
}

pub async fn delete_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let id = parse_id(&id)?;
    if !repository::delete_course(&state.db, id).await? {
        return Err(AppError::NotFound);
    }
    info!(id, "course deleted");
    Ok(redirect_to_list(&state))
}

/// Unmatched requests. A GET for a course page written without its trailing
/// slash is sent to the slashed form; anything else is a 404.
pub async fn not_found(State(state): State<AppState>, method: Method, uri: Uri) -> Response {
    if method == Method::GET || method == Method::HEAD {
        if let Some(location) = append_slash(&state.base_path, &uri) {
            return (StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, location)]).into_response();
        }
    }
    AppError::NotFound.into_response()
}

fn append_slash(base: &str, uri: &Uri) -> Option<String> {
    let path = uri.path();
    if path.ends_with('/') {
        return None;
    }

    let rest = path.strip_prefix(base)?;
    let is_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    let known = match rest.strip_prefix('/') {
        None => rest.is_empty(),
        Some("create") => true,
        Some(tail) => match tail.split_once('/') {
            None => is_digits(tail),
            Some((id, action)) => is_digits(id) && matches!(action, "update" | "delete"),
        },
    };
    if !known {
        return None;
    }

    Some(match uri.query() {
        Some(query) => format!("{path}/?{query}"),
        None => format!("{path}/"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("12").ok(), Some(12));
        assert!(matches!(parse_id("abc"), Err(AppError::NotFound)));
        assert!(matches!(parse_id("-1"), Err(AppError::NotFound)));
        assert!(matches!(parse_id(""), Err(AppError::NotFound)));
        assert!(matches!(parse_id("99999999999999999999"), Err(AppError::NotFound)));
    }

    #[test]
    fn test_append_slash() {
        let uri = |s: &str| s.parse::<Uri>().expect("uri");

        assert_eq!(append_slash("", &uri("/create")).as_deref(), Some("/create/"));
        assert_eq!(append_slash("", &uri("/12")).as_deref(), Some("/12/"));
        assert_eq!(append_slash("", &uri("/12/update")).as_deref(), Some("/12/update/"));
        assert_eq!(append_slash("", &uri("/12/delete?x=1")).as_deref(), Some("/12/delete/?x=1"));
        assert_eq!(append_slash("/courses", &uri("/courses")).as_deref(), Some("/courses/"));
        assert_eq!(append_slash("/courses", &uri("/courses/4")).as_deref(), Some("/courses/4/"));

        assert_eq!(append_slash("", &uri("/abc")), None);
        assert_eq!(append_slash("", &uri("/12/edit")), None);
        assert_eq!(append_slash("", &uri("/12/update/")), None);
        assert_eq!(append_slash("/courses", &uri("/coursesx")), None);
        assert_eq!(append_slash("/courses", &uri("/other/4")), None);
    }
}
