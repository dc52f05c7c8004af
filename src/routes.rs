use axum::{Router, routing::get};

use crate::api;
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    let base = state.base_path.clone();

    Router::new()
        .route("/health", get(api::health))
        .route(&format!("{base}/"), get(api::list_courses))
        .route(
            &format!("{base}/create/"),
            get(api::create_form).post(api::create_course),
        )
        .route(&format!("{base}/{{id}}/"), get(api::course_detail))
        .route(
            &format!("{base}/{{id}}/update/"),
            get(api::update_form).post(api::update_course),
        )
        .route(
            &format!("{base}/{{id}}/delete/"),
            get(api::delete_confirm).post(api::delete_course),
        )
        .fallback(api::not_found)
        .with_state(state)
}
