use crate::modules::complaints::controller::{
    create_complaint, delete_complaint, get_complaint, get_complaints, update_complaint,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

pub fn init_complaints_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_complaint).get(get_complaints))
        .route(
            "/{id}",
            get(get_complaint)
                .put(update_complaint)
                .delete(delete_complaint),
        )
}
