use crate::modules::notices::controller::{
    create_notice, delete_notice, get_notice, get_notices, update_notice,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

pub fn init_notices_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_notice).get(get_notices))
        .route(
            "/{id}",
            get(get_notice).put(update_notice).delete(delete_notice),
        )
}
