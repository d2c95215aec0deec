use crate::modules::leave_requests::controller::{
    approve_leave_request, create_leave_request, delete_leave_request, get_leave_request,
    get_leave_requests, reject_leave_request, update_leave_request,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

pub fn init_leave_requests_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_leave_request).get(get_leave_requests))
        .route(
            "/{id}",
            get(get_leave_request)
                .put(update_leave_request)
                .delete(delete_leave_request),
        )
        .route("/{id}/approve", post(approve_leave_request))
        .route("/{id}/reject", post(reject_leave_request))
}
