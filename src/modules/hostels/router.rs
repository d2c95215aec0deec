use crate::modules::hostels::controller::{
    create_hostel, delete_hostel, get_hostel, get_hostels, update_hostel,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

pub fn init_hostels_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_hostel).get(get_hostels))
        .route(
            "/{id}",
            get(get_hostel).put(update_hostel).delete(delete_hostel),
        )
}
