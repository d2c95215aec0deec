use crate::modules::rooms::controller::{
    create_room, delete_room, get_room, get_rooms, update_room,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

pub fn init_rooms_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_room).get(get_rooms))
        .route("/{id}", get(get_room).put(update_room).delete(delete_room))
}
