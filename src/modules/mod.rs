pub mod auth;
pub mod complaints;
pub mod hostels;
pub mod leave_requests;
pub mod notices;
pub mod rooms;
pub mod students;
pub mod users;
