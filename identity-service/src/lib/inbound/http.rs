pub mod bearer;
pub mod handlers;
pub mod router;
