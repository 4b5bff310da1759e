pub mod handlers;
pub mod notify;
pub mod pages;
pub mod render;
pub mod router;
