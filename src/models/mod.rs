pub mod build_descriptor;
pub mod chat;
pub mod message;
pub mod notification;
pub mod user;
