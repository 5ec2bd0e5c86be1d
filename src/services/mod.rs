pub mod fcm_service;
pub mod jwt_service;
pub mod notification_service;
pub mod push_service;
