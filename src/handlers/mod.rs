pub mod packaging_handlers;
pub mod trigger_handlers;
