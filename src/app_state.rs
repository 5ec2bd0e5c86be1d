// app_state.rs

use std::sync::Arc;

use crate::models::build_descriptor::BuildDescriptor;
use crate::services::notification_service::NotificationForwarder;

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    /// Forwarder wired to the document store and push service
    pub forwarder: Arc<NotificationForwarder>,
    /// Packaging identity of the mobile client
    pub build: Arc<BuildDescriptor>,
    /// Shared secret for trigger tokens, if trigger calls are authenticated
    pub trigger_secret: Option<String>,
}

impl AppState {
    /// Creates a new instance of AppState
    ///
    /// # Arguments
    /// * `forwarder` - Notification forwarder shared by all requests
    /// * `build` - Build descriptor served at `/packaging`
    /// * `trigger_secret` - Optional HS256 secret for the trigger route
    ///
    /// # Returns
    /// * `Self` - New AppState instance
    pub fn new(
        forwarder: Arc<NotificationForwarder>,
        build: BuildDescriptor,
        trigger_secret: Option<String>,
    ) -> Self {
        Self {
            forwarder,
            build: Arc::new(build),
            trigger_secret,
        }
    }
}
