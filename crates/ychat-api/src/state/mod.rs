//! Application state
//!
//! Holds the shared state for the Axum application including the service
//! context, the change-notification subscriber, and configuration.

use std::sync::Arc;

use ychat_cache::Subscriber;
use ychat_common::{AppConfig, JwtService};
use ychat_service::ServiceContext;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Service context containing all dependencies
    service_context: Arc<ServiceContext>,
    /// Shared Pub/Sub subscriber feeding room subscriptions
    subscriber: Arc<Subscriber>,
    /// Application configuration
    config: Arc<AppConfig>,
}

impl AppState {
    /// Create a new AppState
    pub fn new(service_context: ServiceContext, subscriber: Subscriber, config: AppConfig) -> Self {
        Self {
            service_context: Arc::new(service_context),
            subscriber: Arc::new(subscriber),
            config: Arc::new(config),
        }
    }

    /// Get the service context
    pub fn service_context(&self) -> &ServiceContext {
        &self.service_context
    }

    /// Get the change-notification subscriber
    pub fn subscriber(&self) -> &Arc<Subscriber> {
        &self.subscriber
    }

    /// Get the application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Get the JWT service from the service context
    pub fn jwt_service(&self) -> &JwtService {
        self.service_context.jwt_service()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("service_context", &"ServiceContext")
            .field("config", &"AppConfig")
            .finish()
    }
}
