//! Carina Cloud Foundry Provider
//!
//! Manages Cloud Foundry spaces and looks up service plans through the
//! v2 REST API.
//!
//! ## Module Structure
//!
//! - `config` - Endpoint, token and timeout settings
//! - `error` - Client error type
//! - `client` - API client traits, REST implementation and session
//! - `resources` - Resource type definitions and lifecycle handlers
//! - `provider` - CloudFoundryProvider implementation

pub mod client;
pub mod config;
pub mod error;
pub mod provider;
pub mod resources;

// Re-export main types
pub use client::{ClientSession, HttpSession};
pub use config::Config;
pub use error::{CfError, CfResult};
pub use provider::CloudFoundryProvider;

use carina_core::provider::{BoxFuture, Provider, ProviderResult};
use carina_core::resource::{Resource, ResourceId, State};

use resources::resource_types;

// =============================================================================
// Provider Trait Implementation
// =============================================================================

impl Provider for CloudFoundryProvider {
    fn name(&self) -> &'static str {
        "cloudfoundry"
    }

    fn resource_types(&self) -> Vec<Box<dyn carina_core::provider::ResourceType>> {
        resource_types()
    }

    fn read(
        &self,
        id: &ResourceId,
        identifier: Option<&str>,
    ) -> BoxFuture<'_, ProviderResult<State>> {
        let id = id.clone();
        let identifier = identifier.map(|s| s.to_string());
        Box::pin(async move { self.read_resource(&id, identifier.as_deref()).await })
    }

    fn create(&self, resource: &Resource) -> BoxFuture<'_, ProviderResult<State>> {
        let resource = resource.clone();
        Box::pin(async move { self.create_resource(&resource).await })
    }

    fn update(
        &self,
        id: &ResourceId,
        identifier: &str,
        from: &State,
        to: &Resource,
    ) -> BoxFuture<'_, ProviderResult<State>> {
        let id = id.clone();
        let identifier = identifier.to_string();
        let from = from.clone();
        let to = to.clone();
        Box::pin(async move { self.update_resource(&id, &identifier, &from, &to).await })
    }

    fn delete(&self, id: &ResourceId, identifier: &str) -> BoxFuture<'_, ProviderResult<()>> {
        let id = id.clone();
        let identifier = identifier.to_string();
        Box::pin(async move { self.delete_resource(&id, &identifier).await })
    }

    fn exists(&self, id: &ResourceId, identifier: &str) -> BoxFuture<'_, ProviderResult<bool>> {
        let id = id.clone();
        let identifier = identifier.to_string();
        Box::pin(async move { self.exists_resource(&id, &identifier).await })
    }

    fn read_data_source(&self, resource: &Resource) -> BoxFuture<'_, ProviderResult<State>> {
        let resource = resource.clone();
        Box::pin(async move { self.read_data_source_resource(&resource).await })
    }
}
