//! Cloud Foundry Provider implementation
//!
//! Dispatches lifecycle requests to the handler of each resource type.

use std::sync::Arc;

use carina_core::provider::{ProviderError, ProviderResult, ResourceType};
use carina_core::resource::{Resource, ResourceId, State};

use crate::client::{ClientSession, HttpSession};
use crate::config::Config;
use crate::resources::{self, service_plan, space};

/// Cloud Foundry Provider
pub struct CloudFoundryProvider {
    session: Arc<dyn ClientSession>,
}

impl CloudFoundryProvider {
    /// Create a provider that talks to the API described by `config`.
    ///
    /// No connection is made until the first lifecycle call.
    pub fn new(config: Config) -> Self {
        Self::with_session(Arc::new(HttpSession::new(config)))
    }

    pub fn with_session(session: Arc<dyn ClientSession>) -> Self {
        Self { session }
    }

    fn session(&self) -> &dyn ClientSession {
        self.session.as_ref()
    }

    fn resource_type(&self, id: &ResourceId) -> ProviderResult<Box<dyn ResourceType>> {
        resources::find_resource_type(&id.resource_type).ok_or_else(|| {
            ProviderError::new(format!("Unknown resource type: {}", id.resource_type))
                .for_resource(id.clone())
        })
    }

    /// Resolve a managed (non data source) resource type
    fn managed_type(&self, id: &ResourceId) -> ProviderResult<Box<dyn ResourceType>> {
        let resource_type = self.resource_type(id)?;
        if resource_type.is_data_source() {
            return Err(ProviderError::new(format!(
                "{} is a data source and can only be read",
                id.resource_type
            ))
            .for_resource(id.clone()));
        }
        Ok(resource_type)
    }

    fn validate(&self, resource_type: &dyn ResourceType, resource: &Resource) -> ProviderResult<()> {
        resource_type
            .schema()
            .validate(&resource.attributes)
            .map_err(|errors| {
                let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
                ProviderError::new(format!("Invalid attributes: {}", messages.join("; ")))
                    .for_resource(resource.id.clone())
            })
    }

    // =========================================================================
    // Resource Operations
    // =========================================================================

    pub async fn read_resource(
        &self,
        id: &ResourceId,
        identifier: Option<&str>,
    ) -> ProviderResult<State> {
        self.managed_type(id)?;

        let Some(identifier) = identifier else {
            return Ok(State::not_found(id.clone()));
        };

        space::read(self.session(), id, identifier).await
    }

    pub async fn create_resource(&self, resource: &Resource) -> ProviderResult<State> {
        let resource_type = self.managed_type(&resource.id)?;
        self.validate(resource_type.as_ref(), resource)?;

        space::create(self.session(), resource).await
    }

    pub async fn update_resource(
        &self,
        id: &ResourceId,
        identifier: &str,
        from: &State,
        to: &Resource,
    ) -> ProviderResult<State> {
        let resource_type = self.managed_type(id)?;
        self.validate(resource_type.as_ref(), to)?;

        // Stored configuration catches the change without an API call. State
        // from a refresh has no names, so the handler also checks remote GUIDs.
        for attr in resource_type.schema().force_new_attributes() {
            if from.attributes.contains_key(attr) && from.has_change(to, attr) {
                return Err(resources::replacement_required(id, attr));
            }
        }

        space::update(self.session(), id, identifier, to).await
    }

    pub async fn delete_resource(&self, id: &ResourceId, identifier: &str) -> ProviderResult<()> {
        self.managed_type(id)?;
        space::delete(self.session(), id, identifier).await
    }

    pub async fn exists_resource(&self, id: &ResourceId, identifier: &str) -> ProviderResult<bool> {
        self.managed_type(id)?;
        space::exists(self.session(), id, identifier).await
    }

    pub async fn read_data_source_resource(&self, resource: &Resource) -> ProviderResult<State> {
        let resource_type = self.resource_type(&resource.id)?;
        if !resource_type.is_data_source() {
            return Err(ProviderError::new(format!(
                "{} is a managed resource, not a data source",
                resource.id.resource_type
            ))
            .for_resource(resource.id.clone()));
        }
        self.validate(resource_type.as_ref(), resource)?;

        service_plan::read(self.session(), resource).await
    }
}
