//! Resource and data source handlers
//!
//! This module defines:
//! - Resource type definitions (implementing ResourceType trait)
//! - Helpers shared by the lifecycle handlers

pub mod service_plan;
pub mod space;

use carina_core::provider::{ProviderError, ProviderResult, ResourceType};
use carina_core::resource::{Resource, ResourceId};
use carina_core::schema::ResourceSchema;

use crate::error::CfError;

// =============================================================================
// Resource Type Definitions
// =============================================================================

macro_rules! define_resource_type {
    ($name:ident, $module:ident, $data_source:expr) => {
        pub struct $name;
        impl ResourceType for $name {
            fn name(&self) -> &'static str {
                $module::RESOURCE_TYPE
            }
            fn schema(&self) -> ResourceSchema {
                $module::schema()
            }
            fn is_data_source(&self) -> bool {
                $data_source
            }
        }
    };
}

define_resource_type!(SpaceType, space, false);
define_resource_type!(ServicePlanType, service_plan, true);

/// Returns all resource types supported by this provider
pub fn resource_types() -> Vec<Box<dyn ResourceType>> {
    vec![Box::new(SpaceType), Box::new(ServicePlanType)]
}

/// Find the type definition for a resource type name
pub fn find_resource_type(name: &str) -> Option<Box<dyn ResourceType>> {
    resource_types().into_iter().find(|t| t.name() == name)
}

// =============================================================================
// Handler Helpers
// =============================================================================

/// Failure to obtain a typed client from the session
pub(crate) fn client_error(id: &ResourceId, err: CfError) -> ProviderError {
    ProviderError::wrap("Error initializing Cloud Foundry client", err).for_resource(id.clone())
}

/// A force-new attribute differs from the remote resource
pub(crate) fn replacement_required(id: &ResourceId, attr: &str) -> ProviderError {
    ProviderError::new(format!(
        "Attribute '{}' cannot be changed in place, the resource must be replaced",
        attr
    ))
    .for_resource(id.clone())
}

/// Read a string attribute the schema marks as required
pub(crate) fn required_str<'a>(resource: &'a Resource, key: &str) -> ProviderResult<&'a str> {
    resource.get_str(key).ok_or_else(|| {
        ProviderError::new(format!("Required attribute '{}' is missing", key))
            .for_resource(resource.id.clone())
    })
}
