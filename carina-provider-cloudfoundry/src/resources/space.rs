//! `space` resource
//!
//! A space belongs to exactly one organization and may be bound to a
//! space quota definition of that organization. Only the name can change
//! in place; `org` and `space_quota` force a new space.

use std::collections::HashMap;

use carina_core::provider::{ProviderError, ProviderResult};
use carina_core::resource::{Resource, ResourceId, State, Value};
use carina_core::schema::{AttributeSchema, AttributeType, ResourceSchema, types};

use super::{client_error, replacement_required, required_str};
use crate::client::ClientSession;
use crate::client::models::{Space, SpaceCreateRequest, SpaceUpdateRequest};

pub const RESOURCE_TYPE: &str = "space";

/// Attributes carried from configuration into state, since the API only knows GUIDs
const CONFIG_ONLY_ATTRIBUTES: &[&str] = &["org", "space_quota"];

pub fn schema() -> ResourceSchema {
    ResourceSchema::new(format!("cloudfoundry.{}", RESOURCE_TYPE))
        .with_description("A Cloud Foundry space")
        .attribute(
            AttributeSchema::new("name", types::non_empty_string())
                .required()
                .with_description("The name for the space"),
        )
        .attribute(
            AttributeSchema::new("org", types::non_empty_string())
                .required()
                .force_new()
                .with_description("The org this space belongs to"),
        )
        .attribute(
            AttributeSchema::new("space_quota", AttributeType::String)
                .force_new()
                .with_description("The name of the Space Quota Definition"),
        )
        .attribute(AttributeSchema::new("org_guid", AttributeType::String).computed())
        .attribute(AttributeSchema::new("space_quota_guid", AttributeType::String).computed())
}

/// Map an API space into state attributes
fn space_to_state(id: ResourceId, space: Space) -> State {
    let mut attributes = HashMap::new();
    attributes.insert("name".to_string(), Value::String(space.entity.name));
    attributes.insert(
        "org_guid".to_string(),
        Value::String(space.entity.organization_guid),
    );
    if let Some(quota) = space.entity.space_quota_definition_guid {
        attributes.insert("space_quota_guid".to_string(), Value::String(quota));
    }
    State::existing(id, attributes).with_identifier(space.metadata.guid)
}

/// Copy configured names the API cannot report back.
///
/// Only called once the names have been resolved against the remote space.
fn carry_config(mut state: State, resource: &Resource) -> State {
    for key in CONFIG_ONLY_ATTRIBUTES {
        if let Some(value) = resource.attributes.get(*key) {
            state.attributes.insert(key.to_string(), value.clone());
        }
    }
    state
}

/// Resolve the configured org and optional quota names to GUIDs
async fn resolve_placement(
    session: &dyn ClientSession,
    id: &ResourceId,
    resource: &Resource,
) -> ProviderResult<(String, Option<String>)> {
    let orgs = session.organizations().map_err(|e| client_error(id, e))?;
    let org = required_str(resource, "org")?;

    let org_guid = orgs
        .find_by_name(org)
        .await
        .map_err(|e| ProviderError::wrap("Error retrieving org", e).for_resource(id.clone()))?
        .guid;

    let Some(quota_name) = resource.get_str("space_quota") else {
        return Ok((org_guid, None));
    };
    let quotas = session.space_quotas().map_err(|e| client_error(id, e))?;
    let quota = quotas
        .find_by_name(quota_name, &org_guid)
        .await
        .map_err(|e| {
            ProviderError::wrap("Error retrieving space quota", e).for_resource(id.clone())
        })?;

    Ok((org_guid, Some(quota.guid)))
}

pub async fn create(session: &dyn ClientSession, resource: &Resource) -> ProviderResult<State> {
    let id = &resource.id;
    let spaces = session.spaces().map_err(|e| client_error(id, e))?;

    let name = required_str(resource, "name")?;
    let (org_guid, quota_guid) = resolve_placement(session, id, resource).await?;

    tracing::info!("Creating space {} in org {}", name, org_guid);
    let created = spaces
        .create(SpaceCreateRequest {
            name: name.to_string(),
            organization_guid: org_guid,
            space_quota_definition_guid: quota_guid,
        })
        .await
        .map_err(|e| ProviderError::wrap("Error creating space", e).for_resource(id.clone()))?;

    // The space exists from here on, so its GUID must reach the caller.
    let state = match read(session, id, &created.metadata.guid).await {
        Ok(state) => state,
        Err(e) => {
            tracing::warn!(
                "Space {} was created but could not be read back: {}",
                created.metadata.guid,
                e
            );
            space_to_state(id.clone(), created)
        }
    };
    Ok(carry_config(state, resource))
}

pub async fn read(
    session: &dyn ClientSession,
    id: &ResourceId,
    identifier: &str,
) -> ProviderResult<State> {
    let spaces = session.spaces().map_err(|e| client_error(id, e))?;

    let space = spaces
        .get(identifier)
        .await
        .map_err(|e| ProviderError::wrap("Error retrieving space", e).for_resource(id.clone()))?;

    Ok(space_to_state(id.clone(), space))
}

/// Rename the space. The configured org and quota must resolve to the GUIDs
/// the remote space already has, otherwise the space has to be replaced.
pub async fn update(
    session: &dyn ClientSession,
    id: &ResourceId,
    identifier: &str,
    to: &Resource,
) -> ProviderResult<State> {
    let spaces = session.spaces().map_err(|e| client_error(id, e))?;

    let current = spaces
        .get(identifier)
        .await
        .map_err(|e| ProviderError::wrap("Error retrieving space", e).for_resource(id.clone()))?;

    let (org_guid, quota_guid) = resolve_placement(session, id, to).await?;
    if org_guid != current.entity.organization_guid {
        return Err(replacement_required(id, "org"));
    }
    if quota_guid != current.entity.space_quota_definition_guid {
        return Err(replacement_required(id, "space_quota"));
    }

    let name = required_str(to, "name")?;
    let mut request = SpaceUpdateRequest::default();
    if name != current.entity.name {
        request.name = Some(name.to_string());
    }

    let space = if request.is_empty() {
        tracing::debug!("No in-place changes for space {}", identifier);
        current
    } else {
        tracing::info!("Updating space {}", identifier);
        spaces
            .update(identifier, request)
            .await
            .map_err(|e| ProviderError::wrap("Error updating space", e).for_resource(id.clone()))?
    };

    Ok(carry_config(space_to_state(id.clone(), space), to))
}

pub async fn delete(
    session: &dyn ClientSession,
    id: &ResourceId,
    identifier: &str,
) -> ProviderResult<()> {
    let spaces = session.spaces().map_err(|e| client_error(id, e))?;

    tracing::info!("Deleting space {}", identifier);
    spaces
        .delete(identifier)
        .await
        .map_err(|e| ProviderError::wrap("Error deleting space", e).for_resource(id.clone()))
}

/// Check whether the space is still there. A 404 means it is gone.
pub async fn exists(
    session: &dyn ClientSession,
    id: &ResourceId,
    identifier: &str,
) -> ProviderResult<bool> {
    let spaces = session.spaces().map_err(|e| client_error(id, e))?;

    match spaces.get(identifier).await {
        Ok(space) => Ok(space.metadata.guid == identifier),
        Err(e) if e.is_not_found() => {
            tracing::debug!("Space {} no longer exists", identifier);
            Ok(false)
        }
        Err(e) => Err(
            ProviderError::wrap("Error communicating with the API", e).for_resource(id.clone()),
        ),
    }
}
