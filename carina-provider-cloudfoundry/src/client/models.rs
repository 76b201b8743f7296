//! Wire models for the Cloud Foundry v2 API

use serde::{Deserialize, Serialize};

/// Metadata block carried by every v2 resource
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Metadata {
    pub guid: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// `{"metadata": {...}, "entity": {...}}` envelope
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiResource<T> {
    pub metadata: Metadata,
    pub entity: T,
}

/// One page of a paginated list response
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    #[serde(default)]
    pub total_results: u64,
    #[serde(default)]
    pub next_url: Option<String>,
    #[serde(default = "Vec::new")]
    pub resources: Vec<ApiResource<T>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OrgEntity {
    pub name: String,
    #[serde(default)]
    pub status: Option<String>,
}

/// Organization, as returned by a name lookup
#[derive(Debug, Clone, PartialEq)]
pub struct OrgFields {
    pub guid: String,
    pub name: String,
}

impl From<ApiResource<OrgEntity>> for OrgFields {
    fn from(r: ApiResource<OrgEntity>) -> Self {
        Self {
            guid: r.metadata.guid,
            name: r.entity.name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SpaceQuotaEntity {
    pub name: String,
    #[serde(default)]
    pub organization_guid: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpaceQuota {
    pub guid: String,
    pub name: String,
}

impl From<ApiResource<SpaceQuotaEntity>> for SpaceQuota {
    fn from(r: ApiResource<SpaceQuotaEntity>) -> Self {
        Self {
            guid: r.metadata.guid,
            name: r.entity.name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SpaceEntity {
    pub name: String,
    pub organization_guid: String,
    #[serde(default)]
    pub space_quota_definition_guid: Option<String>,
}

pub type Space = ApiResource<SpaceEntity>;

/// Body of `POST /v2/spaces`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SpaceCreateRequest {
    pub name: String,
    pub organization_guid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub space_quota_definition_guid: Option<String>,
}

/// Body of `PUT /v2/spaces/:guid`; unset fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SpaceUpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl SpaceUpdateRequest {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ServiceOfferingEntity {
    pub label: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub active: Option<bool>,
}

pub type ServiceOffering = ApiResource<ServiceOfferingEntity>;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ServicePlanEntity {
    pub name: String,
    #[serde(default)]
    pub service_guid: Option<String>,
    #[serde(default)]
    pub free: Option<bool>,
    #[serde(default)]
    pub description: Option<String>,
}

pub type ServicePlan = ApiResource<ServicePlanEntity>;
