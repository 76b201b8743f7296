//! In-memory client session for handler tests

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::client::models::{
    ApiResource, Metadata, OrgFields, ServiceOffering, ServiceOfferingEntity, ServicePlan,
    ServicePlanEntity, Space, SpaceCreateRequest, SpaceEntity, SpaceQuota, SpaceUpdateRequest,
};
use crate::client::{
    ClientSession, Organizations, ServiceOfferings, ServicePlans, SpaceQuotas, Spaces,
};
use crate::error::{CfError, CfResult};

fn metadata(guid: &str) -> Metadata {
    Metadata {
        guid: guid.to_string(),
        ..Metadata::default()
    }
}

pub fn space(guid: &str, name: &str, org_guid: &str, quota_guid: Option<&str>) -> Space {
    ApiResource {
        metadata: metadata(guid),
        entity: SpaceEntity {
            name: name.to_string(),
            organization_guid: org_guid.to_string(),
            space_quota_definition_guid: quota_guid.map(str::to_string),
        },
    }
}

fn failure(status: u16) -> CfError {
    CfError::RequestFailure {
        status,
        error_code: None,
        description: format!("HTTP {}", status),
    }
}

#[derive(Default)]
pub struct FakeCloud {
    orgs: Vec<OrgFields>,
    /// (org guid, quota)
    quotas: Vec<(String, SpaceQuota)>,
    offerings: Vec<ServiceOffering>,
    plans: Vec<ServicePlan>,
    spaces: Mutex<HashMap<String, Space>>,
    /// Status returned by every space call when set
    space_failure: Option<u16>,
    /// Status returned by `get` only
    get_failure: Option<u16>,
    /// Status returned by `update` only
    update_failure: Option<u16>,
    /// GUID reported by `get`, regardless of the requested one
    get_guid_override: Option<String>,
    spaces_unavailable: bool,
    pub created: Mutex<Vec<SpaceCreateRequest>>,
    pub updated: Mutex<Vec<(String, SpaceUpdateRequest)>>,
    pub deleted: Mutex<Vec<String>>,
}

impl FakeCloud {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_org(mut self, guid: &str, name: &str) -> Self {
        self.orgs.push(OrgFields {
            guid: guid.to_string(),
            name: name.to_string(),
        });
        self
    }

    pub fn with_quota(mut self, org_guid: &str, guid: &str, name: &str) -> Self {
        self.quotas.push((
            org_guid.to_string(),
            SpaceQuota {
                guid: guid.to_string(),
                name: name.to_string(),
            },
        ));
        self
    }

    pub fn with_space(self, space: Space) -> Self {
        self.spaces
            .lock()
            .unwrap()
            .insert(space.metadata.guid.clone(), space);
        self
    }

    pub fn with_offering(mut self, guid: &str, label: &str) -> Self {
        self.offerings.push(ApiResource {
            metadata: metadata(guid),
            entity: ServiceOfferingEntity {
                label: label.to_string(),
                description: None,
                active: Some(true),
            },
        });
        self
    }

    pub fn with_plan(mut self, offering_guid: &str, guid: &str, name: &str) -> Self {
        self.plans.push(ApiResource {
            metadata: metadata(guid),
            entity: ServicePlanEntity {
                name: name.to_string(),
                service_guid: Some(offering_guid.to_string()),
                free: None,
                description: None,
            },
        });
        self
    }

    pub fn with_space_failure(mut self, status: u16) -> Self {
        self.space_failure = Some(status);
        self
    }

    pub fn with_get_failure(mut self, status: u16) -> Self {
        self.get_failure = Some(status);
        self
    }

    pub fn with_update_failure(mut self, status: u16) -> Self {
        self.update_failure = Some(status);
        self
    }

    pub fn with_get_guid_override(mut self, guid: &str) -> Self {
        self.get_guid_override = Some(guid.to_string());
        self
    }

    pub fn with_spaces_unavailable(mut self) -> Self {
        self.spaces_unavailable = true;
        self
    }

    pub fn into_session(self) -> (Arc<FakeCloud>, FakeSession) {
        let cloud = Arc::new(self);
        (cloud.clone(), FakeSession(cloud))
    }

    fn check_space_failure(&self, specific: Option<u16>) -> CfResult<()> {
        match self.space_failure.or(specific) {
            Some(status) => Err(failure(status)),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl Organizations for FakeCloud {
    async fn find_by_name(&self, name: &str) -> CfResult<OrgFields> {
        self.orgs
            .iter()
            .find(|o| o.name == name)
            .cloned()
            .ok_or_else(|| CfError::not_found("Organization", name))
    }
}

#[async_trait]
impl SpaceQuotas for FakeCloud {
    async fn find_by_name(&self, name: &str, org_guid: &str) -> CfResult<SpaceQuota> {
        self.quotas
            .iter()
            .find(|(org, q)| org == org_guid && q.name == name)
            .map(|(_, q)| q.clone())
            .ok_or_else(|| CfError::not_found("Space quota", name))
    }
}

#[async_trait]
impl Spaces for FakeCloud {
    async fn create(&self, request: SpaceCreateRequest) -> CfResult<Space> {
        self.check_space_failure(None)?;
        let mut spaces = self.spaces.lock().unwrap();
        let guid = format!("space-guid-{}", spaces.len() + 1);
        let created = space(
            &guid,
            &request.name,
            &request.organization_guid,
            request.space_quota_definition_guid.as_deref(),
        );
        spaces.insert(guid, created.clone());
        self.created.lock().unwrap().push(request);
        Ok(created)
    }

    async fn get(&self, guid: &str) -> CfResult<Space> {
        self.check_space_failure(self.get_failure)?;
        let mut found = self
            .spaces
            .lock()
            .unwrap()
            .get(guid)
            .cloned()
            .ok_or_else(|| failure(404))?;
        if let Some(other) = &self.get_guid_override {
            found.metadata.guid = other.clone();
        }
        Ok(found)
    }

    async fn update(&self, guid: &str, request: SpaceUpdateRequest) -> CfResult<Space> {
        self.check_space_failure(self.update_failure)?;
        let mut spaces = self.spaces.lock().unwrap();
        let existing = spaces.get_mut(guid).ok_or_else(|| failure(404))?;
        if let Some(name) = &request.name {
            existing.entity.name = name.clone();
        }
        let updated = existing.clone();
        self.updated
            .lock()
            .unwrap()
            .push((guid.to_string(), request));
        Ok(updated)
    }

    async fn delete(&self, guid: &str) -> CfResult<()> {
        self.check_space_failure(None)?;
        self.spaces
            .lock()
            .unwrap()
            .remove(guid)
            .ok_or_else(|| failure(404))?;
        self.deleted.lock().unwrap().push(guid.to_string());
        Ok(())
    }
}

#[async_trait]
impl ServiceOfferings for FakeCloud {
    async fn find_by_label(&self, label: &str) -> CfResult<ServiceOffering> {
        self.offerings
            .iter()
            .find(|o| o.entity.label == label)
            .cloned()
            .ok_or_else(|| CfError::not_found("Service offering", label))
    }
}

#[async_trait]
impl ServicePlans for FakeCloud {
    async fn find_plan_in_service_offering(
        &self,
        offering_guid: &str,
        plan_name: &str,
    ) -> CfResult<ServicePlan> {
        self.plans
            .iter()
            .find(|p| {
                p.entity.service_guid.as_deref() == Some(offering_guid)
                    && p.entity.name == plan_name
            })
            .cloned()
            .ok_or_else(|| CfError::not_found("Service plan", plan_name))
    }
}

pub struct FakeSession(Arc<FakeCloud>);

impl ClientSession for FakeSession {
    fn organizations(&self) -> CfResult<Arc<dyn Organizations>> {
        Ok(self.0.clone())
    }

    fn space_quotas(&self) -> CfResult<Arc<dyn SpaceQuotas>> {
        Ok(self.0.clone())
    }

    fn spaces(&self) -> CfResult<Arc<dyn Spaces>> {
        if self.0.spaces_unavailable {
            return Err(CfError::configuration("spaces client unavailable"));
        }
        Ok(self.0.clone())
    }

    fn service_offerings(&self) -> CfResult<Arc<dyn ServiceOfferings>> {
        Ok(self.0.clone())
    }

    fn service_plans(&self) -> CfResult<Arc<dyn ServicePlans>> {
        Ok(self.0.clone())
    }
}
