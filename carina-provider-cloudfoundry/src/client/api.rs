//! REST implementations of the client traits

use std::sync::Arc;

use async_trait::async_trait;

use crate::client::http::CfHttpClient;
use crate::client::models::{
    OrgEntity, OrgFields, ServiceOffering, ServiceOfferingEntity, ServicePlan, ServicePlanEntity,
    Space, SpaceCreateRequest, SpaceQuota, SpaceQuotaEntity, SpaceUpdateRequest,
};
use crate::client::{Organizations, ServiceOfferings, ServicePlans, SpaceQuotas, Spaces};
use crate::error::{CfError, CfResult};

pub struct OrgClient {
    http: Arc<CfHttpClient>,
}

impl OrgClient {
    pub fn new(http: Arc<CfHttpClient>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Organizations for OrgClient {
    async fn find_by_name(&self, name: &str) -> CfResult<OrgFields> {
        let filter = format!("name:{}", name);
        self.http
            .find_first::<OrgEntity, _>("/v2/organizations", &[("q", filter.as_str())], |r| {
                r.entity.name == name
            })
            .await?
            .map(OrgFields::from)
            .ok_or_else(|| CfError::not_found("Organization", name))
    }
}

pub struct SpaceQuotaClient {
    http: Arc<CfHttpClient>,
}

impl SpaceQuotaClient {
    pub fn new(http: Arc<CfHttpClient>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl SpaceQuotas for SpaceQuotaClient {
    async fn find_by_name(&self, name: &str, org_guid: &str) -> CfResult<SpaceQuota> {
        let path = format!("/v2/organizations/{}/space_quota_definitions", org_guid);
        self.http
            .find_first::<SpaceQuotaEntity, _>(&path, &[], |r| r.entity.name == name)
            .await?
            .map(SpaceQuota::from)
            .ok_or_else(|| CfError::not_found("Space quota", name))
    }
}

pub struct SpaceClient {
    http: Arc<CfHttpClient>,
}

impl SpaceClient {
    pub fn new(http: Arc<CfHttpClient>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Spaces for SpaceClient {
    async fn create(&self, request: SpaceCreateRequest) -> CfResult<Space> {
        self.http.post("/v2/spaces", &request).await
    }

    async fn get(&self, guid: &str) -> CfResult<Space> {
        self.http.get(&format!("/v2/spaces/{}", guid)).await
    }

    async fn update(&self, guid: &str, request: SpaceUpdateRequest) -> CfResult<Space> {
        self.http
            .put(&format!("/v2/spaces/{}", guid), &request)
            .await
    }

    async fn delete(&self, guid: &str) -> CfResult<()> {
        self.http
            .delete(&format!("/v2/spaces/{}", guid), &[("async", "false")])
            .await
    }
}

pub struct ServiceOfferingClient {
    http: Arc<CfHttpClient>,
}

impl ServiceOfferingClient {
    pub fn new(http: Arc<CfHttpClient>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl ServiceOfferings for ServiceOfferingClient {
    async fn find_by_label(&self, label: &str) -> CfResult<ServiceOffering> {
        let filter = format!("label:{}", label);
        self.http
            .find_first::<ServiceOfferingEntity, _>("/v2/services", &[("q", filter.as_str())], |r| {
                r.entity.label == label
            })
            .await?
            .ok_or_else(|| CfError::not_found("Service offering", label))
    }
}

pub struct ServicePlanClient {
    http: Arc<CfHttpClient>,
}

impl ServicePlanClient {
    pub fn new(http: Arc<CfHttpClient>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl ServicePlans for ServicePlanClient {
    async fn find_plan_in_service_offering(
        &self,
        offering_guid: &str,
        plan_name: &str,
    ) -> CfResult<ServicePlan> {
        let path = format!("/v2/services/{}/service_plans", offering_guid);
        self.http
            .find_first::<ServicePlanEntity, _>(&path, &[], |r| r.entity.name == plan_name)
            .await?
            .ok_or_else(|| CfError::not_found("Service plan", plan_name))
    }
}
