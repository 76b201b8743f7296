//! Cloud Foundry API clients
//!
//! Lifecycle handlers only see the traits in this module. `HttpSession`
//! backs them with the v2 REST API; tests back them with in-memory fakes.
//!
//! ## Module Structure
//!
//! - `models` - Wire types for the v2 API
//! - `http` - Request plumbing (auth, errors, pagination)
//! - `api` - REST implementations of the client traits
//! - `session` - Lazily built `ClientSession`

pub mod api;
pub mod http;
pub mod models;
pub mod session;

#[cfg(test)]
pub(crate) mod fake;

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::CfResult;
use models::{
    OrgFields, ServiceOffering, ServicePlan, Space, SpaceCreateRequest, SpaceQuota,
    SpaceUpdateRequest,
};

pub use session::HttpSession;

#[async_trait]
pub trait Organizations: Send + Sync {
    async fn find_by_name(&self, name: &str) -> CfResult<OrgFields>;
}

#[async_trait]
pub trait SpaceQuotas: Send + Sync {
    /// Find a space quota definition by name within an organization
    async fn find_by_name(&self, name: &str, org_guid: &str) -> CfResult<SpaceQuota>;
}

#[async_trait]
pub trait Spaces: Send + Sync {
    async fn create(&self, request: SpaceCreateRequest) -> CfResult<Space>;
    async fn get(&self, guid: &str) -> CfResult<Space>;
    async fn update(&self, guid: &str, request: SpaceUpdateRequest) -> CfResult<Space>;
    async fn delete(&self, guid: &str) -> CfResult<()>;
}

#[async_trait]
pub trait ServiceOfferings: Send + Sync {
    async fn find_by_label(&self, label: &str) -> CfResult<ServiceOffering>;
}

#[async_trait]
pub trait ServicePlans: Send + Sync {
    async fn find_plan_in_service_offering(
        &self,
        offering_guid: &str,
        plan_name: &str,
    ) -> CfResult<ServicePlan>;
}

/// Hands out typed API clients.
///
/// Each accessor may fail when the underlying client cannot be built.
pub trait ClientSession: Send + Sync {
    fn organizations(&self) -> CfResult<Arc<dyn Organizations>>;
    fn space_quotas(&self) -> CfResult<Arc<dyn SpaceQuotas>>;
    fn spaces(&self) -> CfResult<Arc<dyn Spaces>>;
    fn service_offerings(&self) -> CfResult<Arc<dyn ServiceOfferings>>;
    fn service_plans(&self) -> CfResult<Arc<dyn ServicePlans>>;
}
