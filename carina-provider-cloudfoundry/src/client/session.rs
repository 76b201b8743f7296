//! Lazily constructed client session

use std::sync::{Arc, OnceLock};

use crate::client::api::{
    OrgClient, ServiceOfferingClient, ServicePlanClient, SpaceClient, SpaceQuotaClient,
};
use crate::client::http::CfHttpClient;
use crate::client::{
    ClientSession, Organizations, ServiceOfferings, ServicePlans, SpaceQuotas, Spaces,
};
use crate::config::Config;
use crate::error::CfResult;

/// `ClientSession` backed by the v2 REST API.
///
/// The HTTP client is built on first use and shared by every typed client.
/// A failed build is not cached, so a later call retries it.
pub struct HttpSession {
    config: Config,
    http: OnceLock<Arc<CfHttpClient>>,
}

impl HttpSession {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            http: OnceLock::new(),
        }
    }

    fn http(&self) -> CfResult<Arc<CfHttpClient>> {
        if let Some(http) = self.http.get() {
            return Ok(http.clone());
        }
        let built = Arc::new(CfHttpClient::new(&self.config)?);
        tracing::debug!("Initialized Cloud Foundry client for {}", built.endpoint());
        Ok(self.http.get_or_init(|| built).clone())
    }
}

impl ClientSession for HttpSession {
    fn organizations(&self) -> CfResult<Arc<dyn Organizations>> {
        Ok(Arc::new(OrgClient::new(self.http()?)))
    }

    fn space_quotas(&self) -> CfResult<Arc<dyn SpaceQuotas>> {
        Ok(Arc::new(SpaceQuotaClient::new(self.http()?)))
    }

    fn spaces(&self) -> CfResult<Arc<dyn Spaces>> {
        Ok(Arc::new(SpaceClient::new(self.http()?)))
    }

    fn service_offerings(&self) -> CfResult<Arc<dyn ServiceOfferings>> {
        Ok(Arc::new(ServiceOfferingClient::new(self.http()?)))
    }

    fn service_plans(&self) -> CfResult<Arc<dyn ServicePlans>> {
        Ok(Arc::new(ServicePlanClient::new(self.http()?)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CfError;

    #[test]
    fn bad_config_surfaces_as_construction_error() {
        let session = HttpSession::new(Config::default());
        assert!(matches!(
            session.spaces().err(),
            Some(CfError::Configuration(_))
        ));
    }

    #[test]
    fn http_client_is_shared() {
        let session = HttpSession::new(Config::new("https://api.example.com"));
        let first = session.http().unwrap();
        let second = session.http().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }
}
