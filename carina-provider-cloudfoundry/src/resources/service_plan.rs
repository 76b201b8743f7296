//! `service_plan` data source
//!
//! Looks up a plan of a service offering and exposes the plan GUID as the
//! identifier.

use carina_core::provider::{ProviderError, ProviderResult};
use carina_core::resource::{Resource, State, Value};
use carina_core::schema::{AttributeSchema, AttributeType, ResourceSchema, types};

use super::{client_error, required_str};
use crate::client::ClientSession;

pub const RESOURCE_TYPE: &str = "service_plan";

pub fn schema() -> ResourceSchema {
    ResourceSchema::new(format!("cloudfoundry.{}", RESOURCE_TYPE))
        .with_description("Look up a service plan by service label and plan name")
        .attribute(
            AttributeSchema::new("service", types::non_empty_string())
                .required()
                .with_description("Service name for example, cleardb"),
        )
        .attribute(
            AttributeSchema::new("plan", types::non_empty_string())
                .required()
                .with_description("The plan type ex- shared"),
        )
        .attribute(AttributeSchema::new("service_guid", AttributeType::String).computed())
}

pub async fn read(session: &dyn ClientSession, resource: &Resource) -> ProviderResult<State> {
    let id = &resource.id;
    let offerings = session.service_offerings().map_err(|e| client_error(id, e))?;
    let plans = session.service_plans().map_err(|e| client_error(id, e))?;

    let service = required_str(resource, "service")?;
    let plan = required_str(resource, "plan")?;

    let offering = offerings.find_by_label(service).await.map_err(|e| {
        ProviderError::wrap("Error retrieving service offering", e).for_resource(id.clone())
    })?;

    let service_plan = plans
        .find_plan_in_service_offering(&offering.metadata.guid, plan)
        .await
        .map_err(|e| ProviderError::wrap("Error retrieving plan", e).for_resource(id.clone()))?;

    tracing::debug!(
        "Resolved plan {} of {} to {}",
        plan,
        service,
        service_plan.metadata.guid
    );

    Ok(State::existing(id.clone(), Default::default())
        .with_identifier(service_plan.metadata.guid)
        .with_attribute("service", Value::from(service))
        .with_attribute("plan", Value::from(plan))
        .with_attribute("service_guid", Value::String(offering.metadata.guid)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::fake::FakeCloud;

    fn lookup(service: &str, plan: &str) -> Resource {
        Resource::new(RESOURCE_TYPE, "db")
            .with_attribute("service", Value::from(service))
            .with_attribute("plan", Value::from(plan))
    }

    fn catalog() -> FakeCloud {
        FakeCloud::new()
            .with_offering("cleardb-guid", "cleardb")
            .with_offering("redis-guid", "redis")
            .with_plan("redis-guid", "redis-shared-guid", "shared")
            .with_plan("cleardb-guid", "cleardb-spark-guid", "spark")
            .with_plan("cleardb-guid", "cleardb-shared-guid", "shared")
    }

    #[tokio::test]
    async fn read_sets_identifier_to_plan_guid() {
        let (_, session) = catalog().into_session();

        let state = read(&session, &lookup("cleardb", "shared")).await.unwrap();

        assert!(state.exists);
        assert_eq!(state.identifier.as_deref(), Some("cleardb-shared-guid"));
        assert_eq!(state.attribute_str("service_guid"), Some("cleardb-guid"));
        assert_eq!(state.attribute_str("plan"), Some("shared"));
    }

    #[tokio::test]
    async fn unknown_service_is_an_error() {
        let (_, session) = catalog().into_session();

        let err = read(&session, &lookup("mysql", "shared")).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "[service_plan.db] Error retrieving service offering: Service offering 'mysql' was not found"
        );
    }

    #[tokio::test]
    async fn plan_from_another_offering_is_not_matched() {
        let (_, session) = FakeCloud::new()
            .with_offering("cleardb-guid", "cleardb")
            .with_offering("redis-guid", "redis")
            .with_plan("redis-guid", "redis-large-guid", "large")
            .into_session();

        let err = read(&session, &lookup("cleardb", "large")).await.unwrap_err();
        assert!(err.message.starts_with("Error retrieving plan:"));
    }

    #[tokio::test]
    async fn missing_plan_attribute_is_reported() {
        let (_, session) = catalog().into_session();
        let resource = Resource::new(RESOURCE_TYPE, "db")
            .with_attribute("service", Value::from("cleardb"));

        let err = read(&session, &resource).await.unwrap_err();
        assert_eq!(err.message, "Required attribute 'plan' is missing");
    }
}
