use std::sync::Arc;

use async_trait::async_trait;
use cf_gateway::{Gateway, ResourceRepository};
use tracing::{debug, instrument};

use crate::api::ApplicationSecurityGroupRepo;
use crate::errors::SecurityGroupError;
use crate::models::ApplicationSecurityGroupFields;
use crate::wire::AppSecurityGroups;

/// [`ApplicationSecurityGroupRepo`] backed by the Cloud Controller.
///
/// Holds no state besides the shared gateway; concurrent calls are independent.
#[derive(Clone)]
pub struct CloudControllerApplicationSecurityGroupRepo {
    resources: ResourceRepository<AppSecurityGroups>,
}

impl CloudControllerApplicationSecurityGroupRepo {
    #[must_use]
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self {
            resources: ResourceRepository::new(gateway),
        }
    }
}

#[async_trait]
impl ApplicationSecurityGroupRepo for CloudControllerApplicationSecurityGroupRepo {
    #[instrument(skip_all, fields(name = %fields.name))]
    async fn create(
        &self,
        fields: ApplicationSecurityGroupFields,
    ) -> Result<(), SecurityGroupError> {
        if fields.name.trim().is_empty() {
            return Err(SecurityGroupError::invalid_input("name must not be blank"));
        }

        self.resources.create(&fields).await?;
        debug!(rules = fields.rules.len(), spaces = fields.space_guids.len(), "created");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn read(&self, name: &str) -> Result<ApplicationSecurityGroupFields, SecurityGroupError> {
        let group: ApplicationSecurityGroupFields = self.resources.find_by_name(name).await?;
        debug!(guid = %group.guid, "found");
        Ok(group)
    }

    #[instrument(skip(self))]
    async fn delete(&self, guid: &str) -> Result<(), SecurityGroupError> {
        self.resources.delete(guid).await?;
        Ok(())
    }
}
