//! Cloud Controller wire mapping for application security groups.
//!
//! Outbound bodies carry `space_guids`; inbound entities do not.

use cf_gateway::resource::{Decodable, Encodable, Identifiable, ResourceKind};
use cf_gateway::Resource;
use serde::{Deserialize, Serialize};

use crate::models::{ApplicationSecurityGroupFields, SecurityGroupRule};

/// Resource kind marker for `/app_security_groups`.
pub struct AppSecurityGroups;

impl ResourceKind for AppSecurityGroups {
    const TYPE_NAME: &'static str = "Application Security Group";
    const COLLECTION_PATH: &'static str = "/app_security_groups";
}

#[derive(Debug, Serialize)]
pub struct CreateAppSecurityGroupBody<'a> {
    name: &'a str,
    rules: &'a [SecurityGroupRule],
    space_guids: &'a [String],
}

#[derive(Debug, Deserialize)]
pub struct AppSecurityGroupEntity {
    name: String,
    #[serde(default)]
    rules: Vec<SecurityGroupRule>,
}

impl Encodable for ApplicationSecurityGroupFields {
    type Body<'a> = CreateAppSecurityGroupBody<'a>;

    fn to_request_body(&self) -> Self::Body<'_> {
        CreateAppSecurityGroupBody {
            name: &self.name,
            rules: &self.rules,
            space_guids: &self.space_guids,
        }
    }
}

impl Decodable for ApplicationSecurityGroupFields {
    type Entity = AppSecurityGroupEntity;

    fn from_resource(resource: Resource<Self::Entity>) -> Self {
        Self {
            name: resource.entity.name,
            guid: resource.metadata.guid,
            rules: resource.entity.rules,
            space_guids: Vec::new(),
        }
    }
}

impl Identifiable for ApplicationSecurityGroupFields {
    fn guid(&self) -> &str {
        &self.guid
    }
}
