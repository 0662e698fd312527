//! `ApplicationSecurityGroupRepo` trait definition.

use async_trait::async_trait;

use crate::errors::SecurityGroupError;
use crate::models::ApplicationSecurityGroupFields;

/// Create / read / delete of application security groups.
///
/// Every call is a single request; nothing is cached, retried or logged on
/// failure. Errors are returned to the caller unchanged.
#[async_trait]
pub trait ApplicationSecurityGroupRepo: Send + Sync {
    /// Create a group from its name, rules and spaces.
    ///
    /// Not idempotent: repeated calls create repeated groups unless the
    /// server rejects the duplicate name.
    async fn create(&self, fields: ApplicationSecurityGroupFields)
    -> Result<(), SecurityGroupError>;

    /// Fetch the group with the given name, rules included.
    ///
    /// Returns `SecurityGroupError::NotFound` when no group has that name.
    async fn read(&self, name: &str) -> Result<ApplicationSecurityGroupFields, SecurityGroupError>;

    /// Delete the group with the given server guid.
    async fn delete(&self, guid: &str) -> Result<(), SecurityGroupError>;
}
