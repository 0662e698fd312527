//! Building blocks for one-resource-kind repositories.
//!
//! A resource kind declares where it lives ([`ResourceKind`]) and how its
//! domain value maps to the wire ([`Encodable`], [`Decodable`],
//! [`Identifiable`]). [`ResourceRepository`] then provides the shared
//! create / find-by-name / delete flow over an injected [`Gateway`].

use crate::envelope::Resource;
use crate::error::GatewayError;
use crate::gateway::Gateway;
use crate::query::ListQuery;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use std::sync::Arc;
use thiserror::Error;

/// Static description of a Cloud Controller resource kind.
pub trait ResourceKind {
    /// Human readable type name used in diagnostics (e.g. "Application Security Group").
    const TYPE_NAME: &'static str;
    /// Collection path relative to the API root (e.g. `/app_security_groups`).
    const COLLECTION_PATH: &'static str;
}

/// Domain value that can be sent as a create request.
pub trait Encodable {
    type Body<'a>: Serialize
    where
        Self: 'a;

    fn to_request_body(&self) -> Self::Body<'_>;
}

/// Domain value that can be built from a listed resource.
pub trait Decodable: Sized {
    /// Entity shape as the server returns it.
    type Entity: DeserializeOwned;

    fn from_resource(resource: Resource<Self::Entity>) -> Self;
}

/// Domain value carrying a server-assigned guid.
pub trait Identifiable {
    fn guid(&self) -> &str;
}

/// Errors of the generic repository flow.
#[derive(Error, Debug)]
pub enum ResourceError {
    /// The lookup succeeded but matched nothing.
    #[error("{resource_type} {key} not found")]
    ModelNotFound {
        resource_type: &'static str,
        key: String,
    },

    /// The lookup matched more than one resource for a key that should be unique.
    #[error("{resource_type} {key} is ambiguous: {count} matches")]
    AmbiguousMatch {
        resource_type: &'static str,
        key: String,
        count: usize,
    },

    /// The server returned a resource that does not have the expected shape.
    #[error("invalid {resource_type} payload: {reason}")]
    Decode {
        resource_type: &'static str,
        reason: String,
    },

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// Generic create / find-by-name / delete flow for resource kind `K`.
pub struct ResourceRepository<K> {
    gateway: Arc<dyn Gateway>,
    _kind: PhantomData<fn() -> K>,
}

impl<K> Clone for ResourceRepository<K> {
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
            _kind: PhantomData,
        }
    }
}

impl<K: ResourceKind> ResourceRepository<K> {
    #[must_use]
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self {
            gateway,
            _kind: PhantomData,
        }
    }

    /// Path of a single resource of this kind.
    #[must_use]
    pub fn resource_path(guid: &str) -> String {
        format!("{}/{guid}", K::COLLECTION_PATH)
    }

    /// POST the encoded value to the collection.
    ///
    /// # Errors
    /// Returns `ResourceError::Gateway` for encoding failures and any
    /// non-`201` outcome.
    pub async fn create<T: Encodable>(&self, value: &T) -> Result<(), ResourceError> {
        let body = serde_json::to_value(value.to_request_body()).map_err(GatewayError::Json)?;
        self.gateway
            .create_resource(K::COLLECTION_PATH, body)
            .await?;
        Ok(())
    }

    /// Look up the single resource whose `name` equals `name`, with relations inlined one level.
    ///
    /// # Errors
    /// - `ModelNotFound` when the listing is empty
    /// - `AmbiguousMatch` when more than one resource matches
    /// - `Decode` when the entity has the wrong shape or carries no guid
    /// - `Gateway` for transport and server failures
    pub async fn find_by_name<T>(&self, name: &str) -> Result<T, ResourceError>
    where
        T: Decodable + Identifiable,
    {
        let query = ListQuery::new()
            .filter("name", name)
            .inline_relations_depth(1);
        let mut resources = self
            .gateway
            .list_resources(K::COLLECTION_PATH, &query)
            .await?;

        let resource = match resources.len() {
            0 => {
                return Err(ResourceError::ModelNotFound {
                    resource_type: K::TYPE_NAME,
                    key: name.to_owned(),
                });
            }
            1 => resources.swap_remove(0),
            count => {
                return Err(ResourceError::AmbiguousMatch {
                    resource_type: K::TYPE_NAME,
                    key: name.to_owned(),
                    count,
                });
            }
        };

        decode::<K, T>(resource)
    }

    /// DELETE the resource with the given guid.
    ///
    /// # Errors
    /// Returns `ResourceError::Gateway` for any non-`204` outcome.
    pub async fn delete(&self, guid: &str) -> Result<(), ResourceError> {
        self.gateway
            .delete_resource(&Self::resource_path(guid))
            .await?;
        Ok(())
    }
}

fn decode<K, T>(resource: Resource<serde_json::Value>) -> Result<T, ResourceError>
where
    K: ResourceKind,
    T: Decodable + Identifiable,
{
    let Resource { metadata, entity } = resource;
    let entity: T::Entity =
        serde_json::from_value(entity).map_err(|e| ResourceError::Decode {
            resource_type: K::TYPE_NAME,
            reason: e.to_string(),
        })?;

    let value = T::from_resource(Resource { metadata, entity });
    if value.guid().is_empty() {
        return Err(ResourceError::Decode {
            resource_type: K::TYPE_NAME,
            reason: "missing metadata.guid".to_owned(),
        });
    }
    Ok(value)
}
