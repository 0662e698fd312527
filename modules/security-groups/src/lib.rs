//! Application security groups
//!
//! This crate provides the Cloud Controller repository for application
//! security groups:
//! - `ApplicationSecurityGroupRepo` trait (create / read / delete)
//! - `ApplicationSecurityGroupFields` model
//! - Error type (`SecurityGroupError`)
//! - `CloudControllerApplicationSecurityGroupRepo`, the implementation over a
//!   shared [`cf_gateway::Gateway`]
//!
//! ## Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use cf_gateway::{CloudControllerGateway, GatewayConfig};
//! use security_groups::{ApplicationSecurityGroupRepo, CloudControllerApplicationSecurityGroupRepo};
//!
//! let gateway = Arc::new(CloudControllerGateway::new(GatewayConfig::load(None)?)?);
//! let repo = CloudControllerApplicationSecurityGroupRepo::new(gateway);
//!
//! match repo.read("public-networks").await {
//!     Ok(group) => println!("{} has {} rules", group.name, group.rules.len()),
//!     Err(e) if e.is_not_found() => println!("no such group"),
//!     Err(e) => return Err(e.into()),
//! }
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

pub mod api;
pub mod errors;
pub mod models;
pub mod repo;
mod wire;

pub use api::ApplicationSecurityGroupRepo;
pub use errors::SecurityGroupError;
pub use models::{ApplicationSecurityGroupFields, SecurityGroupRule};
pub use repo::CloudControllerApplicationSecurityGroupRepo;
pub use wire::AppSecurityGroups;
