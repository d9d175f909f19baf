//! The JSON:API resource model.
//!
//! - [`Resource`]: one resource object with attributes and relationships
//! - [`Relationship`]: a named link set, mutable through its `self` link
//! - [`ResourceIdentifier`] and [`Linkable`]: what relationships point at
//! - [`TypeMapper`] and [`ApiResource`]: dispatch from type strings to
//!   typed wrappers

pub(crate) mod document;
mod identifier;
mod mapper;
#[allow(clippy::module_inception)]
mod resource;
mod relationship;

pub use identifier::{Linkable, ResourceIdentifier};
pub use mapper::{ApiResource, FromResource, ResourceFactory, TypeMapper, TypedResource};
pub use relationship::Relationship;
pub use resource::Resource;
