//! Dispatch from resource type strings to typed wrappers.

use std::{any::Any, collections::HashMap, fmt};

use serde_json::{Map, Value};

use super::{Linkable, Relationship, Resource};
use crate::{
    entities::{HvacUnit, Puck, Room, Structure, Thermostat, Vent},
    error::Result,
};

/// A resource the client can hand out: the generic [`Resource`] or a typed
/// wrapper around one.
///
/// ## Object Safety
///
/// This trait is object-safe; [`Client::get`](crate::Client::get) and
/// [`Client::list`](crate::Client::list) return `Box<dyn ApiResource>`.
/// Use [`downcast_ref`](trait.ApiResource.html#method.downcast_ref) or
/// [`downcast`](trait.ApiResource.html#method.downcast) to reach the wrapper,
/// and the async methods on `dyn ApiResource` to mutate without knowing it.
pub trait ApiResource: Linkable + Any + fmt::Debug + Send + Sync {
    /// The underlying resource.
    fn resource(&self) -> &Resource;

    /// The underlying resource, for mutation.
    fn resource_mut(&mut self) -> &mut Resource;

    /// Unwraps into the underlying resource.
    fn into_resource(self: Box<Self>) -> Resource;
}

/// Wrappers constructible from a generic [`Resource`].
pub trait FromResource: ApiResource + Sized {
    /// Wraps `resource`.
    fn from_resource(resource: Resource) -> Self;
}

/// Wrappers bound to one API resource type.
pub trait TypedResource: FromResource {
    /// The API type string, e.g. `"rooms"`.
    const RESOURCE_TYPE: &'static str;
}

impl ApiResource for Resource {
    fn resource(&self) -> &Resource {
        self
    }

    fn resource_mut(&mut self) -> &mut Resource {
        self
    }

    fn into_resource(self: Box<Self>) -> Resource {
        *self
    }
}

impl FromResource for Resource {
    fn from_resource(resource: Resource) -> Self {
        resource
    }
}

impl dyn ApiResource {
    /// Returns `true` if the concrete wrapper is `T`.
    pub fn is<T: ApiResource>(&self) -> bool {
        let any: &dyn Any = self;
        any.is::<T>()
    }

    /// Borrows the concrete wrapper, if it is `T`.
    pub fn downcast_ref<T: ApiResource>(&self) -> Option<&T> {
        let any: &dyn Any = self;
        any.downcast_ref()
    }

    /// Mutably borrows the concrete wrapper, if it is `T`.
    pub fn downcast_mut<T: ApiResource>(&mut self) -> Option<&mut T> {
        let any: &mut dyn Any = self;
        any.downcast_mut()
    }

    /// Converts into `T` if the concrete wrapper is `T`, otherwise hands the
    /// box back unchanged.
    pub fn downcast<T: FromResource>(self: Box<Self>) -> std::result::Result<Box<T>, Box<Self>> {
        if self.is::<T>() {
            Ok(Box::new(T::from_resource(self.into_resource())))
        } else {
            Err(self)
        }
    }

    /// The resource type.
    pub fn resource_type(&self) -> &str {
        self.resource().resource_type()
    }

    /// The resource ID.
    pub fn id(&self) -> &str {
        self.resource().id()
    }

    /// A single attribute.
    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.resource().attribute(key)
    }

    /// The relationship named `name`.
    pub fn relationship(&self, name: &str) -> Option<&Relationship> {
        self.resource().relationship(name)
    }

    /// The relationship named `name`, for mutation.
    pub fn relationship_mut(&mut self, name: &str) -> Option<&mut Relationship> {
        self.resource_mut().relationship_mut(name)
    }

    /// See [`Resource::refresh`].
    pub async fn refresh(&mut self) -> Result<()> {
        self.resource_mut().refresh().await
    }

    /// See [`Resource::update_attributes`].
    pub async fn update_attributes(&mut self, attributes: Map<String, Value>) -> Result<()> {
        self.resource_mut().update_attributes(attributes).await
    }

    /// See [`Resource::delete`].
    pub async fn delete(&mut self) -> Result<()> {
        self.resource_mut().delete().await
    }
}

/// Builds a boxed wrapper from a generic resource.
pub type ResourceFactory = fn(Resource) -> Box<dyn ApiResource>;

fn build<T: FromResource>(resource: Resource) -> Box<dyn ApiResource> {
    Box::new(T::from_resource(resource))
}

/// Registry of resource type strings to wrapper constructors.
///
/// The client consults it for every resource it deserializes. Types with no
/// registration come back as plain [`Resource`]s.
///
/// ## Example
///
/// ```rust
/// use ignis::{Room, TypeMapper};
///
/// let mapper = TypeMapper::new().with::<Room>();
/// assert!(mapper.contains("rooms"));
/// assert!(!mapper.contains("vents"));
/// ```
#[derive(Clone, Default)]
pub struct TypeMapper {
    factories: HashMap<String, ResourceFactory>,
}

impl TypeMapper {
    /// An empty mapper: everything deserializes to [`Resource`].
    pub fn new() -> Self {
        Self::default()
    }

    /// A mapper with every built-in entity wrapper registered.
    pub fn with_entities() -> Self {
        Self::new()
            .with::<Structure>()
            .with::<Room>()
            .with::<Vent>()
            .with::<Puck>()
            .with::<Thermostat>()
            .with::<HvacUnit>()
    }

    /// Registers `T` under its own resource type.
    #[must_use]
    pub fn with<T: TypedResource>(mut self) -> Self {
        self.register::<T>(T::RESOURCE_TYPE);
        self
    }

    /// Registers `T` under `resource_type`, replacing any earlier entry.
    pub fn register<T: FromResource>(&mut self, resource_type: impl Into<String>) {
        self.register_fn(resource_type, build::<T>);
    }

    /// Registers a constructor function under `resource_type`.
    pub fn register_fn(&mut self, resource_type: impl Into<String>, factory: ResourceFactory) {
        self.factories.insert(resource_type.into(), factory);
    }

    /// The constructor registered for `resource_type`.
    pub fn resolve(&self, resource_type: &str) -> Option<ResourceFactory> {
        self.factories.get(resource_type).copied()
    }

    /// Returns `true` if `resource_type` has a registration.
    pub fn contains(&self, resource_type: &str) -> bool {
        self.factories.contains_key(resource_type)
    }

    /// Wraps `resource` with its registered constructor, falling back to the
    /// generic resource.
    pub fn build(&self, resource: Resource) -> Box<dyn ApiResource> {
        match self.resolve(resource.resource_type()) {
            Some(factory) => factory(resource),
            None => Box::new(resource),
        }
    }
}

impl fmt::Debug for TypeMapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut types: Vec<_> = self.factories.keys().collect();
        types.sort();
        f.debug_struct("TypeMapper").field("types", &types).finish()
    }
}
