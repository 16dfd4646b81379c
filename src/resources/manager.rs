//! # Resource Manager
//!
//! Type-directed routing to one [`ResourceRegistry`] per resource type.

use super::{registry::type_name, Resource, ResourceRegistry};
use crate::{fatal, GridsteadError, GridsteadResult};
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::path::Path;

/// Type-erased view of a registry, stored by the manager.
trait AnyRegistry {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn clear(&mut self);
}

impl<T: Resource> AnyRegistry for ResourceRegistry<T> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn clear(&mut self) {
        ResourceRegistry::clear(self);
    }
}

/// Routes typed resource requests to the registry registered for that type.
///
/// The manager holds no resource state of its own: every operation is
/// forwarded to exactly one registry. Registries are handed over with
/// [`add_registry`](Self::add_registry) and stay reachable through
/// [`registry`](Self::registry) / [`registry_mut`](Self::registry_mut).
///
/// # Examples
///
/// ```
/// use gridstead::{Resource, ResourceManager, ResourceRegistry};
///
/// struct Level(usize);
/// impl Resource for Level {
///     type Context = ();
/// }
///
/// let mut manager = ResourceManager::new();
/// manager.add_registry(ResourceRegistry::<Level>::with_loader(|path, _| {
///     Some(Box::new(Level(path.as_os_str().len())))
/// }));
///
/// assert_eq!(manager.acquire::<Level>("one").0, 3);
/// assert!(manager.loaded::<Level>("one"));
/// manager.unload::<Level>("one");
/// assert!(!manager.loaded::<Level>("one"));
/// ```
#[derive(Default)]
pub struct ResourceManager {
    registries: HashMap<TypeId, Box<dyn AnyRegistry>>,
}

impl ResourceManager {
    /// Creates a manager with no registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the registry for `T`; only one registry per type.
    pub fn try_add_registry<T: Resource>(&mut self, registry: ResourceRegistry<T>) -> GridsteadResult<()> {
        let key = TypeId::of::<T>();
        if self.registries.contains_key(&key) {
            return Err(GridsteadError::RegistryAlreadyRegistered(type_name::<T>()));
        }

        self.registries.insert(key, Box::new(registry));
        log::debug!("Registry added for {}", type_name::<T>());
        Ok(())
    }

    /// [`try_add_registry`](Self::try_add_registry), fatal on a duplicate type.
    pub fn add_registry<T: Resource>(&mut self, registry: ResourceRegistry<T>) {
        if let Err(error) = self.try_add_registry(registry) {
            fatal(error);
        }
    }

    /// The registry for `T`, if any.
    pub fn registry<T: Resource>(&self) -> Option<&ResourceRegistry<T>> {
        self.registries
            .get(&TypeId::of::<T>())
            .and_then(|registry| registry.as_any().downcast_ref::<ResourceRegistry<T>>())
    }

    /// The registry for `T`, if any, mutably.
    pub fn registry_mut<T: Resource>(&mut self) -> Option<&mut ResourceRegistry<T>> {
        self.registries
            .get_mut(&TypeId::of::<T>())
            .and_then(|registry| registry.as_any_mut().downcast_mut::<ResourceRegistry<T>>())
    }

    fn try_registry<T: Resource>(&self) -> GridsteadResult<&ResourceRegistry<T>> {
        self.registry::<T>()
            .ok_or(GridsteadError::RegistryNotFound(type_name::<T>()))
    }

    fn try_registry_mut<T: Resource>(&mut self) -> GridsteadResult<&mut ResourceRegistry<T>> {
        self.registry_mut::<T>()
            .ok_or(GridsteadError::RegistryNotFound(type_name::<T>()))
    }

    /// Whether `path` is loaded in the registry for `T`. False without one.
    pub fn loaded<T: Resource>(&self, path: impl AsRef<Path>) -> bool {
        self.registry::<T>()
            .map_or(false, |registry| registry.loaded(path))
    }

    /// Lookup-or-create in the registry for `T`, reporting failures.
    pub fn try_load_with<T: Resource>(&mut self, path: impl AsRef<Path>, context: &T::Context) -> GridsteadResult<&T> {
        self.try_registry_mut::<T>()?.try_load_with(path, context)
    }

    /// Lookup-or-create-and-increment in the registry for `T`, reporting failures.
    pub fn try_acquire_with<T: Resource>(&mut self, path: impl AsRef<Path>, context: &T::Context) -> GridsteadResult<&T> {
        self.try_registry_mut::<T>()?.try_acquire_with(path, context)
    }

    /// Loaded resource at `path`. Never loads.
    ///
    /// # Examples
    ///
    /// ```
    /// use gridstead::{GridsteadError, Resource, ResourceManager, ResourceRegistry};
    ///
    /// struct Tile;
    ///
    /// impl Resource for Tile {
    ///     type Context = ();
    /// }
    ///
    /// let mut manager = ResourceManager::new();
    /// let mut registry = ResourceRegistry::<Tile>::new();
    /// registry.add_path_loader(|_| Some(Box::new(Tile)));
    /// manager.add_registry(registry);
    ///
    /// assert!(matches!(manager.try_get::<Tile>("grass"), Err(GridsteadError::ResourceNotLoaded { .. })));
    /// manager.load::<Tile>("grass");
    /// assert!(manager.try_get::<Tile>("grass").is_ok());
    /// ```
    pub fn try_get<T: Resource>(&self, path: impl AsRef<Path>) -> GridsteadResult<&T> {
        self.try_registry::<T>()?.try_get(path)
    }

    /// Decrements `path` in the registry for `T`, dropping it at zero.
    pub fn try_unload<T: Resource>(&mut self, path: impl AsRef<Path>) -> GridsteadResult<()> {
        self.try_registry_mut::<T>()?.try_unload(path)
    }

    /// Lookup-or-create in the registry for `T`.
    pub fn load_with<T: Resource>(&mut self, path: impl AsRef<Path>, context: &T::Context) -> &T {
        match self.try_load_with::<T>(path, context) {
            Ok(resource) => resource,
            Err(error) => fatal(error),
        }
    }

    /// [`load_with`](Self::load_with) with the default context.
    pub fn load<T: Resource>(&mut self, path: impl AsRef<Path>) -> &T {
        self.load_with::<T>(path, &T::Context::default())
    }

    /// Lookup-or-create-and-increment in the registry for `T`.
    pub fn acquire_with<T: Resource>(&mut self, path: impl AsRef<Path>, context: &T::Context) -> &T {
        match self.try_acquire_with::<T>(path, context) {
            Ok(resource) => resource,
            Err(error) => fatal(error),
        }
    }

    /// [`acquire_with`](Self::acquire_with) with the default context.
    pub fn acquire<T: Resource>(&mut self, path: impl AsRef<Path>) -> &T {
        self.acquire_with::<T>(path, &T::Context::default())
    }

    /// Loaded resource at `path`. Panics when absent.
    pub fn get<T: Resource>(&self, path: impl AsRef<Path>) -> &T {
        match self.try_get::<T>(path) {
            Ok(resource) => resource,
            Err(error) => fatal(error),
        }
    }

    /// Decrements `path` in the registry for `T`. Panics when it is not loaded.
    pub fn unload<T: Resource>(&mut self, path: impl AsRef<Path>) {
        if let Err(error) = self.try_unload::<T>(path) {
            fatal(error);
        }
    }

    /// Drops every entry of every registry.
    pub fn clear(&mut self) {
        for registry in self.registries.values_mut() {
            registry.clear();
        }
    }
}

impl std::fmt::Debug for ResourceManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceManager")
            .field("registries", &self.registries.len())
            .finish()
    }
}
