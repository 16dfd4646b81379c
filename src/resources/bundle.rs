//! # Resource Bundles
//!
//! Declarative load/unload units spanning any number of registries.
//!
//! A bundle is a single handler invoked with [`ResourceAction::Load`] or
//! [`ResourceAction::Unload`]. Handlers call [`ResourceBundle::handle`] for
//! every resource they depend on, which acquires (or releases) the resource
//! and recurses into the sub-bundle of composite resources: parent first on
//! load, children first on unload.

use super::{Resource, ResourceAction, ResourceManager};
use std::fmt;
use std::path::{Path, PathBuf};
use std::rc::Rc;

type BundleHandler = Rc<dyn Fn(&mut ResourceManager, ResourceAction)>;

/// A set of resource acquisitions loaded and unloaded as a unit.
///
/// Bundles are cheap to clone; clones share the handler.
///
/// # Examples
///
/// ```
/// use gridstead::{Resource, ResourceBundle, ResourceManager, ResourceRegistry};
///
/// struct Sound;
/// impl Resource for Sound {
///     type Context = ();
/// }
///
/// let mut manager = ResourceManager::new();
/// manager.add_registry(ResourceRegistry::<Sound>::with_loader(|_, _| Some(Box::new(Sound))));
///
/// let bundle = ResourceBundle::new(|manager, action| {
///     ResourceBundle::handle::<Sound>("jump.ogg", manager, action);
///     ResourceBundle::handle::<Sound>("land.ogg", manager, action);
/// });
///
/// bundle.load_from(&mut manager);
/// assert!(manager.loaded::<Sound>("jump.ogg"));
/// bundle.unload_from(&mut manager);
/// assert!(!manager.loaded::<Sound>("land.ogg"));
/// ```
#[derive(Clone, Default)]
pub struct ResourceBundle {
    handler: Option<BundleHandler>,
}

impl ResourceBundle {
    /// Creates a bundle from its handler.
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(&mut ResourceManager, ResourceAction) + 'static,
    {
        Self {
            handler: Some(Rc::new(handler)),
        }
    }

    /// Starts a bundle made of an explicit list of entries.
    pub fn builder() -> ResourceBundleBuilder {
        ResourceBundleBuilder::new()
    }

    /// Acquires every resource of the bundle.
    pub fn load_from(&self, manager: &mut ResourceManager) {
        if let Some(handler) = &self.handler {
            handler(manager, ResourceAction::Load);
        }
    }

    /// Releases every resource of the bundle.
    pub fn unload_from(&self, manager: &mut ResourceManager) {
        if let Some(handler) = &self.handler {
            handler(manager, ResourceAction::Unload);
        }
    }

    /// Handles one resource with the default context.
    pub fn handle<T: Resource>(path: impl AsRef<Path>, manager: &mut ResourceManager, action: ResourceAction) {
        Self::handle_with::<T>(path, &T::Context::default(), manager, action);
    }

    /// Acquires or releases one resource and, for composite resources, its
    /// sub-bundle.
    ///
    /// On load the resource is acquired before its sub-bundle is loaded; on
    /// unload the sub-bundle is released before the resource itself.
    pub fn handle_with<T: Resource>(
        path: impl AsRef<Path>,
        context: &T::Context,
        manager: &mut ResourceManager,
        action: ResourceAction,
    ) {
        let path = path.as_ref();

        match action {
            ResourceAction::Load => {
                manager.acquire_with::<T>(path, context);
                if let Some(bundle) = T::bundle(path, context) {
                    bundle.load_from(manager);
                }
            }
            ResourceAction::Unload => {
                if let Some(bundle) = T::bundle(path, context) {
                    bundle.unload_from(manager);
                }
                manager.unload::<T>(path);
            }
        }
    }
}

impl fmt::Debug for ResourceBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceBundle")
            .field("empty", &self.handler.is_none())
            .finish()
    }
}

/// One recorded step of a built bundle.
trait BundleEntry {
    fn handle(&self, manager: &mut ResourceManager, action: ResourceAction);
}

struct TypedEntry<T: Resource> {
    path: PathBuf,
    context: T::Context,
}

impl<T: Resource> BundleEntry for TypedEntry<T> {
    fn handle(&self, manager: &mut ResourceManager, action: ResourceAction) {
        ResourceBundle::handle_with::<T>(&self.path, &self.context, manager, action);
    }
}

struct NestedEntry(ResourceBundle);

impl BundleEntry for NestedEntry {
    fn handle(&self, manager: &mut ResourceManager, action: ResourceAction) {
        match action {
            ResourceAction::Load => self.0.load_from(manager),
            ResourceAction::Unload => self.0.unload_from(manager),
        }
    }
}

/// Records `(type, path, context)` entries and nested bundles.
///
/// The built bundle loads entries in declaration order and unloads them in
/// reverse order.
///
/// # Examples
///
/// ```
/// use gridstead::{Resource, ResourceBundle, ResourceManager, ResourceRegistry};
///
/// struct Font;
/// impl Resource for Font {
///     type Context = ();
/// }
///
/// let mut manager = ResourceManager::new();
/// manager.add_registry(ResourceRegistry::<Font>::with_loader(|_, _| Some(Box::new(Font))));
///
/// let bundle = ResourceBundle::builder()
///     .with::<Font>("title.ttf")
///     .with::<Font>("body.ttf")
///     .build();
///
/// bundle.load_from(&mut manager);
/// assert!(manager.loaded::<Font>("body.ttf"));
/// ```
#[derive(Default)]
pub struct ResourceBundleBuilder {
    entries: Vec<Box<dyn BundleEntry>>,
}

impl ResourceBundleBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a resource loaded with the default context.
    pub fn with<T: Resource>(self, path: impl Into<PathBuf>) -> Self {
        self.with_context::<T>(path, T::Context::default())
    }

    /// Adds a resource loaded with an explicit context.
    pub fn with_context<T: Resource>(mut self, path: impl Into<PathBuf>, context: T::Context) -> Self {
        self.entries.push(Box::new(TypedEntry::<T> {
            path: path.into(),
            context,
        }));
        self
    }

    /// Adds a nested bundle.
    pub fn with_bundle(mut self, bundle: ResourceBundle) -> Self {
        self.entries.push(Box::new(NestedEntry(bundle)));
        self
    }

    pub fn build(self) -> ResourceBundle {
        let entries = self.entries;

        ResourceBundle::new(move |manager, action| match action {
            ResourceAction::Load => {
                for entry in &entries {
                    entry.handle(manager, action);
                }
            }
            ResourceAction::Unload => {
                for entry in entries.iter().rev() {
                    entry.handle(manager, action);
                }
            }
        })
    }
}
