//! # Resource Registry
//!
//! Path-keyed cache of one resource type with reference counting and an
//! ordered loader chain.

use super::Resource;
use crate::{fatal, GridsteadError, GridsteadResult};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// A loader in a registry's chain. Returning `None` passes to the next loader.
pub type ResourceLoader<T> = Box<dyn Fn(&Path, &<T as Resource>::Context) -> Option<Box<T>>>;

struct ResourceEntry<T> {
    instance: Box<T>,
    ref_count: usize,
}

/// Owns every loaded instance of `T`, keyed by path.
///
/// Entries start with a reference count of 1. [`acquire`](Self::acquire)
/// increments it on a cache hit, [`load`](Self::load) does not, and
/// [`unload`](Self::unload) decrements it and drops the instance at zero.
/// Callers only ever borrow instances; the registry stays the sole owner.
///
/// # Examples
///
/// ```
/// use gridstead::{Resource, ResourceRegistry};
///
/// struct Text(String);
/// impl Resource for Text {
///     type Context = ();
/// }
///
/// let mut registry = ResourceRegistry::<Text>::new();
/// registry.add_path_loader(|path| Some(Box::new(Text(path.display().to_string()))));
///
/// assert_eq!(registry.acquire("hello.txt").0, "hello.txt");
/// assert!(registry.loaded("hello.txt"));
/// registry.unload("hello.txt");
/// assert!(!registry.loaded("hello.txt"));
/// ```
pub struct ResourceRegistry<T: Resource> {
    loaders: Vec<ResourceLoader<T>>,
    entries: HashMap<PathBuf, ResourceEntry<T>>,
}

impl<T: Resource> ResourceRegistry<T> {
    /// Creates a registry with an empty loader chain.
    pub fn new() -> Self {
        Self {
            loaders: Vec::new(),
            entries: HashMap::new(),
        }
    }

    /// Creates a registry whose chain starts with `loader`.
    pub fn with_loader<F>(loader: F) -> Self
    where
        F: Fn(&Path, &T::Context) -> Option<Box<T>> + 'static,
    {
        let mut registry = Self::new();
        registry.add_loader(loader);
        registry
    }

    /// Appends a loader that receives the resource context.
    pub fn add_loader<F>(&mut self, loader: F)
    where
        F: Fn(&Path, &T::Context) -> Option<Box<T>> + 'static,
    {
        self.loaders.push(Box::new(loader));
    }

    /// Appends a loader that only needs the path.
    pub fn add_path_loader<F>(&mut self, loader: F)
    where
        F: Fn(&Path) -> Option<Box<T>> + 'static,
    {
        self.loaders.push(Box::new(move |path, _| loader(path)));
    }

    /// Whether an entry currently exists for `path`.
    pub fn loaded(&self, path: impl AsRef<Path>) -> bool {
        self.entries.contains_key(path.as_ref())
    }

    /// Current reference count for `path`, 0 when not loaded.
    pub fn ref_count(&self, path: impl AsRef<Path>) -> usize {
        self.entries
            .get(path.as_ref())
            .map_or(0, |entry| entry.ref_count)
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry holds no entry.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the cached instance or creates it, without touching the
    /// reference count of an existing entry.
    pub fn try_load_with(&mut self, path: impl AsRef<Path>, context: &T::Context) -> GridsteadResult<&T> {
        let path = path.as_ref();
        match self.entries.entry(path.to_path_buf()) {
            Entry::Occupied(entry) => {
                log::trace!("{} '{}' already loaded", type_name::<T>(), path.display());
                Ok(&*entry.into_mut().instance)
            }
            Entry::Vacant(entry) => {
                let instance = instantiate(&self.loaders, path, context)?;
                let entry = entry.insert(ResourceEntry {
                    instance,
                    ref_count: 1,
                });
                Ok(&*entry.instance)
            }
        }
    }

    /// Returns the cached instance or creates it, incrementing the reference
    /// count of an existing entry.
    pub fn try_acquire_with(&mut self, path: impl AsRef<Path>, context: &T::Context) -> GridsteadResult<&T> {
        let path = path.as_ref();
        match self.entries.entry(path.to_path_buf()) {
            Entry::Occupied(entry) => {
                let entry = entry.into_mut();
                entry.ref_count += 1;
                log::trace!(
                    "{} '{}' acquired, {} references",
                    type_name::<T>(),
                    path.display(),
                    entry.ref_count
                );
                Ok(&*entry.instance)
            }
            Entry::Vacant(entry) => {
                let instance = instantiate(&self.loaders, path, context)?;
                let entry = entry.insert(ResourceEntry {
                    instance,
                    ref_count: 1,
                });
                Ok(&*entry.instance)
            }
        }
    }

    /// Returns an already loaded instance.
    pub fn try_get(&self, path: impl AsRef<Path>) -> GridsteadResult<&T> {
        let path = path.as_ref();
        self.entries
            .get(path)
            .map(|entry| &*entry.instance)
            .ok_or_else(|| not_loaded::<T>(path))
    }

    /// Releases one reference, dropping the instance when none remain.
    pub fn try_unload(&mut self, path: impl AsRef<Path>) -> GridsteadResult<()> {
        let path = path.as_ref();
        let entry = self.entries.get_mut(path).ok_or_else(|| not_loaded::<T>(path))?;
        entry.ref_count -= 1;

        if entry.ref_count == 0 {
            self.entries.remove(path);
            log::debug!("{} '{}' evicted", type_name::<T>(), path.display());
        }

        Ok(())
    }

    /// [`try_load_with`](Self::try_load_with), fatal when no loader succeeds.
    pub fn load_with(&mut self, path: impl AsRef<Path>, context: &T::Context) -> &T {
        match self.try_load_with(path, context) {
            Ok(resource) => resource,
            Err(error) => fatal(error),
        }
    }

    /// Loads with the default context.
    pub fn load(&mut self, path: impl AsRef<Path>) -> &T {
        self.load_with(path, &T::Context::default())
    }

    /// [`try_acquire_with`](Self::try_acquire_with), fatal when no loader succeeds.
    pub fn acquire_with(&mut self, path: impl AsRef<Path>, context: &T::Context) -> &T {
        match self.try_acquire_with(path, context) {
            Ok(resource) => resource,
            Err(error) => fatal(error),
        }
    }

    /// Acquires with the default context.
    pub fn acquire(&mut self, path: impl AsRef<Path>) -> &T {
        self.acquire_with(path, &T::Context::default())
    }

    /// [`try_get`](Self::try_get), fatal when the path is not loaded.
    pub fn get(&self, path: impl AsRef<Path>) -> &T {
        match self.try_get(path) {
            Ok(resource) => resource,
            Err(error) => fatal(error),
        }
    }

    /// [`try_unload`](Self::try_unload), fatal when the path is not loaded.
    pub fn unload(&mut self, path: impl AsRef<Path>) {
        if let Err(error) = self.try_unload(path) {
            fatal(error);
        }
    }

    /// Drops every entry regardless of reference counts.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<T: Resource> Default for ResourceRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Resource> fmt::Debug for ResourceRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceRegistry")
            .field("type", &type_name::<T>())
            .field("loaders", &self.loaders.len())
            .field("entries", &self.entries.len())
            .finish()
    }
}

fn instantiate<T: Resource>(
    loaders: &[ResourceLoader<T>],
    path: &Path,
    context: &T::Context,
) -> GridsteadResult<Box<T>> {
    let instance = loaders
        .iter()
        .find_map(|loader| loader(path, context))
        .ok_or_else(|| GridsteadError::ResourceNotFound {
            type_name: type_name::<T>(),
            path: path.to_path_buf(),
        })?;
    log::debug!("{} '{}' loaded", type_name::<T>(), path.display());
    Ok(instance)
}

fn not_loaded<T>(path: &Path) -> GridsteadError {
    GridsteadError::ResourceNotLoaded {
        type_name: type_name::<T>(),
        path: path.to_path_buf(),
    }
}

pub(crate) fn type_name<T>() -> &'static str {
    std::any::type_name::<T>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Debug, PartialEq)]
    struct Note(String);

    impl Resource for Note {
        type Context = ();
    }

    #[derive(Debug, Default)]
    struct Scale(u32);

    struct Scaled(u32);

    impl Resource for Scaled {
        type Context = Scale;
    }

    fn note_registry() -> ResourceRegistry<Note> {
        let mut registry = ResourceRegistry::new();
        registry.add_path_loader(|path| Some(Box::new(Note(path.display().to_string()))));
        registry
    }

    #[test]
    fn test_load_is_idempotent() {
        let mut registry = note_registry();

        let first = registry.load("a") as *const Note;
        let second = registry.load("a") as *const Note;
        assert_eq!(first, second);
        assert_eq!(registry.ref_count("a"), 1);

        registry.unload("a");
        assert!(!registry.loaded("a"));
    }

    #[test]
    fn test_acquire_counts_references() {
        let mut registry = note_registry();

        registry.acquire("a");
        registry.acquire("a");
        registry.load("a");
        assert_eq!(registry.ref_count("a"), 2);

        registry.unload("a");
        assert!(registry.loaded("a"));
        registry.unload("a");
        assert!(!registry.loaded("a"));
    }

    #[test]
    fn test_loader_chain_order() {
        let calls = Rc::new(Cell::new(0));
        let mut registry = ResourceRegistry::<Note>::new();

        let counter = Rc::clone(&calls);
        registry.add_path_loader(move |_| {
            counter.set(counter.get() + 1);
            None
        });
        registry.add_path_loader(|_| Some(Box::new(Note("second".to_string()))));
        registry.add_path_loader(|_| Some(Box::new(Note("third".to_string()))));

        assert_eq!(registry.load("x").0, "second");
        assert_eq!(calls.get(), 1);

        // Cache hits never reach the chain
        registry.acquire("x");
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_context_reaches_loader() {
        let mut registry = ResourceRegistry::<Scaled>::with_loader(|_, context: &Scale| {
            Some(Box::new(Scaled(context.0 * 2)))
        });

        assert_eq!(registry.load_with("big", &Scale(21)).0, 42);
        assert_eq!(registry.load("default").0, 0);
    }

    #[test]
    fn test_try_variants_report_errors() {
        let mut registry = ResourceRegistry::<Note>::new();

        assert!(matches!(
            registry.try_load_with("missing", &()),
            Err(GridsteadError::ResourceNotFound { .. })
        ));
        assert!(matches!(
            registry.try_get("missing"),
            Err(GridsteadError::ResourceNotLoaded { .. })
        ));
        assert!(matches!(
            registry.try_unload("missing"),
            Err(GridsteadError::ResourceNotLoaded { .. })
        ));
        assert!(registry.is_empty());
    }

    #[test]
    #[should_panic(expected = "is not loaded")]
    fn test_get_unloaded_is_fatal() {
        let registry = note_registry();
        registry.get("nowhere");
    }

    #[test]
    #[should_panic(expected = "No loader produced")]
    fn test_empty_chain_is_fatal() {
        let mut registry = ResourceRegistry::<Note>::new();
        registry.load("nothing");
    }

    #[test]
    fn test_clear_drops_everything() {
        let mut registry = note_registry();
        registry.acquire("a");
        registry.acquire("a");
        registry.load("b");
        assert_eq!(registry.len(), 2);

        registry.clear();
        assert!(registry.is_empty());
        assert!(!registry.loaded("a"));
    }
}
