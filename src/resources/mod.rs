//! # Resources Module
//!
//! Reference-counted, on-demand loading of heterogeneous typed assets.
//!
//! - [`ResourceRegistry`] owns every instance of one resource type, keyed by
//!   path, and tries an ordered chain of loaders on a cache miss
//! - [`ResourceManager`] routes typed requests to the matching registry
//! - [`ResourceBundle`] describes a set of acquisitions that can be loaded
//!   and unloaded as a unit, including composite resources that declare
//!   their own sub-bundle
//! - [`loaders`] resolves paths against directories, memory or tarballs
//!
//! `load` is lookup-or-create and leaves the reference count alone on a hit;
//! `acquire` is lookup-or-create-and-increment. Bundles always acquire, so two
//! bundles sharing a resource keep it alive until both are unloaded.

pub mod bundle;
pub mod loaders;
pub mod manager;
pub mod registry;

pub use bundle::*;
pub use loaders::*;
pub use manager::*;
pub use registry::*;

use std::path::Path;

/// Capability trait for anything stored in a [`ResourceRegistry`].
///
/// `Context` is the per-type configuration handed to loaders. Types that need
/// no configuration use `()`, which makes the context-free entry points
/// (`load`, `acquire`, `handle`) available through `Default`.
///
/// A composite resource overrides [`Resource::bundle`] to declare the
/// sub-resources it needs; bundles load them right after the parent and
/// unload them right before it.
///
/// # Examples
///
/// ```
/// use gridstead::{Resource, ResourceBundle};
/// use std::path::Path;
///
/// struct Texture;
/// impl Resource for Texture {
///     type Context = ();
/// }
///
/// struct Sprite;
/// impl Resource for Sprite {
///     type Context = ();
///
///     fn bundle(path: &Path, _context: &()) -> Option<ResourceBundle> {
///         let texture = path.with_extension("png");
///         Some(ResourceBundle::builder().with::<Texture>(texture).build())
///     }
/// }
/// ```
pub trait Resource: 'static {
    /// Loader configuration for this resource type.
    type Context: Default + 'static;

    /// Sub-resources of a composite resource, `None` for plain resources.
    fn bundle(path: &Path, context: &Self::Context) -> Option<ResourceBundle> {
        let _ = (path, context);
        None
    }
}

/// What a bundle handler is asked to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceAction {
    Load,
    Unload,
}
