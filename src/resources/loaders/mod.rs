//! # Loaders
//!
//! Path-resolution collaborators and the adapters that plug them into a
//! registry's loader chain.
//!
//! A collaborator only locates raw data: [`FileLoader`] finds a file in an
//! ordered list of directories, [`MemoryLoader`] looks bytes up in an
//! in-process table and [`TarballLoader`] serves entries of a gzip tarball.
//! The adapters pair a shared collaborator with a decoder; a path the
//! collaborator cannot resolve, or data the decoder rejects, simply lets the
//! next loader in the chain try.

pub mod file;
pub mod memory;
pub mod tarball;

pub use file::*;
pub use memory::*;
pub use tarball::*;

use super::Resource;
use crate::GridsteadResult;
use serde::de::DeserializeOwned;
use std::path::Path;
use std::rc::Rc;

/// Builds a loader that resolves paths with `files` and decodes the file.
///
/// # Examples
///
/// ```
/// use gridstead::{file_loader, FileLoader, Resource, ResourceRegistry};
/// use std::rc::Rc;
///
/// struct Script(String);
/// impl Resource for Script {
///     type Context = ();
/// }
///
/// let mut files = FileLoader::new();
/// files.add_search_directory("assets");
///
/// let mut registry = ResourceRegistry::<Script>::new();
/// registry.add_loader(file_loader::<Script, _>(Rc::new(files), |path, _| {
///     Ok(Script(std::fs::read_to_string(path)?))
/// }));
/// ```
pub fn file_loader<T, F>(files: Rc<FileLoader>, decode: F) -> impl Fn(&Path, &T::Context) -> Option<Box<T>>
where
    T: Resource,
    F: Fn(&Path, &T::Context) -> GridsteadResult<T>,
{
    move |path, context| {
        let absolute = files.search(path)?;
        accept(path, decode(absolute.as_path(), context))
    }
}

/// Builds a loader that decodes bytes registered in `memory`.
pub fn memory_loader<T, F>(memory: Rc<MemoryLoader>, decode: F) -> impl Fn(&Path, &T::Context) -> Option<Box<T>>
where
    T: Resource,
    F: Fn(&[u8], &T::Context) -> GridsteadResult<T>,
{
    move |path, context| {
        let bytes = memory.search(path)?;
        accept(path, decode(bytes, context))
    }
}

/// Builds a loader that decodes entries of `tarball`.
pub fn tarball_loader<T, F>(tarball: Rc<TarballLoader>, decode: F) -> impl Fn(&Path, &T::Context) -> Option<Box<T>>
where
    T: Resource,
    F: Fn(&[u8], &T::Context) -> GridsteadResult<T>,
{
    move |path, context| {
        let bytes = tarball.search(path)?;
        accept(path, decode(bytes, context))
    }
}

/// Decodes a JSON document, typically a configuration resource.
pub fn decode_json<T: DeserializeOwned>(bytes: &[u8]) -> GridsteadResult<T> {
    Ok(serde_json::from_slice(bytes)?)
}

fn accept<T>(path: &Path, decoded: GridsteadResult<T>) -> Option<Box<T>> {
    match decoded {
        Ok(resource) => Some(Box::new(resource)),
        Err(error) => {
            log::warn!("Failed to decode '{}': {}", path.display(), error);
            None
        }
    }
}
