//! # Gridstead
//!
//! Resource lifecycle management and grid-map spatial queries for 2D games.
//!
//! ## Architecture Overview
//!
//! The crate is split into two independent halves that share the error type
//! and the geometry primitives:
//!
//! - **Resources**: typed registries that cache heap-allocated assets by path
//!   with reference counting, a manager that routes requests to the registry
//!   of the requested type, and bundles that describe composable sets of
//!   acquisitions (including composite resources with their own sub-bundles)
//! - **Loaders**: path-resolution collaborators (search directories,
//!   in-memory tables, gzip tarballs) that feed the registries' loader chains
//! - **Grid**: orthogonal, isometric, staggered and hexagonal topologies
//!   behind one `AnyGrid` interface, and the `GridMap` cell array with
//!   A*/Dijkstra routing and shadowcasting field of vision
//! - **Generation**: procedural layouts written directly into a `GridMap`
//!
//! Everything is single-threaded and synchronous. Programming errors in the
//! resource wiring (missing loader, unloading something never loaded) are
//! fatal; out-of-bounds cell queries and unreachable route targets are not.

pub mod generation;
pub mod geometry;
pub mod grid;
pub mod resources;

pub use generation::*;
pub use geometry::*;
pub use grid::*;
pub use resources::*;

use std::path::PathBuf;

/// Core error type for the Gridstead crate.
#[derive(thiserror::Error, Debug)]
pub enum GridsteadError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Every loader in the chain declined the path
    #[error("No loader produced {type_name} resource '{}'", .path.display())]
    ResourceNotFound {
        type_name: &'static str,
        path: PathBuf,
    },

    /// The path has no live entry in the registry
    #[error("{type_name} resource '{}' is not loaded", .path.display())]
    ResourceNotLoaded {
        type_name: &'static str,
        path: PathBuf,
    },

    /// No registry was added to the manager for this type
    #[error("No registry registered for {0}")]
    RegistryNotFound(&'static str),

    /// A registry for this type was already added to the manager
    #[error("A registry is already registered for {0}")]
    RegistryAlreadyRegistered(&'static str),

    /// Malformed or truncated resource archive
    #[error("Invalid archive: {0}")]
    InvalidArchive(String),

    /// Operation not available for the configured grid topology
    #[error("Unsupported grid: {0}")]
    UnsupportedGrid(String),

    /// Generation failed
    #[error("Generation failed: {0}")]
    GenerationFailed(String),
}

/// Result type used throughout the Gridstead codebase.
pub type GridsteadResult<T> = Result<T, GridsteadError>;

/// Reports a broken precondition and aborts the caller.
pub(crate) fn fatal(error: GridsteadError) -> ! {
    log::error!("{}", error);
    panic!("{}", error)
}

/// Version information for the crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate-wide configuration constants.
pub mod config {
    /// Default tile edge length in world units
    pub const DEFAULT_TILE_SIZE: f32 = 32.0;

    /// Default cost of a move to an edge-sharing neighbor
    pub const DEFAULT_CARDINAL_COST: f32 = 1.0;

    /// Default cost of a move to a vertex-sharing neighbor
    pub const DEFAULT_DIAGONAL_COST: f32 = std::f32::consts::SQRT_2;

    /// Default extra cost of entering a blocked cell
    pub const DEFAULT_BLOCKED_COST: f32 = 0.0;

    /// Default field-of-vision range in cells
    pub const DEFAULT_SIGHT_RADIUS: i32 = 8;

    /// Size of one tar record in bytes
    pub const TAR_RECORD_SIZE: usize = 512;

    /// Default width of generated maps in cells
    pub const DEFAULT_MAP_WIDTH: i32 = 80;

    /// Default height of generated maps in cells
    pub const DEFAULT_MAP_HEIGHT: i32 = 40;
}
