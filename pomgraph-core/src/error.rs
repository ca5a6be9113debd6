//! Error types for pomgraph-core.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for pomgraph-core operations.
pub type Result<T> = std::result::Result<T, GraphError>;

/// Errors that abort a graph build.
///
/// Every variant is fatal: a graph with an unresolved node identity or an
/// incomplete module tree is worse than no graph at all.
#[derive(Error, Debug)]
pub enum GraphError {
    /// A descriptor has no resolvable `artifactId`, or no `groupId` even
    /// after falling back to the parent declaration.
    #[error("{path}: missing {field}")]
    MissingIdentity {
        /// Descriptor that failed to resolve.
        path: PathBuf,
        /// Element that was expected, e.g. `groupId` or `dependency/artifactId`.
        field: &'static str,
    },

    /// More than one `<parent>` element in a single descriptor.
    #[error("{path}: expected at most one <parent> declaration, found {count}")]
    MalformedParent {
        /// Offending descriptor.
        path: PathBuf,
        /// Number of `<parent>` elements found.
        count: usize,
    },

    /// A declared `<module>` has no descriptor at `<dir>/<module>/pom.xml`.
    #[error("{parent}: declared sub-module has no descriptor at {path}")]
    MissingSubmoduleDescriptor {
        /// Descriptor that declared the sub-module.
        parent: PathBuf,
        /// Path where the sub-module descriptor was expected.
        path: PathBuf,
    },

    /// The node store found an existing node where none was expected.
    #[error("node store invariant violated: identity '{id}' is registered more than once")]
    AmbiguousIdentity {
        /// Node id of the duplicated identity.
        id: String,
    },

    /// An edge endpoint was never registered with the node store.
    #[error("node store invariant violated: '{id}' was never registered")]
    UnregisteredNode {
        /// Node id of the missing endpoint.
        id: String,
    },

    /// Descriptor bytes are malformed in the encoding they declare.
    #[error("{path}: content is not valid {encoding}")]
    Encoding {
        /// Offending descriptor.
        path: PathBuf,
        /// Encoding used to decode, e.g. `UTF-8` or `windows-1252`.
        encoding: &'static str,
    },

    /// A scan root does not exist.
    #[error("Path does not exist: {path}")]
    RootNotFound {
        /// Root that was requested.
        path: PathBuf,
    },

    /// Directory walking failed on the scan root itself.
    #[error("Failed to walk {path}: {message}")]
    Walk {
        /// Root being walked.
        path: PathBuf,
        /// Walker error message.
        message: String,
    },

    /// IO error reading a descriptor.
    #[error("Failed to read {path}: {source}")]
    Io {
        /// File being read.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The descriptor is not parseable XML.
    #[error("Failed to parse {path}: {source}")]
    Xml {
        /// File being parsed.
        path: PathBuf,
        #[source]
        source: roxmltree::Error,
    },

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
