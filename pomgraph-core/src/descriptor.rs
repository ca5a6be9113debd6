//! POM descriptor reading.
//!
//! [`read`] turns one `pom.xml` into a [`ParsedDescriptor`]. It is a pure
//! function of the file contents and may be called repeatedly for the same
//! path; [`DescriptorCache`] memoizes it for the duration of one build.
//!
//! Only elements in the POM 4.0.0 namespace are recognized. A document
//! written against another namespace yields no matching elements and fails
//! with [`GraphError::MissingIdentity`].

use encoding_rs::{Encoding, UTF_8};
use rayon::prelude::*;
use roxmltree::{Document, Node};
use std::borrow::Cow;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tracing::debug;

use crate::error::{GraphError, Result};
use crate::types::{DependencyMetadata, ModuleId, DEFAULT_PACKAGING};

/// File name that marks a directory as a Maven module.
pub const DESCRIPTOR_FILE_NAME: &str = "pom.xml";

/// The only namespace descriptors are read in.
pub const POM_NAMESPACE: &str = "http://maven.apache.org/POM/4.0.0";

/// `<dependency>` children copied into [`DependencyMetadata`] when present.
const DEPENDENCY_METADATA_FIELDS: &[&str] = &["scope", "type", "classifier", "optional", "version"];

/// A dependency as declared in a descriptor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeclaredDependency {
    pub id: ModuleId,
    pub metadata: DependencyMetadata,
}

/// Everything graph assembly needs from one descriptor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedDescriptor {
    pub id: ModuleId,
    /// Declared packaging, or `"jar"` when omitted.
    pub packaging: String,
    /// Parent identity, only when both its group and artifact are declared.
    pub parent: Option<ModuleId>,
    /// `<modules>/<module>` entries, relative to the descriptor directory.
    pub modules: Vec<String>,
    pub dependencies: Vec<DeclaredDependency>,
}

/// Read and parse the descriptor at `path`.
///
/// The bytes are decoded per the byte order mark, else per the XML
/// declaration's `encoding`, else as UTF-8.
pub fn read(path: &Path) -> Result<ParsedDescriptor> {
    let bytes = fs::read(path).map_err(|source| GraphError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let text = decode(&bytes, path)?;
    parse(&text, path)
}

/// Decode descriptor bytes to text. Malformed input is an error.
fn decode<'b>(bytes: &'b [u8], path: &Path) -> Result<Cow<'b, str>> {
    let (encoding, bom_len) = Encoding::for_bom(bytes)
        .unwrap_or_else(|| (declared_encoding(bytes).unwrap_or(UTF_8), 0));

    let (text, had_errors) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
    if had_errors {
        return Err(GraphError::Encoding {
            path: path.to_path_buf(),
            encoding: encoding.name(),
        });
    }
    Ok(text)
}

/// Encoding named by a leading `<?xml ... encoding="..."?>`, if any.
///
/// Only ASCII-compatible encodings are honoured; the declaration itself was
/// read as ASCII, so anything else contradicts the bytes.
fn declared_encoding(bytes: &[u8]) -> Option<&'static Encoding> {
    let rest = bytes.strip_prefix(b"<?xml")?;
    let end = rest.windows(2).position(|w| w == b"?>")?;
    let declaration = std::str::from_utf8(&rest[..end]).ok()?;

    let after = &declaration[declaration.find("encoding")? + "encoding".len()..];
    let after = after.trim_start().strip_prefix('=')?.trim_start();
    let quote = after.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    let value = &after[1..];
    let label = &value[..value.find(quote)?];

    Encoding::for_label(label.as_bytes()).filter(|encoding| encoding.is_ascii_compatible())
}

/// Parse descriptor text. `path` is only used for error reporting.
pub fn parse(text: &str, path: &Path) -> Result<ParsedDescriptor> {
    let doc = Document::parse(text).map_err(|source| GraphError::Xml {
        path: path.to_path_buf(),
        source,
    })?;
    let project = doc.root_element();

    let parent_nodes: Vec<Node> = children(project, "parent").collect();
    if parent_nodes.len() > 1 {
        return Err(GraphError::MalformedParent {
            path: path.to_path_buf(),
            count: parent_nodes.len(),
        });
    }
    let parent_node = parent_nodes.first().copied();

    // artifactId is never inherited; groupId falls back to the parent's
    let artifact = child_text(project, "artifactId").ok_or_else(|| GraphError::MissingIdentity {
        path: path.to_path_buf(),
        field: "artifactId",
    })?;
    let group = child_text(project, "groupId")
        .or_else(|| parent_node.and_then(|p| child_text(p, "groupId")))
        .ok_or_else(|| GraphError::MissingIdentity {
            path: path.to_path_buf(),
            field: "groupId",
        })?;

    let parent = parent_node.and_then(|p| {
        match (child_text(p, "groupId"), child_text(p, "artifactId")) {
            (Some(group), Some(artifact)) => Some(ModuleId::new(group, artifact)),
            _ => None,
        }
    });

    let packaging = child_text(project, "packaging").unwrap_or_else(|| DEFAULT_PACKAGING.to_string());

    let modules = children(project, "modules")
        .flat_map(|modules| children(modules, "module"))
        .filter_map(node_text)
        .collect();

    let dependencies = children(project, "dependencies")
        .flat_map(|deps| children(deps, "dependency"))
        .map(|node| parse_dependency(node, path))
        .collect::<Result<Vec<_>>>()?;

    Ok(ParsedDescriptor {
        id: ModuleId::new(group, artifact),
        packaging,
        parent,
        modules,
        dependencies,
    })
}

fn parse_dependency(node: Node, path: &Path) -> Result<DeclaredDependency> {
    let group = child_text(node, "groupId").ok_or_else(|| GraphError::MissingIdentity {
        path: path.to_path_buf(),
        field: "dependency/groupId",
    })?;
    let artifact = child_text(node, "artifactId").ok_or_else(|| GraphError::MissingIdentity {
        path: path.to_path_buf(),
        field: "dependency/artifactId",
    })?;

    let metadata = DEPENDENCY_METADATA_FIELDS
        .iter()
        .filter_map(|field| child_text(node, field).map(|value| (field.to_string(), value)))
        .collect();

    Ok(DeclaredDependency {
        id: ModuleId::new(group, artifact),
        metadata,
    })
}

/// Direct element children in the POM namespace with the given local name.
fn children<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    name: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    node.children()
        .filter(move |child| child.is_element() && child.has_tag_name((POM_NAMESPACE, name)))
}

/// Trimmed text of the first matching child, `None` if absent or blank.
fn child_text(node: Node, name: &str) -> Option<String> {
    children(node, name).next().and_then(node_text)
}

fn node_text(node: Node) -> Option<String> {
    node.text()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

/// Per-run memo of parsed descriptors, keyed by path.
///
/// Descriptors are static for the duration of a run, so a cached entry is
/// never stale. Paths are used as given; two spellings of the same file are
/// simply read twice.
#[derive(Debug, Default)]
pub struct DescriptorCache {
    entries: HashMap<PathBuf, Rc<ParsedDescriptor>>,
    reads: usize,
}

impl DescriptorCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parsed descriptor for `path`, reading it on first access.
    pub fn get(&mut self, path: &Path) -> Result<Rc<ParsedDescriptor>> {
        if let Some(parsed) = self.entries.get(path) {
            debug!("Descriptor cache hit for {}", path.display());
            return Ok(Rc::clone(parsed));
        }

        debug!("Reading descriptor {}", path.display());
        let parsed = Rc::new(read(path)?);
        self.reads += 1;
        self.entries.insert(path.to_path_buf(), Rc::clone(&parsed));
        Ok(parsed)
    }

    /// Read all `paths` in parallel and insert the results.
    ///
    /// Parsing happens on the rayon pool; insertion happens here, on the
    /// calling thread, in the order of `paths`. The first failure in that
    /// order is returned.
    pub fn preload(&mut self, paths: &[PathBuf]) -> Result<()> {
        let pending: Vec<&PathBuf> = paths
            .iter()
            .filter(|path| !self.entries.contains_key(path.as_path()))
            .collect();

        let parsed: Vec<(&PathBuf, Result<ParsedDescriptor>)> = pending
            .par_iter()
            .map(|path| (*path, read(path)))
            .collect();

        debug!("Preloaded {} descriptors", parsed.len());

        for (path, result) in parsed {
            let descriptor = result?;
            self.reads += 1;
            self.entries.insert(path.clone(), Rc::new(descriptor));
        }
        Ok(())
    }

    /// Number of descriptors actually read from disk.
    pub fn reads(&self) -> usize {
        self.reads
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
