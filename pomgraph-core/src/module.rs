//! The Maven module model.
//!
//! A [`MavenModule`] is an identity plus whatever metadata is known about it.
//! Relations are not stored: `parent`, `dependencies`, and `sub_modules` are
//! derived from the module's descriptor each time they are asked for, through
//! a [`DescriptorCache`]. Modules known only by reference (a dependency or a
//! parent with no descriptor on disk) have no relations at all.

use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

use crate::descriptor::{DescriptorCache, DESCRIPTOR_FILE_NAME};
use crate::error::{GraphError, Result};
use crate::types::{DependencyMetadata, ModuleId, NodeAttributes};

/// One Maven module, identified by `(group, artifact)` only.
#[derive(Clone, Debug)]
pub struct MavenModule {
    id: ModuleId,
    descriptor_path: Option<PathBuf>,
    packaging: Option<String>,
}

impl MavenModule {
    pub fn new(
        descriptor_path: Option<PathBuf>,
        group: impl Into<String>,
        artifact: impl Into<String>,
    ) -> Self {
        Self {
            id: ModuleId::new(group, artifact),
            descriptor_path,
            packaging: None,
        }
    }

    pub fn with_packaging(mut self, packaging: impl Into<String>) -> Self {
        self.packaging = Some(packaging.into());
        self
    }

    /// A module known only by its identity.
    pub fn reference(id: ModuleId) -> Self {
        Self {
            id,
            descriptor_path: None,
            packaging: None,
        }
    }

    /// Build a module from the descriptor at `path`.
    pub fn from_descriptor(path: &Path, cache: &mut DescriptorCache) -> Result<Self> {
        let parsed = cache.get(path)?;
        Ok(Self {
            id: parsed.id.clone(),
            descriptor_path: Some(path.to_path_buf()),
            packaging: Some(parsed.packaging.clone()),
        })
    }

    pub fn id(&self) -> &ModuleId {
        &self.id
    }

    pub fn descriptor_path(&self) -> Option<&Path> {
        self.descriptor_path.as_deref()
    }

    pub fn packaging(&self) -> Option<&str> {
        self.packaging.as_deref()
    }

    /// Node attributes contributed by this module; unknown values are empty.
    pub fn attributes(&self) -> NodeAttributes {
        NodeAttributes::new(
            self.packaging.clone().unwrap_or_default(),
            self.descriptor_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
        )
    }

    /// The declared parent, as a reference module.
    pub fn parent(&self, cache: &mut DescriptorCache) -> Result<Option<MavenModule>> {
        let Some(path) = &self.descriptor_path else {
            return Ok(None);
        };
        let parsed = cache.get(path)?;
        Ok(parsed.parent.clone().map(MavenModule::reference))
    }

    /// Declared dependencies in document order, as reference modules.
    pub fn dependencies(
        &self,
        cache: &mut DescriptorCache,
    ) -> Result<Vec<(MavenModule, DependencyMetadata)>> {
        let Some(path) = &self.descriptor_path else {
            return Ok(Vec::new());
        };
        let parsed = cache.get(path)?;
        Ok(parsed
            .dependencies
            .iter()
            .map(|dep| (MavenModule::reference(dep.id.clone()), dep.metadata.clone()))
            .collect())
    }

    /// Declared sub-modules, each read from `<descriptor dir>/<name>/pom.xml`.
    pub fn sub_modules(&self, cache: &mut DescriptorCache) -> Result<Vec<MavenModule>> {
        let Some(path) = &self.descriptor_path else {
            return Ok(Vec::new());
        };
        let parsed = cache.get(path)?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));

        parsed
            .modules
            .iter()
            .map(|name| {
                let sub_path = base.join(name).join(DESCRIPTOR_FILE_NAME);
                if !sub_path.is_file() {
                    return Err(GraphError::MissingSubmoduleDescriptor {
                        parent: path.clone(),
                        path: sub_path,
                    });
                }
                MavenModule::from_descriptor(&sub_path, cache)
            })
            .collect()
    }
}

impl PartialEq for MavenModule {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for MavenModule {}

impl Hash for MavenModule {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::fixtures::write_pom;
    use std::collections::HashSet;
    use tempfile::TempDir;

    #[test]
    fn test_equality_is_identity_only() {
        let with_path = MavenModule::new(Some(PathBuf::from("/repo/pom.xml")), "g", "a");
        let reference = MavenModule::reference(ModuleId::new("g", "a"));
        assert_eq!(with_path, reference);

        let set: HashSet<MavenModule> = [with_path, reference].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_reference_has_no_relations() {
        let mut cache = DescriptorCache::new();
        let module = MavenModule::reference(ModuleId::new("g", "a"));
        assert!(module.parent(&mut cache).unwrap().is_none());
        assert!(module.dependencies(&mut cache).unwrap().is_empty());
        assert!(module.sub_modules(&mut cache).unwrap().is_empty());
        assert_eq!(module.attributes(), NodeAttributes::default());
        assert_eq!(cache.reads(), 0);
    }

    #[test]
    fn test_from_descriptor() {
        let dir = TempDir::new().unwrap();
        let path = write_pom(
            dir.path(),
            r#"<parent><groupId>g</groupId><artifactId>parent</artifactId></parent>
               <artifactId>app</artifactId>"#,
        );

        let mut cache = DescriptorCache::new();
        let module = MavenModule::from_descriptor(&path, &mut cache).unwrap();
        assert_eq!(module.id(), &ModuleId::new("g", "app"));
        assert_eq!(module.packaging(), Some("jar"));
        assert_eq!(module.descriptor_path(), Some(path.as_path()));

        let parent = module.parent(&mut cache).unwrap().unwrap();
        assert_eq!(parent.id(), &ModuleId::new("g", "parent"));
        assert!(parent.descriptor_path().is_none());
        assert_eq!(cache.reads(), 1);
    }

    #[test]
    fn test_dependencies_in_declaration_order() {
        let dir = TempDir::new().unwrap();
        let path = write_pom(
            dir.path(),
            r#"<groupId>g</groupId><artifactId>app</artifactId>
               <dependencies>
                 <dependency><groupId>x</groupId><artifactId>zeta</artifactId><type>pom</type></dependency>
                 <dependency><groupId>x</groupId><artifactId>alpha</artifactId></dependency>
               </dependencies>"#,
        );

        let mut cache = DescriptorCache::new();
        let module = MavenModule::from_descriptor(&path, &mut cache).unwrap();
        let deps = module.dependencies(&mut cache).unwrap();
        let names: Vec<&str> = deps.iter().map(|(m, _)| m.id().artifact.as_str()).collect();
        assert_eq!(names, vec!["zeta", "alpha"]);
        assert_eq!(deps[0].1.get("type").map(String::as_str), Some("pom"));
    }

    #[test]
    fn test_sub_modules_resolved_relative_to_descriptor() {
        let dir = TempDir::new().unwrap();
        let root = write_pom(
            dir.path(),
            r#"<groupId>g</groupId><artifactId>root</artifactId><packaging>pom</packaging>
               <modules><module>core</module><module>api</module></modules>"#,
        );
        write_pom(&dir.path().join("core"), "<groupId>g</groupId><artifactId>core</artifactId>");
        write_pom(
            &dir.path().join("api"),
            "<groupId>g</groupId><artifactId>api</artifactId><packaging>war</packaging>",
        );

        let mut cache = DescriptorCache::new();
        let module = MavenModule::from_descriptor(&root, &mut cache).unwrap();
        let subs = module.sub_modules(&mut cache).unwrap();

        assert_eq!(subs.len(), 2);
        assert_eq!(subs[0].id(), &ModuleId::new("g", "core"));
        assert_eq!(
            subs[0].descriptor_path(),
            Some(dir.path().join("core").join("pom.xml").as_path())
        );
        assert_eq!(subs[1].packaging(), Some("war"));
    }

    #[test]
    fn test_missing_sub_module_descriptor() {
        let dir = TempDir::new().unwrap();
        let root = write_pom(
            dir.path(),
            r#"<groupId>g</groupId><artifactId>root</artifactId>
               <modules><module>ghost</module></modules>"#,
        );
        // a pom.xml one level too deep does not count
        write_pom(&dir.path().join("ghost").join("nested"), "<groupId>g</groupId><artifactId>ghost</artifactId>");

        let mut cache = DescriptorCache::new();
        let module = MavenModule::from_descriptor(&root, &mut cache).unwrap();
        let err = module.sub_modules(&mut cache).unwrap_err();
        match err {
            GraphError::MissingSubmoduleDescriptor { parent, path } => {
                assert_eq!(parent, root);
                assert_eq!(path, dir.path().join("ghost").join("pom.xml"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
