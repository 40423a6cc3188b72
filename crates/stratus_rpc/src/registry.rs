//! Versioned constructor registry for resource references.
//!
//! Generated per-package SDK code registers constructors at process start;
//! unmarshaling looks them up to turn wire resource references back into
//! typed handles. Registration and lookup contend only on a single
//! reader/writer lock covering the whole table.
//!
//! The registry is an explicit object: embedders construct one (usually one
//! per process, but tests instantiate isolated registries) and thread a
//! reference through the unmarshaling context.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use semver::Version;
use stratus_core::resource::ResourceRef;
use stratus_core::urn::Urn;

use crate::error::{ConstructError, RegistryError};

/// Types carrying a semantic version.
pub trait Versioned {
    /// The value's version.
    fn version(&self) -> Version;
}

/// Registry of versioned values keyed by name.
pub struct VersionedMap<T> {
    entries: RwLock<HashMap<String, Vec<T>>>,
}

impl<T> Default for VersionedMap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> VersionedMap<T> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }
}

impl<T: Versioned + Clone> VersionedMap<T> {
    /// Stores a value under `key`.
    ///
    /// # Errors
    ///
    /// Fails if a value with the exact same version is already registered
    /// under `key`.
    pub fn store(&self, key: &str, value: T) -> Result<(), RegistryError> {
        let mut entries = self.entries.write();
        let slot = entries.entry(key.to_string()).or_default();
        if slot.iter().any(|existing| existing.version() == value.version()) {
            return Err(RegistryError::Duplicate {
                key: key.to_string(),
                version: value.version(),
            });
        }
        slot.push(value);
        Ok(())
    }

    /// Looks up the best registration for `key`.
    ///
    /// `None` is the wildcard version and matches any registration.
    /// Otherwise candidates are restricted to the requested major version;
    /// an exact version match returns immediately, and the greatest
    /// remaining candidate wins otherwise. Ties between equal versions
    /// cannot arise ([`store`](Self::store) rejects duplicates), so the
    /// strict-greater scan below is deterministic regardless of
    /// registration order.
    #[must_use]
    pub fn load(&self, key: &str, version: Option<&Version>) -> Option<T> {
        let entries = self.entries.read();
        let candidates = entries.get(key)?;

        let mut best: Option<&T> = None;
        for candidate in candidates {
            if let Some(requested) = version {
                if candidate.version().major != requested.major {
                    continue;
                }
                if candidate.version() == *requested {
                    return Some(candidate.clone());
                }
            }
            match best {
                None => best = Some(candidate),
                Some(current) if candidate.version() > current.version() => {
                    best = Some(candidate);
                }
                Some(_) => {}
            }
        }
        best.cloned()
    }
}

/// Constructor for provider resource handles, implemented by generated
/// per-package SDK code.
pub trait ResourcePackage: Send + Sync {
    /// The package's version.
    fn version(&self) -> Version;

    /// Builds a provider handle for the referenced resource.
    ///
    /// # Errors
    ///
    /// Returns any error raised while rehydrating the provider.
    fn construct_provider(
        &self,
        name: &str,
        typ: &str,
        urn: &Urn,
    ) -> Result<ResourceRef, ConstructError>;
}

/// Constructor for module resource handles, implemented by generated
/// per-module SDK code.
pub trait ResourceModule: Send + Sync {
    /// The module's version.
    fn version(&self) -> Version;

    /// Builds a handle for the referenced resource.
    ///
    /// # Errors
    ///
    /// Returns any error raised while rehydrating the resource.
    fn construct(&self, name: &str, typ: &str, urn: &Urn) -> Result<ResourceRef, ConstructError>;
}

impl Versioned for Arc<dyn ResourcePackage> {
    fn version(&self) -> Version {
        (**self).version()
    }
}

impl Versioned for Arc<dyn ResourceModule> {
    fn version(&self) -> Version {
        (**self).version()
    }
}

/// Module registry keys are formatted `pkg:mod`.
fn module_key(pkg: &str, module: &str) -> String {
    format!("{pkg}:{module}")
}

/// Registry binding resource packages and modules to their constructors.
#[derive(Default)]
pub struct ResourceRegistry {
    packages: VersionedMap<Arc<dyn ResourcePackage>>,
    modules: VersionedMap<Arc<dyn ResourceModule>>,
}

impl ResourceRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a resource package under its package name.
    ///
    /// # Errors
    ///
    /// Fails if the package is already registered at this exact version.
    pub fn register_package(
        &self,
        pkg: &str,
        package: Arc<dyn ResourcePackage>,
    ) -> Result<(), RegistryError> {
        tracing::debug!(package = pkg, version = %package.version(), "registering resource package");
        self.packages.store(pkg, package)
    }

    /// Registers a resource module under `pkg:mod`.
    ///
    /// # Errors
    ///
    /// Fails if the module is already registered at this exact version.
    pub fn register_module(
        &self,
        pkg: &str,
        module: &str,
        resource_module: Arc<dyn ResourceModule>,
    ) -> Result<(), RegistryError> {
        let key = module_key(pkg, module);
        tracing::debug!(module = %key, version = %resource_module.version(), "registering resource module");
        self.modules.store(&key, resource_module)
    }

    /// Looks up the best package registration for `pkg`.
    #[must_use]
    pub fn lookup_package(
        &self,
        pkg: &str,
        version: Option<&Version>,
    ) -> Option<Arc<dyn ResourcePackage>> {
        self.packages.load(pkg, version)
    }

    /// Looks up the best module registration for a `pkg:mod` key.
    #[must_use]
    pub fn lookup_module(
        &self,
        key: &str,
        version: Option<&Version>,
    ) -> Option<Arc<dyn ResourceModule>> {
        self.modules.load(key, version)
    }
}
