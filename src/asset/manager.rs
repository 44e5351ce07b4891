use std::any::TypeId;
use std::sync::Arc;
use derive_more::*;
use tracing::instrument;
use crate::{Asset, AssetLoader, AssetPath, DynLoader, HashMap, Protocol};

/// Reads files through registered protocols and turns them into assets with registered loaders.
/// Loading is synchronous: the caller owns the result.
#[derive(Default)]
pub struct AssetManager {
    path_prefix: Option<String>,
    protocols: HashMap<String, Arc<dyn Protocol>>,
    default_protocol: Option<String>,
    loaders: Vec<Arc<dyn DynLoader>>,
    extension_to_loader: HashMap<String, usize>,
}

impl AssetManager {

    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> AssetManagerBuilder {
        AssetManagerBuilder::default()
    }

    pub fn set_path_prefix<S: Into<String>>(&mut self, prefix: Option<S>) {
        self.path_prefix = prefix.map(|s| s.into());
    }

    /// Adds a protocol for use in loading bytes for asset loaders.
    pub fn add_protocol(&mut self, protocol: impl Protocol, is_default: bool) {
        let name = String::from(protocol.name());
        self.protocols.insert(name.clone(), Arc::new(protocol));
        if is_default {
            self.default_protocol = Some(name);
        }
    }

    /// Adds a loader for transforming file bytes into assets.
    pub fn try_add_loader(&mut self, loader: impl AssetLoader) -> Result<(), LoadError> {
        for extension in loader.extensions() {
            if self.extension_to_loader.contains_key(*extension) {
                return Err(LoadError::ExtensionOverlaps);
            }
        }
        let loader_index = self.loaders.len();
        for extension in loader.extensions() {
            self.extension_to_loader.insert(String::from(*extension), loader_index);
        }
        self.loaders.push(Arc::new(loader));
        Ok(())
    }

    /// Parses a path, filling in the default protocol and the path prefix.
    pub fn parse_path(&self, path: &str) -> Result<AssetPath, LoadError> {
        let mut path = AssetPath::parse(path, self.default_protocol.as_deref())?;
        path.prefix = self.path_prefix.clone();
        Ok(path)
    }

    /// Reads the raw bytes of a file through its protocol.
    pub fn read(&self, path: &AssetPath) -> anyhow::Result<Vec<u8>> {
        let protocol = match self.protocols.get(&path.protocol) {
            Some(protocol) => protocol,
            None => return Err(LoadError::NoSuchProtocol.into()),
        };
        log::trace!("Reading {path}");
        protocol.read(path)
    }

    /// Reads and loads an asset.
    #[instrument(skip(self))]
    pub fn load<A: Asset>(&self, path: &str) -> anyhow::Result<A> {
        let path = self.parse_path(path)?;
        let loader = self.resolve_loader::<A>(&path)?;
        let bytes = self.read(&path)?;
        Self::load_with::<A>(loader, &bytes, &path)
    }

    /// Loads an asset from bytes already read, using the loader registered for the path's extension.
    pub fn load_bytes<A: Asset>(&self, bytes: &[u8], path: &AssetPath) -> anyhow::Result<A> {
        let loader = self.resolve_loader::<A>(path)?;
        Self::load_with::<A>(loader, bytes, path)
    }

    /// Finds the loader for the path's extension and checks that it produces `A`.
    fn resolve_loader<A: Asset>(&self, path: &AssetPath) -> Result<&Arc<dyn DynLoader>, LoadError> {
        let loader = match self.extension_to_loader.get(&path.extension) {
            Some(loader_idx) => &self.loaders[*loader_idx],
            None => return Err(LoadError::NoSuchLoader),
        };
        if loader.asset_type() != TypeId::of::<A>() {
            return Err(LoadError::IncorrectAssetType);
        }
        Ok(loader)
    }

    fn load_with<A: Asset>(loader: &Arc<dyn DynLoader>, bytes: &[u8], path: &AssetPath) -> anyhow::Result<A> {
        log::debug!("Loading {path}");
        let asset = loader.dyn_load(bytes, path)?;
        match asset.downcast::<A>() {
            Ok(asset) => Ok(*asset),
            Err(_) => Err(LoadError::IncorrectAssetType.into()),
        }
    }
}

/// Builder for an [`AssetManager`].
#[derive(Default)]
pub struct AssetManagerBuilder {
    manager: AssetManager,
    error: Option<LoadError>,
}

impl AssetManagerBuilder {

    pub fn default_protocol(mut self, protocol: impl Protocol) -> Self {
        self.manager.add_protocol(protocol, true);
        self
    }

    pub fn protocol(mut self, protocol: impl Protocol) -> Self {
        self.manager.add_protocol(protocol, false);
        self
    }

    pub fn loader(mut self, loader: impl AssetLoader) -> Self {
        if let Err(err) = self.manager.try_add_loader(loader) {
            self.error.get_or_insert(err);
        }
        self
    }

    pub fn path_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.manager.set_path_prefix(Some(prefix));
        self
    }

    /// Finishes the manager, failing if two loaders claimed the same extension.
    pub fn build(self) -> Result<AssetManager, LoadError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.manager),
        }
    }
}

#[derive(Error, Debug, Display, Clone, Eq, PartialEq)]
pub enum LoadError {
    #[display(fmt="Incorrect asset type")]
    IncorrectAssetType,
    #[display(fmt="No default protocol")]
    NoDefaultProtocol,
    #[display(fmt="No such protocol")]
    NoSuchProtocol,
    #[display(fmt="No loader matching extension")]
    NoSuchLoader,
    #[display(fmt="Path missing extension")]
    PathMissingExtension,
    #[display(fmt="Supported extension of one loader overlaps with another")]
    ExtensionOverlaps,
}
