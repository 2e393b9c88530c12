use std::any::{type_name, TypeId};
use std::collections::HashMap;
use std::path::PathBuf;
use std::rc::Rc;

use crate::error::Error;

use super::loader::{ErasedLoader, Load, Loader};
use super::locate::SearchPaths;
use super::sound::{SilentAudio, SoundLoader};
use super::texture::TextureLoader;

/// Asset library: one caching loader per resource type.
///
/// Loaders are keyed by the `TypeId` of the asset they produce, so at most
/// one loader exists per type and registering another replaces it (together
/// with its cache). `get::<T>` resolves the requested name through
/// [`SearchPaths`] on every call and hands the resolved path to the loader
/// for `T`, which serves repeats from its cache.
///
/// Single-threaded: assets are shared as `Rc`.
pub struct Library {
    loaders: HashMap<TypeId, Box<dyn ErasedLoader>>,
    search: SearchPaths,
}

impl Library {
    /// Creates a library with the default texture and sound loaders.
    pub fn new(search: SearchPaths) -> Self {
        let mut library = Self::empty(search);
        library.register(TextureLoader);
        library.register(SoundLoader::new(SilentAudio::default()));
        library
    }

    /// Creates a library without any loaders.
    pub fn empty(search: SearchPaths) -> Self {
        Self {
            loaders: HashMap::new(),
            search,
        }
    }

    /// Registers `load` for its asset type, replacing any previous loader.
    pub fn register<L: Load>(&mut self, load: L) {
        let asset = type_name::<L::Asset>();
        let previous = self
            .loaders
            .insert(TypeId::of::<L::Asset>(), Box::new(Loader::new(load)));

        match previous {
            Some(_) => log::info!("replacing loader for type '{asset}'"),
            None => log::info!("registering loader for type '{asset}'"),
        }
    }

    /// Returns the resource `name` as a `T`, loading it if necessary.
    pub fn get<T: 'static>(&mut self, name: &str) -> Result<Rc<T>, Error> {
        let loader = self
            .loaders
            .get_mut(&TypeId::of::<T>())
            .ok_or(Error::NoLoaderRegistered {
                type_name: type_name::<T>(),
            })?;

        let path = self.search.locate(name)?;
        let asset = loader.get_any(&path)?;

        asset.downcast::<T>().map_err(|_| Error::ResourceLoad {
            type_name: type_name::<T>(),
            path,
            source: format!("loader for `{}` produced another type", loader.asset_type()).into(),
        })
    }

    /// Resolves `name` without loading it.
    pub fn resolve(&self, name: &str) -> Result<PathBuf, Error> {
        self.search.locate(name)
    }

    pub fn has_loader<T: 'static>(&self) -> bool {
        self.loaders.contains_key(&TypeId::of::<T>())
    }

    /// The registered loader of concrete type `L`, if it is the one currently
    /// serving `L::Asset`.
    pub fn loader<L: Load>(&self) -> Option<&Loader<L>> {
        self.loaders
            .get(&TypeId::of::<L::Asset>())
            .and_then(|loader| loader.as_any().downcast_ref::<Loader<L>>())
    }

    pub fn search_paths(&self) -> &SearchPaths {
        &self.search
    }
}

impl Default for Library {
    fn default() -> Self {
        Self::new(SearchPaths::default())
    }
}
