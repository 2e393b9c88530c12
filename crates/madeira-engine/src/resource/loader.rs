use std::any::{type_name, Any};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::error::Error;

/// Type-specific load primitive implemented by concrete backends.
///
/// `load` receives an already-resolved path and either builds the asset or
/// fails with the underlying cause.
pub trait Load: 'static {
    type Asset: 'static;

    fn load(&mut self, path: &Path) -> anyhow::Result<Self::Asset>;
}

/// Caching front of a [`Load`] implementation.
///
/// A path is loaded at most once: later `get` calls return the cached `Rc`
/// without touching the filesystem, even if the file changed on disk. Failed
/// loads are not cached, so the next `get` for that path retries. There is no
/// eviction; entries live as long as the loader.
pub struct Loader<L: Load> {
    load: L,
    cache: HashMap<PathBuf, Rc<L::Asset>>,
}

impl<L: Load> Loader<L> {
    pub fn new(load: L) -> Self {
        Self {
            load,
            cache: HashMap::new(),
        }
    }

    /// Returns the asset for `path`, loading it on first use.
    pub fn get(&mut self, path: &Path) -> Result<Rc<L::Asset>, Error> {
        if let Some(asset) = self.cache.get(path) {
            log::debug!("cache hit for '{}'", path.display());
            return Ok(Rc::clone(asset));
        }

        log::info!("loading {} from '{}'", type_name::<L::Asset>(), path.display());

        let asset = self
            .load
            .load(path)
            .map(Rc::new)
            .map_err(|source| Error::ResourceLoad {
                type_name: type_name::<L::Asset>(),
                path: path.to_path_buf(),
                source: source.into(),
            })?;

        self.cache.insert(path.to_path_buf(), Rc::clone(&asset));
        Ok(asset)
    }

    pub fn is_cached(&self, path: &Path) -> bool {
        self.cache.contains_key(path)
    }

    /// Number of cached assets.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// The wrapped load primitive.
    pub fn inner(&self) -> &L {
        &self.load
    }
}

/// Object-safe view of a `Loader<L>` so loaders for different asset types
/// can share one registry.
pub(crate) trait ErasedLoader {
    fn get_any(&mut self, path: &Path) -> Result<Rc<dyn Any>, Error>;

    fn asset_type(&self) -> &'static str;

    fn as_any(&self) -> &dyn Any;
}

impl<L: Load> ErasedLoader for Loader<L> {
    fn get_any(&mut self, path: &Path) -> Result<Rc<dyn Any>, Error> {
        let asset: Rc<dyn Any> = self.get(path)?;
        Ok(asset)
    }

    fn asset_type(&self) -> &'static str {
        type_name::<L::Asset>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Returns the path length; fails for paths containing "bad".
    #[derive(Default)]
    struct PathLen {
        calls: u32,
    }

    impl Load for PathLen {
        type Asset = usize;

        fn load(&mut self, path: &Path) -> anyhow::Result<usize> {
            self.calls += 1;
            let s = path.to_string_lossy();
            anyhow::ensure!(!s.contains("bad"), "refusing {s}");
            Ok(s.len())
        }
    }

    #[test]
    fn second_get_is_served_from_cache() {
        let mut loader = Loader::new(PathLen::default());

        let a = loader.get(Path::new("one.bin")).unwrap();
        let b = loader.get(Path::new("one.bin")).unwrap();

        assert!(Rc::ptr_eq(&a, &b));
        assert_eq!(*a, 7);
        assert_eq!(loader.inner().calls, 1);
        assert!(loader.is_cached(Path::new("one.bin")));
    }

    #[test]
    fn failures_are_retried() {
        let mut loader = Loader::new(PathLen::default());

        let err = loader.get(Path::new("bad.bin")).unwrap_err();
        assert!(matches!(err, Error::ResourceLoad { .. }));
        assert!(!loader.is_cached(Path::new("bad.bin")));

        let err = loader.get(Path::new("bad.bin")).unwrap_err();
        assert!(matches!(err, Error::ResourceLoad { .. }));
        assert_eq!(loader.inner().calls, 2);
    }

    #[test]
    fn failure_does_not_poison_existing_entries() {
        let mut loader = Loader::new(PathLen::default());
        let good = loader.get(Path::new("good.bin")).unwrap();

        assert!(loader.get(Path::new("bad.bin")).is_err());

        let again = loader.get(Path::new("good.bin")).unwrap();
        assert!(Rc::ptr_eq(&good, &again));
        assert_eq!(loader.len(), 1);
    }

    #[test]
    fn load_error_names_type_and_path() {
        let mut loader = Loader::new(PathLen::default());
        let err = loader.get(Path::new("bad.bin")).unwrap_err();

        let Error::ResourceLoad { type_name, path, source } = err else {
            panic!("unexpected error kind");
        };
        assert_eq!(type_name, "usize");
        assert_eq!(path, PathBuf::from("bad.bin"));
        assert_eq!(source.to_string(), "refusing bad.bin");
    }

    #[test]
    fn erased_get_downcasts_to_the_asset_type() {
        let mut loader = Loader::new(PathLen::default());
        let erased: &mut dyn ErasedLoader = &mut loader;

        let any = erased.get_any(Path::new("abc")).unwrap();
        assert_eq!(*any.downcast::<usize>().unwrap(), 3);
        assert_eq!(erased.asset_type(), "usize");
    }
}
