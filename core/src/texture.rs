//! Texture resolution
//!
//! Maps persisted texture paths to opaque handles owned by the rendering layer.
//! The codec only ever sees a [`TextureResolver`]; the path that produced a
//! handle is kept next to it in [`TextureRef`](crate::uniform::TextureRef) so
//! that exports stay portable data.

use std::path::PathBuf;

use hashbrown::HashMap;

/// Path of the texture used when nothing else is available.
pub const DEFAULT_TEXTURE_PATH: &str = "./texture/uvSubgrid.png";

/// Opaque handle to a texture owned by the rendering layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

impl TextureHandle {
    /// Handle reserved for the default texture
    pub const DEFAULT: TextureHandle = TextureHandle(0);

    pub fn is_default(&self) -> bool {
        *self == Self::DEFAULT
    }
}

/// How a texture file is decoded by the loader
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureKind {
    /// 8-bit image formats (png, jpg, ...)
    Ldr,
    /// Radiance HDR environment maps
    Hdr,
}

impl TextureKind {
    /// Pick the loader for a path by extension
    pub fn for_path(path: &str) -> Self {
        if path.to_ascii_lowercase().ends_with(".hdr") {
            TextureKind::Hdr
        } else {
            TextureKind::Ldr
        }
    }
}

/// A texture path could not be turned into a handle.
///
/// Recoverable: the codec falls back to [`TextureHandle::DEFAULT`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("failed to resolve texture '{path}': {reason}")]
pub struct ResolutionFailure {
    pub path: String,
    pub reason: String,
}

/// Turns texture paths into handles.
pub trait TextureResolver {
    fn resolve(&mut self, path: &str) -> Result<TextureHandle, ResolutionFailure>;
}

/// An entry in the [`TextureCache`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedTexture {
    pub path: String,
    pub kind: TextureKind,
}

/// Path-keyed texture table handing out stable handles.
///
/// With an asset root configured, paths that do not exist under the root fail
/// to resolve; without one every non-empty path is accepted.
#[derive(Debug, Clone)]
pub struct TextureCache {
    asset_root: Option<PathBuf>,
    handles: HashMap<String, TextureHandle>,
    entries: Vec<CachedTexture>,
}

impl Default for TextureCache {
    fn default() -> Self {
        Self::new()
    }
}

impl TextureCache {
    /// Create a cache that accepts any path
    pub fn new() -> Self {
        let mut handles = HashMap::new();
        handles.insert(DEFAULT_TEXTURE_PATH.to_string(), TextureHandle::DEFAULT);
        Self {
            asset_root: None,
            handles,
            entries: vec![CachedTexture {
                path: DEFAULT_TEXTURE_PATH.to_string(),
                kind: TextureKind::Ldr,
            }],
        }
    }

    /// Create a cache that checks paths against files under `root`
    pub fn with_asset_root(root: impl Into<PathBuf>) -> Self {
        Self {
            asset_root: Some(root.into()),
            ..Self::new()
        }
    }

    /// Look up what a handle was loaded from
    pub fn entry(&self, handle: TextureHandle) -> Option<&CachedTexture> {
        self.entries.get(handle.0 as usize)
    }

    /// Number of distinct textures, the default included
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TextureResolver for TextureCache {
    fn resolve(&mut self, path: &str) -> Result<TextureHandle, ResolutionFailure> {
        if let Some(handle) = self.handles.get(path) {
            return Ok(*handle);
        }

        if path.trim().is_empty() {
            return Err(ResolutionFailure {
                path: path.to_string(),
                reason: "empty path".to_string(),
            });
        }

        if let Some(root) = &self.asset_root {
            let file = root.join(path);
            if !file.is_file() {
                return Err(ResolutionFailure {
                    path: path.to_string(),
                    reason: format!("{} does not exist", file.display()),
                });
            }
        }

        let handle = TextureHandle(self.entries.len() as u32);
        self.entries.push(CachedTexture {
            path: path.to_string(),
            kind: TextureKind::for_path(path),
        });
        self.handles.insert(path.to_string(), handle);
        tracing::debug!("Texture '{}' registered as {:?}", path, handle);
        Ok(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_path_maps_to_default_handle() {
        let mut cache = TextureCache::new();
        assert_eq!(
            cache.resolve(DEFAULT_TEXTURE_PATH).unwrap(),
            TextureHandle::DEFAULT
        );
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_same_path_same_handle() {
        let mut cache = TextureCache::new();
        let a = cache.resolve("./texture/noise.png").unwrap();
        let b = cache.resolve("./texture/noise.png").unwrap();
        let c = cache.resolve("./texture/other.png").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(!a.is_default());
    }

    #[test]
    fn test_hdr_detection() {
        let mut cache = TextureCache::new();
        let sky = cache.resolve("./texture/sky.HDR").unwrap();
        assert_eq!(cache.entry(sky).unwrap().kind, TextureKind::Hdr);
        let grid = cache.resolve("./texture/grid.png").unwrap();
        assert_eq!(cache.entry(grid).unwrap().kind, TextureKind::Ldr);
    }

    #[test]
    fn test_empty_path_fails() {
        let mut cache = TextureCache::new();
        assert!(cache.resolve("  ").is_err());
    }

    #[test]
    fn test_asset_root_checks_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("brick.png"), b"png").unwrap();

        let mut cache = TextureCache::with_asset_root(dir.path());
        assert!(cache.resolve("brick.png").is_ok());

        let err = cache.resolve("missing.png").unwrap_err();
        assert_eq!(err.path, "missing.png");
    }
}
