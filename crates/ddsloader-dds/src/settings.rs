//! Loader configuration.
//!
//! Settings are read once, typically from a JSON file, and passed to every
//! decode call by reference. Nothing here is mutated while decoding.
//!
//! ```json
//! {
//!     "mipmapBias": 1,
//!     "normalMipmapBias": 0,
//!     "normalList": ["^Squad/Parts/.*_n$"],
//!     "readableList": ["^MyMod/Flags/"],
//!     "activeTextureManager": {
//!         "normalList": ["^OtherMod/.*Bump$"],
//!         "overrides": {
//!             "^OtherMod/Decals/": { "makeNotReadable": false }
//!         }
//!     }
//! }
//! ```
//!
//! The `activeTextureManager` section accepts texture manager configs as-is:
//! its normal list is merged in, and every override that sets
//! `makeNotReadable` to `false` becomes a readable pattern.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use regex::Regex;
use serde::Deserialize;

use crate::{Error, Result};

/// On-disk settings layout. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct SettingsFile {
    mipmap_bias: i32,
    normal_mipmap_bias: i32,
    normal_list: Vec<String>,
    readable_list: Vec<String>,
    active_texture_manager: Option<TextureManagerSection>,
}

/// Texture manager config shared with other loaders.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct TextureManagerSection {
    normal_list: Vec<String>,
    overrides: BTreeMap<String, TextureOverride>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct TextureOverride {
    make_not_readable: Option<bool>,
}

/// Mip-skip biases and texture name policies.
#[derive(Debug, Clone, Default)]
pub struct LoaderSettings {
    /// Leading mip levels to drop from regular textures.
    pub mipmap_bias: i32,
    /// Leading mip levels to drop from normal maps.
    pub normal_mipmap_bias: i32,
    normal_patterns: Vec<Regex>,
    readable_patterns: Vec<Regex>,
}

impl LoaderSettings {
    /// Settings with the given biases and no name patterns.
    pub fn new(mipmap_bias: i32, normal_mipmap_bias: i32) -> Self {
        Self {
            mipmap_bias,
            normal_mipmap_bias,
            ..Self::default()
        }
    }

    /// Parse settings from a JSON document.
    pub fn from_json(text: &str) -> Result<Self> {
        let file: SettingsFile = serde_json::from_str(text)?;

        let mut settings = Self::new(file.mipmap_bias, file.normal_mipmap_bias);
        for pattern in &file.normal_list {
            settings = settings.with_normal_pattern(pattern)?;
        }
        for pattern in &file.readable_list {
            settings = settings.with_readable_pattern(pattern)?;
        }

        if let Some(manager) = &file.active_texture_manager {
            for pattern in &manager.normal_list {
                settings = settings.with_normal_pattern(pattern)?;
            }
            for (pattern, texture) in &manager.overrides {
                if texture.make_not_readable == Some(false) {
                    settings = settings.with_readable_pattern(pattern)?;
                }
            }
        }
        Ok(settings)
    }

    /// Load settings from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => Error::FileNotFound(path.to_path_buf()),
            _ => Error::Io(e),
        })?;

        let settings = Self::from_json(&text)?;
        tracing::debug!(
            path = %path.display(),
            mipmap_bias = settings.mipmap_bias,
            normal_mipmap_bias = settings.normal_mipmap_bias,
            normal_patterns = settings.normal_patterns.len(),
            readable_patterns = settings.readable_patterns.len(),
            "Loaded loader settings"
        );
        Ok(settings)
    }

    /// Add a pattern marking matching texture URLs as normal maps.
    pub fn with_normal_pattern(mut self, pattern: &str) -> Result<Self> {
        self.normal_patterns.push(Regex::new(pattern)?);
        Ok(self)
    }

    /// Add a pattern marking matching texture URLs as kept readable.
    pub fn with_readable_pattern(mut self, pattern: &str) -> Result<Self> {
        self.readable_patterns.push(Regex::new(pattern)?);
        Ok(self)
    }

    /// Bias that applies to a texture.
    #[inline]
    pub fn bias_for(&self, is_normal_map: bool) -> i32 {
        if is_normal_map {
            self.normal_mipmap_bias
        } else {
            self.mipmap_bias
        }
    }

    /// Whether `url` matches any normal-map pattern.
    pub fn is_normal(&self, url: &str) -> bool {
        self.normal_patterns.iter().any(|re| re.is_match(url))
    }

    /// Whether `url` matches any keep-readable pattern.
    pub fn keep_readable(&self, url: &str) -> bool {
        self.readable_patterns.iter().any(|re| re.is_match(url))
    }
}
