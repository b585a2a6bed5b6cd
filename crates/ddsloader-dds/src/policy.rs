//! Texture records handed to the engine.

use crate::decode::{decode_file, DecodedImage};
use crate::format::NORMAL_MAP_SUFFIX;
use crate::settings::LoaderSettings;
use crate::Result;

/// A decoded texture with the flags the engine registers it under.
#[derive(Debug, Clone)]
pub struct TextureInfo {
    /// Texture URL, relative to the game data root and without extension.
    pub url: String,
    pub image: DecodedImage,
    /// Registered as a normal map.
    pub is_normal: bool,
    /// Keep a CPU-side copy after upload.
    pub is_readable: bool,
}

impl TextureInfo {
    /// Attach engine flags to a decoded image.
    ///
    /// A texture is a normal map if the decoder detected one, its URL ends in
    /// `NRM`, or the URL matches a configured normal pattern.
    pub fn new(url: impl Into<String>, image: DecodedImage, settings: &LoaderSettings) -> Self {
        let url = url.into();
        let is_normal =
            image.is_normal_map || url.ends_with(NORMAL_MAP_SUFFIX) || settings.is_normal(&url);
        let is_readable = settings.keep_readable(&url);

        Self {
            url,
            image,
            is_normal,
            is_readable,
        }
    }

    /// Decode `path` and register it under `url`.
    pub fn load(
        path: impl AsRef<std::path::Path>,
        url: impl Into<String>,
        settings: &LoaderSettings,
    ) -> Result<Self> {
        let image = decode_file(path, settings)?;
        Ok(Self::new(url, image, settings))
    }
}
