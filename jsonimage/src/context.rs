use serde::{Deserialize, Serialize};

use std::str::FromStr;

/// Downsampling requested for a decoded image.
///
/// `crop` fills the whole box and cuts the overflow, otherwise the image is
/// fitted inside the box keeping its aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThumbnailOptions {
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub crop: bool,
}

impl ThumbnailOptions {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            crop: false,
        }
    }

    pub fn cropped(self) -> Self {
        Self { crop: true, ..self }
    }
}

#[derive(Debug)]
pub struct ParseError(String);

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str("Invalid thumbnail size, expected WIDTHxHEIGHT: ")?;
        f.write_str(&self.0)
    }
}

impl std::error::Error for ParseError {}

impl TryFrom<&str> for ThumbnailOptions {
    type Error = ParseError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let err = || ParseError(s.to_string());
        let (width, height) = s.trim().to_lowercase().split_once('x').ok_or_else(err).and_then(
            |(w, h)| {
                let w = w.trim().parse::<u32>().map_err(|_| err())?;
                let h = h.trim().parse::<u32>().map_err(|_| err())?;
                Ok((w, h))
            },
        )?;

        if width == 0 || height == 0 {
            return Err(err());
        }

        Ok(Self::new(width, height))
    }
}

impl FromStr for ThumbnailOptions {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s)
    }
}

/// Everything a decoder factory gets to look at for one response.
#[derive(Debug, Clone, Copy)]
pub struct DecodingContext<'a> {
    data: &'a [u8],
    scale: Option<f32>,
    thumbnail: Option<ThumbnailOptions>,
}

impl<'a> DecodingContext<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            scale: None,
            thumbnail: None,
        }
    }

    pub fn with_scale(self, scale: f32) -> Self {
        Self {
            scale: Some(scale),
            ..self
        }
    }

    pub fn with_thumbnail(self, thumbnail: ThumbnailOptions) -> Self {
        Self {
            thumbnail: Some(thumbnail),
            ..self
        }
    }

    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    pub fn scale(&self) -> Option<f32> {
        self.scale
    }

    pub fn thumbnail(&self) -> Option<ThumbnailOptions> {
        self.thumbnail
    }
}
