//! Dominant-color extraction from moodboard images.
//!
//! Produces exactly [`PALETTE_SIZE`] hex colors ordered by descending
//! dominance. Extraction failure is non-fatal to the wizard: the caller
//! proceeds with no palette.

use crate::error::ExtractionError;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

/// Number of colors in every palette.
pub const PALETTE_SIZE: usize = 5;

/// Pixel sampling budget. Large uploads are sampled on a stride so a
/// 10MB photo costs the same as a thumbnail.
const MAX_SAMPLES: u32 = 10_000;

/// Ordered sequence of exactly five hex color strings, most dominant first.
/// Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Palette(Vec<String>);

impl Palette {
    pub fn new(colors: Vec<String>) -> Result<Self, String> {
        if colors.len() != PALETTE_SIZE {
            return Err(format!(
                "palette must contain exactly {PALETTE_SIZE} colors, got {}",
                colors.len()
            ));
        }
        Ok(Self(colors))
    }

    pub fn colors(&self) -> &[String] {
        &self.0
    }

    /// Comma-joined list for prompt interpolation, e.g. `#112233, #445566, …`.
    pub fn to_comma_list(&self) -> String {
        self.0.join(", ")
    }
}

impl TryFrom<Vec<String>> for Palette {
    type Error = String;

    fn try_from(colors: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(colors)
    }
}

impl From<Palette> for Vec<String> {
    fn from(palette: Palette) -> Self {
        palette.0
    }
}

/// Peel the `data:image/...;base64,` prefix off a data URL and decode the
/// payload. Bare base64 without the prefix is also accepted.
pub fn data_url_to_bytes(data_url: &str) -> Result<Vec<u8>, ExtractionError> {
    let payload = match data_url.split_once(";base64,") {
        Some((header, payload)) => {
            if !header.starts_with("data:") {
                return Err(ExtractionError::NotADataUrl);
            }
            payload
        }
        None if data_url.starts_with("data:") => return Err(ExtractionError::NotADataUrl),
        None => data_url,
    };

    base64::engine::general_purpose::STANDARD
        .decode(payload.trim())
        .map_err(|e| ExtractionError::Decode(e.to_string()))
}

/// Extract the five dominant colors from an encoded image.
///
/// Pixels are bucketed into a coarse RGB grid (4 bits per channel) and the
/// most populated buckets win, averaged back to a representative color.
/// Near-solid images repeat their dominant buckets to keep the palette at
/// exactly five entries.
pub fn extract_palette(bytes: &[u8]) -> Result<Palette, ExtractionError> {
    let img = image::load_from_memory(bytes).map_err(|e| ExtractionError::Decode(e.to_string()))?;
    let rgb = img.to_rgb8();

    let total = rgb.width() * rgb.height();
    if total == 0 {
        return Err(ExtractionError::Empty);
    }
    let stride = (total / MAX_SAMPLES).max(1) as usize;

    // bucket key → (count, r sum, g sum, b sum)
    let mut buckets: std::collections::HashMap<u16, (u64, u64, u64, u64)> =
        std::collections::HashMap::new();
    for pixel in rgb.pixels().step_by(stride) {
        let [r, g, b] = pixel.0;
        let key = (u16::from(r >> 4) << 8) | (u16::from(g >> 4) << 4) | u16::from(b >> 4);
        let entry = buckets.entry(key).or_insert((0, 0, 0, 0));
        entry.0 += 1;
        entry.1 += u64::from(r);
        entry.2 += u64::from(g);
        entry.3 += u64::from(b);
    }

    let mut ranked: Vec<(u64, u64, u64, u64)> = buckets.into_values().collect();
    ranked.sort_by(|a, b| b.0.cmp(&a.0));

    if ranked.is_empty() {
        return Err(ExtractionError::Empty);
    }

    let colors: Vec<String> = (0..PALETTE_SIZE)
        .map(|i| {
            let (count, r, g, b) = ranked[i % ranked.len()];
            format!("#{:02x}{:02x}{:02x}", r / count, g / count, b / count)
        })
        .collect();

    Ok(Palette(colors))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgb, RgbImage};
    use std::io::Cursor;

    fn encode_png(img: &RgbImage) -> Vec<u8> {
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn palette_requires_exactly_five_colors() {
        assert!(Palette::new(vec!["#112233".into(); 5]).is_ok());
        assert!(Palette::new(vec!["#112233".into(); 4]).is_err());
        assert!(Palette::new(vec![]).is_err());
    }

    #[test]
    fn palette_deserializes_from_plain_array() {
        let p: Palette =
            serde_json::from_str(r##"["#112233","#445566","#778899","#aabbcc","#ddeeff"]"##)
                .unwrap();
        assert_eq!(p.colors()[0], "#112233");
    }

    #[test]
    fn palette_rejects_wrong_arity_on_deserialize() {
        let result: Result<Palette, _> = serde_json::from_str(r##"["#112233"]"##);
        assert!(result.is_err());
    }

    #[test]
    fn comma_list_matches_prompt_shape() {
        let p = Palette::new(vec![
            "#112233".into(),
            "#445566".into(),
            "#778899".into(),
            "#aabbcc".into(),
            "#ddeeff".into(),
        ])
        .unwrap();
        assert_eq!(
            p.to_comma_list(),
            "#112233, #445566, #778899, #aabbcc, #ddeeff"
        );
    }

    #[test]
    fn extracts_five_colors_with_dominant_first() {
        // 80% red, 20% blue.
        let mut img = RgbImage::new(100, 10);
        for (x, _, pixel) in img.enumerate_pixels_mut() {
            *pixel = if x < 80 {
                Rgb([200, 16, 16])
            } else {
                Rgb([16, 16, 200])
            };
        }
        let palette = extract_palette(&encode_png(&img)).unwrap();
        assert_eq!(palette.colors().len(), PALETTE_SIZE);
        assert_eq!(palette.colors()[0], "#c81010");
        assert!(palette.colors().contains(&"#1010c8".to_string()));
    }

    #[test]
    fn solid_image_still_yields_five_entries() {
        let img = RgbImage::from_pixel(16, 16, Rgb([10, 20, 30]));
        let palette = extract_palette(&encode_png(&img)).unwrap();
        assert_eq!(palette.colors().len(), PALETTE_SIZE);
        assert!(palette.colors().iter().all(|c| c == "#0a141e"));
    }

    #[test]
    fn garbage_bytes_fail_with_decode_error() {
        let err = extract_palette(b"definitely not an image").unwrap_err();
        assert!(matches!(err, ExtractionError::Decode(_)));
    }

    #[test]
    fn data_url_decodes_payload() {
        let bytes = data_url_to_bytes("data:image/png;base64,aGVsbG8=").unwrap();
        assert_eq!(bytes, b"hello");
    }

    #[test]
    fn bare_base64_is_accepted() {
        let bytes = data_url_to_bytes("aGVsbG8=").unwrap();
        assert_eq!(bytes, b"hello");
    }

    #[test]
    fn data_url_without_base64_marker_is_rejected() {
        let err = data_url_to_bytes("data:image/png,rawbytes").unwrap_err();
        assert!(matches!(err, ExtractionError::NotADataUrl));
    }

    #[test]
    fn invalid_base64_payload_is_a_decode_error() {
        let err = data_url_to_bytes("data:image/png;base64,@@@").unwrap_err();
        assert!(matches!(err, ExtractionError::Decode(_)));
    }
}
