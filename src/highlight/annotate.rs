//! Outline element rectangles on page screenshots

use crate::dom::element::Rect;
use crate::error::{InspectorError, Result};
use base64::Engine;
use image::{ImageOutputFormat, Rgba, RgbaImage};
use imageproc::drawing::draw_hollow_rect_mut;
use std::io::Cursor;

/// Default outline colour (opaque red)
pub const OUTLINE_COLOR: [u8; 4] = [255, 0, 0, 255];

const OUTLINE_WIDTH: i32 = 2;

/// Draw an outline around each rect on a PNG and return the re-encoded PNG.
///
/// Rects are in CSS pixels; `scale` converts them to image pixels (the
/// device pixel ratio of the capture).
pub fn outline_rects(png: &[u8], rects: &[Rect], scale: f64, color: [u8; 4]) -> Result<Vec<u8>> {
    let mut image: RgbaImage = image::load_from_memory(png)
        .map_err(|e| InspectorError::ScreenshotFailed(format!("Failed to decode screenshot: {}", e)))?
        .to_rgba8();

    for rect in rects.iter().filter(|r| r.is_visible() && r.is_finite()) {
        draw_outline(&mut image, rect, scale, Rgba(color));
    }

    encode_png(&image)
}

fn draw_outline(image: &mut RgbaImage, rect: &Rect, scale: f64, color: Rgba<u8>) {
    let left = (rect.left * scale).round() as i32;
    let top = (rect.top * scale).round() as i32;
    let width = (rect.width * scale).round() as i32;
    let height = (rect.height * scale).round() as i32;

    for inset in 0..OUTLINE_WIDTH {
        let w = width - 2 * inset;
        let h = height - 2 * inset;
        if w <= 0 || h <= 0 {
            break;
        }
        let outline = imageproc::rect::Rect::at(left + inset, top + inset).of_size(w as u32, h as u32);
        draw_hollow_rect_mut(image, outline, color);
    }
}

pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageOutputFormat::Png)
        .map_err(|e| InspectorError::ScreenshotFailed(format!("Failed to encode screenshot: {}", e)))?;
    Ok(bytes)
}

pub fn to_base64(bytes: &[u8]) -> String {
    base64::engine::general_purpose::STANDARD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank_png(width: u32, height: u32) -> Vec<u8> {
        let image = RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 255]));
        encode_png(&image).unwrap()
    }

    #[test]
    fn test_outline_rects() {
        let png = blank_png(100, 100);
        let rects = [Rect::new(10.0, 20.0, 30.0, 40.0)];

        let annotated = outline_rects(&png, &rects, 1.0, OUTLINE_COLOR).unwrap();
        let image = image::load_from_memory(&annotated).unwrap().to_rgba8();

        // left edge, top-left corner and inner ring
        assert_eq!(image.get_pixel(20, 10), &Rgba(OUTLINE_COLOR));
        assert_eq!(image.get_pixel(21, 30), &Rgba(OUTLINE_COLOR));
        // inside and outside the box stay untouched
        assert_eq!(image.get_pixel(35, 30), &Rgba([255, 255, 255, 255]));
        assert_eq!(image.get_pixel(80, 80), &Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_outline_scaled() {
        let png = blank_png(100, 100);
        let rects = [Rect::new(5.0, 5.0, 10.0, 10.0)];

        let annotated = outline_rects(&png, &rects, 2.0, OUTLINE_COLOR).unwrap();
        let image = image::load_from_memory(&annotated).unwrap().to_rgba8();

        assert_eq!(image.get_pixel(10, 10), &Rgba(OUTLINE_COLOR));
        assert_eq!(image.get_pixel(5, 5), &Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_invisible_rects_are_skipped() {
        let png = blank_png(20, 20);
        let rects = [Rect::default(), Rect::new(f64::NAN, 0.0, 5.0, 5.0)];

        let annotated = outline_rects(&png, &rects, 1.0, OUTLINE_COLOR).unwrap();
        let image = image::load_from_memory(&annotated).unwrap().to_rgba8();
        assert!(image.pixels().all(|p| *p == Rgba([255, 255, 255, 255])));
    }

    #[test]
    fn test_invalid_png() {
        let err = outline_rects(b"not a png", &[], 1.0, OUTLINE_COLOR).unwrap_err();
        assert!(matches!(err, InspectorError::ScreenshotFailed(_)));
    }

    #[test]
    fn test_to_base64() {
        assert_eq!(to_base64(b"hi"), "aGk=");
    }
}
