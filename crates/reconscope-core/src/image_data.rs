//! Image container with per-point data arrays.
//!
//! [`ImageData`] stores a 2D raster as a list of named point data arrays. The
//! first array, when it is a 3-component unsigned char array, holds the RGB
//! color of each pixel. Rows are stored bottom-up: stored row 0 is the bottom
//! row of the picture.

use std::path::Path;

use glam::{DVec3, UVec2};
use image::{DynamicImage, RgbImage};
use serde::{Deserialize, Serialize};

use crate::error::{ReconstructionError, Result};

/// Image origin convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ImageOrigin {
    /// Image row 0 is the top row (standard screen convention).
    #[default]
    UpperLeft,
    /// Image row 0 is the bottom row (OpenGL convention).
    LowerLeft,
}

/// A named array of per-point values with a fixed number of components.
#[derive(Debug, Clone, PartialEq)]
pub enum PointArray {
    /// 8-bit unsigned values, e.g. RGB colors.
    UnsignedChar {
        name: String,
        components: usize,
        values: Vec<u8>,
    },
    /// 32-bit float values, e.g. depth or confidence.
    Float {
        name: String,
        components: usize,
        values: Vec<f32>,
    },
}

fn check_layout(name: &str, components: usize, len: usize) -> Result<()> {
    if !(1..=4).contains(&components) {
        return Err(ReconstructionError::InvalidComponents {
            name: name.to_string(),
            components,
        });
    }
    if len % components != 0 {
        return Err(ReconstructionError::SizeMismatch {
            expected: len.next_multiple_of(components),
            actual: len,
        });
    }
    Ok(())
}

impl PointArray {
    /// Creates an unsigned char array.
    pub fn unsigned_char(
        name: impl Into<String>,
        components: usize,
        values: Vec<u8>,
    ) -> Result<Self> {
        let name = name.into();
        check_layout(&name, components, values.len())?;
        Ok(Self::UnsignedChar {
            name,
            components,
            values,
        })
    }

    /// Creates a float array.
    pub fn float(name: impl Into<String>, components: usize, values: Vec<f32>) -> Result<Self> {
        let name = name.into();
        check_layout(&name, components, values.len())?;
        Ok(Self::Float {
            name,
            components,
            values,
        })
    }

    /// Returns the array name.
    pub fn name(&self) -> &str {
        match self {
            Self::UnsignedChar { name, .. } | Self::Float { name, .. } => name,
        }
    }

    /// Returns the number of components per tuple.
    pub fn components(&self) -> usize {
        match self {
            Self::UnsignedChar { components, .. } | Self::Float { components, .. } => *components,
        }
    }

    /// Returns the number of tuples stored.
    pub fn num_tuples(&self) -> usize {
        let len = match self {
            Self::UnsignedChar { values, .. } => values.len(),
            Self::Float { values, .. } => values.len(),
        };
        len.checked_div(self.components()).unwrap_or(0)
    }

    /// Returns true for a 3-component unsigned char array.
    pub fn is_color(&self) -> bool {
        matches!(self, Self::UnsignedChar { components: 3, .. })
    }

    /// Returns a single component as `f64`.
    pub fn component(&self, id: usize, component: usize) -> Option<f64> {
        let components = self.components();
        if component >= components {
            return None;
        }
        let index = id.checked_mul(components)? + component;
        match self {
            Self::UnsignedChar { values, .. } => values.get(index).map(|&v| f64::from(v)),
            Self::Float { values, .. } => values.get(index).map(|&v| f64::from(v)),
        }
    }

    /// Returns the tuple at `id` for a 3-component array.
    pub fn tuple3(&self, id: usize) -> Option<DVec3> {
        if self.components() != 3 {
            return None;
        }
        Some(DVec3::new(
            self.component(id, 0)?,
            self.component(id, 1)?,
            self.component(id, 2)?,
        ))
    }

    /// Returns the raw bytes of the array, for upload to the renderer.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::UnsignedChar { values, .. } => values,
            Self::Float { values, .. } => bytemuck::cast_slice(values),
        }
    }
}

/// A 2D raster with per-point data arrays, stored bottom-up.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ImageData {
    dimensions: UVec2,
    point_data: Vec<PointArray>,
}

impl ImageData {
    /// Creates an image with the given dimensions and no data arrays.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            dimensions: UVec2::new(width, height),
            point_data: Vec::new(),
        }
    }

    /// Converts an RGB image into bottom-up storage with a single color array.
    pub fn from_rgb_image(image: &RgbImage, color_array_name: &str) -> Self {
        let (width, height) = image.dimensions();
        let row_len = width as usize * 3;
        let mut values = Vec::with_capacity(row_len * height as usize);
        for row in image.as_raw().chunks_exact(row_len.max(1)).rev() {
            values.extend_from_slice(row);
        }

        Self {
            dimensions: UVec2::new(width, height),
            point_data: vec![PointArray::UnsignedChar {
                name: color_array_name.to_string(),
                components: 3,
                values,
            }],
        }
    }

    /// Converts any decoded image to RGB8 and stores it bottom-up.
    pub fn from_dynamic_image(image: &DynamicImage, color_array_name: &str) -> Self {
        match image {
            DynamicImage::ImageRgb8(rgb) => Self::from_rgb_image(rgb, color_array_name),
            other => Self::from_rgb_image(&other.to_rgb8(), color_array_name),
        }
    }

    /// Decodes an image file from disk.
    pub fn load(path: impl AsRef<Path>, color_array_name: &str) -> Result<Self> {
        let decoded = image::open(path.as_ref())?;
        log::debug!(
            "loaded {}x{} image from {}",
            decoded.width(),
            decoded.height(),
            path.as_ref().display()
        );
        Ok(Self::from_dynamic_image(&decoded, color_array_name))
    }

    /// Returns the image dimensions (width, height).
    pub fn dimensions(&self) -> UVec2 {
        self.dimensions
    }

    /// Returns the image width.
    pub fn width(&self) -> u32 {
        self.dimensions.x
    }

    /// Returns the image height.
    pub fn height(&self) -> u32 {
        self.dimensions.y
    }

    /// Returns the number of points (pixels).
    pub fn num_points(&self) -> usize {
        self.dimensions.x as usize * self.dimensions.y as usize
    }

    /// Appends a point data array.
    ///
    /// The array must hold exactly one tuple per pixel.
    pub fn add_array(&mut self, array: PointArray) -> Result<()> {
        if array.num_tuples() != self.num_points() {
            return Err(ReconstructionError::SizeMismatch {
                expected: self.num_points(),
                actual: array.num_tuples(),
            });
        }
        self.point_data.push(array);
        Ok(())
    }

    /// Returns all point data arrays in order.
    pub fn point_data(&self) -> &[PointArray] {
        &self.point_data
    }

    /// Returns the point data array at `index`.
    pub fn array(&self, index: usize) -> Option<&PointArray> {
        self.point_data.get(index)
    }

    /// Returns the first point data array with the given name.
    pub fn array_by_name(&self, name: &str) -> Option<&PointArray> {
        self.point_data.iter().find(|a| a.name() == name)
    }

    /// Returns the color array: array 0, if it is a 3-component unsigned char array.
    pub fn color_array(&self) -> Option<&PointArray> {
        self.point_data.first().filter(|a| a.is_color())
    }

    /// Returns the raw bytes of the color array.
    pub fn color_bytes(&self) -> Option<&[u8]> {
        self.color_array().map(PointArray::as_bytes)
    }

    /// Computes the point id of column `x` in stored row `row`.
    pub fn compute_point_id(&self, x: u32, row: u32) -> Option<usize> {
        if x >= self.dimensions.x || row >= self.dimensions.y {
            return None;
        }
        Some(row as usize * self.dimensions.x as usize + x as usize)
    }

    /// Converts the color array back to a top-down RGB image.
    pub fn to_rgb_image(&self) -> Option<RgbImage> {
        let bytes = self.color_bytes()?;
        let row_len = self.dimensions.x as usize * 3;
        let mut raw = Vec::with_capacity(bytes.len());
        for row in bytes.chunks_exact(row_len.max(1)).rev() {
            raw.extend_from_slice(row);
        }
        RgbImage::from_raw(self.dimensions.x, self.dimensions.y, raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn two_by_two() -> RgbImage {
        let mut img = RgbImage::new(2, 2);
        img.put_pixel(0, 0, Rgb([255, 0, 0])); // top-left red
        img.put_pixel(1, 0, Rgb([0, 255, 0])); // top-right green
        img.put_pixel(0, 1, Rgb([0, 0, 255])); // bottom-left blue
        img.put_pixel(1, 1, Rgb([255, 255, 255])); // bottom-right white
        img
    }

    #[test]
    fn test_rgb_conversion_is_bottom_up() {
        let data = ImageData::from_rgb_image(&two_by_two(), "Color");
        let color = data.color_array().unwrap();

        assert_eq!(data.dimensions(), UVec2::new(2, 2));
        assert_eq!(color.name(), "Color");
        assert_eq!(color.num_tuples(), 4);

        // Stored row 0 is the bottom row of the picture
        let id = data.compute_point_id(0, 0).unwrap();
        assert_eq!(color.tuple3(id), Some(DVec3::new(0.0, 0.0, 255.0)));
        let id = data.compute_point_id(1, 1).unwrap();
        assert_eq!(color.tuple3(id), Some(DVec3::new(0.0, 255.0, 0.0)));
    }

    #[test]
    fn test_rgb_image_round_trip() {
        let img = two_by_two();
        let data = ImageData::from_rgb_image(&img, "Color");
        assert_eq!(data.to_rgb_image().unwrap(), img);
    }

    #[test]
    fn test_gray_image_is_expanded_to_rgb() {
        let gray = image::GrayImage::from_raw(1, 1, vec![42]).unwrap();
        let data = ImageData::from_dynamic_image(&DynamicImage::ImageLuma8(gray), "Color");
        let color = data.color_array().unwrap();
        assert_eq!(color.tuple3(0), Some(DVec3::splat(42.0)));
    }

    #[test]
    fn test_color_array_must_be_first() {
        let mut data = ImageData::new(1, 1);
        data.add_array(PointArray::float("Depths", 1, vec![2.5]).unwrap())
            .unwrap();
        data.add_array(PointArray::unsigned_char("Color", 3, vec![1, 2, 3]).unwrap())
            .unwrap();

        assert!(data.color_array().is_none());
        assert!(data.color_bytes().is_none());
        assert_eq!(data.array_by_name("Color").unwrap().tuple3(0), Some(DVec3::new(1.0, 2.0, 3.0)));
    }

    #[test]
    fn test_add_array_size_mismatch() {
        let mut data = ImageData::new(2, 2);
        let err = data
            .add_array(PointArray::float("Depths", 1, vec![1.0, 2.0]).unwrap())
            .unwrap_err();
        assert!(matches!(
            err,
            ReconstructionError::SizeMismatch {
                expected: 4,
                actual: 2
            }
        ));
    }

    #[test]
    fn test_invalid_component_count() {
        assert!(matches!(
            PointArray::unsigned_char("bad", 0, vec![]),
            Err(ReconstructionError::InvalidComponents { components: 0, .. })
        ));
        assert!(matches!(
            PointArray::unsigned_char("bad", 3, vec![1, 2]),
            Err(ReconstructionError::SizeMismatch { .. })
        ));
    }

    #[test]
    fn test_point_id_bounds() {
        let data = ImageData::new(3, 2);
        assert_eq!(data.compute_point_id(2, 1), Some(5));
        assert_eq!(data.compute_point_id(3, 0), None);
        assert_eq!(data.compute_point_id(0, 2), None);
    }

    #[test]
    fn test_float_array_bytes() {
        let array = PointArray::float("Depths", 1, vec![1.0, 2.0]).unwrap();
        assert_eq!(array.as_bytes().len(), 8);
        assert_eq!(array.component(1, 0), Some(2.0));
        assert_eq!(array.tuple3(0), None);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = ImageData::load(dir.path().join("missing.png"), "Color");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");
        two_by_two().save(&path).unwrap();

        let data = ImageData::load(&path, "Color").unwrap();
        assert_eq!(data.to_rgb_image().unwrap(), two_by_two());
    }
}
