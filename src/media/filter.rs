// SPDX-License-Identifier: MPL-2.0
//! Colour-matrix filter kernels.
//!
//! Every filter in the catalogue is an affine transform of the RGB channels.
//! Kernels are looked up by name so a filter whose kernel is missing fails
//! with [`FilterError::KernelUnavailable`] instead of silently passing the
//! image through. Alpha is never modified.

use crate::domain::editing::{intensity_bounds, FilterType};
use crate::domain::error::FilterError;
use image_rs::DynamicImage;

// =============================================================================
// ColorMatrix
// =============================================================================

/// Affine RGB transform on normalized `[0, 1]` channel values.
///
/// Each row is `[r, g, b, offset]` for one output channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorMatrix([[f32; 4]; 3]);

/// Rec. 601 luma weights.
const LUMA: [f32; 3] = [0.299, 0.587, 0.114];

impl ColorMatrix {
    pub const IDENTITY: Self = Self([
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
    ]);

    #[must_use]
    pub const fn from_rows(rows: [[f32; 4]; 3]) -> Self {
        Self(rows)
    }

    #[must_use]
    pub fn grayscale() -> Self {
        let row = [LUMA[0], LUMA[1], LUMA[2], 0.0];
        Self([row, row, row])
    }

    /// Classic sepia tone.
    #[must_use]
    pub fn sepia() -> Self {
        Self([
            [0.393, 0.769, 0.189, 0.0],
            [0.349, 0.686, 0.168, 0.0],
            [0.272, 0.534, 0.131, 0.0],
        ])
    }

    /// `0` is grayscale, `1` is unchanged, above `1` boosts colour.
    #[must_use]
    pub fn saturation(amount: f32) -> Self {
        Self::grayscale().mix(Self::IDENTITY, amount)
    }

    /// Scales channel distance from mid-gray by `amount`.
    #[must_use]
    pub fn contrast(amount: f32) -> Self {
        let offset = 0.5 * (1.0 - amount);
        Self([
            [amount, 0.0, 0.0, offset],
            [0.0, amount, 0.0, offset],
            [0.0, 0.0, amount, offset],
        ])
    }

    #[must_use]
    pub fn brightness(offset: f32) -> Self {
        Self([
            [1.0, 0.0, 0.0, offset],
            [0.0, 1.0, 0.0, offset],
            [0.0, 0.0, 1.0, offset],
        ])
    }

    /// Per-channel gain.
    #[must_use]
    pub fn tint(r: f32, g: f32, b: f32) -> Self {
        Self([
            [r, 0.0, 0.0, 0.0],
            [0.0, g, 0.0, 0.0],
            [0.0, 0.0, b, 0.0],
        ])
    }

    /// Composition: applies `self` first, then `next`.
    #[must_use]
    pub fn then(self, next: ColorMatrix) -> Self {
        let mut out = [[0.0; 4]; 3];
        for (i, row) in out.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                let mut sum: f32 = (0..3).map(|k| next.0[i][k] * self.0[k][j]).sum();
                if j == 3 {
                    sum += next.0[i][3];
                }
                *cell = sum;
            }
        }
        Self(out)
    }

    /// Linear blend of coefficients: `t = 0` gives `self`, `t = 1` gives `other`.
    #[must_use]
    pub fn mix(self, other: ColorMatrix, t: f32) -> Self {
        let mut out = self.0;
        for (row, other_row) in out.iter_mut().zip(other.0.iter()) {
            for (cell, other_cell) in row.iter_mut().zip(other_row.iter()) {
                *cell += (other_cell - *cell) * t;
            }
        }
        Self(out)
    }

    #[must_use]
    pub fn apply(&self, rgb: [f32; 3]) -> [f32; 3] {
        let m = &self.0;
        let channel = |row: &[f32; 4]| {
            (row[0] * rgb[0] + row[1] * rgb[1] + row[2] * rgb[2] + row[3]).clamp(0.0, 1.0)
        };
        [channel(&m[0]), channel(&m[1]), channel(&m[2])]
    }

    /// Applies the matrix to every pixel of `image`, returning an RGBA8 copy.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn apply_to_image(&self, image: &DynamicImage) -> DynamicImage {
        let mut rgba = image.to_rgba8();
        for pixel in rgba.pixels_mut() {
            let [r, g, b, a] = pixel.0;
            let input = [
                f32::from(r) / 255.0,
                f32::from(g) / 255.0,
                f32::from(b) / 255.0,
            ];
            let [r, g, b] = self.apply(input).map(|c| (c * 255.0).round() as u8);
            pixel.0 = [r, g, b, a];
        }
        DynamicImage::ImageRgba8(rgba)
    }
}

// =============================================================================
// Kernel table
// =============================================================================

/// Builds a colour matrix from an optional intensity.
pub type KernelFn = fn(Option<f32>) -> ColorMatrix;

fn sepia_tone(intensity: Option<f32>) -> ColorMatrix {
    let intensity = intensity.unwrap_or(intensity_bounds::MAX);
    ColorMatrix::IDENTITY.mix(ColorMatrix::sepia(), intensity)
}

fn noir(_: Option<f32>) -> ColorMatrix {
    ColorMatrix::grayscale()
        .then(ColorMatrix::contrast(1.35))
        .then(ColorMatrix::brightness(-0.03))
}

fn transfer(_: Option<f32>) -> ColorMatrix {
    ColorMatrix::saturation(0.75)
        .then(ColorMatrix::tint(1.08, 1.0, 0.86))
        .then(ColorMatrix::contrast(0.92))
        .then(ColorMatrix::brightness(0.04))
}

fn instant_film(_: Option<f32>) -> ColorMatrix {
    ColorMatrix::saturation(0.8)
        .then(ColorMatrix::tint(1.06, 1.02, 0.9))
        .then(ColorMatrix::contrast(0.85))
        .then(ColorMatrix::brightness(0.06))
}

fn chrome(_: Option<f32>) -> ColorMatrix {
    ColorMatrix::saturation(1.3).then(ColorMatrix::contrast(1.12))
}

fn process(_: Option<f32>) -> ColorMatrix {
    ColorMatrix::tint(0.92, 1.0, 1.08)
        .then(ColorMatrix::contrast(1.1))
        .then(ColorMatrix::saturation(0.9))
}

/// Named colour kernels.
#[derive(Debug, Clone)]
pub struct FilterKernels {
    table: Vec<(&'static str, KernelFn)>,
}

impl FilterKernels {
    /// A table with every kernel the filter catalogue refers to.
    #[must_use]
    pub fn standard() -> Self {
        let mut kernels = Self::empty();
        kernels.register("sepia-tone", sepia_tone);
        kernels.register("photo-effect-noir", noir);
        kernels.register("photo-effect-transfer", transfer);
        kernels.register("photo-effect-instant", instant_film);
        kernels.register("photo-effect-chrome", chrome);
        kernels.register("photo-effect-process", process);
        kernels
    }

    #[must_use]
    pub fn empty() -> Self {
        Self { table: Vec::new() }
    }

    /// Adds or replaces the kernel registered under `name`.
    pub fn register(&mut self, name: &'static str, kernel: KernelFn) {
        match self.table.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = kernel,
            None => self.table.push((name, kernel)),
        }
    }

    /// Removes a kernel; filters that need it will fail.
    pub fn unregister(&mut self, name: &str) {
        self.table.retain(|(n, _)| *n != name);
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.table.iter().any(|(n, _)| *n == name)
    }

    /// The matrix `filter` resolves to.
    pub fn matrix_for(&self, filter: &FilterType) -> Result<ColorMatrix, FilterError> {
        let intensity = filter.intensity();
        if let Some(value) = intensity {
            if !(intensity_bounds::MIN..=intensity_bounds::MAX).contains(&value) {
                return Err(FilterError::InvalidIntensity(value));
            }
        }
        let name = filter.kernel_name();
        let (_, kernel) = self
            .table
            .iter()
            .find(|(n, _)| *n == name)
            .ok_or(FilterError::KernelUnavailable(name))?;
        Ok(kernel(intensity))
    }

    /// Applies `filter` to `image`.
    pub fn apply(&self, image: &DynamicImage, filter: &FilterType) -> Result<DynamicImage, FilterError> {
        let matrix = self.matrix_for(filter)?;
        if image.width() == 0 || image.height() == 0 {
            return Err(FilterError::EmptyImage);
        }
        Ok(matrix.apply_to_image(image))
    }
}

impl Default for FilterKernels {
    fn default() -> Self {
        Self::standard()
    }
}
