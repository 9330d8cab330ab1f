// SPDX-License-Identifier: MPL-2.0
//! Image processing service: crop, then filter.
//!
//! The processor keeps two single-entry caches. The crop cache is keyed by
//! the [`CropInfo`]; the filter cache is keyed by the filter *and* the crop
//! that produced its input, so a crop change never serves a stale filter
//! result. Each cache is checked and filled under its own lock.
//!
//! One processor serves one source image. Call
//! [`ProcessImage::clear_cache`] before feeding it a different source.

use super::{crop, filter::FilterKernels};
use crate::domain::editing::{CropInfo, EditState, FilterType};
use crate::domain::error::{CropError, FilterError, ProcessingError};
use image_rs::DynamicImage;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Pixel operations used by [`ImageProcessor`].
pub trait Kernels: Send + Sync {
    fn crop(&self, image: &DynamicImage, info: &CropInfo) -> Result<DynamicImage, CropError>;

    fn filter(&self, image: &DynamicImage, filter: &FilterType)
        -> Result<DynamicImage, FilterError>;

    /// Whether [`Kernels::filter`] can run `filter` at all.
    fn check_filter(&self, _filter: &FilterType) -> Result<(), FilterError> {
        Ok(())
    }
}

/// CPU kernels backed by `image` and `tiny_skia`.
#[derive(Debug, Clone, Default)]
pub struct RasterKernels {
    filters: FilterKernels,
}

impl RasterKernels {
    #[must_use]
    pub fn with_filters(filters: FilterKernels) -> Self {
        Self { filters }
    }
}

impl Kernels for RasterKernels {
    fn crop(&self, image: &DynamicImage, info: &CropInfo) -> Result<DynamicImage, CropError> {
        crop::crop(image, info)
    }

    fn filter(
        &self,
        image: &DynamicImage,
        filter: &FilterType,
    ) -> Result<DynamicImage, FilterError> {
        self.filters.apply(image, filter)
    }

    fn check_filter(&self, filter: &FilterType) -> Result<(), FilterError> {
        self.filters.matrix_for(filter).map(|_| ())
    }
}

/// Produces the displayable image for an edit state.
pub trait ProcessImage: Send + Sync {
    /// Applies the state's crop, then its filter, to `source`.
    ///
    /// With neither set, `source` itself is returned.
    fn process_image(
        &self,
        source: &Arc<DynamicImage>,
        state: &EditState,
    ) -> Result<Arc<DynamicImage>, ProcessingError>;

    /// Forgets cached results.
    fn clear_cache(&self);

    /// Rejects filters that could never render, before any work is queued.
    fn check_filter(&self, _filter: &FilterType) -> Result<(), FilterError> {
        Ok(())
    }
}

#[derive(Debug)]
struct CropEntry {
    key: CropInfo,
    image: Arc<DynamicImage>,
}

#[derive(Debug)]
struct FilterEntry {
    filter: FilterType,
    crop: Option<CropInfo>,
    image: Arc<DynamicImage>,
}

/// Crop-then-filter pipeline with one-entry caches.
#[derive(Debug, Default)]
pub struct ImageProcessor<K = RasterKernels> {
    kernels: K,
    crop_cache: Mutex<Option<CropEntry>>,
    filter_cache: Mutex<Option<FilterEntry>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<K: Kernels> ImageProcessor<K> {
    #[must_use]
    pub fn new(kernels: K) -> Self {
        Self {
            kernels,
            crop_cache: Mutex::new(None),
            filter_cache: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn kernels(&self) -> &K {
        &self.kernels
    }

    fn cropped(
        &self,
        source: &Arc<DynamicImage>,
        info: Option<&CropInfo>,
    ) -> Result<Arc<DynamicImage>, CropError> {
        let Some(info) = info else {
            return Ok(Arc::clone(source));
        };

        let mut cache = lock(&self.crop_cache);
        if let Some(entry) = cache.as_ref().filter(|entry| entry.key == *info) {
            log::debug!("crop cache hit for {:?}", info.mode);
            return Ok(Arc::clone(&entry.image));
        }

        log::debug!("crop cache miss for {:?}", info.mode);
        let image = Arc::new(self.kernels.crop(source, info)?);
        *cache = Some(CropEntry {
            key: *info,
            image: Arc::clone(&image),
        });
        Ok(image)
    }

    fn filtered(
        &self,
        cropped: Arc<DynamicImage>,
        filter: Option<&FilterType>,
        crop: Option<&CropInfo>,
    ) -> Result<Arc<DynamicImage>, FilterError> {
        let Some(filter) = filter else {
            return Ok(cropped);
        };

        let mut cache = lock(&self.filter_cache);
        if let Some(entry) = cache
            .as_ref()
            .filter(|entry| entry.filter == *filter && entry.crop.as_ref() == crop)
        {
            log::debug!("filter cache hit for {}", filter.display_name());
            return Ok(Arc::clone(&entry.image));
        }

        log::debug!("filter cache miss for {}", filter.display_name());
        let image = Arc::new(self.kernels.filter(&cropped, filter)?);
        *cache = Some(FilterEntry {
            filter: *filter,
            crop: crop.copied(),
            image: Arc::clone(&image),
        });
        Ok(image)
    }
}

impl<K: Kernels> ProcessImage for ImageProcessor<K> {
    fn process_image(
        &self,
        source: &Arc<DynamicImage>,
        state: &EditState,
    ) -> Result<Arc<DynamicImage>, ProcessingError> {
        let crop = state.crop.as_ref();
        let cropped = self.cropped(source, crop)?;
        Ok(self.filtered(cropped, state.filter.as_ref(), crop)?)
    }

    fn clear_cache(&self) {
        *lock(&self.crop_cache) = None;
        *lock(&self.filter_cache) = None;
    }

    fn check_filter(&self, filter: &FilterType) -> Result<(), FilterError> {
        self.kernels.check_filter(filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::editing::CropMode;
    use crate::domain::geometry::Rect;
    use image_rs::{ImageBuffer, Rgba};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts kernel invocations and forwards to the real kernels.
    #[derive(Default)]
    struct CountingKernels {
        inner: RasterKernels,
        crops: AtomicUsize,
        filters: AtomicUsize,
    }

    impl CountingKernels {
        fn counts(&self) -> (usize, usize) {
            (
                self.crops.load(Ordering::SeqCst),
                self.filters.load(Ordering::SeqCst),
            )
        }
    }

    impl Kernels for CountingKernels {
        fn crop(&self, image: &DynamicImage, info: &CropInfo) -> Result<DynamicImage, CropError> {
            self.crops.fetch_add(1, Ordering::SeqCst);
            self.inner.crop(image, info)
        }

        fn filter(
            &self,
            image: &DynamicImage,
            filter: &FilterType,
        ) -> Result<DynamicImage, FilterError> {
            self.filters.fetch_add(1, Ordering::SeqCst);
            self.inner.filter(image, filter)
        }
    }

    fn source() -> Arc<DynamicImage> {
        Arc::new(DynamicImage::ImageRgba8(ImageBuffer::from_pixel(
            64,
            48,
            Rgba([150, 90, 60, 255]),
        )))
    }

    fn square(x: f32) -> CropInfo {
        CropInfo::new(CropMode::Square, Rect::new(x, 0.0, 32.0, 32.0))
    }

    fn state(crop: Option<CropInfo>, filter: Option<FilterType>) -> EditState {
        EditState {
            crop,
            filter,
            ..EditState::default()
        }
    }

    #[test]
    fn untouched_state_returns_source() {
        let processor = ImageProcessor::new(CountingKernels::default());
        let source = source();
        let out = processor
            .process_image(&source, &EditState::default())
            .expect("process");
        assert!(Arc::ptr_eq(&out, &source));
        assert_eq!(processor.kernels().counts(), (0, 0));
    }

    #[test]
    fn unchanged_state_hits_both_caches() {
        let processor = ImageProcessor::new(CountingKernels::default());
        let source = source();
        let edits = state(Some(square(0.0)), Some(FilterType::Noir));

        let first = processor.process_image(&source, &edits).expect("first");
        let second = processor.process_image(&source, &edits).expect("second");

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(*first, *second);
        assert_eq!(processor.kernels().counts(), (1, 1));
    }

    #[test]
    fn filter_change_reuses_cropped_image() {
        let processor = ImageProcessor::new(CountingKernels::default());
        let source = source();
        processor
            .process_image(&source, &state(Some(square(0.0)), Some(FilterType::Noir)))
            .expect("noir");
        processor
            .process_image(&source, &state(Some(square(0.0)), Some(FilterType::Chrome)))
            .expect("chrome");
        assert_eq!(processor.kernels().counts(), (1, 2));
    }

    #[test]
    fn crop_change_invalidates_filter_result() {
        let processor = ImageProcessor::new(CountingKernels::default());
        let source = source();
        processor
            .process_image(&source, &state(Some(square(0.0)), Some(FilterType::Noir)))
            .expect("first crop");
        processor
            .process_image(&source, &state(Some(square(8.0)), Some(FilterType::Noir)))
            .expect("second crop");
        assert_eq!(processor.kernels().counts(), (2, 2));

        // Removing the crop also changes the filter key.
        processor
            .process_image(&source, &state(None, Some(FilterType::Noir)))
            .expect("uncropped");
        assert_eq!(processor.kernels().counts(), (2, 3));
    }

    #[test]
    fn crop_without_filter_is_returned_as_is() {
        let processor = ImageProcessor::new(CountingKernels::default());
        let out = processor
            .process_image(&source(), &state(Some(square(0.0)), None))
            .expect("crop");
        assert_eq!((out.width(), out.height()), (32, 32));
        assert_eq!(processor.kernels().counts(), (1, 0));
    }

    #[test]
    fn failures_are_typed_and_not_cached() {
        let processor = ImageProcessor::new(CountingKernels::default());
        let source = source();
        let bad = state(None, Some(FilterType::Sepia(2.0)));

        let err = processor.process_image(&source, &bad).unwrap_err();
        assert!(matches!(
            err,
            ProcessingError::Filter(FilterError::InvalidIntensity(_))
        ));
        processor.process_image(&source, &bad).unwrap_err();
        assert_eq!(processor.kernels().counts(), (0, 2));

        let outside = CropInfo::new(CropMode::Circle, Rect::new(500.0, 0.0, 10.0, 10.0));
        let err = processor
            .process_image(&source, &state(Some(outside), None))
            .unwrap_err();
        assert!(matches!(err, ProcessingError::Crop(CropError::OutOfBounds { .. })));
    }

    #[test]
    fn clear_cache_forces_recompute() {
        let processor = ImageProcessor::new(CountingKernels::default());
        let source = source();
        let edits = state(Some(square(0.0)), Some(FilterType::Noir));
        processor.process_image(&source, &edits).expect("first");
        processor.clear_cache();
        processor.process_image(&source, &edits).expect("second");
        assert_eq!(processor.kernels().counts(), (2, 2));
    }

    #[test]
    fn processor_is_shareable_across_threads() {
        let processor = Arc::new(ImageProcessor::<RasterKernels>::default());
        let source = source();
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let processor = Arc::clone(&processor);
                let source = Arc::clone(&source);
                std::thread::spawn(move || {
                    #[allow(clippy::cast_precision_loss)]
                    let edits = state(Some(square(i as f32 * 4.0)), Some(FilterType::Noir));
                    processor.process_image(&source, &edits).map(|img| img.width())
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().expect("thread").expect("process"), 32);
        }
    }
}
