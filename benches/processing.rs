// SPDX-License-Identifier: MPL-2.0
use criterion::{criterion_group, criterion_main, Criterion};
use image_rs::{DynamicImage, ImageBuffer, Rgba};
use photo_session::domain::editing::{CropInfo, CropMode, EditState, FilterType, StrokeLayer};
use photo_session::domain::geometry::{Offset, Rect, Size};
use photo_session::media::{ExportService, ImageProcessor, ProcessImage, RasterKernels};
use photo_session::config::Config;
use std::hint::black_box;
use std::sync::Arc;

fn gradient(width: u32, height: u32) -> Arc<DynamicImage> {
    Arc::new(DynamicImage::ImageRgba8(ImageBuffer::from_fn(
        width,
        height,
        |x, y| Rgba([(x % 256) as u8, (y % 256) as u8, 128, 255]),
    )))
}

fn state(mode: CropMode, filter: FilterType) -> EditState {
    EditState {
        crop: Some(CropInfo::new(mode, Rect::new(100.0, 100.0, 800.0, 600.0))),
        filter: Some(filter),
        ..EditState::default()
    }
}

fn processing_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("processing");
    let source = gradient(1024, 768);

    group.bench_function("square_crop_sepia_uncached", |b| {
        let processor = ImageProcessor::new(RasterKernels::default());
        let edits = state(CropMode::Square, FilterType::Sepia(0.5));
        b.iter(|| {
            processor.clear_cache();
            black_box(processor.process_image(&source, &edits).ok());
        });
    });

    group.bench_function("ellipse_crop_noir_uncached", |b| {
        let processor = ImageProcessor::new(RasterKernels::default());
        let edits = state(CropMode::Circle, FilterType::Noir);
        b.iter(|| {
            processor.clear_cache();
            black_box(processor.process_image(&source, &edits).ok());
        });
    });

    group.bench_function("cached_lookup", |b| {
        let processor = ImageProcessor::new(RasterKernels::default());
        let edits = state(CropMode::Square, FilterType::Chrome);
        let _ = processor.process_image(&source, &edits);
        b.iter(|| black_box(processor.process_image(&source, &edits).ok()));
    });

    group.finish();
}

fn export_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("export");
    let image = gradient(800, 600);
    let exporter = ExportService::new(Config::default().text.style());
    let edits = EditState {
        position: Offset::new(12.0, -8.0),
        scale: 1.3,
        ..EditState::default()
    };
    let strokes = StrokeLayer::new();

    group.bench_function("flatten_1080p", |b| {
        b.iter(|| {
            black_box(
                exporter
                    .export_canvas(Size::new(1920.0, 1080.0), &strokes, &image, &edits)
                    .ok(),
            );
        });
    });

    group.finish();
}

criterion_group!(benches, processing_benchmark, export_benchmark);
criterion_main!(benches);
