// SPDX-License-Identifier: MPL-2.0
use image_rs::{DynamicImage, ImageBuffer, Rgba};
use photo_session::config::{self, Config, CropConfig, HistoryConfig};
use photo_session::domain::editing::{Color, CropMode, Ink, Stroke, StrokeLayer};
use photo_session::domain::geometry::{Offset, Rect, Size};
use photo_session::editor::{CropCompletion, CropFrame, Cropper, Services};
use photo_session::media::{self, ExportService, ImageProcessor, ProcessImage, RasterKernels};
use photo_session::{CropInfo, EditMode, EditState, Event, FilterType, Message, Session};
use std::sync::Arc;
use tempfile::tempdir;
use tokio::runtime::Handle;

/// Crops the centered square a viewport of 300x300 would show at rest.
struct FrameCropper;

impl Cropper for FrameCropper {
    fn present(&mut self, image: Arc<DynamicImage>, completion: CropCompletion) {
        let frame = CropFrame::new(
            Size::from_pixels(image.width(), image.height()),
            Size::new(300.0, 300.0),
            CropMode::Square,
            &CropConfig::default(),
        );
        match frame.crop_info() {
            Some(info) => completion.complete(info),
            None => completion.cancel(),
        }
    }
}

/// Left half red, right half blue.
fn split_image(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgba8(ImageBuffer::from_fn(width, height, |x, _| {
        if x < width / 2 {
            Rgba([255u8, 0, 0, 255])
        } else {
            Rgba([0, 0, 255, 255])
        }
    }))
}

#[tokio::test]
async fn session_edits_flow_into_export() {
    let config = Config::default();
    let mut session = Session::from_config(
        split_image(400, 200),
        &config,
        Box::new(FrameCropper),
        Handle::current(),
    );

    assert_eq!(
        session.update(Message::SetEditMode(Some(EditMode::Crop))),
        Event::CropRequested
    );
    assert!(session.pump());
    assert_eq!(session.edit_mode(), None);
    assert_eq!(session.history().len(), 2);
    let crop = session.working_state().crop.expect("crop committed");
    assert!((crop.rect.x - 100.0).abs() < 1e-3 && crop.rect.y.abs() < 1e-3);
    assert!((crop.rect.width - 200.0).abs() < 1e-3);

    session.update(Message::SetEditMode(Some(EditMode::Filters)));
    session.update(Message::SetFilter(Some(FilterType::Noir)));
    session.update(Message::SetEditMode(None));
    assert_eq!(session.history().len(), 3);

    session.wait_for_render().await;
    let processed = session.processed_image().to_rgba8();
    assert_eq!(processed.dimensions(), (200, 200));
    let left = processed.get_pixel(10, 100).0;
    let right = processed.get_pixel(190, 100).0;
    assert_eq!(left[0], left[1]);
    assert_eq!(left[1], left[2]);
    assert_ne!(left[0], right[0]);

    let flat = session.export(Size::new(100.0, 100.0)).expect("export");
    assert_eq!((flat.width(), flat.height()), (100, 100));

    assert!(session.undo());
    session.wait_for_render().await;
    assert_eq!(session.working_state().filter, None);
    assert!(session.undo());
    session.wait_for_render().await;
    assert_eq!(session.processed_image().width(), 400);
}

#[tokio::test]
async fn session_uses_configured_history_limit() {
    let config = Config {
        history: HistoryConfig {
            max_states: Some(4),
        },
        ..Config::default()
    };
    let services = Services::from_config(&config, Box::new(FrameCropper));
    let mut session = Session::new(split_image(20, 20), services, Handle::current());
    for i in 1..=10u8 {
        session.set_position(Offset::new(f32::from(i), 0.0));
        session.commit_state();
        assert!(session.history().len() <= 4);
    }
    assert_eq!(session.working_state().position, Offset::new(10.0, 0.0));
}

#[test]
fn export_pivots_about_displaced_center() {
    // 40x40 marker image: red 8x8 block in the middle.
    let image = DynamicImage::ImageRgba8(ImageBuffer::from_fn(40, 40, |x, y| {
        if (16..24).contains(&x) && (16..24).contains(&y) {
            Rgba([255u8, 0, 0, 255])
        } else {
            Rgba([0, 0, 0, 0])
        }
    }));
    let state = EditState {
        position: Offset::new(10.0, 20.0),
        scale: 2.0,
        ..EditState::default()
    };
    let exporter = ExportService::new(Config::default().text.style());
    let out = exporter
        .export_canvas(Size::new(100.0, 100.0), &StrokeLayer::new(), &image, &state)
        .expect("export")
        .to_rgba8();

    let red = |x: u32, y: u32| {
        let p = out.get_pixel(x, y).0;
        p[0] > 240 && p[1] < 15 && p[2] < 15
    };
    // Marker centered at (60, 70), 40 units wide after fit and scale.
    assert!(red(60, 70));
    assert!(red(42, 52) && red(77, 87));
    assert!(!red(37, 70) && !red(83, 70));
    assert!(!red(60, 47) && !red(60, 93));
}

#[test]
fn config_round_trip_through_files() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("nested").join("settings.toml");

    let mut settings = Config::default();
    settings.history.max_states = Some(42);
    settings.text.default_color = Some(Color::from_rgba(1, 2, 3, 255));
    config::save_to_path(&settings, &path).expect("save");

    let loaded = config::load_from_path(&path).expect("load");
    assert_eq!(loaded.history.max_states(), 42);
    assert_eq!(loaded.text.default_color(), Color::from_rgba(1, 2, 3, 255));

    let (from_dir, warning) = config::load_with_override(Some(dir.path().join("nested")));
    assert!(warning.is_none());
    assert_eq!(from_dir.history.max_states(), 42);
}

#[test]
fn edit_file_pipeline_writes_flattened_png() {
    let dir = tempdir().expect("tempdir");
    let input = dir.path().join("in.png");
    let output = dir.path().join("out").join("flat.png");
    media::save_image(&split_image(60, 40), &input).expect("save input");

    let mut strokes = StrokeLayer::new();
    strokes.push(
        Stroke::new(Ink::Pen, Color::BLACK, 2.0)
            .with_points([Offset::new(0.0, 1.0), Offset::new(40.0, 1.0)]),
    );
    let state = EditState {
        crop: Some(CropInfo::new(CropMode::Square, Rect::new(10.0, 0.0, 40.0, 40.0))),
        filter: Some(FilterType::Sepia(1.0)),
        drawing: Some(strokes),
        ..EditState::default()
    };
    let toml_text = toml::to_string(&state).expect("serialize");
    let state: EditState = toml::from_str(&toml_text).expect("parse");

    let source = Arc::new(media::load_image(&input).expect("load"));
    let processor = ImageProcessor::new(RasterKernels::default());
    let processed = processor.process_image(&source, &state).expect("process");
    assert_eq!((processed.width(), processed.height()), (40, 40));

    let exporter = ExportService::new(Config::default().text.style());
    let flat = exporter
        .export_canvas(
            Size::new(40.0, 40.0),
            state.drawing.as_ref().expect("drawing"),
            &processed,
            &state,
        )
        .expect("export");
    media::save_image(&flat, &output).expect("save output");

    let written = media::load_image(&output).expect("reload").to_rgba8();
    assert_eq!(written.dimensions(), (40, 40));
    assert_eq!(written.get_pixel(20, 1).0, [0, 0, 0, 255]);
    let sepia = written.get_pixel(5, 20).0;
    assert!(sepia[0] > sepia[2], "sepia should warm the red half: {sepia:?}");
}
