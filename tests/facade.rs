//! End-to-end smoke test through the facade re-exports: configuration from
//! disk, a cut over a real image, and the composited output.

use cutkit::{
    Config, CutKind, CutsEngine, ImageView, RasterSource, RecordingPlot, CUTS_LAYER,
};
use image::RgbImage;

#[test]
fn test_cut_pipeline_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[cuts]\nlabel_cuts = false\n").unwrap();
    let config = Config::load_from_file(&path).unwrap();
    assert!(!config.cuts.label_cuts);

    let image = RgbImage::from_fn(64, 48, |_, y| image::Rgb([y as u8, y as u8, y as u8]));
    let gray = image::GrayImage::from_fn(64, 48, |_, y| image::Luma([y as u8]));
    let mut view = ImageView::new(image).unwrap();
    let mut plot = RecordingPlot::new();
    let mut engine = CutsEngine::new(&config.cuts);
    engine.attach(&mut view, &mut plot).unwrap();

    let mut source = RasterSource::from_gray_image(&gray);
    source.set_cursor(30.0, 12.0);
    let tag = engine
        .cut_at(CutKind::Horizontal, &mut view, &source, &mut plot)
        .unwrap();

    assert_eq!(tag, "cuts0");
    assert!(view.layer_mut(CUTS_LAYER).unwrap().contains_tag(&tag));
    let series = &plot.series()[0];
    assert_eq!(series.values.len(), 64);
    assert!(series.values.iter().all(|&v| v == 12.0));

    // composited output matches the view size
    view.flush();
    let out = view.to_rgb_image();
    assert_eq!(out.dimensions(), (64, 48));
}

#[test]
fn test_version_constants_are_set() {
    assert!(!cutkit::VERSION.is_empty());
    assert!(!cutkit::BUILD_DATE.is_empty());
}
