//! Pixel sampling along digital lines and cut geometry.

use cutkit_canvas::Shape;
use cutkit_core::Point;
use cutkit_profile::{sample_shape, PixelSource, RasterSource};

/// 10x10 ramp where each pixel holds its own x coordinate.
fn x_ramp() -> RasterSource {
    let data = (0..100).map(|i| (i % 10) as f64).collect();
    RasterSource::new(10, 10, data).unwrap()
}

#[test]
fn test_horizontal_segment_samples_every_pixel() {
    let source = x_ramp();
    let values = source.pixels_on_line(0, 0, 4, 0);
    assert_eq!(values, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
}

#[test]
fn test_reversed_segment_samples_in_order() {
    let source = x_ramp();
    let values = source.pixels_on_line(4, 0, 0, 0);
    assert_eq!(values, vec![4.0, 3.0, 2.0, 1.0, 0.0]);
}

#[test]
fn test_diagonal_segment_is_inclusive() {
    let source = x_ramp();
    let values = source.pixels_on_line(0, 0, 3, 3);
    assert_eq!(values, vec![0.0, 1.0, 2.0, 3.0]);
}

#[test]
fn test_single_point_segment() {
    let source = x_ramp();
    let values = source.pixels_on_line(2, 7, 2, 7);
    assert_eq!(values, vec![2.0]);
}

#[test]
fn test_out_of_bounds_pixels_read_zero() {
    let source = x_ramp();
    let values = source.pixels_on_line(8, 0, 12, 0);
    assert_eq!(values, vec![8.0, 9.0, 0.0, 0.0, 0.0]);
}

#[test]
fn test_buffer_length_mismatch_is_rejected() {
    assert!(RasterSource::new(10, 10, vec![0.0; 99]).is_err());
    assert!(RasterSource::new(10, 10, vec![0.0; 100]).is_ok());
}

#[test]
fn test_from_gray_image() {
    let image = image::GrayImage::from_fn(4, 2, |x, y| image::Luma([(x + 10 * y) as u8]));
    let source = RasterSource::from_gray_image(&image);
    assert_eq!(source.size(), (4, 2));
    assert_eq!(source.value_at(3, 1), 13.0);
    assert_eq!(source.pixels_on_line(0, 1, 3, 1), vec![10.0, 11.0, 12.0, 13.0]);
}

#[test]
fn test_cursor_position_round_trips() {
    let mut source = x_ramp();
    source.set_cursor(3.5, 7.25);
    assert_eq!(source.last_cursor_pos(), (3.5, 7.25));
}

#[test]
fn test_line_shape_profile() {
    let source = x_ramp();
    let shape = Shape::line(0.0, 2.0, 4.0, 2.0);
    let values = sample_shape(&shape, &source).unwrap();
    assert_eq!(values.len(), 5);
    assert_eq!(values, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
}

#[test]
fn test_path_profile_counts_shared_vertex_once() {
    let source = x_ramp();
    let shape = Shape::path(vec![
        Point::new(0.0, 0.0),
        Point::new(4.0, 0.0),
        Point::new(8.0, 0.0),
    ]);
    let values = sample_shape(&shape, &source).unwrap();
    // two abutting 5-sample segments share one pixel
    assert_eq!(values.len(), 9);
    assert_eq!(
        values,
        vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]
    );
}

#[test]
fn test_bent_path_profile() {
    let source = x_ramp();
    let shape = Shape::path(vec![
        Point::new(0.0, 0.0),
        Point::new(2.0, 0.0),
        Point::new(2.0, 2.0),
    ]);
    let values = sample_shape(&shape, &source).unwrap();
    // 3 samples across, then 2 more going down
    assert_eq!(values, vec![0.0, 1.0, 2.0, 2.0, 2.0]);
}

#[test]
fn test_degenerate_path_is_an_error() {
    let source = x_ramp();
    let shape = Shape::path(vec![Point::new(1.0, 1.0)]);
    let err = sample_shape(&shape, &source).unwrap_err();
    assert!(err.to_string().contains("vertices"));
}

#[test]
fn test_text_shape_cannot_be_sampled() {
    let source = x_ramp();
    let shape = Shape::text(1.0, 1.0, "label");
    let err = sample_shape(&shape, &source).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Cannot sample pixels along shape kind 'text'"
    );
}
