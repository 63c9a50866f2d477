//! Rendering pipeline behavior observed through the recording backend:
//! style derivation, curve flattening, ellipse construction, and label
//! anchoring.

use cutkit_canvas::{
    Canvas, DrawOp, LineStyle, RecordingBackend, RenderContext, Shape, ellipse_bezier_points,
    flatten_curve_path,
};
use cutkit_core::{Color, Point};

fn painted_ops(canvas: &Canvas) -> Vec<DrawOp> {
    let mut backend = RecordingBackend::new();
    let mut ctx = RenderContext::new(&mut backend);
    canvas.paint(&mut ctx);
    backend.ops().to_vec()
}

#[test]
fn test_line_style_reaches_backend() {
    let mut canvas = Canvas::new();
    canvas.add_tagged(
        "l",
        Shape::line(1.0, 2.0, 3.0, 4.0)
            .with_color(Color::ORANGE)
            .with_line_width(2.0)
            .with_line_style(LineStyle::Dash)
            .with_show_cap(false),
    );

    let ops = painted_ops(&canvas);
    assert_eq!(ops.len(), 1);
    let DrawOp::Line { from, to, pen } = &ops[0] else {
        panic!("expected a line, got {:?}", ops[0]);
    };
    assert_eq!((from.x, from.y), (1.0, 2.0));
    assert_eq!((to.x, to.y), (3.0, 4.0));
    assert_eq!(pen.color, Color::ORANGE);
    assert_eq!(pen.width, 2.0);
    assert_eq!(pen.style, LineStyle::Dash);
}

#[test]
fn test_caps_add_vertex_circles() {
    let mut canvas = Canvas::new();
    canvas.add_tagged("l", Shape::line(0.0, 0.0, 10.0, 0.0));

    let ops = painted_ops(&canvas);
    // one line plus a cap circle per endpoint
    assert_eq!(ops.len(), 3);
    let circles = ops
        .iter()
        .filter(|op| matches!(op, DrawOp::Circle { .. }))
        .count();
    assert_eq!(circles, 2);
}

#[test]
fn test_filled_path_paints_polygon() {
    let mut canvas = Canvas::new();
    let path = Shape::path(vec![
        Point::new(0.0, 0.0),
        Point::new(10.0, 0.0),
        Point::new(10.0, 10.0),
    ])
    .with_fill(Color::VIOLET)
    .with_show_cap(false);
    canvas.add_tagged("p", path);

    let ops = painted_ops(&canvas);
    assert_eq!(ops.len(), 1);
    let DrawOp::Polygon { points, filled, .. } = &ops[0] else {
        panic!("expected a polygon, got {:?}", ops[0]);
    };
    assert!(*filled);
    assert_eq!(points.len(), 3);
}

#[test]
fn test_bezier_flattens_for_plain_backend() {
    let mut backend = RecordingBackend::new();
    let mut ctx = RenderContext::new(&mut backend);
    let control = [
        Point::new(0.0, 0.0),
        Point::new(0.0, 10.0),
        Point::new(10.0, 10.0),
        Point::new(10.0, 0.0),
    ];
    ctx.draw_bezier_curve(&control);

    let ops = backend.ops();
    assert_eq!(ops.len(), 1);
    let DrawOp::Path { points, .. } = &ops[0] else {
        panic!("expected a flattened path, got {:?}", ops[0]);
    };
    // default flattening: 16 spans plus the start point
    assert_eq!(points.len(), 17);
    assert_eq!((points[0].x, points[0].y), (0.0, 0.0));
    let last = points.last().unwrap();
    assert!((last.x - 10.0).abs() < 1e-9);
    assert!(last.y.abs() < 1e-9);
}

#[test]
fn test_bezier_passes_through_on_curve_backend() {
    let mut backend = RecordingBackend::with_curves();
    let mut ctx = RenderContext::new(&mut backend);
    ctx.draw_bezier_curve(&[
        Point::new(0.0, 0.0),
        Point::new(0.0, 10.0),
        Point::new(10.0, 10.0),
        Point::new(10.0, 0.0),
    ]);

    let ops = backend.ops();
    assert_eq!(ops.len(), 1);
    let DrawOp::CurvePath {
        start,
        segments,
        filled,
        ..
    } = &ops[0] else {
        panic!("expected a curve path, got {:?}", ops[0]);
    };
    assert_eq!((start.x, start.y), (0.0, 0.0));
    assert_eq!(segments.len(), 1);
    assert!(!*filled);
}

#[test]
fn test_ellipse_control_layout() {
    let points = ellipse_bezier_points(Point::new(10.0, 20.0), 5.0, 3.0);
    assert_eq!(points.len(), 13);
    // on-curve points sit on the axis extremes
    assert_eq!((points[0].x, points[0].y), (15.0, 20.0));
    assert_eq!((points[3].x, points[3].y), (10.0, 23.0));
    assert_eq!((points[6].x, points[6].y), (5.0, 20.0));
    assert_eq!((points[9].x, points[9].y), (10.0, 17.0));
    assert_eq!(points[12], points[0]);
}

#[test]
fn test_ellipse_paints_four_spans() {
    let mut backend = RecordingBackend::with_curves();
    let mut ctx = RenderContext::new(&mut backend);
    ctx.draw_ellipse_bezier(&ellipse_bezier_points(Point::new(0.0, 0.0), 4.0, 2.0));

    let ops = backend.ops();
    assert_eq!(ops.len(), 1);
    let DrawOp::CurvePath { segments, .. } = &ops[0] else {
        panic!("expected a curve path, got {:?}", ops[0]);
    };
    assert_eq!(segments.len(), 4);
    // the last span closes onto the start point
    let end = segments.last().unwrap().to;
    assert_eq!((end.x, end.y), (4.0, 0.0));
}

#[test]
fn test_ellipse_flattens_to_one_path_on_plain_backend() {
    let mut backend = RecordingBackend::new();
    let mut ctx = RenderContext::new(&mut backend);
    ctx.draw_ellipse_bezier(&ellipse_bezier_points(Point::new(0.0, 0.0), 4.0, 2.0));

    let ops = backend.ops();
    assert_eq!(ops.len(), 1);
    let DrawOp::Polygon { points, filled, .. } = &ops[0] else {
        panic!("expected a flattened outline, got {:?}", ops[0]);
    };
    assert!(!*filled);
    // 4 cubic spans at 16 steps each, sharing endpoints
    assert_eq!(points.len(), 65);
    for (index, expected) in [
        (0, (4.0, 0.0)),
        (16, (0.0, 2.0)),
        (32, (-4.0, 0.0)),
        (48, (0.0, -2.0)),
        (64, (4.0, 0.0)),
    ] {
        let p = points[index];
        assert!((p.x - expected.0).abs() < 1e-9, "point {index}: {p:?}");
        assert!((p.y - expected.1).abs() < 1e-9, "point {index}: {p:?}");
    }
}

#[test]
fn test_flattened_ellipse_stays_near_true_ellipse() {
    let center = Point::new(0.0, 0.0);
    let (rx, ry) = (10.0, 6.0);
    let points = ellipse_bezier_points(center, rx, ry);
    let segments: Vec<_> = points[1..]
        .chunks_exact(3)
        .map(|c| cutkit_canvas::CubicSegment {
            c1: c[0],
            c2: c[1],
            to: c[2],
        })
        .collect();
    let flat = flatten_curve_path(points[0], &segments, 16);

    // the four-arc kappa approximation stays within a fraction of a pixel
    for p in &flat {
        let r = (p.x / rx).powi(2) + (p.y / ry).powi(2);
        assert!((r - 1.0).abs() < 3e-3, "point {p:?} strays from ellipse");
    }
}

#[test]
fn test_anchored_text_follows_reference_shape() {
    let mut canvas = Canvas::new();
    let line = Shape::line(0.0, 20.0, 99.0, 20.0).with_show_cap(false);
    let anchor_id = line.id();
    let label = Shape::text(0.0, 0.0, "cuts0").anchored_to(anchor_id, 4.0, 4.0);
    canvas.add_tagged("c", Shape::compound(vec![line, label]));

    let ops = painted_ops(&canvas);
    let text = ops
        .iter()
        .find_map(|op| match op {
            DrawOp::Text { position, text, .. } => Some((*position, text.clone())),
            _ => None,
        })
        .expect("label was painted");
    // label rides at the line midpoint plus the fixed offset
    assert_eq!((text.0.x, text.0.y), (53.5, 24.0));
    assert_eq!(text.1, "cuts0");
}

#[test]
fn test_text_extents_fall_back_to_proportional_estimate() {
    let mut backend = RecordingBackend::new();
    let mut ctx = RenderContext::new(&mut backend);
    ctx.set_font("Sans", 10.0, Color::WHITE, 1.0);

    let (w, h) = ctx.text_extents("hello");
    assert!((w - 30.0).abs() < 1e-9);
    assert!((h - 10.0).abs() < 1e-9);
}
