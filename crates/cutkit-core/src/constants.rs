//! Workspace-wide constants.

/// Offset of a cut's text label from its anchor shape's reference point,
/// in canvas pixels.
pub const LABEL_OFFSET: (f64, f64) = (4.0, 4.0);

/// On/off lengths for dashed stroking, in pixels.
pub const DASH_PATTERN: [f32; 2] = [6.0, 4.0];

/// Radius of an edit-mode control point cap, in canvas pixels.
pub const HANDLE_RADIUS: f64 = 4.0;

/// Straight segments emitted per cubic bezier when a backend cannot draw
/// curves itself.
pub const BEZIER_FLATTEN_STEPS: usize = 16;

/// Font size used when a text shape does not specify one.
pub const DEFAULT_FONT_SIZE: f64 = 12.0;

/// Default font family for text shapes.
pub const DEFAULT_FONT_FAMILY: &str = "Sans";
