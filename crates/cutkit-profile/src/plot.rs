//! Plot output abstraction for cut profiles.

use cutkit_core::Color;

/// Destination for extracted pixel profiles.
///
/// Values are plotted against their sample index.
pub trait PlotSink {
    /// Removes every plotted series.
    fn clear(&mut self);

    /// Sets the plot title and the auxiliary right-hand title. `None`
    /// leaves a title unchanged.
    fn set_titles(&mut self, title: Option<&str>, right_title: Option<&str>);

    /// Plots one series of pixel values with its axis labels.
    fn plot_series(&mut self, values: &[f64], x_label: &str, y_label: &str, color: Color);
}

/// One series captured by [`RecordingPlot`].
#[derive(Debug, Clone, PartialEq)]
pub struct PlotSeries {
    pub values: Vec<f64>,
    pub x_label: String,
    pub y_label: String,
    pub color: Color,
}

/// Plot sink that stores everything it receives, for tests and exports.
#[derive(Debug, Default)]
pub struct RecordingPlot {
    series: Vec<PlotSeries>,
    title: Option<String>,
    right_title: Option<String>,
    clears: usize,
}

impl RecordingPlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Series plotted since the last clear.
    pub fn series(&self) -> &[PlotSeries] {
        &self.series
    }

    pub fn clears(&self) -> usize {
        self.clears
    }

    pub fn titles(&self) -> (Option<&str>, Option<&str>) {
        (self.title.as_deref(), self.right_title.as_deref())
    }
}

impl PlotSink for RecordingPlot {
    fn clear(&mut self) {
        self.series.clear();
        self.clears += 1;
    }

    fn set_titles(&mut self, title: Option<&str>, right_title: Option<&str>) {
        if let Some(t) = title {
            self.title = Some(t.to_string());
        }
        if let Some(r) = right_title {
            self.right_title = Some(r.to_string());
        }
    }

    fn plot_series(&mut self, values: &[f64], x_label: &str, y_label: &str, color: Color) {
        self.series.push(PlotSeries {
            values: values.to_vec(),
            x_label: x_label.to_string(),
            y_label: y_label.to_string(),
            color,
        });
    }
}
