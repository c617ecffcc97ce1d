use egui::ecolor::Hsva;

/// Color of curve `index` when `max_index` curves share the hue gradient.
///
/// The gradient runs red (0) -> blue (1/3) -> green (2/3) -> red (1), so the
/// hue falls linearly from 360 degrees to 0 as `index` goes from 0 to
/// `max_index`. Indices beyond `max_index` clamp to the end color.
pub fn color_from_index(index: usize, max_index: usize) -> [u8; 4] {
    let t = if max_index == 0 {
        0.0
    } else {
        (index as f32 / max_index as f32).clamp(0.0, 1.0)
    };
    let color: egui::Color32 = Hsva::new(1.0 - t, 1.0, 1.0, 1.0).into();
    color.to_array()
}

/// One plotted curve. Rebuilt from scratch on every form update.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotSeries {
    /// Legend label; also the key used to find the tracked entry on delete.
    pub name: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub color: [u8; 4],
    pub line_width: f32,
}

impl PlotSeries {
    pub fn new(name: String, x: Vec<f64>, y: Vec<f64>, color: [u8; 4]) -> Self {
        Self {
            name,
            x,
            y,
            color,
            line_width: 2.0,
        }
    }

    pub fn color32(&self) -> egui::Color32 {
        egui::Color32::from_rgba_unmultiplied(self.color[0], self.color[1], self.color[2], self.color[3])
    }

    /// Finite (min, max) of the y data.
    pub fn y_extent(&self) -> Option<(f64, f64)> {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for &v in self.y.iter().filter(|v| v.is_finite()) {
            min = min.min(v);
            max = max.max(v);
        }
        (min <= max).then_some((min, max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gradient_stops() {
        assert_eq!(color_from_index(0, 6), [255, 0, 0, 255]);
        assert_eq!(color_from_index(2, 6), [0, 0, 255, 255]);
        assert_eq!(color_from_index(4, 6), [0, 255, 0, 255]);
        assert_eq!(color_from_index(6, 6), [255, 0, 0, 255]);
    }

    #[test]
    fn successive_indices_differ() {
        let colors: Vec<_> = (0..7).map(|i| color_from_index(i, 7)).collect();
        for pair in colors.windows(2) {
            assert_ne!(pair[0], pair[1]);
        }
    }

    #[test]
    fn out_of_range_index_clamps() {
        assert_eq!(color_from_index(12, 5), color_from_index(5, 5));
        assert_eq!(color_from_index(3, 0), [255, 0, 0, 255]);
    }

    #[test]
    fn y_extent_skips_non_finite_values() {
        let s = PlotSeries::new("a".into(), vec![0.0, 1.0, 2.0], vec![f64::NAN, 3.0, -1.0], [0; 4]);
        assert_eq!(s.y_extent(), Some((-1.0, 3.0)));
        let empty = PlotSeries::new("b".into(), vec![0.0], vec![f64::NAN], [0; 4]);
        assert_eq!(empty.y_extent(), None);
    }
}
