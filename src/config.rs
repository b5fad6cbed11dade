// Fixed tuning values for the particle background.

use crate::color::Color;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FieldConfig {
    // Viewports narrower than this get the sparse particle count
    pub narrow_viewport_width: u32,
    pub narrow_count: usize,
    pub wide_count: usize,
    pub connect_distance: f64,
    pub speed: f64,
    pub min_radius: f64,
    pub max_radius: f64,
    pub min_alpha: f64,
    pub max_alpha: f64,
    pub color: Color,
    pub link_max_opacity: f64,
    pub link_width: f64,
    pub resize_quiet_ms: f64,
}

impl FieldConfig {
    /// Number of particles to spawn for a surface of the given width.
    pub fn count_for_width(&self, width: u32) -> usize {
        if width < self.narrow_viewport_width {
            self.narrow_count
        } else {
            self.wide_count
        }
    }
}

impl Default for FieldConfig {
    fn default() -> Self {
        FieldConfig {
            narrow_viewport_width: 768,
            narrow_count: 40,
            wide_count: 80,
            connect_distance: 140.0,
            speed: 0.35,
            min_radius: 0.8,
            max_radius: 2.2,
            min_alpha: 0.15,
            max_alpha: 0.50,
            color: Color::from_u32(0x3b82f6),
            link_max_opacity: 0.14,
            link_width: 0.8,
            resize_quiet_ms: 200.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_switches_at_tablet_width() {
        let config = FieldConfig::default();
        assert_eq!(config.count_for_width(0), 40);
        assert_eq!(config.count_for_width(767), 40);
        assert_eq!(config.count_for_width(768), 80);
        assert_eq!(config.count_for_width(1920), 80);
    }
}
