// Drawing operations the particle field needs from a 2D surface.
// The browser implementation lives in renderer.rs; tests record calls instead.

use crate::color::Color;
use vecmath::Vector2;

pub trait Surface {
    fn set_size(&mut self, width: u32, height: u32);
    fn clear(&mut self, width: u32, height: u32);
    fn fill_circle(&mut self, center: Vector2<f64>, radius: f64, color: Color, alpha: f64);
    fn stroke_line(&mut self, from: Vector2<f64>, to: Vector2<f64>, color: Color, alpha: f64, width: f64);
}
