// Scroll-driven page chrome: progress bar width, navbar state and back-to-top button.

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ScrollChrome {
    pub progress_percent: f64,
    pub navbar_scrolled: bool,
    pub back_to_top_visible: bool,
}

impl ScrollChrome {
    pub const NAVBAR_OFFSET: f64 = 60.0;
    pub const BACK_TO_TOP_OFFSET: f64 = 500.0;

    pub fn compute(scroll_y: f64, scroll_height: f64, viewport_height: f64) -> ScrollChrome {
        ScrollChrome {
            progress_percent: progress_percent(scroll_y, scroll_height, viewport_height),
            navbar_scrolled: scroll_y > ScrollChrome::NAVBAR_OFFSET,
            back_to_top_visible: scroll_y > ScrollChrome::BACK_TO_TOP_OFFSET,
        }
    }
}

// Zero when the document is not taller than the viewport
pub fn progress_percent(scroll_y: f64, scroll_height: f64, viewport_height: f64) -> f64 {
    let total = scroll_height - viewport_height;
    if total <= 0.0 {
        return 0.0;
    }
    (scroll_y / total * 100.0).max(0.0).min(100.0)
}
