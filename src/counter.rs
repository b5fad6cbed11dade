// Count-up animation for the stats section: eases from 0 to a target value
// over a fixed duration, sampled with animation frame timestamps.

pub fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CounterFrame {
    pub value: u64,
    pub finished: bool,
}

pub struct CounterAnimation {
    target: u64,
    duration_ms: f64,
    start: Option<f64>,
}

impl CounterAnimation {
    pub const DEFAULT_DURATION_MS: f64 = 1800.0;

    pub fn new(target: u64, duration_ms: f64) -> CounterAnimation {
        CounterAnimation {
            target,
            duration_ms,
            start: None,
        }
    }

    pub fn with_default_duration(target: u64) -> CounterAnimation {
        CounterAnimation::new(target, CounterAnimation::DEFAULT_DURATION_MS)
    }

    pub fn target(&self) -> u64 {
        self.target
    }

    // The first timestamp seen becomes the start of the animation
    pub fn sample(&mut self, timestamp: f64) -> CounterFrame {
        let start = *self.start.get_or_insert(timestamp);
        let progress = if self.duration_ms > 0.0 {
            ((timestamp - start) / self.duration_ms).max(0.0).min(1.0)
        } else {
            1.0
        };
        let value = (ease_out_cubic(progress) * self.target as f64).floor() as u64;
        CounterFrame {
            value,
            finished: progress >= 1.0,
        }
    }
}

// Reads a data-count attribute the way parseInt does: leading whitespace, then leading digits
pub fn parse_count(raw: &str) -> Option<u64> {
    let digits: String = raw
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

/// Formats with `.` between thousands groups, as pt-BR locales do.
pub fn format_pt_br(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}
