// Frame-driven owner of the particle field and its surface.
// The browser glue calls tick() from requestAnimationFrame and forwards resize
// and visibility events; nothing here touches the platform directly.

use crate::config::FieldConfig;
use crate::debounce::{ Debounce, Wake };
use crate::field::Field;
use crate::random::RandomSource;
use crate::surface::Surface;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AnimatorState {
    Uninitialized,
    Running,
    Paused,
    Stopped,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ResizeWake {
    Rebuilt,
    // Not due yet; re-arm the timer for this many ms
    Wait(f64),
    Idle,
}

pub struct Animator<S: Surface, R: RandomSource> {
    surface: S,
    rng: R,
    field: Field,
    state: AnimatorState,
    pending_resize: Debounce<Viewport>,
    frames: u64,
}

impl<S: Surface, R: RandomSource> Animator<S, R> {
    pub fn new(surface: S, config: FieldConfig, rng: R) -> Self {
        Animator {
            surface,
            rng,
            field: Field::new(config),
            state: AnimatorState::Uninitialized,
            pending_resize: Debounce::new(config.resize_quiet_ms),
            frames: 0,
        }
    }

    pub fn state(&self) -> AnimatorState {
        self.state
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn field_mut(&mut self) -> &mut Field {
        &mut self.field
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    // Frames drawn since construction
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn resize_surface(&mut self, viewport: Viewport) {
        self.surface.set_size(viewport.width, viewport.height);
        self.field.resize(viewport.width, viewport.height);
    }

    pub fn build_field(&mut self) {
        self.field.build(&mut self.rng);
    }

    /// Sizes the surface, spawns the first particle set and enters `Running`.
    /// Returns true when the caller should schedule the first frame.
    pub fn start(&mut self, viewport: Viewport) -> bool {
        if self.state != AnimatorState::Uninitialized {
            return false;
        }
        self.resize_surface(viewport);
        self.build_field();
        self.state = AnimatorState::Running;
        true
    }

    /// One frame: step then render. Returns whether another frame should be scheduled.
    pub fn tick(&mut self) -> bool {
        if self.state != AnimatorState::Running {
            return false;
        }
        self.field.step();
        self.field.render(&mut self.surface);
        self.frames += 1;
        true
    }

    // Page hidden. The caller cancels its pending frame; positions are kept as-is.
    pub fn pause(&mut self) -> bool {
        if self.state == AnimatorState::Running {
            self.state = AnimatorState::Paused;
            true
        } else {
            false
        }
    }

    // Page visible again. Returns true when the frame chain must be restarted.
    pub fn resume(&mut self) -> bool {
        if self.state == AnimatorState::Paused {
            self.state = AnimatorState::Running;
            true
        } else {
            false
        }
    }

    pub fn stop(&mut self) {
        self.state = AnimatorState::Stopped;
    }

    pub fn on_resize(&mut self, now: f64, viewport: Viewport) {
        self.pending_resize.trigger(now, viewport);
    }

    pub fn resize_deadline(&self) -> Option<f64> {
        self.pending_resize.deadline()
    }

    /// Called when the resize timer fires. Rebuilds once the quiet period has
    /// passed, otherwise reports how long the caller should wait before asking again.
    pub fn service_resize(&mut self, now: f64) -> ResizeWake {
        match self.pending_resize.wake(now) {
            Wake::Ready(viewport) => {
                if self.apply_resize(viewport) {
                    ResizeWake::Rebuilt
                } else {
                    ResizeWake::Idle
                }
            }
            Wake::Wait(ms) => ResizeWake::Wait(ms),
            Wake::Idle => ResizeWake::Idle,
        }
    }

    fn apply_resize(&mut self, viewport: Viewport) -> bool {
        if self.state == AnimatorState::Stopped {
            return false;
        }
        self.resize_surface(viewport);
        self.build_field();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::recording::{DrawCall, RecordingSurface};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const DESKTOP: Viewport = Viewport {
        width: 1200,
        height: 800,
    };

    fn animator() -> Animator<RecordingSurface, StdRng> {
        Animator::new(RecordingSurface::new(), FieldConfig::default(), StdRng::seed_from_u64(5))
    }

    #[test]
    fn start_sizes_surface_and_builds() {
        let mut animator = animator();
        assert_eq!(animator.state(), AnimatorState::Uninitialized);
        assert!(!animator.tick());

        assert!(animator.start(DESKTOP));
        assert_eq!(animator.state(), AnimatorState::Running);
        assert_eq!(animator.surface().calls, vec![DrawCall::SetSize(1200, 800)]);
        assert_eq!(animator.field().particles().len(), 80);
        assert!(!animator.start(DESKTOP));
    }

    #[test]
    fn tick_steps_and_renders() {
        let mut animator = animator();
        animator.start(DESKTOP);
        let before = animator.field().particles()[0];
        assert!(animator.tick());
        let after = animator.field().particles()[0];
        assert_ne!(before.pos, after.pos);
        assert_eq!(animator.frames(), 1);
        assert!(animator.surface().calls.contains(&DrawCall::Clear(1200, 800)));
        assert_eq!(animator.surface().circles().len(), 80);
    }

    #[test]
    fn resize_surface_is_idempotent() {
        let mut animator = animator();
        animator.resize_surface(DESKTOP);
        animator.resize_surface(DESKTOP);
        assert_eq!(animator.field().width(), 1200);
        assert_eq!(animator.field().height(), 800);
        assert_eq!(
            animator.surface().calls,
            vec![DrawCall::SetSize(1200, 800), DrawCall::SetSize(1200, 800)]
        );
    }

    #[test]
    fn hidden_then_visible_keeps_positions() {
        let mut animator = animator();
        animator.start(DESKTOP);
        animator.tick();
        let before: Vec<[f64; 2]> = animator.field().particles().iter().map(|p| p.pos).collect();

        assert!(animator.pause());
        assert!(!animator.tick());
        assert!(animator.resume());

        let after: Vec<[f64; 2]> = animator.field().particles().iter().map(|p| p.pos).collect();
        for (a, b) in before.iter().zip(after.iter()) {
            assert_eq!(a[0].to_bits(), b[0].to_bits());
            assert_eq!(a[1].to_bits(), b[1].to_bits());
        }
        assert_eq!(animator.field().generation(), 1);
        assert_eq!(animator.frames(), 1);
    }

    #[test]
    fn visibility_signals_out_of_order_are_ignored() {
        let mut animator = animator();
        assert!(!animator.pause());
        assert!(!animator.resume());
        animator.start(DESKTOP);
        assert!(!animator.resume());
        assert!(animator.pause());
        assert!(!animator.pause());
        assert_eq!(animator.state(), AnimatorState::Paused);
    }

    // Mirrors the browser glue: each event replaces the timer with one quiet
    // period from now, and a timer that fires early is re-armed for the remainder.
    struct ResizeClock {
        timer_at: Option<f64>,
    }

    impl ResizeClock {
        fn event(&mut self, animator: &mut Animator<RecordingSurface, StdRng>, now: f64, viewport: Viewport) {
            animator.on_resize(now, viewport);
            self.timer_at = Some(now + FieldConfig::default().resize_quiet_ms);
        }

        fn advance_to(&mut self, animator: &mut Animator<RecordingSurface, StdRng>, now: f64) -> Option<ResizeWake> {
            match self.timer_at {
                Some(at) if at <= now => {
                    self.timer_at = None;
                    let wake = animator.service_resize(now);
                    if let ResizeWake::Wait(ms) = wake {
                        self.timer_at = Some(now + ms);
                    }
                    Some(wake)
                }
                _ => None,
            }
        }
    }

    #[test]
    fn resize_burst_rebuilds_once() {
        let mut animator = animator();
        animator.start(DESKTOP);
        assert_eq!(animator.field().generation(), 1);

        let mut clock = ResizeClock { timer_at: None };
        let mut rebuilt_at = Vec::new();
        let mut now = 0.0;
        for i in 0..10 {
            clock.event(&mut animator, now, Viewport { width: 700 + i, height: 600 });
            if clock.advance_to(&mut animator, now) == Some(ResizeWake::Rebuilt) {
                rebuilt_at.push(now);
            }
            now += 5.0;
        }
        while now < 1000.0 {
            if clock.advance_to(&mut animator, now) == Some(ResizeWake::Rebuilt) {
                rebuilt_at.push(now);
            }
            now += 1.0;
        }

        assert_eq!(rebuilt_at, vec![245.0]);
        assert_eq!(animator.field().generation(), 2);
        assert_eq!(animator.field().width(), 709);
        assert_eq!(animator.field().particles().len(), 40);
    }

    #[test]
    fn early_timer_waits_out_the_quiet_period() {
        let mut animator = animator();
        animator.start(DESKTOP);
        assert_eq!(animator.service_resize(0.0), ResizeWake::Idle);

        animator.on_resize(0.0, Viewport { width: 500, height: 500 });
        assert_eq!(animator.resize_deadline(), Some(200.0));
        assert_eq!(animator.service_resize(0.0), ResizeWake::Wait(200.0));
        assert_eq!(animator.service_resize(150.0), ResizeWake::Wait(50.0));
        assert_eq!(animator.field().generation(), 1);

        assert_eq!(animator.service_resize(200.0), ResizeWake::Rebuilt);
        assert_eq!(animator.field().generation(), 2);
        assert_eq!(animator.field().width(), 500);
        assert_eq!(animator.resize_deadline(), None);
        assert_eq!(animator.service_resize(400.0), ResizeWake::Idle);
    }

    #[test]
    fn resize_while_paused_rebuilds_without_resuming() {
        let mut animator = animator();
        animator.start(DESKTOP);
        animator.pause();
        animator.on_resize(0.0, Viewport { width: 500, height: 500 });
        assert_eq!(animator.service_resize(200.0), ResizeWake::Rebuilt);
        assert_eq!(animator.state(), AnimatorState::Paused);
        assert_eq!(animator.field().particles().len(), 40);
    }

    #[test]
    fn stopped_animator_draws_nothing() {
        let mut animator = animator();
        animator.start(DESKTOP);
        animator.stop();
        assert!(!animator.tick());
        assert!(!animator.resume());
        animator.on_resize(0.0, Viewport { width: 500, height: 500 });
        assert_eq!(animator.service_resize(500.0), ResizeWake::Idle);
        assert_eq!(animator.field().generation(), 1);
    }
}
