//! Small time-based animation helpers shared by the card and ambient painters.

use std::f32::consts::TAU;
use std::time::{Duration, Instant};

pub fn ease_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

pub fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// CSS-style `cubic-bezier(x1, y1, x2, y2)` timing function.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
}

/// The "silk" curve used for card and progress transitions.
pub const SILK: CubicBezier = CubicBezier::new(0.2, 0.8, 0.2, 1.0);

impl CubicBezier {
    pub const fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    fn sample(a1: f32, a2: f32, s: f32) -> f32 {
        let inv = 1.0 - s;
        3.0 * inv * inv * s * a1 + 3.0 * inv * s * s * a2 + s * s * s
    }

    fn slope(a1: f32, a2: f32, s: f32) -> f32 {
        let inv = 1.0 - s;
        3.0 * inv * inv * a1 + 6.0 * inv * s * (a2 - a1) + 3.0 * s * s * (1.0 - a2)
    }

    pub fn ease(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        if t == 0.0 || t == 1.0 {
            return t;
        }

        // Newton first, bisection if the slope flattens out.
        let mut s = t;
        for _ in 0..8 {
            let x = Self::sample(self.x1, self.x2, s) - t;
            let dx = Self::slope(self.x1, self.x2, s);
            if x.abs() < 1e-5 {
                return Self::sample(self.y1, self.y2, s);
            }
            if dx.abs() < 1e-6 {
                break;
            }
            s = (s - x / dx).clamp(0.0, 1.0);
        }

        let (mut lo, mut hi) = (0.0_f32, 1.0_f32);
        s = t;
        for _ in 0..32 {
            let x = Self::sample(self.x1, self.x2, s);
            if (x - t).abs() < 1e-5 {
                break;
            }
            if x < t {
                lo = s;
            } else {
                hi = s;
            }
            s = (lo + hi) * 0.5;
        }
        Self::sample(self.y1, self.y2, s)
    }
}

/// Phase in `[0, 1)` of a repeating animation of `period` seconds that begins at `begin`.
/// Before `begin` the animation has not started and the phase is `None`.
pub fn phase(time: f64, period: f64, begin: f64) -> Option<f32> {
    if period <= 0.0 || time < begin {
        return None;
    }
    Some(((time - begin) % period / period) as f32)
}

/// Like [`phase`], but a pre-start animation holds its first frame.
pub fn looped(time: f64, period: f64, begin: f64) -> f32 {
    phase(time, period, begin).unwrap_or(0.0)
}

/// Linear interpolation through `values` at matching `key_times` (ascending, 0 to 1).
pub fn keyframes(values: &[f32], key_times: &[f32], t: f32) -> f32 {
    debug_assert_eq!(values.len(), key_times.len());
    match values {
        [] => 0.0,
        [only] => *only,
        _ => {
            let t = t.clamp(0.0, 1.0);
            for (i, window) in key_times.windows(2).enumerate() {
                let (k0, k1) = (window[0], window[1]);
                if t <= k1 {
                    let span = k1 - k0;
                    let local = if span <= f32::EPSILON { 1.0 } else { (t - k0) / span };
                    return values[i] + (values[i + 1] - values[i]) * local;
                }
            }
            values[values.len() - 1]
        }
    }
}

/// Evenly spaced keyframes, like an SVG `values` list without `keyTimes`.
pub fn even_keyframes(values: &[f32], t: f32) -> f32 {
    match values.len() {
        0 => 0.0,
        1 => values[0],
        n => {
            let segment = t.clamp(0.0, 1.0) * (n - 1) as f32;
            let i = (segment.floor() as usize).min(n - 2);
            let local = segment - i as f32;
            values[i] + (values[i + 1] - values[i]) * local
        }
    }
}

/// Smooth 0→1→0 pulse with the given period.
pub fn pulse(time: f64, period: f64) -> f32 {
    let p = looped(time, period, 0.0);
    0.5 - 0.5 * (p * TAU).cos()
}

/// Values that can be blended by [`Tween`].
pub trait Lerp: Copy + PartialEq {
    fn lerp(from: Self, to: Self, t: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(from: Self, to: Self, t: f32) -> Self {
        from * (1.0 - t) + to * t
    }
}

/// Eases from the value it had when last retargeted toward a new target.
#[derive(Debug, Clone, Copy)]
pub struct Tween<T> {
    from: T,
    to: T,
    started: Instant,
    duration: Duration,
    curve: CubicBezier,
}

impl<T: Lerp> Tween<T> {
    pub fn new(value: T, duration: Duration, now: Instant) -> Self {
        Self {
            from: value,
            to: value,
            started: now,
            duration,
            curve: SILK,
        }
    }

    /// Starts a tween at `from` already heading to `to`.
    pub fn toward(from: T, to: T, duration: Duration, now: Instant) -> Self {
        Self {
            from,
            to,
            ..Self::new(from, duration, now)
        }
    }

    fn progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    pub fn value(&self, now: Instant) -> T {
        T::lerp(self.from, self.to, self.curve.ease(self.progress(now)))
    }

    pub fn is_settled(&self, now: Instant) -> bool {
        self.from == self.to || self.progress(now) >= 1.0
    }

    /// Redirects toward `target` from wherever the tween currently is.
    pub fn retarget(&mut self, target: T, now: Instant) {
        if target == self.to {
            return;
        }
        self.from = self.value(now);
        self.to = target;
        self.started = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn silk_curve_hits_endpoints_and_overshoots_linear_early() {
        assert_eq!(SILK.ease(0.0), 0.0);
        assert_eq!(SILK.ease(1.0), 1.0);
        assert!(SILK.ease(0.25) > 0.5);
        let mut last = 0.0;
        for i in 1..=20 {
            let v = SILK.ease(i as f32 / 20.0);
            assert!(v >= last - 1e-4, "curve should be monotonic");
            last = v;
        }
    }

    #[test]
    fn linear_bezier_is_identity() {
        let linear = CubicBezier::new(0.0, 0.0, 1.0, 1.0);
        for i in 0..=10 {
            let t = i as f32 / 10.0;
            assert!(close(linear.ease(t), t));
        }
    }

    #[test]
    fn keyframes_interpolate_between_key_times() {
        let values = [20.0, 60.0, 60.0];
        let times = [0.0, 0.3, 1.0];
        assert!(close(keyframes(&values, &times, 0.0), 20.0));
        assert!(close(keyframes(&values, &times, 0.15), 40.0));
        assert!(close(keyframes(&values, &times, 0.8), 60.0));
    }

    #[test]
    fn even_keyframes_go_there_and_back() {
        let values = [0.0, 1.0, 0.0];
        assert!(close(even_keyframes(&values, 0.5), 1.0));
        assert!(close(even_keyframes(&values, 0.25), 0.5));
        assert!(close(even_keyframes(&values, 1.0), 0.0));
    }

    #[test]
    fn phase_waits_for_begin_and_wraps() {
        assert_eq!(phase(0.1, 2.0, 0.5), None);
        assert!(close(phase(1.5, 2.0, 0.5).unwrap(), 0.5));
        assert!(close(phase(4.5, 2.0, 0.5).unwrap(), 0.0));
        assert_eq!(looped(0.0, 2.0, 1.0), 0.0);
    }

    #[test]
    fn easing_clamps_input() {
        assert_eq!(ease_out_cubic(-1.0), 0.0);
        assert_eq!(ease_out_cubic(2.0), 1.0);
        assert_eq!(ease_in_out(0.5), 0.5);
    }

    #[test]
    fn pulse_peaks_mid_period() {
        assert!(close(pulse(0.0, 2.0), 0.0));
        assert!(close(pulse(1.0, 2.0), 1.0));
    }

    #[test]
    fn tween_settles_on_its_target() {
        let t0 = Instant::now();
        let d = Duration::from_millis(700);
        let mut tween = Tween::new(0.0_f32, d, t0);
        assert!(tween.is_settled(t0));

        tween.retarget(1.0, t0);
        assert_eq!(tween.value(t0), 0.0);
        let mid = tween.value(t0 + d / 2);
        assert!(mid > 0.5 && mid < 1.0);
        assert_eq!(tween.value(t0 + d), 1.0);
        assert!(tween.is_settled(t0 + d));
    }

    #[test]
    fn retarget_mid_flight_starts_from_current_value() {
        let t0 = Instant::now();
        let d = Duration::from_millis(1000);
        let mut tween = Tween::toward(0.0_f32, 1.0, d, t0);
        let t1 = t0 + Duration::from_millis(300);
        let at_t1 = tween.value(t1);

        tween.retarget(-1.0, t1);
        assert!((tween.value(t1) - at_t1).abs() < 1e-6);
        assert_eq!(tween.value(t1 + d), -1.0);
    }
}
