//! Adaptive pacing controllers
//!
//! Two closed loops retune the match every tick:
//! - `DamageController` steers the live count along a survivor curve tied to how
//!   much of the resource is gone.
//! - `ConsumptionController` steers the eating rate so the resource runs out
//!   around the target duration.

use std::collections::VecDeque;

use crate::consts::*;

/// Damage-scale controller (survivor curve)
#[derive(Debug, Clone)]
pub struct DamageController {
    scale: f32,
}

impl Default for DamageController {
    fn default() -> Self {
        Self::new()
    }
}

impl DamageController {
    pub fn new() -> Self {
        Self { scale: 1.0 }
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Live count the curve expects at `eaten_fraction`
    pub fn desired_alive(initial: usize, eaten_fraction: f32, target_survivors: f32) -> f32 {
        let n0 = initial as f32;
        let target_end = target_survivors.min(n0 * 0.5);
        target_end + (n0 - target_end) * (1.0 - eaten_fraction)
    }

    pub fn update(
        &mut self,
        alive: usize,
        initial: usize,
        eaten_fraction: f32,
        target_survivors: f32,
    ) -> f32 {
        let desired = Self::desired_alive(initial, eaten_fraction, target_survivors);
        let error = alive as f32 - desired;
        let gain = DAMAGE_GAIN * error / (initial as f32).max(DAMAGE_GAIN_FLOOR);
        self.scale = (self.scale * (1.0 + gain)).clamp(DAMAGE_SCALE_MIN, DAMAGE_SCALE_MAX);
        self.scale
    }
}

/// Inputs for one consumption-controller update
#[derive(Debug, Clone, Copy)]
pub struct PacingInput {
    pub dt: f32,
    /// Unscaled amount eaten this tick
    pub raw_consumed: f32,
    pub elapsed: f32,
    pub remaining: f32,
    pub capacity: f32,
    pub target_duration: f32,
}

/// Consumption-rate controller (match duration)
#[derive(Debug, Clone)]
pub struct ConsumptionController {
    scale: f32,
    /// Smoothed windowed base rate (units/s)
    ema: f32,
    /// (dt, raw consumed) samples covering the last `RATE_WINDOW_SECS`
    window: VecDeque<(f32, f32)>,
    window_sum: f32,
    window_span: f32,
}

impl Default for ConsumptionController {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsumptionController {
    pub fn new() -> Self {
        Self {
            scale: 1.0,
            ema: 0.0,
            window: VecDeque::new(),
            window_sum: 0.0,
            window_span: 0.0,
        }
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn measured_rate(&self) -> f32 {
        self.ema
    }

    fn push_sample(&mut self, dt: f32, raw: f32) {
        self.window.push_back((dt, raw));
        self.window_sum += raw;
        self.window_span += dt;
        while let Some(&(front_dt, front_raw)) = self.window.front() {
            if self.window_span - front_dt <= RATE_WINDOW_SECS - 1e-4 {
                break;
            }
            self.window.pop_front();
            self.window_sum = (self.window_sum - front_raw).max(0.0);
            self.window_span -= front_dt;
        }
    }

    pub fn update(&mut self, input: &PacingInput) -> f32 {
        self.push_sample(input.dt, input.raw_consumed);

        let span = input.elapsed.min(RATE_WINDOW_SECS);
        let windowed = if span > 0.0 { self.window_sum / span } else { 0.0 };
        self.ema = RATE_SMOOTHING * self.ema + (1.0 - RATE_SMOOTHING) * windowed;

        let target = input.target_duration;
        let time_left = (target - input.elapsed).clamp(MIN_TIME_LEFT, target.max(MIN_TIME_LEFT));
        let mut desired = input.remaining / time_left;
        if input.elapsed >= target {
            // Nominal pace as a floor so the tail cannot stall
            desired = desired.max(input.capacity / target);
        }

        // Nothing measured yet: hold
        let target_scale = if self.ema > 1e-6 {
            desired / self.ema
        } else {
            self.scale
        };

        self.scale = (SCALE_INERTIA * self.scale + (1.0 - SCALE_INERTIA) * target_scale)
            .clamp(CONSUMPTION_SCALE_MIN, CONSUMPTION_SCALE_MAX);
        self.scale
    }
}
