//! Bounded price and spread oscillators
//!
//! Two shapes of triangle wave over `[start, end]`:
//!
//! - **Tiled**: an ascending ramp `start + i*step` followed by a descending
//!   ramp `end - i*step`, both of `ceil((end - start) / step)` samples, tiled
//!   until the requested length. The ascending ramp stops short of `end` and
//!   the descending ramp stops short of `start`.
//! - **Reflecting**: a walker that emits its position, then steps. A step
//!   that would leave the band reverses direction first, so the emitted
//!   sequence never leaves `[start, end]`.
//!
//! Spreads follow a separate sawtooth driven by [`SpreadOscillator`].
//!
//! All sequences are lazy iterators with an exact length. The iterator owns
//! its cursor; calling `samples()` again starts a fresh pass.

use crate::error::{GeneratorError, GeneratorResult};
use feed_config::SpreadResetRule;
use std::iter::FusedIterator;

/// Band, step and length of a triangle wave
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OscillatorConfig {
    pub start: f64,
    pub end: f64,
    pub step: f64,
    /// Number of samples to produce; zero yields an empty sequence
    pub length: usize,
}

impl OscillatorConfig {
    pub fn new(start: f64, end: f64, step: f64, length: usize) -> Self {
        Self {
            start,
            end,
            step,
            length,
        }
    }

    /// Reject bands a triangle wave cannot traverse
    pub fn validate(&self) -> GeneratorResult<()> {
        if !(self.start.is_finite() && self.end.is_finite() && self.step.is_finite()) {
            return Err(GeneratorError::precondition(format!(
                "oscillator bounds must be finite: start={} end={} step={}",
                self.start, self.end, self.step
            )));
        }
        if self.start >= self.end {
            return Err(GeneratorError::precondition(format!(
                "oscillator start ({}) must be below end ({})",
                self.start, self.end
            )));
        }
        if self.step <= 0.0 {
            return Err(GeneratorError::precondition(format!(
                "oscillator step must be positive, got {}",
                self.step
            )));
        }
        if self.step > self.end - self.start {
            return Err(GeneratorError::precondition(format!(
                "oscillator step ({}) exceeds band width ({})",
                self.step,
                self.end - self.start
            )));
        }
        Ok(())
    }

    /// Samples in one ramp of the tiled wave
    pub fn ramp_len(&self) -> usize {
        ((self.end - self.start) / self.step).ceil() as usize
    }
}

/// Wave shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OscillationMode {
    Tiled,
    Reflecting,
}

/// Walk direction of a reflecting oscillator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    #[inline]
    pub fn sign(self) -> f64 {
        match self {
            Direction::Up => 1.0,
            Direction::Down => -1.0,
        }
    }

    #[inline]
    pub fn reversed(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }
}

/// Cursor of a reflecting oscillator
///
/// `current` is the value the next call to [`advance`](Self::advance) emits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OscillationState {
    pub current: f64,
    pub direction: Direction,
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub step: f64,
}

impl OscillationState {
    /// Start at the lower bound walking up
    pub fn new(lower_bound: f64, upper_bound: f64, step: f64) -> Self {
        Self {
            current: lower_bound,
            direction: Direction::Up,
            lower_bound,
            upper_bound,
            step,
        }
    }

    /// Emit the current value and move one step
    ///
    /// The flip happens only when the next value would land strictly
    /// outside the band; landing exactly on a bound is allowed.
    pub fn advance(&mut self) -> f64 {
        let emitted = self.current;
        let mut next = emitted + self.direction.sign() * self.step;
        if next > self.upper_bound || next < self.lower_bound {
            self.direction = self.direction.reversed();
            next = emitted + self.direction.sign() * self.step;
        }
        self.current = next;
        emitted
    }
}

/// Triangle-wave price source
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceOscillator {
    config: OscillatorConfig,
    mode: OscillationMode,
}

impl PriceOscillator {
    pub fn new(config: OscillatorConfig, mode: OscillationMode) -> GeneratorResult<Self> {
        config.validate()?;
        Ok(Self { config, mode })
    }

    pub fn tiled(config: OscillatorConfig) -> GeneratorResult<Self> {
        Self::new(config, OscillationMode::Tiled)
    }

    pub fn reflecting(config: OscillatorConfig) -> GeneratorResult<Self> {
        Self::new(config, OscillationMode::Reflecting)
    }

    pub fn config(&self) -> &OscillatorConfig {
        &self.config
    }

    pub fn mode(&self) -> OscillationMode {
        self.mode
    }

    /// Fresh pass over the wave
    pub fn samples(&self) -> PriceSamples {
        let cursor = match self.mode {
            OscillationMode::Tiled => Cursor::Tiled {
                index: 0,
                ramp_len: self.config.ramp_len(),
            },
            OscillationMode::Reflecting => Cursor::Reflecting(OscillationState::new(
                self.config.start,
                self.config.end,
                self.config.step,
            )),
        };
        PriceSamples {
            config: self.config,
            cursor,
            remaining: self.config.length,
        }
    }
}

#[derive(Debug, Clone)]
enum Cursor {
    Tiled { index: usize, ramp_len: usize },
    Reflecting(OscillationState),
}

/// Lazy sample sequence produced by [`PriceOscillator::samples`]
#[derive(Debug, Clone)]
pub struct PriceSamples {
    config: OscillatorConfig,
    cursor: Cursor,
    remaining: usize,
}

impl Iterator for PriceSamples {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let value = match &mut self.cursor {
            Cursor::Tiled { index, ramp_len } => {
                let n = *ramp_len;
                let phase = *index % (2 * n);
                *index += 1;
                if phase < n {
                    self.config.start + phase as f64 * self.config.step
                } else {
                    self.config.end - (phase - n) as f64 * self.config.step
                }
            }
            Cursor::Reflecting(state) => state.advance(),
        };
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for PriceSamples {}

impl FusedIterator for PriceSamples {}

/// Parameters of the sawtooth spread
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpreadConfig {
    pub start: f64,
    pub increment: f64,
    pub max: f64,
    pub reset: f64,
    pub length: usize,
}

impl SpreadConfig {
    pub fn validate(&self) -> GeneratorResult<()> {
        let values = [self.start, self.increment, self.max, self.reset];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(GeneratorError::precondition(format!(
                "spread parameters must be finite: {:?}",
                self
            )));
        }
        if self.increment <= 0.0 {
            return Err(GeneratorError::precondition(format!(
                "spread increment must be positive, got {}",
                self.increment
            )));
        }
        if self.start < 0.0 || self.reset < 0.0 {
            return Err(GeneratorError::precondition(format!(
                "spread start ({}) and reset ({}) must be non-negative",
                self.start, self.reset
            )));
        }
        if self.max < self.start {
            return Err(GeneratorError::precondition(format!(
                "spread max ({}) is below start ({})",
                self.max, self.start
            )));
        }
        Ok(())
    }
}

/// Sawtooth spread source
///
/// Under [`SpreadResetRule::HoldAtMax`] the spread widens by `increment`
/// each tick, emits the maximum for two consecutive ticks and then drops
/// back to `reset`. With the desk defaults (1/128 start, increment and
/// reset, 1/32 max) that is a period of five: 1,2,3,4,4 in 128ths.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpreadOscillator {
    config: SpreadConfig,
    rule: SpreadResetRule,
}

impl SpreadOscillator {
    pub fn new(config: SpreadConfig, rule: SpreadResetRule) -> GeneratorResult<Self> {
        config.validate()?;
        Ok(Self { config, rule })
    }

    pub fn config(&self) -> &SpreadConfig {
        &self.config
    }

    /// Ticks in one sawtooth cycle under the hold-at-max rule
    pub fn period(&self) -> usize {
        let rise = ((self.config.max - self.config.reset) / self.config.increment).ceil();
        rise.max(0.0) as usize + 2
    }

    pub fn samples(&self) -> SpreadSamples {
        SpreadSamples {
            config: self.config,
            rule: self.rule,
            current: self.config.start,
            held: false,
            remaining: self.config.length,
        }
    }
}

/// Lazy sequence produced by [`SpreadOscillator::samples`]
#[derive(Debug, Clone)]
pub struct SpreadSamples {
    config: SpreadConfig,
    rule: SpreadResetRule,
    current: f64,
    held: bool,
    remaining: usize,
}

impl Iterator for SpreadSamples {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let emitted = self.current;
        let SpreadConfig {
            increment,
            max,
            reset,
            ..
        } = self.config;

        match self.rule {
            SpreadResetRule::HoldAtMax => {
                if emitted < max {
                    self.current = emitted + increment;
                } else if !self.held {
                    self.held = true;
                } else {
                    self.current = reset;
                    self.held = false;
                }
            }
            SpreadResetRule::CompareLastEmitted => {
                if emitted < max && emitted != reset {
                    self.current = emitted + increment;
                } else {
                    self.current = reset;
                }
            }
        }
        Some(emitted)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for SpreadSamples {}

impl FusedIterator for SpreadSamples {}
