//! Linear value and time scales.

use chrono::FixedOffset;

use crate::analysis::p99_of_max;
use crate::state::{LatencyPoint, DEFAULT_UPPER_BOUND, VALUE_HEADROOM};

/// Tick count used when snapping the value-scale upper bound
const NICE_TICK_COUNT: usize = 10;

const SECOND: i64 = 1_000;
const MINUTE: i64 = 60 * SECOND;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;

/// Candidate time-axis tick steps, smallest first
const TIME_TICK_STEPS: &[i64] = &[
    SECOND,
    5 * SECOND,
    15 * SECOND,
    30 * SECOND,
    MINUTE,
    5 * MINUTE,
    15 * MINUTE,
    30 * MINUTE,
    HOUR,
    3 * HOUR,
    6 * HOUR,
    12 * HOUR,
    DAY,
    2 * DAY,
    7 * DAY,
    30 * DAY,
    90 * DAY,
    365 * DAY,
];

/// Tick spacing for `count` ticks over `[start, stop]`, rounded to 1, 2 or 5 × 10ⁿ
pub fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    let raw = (stop - start) / count.max(1) as f64;
    if !(raw.is_finite() && raw > 0.0) {
        return 0.0;
    }
    let power = raw.log10().floor();
    let error = raw / 10f64.powf(power);
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    factor * 10f64.powf(power)
}

/// Continuous linear mapping from a domain onto a pixel range
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Map a domain value to the range. Endpoints map exactly.
    pub fn scale(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d1 == d0 {
            return (r0 + r1) / 2.0;
        }
        let t = (value - d0) / (d1 - d0);
        r0 * (1.0 - t) + r1 * t
    }

    /// Map a range value back to the domain
    pub fn invert(&self, pixel: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if r1 == r0 {
            return d0;
        }
        let t = (pixel - r0) / (r1 - r0);
        d0 * (1.0 - t) + d1 * t
    }

    /// Extend the domain outward to round tick boundaries
    pub fn nice(mut self, count: usize) -> Self {
        let (mut start, mut stop) = self.domain;
        let reversed = stop < start;
        if reversed {
            std::mem::swap(&mut start, &mut stop);
        }

        let mut previous = None;
        for _ in 0..10 {
            let step = tick_step(start, stop, count);
            if step <= 0.0 || previous == Some(step) {
                break;
            }
            if step >= 1.0 {
                start = (start / step).floor() * step;
                stop = (stop / step).ceil() * step;
            } else {
                let inverse = (1.0 / step).round();
                start = (start * inverse).floor() / inverse;
                stop = (stop * inverse).ceil() / inverse;
            }
            previous = Some(step);
        }

        self.domain = if reversed { (stop, start) } else { (start, stop) };
        self
    }

    /// Roughly `count` round values inside the domain, ascending
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (lo, hi) = if self.domain.0 <= self.domain.1 {
            self.domain
        } else {
            (self.domain.1, self.domain.0)
        };
        let step = tick_step(lo, hi, count);
        if step <= 0.0 {
            return if lo.is_finite() { vec![lo] } else { Vec::new() };
        }
        if step >= 1.0 {
            let first = (lo / step).ceil() as i64;
            let last = (hi / step).floor() as i64;
            (first..=last).map(|i| i as f64 * step).collect()
        } else {
            let inverse = (1.0 / step).round();
            let first = (lo * inverse).ceil() as i64;
            let last = (hi * inverse).floor() as i64;
            (first..=last).map(|i| i as f64 / inverse).collect()
        }
    }
}

/// Linear mapping from epoch milliseconds to horizontal pixels
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeScale {
    linear: LinearScale,
}

impl TimeScale {
    pub fn new(start: i64, end: i64, width: f64) -> Self {
        Self {
            linear: LinearScale::new((start as f64, end as f64), (0.0, width)),
        }
    }

    #[inline]
    pub fn scale(&self, timestamp: i64) -> f64 {
        self.linear.scale(timestamp as f64)
    }

    /// Pixel position of a fractional timestamp
    #[inline]
    pub fn scale_f(&self, timestamp: f64) -> f64 {
        self.linear.scale(timestamp)
    }

    /// Timestamp (ms, fractional) under a pixel position
    #[inline]
    pub fn invert(&self, pixel: f64) -> f64 {
        self.linear.invert(pixel)
    }

    /// Pixel width of a duration
    pub fn width_of(&self, duration_ms: f64) -> f64 {
        let (d0, d1) = self.linear.domain();
        let (r0, r1) = self.linear.range();
        if d1 == d0 {
            return 0.0;
        }
        duration_ms * (r1 - r0) / (d1 - d0)
    }

    pub fn domain(&self) -> (i64, i64) {
        let (d0, d1) = self.linear.domain();
        (d0 as i64, d1 as i64)
    }

    pub fn span_ms(&self) -> i64 {
        let (d0, d1) = self.domain();
        d1 - d0
    }

    pub fn width(&self) -> f64 {
        self.linear.range().1
    }

    /// Ticks aligned to whole multiples of a calendar-friendly step in the
    /// given time zone
    pub fn ticks(&self, count: usize, offset: FixedOffset) -> Vec<i64> {
        let (start, end) = self.domain();
        let span = end - start;
        if span <= 0 {
            return vec![start];
        }
        let target = span / count.max(1) as i64;
        let step = TIME_TICK_STEPS
            .iter()
            .copied()
            .find(|&s| s >= target)
            .unwrap_or_else(|| {
                let year = 365 * DAY;
                (target + year - 1) / year * year
            });

        let shift = offset.local_minus_utc() as i64 * SECOND;
        let first = (start + shift).div_euclid(step) * step - shift;
        let first = if first < start { first + step } else { first };

        let mut ticks = Vec::new();
        let mut t = first;
        while t <= end {
            ticks.push(t);
            t += step;
        }
        ticks
    }
}

/// The pair of scales shared by every layer of one render pass
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartScales {
    pub x: TimeScale,
    pub y: LinearScale,
    /// Top of the value domain after headroom and rounding
    pub upper_bound: f64,
    /// True when the bound came from the 99th percentile of maxima
    pub clipped: bool,
}

impl ChartScales {
    /// Build both scales. `time_domain` must already be non-degenerate.
    pub fn build(
        time_domain: (i64, i64),
        valid: &[LatencyPoint],
        inner_width: f64,
        chart_height: f64,
        clip_to_p99: bool,
    ) -> Self {
        let upper_bound = value_upper_bound(valid, clip_to_p99);
        Self {
            x: TimeScale::new(time_domain.0, time_domain.1, inner_width),
            y: LinearScale::new((0.0, upper_bound), (chart_height, 0.0)),
            upper_bound,
            clipped: clip_to_p99 && !valid.is_empty(),
        }
    }
}

/// Upper bound of the value domain: max (or p99) of bucket maxima × headroom,
/// rounded up to a nice value
pub fn value_upper_bound(valid: &[LatencyPoint], clip_to_p99: bool) -> f64 {
    let peak = if clip_to_p99 {
        p99_of_max(valid)
    } else {
        valid.iter().map(|p| p.max).reduce(f64::max)
    };

    match peak {
        Some(peak) if peak > 0.0 => {
            LinearScale::new((0.0, peak * VALUE_HEADROOM), (0.0, 1.0))
                .nice(NICE_TICK_COUNT)
                .domain()
                .1
        }
        _ => DEFAULT_UPPER_BOUND,
    }
}
