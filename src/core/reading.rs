//! Core readings - Simulated CPU, memory and temperature values

use rand::Rng;
use serde::{Deserialize, Serialize};

/// One set of readings produced by a tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadingSet {
    /// CPU usage percentage (0-100)
    pub cpu_percent: u8,
    /// Memory usage percentage (0-100)
    pub memory_percent: u8,
    /// Core temperature in °C
    pub temperature_c: i32,
}

impl ReadingSet {
    /// The zeroed readings shown while the core is stopped
    pub const BASELINE: ReadingSet = ReadingSet {
        cpu_percent: 0,
        memory_percent: 0,
        temperature_c: 0,
    };

    /// Draw a new set of readings, each uniformly from its range
    pub fn generate<R: Rng + ?Sized>(rng: &mut R, ranges: &ReadingRanges) -> Self {
        Self {
            cpu_percent: ranges.cpu.sample(rng) as u8,
            memory_percent: ranges.memory.sample(rng) as u8,
            temperature_c: ranges.temperature.sample(rng),
        }
    }

    /// Console line summarizing all three values
    pub fn summary(&self) -> String {
        format!(
            "System Update - CPU: {}%, Memory: {}%, Temp: {}°C",
            self.cpu_percent, self.memory_percent, self.temperature_c
        )
    }

    /// CPU as a 0.0 - 1.0 fraction for progress bars
    pub fn cpu_fraction(&self) -> f32 {
        self.cpu_percent as f32 / 100.0
    }

    /// Memory as a 0.0 - 1.0 fraction for progress bars
    pub fn memory_fraction(&self) -> f32 {
        self.memory_percent as f32 / 100.0
    }
}

/// Inclusive integer range a reading is drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadingRange {
    pub min: i32,
    pub max: i32,
}

impl ReadingRange {
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> i32 {
        if self.min >= self.max {
            return self.min;
        }
        rng.gen_range(self.min..=self.max)
    }

    /// Clamp both bounds into `[lo, hi]` and make sure `min <= max`
    pub fn clamped(self, lo: i32, hi: i32) -> Self {
        let min = self.min.clamp(lo, hi);
        let max = self.max.clamp(lo, hi);
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }
}

/// Draw policy for all three readings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadingRanges {
    #[serde(default = "default_cpu_range")]
    pub cpu: ReadingRange,
    #[serde(default = "default_memory_range")]
    pub memory: ReadingRange,
    #[serde(default = "default_temperature_range")]
    pub temperature: ReadingRange,
}

fn default_cpu_range() -> ReadingRange {
    ReadingRange::new(20, 90)
}

fn default_memory_range() -> ReadingRange {
    ReadingRange::new(30, 80)
}

fn default_temperature_range() -> ReadingRange {
    ReadingRange::new(40, 75)
}

impl Default for ReadingRanges {
    fn default() -> Self {
        Self {
            cpu: default_cpu_range(),
            memory: default_memory_range(),
            temperature: default_temperature_range(),
        }
    }
}

impl ReadingRanges {
    /// Fix any out-of-bounds percentages and inverted ranges
    pub fn validate(&mut self) {
        self.cpu = self.cpu.clamped(0, 100);
        self.memory = self.memory.clamped(0, 100);
        self.temperature = self.temperature.clamped(i32::MIN, i32::MAX);
    }
}

#[cfg(test)]
impl ReadingRange {
    pub fn contains(&self, value: i32) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

#[cfg(test)]
impl ReadingRanges {
    pub fn contains(&self, reading: &ReadingSet) -> bool {
        self.cpu.contains(reading.cpu_percent as i32)
            && self.memory.contains(reading.memory_percent as i32)
            && self.temperature.contains(reading.temperature_c)
    }
}
