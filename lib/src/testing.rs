//! Deterministic collaborators for unit tests.

use crate::{ButtonInput, Clock, Display, Error, RandomSource, Rgb, ALL_RELEASED};
use std::cell::Cell;
use std::collections::VecDeque;

/// Cycles through a fixed list, clamped into the requested range.
pub struct SeqRandom {
    values: Vec<i32>,
    next: usize,
}

impl SeqRandom {
    pub fn new(values: Vec<i32>) -> Self {
        Self { values, next: 0 }
    }
}

impl RandomSource for SeqRandom {
    fn uniform_int(&mut self, lo: i32, hi: i32) -> i32 {
        let v = self.values[self.next % self.values.len()];
        self.next += 1;
        v.clamp(lo, hi.max(lo))
    }
}

/// Clock that only moves when told to: each read costs `read_cost` ms and
/// sleeping advances time by the requested amount.
#[derive(Default)]
pub struct ManualClock {
    now: Cell<u64>,
    pub read_cost: u64,
    pub sleeps: Vec<u64>,
}

impl ManualClock {
    pub fn with_read_cost(read_cost: u64) -> Self {
        Self {
            read_cost,
            ..Default::default()
        }
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get() + ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        let t = self.now.get();
        self.now.set(t + self.read_cost);
        t
    }

    fn sleep_ms(&mut self, ms: u64) {
        self.sleeps.push(ms);
        self.advance(ms);
    }
}

/// Replays queued masks, then reports everything released.
#[derive(Default)]
pub struct ScriptedButtons {
    pub masks: VecDeque<u8>,
    pub fail_after: Option<usize>,
    pub reads: usize,
}

impl ScriptedButtons {
    pub fn new(masks: &[u8]) -> Self {
        Self {
            masks: masks.iter().copied().collect(),
            ..Default::default()
        }
    }
}

impl ButtonInput for ScriptedButtons {
    fn read(&mut self, mask: u8) -> Result<u8, Error> {
        if self.fail_after.is_some_and(|n| self.reads >= n) {
            return Err(Error::Input("button controller gone".to_string()));
        }
        self.reads += 1;
        Ok(self.masks.pop_front().unwrap_or(ALL_RELEASED) | !mask)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear,
    Pixel(i32, i32, Rgb),
    Line(i32, i32, i32, i32, Rgb),
    Print(String, Rgb, i32, i32, u8),
}

/// Remembers every draw call of the current frame.
#[derive(Default)]
pub struct RecordingDisplay {
    pub ops: Vec<DrawOp>,
    pub opened: usize,
    pub commits: usize,
    pub fail_lines: bool,
}

impl RecordingDisplay {
    pub fn lines(&self) -> usize {
        self.ops.iter().filter(|op| matches!(op, DrawOp::Line(..))).count()
    }

    pub fn pixels(&self) -> usize {
        self.ops.iter().filter(|op| matches!(op, DrawOp::Pixel(..))).count()
    }

    pub fn texts(&self) -> Vec<String> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Print(text, ..) => Some(text.clone()),
                _ => None,
            })
            .collect()
    }
}

impl Display for RecordingDisplay {
    fn open(&mut self) -> Result<(), Error> {
        self.opened += 1;
        self.ops.clear();
        Ok(())
    }

    fn clear(&mut self) -> Result<(), Error> {
        self.ops.push(DrawOp::Clear);
        Ok(())
    }

    fn pixel(&mut self, x: i32, y: i32, color: Rgb) -> Result<(), Error> {
        self.ops.push(DrawOp::Pixel(x, y, color));
        Ok(())
    }

    fn line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgb) -> Result<(), Error> {
        if self.fail_lines {
            return Err(Error::Display("line unsupported".to_string()));
        }
        self.ops.push(DrawOp::Line(x0, y0, x1, y1, color));
        Ok(())
    }

    fn print(&mut self, text: &str, fg: Rgb, x: i32, y: i32, font: u8) -> Result<(), Error> {
        self.ops.push(DrawOp::Print(text.to_string(), fg, x, y, font));
        Ok(())
    }

    fn update(&mut self) -> Result<(), Error> {
        self.commits += 1;
        Ok(())
    }
}
