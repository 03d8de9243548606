use crate::{ButtonInput, Error};

/// Snapshot with every button released (active-low).
pub const ALL_RELEASED: u8 = 0xFF;

/// Buttons scanned each cycle, highest priority first.
pub const TRACKED: [Button; 3] = [Button::BottomLeft, Button::BottomRight, Button::TopRight];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    BottomLeft,
    BottomRight,
    TopRight,
    TopLeft,
}

impl Button {
    pub const fn bit(self) -> u8 {
        match self {
            Button::BottomLeft => 0x01,
            Button::BottomRight => 0x02,
            Button::TopRight => 0x04,
            Button::TopLeft => 0x08,
        }
    }

    pub fn action(self) -> Option<Action> {
        match self {
            Button::BottomLeft => Some(Action::DecreaseWarp),
            Button::BottomRight => Some(Action::IncreaseWarp),
            Button::TopRight => Some(Action::ToggleOverlay),
            Button::TopLeft => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    DecreaseWarp,
    IncreaseWarp,
    ToggleOverlay,
}

pub fn mask_of(buttons: &[Button]) -> u8 {
    buttons.iter().fold(0, |mask, b| mask | b.bit())
}

/// First button in `tracked` that went from released to pressed.
pub fn detect_press(previous: u8, current: u8, tracked: &[Button]) -> Option<Button> {
    tracked
        .iter()
        .copied()
        .find(|b| current & b.bit() == 0 && previous & b.bit() != 0)
}

/// Turns successive active-low snapshots into at most one press per cycle.
#[derive(Debug, Clone)]
pub struct ButtonEdgeDetector {
    previous: u8,
    tracked: &'static [Button],
    mask: u8,
}

impl ButtonEdgeDetector {
    pub fn new(tracked: &'static [Button]) -> Self {
        Self {
            previous: ALL_RELEASED,
            tracked,
            mask: mask_of(tracked),
        }
    }

    /// Compare `current` with the last snapshot, then remember it.
    pub fn poll(&mut self, current: u8) -> Option<Button> {
        // bits we never asked for read as released
        let current = current | !self.mask;
        let pressed = detect_press(self.previous, current, self.tracked);
        self.previous = current;
        pressed
    }

    pub fn read<B: ButtonInput + ?Sized>(&mut self, input: &mut B) -> Result<Option<Button>, Error> {
        let current = input.read(self.mask)?;
        Ok(self.poll(current))
    }

    pub fn previous(&self) -> u8 {
        self.previous
    }
}

impl Default for ButtonEdgeDetector {
    fn default() -> Self {
        Self::new(&TRACKED)
    }
}
