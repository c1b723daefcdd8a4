/// Symbolic movement direction, relative to where the camera faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Backward,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Forward,
        Direction::Backward,
        Direction::Left,
        Direction::Right,
    ];

    /// Maps a DOM `KeyboardEvent.code` to a direction (WASD and arrows).
    pub fn from_key_code(code: &str) -> Option<Self> {
        match code {
            "KeyW" | "ArrowUp" => Some(Self::Forward),
            "KeyS" | "ArrowDown" => Some(Self::Backward),
            "KeyA" | "ArrowLeft" => Some(Self::Left),
            "KeyD" | "ArrowRight" => Some(Self::Right),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::Forward => 0,
            Self::Backward => 1,
            Self::Left => 2,
            Self::Right => 3,
        }
    }
}

/// Window input, already normalized by the platform layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    // mouse look capture
    ButtonDown,
    ButtonUp,

    // relative cursor motion in pixels, y grows downward
    Motion { dx: f32, dy: f32 },

    // wheel steps, positive away from the user
    Scroll { dy: f32 },

    Key { direction: Direction, pressed: bool },
}

impl std::fmt::Display for InputEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputEvent::ButtonDown => write!(f, "ButtonDown"),
            InputEvent::ButtonUp => write!(f, "ButtonUp"),
            InputEvent::Motion { dx, dy } => write!(f, "Motion({dx}, {dy})"),
            InputEvent::Scroll { dy } => write!(f, "Scroll({dy})"),
            InputEvent::Key { direction, pressed } => {
                write!(f, "Key({direction:?}, {})", if *pressed { "down" } else { "up" })
            }
        }
    }
}
