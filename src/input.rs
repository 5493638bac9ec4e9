// ABOUTME: Input mapping for slide navigation
// ABOUTME: Translates keyboard, swipe and control events into navigation commands without side effects

/// Minimum horizontal travel, in pixels, for a touch to count as a swipe
pub const SWIPE_THRESHOLD_PX: f64 = 50.0;

/// Direction of a single navigation step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

impl Direction {
    pub fn offset(self) -> isize {
        match self {
            Direction::Previous => -1,
            Direction::Next => 1,
        }
    }
}

/// Keys the deck reacts to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowUp,
    ArrowRight,
    ArrowDown,
    Space,
    Home,
    End,
    Escape,
    Other(String),
}

impl Key {
    /// Parse a browser `KeyboardEvent.key` value
    pub fn from_name(name: &str) -> Self {
        match name {
            "ArrowLeft" => Key::ArrowLeft,
            "ArrowUp" => Key::ArrowUp,
            "ArrowRight" => Key::ArrowRight,
            "ArrowDown" => Key::ArrowDown,
            " " | "Space" | "Spacebar" => Key::Space,
            "Home" => Key::Home,
            "End" => Key::End,
            "Escape" | "Esc" => Key::Escape,
            other => Key::Other(other.to_string()),
        }
    }
}

/// On-screen controls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Previous,
    Next,
    ThemeToggle,
}

/// Raw user input
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Key(Key),
    /// Touch start and end positions on the x axis
    Swipe { start_x: f64, end_x: f64 },
    Control(Control),
}

/// What an input asks the deck to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavCommand {
    Step(Direction),
    GoTo(usize),
    First,
    Last,
    TogglePresentation,
    ToggleTheme,
}

/// Map an input event to a navigation command.
///
/// Returns `None` for input the deck ignores.
pub fn map_event(event: &InputEvent) -> Option<NavCommand> {
    match event {
        InputEvent::Key(key) => map_key(key),
        InputEvent::Swipe { start_x, end_x } => map_swipe(*start_x, *end_x),
        InputEvent::Control(Control::Previous) => Some(NavCommand::Step(Direction::Previous)),
        InputEvent::Control(Control::Next) => Some(NavCommand::Step(Direction::Next)),
        InputEvent::Control(Control::ThemeToggle) => Some(NavCommand::ToggleTheme),
    }
}

fn map_key(key: &Key) -> Option<NavCommand> {
    match key {
        Key::ArrowLeft | Key::ArrowUp => Some(NavCommand::Step(Direction::Previous)),
        Key::ArrowRight | Key::ArrowDown | Key::Space => Some(NavCommand::Step(Direction::Next)),
        Key::Home => Some(NavCommand::First),
        Key::End => Some(NavCommand::Last),
        Key::Escape => Some(NavCommand::TogglePresentation),
        Key::Other(_) => None,
    }
}

fn map_swipe(start_x: f64, end_x: f64) -> Option<NavCommand> {
    let diff = start_x - end_x;
    if diff.abs() <= SWIPE_THRESHOLD_PX {
        return None;
    }

    // Finger moved left: advance
    if diff > 0.0 {
        Some(NavCommand::Step(Direction::Next))
    } else {
        Some(NavCommand::Step(Direction::Previous))
    }
}
