pub enum Event {
    SimEvent(SimEvent),
    AppEvent(AppEvent),
}

#[derive(Debug, PartialEq, Eq)]
pub enum SimEvent {
    /// Pointer press on the terminal character at `(column, row)`
    Click { column: u16, row: u16 },

    /// Start when stopped, pause when running
    ToggleRunning,

    /// Kill every cell
    Reset,

    /// Shorten the interval by one speed step
    Faster,

    /// Lengthen the interval by one speed step
    Slower,
}

#[derive(Debug, PartialEq, Eq)]
pub enum AppEvent {
    /// Log the grid as text
    Dump,

    /// Exit the application
    Exit,
}
