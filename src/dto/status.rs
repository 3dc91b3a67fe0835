/// Session status as reported by the server, collapsed to the three
/// phases the loop cares about. Ordered so that transitions are monotone:
/// advancing the status is a `max`, never a reassignment backwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Status {
    Created,
    Started,
    Over,
}

impl Status {
    /// Every wire status beyond the two live ones (mate, resignation,
    /// abort, timeout, ...) is terminal as far as the session goes.
    pub fn from_wire(status: &str) -> Self {
        match status {
            "created" => Self::Created,
            "started" => Self::Started,
            _ => Self::Over,
        }
    }
}
