/// Run of identical observations of one field.
///
/// The window never holds mixed values: a disagreeing observation discards
/// the whole run before it is recorded. `None` (field unresolved) is a value
/// like any other.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConsensusWindow {
    value: Option<String>,
    len: usize,
}

impl ConsensusWindow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an observation. Returns `true` when it disagreed with a
    /// non-empty window and reset it.
    pub fn observe(&mut self, value: Option<String>) -> bool {
        let reset = !self.is_empty() && self.value != value;
        if reset {
            self.len = 0;
        }
        self.value = value;
        self.len += 1;
        reset
    }

    /// Remember only the latest observation, without voting.
    pub fn replace(&mut self, value: Option<String>) {
        self.value = value;
        self.len = 1;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_satisfied(&self, threshold: usize) -> bool {
        self.len >= threshold
    }

    pub fn clear(&mut self) {
        self.value = None;
        self.len = 0;
    }
}
