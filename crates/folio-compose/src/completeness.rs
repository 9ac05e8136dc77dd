use std::collections::HashSet;

/// Whether every declared data-dependency source has produced data. While
/// incomplete, composition withholds rendering entirely so nothing reads
/// through a partially-populated mapping.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Completeness {
    #[default]
    Incomplete,
    Complete,
}

impl Completeness {
    pub fn is_complete(self) -> bool {
        matches!(self, Completeness::Complete)
    }
}

impl From<bool> for Completeness {
    fn from(complete: bool) -> Self {
        if complete {
            Completeness::Complete
        } else {
            Completeness::Incomplete
        }
    }
}

/// Tracks which declared sources have reported data. Declaring a new source
/// after the gate opened moves it back to incomplete until that source
/// reports too.
#[derive(Debug, Default)]
pub struct CompletenessTracker {
    declared: HashSet<String>,
    reported: HashSet<String>,
}

impl CompletenessTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn declare(&mut self, name: impl Into<String>) {
        self.declared.insert(name.into());
    }

    /// The source has produced data.
    pub fn report(&mut self, name: impl Into<String>) {
        self.reported.insert(name.into());
    }

    /// The source never produces data; counts as reported.
    pub fn exempt(&mut self, name: impl Into<String>) {
        self.reported.insert(name.into());
    }

    pub fn state(&self) -> Completeness {
        let all_reported = self
            .declared
            .iter()
            .all(|name| self.reported.contains(name));
        Completeness::from(all_reported)
    }

    pub fn reset(&mut self) {
        self.declared.clear();
        self.reported.clear();
    }
}
