use std::fmt;

/// Pipeline stages, in execution order
///
/// A run walks these stages strictly forward. Any stage before `Done` may end
/// the run in `Failed(kind)` instead, represented by
/// [`MigrationError`](super::MigrationError).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MigrationStage {
    ReadingInput,
    Composing,
    Requesting,
    Extracting,
    Validating,
    Persisting,
    Done,
}

impl MigrationStage {
    pub fn as_str(self) -> &'static str {
        match self {
            MigrationStage::ReadingInput => "reading-input",
            MigrationStage::Composing => "composing",
            MigrationStage::Requesting => "requesting",
            MigrationStage::Extracting => "extracting",
            MigrationStage::Validating => "validating",
            MigrationStage::Persisting => "persisting",
            MigrationStage::Done => "done",
        }
    }
}

impl fmt::Display for MigrationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
