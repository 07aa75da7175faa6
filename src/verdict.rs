//! Mapping a confidence score to the on/off-task verdict.

use std::fmt;

/// Scores strictly above this count as on task.
pub const ON_TASK_THRESHOLD: f32 = 0.5;

/// Binary outcome printed by the binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// `on task`
    OnTask,
    /// `off task`
    OffTask,
}

impl Verdict {
    /// Depends on the score alone. NaN is never above the threshold.
    pub fn from_score(score: f32) -> Self {
        if score > ON_TASK_THRESHOLD {
            Verdict::OnTask
        } else {
            Verdict::OffTask
        }
    }

    /// The exact line printed for this verdict.
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::OnTask => "on task",
            Verdict::OffTask => "off task",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_is_exclusive() {
        assert_eq!(Verdict::from_score(0.5), Verdict::OffTask);
        assert_eq!(Verdict::from_score(0.500_001), Verdict::OnTask);
    }

    #[test]
    fn extremes() {
        assert_eq!(Verdict::from_score(1.0), Verdict::OnTask);
        assert_eq!(Verdict::from_score(0.0), Verdict::OffTask);
        assert_eq!(Verdict::from_score(f32::NAN), Verdict::OffTask);
    }

    #[test]
    fn renders_lowercase_phrases() {
        assert_eq!(Verdict::OnTask.to_string(), "on task");
        assert_eq!(Verdict::OffTask.to_string(), "off task");
    }
}
