//! Pipeline states

use serde::Serialize;
use std::fmt;

/// Where a run is in `start → extracted → transformed → loaded → end`
///
/// A failed run stays at the last state it reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PipelineStage {
    Start,
    Extracted,
    Transformed,
    Loaded,
    End,
}

impl PipelineStage {
    /// The state that follows this one
    pub fn next(self) -> Option<Self> {
        match self {
            PipelineStage::Start => Some(PipelineStage::Extracted),
            PipelineStage::Extracted => Some(PipelineStage::Transformed),
            PipelineStage::Transformed => Some(PipelineStage::Loaded),
            PipelineStage::Loaded => Some(PipelineStage::End),
            PipelineStage::End => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStage::Start => "start",
            PipelineStage::Extracted => "extracted",
            PipelineStage::Transformed => "transformed",
            PipelineStage::Loaded => "loaded",
            PipelineStage::End => "end",
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_order() {
        let mut stage = PipelineStage::Start;
        let mut visited = vec![stage];
        while let Some(next) = stage.next() {
            assert!(next > stage);
            visited.push(next);
            stage = next;
        }
        assert_eq!(visited.len(), 5);
        assert_eq!(stage, PipelineStage::End);
    }

    #[test]
    fn test_stage_display() {
        assert_eq!(PipelineStage::Transformed.to_string(), "transformed");
        assert_eq!(
            serde_json::to_string(&PipelineStage::Loaded).unwrap(),
            "\"loaded\""
        );
    }
}
