//! Execution timeline (Gantt chart) model.
//!
//! A timeline is an ordered, contiguous, non-overlapping sequence of
//! busy and idle segments starting at t=0.

use serde::{Deserialize, Serialize};

/// Whether the CPU was running a process or idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SegmentKind {
    /// The CPU ran a process.
    #[serde(rename = "process")]
    Busy,
    /// No process was ready.
    #[serde(rename = "idle")]
    Idle,
}

/// Strategy-specific segment annotations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SegmentAnnotation {
    /// Round Robin: dispatch count so far and work left afterwards.
    RoundRobin {
        quantum_number: u32,
        remaining_time_after: i64,
    },
    /// SJF: 1-based rank in the execution order and the declared arrival
    /// (display only, never used for scheduling).
    Sjf {
        execution_order: usize,
        declared_arrival_time: i64,
    },
}

/// One slice of the execution timeline: `[start, end)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineSegment {
    /// Busy or idle.
    #[serde(rename = "type")]
    pub kind: SegmentKind,
    /// Running process (busy segments only).
    #[serde(rename = "pid", default, skip_serializing_if = "Option::is_none")]
    pub process_id: Option<String>,
    /// Segment start.
    pub start: i64,
    /// Segment end (exclusive).
    pub end: i64,
    /// `end - start`.
    pub duration: i64,
    /// Strategy-specific details.
    #[serde(flatten)]
    pub annotation: Option<SegmentAnnotation>,
}

impl TimelineSegment {
    /// Creates a busy segment for `process_id`.
    pub fn busy(process_id: impl Into<String>, start: i64, end: i64) -> Self {
        Self {
            kind: SegmentKind::Busy,
            process_id: Some(process_id.into()),
            start,
            end,
            duration: end - start,
            annotation: None,
        }
    }

    /// Creates an idle segment.
    pub fn idle(start: i64, end: i64) -> Self {
        Self {
            kind: SegmentKind::Idle,
            process_id: None,
            start,
            end,
            duration: end - start,
            annotation: None,
        }
    }

    /// Attaches an annotation.
    pub fn with_annotation(mut self, annotation: SegmentAnnotation) -> Self {
        self.annotation = Some(annotation);
        self
    }

    #[inline]
    pub fn is_busy(&self) -> bool {
        self.kind == SegmentKind::Busy
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        self.kind == SegmentKind::Idle
    }

    /// Whether this segment ran the given process.
    pub fn runs(&self, process_id: &str) -> bool {
        self.process_id.as_deref() == Some(process_id)
    }
}

/// Sum of all segment durations.
pub fn total_duration(timeline: &[TimelineSegment]) -> i64 {
    timeline.iter().map(|s| s.duration).sum()
}

/// Total busy time spent on one process.
pub fn busy_time(timeline: &[TimelineSegment], process_id: &str) -> i64 {
    timeline
        .iter()
        .filter(|s| s.runs(process_id))
        .map(|s| s.duration)
        .sum()
}

/// Whether segments start at 0, are non-empty, and each begins where
/// the previous one ended.
pub fn is_contiguous(timeline: &[TimelineSegment]) -> bool {
    let mut clock = 0;
    for segment in timeline {
        if segment.start != clock || segment.end <= segment.start {
            return false;
        }
        clock = segment.end;
    }
    true
}
