//! Process scheduling domain models.
//!
//! Provides the data types shared by every strategy: the caller-supplied
//! process descriptor, the mutable process record, and the execution
//! timeline.
//!
//! # Glossary
//!
//! | Abbrev. | Field | Meaning |
//! |---------|-------|---------|
//! | AT | `arrival_time` | Time the process becomes ready |
//! | BT | `burst_time` | CPU time required |
//! | CT | `completion_time` | Time the process finishes |
//! | TT | `turnaround_time` | Time spent in the system |
//! | WT | `waiting_time` | Time spent ready but not running |
//! | NTAT | `normalized_turnaround_time` | TT / BT (Round Robin) |

mod process;
pub mod timeline;

pub use process::{ProcessRecord, ProcessSpec, RoundRobinMetrics};
pub use timeline::{SegmentAnnotation, SegmentKind, TimelineSegment};
