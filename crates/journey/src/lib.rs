pub mod extract;
pub mod pivot;
pub mod query;

pub use extract::{extract_journeys, JourneyRow};
pub use pivot::{StepRow, StepTable};
pub use query::{JourneyKind, JourneyQuery, ParticipantFilter};
