pub mod event;
pub mod identifier;
pub mod metadata;
pub mod tracker_type;

// Re-export commonly used types
pub use event::{Event, EventPayload, EventStatus, EventsPayload};
pub use identifier::{IdScheme, IdSchemeParams, MetadataIdentifier};
pub use metadata::{IdentifiableObject, MetadataCatalog, OrganisationUnit, Program, ProgramStage};
pub use tracker_type::TrackerType;
