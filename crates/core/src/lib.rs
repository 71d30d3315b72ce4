pub mod config;
pub mod domain;
pub mod errors;
pub mod messages;
pub mod notifier;
pub mod policy;
pub mod ports;
pub mod relay;

pub use domain::file::{CallbackEvent, FileRef, Origin};
pub use domain::relay::{RelayReport, RelayResult, RelayStage, RelaySummary};
pub use errors::{IntegrationError, InterfaceError, ValidationError};
pub use notifier::Notifier;
pub use policy::{ArchiveFormat, FilePolicy};
pub use ports::{ConversationPoster, LinkShortener, ObjectStorage, OriginFiles};
pub use relay::{FileRelayPipeline, RelaySettings};
