pub mod types;
pub mod host;
pub mod resolver;
pub mod builder;
pub mod flatten;
pub mod identity;
pub mod selection;
pub mod transfer;
pub mod view;
pub mod ingest;
pub mod compose;
pub mod backend;
pub mod config;
pub mod error;

pub use error::{HostError, TreedropError};
pub use types::file::{ContentRef, FileHandle};
pub use types::node::{DirectoryNode, NodeKind};
pub use types::identity::FileIdentity;
pub use types::entry::{EntryHandle, EntryKind, EntrySource};
pub use host::{ChildEnumerator, LeafMaterializer};
pub use resolver::{resolve_entries, DropEvent};
pub use builder::{normalize_roots, TreeBuilder};
pub use flatten::flatten;
pub use identity::{identity_of, IdentityIndex};
pub use selection::{SelectionEvent, SelectionSet, SharedSelection, SubscriptionId};
pub use transfer::{DataTransfer, DragPayload};
pub use view::{visible_rows, ExpansionState, VisibleRow};
pub use ingest::{IngestManifest, Ingestion, Ingestor, ManifestEntry};
pub use compose::{ChatMessage, ComposeSession, SubmitOutcome};
pub use backend::{AttachmentRef, BackendError, ChatBackend, ChatReply, ChatRequest, IngestNotifier};
pub use config::{load_config, save_config, TreedropConfig};

/// Name of the synthetic root that holds several top-level drop entries
pub const SYNTHETIC_ROOT_NAME: &str = "root";

/// Path of the synthetic root
pub const SYNTHETIC_ROOT_PATH: &str = "/";
