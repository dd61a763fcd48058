pub mod analysis;
pub mod args;
pub mod error;
pub mod export;
pub mod normalize;
pub mod ranking;
pub mod report;
pub mod session;
pub mod user;
pub mod utils;
pub mod validation;

pub use analysis::{analyze, AnalysisResult, AnalysisSummary, ListKind};
pub use args::Args;
pub use error::ExportError;
pub use export::{analyze_export_files, discover_archive, ExportPaths};
pub use normalize::{normalize, normalize_value};
pub use ranking::{rank, SortDirection, SortToggle};
pub use session::AnalysisSession;
pub use user::{RelationshipCollection, RelationshipKind, User};
pub use validation::{classify, RawExport};
