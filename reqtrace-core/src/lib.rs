pub mod columns;
pub mod config;
pub mod error;
pub mod export;
pub mod extractor;
pub mod models;
pub mod references;
pub mod resolver;
pub mod workbook;

// Re-export commonly used types
pub use columns::ColumnMap;
pub use config::{get_config_path, ExtractorConfig};
pub use error::ExtractError;
pub use export::{export_csv, export_json, write_csv, write_json, Quoting};
pub use extractor::{FinalizeReport, IngestStats, RequirementExtractor, ResolvedText};
pub use models::{Requirement, RequirementRegistry};
pub use references::{is_requirement_id, parse_child_references, parse_parent_reference, Reference};
pub use resolver::{FirstTextResolver, Resolver, ResolverError, ScriptedResolver};
pub use workbook::{Sheet, Workbook};
