mod automations;
mod collect;
mod host;
mod skills;
mod snapshot;

pub use automations::{build_automations, parse_position_line, AutomationsCollector};
pub use host::HostStats;
pub use skills::{fallback_catalog, SkillCatalogBuilder};
pub use snapshot::{fallback_snapshot, SnapshotBuilder};
