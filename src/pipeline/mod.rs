mod config;
pub mod mapper;
pub mod reorder;
mod rule_based;
pub mod trace;

pub use config::{init_default_config, GlossConfig, CONFIG_FILE_NAME};
pub use mapper::GlossMapper;
pub use reorder::{reorder_for_isl, Constituent};
pub use rule_based::RuleBasedGlossPipeline;
pub use trace::{GlossTrace, TraceWriter};
