pub mod global;
pub mod model;


pub use global::CONFIG;
pub use model::{
    ConstraintConfig, IngestConfig, LoggingConfig, Settings, StoreConfig, ValidationConfig,
    load_settings, load_settings_from,
};
