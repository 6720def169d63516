mod config;
mod slab_loader;

pub use config::{
    ConfigLoadError, DEFAULT_TAX_CONFIG, default_tax_config, load_tax_config, parse_tax_config,
    to_toml_string,
};
pub use slab_loader::{RegimeSlabs, SlabRecord, SlabTableLoader};
