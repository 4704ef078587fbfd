pub mod configuration;
pub mod property;
pub mod step;
pub mod vcs_root_entry;

pub use configuration::*;
pub use property::*;
pub use step::*;
pub use vcs_root_entry::*;
