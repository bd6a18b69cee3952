//! Domain layer — pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod collect;
pub mod config;
pub mod doctor;
pub mod error;
pub mod history;
pub mod host;
pub mod settings;

#[allow(unused_imports)]
pub use collect::{CollectOutcome, CollectRequest, TransportChoice};
#[allow(unused_imports)]
pub use config::{HaulConfig, validate_config_key, validate_config_value};
#[allow(unused_imports)]
pub use doctor::{DoctorChecks, SshChecks, StoreChecks, ToolChecks, collect_issues};
#[allow(unused_imports)]
pub use error::{ConfigError, HostError, RegistryError, TransferError};
#[allow(unused_imports)]
pub use history::CollectionRecord;
#[allow(unused_imports)]
pub use host::{remote_source, staged_source, validate_host_name};
#[allow(unused_imports)]
pub use settings::{HostSettings, TransportKind};
