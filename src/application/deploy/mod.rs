//! Deploy Module
//!
//! Orchestrates the deployment flow for Edgeship.
//!
//! ## Structure
//!
//! - `options` - Configuration types (`DeployOptions`)
//! - `result` - Result types (`DeployResult`)
//! - `use_case` - Core use case logic (`DeployUseCase`)
//!
//! ## Usage
//!
//! ```ignore
//! use edgeship::application::deploy::{DeployOptions, DeployUseCase};
//!
//! let use_case = DeployUseCase::new(PassthroughBundler::new(), Some(Arc::new(control_plane)));
//! let result = use_case.execute(&DeployOptions::new(cwd))?;
//! ```

mod options;
mod result;
mod use_case;

pub use options::DeployOptions;
pub use result::DeployResult;
pub use use_case::DeployUseCase;
