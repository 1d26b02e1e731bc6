//! Presentation Layer
//!
//! This layer handles:
//! - CLI argument parsing (via clap)
//! - Creating use cases with infrastructure dependencies
//!
//! ## Structure
//!
//! - `cli` - Argument definitions
//! - `factory` - Creates use cases with proper dependencies (dependency injection)
//!
//! ## Usage
//!
//! ```ignore
//! use edgeship::presentation::factory;
//!
//! // Create deploy use case with all dependencies wired up
//! let use_case = factory::create_deploy_use_case(control_plane);
//! let result = use_case.execute(&options);
//! ```

pub mod cli;
pub mod factory;

pub use cli::{Cli, ColorWhen, Commands};
pub use factory::{create_control_plane, create_deploy_use_case};
