//! online_fgo Launch Composition
//!
//! Builds the launch description of the `online_fgo` sensor-fusion node for
//! one configuration profile. The description is a plain value; spawning
//! the node is left to the launch runtime that consumes it.
//!
//! # Overview
//!
//! - Profile layers (`common`, `integrator`, `optimizer`,
//!   `sensor_parameters`) resolve to `<share>/config/<profile>/<layer>.yaml`
//!   through an injected [`PackageLocator`]
//! - One launch argument is declared per layer, plus `log_level`
//! - The node receives the layer files in precedence order followed by an
//!   inline override mapping
//!
//! # Example Output
//!
//! ```yaml
//! actions:
//! - action: declare_argument
//!   name: log_level
//!   default_value: debug
//!   description: Logging level
//! - action: declare_argument
//!   name: config_common_path
//!   default_value: /opt/ros/humble/share/online_fgo/config/deutschland_lc/common.yaml
//!   description: CommonParameters
//! # ... integrator, optimizer, sensor_parameters
//! - action: node
//!   package: online_fgo
//!   executable: online_fgo_node
//!   name: online_fgo
//!   namespace: deutschland
//!   output: screen
//!   emulate_tty: true
//!   parameters:
//!   - /opt/ros/humble/share/online_fgo/config/deutschland_lc/common.yaml
//!   # ...
//!   - {}
//! ```

pub mod cli;
pub mod config;
pub mod description;
pub mod profile;

pub use cli::{LaunchArgs, OutputFormat};
pub use config::{ComposerConfig, ConfigError};
pub use description::{
    generate_launch_description, ArgumentDeclaration, ArgumentNaming, ArgumentRegistry,
    LaunchAction, LaunchComposer, LaunchDescription, LaunchError, LaunchPlan, OutputMode,
    ParameterLayer, ParameterOverrides, ProcessDescriptor, Remapping,
};
pub use profile::{
    AmentIndexLocator, ConfigurationProfile, LayerId, PackageLocator, ProfileResolver,
    ResolutionError, ResolvedProfile, StaticLocator,
};
