//! Descriptor of the launched node process

use super::parameters::ParameterLayer;
use serde::{Deserialize, Serialize};

/// Package providing the fusion node
pub const NODE_PACKAGE: &str = "online_fgo";
/// Executable of the fusion node
pub const NODE_EXECUTABLE: &str = "online_fgo_node";
/// Node name
pub const NODE_NAME: &str = "online_fgo";
/// Namespace of the deployment
pub const NODE_NAMESPACE: &str = "deutschland";

/// Where the runtime sends the process output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Print on the launching terminal
    #[default]
    Screen,
    /// Write to the runtime log file
    Log,
    Both,
}

/// Topic remapping rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Remapping {
    pub from: String,
    pub to: String,
}

/// Everything the runtime needs to spawn the node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessDescriptor {
    pub package: String,
    pub executable: String,
    pub name: String,
    pub namespace: String,
    pub output: OutputMode,
    pub emulate_tty: bool,
    /// Parameter sources, lowest precedence first
    pub parameters: Vec<ParameterLayer>,
    /// Unused unless set by the caller
    #[serde(default)]
    pub remappings: Vec<Remapping>,
    /// Command prefix such as a debugger invocation, unset by default
    #[serde(default)]
    pub prefix: Option<String>,
    /// Launch argument forwarded as `--ros-args --log-level`, unset by default
    #[serde(default)]
    pub log_level_argument: Option<String>,
}

impl ProcessDescriptor {
    /// Descriptor of the `online_fgo` node with the given parameter layers
    pub fn online_fgo(parameters: Vec<ParameterLayer>) -> Self {
        Self {
            package: NODE_PACKAGE.to_string(),
            executable: NODE_EXECUTABLE.to_string(),
            name: NODE_NAME.to_string(),
            namespace: NODE_NAMESPACE.to_string(),
            output: OutputMode::Screen,
            emulate_tty: true,
            parameters,
            remappings: Vec::new(),
            prefix: None,
            log_level_argument: None,
        }
    }

    /// Node name qualified by its namespace, e.g. `/deutschland/online_fgo`
    pub fn fully_qualified_name(&self) -> String {
        let namespace = self.namespace.trim_matches('/');
        if namespace.is_empty() {
            format!("/{}", self.name)
        } else {
            format!("/{}/{}", namespace, self.name)
        }
    }

    /// Extra command-line arguments for the node.
    ///
    /// Empty unless `log_level_argument` is set, in which case the runtime
    /// substitutes the named launch argument into `--log-level`.
    pub fn ros_arguments(&self) -> Vec<String> {
        match &self.log_level_argument {
            Some(argument) => vec![
                "--ros-args".to_string(),
                "--log-level".to_string(),
                format!("$(arg {})", argument),
            ],
            None => Vec::new(),
        }
    }
}
