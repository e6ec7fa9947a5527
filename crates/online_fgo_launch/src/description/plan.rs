//! Effective launch arguments and a human-readable plan

use super::argument::ArgumentDeclaration;
use super::launch::{LaunchDescription, LaunchError};
use super::parameters::ParameterLayer;
use super::process::ProcessDescriptor;
use indexmap::IndexMap;

/// What the runtime would start, with the argument values it would see
#[derive(Debug, Clone)]
pub struct LaunchPlan {
    /// Effective argument values, in first-declaration order
    pub arguments: IndexMap<String, String>,
    /// Declarations replaced by a later declaration of the same name
    pub shadowed: Vec<ArgumentDeclaration>,
    pub process: Option<ProcessDescriptor>,
}

impl LaunchDescription {
    /// Effective argument values after invocation-time overrides.
    ///
    /// Declarations are applied in order, so a later declaration replaces
    /// the default of an earlier one with the same name. Overrides must
    /// name a declared argument.
    pub fn resolve_arguments<'a, I>(
        &self,
        overrides: I,
    ) -> Result<IndexMap<String, String>, LaunchError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut arguments = IndexMap::new();
        for declaration in self.arguments() {
            arguments.insert(declaration.name.clone(), declaration.default_value.clone());
        }

        for (name, value) in overrides {
            match arguments.get_mut(name) {
                Some(slot) => *slot = value.to_string(),
                None => return Err(LaunchError::UnknownArgument(name.to_string())),
            }
        }

        Ok(arguments)
    }

    /// Build a plan for display
    pub fn plan<'a, I>(&self, overrides: I) -> Result<LaunchPlan, LaunchError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let arguments = self.resolve_arguments(overrides)?;

        let declarations: Vec<&ArgumentDeclaration> = self.arguments().collect();
        let shadowed = declarations
            .iter()
            .enumerate()
            .filter(|(index, declaration)| {
                declarations[index + 1..]
                    .iter()
                    .any(|later| later.name == declaration.name)
            })
            .map(|(_, declaration)| (*declaration).clone())
            .collect();

        Ok(LaunchPlan {
            arguments,
            shadowed,
            process: self.process().cloned(),
        })
    }
}

/// Display the launch plan in a human-readable format
impl std::fmt::Display for LaunchPlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Launch Plan")?;
        writeln!(f, "===========")?;
        writeln!(f)?;

        if !self.arguments.is_empty() {
            writeln!(f, "Arguments:")?;
            for (key, value) in &self.arguments {
                writeln!(f, "  {}: {}", key, value)?;
            }
            writeln!(f)?;
        }

        if !self.shadowed.is_empty() {
            writeln!(f, "Shadowed declarations:")?;
            for declaration in &self.shadowed {
                writeln!(
                    f,
                    "  {} ({}): {}",
                    declaration.name, declaration.description, declaration.default_value
                )?;
            }
            writeln!(f)?;
        }

        let Some(process) = &self.process else {
            return writeln!(f, "No process described");
        };

        writeln!(f, "Node: {}", process.fully_qualified_name())?;
        writeln!(f, "  Command: {} {}", process.package, process.executable)?;
        let arguments = process.ros_arguments();
        if !arguments.is_empty() {
            writeln!(f, "  Arguments: {}", arguments.join(" "))?;
        }
        if let Some(prefix) = &process.prefix {
            writeln!(f, "  Prefix: {}", prefix)?;
        }
        writeln!(f, "  Output: {:?}, emulate tty: {}", process.output, process.emulate_tty)?;

        writeln!(f, "  Parameters (lowest precedence first):")?;
        for (i, layer) in process.parameters.iter().enumerate() {
            match layer {
                ParameterLayer::File(path) => writeln!(f, "    {}. {}", i + 1, path.display())?,
                ParameterLayer::Inline(map) if map.is_empty() => {
                    writeln!(f, "    {}. {{}}", i + 1)?
                }
                ParameterLayer::Inline(map) => {
                    writeln!(f, "    {}. inline:", i + 1)?;
                    for (key, value) in map {
                        writeln!(f, "         {}: {}", key, inline_value(value))?;
                    }
                }
            }
        }

        if !process.remappings.is_empty() {
            writeln!(f, "  Remappings:")?;
            for remapping in &process.remappings {
                writeln!(f, "    {} -> {}", remapping.from, remapping.to)?;
            }
        }

        Ok(())
    }
}

/// Single-line YAML rendering of an inline parameter, `Debug` if that fails
fn inline_value(value: &serde_yaml::Value) -> String {
    match serde_yaml::to_string(value) {
        Ok(rendered) => rendered.trim_end().replace('\n', " "),
        Err(e) => {
            log::debug!("Falling back to debug output for inline parameter: {}", e);
            format!("{:?}", value)
        }
    }
}
