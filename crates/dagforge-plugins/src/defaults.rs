use indexmap::IndexMap;

use dagforge_fold::Interpreter;

use crate::error::CompositionError;
use crate::plugin::Plugin;

/// Merges each plugin's handlers into one flat dispatch table: an
/// override for a plugin's name takes precedence over its own default
/// interpreter; a plugin with no node kinds is skipped entirely; a
/// plugin with node kinds but neither an override nor a default is a
/// [`CompositionError::NoInterpreter`]. Later plugins in the list win
/// over earlier ones on overlapping kinds (last-writer-wins).
pub fn defaults(
    plugins: Vec<Plugin>,
    mut overrides: IndexMap<String, Interpreter>,
) -> Result<Interpreter, CompositionError> {
    let mut composite = Interpreter::new();
    for plugin in plugins {
        if let Some(over) = overrides.shift_remove(&plugin.name) {
            composite.extend(over);
            continue;
        }
        if let Some(factory) = &plugin.default_interpreter {
            composite.extend(factory());
            continue;
        }
        if plugin.node_kinds.is_empty() {
            continue;
        }
        return Err(CompositionError::NoInterpreter { name: plugin.name });
    }
    Ok(composite)
}
