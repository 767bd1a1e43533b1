// ==============================================================================
// Plugin Contract: One Aggregate In, One Generated File Out
// ==============================================================================
//
// A plugin is a deterministic transform from one `ProtoDef` to one generated
// file. Plugins receive the aggregate by shared reference and cannot mutate
// it, so any number of plugins can run over the same aggregate, in any order
// or in parallel, without affecting each other.
//
// Failure is scoped to the invocation: `run_plugins` returns one result slot
// per plugin, so a plugin that cannot handle an aggregate never blocks or
// corrupts the other plugins' output. A plugin that needs to emit several
// files is registered once per file.

use thiserror::Error;

use crate::error::ModelError;
use crate::model::protocol::ProtoDef;

/// One output artifact produced by a plugin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedCode {
    pub file_name: String,
    /// Opaque text blob; the orchestrator writes it out verbatim.
    pub contents: String,
}

impl GeneratedCode {
    pub fn new(
        file_name: impl Into<String>,
        contents: impl Into<String>,
    ) -> Result<GeneratedCode, ModelError> {
        let file_name = file_name.into();
        if file_name.is_empty() {
            return Err(ModelError::EmptyFileName);
        }
        Ok(GeneratedCode {
            file_name,
            contents: contents.into(),
        })
    }
}

/// Why a plugin invocation failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PluginError {
    /// The plugin met a type it cannot render. `path` identifies the
    /// offending declaration (`namespace.Record.field`), `kind` the variant
    /// label ([`FieldType::kind_str`](crate::model::field_type::FieldType::kind_str)).
    /// A plugin raising this must not have emitted partial output.
    #[error("plugin `{plugin}` does not support the {kind} type at `{path}`")]
    UnsupportedType {
        plugin: String,
        path: String,
        kind: String,
    },

    /// The plugin produced output that violates the `GeneratedCode`
    /// invariants.
    #[error("plugin `{plugin}` produced invalid output")]
    InvalidOutput {
        plugin: String,
        #[source]
        source: ModelError,
    },
}

impl miette::Diagnostic for PluginError {
    fn code<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        let code = match self {
            PluginError::UnsupportedType { .. } => "avrodef::plugin::unsupported_type",
            PluginError::InvalidOutput { .. } => "avrodef::plugin::invalid_output",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        match self {
            PluginError::UnsupportedType { .. } => Some(Box::new(
                "either extend the plugin to cover this type, or remove the \
                 declaration from the protocols this plugin is configured for",
            )),
            PluginError::InvalidOutput { .. } => None,
        }
    }
}

/// A code generator over protocol definitions.
///
/// Implementations must be deterministic: the same aggregate must produce
/// byte-identical contents on every invocation, so downstream builds are
/// reproducible. Implementations must not inspect any ambient state (clock,
/// environment, filesystem) while generating.
pub trait ProtoDefPlugin {
    /// A short identifier for this plugin, used in error reports.
    fn name(&self) -> &str;

    /// Generate one output file from one protocol aggregate.
    fn generate(&self, proto: &ProtoDef) -> Result<GeneratedCode, PluginError>;
}

/// The outcome of one plugin's invocation within [`run_plugins`].
#[derive(Debug)]
pub struct PluginOutcome {
    pub plugin: String,
    pub result: Result<GeneratedCode, PluginError>,
}

/// Run every plugin over one aggregate, collecting one outcome per plugin in
/// input order. A failing plugin occupies its own slot and never suppresses
/// another plugin's output.
#[must_use]
pub fn run_plugins(plugins: &[&dyn ProtoDefPlugin], proto: &ProtoDef) -> Vec<PluginOutcome> {
    plugins
        .iter()
        .map(|plugin| PluginOutcome {
            plugin: plugin.name().to_string(),
            result: plugin.generate(proto),
        })
        .collect()
}

/// Run every plugin over one aggregate and collect all generated files,
/// failing on the first plugin error. The all-or-nothing variant of
/// [`run_plugins`], for orchestrators that treat any failure as fatal.
pub fn generate_all(
    plugins: &[&dyn ProtoDefPlugin],
    proto: &ProtoDef,
) -> miette::Result<Vec<GeneratedCode>> {
    run_plugins(plugins, proto)
        .into_iter()
        .map(|outcome| outcome.result.map_err(miette::Report::new))
        .collect()
}
