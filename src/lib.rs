//! In-memory model of Avro protocol definitions -- records, enums, errors,
//! RPC methods, and their field types -- plus a plugin contract for turning
//! one parsed protocol into generated source files.
//!
//! This crate sits between a parser and a set of code generators. The parser
//! builds a [`ProtoDef`] through the validating constructors here; the
//! aggregate is then handed, unmodified, to any number of registered
//! [`ProtoDefPlugin`]s, each of which produces one output file. All
//! structural invariants (union legality, name uniqueness, recursive
//! well-formedness) are enforced once, at construction, so neither the parser
//! nor any plugin re-derives them.
//!
//! # Building a protocol
//!
//! ```
//! use avrodef::{
//!     EnumDef, FieldDef, FieldType, PathInfo, PrimitiveKind, ProtoDef, RecordDef,
//! };
//!
//! let status = EnumDef::new("Status", ["ACTIVE", "DELETED"])?;
//! let user = RecordDef::new(
//!     "User",
//!     vec![
//!         FieldDef::new("id", FieldType::primitive(PrimitiveKind::Long))?,
//!         FieldDef::new("status", FieldType::reference("Status")?)?,
//!     ],
//! )?;
//!
//! let proto = ProtoDef::new(
//!     PathInfo::new("user.avdl", None, "/schemas/user.avdl")?,
//!     "UserService",
//!     Some("org.example".to_string()),
//!     vec![user],
//!     vec![status],
//!     vec![],
//!     vec![],
//! )?;
//! assert_eq!(proto.full_name(), "org.example.UserService");
//! # Ok::<(), avrodef::ModelError>(())
//! ```
//!
//! # Running plugins
//!
//! ```
//! use avrodef::{generate_all, PathInfo, ProtoDef, ProtocolJsonPlugin};
//!
//! # fn main() -> miette::Result<()> {
//! let proto = ProtoDef::new(
//!     PathInfo::new("ping.avdl", None, "/ping.avdl")?,
//!     "Ping",
//!     None,
//!     vec![], vec![], vec![], vec![],
//! )?;
//!
//! let files = generate_all(&[&ProtocolJsonPlugin], &proto)?;
//! assert_eq!(files[0].file_name, "Ping.avpr");
//! # Ok(())
//! # }
//! ```
//!
//! # Error handling
//!
//! Every constructor is fail-fast and returns [`ModelError`]; no
//! partially-valid value is ever observable. `ModelError` and
//! [`PluginError`] implement [`miette::Diagnostic`], so orchestrators
//! holding a `miette::Result` get stable error codes and help text when
//! printing with `{:?}`.

pub mod error;
pub mod generate;
pub mod model;
pub mod plugin;
pub mod registry;

// Re-export the public API at the crate root.
pub use error::ModelError;
pub use generate::json::ProtocolJsonPlugin;
pub use model::declarations::{EnumDef, ErrorDef, FieldDef, RecordDef};
pub use model::field_type::{FieldType, PrimitiveKind};
pub use model::method::{HttpVerb, MethodDef, ParamDef, ReturnType};
pub use model::protocol::{PathInfo, ProtoDef};
pub use plugin::{
    GeneratedCode, PluginError, PluginOutcome, ProtoDefPlugin, generate_all, run_plugins,
};
pub use registry::{DeclKind, DeclRegistry, UnresolvedRef};
