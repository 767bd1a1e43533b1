//! The protocol definition domain model.
//!
//! Everything here is an immutable value: constructors validate, and once a
//! value is built it is never mutated. The aggregate root is
//! [`protocol::ProtoDef`]; it owns every declaration, and declarations own
//! their field types as a tree (recursion across declarations is expressed
//! only by name, via [`field_type::FieldType::Ref`]).

pub mod declarations;
pub mod field_type;
pub mod method;
pub(crate) mod names;
pub mod protocol;
