//! # Interface Descriptors
//!
//! The JSON document a program publishes so clients can find it by name and
//! encode calls to it. Layout follows the `target/idl/<name>.json` convention.

use crate::entities::{Discriminator, Pubkey};
use crate::errors::WireError;
use serde::{Deserialize, Serialize};

/// A program's interface descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Idl {
    /// Program address.
    pub address: Pubkey,
    /// Name and version.
    pub metadata: IdlMetadata,
    /// Callable instructions.
    pub instructions: Vec<IdlInstruction>,
    /// Account types owned by the program.
    #[serde(default)]
    pub accounts: Vec<IdlAccount>,
    /// Events emitted by the program.
    #[serde(default)]
    pub events: Vec<IdlEvent>,
    /// Custom error codes.
    #[serde(default)]
    pub errors: Vec<IdlErrorCode>,
    /// User-defined types referenced by args, accounts and events.
    #[serde(default)]
    pub types: Vec<IdlTypeDef>,
}

/// Program metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdlMetadata {
    /// Program name (snake_case).
    pub name: String,
    /// Program version.
    pub version: String,
}

/// A callable instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdlInstruction {
    pub name: String,
    pub discriminator: Discriminator,
    #[serde(default)]
    pub accounts: Vec<IdlInstructionAccount>,
    #[serde(default)]
    pub args: Vec<IdlField>,
}

/// An account slot expected by an instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdlInstructionAccount {
    pub name: String,
    #[serde(default)]
    pub writable: bool,
    #[serde(default)]
    pub signer: bool,
    /// Fixed address, resolved automatically by clients.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Pubkey>,
}

/// A named, typed field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdlField {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: IdlType,
}

/// Argument and field types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdlType {
    Bool,
    U8,
    U16,
    U32,
    U64,
    I64,
    String,
    Pubkey,
    Bytes,
    Option(Box<IdlType>),
    Vec(Box<IdlType>),
    Defined(IdlDefined),
}

/// Reference to an entry of [`Idl::types`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdlDefined {
    pub name: String,
}

/// An account type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdlAccount {
    pub name: String,
    pub discriminator: Discriminator,
}

/// An event type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdlEvent {
    pub name: String,
    pub discriminator: Discriminator,
}

/// A custom program error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdlErrorCode {
    pub code: u32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
}

/// A user-defined type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdlTypeDef {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: IdlTypeDefTy,
}

/// Shape of a user-defined type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum IdlTypeDefTy {
    Struct { fields: Vec<IdlField> },
    Enum { variants: Vec<IdlEnumVariant> },
}

/// A unit enum variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdlEnumVariant {
    pub name: String,
}

/// Folds a name for lookups: lowercase with `_` and `-` removed.
///
/// `Supercollab`, `supercollab` and `super_collab` all fold to the same key,
/// as do `createProject` and `create_project`.
pub fn normalize_name(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

impl Idl {
    /// Program name from the metadata.
    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    /// Finds an instruction by name, ignoring case and separators.
    pub fn instruction(&self, name: &str) -> Option<&IdlInstruction> {
        let key = normalize_name(name);
        self.instructions
            .iter()
            .find(|ix| normalize_name(&ix.name) == key)
    }

    /// Finds a user-defined type by exact name.
    pub fn type_def(&self, name: &str) -> Option<&IdlTypeDef> {
        self.types.iter().find(|t| t.name == name)
    }

    /// Finds a custom error by code.
    pub fn error(&self, code: u32) -> Option<&IdlErrorCode> {
        self.errors.iter().find(|e| e.code == code)
    }

    /// Parses an IDL document.
    pub fn from_json(text: &str) -> Result<Self, WireError> {
        serde_json::from_str(text).map_err(|e| WireError::InvalidIdl(e.to_string()))
    }

    /// Renders the IDL as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, WireError> {
        serde_json::to_string_pretty(self).map_err(|e| WireError::InvalidIdl(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Idl {
        Idl {
            address: Pubkey::new([9u8; 32]),
            metadata: IdlMetadata {
                name: "supercollab".into(),
                version: "0.1.0".into(),
            },
            instructions: vec![IdlInstruction {
                name: "update_project_state".into(),
                discriminator: [1; 8],
                accounts: vec![IdlInstructionAccount {
                    name: "project".into(),
                    writable: true,
                    signer: false,
                    address: None,
                }],
                args: vec![IdlField {
                    name: "new_state".into(),
                    ty: IdlType::Defined(IdlDefined {
                        name: "ProjectState".into(),
                    }),
                }],
            }],
            accounts: vec![],
            events: vec![],
            errors: vec![IdlErrorCode {
                code: 6000,
                name: "InvalidStateTransition".into(),
                msg: Some("Invalid state transition".into()),
            }],
            types: vec![IdlTypeDef {
                name: "ProjectState".into(),
                ty: IdlTypeDefTy::Enum {
                    variants: vec![IdlEnumVariant {
                        name: "Active".into(),
                    }],
                },
            }],
        }
    }

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("Supercollab"), "supercollab");
        assert_eq!(normalize_name("createProject"), normalize_name("create_project"));
    }

    #[test]
    fn test_instruction_lookup_ignores_case() {
        let idl = sample();
        assert!(idl.instruction("updateProjectState").is_some());
        assert!(idl.instruction("update_project_state").is_some());
        assert!(idl.instruction("initialize").is_none());
    }

    #[test]
    fn test_type_json_shape() {
        let json = serde_json::to_value(IdlType::U64).unwrap();
        assert_eq!(json, serde_json::json!("u64"));

        let json = serde_json::to_value(IdlType::Defined(IdlDefined {
            name: "ProjectState".into(),
        }))
        .unwrap();
        assert_eq!(json["defined"]["name"], "ProjectState");
    }

    #[test]
    fn test_idl_json_document() {
        let idl = sample();
        let text = idl.to_json_pretty().unwrap();
        assert!(text.contains("\"kind\": \"enum\""));
        assert_eq!(Idl::from_json(&text).unwrap(), idl);
        assert!(Idl::from_json("{}").is_err());
        assert_eq!(idl.error(6000).unwrap().name, "InvalidStateTransition");
    }
}
