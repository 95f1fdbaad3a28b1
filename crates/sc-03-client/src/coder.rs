//! # Instruction Coder
//!
//! Encodes JSON arguments into instruction data using the types declared in
//! the IDL. The byte layout matches `bincode` with its default options:
//!
//! | IDL type | Bytes |
//! |----------|-------|
//! | `bool`, `u8` | 1 |
//! | `u16` / `u32` / `u64` / `i64` | little-endian, fixed width |
//! | `string`, `bytes`, `vec<T>` | `u64` length prefix, then elements |
//! | `option<T>` | `0` or `1` tag, then `T` if present |
//! | `pubkey` | 32 raw bytes |
//! | defined enum | `u32` variant index |
//! | defined struct | fields in declaration order |

use serde_json::Value;
use shared_types::{normalize_name, Idl, IdlField, IdlInstruction, IdlType, IdlTypeDefTy, Pubkey};
use thiserror::Error;

/// An argument that does not match its declared type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {reason}")]
pub struct ArgError {
    /// Path to the offending value, e.g. `new_state` or `items[2]`.
    pub field: String,
    pub reason: String,
}

impl ArgError {
    fn new(field: &str, reason: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

/// Builds instruction data: discriminator followed by the encoded arguments.
///
/// Arguments are positional, one per IDL arg.
pub fn encode_instruction(
    idl: &Idl,
    instruction: &IdlInstruction,
    args: &[Value],
) -> Result<Vec<u8>, ArgError> {
    if args.len() != instruction.args.len() {
        return Err(ArgError::new(
            "args",
            format!(
                "expected {} argument(s), got {}",
                instruction.args.len(),
                args.len()
            ),
        ));
    }

    let mut out = instruction.discriminator.to_vec();
    for (field, value) in instruction.args.iter().zip(args) {
        encode_value(idl, &field.ty, value, &field.name, &mut out)?;
    }
    Ok(out)
}

/// Encodes one value of type `ty` onto `out`.
pub fn encode_value(
    idl: &Idl,
    ty: &IdlType,
    value: &Value,
    path: &str,
    out: &mut Vec<u8>,
) -> Result<(), ArgError> {
    match ty {
        IdlType::Bool => {
            let b = value
                .as_bool()
                .ok_or_else(|| ArgError::new(path, "expected a bool"))?;
            out.push(u8::from(b));
        }
        IdlType::U8 => out.push(unsigned::<u8>(value, path)?),
        IdlType::U16 => out.extend_from_slice(&unsigned::<u16>(value, path)?.to_le_bytes()),
        IdlType::U32 => out.extend_from_slice(&unsigned::<u32>(value, path)?.to_le_bytes()),
        IdlType::U64 => out.extend_from_slice(&unsigned::<u64>(value, path)?.to_le_bytes()),
        IdlType::I64 => {
            let n = match value {
                Value::String(s) => s.parse().ok(),
                other => other.as_i64(),
            }
            .ok_or_else(|| ArgError::new(path, "expected an i64"))?;
            out.extend_from_slice(&n.to_le_bytes());
        }
        IdlType::String => {
            let s = value
                .as_str()
                .ok_or_else(|| ArgError::new(path, "expected a string"))?;
            write_len(s.len(), out);
            out.extend_from_slice(s.as_bytes());
        }
        IdlType::Pubkey => {
            let key: Pubkey = value
                .as_str()
                .and_then(|s| s.parse().ok())
                .ok_or_else(|| ArgError::new(path, "expected a 64-character hex public key"))?;
            out.extend_from_slice(key.as_bytes());
        }
        IdlType::Bytes => {
            let bytes: Vec<u8> = serde_json::from_value(value.clone())
                .map_err(|_| ArgError::new(path, "expected an array of bytes"))?;
            write_len(bytes.len(), out);
            out.extend_from_slice(&bytes);
        }
        IdlType::Option(inner) => {
            if value.is_null() {
                out.push(0);
            } else {
                out.push(1);
                encode_value(idl, inner, value, path, out)?;
            }
        }
        IdlType::Vec(inner) => {
            let items = value
                .as_array()
                .ok_or_else(|| ArgError::new(path, "expected an array"))?;
            write_len(items.len(), out);
            for (i, item) in items.iter().enumerate() {
                encode_value(idl, inner, item, &format!("{path}[{i}]"), out)?;
            }
        }
        IdlType::Defined(defined) => {
            let def = idl
                .type_def(&defined.name)
                .ok_or_else(|| ArgError::new(path, format!("unknown type {}", defined.name)))?;
            match &def.ty {
                IdlTypeDefTy::Enum { variants } => {
                    let name = variant_name(value)
                        .ok_or_else(|| ArgError::new(path, "expected an enum variant"))?;
                    let key = normalize_name(&name);
                    let index = variants
                        .iter()
                        .position(|v| normalize_name(&v.name) == key)
                        .ok_or_else(|| {
                            ArgError::new(path, format!("unknown {} variant {name}", def.name))
                        })?;
                    out.extend_from_slice(&(index as u32).to_le_bytes());
                }
                IdlTypeDefTy::Struct { fields } => encode_struct(idl, fields, value, path, out)?,
            }
        }
    }
    Ok(())
}

fn encode_struct(
    idl: &Idl,
    fields: &[IdlField],
    value: &Value,
    path: &str,
    out: &mut Vec<u8>,
) -> Result<(), ArgError> {
    let object = value
        .as_object()
        .ok_or_else(|| ArgError::new(path, "expected an object"))?;
    for field in fields {
        let field_path = format!("{path}.{}", field.name);
        let v = object
            .get(&field.name)
            .ok_or_else(|| ArgError::new(&field_path, "missing field"))?;
        encode_value(idl, &field.ty, v, &field_path, out)?;
    }
    Ok(())
}

/// Accepts `"Completed"` or the object form `{ "completed": {} }`.
fn variant_name(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Object(map) if map.len() == 1 => map.keys().next().cloned(),
        _ => None,
    }
}

/// Accepts JSON numbers and decimal strings (for values beyond 2^53).
fn unsigned<T: TryFrom<u64>>(value: &Value, path: &str) -> Result<T, ArgError> {
    let n = match value {
        Value::String(s) => s.parse::<u64>().ok(),
        other => other.as_u64(),
    }
    .ok_or_else(|| ArgError::new(path, "expected an unsigned integer"))?;
    T::try_from(n).map_err(|_| {
        ArgError::new(
            path,
            format!("{n} out of range for {}", std::any::type_name::<T>()),
        )
    })
}

fn write_len(len: usize, out: &mut Vec<u8>) {
    out.extend_from_slice(&(len as u64).to_le_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;
    use sc_01_projects::instructions::ProjectInstruction;
    use sc_01_projects::prelude::ProjectState;
    use serde_json::json;

    fn program_idl() -> Idl {
        sc_01_projects::idl::idl()
    }

    fn encode(name: &str, args: &[Value]) -> Result<Vec<u8>, ArgError> {
        let idl = program_idl();
        let ix = idl.instruction(name).unwrap().clone();
        encode_instruction(&idl, &ix, args)
    }

    #[test]
    fn test_initialize_is_discriminator_only() {
        assert_eq!(
            encode("initialize", &[]).unwrap(),
            ProjectInstruction::INITIALIZE.to_vec()
        );
    }

    #[test]
    fn test_matches_program_layout() {
        let data = encode(
            "create_project",
            &[json!("alpha"), json!("first"), json!("18446744073709551615")],
        )
        .unwrap();
        let expected = ProjectInstruction::CreateProject {
            name: "alpha".into(),
            description: "first".into(),
            total_allocation: u64::MAX,
        }
        .pack()
        .unwrap();
        assert_eq!(data, expected);
        assert_eq!(ProjectInstruction::unpack(&data).unwrap().name(), "CreateProject");
    }

    #[test]
    fn test_enum_forms() {
        let expected = ProjectInstruction::UpdateProjectState {
            new_state: ProjectState::Completed,
        }
        .pack()
        .unwrap();
        assert_eq!(encode("updateProjectState", &[json!("Completed")]).unwrap(), expected);
        assert_eq!(
            encode("updateProjectState", &[json!({ "completed": {} })]).unwrap(),
            expected
        );
    }

    #[test]
    fn test_argument_errors() {
        let err = encode("initialize", &[json!(1)]).unwrap_err();
        assert_eq!(err.field, "args");

        let err = encode("create_project", &[json!("a"), json!("b"), json!(-1)]).unwrap_err();
        assert_eq!(err.field, "total_allocation");

        let err = encode("update_project_state", &[json!("Paused")]).unwrap_err();
        assert!(err.reason.contains("Paused"));
    }

    #[test]
    fn test_generic_types() {
        let idl = program_idl();
        let mut out = Vec::new();
        let ty = IdlType::Option(Box::new(IdlType::Vec(Box::new(IdlType::U16))));
        encode_value(&idl, &ty, &json!([1, 2]), "x", &mut out).unwrap();
        let expected = bincode::serialize(&Some(vec![1u16, 2])).unwrap();
        assert_eq!(out, expected);

        let mut out = Vec::new();
        encode_value(&idl, &ty, &Value::Null, "x", &mut out).unwrap();
        assert_eq!(out, vec![0]);

        let mut out = Vec::new();
        let err = encode_value(&idl, &IdlType::U8, &json!(300), "n", &mut out).unwrap_err();
        assert!(err.reason.contains("out of range"));
    }

    #[test]
    fn test_struct_type() {
        let idl = program_idl();
        let key = Pubkey::new([7; 32]);
        let value = json!({ "project_id": key.to_string(), "new_state": "Cancelled" });
        let ty = IdlType::Defined(shared_types::IdlDefined {
            name: "ProjectStateUpdated".into(),
        });
        let mut out = Vec::new();
        encode_value(&idl, &ty, &value, "event", &mut out).unwrap();

        let event = sc_01_projects::events::ProjectStateUpdated {
            project_id: key,
            new_state: ProjectState::Cancelled,
        };
        assert_eq!(out, bincode::serialize(&event).unwrap());
    }
}
