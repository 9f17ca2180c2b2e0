//! Decodes one class file's constant pool exactly once, producing a view
//! every scanner can consume without re-parsing bytecode.

use std::collections::BTreeSet;
use std::io::Cursor;

use ristretto_classfile::{ClassFile, ConstantPool};

use crate::error::{Result, SlimJreError};

/// A resolved `Methodref`/`InterfaceMethodref` entry: the declaring class and
/// the method name, enough for the `Reflection`/`ZipFs`/`Jmx` scanners to
/// match on call shape without descriptor-level detail.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct MethodRef {
    pub owner_class: String,
    pub method_name: String,
}

/// The shared, scanner-agnostic view of one class file built once per
/// archive member: every `Class` constant-pool reference, every method call
/// site, and every literal `Utf8`/`String` constant available as a Ldc
/// argument.
#[derive(Debug, Clone)]
pub struct DecodedClass {
    pub binary_name: String,
    pub class_refs: BTreeSet<String>,
    pub method_refs: Vec<MethodRef>,
    pub string_constants: BTreeSet<String>,
}

impl DecodedClass {
    /// Parses `bytes` as a `.class` file. Failures are the caller's to log
    /// and drop; this never synthesizes a partial class.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let mut cursor = Cursor::new(bytes.to_vec());
        let class_file = ClassFile::from_bytes(&mut cursor)
            .map_err(|e| SlimJreError::Scanner(format!("malformed class file: {e}")))?;

        let pool = &class_file.constant_pool;
        let binary_name = class_name_at(pool, class_file.this_class)
            .ok_or_else(|| SlimJreError::Scanner("class file missing this_class name".into()))?;

        let mut class_refs = BTreeSet::new();
        let mut method_refs = Vec::new();
        let mut string_constants = BTreeSet::new();

        for index in 1..pool.len() as u16 {
            let Ok(constant) = pool.try_get(index) else {
                continue;
            };
            match constant {
                ristretto_classfile::Constant::Class(name_index) => {
                    if let Some(name) = utf8_at(pool, *name_index) {
                        class_refs.insert(name);
                    }
                }
                ristretto_classfile::Constant::Utf8(value) | ristretto_classfile::Constant::String(value) => {
                    string_constants.insert(value.clone());
                }
                ristretto_classfile::Constant::MethodRef(class_index, name_and_type_index)
                | ristretto_classfile::Constant::InterfaceMethodRef(class_index, name_and_type_index) => {
                    if let (Some(owner_class), Some(method_name)) = (
                        class_name_at(pool, *class_index),
                        method_name_at(pool, *name_and_type_index),
                    ) {
                        method_refs.push(MethodRef {
                            owner_class,
                            method_name,
                        });
                    }
                }
                _ => {}
            }
        }

        Ok(Self {
            binary_name,
            class_refs,
            method_refs,
            string_constants,
        })
    }
}

fn utf8_at(pool: &ConstantPool, index: u16) -> Option<String> {
    match pool.try_get(index).ok()? {
        ristretto_classfile::Constant::Utf8(value) => Some(value.clone()),
        _ => None,
    }
}

fn class_name_at(pool: &ConstantPool, class_index: u16) -> Option<String> {
    match pool.try_get(class_index).ok()? {
        ristretto_classfile::Constant::Class(name_index) => utf8_at(pool, *name_index),
        _ => None,
    }
}

fn method_name_at(pool: &ConstantPool, name_and_type_index: u16) -> Option<String> {
    match pool.try_get(name_and_type_index).ok()? {
        ristretto_classfile::Constant::NameAndType(name_index, _descriptor_index) => {
            utf8_at(pool, *name_index)
        }
        _ => None,
    }
}
