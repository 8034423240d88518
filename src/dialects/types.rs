use crate::dialects::base::DialectError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

/// Database-independent column type tag used by the mapping layer
/// before translation to native SQL syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DbType {
    AnsiString,
    AnsiStringFixedLength,
    String,
    StringFixedLength,
    Binary,
    Boolean,
    Byte,
    SByte,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Single,
    Double,
    Currency,
    Decimal,
    VarNumeric,
    Date,
    Time,
    DateTime,
    DateTime2,
    DateTimeOffset,
    Guid,
    Xml,
    Object,
}

impl DbType {
    pub const ALL: [DbType; 27] = [
        DbType::AnsiString,
        DbType::AnsiStringFixedLength,
        DbType::String,
        DbType::StringFixedLength,
        DbType::Binary,
        DbType::Boolean,
        DbType::Byte,
        DbType::SByte,
        DbType::Int16,
        DbType::UInt16,
        DbType::Int32,
        DbType::UInt32,
        DbType::Int64,
        DbType::UInt64,
        DbType::Single,
        DbType::Double,
        DbType::Currency,
        DbType::Decimal,
        DbType::VarNumeric,
        DbType::Date,
        DbType::Time,
        DbType::DateTime,
        DbType::DateTime2,
        DbType::DateTimeOffset,
        DbType::Guid,
        DbType::Xml,
        DbType::Object,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            DbType::AnsiString => "AnsiString",
            DbType::AnsiStringFixedLength => "AnsiStringFixedLength",
            DbType::String => "String",
            DbType::StringFixedLength => "StringFixedLength",
            DbType::Binary => "Binary",
            DbType::Boolean => "Boolean",
            DbType::Byte => "Byte",
            DbType::SByte => "SByte",
            DbType::Int16 => "Int16",
            DbType::UInt16 => "UInt16",
            DbType::Int32 => "Int32",
            DbType::UInt32 => "UInt32",
            DbType::Int64 => "Int64",
            DbType::UInt64 => "UInt64",
            DbType::Single => "Single",
            DbType::Double => "Double",
            DbType::Currency => "Currency",
            DbType::Decimal => "Decimal",
            DbType::VarNumeric => "VarNumeric",
            DbType::Date => "Date",
            DbType::Time => "Time",
            DbType::DateTime => "DateTime",
            DbType::DateTime2 => "DateTime2",
            DbType::DateTimeOffset => "DateTimeOffset",
            DbType::Guid => "Guid",
            DbType::Xml => "Xml",
            DbType::Object => "Object",
        }
    }
}

impl fmt::Display for DbType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DbType {
    type Err = DialectError;

    /// Case-insensitive; underscores and dashes are ignored so that
    /// `ansi_string` and `ansi-string` both parse as `AnsiString`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_lowercase();

        DbType::ALL
            .iter()
            .copied()
            .find(|ty| ty.name().to_lowercase() == wanted)
            .ok_or_else(|| DialectError::ConfigError(format!("Unknown column type: {}", s)))
    }
}

/// All templates registered for one abstract type.
#[derive(Debug, Clone, Default)]
struct TypeTemplates {
    default: Option<String>,
    bounded: BTreeMap<u32, String>,
}

/// Lookup table from (abstract type, optional length) to a SQL type template.
///
/// Templates may carry `$l`, `$p` and `$s` placeholders for length, precision
/// and scale. They are stored and returned verbatim; substitution belongs to
/// whoever generates the DDL.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    types: HashMap<DbType, TypeTemplates>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the unbounded default template for `ty`.
    pub fn register(&mut self, ty: DbType, template: impl Into<String>) {
        self.types.entry(ty).or_default().default = Some(template.into());
    }

    /// Register (or replace) the template used for lengths up to `max_length`.
    pub fn register_with_length(&mut self, ty: DbType, max_length: u32, template: impl Into<String>) {
        self.types
            .entry(ty)
            .or_default()
            .bounded
            .insert(max_length, template.into());
    }

    /// Resolve the template for `ty` at `length`.
    ///
    /// Picks the smallest registered bound that is `>= length`, otherwise the
    /// unbounded default. Without a length the default is returned, or the
    /// smallest bounded entry when the type has no default.
    pub fn resolve(&self, ty: DbType, length: Option<u32>) -> Result<&str, DialectError> {
        let templates = self
            .types
            .get(&ty)
            .ok_or_else(|| DialectError::UnmappedType { ty, length })?;

        let bounded = match length {
            Some(len) => templates.bounded.range(len..).next(),
            None if templates.default.is_none() => templates.bounded.iter().next(),
            None => None,
        };

        bounded
            .map(|(_, template)| template.as_str())
            .or(templates.default.as_deref())
            .ok_or(DialectError::UnmappedType { ty, length })
    }

    pub fn contains(&self, ty: DbType) -> bool {
        self.types.contains_key(&ty)
    }

    /// Registered types in declaration order of [`DbType`].
    pub fn types(&self) -> Vec<DbType> {
        DbType::ALL
            .iter()
            .copied()
            .filter(|ty| self.types.contains_key(ty))
            .collect()
    }

    /// Every registered mapping as `(type, bound, template)`, bounded entries
    /// in ascending order followed by the default (`None` bound).
    pub fn entries(&self) -> Vec<(DbType, Option<u32>, &str)> {
        let mut out = Vec::new();
        for ty in self.types() {
            let templates = &self.types[&ty];
            for (bound, template) in &templates.bounded {
                out.push((ty, Some(*bound), template.as_str()));
            }
            if let Some(default) = &templates.default {
                out.push((ty, None, default.as_str()));
            }
        }
        out
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// One `[[types]]` row of a dialect data file.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TypeMapping {
    #[serde(rename = "type")]
    pub ty: DbType,
    pub length: Option<u32>,
    pub template: String,
}

impl FromIterator<TypeMapping> for TypeRegistry {
    fn from_iter<I: IntoIterator<Item = TypeMapping>>(iter: I) -> Self {
        let mut registry = TypeRegistry::new();
        for mapping in iter {
            match mapping.length {
                Some(len) => registry.register_with_length(mapping.ty, len, mapping.template),
                None => registry.register(mapping.ty, mapping.template),
            }
        }
        registry
    }
}
