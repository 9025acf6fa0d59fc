//! Access-control rules.
//!
//! Rules come from a tabular file with one rule per line:
//!
//! ```text
//! id,name,model,group,perm_read,perm_write,perm_create,perm_delete
//! access_sample_model_user,sample.model user,sample.model,user,1,0,0,0
//! access_sample_model_manager,sample.model manager,sample.model,manager,1,1,1,1
//! ```
//!
//! An empty `group` column makes the rule apply to every group. A group is
//! allowed an operation on an entity if any matching rule grants it;
//! with no matching rule the answer is deny.

use std::fmt::{Display, Formatter};
use std::fs;
use std::path::Path;

use crate::error::StoreError;

const HEADER: &str = "id,name,model,group,perm_read,perm_write,perm_create,perm_delete";
const COLUMNS: usize = 8;

/// The four generic operations a rule can grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Read,
    Write,
    Create,
    Delete,
}

impl Display for Operation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Operation::Read => "read",
            Operation::Write => "write",
            Operation::Create => "create",
            Operation::Delete => "delete",
        };
        f.write_str(name)
    }
}

/// One parsed rule row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessRule {
    pub id: String,
    pub name: String,
    pub model: String,
    /// Empty means the rule applies to all groups.
    pub group: String,
    pub read: bool,
    pub write: bool,
    pub create: bool,
    pub delete: bool,
}

impl AccessRule {
    fn permits(&self, operation: Operation) -> bool {
        match operation {
            Operation::Read => self.read,
            Operation::Write => self.write,
            Operation::Create => self.create,
            Operation::Delete => self.delete,
        }
    }

    fn applies_to(&self, group: &str, model: &str) -> bool {
        self.model == model && (self.group.is_empty() || self.group == group)
    }
}

/// All loaded rules, queried through [`AccessTable::allows`].
#[derive(Debug, Clone, Default)]
pub struct AccessTable {
    rules: Vec<AccessRule>,
}

impl AccessTable {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Reads a rule file from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            StoreError::AccessRule(format!("cannot read rule file {}: {e}", path.display()))
        })?;
        Self::parse(&content)
    }

    /// Parses rule-file content. The first non-blank line must be the
    /// column header.
    pub fn parse(content: &str) -> Result<Self, StoreError> {
        let mut lines = content
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty() && !l.starts_with('#'));

        match lines.next() {
            Some(header) if header == HEADER => {}
            Some(header) => {
                return Err(StoreError::AccessRule(format!(
                    "unexpected rule file header '{header}'"
                )))
            }
            None => return Err(StoreError::AccessRule("rule file is empty".to_string())),
        }

        let mut rules = Vec::new();
        for line in lines {
            let fields: Vec<&str> = line.split(',').map(str::trim).collect();
            if fields.len() != COLUMNS {
                return Err(StoreError::AccessRule(format!(
                    "expected {COLUMNS} columns, got {} in line '{line}'",
                    fields.len()
                )));
            }
            rules.push(AccessRule {
                id: fields[0].to_string(),
                name: fields[1].to_string(),
                model: fields[2].to_string(),
                group: fields[3].to_string(),
                read: parse_flag(fields[4], line)?,
                write: parse_flag(fields[5], line)?,
                create: parse_flag(fields[6], line)?,
                delete: parse_flag(fields[7], line)?,
            });
        }
        Ok(Self { rules })
    }

    /// Folds another table's rules into this one. Later rules cannot revoke
    /// earlier grants; permissions are additive across files.
    pub fn merge(&mut self, other: AccessTable) {
        self.rules.extend(other.rules);
    }

    /// Whether `group` may perform `operation` on `model`. No matching
    /// rule means deny.
    pub fn allows(&self, group: &str, model: &str, operation: Operation) -> bool {
        self.rules
            .iter()
            .filter(|r| r.applies_to(group, model))
            .any(|r| r.permits(operation))
    }

    pub fn rules(&self) -> &[AccessRule] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }
}

fn parse_flag(value: &str, line: &str) -> Result<bool, StoreError> {
    match value {
        "1" | "true" => Ok(true),
        "0" | "false" => Ok(false),
        other => Err(StoreError::AccessRule(format!(
            "invalid permission flag '{other}' in line '{line}'"
        ))),
    }
}
