use core::fmt::{Display, Formatter, Result as FmtResult};
use serde_json::{Map, Value};
use uuid::Uuid;

/// A tabular query: select some columns from a table where every condition holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    table: String,
    columns: Vec<String>,
    conditions: Vec<Condition>,
}

/// An equality condition on one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    pub column: String,
    pub value: QueryValue,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    Text(String),
    Guid(Uuid),
    Integer(i64),
}

impl Query {
    #[must_use]
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            columns: Vec::new(),
            conditions: Vec::new(),
        }
    }

    #[must_use]
    pub fn column(mut self, column: impl Into<String>) -> Self {
        self.columns.push(column.into());
        self
    }

    #[must_use]
    pub fn filter_eq(mut self, column: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.conditions.push(Condition {
            column: column.into(),
            value: value.into(),
        });
        self
    }

    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    /// The value a column is compared against, if the query filters on it.
    #[must_use]
    pub fn condition(&self, column: &str) -> Option<&QueryValue> {
        self.conditions.iter().find(|c| c.column == column).map(|c| &c.value)
    }

    /// Render the query options as an OData query string (`$select=...&$filter=...`).
    #[must_use]
    pub fn to_odata_query(&self) -> String {
        let mut parts = Vec::with_capacity(2);

        if !self.columns.is_empty() {
            parts.push(format!("$select={}", self.columns.join(",")));
        }

        if !self.conditions.is_empty() {
            let filter = self
                .conditions
                .iter()
                .map(|c| format!("{} eq {}", c.column, c.value))
                .collect::<Vec<_>>()
                .join(" and ");
            parts.push(format!("$filter={filter}"));
        }

        parts.join("&")
    }
}

impl Display for QueryValue {
    /// Formats the value as an OData literal.
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Text(s) => write!(f, "'{}'", s.replace('\'', "''")),
            Self::Guid(id) => write!(f, "{id}"),
            Self::Integer(i) => write!(f, "{i}"),
        }
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Uuid> for QueryValue {
    fn from(value: Uuid) -> Self {
        Self::Guid(value)
    }
}

impl From<i64> for QueryValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

/// One result row: column name to raw value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row(Map<String, Value>);

impl Row {
    #[must_use]
    pub fn get_str(&self, column: &str) -> Option<&str> {
        self.0.get(column)?.as_str()
    }

    /// Read a column holding a GUID in its canonical string form.
    #[must_use]
    pub fn get_guid(&self, column: &str) -> Option<Uuid> {
        Uuid::parse_str(self.get_str(column)?).ok()
    }
}

impl From<Map<String, Value>> for Row {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}
