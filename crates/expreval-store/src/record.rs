use serde::{Deserialize, Serialize};

pub const STORE_SCHEMA_0_0_1: &str = "expreval-store/0.0.1";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoredExpression {
    pub id: u64,
    pub name: String,
    /// Expression text after preprocessing.
    pub expression: String,
    /// Tagged JSON form of the parsed tree.
    pub ast_json: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExpression {
    pub name: String,
    pub expression: String,
    pub ast_json: String,
}

impl NewExpression {
    pub fn with_id(self, id: u64) -> StoredExpression {
        StoredExpression {
            id,
            name: self.name,
            expression: self.expression,
            ast_json: self.ast_json,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreDocument {
    pub schema: String,
    pub next_id: u64,
    #[serde(default)]
    pub expressions: Vec<StoredExpression>,
}

impl StoreDocument {
    pub fn empty() -> Self {
        Self {
            schema: STORE_SCHEMA_0_0_1.to_string(),
            next_id: 1,
            expressions: Vec::new(),
        }
    }
}

pub fn encode_store_json(document: &StoreDocument) -> serde_json::Result<String> {
    serde_json::to_string_pretty(document)
}

pub fn decode_store_json(input: &str) -> serde_json::Result<StoreDocument> {
    serde_json::from_str::<StoreDocument>(input)
}
