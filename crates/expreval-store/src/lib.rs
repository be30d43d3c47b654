pub mod record;
pub mod service;
pub mod store;

pub use record::{
    decode_store_json, encode_store_json, NewExpression, StoreDocument, StoredExpression,
    STORE_SCHEMA_0_0_1,
};
pub use service::{
    preprocess_input, CompiledExpression, Evaluation, ExpressionService, ServiceError,
    ServiceOptions, DEFAULT_MAX_INPUT_LENGTH,
};
pub use store::{ExpressionStore, FileStore, MemoryStore, StoreError};
