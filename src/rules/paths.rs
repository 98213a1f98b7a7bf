pub const DEFAULT_RULES_PATH: &str = "data/rules.v1.json";
pub const DEFAULT_SCHEMA_PATH: &str = "data/rules.schema.json";
