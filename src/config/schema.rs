use serde_json::{json, Value};
use std::sync::LazyLock;

pub static CONFIG_SCHEMA: LazyLock<Value> = LazyLock::new(|| {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "additionalProperties": false,
        "properties": {
            "company": {
                "type": "object",
                "properties": {
                    "name": { "type": "string", "minLength": 1 },
                    "currency": { "type": "string", "enum": ["GBP"] }
                }
            },
            "server": {
                "type": "object",
                "properties": {
                    "host": { "type": "string" },
                    "port": { "type": "integer", "minimum": 1, "maximum": 65535 },
                    "database": { "type": "string" }
                }
            },
            "auth": {
                "type": "object",
                "properties": {
                    "api_token": { "type": "string" }
                }
            },
            "webhook": {
                "type": "object",
                "properties": {
                    "url": { "type": "string", "format": "uri" },
                    "secret": { "type": "string" },
                    "timeout_secs": { "type": "integer", "minimum": 1 }
                }
            }
        }
    })
});
