//! OpenAPI 3.1 description of the counter routes.
//!
//! Served at `/openapi.json` and printed by `dummyserver openapi`.

use serde_json::{json, Value};

pub fn document() -> Value {
    json!({
        "openapi": "3.1.0",
        "info": {
            "title": "Dummy Server",
            "version": env!("CARGO_PKG_VERSION"),
        },
        "paths": paths(),
        "components": { "schemas": schemas() }
    })
}

fn json_body(schema: &str) -> Value {
    json!({ "application/json": { "schema": { "$ref": format!("#/components/schemas/{schema}") } } })
}

fn paths() -> Value {
    let number_response = json!({
        "description": "Current counter value",
        "content": json_body("NumberResponse")
    });

    json!({
        "/": {
            "get": {
                "summary": "Root",
                "operationId": "root",
                "responses": {
                    "200": {
                        "description": "Greeting naming the other routes",
                        "content": json_body("RootResponse")
                    }
                }
            }
        },
        "/number": {
            "get": {
                "summary": "Get Number",
                "operationId": "get_number",
                "responses": { "200": number_response.clone() }
            },
            "post": {
                "summary": "Modify Number",
                "operationId": "modify_number",
                "requestBody": { "required": true, "content": json_body("NumberOperation") },
                "responses": {
                    "200": number_response,
                    "413": { "description": "Payload Too Large", "content": json_body("ErrorResponse") },
                    "422": { "description": "Validation Error", "content": json_body("ErrorResponse") }
                }
            }
        },
        "/log": {
            "get": {
                "summary": "Get Log",
                "operationId": "get_log",
                "responses": {
                    "200": {
                        "description": "Every applied operation in order, starting with initialize",
                        "content": { "application/json": { "schema": {
                            "type": "array",
                            "items": { "$ref": "#/components/schemas/Operation" }
                        } } }
                    }
                }
            }
        }
    })
}

fn schemas() -> Value {
    let int64 = json!({ "type": "integer", "format": "int64" });

    json!({
        "ActionType": {
            "type": "string",
            "enum": ["add", "subtract"]
        },
        "NumberOperation": {
            "type": "object",
            "required": ["action", "value"],
            "properties": {
                "action": { "$ref": "#/components/schemas/ActionType" },
                "value": int64.clone()
            }
        },
        "NumberResponse": {
            "type": "object",
            "required": ["number"],
            "properties": { "number": int64.clone() }
        },
        "Operation": {
            "type": "object",
            "required": ["action", "value"],
            "properties": {
                "action": { "type": "string", "enum": ["initialize", "add", "subtract"] },
                "value": int64
            }
        },
        "RootResponse": {
            "type": "object",
            "required": ["message"],
            "properties": { "message": { "type": "string" } }
        },
        "ErrorResponse": {
            "type": "object",
            "required": ["error", "message"],
            "properties": {
                "error": { "type": "string" },
                "message": { "type": "string" }
            }
        }
    })
}
