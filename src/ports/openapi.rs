// src/ports/openapi.rs
//
// OpenAPI 3 description of the flashcard resource, served at `/openapi.json`.
use serde_json::{json, Value};

use crate::constants::{FLASHCARDS_PATH, MAX_ANSWER_LEN, MAX_CATEGORY_LEN, MAX_QUESTION_LEN};

pub fn document() -> Value {
    let card_ref = json!({ "$ref": "#/components/schemas/Flashcard" });
    let card_list = json!({ "type": "array", "items": card_ref });
    let id_param = json!({
        "name": "id",
        "in": "path",
        "required": true,
        "schema": { "type": "integer", "format": "int64" }
    });

    json!({
        "openapi": "3.0.3",
        "info": {
            "title": "Flashcard API",
            "description": "Operations related to Flashcards",
            "version": env!("CARGO_PKG_VERSION")
        },
        "paths": {
            FLASHCARDS_PATH: {
                "get": {
                    "summary": "Get all flashcards",
                    "responses": { "200": json_response("All flashcards", &card_list) }
                },
                "post": {
                    "summary": "Create a new flashcard",
                    "requestBody": json_body(&card_ref),
                    "responses": {
                        "201": json_response("Created flashcard", &card_ref),
                        "400": error_response("Missing or invalid field")
                    }
                }
            },
            format!("{FLASHCARDS_PATH}/search"): {
                "get": {
                    "summary": "Search flashcards by category",
                    "parameters": [{
                        "name": "category",
                        "in": "query",
                        "required": true,
                        "schema": { "type": "string" }
                    }],
                    "responses": {
                        "200": json_response("Flashcards in the category", &card_list),
                        "400": error_response("Category query parameter is required")
                    }
                }
            },
            format!("{FLASHCARDS_PATH}/{{id}}"): {
                "parameters": [id_param],
                "get": {
                    "summary": "Get a flashcard by ID",
                    "responses": {
                        "200": json_response("The flashcard", &card_ref),
                        "404": error_response("Flashcard not found")
                    }
                },
                "put": {
                    "summary": "Update an existing flashcard",
                    "requestBody": json_body(&card_ref),
                    "responses": {
                        "200": json_response("Updated flashcard", &card_ref),
                        "400": error_response("Missing or invalid field"),
                        "404": error_response("Flashcard not found")
                    }
                },
                "delete": {
                    "summary": "Delete a flashcard",
                    "responses": {
                        "204": { "description": "Flashcard deleted" },
                        "404": error_response("Flashcard not found")
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "Flashcard": {
                    "type": "object",
                    "required": ["question", "answer"],
                    "properties": {
                        "id": { "type": "integer", "format": "int64", "nullable": true, "readOnly": true },
                        "question": { "type": "string", "minLength": 1, "maxLength": MAX_QUESTION_LEN },
                        "answer": { "type": "string", "minLength": 1, "maxLength": MAX_ANSWER_LEN },
                        "category": { "type": "string", "nullable": true, "maxLength": MAX_CATEGORY_LEN },
                        "createdAt": { "type": "string", "format": "date-time", "nullable": true, "readOnly": true },
                        "updatedAt": { "type": "string", "format": "date-time", "nullable": true, "readOnly": true }
                    }
                },
                "Error": {
                    "type": "object",
                    "properties": {
                        "code": { "type": "integer" },
                        "message": { "type": "string" }
                    }
                }
            }
        }
    })
}

fn json_body(schema: &Value) -> Value {
    json!({
        "required": true,
        "content": { "application/json": { "schema": schema } }
    })
}

fn json_response(description: &str, schema: &Value) -> Value {
    json!({
        "description": description,
        "content": { "application/json": { "schema": schema } }
    })
}

fn error_response(description: &str) -> Value {
    json_response(description, &json!({ "$ref": "#/components/schemas/Error" }))
}
