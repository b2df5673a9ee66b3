//! Query documents shared by the command tests.

use super::input::{QueryDocument, parse_document};

/// `People.Where(c => c.Age >= 18).Take(5)` over `Customer`.
pub const ADULTS: &str = indoc::indoc! {r#"
    {
      "schema": {
        "entities": {
          "Customer": [
            { "name": "Name", "ty": "string" },
            { "name": "Age", "ty": "i32" }
          ],
          "Contact": [
            { "name": "Name", "ty": "string" },
            { "name": "Age", "ty": "i32" }
          ],
          "Lead": [
            { "name": "Name", "ty": "string" }
          ]
        }
      },
      "query": {
        "kind": "call",
        "method": "Take",
        "declaring_type": { "class": "Queryable" },
        "args": [
          {
            "kind": "call",
            "method": "Where",
            "declaring_type": { "class": "Queryable" },
            "args": [
              {
                "kind": "constant",
                "value": { "source": "People" },
                "ty": { "queryable": { "entity": "Customer" } }
              },
              {
                "kind": "unary",
                "op": "quote",
                "operand": {
                  "kind": "lambda",
                  "params": [{ "name": "c", "ty": { "entity": "Customer" } }],
                  "body": {
                    "kind": "binary",
                    "op": "greater_than_or_equal",
                    "left": {
                      "kind": "member",
                      "target": { "kind": "parameter", "name": "c", "ty": { "entity": "Customer" } },
                      "member": "Age",
                      "declaring_type": { "entity": "Customer" },
                      "ty": "i32"
                    },
                    "right": { "kind": "constant", "value": { "i32": 18 }, "ty": "i32" },
                    "ty": "bool"
                  }
                },
                "ty": { "function": [[{ "entity": "Customer" }], "bool"] }
              }
            ],
            "ty": { "queryable": { "entity": "Customer" } }
          },
          { "kind": "constant", "value": { "i32": 5 }, "ty": "i32" }
        ],
        "ty": { "queryable": { "entity": "Customer" } }
      }
    }
"#};

pub fn adults() -> QueryDocument {
    parse_document(ADULTS).unwrap()
}

/// The same chain with its last operator renamed.
pub fn adults_ending_in(operator: &str) -> QueryDocument {
    parse_document(&ADULTS.replacen("\"Take\"", &format!("\"{operator}\""), 1)).unwrap()
}
