//! Session Commands
//!
//! The input-layer API as data, so a sequence of edits can be replayed
//! from a JSON script.

use serde::{Deserialize, Serialize};

use crate::room::{Dimension, LayerId, LayerPatch, NumberInput};

/// One edit to the room
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    SetDimension {
        which: Dimension,
        value: NumberInput,
    },
    AddLayer {
        #[serde(default)]
        initial: LayerPatch,
    },
    UpdateLayer {
        id: LayerId,
        patch: LayerPatch,
    },
    RemoveLayer {
        id: LayerId,
    },
}

impl Command {
    /// Parse a JSON array of commands
    pub fn parse_script(text: &str) -> crate::Result<Vec<Command>> {
        Ok(serde_json::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_script() {
        let script = r#"[
            {"op": "set_dimension", "which": "length", "value": 5},
            {"op": "set_dimension", "which": "width", "value": "4"},
            {"op": "add_layer"},
            {"op": "add_layer", "initial": {"name": "Tiles", "wall_count": 2}},
            {"op": "update_layer", "id": 1, "patch": {"unit_price": 12.0}},
            {"op": "remove_layer", "id": 2}
        ]"#;

        let commands = Command::parse_script(script).unwrap();
        assert_eq!(commands.len(), 6);
        assert_eq!(
            commands[0],
            Command::SetDimension {
                which: Dimension::Length,
                value: NumberInput::Number(5.0),
            }
        );
        assert_eq!(
            commands[2],
            Command::AddLayer {
                initial: LayerPatch::default()
            }
        );
        assert_eq!(
            commands[5],
            Command::RemoveLayer { id: LayerId(2) }
        );
    }

    #[test]
    fn test_layer_fields_accept_raw_input() {
        let script = r#"[
            {"op": "add_layer", "initial": {"unit_price": "12", "wall_count": "2"}},
            {"op": "update_layer", "id": 1, "patch": {"exclusion_area": "abc"}},
            {"op": "update_layer", "id": 1, "patch": {"wall_count": 2.5, "package_area": null}}
        ]"#;

        let commands = Command::parse_script(script).unwrap();
        assert_eq!(commands.len(), 3);
        assert_eq!(
            commands[1],
            Command::UpdateLayer {
                id: LayerId(1),
                patch: LayerPatch {
                    exclusion_area: Some(NumberInput::Text("abc".to_string())),
                    ..LayerPatch::default()
                },
            }
        );
    }

    #[test]
    fn test_unknown_op_is_rejected() {
        let err = Command::parse_script(r#"[{"op": "undo"}]"#).unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }
}
