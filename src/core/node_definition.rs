//! Declared node contract: what the host shows and which inputs it passes.

use crate::core::save_image_node::DEFAULT_FILENAME_PREFIX;
use serde::Serialize;
use serde_json::{json, Map, Value};

pub const NODE_CLASS_NAME: &str = "SaveImageDir";
pub const NODE_DISPLAY_NAME: &str = "Save Image (Dir) 🦉| OwlV";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InputSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

impl InputSpec {
    fn new(name: &str, kind: &str, default: Option<Value>) -> Self {
        InputSpec {
            name: name.to_string(),
            kind: kind.to_string(),
            default,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeDefinition {
    pub class_name: String,
    pub display_name: String,
    pub category: String,
    pub function: String,
    pub output_node: bool,
    pub return_types: Vec<String>,
    pub required: Vec<InputSpec>,
    pub optional: Vec<InputSpec>,
    pub hidden: Vec<InputSpec>,
}

impl NodeDefinition {
    pub fn save_image_dir() -> Self {
        NodeDefinition {
            class_name: NODE_CLASS_NAME.to_string(),
            display_name: NODE_DISPLAY_NAME.to_string(),
            category: "image".to_string(),
            function: "save_images".to_string(),
            output_node: true,
            return_types: Vec::new(),
            required: vec![
                InputSpec::new("images", "IMAGE", None),
                InputSpec::new("filename_prefix", "STRING", Some(json!(DEFAULT_FILENAME_PREFIX))),
            ],
            optional: vec![
                InputSpec::new("use_custom_path", "BOOLEAN", Some(json!(false))),
                InputSpec::new("custom_path", "STRING", Some(json!(""))),
            ],
            hidden: vec![
                InputSpec::new("prompt", "PROMPT", None),
                InputSpec::new("extra_pnginfo", "EXTRA_PNGINFO", None),
            ],
        }
    }

    /// Input schema in the host's `{"required": {name: [TYPE, {default}]}}` shape.
    /// Hidden inputs map straight to their type name.
    pub fn input_types(&self) -> Value {
        fn section(specs: &[InputSpec]) -> Value {
            let mut map = Map::new();
            for spec in specs {
                let entry = match &spec.default {
                    Some(default) => json!([spec.kind, { "default": default }]),
                    None => json!([spec.kind]),
                };
                map.insert(spec.name.clone(), entry);
            }
            Value::Object(map)
        }

        let hidden: Map<String, Value> = self
            .hidden
            .iter()
            .map(|spec| (spec.name.clone(), json!(spec.kind)))
            .collect();

        json!({
            "required": section(&self.required),
            "optional": section(&self.optional),
            "hidden": hidden,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_types_match_host_shape() {
        let schema = NodeDefinition::save_image_dir().input_types();
        assert_eq!(schema["required"]["images"], json!(["IMAGE"]));
        assert_eq!(schema["required"]["filename_prefix"][1]["default"], json!("ComfyUI"));
        assert_eq!(schema["optional"]["use_custom_path"][1]["default"], json!(false));
        assert_eq!(schema["hidden"]["extra_pnginfo"], json!("EXTRA_PNGINFO"));
    }

    #[test]
    fn node_is_an_output_node_without_returns() {
        let def = NodeDefinition::save_image_dir();
        assert!(def.output_node);
        assert!(def.return_types.is_empty());
        assert_eq!(def.class_name, "SaveImageDir");
    }
}
