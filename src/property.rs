use serde_derive::Deserialize;
use std::collections::BTreeMap;

use crate::encoding::decode;

#[derive(Clone, Debug, Deserialize)]
/// A declared property as reported by the Objective-C runtime.
///
/// `attributes` maps the single-character attribute codes of the property
/// attribute string (`T`, `N`, `R`, `C`, `&`, `W`, `G`, `S`, ...) to their
/// values; flags map to an empty string.
pub struct Property {
    name: String,
    attributes_string: String,
    attributes: BTreeMap<String, String>,
}

impl Property {
    #[must_use]
    pub fn new(name: &str, attributes_string: &str, attributes: &[(&str, &str)]) -> Self {
        Self {
            name: name.to_string(),
            attributes_string: attributes_string.to_string(),
            attributes: attributes
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn attributes_string(&self) -> &str {
        &self.attributes_string
    }

    fn has(&self, code: &str) -> bool {
        self.attributes.contains_key(code)
    }

    fn get(&self, code: &str) -> Option<&str> {
        self.attributes.get(code).map(String::as_str)
    }

    #[must_use]
    /// Declared type of the property, `id` when the runtime omitted it.
    pub fn type_name(&self) -> String {
        self.get("T").map_or_else(|| "id".to_string(), decode)
    }

    fn modifiers(&self) -> Vec<String> {
        let atomicity = if self.has("N") { "nonatomic" } else { "atomic" };
        let mut attrs = vec![atomicity.to_string()];

        let memory = if self.has("&") {
            "strong"
        } else if self.has("C") {
            "copy"
        } else if self.has("W") {
            "weak"
        } else {
            "assign"
        };
        attrs.push(memory.to_string());

        if self.has("R") {
            attrs.push("readonly".to_string());
        }
        if let Some(getter) = self.get("G") {
            attrs.push(format!("getter={getter}"));
        }
        if let Some(setter) = self.get("S") {
            attrs.push(format!("setter={setter}"));
        }

        attrs
    }

    #[must_use]
    /// Render the property as an `@property` declaration.
    pub fn pretty(&self) -> String {
        format!(
            "@property ({}) {} {}",
            self.modifiers().join(", "),
            self.type_name(),
            self.name
        )
    }

    #[must_use]
    /// Output line, with the current value appended when one is known.
    pub fn line(&self, value: Option<&str>) -> String {
        match value {
            Some(value) => format!("{} = {value}", self.pretty()),
            None => self.pretty(),
        }
    }
}
