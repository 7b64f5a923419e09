use serde::{de, Deserializer};
use serde_derive::Deserialize;
use serde_json::Number;

use crate::encoding::decode;

// Argument 0 is `self` and argument 1 is `_cmd`.
const HIDDEN_ARGS: usize = 2;

// The runtime hands addresses back as a signed `long`.
#[allow(clippy::cast_sign_loss)]
fn implementation<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let number: Number = serde::Deserialize::deserialize(deserializer)?;
    number
        .as_u64()
        .or_else(|| number.as_i64().map(|n| n as u64))
        .ok_or_else(|| de::Error::custom(format!("bad address {number}")))
}

#[derive(Clone, Debug, Deserialize)]
/// A method as reported by the Objective-C runtime of the target process.
pub struct Method {
    name: String,
    type_encoding: String,
    parameters_type: Vec<String>,
    return_type: String,
    #[serde(deserialize_with = "implementation")]
    implementation: u64,
}

impl Method {
    #[must_use]
    /// Build a method record from its raw runtime metadata.
    pub fn new(
        name: &str,
        type_encoding: &str,
        parameters_type: &[&str],
        return_type: &str,
        implementation: u64,
    ) -> Self {
        Self {
            name: name.to_string(),
            type_encoding: type_encoding.to_string(),
            parameters_type: parameters_type.iter().map(ToString::to_string).collect(),
            return_type: return_type.to_string(),
            implementation,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn type_encoding(&self) -> &str {
        &self.type_encoding
    }

    #[must_use]
    pub fn parameters_type(&self) -> &[String] {
        &self.parameters_type
    }

    #[must_use]
    pub fn return_type(&self) -> &str {
        &self.return_type
    }

    #[must_use]
    /// Implementation address formatted as hexadecimal.
    pub fn imp(&self) -> String {
        format!("{:#x}", self.implementation)
    }

    #[must_use]
    /// Render the method as an Objective-C-like declaration.
    ///
    /// Every visible argument is spliced into its selector part, e.g.
    /// `(void) doSomething:(id)arg0 withArg:(int)arg1`.
    pub fn pretty(&self) -> String {
        let mut parts: Vec<String> = self
            .name
            .split(':')
            .filter(|part| !part.is_empty())
            .map(String::from)
            .collect();

        for (i, arg_type) in self.parameters_type.iter().enumerate().skip(HIDDEN_ARGS) {
            let idx = i - HIDDEN_ARGS;
            let arg = format!(":({})arg{idx}", decode(arg_type));
            match parts.get_mut(idx) {
                Some(part) => part.push_str(&arg),
                None => parts.push(arg),
            }
        }

        format!("({}) {}", decode(&self.return_type), parts.join(" "))
    }

    #[must_use]
    /// Full output line: `prefix` (`+` or `-`), the declaration and,
    /// optionally, the implementation address.
    pub fn line(&self, prefix: char, show_addr: bool) -> String {
        if show_addr {
            format!("{prefix} {} {}", self.pretty(), self.imp())
        } else {
            format!("{prefix} {}", self.pretty())
        }
    }
}
