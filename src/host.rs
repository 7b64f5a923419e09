use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::{
    diag::{Error, Result},
    method::Method,
    property::Property,
    query::Query,
};

/// The debugger-side services the commands rely on.
///
/// Handles are opaque strings naming an object, a class or a metaclass in
/// the host's own terms (an address, a class name, an expression...).
pub trait Host {
    /// Class of `object`, or `None` when it has none (nil).
    ///
    /// # Errors
    ///
    /// Should return `Err` if `object` cannot be evaluated.
    fn object_get_class(&self, object: &str) -> Result<Option<String>>;

    /// Whether `class` is a metaclass.
    ///
    /// # Errors
    ///
    /// Should return `Err` if `class` cannot be evaluated.
    fn class_is_meta_class(&self, class: &str) -> Result<bool>;

    /// Run `query` in the target process and return its decoded result.
    /// A nil result is `Value::Null`.
    ///
    /// # Errors
    ///
    /// Should return `Err` if the evaluation fails.
    fn evaluate(&self, query: &Query) -> Result<Value>;
}

/// Whether `handle` denotes a class object (its own class is a metaclass).
///
/// # Errors
///
/// Returns `Err` if the host fails to evaluate `handle`.
pub fn is_class_object(host: &dyn Host, handle: &str) -> Result<bool> {
    match host.object_get_class(handle)? {
        Some(class) => host.class_is_meta_class(&class),
        None => Ok(false),
    }
}

/// Resolve a class or an instance to a class handle.
///
/// # Errors
///
/// Returns the invalid-argument error when `handle` is neither a class nor
/// an object whose class can be resolved.
pub fn resolve_class(host: &dyn Host, handle: &str) -> Result<String> {
    if is_class_object(host, handle)? {
        debug!("{handle} is a class");
        return Ok(handle.to_string());
    }

    let class = host
        .object_get_class(handle)?
        .ok_or_else(Error::invalid_argument)?;
    if is_class_object(host, &class)? {
        debug!("{handle} is an instance of {class}");
        Ok(class)
    } else {
        Err(Error::invalid_argument())
    }
}

fn list<T: DeserializeOwned>(host: &dyn Host, query: &Query) -> Result<Vec<T>> {
    debug!("evaluating {query}");
    match host.evaluate(query)? {
        Value::Null => Ok(vec![]),
        value => Ok(serde_json::from_value(value)?),
    }
}

/// Methods of `class`; pass a metaclass for class methods.
///
/// # Errors
///
/// Returns `Err` if the evaluation fails or its result is malformed.
pub fn methods(host: &dyn Host, class: &str) -> Result<Vec<Method>> {
    list(host, &Query::Methods { class })
}

/// Declared properties of `class`.
///
/// # Errors
///
/// Returns `Err` if the evaluation fails or its result is malformed.
pub fn properties(host: &dyn Host, class: &str) -> Result<Vec<Property>> {
    list(host, &Query::Properties { class })
}

/// Description of the `property` value of `object`.
///
/// # Errors
///
/// Returns `Err` if the evaluation fails.
pub fn value(host: &dyn Host, object: &str, property: &str) -> Result<Option<String>> {
    let query = Query::Value { object, property };
    debug!("evaluating {query}");
    Ok(match host.evaluate(&query)? {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    })
}
