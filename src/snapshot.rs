use serde_derive::Deserialize;
use serde_json::Value;
use std::{collections::BTreeMap, fs, path::Path};
use tracing::debug;

use crate::{
    diag::{Error, Result},
    host::Host,
    query::Query,
};

const META_SUFFIX: &str = ".isa";

#[derive(Default, Deserialize)]
#[serde(default)]
struct ClassDump {
    superclass: Option<String>,
    class_methods: Vec<Value>,
    instance_methods: Vec<Value>,
    properties: Vec<Value>,
}

#[derive(Deserialize)]
struct ObjectDump {
    class: String,
    #[serde(default)]
    values: BTreeMap<String, String>,
}

#[derive(Default, Deserialize)]
#[serde(default)]
/// A host answering queries from a JSON dump of Objective-C metadata.
///
/// The document has the shape:
///
/// ```json
/// {
///   "classes": {
///     "Foo": {
///       "superclass": "NSObject",
///       "class_methods": [...],
///       "instance_methods": [...],
///       "properties": [...]
///     }
///   },
///   "objects": { "0x600000c04000": { "class": "Foo", "values": {...} } }
/// }
/// ```
///
/// Method and property entries use the same maps the injected runtime code
/// returns. A class is addressed by its name, its metaclass by the name
/// followed by `.isa`, and an instance by its key in `objects`.
pub struct Snapshot {
    classes: BTreeMap<String, ClassDump>,
    objects: BTreeMap<String, ObjectDump>,
}

impl Snapshot {
    /// Parse a snapshot document.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `json` is not a valid snapshot document.
    pub fn parse(json: &str) -> Result<Self> {
        let snapshot: Self = serde_json::from_str(json)?;
        debug!(
            "loaded snapshot with {} classes and {} objects",
            snapshot.classes.len(),
            snapshot.objects.len()
        );
        Ok(snapshot)
    }

    /// Load a snapshot document from `path`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        debug!("reading snapshot {}", path.display());
        Self::parse(&fs::read_to_string(path)?)
    }

    fn class(&self, name: &str) -> Result<&ClassDump> {
        self.classes.get(name).ok_or_else(Error::invalid_argument)
    }

    // Root of the superclass chain; cycles and dangling names stop the walk.
    fn root<'a>(&'a self, mut name: &'a str) -> &'a str {
        let mut hops = 0;
        while let Some(superclass) = self
            .classes
            .get(name)
            .and_then(|c| c.superclass.as_deref())
        {
            if !self.classes.contains_key(superclass) || hops > self.classes.len() {
                break;
            }
            name = superclass;
            hops += 1;
        }
        name
    }

    fn values(list: &[Value]) -> Value {
        Value::Array(list.to_vec())
    }
}

impl Host for Snapshot {
    fn object_get_class(&self, object: &str) -> Result<Option<String>> {
        if let Some(name) = object.strip_suffix(META_SUFFIX) {
            self.class(name)?;
            return Ok(Some(format!("{}{META_SUFFIX}", self.root(name))));
        }

        if self.classes.contains_key(object) {
            return Ok(Some(format!("{object}{META_SUFFIX}")));
        }

        Ok(self.objects.get(object).map(|o| o.class.clone()))
    }

    fn class_is_meta_class(&self, class: &str) -> Result<bool> {
        match class.strip_suffix(META_SUFFIX) {
            Some(name) => self.class(name).map(|_| true),
            None => Ok(false),
        }
    }

    fn evaluate(&self, query: &Query) -> Result<Value> {
        match query {
            Query::Methods { class } => Ok(match class.strip_suffix(META_SUFFIX) {
                Some(name) => Self::values(&self.class(name)?.class_methods),
                None => Self::values(&self.class(class)?.instance_methods),
            }),
            Query::Properties { class } => {
                let name = class.strip_suffix(META_SUFFIX).unwrap_or(*class);
                Ok(Self::values(&self.class(name)?.properties))
            }
            Query::Value { object, property } => Ok(self
                .objects
                .get(*object)
                .and_then(|o| o.values.get(*property))
                .map_or(Value::Null, |v| Value::String(v.clone()))),
        }
    }
}
