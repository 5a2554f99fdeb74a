use crate::core::{EntityError, Result, Value};

/// Named key translation applied on import and reversed on export.
///
/// `rename("full_name", "name")` reads `full_name` from raw data into the
/// `name` field and writes `name` back out as `full_name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mapper {
    name: String,
    renames: Vec<(String, String)>,
    only_mapped: bool,
}

impl Mapper {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            renames: Vec::new(),
            only_mapped: false,
        }
    }

    pub fn rename(mut self, external: impl Into<String>, internal: impl Into<String>) -> Self {
        self.renames.push((external.into(), internal.into()));
        self
    }

    /// Drop every key the mapper does not mention, in both directions.
    pub fn only_mapped(mut self) -> Self {
        self.only_mapped = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Translates raw external data into internal field names.
    pub fn import(&self, raw: &Value) -> Result<Value> {
        let Value::Map(entries) = raw else {
            return Err(EntityError::Construction(format!(
                "Mapper '{}' expects map data, got {}",
                self.name,
                raw.type_name()
            )));
        };

        Ok(Value::Map(
            entries
                .iter()
                .filter_map(|(key, value)| {
                    self.internal_name(key)
                        .map(|internal| (internal.to_string(), value.clone()))
                })
                .collect(),
        ))
    }

    /// Translates exported data back to external names.
    pub fn export(&self, data: Value) -> Value {
        match data {
            Value::Map(entries) => Value::Map(
                entries
                    .into_iter()
                    .filter_map(|(key, value)| {
                        self.external_name(&key)
                            .map(|external| (external.to_string(), value))
                    })
                    .collect(),
            ),
            other => other,
        }
    }

    fn internal_name<'a>(&'a self, external: &'a str) -> Option<&'a str> {
        match self.renames.iter().find(|(from, _)| from == external) {
            Some((_, internal)) => Some(internal),
            None if self.only_mapped => None,
            None => Some(external),
        }
    }

    fn external_name<'a>(&'a self, internal: &'a str) -> Option<&'a str> {
        match self.renames.iter().find(|(_, to)| to == internal) {
            Some((external, _)) => Some(external),
            None if self.only_mapped => None,
            None => Some(internal),
        }
    }
}

/// Mappers registered for one entity type, looked up by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mappers {
    mappers: Vec<Mapper>,
}

impl Mappers {
    /// Registers `mapper`, replacing any mapper of the same name.
    pub fn insert(&mut self, mapper: Mapper) {
        match self.mappers.iter_mut().find(|m| m.name == mapper.name) {
            Some(slot) => *slot = mapper,
            None => self.mappers.push(mapper),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.mappers.iter().any(|m| m.name == name)
    }

    pub fn get(&self, name: &str) -> Result<&Mapper> {
        self.mappers
            .iter()
            .find(|m| m.name == name)
            .ok_or_else(|| EntityError::UnknownMapper(name.to_string()))
    }

    /// Applies the named mapper to raw data; `None` passes the data through.
    pub fn import(&self, mapper: Option<&str>, raw: &Value) -> Result<Value> {
        match mapper {
            Some(name) => self.get(name)?.import(raw),
            None => Ok(raw.clone()),
        }
    }

    /// Applies the named mapper to exported data; `None` passes it through.
    pub fn export(&self, mapper: Option<&str>, data: Value) -> Result<Value> {
        match mapper {
            Some(name) => Ok(self.get(name)?.export(data)),
            None => Ok(data),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_import_and_export_rename() {
        let mapper = Mapper::new("api").rename("full_name", "name");
        let imported = mapper
            .import(&Value::from(json!({"full_name": "Ada", "age": 36})))
            .unwrap();
        assert_eq!(imported.to_json(), json!({"name": "Ada", "age": 36}));

        let exported = mapper.export(imported);
        assert_eq!(exported.to_json(), json!({"full_name": "Ada", "age": 36}));
    }

    #[test]
    fn test_only_mapped_drops_unknown_keys() {
        let mapper = Mapper::new("public").rename("title", "name").only_mapped();
        let imported = mapper
            .import(&Value::from(json!({"title": "x", "secret": 1})))
            .unwrap();
        assert_eq!(imported.to_json(), json!({"name": "x"}));

        let exported = mapper.export(Value::from(json!({"name": "x", "secret": 1})));
        assert_eq!(exported.to_json(), json!({"title": "x"}));
    }

    #[test]
    fn test_import_rejects_scalars() {
        let mapper = Mapper::new("api");
        assert!(matches!(
            mapper.import(&Value::Integer(1)),
            Err(EntityError::Construction(_))
        ));
    }

    #[test]
    fn test_registry_lookup() {
        let mut mappers = Mappers::default();
        mappers.insert(Mapper::new("api").rename("a", "b"));
        mappers.insert(Mapper::new("api").rename("c", "d"));

        assert!(mappers.contains("api"));
        assert_eq!(mappers.get("api").unwrap(), &Mapper::new("api").rename("c", "d"));
        assert!(matches!(mappers.get("db"), Err(EntityError::UnknownMapper(name)) if name == "db"));

        let raw = Value::from(json!({"x": 1}));
        assert_eq!(mappers.import(None, &raw).unwrap(), raw);
    }
}
