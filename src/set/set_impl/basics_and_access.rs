impl<E: Entity> EntitySet<E> {
    /// Creates an empty set of `element_type` entities built by `factory`.
    pub fn new(element_type: impl Into<String>, factory: Arc<dyn EntityFactory<E>>) -> Self {
        Self::with_config(element_type, factory, SetConfig::default())
    }

    pub fn with_config(
        element_type: impl Into<String>,
        factory: Arc<dyn EntityFactory<E>>,
        config: SetConfig,
    ) -> Self {
        Self {
            element_type: element_type.into(),
            factory,
            members: Vec::new(),
            validators: Validators::new(),
            config,
        }
    }

    /// Creates a set and imports `data` through [`EntitySet::fill`].
    pub fn with_data<I, T>(
        element_type: impl Into<String>,
        factory: Arc<dyn EntityFactory<E>>,
        data: I,
        mapper: Option<&str>,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<SetItem<E>>,
    {
        let mut set = Self::new(element_type, factory);
        set.fill(data, mapper)?;
        Ok(set)
    }

    /// Returns the declared type name of the members.
    pub fn element_type(&self) -> &str {
        &self.element_type
    }

    pub fn config(&self) -> &SetConfig {
        &self.config
    }

    pub fn factory(&self) -> &Arc<dyn EntityFactory<E>> {
        &self.factory
    }

    /// Returns `true` if the set's declared type is `type_name`.
    pub fn is_representing(&self, type_name: &str) -> bool {
        self.element_type == type_name
    }

    /// Returns `true` if `entity` is of the set's declared type.
    pub fn represents(&self, entity: &E) -> bool {
        self.is_representing(entity.type_name())
    }

    /// Fails with `TypeMismatch` unless the set's declared type is `type_name`.
    pub fn must_represent(&self, type_name: &str) -> Result<()> {
        if self.is_representing(type_name) {
            Ok(())
        } else {
            Err(EntityError::TypeMismatch {
                expected: self.element_type.clone(),
                found: type_name.to_string(),
            })
        }
    }

    /// Normalizes `item` into a member of the declared type.
    ///
    /// Entities of the declared type pass through untouched. Anything else is
    /// rebuilt by the factory: raw data directly, foreign entities from their
    /// unmapped export.
    pub fn ensure_entity(&self, item: impl Into<SetItem<E>>, mapper: Option<&str>) -> Result<E> {
        self.coerce(item.into(), self.config.mapper(mapper))
    }

    /// Coerces with an already resolved mapper; the default mapper is not consulted.
    fn coerce(&self, item: SetItem<E>, mapper: Option<&str>) -> Result<E> {
        let entity = match item {
            SetItem::Entity(entity) if self.represents(&entity) => return Ok(entity),
            SetItem::Entity(other) => {
                let raw = other.to_array(None)?;
                self.factory.construct(&self.element_type, &raw, mapper)?
            }
            SetItem::Raw(raw) => self.factory.construct(&self.element_type, &raw, mapper)?,
        };

        self.must_represent(entity.type_name())?;
        Ok(entity)
    }

    /// Number of members.
    pub fn count(&self) -> usize {
        self.members.len()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&E> {
        self.members.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut E> {
        self.members.get_mut(index)
    }

    pub fn contains_index(&self, index: usize) -> bool {
        index < self.members.len()
    }

    pub fn first(&self) -> Option<&E> {
        self.members.first()
    }

    pub fn last(&self) -> Option<&E> {
        self.members.last()
    }

    pub fn members(&self) -> &[E] {
        &self.members
    }

    pub fn into_members(self) -> Vec<E> {
        self.members
    }

    pub fn iter(&self) -> std::slice::Iter<'_, E> {
        self.members.iter()
    }

    /// Returns a forward cursor positioned at index 0.
    pub fn cursor(&self) -> SetCursor<'_, E> {
        SetCursor::new(self)
    }
}
