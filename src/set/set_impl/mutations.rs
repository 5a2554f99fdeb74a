impl<E: Entity> EntitySet<E> {
    /// Coerces every item of `data` and appends the results in order.
    ///
    /// Nothing is appended unless every item converts.
    pub fn fill<I, T>(&mut self, data: I, mapper: Option<&str>) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<SetItem<E>>,
    {
        let mapper = self.config.mapper(mapper).map(str::to_string);
        self.import_items(data.into_iter().map(Into::into), mapper.as_deref())
    }

    /// Imports the members of a raw list or map.
    ///
    /// Scalars are ignored: the call succeeds and the set is left unchanged.
    pub fn fill_value(&mut self, data: &Value, mapper: Option<&str>) -> Result<()> {
        if !data.is_iterable() {
            warn!(
                "Ignoring non-iterable {} data for set of '{}'",
                data.type_name(),
                self.element_type
            );
            return Ok(());
        }

        self.fill(data.members().into_iter().cloned().map(SetItem::Raw), mapper)
    }

    fn import_items<I>(&mut self, items: I, mapper: Option<&str>) -> Result<()>
    where
        I: IntoIterator<Item = SetItem<E>>,
    {
        let incoming = items
            .into_iter()
            .map(|item| self.coerce(item, mapper))
            .collect::<Result<Vec<_>>>()?;

        debug!(
            "Filled {} '{}' entities (mapper: {:?})",
            incoming.len(),
            self.element_type,
            mapper
        );
        self.members.extend(incoming);
        Ok(())
    }

    /// Inserts `item` before position `index`, shifting later members up.
    ///
    /// An index past the end appends.
    pub fn push(&mut self, index: usize, item: impl Into<SetItem<E>>) -> Result<()> {
        let entity = self.ensure_entity(item, None)?;
        self.insert_at(index, entity);
        Ok(())
    }

    pub fn append(&mut self, item: impl Into<SetItem<E>>) -> Result<()> {
        self.push(self.members.len(), item)
    }

    pub fn prepend(&mut self, item: impl Into<SetItem<E>>) -> Result<()> {
        self.push(0, item)
    }

    fn insert_at(&mut self, index: usize, entity: E) {
        let index = index.min(self.members.len());
        trace!("Inserting '{}' at {}", self.element_type, index);
        self.members.insert(index, entity);
    }

    /// Assigns `item` to `index` without shifting.
    ///
    /// An existing position is overwritten. `None` (no numeric index) or an
    /// index past the end appends at the next position, so no gap is created.
    pub fn offset_set(&mut self, index: Option<usize>, item: impl Into<SetItem<E>>) -> Result<()> {
        let entity = self.ensure_entity(item, None)?;
        match index.and_then(|index| self.members.get_mut(index)) {
            Some(slot) => *slot = entity,
            None => self.members.push(entity),
        }
        Ok(())
    }

    /// Removes the member at `index` and closes the gap. Returns whether
    /// anything was removed.
    pub fn offset_unset(&mut self, index: usize) -> bool {
        self.pull(index).is_some()
    }

    /// Removes and returns the member at `index`.
    pub fn pull(&mut self, index: usize) -> Option<E> {
        if !self.contains_index(index) {
            return None;
        }
        trace!("Pulling '{}' at {}", self.element_type, index);
        Some(self.members.remove(index))
    }

    /// Removes every member matching `query`, returning how many were removed.
    pub fn remove(&mut self, query: &Query) -> Result<usize> {
        let doomed: HashSet<usize> = self.find_keys(query, 0, 0)?.into_iter().collect();
        if doomed.is_empty() {
            return Ok(0);
        }

        let mut index = 0;
        self.members.retain(|_| {
            let keep = !doomed.contains(&index);
            index += 1;
            keep
        });

        debug!("Removed {} '{}' entities", doomed.len(), self.element_type);
        Ok(doomed.len())
    }

    /// Moves the member at `current` so it ends up at `new_index`.
    ///
    /// The member is taken out first, so `new_index` addresses the sequence
    /// without it: `[A, B, C]` with `move_to(0, 2)` becomes `[B, C, A]`.
    pub fn move_to(&mut self, current: usize, new_index: usize) -> Result<()> {
        let entity = self.pull(current).ok_or_else(|| {
            EntityError::InvalidArgument(format!(
                "No '{}' member at index {}",
                self.element_type, current
            ))
        })?;
        self.insert_at(new_index, entity);
        Ok(())
    }

    /// Keeps only the members for which `predicate` returns `true`.
    pub fn filter<F>(&mut self, mut predicate: F) -> &mut Self
    where
        F: FnMut(&E) -> bool,
    {
        let keys: Vec<usize> = self
            .members
            .iter()
            .enumerate()
            .filter(|(_, member)| predicate(*member))
            .map(|(index, _)| index)
            .collect();
        self.reduce(keys)
    }

    /// Restricts the set to `indices`; indices that do not exist are ignored.
    pub fn reduce<I>(&mut self, indices: I) -> &mut Self
    where
        I: IntoIterator<Item = usize>,
    {
        let len = self.members.len();
        let keep: BTreeSet<usize> = indices.into_iter().filter(|index| *index < len).collect();

        if keep.is_empty() {
            self.clear();
            return self;
        }

        let mut index = 0;
        self.members.retain(|_| {
            let kept = keep.contains(&index);
            index += 1;
            kept
        });

        debug!("Reduced '{}' set from {} to {} members", self.element_type, len, self.members.len());
        self
    }

    /// Removes every member; the declared type and rules stay.
    pub fn clear(&mut self) {
        self.members.clear();
    }
}
