impl<E: Entity> EntitySet<E> {
    /// Indices of the members matching every field of `query`, in order.
    ///
    /// Members below `offset` are skipped and scanning stops once `limit`
    /// indices are collected (`0` = unlimited). Under
    /// [`KeyMatching::PerField`] a matching member's index is emitted once per
    /// query field, so a two-field match shows up twice and an empty query
    /// yields nothing. Under [`KeyMatching::PerMember`] every matching member
    /// is emitted once, and an empty query matches all of them.
    ///
    /// `limit` counts emitted entries, not members, so it can cut a member's
    /// repeated entries short.
    pub fn find_keys(&self, query: &Query, limit: usize, offset: usize) -> Result<Vec<usize>> {
        let repeats = match self.config.key_matching {
            KeyMatching::PerField => query.len(),
            KeyMatching::PerMember => 1,
        };

        let mut keys = Vec::new();
        if repeats == 0 {
            return Ok(keys);
        }

        for (index, member) in self.members.iter().enumerate().skip(offset) {
            if !query.matches(member, self.config.case_insensitive)? {
                continue;
            }

            keys.extend(std::iter::repeat_n(index, repeats));
            if limit > 0 && keys.len() >= limit {
                keys.truncate(limit);
                break;
            }
        }

        Ok(keys)
    }

    /// First matching index.
    pub fn find_key(&self, query: &Query) -> Result<Option<usize>> {
        Ok(self.find_keys(query, 1, 0)?.first().copied())
    }

    /// Walks every member in order.
    pub fn walk<F>(&self, mut callback: F) -> &Self
    where
        F: FnMut(&E),
    {
        for member in &self.members {
            callback(member);
        }
        self
    }

    /// Walks every member in order with mutable access.
    pub fn walk_mut<F>(&mut self, mut callback: F) -> &mut Self
    where
        F: FnMut(&mut E),
    {
        for member in &mut self.members {
            callback(member);
        }
        self
    }

    /// Values of `field` across all members; absent fields read as `Null`.
    pub fn aggregate(&self, field: &str) -> Vec<Value> {
        self.members
            .iter()
            .map(|member| member.field(field).unwrap_or(Value::Null))
            .collect()
    }

    /// Collects validation messages from every member, in member order.
    pub fn validate(&self) -> Vec<String> {
        let mut messages = Vec::new();

        match self.config.validation {
            ValidationMode::PerMember => {
                for member in &self.members {
                    messages.extend(member.validate());
                    messages.extend(self.validators.check(member));
                }
            }
            ValidationMode::PerRule => {
                for _ in self.validators.iter() {
                    for member in &self.members {
                        messages.extend(member.validate());
                    }
                }
            }
        }

        messages
    }

    /// Exports every member through `mapper`, in order.
    pub fn to_array(&self, mapper: Option<&str>) -> Result<Vec<Value>> {
        let mapper = self.config.mapper(mapper);
        self.members
            .iter()
            .map(|member| member.to_array(mapper))
            .collect()
    }
}

impl<E: Entity + Clone> EntitySet<E> {
    /// Returns a copy of the set restricted to the members matching `query`.
    ///
    /// The receiver is left untouched.
    pub fn find(&self, query: &Query, limit: usize, offset: usize) -> Result<Self> {
        let keys = self.find_keys(query, limit, offset)?;
        let mut found = self.clone();
        found.reduce(keys);
        Ok(found)
    }

    /// Returns a copy of the first matching member.
    pub fn find_one(&self, query: &Query) -> Result<Option<E>> {
        Ok(self
            .find_key(query)?
            .and_then(|index| self.members.get(index))
            .cloned())
    }
}
