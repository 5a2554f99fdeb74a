use super::EntitySet;
use crate::entity::Entity;

/// Forward cursor over a set, restartable from position 0.
#[derive(Debug)]
pub struct SetCursor<'a, E: Entity> {
    set: &'a EntitySet<E>,
    position: usize,
}

impl<'a, E: Entity> SetCursor<'a, E> {
    pub(super) fn new(set: &'a EntitySet<E>) -> Self {
        Self { set, position: 0 }
    }

    pub fn current(&self) -> Option<&'a E> {
        self.set.get(self.position)
    }

    /// Position of the current member, if the cursor is on one.
    pub fn key(&self) -> Option<usize> {
        self.valid().then_some(self.position)
    }

    pub fn advance(&mut self) {
        if self.valid() {
            self.position += 1;
        }
    }

    pub fn rewind(&mut self) {
        self.position = 0;
    }

    pub fn valid(&self) -> bool {
        self.set.contains_index(self.position)
    }
}
