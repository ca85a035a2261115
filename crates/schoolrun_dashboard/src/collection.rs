use serde::Serialize;

use crate::{
    error::DashboardError,
    records::{Record, RecordStatus},
};

/// Ordered local store. Insertion order is kept and archived records stay in place.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct Collection<T> {
    items: Vec<T>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Record> Collection<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }

    pub fn add(&mut self, item: T) -> Result<(), DashboardError> {
        if self.get(item.id()).is_some() {
            return Err(DashboardError::InvalidState(format!(
                "{} \"{}\" already exists",
                T::KIND,
                item.id()
            )));
        }

        self.items.push(item);
        Ok(())
    }

    /// Replaces the record with the same id.
    pub fn update(&mut self, item: T) -> Result<(), DashboardError> {
        let existing = self
            .items
            .iter_mut()
            .find(|existing| existing.id() == item.id())
            .ok_or_else(|| DashboardError::not_found(T::KIND, item.id()))?;

        *existing = item;
        Ok(())
    }

    pub fn archive(&mut self, id: &str) -> Result<(), DashboardError> {
        let item = self
            .items
            .iter_mut()
            .find(|item| item.id() == id)
            .ok_or_else(|| DashboardError::not_found(T::KIND, id))?;

        item.set_status(RecordStatus::Archived);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Like [`Collection::get`], but archived records and missing ids are errors.
    pub fn get_active(&self, id: &str) -> Result<&T, DashboardError> {
        self.get(id)
            .filter(|item| item.is_active())
            .ok_or_else(|| DashboardError::not_found(T::KIND, id))
    }

    pub fn active(&self) -> impl Iterator<Item = &T> {
        self.items.iter().filter(|item| item.is_active())
    }

    pub fn active_count(&self) -> usize {
        self.active().count()
    }

    pub fn all(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use crate::records::Bus;

    use super::*;

    fn bus(id: &str) -> Bus {
        Bus {
            id: id.to_string(),
            ..Bus::new("LX21 ABC", 40)
        }
    }

    #[test]
    fn test_add_keeps_order_and_rejects_duplicates() {
        let mut collection = Collection::default();
        collection.add(bus("bus-1")).unwrap();
        collection.add(bus("bus-2")).unwrap();

        assert!(matches!(
            collection.add(bus("bus-1")),
            Err(DashboardError::InvalidState(_))
        ));

        let ids: Vec<&str> = collection.all().iter().map(|bus| bus.id.as_str()).collect();
        assert_eq!(ids, vec!["bus-1", "bus-2"]);
    }

    #[test]
    fn test_update_replaces_by_id() {
        let mut collection = Collection::new(vec![bus("bus-1")]);

        let mut updated = bus("bus-1");
        updated.capacity = 60;
        collection.update(updated).unwrap();

        assert_eq!(collection.get("bus-1").map(|bus| bus.capacity), Some(60));
    }

    #[test]
    fn test_update_missing_record() {
        let mut collection = Collection::new(vec![bus("bus-1")]);

        assert_eq!(
            collection.update(bus("bus-9")),
            Err(DashboardError::not_found("bus", "bus-9"))
        );
    }

    #[test]
    fn test_archive_hides_from_active() {
        let mut collection = Collection::new(vec![bus("bus-1"), bus("bus-2")]);
        collection.archive("bus-1").unwrap();

        assert_eq!(collection.len(), 2);
        assert_eq!(collection.active_count(), 1);
        assert_eq!(
            collection.get("bus-1").map(|bus| bus.status),
            Some(RecordStatus::Archived)
        );
        assert!(collection.get_active("bus-1").is_err());
        assert!(collection.get_active("bus-2").is_ok());
        assert!(collection.archive("bus-3").is_err());
    }
}
