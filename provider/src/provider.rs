//! `TzdbProvider`, a cache of zones loaded from the bundled database.

use std::{cell::RefCell, collections::BTreeMap, rc::Rc};

use crate::{TzifResult, TzifTimeZone};

/// Loads zones from the IANA time zone database bundled by `jiff-tzdb` and
/// keeps them until [`TzdbProvider::clear`] is called.
#[derive(Debug, Default)]
pub struct TzdbProvider {
    cache: RefCell<BTreeMap<String, Rc<TzifTimeZone>>>,
}

impl TzdbProvider {
    /// Returns the zone for `identifier`, loading it on first use.
    pub fn get(&self, identifier: &str) -> TzifResult<Rc<TzifTimeZone>> {
        if let Some(zone) = self.cache.borrow().get(identifier) {
            return Ok(zone.clone());
        }
        let zone = Rc::new(TzifTimeZone::from_tzdb(identifier)?);
        self.cache
            .borrow_mut()
            .insert(identifier.to_string(), zone.clone());
        Ok(zone)
    }

    /// Drops every cached zone.
    pub fn clear(&self) {
        self.cache.borrow_mut().clear();
    }

    /// The number of cached zones.
    pub fn len(&self) -> usize {
        self.cache.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.borrow().is_empty()
    }
}
