//! Process-lifetime chart memo keyed by profile fingerprint.

use crate::ephemeris::EphemerisChart;
use crate::profile::{BirthProfile, Fingerprint};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, PoisonError, RwLock};

struct Entry {
    profile: BirthProfile,
    chart: Arc<EphemerisChart>,
}

#[derive(Default)]
struct Inner {
    entries: HashMap<Fingerprint, Entry>,
    /// Insertion order, oldest first.
    order: VecDeque<Fingerprint>,
}

/// Natal charts shared across requests. A fingerprint only covers identity
/// fields, so an entry is returned only when its full profile matches.
pub struct ChartCache {
    capacity: Option<usize>,
    inner: RwLock<Inner>,
}

impl ChartCache {
    /// No eviction.
    pub fn unbounded() -> Self {
        Self {
            capacity: None,
            inner: RwLock::new(Inner::default()),
        }
    }

    /// Oldest entries are evicted first. A capacity of zero disables caching.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: Some(capacity),
            inner: RwLock::new(Inner::default()),
        }
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    pub fn get(&self, profile: &BirthProfile) -> Option<Arc<EphemerisChart>> {
        let key = Fingerprint::of(profile);
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        match inner.entries.get(&key) {
            Some(entry) if entry.profile == *profile => {
                log::debug!("Chart cache hit for {}", key);
                Some(Arc::clone(&entry.chart))
            }
            Some(_) => {
                log::debug!("Chart cache entry for {} computed with other settings", key);
                None
            }
            None => None,
        }
    }

    pub fn insert(&self, profile: &BirthProfile, chart: Arc<EphemerisChart>) {
        if self.capacity == Some(0) {
            return;
        }
        let key = Fingerprint::of(profile);
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let entry = Entry {
            profile: profile.clone(),
            chart,
        };
        if inner.entries.insert(key.clone(), entry).is_none() {
            inner.order.push_back(key);
        }
        if let Some(capacity) = self.capacity {
            while inner.entries.len() > capacity {
                let Some(oldest) = inner.order.pop_front() else {
                    break;
                };
                inner.entries.remove(&oldest);
                log::debug!("Evicted {} from chart cache", oldest);
            }
        }
    }

    /// Cached chart, or the result of `compute` which is then cached.
    pub fn get_or_try_insert<E>(
        &self,
        profile: &BirthProfile,
        compute: impl FnOnce() -> Result<EphemerisChart, E>,
    ) -> Result<Arc<EphemerisChart>, E> {
        if let Some(chart) = self.get(profile) {
            return Ok(chart);
        }
        log::debug!("Chart cache miss for {}", Fingerprint::of(profile));
        let chart = Arc::new(compute()?);
        self.insert(profile, Arc::clone(&chart));
        Ok(chart)
    }

    pub fn len(&self) -> usize {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        inner.entries.clear();
        inner.order.clear();
    }
}

impl Default for ChartCache {
    fn default() -> Self {
        Self::unbounded()
    }
}
