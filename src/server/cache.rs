use std::sync::Arc;
use std::time::Duration;

use axum::body::Bytes;
use chrono::NaiveDate;
use mini_moka::sync::Cache;

use crate::calendar::CalendarQuery;

/// A rendered image is a pure function of the query and the day it was drawn.
pub type RenderKey = (CalendarQuery, NaiveDate);

/// Encoded PNGs, shared across handlers. Capacity 0 turns caching off.
#[derive(Clone)]
pub struct RenderCache {
    inner: Option<Arc<Cache<RenderKey, Bytes>>>,
}

impl RenderCache {
    pub fn new(capacity: u64, ttl: Duration) -> Self {
        if capacity == 0 {
            return Self::disabled();
        }
        let cache = Cache::builder()
            .max_capacity(capacity)
            .time_to_live(ttl)
            .build();
        Self { inner: Some(Arc::new(cache)) }
    }

    pub fn disabled() -> Self {
        Self { inner: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.inner.is_some()
    }

    pub fn get(&self, key: &RenderKey) -> Option<Bytes> {
        self.inner.as_ref()?.get(key)
    }

    pub fn insert(&self, key: RenderKey, png: Bytes) {
        if let Some(cache) = &self.inner {
            cache.insert(key, png);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{CalendarKind, CanvasSize};

    fn key(day: u32) -> RenderKey {
        let query = CalendarQuery::new(CalendarKind::Year, CanvasSize::default());
        (query, NaiveDate::from_ymd_opt(2026, 3, day).unwrap())
    }

    #[test]
    fn test_hit_and_miss() {
        let cache = RenderCache::new(8, Duration::from_secs(60));
        assert!(cache.is_enabled());
        cache.insert(key(1), Bytes::from_static(b"png"));
        assert_eq!(cache.get(&key(1)), Some(Bytes::from_static(b"png")));
        assert_eq!(cache.get(&key(2)), None);
    }

    #[test]
    fn test_zero_capacity_disables() {
        let cache = RenderCache::new(0, Duration::from_secs(60));
        assert!(!cache.is_enabled());
        cache.insert(key(1), Bytes::from_static(b"png"));
        assert_eq!(cache.get(&key(1)), None);
    }
}
