//! A small in-memory cache with per-entry expiry.
//!
//! [`TtlCache`] is constructed once during startup and handed to whichever
//! services need it; cloning it is cheap and every clone refers to the same
//! entries.
//!
//! Filling the cache from the database races with invalidations: a reader can
//! load a row, a writer can commit and invalidate, and the reader then stores
//! the row it loaded before the write. To prevent this, readers take a
//! [`Generation`] before loading and hand it back to [`TtlCache::insert()`],
//! which drops the value if the key was invalidated in the meantime.

use std::fmt;
use std::hash::Hash;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use lru::LruCache;

/// A bounded map whose entries expire after a fixed duration.
///
/// Expired entries are dropped when they are looked up. Once the cache is
/// full, inserting drops expired entries from the least recently used end,
/// and if that does not free up space, evicts the least recently used entry.
pub struct TtlCache<K, V>
where
	K: Eq + Hash,
{
	/// `None` if caching is disabled.
	inner: Option<Arc<Mutex<Inner<K, V>>>>,

	/// How long an entry stays valid after insertion.
	ttl: Duration,
}

/// Marks the point in time a reader started loading a value.
///
/// Obtained from [`TtlCache::generation()`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Generation(u64);

/// The state shared between clones of a [`TtlCache`].
struct Inner<K, V>
{
	/// The cached values.
	entries: LruCache<K, Entry<V>>,

	/// The generation at which each key was last invalidated.
	invalidations: LruCache<K, Generation>,

	/// Bumped on every invalidation.
	current: Generation,

	/// The newest invalidation that was evicted from `invalidations`.
	///
	/// Inserts carrying an older generation are rejected for every key, since
	/// we no longer know which key that invalidation was for.
	floor: Generation,
}

/// A cached value and when it was inserted.
#[derive(Debug)]
struct Entry<V>
{
	/// The cached value.
	value: V,

	/// When the value was inserted.
	inserted_at: Instant,
}

impl<K, V> Clone for TtlCache<K, V>
where
	K: Eq + Hash,
{
	fn clone(&self) -> Self
	{
		Self { inner: self.inner.clone(), ttl: self.ttl }
	}
}

impl<K, V> fmt::Debug for TtlCache<K, V>
where
	K: Eq + Hash,
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		f.debug_struct("TtlCache")
			.field("ttl", &self.ttl)
			.field("enabled", &self.inner.is_some())
			.finish_non_exhaustive()
	}
}

impl<K, V> TtlCache<K, V>
where
	K: Eq + Hash + Clone,
	V: Clone,
{
	/// Creates a new, empty cache.
	///
	/// A `capacity` of 0 disables caching entirely.
	pub fn new(ttl: Duration, capacity: usize) -> Self
	{
		let inner = NonZeroUsize::new(capacity).map(|capacity| {
			Arc::new(Mutex::new(Inner {
				entries: LruCache::new(capacity),
				invalidations: LruCache::new(capacity),
				current: Generation(0),
				floor: Generation(0),
			}))
		});

		Self { inner, ttl }
	}

	/// Returns a copy of the value stored for `key`, if it has not expired yet.
	pub fn get(&self, key: &K) -> Option<V>
	{
		let mut inner = self.lock()?;
		let entry = inner.entries.get(key)?;

		if entry.inserted_at.elapsed() < self.ttl {
			return Some(entry.value.clone());
		}

		inner.entries.pop(key);

		None
	}

	/// The current generation.
	///
	/// Take this before loading a value that will be passed to
	/// [`TtlCache::insert()`].
	pub fn generation(&self) -> Generation
	{
		self.lock().map_or(Generation(0), |inner| inner.current)
	}

	/// Stores `value` for `key`, replacing any previous value.
	///
	/// Nothing is stored if `key` was invalidated after `generation` was
	/// taken. Returns whether the value was stored.
	pub fn insert(&self, key: K, value: V, generation: Generation) -> bool
	{
		let Some(mut inner) = self.lock() else {
			return false;
		};

		let invalidated = inner
			.invalidations
			.peek(&key)
			.is_some_and(|&invalidated_at| invalidated_at > generation);

		if generation < inner.floor || invalidated {
			return false;
		}

		if inner.entries.len() == inner.entries.cap().get() && !inner.entries.contains(&key) {
			while inner
				.entries
				.peek_lru()
				.is_some_and(|(_, entry)| entry.inserted_at.elapsed() >= self.ttl)
			{
				inner.entries.pop_lru();
			}
		}

		inner.entries.put(key, Entry { value, inserted_at: Instant::now() });

		true
	}

	/// Removes the entry for `key` and rejects in-flight inserts for it.
	pub fn invalidate(&self, key: &K)
	{
		let Some(mut inner) = self.lock() else {
			return;
		};

		inner.entries.pop(key);
		inner.current = Generation(inner.current.0 + 1);

		let current = inner.current;

		if let Some((evicted, invalidated_at)) = inner.invalidations.push(key.clone(), current) {
			if evicted != *key {
				inner.floor = inner.floor.max(invalidated_at);
			}
		}
	}

	/// The number of entries currently stored, including expired ones that
	/// have not been cleaned up yet.
	pub fn len(&self) -> usize
	{
		self.lock().map_or(0, |inner| inner.entries.len())
	}

	/// Whether the cache is empty.
	pub fn is_empty(&self) -> bool
	{
		self.len() == 0
	}

	/// Locks the entries, or returns `None` if caching is disabled.
	///
	/// A panic while holding the lock cannot leave the map in an inconsistent
	/// state, so poisoning is ignored.
	fn lock(&self) -> Option<MutexGuard<'_, Inner<K, V>>>
	{
		self.inner
			.as_ref()
			.map(|inner| inner.lock().unwrap_or_else(PoisonError::into_inner))
	}
}

#[cfg(test)]
mod tests
{
	use super::*;

	#[test]
	fn get_and_insert()
	{
		let cache = TtlCache::new(Duration::from_secs(60), 8);

		assert_eq!(cache.get(&1), None);

		assert!(cache.insert(1, "one", cache.generation()));
		assert_eq!(cache.get(&1), Some("one"));

		assert!(cache.insert(1, "uno", cache.generation()));
		assert_eq!(cache.get(&1), Some("uno"));
		assert_eq!(cache.len(), 1);
	}

	#[test]
	fn expired_entries_are_dropped()
	{
		let cache = TtlCache::new(Duration::ZERO, 8);

		cache.insert(1, "one", cache.generation());

		assert_eq!(cache.get(&1), None);
		assert!(cache.is_empty(), "expired entry should have been removed");
	}

	#[test]
	fn evicts_least_recently_used_when_full()
	{
		let cache = TtlCache::new(Duration::from_secs(60), 2);

		cache.insert(1, "one", cache.generation());
		cache.insert(2, "two", cache.generation());

		// touch 1 so 2 becomes the least recently used entry
		assert_eq!(cache.get(&1), Some("one"));

		cache.insert(3, "three", cache.generation());

		assert_eq!(cache.len(), 2);
		assert_eq!(cache.get(&2), None);
		assert_eq!(cache.get(&1), Some("one"));
		assert_eq!(cache.get(&3), Some("three"));
	}

	#[test]
	fn clones_share_entries()
	{
		let cache = TtlCache::new(Duration::from_secs(60), 8);
		let clone = cache.clone();

		cache.insert("key", 42, cache.generation());

		assert_eq!(clone.get(&"key"), Some(42));

		clone.invalidate(&"key");

		assert_eq!(cache.get(&"key"), None);
	}

	#[test]
	fn insert_after_invalidation_is_rejected()
	{
		let cache = TtlCache::new(Duration::from_secs(60), 8);

		// a reader misses and starts loading
		let generation = cache.generation();

		// a writer commits in the meantime
		cache.invalidate(&1);

		assert!(!cache.insert(1, "stale", generation), "stale value must not be stored");
		assert_eq!(cache.get(&1), None);

		assert!(cache.insert(1, "fresh", cache.generation()));
		assert_eq!(cache.get(&1), Some("fresh"));
	}

	#[test]
	fn invalidating_other_keys_does_not_reject_insert()
	{
		let cache = TtlCache::new(Duration::from_secs(60), 8);
		let generation = cache.generation();

		cache.invalidate(&2);

		assert!(cache.insert(1, "one", generation));
		assert_eq!(cache.get(&1), Some("one"));
	}

	#[test]
	fn forgotten_invalidations_reject_older_inserts()
	{
		let cache = TtlCache::new(Duration::from_secs(60), 2);
		let generation = cache.generation();

		// more invalidations than the cache remembers
		cache.invalidate(&1);
		cache.invalidate(&2);
		cache.invalidate(&3);

		assert!(!cache.insert(1, "stale", generation));
		assert!(cache.insert(1, "fresh", cache.generation()));
	}

	#[test]
	fn zero_capacity()
	{
		let cache = TtlCache::new(Duration::from_secs(60), 0);

		assert!(!cache.insert(1, 1, cache.generation()));
		assert_eq!(cache.get(&1), None);

		cache.invalidate(&1);

		assert!(cache.is_empty());
	}
}
