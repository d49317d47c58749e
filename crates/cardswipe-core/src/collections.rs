//! Insertion-ordered map aliases.
//!
//! Subscriber registries must notify in registration order and support
//! removal by id, so they sit on `IndexMap`. The hasher defaults to FxHash and
//! falls back to std's `RandomState` with the `std-hash` feature.

#[cfg(feature = "std-hash")]
pub mod map {
    pub type IndexMap<K, V> = indexmap::IndexMap<K, V, std::collections::hash_map::RandomState>;
}

#[cfg(not(feature = "std-hash"))]
pub mod map {
    pub type IndexMap<K, V> = indexmap::IndexMap<K, V, rustc_hash::FxBuildHasher>;
}
