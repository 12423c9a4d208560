//! Storage collaborator interfaces.
//!
//! Metrics that need more than the statistics snapshot open a connection through [`Storage`],
//! use it for the duration of a single computation, and drop it before returning. Connections
//! are plain boxed values, so they are released on every exit path, including early returns
//! through `?`.
//!
//! Not every backend can answer every query. Optional capabilities are exposed as accessor
//! methods on [`StorageConnection`] that return `None` when unsupported.
use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        PoisonError, RwLock,
    },
};

use indexmap::IndexSet;

use crate::error::StorageError;

/// A source of storage connections.
pub trait Storage: Send + Sync {
    /// Opens a connection.
    ///
    /// # Errors
    ///
    /// If the backend cannot be reached, an error is returned.
    fn connect(&self) -> Result<Box<dyn StorageConnection + '_>, StorageError>;
}

/// An open storage connection.
///
/// Dropping the connection releases it.
pub trait StorageConnection {
    /// Gets the set query capability of this connection, if supported.
    fn as_set_queries(&self) -> Option<&dyn SetQueries> {
        None
    }
}

/// Queries over named sets.
pub trait SetQueries {
    /// Gets the number of members in the named set.
    ///
    /// A set that does not exist has zero members.
    ///
    /// # Errors
    ///
    /// If the query fails, an error is returned.
    fn set_cardinality(&self, name: &str) -> Result<u64, StorageError>;
}

/// A thread-safe in-memory [`Storage`].
///
/// Holds named sets of members and tracks how many connections are currently open, which makes
/// it useful both for demos and for verifying that computations release their connections.
/// The set capability can be switched off to mimic a backend without it, connections can be made
/// to fail to mimic an unreachable backend, and set queries can be made to fail on an otherwise
/// healthy connection.
#[derive(Debug, Default)]
pub struct InMemoryStorage {
    sets: RwLock<HashMap<String, IndexSet<String>>>,
    open: AtomicUsize,
    opened: AtomicUsize,
    without_set_queries: AtomicBool,
    unavailable: AtomicBool,
    query_failure: AtomicBool,
}

impl InMemoryStorage {
    /// Creates a new, empty `InMemoryStorage`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a member to the named set.
    ///
    /// Returns `false` if the member was already present.
    pub fn add_to_set<S, M>(&self, set: S, member: M) -> bool
    where
        S: Into<String>,
        M: Into<String>,
    {
        let mut sets = self.sets.write().unwrap_or_else(PoisonError::into_inner);
        sets.entry(set.into()).or_default().insert(member.into())
    }

    /// Removes a member from the named set.
    ///
    /// Returns `true` if the member was present.
    pub fn remove_from_set(&self, set: &str, member: &str) -> bool {
        let mut sets = self.sets.write().unwrap_or_else(PoisonError::into_inner);
        sets.get_mut(set).is_some_and(|members| members.shift_remove(member))
    }

    /// Sets whether or not connections expose the set query capability.
    pub fn set_queries_enabled(&self, enabled: bool) {
        self.without_set_queries.store(!enabled, Ordering::Release);
    }

    /// Sets whether or not opening a connection fails.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::Release);
    }

    /// Sets whether or not set queries fail once a connection is open.
    pub fn set_query_failure(&self, failing: bool) {
        self.query_failure.store(failing, Ordering::Release);
    }

    /// Gets the number of connections currently open.
    pub fn open_connections(&self) -> usize {
        self.open.load(Ordering::Acquire)
    }

    /// Gets the number of connections opened over the lifetime of this storage.
    pub fn total_connections(&self) -> usize {
        self.opened.load(Ordering::Acquire)
    }
}

impl Storage for InMemoryStorage {
    fn connect(&self) -> Result<Box<dyn StorageConnection + '_>, StorageError> {
        if self.unavailable.load(Ordering::Acquire) {
            return Err(StorageError::Unavailable { reason: "in-memory storage disabled".into() });
        }

        self.open.fetch_add(1, Ordering::AcqRel);
        self.opened.fetch_add(1, Ordering::AcqRel);
        Ok(Box::new(InMemoryConnection {
            storage: self,
            set_queries: !self.without_set_queries.load(Ordering::Acquire),
        }))
    }
}

struct InMemoryConnection<'a> {
    storage: &'a InMemoryStorage,
    set_queries: bool,
}

impl StorageConnection for InMemoryConnection<'_> {
    fn as_set_queries(&self) -> Option<&dyn SetQueries> {
        if self.set_queries {
            Some(self)
        } else {
            None
        }
    }
}

impl SetQueries for InMemoryConnection<'_> {
    fn set_cardinality(&self, name: &str) -> Result<u64, StorageError> {
        if self.storage.query_failure.load(Ordering::Acquire) {
            return Err(StorageError::Query {
                set: name.to_owned(),
                reason: "in-memory set queries disabled".into(),
            });
        }

        let sets = self.storage.sets.read().unwrap_or_else(PoisonError::into_inner);
        Ok(sets.get(name).map_or(0, |members| members.len() as u64))
    }
}

impl Drop for InMemoryConnection<'_> {
    fn drop(&mut self) {
        self.storage.open.fetch_sub(1, Ordering::AcqRel);
    }
}
