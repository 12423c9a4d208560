use std::fmt;

use crate::{locale::Locale, storage::Storage};

/// One of the two measured message pipelines.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub enum Channel {
    /// Messages published by this process.
    Published,
    /// Messages received by this process.
    Received,
}

impl Channel {
    /// All channels, in display order.
    pub const ALL: [Channel; 2] = [Channel::Published, Channel::Received];

    /// Gets the prefix used for this channel in metric identifiers.
    pub fn as_str(self) -> &'static str {
        match self {
            Channel::Published => "published",
            Channel::Received => "received",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-channel message counts.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ChannelStatistics {
    /// Messages currently being processed.
    pub processing: u64,
    /// Messages processed successfully.
    pub succeeded: u64,
    /// Messages that failed processing.
    pub failed: u64,
}

/// A point-in-time statistics snapshot.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Statistics {
    /// Number of live servers.
    pub servers: u64,
    /// Counts for the published channel.
    pub published: ChannelStatistics,
    /// Counts for the received channel.
    pub received: ChannelStatistics,
}

impl Statistics {
    /// Gets the counts for the given channel.
    pub fn channel(&self, channel: Channel) -> &ChannelStatistics {
        match channel {
            Channel::Published => &self.published,
            Channel::Received => &self.received,
        }
    }
}

/// Everything a metric computation may read.
///
/// A context is built once per render pass and lent to every definition in turn. It is strictly
/// read-only: computations cannot reach the registry through it.
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
    statistics: &'a Statistics,
    storage: &'a dyn Storage,
    locale: &'a Locale,
}

impl<'a> RenderContext<'a> {
    /// Creates a new `RenderContext`.
    pub fn new(statistics: &'a Statistics, storage: &'a dyn Storage, locale: &'a Locale) -> Self {
        RenderContext { statistics, storage, locale }
    }

    /// Gets the statistics snapshot.
    pub fn statistics(&self) -> &'a Statistics {
        self.statistics
    }

    /// Gets the storage accessor.
    pub fn storage(&self) -> &'a dyn Storage {
        self.storage
    }

    /// Gets the display conventions.
    pub fn locale(&self) -> &'a Locale {
        self.locale
    }
}

impl fmt::Debug for RenderContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderContext")
            .field("statistics", self.statistics)
            .field("locale", self.locale)
            .finish_non_exhaustive()
    }
}
