//! Channel command model and wire grammar.
//!
//! # Data Flow
//! ```text
//! JSON body {"3":176,"5":214}
//!     → ChannelCommand::from_map (numeric keys, pinned ascending order)
//!     → encode() → "3:176,5:214"
//!     → written to the daemon socket by the downstream forwarder
//! ```
//!
//! # Design Decisions
//! - Serialization order is pinned to ascending channel id so the same
//!   mapping always produces the same bytes
//! - Values are not range-checked; the daemon clamps to its own limits
//! - decode() exists so consumers of the grammar can verify round-trips

use std::collections::HashMap;
use std::fmt::Write as _;

use thiserror::Error;

/// Errors produced while building or parsing a channel command.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("command must contain at least one channel")]
    Empty,

    #[error("channel identifier `{0}` is not a non-negative integer")]
    InvalidChannel(String),

    #[error("value `{0}` is not an integer")]
    InvalidValue(String),

    #[error("channel {0} appears more than once")]
    DuplicateChannel(u32),

    #[error("malformed pair `{0}`, expected `channel:value`")]
    MalformedPair(String),
}

/// An ordered set of `(channel, value)` pairs destined for the control daemon.
///
/// Channels are unique and held in ascending order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelCommand {
    pairs: Vec<(u32, i64)>,
}

impl ChannelCommand {
    /// Build a command from the parsed request mapping.
    ///
    /// Keys must parse as non-negative integers. Keys that alias the same
    /// channel (e.g. `"2"` and `"02"`) are rejected.
    pub fn from_map(map: &HashMap<String, i64>) -> Result<Self, CommandError> {
        if map.is_empty() {
            return Err(CommandError::Empty);
        }

        let mut pairs = Vec::with_capacity(map.len());
        for (key, &value) in map {
            let channel = key
                .parse::<u32>()
                .map_err(|_| CommandError::InvalidChannel(key.clone()))?;
            pairs.push((channel, value));
        }

        Self::from_pairs(pairs)
    }

    /// Build a single-channel command (the `/set` query variant).
    pub fn single(channel: u32, value: i64) -> Self {
        Self {
            pairs: vec![(channel, value)],
        }
    }

    fn from_pairs(mut pairs: Vec<(u32, i64)>) -> Result<Self, CommandError> {
        if pairs.is_empty() {
            return Err(CommandError::Empty);
        }
        pairs.sort_unstable_by_key(|&(channel, _)| channel);
        for window in pairs.windows(2) {
            if window[0].0 == window[1].0 {
                return Err(CommandError::DuplicateChannel(window[0].0));
            }
        }
        Ok(Self { pairs })
    }

    /// Render the wire form: `2:25,3:100`. No brackets, no trailing separator.
    pub fn encode(&self) -> String {
        let mut out = String::with_capacity(self.pairs.len() * 8);
        for (i, (channel, value)) in self.pairs.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            // write! to a String cannot fail
            let _ = write!(out, "{}:{}", channel, value);
        }
        out
    }

    /// Parse the wire form back into a command.
    pub fn decode(input: &str) -> Result<Self, CommandError> {
        if input.is_empty() {
            return Err(CommandError::Empty);
        }

        let mut pairs = Vec::new();
        for part in input.split(',') {
            let (channel, value) = part
                .split_once(':')
                .ok_or_else(|| CommandError::MalformedPair(part.to_string()))?;
            let channel = channel
                .parse::<u32>()
                .map_err(|_| CommandError::InvalidChannel(channel.to_string()))?;
            let value = value
                .parse::<i64>()
                .map_err(|_| CommandError::InvalidValue(value.to_string()))?;
            pairs.push((channel, value));
        }

        Self::from_pairs(pairs)
    }

    /// Pairs in ascending channel order.
    pub fn pairs(&self) -> &[(u32, i64)] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}
