//! Configuration for colstore
//!
//! Centralized configuration with sensible defaults.
//!
//! The on-disk format does not record which codec wrote a column's
//! extents, so import and export must agree on the codec through this
//! configuration.

use crate::codec::Codec;

/// Configuration for a single import or export operation
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Extent Configuration
    // -------------------------------------------------------------------------
    /// Max uncompressed bytes accumulated per extent before flush
    pub max_extent_len: usize,

    /// Compression codec applied to every column
    pub codec: Codec,

    // -------------------------------------------------------------------------
    // Export Configuration
    // -------------------------------------------------------------------------
    /// Byte placed between fields of an exported record
    pub field_separator: u8,

    /// Byte placed after the last field of an exported record
    pub record_separator: u8,

    /// Capacity of the reusable export output buffer (in bytes)
    pub output_buffer_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_extent_len: 1024 * 1024, // 1 MB uncompressed per extent
            codec: Codec::Lz4,
            field_separator: b',',
            record_separator: b'\n',
            output_buffer_size: 128 * 1024, // 128 KB
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the maximum uncompressed extent length (in bytes)
    pub fn max_extent_len(mut self, len: usize) -> Self {
        self.config.max_extent_len = len;
        self
    }

    /// Set the compression codec
    pub fn codec(mut self, codec: Codec) -> Self {
        self.config.codec = codec;
        self
    }

    /// Set the export field separator
    pub fn field_separator(mut self, sep: u8) -> Self {
        self.config.field_separator = sep;
        self
    }

    /// Set the export record separator
    pub fn record_separator(mut self, sep: u8) -> Self {
        self.config.record_separator = sep;
        self
    }

    /// Set the export output buffer capacity (in bytes)
    pub fn output_buffer_size(mut self, size: usize) -> Self {
        self.config.output_buffer_size = size;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
