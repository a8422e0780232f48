// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Stack configuration: capacity policy and protection toggles.

use bitflags::bitflags;

use crate::error::ConfigError;

/// Default minimum (and initial) capacity.
pub const DEFAULT_MIN_CAPACITY: usize = 16;

/// Default growth factor.
pub const DEFAULT_GROWTH_FACTOR: f64 = 2.0;

bitflags! {
    /// Independently toggleable protections.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Protections: u8 {
        /// Sentinels around the control block and the buffer.
        const CANARY       = 0b0001;
        /// Combine every canary with the control block's address.
        ///
        /// Has no effect without `CANARY`.
        const BIND_ADDRESS = 0b0010;
        /// Structural and data checksums.
        const HASH         = 0b0100;
        /// Keep name, function, file and line of the declaration.
        const DEBUG_INFO   = 0b1000;
    }
}

/// Validated stack configuration.
///
/// Built through [`StackConfig::builder`]; the [`Default`] configuration uses
/// a minimum capacity of 16, a growth factor of 2.0 and every protection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StackConfig {
    min_capacity: usize,
    growth_factor: f64,
    protections: Protections,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            min_capacity: DEFAULT_MIN_CAPACITY,
            growth_factor: DEFAULT_GROWTH_FACTOR,
            protections: Protections::all(),
        }
    }
}

impl StackConfig {
    /// Starts a builder from the default configuration.
    pub fn builder() -> StackConfigBuilder {
        StackConfigBuilder {
            config: Self::default(),
        }
    }

    /// Initial capacity and lower bound for shrinking.
    pub fn min_capacity(&self) -> usize {
        self.min_capacity
    }

    /// Capacity multiplier applied when growing, and the base of the shrink
    /// hysteresis band.
    pub fn growth_factor(&self) -> f64 {
        self.growth_factor
    }

    /// Enabled protections.
    pub fn protections(&self) -> Protections {
        self.protections
    }

    pub(crate) fn has(&self, protection: Protections) -> bool {
        self.protections.contains(protection)
    }

    /// Reassembles a configuration recorded in a control block, unvalidated.
    pub(crate) fn from_block_parts(
        min_capacity: usize,
        growth_factor: f64,
        protections: Protections,
    ) -> Self {
        Self {
            min_capacity,
            growth_factor,
            protections,
        }
    }
}

/// Builder for [`StackConfig`].
///
/// ```rust
/// use bulwark_stack::{Protections, StackConfig};
///
/// let config = StackConfig::builder()
///     .min_capacity(4)
///     .growth_factor(1.5)
///     .protections(Protections::CANARY | Protections::HASH)
///     .build()
///     .expect("Failed to build()");
///
/// assert_eq!(config.min_capacity(), 4);
/// assert!(StackConfig::builder().growth_factor(1.0).build().is_err());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct StackConfigBuilder {
    config: StackConfig,
}

impl StackConfigBuilder {
    /// Sets the minimum capacity.
    pub fn min_capacity(mut self, min_capacity: usize) -> Self {
        self.config.min_capacity = min_capacity;
        self
    }

    /// Sets the growth factor.
    pub fn growth_factor(mut self, growth_factor: f64) -> Self {
        self.config.growth_factor = growth_factor;
        self
    }

    /// Replaces the enabled protections.
    pub fn protections(mut self, protections: Protections) -> Self {
        self.config.protections = protections;
        self
    }

    /// Validates and returns the configuration.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::ZeroMinCapacity`] if the minimum capacity is zero.
    /// - [`ConfigError::InvalidGrowthFactor`] if the growth factor is not
    ///   finite or not greater than one.
    pub fn build(self) -> Result<StackConfig, ConfigError> {
        if self.config.min_capacity == 0 {
            return Err(ConfigError::ZeroMinCapacity);
        }

        let factor = self.config.growth_factor;
        if !factor.is_finite() || factor <= 1.0 {
            return Err(ConfigError::InvalidGrowthFactor(factor));
        }

        Ok(self.config)
    }
}
