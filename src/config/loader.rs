//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading rate policy
//! from a YAML pricing directory.

use std::fs;
use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::warn;

use crate::error::{EngineError, EngineResult};
use crate::models::{CompletionSlab, NewRateCard, RateCardRow, Tier};

use super::types::{DynamicPricingConfig, PincodeTierMap, SlabTable};

/// The complete rate policy loaded from a pricing directory.
#[derive(Debug, Clone)]
pub struct PricingConfig {
    /// The pincode tier map.
    pub tier_map: PincodeTierMap,
    /// The completion-slab pricing table.
    pub slab_table: SlabTable,
    /// The dynamic pricing configuration.
    pub dynamic: DynamicPricingConfig,
    /// Seed rate card rows.
    pub rate_cards: Vec<RateCardRow>,
}

/// One seed row in a rate card file.
///
/// Seeds omit identity and audit fields; the loader stamps them.
#[derive(Debug, Clone, Deserialize)]
struct RateCardSeed {
    tier: Tier,
    slab: CompletionSlab,
    #[serde(default)]
    client_id: Option<String>,
    base_rate: Decimal,
    #[serde(default)]
    travel_allowance: Decimal,
    #[serde(default)]
    bonus: Decimal,
}

/// Rate card file structure.
#[derive(Debug, Clone, Deserialize)]
struct RateCardFile {
    rate_cards: Vec<RateCardSeed>,
}

/// The actor recorded on rows seeded from configuration files.
const SEED_ACTOR: &str = "bootstrap";

/// Loads and provides access to rate policy configuration.
///
/// The `ConfigLoader` reads YAML files from a pricing directory and
/// assembles the engine's initial policy state.
///
/// # Directory Structure
///
/// ```text
/// config/pricing/
/// ├── tiers.yaml            # Pincode tier map and tier multipliers
/// ├── slabs.yaml            # Completion slab multipliers and bonuses
/// ├── dynamic_pricing.yaml  # Dynamic adjustment weights (optional)
/// └── rate_cards/
///     └── default.yaml      # Seed rate card rows
/// ```
///
/// A missing `dynamic_pricing.yaml` is not an error: the loader falls back
/// to the documented default configuration so pricing remains available.
///
/// # Example
///
/// ```no_run
/// use rate_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/pricing").unwrap();
/// println!("Loaded {} rate cards", loader.rate_cards().len());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: PricingConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified pricing directory.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `tiers.yaml`, `slabs.yaml`, or the `rate_cards` directory is missing
    /// - Any present file contains invalid YAML
    /// - Any seed rate card fails validation
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let tier_map = Self::load_yaml::<PincodeTierMap>(&path.join("tiers.yaml"))?;
        let slab_table = Self::load_yaml::<SlabTable>(&path.join("slabs.yaml"))?;

        // A missing dynamic pricing file falls back to the documented
        // defaults; an unparsable one fails the load.
        let dynamic_path = path.join("dynamic_pricing.yaml");
        let dynamic = if dynamic_path.exists() {
            Self::load_yaml::<DynamicPricingConfig>(&dynamic_path)?
        } else {
            warn!(
                path = %dynamic_path.display(),
                "dynamic pricing config not found, using default configuration"
            );
            DynamicPricingConfig::default()
        };

        let rate_cards = Self::load_rate_cards(&path.join("rate_cards"))?;

        Ok(Self {
            config: PricingConfig {
                tier_map,
                slab_table,
                dynamic,
                rate_cards,
            },
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads all seed rows from the rate cards directory.
    fn load_rate_cards(cards_dir: &Path) -> EngineResult<Vec<RateCardRow>> {
        let cards_dir_str = cards_dir.display().to_string();

        if !cards_dir.exists() {
            return Err(EngineError::ConfigNotFound {
                path: cards_dir_str,
            });
        }

        let entries = fs::read_dir(cards_dir).map_err(|_| EngineError::ConfigNotFound {
            path: cards_dir_str.clone(),
        })?;

        let mut rows = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: cards_dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                let file = Self::load_yaml::<RateCardFile>(&path)?;
                for seed in file.rate_cards {
                    let new_card = NewRateCard {
                        tier: seed.tier,
                        slab: seed.slab,
                        client_id: seed.client_id,
                        base_rate: seed.base_rate,
                        travel_allowance: seed.travel_allowance,
                        bonus: seed.bonus,
                        created_by: SEED_ACTOR.to_string(),
                    };
                    new_card.validate()?;
                    rows.push(new_card.into_row());
                }
            }
        }

        if rows.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no rate card files found)", cards_dir_str),
            });
        }

        Ok(rows)
    }

    /// Returns the pincode tier map.
    pub fn tier_map(&self) -> &PincodeTierMap {
        &self.config.tier_map
    }

    /// Returns the completion-slab pricing table.
    pub fn slab_table(&self) -> &SlabTable {
        &self.config.slab_table
    }

    /// Returns the dynamic pricing configuration.
    pub fn dynamic_config(&self) -> &DynamicPricingConfig {
        &self.config.dynamic
    }

    /// Returns the seed rate card rows.
    pub fn rate_cards(&self) -> &[RateCardRow] {
        &self.config.rate_cards
    }

    /// Consumes the loader and returns the loaded policy.
    pub fn into_config(self) -> PricingConfig {
        self.config
    }
}
