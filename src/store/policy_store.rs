//! The rate policy store.
//!
//! Holds the mutable policy state behind atomic-snapshot reads: rate card
//! rows, the pincode tier map, the slab table, and the cached dynamic
//! pricing configuration. Writers replace whole `Arc` values under a lock,
//! so a reader never observes a configuration that mixes old and new
//! weights mid-calculation.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::{ConfigLoader, DynamicPricingConfig, PincodeTierMap, SlabTable};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    CompletionSlab, NewRateCard, RateCardRow, RateCardUpdate, Tier, validate_amounts,
};

/// Durable storage seam for the dynamic pricing configuration.
///
/// The store reads through this on a cache miss and writes through it on
/// upsert. Load failures are recovered by the store with the documented
/// default configuration; save failures are surfaced to the caller.
pub trait ConfigSource: Send + Sync {
    /// Fetches the dynamic pricing configuration from durable storage.
    fn load(&self) -> EngineResult<DynamicPricingConfig>;

    /// Persists the dynamic pricing configuration to durable storage.
    fn save(&self, config: &DynamicPricingConfig) -> EngineResult<()>;
}

/// A [`ConfigSource`] backed by a YAML file.
#[derive(Debug, Clone)]
pub struct YamlConfigSource {
    path: PathBuf,
}

impl YamlConfigSource {
    /// Creates a source reading and writing the given YAML file.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }
}

impl ConfigSource for YamlConfigSource {
    fn load(&self) -> EngineResult<DynamicPricingConfig> {
        let content =
            fs::read_to_string(&self.path).map_err(|e| EngineError::ConfigStoreError {
                message: format!("failed to read {}: {}", self.path.display(), e),
            })?;
        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigStoreError {
            message: format!("failed to parse {}: {}", self.path.display(), e),
        })
    }

    fn save(&self, config: &DynamicPricingConfig) -> EngineResult<()> {
        let content = serde_yaml::to_string(config).map_err(|e| EngineError::ConfigStoreError {
            message: format!("failed to serialize config: {}", e),
        })?;
        fs::write(&self.path, content).map_err(|e| EngineError::ConfigStoreError {
            message: format!("failed to write {}: {}", self.path.display(), e),
        })
    }
}

/// A consistent point-in-time view of the policy state.
///
/// Calculations run against a snapshot, never against the live store, so a
/// single calculation is idempotent and unaffected by concurrent admin
/// writes.
#[derive(Debug, Clone)]
pub struct PricingSnapshot {
    /// The pincode tier map.
    pub tier_map: Arc<PincodeTierMap>,
    /// The completion-slab pricing table.
    pub slab_table: Arc<SlabTable>,
    /// All rate card rows, active and inactive.
    pub rows: Arc<Vec<RateCardRow>>,
    /// The dynamic pricing configuration.
    pub dynamic: Arc<DynamicPricingConfig>,
}

/// Finds the active row for a (tier, slab, client) lookup.
///
/// A client-specific row wins over the global row when both exist; lookups
/// without a client only ever see global rows.
fn lookup_active_row<'a>(
    rows: &'a [RateCardRow],
    tier: Tier,
    slab: CompletionSlab,
    client: Option<&str>,
) -> EngineResult<&'a RateCardRow> {
    let candidates = rows
        .iter()
        .filter(|r| r.is_active && r.tier == tier && r.slab == slab);

    let mut global = None;
    for row in candidates {
        match (&row.client_id, client) {
            (Some(own), Some(requested)) if own == requested => return Ok(row),
            (None, _) => global = Some(row),
            _ => {}
        }
    }

    global.ok_or_else(|| EngineError::PolicyNotFound {
        tier,
        slab,
        client: client.map(str::to_string),
    })
}

impl PricingSnapshot {
    /// Finds the active rate card row for a (tier, slab, client) lookup.
    ///
    /// # Errors
    ///
    /// Returns `PolicyNotFound` when no matching active row exists. This is
    /// a hard failure; the calculator never defaults a missing policy row.
    pub fn find_active_row(
        &self,
        tier: Tier,
        slab: CompletionSlab,
        client: Option<&str>,
    ) -> EngineResult<&RateCardRow> {
        lookup_active_row(&self.rows, tier, slab, client)
    }
}

/// The rate policy store.
///
/// # Example
///
/// ```no_run
/// use rate_engine::store::RatePolicyStore;
///
/// let store = RatePolicyStore::from_config_dir("./config/pricing").unwrap();
/// let snapshot = store.snapshot();
/// println!("{} active rows", store.rows().len());
/// # drop(snapshot);
/// ```
pub struct RatePolicyStore {
    tier_map: RwLock<Arc<PincodeTierMap>>,
    slab_table: RwLock<Arc<SlabTable>>,
    rows: RwLock<Arc<Vec<RateCardRow>>>,
    dynamic: RwLock<Option<Arc<DynamicPricingConfig>>>,
    source: Box<dyn ConfigSource>,
}

impl RatePolicyStore {
    /// Creates a store from loaded policy state and a config source.
    ///
    /// The dynamic pricing cache starts empty and is filled lazily from the
    /// source on first use.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateActiveRow` when the seed rows violate the
    /// at-most-one-active-row-per-key invariant.
    pub fn new(
        tier_map: PincodeTierMap,
        slab_table: SlabTable,
        rows: Vec<RateCardRow>,
        source: Box<dyn ConfigSource>,
    ) -> EngineResult<Self> {
        for (i, row) in rows.iter().enumerate() {
            if !row.is_active {
                continue;
            }
            let conflict = rows[..i].iter().any(|other| {
                other.is_active
                    && other.tier == row.tier
                    && other.slab == row.slab
                    && other.client_id == row.client_id
            });
            if conflict {
                return Err(EngineError::DuplicateActiveRow {
                    tier: row.tier,
                    slab: row.slab,
                    client: row.client_id.clone(),
                });
            }
        }

        Ok(Self {
            tier_map: RwLock::new(Arc::new(tier_map)),
            slab_table: RwLock::new(Arc::new(slab_table)),
            rows: RwLock::new(Arc::new(rows)),
            dynamic: RwLock::new(None),
            source,
        })
    }

    /// Loads a store from a pricing directory.
    ///
    /// The directory is validated by [`ConfigLoader`]; the dynamic pricing
    /// file doubles as the store's durable config source.
    pub fn from_config_dir<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let config = ConfigLoader::load(path)?.into_config();
        let source = YamlConfigSource::new(path.join("dynamic_pricing.yaml"));
        Self::new(
            config.tier_map,
            config.slab_table,
            config.rate_cards,
            Box::new(source),
        )
    }

    /// Takes a consistent snapshot of the policy state for a calculation.
    pub fn snapshot(&self) -> PricingSnapshot {
        PricingSnapshot {
            tier_map: Arc::clone(&self.tier_map.read().expect("tier map lock poisoned")),
            slab_table: Arc::clone(&self.slab_table.read().expect("slab table lock poisoned")),
            rows: Arc::clone(&self.rows.read().expect("rows lock poisoned")),
            dynamic: self.dynamic_config(),
        }
    }

    /// Returns all active rows, ordered by (tier, slab, client).
    pub fn rows(&self) -> Vec<RateCardRow> {
        let mut active: Vec<RateCardRow> = self
            .rows
            .read()
            .expect("rows lock poisoned")
            .iter()
            .filter(|r| r.is_active)
            .cloned()
            .collect();
        active.sort_by(|a, b| {
            (a.tier, a.slab, &a.client_id).cmp(&(b.tier, b.slab, &b.client_id))
        });
        active
    }

    /// Returns every row including deactivated history, ordered by
    /// (tier, slab, client).
    pub fn all_rows(&self) -> Vec<RateCardRow> {
        let mut rows: Vec<RateCardRow> =
            self.rows.read().expect("rows lock poisoned").iter().cloned().collect();
        rows.sort_by(|a, b| {
            (a.tier, a.slab, &a.client_id).cmp(&(b.tier, b.slab, &b.client_id))
        });
        rows
    }

    /// Finds the active row for a (tier, slab, client) lookup.
    ///
    /// # Errors
    ///
    /// Returns `PolicyNotFound` when no matching active row exists.
    pub fn find_active_row(
        &self,
        tier: Tier,
        slab: CompletionSlab,
        client: Option<&str>,
    ) -> EngineResult<RateCardRow> {
        let rows = Arc::clone(&self.rows.read().expect("rows lock poisoned"));
        lookup_active_row(&rows, tier, slab, client).cloned()
    }

    /// Creates a new active rate card row.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRateRow` on validation failure or
    /// `DuplicateActiveRow` when an active row already covers the same
    /// (tier, slab, client) key.
    pub fn create_row(&self, new_card: NewRateCard) -> EngineResult<RateCardRow> {
        new_card.validate()?;

        let mut rows = self.rows.write().expect("rows lock poisoned");
        let duplicate = rows.iter().any(|r| {
            r.is_active
                && r.tier == new_card.tier
                && r.slab == new_card.slab
                && r.client_id == new_card.client_id
        });
        if duplicate {
            return Err(EngineError::DuplicateActiveRow {
                tier: new_card.tier,
                slab: new_card.slab,
                client: new_card.client_id.clone(),
            });
        }

        let row = new_card.into_row();
        let mut next: Vec<RateCardRow> = rows.iter().cloned().collect();
        next.push(row.clone());
        *rows = Arc::new(next);

        info!(row_id = %row.id, tier = %row.tier, slab = %row.slab, "rate card created");
        Ok(row)
    }

    /// Applies a partial update to an active rate card row.
    ///
    /// # Errors
    ///
    /// Returns `RowNotFound` when no row has the given ID,
    /// `InvalidRateRow` when the row is deactivated or an updated amount
    /// fails validation.
    pub fn update_row(&self, id: Uuid, update: RateCardUpdate) -> EngineResult<RateCardRow> {
        let mut rows = self.rows.write().expect("rows lock poisoned");

        let mut next: Vec<RateCardRow> = rows.iter().cloned().collect();
        let row = next
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(EngineError::RowNotFound { id })?;

        if !row.is_active {
            return Err(EngineError::InvalidRateRow {
                field: "is_active".to_string(),
                message: "cannot update a deactivated rate card".to_string(),
            });
        }

        let base_rate = update.base_rate.unwrap_or(row.base_rate);
        let travel_allowance = update.travel_allowance.unwrap_or(row.travel_allowance);
        let bonus = update.bonus.unwrap_or(row.bonus);
        validate_amounts(base_rate, travel_allowance, bonus)?;

        row.base_rate = base_rate;
        row.travel_allowance = travel_allowance;
        row.bonus = bonus;
        row.updated_by = update.updated_by;
        row.updated_at = Utc::now();

        let updated = row.clone();
        *rows = Arc::new(next);

        info!(row_id = %updated.id, "rate card updated");
        Ok(updated)
    }

    /// Deactivates a rate card row.
    ///
    /// The row stays in the store as history so already-computed payouts
    /// keep an auditable policy trail. Deactivating an already-inactive
    /// row succeeds and restamps the actor.
    ///
    /// # Errors
    ///
    /// Returns `RowNotFound` when no row has the given ID.
    pub fn deactivate_row(&self, id: Uuid, actor: &str) -> EngineResult<RateCardRow> {
        let mut rows = self.rows.write().expect("rows lock poisoned");

        let mut next: Vec<RateCardRow> = rows.iter().cloned().collect();
        let row = next
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(EngineError::RowNotFound { id })?;

        row.is_active = false;
        row.updated_by = actor.to_string();
        row.updated_at = Utc::now();

        let deactivated = row.clone();
        *rows = Arc::new(next);

        info!(row_id = %deactivated.id, actor, "rate card deactivated");
        Ok(deactivated)
    }

    /// Returns the dynamic pricing configuration.
    ///
    /// The first call loads from the durable source; later calls return the
    /// cached value. A failing source is recovered with the documented
    /// default configuration so pricing never fails on unreachable config
    /// storage.
    pub fn dynamic_config(&self) -> Arc<DynamicPricingConfig> {
        {
            let cache = self.dynamic.read().expect("dynamic config lock poisoned");
            if let Some(config) = cache.as_ref() {
                return Arc::clone(config);
            }
        }

        let loaded = match self.source.load() {
            Ok(config) => config,
            Err(err) => {
                warn!(
                    error = %err,
                    "failed to load dynamic pricing config, falling back to default"
                );
                DynamicPricingConfig::default()
            }
        };

        let mut cache = self.dynamic.write().expect("dynamic config lock poisoned");
        if let Some(config) = cache.as_ref() {
            // Another thread filled the cache while we were loading.
            return Arc::clone(config);
        }
        let config = Arc::new(loaded);
        *cache = Some(Arc::clone(&config));
        config
    }

    /// Replaces the dynamic pricing configuration.
    ///
    /// Persists through the durable source first, then swaps the cache in
    /// one step. The replacement is whole-value; fields are never merged.
    ///
    /// # Errors
    ///
    /// Returns `ConfigStoreError` when persistence fails; the cache is left
    /// unchanged in that case.
    pub fn upsert_dynamic_config(&self, config: DynamicPricingConfig) -> EngineResult<()> {
        self.source.save(&config)?;

        let mut cache = self.dynamic.write().expect("dynamic config lock poisoned");
        *cache = Some(Arc::new(config));
        info!("dynamic pricing config replaced");
        Ok(())
    }

    /// Replaces the pincode tier map. Administrative reload operation.
    pub fn replace_tier_map(&self, map: PincodeTierMap) {
        let mut tier_map = self.tier_map.write().expect("tier map lock poisoned");
        *tier_map = Arc::new(map);
        info!("pincode tier map replaced");
    }

    /// Replaces the slab pricing table. Administrative reload operation.
    pub fn replace_slab_table(&self, table: SlabTable) {
        let mut slab_table = self.slab_table.write().expect("slab table lock poisoned");
        *slab_table = Arc::new(table);
        info!("slab table replaced");
    }
}
