//! Scene: the three pools, their instance batches and the frame clock

use log::{info, warn};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use crate::animation::{advance, retarget};
use crate::config::SceneConfig;
use crate::error::Result;
use crate::formation::Mode;
use crate::pool::{EntityPool, PoolKind};
use crate::render::batch::{InstanceBatch, InstanceSink};

pub struct Scene {
    pools: Vec<EntityPool>,
    batches: Vec<InstanceBatch>,
    mode: Mode,
    elapsed: f32,
    indicator_visible: bool,
    rng: SmallRng,
}

impl Scene {
    pub fn new(config: &SceneConfig) -> Result<Self> {
        Self::with_rng(config, SmallRng::from_entropy())
    }

    /// Build every pool from `config`, drawing all randomness from `rng`.
    /// Any invalid pool fails the whole scene.
    pub fn with_rng(config: &SceneConfig, mut rng: SmallRng) -> Result<Self> {
        let pools = PoolKind::ALL
            .iter()
            .map(|kind| EntityPool::new(*kind, config.pool(*kind), config.initial_mode, &mut rng))
            .collect::<Result<Vec<_>>>()?;

        // Fill batches up front so the first frame has something to draw
        let batches = pools
            .iter()
            .map(|pool| {
                let mut batch = InstanceBatch::for_pool(pool);
                batch.flush(pool);
                batch
            })
            .collect();

        info!(
            "scene ready: {} entities, mode {}",
            config.total_entities(),
            config.initial_mode
        );

        Ok(Self {
            pools,
            batches,
            mode: config.initial_mode,
            elapsed: 0.0,
            indicator_visible: true,
            rng,
        })
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Retarget every pool toward `mode`. Re-selecting the current mode
    /// re-arms the transitions.
    pub fn set_mode(&mut self, mode: Mode) {
        for pool in &mut self.pools {
            retarget(pool, mode, &mut self.rng);
        }
        info!("mode {} -> {}", self.mode, mode);
        self.mode = mode;
    }

    /// [`Scene::set_mode`] by name; an unknown name changes nothing
    pub fn set_mode_named(&mut self, name: &str) -> Result<Mode> {
        let mode: Mode = name.parse().map_err(|e| {
            warn!("rejected mode change: {}", e);
            e
        })?;
        self.set_mode(mode);
        Ok(mode)
    }

    pub fn toggle_mode(&mut self) -> Mode {
        let next = self.mode.toggled();
        self.set_mode(next);
        next
    }

    /// Advance the clock by `dt` and refresh every batch.
    ///
    /// Degenerate `dt` leaves time, pools and batches as they were and
    /// returns false.
    pub fn tick(&mut self, dt: f32) -> bool {
        if !dt.is_finite() || dt <= 0.0 {
            return false;
        }

        self.elapsed += dt;
        for (pool, batch) in self.pools.iter_mut().zip(self.batches.iter_mut()) {
            advance(pool, dt, self.elapsed);
            batch.flush(pool);
        }
        true
    }

    /// Hand every dirty batch to `sink`. A failed upload stays dirty and is
    /// retried next frame; the first error is returned after all slots are
    /// attempted.
    pub fn submit_to(&mut self, sink: &mut dyn InstanceSink) -> Result<()> {
        let mut first_err = None;
        for (slot, batch) in self.batches.iter_mut().enumerate() {
            if !batch.is_dirty() {
                continue;
            }
            match sink.submit(slot, batch) {
                Ok(()) => batch.mark_clean(),
                Err(e) => {
                    first_err.get_or_insert(e);
                }
            }
        }
        first_err.map_or(Ok(()), Err)
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn pools(&self) -> &[EntityPool] {
        &self.pools
    }

    pub fn pool(&self, kind: PoolKind) -> Option<&EntityPool> {
        self.pools.iter().find(|p| p.kind() == kind)
    }

    pub fn batches(&self) -> &[InstanceBatch] {
        &self.batches
    }

    pub fn entity_count(&self) -> usize {
        self.pools.iter().map(EntityPool::len).sum()
    }

    pub fn is_settled(&self) -> bool {
        self.pools.iter().all(EntityPool::is_settled)
    }

    pub fn set_indicator_visible(&mut self, visible: bool) {
        self.indicator_visible = visible;
    }

    pub fn is_indicator_visible(&self) -> bool {
        self.indicator_visible
    }
}
