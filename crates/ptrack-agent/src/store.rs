//! `AgentRngs` — per-agent RNG state, kept apart from the agents themselves.
//!
//! # Why a separate struct?
//!
//! The control phase needs `&mut Robot` / `&mut Target` for the agent being
//! updated and `&mut AgentRng` for its random draws at the same time.  Keeping
//! the RNGs in their own `Vec` indexed by [`AgentId`] gives the simulation loop
//! two disjoint borrows without any interior mutability.

use ptrack_core::{AgentId, AgentRng};

/// Per-agent deterministic RNG state.
pub struct AgentRngs {
    inner: Vec<AgentRng>,
}

impl AgentRngs {
    /// Allocate and seed `count` per-agent RNGs from `global_seed`.
    pub fn new(count: usize, global_seed: u64) -> Self {
        let inner = (0..count as u32)
            .map(|i| AgentRng::new(global_seed, AgentId(i)))
            .collect();
        Self { inner }
    }

    /// Mutable reference to one agent's RNG.
    #[inline]
    pub fn get_mut(&mut self, agent: AgentId) -> &mut AgentRng {
        &mut self.inner[agent.index()]
    }
}
