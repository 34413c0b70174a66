//! Metropolis-Hastings acceptance criterion for MCMC
//!
//! Implements the acceptance decision for stochastic search.
//! A proposal is accepted if:
//!   proposal_cost < current_cost - ln(random) / beta
//!
//! Where beta is the inverse temperature parameter.
//! Higher beta = more greedy (less likely to accept worse solutions)
//! Lower beta = more exploration (more likely to accept worse solutions)

#![allow(dead_code)]

use rand::Rng;

/// Acceptance criterion for Metropolis-Hastings MCMC
pub struct AcceptanceCriterion {
    /// Inverse temperature (higher = more greedy)
    beta: f64,
}

impl AcceptanceCriterion {
    /// Create a new acceptance criterion with the given beta parameter
    pub fn new(beta: f64) -> Self {
        assert!(beta > 0.0, "beta must be positive");
        Self { beta }
    }

    /// Get the beta parameter
    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// Compute the acceptance threshold for the current cost
    ///
    /// Returns the maximum cost that would be accepted.
    /// threshold = current_cost - ln(random) / beta
    pub fn compute_threshold<R: Rng>(&self, rng: &mut R, current_cost: u64) -> f64 {
        let u: f64 = rng.random();
        // Avoid log(0) which is -infinity
        let u = u.max(1e-300);
        current_cost as f64 - u.ln() / self.beta
    }

    /// Decide whether to accept a proposal
    ///
    /// # Arguments
    /// * `rng` - Random number generator
    /// * `current_cost` - Cost of current solution
    /// * `proposal_cost` - Cost of proposed solution
    ///
    /// # Returns
    /// true if the proposal should be accepted
    pub fn accept<R: Rng>(&self, rng: &mut R, current_cost: u64, proposal_cost: u64) -> bool {
        // Always accept if proposal is better
        if proposal_cost < current_cost {
            return true;
        }

        // For equal or worse proposals, use Metropolis criterion
        let threshold = self.compute_threshold(rng, current_cost);
        (proposal_cost as f64) < threshold
    }

    /// Decide whether to accept based on a cost difference
    ///
    /// # Arguments
    /// * `rng` - Random number generator
    /// * `cost_delta` - proposal_cost - current_cost (positive = worse)
    ///
    /// # Returns
    /// true if the proposal should be accepted
    pub fn accept_delta<R: Rng>(&self, rng: &mut R, cost_delta: i64) -> bool {
        // Always accept improvements
        if cost_delta < 0 {
            return true;
        }

        // For equal or worse, use Boltzmann distribution
        let u: f64 = rng.random();
        let u = u.max(1e-300);

        // Accept if random threshold exceeds cost delta
        // threshold = -ln(u) / beta
        // Accept if cost_delta < threshold
        // Equivalent to: u < exp(-beta * cost_delta)
        let threshold = -u.ln() / self.beta;
        (cost_delta as f64) < threshold
    }

    /// Calculate acceptance probability for a cost difference
    ///
    /// P(accept) = min(1, exp(-beta * delta)) for delta >= 0
    pub fn acceptance_probability(&self, cost_delta: i64) -> f64 {
        if cost_delta < 0 {
            1.0
        } else {
            (-self.beta * cost_delta as f64).exp().min(1.0)
        }
    }
}

impl Default for AcceptanceCriterion {
    fn default() -> Self {
        Self::new(1.0)
    }
}
