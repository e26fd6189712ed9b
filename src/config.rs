// Copyright 2025 Cowboy AI, LLC.

//! Domain configuration
//!
//! Loaded once by the embedding service and handed to the domain services.
//! Every field has a default, so an empty JSON object is a valid config.

use serde::{Deserialize, Serialize};

use crate::errors::{DomainError, DomainResult};

/// Accepted range for evaluation scores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Lowest accepted score, inclusive
    pub min_score: i32,
    /// Highest accepted score, inclusive
    pub max_score: i32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            min_score: 0,
            max_score: 10,
        }
    }
}

impl ScoringConfig {
    /// Whether `score` lies within the accepted range
    pub fn accepts(&self, score: i32) -> bool {
        (self.min_score..=self.max_score).contains(&score)
    }
}

/// Authorization gate settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthorizationConfig {
    /// Admins may manage organizations other than their own
    pub admin_cross_organization: bool,
}

impl Default for AuthorizationConfig {
    fn default() -> Self {
        Self {
            admin_cross_organization: true,
        }
    }
}

/// Configuration for the review domain services
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DomainConfig {
    /// Score range
    pub scoring: ScoringConfig,
    /// Authorization settings
    pub authorization: AuthorizationConfig,
}

impl DomainConfig {
    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> DomainResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject inconsistent values
    pub fn validate(&self) -> DomainResult<()> {
        if self.scoring.min_score > self.scoring.max_score {
            return Err(DomainError::InvalidConfiguration(format!(
                "min_score {} is greater than max_score {}",
                self.scoring.min_score, self.scoring.max_score
            )));
        }
        Ok(())
    }
}
