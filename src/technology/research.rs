//! Research projects - funding and scholar allocation for one technology

use serde::{Deserialize, Serialize};

/// Base research output in progress points per day
const BASE_PROGRESS_RATE: f32 = 1.0;
/// Extra points per day contributed by each assigned scholar
const SCHOLAR_PROGRESS_RATE: f32 = 0.5;
/// Points per day bought by each unit of funding
const FUNDING_PROGRESS_RATE: f32 = 0.01;

/// An active research effort, bound to its technology by name
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchProject {
    pub technology: String,
    pub funding: f32,
    pub scholars: Vec<String>,
    pub progress_rate: f32,
}

impl ResearchProject {
    pub fn new(technology: impl Into<String>) -> Self {
        Self {
            technology: technology.into(),
            funding: 0.0,
            scholars: Vec::new(),
            progress_rate: BASE_PROGRESS_RATE,
        }
    }

    pub fn assign_scholar(&mut self, name: impl Into<String>) {
        self.scholars.push(name.into());
        self.recompute_rate();
    }

    pub fn add_funding(&mut self, amount: f32) {
        self.funding += amount;
        self.recompute_rate();
    }

    fn recompute_rate(&mut self) {
        self.progress_rate = BASE_PROGRESS_RATE
            + self.scholars.len() as f32 * SCHOLAR_PROGRESS_RATE
            + self.funding * FUNDING_PROGRESS_RATE;
    }
}
