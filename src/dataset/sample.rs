//! Row sampling
//!
//! A table with `size` rows or fewer is returned whole, in file order.
//! Otherwise `size` distinct rows are drawn; with a seed the draw is
//! reproducible.

use super::RecipeTable;
use crate::error::{ChefSortError, Result};
use chefsort_common::Recipe;
use rand::rngs::StdRng;
use rand::seq::index;
use rand::{Rng, SeedableRng};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sampler {
    size: usize,
    seed: Option<u64>,
}

impl Sampler {
    pub fn new(size: usize, seed: Option<u64>) -> Result<Self> {
        if size == 0 {
            return Err(ChefSortError::Config("Sample size must be at least 1".into()));
        }
        Ok(Self { size, seed })
    }

    pub fn sample(&self, table: &RecipeTable) -> RecipeTable {
        let recipes = if table.recipes.len() <= self.size {
            table.recipes.clone()
        } else {
            match self.seed {
                Some(seed) => self.draw(&mut StdRng::seed_from_u64(seed), table),
                None => self.draw(&mut rand::thread_rng(), table),
            }
        };

        RecipeTable {
            source: table.source.clone(),
            recipes,
            total_rows: table.total_rows,
            dropped_rows: table.dropped_rows,
        }
    }

    fn draw<R: Rng + ?Sized>(&self, rng: &mut R, table: &RecipeTable) -> Vec<Recipe> {
        index::sample(rng, table.recipes.len(), self.size)
            .into_iter()
            .map(|i| table.recipes[i].clone())
            .collect()
    }
}
