//! Ordering puzzle
//!
//! A standalone two-list state machine: the player moves items from an
//! `unplaced` pool into a `placed` sequence (by click or drag), reorders them
//! freely, and submits the result to be checked against the canonical
//! smallest-to-largest catalog order. The shuffle is a seeded Fisher-Yates,
//! so a given seed always deals the same puzzle.
//!
//! Every operation is a synchronous no-op when it doesn't apply (unknown
//! item, wrong phase): no panics, no partial mutation.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::catalog::StageCatalog;
use crate::consts::TOTAL_GAME_ITEMS;

/// One sortable tile
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PuzzleItem {
    pub id: &'static str,
    pub label: &'static str,
    pub magnitude: f64,
}

/// Current phase of the puzzle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PuzzlePhase {
    /// Accepting moves
    Playing,
    /// Validated correct; terminal, signals completion outward
    Success,
    /// Validated wrong; recoverable via `reset`
    Fail,
}

/// Which of the two lists an item reference points into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ListSide {
    Unplaced,
    Placed,
}

/// The puzzle state machine
#[derive(Debug, Clone)]
pub struct OrderingPuzzle {
    /// Canonical ascending-magnitude order, the answer key
    canonical: Vec<PuzzleItem>,
    unplaced: Vec<PuzzleItem>,
    placed: Vec<PuzzleItem>,
    phase: PuzzlePhase,
    seed: u64,
    rng: Pcg32,
}

impl OrderingPuzzle {
    /// Deal a new puzzle from the first [`TOTAL_GAME_ITEMS`] numeric catalog
    /// stages (the terminal reference stage never appears in the puzzle)
    pub fn new(catalog: &StageCatalog, seed: u64) -> Self {
        let canonical: Vec<PuzzleItem> = catalog
            .iter()
            .filter(|s| !s.is_reference())
            .take(TOTAL_GAME_ITEMS)
            .map(|s| PuzzleItem {
                id: s.id,
                label: s.label,
                magnitude: s.magnitude,
            })
            .collect();

        let mut puzzle = Self {
            canonical,
            unplaced: Vec::new(),
            placed: Vec::new(),
            phase: PuzzlePhase::Playing,
            seed,
            rng: Pcg32::seed_from_u64(seed),
        };
        puzzle.deal();
        puzzle
    }

    /// Reshuffle the canonical items into `unplaced`
    fn deal(&mut self) {
        self.unplaced = self.canonical.clone();
        // Fisher-Yates
        for i in (1..self.unplaced.len()).rev() {
            let j = self.rng.random_range(0..=i);
            self.unplaced.swap(i, j);
        }
    }

    pub fn phase(&self) -> PuzzlePhase {
        self.phase
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn unplaced(&self) -> &[PuzzleItem] {
        &self.unplaced
    }

    pub fn placed(&self) -> &[PuzzleItem] {
        &self.placed
    }

    /// Move an item from `unplaced` to the end of `placed` (click semantics).
    /// Returns whether the move applied.
    pub fn select(&mut self, id: &str) -> bool {
        if self.phase != PuzzlePhase::Playing {
            return false;
        }
        let Some(pos) = self.unplaced.iter().position(|i| i.id == id) else {
            return false;
        };
        let item = self.unplaced.remove(pos);
        self.placed.push(item);
        true
    }

    /// Move an item from `placed` back to the end of `unplaced`
    pub fn deselect(&mut self, id: &str) -> bool {
        if self.phase != PuzzlePhase::Playing {
            return false;
        }
        let Some(pos) = self.placed.iter().position(|i| i.id == id) else {
            return false;
        };
        let item = self.placed.remove(pos);
        self.unplaced.push(item);
        true
    }

    /// Reorder within `placed`: remove the item from its current position
    /// and reinsert at `target_index` (clamped to the list end).
    ///
    /// `target_index` is intended as a pre-removal index, so when the item
    /// currently sits before the target, removing it shifts the target left
    /// by one. This is the standard list-reorder-by-drag contract.
    pub fn move_within_placed(&mut self, id: &str, target_index: usize) -> bool {
        if self.phase != PuzzlePhase::Playing {
            return false;
        }
        let Some(pos) = self.placed.iter().position(|i| i.id == id) else {
            return false;
        };

        let mut insert_at = target_index.min(self.placed.len());
        if pos < insert_at {
            insert_at -= 1;
        }
        let item = self.placed.remove(pos);
        self.placed.insert(insert_at, item);
        true
    }

    /// Move an item between the two lists, inserting at `target_index` in
    /// the destination (end of list when unspecified). A move whose source
    /// and destination are the same list is delegated to
    /// [`move_within_placed`] (reordering `unplaced` is not meaningful).
    pub fn move_across(
        &mut self,
        id: &str,
        from: ListSide,
        to: ListSide,
        target_index: Option<usize>,
    ) -> bool {
        if self.phase != PuzzlePhase::Playing {
            return false;
        }
        if from == to {
            return match to {
                ListSide::Placed => {
                    let index = target_index.unwrap_or(self.placed.len());
                    self.move_within_placed(id, index)
                }
                ListSide::Unplaced => false,
            };
        }

        let (source, dest) = match from {
            ListSide::Unplaced => (&mut self.unplaced, &mut self.placed),
            ListSide::Placed => (&mut self.placed, &mut self.unplaced),
        };
        let Some(pos) = source.iter().position(|i| i.id == id) else {
            return false;
        };
        let item = source.remove(pos);
        let insert_at = target_index.unwrap_or(dest.len()).min(dest.len());
        dest.insert(insert_at, item);
        true
    }

    /// All items placed, ready for [`validate`](Self::validate)
    pub fn ready(&self) -> bool {
        self.unplaced.is_empty() && self.phase == PuzzlePhase::Playing
    }

    /// Check the placed sequence against the canonical order. Only invocable
    /// once every item is placed; transitions to `Success` on exact sequence
    /// equality, `Fail` otherwise. Returns the resulting phase.
    pub fn validate(&mut self) -> PuzzlePhase {
        if !self.ready() {
            return self.phase;
        }
        let correct = self
            .placed
            .iter()
            .zip(&self.canonical)
            .all(|(got, want)| got.id == want.id);
        self.phase = if correct {
            PuzzlePhase::Success
        } else {
            PuzzlePhase::Fail
        };
        log::info!("puzzle validated: {:?} (seed {})", self.phase, self.seed);
        self.phase
    }

    /// Re-enter `Playing` from `Fail` with a fresh shuffle. Success is
    /// terminal; resetting a solved puzzle is a no-op.
    pub fn reset(&mut self) {
        if self.phase == PuzzlePhase::Success {
            return;
        }
        self.phase = PuzzlePhase::Playing;
        self.placed.clear();
        self.deal();
    }
}
