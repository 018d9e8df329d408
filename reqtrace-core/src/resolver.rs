//! Decision points reached while finalizing the registry
//!
//! Finalization needs an operator for two things: to be told which
//! requirements trace to more than one parent, and to pick one description
//! when a requirement collected several. The CLI binds this to console
//! prompts; tests and batch runs use the implementations below.

use std::collections::VecDeque;

/// Error returned by a resolver, e.g. a closed console
pub type ResolverError = Box<dyn std::error::Error + Send + Sync>;

pub trait Resolver {
    /// Informational listing of requirements with more than one parent
    fn notify_multiple_parents(&mut self, _ids: &[&str]) {}

    /// Picks one of `candidates` for requirement `id`.
    ///
    /// Returns a 1-based choice. Out-of-range answers are asked again.
    fn select_text(&mut self, id: &str, candidates: &[String]) -> Result<usize, ResolverError>;
}

/// Always picks the first candidate
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstTextResolver;

impl Resolver for FirstTextResolver {
    fn select_text(&mut self, _id: &str, _candidates: &[String]) -> Result<usize, ResolverError> {
        Ok(1)
    }
}

/// Replays a fixed sequence of choices and records what it was asked
#[derive(Debug, Default, Clone)]
pub struct ScriptedResolver {
    choices: VecDeque<usize>,
    /// Every `(id, candidates)` pair presented, in order
    pub asked: Vec<(String, Vec<String>)>,
    /// The last multiple-parent listing received
    pub multiple_parents: Vec<String>,
}

impl ScriptedResolver {
    pub fn new<I: IntoIterator<Item = usize>>(choices: I) -> Self {
        Self {
            choices: choices.into_iter().collect(),
            ..Default::default()
        }
    }
}

impl Resolver for ScriptedResolver {
    fn notify_multiple_parents(&mut self, ids: &[&str]) {
        self.multiple_parents = ids.iter().map(|id| id.to_string()).collect();
    }

    fn select_text(&mut self, id: &str, candidates: &[String]) -> Result<usize, ResolverError> {
        self.asked.push((id.to_string(), candidates.to_vec()));
        self.choices
            .pop_front()
            .ok_or_else(|| format!("no scripted choice left for {}", id).into())
    }
}
