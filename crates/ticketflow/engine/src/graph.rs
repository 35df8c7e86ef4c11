//! Graph definition: named steps, static edges, one entry point
//!
//! Each source step has exactly one default successor, except branch-point
//! steps which may declare several possible destinations; a branch point must
//! always pick its successor at runtime via a redirect. Edges may target the
//! terminal marker directly.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use ticketflow_types::{
    NextStep, StepError, StepName, Transition, WorkflowError, WorkflowResult, WorkflowState,
};

use crate::context::StepContext;

/// A unit of workflow logic.
///
/// Steps read the shared state and return a [`Transition`]; they never
/// mutate state directly. Per-item failures (a single ticket's
/// classification or send going wrong) are caught inside the step; an error
/// escaping `run` is fatal to the whole run.
pub trait Step: Send + Sync {
    fn run(&self, state: &WorkflowState, ctx: &mut StepContext) -> Result<Transition, StepError>;
}

/// The static shape of a workflow: steps, edges, entry point
#[derive(Clone, Default)]
pub struct GraphDefinition {
    steps: HashMap<StepName, Arc<dyn Step>>,
    edges: HashMap<StepName, Vec<NextStep>>,
    entry: Option<StepName>,
}

impl GraphDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a named step
    pub fn add_step(&mut self, name: impl Into<StepName>, step: Arc<dyn Step>) -> WorkflowResult<()> {
        let name = name.into();
        if self.steps.contains_key(&name) {
            return Err(WorkflowError::DuplicateStep(name));
        }
        self.steps.insert(name, step);
        Ok(())
    }

    /// Declare a static edge between two registered steps
    pub fn add_edge(
        &mut self,
        from: impl Into<StepName>,
        to: impl Into<StepName>,
    ) -> WorkflowResult<()> {
        let from = from.into();
        let to = NextStep::Step(to.into());
        self.insert_edge(from, to)
    }

    /// Declare a static edge from a step to the terminal marker
    pub fn add_terminal_edge(&mut self, from: impl Into<StepName>) -> WorkflowResult<()> {
        self.insert_edge(from.into(), NextStep::End)
    }

    fn insert_edge(&mut self, from: StepName, to: NextStep) -> WorkflowResult<()> {
        if !self.steps.contains_key(&from) {
            let to_name = match &to {
                NextStep::Step(name) => name.clone(),
                NextStep::End => StepName::new("__end__"),
            };
            return Err(WorkflowError::UnknownEdgeTarget {
                from,
                to: to_name,
            });
        }
        if let NextStep::Step(target) = &to {
            if !self.steps.contains_key(target) {
                return Err(WorkflowError::UnknownEdgeTarget {
                    from,
                    to: target.clone(),
                });
            }
        }
        let successors = self.edges.entry(from.clone()).or_default();
        if successors.contains(&to) {
            let to_name = match to {
                NextStep::Step(name) => name,
                NextStep::End => StepName::new("__end__"),
            };
            return Err(WorkflowError::DuplicateEdge { from, to: to_name });
        }
        successors.push(to);
        Ok(())
    }

    /// Set the entry step
    pub fn set_entry(&mut self, name: impl Into<StepName>) -> WorkflowResult<()> {
        let name = name.into();
        if !self.steps.contains_key(&name) {
            return Err(WorkflowError::StepNotFound(name));
        }
        self.entry = Some(name);
        Ok(())
    }

    pub fn entry(&self) -> Option<&StepName> {
        self.entry.as_ref()
    }

    /// Look up a registered step
    pub fn step(&self, name: &StepName) -> WorkflowResult<&Arc<dyn Step>> {
        self.steps
            .get(name)
            .ok_or_else(|| WorkflowError::StepNotFound(name.clone()))
    }

    /// The statically declared successors of a step
    pub fn static_successors(&self, name: &StepName) -> &[NextStep] {
        self.edges.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Resolve the default successor of a step that returned no directive.
    ///
    /// Exactly one static edge must exist; a branch point (several edges)
    /// must always redirect explicitly.
    pub fn default_successor(&self, name: &StepName) -> WorkflowResult<NextStep> {
        match self.static_successors(name) {
            [] => Err(WorkflowError::MissingDefaultEdge(name.clone())),
            [single] => Ok(single.clone()),
            many => Err(WorkflowError::AmbiguousDefaultEdge {
                step: name.clone(),
                count: many.len(),
            }),
        }
    }

    /// Validate the graph for structural correctness
    pub fn validate(&self) -> WorkflowResult<()> {
        let entry = self.entry.as_ref().ok_or(WorkflowError::NoEntryStep)?;
        if !self.steps.contains_key(entry) {
            return Err(WorkflowError::StepNotFound(entry.clone()));
        }

        // Every step must be reachable from the entry
        let reachable = self.reachable_from(entry);
        for name in self.steps.keys() {
            if !reachable.contains(name) {
                return Err(WorkflowError::DisconnectedGraph);
            }
        }

        Ok(())
    }

    /// All steps reachable from a given step via static edges
    fn reachable_from(&self, start: &StepName) -> HashSet<StepName> {
        let mut visited = HashSet::new();
        let mut queue = vec![start.clone()];

        while let Some(current) = queue.pop() {
            if visited.insert(current.clone()) {
                for next in self.static_successors(&current) {
                    if let NextStep::Step(target) = next {
                        if !visited.contains(target) {
                            queue.push(target.clone());
                        }
                    }
                }
            }
        }

        visited
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.values().map(Vec::len).sum()
    }
}

impl std::fmt::Debug for GraphDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphDefinition")
            .field("steps", &self.steps.keys().collect::<Vec<_>>())
            .field("edges", &self.edges)
            .field("entry", &self.entry)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ticketflow_types::StatePatch;

    struct Noop;

    impl Step for Noop {
        fn run(
            &self,
            _state: &WorkflowState,
            _ctx: &mut StepContext,
        ) -> Result<Transition, StepError> {
            Ok(Transition::update(StatePatch::new()))
        }
    }

    fn linear_graph() -> GraphDefinition {
        let mut graph = GraphDefinition::new();
        graph.add_step("a", Arc::new(Noop)).unwrap();
        graph.add_step("b", Arc::new(Noop)).unwrap();
        graph.add_edge("a", "b").unwrap();
        graph.add_terminal_edge("b").unwrap();
        graph.set_entry("a").unwrap();
        graph
    }

    #[test]
    fn test_valid_linear_graph() {
        let graph = linear_graph();
        assert!(graph.validate().is_ok());
        assert_eq!(graph.step_count(), 2);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(
            graph.default_successor(&StepName::new("a")).unwrap(),
            NextStep::step("b")
        );
    }

    #[test]
    fn test_duplicate_step_rejected() {
        let mut graph = GraphDefinition::new();
        graph.add_step("a", Arc::new(Noop)).unwrap();
        let result = graph.add_step("a", Arc::new(Noop));
        assert!(matches!(result, Err(WorkflowError::DuplicateStep(_))));
    }

    #[test]
    fn test_edge_to_unknown_step_rejected() {
        let mut graph = GraphDefinition::new();
        graph.add_step("a", Arc::new(Noop)).unwrap();
        let result = graph.add_edge("a", "ghost");
        assert!(matches!(result, Err(WorkflowError::UnknownEdgeTarget { .. })));
    }

    #[test]
    fn test_missing_entry_rejected() {
        let mut graph = GraphDefinition::new();
        graph.add_step("a", Arc::new(Noop)).unwrap();
        graph.add_terminal_edge("a").unwrap();
        assert!(matches!(graph.validate(), Err(WorkflowError::NoEntryStep)));
    }

    #[test]
    fn test_unreachable_step_rejected() {
        let mut graph = linear_graph();
        graph.add_step("island", Arc::new(Noop)).unwrap();
        graph.add_terminal_edge("island").unwrap();
        assert!(matches!(
            graph.validate(),
            Err(WorkflowError::DisconnectedGraph)
        ));
    }

    #[test]
    fn test_branch_point_has_no_default() {
        let mut graph = linear_graph();
        graph.add_step("c", Arc::new(Noop)).unwrap();
        graph.add_edge("a", "c").unwrap();
        graph.add_terminal_edge("c").unwrap();

        let result = graph.default_successor(&StepName::new("a"));
        assert!(matches!(
            result,
            Err(WorkflowError::AmbiguousDefaultEdge { count: 2, .. })
        ));
    }

    #[test]
    fn test_no_edges_means_no_default() {
        let mut graph = GraphDefinition::new();
        graph.add_step("a", Arc::new(Noop)).unwrap();
        let result = graph.default_successor(&StepName::new("a"));
        assert!(matches!(result, Err(WorkflowError::MissingDefaultEdge(_))));
    }
}
