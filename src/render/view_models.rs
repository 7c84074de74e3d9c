//! View models for the page template.
//!
//! Flat, pre-formatted structures so the template never has to deal with
//! optional values or formatting: absent fields are already empty strings.

use serde::Serialize;
use std::sync::Arc;

use crate::core::ConsoleError;
use crate::snapshot::{ContainerSnapshot, RecipeSnapshot, RecipeState};

/// Whole page.
#[derive(Debug, Clone, Serialize)]
pub struct PageView {
    pub title: String,
    pub label: String,
    pub container_count: usize,
    pub unsatisfied_total: usize,
    pub containers: Vec<ContainerView>,
}

impl PageView {
    /// Build the page from snapshots that are already in display order.
    ///
    /// # Errors
    ///
    /// Fails with [`ConsoleError::UnknownEventKind`] if any snapshot carries an
    /// event type without a label.
    pub fn new(
        title: impl Into<String>,
        label: impl Into<String>,
        snapshots: &[Arc<ContainerSnapshot>],
        timestamp_format: &str,
    ) -> Result<Self, ConsoleError> {
        let containers = snapshots
            .iter()
            .map(|snapshot| ContainerView::new(snapshot, timestamp_format))
            .collect::<Result<Vec<_>, _>>()?;
        let unsatisfied_total = containers.iter().map(|c| c.unsatisfied_count).sum();

        Ok(Self {
            title: title.into(),
            label: label.into(),
            container_count: containers.len(),
            unsatisfied_total,
            containers,
        })
    }
}

/// One container row.
#[derive(Debug, Clone, Serialize)]
pub struct ContainerView {
    pub module_id: u64,
    pub symbolic_name: String,
    pub version: String,
    pub event_type: &'static str,
    pub event_class: &'static str,
    pub timestamp: String,
    pub timestamp_millis: i64,
    pub unsatisfied_count: usize,
    pub missing_dependencies: String,
    pub cause_stack_trace: String,
    pub recipes: Vec<RecipeView>,
}

impl ContainerView {
    pub fn new(snapshot: &ContainerSnapshot, timestamp_format: &str) -> Result<Self, ConsoleError> {
        let event_type = snapshot.event_type_name()?;
        let module = snapshot.module();

        Ok(Self {
            module_id: module.id.0,
            symbolic_name: module.symbolic_name.clone(),
            version: module.version.to_string(),
            event_type,
            event_class: css_class_for_event(event_type),
            timestamp: snapshot.formatted_timestamp(timestamp_format),
            timestamp_millis: snapshot.timestamp().timestamp_millis(),
            unsatisfied_count: snapshot.unsatisfied_count(),
            missing_dependencies: snapshot.missing_dependencies_string(),
            cause_stack_trace: snapshot.cause_stack_trace(),
            recipes: snapshot.recipes().iter().map(RecipeView::new).collect(),
        })
    }
}

/// One recipe row.
#[derive(Debug, Clone, Serialize)]
pub struct RecipeView {
    pub name: String,
    pub satisfied: String,
    pub selector: String,
    pub status_class: &'static str,
}

impl RecipeView {
    pub fn new(recipe: &RecipeSnapshot) -> Self {
        let status_class = match recipe.state() {
            RecipeState::Plain => "plain",
            RecipeState::Satisfiable {
                satisfied: true,
                ..
            } => "satisfied",
            RecipeState::Satisfiable {
                satisfied: false,
                ..
            } => "unsatisfied",
        };

        Self {
            name: recipe.name().to_string(),
            satisfied: recipe.satisfied().map(|s| s.to_string()).unwrap_or_default(),
            selector: recipe.selector().unwrap_or_default().to_string(),
            status_class,
        }
    }
}

/// CSS class for an event label.
fn css_class_for_event(label: &str) -> &'static str {
    match label {
        "Created" => "ok",
        "Failure" => "error",
        "Waiting" | "Grace period" => "warning",
        _ => "info",
    }
}
