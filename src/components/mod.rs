//! UI Components
//!
//! Retained-tree components of the to-do list.

mod add_task_form;
mod task_list;
mod task_row;

use std::rc::Rc;

use retained_dom::Result;

use crate::models::TaskId;

pub use add_task_form::AddTaskForm;
pub use task_list::TodoList;
pub use task_row::{ConfirmState, TaskRow};

pub type SubmitCallback = Rc<dyn Fn() -> Result<()>>;
pub type InputCallback = Rc<dyn Fn(String) -> Result<()>>;
pub type DraftSource = Rc<dyn Fn() -> String>;
pub type ToggleCallback = Rc<dyn Fn(TaskId, bool) -> Result<()>>;
pub type DeleteCallback = Rc<dyn Fn(TaskId) -> Result<()>>;

/// Event handlers have nowhere to propagate errors to, so they end here
fn report(action: &str, result: Result<()>) {
    if let Err(err) = result {
        tracing::error!(action, error = %err, "ui update failed");
    }
}
