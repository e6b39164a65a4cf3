//! Task Row Component
//!
//! One `li` per task: checkbox, label and a delete button that needs two
//! clicks. The confirmation state is view-only and never touches the task.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use retained_dom::{el, Component, Event, Host, NodeSlot, Result};

use super::{report, DeleteCallback, ToggleCallback};
use crate::config::AppConfig;
use crate::models::{Task, TaskId};

/// Delete confirmation state of a row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfirmState {
    #[default]
    Idle,
    ConfirmPending,
}

pub struct TaskRow<H: Host> {
    host: H,
    config: Rc<AppConfig>,
    /// Snapshot of the task as last shown
    task: RefCell<Task>,
    confirm: Cell<ConfirmState>,
    on_toggle: ToggleCallback,
    on_delete: DeleteCallback,
    slot: NodeSlot<H>,
    this: Weak<Self>,
}

impl<H: Host> TaskRow<H> {
    pub fn new(
        host: H,
        config: Rc<AppConfig>,
        task: Task,
        on_toggle: ToggleCallback,
        on_delete: DeleteCallback,
    ) -> Rc<Self> {
        Rc::new_cyclic(|this| Self {
            host,
            config,
            task: RefCell::new(task),
            confirm: Cell::new(ConfirmState::Idle),
            on_toggle,
            on_delete,
            slot: NodeSlot::new(),
            this: this.clone(),
        })
    }

    pub fn id(&self) -> TaskId {
        self.task.borrow().id
    }

    pub fn confirm_state(&self) -> ConfirmState {
        self.confirm.get()
    }

    /// Show a new snapshot of the task and re-render
    pub fn show(&self, task: Task) -> Result<()> {
        *self.task.borrow_mut() = task;
        self.update()
    }

    /// Render again and put the new node where the old one was mounted
    pub fn update(&self) -> Result<()> {
        let node = self.render()?;
        self.slot.swap(&self.host, node)
    }

    /// First click arms the confirmation, second one deletes
    pub fn delete_clicked(&self) -> Result<()> {
        match self.confirm_state() {
            ConfirmState::Idle => {
                self.confirm.set(ConfirmState::ConfirmPending);
                tracing::debug!(id = %self.id(), "delete armed");
                self.update()
            }
            ConfirmState::ConfirmPending => (self.on_delete)(self.id()),
        }
    }

    pub fn checkbox_changed(&self, checked: bool) -> Result<()> {
        (self.on_toggle)(self.id(), checked)
    }

    fn label_style(&self, task: &Task) -> Option<String> {
        task.completed
            .then(|| format!("color: {}", self.config.completed_color))
    }

    fn delete_button(&self) -> (String, Option<String>) {
        match self.confirm.get() {
            ConfirmState::Idle => (self.config.delete_caption.clone(), None),
            ConfirmState::ConfirmPending => (
                self.config.confirm_caption.clone(),
                Some(format!(
                    "background-color: {}; color: {}",
                    self.config.confirm_background, self.config.confirm_color
                )),
            ),
        }
    }
}

impl<H: Host> Component<H> for TaskRow<H> {
    fn render(&self) -> Result<H::Node> {
        let task = self.task.borrow().clone();

        let this = self.this.clone();
        let checkbox = el::<H>("input")
            .attr("type", "checkbox")
            .attr("checked", task.completed)
            .on("change", move |ev: &Event| {
                let Some(row) = this.upgrade() else { return };
                let checked = ev.checked.unwrap_or(!row.task.borrow().completed);
                report("toggle", row.checkbox_changed(checked));
            })
            .build(&self.host)?;

        let label = el::<H>("label")
            .attr_opt("style", self.label_style(&task))
            .text(task.text.clone())
            .build(&self.host)?;

        let (caption, style) = self.delete_button();
        let this = self.this.clone();
        let delete = el::<H>("button")
            .attr_opt("style", style)
            .text(caption)
            .on("click", move |_: &Event| {
                if let Some(row) = this.upgrade() {
                    report("delete", row.delete_clicked());
                }
            })
            .build(&self.host)?;

        el::<H>("li")
            .child(checkbox)
            .child(label)
            .child(delete)
            .build(&self.host)
    }

    fn slot(&self) -> &NodeSlot<H> {
        &self.slot
    }
}
