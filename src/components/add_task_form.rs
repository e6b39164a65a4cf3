//! Add Task Form Component
//!
//! Text input plus submit button. Holds no draft of its own: the input is
//! rendered from the container's draft and every keystroke is reported back.

use std::cell::RefCell;
use std::rc::Rc;

use retained_dom::{el, Component, Event, Host, NodeSlot, Result};

use super::{report, DraftSource, InputCallback, SubmitCallback};
use crate::config::AppConfig;

pub struct AddTaskForm<H: Host> {
    host: H,
    config: Rc<AppConfig>,
    on_submit: SubmitCallback,
    on_input: InputCallback,
    draft: DraftSource,
    slot: NodeSlot<H>,
    /// Live text input of the last render
    input: RefCell<Option<H::Node>>,
}

impl<H: Host> AddTaskForm<H> {
    pub fn new(
        host: H,
        config: Rc<AppConfig>,
        on_submit: SubmitCallback,
        on_input: InputCallback,
        draft: DraftSource,
    ) -> Self {
        Self {
            host,
            config,
            on_submit,
            on_input,
            draft,
            slot: NodeSlot::new(),
            input: RefCell::new(None),
        }
    }

    /// Drive the live input without re-rendering the form
    pub fn set_input_value(&self, text: &str) -> Result<()> {
        let input = self.input.borrow().clone();
        match input {
            Some(input) => self.host.set_value(&input, text),
            None => Ok(()),
        }
    }
}

impl<H: Host> Component<H> for AddTaskForm<H> {
    fn render(&self) -> Result<H::Node> {
        let on_input = self.on_input.clone();
        let input = el::<H>("input")
            .attr("type", "text")
            .attr("placeholder", self.config.placeholder.clone())
            .attr("value", (self.draft)())
            .on("input", move |ev: &Event| {
                let text = ev.value.clone().unwrap_or_default();
                report("input", on_input(text));
            })
            .build(&self.host)?;

        let on_submit = self.on_submit.clone();
        let button = el::<H>("button")
            .text(self.config.add_caption.clone())
            .on("click", move |_: &Event| report("submit", on_submit()))
            .build(&self.host)?;

        *self.input.borrow_mut() = Some(input.clone());

        el::<H>("div")
            .attr("class", "add-todo")
            .child(input)
            .child(button)
            .build(&self.host)
    }

    fn slot(&self) -> &NodeSlot<H> {
        &self.slot
    }
}
