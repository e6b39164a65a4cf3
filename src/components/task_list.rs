//! Todo List Component
//!
//! Owns the tasks, the draft text and one row component per task. Structural
//! changes (add, delete) rebuild the whole `ul` and swap it in; per-task
//! changes are delegated to that task's row.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use retained_dom::{el, Component, Host, NodeSlot, Result};

#[cfg(test)]
use super::ConfirmState;
use super::{AddTaskForm, DeleteCallback, TaskRow, ToggleCallback};
use crate::config::AppConfig;
use crate::models::{IdAllocator, Task, TaskId};

#[derive(Debug, Default)]
struct ListState {
    /// Display order
    tasks: Vec<Task>,
    ids: IdAllocator,
    draft: String,
}

pub struct TodoList<H: Host> {
    host: H,
    config: Rc<AppConfig>,
    state: RefCell<ListState>,
    rows: RefCell<HashMap<TaskId, Rc<TaskRow<H>>>>,
    form: AddTaskForm<H>,
    slot: NodeSlot<H>,
    /// Currently mounted `ul`
    list_node: RefCell<Option<H::Node>>,
    this: Weak<Self>,
}

impl<H: Host> TodoList<H> {
    pub fn new(host: H, config: Rc<AppConfig>) -> Rc<Self> {
        Rc::new_cyclic(|this: &Weak<Self>| {
            let (submit, input, draft) = (this.clone(), this.clone(), this.clone());
            let form = AddTaskForm::new(
                host.clone(),
                config.clone(),
                Rc::new(move || match submit.upgrade() {
                    Some(list) => list.submit(),
                    None => Ok(()),
                }),
                Rc::new(move |text: String| match input.upgrade() {
                    Some(list) => list.input_changed(text),
                    None => Ok(()),
                }),
                Rc::new(move || {
                    draft
                        .upgrade()
                        .map(|list| list.draft())
                        .unwrap_or_default()
                }),
            );
            Self {
                host,
                config,
                state: RefCell::new(ListState::default()),
                rows: RefCell::new(HashMap::new()),
                form,
                slot: NodeSlot::new(),
                list_node: RefCell::new(None),
                this: this.clone(),
            }
        })
    }

    /// Append the list's node under `parent`
    pub fn mount(&self, parent: &H::Node) -> Result<()> {
        let node = self.node()?;
        self.host.append_child(parent, &node)
    }

    pub fn tasks(&self) -> Vec<Task> {
        self.state.borrow().tasks.clone()
    }

    pub fn draft(&self) -> String {
        self.state.borrow().draft.clone()
    }

    /// Identities that currently have a row, sorted
    pub fn row_ids(&self) -> Vec<TaskId> {
        let mut ids: Vec<TaskId> = self.rows.borrow().keys().copied().collect();
        ids.sort();
        ids
    }

    pub fn row(&self, id: TaskId) -> Option<Rc<TaskRow<H>>> {
        self.rows.borrow().get(&id).cloned()
    }

    #[cfg(test)]
    pub fn confirm_state(&self, id: TaskId) -> Option<ConfirmState> {
        self.row(id).map(|row| row.confirm_state())
    }

    /// Add the draft as a new task. Blank drafts are ignored.
    pub fn submit(&self) -> Result<()> {
        let task = {
            let mut state = self.state.borrow_mut();
            let text = state.draft.trim();
            if text.is_empty() {
                tracing::debug!("ignoring blank submission");
                return Ok(());
            }
            let text = text.to_string();
            let id = state.ids.allocate();
            let task = Task::new(id, text);
            state.tasks.push(task.clone());
            state.draft.clear();
            task
        };
        tracing::debug!(id = %task.id, text = %task.text, "task added");

        let row = self.make_row(task.clone());
        self.rows.borrow_mut().insert(task.id, row);
        self.form.set_input_value("")?;
        self.rebuild()
    }

    /// Record the draft verbatim and mirror it into the live input
    pub fn input_changed(&self, text: String) -> Result<()> {
        self.state.borrow_mut().draft = text.clone();
        self.form.set_input_value(&text)
    }

    /// Set a task's completed flag; only its row re-renders
    pub fn toggle(&self, id: TaskId, completed: bool) -> Result<()> {
        let task = {
            let mut state = self.state.borrow_mut();
            let Some(task) = state.tasks.iter_mut().find(|t| t.id == id) else {
                return Ok(());
            };
            task.completed = completed;
            task.clone()
        };
        tracing::debug!(id = %id, completed, "task toggled");

        match self.row(id) {
            Some(row) => row.show(task),
            None => Ok(()),
        }
    }

    /// Remove a task and its row, then rebuild the list
    pub fn delete(&self, id: TaskId) -> Result<()> {
        let removed_row = self.rows.borrow_mut().remove(&id);
        let removed_task = {
            let mut state = self.state.borrow_mut();
            let before = state.tasks.len();
            state.tasks.retain(|t| t.id != id);
            state.tasks.len() != before
        };
        if removed_row.is_none() && !removed_task {
            return Ok(());
        }
        tracing::debug!(id = %id, "task deleted");
        self.rebuild()
    }

    /// Build a fresh `ul` from the task sequence and swap it for the mounted one
    pub fn rebuild(&self) -> Result<()> {
        let old = self.list_node.borrow().clone();
        let Some(old) = old else {
            // not rendered yet; the first render builds the list
            return Ok(());
        };
        let list = self.build_list()?;
        self.host.replace_with(&old, &list)?;
        *self.list_node.borrow_mut() = Some(list);
        debug_assert!(self.rows_in_sync());
        Ok(())
    }

    fn build_list(&self) -> Result<H::Node> {
        let tasks = self.tasks();
        let rows: Vec<Rc<TaskRow<H>>> = {
            let mut map = self.rows.borrow_mut();
            tasks
                .into_iter()
                .map(|task| {
                    map.entry(task.id)
                        .or_insert_with(|| self.make_row(task))
                        .clone()
                })
                .collect()
        };
        let nodes = rows
            .iter()
            .map(|row| row.node())
            .collect::<Result<Vec<_>>>()?;
        el::<H>("ul").children(nodes).build(&self.host)
    }

    fn make_row(&self, task: Task) -> Rc<TaskRow<H>> {
        let (toggle, delete) = (self.this.clone(), self.this.clone());
        let on_toggle: ToggleCallback = Rc::new(move |id: TaskId, completed: bool| match toggle.upgrade() {
            Some(list) => list.toggle(id, completed),
            None => Ok(()),
        });
        let on_delete: DeleteCallback = Rc::new(move |id: TaskId| match delete.upgrade() {
            Some(list) => list.delete(id),
            None => Ok(()),
        });
        TaskRow::new(self.host.clone(), self.config.clone(), task, on_toggle, on_delete)
    }

    /// Every task has exactly one row and every row has a task
    fn rows_in_sync(&self) -> bool {
        let mut task_ids: Vec<TaskId> = self.state.borrow().tasks.iter().map(|t| t.id).collect();
        task_ids.sort();
        task_ids == self.row_ids()
    }
}

impl<H: Host> Component<H> for TodoList<H> {
    fn render(&self) -> Result<H::Node> {
        let title = el::<H>("h1").text(self.config.title.clone()).build(&self.host)?;
        let form = self.form.node()?;
        let list = self.build_list()?;
        *self.list_node.borrow_mut() = Some(list.clone());

        el::<H>("div")
            .attr("class", "todo-list")
            .child(title)
            .child(form)
            .child(list)
            .build(&self.host)
    }

    fn slot(&self) -> &NodeSlot<H> {
        &self.slot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use retained_dom::{MemNode, MemoryHost};

    struct Page {
        list: Rc<TodoList<MemoryHost>>,
        body: MemNode,
    }

    impl Page {
        fn new() -> Self {
            let host = MemoryHost::new();
            let body = host.body();
            let list = TodoList::new(host, Rc::new(AppConfig::default()));
            list.mount(&body).unwrap();
            Self { list, body }
        }

        fn text_input(&self) -> MemNode {
            self.body.find("div").unwrap().find("input").unwrap()
        }

        fn add(&self, text: &str) {
            self.text_input().input(text);
            self.add_button().click();
        }

        fn add_button(&self) -> MemNode {
            self.body.find("div").unwrap().find("div").unwrap().find("button").unwrap()
        }

        fn ul(&self) -> MemNode {
            self.body.find("ul").unwrap()
        }

        fn item(&self, index: usize) -> MemNode {
            self.ul().children()[index].clone()
        }

        fn labels(&self) -> Vec<String> {
            self.ul().find_all("label").iter().map(MemNode::text_content).collect()
        }
    }

    #[test]
    fn test_initial_render() {
        let page = Page::new();
        let root = page.body.children()[0].clone();

        assert_eq!(root.attribute("class").as_deref(), Some("todo-list"));
        assert_eq!(root.find("h1").unwrap().text_content(), "TODO List");
        assert_eq!(page.text_input().value(), "");
        assert!(page.ul().children().is_empty());
        assert!(page.list.tasks().is_empty());
    }

    #[test]
    fn test_blank_submit_is_ignored() {
        let page = Page::new();
        page.add("");
        page.add("   \t ");

        assert!(page.list.tasks().is_empty());
        assert!(page.list.row_ids().is_empty());
        assert_eq!(page.list.draft(), "   \t ");
    }

    #[test]
    fn test_submit_appends_task_and_resets_draft() {
        let page = Page::new();
        page.add("Buy milk");

        let tasks = page.list.tasks();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].text, "Buy milk");
        assert!(!tasks[0].completed);
        assert_eq!(tasks[0].id, TaskId(1));
        assert_eq!(page.list.draft(), "");
        assert_eq!(page.text_input().value(), "");
        assert_eq!(page.labels(), vec!["Buy milk"]);
    }

    #[test]
    fn test_submit_trims_text() {
        let page = Page::new();
        page.add("  Walk dog  ");
        assert_eq!(page.list.tasks()[0].text, "Walk dog");
    }

    #[test]
    fn test_input_change_is_verbatim() {
        let page = Page::new();
        page.text_input().input("  spaced ");
        assert_eq!(page.list.draft(), "  spaced ");
        assert_eq!(page.text_input().value(), "  spaced ");
    }

    #[test]
    fn test_toggle_flips_only_target() {
        let page = Page::new();
        page.add("A");
        page.add("B");
        page.add("C");
        let b_before = page.item(1);
        let a_before = page.item(0);

        page.item(1).find("input").unwrap().toggle_checkbox();

        let tasks = page.list.tasks();
        let flags: Vec<bool> = tasks.iter().map(|t| t.completed).collect();
        assert_eq!(flags, vec![false, true, false]);
        assert_eq!(page.labels(), vec!["A", "B", "C"]);
        // only B's row was replaced
        assert!(page.item(0).same_node(&a_before));
        assert!(!page.item(1).same_node(&b_before));
        assert!(page.item(1).find("input").unwrap().checked());
    }

    #[test]
    fn test_toggle_is_its_own_inverse() {
        let page = Page::new();
        page.add("Round trip");
        let original = page.list.tasks()[0].clone();

        page.list.toggle(original.id, true).unwrap();
        assert!(page.list.tasks()[0].completed);
        page.list.toggle(original.id, false).unwrap();

        assert_eq!(page.list.tasks()[0], original);
    }

    #[test]
    fn test_delete_needs_two_clicks() {
        let page = Page::new();
        page.add("A");
        page.add("B");
        let id = page.list.tasks()[1].id;

        page.item(1).find("button").unwrap().click();
        assert_eq!(page.list.tasks().len(), 2);
        assert_eq!(page.list.confirm_state(id), Some(ConfirmState::ConfirmPending));
        assert_eq!(page.item(1).find("button").unwrap().text_content(), "🗑️ Уверен?");

        page.item(1).find("button").unwrap().click();
        assert_eq!(page.list.tasks().len(), 1);
        assert!(page.list.tasks().iter().all(|t| t.id != id));
        assert!(page.list.row(id).is_none());
        assert_eq!(page.labels(), vec!["A"]);
    }

    #[test]
    fn test_confirm_is_per_row() {
        let page = Page::new();
        page.add("A");
        page.add("B");
        let (a, b) = (page.list.tasks()[0].id, page.list.tasks()[1].id);

        page.item(0).find("button").unwrap().click();
        page.item(1).find("button").unwrap().click();

        assert_eq!(page.list.tasks().len(), 2);
        assert_eq!(page.list.confirm_state(a), Some(ConfirmState::ConfirmPending));
        assert_eq!(page.list.confirm_state(b), Some(ConfirmState::ConfirmPending));
    }

    #[test]
    fn test_ids_never_reused() {
        let page = Page::new();
        page.add("one");
        page.add("two");
        page.add("three");
        let second = page.list.tasks()[1].id;
        page.list.delete(second).unwrap();
        page.add("four");

        let ids: Vec<TaskId> = page.list.tasks().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![TaskId(1), TaskId(3), TaskId(4)]);
        assert!(!ids.contains(&second));
        assert_eq!(page.list.row_ids(), ids);
    }

    #[test]
    fn test_unknown_ids_are_noops() {
        let page = Page::new();
        page.add("A");
        let list_before = page.ul();

        page.list.toggle(TaskId(99), true).unwrap();
        page.list.delete(TaskId(99)).unwrap();

        assert_eq!(page.list.tasks().len(), 1);
        assert!(!page.list.tasks()[0].completed);
        assert!(page.ul().same_node(&list_before));
    }

    #[test]
    fn test_rebuild_reuses_row_nodes() {
        let page = Page::new();
        page.add("A");
        let a_node = page.item(0);
        page.add("B");

        assert!(page.item(0).same_node(&a_node));
        assert_eq!(page.body.find_all("ul").len(), 1);
    }

    #[test]
    fn test_operations_before_mount() {
        let list = TodoList::new(MemoryHost::new(), Rc::new(AppConfig::default()));
        list.input_changed("early".to_string()).unwrap();
        list.submit().unwrap();
        assert_eq!(list.tasks().len(), 1);

        let node = list.node().unwrap();
        let labels: Vec<String> = node.find_all("label").iter().map(MemNode::text_content).collect();
        assert_eq!(labels, vec!["early"]);
        assert_eq!(list.row_ids(), vec![TaskId(1)]);
    }

    #[test]
    fn test_end_to_end() {
        let page = Page::new();
        page.add("A");
        page.add("B");
        page.item(0).find("input").unwrap().toggle_checkbox();
        page.item(1).find("button").unwrap().click();
        page.item(1).find("button").unwrap().click();

        let tasks = page.list.tasks();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].text, "A");
        assert!(tasks[0].completed);
        assert_eq!(page.list.row_ids().len(), 1);
        assert_eq!(
            page.ul().to_html(),
            "<ul><li><input type=\"checkbox\"></input><label style=\"color: grey\">A</label><button>🗑️</button></li></ul>"
        );
    }
}
