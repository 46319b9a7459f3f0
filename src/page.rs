use std::collections::HashMap;

use crate::controller::{self, ControllerState};
use crate::dom::{Dom, NodeId};
use crate::events::{Binding, BindingTarget, EventKind, EventState, Handler};
use crate::html::parse_html;
use crate::scheduler::SchedulerState;
use crate::selector;
use crate::trace::TraceState;
use crate::{Error, Result};

/// Mock layout geometry for one element, in CSS pixels relative to the
/// document. Elements without an entry report a zero rect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rect {
    pub top: i64,
    pub left: i64,
    pub width: i64,
    pub height: i64,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct Viewport {
    pub(crate) scroll_y: i64,
    pub(crate) inner_width: i64,
    pub(crate) inner_height: i64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            scroll_y: 0,
            inner_width: 1280,
            inner_height: 800,
        }
    }
}

/// An in-memory page: the DOM plus the viewport, injected layout geometry,
/// the deterministic scheduler and the controller's binding table. All
/// user interaction and time flow through this type.
#[derive(Debug)]
pub struct Page {
    pub(crate) dom: Dom,
    pub(crate) viewport: Viewport,
    pub(crate) layout: HashMap<NodeId, Rect>,
    pub(crate) scheduler: SchedulerState,
    pub(crate) trace: TraceState,
    pub(crate) bindings: Vec<Binding>,
    pub(crate) controller: ControllerState,
    pub(crate) submissions: Vec<Vec<(String, String)>>,
}

impl Page {
    pub fn from_html(html: &str) -> Result<Self> {
        Ok(Self {
            dom: parse_html(html)?,
            viewport: Viewport::default(),
            layout: HashMap::new(),
            scheduler: SchedulerState::default(),
            trace: TraceState::default(),
            bindings: Vec::new(),
            controller: ControllerState::default(),
            submissions: Vec::new(),
        })
    }

    // ---- geometry and viewport -------------------------------------------

    /// Inject layout geometry for every element matching `selector`.
    pub fn set_layout(&mut self, selector: &str, rect: Rect) -> Result<()> {
        let nodes = selector::query_all(&self.dom, selector)?;
        if nodes.is_empty() {
            return Err(Error::SelectorNotFound(selector.into()));
        }
        for node in nodes {
            self.layout.insert(node, rect);
        }
        Ok(())
    }

    pub(crate) fn rect(&self, node: NodeId) -> Rect {
        self.layout.get(&node).copied().unwrap_or_default()
    }

    pub fn scroll_y(&self) -> i64 {
        self.viewport.scroll_y
    }

    // ---- user events ------------------------------------------------------

    pub fn click(&mut self, selector: &str) -> Result<()> {
        let node = self.require(selector)?;
        self.dispatch(EventKind::Click, Some(node), None)
    }

    pub fn type_text(&mut self, selector: &str, text: &str) -> Result<()> {
        let node = self.require(selector)?;
        match self.dom.element_mut(node) {
            Some(element) => element.value = text.to_string(),
            None => return Err(Error::Runtime(format!("{selector} is not an element"))),
        }
        self.dispatch(EventKind::Input, Some(node), None)
    }

    pub fn blur(&mut self, selector: &str) -> Result<()> {
        let node = self.require(selector)?;
        self.dispatch(EventKind::Blur, Some(node), None)
    }

    pub fn key_down(&mut self, key: &str) -> Result<()> {
        self.dispatch(EventKind::KeyDown, None, Some(key.to_string()))
    }

    pub fn submit(&mut self, selector: &str) -> Result<()> {
        let node = self.require(selector)?;
        self.dispatch(EventKind::Submit, Some(node), None)
    }

    pub fn scroll_to(&mut self, y: i64) -> Result<()> {
        self.viewport.scroll_y = y.max(0);
        self.dispatch(EventKind::Scroll, None, None)
    }

    pub fn resize_to(&mut self, width: i64, height: i64) -> Result<()> {
        self.viewport.inner_width = width.max(0);
        self.viewport.inner_height = height.max(0);
        self.dispatch(EventKind::Resize, None, None)
    }

    /// Advance the clock, running every timer that falls due, in order.
    pub fn advance_time(&mut self, ms: i64) -> Result<()> {
        let deadline = self.scheduler.now_ms + ms.max(0);
        while let Some(task) = self.scheduler.take_next_due(deadline) {
            self.scheduler.now_ms = task.due_at;
            if self.trace.timers {
                self.trace
                    .log(format!("timer {} fired at {}ms", task.id, task.due_at));
            }
            controller::run_timer_action(self, task.action)?;
        }
        self.scheduler.now_ms = deadline;
        Ok(())
    }

    // ---- dispatch ---------------------------------------------------------

    pub(crate) fn dispatch(
        &mut self,
        kind: EventKind,
        target: Option<NodeId>,
        key: Option<String>,
    ) -> Result<()> {
        if self.trace.events {
            let described = target
                .map(|node| self.describe_node(node))
                .unwrap_or_else(|| "document".to_string());
            self.trace.log(format!("event {} on {described}", kind.name()));
        }

        let mut event = EventState::new(kind, target, key);
        let invocations = self.collect_invocations(kind, target);
        for (handler, node) in invocations {
            controller::run_handler(self, handler, node, &mut event)?;
        }
        if event.default_prevented && self.trace.events {
            self.trace
                .log(format!("default prevented for {}", event.kind.name()));
        }
        Ok(())
    }

    /// Bubbling order: selector bindings fire per matching node from the
    /// target upward, then document bindings fire once.
    fn collect_invocations(
        &self,
        kind: EventKind,
        target: Option<NodeId>,
    ) -> Vec<(Handler, NodeId)> {
        let mut out = Vec::new();

        if let Some(target) = target {
            let mut current = Some(target);
            while let Some(node) = current {
                for binding in &self.bindings {
                    if binding.event != kind {
                        continue;
                    }
                    if let BindingTarget::Selector(selector) = &binding.target {
                        if selector.matches(&self.dom, node) {
                            out.push((binding.handler, node));
                        }
                    }
                }
                current = self.dom.parent(node);
            }
        }

        for binding in &self.bindings {
            if binding.event != kind {
                continue;
            }
            if matches!(binding.target, BindingTarget::Document) {
                out.push((binding.handler, target.unwrap_or(self.dom.root)));
            }
        }

        out
    }

    // ---- queries and accessors -------------------------------------------

    pub(crate) fn require(&self, selector: &str) -> Result<NodeId> {
        selector::query(&self.dom, selector)?
            .ok_or_else(|| Error::SelectorNotFound(selector.into()))
    }

    pub(crate) fn find(&self, selector: &str) -> Result<Option<NodeId>> {
        selector::query(&self.dom, selector)
    }

    pub(crate) fn find_all(&self, selector: &str) -> Result<Vec<NodeId>> {
        selector::query_all(&self.dom, selector)
    }

    pub fn exists(&self, selector: &str) -> Result<bool> {
        Ok(self.find(selector)?.is_some())
    }

    pub fn count(&self, selector: &str) -> Result<usize> {
        Ok(self.find_all(selector)?.len())
    }

    pub fn text(&self, selector: &str) -> Result<String> {
        let node = self.require(selector)?;
        Ok(self.dom.text_content(node))
    }

    pub fn value(&self, selector: &str) -> Result<String> {
        let node = self.require(selector)?;
        self.dom
            .element(node)
            .map(|element| element.value.clone())
            .ok_or_else(|| Error::Runtime(format!("{selector} is not an element")))
    }

    pub fn attr(&self, selector: &str, name: &str) -> Result<Option<String>> {
        let node = self.require(selector)?;
        Ok(self.dom.attr(node, name).map(ToOwned::to_owned))
    }

    pub fn has_class(&self, selector: &str, class_name: &str) -> Result<bool> {
        let node = self.require(selector)?;
        Ok(self.dom.has_class(node, class_name))
    }

    pub fn style_property(&self, selector: &str, name: &str) -> Result<Option<String>> {
        let node = self.require(selector)?;
        Ok(self.dom.style_property(node, name))
    }

    /// Stubbed form submissions, newest last. Stands in for the network call
    /// the real site would make.
    pub fn submissions(&self) -> &[Vec<(String, String)>] {
        &self.submissions
    }

    pub fn set_trace_enabled(&mut self, enabled: bool) {
        self.trace.enabled = enabled;
    }

    pub fn take_trace_logs(&mut self) -> Vec<String> {
        self.trace.take_logs()
    }

    pub(crate) fn pending_timer_count(&self) -> usize {
        self.scheduler.pending_count()
    }

    fn describe_node(&self, node: NodeId) -> String {
        let Some(element) = self.dom.element(node) else {
            return "document".to_string();
        };
        match element.attrs.get("id") {
            Some(id) => format!("{}#{id}", element.tag_name),
            None => element.tag_name.clone(),
        }
    }

    // ---- assertions -------------------------------------------------------

    pub fn assert_text(&self, selector: &str, expected: &str) -> Result<()> {
        let node = self.require(selector)?;
        let actual = self.dom.text_content(node);
        if actual == expected {
            Ok(())
        } else {
            Err(self.assertion_failed(selector, expected, &actual, node))
        }
    }

    pub fn assert_value(&self, selector: &str, expected: &str) -> Result<()> {
        let node = self.require(selector)?;
        let actual = self
            .dom
            .element(node)
            .map(|element| element.value.clone())
            .unwrap_or_default();
        if actual == expected {
            Ok(())
        } else {
            Err(self.assertion_failed(selector, expected, &actual, node))
        }
    }

    pub fn assert_exists(&self, selector: &str) -> Result<()> {
        if self.find(selector)?.is_some() {
            Ok(())
        } else {
            Err(Error::SelectorNotFound(selector.into()))
        }
    }

    pub fn assert_has_class(&self, selector: &str, class_name: &str) -> Result<()> {
        let node = self.require(selector)?;
        if self.dom.has_class(node, class_name) {
            Ok(())
        } else {
            let actual = self
                .dom
                .attr(node, "class")
                .unwrap_or("<no class attribute>")
                .to_string();
            Err(self.assertion_failed(selector, class_name, &actual, node))
        }
    }

    fn assertion_failed(
        &self,
        selector: &str,
        expected: &str,
        actual: &str,
        node: NodeId,
    ) -> Error {
        Error::AssertionFailed {
            selector: selector.to_string(),
            expected: expected.to_string(),
            actual: actual.to_string(),
            dom_snippet: self.dom.dump(node),
        }
    }
}
