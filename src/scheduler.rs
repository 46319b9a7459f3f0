use crate::dom::NodeId;

/// What a fired timer does. Handlers are native, so the callback is a closed
/// enum rather than a stored closure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TimerAction {
    UpdateActiveNav,
    ResizeSettled,
    NotificationSlideIn(NodeId),
    NotificationSlideOut(NodeId),
    NotificationRemove(NodeId),
}

#[derive(Debug, Clone)]
pub(crate) struct ScheduledTask {
    pub(crate) id: i64,
    pub(crate) due_at: i64,
    pub(crate) order: i64,
    pub(crate) action: TimerAction,
}

/// Deterministic timer queue. Time only moves through
/// [`crate::Page::advance_time`]; due tasks run in `(due_at, order)` order.
#[derive(Debug)]
pub(crate) struct SchedulerState {
    pub(crate) task_queue: Vec<ScheduledTask>,
    pub(crate) now_ms: i64,
    next_timer_id: i64,
    next_task_order: i64,
}

impl Default for SchedulerState {
    fn default() -> Self {
        Self {
            task_queue: Vec::new(),
            now_ms: 0,
            next_timer_id: 1,
            next_task_order: 0,
        }
    }
}

impl SchedulerState {
    pub(crate) fn schedule(&mut self, delay_ms: i64, action: TimerAction) -> i64 {
        let id = self.next_timer_id;
        self.next_timer_id += 1;
        let order = self.next_task_order;
        self.next_task_order += 1;
        self.task_queue.push(ScheduledTask {
            id,
            due_at: self.now_ms + delay_ms.max(0),
            order,
            action,
        });
        id
    }

    /// Remove and return the next task due at or before `deadline`.
    pub(crate) fn take_next_due(&mut self, deadline: i64) -> Option<ScheduledTask> {
        let mut best: Option<usize> = None;
        for (idx, task) in self.task_queue.iter().enumerate() {
            if task.due_at > deadline {
                continue;
            }
            match best {
                None => best = Some(idx),
                Some(current) => {
                    let current_task = &self.task_queue[current];
                    if (task.due_at, task.order) < (current_task.due_at, current_task.order) {
                        best = Some(idx);
                    }
                }
            }
        }
        best.map(|idx| self.task_queue.remove(idx))
    }

    pub(crate) fn pending_count(&self) -> usize {
        self.task_queue.len()
    }
}
