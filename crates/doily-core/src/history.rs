use crate::dot::Dot;
use crate::eraser;

/// Drawn, undone and pending-eraser dots. The top of each stack is the end of its `Vec`.
#[derive(Debug, Clone, Default)]
pub struct DotHistory {
    active: Vec<Dot>,
    undone: Vec<Dot>,
    eraser_queue: Vec<Dot>,
}

impl DotHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Oldest first, which is also the render order.
    pub fn active(&self) -> &[Dot] {
        &self.active
    }

    pub fn undone(&self) -> &[Dot] {
        &self.undone
    }

    pub fn eraser_queue(&self) -> &[Dot] {
        &self.eraser_queue
    }

    pub fn draw(&mut self, dot: Dot) {
        self.active.push(dot);
    }

    pub fn draw_for_erase(&mut self, dot: Dot, reflect: bool, angular_step: f64) -> usize {
        self.eraser_queue.push(dot);
        eraser::reconcile(
            &mut self.active,
            &mut self.eraser_queue,
            reflect,
            angular_step,
        )
    }

    pub fn undo(&mut self, count: usize) -> usize {
        let moved = Self::transfer(&mut self.active, &mut self.undone, count);
        log::debug!("undo: {} of {} requested", moved, count);
        moved
    }

    pub fn redo(&mut self, count: usize) -> usize {
        let moved = Self::transfer(&mut self.undone, &mut self.active, count);
        log::debug!("redo: {} of {} requested", moved, count);
        moved
    }

    pub fn clear(&mut self) {
        self.active.clear();
        self.undone.clear();
    }

    fn transfer(from: &mut Vec<Dot>, to: &mut Vec<Dot>, count: usize) -> usize {
        let count = count.min(from.len());
        for _ in 0..count {
            if let Some(dot) = from.pop() {
                to.push(dot);
            }
        }
        count
    }
}
