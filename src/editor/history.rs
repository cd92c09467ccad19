use crate::scene::model::Scene;

/// Snapshot stack backing undo.
///
/// The bottom entry is the scene the editor started from (or was last reset to), and the stack is
/// never empty. Mutations push the scene as it was *before* the change; [`History::undo`] discards
/// the top entry and hands back the one beneath it.
#[derive(Clone, Debug)]
pub struct History {
    stack: Vec<Scene>,
}

impl History {
    /// Stack holding only `base`.
    pub fn new(base: Scene) -> Self {
        Self { stack: vec![base] }
    }

    /// Record a pre-mutation snapshot.
    pub fn push(&mut self, before: Scene) {
        self.stack.push(before);
        tracing::debug!(depth = self.stack.len(), "history push");
    }

    /// Pop the top entry and return the entry now on top, or `None` at the base.
    pub fn undo(&mut self) -> Option<&Scene> {
        if self.stack.len() <= 1 {
            return None;
        }
        self.stack.pop();
        tracing::debug!(depth = self.stack.len(), "history undo");
        self.stack.last()
    }

    /// Drop everything and start over from `base`.
    pub fn reset(&mut self, base: Scene) {
        self.stack.clear();
        self.stack.push(base);
    }

    /// Number of entries, including the base.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// `true` when an undo would change something.
    pub fn can_undo(&self) -> bool {
        self.stack.len() > 1
    }

    /// Entry on top of the stack.
    pub fn top(&self) -> &Scene {
        // The constructor and `reset` both seed one entry and `undo` never pops the last.
        &self.stack[self.stack.len() - 1]
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(Scene::default())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/editor/history.rs"]
mod tests;
