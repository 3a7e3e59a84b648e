//! Scoped name tables.
//!
//! One generic [`Environment`] backs every name table in the toolchain:
//! the analyzer maps names to types, the bytecode compiler maps names to
//! stack slots or function entry points, and the VM maps exported globals
//! to absolute stack slots.

use rustc_hash::FxHashMap;

use crate::Name;

/// Stack of frames, each mapping names to a payload.
///
/// Frames are pushed and popped in strict LIFO order and a name is unique
/// within its frame. Bindings are never removed from a live frame; a frame
/// disappears as a whole when its lexical block ends.
///
/// Frame indices ("depths") count from the outermost frame, which is `0`
/// and can never be popped.
#[derive(Clone, Debug)]
pub struct Environment<T> {
    frames: Vec<FxHashMap<Name, T>>,
    pushes: usize,
    pops: usize,
}

impl<T> Environment<T> {
    /// Create an environment holding a single empty frame.
    pub fn new() -> Self {
        Environment {
            frames: vec![FxHashMap::default()],
            pushes: 0,
            pops: 0,
        }
    }

    /// Number of live frames.
    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Index of the innermost frame.
    #[inline]
    pub fn current_index(&self) -> usize {
        self.frames.len() - 1
    }

    #[inline]
    pub fn push_frame(&mut self) {
        self.frames.push(FxHashMap::default());
        self.pushes += 1;
    }

    /// Pop the innermost frame.
    ///
    /// The outermost frame is never popped; popping it returns `false` and
    /// leaves the environment unchanged.
    #[inline]
    pub fn pop_frame(&mut self) -> bool {
        if self.frames.len() > 1 {
            self.frames.pop();
            self.pops += 1;
            true
        } else {
            false
        }
    }

    /// Total `(pushes, pops)` performed since creation.
    pub fn frame_activity(&self) -> (usize, usize) {
        (self.pushes, self.pops)
    }

    /// Bind `name` in the innermost frame, returning any previous payload
    /// bound to it in that same frame.
    pub fn define(&mut self, name: Name, value: T) -> Option<T> {
        let index = self.current_index();
        self.frames[index].insert(name, value)
    }

    /// Whether the innermost frame binds `name`.
    pub fn is_bound_locally(&self, name: Name) -> bool {
        self.frames
            .last()
            .is_some_and(|frame| frame.contains_key(&name))
    }

    /// Find the innermost binding of `name`, with the depth of its frame.
    pub fn lookup(&self, name: Name) -> Option<(&T, usize)> {
        self.frames
            .iter()
            .enumerate()
            .rev()
            .find_map(|(depth, frame)| frame.get(&name).map(|value| (value, depth)))
    }

    /// Bindings of the frame at `depth`, in unspecified order.
    pub fn frame_bindings(&self, depth: usize) -> impl Iterator<Item = (Name, &T)> {
        self.frames
            .get(depth)
            .into_iter()
            .flat_map(|frame| frame.iter().map(|(name, value)| (*name, value)))
    }
}

impl<T> Default for Environment<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
