//! VM tuning knobs.

/// Capacity policy for the operand and call-frame stacks.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct VmConfig {
    /// Slots reserved up front.
    pub initial_stack_capacity: usize,
    /// Capacity below which a stack is never shrunk.
    pub stack_floor: usize,
    /// Consecutive low-utilization operations before a shrink.
    pub shrink_patience: u32,
}

impl Default for VmConfig {
    fn default() -> Self {
        VmConfig {
            initial_stack_capacity: 128,
            stack_floor: 1024,
            shrink_patience: 16,
        }
    }
}
