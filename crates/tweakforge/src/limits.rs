/// Longest command (and section) the lobby server accepts, in characters.
pub const MAX_COMMAND_LENGTH: usize = 8192;

/// `tweakdefs`, `tweakdefs1` ... `tweakdefs9`, and likewise for `tweakunits`.
pub const MAX_SLOTS_PER_TYPE: usize = 10;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct PackLimits {
    pub max_command_length: usize,
    pub max_slots_per_type: usize,
}

impl Default for PackLimits {
    fn default() -> Self {
        PackLimits {
            max_command_length: MAX_COMMAND_LENGTH,
            max_slots_per_type: MAX_SLOTS_PER_TYPE,
        }
    }
}
