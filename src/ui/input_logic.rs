/// Step a value down by one, never below `min`.
pub fn step_down(value: u8, min: u8) -> u8 {
    value.saturating_sub(1).max(min)
}

/// Step a value up by one, never above `max`.
pub fn step_up(value: u8, max: u8) -> u8 {
    value.saturating_add(1).min(max)
}
