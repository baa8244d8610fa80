//! Server tick conversions

/// Server ticks per second at full speed
pub const TICKS_PER_SECOND: u64 = 20;

/// Convert whole seconds to ticks
pub fn ticks_from_secs(secs: u64) -> u64 {
    secs * TICKS_PER_SECOND
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticks_from_secs() {
        assert_eq!(ticks_from_secs(0), 0);
        assert_eq!(ticks_from_secs(3), 60);
    }
}
