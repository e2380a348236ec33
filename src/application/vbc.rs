//! Vonage Business Communications capability flag.

/// Whether the VBC capability is enabled.
///
/// Carries no webhook data; on the wire it is a presence-only marker.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VbcConfig {
    enabled: bool,
}

impl VbcConfig {
    /// Creates a disabled config.
    #[must_use]
    pub const fn new() -> Self {
        Self { enabled: false }
    }

    /// Enables the capability.
    pub fn enable(&mut self) -> &mut Self {
        self.enabled = true;
        self
    }

    /// Disables the capability.
    pub fn disable(&mut self) -> &mut Self {
        self.enabled = false;
        self
    }

    /// Returns `true` if the capability is enabled.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle() {
        let mut vbc = VbcConfig::new();
        assert!(!vbc.is_enabled());
        vbc.enable();
        assert!(vbc.is_enabled());
        vbc.disable();
        assert!(!vbc.is_enabled());
        assert_eq!(vbc, VbcConfig::default());
    }
}
