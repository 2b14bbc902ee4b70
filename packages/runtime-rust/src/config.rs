use verdict_core::FAULT_CAUGHT_CODE;

/// Configuration for the fault-catching decorators.
#[derive(Debug, Clone)]
pub struct CatchConfig {
    /// Code of the message generated for a caught fault when no handler is set.
    pub fault_code: i32,
    /// Whether the untyped decorator also captures panics raised by the wrapped
    /// operation. Typed decorators never capture panics.
    pub catch_panics: bool,
}

impl Default for CatchConfig {
    fn default() -> Self {
        Self {
            fault_code: FAULT_CAUGHT_CODE,
            catch_panics: true,
        }
    }
}
