use crate::step::Step;

/// Does nothing; a placeholder in a sequence
#[derive(Debug, Clone, Copy, Default)]
pub struct NullStep;

impl NullStep {
    pub const NAME: &'static str = "null";
}

impl Step for NullStep {
    fn name(&self) -> &str {
        Self::NAME
    }
}
