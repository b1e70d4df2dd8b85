#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum UnbalancedBrackets {
    #[error("bracket at {0} is not closed")]
    UnclosedBracket(usize),
    #[error("bracket at {0} doesn't have a corresponding opening bracket")]
    UnopenedBracket(usize),
}
