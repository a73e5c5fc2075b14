/// The data attached to a state of a DFA or NFA.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct StateNode {
    pub accepting: bool,
}

impl StateNode {
    pub fn new(accepting: bool) -> Self {
        StateNode { accepting }
    }

    pub fn accepting() -> Self {
        StateNode::new(true)
    }

    pub fn non_accepting() -> Self {
        StateNode::new(false)
    }

    pub fn invert_mut(&mut self) {
        self.accepting = !self.accepting;
    }

    /// The node of a product state, accepting according to `accept`.
    pub fn join(&self, other: &StateNode, accept: impl Fn(bool, bool) -> bool) -> Self {
        StateNode::new(accept(self.accepting, other.accepting))
    }
}
