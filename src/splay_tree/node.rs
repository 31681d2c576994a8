use crate::arena::Handle;

/// A node of a splay tree stored in a `NodeArena`. The arena owns every node; `left` and `right`
/// describe the tree, while `parent` is only followed upwards while splaying.
pub struct Node<T> {
    pub key: T,
    pub parent: Option<Handle>,
    pub left: Option<Handle>,
    pub right: Option<Handle>,
}

impl<T> Node<T> {
    pub fn new(key: T, parent: Option<Handle>) -> Self {
        Node {
            key,
            parent,
            left: None,
            right: None,
        }
    }

    pub fn is_left_child(&self, child: Handle) -> bool {
        self.left == Some(child)
    }
}
