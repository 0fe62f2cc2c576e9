//! Pipeline vivo: secuencia ordenada de nodos.
//!
//! El orden es el de construcción. No se valida aciclicidad ni que los
//! datasets consumidos sean producidos por algún nodo; eso es del motor.
use crate::node::Node;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pipeline {
    pub nodes: Vec<Node>,
}

impl Pipeline {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.nodes.iter()
    }

    /// Datasets consumidos que ningún nodo produce, en orden de aparición.
    pub fn free_inputs(&self) -> Vec<String> {
        let produced: Vec<String> = self.nodes.iter().flat_map(Node::output_names).collect();
        let mut free = Vec::new();
        for name in self.nodes.iter().flat_map(Node::input_names) {
            if !produced.contains(&name) && !free.contains(&name) {
                free.push(name);
            }
        }
        free
    }
}

impl<'a> IntoIterator for &'a Pipeline {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

impl FromIterator<Node> for Pipeline {
    fn from_iter<T: IntoIterator<Item = Node>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
