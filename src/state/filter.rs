// Branch checkboxes. Checkbox ids are rotated against child order for the first four
// children (0<->2, 1<->3); a child is included iff the checkbox carrying *its index* is checked.
use crate::error::ControlBindingError;
use crate::model::TreeNode;

pub fn checkbox_id_for_child(child: usize) -> usize {
    match child {
        0 => 2,
        1 => 3,
        2 => 0,
        3 => 1,
        n => n,
    }
}

pub fn element_id(checkbox: usize) -> String {
    format!("checkbox-{checkbox}")
}

#[derive(Clone, Debug, PartialEq)]
pub struct Checkbox {
    pub id: usize,
    pub label: String,
    pub checked: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BranchFilter {
    boxes: Vec<Checkbox>,
}

impl BranchFilter {
    /// One checkbox per root child, all checked.
    pub fn bind(root: &TreeNode) -> Self {
        let boxes = root
            .children
            .iter()
            .enumerate()
            .map(|(i, child)| Checkbox {
                id: checkbox_id_for_child(i),
                label: child.name.clone(),
                checked: true,
            })
            .collect();
        Self { boxes }
    }

    /// Fails on the first child index with no checkbox to read its state from. The
    /// rotation needs at least four children to be closed.
    pub fn check(&self) -> Result<(), ControlBindingError> {
        match (0..self.boxes.len()).find(|&i| self.find(i).is_none()) {
            Some(index) => Err(ControlBindingError::MissingCheckbox {
                index,
                available: self.boxes.len(),
            }),
            None => Ok(()),
        }
    }

    fn find(&self, id: usize) -> Option<&Checkbox> {
        self.boxes.iter().find(|b| b.id == id)
    }

    /// Checkboxes in display order (one per child, in child order).
    pub fn checkboxes(&self) -> &[Checkbox] {
        &self.boxes
    }

    pub fn set_checked(&mut self, id: usize, checked: bool) -> Result<(), ControlBindingError> {
        let cb = self
            .boxes
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| ControlBindingError::UnknownControl(element_id(id)))?;
        cb.checked = checked;
        Ok(())
    }

    pub fn includes(&self, child: usize) -> bool {
        self.find(child).is_some_and(|b| b.checked)
    }

    /// Copy of `root` keeping only included children, plus the source index of each kept child.
    pub fn apply(&self, root: &TreeNode) -> (TreeNode, Vec<usize>) {
        let kept: Vec<usize> = (0..root.children.len()).filter(|&i| self.includes(i)).collect();
        let tree = TreeNode {
            name: root.name.clone(),
            size: root.size,
            children: kept.iter().map(|&i| root.children[i].clone()).collect(),
        };
        (tree, kept)
    }
}
