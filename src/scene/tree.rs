use serde::{Deserialize, Serialize};

use crate::foundation::core::{Point, Rect, Vec2, about};
use crate::foundation::error::{BeatlineError, BeatlineResult};
use crate::scene::element::{Element, ElementId, ElementSpec, union_bounds};

/// Arena of elements owned by one scene.
///
/// Element `0` is the scene root group. Every other element has exactly one parent, which is
/// either the root or a group, so the ownership graph is always a tree.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ElementTree {
    nodes: Vec<Element>,
}

impl Default for ElementTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementTree {
    /// Id of the scene root group.
    pub const ROOT: ElementId = ElementId(0);

    /// Tree holding only the root group.
    pub fn new() -> Self {
        let mut root = ElementSpec::group_spec().to_element(Self::ROOT);
        root.name = Some("root".to_owned());
        Self { nodes: vec![root] }
    }

    /// Number of elements, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// `true` when the tree holds only the root.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// All elements in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        self.nodes.iter()
    }

    /// `true` when `id` names an element of this tree.
    pub fn contains(&self, id: ElementId) -> bool {
        (id.0 as usize) < self.nodes.len()
    }

    /// Look up an element.
    pub fn get(&self, id: ElementId) -> BeatlineResult<&Element> {
        self.nodes
            .get(id.0 as usize)
            .ok_or_else(|| BeatlineError::reference(format!("unknown element {id}")))
    }

    /// Check a tree that did not come from [`ElementTree::insert`], e.g. one read from JSON.
    ///
    /// Verifies that element `0` is the parentless root group, that ids match positions, that
    /// every parent/child link is in range and agrees in both directions, that every element is
    /// reachable from the root exactly once, and that every element passes the same checks as
    /// a freshly inserted spec.
    pub(crate) fn validate(&self) -> BeatlineResult<()> {
        let root = self
            .nodes
            .first()
            .ok_or_else(|| BeatlineError::construction("element tree has no root"))?;
        if root.id != Self::ROOT || !root.is_group() || root.parent.is_some() {
            return Err(BeatlineError::construction(
                "element 0 must be the parentless root group",
            ));
        }

        for (i, el) in self.nodes.iter().enumerate() {
            if el.id.0 as usize != i {
                return Err(BeatlineError::construction(format!(
                    "element at position {i} has id {}",
                    el.id
                )));
            }
            if !el.is_group() && !el.children.is_empty() {
                return Err(BeatlineError::construction(format!(
                    "{} is not a group but has children",
                    el.label()
                )));
            }
            for &child in &el.children {
                let owner = self.get(child)?.parent;
                if owner != Some(el.id) {
                    return Err(BeatlineError::construction(format!(
                        "{} lists child {child}, whose parent is {owner:?}",
                        el.label()
                    )));
                }
            }
            if i > 0 {
                let parent = el.parent.ok_or_else(|| {
                    BeatlineError::construction(format!("{} has no parent", el.label()))
                })?;
                let listed = self
                    .get(parent)?
                    .children
                    .iter()
                    .filter(|&&c| c == el.id)
                    .count();
                if listed != 1 {
                    return Err(BeatlineError::construction(format!(
                        "{} is listed {listed} times by its parent {parent}",
                        el.label()
                    )));
                }
            }
            el.validate()?;
        }

        // Links agree both ways, so a walk from the root sees each element at most once
        // unless some subtree is detached into a cycle.
        let mut seen = vec![false; self.nodes.len()];
        let mut stack = vec![Self::ROOT];
        while let Some(id) = stack.pop() {
            let slot = &mut seen[id.0 as usize];
            if *slot {
                return Err(BeatlineError::construction(format!(
                    "element {id} is owned twice"
                )));
            }
            *slot = true;
            stack.extend(self.nodes[id.0 as usize].children.iter().copied());
        }
        if let Some(i) = seen.iter().position(|s| !s) {
            return Err(BeatlineError::construction(format!(
                "element #{i} is not reachable from the root (ownership cycle)"
            )));
        }
        Ok(())
    }

    /// Validate `spec` and insert it under the root.
    pub fn insert(&mut self, spec: &ElementSpec) -> BeatlineResult<ElementId> {
        spec.validate()?;
        Ok(self.push(spec, Self::ROOT))
    }

    fn push(&mut self, spec: &ElementSpec, parent: ElementId) -> ElementId {
        let id = ElementId(self.nodes.len() as u32);
        let mut el = spec.to_element(id);
        el.parent = Some(parent);
        self.nodes.push(el);
        self.nodes[parent.0 as usize].children.push(id);
        id
    }

    /// Create a group owning `children`, which must all currently sit directly under the root.
    ///
    /// The group's position is the center of its children's combined bounds.
    pub fn group(
        &mut self,
        children: &[ElementId],
        name: Option<String>,
    ) -> BeatlineResult<ElementId> {
        for (i, &child) in children.iter().enumerate() {
            self.check_free(child)?;
            if children[..i].contains(&child) {
                return Err(BeatlineError::construction(format!(
                    "element {child} listed twice in one group"
                )));
            }
        }

        let center = if children.is_empty() {
            Point::ORIGIN
        } else {
            union_bounds(
                children
                    .iter()
                    .map(|&c| self.bounds(c))
                    .collect::<BeatlineResult<Vec<_>>>()?,
            )
            .center()
        };

        let mut spec = ElementSpec::group_spec();
        spec.geometry.position = center;
        spec.name = name;
        let gid = self.push(&spec, Self::ROOT);
        for &child in children {
            self.reparent(child, gid);
        }
        Ok(gid)
    }

    /// Move a root-level element into an existing group.
    pub fn attach(&mut self, group: ElementId, child: ElementId) -> BeatlineResult<()> {
        if !self.get(group)?.is_group() {
            return Err(BeatlineError::construction(format!(
                "{} is not a group",
                self.get(group)?.label()
            )));
        }
        self.check_free(child)?;
        if group == child || self.ancestors(group).contains(&child) {
            return Err(BeatlineError::construction(format!(
                "attaching {child} to {group} would create a cycle"
            )));
        }
        self.reparent(child, group);
        Ok(())
    }

    fn check_free(&self, child: ElementId) -> BeatlineResult<()> {
        let el = self.get(child)?;
        if child == Self::ROOT {
            return Err(BeatlineError::construction("the scene root cannot be grouped"));
        }
        if el.parent != Some(Self::ROOT) {
            return Err(BeatlineError::construction(format!(
                "{} is already owned by group {}",
                el.label(),
                el.parent.map_or_else(|| "?".to_owned(), |p| p.to_string())
            )));
        }
        Ok(())
    }

    fn reparent(&mut self, child: ElementId, parent: ElementId) {
        if let Some(old) = self.nodes[child.0 as usize].parent {
            self.nodes[old.0 as usize].children.retain(|c| *c != child);
        }
        self.nodes[child.0 as usize].parent = Some(parent);
        self.nodes[parent.0 as usize].children.push(child);
    }

    /// Ancestors of `id`, nearest first, root last.
    pub fn ancestors(&self, id: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut cur = self.nodes.get(id.0 as usize).and_then(|e| e.parent);
        while let Some(p) = cur {
            out.push(p);
            cur = self.nodes[p.0 as usize].parent;
        }
        out
    }

    /// Pre-order descendants of `id` (excluding `id`).
    pub fn descendants(&self, id: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut stack: Vec<ElementId> = match self.nodes.get(id.0 as usize) {
            Some(el) => el.children.iter().rev().copied().collect(),
            None => return out,
        };
        while let Some(cur) = stack.pop() {
            out.push(cur);
            stack.extend(self.nodes[cur.0 as usize].children.iter().rev().copied());
        }
        out
    }

    /// `id` followed by its descendants.
    pub fn subtree(&self, id: ElementId) -> Vec<ElementId> {
        let mut out = vec![id];
        out.extend(self.descendants(id));
        out
    }

    /// Non-group elements of the subtree rooted at `id` (which may be `id` itself).
    pub fn leaves(&self, id: ElementId) -> Vec<ElementId> {
        self.subtree(id)
            .into_iter()
            .filter(|c| !self.nodes[c.0 as usize].is_group())
            .collect()
    }

    /// Scene-space bounds; a group covers its leaves, an empty group is a point at its position.
    pub fn bounds(&self, id: ElementId) -> BeatlineResult<Rect> {
        let el = self.get(id)?;
        if !el.is_group() {
            return Ok(el.leaf_bounds());
        }
        let leaves = self.leaves(id);
        if leaves.is_empty() {
            return Ok(el.leaf_bounds());
        }
        Ok(union_bounds(
            leaves.iter().map(|c| self.nodes[c.0 as usize].leaf_bounds()),
        ))
    }

    /// Combined bounds of several elements.
    pub fn bounds_of(&self, ids: &[ElementId]) -> BeatlineResult<Rect> {
        Ok(union_bounds(
            ids.iter()
                .map(|&id| self.bounds(id))
                .collect::<BeatlineResult<Vec<_>>>()?,
        ))
    }

    /// Translate `id` and its whole subtree by `by`.
    pub fn shift(&mut self, id: ElementId, by: Vec2) -> BeatlineResult<()> {
        self.get(id)?;
        for node in self.subtree(id) {
            self.nodes[node.0 as usize].geometry.position += by;
        }
        Ok(())
    }

    /// Translate `id` so its bounds center lands on `point`.
    pub fn move_to(&mut self, id: ElementId, point: Point) -> BeatlineResult<()> {
        let center = self.bounds(id)?.center();
        self.shift(id, point - center)
    }

    /// Scale by `factor` and rotate by `rotation` radians the whole subtree around `pivot`.
    pub fn transform_about(
        &mut self,
        id: ElementId,
        pivot: Point,
        factor: f64,
        rotation: f64,
    ) -> BeatlineResult<()> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(BeatlineError::construction(format!(
                "scale factor must be > 0, got {factor}"
            )));
        }
        self.get(id)?;
        let g = about(pivot, factor, rotation);
        for node in self.subtree(id) {
            let el = &mut self.nodes[node.0 as usize];
            let lc = if el.is_group() {
                Vec2::ZERO
            } else {
                el.local_bounds().center().to_vec2()
            };
            let moved = g * (el.geometry.position + lc);
            el.geometry.position = moved - lc;
            el.geometry.scale *= factor;
            el.geometry.rotation += rotation;
        }
        Ok(())
    }

    /// Leaves of the whole tree in paint order: tree order, then ascending `z_index` (stable).
    pub fn paint_order(&self) -> Vec<ElementId> {
        let mut leaves = self.leaves(Self::ROOT);
        leaves.sort_by_key(|id| self.nodes[id.0 as usize].z_index);
        leaves
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/tree.rs"]
mod tests;
