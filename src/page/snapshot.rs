use std::collections::HashMap;

use super::{BoxMetrics, ElementId, PageHost};
use crate::error::HostError;
use crate::types::{ElementSnapshot, ElementStyle, PageSnapshot};

/// In-memory page host built from a serialized snapshot of the element tree.
///
/// Elements arrive in document order and every parent must precede its
/// children, which rules out cycles. Handles are the host-assigned keys.
pub struct SnapshotHost {
    url: String,
    elements: Vec<ElementSnapshot>,
    /// key -> position in `elements`
    index: HashMap<u32, usize>,
    previous_sibling: Vec<Option<ElementId>>,
}

impl SnapshotHost {
    pub fn new(snapshot: PageSnapshot) -> Result<Self, HostError> {
        let mut index = HashMap::with_capacity(snapshot.elements.len());
        let mut previous_sibling = Vec::with_capacity(snapshot.elements.len());
        // parent key (None = root level) -> last child seen so far
        let mut last_child: HashMap<Option<u32>, u32> = HashMap::new();

        for (position, element) in snapshot.elements.iter().enumerate() {
            if let Some(parent) = element.parent {
                if !index.contains_key(&parent) {
                    return Err(HostError::Unavailable(format!(
                        "element {} references parent {} that does not precede it",
                        element.key, parent
                    )));
                }
            }
            if index.insert(element.key, position).is_some() {
                return Err(HostError::Unavailable(format!(
                    "duplicate element key {}",
                    element.key
                )));
            }
            previous_sibling.push(last_child.insert(element.parent, element.key).map(ElementId));
        }

        Ok(Self {
            url: snapshot.url,
            elements: snapshot.elements,
            index,
            previous_sibling,
        })
    }

    /// Replace an element's computed style, as a style mutation would.
    pub fn update_style(&mut self, id: ElementId, style: ElementStyle) -> Result<(), HostError> {
        let position = self.position(id)?;
        self.elements[position].style = Some(style);
        Ok(())
    }

    fn position(&self, id: ElementId) -> Result<usize, HostError> {
        self.index.get(&id.0).copied().ok_or(HostError::UnknownElement(id))
    }

    fn get(&self, id: ElementId) -> Result<&ElementSnapshot, HostError> {
        let position = self.position(id)?;
        Ok(&self.elements[position])
    }
}

impl PageHost for SnapshotHost {
    fn url(&self) -> &str {
        &self.url
    }

    fn elements_by_tag(&self, tags: &[String]) -> Result<Vec<ElementId>, HostError> {
        Ok(self
            .elements
            .iter()
            .filter(|e| tags.iter().any(|t| t.eq_ignore_ascii_case(&e.tag)))
            .map(|e| ElementId(e.key))
            .collect())
    }

    fn tag_name(&self, id: ElementId) -> Result<String, HostError> {
        Ok(self.get(id)?.tag.to_ascii_lowercase())
    }

    fn dom_id(&self, id: ElementId) -> Result<Option<String>, HostError> {
        Ok(self.get(id)?.dom_id.clone())
    }

    fn text_content(&self, id: ElementId) -> Result<String, HostError> {
        Ok(self.get(id)?.text.clone())
    }

    fn computed_style(&self, id: ElementId) -> Result<ElementStyle, HostError> {
        self.get(id)?
            .style
            .clone()
            .ok_or_else(|| HostError::StyleUnavailable {
                element: id,
                reason: "no computed style in snapshot".to_string(),
            })
    }

    fn box_metrics(&self, id: ElementId) -> Result<BoxMetrics, HostError> {
        let element = self.get(id)?;
        Ok(BoxMetrics {
            offset_width: element.offset_width,
            offset_height: element.offset_height,
            client_rects: element.client_rects,
        })
    }

    fn parent(&self, id: ElementId) -> Result<Option<ElementId>, HostError> {
        Ok(self.get(id)?.parent.map(ElementId))
    }

    fn previous_sibling(&self, id: ElementId) -> Result<Option<ElementId>, HostError> {
        Ok(self.previous_sibling[self.position(id)?])
    }
}
