use super::{ElementId, PageHost};
use crate::error::HostError;

/// Build a CSS selector path that re-locates `id` without a live reference.
///
/// Walks up to the root, one `tag` segment per level, adding
/// `:nth-of-type(n)` when earlier siblings share the tag. An ancestor (or the
/// element itself) with an `id` attribute ends the walk as `tag#id`.
pub fn selector_path<H: PageHost + ?Sized>(host: &H, id: ElementId) -> Result<String, HostError> {
    let mut segments = Vec::new();
    let mut current = Some(id);

    while let Some(element) = current {
        let tag = host.tag_name(element)?;

        if let Some(dom_id) = host.dom_id(element)?.filter(|d| !d.is_empty()) {
            segments.push(format!("{tag}#{dom_id}"));
            break;
        }

        let nth = nth_of_type(host, element, &tag)?;
        if nth == 1 {
            segments.push(tag);
        } else {
            segments.push(format!("{tag}:nth-of-type({nth})"));
        }
        current = host.parent(element)?;
    }

    segments.reverse();
    Ok(segments.join(" > "))
}

/// 1-based position among preceding siblings with the same tag.
fn nth_of_type<H: PageHost + ?Sized>(host: &H, id: ElementId, tag: &str) -> Result<u32, HostError> {
    let mut nth = 1;
    let mut sibling = host.previous_sibling(id)?;
    while let Some(s) = sibling {
        if host.tag_name(s)? == tag {
            nth += 1;
        }
        sibling = host.previous_sibling(s)?;
    }
    Ok(nth)
}
