//! Zone-id printing and parsing, including the region-id prefix tree.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::field::Field;
use crate::format::context::{ParseContext, PrintContext};
use crate::format::offset::OffsetElement;
use crate::zone::{available_zone_ids, ZoneId, ZoneOffset};
use crate::Error;

/// Which zones an element accepts.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) enum ZoneKind {
    /// Any zone, falling back to the offset viewed as a zone.
    ZoneOrOffset,
    /// The strict zone of the temporal, never derived from its offset.
    ZoneId,
    /// Region ids only, used for the bracketed section of zoned date-times.
    RegionOnly,
}

/// A zone-id element.
///
/// The zone-name element compiles to this as well: names are looked up as
/// untranslated zone ids, so printing and parsing match the id element.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) struct ZoneIdElement {
    /// Which zones the element accepts.
    pub(crate) kind: ZoneKind,
}

impl ZoneIdElement {
    /// Print the zone id.
    pub(crate) fn print(&self, ctx: &mut PrintContext<'_>, buf: &mut String) -> Result<bool, Error> {
        let kind = self.kind;
        let zone = ctx.query(
            |temporal| match kind {
                ZoneKind::ZoneOrOffset => temporal.query_zone(),
                ZoneKind::ZoneId => temporal.query_zone_id(),
                ZoneKind::RegionOnly => temporal
                    .query_zone_id()
                    .filter(|zone| !matches!(zone, ZoneId::Offset(_))),
            },
            "zone id",
        )?;
        let Some(zone) = zone else {
            return Ok(false);
        };
        buf.push_str(&zone.id());
        Ok(true)
    }

    /// Parse a zone id: an offset, a prefixed offset, `Z`, or a region id
    /// matched through the prefix tree.
    pub(crate) fn parse(&self, ctx: &mut ParseContext, text: &str, position: isize) -> isize {
        let length = text.len();
        let pos = position as usize;
        if pos >= length {
            return !position;
        }
        let next_char = match text[pos..].chars().next() {
            Some(ch) => ch,
            None => return !position,
        };
        if next_char == '+' || next_char == '-' {
            return parse_offset_based(ctx, text, pos, pos, "", &OffsetElement::iso());
        }
        if let Some(end) = ctx.match_literal(text, pos, "UTC") {
            return parse_offset_based(ctx, text, pos, end, "UTC", &zero_offset_parser());
        }
        if let Some(end) = ctx.match_literal(text, pos, "GMT") {
            return parse_offset_based(ctx, text, pos, end, "GMT", &zero_offset_parser());
        }
        if let Some(end) = ctx.match_literal(text, pos, "UT") {
            return parse_offset_based(ctx, text, pos, end, "UT", &zero_offset_parser());
        }
        let tree = region_tree();
        match tree.root.match_node(ctx, text, pos) {
            Some((zone_id, end)) => {
                let zone = ZoneId::region(&zone_id);
                ctx.set_parsed_zone(zone);
                end as isize
            }
            None => {
                if ctx.char_equals(next_char, 'Z') {
                    ctx.set_parsed_zone(ZoneId::Offset(ZoneOffset::UTC));
                    (pos + 1) as isize
                } else {
                    !position
                }
            }
        }
    }
}

/// The offset parser used after a `UT`/`UTC`/`GMT` prefix, where a bare
/// prefix means zero.
fn zero_offset_parser() -> OffsetElement {
    OffsetElement {
        no_offset_text: "0".into(),
        pattern_type: 6,
    }
}

/// Parse the offset part of an offset-based zone id.
fn parse_offset_based(
    ctx: &mut ParseContext,
    text: &str,
    prefix_pos: usize,
    position: usize,
    prefix: &str,
    parser: &OffsetElement,
) -> isize {
    let bare_offset = prefix.is_empty();
    if position >= text.len() {
        ctx.set_parsed_zone(ZoneId::of_offset(prefix, ZoneOffset::UTC));
        return position as isize;
    }
    // '0' and 'Z' after a prefix are not part of a valid offset
    if let Some(ch) = text[position..].chars().next() {
        if ch == '0' || ctx.char_equals(ch, 'Z') {
            ctx.set_parsed_zone(ZoneId::of_offset(prefix, ZoneOffset::UTC));
            return position as isize;
        }
    }
    let mut sub_ctx = ctx.fresh();
    let end_pos = parser.parse(&mut sub_ctx, text, position as isize);
    if end_pos < 0 {
        if bare_offset {
            return !(prefix_pos as isize);
        }
        ctx.set_parsed_zone(ZoneId::of_offset(prefix, ZoneOffset::UTC));
        return position as isize;
    }
    let offset_secs = sub_ctx
        .current()
        .fields
        .get(&Field::OffsetSeconds)
        .copied()
        .unwrap_or_default();
    match ZoneOffset::of_total_seconds(offset_secs as i32) {
        Ok(offset) => {
            ctx.set_parsed_zone(ZoneId::of_offset(prefix, offset));
            end_pos
        }
        Err(_) => !(prefix_pos as isize),
    }
}

/// A node of the region-id prefix tree; edges carry key substrings.
#[derive(Debug, Clone, Default)]
struct TreeNode {
    /// Edge substring leading to this node; empty for the root.
    key: Box<str>,
    /// Complete zone id terminating at this node.
    value: Option<Box<str>>,
    /// Child nodes, keyed by distinct further substrings.
    children: Vec<TreeNode>,
}

impl TreeNode {
    /// Insert a zone id below this node.
    fn insert(&mut self, suffix: &str, full: &str) {
        if suffix.is_empty() {
            self.value = Some(full.into());
            return;
        }
        for child in &mut self.children {
            let common = common_prefix_len(&child.key, suffix);
            if common == 0 {
                continue;
            }
            if common == child.key.len() {
                child.insert(&suffix[common..], full);
                return;
            }
            // split the edge at the shared prefix
            let tail = TreeNode {
                key: child.key[common..].into(),
                value: child.value.take(),
                children: core::mem::take(&mut child.children),
            };
            child.key = child.key[..common].into();
            child.children.push(tail);
            child.insert(&suffix[common..], full);
            return;
        }
        self.children.push(TreeNode {
            key: suffix.into(),
            value: Some(full.into()),
            children: Vec::new(),
        });
    }

    /// Match the longest zone id at a position, returning it with the byte
    /// position after it.
    fn match_node(&self, ctx: &ParseContext, text: &str, pos: usize) -> Option<(String, usize)> {
        let mut best = self
            .value
            .as_deref()
            .map(|value| (String::from(value), pos));
        for child in &self.children {
            if let Some(end) = ctx.match_literal(text, pos, &child.key) {
                if let Some(found) = child.match_node(ctx, text, end) {
                    // longest match wins, falling back to the shorter match
                    // already recorded when extension fails
                    if best.as_ref().map_or(true, |(_, best_end)| found.1 >= *best_end) {
                        best = Some(found);
                    }
                }
            }
        }
        best
    }
}

/// Length of the common prefix of two strings, on a char boundary.
fn common_prefix_len(a: &str, b: &str) -> usize {
    let mut len = 0;
    for (ca, cb) in a.chars().zip(b.chars()) {
        if ca != cb {
            break;
        }
        len += ca.len_utf8();
    }
    len
}

/// An immutable prefix tree snapshot keyed by the zone-id set size.
#[derive(Debug)]
struct CachedTree {
    /// Number of zone ids the tree was built from.
    size: usize,
    /// Root node.
    root: TreeNode,
}

/// Build a tree from the currently available zone ids.
fn build_tree() -> CachedTree {
    let ids = available_zone_ids();
    let mut root = TreeNode::default();
    for id in &ids {
        root.insert(id, id);
    }
    CachedTree {
        size: ids.len(),
        root,
    }
}

#[cfg(feature = "std")]
fn region_tree() -> Arc<CachedTree> {
    use std::sync::RwLock;

    // Process-wide snapshot, rebuilt when the zone-id set size changes.
    // Concurrent rebuilds are acceptable; the trees are structurally equal.
    static CACHE: RwLock<Option<Arc<CachedTree>>> = RwLock::new(None);

    let size = available_zone_ids().len();
    if let Some(cached) = CACHE.read().expect("zone tree lock poisoned").clone() {
        if cached.size == size {
            return cached;
        }
    }
    let tree = Arc::new(build_tree());
    *CACHE.write().expect("zone tree lock poisoned") = Some(Arc::clone(&tree));
    tree
}

#[cfg(not(feature = "std"))]
fn region_tree() -> Arc<CachedTree> {
    Arc::new(build_tree())
}
