//! Clone buffer geometry.
//!
//! The [`Strip`] holds the content blocks in visual order.  [`Strip::rebuild`]
//! strips any previous clones, measures one canonical pass (the *sequence
//! width* `W`) and surrounds the canonical blocks with `buffer_size` full
//! repetitions on each side, so there is always content to show while the
//! engine shifts its offset by whole cycles.

use super::error::ScrollError;

// ───────────────────────────────────────── blocks ────────────

/// A piece of content that can be laid out on the strip.
///
/// Duplication is plain [`Clone`]; the strip tags each copy with a
/// [`CloneTag`] so it can be traced back to its original.
pub trait Block: Clone {
    /// Horizontal extent in pixels.
    fn width(&self) -> f64;
}

/// Which repetition a slot belongs to and which canonical block it copies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CloneTag {
    /// Repetition index relative to the canonical pass (`-2, -1, 1, 2` for a
    /// buffer of two; `0` marks a canonical block restored from the template).
    pub repetition: i32,
    /// Position of the source block inside the canonical pass.
    pub original: usize,
}

impl CloneTag {
    /// Label in `"<repetition>-<original>"` form, e.g. `"-1-3"`.
    pub fn label(&self) -> String {
        format!("{}-{}", self.repetition, self.original)
    }
}

/// One laid-out block.
#[derive(Debug, Clone)]
pub struct Slot<B> {
    pub block: B,
    /// `None` for canonical blocks supplied by the host.
    pub tag: Option<CloneTag>,
    /// `true` for buffer clones; these are discarded by the next rebuild.
    pub is_clone: bool,
}

impl<B> Slot<B> {
    pub fn canonical(block: B) -> Self {
        Self {
            block,
            tag: None,
            is_clone: false,
        }
    }
}

// ───────────────────────────────────────── strip ─────────────

/// Ordered content blocks plus their generated clone buffer.
#[derive(Debug, Clone)]
pub struct Strip<B> {
    slots: Vec<Slot<B>>,
    /// Snapshot of the blocks as first supplied, used when a rebuild finds
    /// no canonical blocks left.
    template: Vec<B>,
}

impl<B: Block> Strip<B> {
    pub fn new(blocks: Vec<B>) -> Self {
        Self {
            slots: blocks.iter().cloned().map(Slot::canonical).collect(),
            template: blocks,
        }
    }

    /// Laid-out slots in visual order.
    pub fn slots(&self) -> &[Slot<B>] {
        &self.slots
    }

    /// Mutable access for hosts that edit content between rebuilds.
    pub fn slots_mut(&mut self) -> &mut Vec<Slot<B>> {
        &mut self.slots
    }

    /// Number of generated clones currently on the strip.
    pub fn clone_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_clone).count()
    }

    /// Total laid-out width.
    pub fn total_width(&self) -> f64 {
        self.slots.iter().map(|s| s.block.width()).sum()
    }

    /// Rebuild the clone buffer and return the sequence width `W`.
    ///
    /// Layout after a rebuild with `buffer_size = n`:
    /// `[rep -n] … [rep -1] [canonical] [rep 1] … [rep n]`.
    pub fn rebuild(&mut self, buffer_size: usize) -> Result<f64, ScrollError> {
        self.slots.retain(|s| !s.is_clone);

        let restored = self.slots.is_empty();
        let canonical: Vec<B> = if restored {
            tracing::debug!(
                template = self.template.len(),
                "no canonical blocks left, falling back to template"
            );
            self.template.clone()
        } else {
            self.slots.iter().map(|s| s.block.clone()).collect()
        };
        if canonical.is_empty() {
            return Err(ScrollError::EmptyContent);
        }

        let width = sequence_width(&canonical)?;

        let n = buffer_size as i32;
        let mut slots = Vec::with_capacity(canonical.len() * (2 * buffer_size + 1));
        for repetition in -n..0 {
            push_repetition(&mut slots, &canonical, repetition);
        }
        if restored {
            for (original, block) in canonical.iter().enumerate() {
                slots.push(Slot {
                    block: block.clone(),
                    tag: Some(CloneTag {
                        repetition: 0,
                        original,
                    }),
                    is_clone: false,
                });
            }
        } else {
            slots.append(&mut self.slots);
        }
        for repetition in 1..=n {
            push_repetition(&mut slots, &canonical, repetition);
        }
        self.slots = slots;

        Ok(width)
    }
}

fn push_repetition<B: Block>(slots: &mut Vec<Slot<B>>, canonical: &[B], repetition: i32) {
    for (original, block) in canonical.iter().enumerate() {
        slots.push(Slot {
            block: block.clone(),
            tag: Some(CloneTag {
                repetition,
                original,
            }),
            is_clone: true,
        });
    }
}

/// Sum of widths of one canonical pass.  Must come out finite and strictly
/// positive.
pub fn sequence_width<B: Block>(blocks: &[B]) -> Result<f64, ScrollError> {
    let mut total = 0.0;
    for (index, block) in blocks.iter().enumerate() {
        let width = block.width();
        if !width.is_finite() || width < 0.0 {
            return Err(ScrollError::InvalidBlockWidth { index, width });
        }
        total += width;
    }
    if !total.is_finite() {
        Err(ScrollError::SequenceWidthOverflow)
    } else if total > 0.0 {
        Ok(total)
    } else {
        Err(ScrollError::ZeroSequenceWidth)
    }
}
