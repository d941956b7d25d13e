use std::ops::Range;

use serde::Serialize;

use super::blocks::Block;

/// A heading block and the non-heading blocks that follow it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Group {
    /// Index of the heading in the block list.
    pub heading: usize,
    /// Indices of the child blocks, in order.
    pub children: Vec<usize>,
}

impl Group {
    /// Block indices covered by the group, heading included.
    pub fn block_indices(&self) -> Range<usize> {
        self.heading..self.children.last().map_or(self.heading + 1, |c| c + 1)
    }

    /// Line range from the heading to the end of the last child.
    pub fn lines(&self, blocks: &[Block]) -> Range<usize> {
        let start = blocks[self.heading].start;
        let last = self.children.last().copied().unwrap_or(self.heading);
        start..blocks[last].end
    }
}

/// Two-level view over a flat block list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GroupedBlocks {
    /// Blocks before the first heading.
    pub orphans: Vec<usize>,
    pub groups: Vec<Group>,
}

/// Groups blocks under the heading that precedes them. Single pass, no
/// parsing of its own.
pub fn group_blocks(blocks: &[Block]) -> GroupedBlocks {
    let mut grouped = GroupedBlocks::default();

    for (i, block) in blocks.iter().enumerate() {
        if block.is_heading() {
            grouped.groups.push(Group {
                heading: i,
                children: Vec::new(),
            });
        } else if let Some(group) = grouped.groups.last_mut() {
            group.children.push(i);
        } else {
            grouped.orphans.push(i);
        }
    }

    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{markup::Markup, parsing::blocks::parse_blocks};
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_input() {
        assert_eq!(group_blocks(&[]), GroupedBlocks::default());
    }

    #[test]
    fn orphans_then_groups() {
        let text = "lead in\n\n> quote\n\n## A\none\n\ntwo\n## B\n## C\n> c\n";
        let blocks = parse_blocks(text, &Markup::default());
        let grouped = group_blocks(&blocks);

        assert_eq!(grouped.orphans, vec![0, 1]);
        assert_eq!(
            grouped.groups,
            vec![
                Group {
                    heading: 2,
                    children: vec![3, 4]
                },
                Group {
                    heading: 5,
                    children: vec![]
                },
                Group {
                    heading: 6,
                    children: vec![7]
                },
            ]
        );
    }

    #[test]
    fn group_ranges() {
        let text = "## A\none\n\ntwo\n\n## B\n";
        let blocks = parse_blocks(text, &Markup::default());
        let grouped = group_blocks(&blocks);

        assert_eq!(grouped.groups[0].block_indices(), 0..3);
        assert_eq!(grouped.groups[0].lines(&blocks), 0..4);
        assert_eq!(grouped.groups[1].block_indices(), 3..4);
        assert_eq!(grouped.groups[1].lines(&blocks), 5..6);
    }
}
