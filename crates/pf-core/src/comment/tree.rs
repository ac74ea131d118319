//! Comment tree builder
//!
//! Turns the flat comment log of a post into an ordered forest. Comments are
//! kept in an arena sorted by `(created_at, id)` and linked by index, so the
//! output does not depend on input order.
//!
//! A comment whose parent cannot be found on the same post becomes a root;
//! nothing is dropped. This is how replies to a deleted comment resurface.

use super::model::Comment;
use crate::types::{CommentId, PostId};
use serde::Serialize;
use std::collections::HashMap;

/// Deepest reply depth; a comment at this depth accepts no replies
pub const MAX_REPLY_DEPTH: usize = 3;

/// A comment with its replies
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentNode {
    /// The comment
    pub comment: Comment,
    /// Parent hops to the root (roots are 0)
    pub depth: usize,
    /// Direct replies in thread order
    pub replies: Vec<CommentNode>,
}

impl CommentNode {
    /// Check if this comment may receive a reply
    pub fn can_reply(&self) -> bool {
        self.depth < MAX_REPLY_DEPTH
    }

    /// Number of comments in this subtree, including this one
    pub fn count(&self) -> usize {
        1 + self.replies.iter().map(CommentNode::count).sum::<usize>()
    }
}

/// Ordered collection of comment trees for one post
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Forest {
    roots: Vec<CommentNode>,
}

impl Forest {
    /// Root nodes in thread order
    pub fn roots(&self) -> &[CommentNode] {
        &self.roots
    }

    /// Consume the forest, returning the root nodes
    pub fn into_roots(self) -> Vec<CommentNode> {
        self.roots
    }

    /// Number of root comments
    pub fn len(&self) -> usize {
        self.roots.len()
    }

    /// Check if there are no comments
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Number of comments across all trees
    pub fn total_count(&self) -> usize {
        self.roots.iter().map(CommentNode::count).sum()
    }

    /// Depth-first, pre-order traversal
    pub fn iter(&self) -> ForestIter<'_> {
        ForestIter {
            stack: self.roots.iter().rev().collect(),
        }
    }

    /// Find a node by comment ID
    pub fn find(&self, id: CommentId) -> Option<&CommentNode> {
        self.iter().find(|node| node.comment.id == id)
    }

    /// Depth of a comment, if present
    pub fn depth_of(&self, id: CommentId) -> Option<usize> {
        self.find(id).map(|node| node.depth)
    }

    /// Number of comments not yet resolved
    pub fn unresolved_count(&self) -> usize {
        self.iter().filter(|node| !node.comment.resolved).count()
    }
}

/// Pre-order iterator over a [`Forest`]
pub struct ForestIter<'a> {
    stack: Vec<&'a CommentNode>,
}

impl<'a> Iterator for ForestIter<'a> {
    type Item = &'a CommentNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.replies.iter().rev());
        Some(node)
    }
}

/// Builds comment forests
pub struct CommentTree;

impl CommentTree {
    /// Build the discussion forest for `post_id`
    ///
    /// Comments belonging to other posts are ignored.
    pub fn build(post_id: PostId, comments: impl IntoIterator<Item = Comment>) -> Forest {
        let mut arena: Vec<Comment> = comments
            .into_iter()
            .filter(|c| c.post_id == post_id)
            .collect();
        arena.sort_by(|a, b| a.thread_order(b));

        let mut index: HashMap<CommentId, usize> = HashMap::with_capacity(arena.len());
        for (i, comment) in arena.iter().enumerate() {
            index.entry(comment.id).or_insert(i);
        }

        let mut parents: Vec<Option<usize>> = arena
            .iter()
            .enumerate()
            .map(|(i, c)| {
                c.parent_id
                    .and_then(|p| index.get(&p).copied())
                    .filter(|&p| p != i)
            })
            .collect();
        break_cycles(&mut parents);

        let mut roots = Vec::new();
        let mut children: Vec<Vec<usize>> = vec![Vec::new(); arena.len()];
        for (i, parent) in parents.iter().enumerate() {
            match parent {
                Some(p) => children[*p].push(i),
                None => roots.push(i),
            }
        }

        let mut slots: Vec<Option<Comment>> = arena.into_iter().map(Some).collect();
        let roots = roots
            .into_iter()
            .filter_map(|i| build_node(i, 0, &mut slots, &children))
            .collect();

        Forest { roots }
    }
}

fn build_node(
    i: usize,
    depth: usize,
    slots: &mut [Option<Comment>],
    children: &[Vec<usize>],
) -> Option<CommentNode> {
    let comment = slots[i].take()?;
    let replies = children[i]
        .iter()
        .filter_map(|&child| build_node(child, depth + 1, slots, children))
        .collect();
    Some(CommentNode {
        comment,
        depth,
        replies,
    })
}

/// Detach the earliest member of every parent cycle so each chain ends at a root
fn break_cycles(parents: &mut [Option<usize>]) {
    const UNSEEN: u8 = 0;
    const ON_PATH: u8 = 1;
    const DONE: u8 = 2;

    let mut state = vec![UNSEEN; parents.len()];
    for start in 0..parents.len() {
        let mut path = Vec::new();
        let mut current = Some(start);

        while let Some(i) = current {
            match state[i] {
                DONE => break,
                ON_PATH => {
                    if let Some(pos) = path.iter().position(|&p| p == i) {
                        if let Some(&earliest) = path[pos..].iter().min() {
                            parents[earliest] = None;
                        }
                    }
                    break;
                }
                _ => {
                    state[i] = ON_PATH;
                    path.push(i);
                    current = parents[i];
                }
            }
        }

        for i in path {
            state[i] = DONE;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::UserId;
    use chrono::{Duration, TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn comment(id: u64, post: u64, parent: Option<u64>, minute: i64) -> Comment {
        Comment {
            id: CommentId(id),
            post_id: PostId(post),
            user_id: UserId(1),
            content: format!("comment {}", id),
            parent_id: parent.map(CommentId),
            resolved: false,
            created_at: Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
                + Duration::minutes(minute),
        }
    }

    fn shape(nodes: &[CommentNode]) -> Vec<(u64, usize, Vec<u64>)> {
        nodes
            .iter()
            .map(|n| {
                (
                    n.comment.id.0,
                    n.depth,
                    n.replies.iter().map(|r| r.comment.id.0).collect(),
                )
            })
            .collect()
    }

    #[test]
    fn test_dangling_parent_becomes_root() {
        let comments = vec![
            comment(1, 5, None, 0),
            comment(2, 5, Some(1), 1),
            comment(3, 5, Some(99), 2),
        ];

        let forest = CommentTree::build(PostId(5), comments);
        assert_eq!(forest.len(), 2);
        assert_eq!(
            shape(forest.roots()),
            vec![(1, 0, vec![2]), (3, 0, vec![])]
        );
        assert_eq!(forest.depth_of(CommentId(2)), Some(1));
        assert_eq!(forest.total_count(), 3);
    }

    #[test]
    fn test_siblings_ordered_by_time_then_id() {
        let comments = vec![
            comment(4, 1, Some(1), 5),
            comment(3, 1, Some(1), 5),
            comment(2, 1, Some(1), 2),
            comment(1, 1, None, 0),
        ];

        let forest = CommentTree::build(PostId(1), comments);
        assert_eq!(shape(forest.roots()), vec![(1, 0, vec![2, 3, 4])]);
    }

    #[test]
    fn test_depths() {
        let comments = vec![
            comment(10, 1, None, 0),
            comment(11, 1, Some(10), 1),
            comment(12, 1, Some(11), 2),
            comment(13, 1, Some(12), 3),
        ];

        let forest = CommentTree::build(PostId(1), comments);
        assert_eq!(forest.depth_of(CommentId(10)), Some(0));
        assert_eq!(forest.depth_of(CommentId(13)), Some(3));
        assert!(forest.find(CommentId(12)).unwrap().can_reply());
        assert!(!forest.find(CommentId(13)).unwrap().can_reply());
    }

    #[test]
    fn test_input_order_independent() {
        let comments = vec![
            comment(1, 1, None, 0),
            comment(2, 1, Some(1), 1),
            comment(3, 1, None, 1),
            comment(4, 1, Some(2), 3),
            comment(5, 1, Some(1), 3),
            comment(6, 1, Some(42), 0),
        ];

        let expected = CommentTree::build(PostId(1), comments.clone());

        let mut reversed = comments.clone();
        reversed.reverse();
        assert_eq!(CommentTree::build(PostId(1), reversed), expected);

        let mut rotated = comments.clone();
        rotated.rotate_left(2);
        assert_eq!(CommentTree::build(PostId(1), rotated), expected);

        let mut swapped = comments;
        swapped.swap(0, 4);
        swapped.swap(1, 3);
        assert_eq!(CommentTree::build(PostId(1), swapped), expected);
    }

    #[test]
    fn test_build_is_idempotent() {
        let comments = vec![comment(1, 1, None, 0), comment(2, 1, Some(1), 1)];
        let first = CommentTree::build(PostId(1), comments.clone());
        let second = CommentTree::build(PostId(1), comments);
        assert_eq!(first, second);
    }

    #[test]
    fn test_other_posts_ignored() {
        let comments = vec![
            comment(1, 1, None, 0),
            comment(2, 2, Some(1), 1),
            comment(3, 1, Some(2), 2),
        ];

        let forest = CommentTree::build(PostId(1), comments);
        assert_eq!(shape(forest.roots()), vec![(1, 0, vec![]), (3, 0, vec![])]);
    }

    #[test]
    fn test_cycle_does_not_drop_comments() {
        let comments = vec![
            comment(1, 1, Some(3), 0),
            comment(2, 1, Some(1), 1),
            comment(3, 1, Some(2), 2),
            comment(4, 1, Some(4), 3),
        ];

        let forest = CommentTree::build(PostId(1), comments);
        assert_eq!(forest.total_count(), 4);
        assert_eq!(shape(forest.roots()), vec![(1, 0, vec![2]), (4, 0, vec![])]);
        assert_eq!(forest.depth_of(CommentId(3)), Some(2));
    }

    #[test]
    fn test_iter_is_preorder() {
        let comments = vec![
            comment(1, 1, None, 0),
            comment(2, 1, Some(1), 1),
            comment(3, 1, Some(2), 2),
            comment(4, 1, None, 3),
            comment(5, 1, Some(1), 4),
        ];

        let forest = CommentTree::build(PostId(1), comments);
        let order: Vec<u64> = forest.iter().map(|n| n.comment.id.0).collect();
        assert_eq!(order, vec![1, 2, 3, 5, 4]);
    }

    #[test]
    fn test_unresolved_count() {
        let mut resolved = comment(2, 1, Some(1), 1);
        resolved.resolved = true;
        let forest = CommentTree::build(PostId(1), vec![comment(1, 1, None, 0), resolved]);
        assert_eq!(forest.unresolved_count(), 1);
    }

    #[test]
    fn test_empty() {
        let forest = CommentTree::build(PostId(1), Vec::new());
        assert!(forest.is_empty());
        assert_eq!(forest.total_count(), 0);
    }
}
