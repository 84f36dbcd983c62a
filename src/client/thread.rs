use std::collections::{HashMap, HashSet};

use serde::Serialize;
use uuid::Uuid;

use crate::models::CommentResponse;

#[derive(Debug, Clone, Serialize)]
pub struct CommentNode {
    #[serde(flatten)]
    pub comment: CommentResponse,
    pub replies: Vec<CommentNode>,
}

impl CommentNode {
    /// Number of comments in this subtree, including this one.
    pub fn subtree_size(&self) -> usize {
        let mut count = 0;
        let mut pending = vec![self];
        while let Some(node) = pending.pop() {
            count += 1;
            pending.extend(node.replies.iter());
        }
        count
    }
}

// Flattens the subtree before dropping so long reply chains don't recurse
impl Drop for CommentNode {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.replies);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.replies);
        }
    }
}

struct Frame {
    comment: Option<CommentResponse>,
    replies: Vec<CommentNode>,
    // Children not yet visited, in reverse order
    pending: Vec<CommentResponse>,
}

impl Frame {
    fn new(comment: Option<CommentResponse>, mut children: Vec<CommentResponse>) -> Self {
        children.reverse();
        Self {
            comment,
            replies: Vec::new(),
            pending: children,
        }
    }
}

/// Rebuilds reply trees from a flat comment list using an index keyed by
/// parent id. Siblings keep their input order; comments whose parent is not
/// in the list become roots. Nesting depth is bounded by memory, not stack.
pub fn build_thread(comments: Vec<CommentResponse>) -> Vec<CommentNode> {
    let ids: HashSet<Uuid> = comments.iter().map(|c| c.id).collect();

    let mut children: HashMap<Option<Uuid>, Vec<CommentResponse>> = HashMap::new();
    for comment in comments {
        let parent = comment.parent_id.filter(|id| ids.contains(id));
        children.entry(parent).or_default().push(comment);
    }

    let roots = children.remove(&None).unwrap_or_default();
    let mut stack = vec![Frame::new(None, roots)];

    while let Some(frame) = stack.last_mut() {
        if let Some(comment) = frame.pending.pop() {
            let replies = children.remove(&Some(comment.id)).unwrap_or_default();
            stack.push(Frame::new(Some(comment), replies));
            continue;
        }

        let Some(Frame { comment, replies, .. }) = stack.pop() else {
            break;
        };
        match (comment, stack.last_mut()) {
            (Some(comment), Some(parent)) => parent.replies.push(CommentNode { comment, replies }),
            _ => return replies,
        }
    }

    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn comment(id: Uuid, parent_id: Option<Uuid>, text: &str) -> CommentResponse {
        CommentResponse {
            id,
            post_id: Uuid::nil(),
            user_id: Uuid::nil(),
            parent_id,
            comment: text.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            username: "alice1".to_string(),
            upvotes: 0,
            downvotes: 0,
            vote_status: None,
        }
    }

    #[test]
    fn nests_replies_under_their_parents() {
        let root = Uuid::new_v4();
        let reply = Uuid::new_v4();
        let nested = Uuid::new_v4();
        let other_root = Uuid::new_v4();

        let thread = build_thread(vec![
            comment(root, None, "root"),
            comment(reply, Some(root), "reply"),
            comment(other_root, None, "second root"),
            comment(nested, Some(reply), "nested"),
        ]);

        assert_eq!(thread.len(), 2);
        assert_eq!(thread[0].comment.id, root);
        assert_eq!(thread[1].comment.id, other_root);
        assert_eq!(thread[0].replies[0].comment.id, reply);
        assert_eq!(thread[0].replies[0].replies[0].comment.id, nested);
        assert_eq!(thread[0].subtree_size(), 3);
    }

    #[test]
    fn siblings_keep_input_order() {
        let root = Uuid::new_v4();
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();

        let thread = build_thread(vec![
            comment(root, None, "root"),
            comment(first, Some(root), "first"),
            comment(second, Some(root), "second"),
        ]);

        let replies: Vec<Uuid> = thread[0].replies.iter().map(|n| n.comment.id).collect();
        assert_eq!(replies, vec![first, second]);
    }

    #[test]
    fn orphans_become_roots() {
        let orphan = Uuid::new_v4();
        let thread = build_thread(vec![comment(orphan, Some(Uuid::new_v4()), "orphan")]);

        assert_eq!(thread.len(), 1);
        assert_eq!(thread[0].comment.id, orphan);
        assert!(thread[0].replies.is_empty());
    }

    #[test]
    fn empty_input_builds_empty_thread() {
        assert!(build_thread(Vec::new()).is_empty());
    }

    #[test]
    fn deep_reply_chains_do_not_overflow() {
        const DEPTH: usize = 100_000;

        let ids: Vec<Uuid> = (0..DEPTH).map(|_| Uuid::new_v4()).collect();
        let comments = ids
            .iter()
            .enumerate()
            .map(|(i, id)| comment(*id, i.checked_sub(1).map(|p| ids[p]), "deep"))
            .collect();

        let thread = build_thread(comments);
        assert_eq!(thread.len(), 1);
        assert_eq!(thread[0].subtree_size(), DEPTH);

        let mut node = &thread[0];
        let mut depth = 1;
        while let Some(next) = node.replies.first() {
            node = next;
            depth += 1;
        }
        assert_eq!(depth, DEPTH);
        assert_eq!(node.comment.id, ids[DEPTH - 1]);
    }
}
