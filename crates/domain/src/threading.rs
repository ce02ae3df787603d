use std::collections::{HashMap, HashSet};

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use crate::error::CommentError;
use crate::models::Comment;

lazy_static! {
    static ref LEADING_MENTION: Regex =
        Regex::new(r"^@(\w+)").expect("mention pattern is a valid regex");
}

pub fn leading_mention(content: &str) -> Option<&str> {
    LEADING_MENTION
        .captures(content)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadedReply {
    #[serde(flatten)]
    pub comment: Comment,
    pub is_direct_reply: bool,
}

enum Link {
    Direct,
    Under(i64),
}

// 两层排序：直接回复按时间排列，每条后面紧跟挂在它下面的回复
// 优先用 reply_to_id，其次看开头的 @用户名；同名作者取最早的一条
// 多级链条统一挂到链头的直接回复下，保证每条回复只出现一次
pub fn organize_replies(parent_author: &str, replies: Vec<Comment>) -> Vec<ThreadedReply> {
    let known: HashSet<i64> = replies.iter().map(|r| r.id).collect();

    let links: HashMap<i64, Link> = replies
        .iter()
        .map(|reply| (reply.id, link_for(reply, parent_author, &replies, &known)))
        .collect();

    let mut direct: Vec<Comment> = Vec::new();
    let mut buckets: HashMap<i64, Vec<Comment>> = HashMap::new();

    for reply in replies {
        match root_of(reply.id, &links) {
            Some(root) if root != reply.id => buckets.entry(root).or_default().push(reply),
            _ => direct.push(reply),
        }
    }

    direct.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));

    let attached_total: usize = buckets.values().map(Vec::len).sum();
    let mut organized = Vec::with_capacity(direct.len() + attached_total);
    for head in direct {
        let mut attached = buckets.remove(&head.id).unwrap_or_default();
        attached.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));

        organized.push(ThreadedReply {
            comment: head,
            is_direct_reply: true,
        });
        organized.extend(attached.into_iter().map(|comment| ThreadedReply {
            comment,
            is_direct_reply: false,
        }));
    }

    organized
}

fn link_for(
    reply: &Comment,
    parent_author: &str,
    replies: &[Comment],
    known: &HashSet<i64>,
) -> Link {
    if let Some(target) = reply.reply_to_id {
        if target != reply.id && known.contains(&target) {
            return Link::Under(target);
        }
    }

    let Some(tag) = leading_mention(&reply.content) else {
        return Link::Direct;
    };

    if tag == parent_author {
        return Link::Direct;
    }

    replies
        .iter()
        .find(|other| other.id != reply.id && other.author_name == tag)
        .map_or(Link::Direct, |target| Link::Under(target.id))
}

// 出现环时把自己当作根
fn root_of(id: i64, links: &HashMap<i64, Link>) -> Option<i64> {
    let mut seen = HashSet::new();
    let mut current = id;

    loop {
        if !seen.insert(current) {
            return Some(id);
        }
        match links.get(&current)? {
            Link::Direct => return Some(current),
            Link::Under(next) => current = *next,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplyPlacement {
    pub parent_comment_id: i64,
    pub reply_to_id: Option<i64>,
}

// 回复一条回复时，挂到它的顶层评论下，并在 reply_to_id 里记下被回复的那条
pub fn place_reply(gbairai_id: i64, parent: &Comment) -> Result<ReplyPlacement, CommentError> {
    if parent.gbairai_id != gbairai_id {
        return Err(CommentError::ParentInOtherGbairai {
            parent_id: parent.id,
            expected: gbairai_id,
            actual: parent.gbairai_id,
        });
    }

    Ok(match parent.parent_comment_id {
        Some(top_level) => ReplyPlacement {
            parent_comment_id: top_level,
            reply_to_id: Some(parent.id),
        },
        None => ReplyPlacement {
            parent_comment_id: parent.id,
            reply_to_id: None,
        },
    })
}
