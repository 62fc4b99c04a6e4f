//! Relay-style connections.
//!
//! Cursors are `base64("arrayconnection:<offset>")` over the sorted, filtered
//! result, so a cursor is only meaningful for the query that produced it.

use super::QueryError;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

const CURSOR_PREFIX: &str = "arrayconnection:";

/// `first` / `after` paging arguments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageArgs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
}

impl PageArgs {
    pub fn first(first: usize) -> Self {
        Self {
            first: Some(first),
            after: None,
        }
    }

    pub fn after(mut self, cursor: impl Into<String>) -> Self {
        self.after = Some(cursor.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge<T> {
    pub cursor: String,
    pub node: T,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub has_next_page: bool,
    pub has_previous_page: bool,
    pub start_cursor: Option<String>,
    pub end_cursor: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection<T> {
    pub edges: Vec<Edge<T>>,
    pub page_info: PageInfo,
    pub total_count: usize,
}

pub fn encode_cursor(offset: usize) -> String {
    STANDARD.encode(format!("{CURSOR_PREFIX}{offset}"))
}

pub fn decode_cursor(cursor: &str) -> Result<usize, QueryError> {
    let invalid = || QueryError::InvalidCursor(cursor.to_string());
    let bytes = STANDARD.decode(cursor).map_err(|_| invalid())?;
    let text = String::from_utf8(bytes).map_err(|_| invalid())?;
    text.strip_prefix(CURSOR_PREFIX)
        .and_then(|offset| offset.parse().ok())
        .ok_or_else(invalid)
}

impl<T> Connection<T> {
    /// Cuts one page out of the full result.
    ///
    /// The page starts right after the `after` cursor (or at the beginning) and
    /// holds at most `first` items (or everything that is left).
    pub fn paginate(items: Vec<T>, page: &PageArgs) -> Result<Self, QueryError> {
        let total_count = items.len();
        let start = match &page.after {
            Some(cursor) => decode_cursor(cursor)?.saturating_add(1).min(total_count),
            None => 0,
        };
        let end = match page.first {
            Some(first) => start.saturating_add(first).min(total_count),
            None => total_count,
        };

        let edges: Vec<Edge<T>> = items
            .into_iter()
            .enumerate()
            .skip(start)
            .take(end - start)
            .map(|(offset, node)| Edge {
                cursor: encode_cursor(offset),
                node,
            })
            .collect();

        let page_info = PageInfo {
            has_next_page: end < total_count,
            has_previous_page: start > 0,
            start_cursor: edges.first().map(|e| e.cursor.clone()),
            end_cursor: edges.last().map(|e| e.cursor.clone()),
        };

        Ok(Self {
            edges,
            page_info,
            total_count,
        })
    }

    pub fn nodes(&self) -> impl Iterator<Item = &T> {
        self.edges.iter().map(|e| &e.node)
    }

    pub fn into_nodes(self) -> Vec<T> {
        self.edges.into_iter().map(|e| e.node).collect()
    }

    /// Converts every node, keeping cursors and page info.
    pub fn try_map<U, E>(self, mut f: impl FnMut(T) -> Result<U, E>) -> Result<Connection<U>, E> {
        let edges = self
            .edges
            .into_iter()
            .map(|edge| {
                Ok(Edge {
                    cursor: edge.cursor,
                    node: f(edge.node)?,
                })
            })
            .collect::<Result<Vec<_>, E>>()?;
        Ok(Connection {
            edges,
            page_info: self.page_info,
            total_count: self.total_count,
        })
    }
}
