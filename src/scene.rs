//! Line-based scene format.
//!
//! One declaration per line; `#` starts a comment:
//!
//! ```text
//! node api 0 0 140 60
//! node db 320 200 140 60
//! edge api db smart "reads"
//! edge api api loop right
//! ```
//!
//! An edge's third word is either an [`EdgeKind`](crate::model::EdgeKind)
//! name or `loop <side>` for self-edges. Unknown kind and side names fall
//! back (`smart`, `top`) rather than failing, matching the always-render
//! policy of the routing core. Unknown node references are hard errors.

use crate::model::{EdgeKind, LoopSide, Obstacle};

#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("line {0}: unknown directive {1:?}")]
    UnknownDirective(usize, String),
    #[error("line {0}: expected {1}")]
    Missing(usize, &'static str),
    #[error("line {0}: invalid number {1:?}")]
    BadNumber(usize, String),
    #[error("line {0}: unknown node {1:?}")]
    UnknownNode(usize, String),
    #[error("line {0}: duplicate node {1:?}")]
    DuplicateNode(usize, String),
}

/// An edge declaration between two scene nodes.
#[derive(Debug, Clone)]
pub struct SceneEdge {
    pub from: String,
    pub to: String,
    pub kind: EdgeKind,
    /// Exit border for self-edges; ignored otherwise.
    pub loop_side: LoopSide,
    pub label: Option<String>,
}

/// A parsed scene. Nodes double as the routing obstacle set.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub nodes: Vec<Obstacle>,
    pub edges: Vec<SceneEdge>,
}

impl Scene {
    /// Parse the line-based scene format.
    pub fn parse(source: &str) -> Result<Self, SceneError> {
        let mut scene = Scene::default();

        for (i, raw) in source.lines().enumerate() {
            let lineno = i + 1;
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            // A quoted tail is the label; it may contain whitespace.
            let (line, label) = match line.find('"') {
                Some(start) => {
                    let rest = &line[start + 1..];
                    let end = rest
                        .rfind('"')
                        .ok_or(SceneError::Missing(lineno, "closing quote"))?;
                    (line[..start].trim_end(), Some(rest[..end].to_string()))
                }
                None => (line, None),
            };

            let mut words = line.split_whitespace();
            match words.next() {
                Some("node") => scene.parse_node(lineno, &mut words)?,
                Some("edge") => scene.parse_edge(lineno, &mut words, label)?,
                Some(other) => {
                    return Err(SceneError::UnknownDirective(lineno, other.to_string()));
                }
                None => {}
            }
        }

        Ok(scene)
    }

    fn parse_node<'a>(
        &mut self,
        lineno: usize,
        words: &mut impl Iterator<Item = &'a str>,
    ) -> Result<(), SceneError> {
        let id = words
            .next()
            .ok_or(SceneError::Missing(lineno, "node id"))?
            .to_string();
        if self.nodes.iter().any(|n| n.id == id) {
            return Err(SceneError::DuplicateNode(lineno, id));
        }

        let x = parse_number(lineno, words.next(), "x coordinate")?;
        let y = parse_number(lineno, words.next(), "y coordinate")?;
        let width = parse_number(lineno, words.next(), "width")?;
        let height = parse_number(lineno, words.next(), "height")?;

        self.nodes.push(Obstacle {
            id,
            x,
            y,
            width,
            height,
        });
        Ok(())
    }

    fn parse_edge<'a>(
        &mut self,
        lineno: usize,
        words: &mut impl Iterator<Item = &'a str>,
        label: Option<String>,
    ) -> Result<(), SceneError> {
        let from = words
            .next()
            .ok_or(SceneError::Missing(lineno, "source node id"))?
            .to_string();
        let to = words
            .next()
            .ok_or(SceneError::Missing(lineno, "target node id"))?
            .to_string();
        for id in [&from, &to] {
            if !self.nodes.iter().any(|n| n.id == *id) {
                return Err(SceneError::UnknownNode(lineno, id.clone()));
            }
        }

        let mut kind = EdgeKind::Smart;
        let mut loop_side = LoopSide::Top;
        if let Some(word) = words.next() {
            if word == "loop" {
                if let Some(side) = words.next() {
                    loop_side = LoopSide::from_str(side).unwrap_or(LoopSide::Top);
                }
            } else {
                kind = EdgeKind::from_str(word).unwrap_or(EdgeKind::Smart);
            }
        }

        self.edges.push(SceneEdge {
            from,
            to,
            kind,
            loop_side,
            label,
        });
        Ok(())
    }
}

fn parse_number(
    lineno: usize,
    word: Option<&str>,
    what: &'static str,
) -> Result<f64, SceneError> {
    let word = word.ok_or(SceneError::Missing(lineno, what))?;
    word.parse()
        .map_err(|_| SceneError::BadNumber(lineno, word.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic() {
        let scene = Scene::parse(
            r#"
            # two nodes, one routed edge
            node api 0 0 140 60
            node db 320 200 140 60
            edge api db smart "reads"
        "#,
        )
        .unwrap();

        assert_eq!(scene.nodes.len(), 2);
        assert_eq!(scene.edges.len(), 1);
        let edge = &scene.edges[0];
        assert_eq!(edge.kind, EdgeKind::Smart);
        assert_eq!(edge.label.as_deref(), Some("reads"));
    }

    #[test]
    fn test_parse_self_loop() {
        let scene = Scene::parse(
            "node a 0 0 100 60\n\
             edge a a loop right",
        )
        .unwrap();
        assert_eq!(scene.edges[0].loop_side, LoopSide::Right);
    }

    #[test]
    fn test_unknown_loop_side_falls_back_to_top() {
        let scene = Scene::parse(
            "node a 0 0 100 60\n\
             edge a a loop sideways",
        )
        .unwrap();
        assert_eq!(scene.edges[0].loop_side, LoopSide::Top);
    }

    #[test]
    fn test_unknown_kind_falls_back_to_smart() {
        let scene = Scene::parse(
            "node a 0 0 100 60\n\
             node b 200 0 100 60\n\
             edge a b wobbly",
        )
        .unwrap();
        assert_eq!(scene.edges[0].kind, EdgeKind::Smart);
    }

    #[test]
    fn test_label_keeps_spaces() {
        let scene = Scene::parse(
            "node a 0 0 100 60\n\
             node b 200 0 100 60\n\
             edge a b bezier \"reads and writes\"",
        )
        .unwrap();
        assert_eq!(scene.edges[0].label.as_deref(), Some("reads and writes"));
    }

    #[test]
    fn test_unknown_node_is_error() {
        let err = Scene::parse(
            "node a 0 0 100 60\n\
             edge a ghost",
        )
        .unwrap_err();
        assert!(matches!(err, SceneError::UnknownNode(2, _)));
    }

    #[test]
    fn test_duplicate_node_is_error() {
        let err = Scene::parse(
            "node a 0 0 100 60\n\
             node a 10 10 100 60",
        )
        .unwrap_err();
        assert!(matches!(err, SceneError::DuplicateNode(2, _)));
    }

    #[test]
    fn test_bad_number_is_error() {
        let err = Scene::parse("node a 0 zero 100 60").unwrap_err();
        assert!(matches!(err, SceneError::BadNumber(1, _)));
    }

    #[test]
    fn test_unknown_directive_is_error() {
        let err = Scene::parse("group a b c").unwrap_err();
        assert!(matches!(err, SceneError::UnknownDirective(1, _)));
    }
}
