use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

/// Kinds of entities in the industry graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Artist,
    Journalist,
    Playlist,
    RadioHost,
    Dj,
    Blog,
    Podcast,
    Outlet,
    Scene,
    Microgenre,
    Label,
    Venue,
}

impl NodeKind {
    /// True for the contact/outlet kinds that make sense as pitch targets.
    pub fn is_contact(self) -> bool {
        matches!(
            self,
            NodeKind::Journalist
                | NodeKind::Playlist
                | NodeKind::RadioHost
                | NodeKind::Dj
                | NodeKind::Blog
                | NodeKind::Podcast
                | NodeKind::Outlet
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Artist => "artist",
            NodeKind::Journalist => "journalist",
            NodeKind::Playlist => "playlist",
            NodeKind::RadioHost => "radio_host",
            NodeKind::Dj => "dj",
            NodeKind::Blog => "blog",
            NodeKind::Podcast => "podcast",
            NodeKind::Outlet => "outlet",
            NodeKind::Scene => "scene",
            NodeKind::Microgenre => "microgenre",
            NodeKind::Label => "label",
            NodeKind::Venue => "venue",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Closed set of relation types so scoring, traversal cost, and symmetry
/// checks stay exhaustive at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationType {
    SimilarTo,
    SameScene,
    SameMicrogenre,
    Collaborates,
    Influences,
    Supports,
    Crossover,
}

impl RelationType {
    /// Symmetric relations connect both endpoints equally; influences and
    /// supports point from source to target.
    pub fn is_symmetric(self) -> bool {
        !matches!(self, RelationType::Influences | RelationType::Supports)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RelationType::SimilarTo => "similar_to",
            RelationType::SameScene => "same_scene",
            RelationType::SameMicrogenre => "same_microgenre",
            RelationType::Collaborates => "collaborates",
            RelationType::Influences => "influences",
            RelationType::Supports => "supports",
            RelationType::Crossover => "crossover",
        }
    }
}

impl fmt::Display for RelationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction filter for edge queries, relative to the queried node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Outgoing,
    Incoming,
    #[default]
    Both,
}

/// An entity in the graph. Read-only snapshot per query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: Uuid,
    pub kind: NodeKind,
    pub name: String,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    /// Recent activity series (oldest first) feeding the pulse sub-signals;
    /// empty when the store has no signal for this entity.
    #[serde(default)]
    pub activity: Vec<f64>,
}

impl Node {
    /// An artist node with a fresh id and no activity series.
    pub fn artist(name: &str, country: Option<&str>, genres: &[&str]) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: NodeKind::Artist,
            name: name.to_owned(),
            country: country.map(str::to_owned),
            genres: genres.iter().map(|genre| (*genre).to_owned()).collect(),
            activity: Vec::new(),
        }
    }

    /// A contact node (journalist, playlist, radio host, ...) with a fresh id.
    pub fn contact(kind: NodeKind, name: &str, country: Option<&str>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            name: name.to_owned(),
            country: country.map(str::to_owned),
            genres: Vec::new(),
            activity: Vec::new(),
        }
    }

    /// Attaches an activity series (oldest first), builder style.
    pub fn with_activity(mut self, series: &[f64]) -> Self {
        self.activity = series.to_vec();
        self
    }
}

/// A typed, weighted relation between two nodes. Weight is in [0,1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub source: Uuid,
    pub target: Uuid,
    pub relation: RelationType,
    pub weight: f64,
}

impl Edge {
    pub fn touches(&self, node: Uuid) -> bool {
        self.source == node || self.target == node
    }

    /// The endpoint opposite `node`.
    pub fn other(&self, node: Uuid) -> Uuid {
        if self.source == node { self.target } else { self.source }
    }
}

/// An ordered walk through the graph: n nodes joined by n-1 edges.
#[derive(Debug, Clone, Serialize)]
pub struct GraphPath {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl GraphPath {
    pub fn degrees_of_separation(&self) -> usize {
        self.edges.len()
    }

    /// Sum of traversed edge weights, reported separately from any traversal
    /// cost the search used.
    pub fn total_weight(&self) -> f64 {
        self.edges.iter().map(|edge| edge.weight).sum()
    }

    /// Count of path edges per relation type, in stable relation order.
    pub fn relation_breakdown(&self) -> BTreeMap<RelationType, usize> {
        let mut breakdown = BTreeMap::new();
        for edge in &self.edges {
            *breakdown.entry(edge.relation).or_insert(0) += 1;
        }
        breakdown
    }
}

/// One ranked opportunity. Score is clamped to [0,1] and rounded to three
/// decimals at output time.
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub node: Node,
    pub score: f64,
    pub reasoning: String,
    pub common_connections: usize,
}
