//! Container parameter recognition and construction idioms

use serde::{Deserialize, Serialize};

use wireplan_catalog::TypePath;

/// Container kinds the resolver recognizes for collection injection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainerKind {
    /// Fixed-size array of the element type
    Array,
    /// Growable contiguous list
    GrowableList,
    /// Doubly linked list
    LinkedList,
    /// Generic list interface
    List,
    /// Hash-backed set
    HashSet,
    /// Generic set interface
    Set,
    /// Most general collection interface
    Collection,
}

impl ContainerKind {
    /// Every recognized kind
    pub const ALL: [ContainerKind; 7] = [
        ContainerKind::Array,
        ContainerKind::GrowableList,
        ContainerKind::LinkedList,
        ContainerKind::List,
        ContainerKind::HashSet,
        ContainerKind::Set,
        ContainerKind::Collection,
    ];

    /// Construction idiom the code emitter uses for this kind
    pub fn idiom(&self) -> ConstructionIdiom {
        match self {
            ContainerKind::Array => ConstructionIdiom::FixedLiteral,
            ContainerKind::GrowableList | ContainerKind::LinkedList | ContainerKind::HashSet => {
                ConstructionIdiom::CopyFromList
            }
            ContainerKind::List | ContainerKind::Set | ContainerKind::Collection => {
                ConstructionIdiom::VariadicFactory
            }
        }
    }
}

/// How the code emitter materializes a recognized container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstructionIdiom {
    /// Array literal with the member expressions inline
    FixedLiteral,
    /// Single variadic factory call over the members
    VariadicFactory,
    /// Mutable container constructed by copying a list of the members
    CopyFromList,
}

/// Ordered container recognition table, most specific entries first
#[derive(Debug, Clone)]
pub struct ContainerTable {
    entries: Vec<(TypePath, ContainerKind)>,
}

impl ContainerTable {
    /// Table with the given entries, scanned in order
    pub fn new(entries: Vec<(TypePath, ContainerKind)>) -> Self {
        Self { entries }
    }

    /// Kind of the first entry matching `path`
    pub fn lookup(&self, path: &TypePath) -> Option<ContainerKind> {
        self.entries
            .iter()
            .find(|(entry, _)| entry == path)
            .map(|(_, kind)| *kind)
    }

    /// The table entries in scan order
    pub fn entries(&self) -> &[(TypePath, ContainerKind)] {
        &self.entries
    }
}

impl Default for ContainerTable {
    /// Conventional container paths of the host runtime
    fn default() -> Self {
        Self::new(vec![
            (TypePath::new("util.ArrayList"), ContainerKind::GrowableList),
            (TypePath::new("util.LinkedList"), ContainerKind::LinkedList),
            (TypePath::new("util.List"), ContainerKind::List),
            (TypePath::new("util.HashSet"), ContainerKind::HashSet),
            (TypePath::new("util.Set"), ContainerKind::Set),
            (TypePath::new("util.Collection"), ContainerKind::Collection),
        ])
    }
}
