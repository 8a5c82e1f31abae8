use std::sync::Arc;
use uuid::Uuid;

/// "Cloned from" chain of a snapshot. The root identifies the clone family.
#[derive(Debug)]
pub struct Lineage {
    id: Uuid,
    parent: Option<Arc<Lineage>>,
}

impl Lineage {
    /// Start a new family
    pub fn root() -> Arc<Self> {
        Arc::new(Self {
            id: Uuid::new_v4(),
            parent: None,
        })
    }

    /// Extend `parent`'s chain by one link
    pub fn child(parent: &Arc<Lineage>) -> Arc<Self> {
        Arc::new(Self {
            id: Uuid::new_v4(),
            parent: Some(Arc::clone(parent)),
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn parent(&self) -> Option<&Arc<Lineage>> {
        self.parent.as_ref()
    }

    pub fn root_id(&self) -> Uuid {
        let mut link = self;
        while let Some(parent) = &link.parent {
            link = &**parent;
        }
        link.id
    }

    /// Number of links above this one
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut link = self;
        while let Some(parent) = &link.parent {
            depth += 1;
            link = &**parent;
        }
        depth
    }
}
