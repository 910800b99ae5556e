//! Events that schedule a full light group resync.

/// Evaluation context of a change notification.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EvalMode {
    Viewport,
    Render,
}

/// One item named by a change notification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Changed {
    Material(usize),
    Light(usize),
    /// Any other data kind (objects, meshes, worlds, ...), identified for logging only.
    Other(String),
}

impl Changed {
    #[inline]
    pub fn is_group_owner(&self) -> bool {
        matches!(self, Changed::Material(_) | Changed::Light(_))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Trigger {
    /// Data set loaded from storage.
    Load,
    /// A render is about to begin.
    RenderStart,
    /// A group was created, linked, unlinked, deleted, or renamed, or a list flag changed.
    GroupListEdited,
    /// Data changed outside the group editing operations.
    Mutation { mode: EvalMode, changed: Vec<Changed> },
}

impl Trigger {
    /// Whether this trigger requires a pass. Mutations during render evaluation, and
    /// mutations that touch no material or light, do not.
    pub fn needs_sync(&self) -> bool {
        match self {
            Trigger::Load | Trigger::RenderStart | Trigger::GroupListEdited => true,
            Trigger::Mutation { mode, changed } => {
                *mode != EvalMode::Render && changed.iter().any(Changed::is_group_owner)
            }
        }
    }
}
