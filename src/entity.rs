use derive_more::*;

/// Gameplay role a tile's semantic type maps to.
/// The level engine decides what each role does; this only names them.
#[derive(Display, Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum EntityKind {
    Platform,
    Checkpoint,
    Portal,
    Spike,
    Door,
    Orb,
    Key,
    Bouncer,
}

impl EntityKind {

    pub const ALL: [EntityKind; 8] = [
        Self::Platform,
        Self::Checkpoint,
        Self::Portal,
        Self::Spike,
        Self::Door,
        Self::Orb,
        Self::Key,
        Self::Bouncer,
    ];

    /// Matches a semantic type label exactly. Labels are case sensitive.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Platform" => Some(Self::Platform),
            "Checkpoint" => Some(Self::Checkpoint),
            "Portal" => Some(Self::Portal),
            "Spike" => Some(Self::Spike),
            "Door" => Some(Self::Door),
            "Orb" => Some(Self::Orb),
            "Key" => Some(Self::Key),
            "Bouncer" => Some(Self::Bouncer),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Platform => "Platform",
            Self::Checkpoint => "Checkpoint",
            Self::Portal => "Portal",
            Self::Spike => "Spike",
            Self::Door => "Door",
            Self::Orb => "Orb",
            Self::Key => "Key",
            Self::Bouncer => "Bouncer",
        }
    }

    /// Blocks movement.
    pub fn is_solid(self) -> bool {
        matches!(self, Self::Platform | Self::Door)
    }

    /// Player can interact with it.
    pub fn is_interactive(self) -> bool {
        !matches!(self, Self::Platform)
    }

    /// Kills on contact.
    pub fn is_deadly(self) -> bool {
        matches!(self, Self::Spike)
    }

    pub fn is_creature(self) -> bool {
        matches!(self, Self::Bouncer)
    }
}

#[cfg(test)]
mod test {
    use super::EntityKind;

    #[test]
    fn labels_round_trip() {
        for kind in EntityKind::ALL {
            assert_eq!(Some(kind), EntityKind::from_label(kind.label()));
            assert_eq!(kind.label(), kind.to_string());
        }
    }

    #[test]
    fn unknown_labels() {
        assert_eq!(None, EntityKind::from_label("platform"));
        assert_eq!(None, EntityKind::from_label(""));
        assert_eq!(None, EntityKind::from_label("Ladder"));
    }

    #[test]
    fn roles() {
        assert!(EntityKind::Platform.is_solid());
        assert!(!EntityKind::Platform.is_interactive());
        assert!(EntityKind::Door.is_solid() && EntityKind::Door.is_interactive());
        assert!(EntityKind::Spike.is_deadly());
        assert!(EntityKind::Bouncer.is_creature());
        assert!(!EntityKind::Checkpoint.is_solid());
    }
}
