/// Active camera mode. Exactly one is active at a time; switching
/// re-seeds the mode-local smoothing state so the cut never pops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Isometric default rig orbiting the focus point.
    #[default]
    Isometric,
    /// Chase camera behind the vehicle.
    ThirdPerson,
    /// Fixed-height top-down follow.
    TopDown,
    /// Hood camera looking along the heading.
    FirstPerson,
    /// Slow orbiting chase camera.
    Cinematic,
    /// Unconstrained orbit/fly camera.
    Free,
}

impl ViewMode {
    /// The mode cycle, a closed loop of length six.
    pub fn next(&self) -> Self {
        match self {
            Self::Isometric => Self::ThirdPerson,
            Self::ThirdPerson => Self::TopDown,
            Self::TopDown => Self::FirstPerson,
            Self::FirstPerson => Self::Cinematic,
            Self::Cinematic => Self::Free,
            Self::Free => Self::Isometric,
        }
    }

    /// Human-readable name, used for the mode-switch notification.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Isometric => "Isometric View",
            Self::ThirdPerson => "Third Person",
            Self::TopDown => "Top Down",
            Self::FirstPerson => "First Person",
            Self::Cinematic => "Cinematic Chase",
            Self::Free => "Free Camera",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_cycle_closes_after_six() {
        let mut mode = ViewMode::Isometric;
        let mut visited = vec![mode];
        for _ in 0..6 {
            mode = mode.next();
            visited.push(mode);
        }
        assert_eq!(mode, ViewMode::Isometric);
        // All six modes visited exactly once before wrapping.
        let mut unique = visited[..6].to_vec();
        unique.sort_by_key(|m| *m as u8);
        unique.dedup();
        assert_eq!(unique.len(), 6);
    }
}
