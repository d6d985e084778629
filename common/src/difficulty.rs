// ============================================================================
// Difficulty Modulator
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct DifficultyTier(pub u32);

impl DifficultyTier {
    pub const BASELINE: Self = Self(0);
    pub const MAX: Self = Self((DIFFICULTY_TABLE.len() - 1) as u32);

    // Tiers past the end of the table collapse onto the last row.
    #[must_use]
    pub fn clamped(self) -> Self {
        self.min(Self::MAX)
    }
}

impl From<u32> for DifficultyTier {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterOverride {
    pub speed_multiplier: f32,
    pub cone_angle_multiplier: f32,
    pub force_chase: bool,
}

impl ParameterOverride {
    pub const BASELINE: Self = Self {
        speed_multiplier: 1.0,
        cone_angle_multiplier: 1.0,
        force_chase: false,
    };
}

impl Default for ParameterOverride {
    fn default() -> Self {
        Self::BASELINE
    }
}

// Each row is complete, so a tier's parameters never depend on the tier that
// came before it.
pub const DIFFICULTY_TABLE: [ParameterOverride; 4] = [
    // 0: baseline
    ParameterOverride::BASELINE,
    // 1: faster patrol
    ParameterOverride {
        speed_multiplier: 1.5,
        cone_angle_multiplier: 1.0,
        force_chase: false,
    },
    // 2: wider cone
    ParameterOverride {
        speed_multiplier: 1.5,
        cone_angle_multiplier: 1.5,
        force_chase: false,
    },
    // 3: straight pursuit
    ParameterOverride {
        speed_multiplier: 1.5,
        cone_angle_multiplier: 1.5,
        force_chase: true,
    },
];

#[must_use]
pub fn apply(tier: DifficultyTier) -> ParameterOverride {
    DIFFICULTY_TABLE[tier.clamped().0 as usize]
}
