//! Land-use and material categories carried per cell and per vertex.

/// Closed set of element codes.
///
/// The discriminants are the integer codes written to the packed type buffer,
/// so they must stay stable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum ElementType {
    /// Plain ground. Every grid cell starts here.
    #[default]
    Land = 0,
    Road = 1,
    WaterPool = 2,
    Lawn = 3,
    /// Tree crown geometry.
    Canopy = 4,
    /// Tree trunk geometry.
    Trunk = 5,
    /// Stamped building pad on the grid.
    Building = 6,
    /// Free-standing building walls.
    HouseWall = 7,
    Roof = 8,
}

impl ElementType {
    /// All element types in code order.
    pub const ALL: [ElementType; 9] = [
        ElementType::Land,
        ElementType::Road,
        ElementType::WaterPool,
        ElementType::Lawn,
        ElementType::Canopy,
        ElementType::Trunk,
        ElementType::Building,
        ElementType::HouseWall,
        ElementType::Roof,
    ];

    /// The integer code written to type buffers.
    #[inline]
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Decode an integer code. Returns `None` for unknown codes.
    pub fn from_code(code: i32) -> Option<Self> {
        usize::try_from(code)
            .ok()
            .and_then(|idx| Self::ALL.get(idx).copied())
    }

    /// Returns `true` for codes that free-standing buildings may not overlap.
    pub fn blocks_construction(self) -> bool {
        matches!(self, ElementType::Road | ElementType::WaterPool)
    }

    /// Returns `true` for ground where trees may grow.
    pub fn supports_trees(self) -> bool {
        matches!(self, ElementType::Land | ElementType::Lawn)
    }

    /// Returns `true` for codes that only appear on decoration geometry,
    /// never in a type grid.
    pub fn is_prop(self) -> bool {
        matches!(
            self,
            ElementType::Canopy | ElementType::Trunk | ElementType::HouseWall | ElementType::Roof
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_match_discriminants() {
        for (idx, element) in ElementType::ALL.iter().enumerate() {
            assert_eq!(element.code(), idx as i32);
            assert_eq!(ElementType::from_code(idx as i32), Some(*element));
        }
    }

    #[test]
    fn test_unknown_codes_rejected() {
        assert_eq!(ElementType::from_code(-1), None);
        assert_eq!(ElementType::from_code(9), None);
    }

    #[test]
    fn test_default_is_land() {
        assert_eq!(ElementType::default(), ElementType::Land);
    }

    #[test]
    fn test_category_predicates() {
        assert!(ElementType::Road.blocks_construction());
        assert!(ElementType::WaterPool.blocks_construction());
        assert!(!ElementType::Building.blocks_construction());
        assert!(ElementType::Lawn.supports_trees());
        assert!(!ElementType::Road.supports_trees());
        assert!(ElementType::Roof.is_prop());
        assert!(!ElementType::Building.is_prop());
    }
}
