//! Tests for tile categories, payload parsing and tile records

#[cfg(test)]
mod tests {
    use tilemaze::game::tile::{CategoryClass, Payload, Position, TileCategory, TileRecord};

    // Tests every code round-trips through its category
    // Verified by mapping weapons to 'I'
    #[test]
    fn test_category_codes() {
        for code in ["S", "E", "C", "W", "M", "K", "D", "A", "I", "O"] {
            let category = TileCategory::from_code(code).unwrap();
            assert_eq!(category.code().to_string(), code);
        }
        assert_eq!(TileCategory::from_code("X"), None);
        assert_eq!(TileCategory::from_code(""), None);
    }

    // Tests class assignment: walls alone, items none, everything else walkable
    // Verified by classing obstacles as walls
    #[test]
    fn test_category_classes() {
        assert_eq!(TileCategory::Wall.class(), Some(CategoryClass::Wall));
        assert_eq!(TileCategory::Item.class(), None);
        for category in [
            TileCategory::Start,
            TileCategory::End,
            TileCategory::Path,
            TileCategory::Monster,
            TileCategory::Key,
            TileCategory::Door,
            TileCategory::Weapon,
            TileCategory::Obstacle,
        ] {
            assert_eq!(category.class(), Some(CategoryClass::Walkable), "{category:?}");
        }
    }

    // Tests payload splitting on the first colon
    // Verified by splitting on the last colon
    #[test]
    fn test_payload_parse() {
        assert_eq!(
            Payload::parse("K:red"),
            Payload {
                code: "K",
                subcode: Some("red")
            }
        );
        assert_eq!(Payload::parse("C").subcode, None);
        assert_eq!(Payload::parse("D:").subcode, None);
        assert_eq!(Payload::parse("M:orc:chief").subcode, Some("orc:chief"));
    }

    // Tests records start hidden and reject unknown codes
    // Verified by revealing tiles at construction
    #[test]
    fn test_record_from_payload() {
        let record = TileRecord::from_payload(Position::new(2, 3), "M:goblin").unwrap();
        assert_eq!(record.category, TileCategory::Monster);
        assert_eq!(record.position, Position::new(2, 3));
        assert!(!record.revealed);
        assert_eq!(record.parsed_payload().subcode, Some("goblin"));

        assert!(TileRecord::from_payload(Position::default(), "Z:1").is_none());
    }

    // Tests consumed tiles become plain path
    // Verified by keeping the original payload
    #[test]
    fn test_consume() {
        let mut record = TileRecord::from_payload(Position::new(0, 0), "K:blue").unwrap();
        assert!(record.category.is_consumable());
        record.consume();

        assert_eq!(record.category, TileCategory::Path);
        assert_eq!(record.payload, "C");
        assert_eq!(record.class(), Some(CategoryClass::Walkable));
    }

    // Tests which categories are consumed on interaction
    // Verified by consuming monsters on contact
    #[test]
    fn test_is_consumable() {
        assert!(TileCategory::Door.is_consumable());
        assert!(TileCategory::Weapon.is_consumable());
        assert!(TileCategory::Item.is_consumable());
        assert!(!TileCategory::Monster.is_consumable());
        assert!(!TileCategory::End.is_consumable());
    }

    // Tests signed offsets refuse to go negative
    // Verified by wrapping on underflow
    #[test]
    fn test_position_offset() {
        let origin = Position::new(0, 0);
        assert_eq!(origin.offset((-1, 0)), None);
        assert_eq!(origin.offset((0, -1)), None);
        assert_eq!(origin.offset((1, 1)), Some(Position::new(1, 1)));
        assert_eq!(Position::new(3, 4).index(), [3, 4]);
    }
}
